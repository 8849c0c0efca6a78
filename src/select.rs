use anyhow::Result;
use dialoguer::FuzzySelect;

/// Presents `lines` in an interactive fuzzy filter and returns the
/// index of the chosen one, or `None` when the operator cancels.
pub fn select_line(lines: &[String]) -> Result<Option<usize>> {
    if lines.is_empty() {
        return Ok(None);
    }

    let selection = FuzzySelect::new()
        .with_prompt("Select an instance")
        .items(lines)
        .default(0)
        .interact_opt()?;

    Ok(selection)
}
