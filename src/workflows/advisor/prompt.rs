use super::catalog::{Criterion, Provider};

/// Builds the scoring instruction sent to the model. Pure function of the
/// catalog and the use-case text; callers reject blank input before this.
pub fn build_prompt(use_case: &str) -> String {
    let providers = Provider::ordered()
        .iter()
        .map(|provider| provider.label())
        .collect::<Vec<_>>()
        .join(", ");

    let criteria = Criterion::ordered()
        .iter()
        .map(|criterion| format!("- {}", criterion.label()))
        .collect::<Vec<_>>()
        .join("\n");

    let example_row = Criterion::ordered()[0].label();
    let example_cells = format!(
        "{{\"{}\":5, \"{}\":4, ...}}",
        Provider::ordered()[0].label(),
        Provider::ordered()[1].label()
    );

    format!(
        "You are a cloud expert. Given the following use case text:\n\n\
\"\"\"{use_case}\"\"\"\n\n\
Score the following cloud providers ({providers}) on each of these criteria \
on a scale from 1 to 5:\n\n\
{criteria}\n\n\
Return ONLY a JSON object with the criteria as keys and for each criteria an \
object mapping providers to integer scores 1-5.\n\n\
Example:\n\n\
{{\n  \"{example_row}\": {example_cells},\n  ...\n}}\n"
    )
}
