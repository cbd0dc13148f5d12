// Utility functions

/// Converts a label into a kebab-case anchor, e.g. `Science & Research` -> `science-research`.
pub fn to_kebab_case(text: &str) -> String {
    text.to_lowercase()
        .split(|c: char| !c.is_alphanumeric())
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join("-")
}
