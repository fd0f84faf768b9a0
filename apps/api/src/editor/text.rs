//! Derives list fields from the delimited text the user types.

/// Splits `text` on `delimiter`, trimming each entry and dropping empties.
pub fn split_list(text: &str, delimiter: char) -> Vec<String> {
    text.split(delimiter)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// Skills are typed as a comma-separated line.
pub fn split_skills(text: &str) -> Vec<String> {
    split_list(text, ',')
}

/// Education entries and job bullets are typed one per line.
pub fn split_lines(text: &str) -> Vec<String> {
    split_list(text, '\n')
}

/// Re-applies the trim/filter rule to a list that did not come from text input.
pub fn normalize_list(items: &mut Vec<String>) {
    items.retain(|s| !s.trim().is_empty());
    for item in items.iter_mut() {
        let trimmed = item.trim();
        if trimmed.len() != item.len() {
            *item = trimmed.to_string();
        }
    }
}
