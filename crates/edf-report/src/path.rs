use std::path::MAIN_SEPARATOR;

/// Rewrite `/` and `\` to the platform separator and collapse runs of
/// separators into one.
pub fn normalize_separators(path: &str) -> String {
    let mut normalized = String::with_capacity(path.len());
    let mut previous_was_separator = false;
    for ch in path.chars() {
        if ch == '/' || ch == '\\' {
            if !previous_was_separator {
                normalized.push(MAIN_SEPARATOR);
            }
            previous_was_separator = true;
        } else {
            normalized.push(ch);
            previous_was_separator = false;
        }
    }
    normalized
}
