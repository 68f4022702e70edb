/// Display form of a question: lowercase, single-spaced, and stripped of
/// everything outside `a-z`, `0-9`, whitespace and `?.,!`.
///
/// Only ever shown or logged. The text sent to the model is the original.
pub fn normalize(question: &str) -> String {
    // Filter first, then collapse: a dropped symbol must not leave a double space.
    let kept: String = question
        .to_lowercase()
        .chars()
        .filter(|c| is_allowed(*c))
        .collect();
    kept.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn is_allowed(c: char) -> bool {
    c.is_ascii_lowercase() || c.is_ascii_digit() || c.is_whitespace() || "?.,!".contains(c)
}
