/// Canonicalize whitespace in extracted text.
///
/// Every whitespace run, newlines included, becomes a single space. The result is
/// then split on line boundaries, lines are trimmed, empty ones dropped, and the
/// survivors joined with a blank line. Because the first pass already removes
/// every newline, the output is a single paragraph; the line pass only guarantees
/// the shape of the output.
///
/// `normalize_text(normalize_text(x)) == normalize_text(x)` for every input.
pub fn normalize_text(text: &str) -> String {
    if text.trim().is_empty() {
        return String::new();
    }

    let collapsed = text.split_whitespace().collect::<Vec<_>>().join(" ");

    collapsed
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join("\n\n")
}
