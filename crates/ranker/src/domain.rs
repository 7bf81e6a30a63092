//! Organization domain normalization.

/// Reduce user input such as `https://www.Example.com/about?x=1` to a bare
/// lower-cased host (`example.com`).
pub fn clean_domain(input: &str) -> String {
    let text = input.trim().to_lowercase();
    let text = text
        .strip_prefix("https://")
        .or_else(|| text.strip_prefix("http://"))
        .unwrap_or(&text);
    let text = text.strip_prefix("www.").unwrap_or(text);
    let end = text.find(['/', '?', '#']).unwrap_or(text.len());
    text[..end].trim().to_string()
}

/// Split a newline-separated domain list, dropping blank lines.
pub fn parse_domain_list(input: &str) -> Vec<String> {
    input
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .map(str::to_string)
        .collect()
}
