//! Canonical (first, last, full) name reconstruction.

/// A normalized person name. `full` is always derived from `first` and `last`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolvedName {
    pub first: String,
    pub last: String,
    pub full: String,
}

/// Rebuild a name triple from partial fields.
///
/// When `last` is missing, the final whitespace-separated token of
/// `display_name` becomes the last name, and the remaining tokens fill
/// `first` if it is missing too. A single-token display name only ever
/// fills `first`. The full name is recomputed from the parts and never
/// copied from `display_name`, which upstream sources often leave stale.
///
/// Exception: a display name whose tokens equal `first` (e.g. first
/// "Mary Ann", display "Mary Ann") is ignored, so `last` stays empty rather
/// than becoming "Ann". This keeps `resolve` stable when fed its own output.
pub fn resolve(first: Option<&str>, last: Option<&str>, display_name: Option<&str>) -> ResolvedName {
    let mut first = first.map(str::trim).unwrap_or_default().to_string();
    let mut last = last.map(str::trim).unwrap_or_default().to_string();
    let display = display_name.map(str::trim).unwrap_or_default();

    // A display name that merely repeats `first` carries no last name.
    let repeats_first = display.split_whitespace().eq(first.split_whitespace());

    if last.is_empty() && !display.is_empty() && !repeats_first {
        let parts: Vec<&str> = display.split_whitespace().collect();
        match parts.as_slice() {
            [only] => {
                if first.is_empty() {
                    first = (*only).to_string();
                }
            }
            [head @ .., tail] => {
                last = (*tail).to_string();
                if first.is_empty() {
                    first = head.join(" ");
                }
            }
            [] => {}
        }
    }

    let full = format!("{first} {last}").trim().to_string();
    ResolvedName { first, last, full }
}
