//! Owner search: filter normalisation and result-cardinality classification.

/// What a search should do next, decided purely by how many records matched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchOutcome<T> {
    /// Nothing matched; the search form is redisplayed with a field error.
    NotFound,
    /// Exactly one match; go straight to its detail page.
    Single(T),
    /// Several matches; the user picks one from the list.
    Multiple(Vec<T>),
}

impl<T> SearchOutcome<T> {
    /// Classify a result set by cardinality.
    pub fn classify(mut results: Vec<T>) -> Self {
        match results.len() {
            0 => SearchOutcome::NotFound,
            1 => match results.pop() {
                Some(only) => SearchOutcome::Single(only),
                None => SearchOutcome::NotFound,
            },
            _ => SearchOutcome::Multiple(results),
        }
    }
}

/// Normalise an optional search filter.
///
/// An absent filter becomes the empty string, which matches every record.
/// A present filter is used exactly as submitted, whitespace included.
pub fn normalize_filter(filter: Option<&str>) -> String {
    filter.unwrap_or_default().to_string()
}

/// Escape `LIKE` wildcards so user input is matched literally as a prefix.
///
/// The result is intended for a pattern of the form `$1 || '%'` with
/// `ESCAPE '\'`.
pub fn escape_like(input: &str) -> String {
    let mut escaped = String::with_capacity(input.len());
    for c in input.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}
