//! Query parameter types for page handlers.

/// Raw query-string pairs, in request order.
pub type QueryPairs = Vec<(String, String)>;

/// Owner search parameters (`?first_name=`).
///
/// The parameter may be missing entirely, which searches all owners.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct FindOwnersParams {
    pub first_name: Option<String>,
}

impl FindOwnersParams {
    /// Pick the parameters out of raw query pairs.
    ///
    /// A repeated `first_name` keeps its first value, as form binding does.
    pub fn from_pairs(pairs: QueryPairs) -> Self {
        let first_name = pairs
            .into_iter()
            .find(|(name, _)| name == "first_name")
            .map(|(_, value)| value);
        Self { first_name }
    }
}
