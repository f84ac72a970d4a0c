/// Inputs shorter than this produce no suggestions.
pub const MIN_QUERY_CHARS: usize = 2;

/// Read-only ingredient names used for free-text suggestions.
#[derive(Debug, Clone, Default)]
pub struct IngredientCatalog {
    names: Vec<String>,
}

impl IngredientCatalog {
    pub fn new(names: Vec<String>) -> Self {
        Self { names }
    }

    /// Catalog entries starting with `input`, ignoring case, in catalog order.
    pub fn suggest(&self, input: &str) -> Vec<String> {
        suggest(&self.names, input)
    }
}

/// Case-insensitive prefix filter over `reference`.
///
/// No sorting, no de-duplication and no cap: the reference order is kept.
pub fn suggest(reference: &[String], input: &str) -> Vec<String> {
    if input.chars().count() < MIN_QUERY_CHARS {
        return Vec::new();
    }
    let needle = input.to_lowercase();
    reference
        .iter()
        .filter(|name| name.to_lowercase().starts_with(&needle))
        .cloned()
        .collect()
}
