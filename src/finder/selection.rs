/// Ordered set of chosen ingredients, in selection order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IngredientSelection {
    items: Vec<String>,
}

impl IngredientSelection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `ingredient` unless it is empty or already selected.
    pub fn add(&mut self, ingredient: &str) -> bool {
        if ingredient.is_empty() || self.contains(ingredient) {
            return false;
        }
        self.items.push(ingredient.to_string());
        true
    }

    /// Remove by exact match. Absent names are ignored.
    pub fn remove(&mut self, ingredient: &str) -> bool {
        let before = self.items.len();
        self.items.retain(|item| item != ingredient);
        self.items.len() != before
    }

    pub fn contains(&self, ingredient: &str) -> bool {
        self.items.iter().any(|item| item == ingredient)
    }

    pub fn as_slice(&self) -> &[String] {
        &self.items
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_keeps_selection_order() {
        let mut selection = IngredientSelection::new();
        assert!(selection.add("Onion"));
        assert!(selection.add("Beef"));
        assert_eq!(selection.as_slice(), ["Onion", "Beef"]);
    }

    #[test]
    fn test_add_twice_keeps_one() {
        let mut selection = IngredientSelection::new();
        assert!(selection.add("Chicken"));
        assert!(!selection.add("Chicken"));
        assert_eq!(selection.len(), 1);
    }

    #[test]
    fn test_add_empty_is_ignored() {
        let mut selection = IngredientSelection::new();
        assert!(!selection.add(""));
        assert!(selection.is_empty());
    }

    #[test]
    fn test_names_are_case_sensitive() {
        let mut selection = IngredientSelection::new();
        selection.add("Garlic");
        assert!(selection.add("garlic"));
        assert!(!selection.remove("GARLIC"));
        assert_eq!(selection.len(), 2);
    }

    #[test]
    fn test_remove_absent_is_noop() {
        let mut selection = IngredientSelection::new();
        selection.add("Pork");
        let before = selection.clone();
        assert!(!selection.remove("Tomato"));
        assert_eq!(selection, before);
    }
}
