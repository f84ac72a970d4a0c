#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use recipe_finder::{FinderError, RecipeDetail, RecipeProvider, RecipeSummary};

/// In-memory recipe service keyed by the exact ingredient list.
#[derive(Default)]
pub struct FakeProvider {
    pub names: Vec<String>,
    pub searches: HashMap<Vec<String>, Vec<RecipeSummary>>,
    pub details: HashMap<String, RecipeDetail>,
    pub fail_search: bool,
    pub fail_names: bool,
    pub calls: Mutex<Vec<String>>,
}

impl FakeProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_names(mut self, names: &[&str]) -> Self {
        self.names = names.iter().map(|s| s.to_string()).collect();
        self
    }

    pub fn with_search(mut self, ingredients: &[&str], results: Vec<RecipeSummary>) -> Self {
        let key = ingredients.iter().map(|s| s.to_string()).collect();
        self.searches.insert(key, results);
        self
    }

    pub fn with_detail(mut self, detail: RecipeDetail) -> Self {
        self.details.insert(detail.id.clone(), detail);
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: String) {
        self.calls.lock().unwrap().push(call);
    }
}

#[async_trait]
impl RecipeProvider for FakeProvider {
    fn provider_name(&self) -> &str {
        "fake"
    }

    async fn list_ingredient_names(&self) -> Result<Vec<String>, FinderError> {
        self.record("list".to_string());
        if self.fail_names {
            return Err(FinderError::ParseError("ingredient list unavailable".into()));
        }
        Ok(self.names.clone())
    }

    async fn search_by_ingredients(
        &self,
        ingredients: &[String],
    ) -> Result<Vec<RecipeSummary>, FinderError> {
        self.record(format!("search:{}", ingredients.join(",")));
        if self.fail_search {
            return Err(FinderError::StatusError {
                status: 500,
                endpoint: "filter.php".into(),
            });
        }
        Ok(self.searches.get(ingredients).cloned().unwrap_or_default())
    }

    async fn get_recipe_by_id(&self, id: &str) -> Result<Option<RecipeDetail>, FinderError> {
        self.record(format!("lookup:{}", id));
        Ok(self.details.get(id).cloned())
    }

    async fn random_recipe(&self) -> Result<Option<RecipeDetail>, FinderError> {
        self.record("random".to_string());
        let mut ids: Vec<&String> = self.details.keys().collect();
        ids.sort();
        Ok(ids.first().and_then(|id| self.details.get(*id)).cloned())
    }
}

pub fn summary(id: &str, name: &str) -> RecipeSummary {
    RecipeSummary {
        id: id.to_string(),
        name: name.to_string(),
        thumbnail: format!("https://img.example/{}.jpg", id),
    }
}

pub fn detail(id: &str, name: &str, ingredients: &[&str]) -> RecipeDetail {
    RecipeDetail {
        id: id.to_string(),
        name: name.to_string(),
        thumbnail: format!("https://img.example/{}.jpg", id),
        category: "Chicken".to_string(),
        area: "Japanese".to_string(),
        instructions: Some("Cook it.".to_string()),
        ingredients: ingredients.iter().map(|s| s.to_string()).collect(),
    }
}

pub fn basics() -> Vec<String> {
    ["Chicken", "Beef", "Pork", "Tomato", "Cheese", "Onion", "Garlic", "Carrot"]
        .iter()
        .map(|s| s.to_string())
        .collect()
}
