mod mealdb;

pub use mealdb::MealDbProvider;

use async_trait::async_trait;

use crate::error::FinderError;
use crate::model::{RecipeDetail, RecipeSummary};

/// Unified trait for remote recipe databases
#[async_trait]
pub trait RecipeProvider: Send + Sync {
    /// Get the provider name (e.g., "themealdb")
    fn provider_name(&self) -> &str;

    /// Every ingredient name the service knows, in service order
    async fn list_ingredient_names(&self) -> Result<Vec<String>, FinderError>;

    /// Recipes matching the given ingredient names; matching rules belong to the service
    async fn search_by_ingredients(
        &self,
        ingredients: &[String],
    ) -> Result<Vec<RecipeSummary>, FinderError>;

    /// Full record for one recipe, `None` when the id is unknown
    async fn get_recipe_by_id(&self, id: &str) -> Result<Option<RecipeDetail>, FinderError>;

    /// One recipe picked by the service at random
    async fn random_recipe(&self) -> Result<Option<RecipeDetail>, FinderError>;
}
