mod autocomplete;
mod detail;
mod selection;
mod state;

pub use autocomplete::{suggest, IngredientCatalog, MIN_QUERY_CHARS};
pub use detail::{DetailViewer, ViewerPhase};
pub use selection::IngredientSelection;
pub use state::{DetailRequest, DetailTicket, FinderState, SearchTicket, NO_RESULTS_MESSAGE};

use std::sync::Arc;

use crate::config::FinderConfig;
use crate::error::FinderError;
use crate::model::RecipeSummary;
use crate::providers::{MealDbProvider, RecipeProvider};

/// Session controller: owns the finder state and the provider it talks to.
///
/// Each async operation runs one request to completion. Front ends that keep
/// handling input while requests are in flight use the ticket API on
/// [`FinderState`] directly.
pub struct RecipeFinder {
    provider: Arc<dyn RecipeProvider>,
    state: FinderState,
}

impl RecipeFinder {
    pub fn new(provider: Arc<dyn RecipeProvider>, basics: Vec<String>) -> Self {
        Self {
            provider,
            state: FinderState::new(basics),
        }
    }

    /// Build a finder backed by TheMealDB using `config`
    pub fn from_config(config: &FinderConfig) -> Result<Self, FinderError> {
        let provider = MealDbProvider::new(config)?;
        Ok(Self::new(
            Arc::new(provider),
            config.basic_ingredients.clone(),
        ))
    }

    pub fn state(&self) -> &FinderState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut FinderState {
        &mut self.state
    }

    pub fn into_parts(self) -> (Arc<dyn RecipeProvider>, FinderState) {
        (self.provider, self.state)
    }

    /// Fetch the autocomplete reference list.
    ///
    /// On failure the list stays as it was and the failure is recorded; the
    /// session remains usable.
    pub async fn load_ingredients(&mut self) -> Result<(), FinderError> {
        self.state.begin_ingredients();
        match self.provider.list_ingredient_names().await {
            Ok(names) => {
                self.state.complete_ingredients(Ok(names));
                Ok(())
            }
            Err(err) => {
                self.state.complete_ingredients(Err(&err));
                Err(err)
            }
        }
    }

    pub fn add(&mut self, ingredient: &str) -> bool {
        self.state.add_ingredient(ingredient)
    }

    pub fn remove(&mut self, ingredient: &str) -> bool {
        self.state.remove_ingredient(ingredient)
    }

    pub fn set_input(&mut self, text: impl Into<String>) {
        self.state.set_input(text);
    }

    pub fn pick_suggestion(&mut self, index: usize) -> bool {
        self.state.pick_suggestion(index)
    }

    /// Look up recipes for the current selection and store the outcome.
    pub async fn search(&mut self) -> Result<(), FinderError> {
        let ticket = self.state.begin_search();
        match ticket.fetch(self.provider.as_ref()).await {
            Ok(recipes) => {
                self.state.complete_search(ticket.seq, Ok(recipes));
                Ok(())
            }
            Err(err) => {
                self.state.complete_search(ticket.seq, Err(&err));
                Err(err)
            }
        }
    }

    /// Fetch the full record for `summary` and show it.
    pub async fn open(&mut self, summary: &RecipeSummary) -> Result<(), FinderError> {
        let ticket = self.state.begin_detail(summary);
        self.run_detail(ticket).await
    }

    /// Show a random recipe.
    pub async fn surprise(&mut self) -> Result<(), FinderError> {
        let ticket = self.state.begin_surprise();
        self.run_detail(ticket).await
    }

    async fn run_detail(&mut self, ticket: DetailTicket) -> Result<(), FinderError> {
        match ticket.fetch(self.provider.as_ref()).await {
            Ok(detail) => {
                self.state.complete_detail(ticket.seq, Ok(detail));
                Ok(())
            }
            Err(err) => {
                self.state.complete_detail(ticket.seq, Err(&err));
                Err(err)
            }
        }
    }

    pub fn close(&mut self) {
        self.state.close_detail();
    }
}
