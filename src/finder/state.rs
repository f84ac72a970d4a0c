use log::{debug, info, warn};

use crate::error::FinderError;
use crate::model::{RecipeDetail, RecipeSummary};
use crate::providers::RecipeProvider;

use super::autocomplete::IngredientCatalog;
use super::detail::{DetailViewer, ViewerPhase};
use super::selection::IngredientSelection;

/// Shown when the latest search came back empty.
pub const NO_RESULTS_MESSAGE: &str = "No recipes found with the selected ingredients.";

/// A search request tagged with its sequence number.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchTicket {
    pub seq: u64,
    pub ingredients: Vec<String>,
}

impl SearchTicket {
    pub async fn fetch(
        &self,
        provider: &dyn RecipeProvider,
    ) -> Result<Vec<RecipeSummary>, FinderError> {
        provider.search_by_ingredients(&self.ingredients).await
    }
}

/// What a detail request asks the provider for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DetailRequest {
    ById(String),
    Random,
}

/// A detail request tagged with its sequence number.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailTicket {
    pub seq: u64,
    pub request: DetailRequest,
}

impl DetailTicket {
    /// Run the lookup; an unknown recipe becomes [`FinderError::NotFound`].
    pub async fn fetch(&self, provider: &dyn RecipeProvider) -> Result<RecipeDetail, FinderError> {
        match &self.request {
            DetailRequest::ById(id) => provider
                .get_recipe_by_id(id)
                .await?
                .ok_or_else(|| FinderError::NotFound(id.clone())),
            DetailRequest::Random => provider
                .random_recipe()
                .await?
                .ok_or_else(|| FinderError::NotFound("random recipe".to_string())),
        }
    }
}

/// Everything one session of the finder shows.
///
/// Transitions are synchronous. Network work is split into `begin_*`, which
/// hands out a ticket, and `complete_*`, which applies the answer for that
/// ticket unless a newer one has already been applied.
#[derive(Debug, Clone)]
pub struct FinderState {
    basics: Vec<String>,
    catalog: IngredientCatalog,
    selection: IngredientSelection,
    input: String,
    suggestions: Vec<String>,
    recipes: Vec<RecipeSummary>,
    error: Option<String>,
    failure: Option<String>,
    search_performed: bool,
    next_seq: u64,
    search_issued: u64,
    search_applied: u64,
    viewer: DetailViewer,
}

impl FinderState {
    pub fn new(basics: Vec<String>) -> Self {
        Self {
            basics,
            catalog: IngredientCatalog::default(),
            selection: IngredientSelection::new(),
            input: String::new(),
            suggestions: Vec::new(),
            recipes: Vec::new(),
            error: None,
            failure: None,
            search_performed: false,
            next_seq: 0,
            search_issued: 0,
            search_applied: 0,
            viewer: DetailViewer::new(),
        }
    }

    pub fn set_ingredient_names(&mut self, names: Vec<String>) {
        debug!("Loaded {} ingredient names", names.len());
        self.catalog = IngredientCatalog::new(names);
        self.suggestions = self.catalog.suggest(&self.input);
    }

    /// Clear any earlier failure before the ingredient list is requested.
    pub fn begin_ingredients(&mut self) {
        self.failure = None;
    }

    /// Apply the answer to the ingredient list request.
    ///
    /// On failure the catalog stays as it was and the session remains usable.
    pub fn complete_ingredients(&mut self, outcome: Result<Vec<String>, &FinderError>) {
        match outcome {
            Ok(names) => self.set_ingredient_names(names),
            Err(err) => {
                warn!("Could not load ingredient list: {}", err);
                self.failure = Some(err.to_string());
            }
        }
    }

    // ---- ingredient selection ----

    /// Select `ingredient`. On change the free-text input and suggestions are cleared.
    pub fn add_ingredient(&mut self, ingredient: &str) -> bool {
        if !self.selection.add(ingredient) {
            return false;
        }
        self.input.clear();
        self.suggestions.clear();
        true
    }

    /// Deselect `ingredient`. Emptying the selection resets the results view.
    pub fn remove_ingredient(&mut self, ingredient: &str) -> bool {
        if !self.selection.remove(ingredient) {
            return false;
        }
        if self.selection.is_empty() {
            self.reset_results();
        }
        true
    }

    /// Checkbox affordance for the basic ingredients.
    pub fn toggle_basic(&mut self, ingredient: &str, checked: bool) -> bool {
        if checked {
            self.add_ingredient(ingredient)
        } else {
            self.remove_ingredient(ingredient)
        }
    }

    pub fn is_selected(&self, ingredient: &str) -> bool {
        self.selection.contains(ingredient)
    }

    fn reset_results(&mut self) {
        self.search_performed = false;
        self.recipes.clear();
        if self.search_issued > self.search_applied {
            debug!("Discarding pending search after selection emptied");
        }
        self.search_applied = self.search_issued;
    }

    // ---- autocomplete ----

    pub fn set_input(&mut self, text: impl Into<String>) {
        self.input = text.into();
        self.suggestions = self.catalog.suggest(&self.input);
    }

    /// Select the suggestion at `index`, as if it had been added directly.
    pub fn pick_suggestion(&mut self, index: usize) -> bool {
        match self.suggestions.get(index).cloned() {
            Some(name) => self.add_ingredient(&name),
            None => false,
        }
    }

    // ---- search ----

    fn next_seq(&mut self) -> u64 {
        self.next_seq += 1;
        self.next_seq
    }

    pub fn begin_search(&mut self) -> SearchTicket {
        self.error = None;
        self.failure = None;
        let seq = self.next_seq();
        self.search_issued = seq;
        debug!("Search #{} for {:?}", seq, self.selection.as_slice());
        SearchTicket {
            seq,
            ingredients: self.selection.as_slice().to_vec(),
        }
    }

    /// Apply the answer to search `seq`. Returns false when it was discarded.
    ///
    /// A failure leaves the previous results and flag untouched.
    pub fn complete_search(
        &mut self,
        seq: u64,
        outcome: Result<Vec<RecipeSummary>, &FinderError>,
    ) -> bool {
        if seq <= self.search_applied || seq > self.search_issued {
            debug!("Discarding stale search #{}", seq);
            return false;
        }
        self.search_applied = seq;

        match outcome {
            Ok(recipes) => {
                info!("Search #{} returned {} recipes", seq, recipes.len());
                self.error = if recipes.is_empty() {
                    Some(NO_RESULTS_MESSAGE.to_string())
                } else {
                    None
                };
                self.recipes = recipes;
                self.search_performed = true;
            }
            Err(err) => {
                warn!("Search #{} failed: {}", seq, err);
                self.failure = Some(err.to_string());
            }
        }
        true
    }

    pub fn is_searching(&self) -> bool {
        self.search_issued > self.search_applied
    }

    // ---- detail viewer ----

    pub fn begin_detail(&mut self, summary: &RecipeSummary) -> DetailTicket {
        self.begin_detail_request(DetailRequest::ById(summary.id.clone()))
    }

    pub fn begin_surprise(&mut self) -> DetailTicket {
        self.begin_detail_request(DetailRequest::Random)
    }

    fn begin_detail_request(&mut self, request: DetailRequest) -> DetailTicket {
        self.failure = None;
        let seq = self.next_seq();
        self.viewer.request(seq);
        debug!("Detail #{} for {:?}", seq, request);
        DetailTicket { seq, request }
    }

    /// Apply the answer to detail request `seq`. Returns false when it was discarded.
    pub fn complete_detail(
        &mut self,
        seq: u64,
        outcome: Result<RecipeDetail, &FinderError>,
    ) -> bool {
        let (detail, failure) = match outcome {
            Ok(detail) => (Some(detail), None),
            Err(err) => (None, Some(err.to_string())),
        };
        if !self.viewer.complete(seq, detail) {
            debug!("Discarding stale detail #{}", seq);
            return false;
        }
        if let Some(message) = failure {
            warn!("Detail #{} failed: {}", seq, message);
            self.failure = Some(message);
        }
        true
    }

    pub fn close_detail(&mut self) {
        self.viewer.close();
    }

    // ---- accessors ----

    pub fn basics(&self) -> &[String] {
        &self.basics
    }

    pub fn selected(&self) -> &[String] {
        self.selection.as_slice()
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn suggestions(&self) -> &[String] {
        &self.suggestions
    }

    pub fn recipes(&self) -> &[RecipeSummary] {
        &self.recipes
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn failure(&self) -> Option<&str> {
        self.failure.as_deref()
    }

    pub fn search_performed(&self) -> bool {
        self.search_performed
    }

    pub fn detail(&self) -> Option<&RecipeDetail> {
        self.viewer.detail()
    }

    pub fn viewer_phase(&self) -> ViewerPhase {
        self.viewer.phase()
    }
}
