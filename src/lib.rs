//! Pick ingredients, search TheMealDB for recipes that use them, and read the
//! full recipe of any result.
//!
//! [`RecipeFinder`] owns one session: the selected ingredients, autocomplete
//! suggestions, the latest search results and the recipe currently shown.
//! The binary wraps it in a terminal interface ([`ui`]) or runs one-shot
//! commands ([`cli`]).
pub mod cli;
pub mod config;
pub mod error;
pub mod finder;
pub mod model;
pub mod providers;
pub mod ui;

pub use config::FinderConfig;
pub use error::FinderError;
pub use finder::{FinderState, RecipeFinder, ViewerPhase, NO_RESULTS_MESSAGE};
pub use model::{RecipeDetail, RecipeSummary};
pub use providers::{MealDbProvider, RecipeProvider};
