use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

/// Runtime configuration for the recipe finder
#[derive(Debug, Deserialize, Clone)]
pub struct FinderConfig {
    /// Base URL of TheMealDB JSON API, without the key segment
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// API key path segment ("1" is the public test key)
    #[serde(default = "default_api_key")]
    pub api_key: String,
    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout: u64,
    /// Ingredients offered as checkboxes
    #[serde(default = "default_basic_ingredients")]
    pub basic_ingredients: Vec<String>,
}

impl Default for FinderConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            api_key: default_api_key(),
            timeout: default_timeout(),
            basic_ingredients: default_basic_ingredients(),
        }
    }
}

// Default value functions
fn default_base_url() -> String {
    "https://www.themealdb.com/api/json/v1".to_string()
}

fn default_api_key() -> String {
    "1".to_string()
}

fn default_timeout() -> u64 {
    30
}

fn default_basic_ingredients() -> Vec<String> {
    [
        "Chicken", "Beef", "Pork", "Tomato", "Cheese", "Onion", "Garlic", "Carrot",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}

impl FinderConfig {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded with the following priority (highest to lowest):
    /// 1. Environment variables with RECIPE_FINDER__ prefix
    /// 2. recipe-finder.toml file in current directory
    /// 3. Default values
    ///
    /// Environment variable format: RECIPE_FINDER__BASE_URL,
    /// RECIPE_FINDER__BASIC_INGREDIENTS=Chicken,Rice
    pub fn load() -> Result<Self, ConfigError> {
        load_config()
    }
}

/// Load configuration from file and environment variables
///
/// See [`FinderConfig::load`] for the precedence rules.
pub fn load_config() -> Result<FinderConfig, ConfigError> {
    let settings = Config::builder()
        // Optional config file (can be missing)
        .add_source(File::with_name("recipe-finder").required(false))
        .add_source(
            Environment::with_prefix("RECIPE_FINDER")
                .separator("__")
                .list_separator(",")
                .with_list_parse_key("basic_ingredients")
                .try_parsing(true),
        )
        .build()?;

    settings.try_deserialize()
}
