use crate::config::FinderConfig;
use crate::error::FinderError;
use crate::model::{RecipeDetail, RecipeSummary};
use crate::providers::RecipeProvider;
use async_trait::async_trait;
use log::debug;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::{Map, Value};
use std::time::Duration;

/// TheMealDB wraps every payload in `{"meals": ...}`. No data comes back as
/// `null`, and some endpoints answer with a bare message string instead.
#[derive(Deserialize)]
struct MealsEnvelope<T> {
    meals: Option<MealsField<T>>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum MealsField<T> {
    Records(Vec<T>),
    Message(String),
}

#[derive(Deserialize)]
struct IngredientEntry {
    #[serde(rename = "strIngredient")]
    name: Option<String>,
}

pub struct MealDbProvider {
    client: Client,
    base_url: String,
}

impl MealDbProvider {
    /// Create a new TheMealDB provider from configuration
    pub fn new(config: &FinderConfig) -> Result<Self, FinderError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout))
            .user_agent(concat!("recipe-finder/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(MealDbProvider {
            client,
            base_url: format!(
                "{}/{}",
                config.base_url.trim_end_matches('/'),
                config.api_key
            ),
        })
    }

    #[doc(hidden)]
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        MealDbProvider {
            client: Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    async fn fetch_meals<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        query: &[(&str, &str)],
    ) -> Result<Vec<T>, FinderError> {
        let url = format!("{}/{}", self.base_url, endpoint);
        debug!("GET {} {:?}", url, query);

        let response = self.client.get(&url).query(query).send().await?;
        if !response.status().is_success() {
            return Err(FinderError::StatusError {
                status: response.status().as_u16(),
                endpoint: endpoint.to_string(),
            });
        }

        let body = response.text().await?;
        let envelope: MealsEnvelope<T> = serde_json::from_str(&body)?;
        match envelope.meals {
            Some(MealsField::Records(records)) => Ok(records),
            Some(MealsField::Message(message)) => {
                debug!("{} answered without records: {}", endpoint, message);
                Ok(Vec::new())
            }
            None => Ok(Vec::new()),
        }
    }

    async fn fetch_detail(
        &self,
        endpoint: &str,
        query: &[(&str, &str)],
    ) -> Result<Option<RecipeDetail>, FinderError> {
        let records: Vec<Map<String, Value>> = self.fetch_meals(endpoint, query).await?;
        records
            .first()
            .map(RecipeDetail::from_record)
            .transpose()
    }
}

#[async_trait]
impl RecipeProvider for MealDbProvider {
    fn provider_name(&self) -> &str {
        "themealdb"
    }

    async fn list_ingredient_names(&self) -> Result<Vec<String>, FinderError> {
        let entries: Vec<IngredientEntry> =
            self.fetch_meals("list.php", &[("i", "list")]).await?;
        Ok(entries.into_iter().filter_map(|entry| entry.name).collect())
    }

    async fn search_by_ingredients(
        &self,
        ingredients: &[String],
    ) -> Result<Vec<RecipeSummary>, FinderError> {
        if ingredients.is_empty() {
            return Ok(Vec::new());
        }
        let joined = ingredients.join(",");
        self.fetch_meals("filter.php", &[("i", joined.as_str())])
            .await
    }

    async fn get_recipe_by_id(&self, id: &str) -> Result<Option<RecipeDetail>, FinderError> {
        self.fetch_detail("lookup.php", &[("i", id)]).await
    }

    async fn random_recipe(&self) -> Result<Option<RecipeDetail>, FinderError> {
        self.fetch_detail("random.php", &[]).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::{Matcher, Server};

    #[tokio::test]
    async fn test_list_ingredient_names() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", "/list.php")
            .match_query(Matcher::UrlEncoded("i".into(), "list".into()))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                r#"{"meals": [
                    {"idIngredient": "1", "strIngredient": "Chicken", "strDescription": null},
                    {"idIngredient": "2", "strIngredient": "Salmon", "strDescription": null},
                    {"idIngredient": "3", "strIngredient": null}
                ]}"#,
            )
            .create_async()
            .await;

        let provider = MealDbProvider::with_base_url(server.url());
        let names = provider.list_ingredient_names().await.unwrap();
        assert_eq!(names, vec!["Chicken", "Salmon"]);
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_search_joins_ingredients() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", "/filter.php")
            .match_query(Matcher::UrlEncoded("i".into(), "Chicken,Garlic".into()))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                r#"{"meals": [
                    {"strMeal": "Garlic Chicken", "strMealThumb": "https://img/1.jpg", "idMeal": "100"}
                ]}"#,
            )
            .create_async()
            .await;

        let provider = MealDbProvider::with_base_url(server.url());
        let results = provider
            .search_by_ingredients(&["Chicken".to_string(), "Garlic".to_string()])
            .await
            .unwrap();

        assert_eq!(results.len(), 1);
        assert_eq!(results[0].id, "100");
        assert_eq!(results[0].name, "Garlic Chicken");
        assert_eq!(results[0].thumbnail, "https://img/1.jpg");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_search_null_meals_is_empty() {
        let mut server = Server::new_async().await;
        let _m = server
            .mock("GET", "/filter.php")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_body(r#"{"meals": null}"#)
            .create_async()
            .await;

        let provider = MealDbProvider::with_base_url(server.url());
        let results = provider
            .search_by_ingredients(&["Unobtainium".to_string()])
            .await
            .unwrap();
        assert!(results.is_empty());
    }

    #[tokio::test]
    async fn test_search_without_ingredients_skips_request() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", "/filter.php")
            .match_query(Matcher::Any)
            .expect(0)
            .create_async()
            .await;

        let provider = MealDbProvider::with_base_url(server.url());
        let results = provider.search_by_ingredients(&[]).await.unwrap();
        assert!(results.is_empty());
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_lookup_message_string_is_not_found() {
        let mut server = Server::new_async().await;
        let _m = server
            .mock("GET", "/lookup.php")
            .match_query(Matcher::UrlEncoded("i".into(), "abc".into()))
            .with_status(200)
            .with_body(r#"{"meals": "Invalid ID"}"#)
            .create_async()
            .await;

        let provider = MealDbProvider::with_base_url(server.url());
        assert!(provider.get_recipe_by_id("abc").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_server_error_status() {
        let mut server = Server::new_async().await;
        let _m = server
            .mock("GET", "/random.php")
            .match_query(Matcher::Any)
            .with_status(503)
            .create_async()
            .await;

        let provider = MealDbProvider::with_base_url(server.url());
        let result = provider.random_recipe().await;
        assert!(matches!(
            result,
            Err(FinderError::StatusError { status: 503, .. })
        ));
    }

    #[tokio::test]
    async fn test_malformed_body_is_parse_error() {
        let mut server = Server::new_async().await;
        let _m = server
            .mock("GET", "/list.php")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_body("<html>maintenance</html>")
            .create_async()
            .await;

        let provider = MealDbProvider::with_base_url(server.url());
        let result = provider.list_ingredient_names().await;
        assert!(matches!(result, Err(FinderError::ParseError(_))));
    }

    #[test]
    fn test_new_appends_api_key() {
        let config = FinderConfig {
            base_url: "http://localhost:1234/api/json/v1/".to_string(),
            ..FinderConfig::default()
        };
        let provider = MealDbProvider::new(&config).unwrap();
        assert_eq!(provider.base_url, "http://localhost:1234/api/json/v1/1");
        assert_eq!(provider.provider_name(), "themealdb");
    }
}
