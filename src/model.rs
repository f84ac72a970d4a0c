use serde::{Deserialize, Deserializer};
use serde_json::{Map, Value};

use crate::error::FinderError;

/// Number of numbered ingredient fields (`strIngredient1` ..= `strIngredient20`)
/// carried by a full recipe record.
pub const INGREDIENT_FIELD_COUNT: usize = 20;

/// Shown in place of missing instructions.
pub const INSTRUCTIONS_FALLBACK: &str = "Instructions not available.";

/// Minimal recipe record returned by an ingredient search.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RecipeSummary {
    #[serde(rename = "idMeal", deserialize_with = "string_or_number")]
    pub id: String,
    #[serde(rename = "strMeal")]
    pub name: String,
    #[serde(rename = "strMealThumb", default, deserialize_with = "null_as_empty")]
    pub thumbnail: String,
}

/// Full recipe record shown in the detail overlay.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RecipeDetail {
    pub id: String,
    pub name: String,
    pub thumbnail: String,
    pub category: String,
    pub area: String,
    pub instructions: Option<String>,
    /// Populated ingredient fields in field-number order
    pub ingredients: Vec<String>,
}

impl RecipeDetail {
    /// Build a detail record from a raw TheMealDB meal object.
    ///
    /// The ingredient list keeps only populated `strIngredientN` fields, scanned
    /// from 1 to [`INGREDIENT_FIELD_COUNT`]. Blank instructions become `None`.
    pub fn from_record(record: &Map<String, Value>) -> Result<Self, FinderError> {
        let id = field(record, "idMeal")
            .ok_or_else(|| FinderError::ParseError("meal record has no idMeal".to_string()))?;
        let name = field(record, "strMeal")
            .ok_or_else(|| FinderError::ParseError(format!("meal {} has no strMeal", id)))?;

        let ingredients = (1..=INGREDIENT_FIELD_COUNT)
            .filter_map(|n| field(record, &format!("strIngredient{}", n)))
            .collect();

        Ok(RecipeDetail {
            id,
            name,
            thumbnail: field(record, "strMealThumb").unwrap_or_default(),
            category: field(record, "strCategory").unwrap_or_default(),
            area: field(record, "strArea").unwrap_or_default(),
            instructions: field(record, "strInstructions"),
            ingredients,
        })
    }

    /// Instructions text, or the fallback literal when absent.
    pub fn instructions_text(&self) -> &str {
        self.instructions.as_deref().unwrap_or(INSTRUCTIONS_FALLBACK)
    }

    /// Plain-text rendering of the detail overlay.
    pub fn to_text(&self) -> String {
        let mut text = format!("# {}\n\n", self.name);
        if !self.thumbnail.is_empty() {
            text.push_str(&format!("Image: {}\n", self.thumbnail));
        }
        text.push_str(&format!("Category: {}\n", self.category));
        text.push_str(&format!("Area: {}\n\n", self.area));
        text.push_str("Ingredients:\n");
        for ingredient in &self.ingredients {
            text.push_str(&format!("- {}\n", ingredient));
        }
        text.push_str("\nInstructions:\n");
        text.push_str(self.instructions_text());
        text.push('\n');
        text
    }
}

/// Value of `key` as stored, unless it is blank; numbers are accepted for ids.
fn field(record: &Map<String, Value>, key: &str) -> Option<String> {
    match record.get(key)? {
        Value::String(s) if !s.trim().is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum StringOrNumber {
    Text(String),
    Number(serde_json::Number),
}

fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match StringOrNumber::deserialize(deserializer)? {
        StringOrNumber::Text(s) => s,
        StringOrNumber::Number(n) => n.to_string(),
    })
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}
