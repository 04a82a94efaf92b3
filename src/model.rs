use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::BrowserError;

/// Category shown for recipes the upstream did not categorize
pub const DEFAULT_CATEGORY: &str = "Uncategorized";

/// Upstream records carry up to this many numbered ingredient/measure pairs
pub const MAX_INGREDIENTS: usize = 20;

/// Card-level view of one recipe
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RecipeSummary {
    pub id: String,
    pub title: String,
    pub thumbnail_url: String,
    pub category: String,
}

/// Full view of one recipe as shown on the detail page
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RecipeDetail {
    pub summary: RecipeSummary,
    pub area: Option<String>,
    pub tags: Vec<String>,
    pub instructions: Vec<String>,
    /// "measure ingredient" lines in upstream order
    pub ingredients: Vec<String>,
    pub video_url: Option<String>,
    pub source_url: Option<String>,
}

/// Top-level envelope of every upstream response.
///
/// `meals` is `null` (or missing) when the upstream found nothing.
#[derive(Debug, Deserialize)]
pub struct MealsEnvelope {
    #[serde(default)]
    pub meals: Option<Vec<MealRecord>>,
}

/// One recipe object exactly as the upstream API sends it
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MealRecord {
    #[serde(rename = "idMeal")]
    pub id: Option<String>,
    #[serde(rename = "strMeal")]
    pub name: Option<String>,
    #[serde(rename = "strMealThumb")]
    pub thumbnail: Option<String>,
    #[serde(rename = "strCategory")]
    pub category: Option<String>,
    #[serde(rename = "strArea")]
    pub area: Option<String>,
    #[serde(rename = "strTags")]
    pub tags: Option<String>,
    #[serde(rename = "strInstructions")]
    pub instructions: Option<String>,
    #[serde(rename = "strYoutube")]
    pub youtube: Option<String>,
    #[serde(rename = "strSource")]
    pub source: Option<String>,
    /// Numbered `strIngredientN` / `strMeasureN` fields and anything else
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl MealRecord {
    fn numbered_field(&self, prefix: &str, n: usize) -> Option<&str> {
        self.extra
            .get(&format!("{}{}", prefix, n))
            .and_then(Value::as_str)
    }

    /// Collect the numbered ingredient/measure pairs, skipping blank ingredients
    pub fn ingredient_lines(&self) -> Vec<String> {
        (1..=MAX_INGREDIENTS)
            .filter_map(|n| {
                let ingredient = self.numbered_field("strIngredient", n)?.trim();
                if ingredient.is_empty() {
                    return None;
                }
                let measure = self.numbered_field("strMeasure", n).unwrap_or("").trim();
                if measure.is_empty() {
                    Some(ingredient.to_string())
                } else {
                    Some(format!("{} {}", measure, ingredient))
                }
            })
            .collect()
    }

    pub fn to_summary(&self) -> Result<RecipeSummary, BrowserError> {
        let id = non_blank(self.id.as_deref())
            .ok_or_else(|| BrowserError::UpstreamFormat("recipe without idMeal".to_string()))?;
        let title = non_blank(self.name.as_deref()).ok_or_else(|| {
            BrowserError::UpstreamFormat(format!("recipe {} without strMeal", id))
        })?;

        Ok(RecipeSummary {
            id,
            title,
            thumbnail_url: self.thumbnail.clone().unwrap_or_default(),
            category: non_blank(self.category.as_deref())
                .unwrap_or_else(|| DEFAULT_CATEGORY.to_string()),
        })
    }

    pub fn to_detail(&self) -> Result<RecipeDetail, BrowserError> {
        Ok(RecipeDetail {
            summary: self.to_summary()?,
            area: non_blank(self.area.as_deref()),
            tags: split_tags(self.tags.as_deref().unwrap_or("")),
            instructions: split_steps(self.instructions.as_deref().unwrap_or("")),
            ingredients: self.ingredient_lines(),
            video_url: non_blank(self.youtube.as_deref()),
            source_url: non_blank(self.source.as_deref()),
        })
    }
}

fn non_blank(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

/// Split a comma-separated tag string
pub fn split_tags(tags: &str) -> Vec<String> {
    tags.split(',')
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}

/// Split instructions into steps, one per non-blank line
pub fn split_steps(instructions: &str) -> Vec<String> {
    instructions
        .lines()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}
