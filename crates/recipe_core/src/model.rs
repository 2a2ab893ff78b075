use serde::{Deserialize, Serialize};
use serde_json::Number;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ingredient {
    pub name: String,
    /// Only ever filled in by the generation service.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quantity: Option<String>,
}

impl Ingredient {
    /// Build an ingredient from user input; blank names are rejected.
    pub fn from_user(name: &str) -> Option<Self> {
        let name = name.trim();
        if name.is_empty() {
            return None;
        }
        Some(Self {
            name: name.to_string(),
            quantity: None,
        })
    }

    /// `"1 lb chicken"`, or just the name when no quantity is known.
    pub fn display_line(&self) -> String {
        match self.quantity.as_deref().map(str::trim) {
            Some(quantity) if !quantity.is_empty() => format!("{quantity} {}", self.name),
            _ => self.name.clone(),
        }
    }
}

/// A generated recipe. Wire field names are camelCase.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recipe {
    pub id: String,
    pub name: String,
    pub ingredients: Vec<Ingredient>,
    pub instructions: Vec<String>,
    pub cooking_time: String,
    /// Any JSON number the service sends; only zero counts as missing.
    pub servings: Number,
    pub image_url: String,
}
