use recipe_core::Ingredient;
use serde::Serialize;

const RECIPE_SHAPE: &str = r#"{ "id": "string", "name": "string", "ingredients": [{"name": "string", "quantity": "string"}], "instructions": ["string"], "cookingTime": "string", "servings": number, "imageUrl": "string" }"#;

/// Body of `POST /generate`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GenerateRequest<'a> {
    pub message: &'a str,
}

/// Instruction sent to the model: the ingredient names plus the JSON shape to answer in.
pub fn build_generation_message(ingredients: &[Ingredient]) -> String {
    let names = ingredients
        .iter()
        .map(|ingredient| ingredient.name.as_str())
        .collect::<Vec<_>>()
        .join(", ");
    format!(
        "Generate a recipe using these ingredients: {names}. \
         Return a JSON object with this exact structure: {RECIPE_SHAPE}"
    )
}
