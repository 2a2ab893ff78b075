use recipe_core::{Ingredient, Recipe};
use recipe_logging::{recipe_debug, recipe_info, recipe_warn};

use crate::client::RecipeService;
use crate::error::RecipeError;
use crate::normalize::Normalizer;
use crate::prompt::build_generation_message;

/// One submission: build the instruction, call the service once, normalize the answer.
pub async fn generate_recipe(
    service: &dyn RecipeService,
    normalizer: &dyn Normalizer,
    ingredients: &[Ingredient],
) -> Result<Recipe, RecipeError> {
    let message = build_generation_message(ingredients);
    recipe_debug!("generation message: {}", message);

    let body = service.generate(&message).await?;
    match normalizer.normalize(&body) {
        Ok(normalized) => {
            recipe_info!(
                "recipe '{}' taken from {}",
                normalized.recipe.name,
                normalized.source
            );
            Ok(normalized.recipe)
        }
        Err(err) => {
            if let RecipeError::Parse { cleaned, .. } = &err {
                recipe_debug!("unparseable recipe text: {}", cleaned);
            }
            recipe_warn!("normalization failed: {}", err);
            Err(err)
        }
    }
}
