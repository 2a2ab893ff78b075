use std::fmt::Write;

use recipe_core::{AppViewModel, Phase, Recipe};

const GENERIC_FAILURE: &str = "Failed to generate recipe. Please try again.";

pub fn render(view: &AppViewModel) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "Ingredients:");
    for (number, row) in view.rows.iter().enumerate() {
        let shown = if row.trim().is_empty() { "(empty)" } else { row };
        let _ = writeln!(out, "  {}. {}", number + 1, shown);
    }

    match view.phase {
        Phase::Loading => {
            let _ = writeln!(out, "\nCrafting your perfect recipe...");
        }
        Phase::Failed => {
            let _ = writeln!(out, "\n{GENERIC_FAILURE}");
            if let Some(reason) = &view.error {
                let _ = writeln!(out, "  reason: {reason}");
            }
        }
        Phase::Ready => {
            for recipe in &view.recipes {
                out.push('\n');
                render_recipe(&mut out, recipe);
            }
        }
        Phase::Idle => {
            let hint = if view.can_submit {
                "Type `go` to generate a recipe."
            } else {
                "Add your ingredients and let's create something delicious!"
            };
            let _ = writeln!(out, "\n{hint}");
        }
    }

    out
}

fn render_recipe(out: &mut String, recipe: &Recipe) {
    let _ = writeln!(out, "== {} ==", recipe.name);
    let _ = writeln!(
        out,
        "Cooking time: {} | {} servings",
        recipe.cooking_time, recipe.servings
    );
    if !recipe.image_url.is_empty() {
        let _ = writeln!(out, "Image: {}", recipe.image_url);
    }
    let _ = writeln!(out, "Ingredients:");
    for ingredient in &recipe.ingredients {
        let _ = writeln!(out, "  - {}", ingredient.display_line());
    }
    let _ = writeln!(out, "Instructions:");
    for (number, step) in recipe.instructions.iter().enumerate() {
        let _ = writeln!(out, "  {}. {}", number + 1, step);
    }
}
