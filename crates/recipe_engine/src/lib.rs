//! Recipe engine: response normalization, the generation client, and effect execution.
mod client;
mod config;
mod engine;
mod error;
mod generate;
mod normalize;
mod prompt;
mod types;

pub use client::{RecipeService, ReqwestRecipeService};
pub use config::{ClientSettings, API_URL_ENV, DEFAULT_BASE_URL};
pub use engine::EngineHandle;
pub use error::{CandidateFailure, EngineError, FailureKind, RecipeError, ServiceFailure};
pub use generate::generate_recipe;
pub use normalize::{
    clean_generated_text, extract, missing_fields, normalize_payload, normalize_response,
    passes_shape_check, validate, CandidateSource, Normalized, Normalizer, PartialRecipe, Payload,
    ResponseNormalizer, REQUIRED_FIELDS,
};
pub use prompt::{build_generation_message, GenerateRequest};
pub use types::{EngineEvent, RequestId};
