//! Turns whatever the generation backend returned into a [`Recipe`].
//!
//! Two stages run in order: a shape check that accepts an object which
//! already looks like a recipe, and text extraction that cleans up a JSON
//! string written by a language model before parsing it. Either way the
//! result is validated for the seven required fields before it becomes a
//! `Recipe`.

use std::fmt;

use recipe_core::{Ingredient, Recipe};
use recipe_logging::{recipe_debug, recipe_trace};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Number, Value};

use crate::error::{CandidateFailure, RecipeError, ServiceFailure};

/// Required recipe fields in canonical order.
pub const REQUIRED_FIELDS: [&str; 7] = [
    "id",
    "name",
    "ingredients",
    "instructions",
    "cookingTime",
    "servings",
    "imageUrl",
];

/// One value that may hold a recipe.
#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
    /// JSON text as written by the model, possibly decorated.
    Text(String),
    /// Already-parsed JSON object.
    Mapping(Map<String, Value>),
    /// Recipe-shaped record with any subset of fields filled in.
    Partial(PartialRecipe),
}

/// Recipe record whose fields may each be absent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PartialRecipe {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ingredients: Option<Vec<Ingredient>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instructions: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cooking_time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub servings: Option<Number>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

/// Where in a response body a recipe was looked for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CandidateSource {
    Response,
    RawResponse,
    WholePayload,
}

impl CandidateSource {
    /// Envelope field holding the candidate, if any.
    pub fn field(self) -> Option<&'static str> {
        match self {
            CandidateSource::Response => Some("response"),
            CandidateSource::RawResponse => Some("raw_response"),
            CandidateSource::WholePayload => None,
        }
    }
}

impl fmt::Display for CandidateSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.field() {
            Some(field) => write!(f, "`{field}` field"),
            None => write!(f, "whole payload"),
        }
    }
}

/// Candidates in priority order.
const CANDIDATES: [CandidateSource; 3] = [
    CandidateSource::Response,
    CandidateSource::RawResponse,
    CandidateSource::WholePayload,
];

/// A recipe together with the candidate it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Normalized {
    pub recipe: Recipe,
    pub source: CandidateSource,
}

pub trait Normalizer: Send + Sync {
    fn normalize(&self, body: &Value) -> Result<Normalized, RecipeError>;
}

/// Default normalizer for the `/generate` response envelope.
#[derive(Debug, Default, Clone, Copy)]
pub struct ResponseNormalizer;

impl Normalizer for ResponseNormalizer {
    fn normalize(&self, body: &Value) -> Result<Normalized, RecipeError> {
        normalize_response(body)
    }
}

/// Normalize a full response body.
///
/// An `error` string is surfaced verbatim. A body that already passes the
/// shape check is validated directly. Otherwise each candidate location is
/// tried in priority order and the first valid recipe wins.
pub fn normalize_response(body: &Value) -> Result<Normalized, RecipeError> {
    if let Some(message) = body
        .get("error")
        .and_then(Value::as_str)
        .filter(|message| !message.is_empty())
    {
        return Err(ServiceFailure::backend(message).into());
    }

    if let Value::Object(object) = body {
        if passes_shape_check(object) {
            recipe_trace!("response body passed the shape check");
            return validate(object).map(|recipe| Normalized {
                recipe,
                source: CandidateSource::WholePayload,
            });
        }
    }

    let mut attempts = Vec::new();
    for (candidate, payload) in candidate_payloads(body) {
        match normalize_payload(&payload) {
            Ok(recipe) => return Ok(Normalized {
                recipe,
                source: candidate,
            }),
            Err(error) => {
                recipe_debug!("candidate {} rejected: {}", candidate, error);
                attempts.push(CandidateFailure { candidate, error });
            }
        }
    }

    // With a single candidate its own error is more useful than the aggregate.
    if attempts.len() == 1 {
        if let Some(only) = attempts.pop() {
            return Err(only.error);
        }
    }
    Err(RecipeError::ExtractionExhausted { attempts })
}

/// Normalize one payload: extract an object from it, then validate.
pub fn normalize_payload(payload: &Payload) -> Result<Recipe, RecipeError> {
    let object = extract(payload)?;
    validate(&object)
}

/// Produce a JSON object from a payload without checking its fields.
pub fn extract(payload: &Payload) -> Result<Map<String, Value>, RecipeError> {
    match payload {
        Payload::Text(raw) => {
            let cleaned = clean_generated_text(raw);
            match serde_json::from_str::<Value>(&cleaned) {
                Ok(Value::Object(object)) => Ok(object),
                Ok(_) => Err(RecipeError::Parse {
                    cleaned,
                    detail: "expected a JSON object".to_string(),
                }),
                Err(err) => Err(RecipeError::Parse {
                    cleaned,
                    detail: err.to_string(),
                }),
            }
        }
        Payload::Mapping(object) => Ok(object.clone()),
        Payload::Partial(partial) => match serde_json::to_value(partial) {
            Ok(Value::Object(object)) => Ok(object),
            Ok(other) => Err(RecipeError::Parse {
                cleaned: other.to_string(),
                detail: "expected a JSON object".to_string(),
            }),
            Err(err) => Err(RecipeError::Parse {
                cleaned: String::new(),
                detail: err.to_string(),
            }),
        },
    }
}

/// Remove `<think>` blocks and code fences, trim, and repair `\_` escapes.
pub fn clean_generated_text(raw: &str) -> String {
    let without_think = strip_think_blocks(raw);
    let without_fences = strip_code_fences(&without_think);
    without_fences.trim().replace("\\_", "_")
}

/// True when `id` and `name` are non-empty and both lists are arrays.
pub fn passes_shape_check(object: &Map<String, Value>) -> bool {
    let non_empty_str =
        |key: &str| matches!(object.get(key), Some(Value::String(value)) if !value.is_empty());
    let is_array = |key: &str| matches!(object.get(key), Some(Value::Array(_)));

    non_empty_str("id")
        && non_empty_str("name")
        && is_array("ingredients")
        && is_array("instructions")
}

/// Required fields that are absent or falsy, in canonical order.
pub fn missing_fields(object: &Map<String, Value>) -> Vec<&'static str> {
    REQUIRED_FIELDS
        .iter()
        .copied()
        .filter(|field| !object.get(*field).is_some_and(is_present))
        .collect()
}

/// Check the required fields and convert the object into a [`Recipe`].
pub fn validate(object: &Map<String, Value>) -> Result<Recipe, RecipeError> {
    let missing = missing_fields(object);
    if !missing.is_empty() {
        return Err(RecipeError::Validation { missing });
    }

    let value = Value::Object(object.clone());
    serde_json::from_value(value).map_err(|err| RecipeError::Parse {
        cleaned: Value::Object(object.clone()).to_string(),
        detail: err.to_string(),
    })
}

fn is_present(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(flag) => *flag,
        Value::Number(number) => number.as_f64().is_some_and(|n| n != 0.0),
        Value::String(text) => !text.is_empty(),
        // Lists only have to exist; an empty list is not a missing field.
        Value::Array(_) | Value::Object(_) => true,
    }
}

fn candidate_payloads(body: &Value) -> Vec<(CandidateSource, Payload)> {
    let has_envelope = CANDIDATES
        .iter()
        .filter_map(|candidate| candidate.field())
        .any(|field| body.get(field).is_some());

    CANDIDATES
        .iter()
        .filter_map(|&candidate| {
            let value = match candidate.field() {
                Some(field) => body.get(field)?,
                // A body carrying an envelope field is not itself a recipe.
                None if has_envelope => return None,
                None => body,
            };
            let payload = match value {
                Value::String(text) => Payload::Text(text.clone()),
                Value::Object(object) => Payload::Mapping(object.clone()),
                _ => return None,
            };
            Some((candidate, payload))
        })
        .collect()
}

fn strip_think_blocks(input: &str) -> String {
    const OPEN: &str = "<think>";
    const CLOSE: &str = "</think>";

    let mut out = String::with_capacity(input.len());
    let mut rest = input;
    while let Some(start) = rest.find(OPEN) {
        let after_open = &rest[start + OPEN.len()..];
        let Some(end) = after_open.find(CLOSE) else {
            // Unclosed block: keep the text as written.
            break;
        };
        out.push_str(&rest[..start]);
        rest = &after_open[end + CLOSE.len()..];
    }
    out.push_str(rest);
    out
}

/// Drops every "```json" (and one newline after it) and every "```" (and
/// one newline before it).
fn strip_code_fences(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut rest = input;
    while !rest.is_empty() {
        if let Some(after) = rest.strip_prefix("```json") {
            rest = after.strip_prefix('\n').unwrap_or(after);
        } else if let Some(after) = rest.strip_prefix("\n```") {
            rest = after;
        } else if let Some(after) = rest.strip_prefix("```") {
            rest = after;
        } else if let Some(ch) = rest.chars().next() {
            out.push(ch);
            rest = &rest[ch.len_utf8()..];
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::{clean_generated_text, strip_code_fences, strip_think_blocks};

    #[test]
    fn think_blocks_are_removed_non_greedily() {
        let input = "<think>a\nb</think>{\"x\":1}<think>c</think> tail";
        assert_eq!(strip_think_blocks(input), "{\"x\":1} tail");
    }

    #[test]
    fn unclosed_think_is_left_alone() {
        let input = "<think>never closed {\"x\":1}";
        assert_eq!(strip_think_blocks(input), input);
    }

    #[test]
    fn fences_and_adjacent_newlines_are_dropped() {
        assert_eq!(strip_code_fences("```json\n{}\n```"), "{}");
        assert_eq!(strip_code_fences("```\n{}\n```"), "\n{}");
        assert_eq!(strip_code_fences("plain"), "plain");
    }

    #[test]
    fn escaped_underscores_are_repaired_after_trimming() {
        let cleaned = clean_generated_text("  ```json\n{\"image\\_url\":\"a\\_b\"}\n```  ");
        assert_eq!(cleaned, "{\"image_url\":\"a_b\"}");
    }
}
