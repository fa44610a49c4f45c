//! Typed decode of the debug payload (`aog_agent_to_assistant_json`).
//!
//! The payload is the only carrier of rich content. It is decoded in two
//! steps: [`DebugPayload::parse`] checks JSON syntax and the shape of every
//! matched variant, then [`DebugPayload::into_content_root`] selects the
//! rich response the turn is built from.

mod intents;
mod items;

use serde::{Deserialize, Deserializer};
use serde_json::Value;

use crate::error::PayloadError;

pub use intents::{
    InputValueData, ListSelectSpec, NewSurfaceSpec, OptionInfoPayload, PossibleIntent,
    SelectItem, SelectSpec, SelectionIntent, NEW_SURFACE_INTENT, SIGN_IN_INTENT,
};
pub use items::{
    image_parts, BasicCard, BrowseItem, Button, CarouselBrowse, Cell, ColumnProperty, Image,
    MediaObject, MediaResponsePayload, OpenUrlAction, ResponseItem, Row, SimpleResponse,
    TableCard,
};

// =============================================================================
// Payload envelope
// =============================================================================

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DebugPayload {
    #[serde(default, deserialize_with = "truthy")]
    pub expect_user_response: bool,
    #[serde(default)]
    pub expected_inputs: Option<Vec<ExpectedInput>>,
    #[serde(default)]
    pub final_response: Option<FinalResponse>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpectedInput {
    #[serde(default)]
    pub input_prompt: Option<InputPrompt>,
    /// Only the first entry is ever decoded, so later ones stay raw.
    #[serde(default, deserialize_with = "null_as_default")]
    pub possible_intents: Vec<Value>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InputPrompt {
    #[serde(default)]
    pub rich_initial_prompt: Option<RichResponse>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FinalResponse {
    #[serde(default)]
    pub rich_response: Option<RichResponse>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RichResponse {
    #[serde(default, deserialize_with = "null_as_default")]
    pub items: Vec<ResponseItem>,
    #[serde(default)]
    pub suggestions: Option<Vec<Suggestion>>,
    #[serde(default)]
    pub link_out_suggestion: Option<LinkOut>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Suggestion {
    #[serde(default)]
    pub title: Option<String>,
}

/// Link-out chip. The target comes from `url`, or `openUrlAction.url` on
/// newer payloads.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(try_from = "RawLinkOut")]
pub struct LinkOut {
    pub url: String,
    pub destination_name: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawLinkOut {
    destination_name: String,
    #[serde(default)]
    url: Option<String>,
    #[serde(default)]
    open_url_action: Option<OpenUrlAction>,
}

impl TryFrom<RawLinkOut> for LinkOut {
    type Error = String;

    fn try_from(raw: RawLinkOut) -> Result<Self, Self::Error> {
        let url = raw
            .url
            .or_else(|| raw.open_url_action.and_then(|action| action.url))
            .ok_or_else(|| "linkOutSuggestion: missing url".to_string())?;
        Ok(Self {
            url,
            destination_name: raw.destination_name,
        })
    }
}

/// Loose truthiness: `null`, `false`, `0`, `""` and absence are false.
fn truthy<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::Null => false,
        Value::Bool(b) => b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    })
}

/// Explicit `null` reads as the type's default, same as an absent key.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}

// =============================================================================
// Content root
// =============================================================================

/// The rich response a turn is built from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContentRoot {
    /// The assistant expects a further reply.
    ExpectedInput {
        expect_user_response: bool,
        prompt: RichResponse,
        selection: Option<SelectionIntent>,
    },
    /// The conversation is over.
    Final(RichResponse),
}

impl ContentRoot {
    pub fn mic_open(&self) -> bool {
        match self {
            Self::ExpectedInput {
                expect_user_response,
                ..
            } => *expect_user_response,
            Self::Final(_) => false,
        }
    }

    /// Splits the root into its rich response and first selection intent.
    pub fn into_parts(self) -> (RichResponse, Option<SelectionIntent>) {
        match self {
            Self::ExpectedInput {
                prompt, selection, ..
            } => (prompt, selection),
            Self::Final(rich) => (rich, None),
        }
    }
}

impl DebugPayload {
    /// # Errors
    ///
    /// `PayloadError::Malformed` if `json` is not JSON or a matched variant
    /// lacks a required field.
    pub fn parse(json: &str) -> Result<Self, PayloadError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Picks `expectedInputs[0].inputPrompt.richInitialPrompt` when
    /// `expectedInputs` is present, else `finalResponse.richResponse`.
    ///
    /// # Errors
    ///
    /// `PayloadError::MissingContentRoot` when the selected path is absent;
    /// `PayloadError::Malformed` when the first possible intent does not decode.
    pub fn into_content_root(self) -> Result<ContentRoot, PayloadError> {
        let Some(expected_inputs) = self.expected_inputs else {
            let rich = self
                .final_response
                .and_then(|r| r.rich_response)
                .ok_or(PayloadError::missing_content_root(
                    "finalResponse.richResponse",
                ))?;
            return Ok(ContentRoot::Final(rich));
        };

        let first = expected_inputs
            .into_iter()
            .next()
            .ok_or(PayloadError::missing_content_root("expectedInputs[0]"))?;
        let prompt = first
            .input_prompt
            .and_then(|p| p.rich_initial_prompt)
            .ok_or(PayloadError::missing_content_root(
                "expectedInputs[0].inputPrompt.richInitialPrompt",
            ))?;
        let selection = first
            .possible_intents
            .into_iter()
            .next()
            .map(|raw| {
                serde_json::from_value::<PossibleIntent>(raw)
                    .map(PossibleIntent::classify)
                    .map_err(|e| PayloadError::malformed(format!("possibleIntents[0]: {e}")))
            })
            .transpose()?;

        Ok(ContentRoot::ExpectedInput {
            expect_user_response: self.expect_user_response,
            prompt,
            selection,
        })
    }
}
