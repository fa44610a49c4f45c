//! Selection intents offered alongside an expected-input prompt.

use serde::{Deserialize, Serialize};

use super::items::Image;

pub const SIGN_IN_INTENT: &str = "actions.intent.SIGN_IN";
pub const NEW_SURFACE_INTENT: &str = "actions.intent.NEW_SURFACE";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PossibleIntent {
    pub intent: String,
    #[serde(default)]
    pub input_value_data: Option<InputValueData>,
}

/// Value spec attached to an intent. Which fields are present depends on
/// the `@type` the service sent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InputValueData {
    #[serde(rename = "@type", default)]
    pub value_type: Option<String>,
    #[serde(default)]
    pub carousel_select: Option<SelectSpec>,
    #[serde(default)]
    pub list_select: Option<ListSelectSpec>,
    #[serde(default, deserialize_with = "super::null_as_default")]
    pub capabilities: Vec<String>,
    #[serde(default)]
    pub context: Option<String>,
    #[serde(default)]
    pub notification_title: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectSpec {
    #[serde(default, deserialize_with = "super::null_as_default")]
    pub items: Vec<SelectItem>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListSelectSpec {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "super::null_as_default")]
    pub items: Vec<SelectItem>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectItem {
    #[serde(default)]
    pub option_info: Option<OptionInfoPayload>,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub image: Option<Image>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OptionInfoPayload {
    pub key: String,
    #[serde(default, deserialize_with = "super::null_as_default")]
    pub synonyms: Vec<String>,
}

/// Surface hand-off details, passed through verbatim.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewSurfaceSpec {
    pub capabilities: Vec<String>,
    pub context: Option<String>,
    pub notification_title: Option<String>,
}

/// What the first possible intent asks of the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectionIntent {
    SignIn,
    NewSurface(NewSurfaceSpec),
    CarouselSelect(Vec<SelectItem>),
    ListSelect(ListSelectSpec),
    /// Free-form reply (or an intent this client does not interpret).
    Other(String),
}

impl PossibleIntent {
    /// Sign-in and new-surface are recognised by intent id; carousel and
    /// list selection by the value data they carry.
    pub fn classify(self) -> SelectionIntent {
        let data = self.input_value_data.unwrap_or_default();
        if self.intent == SIGN_IN_INTENT {
            return SelectionIntent::SignIn;
        }
        if self.intent == NEW_SURFACE_INTENT {
            return SelectionIntent::NewSurface(NewSurfaceSpec {
                capabilities: data.capabilities,
                context: data.context,
                notification_title: data.notification_title,
            });
        }
        if let Some(carousel) = data.carousel_select {
            return SelectionIntent::CarouselSelect(carousel.items);
        }
        if let Some(list) = data.list_select {
            return SelectionIntent::ListSelect(list);
        }
        SelectionIntent::Other(self.intent)
    }
}
