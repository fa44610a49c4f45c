//! Rich response items.
//!
//! Each item is tagged by one discriminant key. Decoding picks the first key
//! present in a fixed priority order and then decodes that variant strictly.

use serde::{Deserialize, Serialize};
use serde_json::Value;

// =============================================================================
// Shared sub-objects
// =============================================================================

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Image {
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub accessibility_text: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OpenUrlAction {
    #[serde(default)]
    pub url: Option<String>,
}

/// Splits an optional image into (url, alt text).
pub fn image_parts(image: Option<Image>) -> (Option<String>, Option<String>) {
    match image {
        Some(image) => (image.url, image.accessibility_text),
        None => (None, None),
    }
}

// =============================================================================
// Item variants
// =============================================================================

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SimpleResponse {
    #[serde(default)]
    pub text_to_speech: Option<String>,
    #[serde(default)]
    pub display_text: Option<String>,
    #[serde(default)]
    pub ssml: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BasicCard {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub subtitle: Option<String>,
    #[serde(default)]
    pub formatted_text: Option<String>,
    #[serde(default)]
    pub image: Option<Image>,
    #[serde(default, deserialize_with = "super::null_as_default")]
    pub buttons: Vec<Button>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Button {
    pub title: String,
    #[serde(default)]
    pub open_url_action: Option<OpenUrlAction>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CarouselBrowse {
    #[serde(default, deserialize_with = "super::null_as_default")]
    pub items: Vec<BrowseItem>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BrowseItem {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub footer: Option<String>,
    #[serde(default)]
    pub image: Option<Image>,
    #[serde(default)]
    pub open_url_action: Option<OpenUrlAction>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MediaResponsePayload {
    pub media_type: String,
    pub media_objects: Vec<MediaObject>,
}

impl MediaResponsePayload {
    /// Only the first object is ever surfaced.
    pub fn into_first_object(self) -> Option<MediaObject> {
        self.media_objects.into_iter().next()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MediaObject {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub content_url: String,
    #[serde(default)]
    pub icon: Option<Image>,
    #[serde(default)]
    pub large_image: Option<Image>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TableCard {
    #[serde(default, deserialize_with = "super::null_as_default")]
    pub column_properties: Vec<ColumnProperty>,
    #[serde(default, deserialize_with = "super::null_as_default")]
    pub rows: Vec<Row>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnProperty {
    pub header: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Row {
    #[serde(default, deserialize_with = "super::null_as_default")]
    pub cells: Vec<Cell>,
    #[serde(default, deserialize_with = "super::null_as_default")]
    pub divider_after: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    pub text: String,
}

// =============================================================================
// ResponseItem
// =============================================================================

/// One entry of a rich response's `items` array.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(try_from = "RawResponseItem")]
pub enum ResponseItem {
    SimpleResponse(SimpleResponse),
    BasicCard(BasicCard),
    CarouselBrowse(CarouselBrowse),
    MediaResponse(MediaResponsePayload),
    TableCard(TableCard),
    /// No known discriminant; carries the keys that were present.
    Other(Vec<String>),
}

/// Every discriminant key, undecoded, so the priority order is explicit.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawResponseItem {
    #[serde(default)]
    simple_response: Option<Value>,
    #[serde(default)]
    basic_card: Option<Value>,
    #[serde(default)]
    carousel_browse: Option<Value>,
    #[serde(default)]
    media_response: Option<Value>,
    #[serde(default)]
    table_card: Option<Value>,
    #[serde(flatten)]
    rest: serde_json::Map<String, Value>,
}

fn decode<T: serde::de::DeserializeOwned>(key: &str, value: Value) -> Result<T, String> {
    serde_json::from_value(value).map_err(|e| format!("{key}: {e}"))
}

impl TryFrom<RawResponseItem> for ResponseItem {
    type Error = String;

    fn try_from(raw: RawResponseItem) -> Result<Self, Self::Error> {
        if let Some(value) = raw.simple_response {
            return decode("simpleResponse", value).map(Self::SimpleResponse);
        }
        if let Some(value) = raw.basic_card {
            return decode("basicCard", value).map(Self::BasicCard);
        }
        if let Some(value) = raw.carousel_browse {
            return decode("carouselBrowse", value).map(Self::CarouselBrowse);
        }
        if let Some(value) = raw.media_response {
            let media: MediaResponsePayload = decode("mediaResponse", value)?;
            if media.media_objects.is_empty() {
                return Err("mediaResponse: mediaObjects is empty".to_string());
            }
            return Ok(Self::MediaResponse(media));
        }
        if let Some(value) = raw.table_card {
            return decode("tableCard", value).map(Self::TableCard);
        }
        let keys: Vec<String> = raw.rest.into_iter().map(|(key, _)| key).collect();
        tracing::debug!(keys = ?keys, "Unrecognised rich response item");
        Ok(Self::Other(keys))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn item(value: Value) -> Result<ResponseItem, serde_json::Error> {
        serde_json::from_value(value)
    }

    #[test]
    fn simple_response_tolerates_missing_fields() {
        let decoded = item(json!({"simpleResponse": {"textToSpeech": "Bye"}})).expect("decode");
        assert_eq!(
            decoded,
            ResponseItem::SimpleResponse(SimpleResponse {
                text_to_speech: Some("Bye".to_string()),
                ..Default::default()
            })
        );
    }

    #[test]
    fn first_discriminant_in_priority_order_wins() {
        let decoded = item(json!({
            "tableCard": {"columnProperties": [{"header": "h"}]},
            "simpleResponse": {"displayText": "shown"}
        }))
        .expect("decode");
        assert!(matches!(decoded, ResponseItem::SimpleResponse(_)));
    }

    #[test]
    fn basic_card_without_image_or_buttons_decodes() {
        let decoded = item(json!({"basicCard": {"formattedText": "body"}})).expect("decode");
        let ResponseItem::BasicCard(card) = decoded else {
            panic!("expected basic card");
        };
        assert_eq!(card.formatted_text.as_deref(), Some("body"));
        assert!(card.image.is_none());
        assert!(card.buttons.is_empty());
    }

    #[test]
    fn null_lists_read_as_empty() {
        let ResponseItem::BasicCard(card) =
            item(json!({"basicCard": {"title": "t", "buttons": null}})).expect("decode")
        else {
            panic!("expected basic card");
        };
        assert!(card.buttons.is_empty());

        let ResponseItem::CarouselBrowse(browse) =
            item(json!({"carouselBrowse": {"items": null}})).expect("decode")
        else {
            panic!("expected browse carousel");
        };
        assert!(browse.items.is_empty());

        let ResponseItem::TableCard(table) = item(json!({"tableCard": {
            "columnProperties": null,
            "rows": [{"cells": null, "dividerAfter": null}]
        }}))
        .expect("decode") else {
            panic!("expected table");
        };
        assert!(table.column_properties.is_empty());
        assert!(table.rows[0].cells.is_empty());
        assert!(!table.rows[0].divider_after);
    }

    #[test]
    fn button_without_title_fails() {
        let result = item(json!({
            "basicCard": {"buttons": [{"openUrlAction": {"url": "https://example.com"}}]}
        }));
        let err = result.expect_err("missing title");
        assert!(err.to_string().contains("basicCard"));
    }

    #[test]
    fn media_without_objects_fails() {
        let result = item(json!({"mediaResponse": {"mediaType": "AUDIO", "mediaObjects": []}}));
        assert!(result.is_err());
    }

    #[test]
    fn media_object_requires_content_url() {
        let result = item(json!({
            "mediaResponse": {"mediaType": "AUDIO", "mediaObjects": [{"name": "song"}]}
        }));
        assert!(result.is_err());
    }

    #[test]
    fn table_row_divider_defaults_to_false() {
        let decoded = item(json!({
            "tableCard": {"rows": [{"cells": [{"text": "a"}]}]}
        }))
        .expect("decode");
        let ResponseItem::TableCard(table) = decoded else {
            panic!("expected table card");
        };
        assert!(!table.rows[0].divider_after);
    }

    #[test]
    fn unknown_item_is_other() {
        let decoded = item(json!({"structuredResponse": {}})).expect("decode");
        assert_eq!(
            decoded,
            ResponseItem::Other(vec!["structuredResponse".to_string()])
        );
    }
}
