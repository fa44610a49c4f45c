//! Debug payloads captured from real conversations, for tests.

use serde_json::{json, Value};

use actions_test_shared::AssistMessage;

pub const IMAGE_URL: &str =
    "https://developers.google.com/actions/images/badges/XPM_BADGING_GoogleAssistant_VER.png";
pub const ALBUM_ART_URL: &str = "http://storage.googleapis.com/automotive-media/album_art.jpg";
pub const JAZZ_URL: &str = "http://storage.googleapis.com/automotive-media/Jazz_In_Paris.mp3";

/// Wraps a payload in a debug-info message.
pub fn debug_message(payload: &Value) -> AssistMessage {
    AssistMessage::debug(payload.to_string())
}

fn text_intent() -> Value {
    json!([{"intent": "assistant.intent.action.TEXT"}])
}

fn expected_input(items: Value, suggestions: Option<Value>, intents: Value) -> Value {
    let mut prompt = json!({"items": items});
    if let Some(suggestions) = suggestions {
        prompt["suggestions"] = suggestions;
    }
    json!({
        "conversationToken": "[\"_actions_on_google\"]",
        "expectUserResponse": true,
        "expectedInputs": [{
            "inputPrompt": {"richInitialPrompt": prompt},
            "possibleIntents": intents
        }],
        "responseMetadata": {"status": {"message": "Success (200)"}}
    })
}

pub fn number_genie_welcome() -> Value {
    expected_input(
        json!([
            {"simpleResponse": {
                "textToSpeech": "<speak>Hi! I'm thinking of a number from 0 to 100.</speak>",
                "displayText": "Hi! I'm thinking of a number from 0 to 100."
            }},
            {"simpleResponse": {
                "textToSpeech": "<speak>What's your first guess?</speak>",
                "displayText": "What's your first guess?"
            }},
            {"basicCard": {
                "formattedText": "Few have cracked this one on the first try",
                "image": {
                    "url": "https://project-id.firebaseapp.com/images/INTRO.gif",
                    "accessibilityText": "mystical crystal ball"
                }
            }}
        ]),
        Some(json!([{"title": "37"}, {"title": "10"}, {"title": "78"}, {"title": "34"}])),
        json!([
            {"intent": "assistant.intent.action.TEXT"},
            {"intent": "1e46ffc2-651f-4ac0-a54e-9698feb88880"}
        ]),
    )
}

pub fn number_genie_exit() -> Value {
    json!({
        "conversationToken": "[\"_actions_on_google\",\"game\",\"yes_no\"]",
        "finalResponse": {"richResponse": {"items": [
            {"simpleResponse": {
                "textToSpeech": "<speak>OK, I'm already thinking of a number for next time.</speak>",
                "displayText": "OK, I'm already thinking of a number for next time."
            }}
        ]}}
    })
}

pub fn basic_cards() -> Value {
    expected_input(
        json!([
            {"simpleResponse": {"textToSpeech": "This is the first simple response for a basic card"}},
            {"basicCard": {
                "title": "Title: this is a title",
                "subtitle": "This is a subtitle",
                "formattedText": "This is a basic card.",
                "image": {"url": IMAGE_URL, "accessibilityText": "Image alternate text"},
                "buttons": [{
                    "title": "This is a button",
                    "openUrlAction": {"url": "https://assistant.google.com/"}
                }]
            }},
            {"simpleResponse": {
                "textToSpeech": "This is the 2nd simple response ",
                "displayText": "This is the 2nd simple response"
            }}
        ]),
        Some(json!([{"title": "Basic Card"}, {"title": "List"}])),
        text_intent(),
    )
}

pub fn browse_carousel() -> Value {
    let item = |n: u32| {
        json!({
            "title": format!("Title of item {n}"),
            "description": format!("Description of item {n}"),
            "footer": format!("Item {n} footer"),
            "image": {"url": IMAGE_URL, "accessibilityText": "Google Assistant Bubbles"},
            "openUrlAction": {"url": "https://google.com"}
        })
    };
    expected_input(
        json!([
            {"simpleResponse": {"textToSpeech": "This is an example of a \"Browse Carousel\""}},
            {"carouselBrowse": {"items": [item(1), item(2)]}}
        ]),
        None,
        text_intent(),
    )
}

fn select_items() -> Value {
    json!([
        {
            "optionInfo": {"key": "title", "synonyms": ["synonym of title 1", "synonym of title 2"]},
            "title": "Title of First List Item",
            "description": "This is a description of a carousel item",
            "image": {"url": IMAGE_URL, "accessibilityText": "Image alternate text"}
        },
        {
            "optionInfo": {"key": "googleHome", "synonyms": ["Google Home Assistant"]},
            "title": "Google Home",
            "description": "Google Home is a voice-activated speaker powered by the Google Assistant.",
            "image": {"url": IMAGE_URL, "accessibilityText": "Google Home"}
        },
        {
            "optionInfo": {"key": "googlePixel", "synonyms": ["Google Pixel XL", "Pixel"]},
            "title": "Google Pixel",
            "description": "Pixel. Phone by Google.",
            "image": {"url": IMAGE_URL, "accessibilityText": "Google Pixel"}
        },
        {
            "optionInfo": {"key": "googleAllo", "synonyms": ["Allo"]},
            "title": "Google Allo",
            "image": {"url": IMAGE_URL, "accessibilityText": "Google Allo Logo"}
        }
    ])
}

pub fn carousel() -> Value {
    expected_input(
        json!([{"simpleResponse": {"textToSpeech": "This is a simple response for a carousel"}}]),
        Some(json!([{"title": "Basic Card"}, {"title": "Carousel"}])),
        json!([{
            "intent": "actions.intent.OPTION",
            "inputValueData": {
                "@type": "type.googleapis.com/google.actions.v2.OptionValueSpec",
                "carouselSelect": {"items": select_items()}
            }
        }]),
    )
}

pub fn list() -> Value {
    expected_input(
        json!([{"simpleResponse": {"textToSpeech": "This is a simple response for a list"}}]),
        Some(json!([{"title": "Basic Card"}, {"title": "List"}])),
        json!([{
            "intent": "actions.intent.OPTION",
            "inputValueData": {
                "@type": "type.googleapis.com/google.actions.v2.OptionValueSpec",
                "listSelect": {"title": "List Title", "items": select_items()}
            }
        }]),
    )
}

fn media(image_key: &str) -> Value {
    let mut object = json!({
        "name": "Jazz in Paris",
        "description": "A funky Jazz tune",
        "contentUrl": JAZZ_URL
    });
    object[image_key] = json!({"url": ALBUM_ART_URL});
    expected_input(
        json!([
            {"simpleResponse": {"textToSpeech": "This is the first simple response for a media response"}},
            {"mediaResponse": {"mediaType": "AUDIO", "mediaObjects": [object]}}
        ]),
        Some(json!([{"title": "Media"}])),
        text_intent(),
    )
}

pub fn media_with_icon() -> Value {
    media("icon")
}

pub fn media_with_large_image() -> Value {
    media("largeImage")
}

pub fn link_out_suggestion() -> Value {
    let mut payload = expected_input(
        json!([{"simpleResponse": {"textToSpeech": "This is a simple response for suggestions"}}]),
        Some(json!([{"title": "Suggestion Chips"}, {"title": "Basic Card"}, {}])),
        text_intent(),
    );
    payload["expectedInputs"][0]["inputPrompt"]["richInitialPrompt"]["linkOutSuggestion"] = json!({
        "url": "https://assistant.google.com/",
        "destinationName": "Suggestion Link"
    });
    payload
}

pub fn table() -> Value {
    let row = |n: u32, divider: bool| {
        json!({
            "cells": [
                {"text": format!("row {n} item 1")},
                {"text": format!("row {n} item 2")},
                {"text": format!("row {n} item 3")}
            ],
            "dividerAfter": divider
        })
    };
    expected_input(
        json!([
            {"simpleResponse": {"textToSpeech": "You can include table data like this"}},
            {"tableCard": {
                "columnProperties": [
                    {"header": "header 1"}, {"header": "header 2"}, {"header": "header 3"}
                ],
                "rows": [row(1, true), row(2, false)]
            }}
        ]),
        None,
        text_intent(),
    )
}

pub fn sign_in() -> Value {
    expected_input(
        json!([{"simpleResponse": {"textToSpeech": "You'll need to sign in"}}]),
        None,
        json!([{
            "intent": "actions.intent.SIGN_IN",
            "inputValueData": {"@type": "type.googleapis.com/google.actions.v2.SignInValueSpec"}
        }]),
    )
}

pub fn new_surface() -> Value {
    expected_input(
        json!([{"simpleResponse": {"textToSpeech": "I'm sorry. I'm having trouble connecting to your account."}}]),
        None,
        json!([{
            "intent": "actions.intent.NEW_SURFACE",
            "inputValueData": {
                "@type": "type.googleapis.com/google.actions.v2.NewSurfaceValueSpec",
                "capabilities": ["actions.capability.SCREEN_OUTPUT"],
                "context": "There is more information available.",
                "notificationTitle": "Transferring to your phone"
            }
        }]),
    )
}
