//! Inbound messages streamed back for one turn.
//!
//! Every fragment is optional; a single message may carry any mix of them.

use serde::{Deserialize, Serialize};

use actions_test_domain::common::bytes::{base64_bytes, base64_opt};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AssistMessage {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dialog_state_out: Option<DialogStateOut>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub device_action: Option<DeviceAction>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub debug_info: Option<DebugInfo>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub audio_out: Option<AudioOut>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub screen_out: Option<ScreenOut>,
}

impl AssistMessage {
    /// A message carrying only a debug payload.
    pub fn debug(aog_agent_to_assistant_json: impl Into<String>) -> Self {
        Self {
            debug_info: Some(DebugInfo {
                aog_agent_to_assistant_json: aog_agent_to_assistant_json.into(),
            }),
            ..Default::default()
        }
    }

    /// A message carrying only a dialog-state-out fragment.
    pub fn dialog_state(
        conversation_state: Option<Vec<u8>>,
        supplemental_display_text: Option<String>,
    ) -> Self {
        Self {
            dialog_state_out: Some(DialogStateOut {
                supplemental_display_text,
                conversation_state,
            }),
            ..Default::default()
        }
    }

    /// A message carrying only a device-action fragment.
    pub fn device_action(device_request_json: impl Into<String>) -> Self {
        Self {
            device_action: Some(DeviceAction {
                device_request_json: device_request_json.into(),
            }),
            ..Default::default()
        }
    }

    /// A message carrying only an audio chunk.
    pub fn audio(audio_data: Vec<u8>) -> Self {
        Self {
            audio_out: Some(AudioOut { audio_data }),
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DialogStateOut {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub supplemental_display_text: Option<String>,
    /// Opaque continuation token for the next turn.
    #[serde(default, with = "base64_opt", skip_serializing_if = "Option::is_none")]
    pub conversation_state: Option<Vec<u8>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeviceAction {
    pub device_request_json: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DebugInfo {
    /// JSON-encoded debug payload; see [`crate::payload::DebugPayload`].
    pub aog_agent_to_assistant_json: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AudioOut {
    #[serde(with = "base64_bytes")]
    pub audio_data: Vec<u8>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ScreenOutFormat {
    FormatUnspecified,
    Html,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScreenOut {
    pub format: ScreenOutFormat,
    #[serde(with = "base64_bytes")]
    pub data: Vec<u8>,
}
