//! Outbound turn request.
//!
//! Field names follow the service's protobuf names so a serialized request
//! reads the same as the wire message.

use serde::{Deserialize, Serialize};

use actions_test_domain::common::bytes::base64_opt;

/// Output sample rate requested on every turn.
pub const AUDIO_SAMPLE_RATE_HERTZ: i32 = 16_000;

/// Output volume requested on every turn.
pub const AUDIO_VOLUME_PERCENTAGE: i32 = 100;

/// One request per turn; text query only, never audio in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssistRequest {
    pub config: AssistConfig,
}

impl AssistRequest {
    pub fn text_query(&self) -> &str {
        &self.config.text_query
    }

    pub fn language_code(&self) -> &str {
        &self.config.dialog_state_in.language_code
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssistConfig {
    pub text_query: String,
    pub audio_out_config: AudioOutConfig,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub screen_out_config: Option<ScreenOutConfig>,
    pub dialog_state_in: DialogStateIn,
    pub device_config: DeviceConfig,
    pub debug_config: DebugConfig,
}

// =============================================================================
// Audio / Screen Output
// =============================================================================

/// Audio output encodings and their protocol codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AudioEncoding {
    #[serde(rename = "LINEAR16")]
    Linear16,
    Mp3,
    OpusInOgg,
}

impl AudioEncoding {
    pub fn code(self) -> i32 {
        match self {
            Self::Linear16 => 1,
            Self::Mp3 => 2,
            Self::OpusInOgg => 3,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AudioOutConfig {
    pub encoding: AudioEncoding,
    pub sample_rate_hertz: i32,
    pub volume_percentage: i32,
}

impl Default for AudioOutConfig {
    fn default() -> Self {
        Self {
            encoding: AudioEncoding::Linear16,
            sample_rate_hertz: AUDIO_SAMPLE_RATE_HERTZ,
            volume_percentage: AUDIO_VOLUME_PERCENTAGE,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ScreenMode {
    Off,
    Playing,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScreenOutConfig {
    pub screen_mode: ScreenMode,
}

// =============================================================================
// Dialog / Device
// =============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DialogStateIn {
    pub language_code: String,
    pub is_new_conversation: bool,
    /// Continuation token from the previous turn, unmodified.
    #[serde(default, with = "base64_opt", skip_serializing_if = "Option::is_none")]
    pub conversation_state: Option<Vec<u8>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub device_location: Option<DeviceLocation>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DeviceLocation {
    pub coordinates: Coordinates,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeviceConfig {
    pub device_id: String,
    pub device_model_id: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DebugConfig {
    pub return_debug_info: bool,
}

impl Default for DebugConfig {
    /// Rich content only arrives through the debug payload.
    fn default() -> Self {
        Self {
            return_debug_info: true,
        }
    }
}
