//! Actions Test Shared - Types exchanged with the assistant service
//!
//! This crate contains:
//! - The outbound turn request (`AssistRequest`)
//! - Inbound streamed messages (`AssistMessage`)
//! - A typed decode of the debug payload that carries rich content
//!
//! # Design Principles
//!
//! 1. **No transport** - Pure data types and serialization
//! 2. **Strict decode** - A matched payload variant with a missing required
//!    field is an error, never a silent default

pub mod error;
pub mod messages;
pub mod payload;
pub mod requests;

pub use error::PayloadError;

// =============================================================================
// Wire Types
// =============================================================================
pub use messages::{
    AssistMessage, AudioOut, DebugInfo, DeviceAction, DialogStateOut, ScreenOut, ScreenOutFormat,
};
pub use requests::{
    AssistConfig, AssistRequest, AudioEncoding, AudioOutConfig, Coordinates, DebugConfig,
    DeviceConfig, DeviceLocation, DialogStateIn, ScreenMode, ScreenOutConfig, AUDIO_SAMPLE_RATE_HERTZ,
    AUDIO_VOLUME_PERCENTAGE,
};

// =============================================================================
// Debug Payload
// =============================================================================
pub use payload::{ContentRoot, DebugPayload, ResponseItem, RichResponse, SelectionIntent};
