//! Per-conversation mutable state.

use crate::value_objects::{DeviceIdentity, LatLng, DEFAULT_LOCALE};

/// State threaded through the turns of one conversation.
///
/// Single owner, never shared between conversations. No operation fails.
#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    locale: String,
    is_new_conversation: bool,
    conversation_state: Option<Vec<u8>>,
    device: DeviceIdentity,
    location: Option<LatLng>,
}

impl Session {
    /// `locale` should already be resolved against a locale table.
    pub fn new(locale: impl Into<String>) -> Self {
        Self {
            locale: locale.into(),
            is_new_conversation: true,
            conversation_state: None,
            device: DeviceIdentity::default(),
            location: None,
        }
    }

    pub fn with_device(mut self, device: DeviceIdentity) -> Self {
        self.device = device;
        self
    }

    pub fn with_location(mut self, location: Option<LatLng>) -> Self {
        self.location = location;
        self
    }

    // =========================================================================
    // Conversation lifecycle
    // =========================================================================

    /// The next turn opens a new conversation with no continuation token.
    pub fn start_new_conversation(&mut self) {
        self.is_new_conversation = true;
        self.conversation_state = None;
    }

    /// Latches the token produced by a completed turn.
    ///
    /// A turn that produced no token keeps the previous one.
    pub fn record_turn(&mut self, conversation_state: Option<Vec<u8>>) {
        if let Some(token) = conversation_state {
            self.conversation_state = Some(token);
        }
        self.is_new_conversation = false;
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    pub fn locale(&self) -> &str {
        &self.locale
    }

    pub fn set_locale(&mut self, locale: impl Into<String>) {
        self.locale = locale.into();
    }

    pub fn is_new_conversation(&self) -> bool {
        self.is_new_conversation
    }

    pub fn conversation_state(&self) -> Option<&[u8]> {
        self.conversation_state.as_deref()
    }

    pub fn device(&self) -> &DeviceIdentity {
        &self.device
    }

    pub fn set_device(&mut self, device: DeviceIdentity) {
        self.device = device;
    }

    pub fn location(&self) -> Option<LatLng> {
        self.location
    }

    pub fn set_location(&mut self, location: Option<LatLng>) {
        self.location = location;
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new(DEFAULT_LOCALE)
    }
}
