//! Builds the outbound request for one turn from the session state.
//!
//! Audio output parameters and the debug flag are protocol invariants: rich
//! content only arrives through the debug payload.

use actions_test_domain::{LocaleTable, Session};
use actions_test_shared::{
    AssistConfig, AssistRequest, AudioOutConfig, Coordinates, DebugConfig, DeviceConfig,
    DeviceLocation, DialogStateIn, ScreenMode, ScreenOutConfig,
};

use crate::error::TurnError;

/// Optional outputs captured into the response.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IncludeOptions {
    /// Concatenate streamed audio into `AssistResponse::audio_out`.
    pub audio_out: bool,
    /// Request screen output and keep its HTML in `AssistResponse::screen_out_html`.
    pub screen_out: bool,
}

/// # Errors
///
/// `TurnError::EmptyQuery` when `text` is empty or whitespace.
pub fn build_request(
    session: &Session,
    text: &str,
    include: IncludeOptions,
) -> Result<AssistRequest, TurnError> {
    if text.trim().is_empty() {
        return Err(TurnError::EmptyQuery);
    }

    let device_location = session.location().map(|location| DeviceLocation {
        coordinates: Coordinates {
            latitude: location.latitude,
            longitude: location.longitude,
        },
    });
    let screen_out_config = include.screen_out.then_some(ScreenOutConfig {
        screen_mode: ScreenMode::Playing,
    });

    Ok(AssistRequest {
        config: AssistConfig {
            text_query: text.to_string(),
            audio_out_config: AudioOutConfig::default(),
            screen_out_config,
            dialog_state_in: DialogStateIn {
                language_code: session.locale().to_string(),
                is_new_conversation: session.is_new_conversation(),
                conversation_state: session.conversation_state().map(<[u8]>::to_vec),
                device_location,
            },
            device_config: DeviceConfig {
                device_id: session.device().instance_id.clone(),
                device_model_id: session.device().model_id.clone(),
            },
            debug_config: DebugConfig::default(),
        },
    })
}

/// "Talk to {app}" or "Talk to {app} about {prompt}" in the session's locale.
pub fn start_conversation_query(
    locales: &LocaleTable,
    session: &Session,
    app_name: &str,
    prompt: Option<&str>,
) -> String {
    locales
        .phrases_for(session.locale())
        .start_conversation(app_name, prompt)
}

/// The session locale's cancel phrase, or the default locale's.
pub fn cancel_query(locales: &LocaleTable, session: &Session) -> String {
    locales.phrases_for(session.locale()).cancel().to_string()
}
