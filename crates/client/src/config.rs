//! Client configuration from the environment.

use std::time::Duration;

use actions_test_domain::{DeviceIdentity, LatLng, DEFAULT_DEVICE_ID, DEFAULT_LOCALE};

use crate::application::IncludeOptions;

pub const ENV_LOCALE: &str = "ACTION_TEST_LOCALE";
pub const ENV_DEVICE_MODEL_ID: &str = "ACTION_TEST_DEVICE_MODEL_ID";
pub const ENV_DEVICE_INSTANCE_ID: &str = "ACTION_TEST_DEVICE_INSTANCE_ID";
pub const ENV_LOCATION: &str = "ACTION_TEST_LOCATION";
pub const ENV_TURN_TIMEOUT_SECS: &str = "ACTION_TEST_TURN_TIMEOUT_SECS";
pub const ENV_INCLUDE_AUDIO_OUT: &str = "ACTION_TEST_INCLUDE_AUDIO_OUT";
pub const ENV_INCLUDE_SCREEN_OUT: &str = "ACTION_TEST_INCLUDE_SCREEN_OUT";

#[derive(Debug, Clone, PartialEq)]
pub struct ClientConfig {
    /// Unresolved locale tag; the client resolves it against its table.
    pub locale: String,
    pub device: DeviceIdentity,
    pub location: Option<LatLng>,
    pub include: IncludeOptions,
    /// `None` waits on the stream indefinitely.
    pub turn_timeout: Option<Duration>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            locale: DEFAULT_LOCALE.to_string(),
            device: DeviceIdentity::default(),
            location: None,
            include: IncludeOptions::default(),
            turn_timeout: None,
        }
    }
}

impl ClientConfig {
    /// Reads `ACTION_TEST_*` variables over the defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`from_env`](Self::from_env) with an explicit variable source.
    ///
    /// Unparseable values are logged and the default is kept.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };
        let defaults = Self::default();

        let locale = get(ENV_LOCALE).unwrap_or(defaults.locale);
        let device = DeviceIdentity::new(
            get(ENV_DEVICE_MODEL_ID).unwrap_or_else(|| DEFAULT_DEVICE_ID.to_string()),
            get(ENV_DEVICE_INSTANCE_ID).unwrap_or_else(|| DEFAULT_DEVICE_ID.to_string()),
        );

        let location = get(ENV_LOCATION).and_then(|raw| match raw.parse::<LatLng>() {
            Ok(location) => Some(location),
            Err(e) => {
                tracing::warn!(var = ENV_LOCATION, value = %raw, error = %e, "Ignoring location");
                None
            }
        });

        let turn_timeout = get(ENV_TURN_TIMEOUT_SECS).and_then(|raw| match raw.parse::<u64>() {
            Ok(0) => None,
            Ok(secs) => Some(Duration::from_secs(secs)),
            Err(e) => {
                tracing::warn!(var = ENV_TURN_TIMEOUT_SECS, value = %raw, error = %e, "Ignoring turn timeout");
                None
            }
        });

        let include = IncludeOptions {
            audio_out: get(ENV_INCLUDE_AUDIO_OUT)
                .and_then(|raw| parse_flag(ENV_INCLUDE_AUDIO_OUT, &raw))
                .unwrap_or(defaults.include.audio_out),
            screen_out: get(ENV_INCLUDE_SCREEN_OUT)
                .and_then(|raw| parse_flag(ENV_INCLUDE_SCREEN_OUT, &raw))
                .unwrap_or(defaults.include.screen_out),
        };

        Self {
            locale,
            device,
            location,
            include,
            turn_timeout,
        }
    }
}

fn parse_flag(var: &str, raw: &str) -> Option<bool> {
    match raw.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => {
            tracing::warn!(var, value = %raw, "Ignoring unrecognised flag value");
            None
        }
    }
}
