//! Value objects - Immutable objects defined by their attributes

mod device;
mod locale;

pub use device::{DeviceIdentity, LatLng, DEFAULT_DEVICE_ID};
pub use locale::{LocaleResolution, LocaleTable, Phrases, DEFAULT_LOCALE};
