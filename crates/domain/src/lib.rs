//! Domain vocabulary for driving a conversational action.
//!
//! Pure types and state only: no I/O, no logging.

extern crate self as actions_test_domain;

pub mod common;
pub mod entities;
pub mod error;
pub mod types;
pub mod value_objects;

pub use entities::Session;
pub use error::DomainError;
pub use types::{
    AssistResponse, Card, CardButton, CarouselItem, LinkOutSuggestion, ListItem, MediaResponse,
    NewSurface, OptionInfo, SelectList, Table, TableRow,
};
pub use value_objects::{
    DeviceIdentity, LatLng, LocaleResolution, LocaleTable, Phrases, DEFAULT_DEVICE_ID,
    DEFAULT_LOCALE,
};
