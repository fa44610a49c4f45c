//! Shared vocabulary types produced by a conversation turn.

mod response;

pub use response::{
    AssistResponse, Card, CardButton, CarouselItem, LinkOutSuggestion, ListItem, MediaResponse,
    NewSurface, OptionInfo, SelectList, Table, TableRow,
};
