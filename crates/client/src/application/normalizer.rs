//! Response Normalizer
//!
//! Folds the messages streamed back for one turn into a single
//! [`AssistResponse`]. The continuation token is captured alongside and
//! handed back to the caller; the normalizer never touches the session.

use actions_test_domain::common::{push_if_not_empty, StringExt};
use actions_test_domain::{
    AssistResponse, Card, CardButton, CarouselItem, LinkOutSuggestion, ListItem, MediaResponse,
    NewSurface, OptionInfo, SelectList, Table, TableRow,
};
use actions_test_shared::payload::{
    image_parts, BasicCard, BrowseItem, ListSelectSpec, MediaResponsePayload, OptionInfoPayload,
    SelectItem, TableCard,
};
use actions_test_shared::{
    AssistMessage, DebugPayload, DialogStateOut, ResponseItem, RichResponse, ScreenOutFormat,
    SelectionIntent,
};

use super::request_builder::IncludeOptions;
use crate::error::TurnError;

/// Result of a completed turn.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedTurn {
    pub response: AssistResponse,
    /// Token to latch into the session, if the service sent one.
    pub conversation_state: Option<Vec<u8>>,
}

/// Per-turn accumulator.
#[derive(Debug)]
pub struct ResponseNormalizer {
    include: IncludeOptions,
    response: AssistResponse,
    conversation_state: Option<Vec<u8>>,
    /// Set once a browse carousel has replaced any selection carousel.
    browse_started: bool,
}

impl ResponseNormalizer {
    pub fn new(include: IncludeOptions) -> Self {
        let response = AssistResponse {
            audio_out: include.audio_out.then(Vec::new),
            ..Default::default()
        };
        Self {
            include,
            response,
            conversation_state: None,
            browse_started: false,
        }
    }

    /// Applies one inbound message.
    ///
    /// # Errors
    ///
    /// `MalformedDebugPayload` or `MissingContentRoot` when the debug payload
    /// cannot be interpreted. The accumulator must be discarded afterwards.
    pub fn ingest(&mut self, message: AssistMessage) -> Result<(), TurnError> {
        if let Some(dialog_state) = message.dialog_state_out {
            self.apply_dialog_state(dialog_state);
        }
        if let Some(device_action) = message.device_action {
            self.response.device_action = Some(device_action.device_request_json);
        }
        if let Some(debug_info) = message.debug_info {
            self.apply_debug_payload(&debug_info.aog_agent_to_assistant_json)?;
        }
        if let Some(audio) = message.audio_out {
            if let Some(buffer) = self.response.audio_out.as_mut() {
                buffer.extend_from_slice(&audio.audio_data);
            }
        }
        if let Some(screen) = message.screen_out {
            if self.include.screen_out && screen.format == ScreenOutFormat::Html {
                self.response.screen_out_html =
                    Some(String::from_utf8_lossy(&screen.data).into_owned());
            }
        }
        Ok(())
    }

    pub fn finish(self) -> NormalizedTurn {
        NormalizedTurn {
            response: self.response,
            conversation_state: self.conversation_state,
        }
    }

    // =========================================================================
    // Fragments
    // =========================================================================

    fn apply_dialog_state(&mut self, dialog_state: DialogStateOut) {
        if let Some(token) = dialog_state.conversation_state {
            self.conversation_state = Some(token);
        }
        // Supplemental text stands in for speech until display text arrives.
        if let Some(text) = dialog_state.supplemental_display_text {
            if !text.is_empty() && self.response.display_text.is_empty() {
                self.response.text_to_speech = vec![text];
            }
        }
    }

    fn apply_debug_payload(&mut self, json: &str) -> Result<(), TurnError> {
        let root = DebugPayload::parse(json)?.into_content_root()?;
        self.response.mic_open = root.mic_open();

        let (rich, selection) = root.into_parts();
        if let Some(selection) = selection {
            self.apply_selection(selection);
        }
        self.apply_rich_response(rich)
    }

    fn apply_selection(&mut self, selection: SelectionIntent) {
        match selection {
            SelectionIntent::SignIn => self.response.sign_in_intent = Some(true),
            SelectionIntent::NewSurface(spec) => {
                self.response.new_surface = Some(NewSurface {
                    capabilities: spec.capabilities,
                    context: spec.context,
                    notification_title: spec.notification_title,
                });
            }
            SelectionIntent::CarouselSelect(items) => {
                self.response.carousel = Some(items.into_iter().map(select_carousel_item).collect());
            }
            SelectionIntent::ListSelect(list) => {
                self.response.list = Some(select_list(list));
            }
            SelectionIntent::Other(intent) => {
                tracing::trace!(intent = %intent, "No selection intent");
            }
        }
    }

    fn apply_rich_response(&mut self, rich: RichResponse) -> Result<(), TurnError> {
        for item in rich.items {
            self.apply_item(item)?;
        }

        if let Some(suggestions) = rich.suggestions {
            self.response.suggestions = suggestions
                .into_iter()
                .filter_map(|s| s.title.into_option())
                .collect();
        }

        if let Some(link) = rich.link_out_suggestion {
            self.response.link_out_suggestion = Some(LinkOutSuggestion {
                url: link.url,
                name: link.destination_name,
            });
        }
        Ok(())
    }

    fn apply_item(&mut self, item: ResponseItem) -> Result<(), TurnError> {
        match item {
            ResponseItem::SimpleResponse(simple) => {
                push_if_not_empty(&mut self.response.text_to_speech, simple.text_to_speech);
                push_if_not_empty(&mut self.response.display_text, simple.display_text);
                push_if_not_empty(&mut self.response.ssml, simple.ssml);
            }
            ResponseItem::BasicCard(card) => {
                self.response
                    .cards
                    .get_or_insert_with(Vec::new)
                    .push(basic_card(card));
            }
            ResponseItem::CarouselBrowse(browse) => {
                if !self.browse_started {
                    self.browse_started = true;
                    self.response.carousel = Some(Vec::new());
                }
                self.response
                    .carousel
                    .get_or_insert_with(Vec::new)
                    .extend(browse.items.into_iter().map(browse_item));
            }
            ResponseItem::MediaResponse(media) => {
                self.response.media_response = Some(media_response(media)?);
            }
            ResponseItem::TableCard(table) => {
                self.response.table = Some(table_card(table));
            }
            ResponseItem::Other(keys) => {
                tracing::debug!(keys = ?keys, "Skipping unsupported response item");
            }
        }
        Ok(())
    }
}

// =============================================================================
// Payload -> domain conversions
// =============================================================================

fn option_info(info: Option<OptionInfoPayload>) -> Option<OptionInfo> {
    info.map(|info| OptionInfo {
        key: info.key,
        synonyms: info.synonyms,
    })
}

fn basic_card(card: BasicCard) -> Card {
    let (image_url, image_alt_text) = image_parts(card.image);
    Card {
        title: card.title,
        subtitle: card.subtitle,
        text: card.formatted_text,
        image_url,
        image_alt_text,
        buttons: card
            .buttons
            .into_iter()
            .map(|button| CardButton {
                title: button.title,
                url: button.open_url_action.and_then(|action| action.url),
            })
            .collect(),
    }
}

fn browse_item(item: BrowseItem) -> CarouselItem {
    let (image_url, image_alt_text) = image_parts(item.image);
    CarouselItem {
        option_info: None,
        title: item.title,
        description: item.description,
        image_url,
        image_alt_text,
        footer: item.footer,
        url: item.open_url_action.and_then(|action| action.url),
    }
}

/// Selection items are not links, so `url` stays unset.
fn select_carousel_item(item: SelectItem) -> CarouselItem {
    let (image_url, image_alt_text) = image_parts(item.image);
    CarouselItem {
        option_info: option_info(item.option_info),
        title: item.title,
        description: item.description,
        image_url,
        image_alt_text,
        footer: None,
        url: None,
    }
}

fn select_list(list: ListSelectSpec) -> SelectList {
    SelectList {
        title: list.title,
        items: list
            .items
            .into_iter()
            .map(|item| {
                let (image_url, image_alt_text) = image_parts(item.image);
                ListItem {
                    option_info: option_info(item.option_info),
                    title: item.title,
                    description: item.description,
                    image_url,
                    image_alt_text,
                }
            })
            .collect(),
    }
}

fn media_response(media: MediaResponsePayload) -> Result<MediaResponse, TurnError> {
    let media_type = media.media_type.clone();
    let object = media
        .into_first_object()
        .ok_or_else(|| TurnError::malformed("mediaResponse: mediaObjects is empty"))?;
    let icon = object.icon.and_then(|image| image.url);
    let large_image = match icon {
        Some(_) => None,
        None => object.large_image.and_then(|image| image.url),
    };
    Ok(MediaResponse {
        media_type,
        name: object.name,
        description: object.description,
        source_url: object.content_url,
        icon,
        large_image,
    })
}

fn table_card(table: TableCard) -> Table {
    Table {
        headers: table
            .column_properties
            .into_iter()
            .map(|column| column.header)
            .collect(),
        rows: table
            .rows
            .into_iter()
            .map(|row| TableRow {
                cells: row.cells.into_iter().map(|cell| cell.text).collect(),
                divider: row.divider_after,
            })
            .collect(),
    }
}
