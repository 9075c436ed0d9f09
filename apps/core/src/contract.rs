use serde::{Deserialize, Serialize};

use crate::model::{EntityType, FilterToggle, SearchResult};
use crate::routing::RouteTarget;
use crate::search_state::{DisplayState, SearchUiState};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "kind", content = "payload", rename_all = "snake_case")]
pub enum UiCommand {
    QueryChanged { text: String },
    ToggleFilter { filter: FilterToggle },
    Submit,
    ArrowDown,
    ArrowUp,
    Enter,
    Escape,
    Activate { index: usize },
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FilterPill {
    #[serde(rename = "type")]
    pub entity_type: EntityType,
    pub label: String,
    pub icon: String,
    pub active: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct UiSnapshot {
    pub query: String,
    pub filters: Vec<EntityType>,
    pub filter_pills: Vec<FilterPill>,
    pub results: Vec<SearchResult>,
    pub total_count: usize,
    pub is_searching: bool,
    pub has_searched: bool,
    pub selected_index: Option<usize>,
    pub last_request_id: u64,
    pub display_state: DisplayState,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_error: Option<String>,
}

impl From<&SearchUiState> for UiSnapshot {
    fn from(state: &SearchUiState) -> Self {
        Self {
            query: state.query().to_string(),
            filters: state.selected_filters().as_slice().to_vec(),
            filter_pills: EntityType::ALL
                .into_iter()
                .map(|kind| FilterPill {
                    entity_type: kind,
                    label: kind.label().to_string(),
                    icon: kind.icon().to_string(),
                    active: state.is_filter_active(kind),
                })
                .collect(),
            results: state.results().to_vec(),
            total_count: state.total_count(),
            is_searching: state.is_searching(),
            has_searched: state.has_searched(),
            selected_index: state.selected_index(),
            last_request_id: state.last_request_id(),
            display_state: state.display_state(),
            last_error: state.last_error().map(str::to_string),
        }
    }
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(tag = "kind", content = "payload", rename_all = "snake_case")]
pub enum UiUpdate {
    Snapshot(UiSnapshot),
    Route(RouteTarget),
}
