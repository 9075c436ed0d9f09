use serde::{Deserialize, Serialize};

use crate::model::{EntityType, FilterSet, FilterToggle, SearchResponse, SearchResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DisplayState {
    Idle,
    Searching,
    Results,
    NoResults,
    Failed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
}

// results, total_count and is_searching only change for the latest request id.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchUiState {
    query: String,
    selected_filters: FilterSet,
    results: Vec<SearchResult>,
    total_count: usize,
    is_searching: bool,
    has_searched: bool,
    selected_index: Option<usize>,
    last_request_id: u64,
    last_error: Option<String>,
    sequence: u64,
}

impl SearchUiState {
    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn selected_filters(&self) -> &FilterSet {
        &self.selected_filters
    }

    pub fn results(&self) -> &[SearchResult] {
        &self.results
    }

    pub fn total_count(&self) -> usize {
        self.total_count
    }

    pub fn is_searching(&self) -> bool {
        self.is_searching
    }

    pub fn has_searched(&self) -> bool {
        self.has_searched
    }

    pub fn selected_index(&self) -> Option<usize> {
        self.selected_index
    }

    pub fn selected_result(&self) -> Option<&SearchResult> {
        self.selected_index.and_then(|index| self.results.get(index))
    }

    pub fn last_request_id(&self) -> u64 {
        self.last_request_id
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    pub fn display_state(&self) -> DisplayState {
        if self.is_searching {
            DisplayState::Searching
        } else if !self.has_searched {
            DisplayState::Idle
        } else if self.last_error.is_some() {
            DisplayState::Failed
        } else if self.results.is_empty() {
            DisplayState::NoResults
        } else {
            DisplayState::Results
        }
    }

    pub fn set_query(&mut self, text: &str) {
        self.query = text.to_string();
    }

    pub fn toggle_filter(&mut self, toggle: FilterToggle) {
        match toggle {
            FilterToggle::All(_) => self.selected_filters.clear(),
            FilterToggle::Type(kind) => {
                self.selected_filters.toggle(kind);
            }
        }
        self.selected_index = None;
    }

    pub fn is_filter_active(&self, kind: EntityType) -> bool {
        self.selected_filters.contains(kind)
    }

    // Clamped to `None..=last`, never wraps.
    pub fn move_selection(&mut self, direction: Direction) {
        let last = self.results.len().checked_sub(1);
        self.selected_index = match direction {
            Direction::Down => match (self.selected_index, last) {
                (_, None) => None,
                (None, Some(_)) => Some(0),
                (Some(index), Some(last)) => Some((index + 1).min(last)),
            },
            Direction::Up => self.selected_index.and_then(|index| index.checked_sub(1)),
        };
    }

    pub fn begin_request(&mut self) -> u64 {
        let sequence_id = self.next_sequence();
        self.last_request_id = sequence_id;
        self.is_searching = true;
        self.has_searched = true;
        self.selected_index = None;
        self.last_error = None;
        sequence_id
    }

    pub fn apply_response(&mut self, sequence_id: u64, response: SearchResponse) -> bool {
        if sequence_id != self.last_request_id {
            return false;
        }

        self.results = response.hits;
        self.total_count = response.count;
        self.is_searching = false;
        self.last_error = None;
        self.clamp_selection();
        true
    }

    pub fn apply_failure(&mut self, sequence_id: u64, message: &str) -> bool {
        if sequence_id != self.last_request_id {
            return false;
        }

        self.results = Vec::new();
        self.total_count = 0;
        self.is_searching = false;
        self.last_error = Some(message.to_string());
        self.selected_index = None;
        true
    }

    pub fn return_to_idle(&mut self) {
        self.retire_in_flight();
        self.results = Vec::new();
        self.total_count = 0;
        self.has_searched = false;
        self.selected_index = None;
        self.last_error = None;
    }

    pub fn reset(&mut self) {
        self.query.clear();
        self.selected_filters.clear();
        self.return_to_idle();
    }

    fn retire_in_flight(&mut self) {
        if self.is_searching {
            self.last_request_id = self.next_sequence();
            self.is_searching = false;
        }
    }

    fn next_sequence(&mut self) -> u64 {
        self.sequence += 1;
        self.sequence
    }

    fn clamp_selection(&mut self) {
        let last = self.results.len().checked_sub(1);
        self.selected_index = self
            .selected_index
            .and_then(|index| last.map(|last| index.min(last)));
    }
}
