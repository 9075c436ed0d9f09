use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};

use crate::config::Config;
use crate::debounce::Debouncer;
use crate::model::{FilterToggle, SearchOptions, SearchResponse, SearchResult};
use crate::navigation::{dispatch, NavigateOptions, Navigator, PointerEvent, ViewportClassifier};
use crate::provider::{FileOpenTarget, FileTargetResolver, SearchError, SearchProvider};
use crate::routing::{plan_route, route_file, RoutePlan, RouteTarget, Viewport};
use crate::search_state::{Direction, SearchUiState};

const SEARCH_ROUTE: &str = "/search";

#[derive(Clone)]
pub struct Collaborators {
    pub provider: Arc<dyn SearchProvider>,
    pub resolver: Arc<dyn FileTargetResolver>,
    pub navigator: Arc<dyn Navigator>,
    pub viewport: Arc<dyn ViewportClassifier>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrchestratorSettings {
    pub debounce: Duration,
    pub limit: usize,
}

impl From<&Config> for OrchestratorSettings {
    fn from(config: &Config) -> Self {
        Self {
            debounce: config.debounce(),
            limit: config.limit(),
        }
    }
}

#[derive(Debug)]
pub enum Completion {
    DebounceElapsed {
        generation: u64,
    },
    Search {
        sequence_id: u64,
        outcome: Result<SearchResponse, SearchError>,
    },
}

// State changes only inside &mut self handlers; spawned tasks report back as completions.
pub struct SearchOrchestrator {
    state: SearchUiState,
    settings: OrchestratorSettings,
    collaborators: Collaborators,
    debounce: Debouncer,
    completions_tx: UnboundedSender<Completion>,
    completions_rx: UnboundedReceiver<Completion>,
}

impl SearchOrchestrator {
    pub fn new(collaborators: Collaborators, settings: OrchestratorSettings) -> Self {
        let (completions_tx, completions_rx) = mpsc::unbounded_channel();
        Self {
            state: SearchUiState::default(),
            settings,
            collaborators,
            debounce: Debouncer::default(),
            completions_tx,
            completions_rx,
        }
    }

    pub fn state(&self) -> &SearchUiState {
        &self.state
    }

    pub fn has_pending_debounce(&self) -> bool {
        self.debounce.is_pending()
    }

    pub fn on_query_text_changed(&mut self, text: &str) {
        self.state.set_query(text);
        let tx = self.completions_tx.clone();
        self.debounce.schedule(self.settings.debounce, move |generation| {
            let _ = tx.send(Completion::DebounceElapsed { generation });
        });
    }

    pub fn on_filter_toggled(&mut self, toggle: FilterToggle) {
        self.state.toggle_filter(toggle);
    }

    pub fn on_submit(&mut self) -> u64 {
        self.debounce.cancel();
        self.issue_search()
    }

    pub fn on_arrow_down(&mut self) {
        self.state.move_selection(Direction::Down);
    }

    pub fn on_arrow_up(&mut self) {
        self.state.move_selection(Direction::Up);
    }

    pub async fn on_enter(&mut self) -> Option<RouteTarget> {
        match self.state.selected_result().cloned() {
            Some(result) => Some(self.on_result_activated(&result, None).await),
            None => {
                self.on_submit();
                None
            }
        }
    }

    pub fn on_escape(&mut self) {
        self.debounce.cancel();
        self.state.reset();
    }

    pub async fn on_result_activated(
        &self,
        result: &SearchResult,
        event: Option<&mut PointerEvent>,
    ) -> RouteTarget {
        if let Some(event) = event {
            event.stop_propagation();
        }

        let viewport = Viewport::from_is_mobile(self.collaborators.viewport.is_mobile());
        let target = match plan_route(result.entity_type, &result.id, viewport) {
            RoutePlan::Ready(target) => target,
            RoutePlan::ResolveFile { file_id } => {
                let file_target = self.resolve_file_target(&file_id).await;
                route_file(file_target, &file_id, viewport)
            }
        };

        tracing::info!(
            entity_type = %result.entity_type,
            id = %result.id,
            ?viewport,
            "activating search result"
        );
        let options = NavigateOptions {
            from: Some(SEARCH_ROUTE.to_string()),
        };
        dispatch(self.collaborators.navigator.as_ref(), &target, &options);
        target
    }

    pub async fn next_completion(&mut self) -> Option<Completion> {
        self.completions_rx.recv().await
    }

    pub fn apply_completion(&mut self, completion: Completion) -> bool {
        match completion {
            Completion::DebounceElapsed { generation } => {
                if !self.debounce.settle(generation) {
                    tracing::debug!(generation, "superseded debounce tick ignored");
                    return false;
                }
                if self.state.query().trim().is_empty() {
                    self.state.return_to_idle();
                } else {
                    self.issue_search();
                }
                true
            }
            Completion::Search {
                sequence_id,
                outcome: Ok(response),
            } => {
                let hits = response.hits.len();
                let applied = self.state.apply_response(sequence_id, response);
                if applied {
                    tracing::debug!(sequence_id, hits, "search response applied");
                } else {
                    tracing::debug!(
                        sequence_id,
                        last_request_id = self.state.last_request_id(),
                        "stale search response dropped"
                    );
                }
                applied
            }
            Completion::Search {
                sequence_id,
                outcome: Err(error),
            } => {
                let applied = self.state.apply_failure(sequence_id, &error.to_string());
                if applied {
                    tracing::error!(sequence_id, %error, "search failed");
                } else {
                    tracing::debug!(sequence_id, %error, "stale search failure dropped");
                }
                applied
            }
        }
    }

    pub async fn pump(&mut self) -> bool {
        match self.next_completion().await {
            Some(completion) => self.apply_completion(completion),
            None => false,
        }
    }

    fn issue_search(&mut self) -> u64 {
        let text = self.state.query().trim().to_string();
        let options = SearchOptions::compose(self.state.selected_filters(), self.settings.limit);
        let sequence_id = self.state.begin_request();
        tracing::debug!(sequence_id, query = %text, ?options, "issuing search");

        let provider = Arc::clone(&self.collaborators.provider);
        let tx = self.completions_tx.clone();
        tokio::spawn(async move {
            let outcome = provider.search(&text, &options).await;
            let _ = tx.send(Completion::Search {
                sequence_id,
                outcome,
            });
        });
        sequence_id
    }

    async fn resolve_file_target(&self, file_id: &str) -> FileOpenTarget {
        match self
            .collaborators
            .resolver
            .resolve_file_open_target(file_id)
            .await
        {
            Ok(target) => target,
            Err(error) => {
                tracing::warn!(%file_id, %error, "file target resolution failed; opening as file");
                FileOpenTarget::File
            }
        }
    }
}
