#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::{mpsc, oneshot};

use tearleads_search_core::model::{EntityType, SearchOptions, SearchResponse, SearchResult};
use tearleads_search_core::navigation::{NavigateOptions, Navigator, ViewportClassifier};
use tearleads_search_core::orchestrator::{
    Collaborators, OrchestratorSettings, SearchOrchestrator,
};
use tearleads_search_core::provider::{
    FileOpenTarget, FileTargetResolver, ResolveError, SearchError, SearchProvider,
};
use tearleads_search_core::routing::{RouteTarget, WindowPayload, WindowType};

pub const DEBOUNCE: Duration = Duration::from_millis(200);
pub const LIMIT: usize = 50;

pub fn response(titles: &[&str]) -> SearchResponse {
    SearchResponse {
        hits: titles
            .iter()
            .enumerate()
            .map(|(i, title)| SearchResult::new(&format!("n{i}"), EntityType::Note, title))
            .collect(),
        count: titles.len(),
    }
}

/// One provider call the test answers by hand.
pub struct PendingCall {
    pub text: String,
    pub options: SearchOptions,
    reply: oneshot::Sender<Result<SearchResponse, SearchError>>,
}

impl PendingCall {
    pub fn resolve(self, response: SearchResponse) {
        let _ = self.reply.send(Ok(response));
    }

    pub fn reject(self, error: SearchError) {
        let _ = self.reply.send(Err(error));
    }
}

pub struct ScriptedProvider {
    calls: mpsc::UnboundedSender<PendingCall>,
}

impl ScriptedProvider {
    pub fn new() -> (Self, mpsc::UnboundedReceiver<PendingCall>) {
        let (calls, rx) = mpsc::unbounded_channel();
        (Self { calls }, rx)
    }
}

#[async_trait]
impl SearchProvider for ScriptedProvider {
    async fn search(
        &self,
        text: &str,
        options: &SearchOptions,
    ) -> Result<SearchResponse, SearchError> {
        let (reply, answer) = oneshot::channel();
        let _ = self.calls.send(PendingCall {
            text: text.to_string(),
            options: options.clone(),
            reply,
        });
        answer
            .await
            .unwrap_or_else(|_| Err(SearchError::Unavailable("call abandoned".into())))
    }
}

/// Answers every call at once with a canned response and records it.
#[derive(Default)]
pub struct ImmediateProvider {
    pub response: SearchResponse,
    pub calls: Mutex<Vec<(String, SearchOptions)>>,
}

impl ImmediateProvider {
    pub fn with_response(response: SearchResponse) -> Self {
        Self {
            response,
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> Vec<(String, SearchOptions)> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl SearchProvider for ImmediateProvider {
    async fn search(
        &self,
        text: &str,
        options: &SearchOptions,
    ) -> Result<SearchResponse, SearchError> {
        self.calls
            .lock()
            .unwrap()
            .push((text.to_string(), options.clone()));
        Ok(self.response.clone())
    }
}

#[derive(Default)]
pub struct MapResolver {
    pub targets: HashMap<String, FileOpenTarget>,
    pub calls: Mutex<usize>,
}

impl MapResolver {
    pub fn with(entries: &[(&str, FileOpenTarget)]) -> Self {
        Self {
            targets: entries
                .iter()
                .map(|(id, target)| (id.to_string(), *target))
                .collect(),
            calls: Mutex::new(0),
        }
    }
}

#[async_trait]
impl FileTargetResolver for MapResolver {
    async fn resolve_file_open_target(
        &self,
        file_id: &str,
    ) -> Result<FileOpenTarget, ResolveError> {
        *self.calls.lock().unwrap() += 1;
        self.targets
            .get(file_id)
            .copied()
            .ok_or_else(|| ResolveError::NotFound(file_id.to_string()))
    }
}

#[derive(Default)]
pub struct RecordingNavigator {
    pub routes: Mutex<Vec<RouteTarget>>,
    pub navigate_options: Mutex<Vec<NavigateOptions>>,
}

impl RecordingNavigator {
    pub fn routes(&self) -> Vec<RouteTarget> {
        self.routes.lock().unwrap().clone()
    }

    pub fn navigate_options(&self) -> Vec<NavigateOptions> {
        self.navigate_options.lock().unwrap().clone()
    }
}

impl Navigator for RecordingNavigator {
    fn navigate(&self, path: &str, options: &NavigateOptions) {
        self.navigate_options.lock().unwrap().push(options.clone());
        self.routes.lock().unwrap().push(RouteTarget::Navigate {
            path: path.to_string(),
        });
    }

    fn open_window(&self, window: &WindowType) {
        self.routes.lock().unwrap().push(RouteTarget::OpenWindow {
            window: window.clone(),
        });
    }

    fn request_window_open(&self, window: &WindowType, payload: &WindowPayload) {
        self.routes.lock().unwrap().push(RouteTarget::RequestWindow {
            window: window.clone(),
            payload: payload.clone(),
        });
    }
}

#[derive(Default)]
pub struct SwitchableViewport {
    pub mobile: AtomicBool,
}

impl SwitchableViewport {
    pub fn set_mobile(&self, mobile: bool) {
        self.mobile.store(mobile, Ordering::SeqCst);
    }
}

impl ViewportClassifier for SwitchableViewport {
    fn is_mobile(&self) -> bool {
        self.mobile.load(Ordering::SeqCst)
    }
}

pub struct Harness {
    pub orchestrator: SearchOrchestrator,
    pub navigator: Arc<RecordingNavigator>,
    pub viewport: Arc<SwitchableViewport>,
    pub resolver: Arc<MapResolver>,
}

pub fn harness(provider: Arc<dyn SearchProvider>, resolver: MapResolver) -> Harness {
    let navigator = Arc::new(RecordingNavigator::default());
    let viewport = Arc::new(SwitchableViewport::default());
    let resolver = Arc::new(resolver);
    let collaborators = Collaborators {
        provider,
        resolver: resolver.clone(),
        navigator: navigator.clone(),
        viewport: viewport.clone(),
    };
    let orchestrator = SearchOrchestrator::new(
        collaborators,
        OrchestratorSettings {
            debounce: DEBOUNCE,
            limit: LIMIT,
        },
    );
    Harness {
        orchestrator,
        navigator,
        viewport,
        resolver,
    }
}
