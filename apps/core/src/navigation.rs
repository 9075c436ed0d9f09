use serde::Serialize;

use crate::routing::{RouteTarget, WindowPayload, WindowType};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct NavigateOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub from: Option<String>,
}

pub trait Navigator: Send + Sync {
    fn navigate(&self, path: &str, options: &NavigateOptions);
    fn open_window(&self, window: &WindowType);
    fn request_window_open(&self, window: &WindowType, payload: &WindowPayload);
}

pub trait ViewportClassifier: Send + Sync {
    fn is_mobile(&self) -> bool;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedViewport {
    pub mobile: bool,
}

impl ViewportClassifier for FixedViewport {
    fn is_mobile(&self) -> bool {
        self.mobile
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PointerEvent {
    propagation_stopped: bool,
}

impl PointerEvent {
    pub fn stop_propagation(&mut self) {
        self.propagation_stopped = true;
    }

    pub fn is_propagation_stopped(&self) -> bool {
        self.propagation_stopped
    }
}

pub fn dispatch(navigator: &dyn Navigator, target: &RouteTarget, options: &NavigateOptions) {
    match target {
        RouteTarget::Navigate { path } => navigator.navigate(path, options),
        RouteTarget::OpenWindow { window } => navigator.open_window(window),
        RouteTarget::RequestWindow { window, payload } => {
            navigator.request_window_open(window, payload)
        }
    }
}
