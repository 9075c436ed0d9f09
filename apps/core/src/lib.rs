pub mod catalog;
pub mod config;
pub mod contract;
pub mod debounce;
pub mod file_store;
pub mod logging;
pub mod model;
pub mod navigation;
pub mod orchestrator;
pub mod provider;
pub mod routing;
pub mod runtime;
pub mod search_state;
pub mod transport;
