use std::path::PathBuf;
use std::sync::Arc;

use tokio::io::{AsyncBufReadExt, BufReader};

use crate::catalog::CatalogProvider;
use crate::config::{self, ConfigError};
use crate::contract::{UiCommand, UiSnapshot, UiUpdate};
use crate::file_store::{self, SqliteFileResolver, StoreError};
use crate::navigation::{FixedViewport, NavigateOptions, Navigator, PointerEvent};
use crate::orchestrator::{Collaborators, OrchestratorSettings, SearchOrchestrator};
use crate::routing::{RouteTarget, WindowPayload, WindowType};
use crate::transport::{encode_error, encode_update, parse_command, TransportError};

#[derive(Debug, thiserror::Error)]
pub enum RuntimeError {
    #[error("config error: {0}")]
    Config(#[from] ConfigError),
    #[error("file store error: {0}")]
    Store(#[from] StoreError),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RuntimeOptions {
    pub config_path: Option<PathBuf>,
    pub files_db_path: Option<PathBuf>,
    pub debounce_ms: Option<u64>,
    pub mobile: bool,
}

pub fn parse_cli_args(args: &[String]) -> Result<RuntimeOptions, String> {
    let mut options = RuntimeOptions::default();
    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--config" => options.config_path = Some(PathBuf::from(value_for(&mut iter, arg)?)),
            "--files-db" => {
                options.files_db_path = Some(PathBuf::from(value_for(&mut iter, arg)?))
            }
            "--debounce-ms" => {
                let raw = value_for(&mut iter, arg)?;
                let parsed = raw
                    .parse::<u64>()
                    .map_err(|_| format!("--debounce-ms expects milliseconds, got '{raw}'"))?;
                options.debounce_ms = Some(parsed);
            }
            "--mobile" => options.mobile = true,
            other => return Err(format!("unknown argument '{other}'")),
        }
    }
    Ok(options)
}

fn value_for<'a>(
    iter: &mut impl Iterator<Item = &'a String>,
    flag: &str,
) -> Result<&'a String, String> {
    iter.next().ok_or_else(|| format!("{flag} requires a value"))
}

pub fn run_with_options(options: RuntimeOptions) -> Result<(), RuntimeError> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    runtime.block_on(run_session(options))
}

async fn run_session(options: RuntimeOptions) -> Result<(), RuntimeError> {
    let mut config = config::load(options.config_path.as_deref())?;
    if let Some(debounce_ms) = options.debounce_ms {
        config.debounce_ms = debounce_ms;
    }
    if let Some(path) = options.files_db_path {
        config.files_db_path = path;
    }
    config::validate(&config).map_err(ConfigError::Invalid)?;

    if let Err(error) = crate::logging::init() {
        eprintln!("[tearleads-search] logging disabled: {error}");
    }
    tracing::info!(
        config_path = %config.config_path.display(),
        files_db_path = %config.files_db_path.display(),
        debounce_ms = config.debounce_ms,
        result_limit = config.result_limit,
        mobile = options.mobile,
        "search session starting"
    );

    let db = file_store::open_from_config(&config)?;
    let collaborators = Collaborators {
        provider: Arc::new(CatalogProvider),
        resolver: Arc::new(SqliteFileResolver::new(db)),
        navigator: Arc::new(JsonLinesNavigator),
        viewport: Arc::new(FixedViewport {
            mobile: options.mobile,
        }),
    };
    let mut orchestrator =
        SearchOrchestrator::new(collaborators, OrchestratorSettings::from(&config));
    emit_snapshot(&orchestrator);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else {
                    break;
                };
                if !line.trim().is_empty() {
                    handle_line(&mut orchestrator, &line).await;
                }
            }
            Some(completion) = orchestrator.next_completion() => {
                if orchestrator.apply_completion(completion) {
                    emit_snapshot(&orchestrator);
                }
            }
        }
    }

    tracing::info!("search session closed");
    Ok(())
}

async fn handle_line(orchestrator: &mut SearchOrchestrator, line: &str) {
    let outcome = match parse_command(line) {
        Ok(command) => apply_command(orchestrator, command).await,
        Err(error) => Err(error),
    };
    match outcome {
        Ok(_) => emit_snapshot(orchestrator),
        Err(error) => {
            tracing::warn!(%error, "rejected command");
            println!("{}", encode_error(&error));
        }
    }
}

pub async fn apply_command(
    orchestrator: &mut SearchOrchestrator,
    command: UiCommand,
) -> Result<Option<RouteTarget>, TransportError> {
    match command {
        UiCommand::QueryChanged { text } => orchestrator.on_query_text_changed(&text),
        UiCommand::ToggleFilter { filter } => orchestrator.on_filter_toggled(filter),
        UiCommand::Submit => {
            orchestrator.on_submit();
        }
        UiCommand::ArrowDown => orchestrator.on_arrow_down(),
        UiCommand::ArrowUp => orchestrator.on_arrow_up(),
        UiCommand::Enter => return Ok(orchestrator.on_enter().await),
        UiCommand::Escape => orchestrator.on_escape(),
        UiCommand::Activate { index } => {
            let results = orchestrator.state().results();
            let result = results
                .get(index)
                .cloned()
                .ok_or(TransportError::IndexOutOfRange {
                    index,
                    len: results.len(),
                })?;
            let mut event = PointerEvent::default();
            let target = orchestrator
                .on_result_activated(&result, Some(&mut event))
                .await;
            return Ok(Some(target));
        }
    }
    Ok(None)
}

fn emit_snapshot(orchestrator: &SearchOrchestrator) {
    let snapshot = UiSnapshot::from(orchestrator.state());
    println!("{}", encode_update(UiUpdate::Snapshot(snapshot)));
}

struct JsonLinesNavigator;

impl Navigator for JsonLinesNavigator {
    fn navigate(&self, path: &str, _options: &NavigateOptions) {
        emit_route(RouteTarget::Navigate {
            path: path.to_string(),
        });
    }

    fn open_window(&self, window: &WindowType) {
        emit_route(RouteTarget::OpenWindow {
            window: window.clone(),
        });
    }

    fn request_window_open(&self, window: &WindowType, payload: &WindowPayload) {
        emit_route(RouteTarget::RequestWindow {
            window: window.clone(),
            payload: payload.clone(),
        });
    }
}

fn emit_route(target: RouteTarget) {
    println!("{}", encode_update(UiUpdate::Route(target)));
}
