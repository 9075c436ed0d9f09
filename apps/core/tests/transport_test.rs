mod support;

use std::sync::Arc;

use support::{harness, response, ImmediateProvider, MapResolver};
use tearleads_search_core::contract::{UiCommand, UiSnapshot, UiUpdate};
use tearleads_search_core::model::{EntityType, FilterToggle};
use tearleads_search_core::routing::{RouteTarget, WindowPayload, WindowType};
use tearleads_search_core::runtime::apply_command;
use tearleads_search_core::transport::{
    encode_error, encode_update, parse_command, ErrorCode, TransportError,
};

#[test]
fn parses_each_command_shape() {
    assert_eq!(
        parse_command(r#"{"kind":"query_changed","payload":{"text":"ada"}}"#).unwrap(),
        UiCommand::QueryChanged { text: "ada".into() }
    );
    assert_eq!(
        parse_command(r#"{"kind":"toggle_filter","payload":{"filter":"ai_conversation"}}"#)
            .unwrap(),
        UiCommand::ToggleFilter {
            filter: FilterToggle::Type(EntityType::AiConversation)
        }
    );
    assert_eq!(
        parse_command(r#"{"kind":"toggle_filter","payload":{"filter":"all"}}"#).unwrap(),
        UiCommand::ToggleFilter {
            filter: FilterToggle::ALL
        }
    );
    assert_eq!(parse_command(r#"{"kind":"escape"}"#).unwrap(), UiCommand::Escape);
    assert_eq!(
        parse_command(r#" {"kind":"activate","payload":{"index":3}} "#).unwrap(),
        UiCommand::Activate { index: 3 }
    );
}

#[test]
fn distinguishes_bad_json_from_unknown_commands() {
    let bad_json = parse_command("{not-json").unwrap_err();
    assert_eq!(bad_json.code(), ErrorCode::InvalidJson);

    let unknown = parse_command(r#"{"kind":"page_down"}"#).unwrap_err();
    assert_eq!(unknown.code(), ErrorCode::InvalidCommand);

    let bad_filter =
        parse_command(r#"{"kind":"toggle_filter","payload":{"filter":"podcast"}}"#).unwrap_err();
    assert_eq!(bad_filter.code(), ErrorCode::InvalidCommand);
}

#[test]
fn encodes_error_lines_with_status_tag() {
    let line = encode_error(&TransportError::IndexOutOfRange { index: 4, len: 2 });
    let parsed: serde_json::Value = serde_json::from_str(&line).unwrap();
    assert_eq!(parsed["status"], "err");
    assert_eq!(parsed["error"]["code"], "index_out_of_range");
}

#[test]
fn encodes_idle_snapshot() {
    let state = tearleads_search_core::search_state::SearchUiState::default();
    let line = encode_update(UiUpdate::Snapshot(UiSnapshot::from(&state)));
    let parsed: serde_json::Value = serde_json::from_str(&line).unwrap();

    assert_eq!(parsed["status"], "ok");
    assert_eq!(parsed["update"]["kind"], "snapshot");
    assert_eq!(parsed["update"]["payload"]["display_state"], "idle");
    assert_eq!(parsed["update"]["payload"]["selected_index"], serde_json::Value::Null);
    assert!(parsed["update"]["payload"].get("last_error").is_none());
}

#[tokio::test(start_paused = true)]
async fn commands_drive_orchestrator_and_activation() {
    let provider = Arc::new(ImmediateProvider::with_response(response(&["Groceries"])));
    let mut h = harness(provider, MapResolver::default());

    apply_command(
        &mut h.orchestrator,
        UiCommand::QueryChanged {
            text: "groc".into(),
        },
    )
    .await
    .unwrap();
    apply_command(&mut h.orchestrator, UiCommand::Submit)
        .await
        .unwrap();
    h.orchestrator.pump().await;

    let out_of_range = apply_command(&mut h.orchestrator, UiCommand::Activate { index: 5 }).await;
    assert_eq!(
        out_of_range,
        Err(TransportError::IndexOutOfRange { index: 5, len: 1 })
    );

    let route = apply_command(&mut h.orchestrator, UiCommand::Activate { index: 0 })
        .await
        .unwrap();
    assert_eq!(
        route,
        Some(RouteTarget::RequestWindow {
            window: WindowType::Notes,
            payload: WindowPayload::NoteId("n0".into()),
        })
    );

    apply_command(&mut h.orchestrator, UiCommand::Escape)
        .await
        .unwrap();
    assert_eq!(h.orchestrator.state().query(), "");
}
