// Copyright (c) 2024-2026 Martin Schröder <info@swedishembedded.com>
//
// SPDX-License-Identifier: MIT
//! End-to-end controller scenarios against a scripted backend.

use std::sync::Arc;

use serde_json::json;

use docchat_api::{
    ApiError, BackendCall, ScriptedBackend, SearchPayload, SendMessageRequest, ThreadHandle,
};
use docchat_config::{Config, Variant};
use docchat_render::Role;

use crate::page::{EMPTY_PLACEHOLDER, ERROR_PLACEHOLDER};
use crate::*;

fn handle(thread: &str) -> ThreadHandle {
    ThreadHandle { thread_id: thread.into(), assistant_id: "a1".into() }
}

fn app_with(backend: &Arc<ScriptedBackend>, variant: Variant) -> App {
    let mut config = Config::default();
    config.ui.variant = variant;
    config.ui.welcome_message = "Welcome".into();
    App::new(backend.clone(), &config)
}

fn docs_backend() -> Arc<ScriptedBackend> {
    Arc::new(ScriptedBackend::ready("t1", "a1", &[("vs1", "Docs"), ("vs2", "Manuals")], "vs1"))
}

async fn booted(backend: &Arc<ScriptedBackend>) -> App {
    let mut app = app_with(backend, Variant::Tabbed);
    app.boot().await;
    app
}

async fn type_and_send(app: &mut App, text: &str) {
    app.dispatch(UiEvent::Input { field: Field::MessageInput, value: text.into() }).await;
    app.dispatch(UiEvent::Click(Control::SendButton)).await;
}

// ── Boot ──────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn boot_lists_stores_and_starts_session() {
    let backend = docs_backend();
    let app = booted(&backend).await;

    assert_eq!(app.state.session.handle(), Some(&handle("t1")));
    assert_eq!(app.state.current_store.as_deref(), Some("vs1"));
    assert_eq!(app.page.store_select.selected_label(), Some("Docs"));
    assert!(!app.page.store_select.is_disabled());
    assert!(!app.page.busy.is_visible());
    assert_eq!(app.page.transcript.len(), 1);
    assert_eq!(backend.start_thread_calls(), 1);
}

#[tokio::test]
async fn single_store_is_listed_and_selected() {
    let backend = Arc::new(ScriptedBackend::ready("t1", "a1", &[("vs1", "Docs")], "vs1"));
    let app = booted(&backend).await;

    let options = app.page.store_select.options();
    assert_eq!(options.len(), 1);
    assert_eq!(options[0].label, "Docs");
    assert_eq!(app.page.store_select.value(), Some("vs1"));
}

#[tokio::test]
async fn boot_selects_current_store_among_many() {
    let backend = Arc::new(ScriptedBackend::ready(
        "t1",
        "a1",
        &[("vs1", "Docs"), ("vs2", "Manuals")],
        "vs2",
    ));
    let app = booted(&backend).await;
    assert_eq!(app.page.store_select.value(), Some("vs2"));
    assert_eq!(app.page.store_select.selected_label(), Some("Manuals"));
}

#[tokio::test]
async fn boot_with_failed_session_shows_one_error() {
    let backend = Arc::new(ScriptedBackend::new());
    backend.push_list_vector_stores(Ok(Default::default()));
    backend.push_start_thread(Err(ApiError::application(500, "No assistant configured")));
    let app = booted(&backend).await;

    assert_eq!(app.state.session, SessionState::Error);
    assert_eq!(app.page.transcript.count(Role::Error), 1);
    assert_eq!(
        app.page.transcript.last().map(|n| n.body.as_str()),
        Some("Error: No assistant configured")
    );
    assert_eq!(app.page.store_select.selected_label(), Some(EMPTY_PLACEHOLDER));
    assert!(app.page.store_select.is_disabled());
    assert!(!app.page.busy.is_visible());
}

#[tokio::test]
async fn failed_store_listing_disables_select() {
    let backend = Arc::new(ScriptedBackend::new());
    backend.push_list_vector_stores(Err(ApiError::transport("connection refused")));
    backend.push_start_thread(Ok(handle("t1")));
    let app = booted(&backend).await;

    assert!(app.state.session.is_ready());
    assert_eq!(app.page.store_select.selected_label(), Some(ERROR_PLACEHOLDER));
    assert!(app.page.store_select.is_disabled());
    assert_eq!(
        app.page.transcript.last().map(|n| n.body.as_str()),
        Some("Error: Network error: connection refused")
    );
}

#[tokio::test]
async fn refresh_reloads_the_listing() {
    let backend = docs_backend();
    let mut app = booted(&backend).await;
    backend.push_list_vector_stores(Ok(docchat_api::VectorStoreListing {
        vector_stores: vec![docchat_api::VectorStore::new("vs9", None)],
        current_vector_store_id: Some("vs9".into()),
    }));
    app.dispatch(UiEvent::Click(Control::RefreshStores)).await;

    assert_eq!(app.page.store_select.options().len(), 1);
    assert_eq!(app.page.store_select.selected_label(), Some("vs9"));
    assert_eq!(app.state.current_store.as_deref(), Some("vs9"));
}

// ── Sending ───────────────────────────────────────────────────────────────────

#[tokio::test]
async fn send_appends_user_then_assistant() {
    let backend = docs_backend();
    let mut app = booted(&backend).await;
    backend.push_reply("See **section 2**.");
    type_and_send(&mut app, "  Where is it?  ").await;

    let nodes = app.page.transcript.nodes();
    assert_eq!(nodes.len(), 3);
    assert_eq!(nodes[1].role, Role::User);
    assert_eq!(nodes[1].body, "Where is it?");
    assert_eq!(nodes[2].role, Role::Assistant);
    assert!(nodes[2].body.contains("<strong>section 2</strong>"));
    assert_eq!(app.page.message_input.value(), "");
    assert!(app.page.transcript.is_scrolled_to_end());
    assert!(!app.page.busy.is_visible());
    assert_eq!(
        backend.send_message_calls(),
        vec![SendMessageRequest::new(&handle("t1"), "Where is it?")]
    );
}

#[tokio::test]
async fn blank_message_sends_nothing() {
    let backend = docs_backend();
    let mut app = booted(&backend).await;
    type_and_send(&mut app, "   \n\t ").await;

    assert!(backend.send_message_calls().is_empty());
    assert_eq!(app.page.transcript.len(), 1);
}

#[tokio::test]
async fn send_without_session_reports_once() {
    let backend = Arc::new(ScriptedBackend::new());
    let mut app = app_with(&backend, Variant::Tabbed);
    type_and_send(&mut app, "hello").await;

    assert!(backend.calls().is_empty());
    assert_eq!(app.page.transcript.count(Role::Error), 1);
    assert_eq!(
        app.page.transcript.last().map(|n| n.body.clone()),
        Some(format!("Error: {NOT_INITIALIZED}"))
    );
    assert_eq!(app.page.message_input.value(), "hello");
}

#[tokio::test]
async fn send_failure_reports_server_text() {
    let backend = docs_backend();
    let mut app = booted(&backend).await;
    backend.push_send_message(Err(ApiError::application(500, "Run failed")));
    type_and_send(&mut app, "hi").await;

    assert_eq!(app.page.transcript.len(), 3);
    assert_eq!(app.page.transcript.last().map(|n| n.body.as_str()), Some("Error: Run failed"));
    assert!(!app.page.busy.is_visible());
}

#[tokio::test]
async fn send_failure_without_text_uses_fallback() {
    let backend = docs_backend();
    let mut app = booted(&backend).await;
    backend.push_send_message(Err(ApiError::Application { status: Some(502), message: None }));
    type_and_send(&mut app, "hi").await;

    assert_eq!(
        app.page.transcript.last().map(|n| n.body.clone()),
        Some(format!("Error: {FAILED_SEND}"))
    );
}

#[tokio::test]
async fn user_text_is_not_markup() {
    let backend = docs_backend();
    let mut app = booted(&backend).await;
    backend.push_reply("ok");
    type_and_send(&mut app, "<b>bold</b>").await;
    assert_eq!(app.page.transcript.nodes()[1].body, "&lt;b&gt;bold&lt;/b&gt;");
}

#[tokio::test]
async fn enter_sends_and_shift_enter_does_not() {
    let backend = docs_backend();
    let mut app = booted(&backend).await;
    backend.push_reply("ok");
    app.dispatch(UiEvent::Input { field: Field::MessageInput, value: "hi".into() }).await;

    app.dispatch(UiEvent::KeyDown { field: Field::MessageInput, key: Key::Enter, shift: true })
        .await;
    assert!(backend.send_message_calls().is_empty());

    app.dispatch(UiEvent::KeyDown { field: Field::MessageInput, key: Key::Other, shift: false })
        .await;
    assert!(backend.send_message_calls().is_empty());

    app.dispatch(UiEvent::KeyDown { field: Field::MessageInput, key: Key::Enter, shift: false })
        .await;
    assert_eq!(backend.send_message_calls().len(), 1);
}

// ── Tabs ──────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn tab_click_switches_panel_and_focus() {
    let backend = docs_backend();
    let mut app = booted(&backend).await;
    app.dispatch(UiEvent::Click(Control::Tab(Tab::Search))).await;

    assert_eq!(app.state.active_tab, Tab::Search);
    assert!(app.page.tabs.is_control_active(Tab::Search));
    assert!(!app.page.tabs.is_control_active(Tab::Chat));
    assert!(app.page.tabs.is_panel_visible(Tab::Search));
    assert!(!app.page.tabs.is_panel_visible(Tab::Chat));
    assert_eq!(app.page.focus, Some(Field::SearchQuery));
}

#[tokio::test]
async fn select_tab_schedules_delayed_focus() {
    let backend = docs_backend();
    let mut app = app_with(&backend, Variant::Tabbed);
    assert_eq!(
        app.select_tab(Tab::Chat),
        Some(FocusRequest { field: Field::MessageInput, after: FOCUS_DELAY })
    );
}

#[tokio::test]
async fn send_is_gated_to_chat_tab() {
    let backend = docs_backend();
    let mut app = booted(&backend).await;
    app.dispatch(UiEvent::Click(Control::Tab(Tab::Search))).await;
    app.dispatch(UiEvent::Input { field: Field::MessageInput, value: "hi".into() }).await;

    app.dispatch(UiEvent::KeyDown { field: Field::MessageInput, key: Key::Enter, shift: false })
        .await;
    app.dispatch(UiEvent::Click(Control::SendButton)).await;
    assert!(backend.send_message_calls().is_empty());
    assert_eq!(app.page.transcript.len(), 1);
}

// ── Vector store switching ────────────────────────────────────────────────────

#[tokio::test]
async fn store_switch_resets_conversation() {
    let backend = docs_backend();
    let mut app = booted(&backend).await;
    backend.push_reply("answer");
    type_and_send(&mut app, "question").await;
    assert_eq!(app.page.transcript.len(), 3);

    backend.push_set_vector_store(Ok(()));
    backend.push_start_thread(Ok(handle("t2")));
    app.dispatch(UiEvent::SelectStore("vs2".into())).await;

    let nodes = app.page.transcript.nodes();
    assert_eq!(nodes.len(), 2);
    assert_eq!(nodes[0].body, "<p>Welcome</p>\n");
    assert_eq!(nodes[1].role, Role::System);
    assert_eq!(
        nodes[1].body,
        "Vector store changed successfully. You are now using &quot;Manuals&quot;."
    );
    assert_eq!(app.state.current_store.as_deref(), Some("vs2"));
    assert_eq!(app.state.session.handle(), Some(&handle("t2")));
    assert_eq!(backend.start_thread_calls(), 2);
    assert!(!app.page.busy.is_visible());
}

#[tokio::test]
async fn selecting_current_store_is_a_no_op() {
    let backend = docs_backend();
    let mut app = booted(&backend).await;
    app.dispatch(UiEvent::SelectStore("vs1".into())).await;
    app.dispatch(UiEvent::SelectStore(String::new())).await;

    assert_eq!(backend.count(|c| matches!(c, BackendCall::SetVectorStore(_))), 0);
    assert_eq!(app.page.transcript.len(), 1);
}

#[tokio::test]
async fn failed_store_switch_reverts_selection() {
    let backend = docs_backend();
    let mut app = booted(&backend).await;
    backend.push_set_vector_store(Err(ApiError::application(404, "Vector store not found")));
    app.dispatch(UiEvent::SelectStore("vs2".into())).await;

    assert_eq!(app.page.store_select.value(), Some("vs1"));
    assert_eq!(app.state.current_store.as_deref(), Some("vs1"));
    assert_eq!(app.state.session.handle(), Some(&handle("t1")));
    assert_eq!(
        app.page.transcript.last().map(|n| n.body.as_str()),
        Some("Error: Vector store not found")
    );
    assert_eq!(backend.start_thread_calls(), 1);
}

#[tokio::test]
async fn disabled_selection_ignores_store_changes() {
    let backend = Arc::new(ScriptedBackend::new());
    backend.push_list_vector_stores(Err(ApiError::transport("connection refused")));
    backend.push_start_thread(Ok(handle("t1")));
    let mut app = booted(&backend).await;
    let before = app.page.transcript.len();

    app.dispatch(UiEvent::SelectStore("ghost".into())).await;

    assert!(app.page.store_select.is_disabled());
    assert_eq!(backend.count(|c| matches!(c, BackendCall::SetVectorStore(_))), 0);
    assert_eq!(app.page.transcript.len(), before);
    assert_eq!(app.state.session.handle(), Some(&handle("t1")));
}

#[tokio::test]
async fn unlisted_store_is_rejected_with_alert() {
    let backend = docs_backend();
    let mut app = booted(&backend).await;
    app.dispatch(UiEvent::SelectStore("ghost".into())).await;

    assert_eq!(backend.count(|c| matches!(c, BackendCall::SetVectorStore(_))), 0);
    assert_eq!(app.page.store_select.value(), Some("vs1"));
    assert_eq!(app.page.take_alerts(), vec!["Unknown vector store \"ghost\"".to_string()]);
    assert_eq!(app.page.transcript.len(), 1);
}

#[tokio::test]
async fn switch_then_failed_init_leaves_error_state() {
    let backend = docs_backend();
    let mut app = booted(&backend).await;
    backend.push_set_vector_store(Ok(()));
    backend.push_start_thread(Err(ApiError::transport("timed out")));
    app.dispatch(UiEvent::SelectStore("vs2".into())).await;

    assert_eq!(app.state.session, SessionState::Error);
    assert_eq!(app.page.transcript.count(Role::System), 1);
    assert_eq!(app.page.transcript.count(Role::Error), 1);

    type_and_send(&mut app, "hello").await;
    assert!(backend.send_message_calls().is_empty());
}

// ── Search ────────────────────────────────────────────────────────────────────

async fn search_for(app: &mut App, query: &str) {
    app.dispatch(UiEvent::Click(Control::Tab(Tab::Search))).await;
    app.dispatch(UiEvent::Input { field: Field::SearchQuery, value: query.into() }).await;
    app.dispatch(UiEvent::Click(Control::SearchButton)).await;
}

#[tokio::test]
async fn empty_query_alerts_without_request() {
    let backend = docs_backend();
    let mut app = booted(&backend).await;
    search_for(&mut app, "   ").await;

    assert_eq!(app.page.take_alerts(), vec![EMPTY_QUERY_ALERT.to_string()]);
    assert!(backend.search_calls().is_empty());
    assert_eq!(app.page.results.revision(), 0);
}

#[tokio::test]
async fn search_renders_result_cards() {
    let backend = docs_backend();
    let mut app = booted(&backend).await;
    backend.push_search(Ok(SearchPayload(json!({
        "data": [{
            "filename": "guide.pdf",
            "score": 0.873,
            "file_id": "f1",
            "content": [{ "type": "text", "text": "Refunds take 5 days." }]
        }]
    }))));
    search_for(&mut app, "refund policy").await;

    let html = app.page.results.html();
    assert!(html.starts_with("<h3>Search Results</h3>"));
    assert!(html.contains("Result 1: guide.pdf"));
    assert!(html.contains("Score: 87.30%"));
    assert!(html.contains("File ID: f1"));
    assert!(html.contains("Refunds take 5 days."));
    assert!(!app.page.busy.is_visible());

    let req = &backend.search_calls()[0];
    assert_eq!(req.query, "refund policy");
    assert_eq!(req.max_results, 10);
    assert!(!req.rewrite_query);
}

#[tokio::test]
async fn search_enter_key_and_options() {
    let backend = docs_backend();
    let mut app = booted(&backend).await;
    backend.push_search(Ok(SearchPayload(json!({ "data": [] }))));
    app.dispatch(UiEvent::Input { field: Field::SearchQuery, value: "q".into() }).await;
    app.dispatch(UiEvent::Input { field: Field::MaxResults, value: "500".into() }).await;
    app.dispatch(UiEvent::SetRewriteQuery(true)).await;
    app.dispatch(UiEvent::KeyDown { field: Field::SearchQuery, key: Key::Enter, shift: true })
        .await;

    let req = &backend.search_calls()[0];
    assert_eq!(req.max_results, 50);
    assert!(req.rewrite_query);
    assert!(app.page.results.html().contains(docchat_render::NO_RESULTS_TEXT));
}

#[tokio::test]
async fn invalid_max_results_falls_back_to_default() {
    let backend = docs_backend();
    let mut app = booted(&backend).await;
    app.page.max_results.set("zero");
    assert_eq!(app.requested_max_results(), 10);
    app.page.max_results.set("0");
    assert_eq!(app.requested_max_results(), 10);
    app.page.max_results.set("3");
    assert_eq!(app.requested_max_results(), 3);
}

#[tokio::test]
async fn search_failure_renders_error_placeholder() {
    let backend = docs_backend();
    let mut app = booted(&backend).await;
    backend.push_search(Err(ApiError::application(400, "No vector store selected")));
    search_for(&mut app, "anything").await;

    assert!(app.page.results.html().contains("Error: No vector store selected"));
    assert_eq!(app.page.transcript.len(), 1);
}

// ── Simple layout ─────────────────────────────────────────────────────────────

#[tokio::test]
async fn simple_layout_sends_without_tabs() {
    let backend = docs_backend();
    let mut app = app_with(&backend, Variant::Simple);
    app.boot().await;
    backend.push_reply("ok");
    app.dispatch(UiEvent::Input { field: Field::MessageInput, value: "hi".into() }).await;
    app.dispatch(UiEvent::KeyDown { field: Field::MessageInput, key: Key::Enter, shift: false })
        .await;

    assert_eq!(backend.send_message_calls().len(), 1);
    assert_eq!(app.select_tab(Tab::Search), None);
    assert_eq!(app.state.active_tab, Tab::Chat);
}

#[tokio::test]
async fn simple_layout_has_no_search() {
    let backend = docs_backend();
    let mut app = app_with(&backend, Variant::Simple);
    app.boot().await;
    app.page.search_input.set("query");
    app.dispatch(UiEvent::Click(Control::SearchButton)).await;

    assert!(backend.search_calls().is_empty());
    assert!(app.page.alerts().is_empty());
}
