use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use serde_json::json;

use super::*;
use crate::surface::MemorySurface;

type Responder = Box<dyn Fn(&str) -> Result<Vec<AddressCandidate>> + Send + Sync>;

/// In-memory provider that records every query it is asked for.
struct ScriptedProvider {
    calls: Mutex<Vec<String>>,
    delay: Duration,
    respond: Responder,
}

impl ScriptedProvider {
    fn new(delay: Duration, respond: Responder) -> Arc<Self> {
        Arc::new(Self {
            calls: Mutex::new(Vec::new()),
            delay,
            respond,
        })
    }

    /// Answers with `n` rows derived from the query.
    fn rows(n: usize) -> Arc<Self> {
        Self::new(
            Duration::from_millis(20),
            Box::new(move |text: &str| {
                Ok((0..n)
                    .map(|i| {
                        AddressCandidate::new(format!("{text}, row {i}"))
                            .with_field("lat", 40.0 + i as f64)
                            .with_field("lon", -74.0)
                    })
                    .collect())
            }),
        )
    }

    fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl SuggestionProvider for ScriptedProvider {
    async fn suggest(&self, text: &str) -> Result<Vec<AddressCandidate>> {
        self.calls.lock().unwrap().push(text.to_string());
        tokio::time::sleep(self.delay).await;
        (self.respond)(text)
    }
}

type Selections = Arc<Mutex<Vec<Option<String>>>>;

fn attach(provider: Arc<ScriptedProvider>) -> (AutocompleteWidget<MemorySurface>, Selections) {
    let selections: Selections = Arc::new(Mutex::new(Vec::new()));
    let sink = selections.clone();
    let widget = AutocompleteWidget::attach(
        MemorySurface::new(),
        provider,
        move |selection: Option<&AddressCandidate>| {
            sink.lock()
                .unwrap()
                .push(selection.map(|c| c.formatted.clone()));
        },
        WidgetConfig::new("address", "Enter an address here"),
    );
    (widget, selections)
}

/// Type `text` one character at a time with no pause between keystrokes.
fn type_text(widget: &mut AutocompleteWidget<MemorySurface>, text: &str) {
    for c in text.chars() {
        widget.surface_mut().text_input_mut().insert_char(c);
        widget.on_input();
    }
}

fn input_text(widget: &AutocompleteWidget<MemorySurface>) -> String {
    widget.surface().text_input().value.clone()
}

/// Type, wait out the debounce and apply the response.
async fn open_with(widget: &mut AutocompleteWidget<MemorySurface>, text: &str) -> usize {
    type_text(widget, text);
    assert!(matches!(widget.process_next().await, Applied::RequestStarted { .. }));
    match widget.process_next().await {
        Applied::Rendered { rows } => rows,
        other => panic!("expected rendered rows, got {other:?}"),
    }
}

// ─── Debounce ──────────────────────────────────────────────

#[tokio::test(start_paused = true)]
async fn short_input_never_requests() {
    let provider = ScriptedProvider::rows(2);
    let (mut widget, _) = attach(provider.clone());

    type_text(&mut widget, "12");
    tokio::time::sleep(Duration::from_secs(2)).await;
    assert!(widget.drain_completions().is_empty());

    widget.on_text_changed("  ab   ");
    tokio::time::sleep(Duration::from_secs(2)).await;
    assert!(widget.drain_completions().is_empty());

    assert!(provider.calls().is_empty());
    assert!(widget.surface().is_clear_visible());
    assert!(!widget.state().has_pending_timer());
}

#[tokio::test(start_paused = true)]
async fn burst_of_keystrokes_issues_one_request() {
    let provider = ScriptedProvider::rows(2);
    let (mut widget, selections) = attach(provider.clone());

    type_text(&mut widget, "12 Main");
    assert!(widget.state().has_pending_timer());

    match widget.process_next().await {
        Applied::RequestStarted { query } => assert_eq!(query, "12 Main"),
        other => panic!("unexpected {other:?}"),
    }
    assert!(matches!(widget.process_next().await, Applied::Rendered { rows: 2 }));

    assert_eq!(provider.calls(), vec!["12 Main".to_string()]);
    assert_eq!(
        widget.surface().rows(),
        Some(&["12 Main, row 0".to_string(), "12 Main, row 1".to_string()][..])
    );
    assert!(widget.state().is_list_open());
    assert_eq!(widget.state().focused_index(), None);
    assert!(selections.lock().unwrap().is_empty());
}

#[tokio::test(start_paused = true)]
async fn retyping_inside_window_requests_final_text_only() {
    let provider = ScriptedProvider::rows(1);
    let (mut widget, _) = attach(provider.clone());

    type_text(&mut widget, "12 Main");
    tokio::time::sleep(Duration::from_millis(200)).await;
    type_text(&mut widget, " St");

    match widget.process_next().await {
        Applied::RequestStarted { query } => assert_eq!(query, "12 Main St"),
        other => panic!("unexpected {other:?}"),
    }
    widget.process_next().await;
    assert_eq!(provider.calls(), vec!["12 Main St".to_string()]);
}

#[tokio::test(start_paused = true)]
async fn emptying_the_input_reports_no_selection() {
    let (mut widget, selections) = attach(ScriptedProvider::rows(1));

    type_text(&mut widget, "abc");
    assert!(widget.surface().is_clear_visible());
    for _ in 0..3 {
        widget.surface_mut().text_input_mut().delete_back();
        widget.on_input();
    }

    assert!(!widget.surface().is_clear_visible());
    assert!(!widget.state().has_pending_timer());
    assert_eq!(*selections.lock().unwrap(), vec![None]);
}

// ─── Cancellation ──────────────────────────────────────────

#[tokio::test(start_paused = true)]
async fn new_cycle_cancels_in_flight_request() {
    let provider = ScriptedProvider::new(
        Duration::from_secs(1),
        Box::new(|text: &str| Ok(vec![AddressCandidate::new(text)])),
    );
    let (mut widget, _) = attach(provider.clone());

    type_text(&mut widget, "12 Main");
    assert!(matches!(widget.process_next().await, Applied::RequestStarted { .. }));
    tokio::time::sleep(Duration::from_millis(50)).await;
    assert_eq!(provider.calls(), vec!["12 Main".to_string()]);

    type_text(&mut widget, " St");
    assert!(!widget.state().has_pending_request());

    assert!(matches!(widget.process_next().await, Applied::Canceled));
    assert_eq!(widget.surface().rows(), None);
    assert_eq!(input_text(&widget), "12 Main St");

    match widget.process_next().await {
        Applied::RequestStarted { query } => assert_eq!(query, "12 Main St"),
        other => panic!("unexpected {other:?}"),
    }
    assert!(matches!(widget.process_next().await, Applied::Rendered { rows: 1 }));
    assert_eq!(widget.state().items()[0].formatted, "12 Main St");
}

#[tokio::test(start_paused = true)]
async fn clear_cancels_in_flight_request() {
    let provider = ScriptedProvider::new(
        Duration::from_secs(1),
        Box::new(|text: &str| Ok(vec![AddressCandidate::new(text)])),
    );
    let (mut widget, selections) = attach(provider);

    type_text(&mut widget, "12 Main St");
    assert!(matches!(widget.process_next().await, Applied::RequestStarted { .. }));
    widget.on_click(ClickTarget::ClearButton);

    assert!(matches!(widget.process_next().await, Applied::Canceled));
    tokio::time::sleep(Duration::from_secs(2)).await;
    assert!(widget.drain_completions().is_empty());
    assert_eq!(widget.surface().rows(), None);
    assert_eq!(input_text(&widget), "");
    assert_eq!(*selections.lock().unwrap(), vec![None]);
}

#[tokio::test(start_paused = true)]
async fn failed_request_leaves_widget_usable() {
    let provider = ScriptedProvider::new(
        Duration::from_millis(10),
        Box::new(|text: &str| {
            if text.starts_with("boom") {
                Err(GeoInputError::Api {
                    status: 401,
                    body: json!({"statusCode": 401, "message": "Invalid apiKey"}),
                })
            } else {
                Ok(vec![AddressCandidate::new(text)])
            }
        }),
    );
    let (mut widget, _) = attach(provider);

    type_text(&mut widget, "boom town");
    widget.process_next().await;
    match widget.process_next().await {
        Applied::Failed(GeoInputError::Api { status, .. }) => assert_eq!(status, 401),
        other => panic!("unexpected {other:?}"),
    }
    assert!(!widget.state().is_list_open());
    assert_eq!(input_text(&widget), "boom town");

    widget.on_text_changed("Main Street");
    assert!(matches!(widget.process_next().await, Applied::RequestStarted { .. }));
    assert!(matches!(widget.process_next().await, Applied::Rendered { rows: 1 }));
}

#[tokio::test(start_paused = true)]
async fn empty_result_set_keeps_list_closed() {
    let (mut widget, _) = attach(ScriptedProvider::rows(0));
    type_text(&mut widget, "nowhere");
    widget.process_next().await;
    assert!(matches!(widget.process_next().await, Applied::NoResults));
    assert!(!widget.state().is_list_open());
    assert_eq!(widget.surface().lists_built(), 0);
}

// ─── Keyboard ──────────────────────────────────────────────

#[tokio::test(start_paused = true)]
async fn down_cycles_focus_with_live_preview() {
    let (mut widget, selections) = attach(ScriptedProvider::rows(3));
    assert_eq!(open_with(&mut widget, "12 Main").await, 3);

    let mut focus = Vec::new();
    for _ in 0..4 {
        assert_eq!(widget.on_key_code(40), KeyOutcome::Consumed);
        focus.push(widget.state().focused_index().unwrap());
    }
    assert_eq!(focus, vec![0, 1, 2, 0]);
    assert_eq!(widget.surface().highlighted(), Some(0));
    assert_eq!(input_text(&widget), "12 Main, row 0");
    assert_eq!(
        *selections.lock().unwrap(),
        vec![
            Some("12 Main, row 0".to_string()),
            Some("12 Main, row 1".to_string()),
            Some("12 Main, row 2".to_string()),
            Some("12 Main, row 0".to_string()),
        ]
    );
    assert!(widget.state().is_list_open());
}

#[tokio::test(start_paused = true)]
async fn up_wraps_from_first_row_to_last() {
    let (mut widget, _) = attach(ScriptedProvider::rows(3));
    open_with(&mut widget, "12 Main").await;

    widget.on_key(NavKey::Down);
    assert_eq!(widget.state().focused_index(), Some(0));
    assert_eq!(widget.on_key(NavKey::Up), KeyOutcome::Consumed);
    assert_eq!(widget.state().focused_index(), Some(2));
    assert_eq!(input_text(&widget), "12 Main, row 2");
}

#[tokio::test(start_paused = true)]
async fn enter_commits_focused_row() {
    let (mut widget, selections) = attach(ScriptedProvider::rows(2));
    open_with(&mut widget, "12 Main").await;

    assert_eq!(widget.on_key(NavKey::Enter), KeyOutcome::Consumed);
    assert!(widget.state().is_list_open());

    widget.on_key(NavKey::Down);
    widget.on_key(NavKey::Down);
    assert_eq!(widget.on_key(NavKey::Enter), KeyOutcome::Consumed);

    assert!(!widget.state().is_list_open());
    assert!(widget.state().items().is_empty());
    assert_eq!(widget.state().focused_index(), None);
    assert_eq!(input_text(&widget), "12 Main, row 1");
    assert_eq!(
        selections.lock().unwrap().last().cloned().flatten().as_deref(),
        Some("12 Main, row 1")
    );
    assert_eq!(widget.on_key(NavKey::Enter), KeyOutcome::PassThrough);
}

#[tokio::test(start_paused = true)]
async fn other_keys_pass_through() {
    let (mut widget, _) = attach(ScriptedProvider::rows(2));
    assert_eq!(widget.on_key_code(65), KeyOutcome::PassThrough);
    assert_eq!(widget.on_key(NavKey::Up), KeyOutcome::PassThrough);

    open_with(&mut widget, "12 Main").await;
    assert_eq!(widget.on_key(NavKey::Other(37)), KeyOutcome::PassThrough);
    assert!(widget.state().is_list_open());
}

#[tokio::test(start_paused = true)]
async fn down_on_closed_list_restarts_the_query() {
    let provider = ScriptedProvider::rows(2);
    let (mut widget, _) = attach(provider.clone());
    open_with(&mut widget, "12 Main").await;
    widget.on_outside_click();

    assert_eq!(widget.on_key(NavKey::Down), KeyOutcome::Consumed);
    assert!(widget.state().has_pending_timer());
    match widget.process_next().await {
        Applied::RequestStarted { query } => assert_eq!(query, "12 Main"),
        other => panic!("unexpected {other:?}"),
    }
    assert!(matches!(widget.process_next().await, Applied::Rendered { rows: 2 }));
    assert_eq!(provider.calls().len(), 2);
}

// ─── Mouse & clear control ─────────────────────────────────

#[tokio::test(start_paused = true)]
async fn row_click_commits_full_record() {
    let captured = Arc::new(Mutex::new(None));
    let sink = captured.clone();
    let mut widget = AutocompleteWidget::attach(
        MemorySurface::new(),
        ScriptedProvider::rows(3),
        move |selection: Option<&AddressCandidate>| {
            *sink.lock().unwrap() = selection.cloned();
        },
        WidgetConfig::default(),
    );
    open_with(&mut widget, "Baker Street").await;

    widget.on_click(ClickTarget::Row(2));
    let picked = captured.lock().unwrap().clone().unwrap();
    assert_eq!(picked.formatted, "Baker Street, row 2");
    assert_eq!(picked.coordinates().map(|c| c.lat), Some(42.0));
    assert_eq!(input_text(&widget), "Baker Street, row 2");
    assert!(!widget.state().is_list_open());
}

#[tokio::test(start_paused = true)]
async fn outside_click_closes_without_touching_text() {
    let (mut widget, selections) = attach(ScriptedProvider::rows(2));
    open_with(&mut widget, "12 Main").await;

    widget.on_click(ClickTarget::Outside);
    assert!(!widget.state().is_list_open());
    assert_eq!(widget.surface().rows(), None);
    assert_eq!(input_text(&widget), "12 Main");
    assert!(selections.lock().unwrap().is_empty());
}

#[tokio::test(start_paused = true)]
async fn input_click_reopens_closed_list() {
    let (mut widget, _) = attach(ScriptedProvider::rows(2));
    open_with(&mut widget, "12 Main").await;

    widget.on_click(ClickTarget::Input);
    assert!(widget.state().is_list_open());
    assert!(!widget.state().has_pending_timer());

    widget.on_click(ClickTarget::Outside);
    widget.on_click(ClickTarget::Input);
    assert!(widget.state().has_pending_timer());
}

#[tokio::test(start_paused = true)]
async fn clear_button_resets_everything() {
    let (mut widget, selections) = attach(ScriptedProvider::rows(2));
    open_with(&mut widget, "12 Main St").await;
    assert!(widget.surface().is_clear_visible());

    widget.clear();
    assert_eq!(input_text(&widget), "");
    assert_eq!(widget.state().current_query(), "");
    assert!(!widget.surface().is_clear_visible());
    assert!(!widget.state().is_list_open());
    assert_eq!(*selections.lock().unwrap(), vec![None]);
}

// ─── Lifecycle ─────────────────────────────────────────────

#[tokio::test(start_paused = true)]
async fn widgets_are_independent() {
    let (mut from, _) = attach(ScriptedProvider::rows(2));
    let (mut to, _) = attach(ScriptedProvider::rows(3));

    open_with(&mut from, "Central Station").await;
    type_text(&mut to, "Airport");

    assert!(from.state().is_list_open());
    assert!(!to.state().is_list_open());
    assert!(to.state().has_pending_timer());
    assert!(!from.state().has_pending_timer());
    assert_eq!(from.input().name, "address");
}

#[tokio::test(start_paused = true)]
async fn detach_unmounts_surface() {
    let (mut widget, _) = attach(ScriptedProvider::rows(2));
    open_with(&mut widget, "12 Main").await;

    let surface = widget.detach();
    assert!(!surface.is_mounted());
    assert_eq!(surface.rows(), None);
}
