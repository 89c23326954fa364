//! The address autocomplete widget.
//!
//! One [`AutocompleteWidget`] owns one input. Text changes start a debounce
//! timer; when it fires a single request goes to the [`SuggestionProvider`];
//! the result opens a dropdown that the keyboard or mouse can navigate.
//! Timers and requests run as tokio tasks and report back through a
//! per-widget channel, which the host drains with [`process_next`] or
//! [`drain_completions`]. All state changes happen inside those calls and
//! the event methods, one at a time.
//!
//! [`process_next`]: AutocompleteWidget::process_next
//! [`drain_completions`]: AutocompleteWidget::drain_completions

mod debounce;
mod dropdown;
mod keys;
mod request;
#[cfg(test)]
mod tests;

use std::sync::Arc;

use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};

use crate::config::WidgetConfig;
use crate::error::{GeoInputError, Result};
use crate::models::AddressCandidate;
use crate::provider::SuggestionProvider;
use crate::surface::RenderSurface;

use debounce::Debouncer;
use request::RequestSlot;

pub use dropdown::Dropdown;
pub use keys::{KeyOutcome, NavKey};

/// Receives every selection change: a candidate, or `None` when cleared.
pub trait SelectionHandler {
    fn selection_changed(&mut self, selection: Option<&AddressCandidate>);
}

impl<F> SelectionHandler for F
where
    F: FnMut(Option<&AddressCandidate>),
{
    fn selection_changed(&mut self, selection: Option<&AddressCandidate>) {
        self(selection)
    }
}

/// Identifies one timer or one request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Ticket(u64);

/// Reports from timer and request tasks back to the widget.
pub(crate) enum Completion {
    TimerFired {
        ticket: Ticket,
        query: String,
    },
    RequestSettled {
        ticket: Ticket,
        outcome: Result<Vec<AddressCandidate>>,
    },
}

/// What applying one completion did to the widget.
#[derive(Debug)]
pub enum Applied {
    /// The debounce timer fired and a request went out.
    RequestStarted { query: String },
    /// A timer that had already been superseded.
    TimerSuperseded,
    /// The dropdown opened with this many rows.
    Rendered { rows: usize },
    /// The request succeeded with no results; the dropdown stays closed.
    NoResults,
    /// A superseded request. Nothing changed.
    Canceled,
    /// The request failed. Logged; the dropdown stays closed.
    Failed(GeoInputError),
}

/// Where a click landed, relative to the widget.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickTarget {
    Input,
    Row(usize),
    ClearButton,
    Outside,
}

/// Per-instance state. Never shared between widgets.
pub struct WidgetState {
    current_query: String,
    debouncer: Debouncer,
    requests: RequestSlot,
    dropdown: Dropdown,
}

impl WidgetState {
    fn new(config: &WidgetConfig) -> Self {
        Self {
            current_query: String::new(),
            debouncer: Debouncer::new(config.debounce()),
            requests: RequestSlot::new(),
            dropdown: Dropdown::default(),
        }
    }

    pub fn current_query(&self) -> &str {
        &self.current_query
    }

    pub fn has_pending_timer(&self) -> bool {
        self.debouncer.is_pending()
    }

    pub fn has_pending_request(&self) -> bool {
        self.requests.is_pending()
    }

    pub fn items(&self) -> &[AddressCandidate] {
        self.dropdown.items()
    }

    pub fn focused_index(&self) -> Option<usize> {
        self.dropdown.focused()
    }

    pub fn is_list_open(&self) -> bool {
        self.dropdown.is_open()
    }
}

pub struct AutocompleteWidget<S: RenderSurface> {
    config: WidgetConfig,
    surface: S,
    input: S::Input,
    provider: Arc<dyn SuggestionProvider>,
    handler: Box<dyn SelectionHandler>,
    state: WidgetState,
    tx: UnboundedSender<Completion>,
    rx: UnboundedReceiver<Completion>,
}

impl<S: RenderSurface> AutocompleteWidget<S> {
    /// Mount an input on `surface` and wire it to `provider`.
    ///
    /// Must be called within a tokio runtime: timers and requests are
    /// spawned onto it.
    pub fn attach(
        mut surface: S,
        provider: Arc<dyn SuggestionProvider>,
        handler: impl SelectionHandler + 'static,
        config: WidgetConfig,
    ) -> Self {
        let input = surface.mount_input(&config);
        surface.set_clear_visible(false);
        let (tx, rx) = mpsc::unbounded_channel();
        let state = WidgetState::new(&config);
        Self {
            config,
            surface,
            input,
            provider,
            handler: Box::new(handler),
            state,
            tx,
            rx,
        }
    }

    /// Cancel outstanding work, unmount and hand the surface back.
    pub fn detach(mut self) -> S {
        self.cancel_pending();
        self.state.dropdown.close();
        self.surface.unmount();
        self.surface
    }

    pub fn input(&self) -> &S::Input {
        &self.input
    }

    pub fn config(&self) -> &WidgetConfig {
        &self.config
    }

    pub fn state(&self) -> &WidgetState {
        &self.state
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    /// For hosts that edit the input text in place before calling
    /// [`on_input`](Self::on_input).
    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    // ── Events ──────────────────────────────────────────────

    /// The input's text changed. Reads the new text from the surface.
    pub fn on_input(&mut self) {
        let text = self.surface.input_text();
        self.state.current_query = text.clone();

        self.close_list();
        self.cancel_pending();

        if text.is_empty() {
            self.surface.set_clear_visible(false);
            self.handler.selection_changed(None);
            return;
        }

        self.surface.set_clear_visible(true);
        if text.trim().chars().count() < self.config.min_query_chars {
            return;
        }

        self.state.debouncer.schedule(text, &self.tx);
    }

    /// Set the input's text and run the text-change flow, as typing would.
    pub fn on_text_changed(&mut self, text: &str) {
        self.surface.set_input_text(text);
        self.on_input();
    }

    /// Dispatch a key by browser key code.
    pub fn on_key_code(&mut self, code: u32) -> KeyOutcome {
        self.on_key(NavKey::from_code(code))
    }

    pub fn on_key(&mut self, key: NavKey) -> KeyOutcome {
        if !self.state.dropdown.is_open() {
            return match key {
                NavKey::Down => {
                    self.on_input();
                    KeyOutcome::Consumed
                }
                _ => KeyOutcome::PassThrough,
            };
        }

        match key {
            NavKey::Down => {
                if let Some(index) = self.state.dropdown.focus_next() {
                    self.preview(index);
                }
                KeyOutcome::Consumed
            }
            NavKey::Up => {
                if let Some(index) = self.state.dropdown.focus_prev() {
                    self.preview(index);
                }
                KeyOutcome::Consumed
            }
            NavKey::Enter => {
                if let Some(index) = self.state.dropdown.focused() {
                    self.commit(index);
                }
                KeyOutcome::Consumed
            }
            NavKey::Other(_) => KeyOutcome::PassThrough,
        }
    }

    pub fn on_click(&mut self, target: ClickTarget) {
        match target {
            ClickTarget::Row(index) => self.on_row_click(index),
            ClickTarget::ClearButton => self.clear(),
            ClickTarget::Input => {
                if !self.state.dropdown.is_open() {
                    self.on_input();
                }
            }
            ClickTarget::Outside => self.on_outside_click(),
        }
    }

    pub fn on_row_click(&mut self, index: usize) {
        if self.state.dropdown.item(index).is_some() {
            self.commit(index);
        }
    }

    /// Close the dropdown. The input text is left as it is.
    pub fn on_outside_click(&mut self) {
        self.close_list();
    }

    /// The clear control: empty the input, report no selection, drop any
    /// pending timer or request and close the dropdown.
    pub fn clear(&mut self) {
        self.cancel_pending();
        self.state.current_query.clear();
        self.surface.set_input_text("");
        self.handler.selection_changed(None);
        self.surface.set_clear_visible(false);
        self.close_list();
    }

    // ── Completions ─────────────────────────────────────────

    /// Wait for the next timer or request completion and apply it.
    pub async fn process_next(&mut self) -> Applied {
        // The widget holds a sender, so the channel never closes.
        match self.rx.recv().await {
            Some(completion) => self.apply(completion),
            None => Applied::Canceled,
        }
    }

    /// Apply every completion that is ready without waiting.
    pub fn drain_completions(&mut self) -> Vec<Applied> {
        let mut applied = Vec::new();
        while let Ok(completion) = self.rx.try_recv() {
            applied.push(self.apply(completion));
        }
        applied
    }

    fn apply(&mut self, completion: Completion) -> Applied {
        match completion {
            Completion::TimerFired { ticket, query } => {
                if !self.state.debouncer.fire(ticket) {
                    return Applied::TimerSuperseded;
                }
                tracing::debug!(%query, "requesting address suggestions");
                self.state
                    .requests
                    .start(self.provider.clone(), query.clone(), &self.tx);
                Applied::RequestStarted { query }
            }
            Completion::RequestSettled { ticket, outcome } => {
                match self.state.requests.settle(ticket, outcome) {
                    Ok(items) => self.render(items),
                    Err(GeoInputError::Canceled) => {
                        tracing::debug!("dropping superseded autocomplete response");
                        Applied::Canceled
                    }
                    Err(e) => {
                        tracing::warn!(error = %e, "autocomplete request failed");
                        Applied::Failed(e)
                    }
                }
            }
        }
    }

    // ── Internals ───────────────────────────────────────────

    fn render(&mut self, items: Vec<AddressCandidate>) -> Applied {
        if !self.state.dropdown.open(items) {
            return Applied::NoResults;
        }
        self.surface.open_list();
        for (index, item) in self.state.dropdown.items().iter().enumerate() {
            self.surface.append_row(index, &item.formatted);
        }
        Applied::Rendered {
            rows: self.state.dropdown.items().len(),
        }
    }

    /// Focus moved onto `index`: show it in the input and report it.
    fn preview(&mut self, index: usize) {
        self.surface.highlight_row(Some(index));
        if let Some(item) = self.state.dropdown.item(index) {
            self.surface.set_input_text(&item.formatted);
            self.state.current_query = item.formatted.clone();
            self.handler.selection_changed(Some(item));
        }
    }

    fn commit(&mut self, index: usize) {
        if let Some(item) = self.state.dropdown.item(index) {
            self.surface.set_input_text(&item.formatted);
            self.state.current_query = item.formatted.clone();
            self.handler.selection_changed(Some(item));
        }
        self.close_list();
    }

    fn close_list(&mut self) {
        if self.state.dropdown.close() {
            self.surface.close_list();
        }
    }

    fn cancel_pending(&mut self) {
        self.state.debouncer.cancel();
        self.state.requests.cancel();
    }
}
