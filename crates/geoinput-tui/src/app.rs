use std::cell::RefCell;
use std::rc::Rc;
use std::sync::Arc;

use crossterm::event::{MouseButton, MouseEvent, MouseEventKind};
use geoinput_core::{
    AddressCandidate, Applied, AutocompleteWidget, MemorySurface, SuggestionProvider, WidgetConfig,
};
use ratatui::layout::Rect;

use crate::layout::PickerLayout;
use crate::theme::NordTheme;

/// State of the terminal address picker.
pub struct App {
    pub widget: AutocompleteWidget<MemorySurface>,
    /// Latest value reported through the selection callback.
    selection: Rc<RefCell<Option<AddressCandidate>>>,
    /// Set when the user confirms; returned to the caller on exit.
    pub accepted: Option<AddressCandidate>,
    pub theme: NordTheme,
    pub area: Rect,
    pub should_quit: bool,
}

impl App {
    pub fn new(provider: Arc<dyn SuggestionProvider>, config: WidgetConfig) -> Self {
        let selection = Rc::new(RefCell::new(None));
        let sink = Rc::clone(&selection);
        let widget = AutocompleteWidget::attach(
            MemorySurface::new(),
            provider,
            move |candidate: Option<&AddressCandidate>| {
                *sink.borrow_mut() = candidate.cloned();
            },
            config,
        );

        Self {
            widget,
            selection,
            accepted: None,
            theme: NordTheme::default(),
            area: Rect::default(),
            should_quit: false,
        }
    }

    pub fn selection(&self) -> Option<AddressCandidate> {
        self.selection.borrow().clone()
    }

    pub fn layout(&self) -> PickerLayout {
        let rows = self.widget.surface().rows().map_or(0, <[String]>::len);
        PickerLayout::compute(self.area, rows)
    }

    /// Apply whatever timers and requests finished since the last tick.
    pub fn tick(&mut self) {
        for applied in self.widget.drain_completions() {
            if let Applied::Rendered { rows } = applied {
                tracing::debug!(rows, "suggestions rendered");
            }
        }
    }

    pub fn handle_mouse(&mut self, mouse: MouseEvent) {
        if mouse.kind != MouseEventKind::Down(MouseButton::Left) {
            return;
        }
        let clear_visible = self.widget.surface().is_clear_visible();
        let target = self
            .layout()
            .hit_test(mouse.column, mouse.row, clear_visible);
        self.widget.on_click(target);
    }

    /// Confirm the current selection and leave.
    pub fn accept(&mut self) {
        self.accepted = self.selection();
        self.should_quit = true;
    }
}
