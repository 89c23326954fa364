use geoinput_core::ClickTarget;
use ratatui::layout::{Constraint, Direction, Layout, Position, Rect};

/// Widest the picker panel grows, in columns.
const MAX_WIDTH: u16 = 88;

/// Screen regions of the picker, shared by rendering and mouse hit-testing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PickerLayout {
    pub title: Rect,
    pub input: Rect,
    pub clear_button: Rect,
    pub list: Rect,
    pub status: Rect,
    pub hints: Rect,
}

impl PickerLayout {
    pub fn compute(area: Rect, rows: usize) -> Self {
        let width = area.width.min(MAX_WIDTH);
        let panel = Rect {
            x: area.x + (area.width - width) / 2,
            width,
            ..area
        };
        let list_height = if rows == 0 { 0 } else { rows as u16 + 2 };

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1),           // Title
                Constraint::Length(3),           // Input
                Constraint::Length(list_height), // Dropdown
                Constraint::Min(0),
                Constraint::Length(1), // Selection
                Constraint::Length(1), // Key hints
            ])
            .split(panel);

        let input = chunks[1];
        let clear_button = Rect {
            x: input.right().saturating_sub(4),
            y: input.y + 1,
            width: 3.min(input.width),
            height: 1.min(input.height),
        };

        Self {
            title: chunks[0],
            input,
            clear_button,
            list: chunks[2],
            status: chunks[4],
            hints: chunks[5],
        }
    }

    /// Map a mouse position onto the widget's click targets.
    pub fn hit_test(&self, column: u16, row: u16, clear_visible: bool) -> ClickTarget {
        let pos = Position { x: column, y: row };
        if clear_visible && self.clear_button.contains(pos) {
            return ClickTarget::ClearButton;
        }
        if self.input.contains(pos) {
            return ClickTarget::Input;
        }
        if self.list.contains(pos) && row > self.list.y && row + 1 < self.list.bottom() {
            return ClickTarget::Row((row - self.list.y - 1) as usize);
        }
        ClickTarget::Outside
    }
}
