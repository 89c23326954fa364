//! Rendering seam between the widget and whatever draws it.
//!
//! The widget never touches a concrete UI toolkit. It mounts an input on a
//! [`RenderSurface`], reads the input's text when notified of a change, and
//! builds or tears down the suggestion list through the same trait.

use crate::config::WidgetConfig;

pub trait RenderSurface {
    /// Handle returned to the caller of `attach`.
    type Input;

    /// Create the text input and its (hidden) clear control.
    fn mount_input(&mut self, config: &WidgetConfig) -> Self::Input;

    /// Remove everything the widget created.
    fn unmount(&mut self);

    fn input_text(&self) -> String;

    fn set_input_text(&mut self, text: &str);

    fn set_clear_visible(&mut self, visible: bool);

    /// Create an empty list element under the input.
    fn open_list(&mut self);

    fn append_row(&mut self, index: usize, text: &str);

    /// Mark `index` as the active row, or none.
    fn highlight_row(&mut self, index: Option<usize>);

    /// Remove the list element, if present.
    fn close_list(&mut self);
}

/// Identifies a mounted input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputHandle {
    pub name: String,
    pub placeholder: String,
}

/// Single-line editable text with a byte-offset cursor.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextInput {
    pub value: String,
    pub cursor: usize,
}

impl TextInput {
    pub fn insert_char(&mut self, c: char) {
        self.value.insert(self.cursor, c);
        self.cursor += c.len_utf8();
    }

    pub fn delete_back(&mut self) {
        if self.cursor > 0 {
            let prev = self.value[..self.cursor]
                .char_indices()
                .last()
                .map(|(i, _)| i)
                .unwrap_or(0);
            self.value.remove(prev);
            self.cursor = prev;
        }
    }

    pub fn move_left(&mut self) {
        if self.cursor > 0 {
            self.cursor = self.value[..self.cursor]
                .char_indices()
                .last()
                .map(|(i, _)| i)
                .unwrap_or(0);
        }
    }

    pub fn move_right(&mut self) {
        if self.cursor < self.value.len() {
            self.cursor = self.value[self.cursor..]
                .char_indices()
                .nth(1)
                .map(|(i, _)| self.cursor + i)
                .unwrap_or(self.value.len());
        }
    }

    pub fn home(&mut self) {
        self.cursor = 0;
    }

    pub fn end(&mut self) {
        self.cursor = self.value.len();
    }

    /// Replace the whole value, leaving the cursor at the end.
    pub fn set(&mut self, text: &str) {
        self.value = text.to_string();
        self.cursor = self.value.len();
    }
}

/// Headless surface that keeps the rendered state in memory.
///
/// Terminal hosts draw from it each frame; tests assert on it directly.
#[derive(Debug, Default)]
pub struct MemorySurface {
    input: Option<InputHandle>,
    text: TextInput,
    clear_visible: bool,
    list: Option<Vec<String>>,
    highlighted: Option<usize>,
    lists_built: usize,
}

impl MemorySurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn input_handle(&self) -> Option<&InputHandle> {
        self.input.as_ref()
    }

    pub fn is_mounted(&self) -> bool {
        self.input.is_some()
    }

    pub fn text_input(&self) -> &TextInput {
        &self.text
    }

    /// Direct editing access, as a keyboard would have.
    pub fn text_input_mut(&mut self) -> &mut TextInput {
        &mut self.text
    }

    pub fn is_clear_visible(&self) -> bool {
        self.clear_visible
    }

    pub fn rows(&self) -> Option<&[String]> {
        self.list.as_deref()
    }

    pub fn highlighted(&self) -> Option<usize> {
        self.highlighted
    }

    /// How many list elements were created over the surface's lifetime.
    pub fn lists_built(&self) -> usize {
        self.lists_built
    }
}

impl RenderSurface for MemorySurface {
    type Input = InputHandle;

    fn mount_input(&mut self, config: &WidgetConfig) -> InputHandle {
        let handle = InputHandle {
            name: config.field_name.clone(),
            placeholder: config.placeholder_text.clone(),
        };
        self.input = Some(handle.clone());
        self.text = TextInput::default();
        self.clear_visible = false;
        handle
    }

    fn unmount(&mut self) {
        self.close_list();
        self.input = None;
        self.clear_visible = false;
    }

    fn input_text(&self) -> String {
        self.text.value.clone()
    }

    fn set_input_text(&mut self, text: &str) {
        self.text.set(text);
    }

    fn set_clear_visible(&mut self, visible: bool) {
        self.clear_visible = visible;
    }

    fn open_list(&mut self) {
        self.list = Some(Vec::new());
        self.highlighted = None;
        self.lists_built += 1;
    }

    fn append_row(&mut self, index: usize, text: &str) {
        if let Some(rows) = self.list.as_mut() {
            debug_assert_eq!(rows.len(), index);
            rows.push(text.to_string());
        }
    }

    fn highlight_row(&mut self, index: Option<usize>) {
        self.highlighted = index;
    }

    fn close_list(&mut self) {
        self.list = None;
        self.highlighted = None;
    }
}
