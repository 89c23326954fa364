use crate::models::AddressCandidate;

/// Suggestion list state. `Closed` holds no items and no focus.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Dropdown {
    #[default]
    Closed,
    Open {
        items: Vec<AddressCandidate>,
        focused: Option<usize>,
    },
}

impl Dropdown {
    pub fn is_open(&self) -> bool {
        matches!(self, Self::Open { .. })
    }

    pub fn items(&self) -> &[AddressCandidate] {
        match self {
            Self::Open { items, .. } => items,
            Self::Closed => &[],
        }
    }

    pub fn item(&self, index: usize) -> Option<&AddressCandidate> {
        self.items().get(index)
    }

    pub fn focused(&self) -> Option<usize> {
        match self {
            Self::Open { focused, .. } => *focused,
            Self::Closed => None,
        }
    }

    pub fn focused_item(&self) -> Option<&AddressCandidate> {
        self.focused().and_then(|i| self.item(i))
    }

    /// Open with `items`. An empty set leaves the list closed.
    pub fn open(&mut self, items: Vec<AddressCandidate>) -> bool {
        if items.is_empty() {
            *self = Self::Closed;
            return false;
        }
        *self = Self::Open {
            items,
            focused: None,
        };
        true
    }

    /// Returns whether the list was open.
    pub fn close(&mut self) -> bool {
        let was_open = self.is_open();
        *self = Self::Closed;
        was_open
    }

    /// Move focus forward, wrapping from the last row to the first.
    pub fn focus_next(&mut self) -> Option<usize> {
        let Self::Open { items, focused } = self else {
            return None;
        };
        let next = match *focused {
            Some(i) => (i + 1) % items.len(),
            None => 0,
        };
        *focused = Some(next);
        Some(next)
    }

    /// Move focus backward, wrapping from the first row to the last.
    pub fn focus_prev(&mut self) -> Option<usize> {
        let Self::Open { items, focused } = self else {
            return None;
        };
        let prev = match *focused {
            Some(0) | None => items.len() - 1,
            Some(i) => i - 1,
        };
        *focused = Some(prev);
        Some(prev)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn open_with(n: usize) -> Dropdown {
        let mut dropdown = Dropdown::default();
        dropdown.open((0..n).map(|i| AddressCandidate::new(format!("row {i}"))).collect());
        dropdown
    }

    #[test]
    fn empty_results_keep_it_closed() {
        let mut dropdown = Dropdown::default();
        assert!(!dropdown.open(Vec::new()));
        assert!(!dropdown.is_open());
        assert_eq!(dropdown.focus_next(), None);
    }

    #[test]
    fn down_wraps_modulo_len() {
        let mut dropdown = open_with(3);
        let seen: Vec<_> = (0..7).filter_map(|_| dropdown.focus_next()).collect();
        assert_eq!(seen, vec![0, 1, 2, 0, 1, 2, 0]);
    }

    #[test]
    fn up_wraps_from_first_to_last() {
        let mut dropdown = open_with(4);
        assert_eq!(dropdown.focus_prev(), Some(3));
        assert_eq!(dropdown.focus_prev(), Some(2));
        dropdown.focus_next();
        dropdown.focus_next();
        assert_eq!(dropdown.focused(), Some(0));
        assert_eq!(dropdown.focus_prev(), Some(3));
    }

    #[test]
    fn single_row_always_focuses_itself() {
        let mut dropdown = open_with(1);
        assert_eq!(dropdown.focus_next(), Some(0));
        assert_eq!(dropdown.focus_next(), Some(0));
        assert_eq!(dropdown.focus_prev(), Some(0));
    }

    #[test]
    fn close_drops_items_and_focus() {
        let mut dropdown = open_with(2);
        dropdown.focus_next();
        assert!(dropdown.close());
        assert!(dropdown.items().is_empty());
        assert_eq!(dropdown.focused(), None);
        assert!(!dropdown.close());
    }
}
