//! Roving-tabindex keyboard navigation over the selectable words.
//!
//! Exactly one element is tabbable at a time. Arrow keys move focus with
//! wrap-around; Enter and Space select. The navigator only tracks focus; the
//! owner applies selection to its words.

use serde::Serialize;

/// Keys the navigator reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Enter,
    Space,
    ArrowLeft,
    ArrowUp,
    ArrowRight,
    ArrowDown,
    Other,
}

impl Key {
    /// Map a DOM `KeyboardEvent.key` value.
    pub fn from_dom(key: &str) -> Self {
        match key {
            "Enter" => Key::Enter,
            " " | "Spacebar" => Key::Space,
            "ArrowLeft" | "Left" => Key::ArrowLeft,
            "ArrowUp" | "Up" => Key::ArrowUp,
            "ArrowRight" | "Right" => Key::ArrowRight,
            "ArrowDown" | "Down" => Key::ArrowDown,
            _ => Key::Other,
        }
    }
}

/// What a key press did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "event", rename_all = "camelCase")]
pub enum NavEvent {
    /// Selection requested on `index`, which also becomes tabbable.
    Select { index: usize },
    PreviousOption { from: usize, to: usize },
    NextOption { from: usize, to: usize },
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeyboardNav {
    len: usize,
    tabbable: Option<usize>,
    focused: Option<usize>,
}

impl KeyboardNav {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the next element. The first one becomes tabbable.
    pub fn add_element(&mut self) -> usize {
        let index = self.len;
        self.len += 1;
        if self.len == 1 {
            self.set_tabbable_at(0);
        }
        index
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn tabbable(&self) -> Option<usize> {
        self.tabbable
    }

    pub fn focused(&self) -> Option<usize> {
        self.focused
    }

    pub fn set_tabbable_at(&mut self, index: usize) {
        if index < self.len {
            self.tabbable = Some(index);
        }
    }

    pub fn remove_all_tabbable(&mut self) {
        self.tabbable = None;
    }

    pub fn focus_on_element_at(&mut self, index: usize) {
        if index >= self.len {
            return;
        }
        self.remove_all_tabbable();
        self.set_tabbable_at(index);
        self.focused = Some(index);
    }

    pub fn handle_key(&mut self, index: usize, key: Key) -> Option<NavEvent> {
        if index >= self.len {
            return None;
        }
        match key {
            Key::Enter | Key::Space => Some(self.select(index)),
            Key::ArrowLeft | Key::ArrowUp => {
                let to = if index == 0 { self.len - 1 } else { index - 1 };
                self.focus_on_element_at(to);
                Some(NavEvent::PreviousOption { from: index, to })
            }
            Key::ArrowRight | Key::ArrowDown => {
                let to = if index == self.len - 1 { 0 } else { index + 1 };
                self.focus_on_element_at(to);
                Some(NavEvent::NextOption { from: index, to })
            }
            Key::Other => None,
        }
    }

    /// Click or Enter/Space on `index`.
    pub fn select(&mut self, index: usize) -> NavEvent {
        self.tabbable = Some(index);
        self.focused = Some(index);
        NavEvent::Select { index }
    }
}
