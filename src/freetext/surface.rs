// Common markup access trait so the free-text editor can drive any host
// editing surface: a browser content-editable area, a terminal buffer, or
// the in-memory surface below.

use std::cell::RefCell;
use std::ops::Range;
use std::rc::Rc;

use super::format::FormatCommand;

/// Read/write access to the markup of a host editing surface.
pub trait MarkupSurface {
    /// The markup the surface currently shows
    fn current_markup(&self) -> String;

    /// Replace everything the surface shows with `markup`
    fn set_current_markup(&mut self, markup: &str);

    /// Apply a formatting command at the surface's selection.
    ///
    /// Surfaces without a selection model get the command's markup appended
    /// at the end of the content.
    fn apply_format(&mut self, command: &FormatCommand) {
        let mut markup = self.current_markup();
        markup.push_str(&command.markup_for(None));
        self.set_current_markup(&markup);
    }
}

// Shared handle, for hosts that keep a reference to the surface the editor drives
impl<S: MarkupSurface> MarkupSurface for Rc<RefCell<S>> {
    fn current_markup(&self) -> String {
        self.borrow().current_markup()
    }

    fn set_current_markup(&mut self, markup: &str) {
        self.borrow_mut().set_current_markup(markup);
    }

    fn apply_format(&mut self, command: &FormatCommand) {
        self.borrow_mut().apply_format(command);
    }
}

/// An in-memory surface with a byte-range selection.
///
/// With no selection the caret sits at the end of the markup.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemorySurface {
    markup: String,
    selection: Option<Range<usize>>,
}

impl MemorySurface {
    pub fn new(markup: impl Into<String>) -> Self {
        MemorySurface {
            markup: markup.into(),
            selection: None,
        }
    }

    /// Select the bytes `start..end` (in either order).
    /// Returns false, leaving the selection unchanged, if the range is out of
    /// bounds or splits a character.
    pub fn select(&mut self, start: usize, end: usize) -> bool {
        let (start, end) = if start <= end { (start, end) } else { (end, start) };
        if end > self.markup.len()
            || !self.markup.is_char_boundary(start)
            || !self.markup.is_char_boundary(end)
        {
            return false;
        }
        self.selection = Some(start..end);
        true
    }

    pub fn clear_selection(&mut self) {
        self.selection = None;
    }

    pub fn selection(&self) -> Option<Range<usize>> {
        self.selection.clone()
    }

    pub fn selected_markup(&self) -> &str {
        self.selection
            .clone()
            .map(|range| &self.markup[range])
            .unwrap_or_default()
    }

    /// Simulate the user typing directly into the surface, without going
    /// through a formatting command
    pub fn type_text(&mut self, text: &str) {
        let range = self.selection.take().unwrap_or(self.markup.len()..self.markup.len());
        self.markup.replace_range(range, text);
    }
}

impl MarkupSurface for MemorySurface {
    fn current_markup(&self) -> String {
        self.markup.clone()
    }

    fn set_current_markup(&mut self, markup: &str) {
        self.markup = markup.to_string();
        self.selection = None;
    }

    fn apply_format(&mut self, command: &FormatCommand) {
        let range = self
            .selection
            .take()
            .unwrap_or(self.markup.len()..self.markup.len());
        let replacement = command.markup_for(Some(&self.markup[range.clone()]));
        self.markup.replace_range(range, &replacement);
    }
}
