//! Scroll capability for dropdown lists that overflow their viewport.
//!
//! The widget consumes scrolling through the [`ScrollProvider`] /
//! [`ScrollHandle`] traits so a custom pane implementation can be swapped in;
//! [`ScrollPane`] is the built-in implementation used by default.

/// Options passed through to the scroll provider on attach
#[derive(Debug, Clone)]
pub struct ScrollOptions {
    /// Rows scrolled per mouse wheel notch
    pub wheel_rows: u16,
    /// Whether the scrollbar track is drawn
    pub show_track: bool,
}

impl Default for ScrollOptions {
    fn default() -> Self {
        Self {
            wheel_rows: 3,
            show_track: true,
        }
    }
}

/// An attached scroll resource for one dropdown list
///
/// Offsets are in rows from the top of the content. Implementations clamp all
/// movement to the valid range.
pub trait ScrollHandle: Send {
    /// Scroll so that `row` is the first visible row (clamped)
    fn scroll_to_offset(&mut self, row: u16);

    /// Scroll by a signed number of rows (clamped)
    fn scroll_by(&mut self, delta: i32);

    fn offset(&self) -> u16;
    fn content_rows(&self) -> u16;
    fn viewport_rows(&self) -> u16;

    fn max_offset(&self) -> u16 {
        self.content_rows().saturating_sub(self.viewport_rows())
    }
}

/// Factory for [`ScrollHandle`]s, attached once per open/sync when the
/// content overflows the viewport
pub trait ScrollProvider: Send {
    fn attach(
        &self,
        content_rows: u16,
        viewport_rows: u16,
        options: &ScrollOptions,
    ) -> Box<dyn ScrollHandle>;
}

/// Built-in scroll pane: a clamped row offset over the content
#[derive(Debug, Clone)]
pub struct ScrollPane {
    offset: u16,
    content_rows: u16,
    viewport_rows: u16,
}

impl ScrollPane {
    pub fn new(content_rows: u16, viewport_rows: u16) -> Self {
        Self {
            offset: 0,
            content_rows,
            viewport_rows,
        }
    }
}

impl ScrollHandle for ScrollPane {
    fn scroll_to_offset(&mut self, row: u16) {
        self.offset = row.min(self.max_offset());
    }

    fn scroll_by(&mut self, delta: i32) {
        let target = i32::from(self.offset) + delta;
        self.offset = target.clamp(0, i32::from(self.max_offset())) as u16;
    }

    fn offset(&self) -> u16 {
        self.offset
    }

    fn content_rows(&self) -> u16 {
        self.content_rows
    }

    fn viewport_rows(&self) -> u16 {
        self.viewport_rows
    }
}

/// Provider for the built-in [`ScrollPane`]
#[derive(Debug, Clone, Copy, Default)]
pub struct ScrollPaneProvider;

impl ScrollProvider for ScrollPaneProvider {
    fn attach(
        &self,
        content_rows: u16,
        viewport_rows: u16,
        _options: &ScrollOptions,
    ) -> Box<dyn ScrollHandle> {
        Box::new(ScrollPane::new(content_rows, viewport_rows))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scroll_to_offset_clamps_to_content() {
        let mut pane = ScrollPane::new(20, 8);
        pane.scroll_to_offset(100);
        assert_eq!(pane.offset(), 12);
        pane.scroll_to_offset(5);
        assert_eq!(pane.offset(), 5);
    }

    #[test]
    fn scroll_by_clamps_both_directions() {
        let mut pane = ScrollPane::new(10, 4);
        pane.scroll_by(-3);
        assert_eq!(pane.offset(), 0);
        pane.scroll_by(100);
        assert_eq!(pane.offset(), 6);
        pane.scroll_by(-2);
        assert_eq!(pane.offset(), 4);
    }

    #[test]
    fn short_content_never_scrolls() {
        let mut pane = ScrollPane::new(3, 8);
        assert_eq!(pane.max_offset(), 0);
        pane.scroll_by(5);
        assert_eq!(pane.offset(), 0);
    }

    #[test]
    fn provider_attaches_fresh_handle() {
        let handle = ScrollPaneProvider.attach(30, 8, &ScrollOptions::default());
        assert_eq!(handle.offset(), 0);
        assert_eq!(handle.content_rows(), 30);
        assert_eq!(handle.viewport_rows(), 8);
    }
}
