use std::fmt;

use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::scroll::{ScrollOptions, ScrollPaneProvider, ScrollProvider};

/// Configuration for one select widget
///
/// Every field has a documented default; construct with `SelectConfig::new()`
/// (or `Default`) and override through the `with_*` helpers.
pub struct SelectConfig {
    /// Use the configured scroll provider for overflowing lists
    /// (default true). Requesting this without a provider is a
    /// construction error, never a silent downgrade.
    pub custom_scrollbar: bool,
    /// Baseline layer; raised by one while the dropdown is open
    /// (default 100)
    pub z_index: u16,
    /// Widget width in columns (default 28)
    pub width: u16,
    /// Rows shown before the list starts scrolling (default 8)
    pub max_visible_rows: u16,
    /// Device policy injected by the caller: when set, trigger clicks focus
    /// the wrapped control instead of opening the synthetic list
    /// (default false)
    pub native_fallback: bool,
    /// Passed through to the scroll provider on attach
    pub scroll_options: ScrollOptions,
    /// The scroll capability (default: the built-in pane)
    pub scroll_provider: Option<Box<dyn ScrollProvider>>,
    /// Invoked with the control's value whenever the displayed value changes
    pub on_change: Option<Box<dyn FnMut(&str) + Send>>,
    /// Shortens the text part of the displayed value; icon markers are never
    /// passed through it (default: identity)
    pub truncate: Option<Box<dyn Fn(&str) -> String + Send>>,
}

impl Default for SelectConfig {
    fn default() -> Self {
        Self {
            custom_scrollbar: true,
            z_index: 100,
            width: 28,
            max_visible_rows: 8,
            native_fallback: false,
            scroll_options: ScrollOptions::default(),
            scroll_provider: Some(Box::new(ScrollPaneProvider)),
            on_change: None,
            truncate: None,
        }
    }
}

impl SelectConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_custom_scrollbar(mut self, custom: bool) -> Self {
        self.custom_scrollbar = custom;
        self
    }

    pub fn with_z_index(mut self, z_index: u16) -> Self {
        self.z_index = z_index;
        self
    }

    pub fn with_width(mut self, width: u16) -> Self {
        self.width = width;
        self
    }

    pub fn with_max_visible_rows(mut self, rows: u16) -> Self {
        self.max_visible_rows = rows;
        self
    }

    pub fn with_native_fallback(mut self, fallback: bool) -> Self {
        self.native_fallback = fallback;
        self
    }

    pub fn with_scroll_options(mut self, options: ScrollOptions) -> Self {
        self.scroll_options = options;
        self
    }

    pub fn with_scroll_provider(
        mut self,
        provider: Option<Box<dyn ScrollProvider>>,
    ) -> Self {
        self.scroll_provider = provider;
        self
    }

    pub fn on_change(mut self, callback: impl FnMut(&str) + Send + 'static) -> Self {
        self.on_change = Some(Box::new(callback));
        self
    }

    pub fn truncate_with(
        mut self,
        truncate: impl Fn(&str) -> String + Send + 'static,
    ) -> Self {
        self.truncate = Some(Box::new(truncate));
        self
    }
}

impl fmt::Debug for SelectConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SelectConfig")
            .field("custom_scrollbar", &self.custom_scrollbar)
            .field("z_index", &self.z_index)
            .field("width", &self.width)
            .field("max_visible_rows", &self.max_visible_rows)
            .field("native_fallback", &self.native_fallback)
            .field("scroll_options", &self.scroll_options)
            .field("scroll_provider", &self.scroll_provider.is_some())
            .field("on_change", &self.on_change.is_some())
            .field("truncate", &self.truncate.is_some())
            .finish()
    }
}

/// Width-aware ellipsis truncation for display labels
///
/// Keeps at most `max_width` columns, ending in `…` when the label was
/// shortened.
pub fn ellipsis(max_width: usize) -> impl Fn(&str) -> String + Send {
    move |text: &str| {
        if text.width() <= max_width {
            return text.to_string();
        }
        let budget = max_width.saturating_sub(1);
        let mut out = String::new();
        let mut used = 0;
        for ch in text.chars() {
            let w = ch.width().unwrap_or(0);
            if used + w > budget {
                break;
            }
            out.push(ch);
            used += w;
        }
        out.push('…');
        out
    }
}
