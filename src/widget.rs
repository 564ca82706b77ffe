use anyhow::{Result, bail};
use crossterm::event::KeyCode;
use log::{debug, warn};
use ratatui::Frame;
use ratatui::layout::Rect;

use crate::config::SelectConfig;
use crate::native::NativeSelect;
use crate::options::{DisplayValue, OptionList};
use crate::render;
use crate::scroll::{ScrollHandle, ScrollPane, ScrollProvider};
use crate::theme::Theme;

/// Trigger height: border, value line, border
pub(crate) const TRIGGER_ROWS: u16 = 3;

/// Where a pointer event landed inside a widget
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Hit {
    /// The value/trigger region
    Trigger,
    /// A row of the open list, by row position (group headers included)
    Row(usize),
    /// Inside the widget chrome but not on anything interactive
    Inside,
}

/// Scroll state of the dropdown list
pub(crate) enum ListScroll {
    /// Content fits the viewport
    Fixed,
    /// Plain scrollable container with the stock scrollbar
    Plain(ScrollPane),
    /// Resource attached from the configured provider
    Custom(Box<dyn ScrollHandle>),
}

/// A custom-rendered select bound 1:1 to a [`NativeSelect`]
///
/// The widget draws a trigger showing the current value and, while open, a
/// synthetic option list derived from the wrapped control. Selection flows
/// both ways: clicking a row writes back to the control, and native keyboard
/// selection is mirrored into the display. Register instances with a
/// [`SelectBoxManager`](crate::manager::SelectBoxManager), which routes
/// events and keeps at most one dropdown open.
pub struct SelectBox {
    native: NativeSelect,
    config: SelectConfig,
    scroll_provider: Option<Box<dyn ScrollProvider>>,
    rows: OptionList,
    displayed: DisplayValue,
    hovered: Option<usize>,
    open: bool,
    enabled: bool,
    focused: bool,
    layer: u16,
    origin: (u16, u16),
    scroll: ListScroll,
}

impl SelectBox {
    /// Wrap a control.
    ///
    /// Fails when `custom_scrollbar` is requested without a scroll provider;
    /// a missing capability is surfaced here rather than downgraded to the
    /// plain container.
    pub fn new(native: NativeSelect, mut config: SelectConfig) -> Result<Self> {
        let scroll_provider = if config.custom_scrollbar {
            match config.scroll_provider.take() {
                Some(provider) => Some(provider),
                None => bail!(
                    "select {:?}: custom scrollbar requested but no scroll provider is configured",
                    native.element_id()
                ),
            }
        } else {
            None
        };

        let rows = OptionList::derive(&native);
        let layer = config.z_index;
        let mut widget = Self {
            native,
            config,
            scroll_provider,
            rows,
            displayed: DisplayValue::default(),
            hovered: None,
            open: false,
            enabled: true,
            focused: false,
            layer,
            origin: (0, 0),
            scroll: ListScroll::Fixed,
        };
        widget.displayed = widget.truncated(widget.rows.display_value());
        Ok(widget)
    }

    /// Anchor the trigger's top-left corner
    pub fn place(&mut self, x: u16, y: u16) {
        self.origin = (x, y);
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn is_focused(&self) -> bool {
        self.focused
    }

    pub fn layer(&self) -> u16 {
        self.layer
    }

    pub fn config(&self) -> &SelectConfig {
        &self.config
    }

    /// The truncated value currently shown in the trigger
    pub fn displayed_value(&self) -> &DisplayValue {
        &self.displayed
    }

    pub fn rows(&self) -> &OptionList {
        &self.rows
    }

    pub fn native(&self) -> &NativeSelect {
        &self.native
    }

    /// Mutable access to the wrapped control. The synthetic list does not
    /// observe mutations made here until `sync()` is called.
    pub fn native_mut(&mut self) -> &mut NativeSelect {
        &mut self.native
    }

    pub(crate) fn hovered(&self) -> Option<usize> {
        self.hovered
    }

    pub(crate) fn scroll_mode(&self) -> &ListScroll {
        &self.scroll
    }

    pub fn scroll_offset(&self) -> u16 {
        match &self.scroll {
            ListScroll::Fixed => 0,
            ListScroll::Plain(pane) => pane.offset(),
            ListScroll::Custom(handle) => handle.offset(),
        }
    }

    /// Open the dropdown. No-op while disabled or already open.
    ///
    /// Call through [`SelectBoxManager::open`](crate::manager::SelectBoxManager::open)
    /// to close every other instance first.
    pub fn open(&mut self) {
        if self.open || !self.enabled {
            return;
        }
        self.refresh_scroll();
        self.open = true;
        self.reveal_selected();
        self.layer = self.config.z_index + 1;
        debug!("select {:?} opened", self.native.element_id());
    }

    /// Close the dropdown and drop back to the baseline layer
    pub fn close(&mut self) {
        self.layer = self.config.z_index;
        if self.open {
            self.open = false;
            self.hovered = None;
            debug!("select {:?} closed", self.native.element_id());
        }
    }

    /// Select the option at `index`, mirror it into the control and the
    /// rendered list, and update the trigger.
    ///
    /// Out-of-range indices and disabled options are logged no-ops. The
    /// change callback fires only when the displayed value actually changes.
    /// Deliberately callable on a disabled widget.
    pub fn jump_to_index(&mut self, index: usize) {
        let Some(entry) = self.rows.entry(index) else {
            warn!(
                "select {:?}: jump to index {index} ignored, no such option",
                self.native.element_id()
            );
            return;
        };
        if entry.disabled {
            warn!(
                "select {:?}: jump to index {index} ignored, option is disabled",
                self.native.element_id()
            );
            return;
        }
        let display = DisplayValue {
            icons: entry.icons.clone(),
            text: entry.label.clone(),
        };
        self.native.set_selected_index(index);
        self.rows.mark_selected(index);
        self.update_value(display);
    }

    /// Select the first option whose label equals `label` exactly.
    ///
    /// Returns the option index, or `None` without touching any state when
    /// no label matches.
    pub fn jump_to_value(&mut self, label: &str) -> Option<usize> {
        let index = self
            .native
            .options()
            .iter()
            .position(|option| option.label == label)?;
        self.jump_to_index(index);
        Some(index)
    }

    /// Rebuild the synthetic list from the control's current options.
    ///
    /// The displayed value follows the control silently; no change
    /// notification fires from a sync.
    pub fn sync(&mut self) {
        self.rows = OptionList::derive(&self.native);
        self.displayed = self.truncated(self.rows.display_value());
        self.hovered = None;
        self.refresh_scroll();
    }

    /// Re-enable the widget and clear the control's disabled attribute
    pub fn enable(&mut self) {
        self.enabled = true;
        self.native.set_disabled(false);
    }

    /// Disable the widget and mirror the disabled attribute onto the
    /// control. Trigger clicks and `open()` are ignored while disabled;
    /// programmatic selection stays available.
    pub fn disable(&mut self) {
        self.enabled = false;
        self.native.set_disabled(true);
    }

    /// Mirror native focus into the focused visual flag
    pub fn handle_focus(&mut self) {
        self.focused = true;
    }

    pub fn handle_blur(&mut self) {
        self.focused = false;
    }

    /// Key-release bridge: let the control apply its native keyboard
    /// selection, then close and re-sync the display to whatever the
    /// control now selects.
    pub fn handle_key(&mut self, key: KeyCode) {
        if !self.enabled {
            return;
        }
        self.native.handle_key(key);
        self.close();
        if let Some(index) = self.native.selected_index() {
            self.jump_to_index(index);
        }
    }

    /// Mirror a selection change made directly on the control (native
    /// fallback mode, or external mutation) into the display
    pub fn handle_native_change(&mut self) {
        let Some(index) = self.native.selected_index() else {
            return;
        };
        let Some(entry) = self.rows.entry(index) else {
            return;
        };
        if entry.disabled {
            return;
        }
        let display = DisplayValue {
            icons: entry.icons.clone(),
            text: entry.label.clone(),
        };
        self.rows.mark_selected(index);
        self.update_value(display);
    }

    /// Track the hovered row; hover only applies inside the open list
    pub fn handle_mouse_move(&mut self, x: u16, y: u16) {
        if !self.open {
            self.hovered = None;
            return;
        }
        self.hovered = match self.hit_test(x, y) {
            Some(Hit::Row(row)) if self.rows.entry_at_row(row).is_some() => Some(row),
            _ => None,
        };
    }

    /// Wheel scrolling over the open list. Returns true when consumed.
    pub fn handle_scroll(&mut self, x: u16, y: u16, delta: i32) -> bool {
        if !self.open || !contains(self.list_rect(), x, y) {
            return false;
        }
        let step = delta * i32::from(self.config.scroll_options.wheel_rows);
        match &mut self.scroll {
            ListScroll::Fixed => {}
            ListScroll::Plain(pane) => pane.scroll_by(step),
            ListScroll::Custom(handle) => handle.scroll_by(step),
        }
        true
    }

    /// Row click: selects the option, closes the list. Disabled options and
    /// group headers are ignored. Returns true when a selection was made.
    pub fn click_row(&mut self, row: usize) -> bool {
        let Some(entry) = self.rows.entry_at_row(row) else {
            return false;
        };
        if entry.disabled {
            return false;
        }
        let index = entry.index;
        self.jump_to_index(index);
        self.close();
        true
    }

    pub fn trigger_rect(&self) -> Rect {
        Rect::new(self.origin.0, self.origin.1, self.config.width, TRIGGER_ROWS)
    }

    /// Rows the open list shows at once
    pub(crate) fn viewport_rows(&self) -> u16 {
        (self.rows.row_count() as u16).min(self.config.max_visible_rows)
    }

    /// The dropdown area below the trigger (meaningful while open)
    pub fn list_rect(&self) -> Rect {
        Rect::new(
            self.origin.0,
            self.origin.1 + TRIGGER_ROWS,
            self.config.width,
            self.viewport_rows() + 2,
        )
    }

    /// Classify a pointer position against the widget's rendered regions.
    /// `None` means the point is outside the widget entirely.
    pub fn hit_test(&self, x: u16, y: u16) -> Option<Hit> {
        if contains(self.trigger_rect(), x, y) {
            return Some(Hit::Trigger);
        }
        if self.open {
            let list = self.list_rect();
            if contains(list, x, y) {
                let inner = list.inner(ratatui::layout::Margin::new(1, 1));
                if contains(inner, x, y) {
                    let row = usize::from(self.scroll_offset()) + usize::from(y - inner.y);
                    if row < self.rows.row_count() {
                        return Some(Hit::Row(row));
                    }
                }
                return Some(Hit::Inside);
            }
        }
        None
    }

    pub fn render(&self, frame: &mut Frame, theme: &Theme) {
        render::draw(self, frame, theme);
    }

    fn truncated(&self, value: DisplayValue) -> DisplayValue {
        match &self.config.truncate {
            Some(truncate) => DisplayValue {
                icons: value.icons,
                text: truncate(&value.text),
            },
            None => value,
        }
    }

    fn update_value(&mut self, raw: DisplayValue) {
        let display = self.truncated(raw);
        if display == self.displayed {
            return;
        }
        self.displayed = display;
        let value = self.native.value().to_string();
        debug!(
            "select {:?} value changed to {value:?}",
            self.native.element_id()
        );
        if let Some(callback) = self.config.on_change.as_mut() {
            callback(&value);
        }
    }

    /// Acquire or refresh the scroll resource for the current content
    fn refresh_scroll(&mut self) {
        let content = self.rows.row_count() as u16;
        let viewport = self.config.max_visible_rows;
        self.scroll = if content > viewport {
            match &self.scroll_provider {
                Some(provider) => ListScroll::Custom(provider.attach(
                    content,
                    viewport,
                    &self.config.scroll_options,
                )),
                None => ListScroll::Plain(ScrollPane::new(content, viewport)),
            }
        } else {
            ListScroll::Fixed
        };
    }

    fn reveal_selected(&mut self) {
        let Some(row) = self
            .rows
            .selected_entry()
            .and_then(|entry| self.rows.row_of_index(entry.index))
        else {
            return;
        };
        match &mut self.scroll {
            ListScroll::Fixed => {}
            ListScroll::Plain(pane) => pane.scroll_to_offset(row as u16),
            ListScroll::Custom(handle) => handle.scroll_to_offset(row as u16),
        }
    }
}

fn contains(rect: Rect, x: u16, y: u16) -> bool {
    x >= rect.x && x < rect.x + rect.width && y >= rect.y && y < rect.y + rect.height
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::native::NativeOption;
    use std::sync::{Arc, Mutex};

    fn colors() -> NativeSelect {
        NativeSelect::new()
            .id("colors")
            .opt("red", "Red")
            .option(NativeOption::new("green", "Green").selected(true))
            .opt("blue", "Blue")
    }

    fn changes() -> (Arc<Mutex<Vec<String>>>, SelectConfig) {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        let config = SelectConfig::new()
            .on_change(move |value| sink.lock().unwrap().push(value.to_string()));
        (seen, config)
    }

    #[test]
    fn construction_shows_the_selected_option() {
        let widget = SelectBox::new(colors(), SelectConfig::new()).unwrap();
        assert_eq!(widget.displayed_value().text, "Green");
        assert!(widget.rows().entry(1).unwrap().selected);
        assert!(!widget.is_open());
        assert!(widget.is_enabled());
        assert!(!widget.is_focused());
    }

    #[test]
    fn custom_scrollbar_without_provider_is_a_construction_error() {
        let config = SelectConfig::new().with_scroll_provider(None);
        assert!(SelectBox::new(colors(), config).is_err());
        let config = SelectConfig::new()
            .with_custom_scrollbar(false)
            .with_scroll_provider(None);
        assert!(SelectBox::new(colors(), config).is_ok());
    }

    #[test]
    fn open_and_close_toggle_the_layer() {
        let mut widget = SelectBox::new(colors(), SelectConfig::new()).unwrap();
        assert_eq!(widget.layer(), 100);
        widget.open();
        assert!(widget.is_open());
        assert_eq!(widget.layer(), 101);
        widget.open();
        assert!(widget.is_open());
        widget.close();
        assert!(!widget.is_open());
        assert_eq!(widget.layer(), 100);
        widget.close();
        assert_eq!(widget.layer(), 100);
    }

    #[test]
    fn disabled_widget_ignores_open() {
        let mut widget = SelectBox::new(colors(), SelectConfig::new()).unwrap();
        widget.disable();
        widget.open();
        assert!(!widget.is_open());
        assert!(widget.native().is_disabled());
        widget.enable();
        assert!(!widget.native().is_disabled());
        widget.open();
        assert!(widget.is_open());
    }

    #[test]
    fn jump_to_index_updates_display_and_notifies_once() {
        let (seen, config) = changes();
        let mut widget = SelectBox::new(colors(), config).unwrap();
        widget.jump_to_index(2);
        assert_eq!(widget.displayed_value().text, "Blue");
        assert_eq!(widget.native().value(), "blue");
        assert_eq!(*seen.lock().unwrap(), vec!["blue"]);
        // Same target again: no second notification
        widget.jump_to_index(2);
        assert_eq!(seen.lock().unwrap().len(), 1);
    }

    #[test]
    fn jump_to_index_out_of_range_is_a_no_op() {
        let (seen, config) = changes();
        let mut widget = SelectBox::new(colors(), config).unwrap();
        widget.jump_to_index(7);
        assert_eq!(widget.displayed_value().text, "Green");
        assert_eq!(widget.native().value(), "green");
        assert!(seen.lock().unwrap().is_empty());
    }

    #[test]
    fn jump_to_index_on_disabled_option_is_a_no_op() {
        let native = NativeSelect::new()
            .opt("a", "A")
            .option(NativeOption::new("b", "B").disabled(true));
        let (seen, config) = changes();
        let mut widget = SelectBox::new(native, config).unwrap();
        widget.jump_to_index(1);
        assert_eq!(widget.native().selected_index(), None);
        assert!(seen.lock().unwrap().is_empty());
    }

    #[test]
    fn jump_to_value_selects_and_reports_the_index() {
        let (seen, config) = changes();
        let mut widget = SelectBox::new(colors(), config).unwrap();
        assert_eq!(widget.jump_to_value("Blue"), Some(2));
        assert_eq!(widget.displayed_value().text, "Blue");
        assert_eq!(*seen.lock().unwrap(), vec!["blue"]);
    }

    #[test]
    fn jump_to_value_not_found_leaves_state_unchanged() {
        let (seen, config) = changes();
        let mut widget = SelectBox::new(colors(), config).unwrap();
        assert_eq!(widget.jump_to_value("Chartreuse"), None);
        assert_eq!(widget.displayed_value().text, "Green");
        assert_eq!(widget.native().value(), "green");
        assert!(seen.lock().unwrap().is_empty());
    }

    #[test]
    fn jump_to_value_matches_labels_exactly() {
        let mut widget = SelectBox::new(colors(), SelectConfig::new()).unwrap();
        assert_eq!(widget.jump_to_value("blue"), None);
        assert_eq!(widget.jump_to_value(" Blue"), None);
    }

    #[test]
    fn programmatic_selection_works_while_disabled() {
        let (seen, config) = changes();
        let mut widget = SelectBox::new(colors(), config).unwrap();
        widget.disable();
        widget.jump_to_index(0);
        assert_eq!(widget.displayed_value().text, "Red");
        assert_eq!(*seen.lock().unwrap(), vec!["red"]);
    }

    #[test]
    fn sync_is_idempotent_and_silent() {
        let (seen, config) = changes();
        let mut widget = SelectBox::new(colors(), config).unwrap();
        let rows = widget.rows().clone();
        let displayed = widget.displayed_value().clone();
        widget.sync();
        widget.sync();
        assert_eq!(widget.rows(), &rows);
        assert_eq!(widget.displayed_value(), &displayed);
        assert!(seen.lock().unwrap().is_empty());
    }

    #[test]
    fn sync_picks_up_control_mutations() {
        let mut widget = SelectBox::new(colors(), SelectConfig::new()).unwrap();
        widget.native_mut().set_selected_index(0);
        // Not observed until sync
        assert_eq!(widget.displayed_value().text, "Green");
        widget.sync();
        assert_eq!(widget.displayed_value().text, "Red");
        assert!(widget.rows().entry(0).unwrap().selected);
    }

    #[test]
    fn truncation_applies_to_text_only() {
        let native = NativeSelect::new().option(
            NativeOption::new("us", "United States")
                .classes("flag-us")
                .selected(true),
        );
        let config = SelectConfig::new().truncate_with(crate::config::ellipsis(10));
        let widget = SelectBox::new(native, config).unwrap();
        assert_eq!(widget.displayed_value().icons, vec!["flag-us"]);
        assert_eq!(widget.displayed_value().text, "United St…");
    }

    #[test]
    fn key_release_closes_and_follows_native_selection() {
        let (seen, config) = changes();
        let mut widget = SelectBox::new(colors(), config).unwrap();
        widget.open();
        widget.handle_key(KeyCode::Down);
        assert!(!widget.is_open());
        assert_eq!(widget.displayed_value().text, "Blue");
        assert_eq!(*seen.lock().unwrap(), vec!["blue"]);
    }

    #[test]
    fn native_change_bridge_updates_the_display() {
        let (seen, config) = changes();
        let mut widget = SelectBox::new(colors(), config).unwrap();
        widget.native_mut().set_selected_index(2);
        widget.handle_native_change();
        assert_eq!(widget.displayed_value().text, "Blue");
        assert_eq!(*seen.lock().unwrap(), vec!["blue"]);
    }

    #[test]
    fn long_lists_attach_the_custom_scroll_resource() {
        let mut native = NativeSelect::new();
        for i in 0..20 {
            native = native.opt(format!("v{i}"), format!("Option {i}"));
        }
        let native = native.option(NativeOption::new("last", "Last").selected(true));
        let mut widget = SelectBox::new(native, SelectConfig::new()).unwrap();
        widget.open();
        assert!(matches!(widget.scroll_mode(), ListScroll::Custom(_)));
        // Selected row revealed at its offset, clamped to the end
        assert_eq!(widget.scroll_offset(), 21 - 8);
    }

    #[test]
    fn plain_container_is_used_when_custom_scrollbar_is_off() {
        let mut native = NativeSelect::new();
        for i in 0..20 {
            native = native.opt(format!("v{i}"), format!("Option {i}"));
        }
        let config = SelectConfig::new().with_custom_scrollbar(false);
        let mut widget = SelectBox::new(native, config).unwrap();
        widget.open();
        assert!(matches!(widget.scroll_mode(), ListScroll::Plain(_)));
    }

    #[test]
    fn short_lists_do_not_scroll() {
        let mut widget = SelectBox::new(colors(), SelectConfig::new()).unwrap();
        widget.open();
        assert!(matches!(widget.scroll_mode(), ListScroll::Fixed));
        assert_eq!(widget.scroll_offset(), 0);
    }

    #[test]
    fn hit_test_maps_rows_through_the_scroll_offset() {
        let mut widget = SelectBox::new(colors(), SelectConfig::new()).unwrap();
        widget.place(10, 2);
        assert_eq!(widget.hit_test(10, 2), Some(Hit::Trigger));
        assert_eq!(widget.hit_test(10, 5), None); // list is closed
        widget.open();
        // List border at y=5, first row at y=6
        assert_eq!(widget.hit_test(12, 5), Some(Hit::Inside));
        assert_eq!(widget.hit_test(12, 6), Some(Hit::Row(0)));
        assert_eq!(widget.hit_test(12, 8), Some(Hit::Row(2)));
        assert_eq!(widget.hit_test(9, 6), None);
    }

    #[test]
    fn click_row_selects_and_closes() {
        let (seen, config) = changes();
        let mut widget = SelectBox::new(colors(), config).unwrap();
        widget.open();
        assert!(widget.click_row(2));
        assert!(!widget.is_open());
        assert_eq!(widget.displayed_value().text, "Blue");
        assert_eq!(*seen.lock().unwrap(), vec!["blue"]);
    }

    #[test]
    fn click_row_ignores_headers_and_disabled_options() {
        let native = NativeSelect::new()
            .option(NativeOption::new("a", "A").group("Letters"))
            .option(NativeOption::new("b", "B").group("Letters").disabled(true));
        let mut widget = SelectBox::new(native, SelectConfig::new()).unwrap();
        widget.open();
        assert!(!widget.click_row(0)); // the group header
        assert!(!widget.click_row(2)); // the disabled option
        assert!(widget.is_open());
    }

    #[test]
    fn hover_tracks_rows_inside_the_open_list() {
        let mut widget = SelectBox::new(colors(), SelectConfig::new()).unwrap();
        widget.place(0, 0);
        widget.handle_mouse_move(2, 4);
        assert_eq!(widget.hovered(), None);
        widget.open();
        widget.handle_mouse_move(2, 4);
        assert_eq!(widget.hovered(), Some(0));
        widget.handle_mouse_move(50, 50);
        assert_eq!(widget.hovered(), None);
    }

    #[test]
    fn wheel_scrolls_only_over_the_open_list() {
        let mut native = NativeSelect::new();
        for i in 0..20 {
            native = native.opt(format!("v{i}"), format!("Option {i}"));
        }
        let mut widget = SelectBox::new(native, SelectConfig::new()).unwrap();
        widget.place(0, 0);
        assert!(!widget.handle_scroll(2, 4, 1));
        widget.open();
        assert!(widget.handle_scroll(2, 4, 1));
        assert_eq!(widget.scroll_offset(), 3);
        assert!(widget.handle_scroll(2, 4, -1));
        assert_eq!(widget.scroll_offset(), 0);
        assert!(!widget.handle_scroll(50, 50, 1));
    }
}
