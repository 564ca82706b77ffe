use crossterm::event::KeyCode;
use log::debug;
use ratatui::Frame;

use crate::theme::Theme;
use crate::widget::{Hit, SelectBox};

/// Handle for a registered widget, handed out in registration order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SelectBoxId(usize);

/// Tracks every select widget and keeps at most one dropdown open.
///
/// The manager plays the document's role: it owns the single shared
/// click/hover/key entry points and routes them to the right instance, so
/// outside-click detection happens in one place instead of one listener per
/// widget. Construct one per screen; tests construct their own isolated
/// instance.
pub struct SelectBoxManager {
    widgets: Vec<SelectBox>,
}

impl SelectBoxManager {
    pub fn new() -> Self {
        Self {
            widgets: Vec::new(),
        }
    }

    /// Track a widget. Registration is append-only; the returned id stays
    /// valid for the manager's lifetime.
    pub fn register(&mut self, widget: SelectBox) -> SelectBoxId {
        self.widgets.push(widget);
        SelectBoxId(self.widgets.len() - 1)
    }

    pub fn len(&self) -> usize {
        self.widgets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.widgets.is_empty()
    }

    pub fn get(&self, id: SelectBoxId) -> Option<&SelectBox> {
        self.widgets.get(id.0)
    }

    pub fn get_mut(&mut self, id: SelectBoxId) -> Option<&mut SelectBox> {
        self.widgets.get_mut(id.0)
    }

    /// Open one dropdown. Every other instance is closed first, before the
    /// target transitions, so a late close cannot stomp the fresh layer.
    pub fn open(&mut self, id: SelectBoxId) {
        self.close_all();
        if let Some(widget) = self.widgets.get_mut(id.0) {
            widget.open();
        }
    }

    /// Close every dropdown; idempotent
    pub fn close_all(&mut self) {
        for widget in &mut self.widgets {
            widget.close();
        }
    }

    /// Move keyboard focus to one widget, blurring the rest
    pub fn focus(&mut self, id: SelectBoxId) {
        for (index, widget) in self.widgets.iter_mut().enumerate() {
            if index == id.0 {
                widget.handle_focus();
            } else {
                widget.handle_blur();
            }
        }
    }

    pub fn blur_all(&mut self) {
        for widget in &mut self.widgets {
            widget.handle_blur();
        }
    }

    /// The shared document-level click listener.
    ///
    /// The click goes to the topmost widget under the pointer; a click that
    /// lands outside every widget's container closes all dropdowns.
    pub fn handle_click(&mut self, x: u16, y: u16) {
        let target = self
            .widgets
            .iter()
            .enumerate()
            .filter_map(|(index, widget)| {
                widget.hit_test(x, y).map(|hit| (widget.layer(), index, hit))
            })
            .max_by_key(|(layer, index, _)| (*layer, *index));

        match target {
            Some((_, index, hit)) => self.dispatch(SelectBoxId(index), hit),
            None => {
                debug!("click outside every select widget");
                self.close_all();
            }
        }
    }

    /// Hover routing; each widget tracks the pointer within its own container
    pub fn handle_mouse_move(&mut self, x: u16, y: u16) {
        for widget in &mut self.widgets {
            widget.handle_mouse_move(x, y);
        }
    }

    /// Wheel routing; consumed by the first open list under the pointer
    pub fn handle_scroll(&mut self, x: u16, y: u16, delta: i32) {
        for widget in &mut self.widgets {
            if widget.handle_scroll(x, y, delta) {
                break;
            }
        }
    }

    /// Key-release routing to the focused widget's native-selection bridge
    pub fn handle_key(&mut self, key: KeyCode) {
        if let Some(widget) = self.widgets.iter_mut().find(|w| w.is_focused()) {
            widget.handle_key(key);
        }
    }

    /// Draw every widget, higher layers last so an open dropdown overlays
    /// its siblings
    pub fn render(&self, frame: &mut Frame, theme: &Theme) {
        let mut order: Vec<usize> = (0..self.widgets.len()).collect();
        order.sort_by_key(|&index| (self.widgets[index].layer(), index));
        for index in order {
            self.widgets[index].render(frame, theme);
        }
    }

    fn dispatch(&mut self, id: SelectBoxId, hit: Hit) {
        match hit {
            Hit::Trigger => self.trigger_clicked(id),
            Hit::Row(row) => {
                let Some(widget) = self.widgets.get_mut(id.0) else {
                    return;
                };
                if widget.click_row(row) {
                    self.focus(id);
                }
            }
            Hit::Inside => {}
        }
    }

    fn trigger_clicked(&mut self, id: SelectBoxId) {
        let Some(widget) = self.widgets.get_mut(id.0) else {
            return;
        };
        if widget.is_open() {
            widget.close();
            self.focus(id);
        } else if widget.is_enabled() {
            if widget.config().native_fallback {
                self.focus(id);
            } else {
                self.open(id);
            }
        }
    }
}

impl Default for SelectBoxManager {
    fn default() -> Self {
        Self::new()
    }
}
