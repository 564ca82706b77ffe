use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::{
    Block, Borders, Clear, Paragraph, Scrollbar, ScrollbarOrientation, ScrollbarState,
};

use crate::options::ListRow;
use crate::scroll::ScrollHandle;
use crate::theme::Theme;
use crate::widget::{ListScroll, SelectBox};

const MARKER: &str = "● ";
const CARET_CLOSED: &str = " ▼";
const CARET_OPEN: &str = " ▲";

pub(crate) fn draw(widget: &SelectBox, frame: &mut Frame, theme: &Theme) {
    draw_trigger(widget, frame, theme);
    if widget.is_open() {
        draw_list(widget, frame, theme);
    }
}

fn draw_trigger(widget: &SelectBox, frame: &mut Frame, theme: &Theme) {
    let area = widget.trigger_rect().intersection(frame.area());
    if area.width < 2 || area.height < 2 {
        return;
    }

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme.trigger_border(widget.is_focused()))
        .style(Style::default().bg(theme.base));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let value = widget.displayed_value();
    let mut spans = Vec::with_capacity(value.icons.len() + 2);
    for token in &value.icons {
        spans.push(Span::styled(MARKER, theme.marker_style(token)));
    }
    spans.push(Span::styled(
        value.text.clone(),
        theme.trigger_text(widget.is_enabled()),
    ));
    let caret = if widget.is_open() { CARET_OPEN } else { CARET_CLOSED };
    spans.push(Span::styled(caret, theme.caret_style()));

    frame.render_widget(Paragraph::new(Line::from(spans)), inner);
}

fn draw_list(widget: &SelectBox, frame: &mut Frame, theme: &Theme) {
    let area = widget.list_rect().intersection(frame.area());
    if area.width < 2 || area.height < 2 {
        return;
    }

    // Clear bleed-through from lower layers, then paint the panel
    frame.render_widget(Clear, area);
    frame.render_widget(
        Paragraph::new("").style(Style::default().bg(theme.base)),
        area,
    );
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.border))
        .style(Style::default().bg(theme.base));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let offset = usize::from(widget.scroll_offset());
    let rows = widget.rows().rows();
    for (position, row) in rows
        .iter()
        .enumerate()
        .skip(offset)
        .take(usize::from(inner.height))
    {
        let line_area = Rect {
            x: inner.x,
            y: inner.y + (position - offset) as u16,
            width: inner.width,
            height: 1,
        };
        match row {
            ListRow::GroupHeader { label } => {
                frame.render_widget(
                    Paragraph::new(label.as_str()).style(theme.header_style()),
                    line_area,
                );
            }
            ListRow::Option(entry) => {
                let hovered = widget.hovered() == Some(position);
                let style = theme.row_style(entry.selected, entry.disabled, hovered);
                let prefix = if entry.selected { "✓ " } else { "  " };
                let mut spans = Vec::with_capacity(entry.icons.len() + 2);
                spans.push(Span::raw(prefix));
                for token in &entry.icons {
                    spans.push(Span::styled(MARKER, theme.marker_style(token)));
                }
                spans.push(Span::raw(entry.label.as_str()));
                frame.render_widget(Paragraph::new(Line::from(spans)).style(style), line_area);
            }
        }
    }

    draw_scrollbar(widget, frame, theme, area);
}

fn draw_scrollbar(widget: &SelectBox, frame: &mut Frame, theme: &Theme, area: Rect) {
    // Drawn over the right border, inside the corners
    let track = Rect {
        x: area.right().saturating_sub(1),
        y: area.y + 1,
        width: 1,
        height: area.height.saturating_sub(2),
    };

    match widget.scroll_mode() {
        ListScroll::Fixed => {}
        ListScroll::Plain(pane) => {
            let mut state = ScrollbarState::new(usize::from(pane.max_offset()))
                .position(usize::from(pane.offset()));
            frame.render_stateful_widget(
                Scrollbar::new(ScrollbarOrientation::VerticalRight),
                track,
                &mut state,
            );
        }
        ListScroll::Custom(handle) => {
            let mut state = ScrollbarState::new(usize::from(handle.max_offset()))
                .position(usize::from(handle.offset()));
            let show_track = widget.config().scroll_options.show_track;
            let scrollbar = Scrollbar::new(ScrollbarOrientation::VerticalRight)
                .begin_symbol(None)
                .end_symbol(None)
                .track_symbol(if show_track { Some("│") } else { None })
                .track_style(theme.track_style())
                .thumb_symbol("█")
                .thumb_style(theme.thumb_style());
            frame.render_stateful_widget(scrollbar, track, &mut state);
        }
    }
}

#[cfg(test)]
mod tests {
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    use crate::config::SelectConfig;
    use crate::native::{NativeOption, NativeSelect};
    use crate::theme::Theme;
    use crate::widget::SelectBox;

    fn buffer_text(terminal: &Terminal<TestBackend>) -> String {
        let buffer = terminal.backend().buffer();
        let width = usize::from(buffer.area.width);
        let mut out = String::new();
        for (i, cell) in buffer.content.iter().enumerate() {
            out.push_str(cell.symbol());
            if (i + 1) % width == 0 {
                out.push('\n');
            }
        }
        out
    }

    fn widget() -> SelectBox {
        let native = NativeSelect::new()
            .opt("red", "Red")
            .option(NativeOption::new("green", "Green").selected(true))
            .opt("blue", "Blue");
        let mut widget = SelectBox::new(native, SelectConfig::new()).unwrap();
        widget.place(0, 0);
        widget
    }

    #[test]
    fn closed_trigger_shows_value_and_caret() {
        let mut terminal = Terminal::new(TestBackend::new(40, 12)).unwrap();
        let widget = widget();
        let theme = Theme::default();
        terminal.draw(|frame| widget.render(frame, &theme)).unwrap();
        let text = buffer_text(&terminal);
        assert!(text.contains("Green"));
        assert!(text.contains("▼"));
        assert!(!text.contains("Blue"));
    }

    #[test]
    fn open_list_shows_every_option_with_selection_mark() {
        let mut terminal = Terminal::new(TestBackend::new(40, 12)).unwrap();
        let mut widget = widget();
        widget.open();
        let theme = Theme::default();
        terminal.draw(|frame| widget.render(frame, &theme)).unwrap();
        let text = buffer_text(&terminal);
        assert!(text.contains("▲"));
        assert!(text.contains("Red"));
        assert!(text.contains("✓ Green"));
        assert!(text.contains("Blue"));
    }
}
