//! Interactive showcase for the select widget.
//!
//! Run with `cargo run --example showcase`. Click a trigger to open it,
//! click a row to select, scroll the long list with the mouse wheel, and
//! drive the focused control with the arrow keys. `q` quits.

use std::io;

use anyhow::Result;
use crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind, MouseButton,
        MouseEventKind,
    },
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    Terminal,
    backend::{Backend, CrosstermBackend},
    layout::Rect,
    style::Style,
    widgets::Paragraph,
};
use selectbox::{
    NativeOption, NativeSelect, SelectBox, SelectBoxManager, SelectConfig, Theme, ellipsis,
};

fn main() -> Result<()> {
    // Log to a file so the alternate screen stays clean
    let log_file = std::fs::OpenOptions::new()
        .create(true)
        .write(true)
        .truncate(true)
        .open("showcase.log")?;
    env_logger::Builder::from_default_env()
        .target(env_logger::Target::Pipe(Box::new(log_file)))
        .init();

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut manager = build_widgets()?;
    let result = run(&mut terminal, &mut manager);

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    result
}

fn build_widgets() -> Result<SelectBoxManager> {
    let mut manager = SelectBoxManager::new();

    let colors = NativeSelect::new()
        .id("color")
        .option(NativeOption::new("red", "Red").classes("swatch-red"))
        .option(
            NativeOption::new("green", "Green")
                .classes("swatch-green")
                .selected(true),
        )
        .option(NativeOption::new("blue", "Blue").classes("swatch-blue"));
    let config = SelectConfig::new()
        .with_width(20)
        .on_change(|value| log::info!("color changed to {value}"));
    let mut widget = SelectBox::new(colors, config)?;
    widget.place(2, 2);
    manager.register(widget);

    let mut countries = NativeSelect::new().id("country");
    for (value, label, group) in [
        ("se", "Sweden", "Europe"),
        ("fr", "France", "Europe"),
        ("de", "Germany", "Europe"),
        ("it", "Italy", "Europe"),
        ("jp", "Japan", "Asia"),
        ("kr", "South Korea", "Asia"),
        ("cn", "China", "Asia"),
        ("in", "India", "Asia"),
        ("us", "United States of America", "Americas"),
        ("br", "Brazil", "Americas"),
        ("ar", "Argentina", "Americas"),
        ("eg", "Egypt", "Africa"),
        ("ng", "Nigeria", "Africa"),
    ] {
        countries = countries.option(NativeOption::new(value, label).group(group));
    }
    let config = SelectConfig::new()
        .with_width(26)
        .with_max_visible_rows(6)
        .truncate_with(ellipsis(20))
        .on_change(|value| log::info!("country changed to {value}"));
    let mut widget = SelectBox::new(countries, config)?;
    widget.place(26, 2);
    manager.register(widget);

    let sizes = NativeSelect::new()
        .id("size")
        .opt("s", "Small")
        .option(NativeOption::new("m", "Medium").selected(true))
        .option(NativeOption::new("l", "Large").disabled(true))
        .opt("xl", "Extra large");
    let mut widget = SelectBox::new(sizes, SelectConfig::new().with_width(20))?;
    widget.place(2, 14);
    manager.register(widget);

    Ok(manager)
}

fn run<B: Backend>(terminal: &mut Terminal<B>, manager: &mut SelectBoxManager) -> Result<()> {
    let theme = Theme::default();

    loop {
        terminal.draw(|frame| {
            let help = Rect::new(0, 0, frame.area().width, 1);
            frame.render_widget(
                Paragraph::new(" click to open · wheel scrolls · arrows after focus · q quits")
                    .style(Style::default().fg(theme.muted)),
                help,
            );
            manager.render(frame, &theme);
        })?;

        match event::read()? {
            Event::Key(key) if key.kind == KeyEventKind::Press => match key.code {
                KeyCode::Char('q') => break,
                code => manager.handle_key(code),
            },
            Event::Mouse(mouse) => match mouse.kind {
                MouseEventKind::Down(MouseButton::Left) => {
                    manager.handle_click(mouse.column, mouse.row);
                }
                MouseEventKind::Moved => {
                    manager.handle_mouse_move(mouse.column, mouse.row);
                }
                MouseEventKind::ScrollUp => {
                    manager.handle_scroll(mouse.column, mouse.row, -1);
                }
                MouseEventKind::ScrollDown => {
                    manager.handle_scroll(mouse.column, mouse.row, 1);
                }
                _ => {}
            },
            _ => {}
        }
    }

    Ok(())
}
