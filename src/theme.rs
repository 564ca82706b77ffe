use ratatui::style::{Color, Modifier, Style};

/// Catppuccin flavor used to derive the widget styles
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThemeVariant {
    Mocha, // Dark theme (default)
    Latte, // Light theme
}

impl Default for ThemeVariant {
    fn default() -> Self {
        Self::Mocha
    }
}

/// Color roles for the select widget
///
/// The raw palette is Catppuccin; fields are named for what the widget uses
/// them for rather than for the palette entries themselves.
#[derive(Debug, Clone)]
pub struct Theme {
    /// Widget background (trigger and dropdown list)
    pub base: Color,
    /// Hovered row background
    pub surface: Color,
    /// Selected row background
    pub surface_hi: Color,
    /// Resting border
    pub border: Color,
    /// Border while the wrapped control has keyboard focus
    pub border_focused: Color,
    /// Regular text
    pub text: Color,
    /// Group headers, caret, scrollbar track
    pub muted: Color,
    /// Disabled rows and disabled trigger text
    pub dim: Color,
    /// Selected row foreground and scrollbar thumb
    pub accent: Color,
    /// Icon marker palette; a class token maps to a stable entry
    markers: [Color; 6],
}

impl Theme {
    pub fn new(variant: ThemeVariant) -> Self {
        match variant {
            ThemeVariant::Mocha => Self::mocha(),
            ThemeVariant::Latte => Self::latte(),
        }
    }

    fn mocha() -> Self {
        Self {
            base: Color::Rgb(0x1e, 0x1e, 0x2e),
            surface: Color::Rgb(0x31, 0x32, 0x44),
            surface_hi: Color::Rgb(0x45, 0x47, 0x5a),
            border: Color::Rgb(0x6c, 0x70, 0x86),
            border_focused: Color::Rgb(0xb4, 0xbe, 0xfe),
            text: Color::Rgb(0xcd, 0xd6, 0xf4),
            muted: Color::Rgb(0xa6, 0xad, 0xc8),
            dim: Color::Rgb(0x58, 0x5b, 0x70),
            accent: Color::Rgb(0xcb, 0xa6, 0xf7),
            markers: [
                Color::Rgb(0xf3, 0x8b, 0xa8), // red
                Color::Rgb(0xfa, 0xb3, 0x87), // peach
                Color::Rgb(0xf9, 0xe2, 0xaf), // yellow
                Color::Rgb(0xa6, 0xe3, 0xa1), // green
                Color::Rgb(0x74, 0xc7, 0xec), // sapphire
                Color::Rgb(0x89, 0xb4, 0xfa), // blue
            ],
        }
    }

    fn latte() -> Self {
        Self {
            base: Color::Rgb(0xef, 0xf1, 0xf5),
            surface: Color::Rgb(0xcc, 0xd0, 0xda),
            surface_hi: Color::Rgb(0xbc, 0xc0, 0xcc),
            border: Color::Rgb(0x9c, 0xa0, 0xb0),
            border_focused: Color::Rgb(0x72, 0x87, 0xfd),
            text: Color::Rgb(0x4c, 0x4f, 0x69),
            muted: Color::Rgb(0x6c, 0x6f, 0x85),
            dim: Color::Rgb(0xac, 0xb0, 0xbe),
            accent: Color::Rgb(0x88, 0x39, 0xef),
            markers: [
                Color::Rgb(0xd2, 0x0f, 0x39), // red
                Color::Rgb(0xfe, 0x64, 0x0b), // peach
                Color::Rgb(0xdf, 0x8e, 0x1d), // yellow
                Color::Rgb(0x40, 0xa0, 0x2b), // green
                Color::Rgb(0x20, 0x9f, 0xb5), // sapphire
                Color::Rgb(0x1e, 0x66, 0xf5), // blue
            ],
        }
    }

    pub fn trigger_border(&self, focused: bool) -> Style {
        if focused {
            Style::default().fg(self.border_focused)
        } else {
            Style::default().fg(self.border)
        }
    }

    pub fn trigger_text(&self, enabled: bool) -> Style {
        if enabled {
            Style::default().fg(self.text)
        } else {
            Style::default().fg(self.dim)
        }
    }

    pub fn caret_style(&self) -> Style {
        Style::default().fg(self.muted)
    }

    pub fn header_style(&self) -> Style {
        Style::default().fg(self.muted).add_modifier(Modifier::BOLD)
    }

    pub fn row_style(&self, selected: bool, disabled: bool, hovered: bool) -> Style {
        if disabled {
            let style = Style::default().fg(self.dim);
            if hovered { style.bg(self.surface) } else { style }
        } else if selected {
            Style::default().fg(self.accent).bg(self.surface_hi)
        } else if hovered {
            Style::default().fg(self.text).bg(self.surface)
        } else {
            Style::default().fg(self.text)
        }
    }

    pub fn track_style(&self) -> Style {
        Style::default().fg(self.muted)
    }

    pub fn thumb_style(&self) -> Style {
        Style::default().fg(self.accent)
    }

    /// Stable mapping from an icon class token to a marker color
    pub fn marker_style(&self, token: &str) -> Style {
        let sum: usize = token.bytes().map(usize::from).sum();
        Style::default().fg(self.markers[sum % self.markers.len()])
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::new(ThemeVariant::default())
    }
}
