//! Custom select/dropdown widget for ratatui terminal UIs.
//!
//! A [`SelectBox`] wraps a [`NativeSelect`] form model and renders a styled
//! trigger plus dropdown list in its place, while the wrapped control keeps
//! owning selection state, value strings and keyboard semantics. A
//! [`SelectBoxManager`] routes clicks, hover and key events to the right
//! instance and guarantees that at most one dropdown is open at a time.
//!
//! ```no_run
//! use selectbox::{NativeOption, NativeSelect, SelectBox, SelectBoxManager, SelectConfig};
//!
//! let native = NativeSelect::new()
//!     .id("color")
//!     .opt("red", "Red")
//!     .option(NativeOption::new("green", "Green").selected(true))
//!     .opt("blue", "Blue");
//!
//! let mut widget = SelectBox::new(native, SelectConfig::new())?;
//! widget.place(2, 1);
//!
//! let mut manager = SelectBoxManager::new();
//! let id = manager.register(widget);
//! manager.open(id);
//! # Ok::<(), anyhow::Error>(())
//! ```

pub mod config;
pub mod manager;
pub mod native;
pub mod options;
mod render;
pub mod scroll;
pub mod theme;
pub mod widget;

pub use config::{SelectConfig, ellipsis};
pub use manager::{SelectBoxId, SelectBoxManager};
pub use native::{NativeOption, NativeSelect};
pub use options::{DisplayValue, ListRow, OptionEntry, OptionList};
pub use scroll::{ScrollHandle, ScrollOptions, ScrollPane, ScrollPaneProvider, ScrollProvider};
pub use theme::{Theme, ThemeVariant};
pub use widget::{Hit, SelectBox};
