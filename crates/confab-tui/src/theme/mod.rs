//! Theme support for the widget.
//!
//! A [`Theme`] is an explicit value owned by the app and passed to every
//! widget by reference; there is no ambient theme store. [`ThemeMode`]
//! selects between the two built-in palettes, and accent overrides from
//! the widget configuration are applied on top.

mod colors;

pub use colors::{Theme, ThemeMode};
