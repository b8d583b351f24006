//! A terminal theme resolution and color management engine.
//!
//! This crate turns declarative theme documents (named color roles, palettes, semantic
//! mappings) into fully resolved, render-ready color models: it parses and validates theme
//! definitions, resolves `extends`/`imports` inheritance chains against a named color
//! registry, caches the results, and emits the escape code tables the rendering layer paints
//! with.

pub mod ansi;
pub mod cache;
pub mod color;
pub mod loader;
pub mod registry;
pub mod resource;
pub mod theme;

pub use crate::{
    ansi::{color_to_ansi, theme_to_ansi_codes, RESET},
    cache::ThemeCache,
    color::{ParseColorError, Rgb},
    loader::{LoadThemeError, ThemeLoader},
    registry::NamedColorRegistry,
    resource::{ResourceLoader, Resources},
    theme::{ColorMode, Palette, SemanticMap, ThemeDefinition},
};
