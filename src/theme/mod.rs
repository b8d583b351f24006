pub(crate) mod clean;
pub mod raw;
pub(crate) mod resolve;
pub mod validate;

pub use clean::{ColorMode, Palette, SemanticMap, ThemeDefinition};
pub(crate) use resolve::Resolver;
