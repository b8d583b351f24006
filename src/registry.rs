use crate::color::Rgb;
use std::collections::BTreeMap;

/// A table of named colors, scoped to one load session.
///
/// Aliases are registered from a collection's `namedColors` section and from imported theme
/// palettes before any theme that references them is resolved. The table is append-only until
/// it's explicitly cleared.
#[derive(Debug, Default, Clone)]
pub struct NamedColorRegistry {
    colors: BTreeMap<String, Rgb>,
}

impl NamedColorRegistry {
    /// Register a color under the given alias.
    pub fn register<S: Into<String>>(&mut self, alias: S, color: Rgb) {
        self.colors.insert(alias.into(), color);
    }

    /// Look up an alias.
    pub fn resolve(&self, alias: &str) -> Option<Rgb> {
        self.colors.get(alias).copied()
    }

    /// Drop every registered alias.
    pub fn clear(&mut self) {
        self.colors.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn register_resolve_clear() {
        let mut registry = NamedColorRegistry::default();
        assert!(registry.resolve("brand").is_none());

        registry.register("brand", Rgb::new(1, 2, 3));
        assert_eq!(registry.resolve("brand"), Some(Rgb::new(1, 2, 3)));

        registry.clear();
        assert!(registry.resolve("brand").is_none());
        assert!(registry.is_empty());
    }

    #[test]
    fn later_registration_wins() {
        let mut registry = NamedColorRegistry::default();
        registry.register("brand", Rgb::new(1, 2, 3));
        registry.register("brand", Rgb::new(4, 5, 6));
        assert_eq!(registry.resolve("brand"), Some(Rgb::new(4, 5, 6)));
    }
}
