use crate::theme::ThemeDefinition;
use std::collections::BTreeMap;

/// Memoizes resolved themes.
///
/// Keys are canonical absolute file paths for file backed themes, or collection qualified
/// names (`<collection path>#<theme name>`) for themes living inside a collection. Only fully
/// resolved definitions are ever stored, so a hit can be handed out as-is.
#[derive(Debug, Default)]
pub struct ThemeCache {
    themes: BTreeMap<String, ThemeDefinition>,
}

impl ThemeCache {
    /// Look up a resolved theme.
    pub fn get(&self, key: &str) -> Option<&ThemeDefinition> {
        self.themes.get(key)
    }

    /// Store a resolved theme.
    pub fn put<S: Into<String>>(&mut self, key: S, theme: ThemeDefinition) {
        self.themes.insert(key.into(), theme);
    }

    /// Drop every cached theme.
    pub fn clear(&mut self) {
        self.themes.clear();
    }

    pub fn len(&self) -> usize {
        self.themes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.themes.is_empty()
    }
}
