use super::{
    clean::{Palette, SemanticMap, ThemeDefinition},
    raw::RawTheme,
    validate::validate_theme,
};
use crate::{
    cache::ThemeCache,
    color::Rgb,
    loader::LoadThemeError,
    registry::NamedColorRegistry,
    resource::ResourceLoader,
};
use std::{
    collections::BTreeMap,
    io,
    path::Path,
};

/// Resolves a theme definition into a fully self contained one.
///
/// Resolution walks `extends` and `imports` references depth first, consulting the cache
/// before touching the filesystem. The set of keys currently being resolved is threaded
/// through the recursion so that inheritance cycles fail with a descriptive error instead of
/// recursing forever.
///
/// Cross-file failures degrade rather than abort: an unresolvable parent leaves the theme on
/// default base colors and an unresolvable import is skipped, both with a warning. Inheritance
/// cycles and dangling semantic references stay fatal.
pub(crate) struct Resolver<'a, R> {
    pub(crate) resources: &'a R,
    pub(crate) cache: &'a mut ThemeCache,
    pub(crate) registry: &'a mut NamedColorRegistry,

    /// Sibling themes when resolving inside a collection, keyed by theme name.
    pub(crate) siblings: &'a BTreeMap<String, RawTheme>,

    /// The canonical collection path, used to qualify sibling cache keys.
    pub(crate) collection_key: Option<&'a str>,
}

impl<R: ResourceLoader> Resolver<'_, R> {
    /// Resolve the theme stored in the given file.
    pub(crate) fn resolve_file(
        &mut self,
        path: &Path,
        resolving: &mut Vec<String>,
    ) -> Result<ThemeDefinition, LoadThemeError> {
        let key = self.resources.canonicalize(path).display().to_string();
        if let Some(theme) = self.cache.get(&key) {
            return Ok(theme.clone());
        }
        let contents = self.resources.read_text(path).map_err(|e| match e.kind() {
            io::ErrorKind::NotFound => LoadThemeError::NotFound(path.display().to_string()),
            _ => LoadThemeError::Io(path.to_path_buf(), e),
        })?;
        let raw = RawTheme::from_document(&contents)
            .map_err(|e| LoadThemeError::Malformed(path.display().to_string(), e))?;
        let errors = validate_theme(&raw);
        if !errors.is_empty() {
            return Err(LoadThemeError::ValidationFailed { label: path.display().to_string(), errors });
        }
        let base_dir = path.parent().unwrap_or_else(|| Path::new("")).to_path_buf();
        self.resolve_raw(&raw, &base_dir, key, resolving)
    }

    /// Resolve an `extends`/`imports` reference: a sibling theme name inside a collection, or
    /// otherwise a path relative to the referencing theme's directory.
    fn resolve_reference(
        &mut self,
        reference: &str,
        base_dir: &Path,
        resolving: &mut Vec<String>,
    ) -> Result<ThemeDefinition, LoadThemeError> {
        if let Some(raw) = self.siblings.get(reference).cloned() {
            let key = match self.collection_key {
                Some(collection) => format!("{collection}#{reference}"),
                None => reference.to_string(),
            };
            if let Some(theme) = self.cache.get(&key) {
                return Ok(theme.clone());
            }
            return self.resolve_raw(&raw, base_dir, key, resolving);
        }
        self.resolve_file(&base_dir.join(reference), resolving)
    }

    /// Resolve an already validated theme under the given cache key.
    pub(crate) fn resolve_raw(
        &mut self,
        raw: &RawTheme,
        base_dir: &Path,
        key: String,
        resolving: &mut Vec<String>,
    ) -> Result<ThemeDefinition, LoadThemeError> {
        if resolving.iter().any(|entry| *entry == key) {
            let mut chain = resolving.clone();
            chain.push(key);
            return Err(LoadThemeError::CyclicInheritance(chain));
        }
        resolving.push(key.clone());
        let result = self.merge(raw, base_dir, resolving);
        resolving.pop();

        let theme = result?;
        self.cache.put(key, theme.clone());
        Ok(theme)
    }

    fn merge(
        &mut self,
        raw: &RawTheme,
        base_dir: &Path,
        resolving: &mut Vec<String>,
    ) -> Result<ThemeDefinition, LoadThemeError> {
        let name = raw.name.clone().unwrap_or_default();

        // The base palette comes from the extended theme, copied by value so later cache
        // evictions can't reach back into this theme.
        let mut palette = match &raw.extends {
            Some(parent) => match self.resolve_reference(parent, base_dir, resolving) {
                Ok(parent_theme) => parent_theme.palette,
                Err(e @ LoadThemeError::CyclicInheritance(_)) => return Err(e),
                Err(e) => {
                    log::warn!("theme '{name}': cannot resolve extended theme '{parent}', using defaults: {e}");
                    Palette::default()
                }
            },
            None => Palette::default(),
        };

        // Imports contribute named colors, not palette slots. Each one fails individually so
        // one broken import doesn't block the rest.
        for import in raw.imports.iter().flatten() {
            match self.resolve_reference(import, base_dir, resolving) {
                Ok(imported) => {
                    for (slot, color) in imported.palette.iter() {
                        self.registry.register(format!("{}.{slot}", imported.name), color);
                    }
                }
                Err(e @ LoadThemeError::CyclicInheritance(_)) => return Err(e),
                Err(e) => log::warn!("theme '{name}': skipping import '{import}': {e}"),
            };
        }

        // Explicitly declared slots win over the base, slot by slot. A slot whose color can't
        // be parsed keeps its base value.
        for (slot, color) in &raw.palette {
            match Rgb::from_raw(color, self.registry) {
                Ok(color) => palette.set(slot, color),
                Err(e) => log::warn!("theme '{name}': skipping palette slot '{slot}': {e}"),
            };
        }

        let mut semantic = SemanticMap::default();
        for (role, slot) in &raw.semantic {
            semantic.insert(role, slot);
        }
        // Referential integrity is checked only now: the slot a role points at may have come
        // from the inherited palette.
        let dangling: Vec<_> = semantic
            .iter()
            .filter(|(_, slot)| palette.get(slot).is_none())
            .map(|(role, slot)| format!("semantic role '{role}' references unknown palette slot '{slot}'"))
            .collect();
        if !dangling.is_empty() {
            return Err(LoadThemeError::ValidationFailed { label: name, errors: dangling });
        }

        let mode = raw.mode.as_deref().and_then(|mode| mode.parse().ok()).unwrap_or_default();
        Ok(ThemeDefinition {
            name,
            description: raw.description.clone().unwrap_or_default(),
            version: raw.version.clone(),
            author: raw.author.clone(),
            mode,
            palette,
            semantic,
        })
    }
}
