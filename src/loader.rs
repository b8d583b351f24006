use crate::{
    ansi::theme_to_ansi_codes,
    cache::ThemeCache,
    color::Rgb,
    registry::NamedColorRegistry,
    resource::{ResourceLoader, Resources},
    theme::{
        raw::{RawTheme, RawThemeCollection},
        validate::validate_collection,
        Resolver, ThemeDefinition,
    },
};
use std::{
    collections::BTreeMap,
    fs, io,
    path::{Path, PathBuf},
};

/// The entry point into the theme engine.
///
/// Owns the theme cache and the named color registry for one load session. Both are only
/// touched through `&mut self`, which gives the single-writer discipline the cache needs;
/// callers sharing a loader across threads wrap it in a mutex.
pub struct ThemeLoader<R = Resources> {
    resources: R,
    cache: ThemeCache,
    registry: NamedColorRegistry,
}

impl ThemeLoader<Resources> {
    /// Construct a loader reading theme files relative to the given base path.
    pub fn new<P: Into<PathBuf>>(base_path: P) -> Self {
        Self::with_resources(Resources::new(base_path))
    }
}

impl<R: ResourceLoader> ThemeLoader<R> {
    /// Construct a loader on top of a custom resource loader.
    pub fn with_resources(resources: R) -> Self {
        Self { resources, cache: ThemeCache::default(), registry: NamedColorRegistry::default() }
    }

    /// Load and resolve a single theme file.
    ///
    /// The resolved theme is cached under the file's canonical path; later loads of the same
    /// file return the cached instance until [`clear_cache`](Self::clear_cache) is called.
    pub fn load_theme<P: AsRef<Path>>(&mut self, path: P) -> Result<ThemeDefinition, LoadThemeError> {
        let siblings = BTreeMap::new();
        let mut resolver = Resolver {
            resources: &self.resources,
            cache: &mut self.cache,
            registry: &mut self.registry,
            siblings: &siblings,
            collection_key: None,
        };
        resolver.resolve_file(path.as_ref(), &mut Vec::new())
    }

    /// Load a theme collection file and resolve every theme in it, in declaration order.
    ///
    /// The collection's `namedColors` section is registered before any theme is resolved.
    /// Themes that fail to resolve are skipped with a warning so one broken theme doesn't take
    /// the whole collection down; the summary of how many loaded is logged.
    pub fn load_collection<P: AsRef<Path>>(&mut self, path: P) -> Result<Vec<ThemeDefinition>, LoadThemeError> {
        let path = path.as_ref();
        let contents = self.resources.read_text(path).map_err(|e| match e.kind() {
            io::ErrorKind::NotFound => LoadThemeError::NotFound(path.display().to_string()),
            _ => LoadThemeError::Io(path.to_path_buf(), e),
        })?;
        let raw = RawThemeCollection::from_document(&contents)
            .map_err(|e| LoadThemeError::Malformed(path.display().to_string(), e))?;
        let errors = validate_collection(&raw);
        if !errors.is_empty() {
            return Err(LoadThemeError::ValidationFailed { label: path.display().to_string(), errors });
        }

        for (alias, color) in &raw.named_colors {
            match Rgb::from_raw(color, &self.registry) {
                Ok(color) => self.registry.register(alias.clone(), color),
                Err(e) => log::warn!("skipping named color '{alias}': {e}"),
            };
        }

        let collection_key = self.resources.canonicalize(path).display().to_string();
        let base_dir = path.parent().unwrap_or_else(|| Path::new("")).to_path_buf();
        let siblings: BTreeMap<_, _> = raw
            .themes
            .iter()
            .filter_map(|theme| theme.name.clone().map(|name| (name, theme.clone())))
            .collect();

        let mut themes = Vec::new();
        for raw_theme in &raw.themes {
            let name = raw_theme.name.clone().unwrap_or_default();
            let key = format!("{collection_key}#{name}");
            if let Some(theme) = self.cache.get(&key) {
                themes.push(theme.clone());
                continue;
            }
            let mut resolver = Resolver {
                resources: &self.resources,
                cache: &mut self.cache,
                registry: &mut self.registry,
                siblings: &siblings,
                collection_key: Some(&collection_key),
            };
            match resolver.resolve_raw(raw_theme, &base_dir, key, &mut Vec::new()) {
                Ok(theme) => themes.push(theme),
                Err(e) => log::warn!("skipping theme '{name}': {e}"),
            };
        }
        log::info!("loaded {}/{} themes from {}", themes.len(), raw.themes.len(), path.display());
        Ok(themes)
    }

    /// Build the escape code table for a resolved theme.
    pub fn get_ansi_codes(&self, theme: &ThemeDefinition) -> BTreeMap<String, String> {
        theme_to_ansi_codes(theme)
    }

    /// Drop every cached theme along with the named color registry.
    ///
    /// Named color resolutions are scoped to a cache epoch; clearing one without the other
    /// would let aliases leak across reload cycles.
    pub fn clear_cache(&mut self) {
        self.cache.clear();
        self.registry.clear();
    }

    /// Serialize a resolved theme back into a file, in the document shape the parser accepts.
    pub fn save_theme_to_file<P: AsRef<Path>>(&self, theme: &ThemeDefinition, path: P) -> Result<(), LoadThemeError> {
        let serialized = serde_yaml::to_string(&RawTheme::from(theme))
            .map_err(|e| LoadThemeError::Serialize(theme.name.clone(), e))?;
        fs::write(path.as_ref(), serialized).map_err(|e| LoadThemeError::Io(path.as_ref().to_path_buf(), e))
    }
}

/// An error loading a theme or theme collection.
#[derive(thiserror::Error, Debug)]
pub enum LoadThemeError {
    #[error("io error reading {0}: {1}")]
    Io(PathBuf, io::Error),

    #[error("theme file not found: {0}")]
    NotFound(String),

    #[error("theme document '{0}' is malformed: {1}")]
    Malformed(String, serde_yaml::Error),

    #[error("'{label}' failed validation: {}", .errors.join("; "))]
    ValidationFailed { label: String, errors: Vec<String> },

    #[error("cyclic theme inheritance: {}", .0.join(" -> "))]
    CyclicInheritance(Vec<String>),

    #[error("serializing theme '{0}': {1}")]
    Serialize(String, serde_yaml::Error),
}
