use std::{
    fs, io,
    path::{Path, PathBuf},
};

/// File reading capability used to pull theme documents from disk.
///
/// The engine itself never decides *which* file to load; it only asks its loader for the text
/// behind a path. This seam lets the surrounding application (or tests) supply documents from
/// somewhere other than the filesystem.
pub trait ResourceLoader {
    /// Read the text contents behind the given path.
    fn read_text(&self, path: &Path) -> io::Result<String>;

    /// Check whether the given path exists.
    fn exists(&self, path: &Path) -> bool;

    /// Turn a path into its canonical form, used as a cache key.
    ///
    /// The default keeps the path as-is when canonicalization fails (e.g. the path does not
    /// exist yet), so lookups remain stable.
    fn canonicalize(&self, path: &Path) -> PathBuf {
        path.canonicalize().unwrap_or_else(|_| path.to_path_buf())
    }
}

/// Manages resources pulled from the filesystem.
///
/// Any relative paths are assumed to be relative to the given base.
#[derive(Clone, Debug, Default)]
pub struct Resources {
    base_path: PathBuf,
}

impl Resources {
    /// Construct a new resource manager over the provided base path.
    pub fn new<P: Into<PathBuf>>(base_path: P) -> Self {
        Self { base_path: base_path.into() }
    }
}

impl ResourceLoader for Resources {
    fn read_text(&self, path: &Path) -> io::Result<String> {
        fs::read_to_string(self.base_path.join(path))
    }

    fn exists(&self, path: &Path) -> bool {
        self.base_path.join(path).exists()
    }

    fn canonicalize(&self, path: &Path) -> PathBuf {
        let path = self.base_path.join(path);
        path.canonicalize().unwrap_or(path)
    }
}
