use std::path::{Path, PathBuf};

use crate::shared::normalize_path;

/// Where `#[provider(path = "..")]` templates are read from.
pub struct Config {
    manifest_dir: PathBuf,
    templ_dir: Box<str>,
}

impl Config {
    pub fn templ_dir(&self) -> &str {
        &self.templ_dir
    }

    /// Resolve a template path.
    ///
    /// A leading `/` is relative to the crate manifest directory, anything else is
    /// relative to [`Config::templ_dir`] inside it.
    pub fn resolve(&self, path: &str) -> PathBuf {
        let full = match path.strip_prefix('/') {
            Some(path) => self.manifest_dir.join(path),
            None => self.manifest_dir.join(self.templ_dir()).join(path),
        };
        normalize_path(&full)
    }
}

impl Default for Config {
    fn default() -> Self {
        let manifest_dir = std::env::var_os("CARGO_MANIFEST_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|| Path::new(".").to_path_buf());
        Self {
            manifest_dir,
            templ_dir: String::from("templates").into_boxed_str(),
        }
    }
}
