use std::path::{Path, PathBuf};

/// Where [`TemplateMap::load_dir`] finds templates.
///
/// [`TemplateMap::load_dir`]: crate::TemplateMap::load_dir
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    templ_dir: PathBuf,
    suffix: Box<str>,
}

impl Config {
    /// Template directory, `templates` by default.
    pub fn templ_dir(&self) -> &Path {
        &self.templ_dir
    }

    /// File name suffix of templates, `.tmpl` by default.
    pub fn suffix(&self) -> &str {
        &self.suffix
    }

    pub fn with_templ_dir(mut self, templ_dir: impl Into<PathBuf>) -> Self {
        self.templ_dir = templ_dir.into();
        self
    }

    pub fn with_suffix(mut self, suffix: &str) -> Self {
        self.suffix = suffix.into();
        self
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            templ_dir: PathBuf::from("templates"),
            suffix: String::from(".tmpl").into_boxed_str(),
        }
    }
}
