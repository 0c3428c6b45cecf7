//! Core runtime configuration.
//!
//! Configuration is resolved once at process startup and then passed into the store. Request
//! handlers never read process-wide environment variables, so several stores with different
//! roots can live side by side (as they do in tests).

use crate::constants::{DEFAULT_PAGES_ROOT, STATIC_URL_PREFIX};
use crate::{PagesError, PagesResult};
use std::path::{Path, PathBuf};

/// Core configuration resolved at startup.
#[derive(Clone, Debug)]
pub struct CoreConfig {
    pages_root: PathBuf,
    static_url_prefix: String,
}

impl CoreConfig {
    /// Create a new `CoreConfig` serving `pages_root` under the default static URL prefix.
    pub fn new(pages_root: PathBuf) -> PagesResult<Self> {
        Self::with_static_url_prefix(pages_root, STATIC_URL_PREFIX.into())
    }

    /// Create a new `CoreConfig` with an explicit static URL prefix.
    ///
    /// Trailing slashes on the prefix are dropped so URLs can be built by plain joining.
    pub fn with_static_url_prefix(
        pages_root: PathBuf,
        static_url_prefix: String,
    ) -> PagesResult<Self> {
        if pages_root.as_os_str().is_empty() {
            return Err(PagesError::InvalidInput("pages root cannot be empty".into()));
        }

        let static_url_prefix = static_url_prefix.trim().trim_end_matches('/').to_string();
        if !static_url_prefix.starts_with('/') {
            return Err(PagesError::InvalidInput(
                "static URL prefix must start with '/'".into(),
            ));
        }

        Ok(Self {
            pages_root,
            static_url_prefix,
        })
    }

    pub fn pages_root(&self) -> &Path {
        &self.pages_root
    }

    pub fn static_url_prefix(&self) -> &str {
        &self.static_url_prefix
    }

    /// Public URL of a stored file given its relative, forward-slash path.
    pub fn static_url_for(&self, relative_path: &str) -> String {
        format!(
            "{}/{}",
            self.static_url_prefix,
            relative_path.trim_start_matches('/')
        )
    }
}

/// Parse the pages root from an optional string value.
///
/// If `value` is `None` or empty/whitespace, returns [`DEFAULT_PAGES_ROOT`].
pub fn pages_root_from_env_value(value: Option<String>) -> PathBuf {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_PAGES_ROOT))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_empty_root() {
        let err = CoreConfig::new(PathBuf::new()).unwrap_err();
        assert!(matches!(err, PagesError::InvalidInput(_)));
    }

    #[test]
    fn rejects_relative_url_prefix() {
        let err = CoreConfig::with_static_url_prefix("pages".into(), "static".into()).unwrap_err();
        assert!(matches!(err, PagesError::InvalidInput(_)));
    }

    #[test]
    fn static_url_joins_with_single_slash() {
        let cfg = CoreConfig::with_static_url_prefix("pages".into(), "/files/".into()).unwrap();
        assert_eq!(cfg.static_url_prefix(), "/files");
        assert_eq!(cfg.static_url_for("assets/logo.png"), "/files/assets/logo.png");
    }

    #[test]
    fn default_prefix() {
        let cfg = CoreConfig::new("pages".into()).unwrap();
        assert_eq!(
            cfg.static_url_for("index.html"),
            "/webpages/static/pages/index.html"
        );
    }

    #[test]
    fn env_value_falls_back_to_default() {
        assert_eq!(pages_root_from_env_value(None), PathBuf::from(DEFAULT_PAGES_ROOT));
        assert_eq!(
            pages_root_from_env_value(Some("   ".into())),
            PathBuf::from(DEFAULT_PAGES_ROOT)
        );
        assert_eq!(
            pages_root_from_env_value(Some(" /srv/pages ".into())),
            PathBuf::from("/srv/pages")
        );
    }
}
