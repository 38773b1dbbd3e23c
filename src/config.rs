use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

static DEFAULT_CONFIG: &str = include_str!("default_config.toml");

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file at {config_path}: {source}")]
    Read {
        config_path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file at {config_path}: {source}")]
    Parse {
        config_path: PathBuf,
        source: toml::de::Error,
    },
}

/// Styling for rendered markup. The default is bare semantic HTML.
#[derive(Debug, Clone, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct Config {
    pub headings: HeadingsConfig,
    pub lists: ListsConfig,
    pub code: CodeConfig,
    pub paragraph: ParagraphConfig,
}

#[derive(Debug, Clone, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct HeadingsConfig {
    pub h1_class: Option<String>,
    pub h2_class: Option<String>,
    pub h3_class: Option<String>,
}

impl HeadingsConfig {
    /// Get the class for a heading level.
    /// Returns None if no class is set or the level is not rendered.
    pub fn class_for_heading(&self, level: u8) -> Option<&str> {
        match level {
            1 => self.h1_class.as_deref(),
            2 => self.h2_class.as_deref(),
            3 => self.h3_class.as_deref(),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct ListsConfig {
    pub unordered_class: Option<String>,
    pub ordered_class: Option<String>,
}

impl ListsConfig {
    pub fn class_for_list(&self, ordered: bool) -> Option<&str> {
        if ordered {
            self.ordered_class.as_deref()
        } else {
            self.unordered_class.as_deref()
        }
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct CodeConfig {
    /// Class on the `<pre>` wrapping a fenced block.
    pub block_class: Option<String>,
    /// Class on inline `<code>` spans.
    pub inline_class: Option<String>,
    /// Prepended to the fence's language tag for syntax highlighters.
    pub language_prefix: String,
}

impl Default for CodeConfig {
    fn default() -> Self {
        Self {
            block_class: None,
            inline_class: None,
            language_prefix: "language-".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct ParagraphConfig {
    pub class: Option<String>,
}

impl Config {
    /// The styling embedded at build time (validated by build.rs).
    pub fn compiled_default() -> Self {
        match toml::from_str(DEFAULT_CONFIG) {
            Ok(config) => config,
            Err(e) => {
                tracing::warn!("embedded default config is invalid: {e}");
                Self::default()
            }
        }
    }

    /// Load config from a TOML file. Missing sections and keys fall back to
    /// bare markup.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            config_path: path.to_path_buf(),
            source,
        })?;

        toml::from_str(&content).map_err(|source| ConfigError::Parse {
            config_path: path.to_path_buf(),
            source,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::io::Write;

    #[test]
    fn compiled_default_carries_lesson_styling() {
        let config = Config::compiled_default();
        assert_eq!(
            config.headings.class_for_heading(1),
            Some("text-3xl font-bold mb-4 mt-6")
        );
        assert_eq!(
            config.lists.class_for_list(true),
            Some("list-decimal pl-6 space-y-2 mb-4")
        );
        assert_eq!(config.code.language_prefix, "language-");
        assert!(config.paragraph.class.is_some());
    }

    #[test]
    fn default_is_bare() {
        let config = Config::default();
        assert_eq!(config.headings.class_for_heading(2), None);
        assert_eq!(config.lists.class_for_list(false), None);
        assert_eq!(config.code.block_class, None);
        assert_eq!(config.code.language_prefix, "language-");
    }

    #[test]
    fn heading_levels_beyond_three_have_no_class() {
        let config = Config::compiled_default();
        assert_eq!(config.headings.class_for_heading(4), None);
        assert_eq!(config.headings.class_for_heading(0), None);
    }

    #[test]
    fn load_partial_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[paragraph]\nclass = \"prose\"\n\n[code]\nlanguage_prefix = \"lang-\"").unwrap();

        let config = Config::load(file.path()).unwrap();
        assert_eq!(config.paragraph.class.as_deref(), Some("prose"));
        assert_eq!(config.code.language_prefix, "lang-");
        assert_eq!(config.headings, HeadingsConfig::default());
    }

    #[test]
    fn load_missing_file_is_read_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = Config::load(&dir.path().join("nope.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }

    #[test]
    fn load_invalid_toml_is_parse_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[headings\nh1_class = ").unwrap();

        let err = Config::load(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
        assert!(err.to_string().starts_with("Failed to parse config file at"));
    }
}
