//! TOML configuration. Every field has a default; CLI flags override.

use crate::charset::{expand_all, DEFAULT_CHARSET};
use crate::matcher::RemovePolicy;
use crate::output::{OutputFormat, DEFAULT_HTML_FONT};
use crate::{PicasciiError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Characters per row; `None` picks the session default.
    pub resolution: Option<u32>,
    /// Charset expressions (`all`, `space`, `x`, `a-z`).
    pub charset: Vec<String>,
    pub font: PathBuf,
    pub remove_policy: RemovePolicy,
    pub output: OutputFormat,
    pub html_font: String,
    pub invert: bool,
}

impl Default for Config {
    fn default() -> Self {
        let (first, last) = (*DEFAULT_CHARSET.start(), *DEFAULT_CHARSET.end());
        Self {
            resolution: None,
            charset: vec![format!("{first}-{last}")],
            font: PathBuf::from("assets/DejaVuSansMono.ttf"),
            remove_policy: RemovePolicy::default(),
            output: OutputFormat::default(),
            html_font: DEFAULT_HTML_FONT.to_string(),
            invert: false,
        }
    }
}

impl Config {
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&text)
            .map_err(|e| PicasciiError::Config(format!("{}: {e}", path.display())))?;
        log::debug!("loaded config from {}", path.display());
        Ok(config)
    }

    pub fn from_toml_str(text: &str) -> Result<Self> {
        toml::from_str(text).map_err(|e| PicasciiError::Config(e.to_string()))
    }

    /// Expanded charset, in first-seen order.
    pub fn charset_chars(&self) -> Result<Vec<char>> {
        expand_all(&self.charset)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn defaults() {
        let config = Config::default();
        assert_eq!(config.charset_chars().unwrap(), ('0'..='9').collect::<Vec<_>>());
        assert_eq!(config.remove_policy, RemovePolicy::AlwaysInvalidate);
        assert_eq!(config.output, OutputFormat::Console);
        assert_eq!(config.resolution, None);
    }

    #[test]
    fn partial_file_keeps_defaults() {
        let config = Config::from_toml_str(
            r#"
            resolution = 64
            charset = ["space", "a-c", "@"]
            remove_policy = "invalidate_if_present"
            output = "html"
            "#,
        )
        .unwrap();
        assert_eq!(config.resolution, Some(64));
        assert_eq!(config.charset_chars().unwrap(), vec![' ', 'a', 'b', 'c', '@']);
        assert_eq!(config.remove_policy, RemovePolicy::InvalidateIfPresent);
        assert_eq!(config.output, OutputFormat::Html);
        assert_eq!(config.html_font, DEFAULT_HTML_FONT);
    }

    #[test]
    fn unknown_keys_and_bad_values_fail() {
        assert!(matches!(Config::from_toml_str("colour = true"), Err(PicasciiError::Config(_))));
        assert!(matches!(Config::from_toml_str("output = \"pdf\""), Err(PicasciiError::Config(_))));
    }

    #[test]
    fn load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "invert = true\nfont = \"fonts/mono.ttf\"").unwrap();
        let config = Config::load(file.path()).unwrap();
        assert!(config.invert);
        assert_eq!(config.font, PathBuf::from("fonts/mono.ttf"));
    }

    #[test]
    fn missing_file_is_io_error() {
        assert!(matches!(Config::load("/no/such/picascii.toml"), Err(PicasciiError::Io(_))));
    }
}
