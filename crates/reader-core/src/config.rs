use std::{env, fs, path::Path, path::PathBuf};

use directories::ProjectDirs;
use serde::Deserialize;
use tracing::{info, warn};

use crate::error::ConfigError;

pub const QUALIFIER: &str = "com";
pub const ORGANIZATION: &str = "quillify";
pub const APPLICATION: &str = "quillify";

pub const BACKEND_URL_ENV: &str = "QUILLIFY_BACKEND_URL";
pub const ANON_KEY_ENV: &str = "QUILLIFY_ANON_KEY";

pub fn config_root() -> Option<PathBuf> {
    ProjectDirs::from(QUALIFIER, ORGANIZATION, APPLICATION).map(|p| p.config_dir().to_path_buf())
}

pub fn config_path() -> Option<PathBuf> {
    config_root().map(|dir| dir.join("config.toml"))
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub backend: BackendConfig,
    pub reader: ReaderConfig,
    pub shelf: ShelfConfig,
    pub speech: SpeechConfig,
    pub theme: ThemeConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct BackendConfig {
    pub url: String,
    pub anon_key: String,
    pub timeout_secs: u64,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            url: String::new(),
            anon_key: String::new(),
            timeout_secs: 20,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ReaderConfig {
    pub font_size: u16,
    pub column_width: u16,
}

impl Default for ReaderConfig {
    fn default() -> Self {
        Self {
            font_size: crate::session::DEFAULT_FONT_SIZE,
            column_width: 72,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ShelfConfig {
    pub title_terms: Vec<String>,
    pub limit: usize,
}

impl Default for ShelfConfig {
    fn default() -> Self {
        Self {
            title_terms: vec!["joy".into(), "gold".into()],
            limit: 2,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SpeechConfig {
    /// Program and leading arguments; the text to speak is appended last.
    pub command: Vec<String>,
    pub voice_flag: Option<String>,
    pub voices_command: Vec<String>,
    pub preferred_voices: Vec<String>,
}

impl Default for SpeechConfig {
    fn default() -> Self {
        let (command, voices_command) = if cfg!(target_os = "macos") {
            (vec!["say".into()], vec!["say".into(), "-v".into(), "?".into()])
        } else {
            (
                vec!["espeak-ng".into()],
                vec!["espeak-ng".into(), "--voices".into()],
            )
        };
        Self {
            command,
            voice_flag: Some("-v".into()),
            voices_command,
            preferred_voices: crate::speech::DEFAULT_VOICE_PREFERENCES
                .iter()
                .map(|s| s.to_string())
                .collect(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ThemeConfig {
    pub name: Option<String>,
    pub header_bg: Option<String>,
    pub header_fg: Option<String>,
    pub footer_bg: Option<String>,
    pub footer_fg: Option<String>,
    pub highlight_bg: Option<String>,
}

impl Config {
    /// Reads `config.toml` from the config dir, then applies env overrides.
    pub fn load() -> Result<Self, ConfigError> {
        let mut config = match config_path() {
            Some(path) if path.exists() => Self::from_file(&path)?,
            Some(path) => {
                info!("{} not found, using defaults", path.display());
                Self::default()
            }
            None => {
                warn!("No config directory available, using defaults");
                Self::default()
            }
        };
        config.apply_env(|key| env::var(key).ok());
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path)?;
        Self::parse(&text)
    }

    pub fn parse(text: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(text)?)
    }

    pub fn apply_env<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup(BACKEND_URL_ENV).filter(|s| !s.trim().is_empty()) {
            self.backend.url = url.trim().to_string();
        }
        if let Some(key) = lookup(ANON_KEY_ENV).filter(|s| !s.trim().is_empty()) {
            self.backend.anon_key = key.trim().to_string();
        }
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn missing_sections_fall_back_to_defaults() {
        let config = Config::parse("[backend]\nurl = \"https://db.example\"\n").unwrap();
        assert_eq!(config.backend.url, "https://db.example");
        assert_eq!(config.backend.timeout_secs, 20);
        assert_eq!(config.reader.font_size, 16);
        assert_eq!(config.shelf.title_terms, vec!["joy", "gold"]);
        assert_eq!(config.shelf.limit, 2);
        assert_eq!(
            config.speech.preferred_voices,
            vec!["Google", "Microsoft", "Samantha"]
        );
    }

    #[test]
    fn reads_config_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "[shelf]\ntitle_terms = [\"sea\"]\nlimit = 5\n\n[theme]\nname = \"gruvbox\""
        )
        .unwrap();
        let config = Config::from_file(file.path()).unwrap();
        assert_eq!(config.shelf.title_terms, vec!["sea"]);
        assert_eq!(config.shelf.limit, 5);
        assert_eq!(config.theme.name.as_deref(), Some("gruvbox"));
    }

    #[test]
    fn malformed_config_is_an_error() {
        assert!(matches!(
            Config::parse("[reader\nfont_size = 3"),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn env_overrides_backend_credentials() {
        let mut config = Config::default();
        config.apply_env(|key| match key {
            BACKEND_URL_ENV => Some(" https://env.example ".into()),
            ANON_KEY_ENV => Some("secret".into()),
            _ => None,
        });
        assert_eq!(config.backend.url, "https://env.example");
        assert_eq!(config.backend.anon_key, "secret");
    }
}
