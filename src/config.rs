use std::ffi::OsString;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use serde::Deserialize;

use crate::model::Rating;
use crate::validate::DEFAULT_TIME_ESTIMATE;

pub const DEFAULT_TITLE: &str = "Welcome back.";
pub const DEFAULT_SUBTITLE: &str = "Let's get started with your tasks.";
pub const DEFAULT_TICK_RATE_MS: u64 = 250;

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default)]
    pub header: HeaderConfig,
    #[serde(default)]
    pub form: FormConfig,
    #[serde(default)]
    pub ui: UiConfig,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct HeaderConfig {
    pub title: Option<String>,
    pub subtitle: Option<String>,
}

/// Initial values of the creation form.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FormConfig {
    pub importance: Option<u8>,
    pub difficulty: Option<u8>,
    pub time_estimate: Option<f64>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UiConfig {
    pub tick_rate_ms: Option<u64>,
}

impl HeaderConfig {
    pub fn title(&self) -> &str {
        self.title.as_deref().unwrap_or(DEFAULT_TITLE)
    }

    pub fn subtitle(&self) -> &str {
        self.subtitle.as_deref().unwrap_or(DEFAULT_SUBTITLE)
    }
}

impl FormConfig {
    pub fn importance(&self) -> Rating {
        self.importance.and_then(Rating::new).unwrap_or_default()
    }

    pub fn difficulty(&self) -> Rating {
        self.difficulty.and_then(Rating::new).unwrap_or_default()
    }

    pub fn time_estimate(&self) -> f64 {
        self.time_estimate.unwrap_or(DEFAULT_TIME_ESTIMATE)
    }
}

impl UiConfig {
    pub fn tick_rate_ms(&self) -> u64 {
        self.tick_rate_ms.unwrap_or(DEFAULT_TICK_RATE_MS)
    }
}

/// `$HOME/.taskdeck/config.toml`, or `None` when `HOME` is unset.
pub fn default_path() -> Option<PathBuf> {
    config_path_under(std::env::var_os("HOME"))
}

fn config_path_under(home: Option<OsString>) -> Option<PathBuf> {
    home.map(|h| PathBuf::from(h).join(".taskdeck").join("config.toml"))
}

impl Config {
    /// Load config from `path`, or from the default location when `None`.
    /// A missing file, or no home directory to look in, yields the default config.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        Self::load_resolved(path.map(Path::to_path_buf).or_else(default_path))
    }

    fn load_resolved(path: Option<PathBuf>) -> Result<Self> {
        match path {
            Some(p) => Self::load_from(&p),
            None => Ok(Config::default()),
        }
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let config: Config = match std::fs::read_to_string(path) {
            Ok(contents) => toml::from_str(&contents)
                .with_context(|| format!("failed to parse {}", path.display()))?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Config::default()),
            Err(e) => return Err(e).with_context(|| format!("failed to read {}", path.display())),
        };
        config.validate(path)?;
        Ok(config)
    }

    fn validate(&self, path: &Path) -> Result<()> {
        for (key, value) in [
            ("form.importance", self.form.importance),
            ("form.difficulty", self.form.difficulty),
        ] {
            if let Some(v) = value {
                if Rating::new(v).is_none() {
                    bail!("{}: {key} = {v} is out of range (1-5)", path.display());
                }
            }
        }
        if let Some(hours) = self.form.time_estimate {
            if !hours.is_finite() || hours < 0.0 {
                bail!(
                    "{}: form.time_estimate must be a non-negative number",
                    path.display()
                );
            }
        }
        if self.ui.tick_rate_ms == Some(0) {
            bail!("{}: ui.tick_rate_ms must be greater than 0", path.display());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_config(contents: &str) -> tempfile::NamedTempFile {
        let mut f = tempfile::NamedTempFile::new().unwrap();
        f.write_all(contents.as_bytes()).unwrap();
        f
    }

    #[test]
    fn missing_file_returns_default() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_from(&dir.path().join("nope.toml")).unwrap();
        assert_eq!(config.header.title(), DEFAULT_TITLE);
        assert_eq!(config.header.subtitle(), DEFAULT_SUBTITLE);
        assert_eq!(config.form.importance(), Rating::DEFAULT);
        assert_eq!(config.form.time_estimate(), 0.5);
        assert_eq!(config.ui.tick_rate_ms(), DEFAULT_TICK_RATE_MS);
    }

    #[test]
    fn no_home_means_defaults() {
        assert!(config_path_under(None).is_none());
        let config = Config::load_resolved(config_path_under(None)).unwrap();
        assert_eq!(config.header.title(), DEFAULT_TITLE);
        assert_eq!(config.ui.tick_rate_ms(), DEFAULT_TICK_RATE_MS);
    }

    #[test]
    fn home_config_location() {
        assert_eq!(
            config_path_under(Some("/home/sam".into())),
            Some(PathBuf::from("/home/sam/.taskdeck/config.toml"))
        );
    }

    #[test]
    fn explicit_path_wins() {
        let f = write_config("[header]\ntitle = \"Explicit\"\n");
        let config = Config::load(Some(f.path())).unwrap();
        assert_eq!(config.header.title(), "Explicit");
    }

    #[test]
    fn full_config() {
        let f = write_config(
            r#"
[header]
title = "Hello, Sam"
subtitle = "Three things today."

[form]
importance = 5
difficulty = 1
time_estimate = 2.0

[ui]
tick_rate_ms = 100
"#,
        );
        let config = Config::load_from(f.path()).unwrap();
        assert_eq!(config.header.title(), "Hello, Sam");
        assert_eq!(config.header.subtitle(), "Three things today.");
        assert_eq!(config.form.importance().get(), 5);
        assert_eq!(config.form.difficulty().get(), 1);
        assert_eq!(config.form.time_estimate(), 2.0);
        assert_eq!(config.ui.tick_rate_ms(), 100);
    }

    #[test]
    fn partial_header_keeps_defaults() {
        let f = write_config("[header]\ntitle = \"Hi\"\n");
        let config = Config::load_from(f.path()).unwrap();
        assert_eq!(config.header.title(), "Hi");
        assert_eq!(config.header.subtitle(), DEFAULT_SUBTITLE);
    }

    #[test]
    fn out_of_range_rating_rejected() {
        let f = write_config("[form]\nimportance = 7\n");
        let err = Config::load_from(f.path()).unwrap_err();
        assert!(err.to_string().contains("form.importance"), "{err}");
    }

    #[test]
    fn negative_estimate_rejected() {
        let f = write_config("[form]\ntime_estimate = -1.0\n");
        assert!(Config::load_from(f.path()).is_err());
    }

    #[test]
    fn zero_tick_rate_rejected() {
        let f = write_config("[ui]\ntick_rate_ms = 0\n");
        assert!(Config::load_from(f.path()).is_err());
    }

    #[test]
    fn unknown_field_rejected() {
        let f = write_config("[header]\ncolour = \"blue\"\n");
        assert!(Config::load_from(f.path()).is_err());
    }

    #[test]
    fn malformed_toml_rejected() {
        let f = write_config("[header\n");
        let err = Config::load_from(f.path()).unwrap_err();
        assert!(format!("{err:#}").contains("failed to parse"));
    }
}
