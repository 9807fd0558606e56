use config::{Config, ConfigError, File};
use serde::Deserialize;
use std::path::Path;

use crate::error::IslandsResult;

/// Optional settings file looked up in the working directory
pub const CONFIG_FILE_NAME: &str = "settings.toml";

#[derive(Debug, Clone, Deserialize)]
pub struct Database {
    pub path: String,
    pub pool_size: u32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Trend {
    /// Multiplier applied to a post's view count in its trend score
    pub view_weight: f64,
    /// Sort trending posts by score
    pub ranked: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WordCloud {
    pub max_words: usize,
    pub bar_width: usize,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub database: Database,
    pub trend: Trend,
    pub wordcloud: WordCloud,
}

impl Settings {
    pub fn new() -> IslandsResult<Self> {
        Self::load(Path::new(CONFIG_FILE_NAME))
    }

    /// Defaults, then `config_file` if it exists, then environment overrides
    pub fn load(config_file: &Path) -> IslandsResult<Self> {
        Self::load_with_env(config_file, |key| std::env::var(key).ok())
    }

    fn load_with_env<F>(config_file: &Path, env: F) -> IslandsResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut builder = Config::builder()
            .set_default("database.path", "islands.db")?
            .set_default("database.pool_size", 4)?
            .set_default("trend.view_weight", 1.0)?
            .set_default("trend.ranked", true)?
            .set_default("wordcloud.max_words", 30)?
            .set_default("wordcloud.bar_width", 40)?;

        if config_file.exists() {
            tracing::debug!(path = %config_file.display(), "Loading settings file");
            builder = builder.add_source(File::from(config_file).required(false));
        }

        // Environment variables take priority over the file
        if let Some(db_path) = env("ISLANDS_DATABASE_PATH") {
            builder = builder.set_override("database.path", db_path)?;
        }
        if let Some(weight) = env("ISLANDS_VIEW_WEIGHT") {
            builder = builder.set_override("trend.view_weight", weight)?;
        }

        let settings: Settings = builder.build()?.try_deserialize()?;
        settings.validate()?;
        Ok(settings)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if !self.trend.view_weight.is_finite() || self.trend.view_weight < 0.0 {
            return Err(ConfigError::Message(format!(
                "trend.view_weight must be a non-negative number, got {}",
                self.trend.view_weight
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;

    fn no_env(_: &str) -> Option<String> {
        None
    }

    #[test]
    fn test_defaults_without_file() {
        let settings = Settings::load_with_env(Path::new("does-not-exist.toml"), no_env).unwrap();
        assert_eq!(settings.database.path, "islands.db");
        assert_eq!(settings.trend.view_weight, 1.0);
        assert_eq!(settings.database.pool_size, 4);
        assert!(settings.trend.ranked);
        assert_eq!(settings.wordcloud.max_words, 30);
    }

    #[test]
    fn test_file_overrides_defaults() {
        let mut file = tempfile::Builder::new()
            .suffix(".toml")
            .tempfile()
            .unwrap();
        writeln!(
            file,
            "[trend]\nview_weight = 0.5\nranked = false\n\n[wordcloud]\nmax_words = 10"
        )
        .unwrap();

        let settings = Settings::load_with_env(file.path(), no_env).unwrap();
        assert_eq!(settings.trend.view_weight, 0.5);
        assert!(!settings.trend.ranked);
        assert_eq!(settings.wordcloud.max_words, 10);
        assert_eq!(settings.wordcloud.bar_width, 40);
    }

    #[test]
    fn test_negative_weight_rejected() {
        let mut file = tempfile::Builder::new()
            .suffix(".toml")
            .tempfile()
            .unwrap();
        writeln!(file, "[trend]\nview_weight = -1.0").unwrap();

        assert!(Settings::load_with_env(file.path(), no_env).is_err());
    }

    #[test]
    fn test_environment_overrides_file() {
        let mut file = tempfile::Builder::new()
            .suffix(".toml")
            .tempfile()
            .unwrap();
        writeln!(file, "[database]\npath = \"from-file.db\"\n\n[trend]\nview_weight = 2.0").unwrap();

        let env: HashMap<&str, &str> = [
            ("ISLANDS_DATABASE_PATH", ":memory:"),
            ("ISLANDS_VIEW_WEIGHT", "0.5"),
        ]
        .into_iter()
        .collect();
        let settings =
            Settings::load_with_env(file.path(), |key| env.get(key).map(|v| v.to_string())).unwrap();

        assert_eq!(settings.database.path, ":memory:");
        assert_eq!(settings.trend.view_weight, 0.5);
    }
}
