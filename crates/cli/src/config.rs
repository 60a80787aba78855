//! Configuration management using config.toml

use mybgg_core::options::GAMES_PER_PAGE;
use mybgg_core::{CatalogError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

pub const CONFIG_PATH: &str = "config.toml";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Heading shown above the listing
    pub title: String,

    /// SQLite file exported by the collection indexer
    pub database_path: String,

    pub games_per_page: usize,

    /// BGG account the collection belongs to
    pub bgg_username: String,

    /// `owner/repo` hosting the published catalog
    pub github_repo: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            title: "MyBGG".to_string(),
            database_path: "mybgg.sqlite".to_string(),
            games_per_page: GAMES_PER_PAGE,
            bgg_username: String::new(),
            github_repo: String::new(),
        }
    }
}

impl Config {
    /// Load config from `path`, creating a default file if it doesn't exist
    pub fn load(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        if path.exists() {
            match fs::read_to_string(path) {
                Ok(content) => match Self::parse(&content) {
                    Ok(config) => return config,
                    Err(e) => tracing::warn!("Error parsing {}: {}", path.display(), e),
                },
                Err(e) => tracing::warn!("Error reading {}: {}", path.display(), e),
            }
            return Config::default();
        }

        let config = Config::default();
        if let Err(e) = config.save(path) {
            tracing::debug!("Could not write default {}: {}", path.display(), e);
        }
        config
    }

    pub fn parse(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| CatalogError::Config(e.to_string()))
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let content = toml::to_string_pretty(self).map_err(|e| CatalogError::Config(e.to_string()))?;
        fs::write(path, content)?;
        Ok(())
    }

    /// Link to the user's collection on boardgamegeek.com
    pub fn collection_url(&self) -> Option<String> {
        let user = self.bgg_username.trim();
        (!user.is_empty()).then(|| format!("https://boardgamegeek.com/collection/user/{}", user))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_fields_take_defaults() {
        let config = Config::parse("bgg_username = \"alice\"\n").unwrap();
        assert_eq!(config.bgg_username, "alice");
        assert_eq!(config.title, "MyBGG");
        assert_eq!(config.games_per_page, 60);
        assert_eq!(
            config.collection_url().as_deref(),
            Some("https://boardgamegeek.com/collection/user/alice")
        );
    }

    #[test]
    fn invalid_toml_is_a_config_error() {
        assert!(matches!(Config::parse("title = "), Err(CatalogError::Config(_))));
    }

    #[test]
    fn save_then_load_round_trips() {
        let path = std::env::temp_dir().join(format!("mybgg-config-{}.toml", std::process::id()));
        let config = Config {
            title: "Shelf".into(),
            games_per_page: 24,
            ..Default::default()
        };
        config.save(&path).unwrap();
        assert_eq!(Config::load(&path), config);
        std::fs::remove_file(&path).unwrap();
    }
}
