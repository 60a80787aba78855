//! Server settings read from the environment (and `.env` via dotenvy)

use mybgg_core::options::GAMES_PER_PAGE;

pub const DEFAULT_DATABASE: &str = "mybgg.sqlite";
pub const DEFAULT_BIND_ADDRESS: &str = "0.0.0.0:8080";

#[derive(Debug, Clone, PartialEq)]
pub struct ServerConfig {
    pub database_path: String,
    pub bind_address: String,
    pub games_per_page: usize,
}

impl ServerConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup; unset or unparseable values keep their defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let games_per_page = match lookup("GAMES_PER_PAGE") {
            Some(raw) => match raw.trim().parse::<usize>() {
                Ok(n) if n > 0 => n,
                _ => {
                    tracing::warn!("Ignoring invalid GAMES_PER_PAGE={:?}", raw);
                    GAMES_PER_PAGE
                }
            },
            None => GAMES_PER_PAGE,
        };

        Self {
            database_path: lookup("MYBGG_DATABASE").unwrap_or_else(|| DEFAULT_DATABASE.to_string()),
            bind_address: lookup("BIND_ADDRESS").unwrap_or_else(|| DEFAULT_BIND_ADDRESS.to_string()),
            games_per_page,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_when_unset() {
        let config = ServerConfig::from_lookup(|_| None);
        assert_eq!(config.database_path, "mybgg.sqlite");
        assert_eq!(config.bind_address, "0.0.0.0:8080");
        assert_eq!(config.games_per_page, 60);
    }

    #[test]
    fn reads_overrides_and_rejects_bad_page_size() {
        let config = ServerConfig::from_lookup(|key| match key {
            "MYBGG_DATABASE" => Some("/srv/games.sqlite".into()),
            "GAMES_PER_PAGE" => Some("0".into()),
            _ => None,
        });
        assert_eq!(config.database_path, "/srv/games.sqlite");
        assert_eq!(config.games_per_page, 60);

        let config = ServerConfig::from_lookup(|key| (key == "GAMES_PER_PAGE").then(|| "24".into()));
        assert_eq!(config.games_per_page, 24);
    }
}
