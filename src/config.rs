use std::path::Path;

use secrecy::SecretString;
use serde::Deserialize;
use serde_aux::field_attributes::deserialize_number_from_string;

use crate::service::QuizStrategy;

const ENV_PREFIX: &str = "TRIVIA";

#[derive(Deserialize, Debug)]
pub struct Settings {
    pub application: ApplicationSettings,
    pub database: DatabaseSettings,
    #[serde(default)]
    pub quiz: QuizSettings,
}

#[derive(Deserialize, Debug, Clone)]
pub struct ApplicationSettings {
    pub host: String,
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub port: u16,
}

impl ApplicationSettings {
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[derive(Deserialize, Debug)]
pub struct DatabaseSettings {
    pub url: SecretString,
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub max_connections: u32,
    pub create_if_missing: bool,
}

#[derive(Deserialize, Debug, Clone, Copy, Default)]
pub struct QuizSettings {
    #[serde(default)]
    pub strategy: QuizStrategy,
}

/// Reads settings from `<dir>/base.toml` (if present) and `TRIVIA__*` environment variables.
/// Environment wins over the file, the file wins over built-in defaults.
pub fn get_configuration(dir: &Path) -> Result<Settings, config::ConfigError> {
    dotenv::dotenv().ok();

    config::Config::builder()
        .set_default("application.host", "0.0.0.0")?
        .set_default("application.port", 8080_i64)?
        .set_default("database.url", "sqlite:trivia.db")?
        .set_default("database.max_connections", 5_i64)?
        .set_default("database.create_if_missing", true)?
        .add_source(config::File::from(dir.join("base.toml")).required(false))
        .add_source(
            config::Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("__")
                .separator("__")
                .try_parsing(true),
        )
        .build()?
        .try_deserialize()
}

#[cfg(test)]
mod tests {
    use secrecy::ExposeSecret;

    use super::*;

    #[test]
    fn defaults_apply_without_file() {
        let dir = tempfile::tempdir().unwrap();
        let settings = get_configuration(dir.path()).unwrap();
        assert_eq!(settings.application.port, 8080);
        assert_eq!(settings.database.max_connections, 5);
        assert!(settings.database.create_if_missing);
        assert_eq!(settings.quiz.strategy, QuizStrategy::First);
    }

    #[test]
    fn file_overrides_defaults() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("base.toml"),
            r#"
[application]
host = "127.0.0.1"
port = "9000"

[database]
url = "sqlite::memory:"
max_connections = 1
create_if_missing = false

[quiz]
strategy = "random"
"#,
        )
        .unwrap();

        let settings = get_configuration(dir.path()).unwrap();
        assert_eq!(settings.application.address(), "127.0.0.1:9000");
        assert_eq!(settings.database.url.expose_secret(), "sqlite::memory:");
        assert!(!settings.database.create_if_missing);
        assert_eq!(settings.quiz.strategy, QuizStrategy::Random);
    }
}
