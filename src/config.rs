use crate::error::{Result, UserqlError};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const CONFIG_FILE_NAME: &str = ".userql.yml";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerSettings,

    #[serde(default)]
    pub database: DatabaseSettings,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerSettings {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    4000
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl ServerSettings {
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DatabaseKind {
    #[default]
    Postgres,
    Sqlite,
}

impl DatabaseKind {
    pub fn from_url(url: &str) -> Result<Self> {
        if url.starts_with("postgres://") || url.starts_with("postgresql://") {
            Ok(DatabaseKind::Postgres)
        } else if url.starts_with("sqlite:") {
            Ok(DatabaseKind::Sqlite)
        } else {
            Err(UserqlError::UnsupportedDatabase(url.to_string()))
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseSettings {
    #[serde(default, rename = "type")]
    pub kind: DatabaseKind,

    #[serde(default = "default_db_host")]
    pub host: String,

    #[serde(default = "default_db_port")]
    pub port: u16,

    #[serde(default = "default_username")]
    pub username: String,

    #[serde(default)]
    pub password: String,

    #[serde(default = "default_database")]
    pub database: String,

    /// Full connection URL; takes precedence over the discrete fields.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,

    #[serde(default = "default_max_connections")]
    pub max_connections: u32,

    /// Create the `user` table on boot if it is missing.
    #[serde(default = "default_true")]
    pub synchronize: bool,

    /// Log every SQL statement.
    #[serde(default = "default_true")]
    pub logging: bool,
}

fn default_db_host() -> String {
    "localhost".to_string()
}

fn default_db_port() -> u16 {
    5432
}

fn default_username() -> String {
    "postgres".to_string()
}

fn default_database() -> String {
    "postgres".to_string()
}

fn default_max_connections() -> u32 {
    5
}

fn default_true() -> bool {
    true
}

impl Default for DatabaseSettings {
    fn default() -> Self {
        Self {
            kind: DatabaseKind::default(),
            host: default_db_host(),
            port: default_db_port(),
            username: default_username(),
            password: String::new(),
            database: default_database(),
            url: None,
            max_connections: default_max_connections(),
            synchronize: default_true(),
            logging: default_true(),
        }
    }
}

impl DatabaseSettings {
    /// Settings for a private in-memory SQLite database.
    pub fn in_memory() -> Self {
        Self {
            kind: DatabaseKind::Sqlite,
            url: Some("sqlite::memory:".to_string()),
            logging: false,
            ..Self::default()
        }
    }

    pub fn connection_url(&self) -> String {
        if let Some(url) = &self.url {
            return url.clone();
        }
        match self.kind {
            DatabaseKind::Postgres => {
                let credentials = if self.password.is_empty() {
                    self.username.clone()
                } else {
                    format!("{}:{}", self.username, self.password)
                };
                format!(
                    "postgres://{}@{}:{}/{}",
                    credentials, self.host, self.port, self.database
                )
            }
            DatabaseKind::Sqlite => format!("sqlite://{}?mode=rwc", self.database),
        }
    }

    pub fn resolved_kind(&self) -> Result<DatabaseKind> {
        match &self.url {
            Some(url) => DatabaseKind::from_url(url),
            None => Ok(self.kind),
        }
    }

    pub fn is_in_memory(&self) -> bool {
        self.connection_url().contains(":memory:")
    }
}

impl AppConfig {
    /// Load configuration from an explicit path, or search upward from
    /// `start_path` for `.userql.yml`. Falls back to defaults when no file
    /// is found.
    pub fn load(explicit: Option<&Path>, start_path: &Path) -> Result<Self> {
        let config_path = match explicit {
            Some(path) => {
                if !path.exists() {
                    return Err(UserqlError::Config(format!(
                        "Config file not found: {}",
                        path.display()
                    )));
                }
                Some(path.to_path_buf())
            }
            None => Self::find_config_file(start_path),
        };

        match config_path {
            Some(path) => {
                tracing::debug!(path = %path.display(), "Loading config");
                Self::from_file(&path)
            }
            None => Ok(Self::default()),
        }
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    pub fn from_yaml(content: &str) -> Result<Self> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(content)?)
    }

    pub fn find_config_file(start_path: &Path) -> Option<PathBuf> {
        let mut current = start_path.to_path_buf();
        loop {
            let config_path = current.join(CONFIG_FILE_NAME);
            if config_path.exists() {
                return Some(config_path);
            }
            if !current.pop() {
                return None;
            }
        }
    }

    #[cfg(test)]
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = serde_yaml::to_string(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}
