use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::PathBuf;

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub mongodb_uri: String,
    pub host: String,
    pub port: u16,
    /// Deployment environment, `production` also serves the built client
    pub node_env: String,
    pub static_dir: PathBuf,
}

type Builder = config::ConfigBuilder<config::builder::DefaultState>;

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        Self::defaults()?
            // Load from config/catalog.toml
            .add_source(File::with_name("config/catalog").required(false))
            // Override from environment (e.g., MONGODB_URI, PORT, NODE_ENV)
            .add_source(Environment::default().try_parsing(true).ignore_empty(true))
            .build()?
            .try_deserialize()
    }

    fn defaults() -> Result<Builder, ConfigError> {
        Config::builder()
            .set_default("mongodb_uri", "mongodb://localhost:27017/real-estate")?
            .set_default("host", "0.0.0.0")?
            .set_default("port", 7000)?
            .set_default("node_env", "development")?
            .set_default("static_dir", "client-app/dist")
    }

    pub fn is_production(&self) -> bool {
        self.node_env.eq_ignore_ascii_case("production")
    }

    pub fn listen_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
