//! Engine settings, read through the `config` crate.
//!
//! Sources are layered: built-in defaults, then an optional file, then
//! `DEFAULTBOX_*` environment variables (e.g. `DEFAULTBOX_TAG_KEY=env`).

use config::{Config, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};

use crate::engine::DEFAULT_TAG_KEY;
use crate::error::Result;
use crate::grammar::Brackets;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub tag_key: String,
    pub brackets: Brackets,
    /// `tracing_subscriber::EnvFilter` directive used by the binary.
    pub log_filter: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            tag_key: DEFAULT_TAG_KEY.to_string(),
            brackets: Brackets::default(),
            log_filter: "info".to_string(),
        }
    }
}

impl Settings {
    /// Loads settings from `path` (format chosen by extension) if given and
    /// present, overridden by the environment.
    pub fn load(path: Option<&str>) -> Result<Self> {
        let mut builder = Config::builder();
        if let Some(path) = path {
            builder = builder.add_source(File::with_name(path).required(false));
        }
        let settings = builder
            .add_source(Environment::with_prefix("DEFAULTBOX"))
            .build()?
            .try_deserialize()?;
        Ok(settings)
    }

    pub fn from_toml(text: &str) -> Result<Self> {
        let settings = Config::builder()
            .add_source(File::from_str(text, FileFormat::Toml))
            .build()?
            .try_deserialize()?;
        Ok(settings)
    }
}
