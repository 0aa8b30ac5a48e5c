use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::cli::Cli;
use crate::decoder::DecodeStrategy;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("reading {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("parsing {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Player settings, from a JSON file and/or command-line flags
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PlayerConfig {
    pub decode: DecodeStrategy,
    /// Raw loop count override: 0 = infinite, k = k extra passes
    pub loops: Option<u32>,
    pub simulate: bool,
    pub max_ticks: Option<u64>,
    pub export_dir: Option<PathBuf>,
}

impl PlayerConfig {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_owned(),
            source,
        })?;

        Self::from_json(&text).map_err(|source| ConfigError::Json {
            path: path.to_owned(),
            source,
        })
    }

    /// Layer command-line flags over this config
    pub fn merge_cli(mut self, cli: &Cli) -> Self {
        if cli.sequential {
            self.decode = DecodeStrategy::Sequential;
        }
        if cli.loops.is_some() {
            self.loops = cli.loops;
        }
        if cli.simulate {
            self.simulate = true;
        }
        if cli.max_ticks.is_some() {
            self.max_ticks = cli.max_ticks;
        }
        if cli.export.is_some() {
            self.export_dir = cli.export.clone();
        }
        self
    }
}
