use std::collections::BTreeSet;

use anyhow::{Context, Result};
use mountpoint_core::ContainerConfig;
use serde::Deserialize;

#[derive(Clone, Default, Deserialize, Debug)]
#[serde(default)]
pub struct Config {
    pub container: Container,
    pub log: Log,
}

#[derive(Clone, Deserialize, Debug)]
#[serde(default, rename_all = "kebab-case")]
pub struct Container {
    pub tag: String,
    pub class: String,
}

impl Default for Container {
    fn default() -> Self {
        let ContainerConfig { tag, class } = ContainerConfig::default();
        Self { tag, class }
    }
}

#[derive(Clone, Default, Deserialize, Debug)]
#[serde(default, rename_all = "kebab-case")]
pub struct Log {
    pub level: Level,
}

#[derive(Clone, Copy, Default, PartialEq, Eq, Deserialize, Debug)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl From<Level> for log::Level {
    fn from(level: Level) -> Self {
        match level {
            Level::Error => Self::Error,
            Level::Warn => Self::Warn,
            Level::Info => Self::Info,
            Level::Debug => Self::Debug,
            Level::Trace => Self::Trace,
        }
    }
}

impl Config {
    /// Parses a TOML config, returning it along with any keys that were not recognized.
    ///
    /// Logging is usually configured by the result, so unused keys are handed back for the
    /// caller to report once a logger is installed.
    pub fn parse(contents: &str) -> Result<(Self, BTreeSet<String>)> {
        let mut unused = BTreeSet::new();
        let config: Self =
            serde_ignored::deserialize(toml::Deserializer::new(contents), |path| {
                unused.insert(path.to_string());
            })
            .context("invalid mountpoint config")?;
        Ok((config, unused))
    }

    pub fn container(&self) -> ContainerConfig {
        ContainerConfig {
            tag: self.container.tag.clone(),
            class: self.container.class.clone(),
        }
    }
}
