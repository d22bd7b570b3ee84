//! Configuration management for generation defaults.
//!
//! This module handles loading optional application configuration in
//! TOML format with platform-specific directory resolution. Every field
//! has a default, so a missing config file is never an error.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

use crate::services::matrix::ColumnGrouping;

/// Column grouping algorithm selection as persisted in the config file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum GroupingSetting {
    /// Input order.
    Seq,
    /// Left-to-right by position.
    #[default]
    Pos,
}

impl GroupingSetting {
    /// The mapper algorithm this setting selects.
    #[must_use]
    pub const fn as_grouping(self) -> ColumnGrouping {
        match self {
            Self::Seq => ColumnGrouping::Sequential,
            Self::Pos => ColumnGrouping::Position,
        }
    }
}

/// Generation defaults, overridable per run from the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerateConfig {
    /// Emit local traces and vias connecting pads to the rail stubs.
    pub routing: bool,
    /// Column grouping algorithm.
    pub column_grouping: GroupingSetting,
}

impl Default for GenerateConfig {
    fn default() -> Self {
        Self {
            routing: true,
            column_grouping: GroupingSetting::Pos,
        }
    }
}

/// Application configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    /// Generation defaults.
    pub generate: GenerateConfig,
}

impl Config {
    /// Gets the platform configuration directory for this application.
    pub fn config_dir() -> Result<PathBuf> {
        let base = dirs::config_dir().context("Could not determine config directory")?;
        Ok(base.join("matrixpcb"))
    }

    /// Loads the configuration file, falling back to defaults when the
    /// file does not exist.
    pub fn load() -> Result<Self> {
        let path = Self::config_dir()?.join("config.toml");
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        Self::parse(&content)
    }

    /// Parses a configuration document.
    pub fn parse(content: &str) -> Result<Self> {
        toml::from_str(content).context("Failed to parse config file")
    }
}
