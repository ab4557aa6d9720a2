use crate::utils::is_name_fragment;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Config file not found at {0}")]
    NotFound(PathBuf),

    #[error("Failed to read config {path}: {source}")]
    ReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("Axis '{0}' must contain at least one label")]
    EmptyAxis(&'static str),

    #[error("Invalid {axis} label '{label}': must not contain whitespace, '/', '\\', '<' or '>'")]
    InvalidLabel { axis: &'static str, label: String },
}

/// Modes every golden list is checked against, before user additions
pub const DEFAULT_MODES: [&str; 4] = ["FUNC", "ATPG_SHIFT", "ATPG_STUCKAT", "ATPG_ATSPEED"];

pub const DEFAULT_PROCESS: [&str; 3] = ["FF", "SS", "TT"];

pub const DEFAULT_VOLTAGE: [&str; 3] = ["HV", "LV", "NV"];

pub const DEFAULT_TEMPERATURE: [&str; 3] = ["M40C", "125C", "25C"];

pub const DEFAULT_ENVIRONMENT: [&str; 3] = ["CBEST", "CWORST", "TYPICAL"];

/// Directory names the scanner never descends into
pub const DEFAULT_EXCLUDED_DIRS: [&str; 3] = ["__pycache__", "CVS", "lost+found"];

/// Optional axis configuration file.
///
/// Every key is optional; a present key replaces the matching default set
/// wholesale.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QosCheckConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub modes: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub process: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub voltage: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub temperature: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub environment: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exclude_dirs: Option<Vec<String>>,
}

impl QosCheckConfig {
    /// Resolve the configured axes against the built-in defaults
    pub fn axis_sets(&self) -> Result<AxisSets, ConfigError> {
        AxisSets::new(
            resolve(&self.modes, &DEFAULT_MODES),
            resolve(&self.process, &DEFAULT_PROCESS),
            resolve(&self.voltage, &DEFAULT_VOLTAGE),
            resolve(&self.temperature, &DEFAULT_TEMPERATURE),
            resolve(&self.environment, &DEFAULT_ENVIRONMENT),
        )
    }

    pub fn excluded_dirs(&self) -> BTreeSet<String> {
        resolve(&self.exclude_dirs, &DEFAULT_EXCLUDED_DIRS)
    }
}

fn resolve(configured: &Option<Vec<String>>, defaults: &[&str]) -> BTreeSet<String> {
    match configured {
        Some(labels) => labels
            .iter()
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect(),
        None => defaults.iter().map(|s| s.to_string()).collect(),
    }
}

/// The substitution axes used to expand a golden list.
///
/// Each axis is kept sorted so Cartesian products enumerate in a stable order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AxisSets {
    modes: BTreeSet<String>,
    process: BTreeSet<String>,
    voltage: BTreeSet<String>,
    temperature: BTreeSet<String>,
    environment: BTreeSet<String>,
}

impl AxisSets {
    pub fn new(
        modes: BTreeSet<String>,
        process: BTreeSet<String>,
        voltage: BTreeSet<String>,
        temperature: BTreeSet<String>,
        environment: BTreeSet<String>,
    ) -> Result<Self, ConfigError> {
        for (name, axis) in [
            ("modes", &modes),
            ("process", &process),
            ("voltage", &voltage),
            ("temperature", &temperature),
            ("environment", &environment),
        ] {
            if axis.is_empty() {
                return Err(ConfigError::EmptyAxis(name));
            }
            check_labels(name, axis.iter())?;
        }

        Ok(Self {
            modes,
            process,
            voltage,
            temperature,
            environment,
        })
    }

    /// Union user-supplied modes into the mode set. Blank labels are ignored.
    pub fn with_extra_modes<I, S>(mut self, extra: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let extra: Vec<String> = extra
            .into_iter()
            .map(|m| m.as_ref().trim().to_string())
            .filter(|m| !m.is_empty())
            .collect();
        check_labels("modes", extra.iter())?;
        self.modes.extend(extra);
        Ok(self)
    }

    pub fn modes(&self) -> &BTreeSet<String> {
        &self.modes
    }

    pub fn process(&self) -> &BTreeSet<String> {
        &self.process
    }

    pub fn voltage(&self) -> &BTreeSet<String> {
        &self.voltage
    }

    pub fn temperature(&self) -> &BTreeSet<String> {
        &self.temperature
    }

    pub fn environment(&self) -> &BTreeSet<String> {
        &self.environment
    }

    /// Number of `P_V_T_E_Mode` combinations a PVTE token expands to, or
    /// `None` if the product does not fit in a `usize`
    pub fn pvte_combination_count(&self) -> Option<usize> {
        [
            self.voltage.len(),
            self.temperature.len(),
            self.environment.len(),
            self.modes.len(),
        ]
        .into_iter()
        .try_fold(self.process.len(), usize::checked_mul)
    }
}

/// Labels end up inside file names, so they follow the block-name rules
fn check_labels<'a>(
    axis: &'static str,
    labels: impl Iterator<Item = &'a String>,
) -> Result<(), ConfigError> {
    for label in labels {
        if !is_name_fragment(label) {
            return Err(ConfigError::InvalidLabel {
                axis,
                label: label.clone(),
            });
        }
    }
    Ok(())
}

impl Default for AxisSets {
    fn default() -> Self {
        Self {
            modes: resolve(&None, &DEFAULT_MODES),
            process: resolve(&None, &DEFAULT_PROCESS),
            voltage: resolve(&None, &DEFAULT_VOLTAGE),
            temperature: resolve(&None, &DEFAULT_TEMPERATURE),
            environment: resolve(&None, &DEFAULT_ENVIRONMENT),
        }
    }
}

/// Split a comma-separated mode list, dropping blank entries
pub fn parse_mode_list(input: &str) -> Vec<String> {
    input
        .split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

/// Read an axis configuration file
pub fn read_config(config_path: &Path) -> Result<QosCheckConfig, ConfigError> {
    if !config_path.is_file() {
        return Err(ConfigError::NotFound(config_path.to_path_buf()));
    }

    let content = fs::read_to_string(config_path).map_err(|source| ConfigError::ReadError {
        path: config_path.to_path_buf(),
        source,
    })?;
    let config: QosCheckConfig = serde_json::from_str(&content)?;
    Ok(config)
}
