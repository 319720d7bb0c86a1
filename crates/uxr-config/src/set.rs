//! # Configuration Set — Multi-Display Routing
//!
//! A vehicle with several displays carries one [`Configuration`] per
//! physical display port. [`ConfigurationSet`] validates the list as a unit:
//!
//! - The list is non-empty.
//! - With more than one configuration, all share the same content-limit
//!   parameters, every configuration names a physical port, and no port
//!   appears twice.
//!
//! A lone configuration may omit its port; it then applies to whichever
//! port the caller designates as the default display.

use std::collections::{BTreeMap, BTreeSet};

use uxr_core::ConfigError;

use crate::configuration::Configuration;

/// Validated per-display configurations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigurationSet {
    configs: Vec<Configuration>,
}

impl ConfigurationSet {
    /// Validate `configs` as a set.
    ///
    /// # Errors
    ///
    /// - `ConfigError::EmptyConfigurationSet`: `configs` is empty.
    /// - `ConfigError::MismatchedParameters`: content limits differ.
    /// - `ConfigError::MissingPhysicalPort`: a configuration has no port
    ///   while others are present.
    /// - `ConfigError::DuplicatePhysicalPort`: two configurations share a port.
    pub fn new(configs: Vec<Configuration>) -> Result<Self, ConfigError> {
        let Some(first) = configs.first() else {
            return Err(ConfigError::EmptyConfigurationSet);
        };
        if configs.len() > 1 {
            if !configs.iter().all(|c| c.has_same_parameters(first)) {
                return Err(ConfigError::MismatchedParameters);
            }
            let mut ports = BTreeSet::new();
            for config in &configs {
                let port = config
                    .physical_port()
                    .ok_or(ConfigError::MissingPhysicalPort)?;
                if !ports.insert(port) {
                    return Err(ConfigError::DuplicatePhysicalPort(port));
                }
            }
        }
        Ok(Self { configs })
    }

    /// The configurations in their original order.
    pub fn configs(&self) -> &[Configuration] {
        &self.configs
    }

    /// Number of configurations.
    pub fn len(&self) -> usize {
        self.configs.len()
    }

    /// Always false; an empty set cannot be constructed.
    pub fn is_empty(&self) -> bool {
        self.configs.is_empty()
    }

    /// Map each physical port to its configuration.
    ///
    /// A single configuration without a port is keyed by `default_port`.
    pub fn by_port(&self, default_port: u8) -> BTreeMap<u8, &Configuration> {
        self.configs
            .iter()
            .map(|config| (config.physical_port().unwrap_or(default_port), config))
            .collect()
    }

    /// The configuration for `port`, if any.
    pub fn for_port(&self, port: u8, default_port: u8) -> Option<&Configuration> {
        self.configs
            .iter()
            .find(|config| config.physical_port().unwrap_or(default_port) == port)
    }
}
