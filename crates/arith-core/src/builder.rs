//! Builder for configured registries

use crate::{DispatchConfig, OverwritePolicy, Registry};

/// Fluent construction of a [`Registry`]
///
/// ```rust
/// use arith_core::{OverwritePolicy, Registry};
///
/// let registry = Registry::builder()
///     .with_overwrite_policy(OverwritePolicy::Reject)
///     .build();
/// assert!(registry.has_operation("add"));
/// ```
#[derive(Debug, Clone)]
pub struct RegistryBuilder {
    config: DispatchConfig,
    standard_operations: bool,
}

impl RegistryBuilder {
    pub fn new() -> Self {
        Self {
            config: DispatchConfig::default(),
            standard_operations: true,
        }
    }

    /// Enable or disable the identity-element short-circuit
    pub fn with_identity_shortcut(mut self, enabled: bool) -> Self {
        self.config.identity_shortcut = enabled;
        self
    }

    pub fn with_overwrite_policy(mut self, policy: OverwritePolicy) -> Self {
        self.config.overwrite = policy;
        self
    }

    pub fn with_config(mut self, config: DispatchConfig) -> Self {
        self.config = config;
        self
    }

    /// Start with no operations defined at all
    pub fn without_standard_operations(mut self) -> Self {
        self.standard_operations = false;
        self
    }

    pub fn build(self) -> Registry {
        if self.standard_operations {
            Registry::with_config(self.config)
        } else {
            Registry::empty(self.config)
        }
    }
}

impl Default for RegistryBuilder {
    fn default() -> Self {
        Self::new()
    }
}
