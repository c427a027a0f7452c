//! Configuration types for the dispatch registry

/// What happens when a method is registered for a key that already has one
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverwritePolicy {
    /// Replace the previous method
    LastWriteWins,
    /// Fail with a malformed-registration error
    Reject,
}

impl Default for OverwritePolicy {
    fn default() -> Self {
        Self::LastWriteWins
    }
}

/// Registry-wide dispatch settings
#[derive(Debug, Clone)]
pub struct DispatchConfig {
    /// Answer identity-aware operations from identity predicates before table lookup
    pub identity_shortcut: bool,

    /// Re-registration behaviour
    pub overwrite: OverwritePolicy,
}

impl Default for DispatchConfig {
    fn default() -> Self {
        Self {
            identity_shortcut: true,
            overwrite: OverwritePolicy::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = DispatchConfig::default();
        assert!(config.identity_shortcut);
        assert_eq!(config.overwrite, OverwritePolicy::LastWriteWins);
    }
}
