//! Boot-time module configuration
//!
//! Flags are read once from the boot argument list at startup and never
//! change behavior afterwards.

/// disables the module entirely
pub const BOOTARG_OFF: &str = "-csfxoff";

/// enables verbose diagnostic logging
pub const BOOTARG_DEBUG: &str = "-csfxdbg";

/// selects the beta patch table
pub const BOOTARG_BETA: &str = "-csfxbeta";

/// read-once module configuration derived from boot arguments
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ModuleConfig {
    /// install nothing; the system runs as if the module were absent
    pub disabled: bool,
    /// emit per-call diagnostics through `log::debug!`
    pub verbose: bool,
    /// use the beta patch table instead of the release table
    pub beta: bool,
}

impl ModuleConfig {
    /// parse the recognized flags out of the boot argument list
    ///
    /// unrecognized arguments are ignored; they belong to other modules.
    pub fn from_boot_args<'a, I>(args: I) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut config = Self::default();
        for arg in args {
            match arg {
                BOOTARG_OFF => config.disabled = true,
                BOOTARG_DEBUG => config.verbose = true,
                BOOTARG_BETA => config.beta = true,
                _ => {}
            }
        }
        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ModuleConfig::from_boot_args([]);
        assert_eq!(config, ModuleConfig::default());
    }

    #[test]
    fn test_flags_parsed() {
        let config = ModuleConfig::from_boot_args(["-v", "-csfxdbg", "-csfxbeta"]);
        assert!(!config.disabled);
        assert!(config.verbose);
        assert!(config.beta);
    }

    #[test]
    fn test_off_flag() {
        let config = ModuleConfig::from_boot_args(["-csfxoff"]);
        assert!(config.disabled);
    }
}
