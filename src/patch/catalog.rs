//! Built-in patch tables

use crate::config::ModuleConfig;

use super::rule::PatchRule;

/// SidecarCore framework binary, when present as a standalone file
const SIDECAR_CORE_PATH: &str =
    "/System/Library/PrivateFrameworks/SidecarCore.framework/Versions/A/SidecarCore";

/// pre-Big Sur dyld shared cache; the target library may be packed here
/// instead of existing on its own
const DYLD_CACHE_PATH: &str = "/private/var/db/dyld/dyld_shared_cache_x86_64h";

/// Big Sur moved the shared cache
const BIG_SUR_DYLD_CACHE_PATH: &str = "/System/Library/dyld/dyld_shared_cache_x86_64h";

/// AMD Bronze Metal driver binary
const AMD_BRONZE_MTL_PATH: &str =
    "/System/Library/Extensions/AMDMTLBronzeDriver.bundle/Contents/MacOS/AMDMTLBronzeDriver";

/// model identifier SidecarCore checks device compatibility against
const MAC_MODEL_ORIGINAL: &[u8] = b"MacPro6,1";

const MAC_MODEL_PATCHED: &[u8] = b"MacPro7,1";

/// AMDMTLBronzeDriver getBaseArrayMode return clamp, Big Sur build
const AMD_ARRAY_MODE_ORIGINAL: &[u8] = &[
    0xb9, 0x02, 0x00, 0x00, 0x00, 0x01, 0xc8, 0x41, 0x83, 0xf8, 0x21, 0x0f, 0x42, 0xc1, 0xeb,
];

const AMD_ARRAY_MODE_PATCHED: &[u8] = &[
    0xb9, 0x02, 0x00, 0x00, 0x00, 0x01, 0xc8, 0x41, 0x83, 0xf8, 0x00, 0x0f, 0x43, 0xc1, 0xeb,
];

const RELEASE_RULES: &[PatchRule] = &[PatchRule::new(
    MAC_MODEL_ORIGINAL,
    MAC_MODEL_PATCHED,
    &[SIDECAR_CORE_PATH, DYLD_CACHE_PATH, BIG_SUR_DYLD_CACHE_PATH],
)];

const BETA_RULES: &[PatchRule] = &[
    PatchRule::new(
        MAC_MODEL_ORIGINAL,
        MAC_MODEL_PATCHED,
        &[SIDECAR_CORE_PATH, DYLD_CACHE_PATH, BIG_SUR_DYLD_CACHE_PATH],
    ),
    PatchRule::new(
        AMD_ARRAY_MODE_ORIGINAL,
        AMD_ARRAY_MODE_PATCHED,
        &[AMD_BRONZE_MTL_PATH, BIG_SUR_DYLD_CACHE_PATH],
    ),
];

/// an ordered collection of patch rules
///
/// order only defines the order rules are tried against a buffer; rules
/// apply independently and never short-circuit each other.
#[derive(Debug, Clone, Copy)]
pub struct PatchCatalog {
    rules: &'static [PatchRule],
}

impl PatchCatalog {
    /// the default patch table
    pub const fn release() -> Self {
        Self {
            rules: RELEASE_RULES,
        }
    }

    /// the beta patch table, selected by boot flag
    pub const fn beta() -> Self {
        Self { rules: BETA_RULES }
    }

    /// build a catalog from a custom table
    pub const fn from_rules(rules: &'static [PatchRule]) -> Self {
        Self { rules }
    }

    /// pick the table the configuration asks for
    pub fn select(config: &ModuleConfig) -> Self {
        if config.beta {
            Self::beta()
        } else {
            Self::release()
        }
    }

    pub fn rules(&self) -> &'static [PatchRule] {
        self.rules
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_rule_preserves_length() {
        for catalog in [PatchCatalog::release(), PatchCatalog::beta()] {
            for rule in catalog.rules() {
                assert_eq!(rule.needle().len(), rule.replacement().len());
                assert!(!rule.is_empty());
                assert!(!rule.targets().is_empty());
            }
        }
    }

    #[test]
    fn test_selection_follows_beta_flag() {
        let release = ModuleConfig::default();
        let beta = ModuleConfig {
            beta: true,
            ..Default::default()
        };
        assert_eq!(PatchCatalog::select(&release).len(), RELEASE_RULES.len());
        assert_eq!(PatchCatalog::select(&beta).len(), BETA_RULES.len());
        assert!(PatchCatalog::select(&beta).len() > PatchCatalog::select(&release).len());
    }

    #[test]
    fn test_model_rule_covers_cache_paths() {
        let rule = &PatchCatalog::release().rules()[0];
        assert!(rule.targets().contains(&SIDECAR_CORE_PATH));
        assert!(rule.targets().contains(&DYLD_CACHE_PATH));
        assert!(rule.targets().contains(&BIG_SUR_DYLD_CACHE_PATH));
    }

    #[test]
    fn test_target_paths_fit_resolved_capacity() {
        use super::super::path::PATH_MAX_LEN;
        for catalog in [PatchCatalog::release(), PatchCatalog::beta()] {
            for rule in catalog.rules() {
                for target in rule.targets() {
                    assert!(target.len() < PATH_MAX_LEN);
                }
            }
        }
    }
}
