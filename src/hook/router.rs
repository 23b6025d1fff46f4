//! Shape selection and hook installation
//!
//! Exactly one interceptor shape is installed per load, chosen from the
//! kernel version through the routing table. Any failure here is fatal to
//! this module only: nothing is installed and the running system behaves
//! exactly as if the module were absent.

use log::{debug, error, info};

use crate::config::ModuleConfig;
use crate::error::{FixupError, Result};
use crate::version::{route_for, HookShape};
use crate::MODULE;

use super::host::HookHost;

/// the per-load hook record: original validator address plus the shape
/// installed in front of it
///
/// written once during installation, read thereafter, owned by whoever
/// drove the installation. never reassigned; no second shape is ever
/// installed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HookState {
    original: usize,
    shape: HookShape,
}

impl HookState {
    /// address used to call through to the original validator
    pub fn original(&self) -> usize {
        self.original
    }

    /// which interception shape was installed
    pub fn shape(&self) -> HookShape {
        self.shape
    }
}

/// resolve and reroute the running kernel's validator
///
/// reads the version once, consults the routing table, resolves the
/// shape's validator symbol, and installs the trampoline pointing at
/// `replacement` (the embedder's interceptor entry). returns `Ok(None)`
/// when the module is disabled by boot flag; every `Err` leaves the
/// system unpatched.
pub fn install<H: HookHost>(
    host: &H,
    config: &ModuleConfig,
    replacement: usize,
) -> Result<Option<HookState>> {
    if config.disabled {
        info!(target: MODULE, "disabled by boot argument");
        return Ok(None);
    }

    let version = host.kernel_version();
    let Some(route) = route_for(version) else {
        let err = FixupError::UnsupportedKernelVersion {
            major: version.major,
        };
        error!(target: MODULE, "{err}");
        return Err(err);
    };
    debug!(target: MODULE, "patching {} on darwin {version}", route.symbol);

    let target = match host.resolve_symbol(route.symbol) {
        Ok(address) => address,
        Err(err) => {
            error!(target: MODULE, "failed to find {}: {err}", route.symbol);
            return Err(err);
        }
    };

    let original = match host.install_trampoline(target, replacement) {
        Ok(address) => address,
        Err(err) => {
            error!(target: MODULE, "failed to hook {}: {err}", route.symbol);
            return Err(err);
        }
    };

    info!(target: MODULE, "hooked {}", route.symbol);
    Ok(Some(HookState {
        original,
        shape: route.shape,
    }))
}
