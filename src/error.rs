//! Unified error types for csfixup

use core::fmt;

/// all errors that can occur in csfixup
///
/// no-match during a scan is not an error and has no variant here; it is
/// the common case for every buffer whose file carries no applicable rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FixupError {
    // === installation ===
    /// kernel version not covered by the shape routing table
    UnsupportedKernelVersion { major: u32 },

    /// validator symbol absent in this kernel build
    SymbolNotFound { name: &'static str },

    /// rerouting the validator failed
    HookInstallFailed { symbol: &'static str, status: i32 },

    // === path resolution ===
    /// host could not produce a path for the file handle
    PathUnresolvable { status: i32 },

    /// resolved path exceeds the fixed path capacity
    PathTooLong { len: usize, max: usize },

    // === write protection ===
    /// host refused to toggle kernel write protection
    WriteProtectToggleFailed { enable: bool, status: i32 },
}

impl fmt::Display for FixupError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnsupportedKernelVersion { major } => {
                write!(f, "unsupported kernel version: darwin {major}")
            }
            Self::SymbolNotFound { name } => {
                write!(f, "symbol not found: {name}")
            }
            Self::HookInstallFailed { symbol, status } => {
                write!(f, "failed to hook {symbol}: status {status}")
            }
            Self::PathUnresolvable { status } => {
                write!(f, "path resolution failed: status {status}")
            }
            Self::PathTooLong { len, max } => {
                write!(f, "resolved path of {len} bytes does not fit {max}-byte buffer")
            }
            Self::WriteProtectToggleFailed { enable, status } => {
                let action = if *enable { "obtain" } else { "restore" };
                write!(f, "failed to {action} write permissions: status {status}")
            }
        }
    }
}

impl std::error::Error for FixupError {}

/// result type alias using FixupError
pub type Result<T> = std::result::Result<T, FixupError>;
