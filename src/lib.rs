//! csfixup: path-scoped binary patching of integrity-validated images
//!
//! This library rewrites fixed-length byte sequences inside in-memory copies
//! of selected executable images, immediately after the kernel has validated
//! their code signature and before the bytes are consumed. File contents on
//! disk are never touched and the validation verdict is never altered;
//! patching is strictly an additive side effect on the transient buffer the
//! kernel presented.
//!
//! Components:
//!
//! - Patch rules and catalogs: immutable needle/replacement/target-path
//!   triples compiled at initialization
//! - Bounded pattern search and in-place rewrite
//! - A serialized write-enable critical section around each rewrite
//! - Two validation interceptor shapes (whole-range and page-at-a-time),
//!   selected once per load from the kernel version
//!
//! The host hooking framework (symbol resolution, trampoline installation,
//! path resolution, the write-protection toggle, version detection) is
//! consumed through the [`HookHost`] trait; diagnostics go through the
//! `log` facade and the embedder owns the transport.

pub mod config;
pub mod error;
pub mod hook;
pub mod patch;
pub mod version;

// re-exports for convenience
pub use config::ModuleConfig;
pub use error::{FixupError, Result};
pub use hook::host::{FileHandle, HookHost};
pub use hook::interceptor::{InterceptCore, PageInterceptor, RangeInterceptor};
pub use hook::router::{install, HookState};
pub use patch::catalog::PatchCatalog;
pub use patch::rule::PatchRule;
pub use version::{HookShape, KernelRelease, KernelVersion};

/// log target for all diagnostics emitted by this module
pub(crate) const MODULE: &str = "csfixup";

/// library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
