//! Host hooking-framework surface
//!
//! Everything the module consumes from its host is behind [`HookHost`]:
//! symbol resolution, trampoline installation, path resolution for file
//! handles, the global write-protection toggle, and version detection.
//! One production implementation exists per embedding; tests substitute
//! fakes.

use crate::error::Result;
use crate::patch::path::ResolvedPath;
use crate::version::KernelVersion;

/// opaque identity of the file backing a validated buffer
///
/// carries the raw vnode value; only the host can interpret it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FileHandle(pub usize);

/// services imported from the host hooking framework
pub trait HookHost: Send + Sync {
    /// resolve a kernel symbol to its address
    fn resolve_symbol(&self, name: &'static str) -> Result<usize>;

    /// reroute `target` to `replacement`, returning the address used to
    /// call through to the original
    fn install_trampoline(&self, target: usize, replacement: usize) -> Result<usize>;

    /// resolve the filesystem path backing `file`
    ///
    /// failure means "no path, no match" to callers, never an error to
    /// propagate.
    fn resolve_path(&self, file: &FileHandle) -> Result<ResolvedPath>;

    /// toggle the global kernel write-protection enforcement
    fn set_kernel_writing(&self, enable: bool) -> Result<()>;

    /// running kernel version, read once at installation
    fn kernel_version(&self) -> KernelVersion;
}
