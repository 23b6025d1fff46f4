//! Validation interceptors: the two hook shapes
//!
//! Exactly one shape is installed per load, selected by the routing table
//! in [`crate::version`]. Both shapes share one core that drives path
//! resolution, rule matching, and the guarded rewrite; they differ only in
//! how the buffer and the call-through are obtained. Production embeddings
//! build the call-through from [`crate::HookState::original`]; tests pass
//! closures.

use std::sync::Arc;

use log::{debug, info, warn};

use crate::config::ModuleConfig;
use crate::patch::catalog::PatchCatalog;
use crate::patch::engine;
use crate::patch::path::{PathMatcher, ResolvedPath};
use crate::MODULE;

use super::guard::WriteGuard;
use super::host::{FileHandle, HookHost};

/// call-through to the original range validator
pub trait RangeOriginal: Send + Sync {
    fn validate(&self, file: &FileHandle, data: &mut [u8], result: &mut u32) -> bool;
}

impl<F> RangeOriginal for F
where
    F: Fn(&FileHandle, &mut [u8], &mut u32) -> bool + Send + Sync,
{
    fn validate(&self, file: &FileHandle, data: &mut [u8], result: &mut u32) -> bool {
        self(file, data, result)
    }
}

/// call-through to the original page validator
pub trait PageOriginal: Send + Sync {
    fn validate_page(&self, file: &FileHandle, page_offset: u64, page: &mut [u8]);
}

impl<F> PageOriginal for F
where
    F: Fn(&FileHandle, u64, &mut [u8]) + Send + Sync,
{
    fn validate_page(&self, file: &FileHandle, page_offset: u64, page: &mut [u8]) {
        self(file, page_offset, page)
    }
}

/// shape-independent matching and rewrite core
///
/// reentrant: concurrent validations of different files share the
/// immutable catalog and touch only caller-owned buffers, so they never
/// interfere. the write-enable toggle inside [`WriteGuard`] is the single
/// serialized point.
pub struct InterceptCore<H: HookHost, M: PathMatcher> {
    host: Arc<H>,
    catalog: PatchCatalog,
    matcher: M,
    guard: WriteGuard<H>,
    verbose: bool,
}

impl<H: HookHost, M: PathMatcher> InterceptCore<H, M> {
    pub fn new(host: Arc<H>, catalog: PatchCatalog, matcher: M, config: &ModuleConfig) -> Self {
        let guard = WriteGuard::new(Arc::clone(&host));
        Self {
            host,
            catalog,
            matcher,
            guard,
            verbose: config.verbose,
        }
    }

    /// resolve the path backing `file`; unresolvable means "no match"
    fn resolve(&self, file: &FileHandle) -> Option<ResolvedPath> {
        match self.host.resolve_path(file) {
            Ok(path) => Some(path),
            Err(err) => {
                if self.verbose {
                    debug!(target: MODULE, "skipping handle {:#x}: {err}", file.0);
                }
                None
            }
        }
    }

    /// try every applicable rule against `data`; returns rewrites applied
    ///
    /// each rule rewrites at most its first needle occurrence. a refused
    /// write-enable skips that one rewrite and leaves the buffer exactly
    /// as validation produced it.
    pub fn apply_rules(&self, path: &ResolvedPath, data: &mut [u8]) -> usize {
        let mut applied = 0;
        for rule in self.catalog.rules() {
            let eligible = rule
                .targets()
                .iter()
                .any(|target| self.matcher.matches(path, target));
            if !eligible {
                continue;
            }

            let Some(offset) = engine::find(data, rule.needle()) else {
                continue;
            };
            info!(
                target: MODULE,
                "found {}-byte patch site at offset {offset:#x} in {path}",
                rule.len()
            );

            match self.guard.with_write(|| engine::apply(data, offset, rule.replacement())) {
                Ok(()) => applied += 1,
                Err(err) => warn!(target: MODULE, "leaving {path} untouched: {err}"),
            }
        }
        applied
    }
}

/// whole-range interception, pre-Big Sur kernels
///
/// receives the entire candidate buffer and the validator's in/out result.
/// the original runs first; patching is attempted only after it reports
/// success, and its verdict is returned unmodified.
pub struct RangeInterceptor<H: HookHost, M: PathMatcher> {
    core: InterceptCore<H, M>,
    original: Box<dyn RangeOriginal>,
}

impl<H: HookHost, M: PathMatcher> RangeInterceptor<H, M> {
    pub fn new(core: InterceptCore<H, M>, original: Box<dyn RangeOriginal>) -> Self {
        Self { core, original }
    }

    pub fn validate(&self, file: &FileHandle, data: &mut [u8], result: &mut u32) -> bool {
        let valid = self.original.validate(file, data, result);
        if valid {
            if let Some(path) = self.core.resolve(file) {
                self.core.apply_rules(&path, data);
            }
        }
        valid
    }
}

/// page-at-a-time interception, Big Sur and newer kernels
///
/// this shape exposes no success signal, so patching is attempted
/// unconditionally after the call-through. each call sees exactly one
/// page: a needle whose bytes straddle a page boundary is never found
/// here, by construction. rules meant for this shape must use needles
/// that fit inside a single page presentation.
pub struct PageInterceptor<H: HookHost, M: PathMatcher> {
    core: InterceptCore<H, M>,
    original: Box<dyn PageOriginal>,
}

impl<H: HookHost, M: PathMatcher> PageInterceptor<H, M> {
    pub fn new(core: InterceptCore<H, M>, original: Box<dyn PageOriginal>) -> Self {
        Self { core, original }
    }

    pub fn validate_page(&self, file: &FileHandle, page_offset: u64, page: &mut [u8]) {
        self.original.validate_page(file, page_offset, page);
        if let Some(path) = self.core.resolve(file) {
            self.core.apply_rules(&path, page);
        }
    }
}
