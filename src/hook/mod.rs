//! Validation interception: host surface, write guard, shapes, installation

pub mod guard;
pub mod host;
pub mod interceptor;
pub mod router;

pub use guard::WriteGuard;
pub use host::{FileHandle, HookHost};
pub use interceptor::{InterceptCore, PageInterceptor, PageOriginal, RangeInterceptor, RangeOriginal};
pub use router::{install, HookState};
