//! Darwin kernel version detection support and validator shape routing

use core::cmp::Ordering;

/// represents a running Darwin kernel version
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KernelVersion {
    pub major: u32,
    pub minor: u32,
}

/// named Darwin releases with known major versions
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum KernelRelease {
    Mojave,   // darwin 18
    Catalina, // darwin 19
    BigSur,   // darwin 20
    Monterey, // darwin 21
    Unknown,
}

impl KernelVersion {
    pub const fn new(major: u32, minor: u32) -> Self {
        Self { major, minor }
    }

    /// map version to named release
    pub fn release(&self) -> KernelRelease {
        match self.major {
            18 => KernelRelease::Mojave,
            19 => KernelRelease::Catalina,
            20 => KernelRelease::BigSur,
            21 => KernelRelease::Monterey,
            _ => KernelRelease::Unknown,
        }
    }
}

impl PartialOrd for KernelVersion {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for KernelVersion {
    fn cmp(&self, other: &Self) -> Ordering {
        match self.major.cmp(&other.major) {
            Ordering::Equal => self.minor.cmp(&other.minor),
            ord => ord,
        }
    }
}

impl core::fmt::Display for KernelVersion {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}.{}", self.major, self.minor)
    }
}

impl core::fmt::Display for KernelRelease {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Mojave => write!(f, "Mojave"),
            Self::Catalina => write!(f, "Catalina"),
            Self::BigSur => write!(f, "Big Sur"),
            Self::Monterey => write!(f, "Monterey"),
            Self::Unknown => write!(f, "Unknown"),
        }
    }
}

/// granularity at which the kernel presents validated data to a hook
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HookShape {
    /// whole candidate buffer with declared length and an in/out verdict
    Range,
    /// one fixed-size page at a time, no verdict exposed
    Page,
}

/// maps a span of kernel majors to the validator hook for that span
#[derive(Debug, Clone, Copy)]
pub struct ShapeRoute {
    pub min_major: u32,
    /// inclusive upper bound; None leaves the route open-ended
    pub max_major: Option<u32>,
    pub shape: HookShape,
    pub symbol: &'static str,
}

/// ordered routing table; the first covering entry wins
///
/// versions outside every span install nothing (fail-open).
pub const VALIDATOR_ROUTES: &[ShapeRoute] = &[
    // Catalina validates whole file ranges
    ShapeRoute {
        min_major: 19,
        max_major: Some(19),
        shape: HookShape::Range,
        symbol: "_cs_validate_range",
    },
    // Big Sur and newer validate page-at-a-time
    ShapeRoute {
        min_major: 20,
        max_major: None,
        shape: HookShape::Page,
        symbol: "_cs_validate_page",
    },
];

/// find the routing entry covering `version`
pub fn route_for(version: KernelVersion) -> Option<&'static ShapeRoute> {
    VALIDATOR_ROUTES.iter().find(|route| {
        version.major >= route.min_major
            && route.max_major.map_or(true, |max| version.major <= max)
    })
}
