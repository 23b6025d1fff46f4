//! Patch rule definitions

/// an immutable needle/replacement/target-path triple
///
/// rules are compiled once at module initialization as static read-only
/// data. a rule rewrites at most the first occurrence of its needle per
/// presented buffer; patching the same sequence at several sites, or
/// several sequences in one file, takes one rule each.
#[derive(Debug, Clone, Copy)]
pub struct PatchRule {
    needle: &'static [u8],
    replacement: &'static [u8],
    targets: &'static [&'static str],
}

impl PatchRule {
    /// build a rule
    ///
    /// evaluated in const context, so a needle/replacement length mismatch
    /// fails the build rather than the running system.
    pub const fn new(
        needle: &'static [u8],
        replacement: &'static [u8],
        targets: &'static [&'static str],
    ) -> Self {
        assert!(needle.len() == replacement.len(), "patch size invalid");
        Self {
            needle,
            replacement,
            targets,
        }
    }

    /// byte sequence searched for
    pub const fn needle(&self) -> &'static [u8] {
        self.needle
    }

    /// equal-length byte sequence written over a match
    pub const fn replacement(&self) -> &'static [u8] {
        self.replacement
    }

    /// absolute paths of the files this rule applies to
    pub const fn targets(&self) -> &'static [&'static str] {
        self.targets
    }

    /// patch length in bytes
    pub const fn len(&self) -> usize {
        self.needle.len()
    }

    pub const fn is_empty(&self) -> bool {
        self.needle.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RULE: PatchRule = PatchRule::new(b"abc", b"xyz", &["/tmp/target"]);

    #[test]
    fn test_accessors() {
        assert_eq!(RULE.needle(), b"abc");
        assert_eq!(RULE.replacement(), b"xyz");
        assert_eq!(RULE.targets(), &["/tmp/target"]);
        assert_eq!(RULE.len(), 3);
        assert!(!RULE.is_empty());
    }

    #[test]
    fn test_lengths_always_agree() {
        assert_eq!(RULE.needle().len(), RULE.replacement().len());
    }
}
