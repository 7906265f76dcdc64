//! Reflection access policy
//!
//! Accessibility relaxation is modelled as a permission value: a member that
//! is not public is visible to introspection only when the policy grants
//! `SUPPRESS_ACCESS_CHECKS`. Members the policy leaves inaccessible are
//! skipped silently rather than reported.

use mira_model::Visibility;

/// Reflection permission flags
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ReflectionPolicy(u8);

impl ReflectionPolicy {
    /// No relaxation; only public members are reachable
    pub const NONE: Self = Self(0x00);
    /// Allow access to non-public members
    pub const SUPPRESS_ACCESS_CHECKS: Self = Self(0x01);

    /// Create from raw bits
    pub const fn from_bits(bits: u8) -> Self {
        Self(bits)
    }

    /// Get raw bits
    pub const fn bits(&self) -> u8 {
        self.0
    }

    /// Check if this policy contains all flags of `other`
    pub const fn contains(&self, other: Self) -> bool {
        (self.0 & other.0) == other.0
    }

    /// Union of two policies
    pub const fn union(&self, other: Self) -> Self {
        Self(self.0 | other.0)
    }

    /// Whether non-public members may be accessed
    pub const fn can_suppress_access_checks(&self) -> bool {
        self.contains(Self::SUPPRESS_ACCESS_CHECKS)
    }

    /// Whether a member of the given visibility is reachable under this
    /// policy
    pub fn member_accessible(&self, visibility: Visibility) -> bool {
        visibility.is_public() || self.can_suppress_access_checks()
    }
}

impl Default for ReflectionPolicy {
    fn default() -> Self {
        Self::SUPPRESS_ACCESS_CHECKS
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flag_operations() {
        let none = ReflectionPolicy::NONE;
        let relax = ReflectionPolicy::SUPPRESS_ACCESS_CHECKS;

        assert!(!none.can_suppress_access_checks());
        assert!(relax.can_suppress_access_checks());
        assert!(none.union(relax).contains(relax));
        assert_eq!(relax.bits(), 0x01);
        assert_eq!(ReflectionPolicy::from_bits(0x01), relax);
    }

    #[test]
    fn test_member_accessibility() {
        let none = ReflectionPolicy::NONE;
        let relax = ReflectionPolicy::SUPPRESS_ACCESS_CHECKS;

        assert!(none.member_accessible(Visibility::Public));
        assert!(!none.member_accessible(Visibility::Private));
        assert!(!none.member_accessible(Visibility::Protected));
        assert!(relax.member_accessible(Visibility::Private));
        assert!(relax.member_accessible(Visibility::Protected));
    }
}
