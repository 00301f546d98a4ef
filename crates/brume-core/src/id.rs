//! Strongly-typed particle identifiers.

use std::fmt;

/// Identifies a particle within a particle space.
///
/// Issued once by a [`ParticleIdGenerator`] when the particle is created
/// and never reused for another particle, even after removal. The id is
/// independent of the particle's position, species, or storage slot.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ParticleId(pub u64);

impl fmt::Display for ParticleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

impl From<u64> for ParticleId {
    fn from(v: u64) -> Self {
        Self(v)
    }
}

/// Sequential issuer of [`ParticleId`] values.
///
/// Each space owns exactly one generator, so ids are unique per space.
/// The first issued id is `ParticleId(1)`; `ParticleId(0)` is never handed
/// out and can be used as a sentinel by callers.
#[derive(Clone, Debug)]
pub struct ParticleIdGenerator {
    next: u64,
}

impl ParticleIdGenerator {
    /// Create a generator whose first id is `ParticleId(1)`.
    pub fn new() -> Self {
        Self { next: 1 }
    }

    /// Issue the next id.
    pub fn next_id(&mut self) -> ParticleId {
        let id = ParticleId(self.next);
        self.next += 1;
        id
    }

    /// Number of ids issued so far.
    pub fn issued(&self) -> u64 {
        self.next - 1
    }
}

impl Default for ParticleIdGenerator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generator_issues_sequential_ids() {
        let mut gen = ParticleIdGenerator::new();
        assert_eq!(gen.next_id(), ParticleId(1));
        assert_eq!(gen.next_id(), ParticleId(2));
        assert_eq!(gen.issued(), 2);
    }

    #[test]
    fn display_prefixes_hash() {
        assert_eq!(ParticleId(7).to_string(), "#7");
    }
}
