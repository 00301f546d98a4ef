//! ParticleSpace trait compliance test helpers.
//!
//! These functions verify that a ParticleSpace implementation satisfies the
//! invariants required by the trait contract. Reused by every backend's
//! test module.

use crate::space::ParticleSpace;

/// Assert that `distance(p, p) == 0.0` for every stored position.
pub fn assert_distance_reflexive(space: &dyn ParticleSpace) {
    for (pid, p) in space.list_particles() {
        let d = space.distance(p.position(), p.position());
        assert!(d.abs() < 1e-12, "distance at {pid} to itself = {d}");
    }
}

/// Assert that `distance(a, b) == distance(b, a)` for all particle pairs.
pub fn assert_distance_symmetric(space: &dyn ParticleSpace) {
    let all = space.list_particles();
    for (ia, a) in &all {
        for (ib, b) in &all {
            let dab = space.distance(a.position(), b.position());
            let dba = space.distance(b.position(), a.position());
            assert!(
                (dab - dba).abs() < 1e-12,
                "distance({ia}, {ib}) = {dab} != distance({ib}, {ia}) = {dba}"
            );
        }
    }
}

/// Assert that `apply_boundary` is idempotent and lands inside the box.
pub fn assert_boundary_idempotent(space: &dyn ParticleSpace) {
    let edges = space.edge_lengths();
    for (pid, p) in space.list_particles() {
        let once = space.apply_boundary(p.position() + edges * 1.5);
        let twice = space.apply_boundary(once);
        for axis in 0..3 {
            assert!(
                (0.0..edges[axis]).contains(&once[axis]),
                "{pid}: wrapped axis {axis} = {} outside [0, {})",
                once[axis],
                edges[axis]
            );
        }
        assert!(
            (once - twice).length() < 1e-12,
            "{pid}: apply_boundary not idempotent: {once} vs {twice}"
        );
    }
}

/// Assert that a zero-radius query at each particle's centre finds it.
pub fn assert_radius_query_finds_self(space: &dyn ParticleSpace) {
    for (pid, p) in space.list_particles() {
        let hits = space.list_particles_within_radius(p.position(), 0.0, &[]);
        assert!(
            hits.iter().any(|n| n.pid == pid),
            "{pid} not found by a query at its own centre"
        );
        let ignored = space.list_particles_within_radius(p.position(), 0.0, &[pid]);
        assert!(
            ignored.iter().all(|n| n.pid != pid),
            "{pid} returned despite being ignored"
        );
    }
}

/// Assert that radius query results are sorted nearest first.
pub fn assert_radius_query_sorted(space: &dyn ParticleSpace) {
    let reach = space.edge_lengths().length();
    for (_, p) in space.list_particles() {
        let hits = space.list_particles_within_radius(p.position(), reach, &[]);
        assert_eq!(hits.len(), space.num_particles());
        for w in hits.windows(2) {
            assert!(
                w[0].distance <= w[1].distance,
                "results out of order: {} > {}",
                w[0].distance,
                w[1].distance
            );
        }
    }
}

/// Assert that `particle_ids` and `list_particles` agree with `num_particles`.
pub fn assert_listing_consistent(space: &dyn ParticleSpace) {
    let ids = space.particle_ids();
    let listed: Vec<_> = space.list_particles().into_iter().map(|(pid, _)| pid).collect();
    assert_eq!(ids, listed, "particle_ids and list_particles disagree");
    assert_eq!(ids.len(), space.num_particles());
    for pid in ids {
        assert!(space.has_particle(pid), "{pid} listed but not stored");
    }
}

/// Run all compliance checks.
pub fn run_full_compliance(space: &dyn ParticleSpace) {
    assert_distance_reflexive(space);
    assert_distance_symmetric(space);
    assert_boundary_idempotent(space);
    assert_radius_query_finds_self(space);
    assert_radius_query_sorted(space);
    assert_listing_consistent(space);
}
