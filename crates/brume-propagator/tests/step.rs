//! Behaviour of single propagation steps under scripted randomness.

use brume_core::{Particle, ParticleId, PropagatorError, Real3, Species, SpeciesInfo};
use brume_model::{NetworkModel, ReactionRule};
use brume_propagator::{BdPropagator, ChaChaSource, StepOutcome};
use brume_space::{ParticleSpace, ParticleSpaceVec};
use brume_test_utils::fixtures::{abc_model, binding_model, cube_space, place, RADIUS};
use brume_test_utils::ScriptedRandom;

const DT: f64 = 1e-6;

fn centre() -> Real3 {
    Real3::splat(0.5)
}

fn offset(dx: f64) -> Real3 {
    Real3::new(0.5 + dx, 0.5, 0.5)
}

#[test]
fn immobile_particle_without_rules_never_moves() {
    let mut space = cube_space(1.0);
    let model = abc_model();
    let w = place(&mut space, "W", centre());
    let mut rng = ScriptedRandom::new().with_displacement(Real3::new(0.1, 0.0, 0.0));

    let mut prop = BdPropagator::new(&mut space, &model, &mut rng, DT, 10);
    assert_eq!(prop.step(), Ok(true));
    assert_eq!(prop.step_outcome(), Some(StepOutcome::Immobile));
    assert_eq!(prop.step(), Ok(false));
    assert_eq!(prop.step_outcome(), None);
    drop(prop);

    assert_eq!(space.get_particle(w).unwrap().position(), centre());
}

#[test]
fn free_particle_moves_by_displacement() {
    let mut space = cube_space(1.0);
    let model = abc_model();
    let a = place(&mut space, "A", Real3::new(0.99, 0.5, 0.5));
    let mut rng = ScriptedRandom::new().with_displacement(Real3::new(0.02, 0.0, 0.0));

    let mut prop = BdPropagator::new(&mut space, &model, &mut rng, DT, 10);
    assert_eq!(prop.step(), Ok(true));
    assert_eq!(prop.step_outcome(), Some(StepOutcome::Moved));
    drop(prop);

    // Wrapped through the periodic boundary.
    let pos = space.get_particle(a).unwrap().position();
    assert!((pos.x() - 0.01).abs() < 1e-12);
}

#[test]
fn unimolecular_decay_removes_particle() {
    let mut space = cube_space(1.0);
    let mut model = abc_model();
    model
        .add_reaction_rule(ReactionRule::unimolecular("A", Vec::<&str>::new(), 1.0).unwrap())
        .unwrap();
    let a1 = place(&mut space, "A", Real3::splat(0.2));
    let a2 = place(&mut space, "A", Real3::splat(0.7));
    let mut rng = ScriptedRandom::new()
        .with_uniforms([0.05])
        .with_fallback_uniform(0.5);

    let mut prop = BdPropagator::new(&mut space, &model, &mut rng, 0.1, 10);
    assert_eq!(prop.remaining(), 2);
    assert_eq!(prop.step(), Ok(true));
    assert_eq!(prop.step_outcome(), Some(StepOutcome::Reacted));
    assert_eq!(prop.remaining(), 1);
    assert_eq!(prop.reactions().len(), 1);
    assert_eq!(prop.reactions()[0].reactants[0].0, a2);
    assert!(prop.reactions()[0].products.is_empty());

    // 0.5 > k dt = 0.1: the survivor only diffuses.
    assert_eq!(prop.step(), Ok(true));
    assert_eq!(prop.step_outcome(), Some(StepOutcome::Moved));
    assert_eq!(prop.step(), Ok(false));
    drop(prop);

    assert!(!space.has_particle(a2));
    assert!(space.has_particle(a1));
}

#[test]
fn first_matching_rule_fires_in_declaration_order() {
    let mut space = cube_space(1.0);
    let mut model = abc_model();
    model
        .add_reaction_rule(ReactionRule::unimolecular("A", ["B"], 1.0).unwrap())
        .unwrap();
    model
        .add_reaction_rule(ReactionRule::unimolecular("A", ["C"], 1.0).unwrap())
        .unwrap();
    let a = place(&mut space, "A", centre());
    // Cumulative probabilities 0.1 then 0.2; 0.15 selects the second rule.
    let mut rng = ScriptedRandom::new().with_uniforms([0.15]);

    let mut prop = BdPropagator::new(&mut space, &model, &mut rng, 0.1, 10);
    assert_eq!(prop.step(), Ok(true));
    drop(prop);

    assert_eq!(space.get_particle(a).unwrap().species(), &Species::new("C"));
}

#[test]
fn conversion_blocked_by_larger_product() {
    let mut space = cube_space(1.0);
    let mut model = abc_model();
    model
        .add_species_attribute("Big", SpeciesInfo::new(0.05, 1.0))
        .unwrap();
    model
        .add_reaction_rule(ReactionRule::unimolecular("A", ["Big"], 1.0).unwrap())
        .unwrap();
    place(&mut space, "W", offset(0.03));
    let a = place(&mut space, "A", centre());
    let mut rng = ScriptedRandom::new().with_uniforms([0.0]);

    let mut prop = BdPropagator::new(&mut space, &model, &mut rng, DT, 10);
    assert_eq!(prop.step(), Ok(true));
    assert_eq!(prop.step_outcome(), Some(StepOutcome::Rejected));
    assert!(prop.reactions().is_empty());
    drop(prop);

    let p = space.get_particle(a).unwrap();
    assert_eq!(p.species(), &Species::new("A"));
    assert_eq!(p.position(), centre());
}

#[test]
fn dissociation_places_both_products() {
    let mut space = cube_space(1.0);
    let model = binding_model(1.0, 1.0);
    let c = place(&mut space, "C", centre());
    let mut rng = ScriptedRandom::new().with_uniforms([0.0]);

    let mut prop = BdPropagator::new(&mut space, &model, &mut rng, DT, 10);
    assert_eq!(prop.step(), Ok(true));
    assert_eq!(prop.step_outcome(), Some(StepOutcome::Reacted));
    let record = prop.reactions()[0].clone();
    assert_eq!(prop.step(), Ok(false));
    drop(prop);

    assert_eq!(space.num_particles(), 2);
    assert_eq!(record.products.len(), 2);
    let (pid1, p1) = &record.products[0];
    let (pid2, p2) = &record.products[1];
    assert_eq!(*pid1, c);
    assert_eq!(p1.species(), &Species::new("A"));
    assert_eq!(p2.species(), &Species::new("B"));
    // Equal D: the contact vector is split evenly.
    assert!((p1.position().x() - (0.5 + RADIUS)).abs() < 1e-12);
    assert!((p2.position().x() - (0.5 - RADIUS)).abs() < 1e-12);
    assert_eq!(space.get_particle(*pid2), Some(p2));
}

#[test]
fn dissociation_gives_up_after_retries() {
    let mut space = cube_space(1.0);
    let model = binding_model(1.0, 1.0);
    place(&mut space, "W", offset(0.012));
    let c = place(&mut space, "C", centre());
    let mut rng = ScriptedRandom::new().with_uniforms([0.0]);

    let mut prop = BdPropagator::new(&mut space, &model, &mut rng, DT, 3);
    assert_eq!(prop.step(), Ok(true));
    assert_eq!(prop.step_outcome(), Some(StepOutcome::Rejected));
    drop(prop);

    assert_eq!(space.num_particles(), 2);
    let p = space.get_particle(c).unwrap();
    assert_eq!(p.species(), &Species::new("C"));
    assert_eq!(p.position(), centre());
}

#[test]
fn immobile_products_split_evenly() {
    let mut space = cube_space(1.0);
    let mut model = abc_model();
    model
        .add_species_attribute("S", SpeciesInfo::new(RADIUS, 0.0))
        .unwrap();
    model
        .add_reaction_rule(ReactionRule::unimolecular("S", ["W", "W"], 1.0).unwrap())
        .unwrap();
    let s = space.new_particle(Particle::new(Species::new("S"), centre(), RADIUS, 0.0));
    let mut rng = ScriptedRandom::new().with_uniforms([0.0]);

    let mut prop = BdPropagator::new(&mut space, &model, &mut rng, DT, 1);
    assert_eq!(prop.step(), Ok(true));
    assert_eq!(prop.step_outcome(), Some(StepOutcome::Reacted));
    drop(prop);

    let p = space.get_particle(s).unwrap();
    assert!((p.position().x() - (0.5 + RADIUS)).abs() < 1e-12);
}

#[test]
fn three_products_are_unsupported() {
    let mut space = cube_space(1.0);
    let mut model = abc_model();
    model
        .add_reaction_rule(ReactionRule::unimolecular("A", ["A", "B", "C"], 1.0).unwrap())
        .unwrap();
    place(&mut space, "A", centre());
    let mut rng = ScriptedRandom::new().with_uniforms([0.0]);

    let mut prop = BdPropagator::new(&mut space, &model, &mut rng, DT, 10);
    assert_eq!(
        prop.step(),
        Err(PropagatorError::UnsupportedProductCount {
            reactants: 1,
            products: 3
        })
    );
}

#[test]
fn unknown_product_species_is_an_error() {
    let mut space = cube_space(1.0);
    let mut model = abc_model();
    model
        .add_reaction_rule(ReactionRule::unimolecular("A", ["X"], 1.0).unwrap())
        .unwrap();
    place(&mut space, "A", centre());
    let mut rng = ScriptedRandom::new().with_uniforms([0.0]);

    let mut prop = BdPropagator::new(&mut space, &model, &mut rng, DT, 10);
    assert_eq!(
        prop.step(),
        Err(PropagatorError::UnknownSpecies {
            species: Species::new("X")
        })
    );
}

/// `A` (processed first) steps into contact with `B`.
fn colliding_pair(space: &mut ParticleSpaceVec) -> (ParticleId, ParticleId) {
    let b = place(space, "B", offset(0.012));
    let a = place(space, "A", centre());
    (a, b)
}

#[test]
fn binding_merges_at_weighted_centre() {
    let mut space = cube_space(1.0);
    let model = binding_model(1.0, 0.0);
    let (a, b) = colliding_pair(&mut space);
    let mut rng = ScriptedRandom::new()
        .with_displacement(Real3::new(0.004, 0.0, 0.0))
        .with_uniforms([0.0]);

    let mut prop = BdPropagator::new(&mut space, &model, &mut rng, DT, 10);
    assert_eq!(prop.step(), Ok(true));
    assert_eq!(prop.step_outcome(), Some(StepOutcome::Reacted));
    // The partner was purged from the work list.
    assert_eq!(prop.remaining(), 0);
    assert_eq!(prop.step(), Ok(false));
    drop(prop);

    assert_eq!(space.num_particles(), 1);
    assert!(!space.has_particle(b));
    let c = space.get_particle(a).unwrap();
    assert_eq!(c.species(), &Species::new("C"));
    assert!((c.position().x() - 0.508).abs() < 1e-12);
}

#[test]
fn annihilation_removes_both_reactants() {
    let mut space = cube_space(1.0);
    let mut model = abc_model();
    model
        .add_reaction_rule(ReactionRule::bimolecular("A", "B", Vec::<&str>::new(), 1.0).unwrap())
        .unwrap();
    let (a, b) = colliding_pair(&mut space);
    let mut rng = ScriptedRandom::new()
        .with_displacement(Real3::new(0.004, 0.0, 0.0))
        .with_uniforms([0.0]);

    let mut prop = BdPropagator::new(&mut space, &model, &mut rng, DT, 10);
    assert_eq!(prop.step(), Ok(true));
    assert_eq!(prop.step_outcome(), Some(StepOutcome::Reacted));
    assert_eq!(prop.remaining(), 0);
    let record = prop.reactions()[0].clone();
    assert_eq!(prop.step(), Ok(false));
    drop(prop);

    assert_eq!(space.num_particles(), 0);
    assert!(!space.has_particle(a));
    assert!(!space.has_particle(b));
    assert_eq!(record.reactants.len(), 2);
    assert!(record.products.is_empty());
}

#[test]
fn binding_rejected_when_product_has_no_room() {
    let mut space = cube_space(1.0);
    let mut model = abc_model();
    model
        .add_species_attribute("Big", SpeciesInfo::new(0.05, 1.0))
        .unwrap();
    model
        .add_reaction_rule(ReactionRule::bimolecular("A", "B", ["Big"], 1.0).unwrap())
        .unwrap();
    // Clear of A's destination but inside the product's radius.
    place(&mut space, "W", offset(-0.03));
    let (a, b) = colliding_pair(&mut space);
    let mut rng = ScriptedRandom::new()
        .with_displacement(Real3::new(0.004, 0.0, 0.0))
        .with_uniforms([0.0]);

    let mut prop = BdPropagator::new(&mut space, &model, &mut rng, DT, 10);
    assert_eq!(prop.step(), Ok(true));
    assert_eq!(prop.step_outcome(), Some(StepOutcome::Rejected));
    assert!(prop.reactions().is_empty());
    assert_eq!(prop.remaining(), 2);
    drop(prop);

    assert_eq!(space.num_particles(), 3);
    let pa = space.get_particle(a).unwrap();
    assert_eq!(pa.species(), &Species::new("A"));
    assert_eq!(pa.position(), centre());
    let pb = space.get_particle(b).unwrap();
    assert_eq!(pb.species(), &Species::new("B"));
    assert_eq!(pb.position(), offset(0.012));
}

#[test]
fn two_pair_products_are_unsupported() {
    let mut space = cube_space(1.0);
    let mut model = abc_model();
    model
        .add_reaction_rule(ReactionRule::bimolecular("A", "B", ["C", "C"], 1.0).unwrap())
        .unwrap();
    colliding_pair(&mut space);
    let mut rng = ScriptedRandom::new()
        .with_displacement(Real3::new(0.004, 0.0, 0.0))
        .with_uniforms([0.0]);

    let mut prop = BdPropagator::new(&mut space, &model, &mut rng, DT, 10);
    assert_eq!(
        prop.step(),
        Err(PropagatorError::UnsupportedProductCount {
            reactants: 2,
            products: 2
        })
    );
}

#[test]
fn contact_without_pair_rule_blocks_move() {
    let mut space = cube_space(1.0);
    let model = abc_model();
    let (a, _) = colliding_pair(&mut space);
    let mut rng = ScriptedRandom::new().with_displacement(Real3::new(0.004, 0.0, 0.0));

    let mut prop = BdPropagator::new(&mut space, &model, &mut rng, DT, 10);
    assert_eq!(prop.step(), Ok(true));
    assert_eq!(prop.step_outcome(), Some(StepOutcome::Blocked));
    drop(prop);

    assert_eq!(space.get_particle(a).unwrap().position(), centre());
}

#[test]
fn unlucky_pair_draw_blocks_move() {
    let mut space = cube_space(1.0);
    let model = binding_model(1.0, 0.0);
    let (a, b) = colliding_pair(&mut space);
    // Probability is about 0.7 for k = 1 at this dt.
    let mut rng = ScriptedRandom::new()
        .with_displacement(Real3::new(0.004, 0.0, 0.0))
        .with_uniforms([0.99]);

    let mut prop = BdPropagator::new(&mut space, &model, &mut rng, DT, 10);
    assert_eq!(prop.step(), Ok(true));
    assert_eq!(prop.step_outcome(), Some(StepOutcome::Blocked));
    drop(prop);

    assert_eq!(space.get_particle(a).unwrap().position(), centre());
    assert!(space.has_particle(b));
}

#[test]
fn crowded_destination_blocks_move() {
    let mut space = cube_space(1.0);
    let model = binding_model(1.0, 0.0);
    place(&mut space, "B", Real3::new(0.504, 0.508, 0.5));
    place(&mut space, "B", Real3::new(0.504, 0.492, 0.5));
    let a = place(&mut space, "A", centre());
    let mut rng = ScriptedRandom::new().with_displacement(Real3::new(0.004, 0.0, 0.0));

    let mut prop = BdPropagator::new(&mut space, &model, &mut rng, DT, 10);
    assert_eq!(prop.step(), Ok(true));
    assert_eq!(prop.step_outcome(), Some(StepOutcome::Blocked));
    drop(prop);

    assert_eq!(space.get_particle(a).unwrap().position(), centre());
    assert_eq!(space.num_particles(), 3);
}

#[test]
fn excessive_pair_rate_overflows() {
    let mut space = cube_space(1.0);
    let model = binding_model(1e10, 0.0);
    colliding_pair(&mut space);
    let mut rng = ScriptedRandom::new().with_displacement(Real3::new(0.004, 0.0, 0.0));

    let mut prop = BdPropagator::new(&mut space, &model, &mut rng, DT, 10);
    assert!(matches!(
        prop.step(),
        Err(PropagatorError::ProbabilityOverflow { dt, .. }) if dt == DT
    ));
}

fn run_seeded(seed: u64) -> Vec<(ParticleId, Particle)> {
    let mut space = cube_space(0.2);
    let model = binding_model(1.0, 1.0);
    for i in 0..20 {
        let species = if i % 2 == 0 { "A" } else { "B" };
        let f = i as f64 / 20.0;
        place(&mut space, species, Real3::new(0.2 * f, 0.1, 0.2 * (1.0 - f)));
    }
    let mut rng = ChaChaSource::new(seed);
    for _ in 0..5 {
        let mut prop = BdPropagator::new(&mut space, &model, &mut rng, 1e-6, 10);
        while prop.step().unwrap() {}
    }
    space.list_particles()
}

#[test]
fn same_seed_same_trajectory() {
    assert_eq!(run_seeded(17), run_seeded(17));
    assert_ne!(run_seeded(17), run_seeded(18));
}

#[test]
fn network_model_is_usable_directly() {
    // Species with no attributes can still diffuse: attributes are only
    // consulted for reaction products.
    let mut space = cube_space(1.0);
    let model = NetworkModel::new();
    let pid = space.new_particle(Particle::new(Species::new("Q"), centre(), 0.01, 1.0));
    let mut rng = ScriptedRandom::new().with_displacement(Real3::new(0.1, 0.0, 0.0));

    let mut prop = BdPropagator::new(&mut space, &model, &mut rng, DT, 10);
    assert_eq!(prop.step(), Ok(true));
    drop(prop);
    assert!((space.get_particle(pid).unwrap().position().x() - 0.6).abs() < 1e-12);
}
