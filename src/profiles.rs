//! Named grammar + parameter presets.
//!
//! Species differences are data, not interpreter code paths: each profile
//! returns a configured [`LSystem`] and a [`TreeParameters`] record, and both
//! feed the same interpreter. Use these as starting points and tweak the
//! returned records.

use crate::grammar::LSystem;
use crate::params::TreeParameters;

/// Broadleaf preset: wide branch angles, wobbly paths, a power-tapered trunk
/// and stochastic rules so no two expansions share a silhouette.
pub fn deciduous() -> (LSystem, TreeParameters) {
    let mut lsys = LSystem::new();
    lsys.set_seed(4817);
    lsys.set_axiom("A");
    lsys.add_rule('A', "F[+A][-A]", 1.0);
    lsys.add_rule('A', "F[+A][-A][&A]", 0.5);
    lsys.add_rule('A', "FA", 0.3);

    let params = TreeParameters {
        generations: 5,
        enable_crookedness: true,
        enable_trunk_taper: true,
        enable_branch_skipping: true,
        ..TreeParameters::default()
    };
    (lsys, params)
}

/// Conifer preset: a dominant leader with whorls of near-horizontal laterals
/// that droop under a slight downward tropism.
pub fn conifer() -> (LSystem, TreeParameters) {
    let mut lsys = LSystem::new();
    lsys.set_seed(9201);
    lsys.set_axiom("A");
    // The leader keeps climbing; laterals (B) stay flat and sparse.
    lsys.add_rule('A', "F[+B][-B][&B][^B]A", 1.0);
    lsys.add_rule('B', "F[+B][-B]", 1.0);
    lsys.add_rule('B', "FB", 0.4);

    let params = TreeParameters {
        generations: 5,
        branch_angle_deg: 50.0,
        branch_radius_decay: 0.55,
        branch_length_decay: 0.6,
        branch_pitch_min_deg: 5.0,
        branch_pitch_max_deg: 20.0,
        max_branches_per_node: 4,
        enable_trunk_taper: true,
        enable_tropism: true,
        tropism_strength: 0.02,
        ..TreeParameters::default()
    };
    (lsys, params)
}
