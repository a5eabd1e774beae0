//! Tree generation parameters.

use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Immutable configuration record read by the interpreter for one build.
///
/// Structural constants first, then the procedural-modifier toggles and
/// magnitudes. Defaults are the deciduous baseline; see
/// [`profiles`](crate::profiles) for full presets. The record is plain data
/// and (de)serializes, so presets can live in asset files.
///
/// Contradictory tunings (e.g. `min_radius` above `base_radius`, so nothing
/// ever draws) are not detected; that is an operator error, not a runtime
/// fault.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TreeParameters {
    /// Rewrite passes applied to the grammar's axiom.
    pub generations: u32,

    /// Bottom radius of the first trunk segment.
    pub base_radius: f32,
    /// Length of the first trunk segment.
    pub base_length: f32,

    /// Per-segment radius decay.
    pub radius_decay: f32,
    /// Per-segment length decay.
    pub length_decay: f32,
    /// Extra radius decay applied when entering a branch.
    pub branch_radius_decay: f32,
    /// Extra length decay applied when entering a branch. Children shorten
    /// faster than trunk segments.
    pub branch_length_decay: f32,

    /// Base angle for the yaw/pitch/roll rotation symbols, degrees.
    pub branch_angle_deg: f32,

    /// Radial slices per cylinder segment.
    pub radial_segments: u32,

    /// Emit a joint sphere at the bottom of every drawn segment.
    pub add_spheres: bool,
    pub sphere_lat_segments: u32,
    pub sphere_lon_segments: u32,

    /// World-space position of the tree base.
    pub base_translation: Vec3,

    /// Seed for the interpreter's own RNG stream. Deliberately separate from
    /// the grammar's seed so toggling turtle-side jitter never changes which
    /// grammar alternatives fire.
    pub seed: u64,

    /// Jitter applied to rotation symbols, degrees.
    pub angle_jitter_deg: f32,
    /// +/- fraction of segment length.
    pub length_jitter_frac: f32,
    /// +/- fraction of segment radius.
    pub radius_jitter_frac: f32,

    /// Distribute branch planes around the parent axis.
    pub use_phyllotaxis_roll: bool,
    /// Golden-angle-ish divergence between consecutive siblings, degrees.
    pub phyllotaxis_deg: f32,
    pub branch_roll_jitter_deg: f32,

    /// Segments below this bottom radius advance without drawing.
    pub min_radius: f32,
    /// Floor for segment length after jitter and depth shrink.
    pub min_length: f32,

    /// Abandon the rest of a branch once its radius falls under
    /// `prune_radius`. Independent of `min_radius`: pruning kills the
    /// subtree, the draw threshold only hides geometry.
    pub enable_pruning: bool,
    pub prune_radius: f32,

    /// Randomly drop whole branches past `branch_skip_start_depth`.
    pub enable_branch_skipping: bool,
    pub branch_skip_start_depth: u32,
    /// Upper bound skip probability, reached `depth_full_effect` segments
    /// past the start depth.
    pub branch_skip_max_prob: f32,
    /// Branches never open on segments thinner than this.
    pub min_radius_for_branch: f32,
    /// Minimum drawn segments between branches on one path.
    pub min_branch_spacing: u32,
    /// Branches allowed per node before further `[` are skipped.
    pub max_branches_per_node: u32,

    /// Depth at which depth-keyed effects saturate.
    pub depth_full_effect: u32,
    /// Fraction of the rotation angle (and its jitter) retained at full
    /// depth. Deep symbols rotate less and with less noise.
    pub depth_angle_scale: f32,

    /// Random pitch kick range at branch start, degrees. Spreads branches
    /// into true 3D instead of a single plane.
    pub branch_pitch_min_deg: f32,
    pub branch_pitch_max_deg: f32,

    /// Bend growth toward `tropism_dir` a little each segment.
    pub enable_tropism: bool,
    pub tropism_dir: Vec3,
    /// Step angle, radians. Keep small.
    pub tropism_strength: f32,
    /// Extra step angle on thin branches, radians.
    pub tropism_thin_boost: f32,

    /// 0..1, higher = shorter twigs at high depth.
    pub twig_length_boost: f32,
    /// Hard cap: len <= max_len_to_radius * radius. Prevents long noodles
    /// once the radius is tiny.
    pub max_len_to_radius: f32,

    /// Organic zig-zag along a path.
    pub enable_crookedness: bool,
    /// Fresh per-step noise amplitude, degrees.
    pub crook_strength_deg: f32,
    /// Mean-reversion factor per step, 0..1.
    pub crook_damping: f32,
    /// Walk bound per axis, degrees.
    pub crook_max_deg: f32,
    /// Fraction of the wobble applied when the radius has decayed to zero;
    /// thick segments get the full wobble.
    pub crook_thin_scale: f32,

    /// Non-linear taper for the un-branched main trunk: thins slowly near
    /// the base, faster near the tip.
    pub enable_trunk_taper: bool,
    /// Radius decay near the trunk base.
    pub trunk_taper_base_decay: f32,
    /// Radius decay near the trunk tip.
    pub trunk_taper_tip_decay: f32,
    /// Power of the interpolation curve between the two decays.
    pub trunk_taper_power: f32,
}

impl Default for TreeParameters {
    fn default() -> Self {
        Self {
            generations: 4,

            base_radius: 0.3,
            base_length: 1.5,

            radius_decay: 0.85,
            length_decay: 0.95,
            branch_radius_decay: 0.7,
            branch_length_decay: 0.75,

            branch_angle_deg: 25.0,

            radial_segments: 12,

            add_spheres: true,
            sphere_lat_segments: 6,
            sphere_lon_segments: 8,

            base_translation: Vec3::new(0.0, -3.0, 0.0),

            seed: 1337,

            angle_jitter_deg: 10.0,
            length_jitter_frac: 0.15,
            radius_jitter_frac: 0.10,

            use_phyllotaxis_roll: true,
            phyllotaxis_deg: 137.5,
            branch_roll_jitter_deg: 20.0,

            min_radius: 0.01,
            min_length: 0.05,

            enable_pruning: false,
            prune_radius: 0.02,

            enable_branch_skipping: false,
            branch_skip_start_depth: 6,
            branch_skip_max_prob: 0.75,
            min_radius_for_branch: 0.035,
            min_branch_spacing: 0,
            max_branches_per_node: 3,

            depth_full_effect: 10,
            depth_angle_scale: 0.5,

            branch_pitch_min_deg: 10.0,
            branch_pitch_max_deg: 35.0,

            enable_tropism: false,
            tropism_dir: Vec3::new(0.0, -1.0, 0.0),
            tropism_strength: 0.015,
            tropism_thin_boost: 0.08,

            twig_length_boost: 0.30,
            max_len_to_radius: 12.0,

            enable_crookedness: false,
            crook_strength_deg: 6.0,
            crook_damping: 0.65,
            crook_max_deg: 25.0,
            crook_thin_scale: 0.35,

            enable_trunk_taper: false,
            trunk_taper_base_decay: 0.96,
            trunk_taper_tip_decay: 0.78,
            trunk_taper_power: 2.0,
        }
    }
}
