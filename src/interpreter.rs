//! Interpreter that converts an L-System sentence into tree geometry.
//!
//! The entry point is [`TreeInterpreter`]. Construct it with a
//! [`TreeParameters`] record, then call [`TreeInterpreter::interpret`] with a
//! sentence produced by [`LSystem::generate`](crate::grammar::LSystem::generate).
//! The result is a flat, unindexed triangle list of [`MeshVertex`].
//!
//! The interpreter owns its own RNG stream, seeded from
//! [`TreeParameters::seed`] and independent of the grammar's stream, so
//! turtle-side jitter never perturbs rule selection.

use crate::error::GrowthError;
use crate::grammar::symbol_census;
use crate::mesh::{MeshVertex, append_sphere, append_tapered_cylinder};
use crate::params::TreeParameters;
use crate::turtle::{CrookState, TreeTurtle};
use glam::{Quat, Vec3};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::f32::consts::PI;

/// Local rotation axis addressed by a rotation symbol.
enum TurnAxis {
    /// Local Z (`+` / `-`).
    Yaw,
    /// Local X (`&` / `^`).
    Pitch,
    /// Local Y (`\` / `/`).
    Roll,
}

/// Interprets L-System sentences as branching tree meshes.
pub struct TreeInterpreter {
    params: TreeParameters,
    rng: StdRng,
}

impl TreeInterpreter {
    /// Creates an interpreter whose RNG is seeded from `params.seed`.
    ///
    /// A fixed sentence + parameter record then yields an identical vertex
    /// buffer on every call to [`interpret`](Self::interpret).
    pub fn new(params: TreeParameters) -> Self {
        let rng = StdRng::seed_from_u64(params.seed);
        Self { params, rng }
    }

    /// Walks `sentence` one symbol at a time and accumulates world-space
    /// triangle geometry.
    ///
    /// # Symbols
    ///
    /// - `F` draws a tapered segment (plus an optional joint sphere) and
    ///   advances; below the visibility threshold it advances silently.
    /// - `A`, `B` are bud symbols: grammar rewrite targets, ignored here.
    /// - `+ - & ^ \ /` rotate about a local axis with jitter, attenuated
    ///   with depth; `|` is an exact half-turn.
    /// - `[` pushes the cursor (unless the whole branch is skipped),
    ///   `]` pops it. Popping an empty stack is ignored, so unbalanced
    ///   sentences degrade instead of crashing.
    /// - Anything else is ignored.
    pub fn interpret(&mut self, sentence: &str) -> Result<Vec<MeshVertex>, GrowthError> {
        let p = self.params.clone();
        if log::log_enabled!(log::Level::Trace) {
            log::trace!("sentence census: {:?}", symbol_census(sentence));
        }

        let mut verts: Vec<MeshVertex> = Vec::new();
        let mut cur = TreeTurtle {
            position: p.base_translation,
            rotation: Quat::IDENTITY,
            radius: p.base_radius,
            length: p.base_length,
            ..TreeTurtle::default()
        };
        let mut stack: Vec<TreeTurtle> = Vec::with_capacity(64);

        let mut drawn = 0usize;
        let mut hidden = 0usize;
        let mut skipped = 0usize;
        let mut pruned = 0usize;

        let bytes = sentence.as_bytes();
        let mut i = 0usize;
        while i < bytes.len() {
            match bytes[i] {
                b'F' => {
                    let depth_t = self.depth_t(cur.depth);
                    let radius_bottom = cur.radius * self.jitter_factor(p.radius_jitter_frac);

                    // The un-branched main trunk may taper along a power
                    // curve instead of the flat per-segment decay.
                    let decay = if stack.is_empty() && p.enable_trunk_taper {
                        let t = depth_t.powf(p.trunk_taper_power);
                        p.trunk_taper_base_decay
                            + (p.trunk_taper_tip_decay - p.trunk_taper_base_decay) * t
                    } else {
                        p.radius_decay
                    };
                    let radius_top = radius_bottom * decay;

                    let mut len = cur.length * self.jitter_factor(p.length_jitter_frac);
                    len *= 1.0 - p.twig_length_boost * depth_t;
                    len = len.min(p.max_len_to_radius * radius_bottom).max(p.min_length);

                    if p.enable_pruning && radius_bottom < p.prune_radius {
                        pruned += 1;
                        if stack.is_empty() {
                            // Pruning the trunk prunes the whole tree.
                            break;
                        }
                        // Abandon the rest of this branch: jump to its close
                        // bracket and let the `]` arm restore the parent.
                        i = match matching_close(bytes, i + 1) {
                            Some(j) => j,
                            None => bytes.len(),
                        };
                        continue;
                    }

                    // Draw visibility is a separate, smaller cutoff than the
                    // prune radius: invisible segments still advance.
                    if radius_bottom > p.min_radius {
                        let xform = cur.transform();
                        if p.add_spheres {
                            append_sphere(
                                &mut verts,
                                radius_bottom,
                                &xform,
                                p.sphere_lat_segments,
                                p.sphere_lon_segments,
                            )?;
                        }
                        append_tapered_cylinder(
                            &mut verts,
                            len,
                            radius_bottom,
                            radius_top,
                            &xform,
                            p.radial_segments,
                        )?;
                        drawn += 1;
                    } else {
                        hidden += 1;
                    }

                    cur.position += cur.up() * len;
                    // The cursor keeps the un-jittered decay chain; jitter is
                    // per-drawn-segment so noise never compounds along a path.
                    cur.radius *= decay;
                    cur.length *= p.length_decay;
                    cur.depth += 1;
                    cur.local_depth += 1;
                    cur.branch_count = 0;

                    if p.enable_crookedness {
                        self.apply_crookedness(&mut cur);
                    }
                    if p.enable_tropism {
                        self.apply_tropism(&mut cur);
                    }
                }

                // Bud symbols exist only to be rewritten.
                b'A' | b'B' => {}

                b'+' => self.turn(&mut cur, TurnAxis::Yaw, 1.0),
                b'-' => self.turn(&mut cur, TurnAxis::Yaw, -1.0),
                b'&' => self.turn(&mut cur, TurnAxis::Pitch, 1.0),
                b'^' => self.turn(&mut cur, TurnAxis::Pitch, -1.0),
                b'\\' => self.turn(&mut cur, TurnAxis::Roll, 1.0),
                b'/' => self.turn(&mut cur, TurnAxis::Roll, -1.0),
                // A scaled or jittered half-turn is no longer a flip; this
                // one stays exact.
                b'|' => cur.rotate_local_z(PI),

                b'[' => {
                    if self.should_skip_branch(&cur) {
                        skipped += 1;
                        // Consume the whole bracketed subsequence, close
                        // included: nothing was pushed, so the `]` must not
                        // pop.
                        i = match matching_close(bytes, i + 1) {
                            Some(j) => j + 1,
                            None => bytes.len(),
                        };
                        continue;
                    }

                    let sibling = cur.branch_count;
                    let at_trunk = stack.is_empty();
                    cur.branch_count += 1;
                    cur.local_depth = 0;
                    stack.push(cur);

                    // From here on `cur` is the child.
                    cur.branch_count = 0;
                    cur.radius *= p.branch_radius_decay;
                    cur.length *= p.branch_length_decay;
                    cur.crook = CrookState::default();

                    if p.use_phyllotaxis_roll {
                        let jitter = self
                            .rng
                            .random_range(-p.branch_roll_jitter_deg..=p.branch_roll_jitter_deg);
                        let roll_deg = if at_trunk {
                            // Trunk children split the circle into even
                            // buckets; elsewhere consecutive siblings diverge
                            // by the golden-ish angle.
                            sibling as f32 * (360.0 / p.max_branches_per_node.max(1) as f32)
                                + jitter
                        } else {
                            (sibling + 1) as f32 * p.phyllotaxis_deg + jitter
                        };
                        cur.rotate_local_y(roll_deg.to_radians());
                    }

                    // Pitch kick so branches spread in true 3D rather than
                    // staying in the plane the rotation symbols define.
                    let pitch = self
                        .rng
                        .random_range(p.branch_pitch_min_deg..=p.branch_pitch_max_deg);
                    cur.rotate_local_x(pitch.to_radians());
                }

                b']' => {
                    if let Some(parent) = stack.pop() {
                        cur = parent;
                    }
                    // Unbalanced close: ignore.
                }

                _ => {}
            }
            i += 1;
        }

        log::debug!(
            "tree build: {drawn} segments drawn, {hidden} hidden, {skipped} branches skipped, \
             {pruned} pruned, {} vertices, residual stack {}",
            verts.len(),
            stack.len()
        );
        Ok(verts)
    }

    /// Depth key for depth-scaled effects, saturated to `[0, 1]`.
    fn depth_t(&self, depth: u32) -> f32 {
        (depth as f32 / self.params.depth_full_effect.max(1) as f32).clamp(0.0, 1.0)
    }

    /// Multiplicative noise in `[1 - frac, 1 + frac]`.
    fn jitter_factor(&mut self, frac: f32) -> f32 {
        1.0 + self.rng.random_range(-frac..=frac)
    }

    /// Applies a jittered, depth-attenuated rotation about a local axis.
    fn turn(&mut self, cur: &mut TreeTurtle, axis: TurnAxis, sign: f32) {
        let p = &self.params;
        let jitter = self.rng.random_range(-p.angle_jitter_deg..=p.angle_jitter_deg);
        let scale = 1.0 + (p.depth_angle_scale - 1.0) * self.depth_t(cur.depth);
        let angle = ((p.branch_angle_deg * sign + jitter) * scale).to_radians();
        match axis {
            TurnAxis::Yaw => cur.rotate_local_z(angle),
            TurnAxis::Pitch => cur.rotate_local_x(angle),
            TurnAxis::Roll => cur.rotate_local_y(angle),
        }
    }

    /// Branch acceptance test for `[`.
    fn should_skip_branch(&mut self, cur: &TreeTurtle) -> bool {
        let p = &self.params;
        if cur.local_depth < p.min_branch_spacing {
            return true;
        }
        if cur.branch_count >= p.max_branches_per_node {
            return true;
        }
        if cur.radius < p.min_radius_for_branch {
            return true;
        }
        if p.enable_branch_skipping && cur.depth > p.branch_skip_start_depth {
            let t = ((cur.depth - p.branch_skip_start_depth) as f32
                / p.depth_full_effect.max(1) as f32)
                .clamp(0.0, 1.0);
            if self.rng.random_range(0.0..1.0) < p.branch_skip_max_prob * t {
                return true;
            }
        }
        false
    }

    /// One crookedness step: a damped random walk per local axis, applied as
    /// the incremental delta since the previous step so the path zig-zags
    /// without drifting unboundedly.
    fn apply_crookedness(&mut self, cur: &mut TreeTurtle) {
        let p = &self.params;
        let thin = (cur.radius / p.base_radius).clamp(0.0, 1.0);
        let scale = p.crook_thin_scale + (1.0 - p.crook_thin_scale) * thin;
        for axis in 0..3 {
            let noise = self
                .rng
                .random_range(-p.crook_strength_deg..=p.crook_strength_deg);
            let value = (cur.crook.value[axis] * p.crook_damping + noise)
                .clamp(-p.crook_max_deg, p.crook_max_deg);
            let delta = ((value - cur.crook.prev[axis]) * scale).to_radians();
            match axis {
                0 => cur.rotate_local_z(delta),
                1 => cur.rotate_local_x(delta),
                _ => cur.rotate_local_y(delta),
            }
            cur.crook.value[axis] = value;
            cur.crook.prev[axis] = value;
        }
    }

    /// Bends the heading toward the tropism target, rotating about the
    /// cursor's own position so translation is preserved. Thin branches bend
    /// more than thick ones.
    fn apply_tropism(&mut self, cur: &mut TreeTurtle) {
        let p = &self.params;
        let dir = p.tropism_dir.normalize_or_zero();
        if dir == Vec3::ZERO {
            return;
        }
        let heading = cur.up();
        let angle = heading.angle_between(dir);
        if !angle.is_finite() || angle < 1e-4 {
            return;
        }
        let axis = heading.cross(dir).normalize_or_zero();
        if axis == Vec3::ZERO {
            // Heading exactly opposes the target: no defined bend plane.
            return;
        }
        let thin = (1.0 - cur.radius / p.base_radius).clamp(0.0, 1.0);
        let step = (p.tropism_strength + p.tropism_thin_boost * thin).min(angle);
        cur.rotation = (Quat::from_axis_angle(axis, step) * cur.rotation).normalize();
    }
}

/// Index of the `]` closing the bracket context open at `from`, honoring
/// nesting. `None` on unbalanced sentences.
fn matching_close(bytes: &[u8], from: usize) -> Option<usize> {
    let mut depth = 0usize;
    for (j, &b) in bytes.iter().enumerate().skip(from) {
        match b {
            b'[' => depth += 1,
            b']' => {
                if depth == 0 {
                    return Some(j);
                }
                depth -= 1;
            }
            _ => {}
        }
    }
    None
}
