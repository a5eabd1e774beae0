//! Turtle cursor state for tree interpretation.

use glam::{Mat4, Quat, Vec3};
use serde::{Deserialize, Serialize};

/// Bounded mean-reverting wobble accumulators, one per local axis.
///
/// Each axis keeps the current walk value and the value last applied as a
/// rotation, so a step can apply only the incremental delta. Branch starts
/// zero the whole struct: branches grow out straight instead of inheriting
/// the parent's wobble.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize)]
pub struct CrookState {
    /// Walk value per axis (yaw, pitch, roll), in degrees.
    pub value: [f32; 3],
    /// Value already applied to the orientation, per axis, in degrees.
    pub prev: [f32; 3],
}

/// The state of the tree-building turtle.
///
/// Copied by value onto an explicit stack at every `[` and restored at every
/// `]`, mirroring the bracket structure of the sentence.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct TreeTurtle {
    /// Current world-space position of the cursor.
    pub position: Vec3,

    /// Current world-space orientation. The growth direction is local +Y.
    pub rotation: Quat,

    /// Bottom radius of the next segment to draw.
    pub radius: f32,

    /// Length of the next segment to draw.
    pub length: f32,

    /// Drawn segments along the path from the root, never reset.
    pub depth: u32,

    /// Drawn segments since the last branch start on this path.
    pub local_depth: u32,

    /// Branches opened at the current node; reset by every drawn segment.
    pub branch_count: u32,

    /// Crookedness walk state.
    pub crook: CrookState,
}

impl Default for TreeTurtle {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Quat::IDENTITY,
            radius: 0.1,
            length: 1.0,
            depth: 0,
            local_depth: 0,
            branch_count: 0,
            crook: CrookState::default(),
        }
    }
}

impl TreeTurtle {
    /// Returns the turtle's local up direction (Y-axis) in world space.
    /// This is the direction segments grow along.
    pub fn up(&self) -> Vec3 {
        self.rotation * Vec3::Y
    }

    /// Returns the turtle's local forward direction (Z-axis) in world space.
    pub fn forward(&self) -> Vec3 {
        self.rotation * Vec3::Z
    }

    /// Returns the turtle's local right direction (X-axis) in world space.
    pub fn right(&self) -> Vec3 {
        self.rotation * Vec3::X
    }

    /// The cursor's rigid transform, for handing to the primitive builders.
    pub fn transform(&self) -> Mat4 {
        Mat4::from_rotation_translation(self.rotation, self.position)
    }

    /// Rotates the turtle around its local X axis by `angle` radians (pitch).
    pub fn rotate_local_x(&mut self, angle: f32) {
        self.rotation *= Quat::from_axis_angle(Vec3::X, angle);
    }

    /// Rotates the turtle around its local Y axis by `angle` radians (roll).
    pub fn rotate_local_y(&mut self, angle: f32) {
        self.rotation *= Quat::from_axis_angle(Vec3::Y, angle);
    }

    /// Rotates the turtle around its local Z axis by `angle` radians (yaw).
    pub fn rotate_local_z(&mut self, angle: f32) {
        self.rotation *= Quat::from_axis_angle(Vec3::Z, angle);
    }
}
