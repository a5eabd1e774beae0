//! Vertex record and world-space primitive builders.
//!
//! The builders are pure appenders: given the same inputs they emit the same
//! vertices, in the same order, with no shared state. The interpreter calls
//! them to accumulate the flat triangle list handed to the renderer.

use crate::error::GrowthError;
use bytemuck::{Pod, Zeroable};
use glam::{Mat3, Mat4, Vec2, Vec3, Vec4};
use serde::{Deserialize, Serialize};
use std::f32::consts::{PI, TAU};

/// One vertex of the unindexed triangle list.
///
/// Layout contract with the rendering collaborator: position (3 f32),
/// normal (3 f32), uv (2 f32), tangent + handedness sign (4 f32), in that
/// order, tightly packed. Every 3 consecutive vertices form one triangle.
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable, Serialize, Deserialize)]
pub struct MeshVertex {
    pub position: Vec3,
    pub normal: Vec3,
    pub uv: Vec2,
    pub tangent: Vec4,
}

/// Appends the lateral surface of a tapered cylinder (frustum) running from
/// local height `0` to `length`, as `radial_segments * 2` unshared triangles.
///
/// Each radial slice is flat-shaded with the normal (and tangent) taken at
/// the slice's mid-angle rather than at its two edge angles. That is a
/// deliberate approximation the downstream shading was tuned against; at low
/// `radial_segments` the faceting is visible and expected.
///
/// Positions go through the full affine `transform`; normals and tangents
/// through its 3x3 linear part. The interpreter only ever feeds rigid
/// transforms, so no inverse-transpose is needed.
///
/// A zero `radial_segments` appends nothing.
pub fn append_tapered_cylinder(
    out: &mut Vec<MeshVertex>,
    length: f32,
    radius_bottom: f32,
    radius_top: f32,
    transform: &Mat4,
    radial_segments: u32,
) -> Result<(), GrowthError> {
    try_grow(out, radial_segments as usize * 6)?;
    let normal_matrix = Mat3::from_mat4(*transform);

    for i in 0..radial_segments {
        let t0 = i as f32 / radial_segments as f32;
        let t1 = (i + 1) as f32 / radial_segments as f32;
        let a0 = t0 * TAU;
        let a1 = t1 * TAU;

        let p0b = Vec3::new(radius_bottom * a0.cos(), 0.0, radius_bottom * a0.sin());
        let p1b = Vec3::new(radius_bottom * a1.cos(), 0.0, radius_bottom * a1.sin());
        let p0t = Vec3::new(radius_top * a0.cos(), length, radius_top * a0.sin());
        let p1t = Vec3::new(radius_top * a1.cos(), length, radius_top * a1.sin());

        let a_mid = 0.5 * (a0 + a1);
        let normal = (normal_matrix * Vec3::new(a_mid.cos(), 0.0, a_mid.sin())).normalize();
        // Tangent follows increasing u (circumference direction) at the same
        // mid-angle, so it stays orthogonal to the facet normal.
        let tangent = (normal_matrix * Vec3::new(-a_mid.sin(), 0.0, a_mid.cos())).normalize();
        let tangent = tangent.extend(1.0);

        let tp0b = transform.transform_point3(p0b);
        let tp1b = transform.transform_point3(p1b);
        let tp0t = transform.transform_point3(p0t);
        let tp1t = transform.transform_point3(p1t);

        let vert = |position: Vec3, uv: Vec2| MeshVertex {
            position,
            normal,
            uv,
            tangent,
        };

        out.push(vert(tp0b, Vec2::new(t0, 0.0)));
        out.push(vert(tp0t, Vec2::new(t0, 1.0)));
        out.push(vert(tp1t, Vec2::new(t1, 1.0)));

        out.push(vert(tp0b, Vec2::new(t0, 0.0)));
        out.push(vert(tp1t, Vec2::new(t1, 1.0)));
        out.push(vert(tp1b, Vec2::new(t1, 0.0)));
    }

    Ok(())
}

/// Appends a UV sphere of the given radius, centered at the transform's
/// translation. Used by the interpreter to hide the seam between consecutive
/// tapered segments.
///
/// Zero `lat_segments` or `lon_segments` appends nothing.
pub fn append_sphere(
    out: &mut Vec<MeshVertex>,
    radius: f32,
    transform: &Mat4,
    lat_segments: u32,
    lon_segments: u32,
) -> Result<(), GrowthError> {
    try_grow(out, lat_segments as usize * lon_segments as usize * 6)?;
    let normal_matrix = Mat3::from_mat4(*transform);

    let vert = |local_pos: Vec3, local_n: Vec3, uv: Vec2| {
        // Longitude direction; degenerates at the poles where local_n is
        // vertical, so fall back to +X there.
        let local_t = Vec3::new(-local_n.z, 0.0, local_n.x);
        let local_t = if local_t.length_squared() > 1e-12 {
            local_t
        } else {
            Vec3::X
        };
        MeshVertex {
            position: transform.transform_point3(local_pos * radius),
            normal: (normal_matrix * local_n).normalize(),
            uv,
            tangent: (normal_matrix * local_t).normalize().extend(1.0),
        }
    };

    for lat in 0..lat_segments {
        let v0 = lat as f32 / lat_segments as f32;
        let v1 = (lat + 1) as f32 / lat_segments as f32;
        let phi0 = v0 * PI;
        let phi1 = v1 * PI;

        for lon in 0..lon_segments {
            let u0 = lon as f32 / lon_segments as f32;
            let u1 = (lon + 1) as f32 / lon_segments as f32;
            let th0 = u0 * TAU;
            let th1 = u1 * TAU;

            let n00 = Vec3::new(phi0.sin() * th0.cos(), phi0.cos(), phi0.sin() * th0.sin());
            let n01 = Vec3::new(phi0.sin() * th1.cos(), phi0.cos(), phi0.sin() * th1.sin());
            let n10 = Vec3::new(phi1.sin() * th0.cos(), phi1.cos(), phi1.sin() * th0.sin());
            let n11 = Vec3::new(phi1.sin() * th1.cos(), phi1.cos(), phi1.sin() * th1.sin());

            out.push(vert(n00, n00, Vec2::new(u0, v0)));
            out.push(vert(n10, n10, Vec2::new(u0, v1)));
            out.push(vert(n11, n11, Vec2::new(u1, v1)));

            out.push(vert(n00, n00, Vec2::new(u0, v0)));
            out.push(vert(n11, n11, Vec2::new(u1, v1)));
            out.push(vert(n01, n01, Vec2::new(u1, v0)));
        }
    }

    Ok(())
}

fn try_grow(out: &mut Vec<MeshVertex>, additional: usize) -> Result<(), GrowthError> {
    out.try_reserve(additional).map_err(|_| GrowthError::Emission {
        vertex_count: out.len(),
    })
}
