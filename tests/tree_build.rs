// tests/tree_build.rs
use arbor_mesh::{
    LSystem, MeshVertex, TreeInterpreter, TreeParameters, append_sphere, append_tapered_cylinder,
    build_tree_vertices, profiles,
};
use glam::{Mat4, Vec3};

/// Default parameters with every stochastic modifier silenced, so vertex
/// counts and radii are exact.
fn quiet_params() -> TreeParameters {
    TreeParameters {
        angle_jitter_deg: 0.0,
        length_jitter_frac: 0.0,
        radius_jitter_frac: 0.0,
        use_phyllotaxis_roll: false,
        branch_pitch_min_deg: 0.0,
        branch_pitch_max_deg: 0.0,
        twig_length_boost: 0.0,
        ..TreeParameters::default()
    }
}

/// Vertices per drawn segment with joint spheres on.
fn verts_per_segment(p: &TreeParameters) -> usize {
    (6 * p.radial_segments + 6 * p.sphere_lat_segments * p.sphere_lon_segments) as usize
}

#[test]
fn empty_sentence_builds_nothing() {
    let verts = TreeInterpreter::new(quiet_params()).interpret("").unwrap();
    assert!(verts.is_empty());
}

#[test]
fn vertex_count_single_segment() {
    let p = quiet_params();
    let verts = TreeInterpreter::new(p.clone()).interpret("F").unwrap();
    assert_eq!(verts.len(), verts_per_segment(&p));
}

#[test]
fn vertex_count_branching_sentence() {
    let p = quiet_params();
    // Trunk segment plus one segment in each of two branches.
    let verts = TreeInterpreter::new(p.clone()).interpret("F[+F][-F]").unwrap();
    assert_eq!(verts.len(), 3 * verts_per_segment(&p));
}

#[test]
fn sphere_toggle_changes_count() {
    let mut p = quiet_params();
    p.add_spheres = false;
    let verts = TreeInterpreter::new(p.clone()).interpret("FF").unwrap();
    assert_eq!(verts.len(), 2 * 6 * p.radial_segments as usize);
}

#[test]
fn bud_and_unknown_symbols_emit_nothing() {
    let p = quiet_params();
    let verts = TreeInterpreter::new(p).interpret("ABAB??zz").unwrap();
    assert!(verts.is_empty());
}

#[test]
fn nothing_draws_below_min_radius() {
    let mut p = quiet_params();
    // Base radius under the visibility threshold; radii only decay from
    // there, so no segment may ever draw.
    p.base_radius = 0.005;
    assert!(p.base_radius < p.min_radius);
    let verts = TreeInterpreter::new(p).interpret("FFFF[F][F]").unwrap();
    assert!(verts.is_empty());
}

#[test]
fn unbalanced_close_is_ignored() {
    let p = quiet_params();
    // Pops on an empty stack are silent no-ops; the F after them still draws.
    let verts = TreeInterpreter::new(p.clone()).interpret("]]]F").unwrap();
    assert_eq!(verts.len(), verts_per_segment(&p));
}

#[test]
fn trunk_prune_stops_the_tree() {
    let mut p = quiet_params();
    p.enable_pruning = true;
    p.prune_radius = 1.0; // above base_radius: the first segment prunes
    let verts = TreeInterpreter::new(p).interpret("FFFF").unwrap();
    assert!(verts.is_empty());
}

#[test]
fn branch_prune_restores_parent() {
    let mut p = quiet_params();
    p.enable_pruning = true;
    // Trunk radii (0.3, then 0.255) stay above the cutoff; the branch radius
    // 0.255 * 0.7 falls below it, so both branches prune at their first
    // segment and the turtle falls back to the trunk.
    p.prune_radius = 0.2;
    let verts = TreeInterpreter::new(p.clone()).interpret("F[F][F]F").unwrap();
    assert_eq!(verts.len(), 2 * verts_per_segment(&p));
}

#[test]
fn per_node_branch_cap_skips_extras() {
    let mut p = quiet_params();
    p.max_branches_per_node = 1;
    let verts = TreeInterpreter::new(p.clone()).interpret("F[F][F]").unwrap();
    // The second bracket at the same node is skipped wholesale.
    assert_eq!(verts.len(), 2 * verts_per_segment(&p));
}

#[test]
fn branch_spacing_blocks_early_branches() {
    let mut p = quiet_params();
    p.min_branch_spacing = 2;
    // One trunk segment before the first bracket: too soon, skipped. Two
    // before the second: accepted.
    let verts = TreeInterpreter::new(p.clone()).interpret("F[F]F[F]").unwrap();
    assert_eq!(verts.len(), 3 * verts_per_segment(&p));
}

#[test]
fn thin_segments_cannot_branch() {
    let mut p = quiet_params();
    p.min_radius_for_branch = 1.0; // nothing is ever thick enough
    let verts = TreeInterpreter::new(p.clone()).interpret("F[F][F]").unwrap();
    assert_eq!(verts.len(), verts_per_segment(&p));
}

#[test]
fn fixed_seed_build_is_deterministic() {
    let sentence = {
        let mut lsys = LSystem::new();
        lsys.set_axiom("A");
        lsys.add_rule('A', "F[+A][-A]", 1.0);
        lsys.generate(4).unwrap()
    };
    let mut p = TreeParameters::default();
    p.enable_crookedness = true;
    p.enable_trunk_taper = true;
    p.enable_tropism = true;

    let a = TreeInterpreter::new(p.clone()).interpret(&sentence).unwrap();
    let b = TreeInterpreter::new(p).interpret(&sentence).unwrap();
    assert_eq!(a, b);
}

#[test]
fn first_segment_starts_at_base_translation() {
    let p = quiet_params();
    let verts = TreeInterpreter::new(p.clone()).interpret("F").unwrap();
    // Sphere vertices come first and are centered on the segment bottom.
    let min_y = verts
        .iter()
        .map(|v| v.position.y)
        .fold(f32::INFINITY, f32::min);
    // Lowest point is the sphere's south cap: base y minus the radius.
    assert!((min_y - (p.base_translation.y - p.base_radius)).abs() < 1e-4);
}

#[test]
fn zero_segment_builders_emit_nothing() {
    let mut out: Vec<MeshVertex> = Vec::new();
    append_tapered_cylinder(&mut out, 1.0, 0.5, 0.4, &Mat4::IDENTITY, 0).unwrap();
    append_sphere(&mut out, 0.5, &Mat4::IDENTITY, 0, 8).unwrap();
    append_sphere(&mut out, 0.5, &Mat4::IDENTITY, 6, 0).unwrap();
    assert!(out.is_empty());
}

#[test]
fn sphere_vertex_count() {
    let mut out = Vec::new();
    append_sphere(&mut out, 1.0, &Mat4::IDENTITY, 6, 8).unwrap();
    assert_eq!(out.len(), 6 * 6 * 8);
}

#[test]
fn cylinder_respects_world_transform() {
    let mut at_origin = Vec::new();
    append_tapered_cylinder(&mut at_origin, 2.0, 0.5, 0.25, &Mat4::IDENTITY, 8).unwrap();

    let offset = Vec3::new(3.0, -1.0, 7.0);
    let mut moved = Vec::new();
    append_tapered_cylinder(&mut moved, 2.0, 0.5, 0.25, &Mat4::from_translation(offset), 8)
        .unwrap();

    assert_eq!(at_origin.len(), moved.len());
    for (a, b) in at_origin.iter().zip(&moved) {
        assert!((b.position - (a.position + offset)).length() < 1e-5);
        // Pure translation leaves normals alone.
        assert_eq!(a.normal, b.normal);
    }
}

#[test]
fn cylinder_normals_and_tangents_are_unit_and_orthogonal() {
    let mut out = Vec::new();
    append_tapered_cylinder(&mut out, 1.5, 0.4, 0.3, &Mat4::IDENTITY, 12).unwrap();
    for v in &out {
        assert!((v.normal.length() - 1.0).abs() < 1e-4);
        assert!((v.tangent.truncate().length() - 1.0).abs() < 1e-4);
        assert!(v.normal.dot(v.tangent.truncate()).abs() < 1e-4);
        assert_eq!(v.tangent.w, 1.0);
        // Lateral-surface normals are radial: no vertical component.
        assert!(v.normal.y.abs() < 1e-6);
    }
}

#[test]
fn vertex_layout_is_twelve_packed_floats() {
    // Renderer contract: 3 + 3 + 2 + 4 f32 per vertex, no padding.
    assert_eq!(std::mem::size_of::<MeshVertex>(), 12 * 4);
    let mut out = Vec::new();
    append_sphere(&mut out, 1.0, &Mat4::IDENTITY, 2, 2).unwrap();
    let bytes: &[u8] = bytemuck::cast_slice(&out);
    assert_eq!(bytes.len(), out.len() * 48);
}

#[test]
fn profiles_build_whole_triangles() {
    for (mut lsys, params) in [profiles::deciduous(), profiles::conifer()] {
        let verts = build_tree_vertices(&params, &mut lsys).unwrap();
        assert!(!verts.is_empty());
        assert_eq!(verts.len() % 3, 0);
    }
}
