//! # arbor-mesh
//!
//! Procedural tree mesh synthesis from stochastic L-Systems, producing
//! engine-agnostic geometry with glam.
//!
//! The pipeline is one-way: an [`LSystem`] expands an axiom through weighted
//! production rules into a sentence, and a [`TreeInterpreter`] walks that
//! sentence with a stack-based turtle, emitting a flat unindexed triangle
//! list ([`MeshVertex`]) that a renderer can upload as-is.
//!
//! ```no_run
//! use arbor_mesh::{build_tree_vertices, profiles};
//!
//! let (mut lsys, params) = profiles::deciduous();
//! let verts = build_tree_vertices(&params, &mut lsys)?;
//! # Ok::<(), arbor_mesh::GrowthError>(())
//! ```

pub mod error;
pub mod grammar;
pub mod interpreter;
pub mod mesh;
pub mod params;
pub mod profiles;
pub mod turtle;

pub use error::*;
pub use grammar::*;
pub use interpreter::*;
pub use mesh::*;
pub use params::*;
pub use turtle::*;

/// Expands the grammar and interprets the result in one call.
///
/// Both phases report their own failure: grammar expansion surfaces
/// [`GrowthError::Expansion`], geometry emission [`GrowthError::Emission`].
pub fn build_tree_vertices(
    params: &TreeParameters,
    lsystem: &mut LSystem,
) -> Result<Vec<MeshVertex>, GrowthError> {
    let sentence = lsystem.generate(params.generations)?;
    TreeInterpreter::new(params.clone()).interpret(&sentence)
}
