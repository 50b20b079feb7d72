//! Split a 3D triangle mesh that is too large for a printer's build chamber
//! into parts that each fit, using a sequence of planar cuts organized as a
//! [binary space partition](mesh::bsp::BspTree).
//!
//! The cut sequence is chosen by a [beam search](planner) over a library of
//! candidate directions and evenly spaced offsets, scored by an
//! [objective](objective::Objective) that favors few parts and well-used
//! print volumes.
//!
//! ```rust
//! use chopper::{PlannerConfig, WorkingVolume, mesh::Mesh, plan, planner::normals};
//! use nalgebra::Point3;
//!
//! let bar = Mesh::cuboid(Point3::origin(), Point3::new(12.0, 2.0, 2.0));
//! let config = PlannerConfig {
//!     volume: WorkingVolume::new(5.0, 5.0, 5.0),
//!     normals: normals::axis_normals(),
//!     max_iterations: 20,
//!     ..PlannerConfig::default()
//! };
//! let tree = plan(bar, config.clone()).unwrap();
//! assert!(tree.fits_in_volume(&config.volume));
//! ```
//!
//! # Features
//! #### Default
//! - **f64**: use f64 as Real
//! - [**stl-io**](https://en.wikipedia.org/wiki/STL_(file_format)): `.stl` export
//! - [**obj-io**](https://en.wikipedia.org/wiki/Wavefront_.obj_file): `.obj` import and export
//!
//! #### Optional
//! - **f32**: use f32 as Real, this conflicts with f64
//! - **parallel**: use rayon to evaluate cut directions on all cores

#![forbid(unsafe_code)]
#![deny(unused)]
#![warn(clippy::missing_const_for_fn, clippy::approx_constant, clippy::all)]

pub mod errors;
pub mod float_types;
pub mod io;
pub mod mesh;
pub mod objective;
pub mod planner;
pub mod triangulated;
pub mod volume;

#[cfg(any(
    all(feature = "f64", feature = "f32"),
    not(any(feature = "f64", feature = "f32"))
))]
compile_error!("Either 'f64' or 'f32' feature must be specified, but not both");

pub use errors::PartitionError;
pub use mesh::Mesh;
pub use mesh::bsp::{BspTree, Side, cut};
pub use mesh::plane::Plane;
pub use objective::{Objective, Weights};
pub use planner::{BeamPlanner, PlannerConfig, plan};
pub use volume::WorkingVolume;
