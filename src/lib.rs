#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

//! Quantify variability in an ordinated space.
//!
//! A plane is fitted through a reference group of samples (for example the
//! controls of an experiment) using the first three ordination axes, and
//! every sample is scored by its distance to the part of that plane spanned
//! by the reference group.
//!
//! ```no_run
//! use reference_plane::{distance_to_reference_plane, parse};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let ordination = parse::ordination::parse_str(&std::fs::read_to_string("pcoa.txt")?)?;
//! let metadata = parse::metadata::parse_str(&std::fs::read_to_string("mapping.tsv")?)?;
//! let distances =
//!     distance_to_reference_plane(&ordination.samples, &metadata, "Control", Some("Treatment"))?;
//! for (sample, distance) in distances.iter() {
//!     println!("{sample}\t{distance}");
//! }
//! # Ok(())
//! # }
//! ```

pub mod geom;
pub mod parse;
pub mod reference;
pub mod table;

pub use geom::{
    PlaneCoefficients, Point3, fit_plane, point_to_plane_distance, point_to_segment_distance,
};
pub use reference::{
    DistanceResult, ReferencePlaneError, ReferencePlaneOptions, distance_to_reference_plane,
    distance_to_reference_plane_with_options,
};
pub use table::{MetadataTable, SampleTable};
