//! # ff_thermo
//!
//! Nearest neighbor helix stacking parameters (ΔH, ΔS) and the helix
//! initiation, symmetry and terminal A·U terms, loaded from a parameter
//! directory into immutable lookup tables.

/// Default parameter directory and file names.
pub mod parameters;

/// Record parsers for the parameter files.
pub mod parameter_parsing;

/// Nucleotide, Stack, ...
mod nucleotides;

mod label;
mod error;
mod parameter_table;

pub use nucleotides::*;
pub use label::*;
pub use error::*;
pub use parameter_table::*;
