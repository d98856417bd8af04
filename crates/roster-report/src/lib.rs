//! roster-report: renders quiz score statistics.
//!
//! [`svg`] produces the histogram image written next to the data files;
//! [`text`] produces the same histogram for the terminal.

pub mod svg;
pub mod text;

pub use svg::write_histogram;
