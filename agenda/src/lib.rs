//! Weekly location planning for a student's timetable.
//!
//! Everything in this crate is pure: timetable records go in, a
//! [`LocationGrid`] comes out.
#![warn(
    unreachable_pub,
    missing_debug_implementations,
    missing_docs,
    clippy::pedantic
)]

mod derivation;
mod entry;
mod grid;
mod labels;
mod week;

pub use derivation::*;
pub use entry::*;
pub use grid::*;
pub use labels::*;
pub use week::*;
