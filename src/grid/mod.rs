//! In-memory grid types and shared filter primitives.
//!
//! Everything in the crate operates on [`TempGrid`], an owned single-channel
//! `f32` buffer in row-major layout, and [`BoolGrid`], a mask of identical
//! layout. Both are plain value objects: engines never mutate their inputs
//! and always allocate fresh outputs.

pub mod filters;
pub mod mask;
pub mod temp;

pub use self::filters::{box_mean, convolve1d, gaussian_smooth, Axis};
pub use self::mask::BoolGrid;
pub use self::temp::TempGrid;
