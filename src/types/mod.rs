//! Small validated value types shared across the crate.

mod resolution;

pub use resolution::GridResolution;
