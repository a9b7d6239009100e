//! Pre-configured display specifications
//!
//! The logical canvas the `simple` renderer exposes.

pub mod remarkable;

pub use remarkable::*;
