//! reMarkable Display Specifications
//!
//! The fixed canvas that the `simple` renderer lays widgets out on, and
//! detection of the tablet generation.
//!
//! # Features
//!
//! - **no_std compatible** - Only `Model::detect` needs the `std` feature
//! - **Model detection** - Decide whether the frame-buffer shim is required
//!
//! # Example
//!
//! ```
//! use carta_specs::devices::REMARKABLE_CANVAS;
//! use carta_specs::Model;
//!
//! // Centre of the layout canvas
//! assert_eq!(REMARKABLE_CANVAS.percent_x(50.0), 690.0);
//! assert_eq!(REMARKABLE_CANVAS.percent_y(50.0), 910.0);
//!
//! assert!(Model::from_machine("reMarkable 2.0").needs_framebuffer_shim());
//! ```
//!
//! # Custom Display Specs
//!
//! ```
//! use carta_specs::DisplaySpec;
//!
//! const HALF_CANVAS: DisplaySpec = DisplaySpec {
//!     name: "Half canvas",
//!     width: 690,
//!     height: 910,
//! };
//! assert_eq!(HALF_CANVAS.percent_x(100.0), 690.0);
//! ```

#![cfg_attr(not(feature = "std"), no_std)]

mod display_spec;
pub mod devices;
mod model;

pub use display_spec::DisplaySpec;
pub use model::Model;
