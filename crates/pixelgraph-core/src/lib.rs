//! # pixelgraph-core
//!
//! Core raster types for the pixelgraph evaluation runtime.
//!
//! This crate provides the foundational types used throughout the pixelgraph
//! workspace:
//!
//! - [`Image`] - Read-only borrowed view over a caller-owned byte raster
//! - [`ImageMut`] - Write-capable counterpart used for the output raster
//! - [`Plane`] - Owned signed 64-bit raster for materialized intermediates
//! - [`zero_padded_read`] - The one and only boundary-policy accessor
//! - [`integer_sqrt`] - Truncating integer square root building block
//!
//! ## Design Philosophy
//!
//! Everything here borrows: an [`Image`] never owns pixel data, so views are
//! constructed fresh per evaluation call against caller-owned buffers and
//! carry no allocation of their own. The single exception is [`Plane`], which
//! holds the full-width intermediate values produced by the materializing
//! evaluation strategy.
//!
//! All out-of-range reads are **zero-padded** rather than rejected: a read at
//! any coordinate outside `[0, width) x [0, height)` yields sample value 0.
//! This is a specified behavior, not an error, and it is centralized in
//! [`zero_padded_read`] so no downstream code duplicates range checks.
//!
//! ## Memory Layout
//!
//! Rasters are single-channel, row-major, top-to-bottom:
//!
//! ```text
//! index = y * width + x
//! ```
//!
//! ## Used By
//!
//! - `pixelgraph-ops` - Operation graph evaluation
//! - `pixelgraph-exec` - Output driver

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod error;
pub mod math;
pub mod raster;

// Re-exports for convenience
pub use error::{Error, Result};
pub use math::integer_sqrt;
pub use raster::{Image, ImageMut, Plane, in_bounds, zero_padded_read};

/// Prelude module for convenient imports.
///
/// # Usage
///
/// ```
/// use pixelgraph_core::prelude::*;
/// ```
pub mod prelude {
    pub use crate::error::{Error, Result};
    pub use crate::math::integer_sqrt;
    pub use crate::raster::{Image, ImageMut, Plane, zero_padded_read};
}
