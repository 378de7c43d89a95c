//! # pixelgraph-exec
//!
//! The output driver of the pixelgraph runtime.
//!
//! [`evaluate`] iterates every coordinate of the output grid, invokes an
//! injected per-pixel evaluator, narrows the result through a selectable
//! [`ClampMode`], and writes the output sample. The evaluator is any pure
//! `(x, y, inputs) -> i64` callable: a graph strategy adapter from
//! [`render`], or an externally generated composed function standing in for
//! one.
//!
//! [`render`] is the graph entry point: it checks arity, picks a
//! [`Strategy`], and drives [`evaluate`] with the matching adapter. The two
//! strategies are output-equivalent by contract.
//!
//! # Example
//!
//! ```rust
//! use pixelgraph_exec::{ClampMode, Strategy, render};
//! use pixelgraph_ops::{Kernel3, OpGraph, OpNode};
//!
//! let input: Vec<u8> = (0..64).map(|i| (i * 3) as u8).collect();
//! let mut output = vec![0u8; 64];
//!
//! let root = OpNode::convolve_3x3(Kernel3::sobel_x(), OpNode::input(0));
//! let graph = OpGraph::new(root, 1).unwrap();
//!
//! render(
//!     &graph,
//!     Strategy::Functional,
//!     8,
//!     8,
//!     &mut output,
//!     &[&input],
//!     ClampMode::Saturate,
//! )
//! .unwrap();
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

mod clamp;
mod driver;
mod error;

pub use clamp::ClampMode;
pub use driver::{Strategy, evaluate, render};
pub use error::{ExecError, ExecResult};
