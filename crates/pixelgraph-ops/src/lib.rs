//! # pixelgraph-ops
//!
//! Operation graph node semantics and the two evaluation strategies.
//!
//! An image pipeline is a small DAG of [`OpNode`]s rooted at one output node:
//!
//! - [`OpNode::Input`] - reference to one of the caller's input images
//! - [`OpNode::Point`] - unary pointwise transform of an upstream node
//! - [`OpNode::Conv`] - 3x3 convolution of an upstream node, zero-padded
//! - [`OpNode::Join`] - binary combine of two upstream nodes
//!
//! The graph is built once (typically by a pipeline compiler) and reused
//! unchanged across every evaluation. Two strategies evaluate it:
//!
//! - [`functional`] - nested calls per coordinate, zero intermediate storage,
//!   upstream subgraphs recomputed per convolution tap
//! - [`materialize`] - one full buffer per node, every coordinate computed
//!   exactly once, O(depth x width x height) space
//!
//! The two are interchangeable: for any graph and input set they produce
//! bit-identical output. That equivalence is the correctness contract of this
//! crate.
//!
//! # Example
//!
//! ```rust
//! use pixelgraph_ops::{Kernel3, OpGraph, OpNode};
//!
//! let src = OpNode::input(0);
//! let edges = OpNode::convolve_3x3(Kernel3::sobel_x(), src.clone());
//! let lifted = OpNode::pointwise(|v| v + 1, src);
//! let root = OpNode::join_average(lifted, edges);
//! let graph = OpGraph::new(root, 1).unwrap();
//! # let _ = graph;
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

mod error;
pub mod functional;
pub mod materialize;
pub mod node;

pub use error::{GraphError, GraphResult};
pub use functional::EvalContext;
pub use node::{JoinFn, Kernel3, OpGraph, OpNode, PointFn};
