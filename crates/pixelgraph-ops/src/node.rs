//! Operation graph node types.
//!
//! Nodes form an immutable DAG; children are held behind [`Arc`] so a
//! subgraph can feed several consumers without duplication. Nodes carry no
//! mutable state - every evaluation is a pure function of coordinate and
//! upstream values.
//!
//! # Kernel Convention
//!
//! A [`Kernel3`] is indexed `k[dy + 1][dx + 1]`: the **row** is the vertical
//! offset, the **column** the horizontal offset. A pipeline compiler emitting
//! coefficient tables must use the same convention.

use std::fmt;
use std::sync::Arc;

use crate::error::{GraphError, GraphResult};

/// Injected unary transform for [`OpNode::Point`].
pub type PointFn = Arc<dyn Fn(i64) -> i64 + Send + Sync>;

/// Injected binary combine for [`OpNode::Join`].
pub type JoinFn = Arc<dyn Fn(i64, i64) -> i64 + Send + Sync>;

/// 3x3 signed integer convolution kernel.
///
/// Indexed `k[dy + 1][dx + 1]` (row = vertical offset, column = horizontal
/// offset); see [`Kernel3::weight`].
///
/// # Example
///
/// ```rust
/// use pixelgraph_ops::Kernel3;
///
/// let k = Kernel3::sobel_x();
/// assert_eq!(k.weight(-1, 0), -2);
/// assert_eq!(k.weight(1, 0), 2);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Kernel3([[i64; 3]; 3]);

impl Kernel3 {
    /// Creates a kernel from its coefficient rows.
    ///
    /// `rows[dy + 1][dx + 1]` is the weight of the tap at offset `(dx, dy)`.
    pub const fn new(rows: [[i64; 3]; 3]) -> Self {
        Self(rows)
    }

    /// Horizontal Sobel edge detector.
    pub const fn sobel_x() -> Self {
        Self([[-1, 0, 1], [-2, 0, 2], [-1, 0, 1]])
    }

    /// Vertical Sobel edge detector.
    pub const fn sobel_y() -> Self {
        Self([[-1, -2, -1], [0, 0, 0], [1, 2, 1]])
    }

    /// Returns the weight of the tap at offset `(dx, dy)`, each in `-1..=1`.
    #[inline]
    pub fn weight(&self, dx: i64, dy: i64) -> i64 {
        self.0[(dy + 1) as usize][(dx + 1) as usize]
    }
}

/// One step in an image operation graph.
///
/// The node set is closed: an input reference, a pointwise transform, a 3x3
/// convolution, and a binary join. Constructors return `Arc<OpNode>` so
/// shared subgraphs are expressed by cloning the handle.
pub enum OpNode {
    /// Resolves to the sample of input image `index` at the coordinate.
    Input(usize),
    /// Unary transform of the upstream value at the same coordinate.
    Point {
        /// The injected transform.
        f: PointFn,
        /// Upstream node.
        src: Arc<OpNode>,
    },
    /// Weighted 3x3 neighborhood sum of the upstream node, zero-padded.
    Conv {
        /// Coefficient table, `k[dy + 1][dx + 1]`.
        kernel: Kernel3,
        /// Upstream node.
        src: Arc<OpNode>,
    },
    /// Binary combine of two upstream values at the same coordinate.
    Join {
        /// The injected combine.
        f: JoinFn,
        /// Left upstream node.
        left: Arc<OpNode>,
        /// Right upstream node.
        right: Arc<OpNode>,
    },
}

impl OpNode {
    /// Creates a reference to input image `index`.
    pub fn input(index: usize) -> Arc<Self> {
        Arc::new(OpNode::Input(index))
    }

    /// Creates a pointwise transform of `src`.
    pub fn pointwise<F>(f: F, src: Arc<Self>) -> Arc<Self>
    where
        F: Fn(i64) -> i64 + Send + Sync + 'static,
    {
        Arc::new(OpNode::Point {
            f: Arc::new(f),
            src,
        })
    }

    /// Creates a 3x3 convolution of `src`.
    pub fn convolve_3x3(kernel: Kernel3, src: Arc<Self>) -> Arc<Self> {
        Arc::new(OpNode::Conv { kernel, src })
    }

    /// Creates a binary join of `left` and `right`.
    pub fn join<F>(f: F, left: Arc<Self>, right: Arc<Self>) -> Arc<Self>
    where
        F: Fn(i64, i64) -> i64 + Send + Sync + 'static,
    {
        Arc::new(OpNode::Join {
            f: Arc::new(f),
            left,
            right,
        })
    }

    /// Creates the reference join: the arithmetic mean `(l + r) / 2`.
    ///
    /// Division uses `i64` semantics, i.e. truncation toward zero, so a
    /// negative odd sum rounds toward zero: `(-3 + 0) / 2 == -1`.
    pub fn join_average(left: Arc<Self>, right: Arc<Self>) -> Arc<Self> {
        Self::join(|l, r| (l + r) / 2, left, right)
    }
}

impl fmt::Debug for OpNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OpNode::Input(index) => f.debug_tuple("Input").field(index).finish(),
            OpNode::Point { src, .. } => f.debug_struct("Point").field("src", src).finish(),
            OpNode::Conv { kernel, src } => f
                .debug_struct("Conv")
                .field("kernel", kernel)
                .field("src", src)
                .finish(),
            OpNode::Join { left, right, .. } => f
                .debug_struct("Join")
                .field("left", left)
                .field("right", right)
                .finish(),
        }
    }
}

/// A validated operation graph: a root node plus its declared input arity.
///
/// Construction walks the DAG once and rejects any [`OpNode::Input`] whose
/// index falls outside `[0, num_inputs)`, so evaluation never has to range
/// check input references again.
#[derive(Debug, Clone)]
pub struct OpGraph {
    root: Arc<OpNode>,
    num_inputs: usize,
}

impl OpGraph {
    /// Wraps `root` as a graph expecting exactly `num_inputs` input images.
    ///
    /// # Errors
    ///
    /// [`GraphError::InvalidInputIndex`] if any input reference is out of
    /// range.
    pub fn new(root: Arc<OpNode>, num_inputs: usize) -> GraphResult<Self> {
        validate(&root, num_inputs)?;
        Ok(Self { root, num_inputs })
    }

    /// Returns the root node.
    #[inline]
    pub fn root(&self) -> &Arc<OpNode> {
        &self.root
    }

    /// Returns the declared input count.
    #[inline]
    pub fn num_inputs(&self) -> usize {
        self.num_inputs
    }
}

fn validate(node: &OpNode, num_inputs: usize) -> GraphResult<()> {
    match node {
        OpNode::Input(index) => {
            if *index >= num_inputs {
                return Err(GraphError::InvalidInputIndex {
                    index: *index,
                    num_inputs,
                });
            }
            Ok(())
        }
        OpNode::Point { src, .. } | OpNode::Conv { src, .. } => validate(src, num_inputs),
        OpNode::Join { left, right, .. } => {
            validate(left, num_inputs)?;
            validate(right, num_inputs)
        }
    }
}
