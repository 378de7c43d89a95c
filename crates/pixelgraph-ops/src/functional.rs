//! Functional evaluation strategy: nested calls, zero intermediate storage.
//!
//! Each output coordinate is computed by walking the graph top-down with
//! direct recursion; nothing is materialized. A convolution reading 9 taps of
//! an upstream subgraph recomputes that subgraph up to 9 times per pixel -
//! the trade is recomputation for O(1) space beyond the output buffer.
//!
//! # Node-Boundary Padding
//!
//! Every node's value at an out-of-range coordinate is 0, exactly as if the
//! node had been materialized into a plane and read back through the
//! zero-padded accessor. Without this, `Point` over `Input` consumed by a
//! downstream `Conv` would yield `f(0)` at the edge here but 0 under the
//! materializing strategy, breaking the equivalence contract between the two.

use pixelgraph_core::{Image, in_bounds};

use crate::node::OpNode;

/// Shared, read-only state threaded through every node evaluation call.
///
/// The original runtime reached the current input set through a global
/// pointer; here it is an explicit argument.
#[derive(Debug, Clone, Copy)]
pub struct EvalContext<'a> {
    inputs: &'a [Image<'a>],
    width: i64,
    height: i64,
}

impl<'a> EvalContext<'a> {
    /// Creates a context over `inputs`, all of which share `width x height`.
    pub fn new(inputs: &'a [Image<'a>], width: i64, height: i64) -> Self {
        Self {
            inputs,
            width,
            height,
        }
    }

    /// The input images, indexed by [`OpNode::Input`].
    #[inline]
    pub fn inputs(&self) -> &'a [Image<'a>] {
        self.inputs
    }
}

/// Evaluates `node` at `(x, y)` by direct function composition.
///
/// Expects a graph already validated by [`crate::OpGraph::new`]; input
/// references index `ctx.inputs()` directly.
pub fn eval(node: &OpNode, x: i64, y: i64, ctx: &EvalContext<'_>) -> i64 {
    if !in_bounds(ctx.width, ctx.height, x, y) {
        return 0;
    }
    match node {
        OpNode::Input(index) => ctx.inputs[*index].sample(x, y),
        OpNode::Point { f, src } => f(eval(src, x, y, ctx)),
        OpNode::Conv { kernel, src } => {
            let mut acc = 0;
            for dy in -1..=1 {
                for dx in -1..=1 {
                    acc += eval(src, x + dx, y + dy, ctx) * kernel.weight(dx, dy);
                }
            }
            acc
        }
        OpNode::Join { f, left, right } => f(eval(left, x, y, ctx), eval(right, x, y, ctx)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::{Kernel3, OpNode};

    fn checker_3x3() -> Vec<u8> {
        vec![0, 255, 0, 255, 0, 255, 0, 255, 0]
    }

    #[test]
    fn test_input_ref_reads_image() {
        let data = checker_3x3();
        let imgs = [Image::new(&data, 3, 3).unwrap()];
        let ctx = EvalContext::new(&imgs, 3, 3);
        let node = OpNode::input(0);
        assert_eq!(eval(&node, 1, 0, &ctx), 255);
        assert_eq!(eval(&node, 0, 0, &ctx), 0);
    }

    #[test]
    fn test_pointwise_applies_transform() {
        let data = vec![10u8, 20, 30, 40];
        let imgs = [Image::new(&data, 2, 2).unwrap()];
        let ctx = EvalContext::new(&imgs, 2, 2);
        let node = OpNode::pointwise(|v| v * 3 - 5, OpNode::input(0));
        assert_eq!(eval(&node, 1, 1, &ctx), 115);
    }

    #[test]
    fn test_zero_kernel_is_zero_everywhere() {
        let data = vec![200u8; 16];
        let imgs = [Image::new(&data, 4, 4).unwrap()];
        let ctx = EvalContext::new(&imgs, 4, 4);
        let node = OpNode::convolve_3x3(Kernel3::new([[0; 3]; 3]), OpNode::input(0));
        for y in 0..4 {
            for x in 0..4 {
                assert_eq!(eval(&node, x, y, &ctx), 0);
            }
        }
    }

    #[test]
    fn test_convolution_zero_pads_at_edges() {
        // Identity kernel shifted one column left: out(x, y) = in(x + 1, y).
        let mut k = [[0i64; 3]; 3];
        k[1][2] = 1;
        let data = vec![1u8, 2, 3, 4, 5, 6, 7, 8, 9];
        let imgs = [Image::new(&data, 3, 3).unwrap()];
        let ctx = EvalContext::new(&imgs, 3, 3);
        let node = OpNode::convolve_3x3(Kernel3::new(k), OpNode::input(0));
        assert_eq!(eval(&node, 0, 1, &ctx), 5);
        assert_eq!(eval(&node, 2, 1, &ctx), 0); // tap past the right edge
    }

    #[test]
    fn test_join_average_truncates_toward_zero() {
        let data = vec![0u8, 3];
        let imgs = [Image::new(&data, 2, 1).unwrap()];
        let ctx = EvalContext::new(&imgs, 2, 1);
        let neg = OpNode::pointwise(|v| -v, OpNode::input(0));
        let zero = OpNode::pointwise(|_| 0, OpNode::input(0));
        let node = OpNode::join_average(neg, zero);
        // (-3 + 0) / 2 truncates to -1, not -2.
        assert_eq!(eval(&node, 1, 0, &ctx), -1);
    }

    #[test]
    fn test_node_boundary_is_zero_padded() {
        // A +1 pointwise node must read as 0 outside the raster, not f(0) = 1,
        // so a downstream convolution sees the same taps a materialized plane
        // would provide.
        let data = vec![5u8; 9];
        let imgs = [Image::new(&data, 3, 3).unwrap()];
        let ctx = EvalContext::new(&imgs, 3, 3);
        let lifted = OpNode::pointwise(|v| v + 1, OpNode::input(0));
        assert_eq!(eval(&lifted, -1, 0, &ctx), 0);

        let mut k = [[0i64; 3]; 3];
        k[1][0] = 1; // out(x, y) = lifted(x - 1, y)
        let node = OpNode::convolve_3x3(Kernel3::new(k), lifted);
        assert_eq!(eval(&node, 0, 0, &ctx), 0);
        assert_eq!(eval(&node, 1, 0, &ctx), 6);
    }
}
