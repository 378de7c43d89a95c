//! Materializing evaluation strategy: one buffer per node, no recomputation.
//!
//! The graph is evaluated in topological (post-order) order. Each node fills
//! one [`Plane`] sized to the shared raster, computing every coordinate
//! exactly once; downstream nodes read already-materialized planes through
//! the same zero-padded accessor that input images use. Space cost is
//! O(depth x width x height), time cost is one pass per node.
//!
//! Shared subgraphs (the same `Arc<OpNode>` feeding several consumers) are
//! materialized once. Consumer counts are taken up front and a node's plane
//! is dropped as soon as its last consumer has been filled; nothing survives
//! the evaluation call.

use std::collections::HashMap;
use std::sync::Arc;

use pixelgraph_core::{Image, Plane};
use tracing::trace;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::error::GraphResult;
use crate::node::{OpGraph, OpNode};

/// Evaluates `graph` over `inputs` into a full plane of raw `i64` values.
///
/// The caller narrows the plane to output samples; no clamping happens here.
///
/// # Errors
///
/// Propagates plane allocation failures for invalid dimensions. Input arity
/// is the caller's contract (checked by the output driver).
pub fn eval(graph: &OpGraph, inputs: &[Image<'_>], width: i64, height: i64) -> GraphResult<Plane> {
    trace!(width, height, num_inputs = inputs.len(), "materializing graph");

    let mut remaining = HashMap::new();
    count_consumers(graph.root(), &mut remaining);

    let mut m = Materializer {
        inputs,
        width,
        height,
        planes: HashMap::new(),
        remaining,
    };
    for child in children(graph.root()) {
        m.materialize(child)?;
    }
    // The root is filled last and handed straight back; every intermediate
    // plane still held is released when the materializer drops.
    m.fill(graph.root())
}

/// Node identity within one evaluation: the `Arc` allocation address.
type NodeKey = usize;

#[inline]
fn key(node: &Arc<OpNode>) -> NodeKey {
    Arc::as_ptr(node) as NodeKey
}

fn children(node: &OpNode) -> Vec<&Arc<OpNode>> {
    match node {
        OpNode::Input(_) => Vec::new(),
        OpNode::Point { src, .. } | OpNode::Conv { src, .. } => vec![src],
        OpNode::Join { left, right, .. } => vec![left, right],
    }
}

/// Counts incoming edges per node so planes can be released after their last
/// consumer. Each node's subtree is walked once; extra edges to an
/// already-seen node only bump its count.
fn count_consumers(node: &Arc<OpNode>, counts: &mut HashMap<NodeKey, usize>) {
    for child in children(node) {
        let seen = counts.contains_key(&key(child));
        *counts.entry(key(child)).or_insert(0) += 1;
        if !seen {
            count_consumers(child, counts);
        }
    }
}

struct Materializer<'a> {
    inputs: &'a [Image<'a>],
    width: i64,
    height: i64,
    planes: HashMap<NodeKey, Plane>,
    remaining: HashMap<NodeKey, usize>,
}

impl Materializer<'_> {
    fn materialize(&mut self, node: &Arc<OpNode>) -> GraphResult<()> {
        if self.planes.contains_key(&key(node)) {
            return Ok(());
        }
        for child in children(node) {
            self.materialize(child)?;
        }
        let plane = self.fill(node)?;
        self.planes.insert(key(node), plane);

        // This node has consumed its children once; planes with no consumers
        // left are released here, not at the end of the evaluation.
        for child in children(node) {
            let ck = key(child);
            if let Some(r) = self.remaining.get_mut(&ck) {
                *r -= 1;
                if *r == 0 {
                    self.planes.remove(&ck);
                }
            }
        }
        Ok(())
    }

    /// Plane of an already-materialized node. Post-order traversal guarantees
    /// presence.
    #[inline]
    fn plane_of(&self, node: &Arc<OpNode>) -> &Plane {
        &self.planes[&key(node)]
    }

    fn fill(&self, node: &OpNode) -> GraphResult<Plane> {
        let mut plane = Plane::new(self.width, self.height)?;
        let row_len = self.width as usize;
        match node {
            OpNode::Input(index) => {
                let img = self.inputs[*index];
                fill_rows(&mut plane, row_len, |x, y| img.sample(x, y));
            }
            OpNode::Point { f, src } => {
                let src = self.plane_of(src);
                fill_rows(&mut plane, row_len, |x, y| f(src.sample(x, y)));
            }
            OpNode::Conv { kernel, src } => {
                let src = self.plane_of(src);
                fill_rows(&mut plane, row_len, |x, y| {
                    let mut acc = 0;
                    for dy in -1..=1 {
                        for dx in -1..=1 {
                            acc += src.sample(x + dx, y + dy) * kernel.weight(dx, dy);
                        }
                    }
                    acc
                });
            }
            OpNode::Join { f, left, right } => {
                let left = self.plane_of(left);
                let right = self.plane_of(right);
                fill_rows(&mut plane, row_len, |x, y| {
                    f(left.sample(x, y), right.sample(x, y))
                });
            }
        }
        Ok(plane)
    }
}

/// Fills a plane row by row. Rows are independent, so with the `parallel`
/// feature they are partitioned across rayon workers; the plane is complete
/// before this returns either way, which is the stage barrier between
/// topological levels.
fn fill_rows<F>(plane: &mut Plane, row_len: usize, f: F)
where
    F: Fn(i64, i64) -> i64 + Sync,
{
    #[cfg(feature = "parallel")]
    plane
        .data_mut()
        .par_chunks_mut(row_len)
        .enumerate()
        .for_each(|(y, row)| {
            for (x, out) in row.iter_mut().enumerate() {
                *out = f(x as i64, y as i64);
            }
        });

    #[cfg(not(feature = "parallel"))]
    for (y, row) in plane.data_mut().chunks_mut(row_len).enumerate() {
        for (x, out) in row.iter_mut().enumerate() {
            *out = f(x as i64, y as i64);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::functional::{self, EvalContext};
    use crate::node::Kernel3;

    fn ramp(width: i64, height: i64) -> Vec<u8> {
        (0..width * height)
            .map(|i| ((i * 7 + 3) % 256) as u8)
            .collect()
    }

    #[test]
    fn test_input_node_copies_image() {
        let data = ramp(4, 3);
        let imgs = [Image::new(&data, 4, 3).unwrap()];
        let graph = OpGraph::new(OpNode::input(0), 1).unwrap();
        let plane = eval(&graph, &imgs, 4, 3).unwrap();
        for y in 0..3 {
            for x in 0..4 {
                assert_eq!(plane.sample(x, y), imgs[0].sample(x, y));
            }
        }
    }

    #[test]
    fn test_zero_kernel_plane_is_zero() {
        let data = ramp(5, 5);
        let imgs = [Image::new(&data, 5, 5).unwrap()];
        let root = OpNode::convolve_3x3(Kernel3::new([[0; 3]; 3]), OpNode::input(0));
        let graph = OpGraph::new(root, 1).unwrap();
        let plane = eval(&graph, &imgs, 5, 5).unwrap();
        assert!(plane.data().iter().all(|&v| v == 0));
    }

    #[test]
    fn test_matches_functional_on_composite_graph() {
        let data = ramp(8, 6);
        let imgs = [Image::new(&data, 8, 6).unwrap()];

        let src = OpNode::input(0);
        let edges = OpNode::convolve_3x3(Kernel3::sobel_x(), src.clone());
        let lifted = OpNode::pointwise(|v| v + 1, src);
        let root = OpNode::join_average(lifted, edges);
        let graph = OpGraph::new(root, 1).unwrap();

        let plane = eval(&graph, &imgs, 8, 6).unwrap();
        let ctx = EvalContext::new(&imgs, 8, 6);
        for y in 0..6 {
            for x in 0..8 {
                assert_eq!(
                    plane.sample(x, y),
                    functional::eval(graph.root(), x, y, &ctx),
                    "mismatch at ({x}, {y})"
                );
            }
        }
    }

    #[test]
    fn test_shared_subgraph_materialized_once_matches_functional() {
        let data = ramp(6, 6);
        let imgs = [Image::new(&data, 6, 6).unwrap()];

        // `blurred` feeds both convolutions through the same Arc.
        let blurred = OpNode::pointwise(|v| v / 2, OpNode::input(0));
        let sx = OpNode::convolve_3x3(Kernel3::sobel_x(), blurred.clone());
        let sy = OpNode::convolve_3x3(Kernel3::sobel_y(), blurred);
        let root = OpNode::join_average(sx, sy);
        let graph = OpGraph::new(root, 1).unwrap();

        let plane = eval(&graph, &imgs, 6, 6).unwrap();
        let ctx = EvalContext::new(&imgs, 6, 6);
        for y in 0..6 {
            for x in 0..6 {
                assert_eq!(plane.sample(x, y), functional::eval(graph.root(), x, y, &ctx));
            }
        }
    }

    #[test]
    fn test_join_of_same_node_twice() {
        let data = ramp(3, 3);
        let imgs = [Image::new(&data, 3, 3).unwrap()];
        let shared = OpNode::pointwise(|v| v + 10, OpNode::input(0));
        let root = OpNode::join(|l, r| l + r, shared.clone(), shared);
        let graph = OpGraph::new(root, 1).unwrap();
        let plane = eval(&graph, &imgs, 3, 3).unwrap();
        for y in 0..3 {
            for x in 0..3 {
                assert_eq!(plane.sample(x, y), 2 * (imgs[0].sample(x, y) + 10));
            }
        }
    }
}
