//! Grid iteration and strategy dispatch.

use pixelgraph_core::{Image, ImageMut};
use pixelgraph_ops::{EvalContext, OpGraph, functional, materialize};
use tracing::{debug, trace};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::clamp::ClampMode;
use crate::error::{ExecError, ExecResult};

/// Which evaluation strategy [`render`] drives the graph with.
///
/// The choice affects space and time cost only; output is bit-identical.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    /// Nested calls per coordinate, zero intermediate storage.
    Functional,
    /// One full buffer per node, each coordinate computed once.
    Materializing,
}

/// Drives an injected per-pixel evaluator over the whole output grid.
///
/// Constructs an [`Image`] view over every input buffer and a write view
/// over `output` (all `width x height`), invokes
/// `evaluator(x, y, inputs) -> i64` for every coordinate, narrows through
/// `clamp_mode`, and writes exactly `width * height` bytes. Per-pixel results
/// are independent, so iteration order is unobservable and rows are
/// partitioned across rayon workers when the `parallel` feature is on.
///
/// The evaluator must be pure and must reach pixel data only through the
/// views it is handed.
///
/// # Errors
///
/// [`pixelgraph_core::Error`] variants for bad dimensions or buffer lengths.
pub fn evaluate<F>(
    width: i64,
    height: i64,
    output: &mut [u8],
    inputs: &[&[u8]],
    clamp_mode: ClampMode,
    evaluator: F,
) -> ExecResult<()>
where
    F: Fn(i64, i64, &[Image<'_>]) -> i64 + Sync,
{
    trace!(width, height, num_inputs = inputs.len(), ?clamp_mode, "evaluate");
    let views = build_views(inputs, width, height)?;
    let mut out = ImageMut::new(output, width, height)?;
    write_grid(&mut out, &views, clamp_mode, &evaluator);
    Ok(())
}

/// Evaluates `graph` over `inputs` into `output` under the chosen strategy.
///
/// # Errors
///
/// [`ExecError::ArityMismatch`] if `inputs.len()` differs from the graph's
/// declared input count, plus everything [`evaluate`] can return.
pub fn render(
    graph: &OpGraph,
    strategy: Strategy,
    width: i64,
    height: i64,
    output: &mut [u8],
    inputs: &[&[u8]],
    clamp_mode: ClampMode,
) -> ExecResult<()> {
    if graph.num_inputs() != inputs.len() {
        return Err(ExecError::ArityMismatch {
            declared: graph.num_inputs(),
            supplied: inputs.len(),
        });
    }
    debug!(?strategy, width, height, "rendering graph");

    match strategy {
        Strategy::Functional => evaluate(width, height, output, inputs, clamp_mode, |x, y, views| {
            let ctx = EvalContext::new(views, width, height);
            functional::eval(graph.root(), x, y, &ctx)
        }),
        Strategy::Materializing => {
            let views = build_views(inputs, width, height)?;
            let plane = materialize::eval(graph, &views, width, height)?;
            evaluate(width, height, output, inputs, clamp_mode, |x, y, _| {
                plane.sample(x, y)
            })
        }
    }
}

fn build_views<'a>(inputs: &[&'a [u8]], width: i64, height: i64) -> ExecResult<Vec<Image<'a>>> {
    inputs
        .iter()
        .map(|buf| Image::new(buf, width, height).map_err(ExecError::from))
        .collect()
}

fn write_grid<F>(out: &mut ImageMut<'_>, views: &[Image<'_>], clamp_mode: ClampMode, evaluator: &F)
where
    F: Fn(i64, i64, &[Image<'_>]) -> i64 + Sync,
{
    #[cfg(feature = "parallel")]
    {
        let row_len = out.width() as usize;
        out.data_mut()
            .par_chunks_mut(row_len)
            .enumerate()
            .for_each(|(y, row)| {
                for (x, px) in row.iter_mut().enumerate() {
                    *px = clamp_mode.apply(evaluator(x as i64, y as i64, views));
                }
            });
    }

    #[cfg(not(feature = "parallel"))]
    for y in 0..out.height() {
        for x in 0..out.width() {
            let value = evaluator(x, y, views);
            out.write_at(x, y, clamp_mode.apply(value));
        }
    }
}
