//! Error types for graph construction and evaluation.

use thiserror::Error;

/// Error type for operation graph handling.
#[derive(Error, Debug)]
pub enum GraphError {
    /// An input reference points past the declared input count.
    #[error("input index {index} out of range for {num_inputs} declared inputs")]
    InvalidInputIndex {
        /// Offending index
        index: usize,
        /// Declared input count
        num_inputs: usize,
    },

    /// Raster construction failed.
    #[error(transparent)]
    Core(#[from] pixelgraph_core::Error),
}

/// Result type for operation graph handling.
pub type GraphResult<T> = Result<T, GraphError>;
