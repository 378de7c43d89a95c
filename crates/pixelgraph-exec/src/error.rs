//! Error types for the output driver.

use thiserror::Error;

/// Error type for driver entry points.
#[derive(Error, Debug)]
pub enum ExecError {
    /// The supplied input collection does not match the graph's declared
    /// arity.
    #[error("graph declares {declared} inputs but {supplied} were supplied")]
    ArityMismatch {
        /// Inputs the graph was built for
        declared: usize,
        /// Inputs actually supplied
        supplied: usize,
    },

    /// Graph validation or materialization failed.
    #[error(transparent)]
    Graph(#[from] pixelgraph_ops::GraphError),

    /// Raster view construction failed.
    #[error(transparent)]
    Core(#[from] pixelgraph_core::Error),
}

/// Result type for driver entry points.
pub type ExecResult<T> = Result<T, ExecError>;
