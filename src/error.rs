//! Error types for instance construction and search.

use thiserror::Error;

/// Result alias used throughout the crate.
pub type TspResult<T> = Result<T, TspError>;

/// Everything that can go wrong before a search starts.
///
/// Once the recursion is running there are no error paths: pruned branches,
/// cost ties and exhausted budgets are ordinary outcomes reported through
/// [`BnbResult`](crate::bnb::BnbResult).
#[derive(Debug, Error)]
pub enum TspError {
    /// No tour exists for this many vertices.
    #[error("invalid vertex count {n}: at least one vertex is required")]
    InvalidVertexCount {
        /// The rejected vertex count.
        n: usize,
    },

    /// Explicit rows do not form a square matrix.
    #[error("cost matrix is not square: {rows} rows but row {row} has {len} entries")]
    NotSquare {
        /// Number of rows supplied.
        rows: usize,
        /// First offending row.
        row: usize,
        /// Length of the offending row.
        len: usize,
    },

    /// A flat cost table whose length is not `n²`.
    #[error("cost matrix declares {n} vertices but has {len} entries")]
    WrongLength {
        /// Declared vertex count.
        n: usize,
        /// Number of entries supplied.
        len: usize,
    },

    /// `cost[i][j] != cost[j][i]`.
    #[error("cost matrix is not symmetric: cost[{i}][{j}] = {forward} but cost[{j}][{i}] = {backward}")]
    Asymmetric {
        i: usize,
        j: usize,
        forward: u64,
        backward: u64,
    },

    /// A tour of `n` edges could exceed `u64::MAX`.
    #[error("edge costs too large: {n} edges of cost {max_edge} overflow u64")]
    CostOverflow {
        /// Number of vertices.
        n: usize,
        /// Largest off-diagonal cost.
        max_edge: u64,
    },

    /// A configuration value is out of range.
    #[error("invalid configuration: {message}")]
    InvalidConfig {
        /// What was wrong.
        message: String,
    },

    /// Trace export failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl TspError {
    pub(crate) fn config(message: impl Into<String>) -> Self {
        TspError::InvalidConfig {
            message: message.into(),
        }
    }
}
