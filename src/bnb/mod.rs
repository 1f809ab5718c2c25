//! Exact branch-and-bound tour enumeration.
//!
//! Tours are built as prefixes anchored at vertex 0 and extended one vertex
//! at a time, in ascending vertex order. A prefix is abandoned as soon as
//! a lower bound on any completion reaches the cost of the best complete
//! tour found so far (the incumbent). When the search returns, the incumbent
//! is optimal.
//!
//! Two bounds are available through [`BoundKind`]: the plain prefix cost,
//! and the prefix cost plus a minimum spanning tree over what is left.
//!
//! # References
//!
//! - Little, Murty, Sweeney & Karel (1963), "An Algorithm for the Traveling
//!   Salesman Problem"
//! - Held & Karp (1970), "The Traveling-Salesman Problem and Minimum
//!   Spanning Trees"

mod bound;
mod config;
mod runner;
mod types;

pub use config::{BnbConfig, BoundKind};
pub use runner::{BnbResult, BnbRunner};
pub use types::TourObserver;
