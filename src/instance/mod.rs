//! Problem instances.
//!
//! Random Euclidean instances are drawn from a Park–Miller generator so that
//! a `(vertices, bound, seed)` triple always names the same problem. The
//! cost matrix can also be built from explicit points or rows.

mod config;
mod matrix;
mod points;
mod rng;

pub use config::{Instance, InstanceConfig};
pub use matrix::CostMatrix;
pub use points::{generate, Point};
pub use rng::MinStd;
