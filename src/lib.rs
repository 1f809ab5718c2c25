//! Exact solver for the symmetric Traveling Salesman Problem.
//!
//! Provides:
//!
//! - **Instances**: reproducible random Euclidean instances drawn from a
//!   Park–Miller generator, or cost matrices built from explicit points or
//!   rows.
//! - **Branch-and-bound (BnB)**: depth-first enumeration of tours anchored at
//!   vertex 0, pruning every prefix that cannot beat the incumbent. Optional
//!   minimum-spanning-tree bound, call budget and cancellation.
//! - **Enumeration**: an independent brute-force reference for
//!   cross-checking small instances.
//! - **Reporting and tracing**: one-line summaries and a Python `turtle`
//!   script replaying each improving tour.
//!
//! # Example
//!
//! ```
//! use u_tsp_exact::bnb::{BnbConfig, BnbRunner};
//! use u_tsp_exact::instance::InstanceConfig;
//! use u_tsp_exact::report::RunReport;
//!
//! let instance = InstanceConfig::default().with_vertices(8).with_seed(1).build().unwrap();
//! let result = BnbRunner::run(&instance.matrix, &BnbConfig::default()).unwrap();
//! assert_eq!(result.best_cost, Some(53_591));
//! println!("{}", RunReport::new(8, &result));
//! ```

pub mod bnb;
pub mod enumerate;
pub mod error;
pub mod instance;
pub mod report;
pub mod trace;

pub use error::{TspError, TspResult};
