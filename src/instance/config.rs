//! Instance generation parameters.

use super::matrix::CostMatrix;
use super::points::{generate, Point};
use super::rng::MinStd;
use crate::error::{TspError, TspResult};

/// Parameters for a reproducible random Euclidean instance.
///
/// # Examples
///
/// ```
/// use u_tsp_exact::instance::InstanceConfig;
///
/// let instance = InstanceConfig::default()
///     .with_vertices(6)
///     .with_seed(1)
///     .build()
///     .unwrap();
/// assert_eq!(instance.matrix.n(), 6);
/// assert_eq!(instance.points.len(), 6);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct InstanceConfig {
    /// Number of vertices.
    pub vertices: usize,

    /// Coordinates are drawn from `[0, bound - 1]`.
    pub bound: u32,

    /// Generator seed.
    pub seed: u32,
}

impl Default for InstanceConfig {
    fn default() -> Self {
        Self {
            vertices: 10,
            bound: 20_000,
            seed: MinStd::DEFAULT_SEED,
        }
    }
}

/// A generated instance: the vertex locations and their cost matrix.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Instance {
    pub points: Vec<Point>,
    pub matrix: CostMatrix,
    pub bound: u32,
}

impl InstanceConfig {
    pub fn with_vertices(mut self, n: usize) -> Self {
        self.vertices = n;
        self
    }

    pub fn with_bound(mut self, bound: u32) -> Self {
        self.bound = bound;
        self
    }

    pub fn with_seed(mut self, seed: u32) -> Self {
        self.seed = seed;
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> TspResult<()> {
        if self.vertices == 0 {
            return Err(TspError::InvalidVertexCount { n: 0 });
        }
        if self.bound == 0 {
            return Err(TspError::config("bound must be positive"));
        }
        // Keeps bound² and every squared distance inside u64 comfortably.
        if self.bound > 1 << 30 {
            return Err(TspError::config(format!(
                "bound must be at most 2^30, got {}",
                self.bound
            )));
        }
        Ok(())
    }

    /// Draws the points with a fresh generator and builds the matrix.
    pub fn build(&self) -> TspResult<Instance> {
        self.validate()?;
        let mut rng = MinStd::new(self.seed);
        let points = generate(self.vertices, self.bound, &mut rng);
        let matrix = CostMatrix::from_points(&points, self.bound)?;
        log::debug!(
            "instance: n={} bound={} seed={} max_edge={}",
            self.vertices,
            self.bound,
            self.seed,
            matrix.max_edge()
        );
        Ok(Instance {
            points,
            matrix,
            bound: self.bound,
        })
    }
}
