//! Symmetric cost matrix.

use std::fmt;

use super::points::Point;
use crate::error::{TspError, TspResult};

/// An `n×n` table of non-negative integer edge costs, row-major.
///
/// Matrices built from points are symmetric with a sentinel diagonal that
/// no minimization can ever select. Matrices built from explicit rows keep
/// whatever was supplied; [`CostMatrix::validate`] checks symmetry.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "RawCostMatrix"))]
pub struct CostMatrix {
    n: usize,
    costs: Vec<u64>,
}

/// Unchecked wire form; every deserialized matrix goes through `TryFrom`.
#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct RawCostMatrix {
    n: usize,
    costs: Vec<u64>,
}

#[cfg(feature = "serde")]
impl TryFrom<RawCostMatrix> for CostMatrix {
    type Error = TspError;

    fn try_from(raw: RawCostMatrix) -> TspResult<Self> {
        let RawCostMatrix { n, costs } = raw;
        if n == 0 {
            return Err(TspError::InvalidVertexCount { n });
        }
        if n.checked_mul(n) != Some(costs.len()) {
            return Err(TspError::WrongLength { n, len: costs.len() });
        }
        Ok(Self { n, costs })
    }
}

impl CostMatrix {
    /// Builds the Euclidean matrix of `points`, distances truncated toward
    /// zero.
    ///
    /// The diagonal is `max(bound², n · max_edge + 1)`, strictly greater than
    /// the sum of any `n` off-diagonal costs.
    ///
    /// # Errors
    /// [`TspError::InvalidVertexCount`] if `points` is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use u_tsp_exact::instance::{CostMatrix, Point};
    ///
    /// let square = [(0, 0), (0, 10), (10, 10), (10, 0)].map(Point::from);
    /// let m = CostMatrix::from_points(&square, 100).unwrap();
    /// assert_eq!(m.get(0, 1), 10);
    /// assert_eq!(m.get(0, 2), 14);
    /// assert_eq!(m.get(2, 2), 10_000);
    /// ```
    pub fn from_points(points: &[Point], bound: u32) -> TspResult<Self> {
        let n = points.len();
        if n == 0 {
            return Err(TspError::InvalidVertexCount { n });
        }

        let mut costs = vec![0u64; n * n];
        let mut max_edge = 0u64;
        for i in 0..n {
            for j in (i + 1)..n {
                let d = points[i].distance(&points[j]);
                costs[i * n + j] = d;
                costs[j * n + i] = d;
                max_edge = max_edge.max(d);
            }
        }

        let bound = bound as u64;
        let sentinel = (bound * bound).max(max_edge * n as u64 + 1);
        for i in 0..n {
            costs[i * n + i] = sentinel;
        }

        Ok(Self { n, costs })
    }

    /// Builds a matrix from explicit rows.
    ///
    /// # Errors
    /// [`TspError::InvalidVertexCount`] for no rows, [`TspError::NotSquare`]
    /// when a row length differs from the row count.
    pub fn from_rows<R: AsRef<[u64]>>(rows: &[R]) -> TspResult<Self> {
        let n = rows.len();
        if n == 0 {
            return Err(TspError::InvalidVertexCount { n });
        }
        let mut costs = Vec::with_capacity(n * n);
        for (row, values) in rows.iter().enumerate() {
            let values = values.as_ref();
            if values.len() != n {
                return Err(TspError::NotSquare {
                    rows: n,
                    row,
                    len: values.len(),
                });
            }
            costs.extend_from_slice(values);
        }
        Ok(Self { n, costs })
    }

    /// Checks `cost[i][j] == cost[j][i]` for every pair, and that every sum
    /// of `n` edges fits in `u64`.
    ///
    /// # Errors
    /// [`TspError::Asymmetric`] naming the first offending pair in row-major
    /// order, or [`TspError::CostOverflow`] when `n · max_edge` does not fit.
    pub fn validate(&self) -> TspResult<()> {
        for i in 0..self.n {
            for j in (i + 1)..self.n {
                let forward = self.get(i, j);
                let backward = self.get(j, i);
                if forward != backward {
                    return Err(TspError::Asymmetric {
                        i,
                        j,
                        forward,
                        backward,
                    });
                }
            }
        }
        let max_edge = self.max_edge();
        if (self.n as u64).checked_mul(max_edge).is_none() {
            return Err(TspError::CostOverflow {
                n: self.n,
                max_edge,
            });
        }
        Ok(())
    }

    /// Number of vertices.
    pub fn n(&self) -> usize {
        self.n
    }

    /// Cost of the edge from `i` to `j`.
    #[inline]
    pub fn get(&self, i: usize, j: usize) -> u64 {
        self.costs[i * self.n + j]
    }

    /// Costs from vertex `i` to every vertex, diagonal included.
    pub fn row(&self, i: usize) -> &[u64] {
        &self.costs[i * self.n..(i + 1) * self.n]
    }

    /// Diagonal value of vertex 0.
    ///
    /// For matrices built from points this is the sentinel shared by the
    /// whole diagonal, `max(bound², n · max_edge + 1)`.
    pub fn sentinel(&self) -> u64 {
        self.get(0, 0)
    }

    /// Largest off-diagonal cost (0 for a single vertex).
    pub fn max_edge(&self) -> u64 {
        (0..self.n)
            .flat_map(|i| (0..self.n).filter(move |&j| j != i).map(move |j| (i, j)))
            .map(|(i, j)| self.get(i, j))
            .max()
            .unwrap_or(0)
    }

    /// Cost of the closed tour visiting `tour` in order and returning to
    /// `tour[0]`. A single vertex costs nothing. Saturates at `u64::MAX` on
    /// matrices that fail the overflow check in [`CostMatrix::validate`].
    pub fn tour_cost(&self, tour: &[usize]) -> u64 {
        if tour.len() < 2 {
            return 0;
        }
        tour.windows(2)
            .map(|w| self.get(w[0], w[1]))
            .chain(std::iter::once(self.get(tour[tour.len() - 1], tour[0])))
            .fold(0u64, u64::saturating_add)
    }
}

impl fmt::Display for CostMatrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for i in 0..self.n {
            write!(f, "[")?;
            for (j, c) in self.row(i).iter().enumerate() {
                if j > 0 {
                    write!(f, ", ")?;
                }
                write!(f, "{c}")?;
            }
            writeln!(f, "]")?;
        }
        Ok(())
    }
}
