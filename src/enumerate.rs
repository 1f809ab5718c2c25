//! Reference enumeration of every tour, without any pruning.
//!
//! Independent of [`bnb`](crate::bnb): permutations come from Heap's
//! algorithm and each cycle is costed from scratch. Only one direction of
//! each undirected cycle is costed, so `(n-1)!/2` cycles are visited for
//! `n >= 3`. Use it to cross-check the solver on small instances; it is
//! factorial in `n` with no shortcuts.
//!
//! # Reference
//!
//! Heap, B. R. (1963), "Permutations by Interchanges", *The Computer
//! Journal* 6(3), 293-298.

use crate::error::{TspError, TspResult};
use crate::instance::CostMatrix;

/// Outcome of a full enumeration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Enumeration {
    /// Minimum tour cost.
    pub best_cost: u64,
    /// First tour reaching it, in enumeration order.
    pub best_tour: Vec<usize>,
    /// Distinct undirected cycles costed.
    pub cycles: u64,
}

/// Costs every distinct Hamiltonian cycle through vertex 0.
///
/// # Errors
/// [`TspError::Asymmetric`] if the matrix is not symmetric: skipping
/// reversed cycles is only sound for symmetric costs.
/// [`TspError::CostOverflow`] if a tour cost could exceed `u64`.
///
/// # Examples
///
/// ```
/// use u_tsp_exact::enumerate;
/// use u_tsp_exact::instance::InstanceConfig;
///
/// let instance = InstanceConfig::default().with_vertices(5).build().unwrap();
/// let all = enumerate::min_tour(&instance.matrix).unwrap();
/// assert_eq!(all.cycles, 12); // 4! / 2
/// ```
pub fn min_tour(matrix: &CostMatrix) -> TspResult<Enumeration> {
    let n = matrix.n();
    if n == 0 {
        return Err(TspError::InvalidVertexCount { n });
    }
    matrix.validate()?;

    let mut perm: Vec<usize> = (1..n).collect();
    let mut best = Enumeration {
        best_cost: u64::MAX,
        best_tour: Vec::new(),
        cycles: 0,
    };
    let mut tour = Vec::with_capacity(n);

    let mut consider = |perm: &[usize], best: &mut Enumeration| {
        // A cycle and its reverse cost the same; keep the orientation whose
        // second vertex is smaller than its last.
        if perm.len() >= 2 && perm[0] > perm[perm.len() - 1] {
            return;
        }
        best.cycles += 1;
        tour.clear();
        tour.push(0);
        tour.extend_from_slice(perm);
        let cost = matrix.tour_cost(&tour);
        if cost < best.best_cost {
            best.best_cost = cost;
            best.best_tour.clone_from(&tour);
        }
    };

    consider(&perm, &mut best);
    let k = perm.len();
    let mut counters = vec![0usize; k];
    let mut i = 1;
    while i < k {
        if counters[i] < i {
            if i % 2 == 0 {
                perm.swap(0, i);
            } else {
                perm.swap(counters[i], i);
            }
            consider(&perm, &mut best);
            counters[i] += 1;
            i = 1;
        } else {
            counters[i] = 0;
            i += 1;
        }
    }

    Ok(best)
}
