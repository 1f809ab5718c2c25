//! Depth-first branch-and-bound over tour prefixes.
//!
//! # Algorithm
//!
//! 1. Start from the prefix `[0]` with every other vertex unvisited
//! 2. At each call:
//!    a. If nothing is left to visit, close the tour back to 0 and keep it
//!       if strictly cheaper than the incumbent
//!    b. Otherwise, for each unvisited vertex in ascending order, extend the
//!       prefix by it unless the bound says the extension cannot beat the
//!       incumbent, recurse, then undo the extension
//! 3. The incumbent after the last call is an optimal tour
//!
//! Edge costs are unsigned, so the prefix cost never decreases along a path.
//! Pruning at `cost >= incumbent` therefore never discards a strictly better
//! tour.
//!
//! # Reference
//!
//! Little, Murty, Sweeney & Karel (1963), "An Algorithm for the Traveling
//! Salesman Problem", *Operations Research* 11(6), 972-989.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use super::bound::SpanningTree;
use super::config::{BnbConfig, BoundKind};
use super::types::TourObserver;
use crate::error::{TspError, TspResult};
use crate::instance::CostMatrix;

/// Result of a branch-and-bound run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BnbResult {
    /// Cost of the best complete tour. `None` only when a budget or cancel
    /// flag stopped the run before any tour was completed.
    pub best_cost: Option<u64>,

    /// The best tour, starting at vertex 0. `None` when not recorded.
    pub best_tour: Option<Vec<usize>>,

    /// Recursive invocations, the root included.
    pub calls: u64,

    /// Extensions rejected by the bound.
    pub pruned: u64,

    /// Complete tours evaluated.
    pub leaves: u64,

    /// Times the incumbent was replaced.
    pub improvements: u64,

    /// Whether the call budget ran out.
    pub exhausted: bool,

    /// Whether cancelled externally.
    pub cancelled: bool,

    /// Wall-clock time spent searching.
    pub elapsed: Duration,
}

impl BnbResult {
    /// A tour was found and the whole tree was covered.
    pub fn is_optimal(&self) -> bool {
        self.best_cost.is_some() && !self.exhausted && !self.cancelled
    }
}

/// Executes the branch-and-bound search.
pub struct BnbRunner;

impl BnbRunner {
    /// Finds an optimal tour of `matrix`.
    ///
    /// # Errors
    /// [`TspError::InvalidConfig`] for a bad config and
    /// [`TspError::Asymmetric`] for an asymmetric matrix and
    /// [`TspError::CostOverflow`] when a tour cost could exceed `u64`, all
    /// before any search happens.
    ///
    /// # Examples
    ///
    /// ```
    /// use u_tsp_exact::bnb::{BnbConfig, BnbRunner};
    /// use u_tsp_exact::instance::{CostMatrix, Point};
    ///
    /// let square = [(0, 0), (0, 10), (10, 10), (10, 0)].map(Point::from);
    /// let matrix = CostMatrix::from_points(&square, 100).unwrap();
    /// let result = BnbRunner::run(&matrix, &BnbConfig::default()).unwrap();
    /// assert_eq!(result.best_cost, Some(40));
    /// assert_eq!(result.best_tour, Some(vec![0, 1, 2, 3]));
    /// ```
    pub fn run(matrix: &CostMatrix, config: &BnbConfig) -> TspResult<BnbResult> {
        Self::run_with(matrix, config, &mut (), None)
    }

    /// Runs the search, reporting every improving tour to `observer`.
    pub fn run_with_observer<O: TourObserver>(
        matrix: &CostMatrix,
        config: &BnbConfig,
        observer: &mut O,
    ) -> TspResult<BnbResult> {
        Self::run_with(matrix, config, observer, None)
    }

    /// Runs the search with an optional cancellation token.
    pub fn run_with_cancel(
        matrix: &CostMatrix,
        config: &BnbConfig,
        cancel: Option<Arc<AtomicBool>>,
    ) -> TspResult<BnbResult> {
        Self::run_with(matrix, config, &mut (), cancel)
    }

    /// Runs the search with both an observer and a cancellation token.
    pub fn run_with<O: TourObserver>(
        matrix: &CostMatrix,
        config: &BnbConfig,
        observer: &mut O,
        cancel: Option<Arc<AtomicBool>>,
    ) -> TspResult<BnbResult> {
        config.validate()?;
        let n = matrix.n();
        if n == 0 {
            return Err(TspError::InvalidVertexCount { n });
        }
        matrix.validate()?;

        log::debug!(
            "bnb: n={} pruning={} bound={:?} max_calls={:?}",
            n,
            config.pruning,
            config.bound,
            config.max_calls
        );

        let start = Instant::now();
        let mut search = Search::new(matrix, config, observer, cancel.as_deref());
        search.permut(0);

        let result = BnbResult {
            best_cost: search.best_cost,
            best_tour: if config.record_tour && search.best_cost.is_some() {
                Some(search.best_tour)
            } else {
                None
            },
            calls: search.calls,
            pruned: search.pruned,
            leaves: search.leaves,
            improvements: search.improvements,
            exhausted: search.stop == Some(Stop::Budget),
            cancelled: search.stop == Some(Stop::Cancelled),
            elapsed: start.elapsed(),
        };

        if let Some(stop) = search.stop {
            log::warn!(
                "bnb: stopped early ({stop:?}) after {} calls, best so far {:?}",
                result.calls,
                result.best_cost
            );
        }
        log::debug!(
            "bnb: best={:?} calls={} pruned={} leaves={} improvements={} in {:.3}s",
            result.best_cost,
            result.calls,
            result.pruned,
            result.leaves,
            result.improvements,
            result.elapsed.as_secs_f64()
        );

        Ok(result)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Stop {
    Budget,
    Cancelled,
}

/// Per-run state. The prefix and the unvisited set are shared buffers:
/// every mutation made on the way down is undone on the way back up.
struct Search<'a, O> {
    matrix: &'a CostMatrix,
    config: &'a BnbConfig,
    observer: &'a mut O,
    cancel: Option<&'a AtomicBool>,

    /// Tour prefix; always starts with 0.
    tour: Vec<usize>,
    /// Unvisited vertices, ascending.
    remaining: Vec<usize>,

    best_cost: Option<u64>,
    best_tour: Vec<usize>,

    calls: u64,
    pruned: u64,
    leaves: u64,
    improvements: u64,
    stop: Option<Stop>,

    mst: SpanningTree,
}

impl<'a, O: TourObserver> Search<'a, O> {
    fn new(
        matrix: &'a CostMatrix,
        config: &'a BnbConfig,
        observer: &'a mut O,
        cancel: Option<&'a AtomicBool>,
    ) -> Self {
        let n = matrix.n();
        let mut tour = Vec::with_capacity(n);
        tour.push(0);
        Self {
            matrix,
            config,
            observer,
            cancel,
            tour,
            remaining: (1..n).collect(),
            best_cost: None,
            best_tour: Vec::with_capacity(n),
            calls: 0,
            pruned: 0,
            leaves: 0,
            improvements: 0,
            stop: None,
            mst: SpanningTree::with_capacity(n),
        }
    }

    fn permut(&mut self, cost: u64) {
        self.calls += 1;

        if let Some(flag) = self.cancel {
            if flag.load(Ordering::Relaxed) {
                self.stop = Some(Stop::Cancelled);
                return;
            }
        }

        if self.remaining.is_empty() {
            self.close(cost);
            return;
        }

        let last = self.tour[self.tour.len() - 1];
        for idx in 0..self.remaining.len() {
            if self.stop.is_some() {
                return;
            }

            let v = self.remaining[idx];
            let next = cost + self.matrix.get(last, v);
            if self.config.pruning && self.cannot_improve(next, idx) {
                self.pruned += 1;
                continue;
            }

            if let Some(max) = self.config.max_calls {
                if self.calls >= max {
                    self.stop = Some(Stop::Budget);
                    return;
                }
            }

            self.remaining.remove(idx);
            self.tour.push(v);
            self.permut(next);
            self.tour.pop();
            self.remaining.insert(idx, v);
        }
    }

    /// Whether extending the prefix by `remaining[idx]`, reaching `next`,
    /// provably cannot beat the incumbent.
    fn cannot_improve(&mut self, next: u64, idx: usize) -> bool {
        let Some(best) = self.best_cost else {
            return false;
        };
        if next >= best {
            return true;
        }
        match self.config.bound {
            BoundKind::PartialCost => false,
            BoundKind::SpanningTree => {
                let v = self.remaining[idx];
                let rest = self
                    .mst
                    .weight(self.matrix, v, &self.remaining, idx, 0, best - next);
                rest >= best - next
            }
        }
    }

    /// Terminal state: every vertex is in the prefix.
    fn close(&mut self, cost: u64) {
        self.leaves += 1;
        let total = match self.tour.len() {
            1 => cost,
            len => cost + self.matrix.get(self.tour[len - 1], 0),
        };

        if self.best_cost.is_some_and(|best| total >= best) {
            return;
        }

        self.best_cost = Some(total);
        self.improvements += 1;
        if self.config.record_tour {
            self.best_tour.clear();
            self.best_tour.extend_from_slice(&self.tour);
        }
        log::trace!("bnb: improved to {total} at call {}", self.calls);
        self.observer.on_improvement(&self.tour, total);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::enumerate;
    use crate::instance::{InstanceConfig, Point};

    fn square() -> CostMatrix {
        let points: Vec<Point> = [(0, 0), (0, 10), (10, 10), (10, 0)]
            .into_iter()
            .map(Point::from)
            .collect();
        CostMatrix::from_points(&points, 100).unwrap()
    }

    fn seeded(n: usize, seed: u32) -> CostMatrix {
        InstanceConfig::default()
            .with_vertices(n)
            .with_seed(seed)
            .build()
            .unwrap()
            .matrix
    }

    /// Nodes of the full search tree: Σ_{k=0}^{n-1} (n-1)! / (n-1-k)!.
    fn full_tree_size(n: usize) -> u64 {
        let m = (n - 1) as u64;
        let mut total = 0;
        let mut term = 1;
        for k in 0..=m {
            total += term;
            term *= m - k;
        }
        total
    }

    // ---- Concrete scenarios ----

    #[test]
    fn test_unit_square_perimeter() {
        let result = BnbRunner::run(&square(), &BnbConfig::default()).unwrap();
        assert_eq!(result.best_cost, Some(40));
        assert_eq!(result.best_tour, Some(vec![0, 1, 2, 3]));
        assert!(result.is_optimal());
    }

    #[test]
    fn test_two_vertices_go_and_return() {
        let m = seeded(2, 1);
        let result = BnbRunner::run(&m, &BnbConfig::default()).unwrap();
        assert_eq!(result.best_cost, Some(2 * m.get(0, 1)));
        assert_eq!(result.best_cost, Some(26_810));
        assert_eq!(result.best_tour, Some(vec![0, 1]));
        assert_eq!(result.calls, 2);
    }

    #[test]
    fn test_single_vertex_never_reads_diagonal() {
        let m = CostMatrix::from_points(&[Point::new(3, 3)], 20_000).unwrap();
        let result = BnbRunner::run(&m, &BnbConfig::default()).unwrap();
        assert_eq!(result.best_cost, Some(0));
        assert_eq!(result.best_tour, Some(vec![0]));
        assert_eq!(result.calls, 1);
        assert_eq!(result.leaves, 1);
    }

    #[test]
    fn test_asymmetric_matrix_fails_fast() {
        let m = CostMatrix::from_rows(&[[0, 1, 2], [1, 0, 3], [9, 3, 0]]).unwrap();
        let err = BnbRunner::run(&m, &BnbConfig::default()).unwrap_err();
        assert!(matches!(err, TspError::Asymmetric { i: 0, j: 2, .. }));
    }

    #[test]
    fn test_overflowing_costs_fail_fast() {
        let e = u64::MAX / 3;
        let m = CostMatrix::from_rows(&[[0, e, e, e], [e, 0, e, e], [e, e, 0, e], [e, e, e, 0]])
            .unwrap();
        for bound in [BoundKind::PartialCost, BoundKind::SpanningTree] {
            let err = BnbRunner::run(&m, &BnbConfig::default().with_bound(bound)).unwrap_err();
            assert!(matches!(err, TspError::CostOverflow { n: 4, .. }));
        }
        assert!(matches!(
            enumerate::min_tour(&m),
            Err(TspError::CostOverflow { .. })
        ));
    }

    #[test]
    fn test_costs_at_the_overflow_limit() {
        let e = u64::MAX / 3;
        let m = CostMatrix::from_rows(&[[0, e, e], [e, 0, e], [e, e, 0]]).unwrap();
        for bound in [BoundKind::PartialCost, BoundKind::SpanningTree] {
            let result = BnbRunner::run(&m, &BnbConfig::default().with_bound(bound)).unwrap();
            assert_eq!(result.best_cost, Some(3 * e));
            assert_eq!(result.best_tour, Some(vec![0, 1, 2]));
        }
    }

    #[test]
    fn test_invalid_config_fails_fast() {
        let config = BnbConfig::default().with_max_calls(0);
        assert!(matches!(
            BnbRunner::run(&square(), &config),
            Err(TspError::InvalidConfig { .. })
        ));
    }

    #[test]
    fn test_seed_one_regression() {
        let expected = [
            (2, 26_810, 2),
            (3, 29_928, 5),
            (4, 31_319, 16),
            (5, 36_255, 48),
            (6, 46_655, 211),
            (7, 53_285, 958),
            (8, 53_591, 3_814),
        ];
        for (n, cost, calls) in expected {
            let result = BnbRunner::run(&seeded(n, 1), &BnbConfig::default()).unwrap();
            assert_eq!(result.best_cost, Some(cost), "n={n}");
            assert_eq!(result.calls, calls, "n={n}");
        }
    }

    #[test]
    fn test_seed_one_best_tour() {
        let result = BnbRunner::run(&seeded(8, 1), &BnbConfig::default()).unwrap();
        assert_eq!(result.best_tour, Some(vec![0, 1, 7, 6, 3, 2, 5, 4]));
    }

    // ---- Exactness ----

    #[test]
    fn test_matches_exhaustive_enumeration() {
        for seed in [1, 2, 3, 17, 99] {
            for n in 2..=8 {
                let m = seeded(n, seed);
                let expected = enumerate::min_tour(&m).unwrap().best_cost;
                let result = BnbRunner::run(&m, &BnbConfig::default()).unwrap();
                assert_eq!(result.best_cost, Some(expected), "n={n} seed={seed}");
                let tour = result.best_tour.unwrap();
                assert_eq!(m.tour_cost(&tour), expected);
            }
        }
    }

    #[test]
    fn test_pruning_does_not_change_best_cost() {
        for n in 2..=8 {
            let m = seeded(n, 5);
            let pruned = BnbRunner::run(&m, &BnbConfig::default()).unwrap();
            let full = BnbRunner::run(&m, &BnbConfig::default().with_pruning(false)).unwrap();
            assert_eq!(pruned.best_cost, full.best_cost, "n={n}");
            assert!(pruned.calls <= full.calls);
            assert_eq!(full.pruned, 0);
        }
    }

    #[test]
    fn test_unpruned_visits_full_tree() {
        for n in 1..=8 {
            let m = seeded(n, 3);
            let full = BnbRunner::run(&m, &BnbConfig::default().with_pruning(false)).unwrap();
            assert_eq!(full.calls, full_tree_size(n), "n={n}");
            let leaves: u64 = (1..n as u64).product();
            assert_eq!(full.leaves, leaves, "n={n}");
        }
    }

    #[test]
    fn test_spanning_tree_bound_is_exact_and_tighter() {
        for seed in [1, 4, 8] {
            for n in 2..=9 {
                let m = seeded(n, seed);
                let base = BnbRunner::run(&m, &BnbConfig::default()).unwrap();
                let mst = BnbRunner::run(
                    &m,
                    &BnbConfig::default().with_bound(BoundKind::SpanningTree),
                )
                .unwrap();
                assert_eq!(base.best_cost, mst.best_cost, "n={n} seed={seed}");
                assert!(
                    mst.calls <= base.calls,
                    "spanning tree bound should not expand more: {} > {}",
                    mst.calls,
                    base.calls
                );
            }
        }
    }

    #[test]
    fn test_ties_keep_first_tour() {
        // Every tour costs 4; the first leaf reached wins.
        let m = CostMatrix::from_rows(&[[0, 1, 1, 1], [1, 0, 1, 1], [1, 1, 0, 1], [1, 1, 1, 0]])
            .unwrap();
        let result = BnbRunner::run(&m, &BnbConfig::default()).unwrap();
        assert_eq!(result.best_cost, Some(4));
        assert_eq!(result.best_tour, Some(vec![0, 1, 2, 3]));
        assert_eq!(result.improvements, 1);
    }

    // ---- Counters and determinism ----

    #[test]
    fn test_calls_grow_with_n() {
        let mut previous = 0;
        for n in 2..=9 {
            let calls = BnbRunner::run(&seeded(n, 1), &BnbConfig::default())
                .unwrap()
                .calls;
            assert!(calls > 0);
            assert!(calls >= previous, "n={n}: {calls} < {previous}");
            previous = calls;
        }
    }

    #[test]
    fn test_deterministic_runs() {
        let a = BnbRunner::run(&seeded(8, 42), &BnbConfig::default()).unwrap();
        let b = BnbRunner::run(&seeded(8, 42), &BnbConfig::default()).unwrap();
        assert_eq!(a.best_cost, b.best_cost);
        assert_eq!(a.best_tour, b.best_tour);
        assert_eq!(a.calls, b.calls);
        assert_eq!(a.pruned, b.pruned);
    }

    #[test]
    fn test_record_tour_disabled() {
        let config = BnbConfig::default().with_record_tour(false);
        let result = BnbRunner::run(&square(), &config).unwrap();
        assert_eq!(result.best_cost, Some(40));
        assert!(result.best_tour.is_none());
    }

    // ---- Observer ----

    #[test]
    fn test_observer_sees_strict_improvements() {
        let m = seeded(8, 11);
        let mut seen: Vec<(Vec<usize>, u64)> = Vec::new();
        let result = BnbRunner::run_with_observer(&m, &BnbConfig::default(), &mut seen).unwrap();

        assert_eq!(seen.len() as u64, result.improvements);
        for window in seen.windows(2) {
            assert!(window[1].1 < window[0].1);
        }
        let (tour, cost) = seen.last().unwrap();
        assert_eq!(Some(*cost), result.best_cost);
        assert_eq!(Some(tour.clone()), result.best_tour);
        for (tour, cost) in &seen {
            assert_eq!(tour[0], 0);
            assert_eq!(tour.len(), 8);
            assert_eq!(m.tour_cost(tour), *cost);
        }
    }

    // ---- Budget and cancellation ----

    #[test]
    fn test_call_budget_stops_search() {
        let m = seeded(9, 1);
        let config = BnbConfig::default().with_max_calls(50);
        let result = BnbRunner::run(&m, &config).unwrap();
        assert!(result.exhausted);
        assert!(!result.is_optimal());
        assert!(result.calls <= 50);

        let optimum = BnbRunner::run(&m, &BnbConfig::default()).unwrap();
        if let Some(cost) = result.best_cost {
            assert!(cost >= optimum.best_cost.unwrap());
        }
    }

    #[test]
    fn test_generous_budget_is_not_exhausted() {
        let m = seeded(6, 1);
        let config = BnbConfig::default().with_max_calls(211);
        let result = BnbRunner::run(&m, &config).unwrap();
        assert!(!result.exhausted);
        assert_eq!(result.best_cost, Some(46_655));
    }

    #[test]
    fn test_cancellation() {
        let m = seeded(9, 1);
        // Set before running so the outcome does not depend on timing.
        let cancel = Arc::new(AtomicBool::new(true));
        let result = BnbRunner::run_with_cancel(&m, &BnbConfig::default(), Some(cancel)).unwrap();
        assert!(result.cancelled);
        assert_eq!(result.calls, 1);
        assert!(result.best_cost.is_none());
    }

    #[test]
    fn test_cancel_from_observer() {
        let m = seeded(9, 2);
        let cancel = Arc::new(AtomicBool::new(false));
        let flag = Arc::clone(&cancel);
        let mut stop_after_first = move |_: &[usize], _: u64| flag.store(true, Ordering::Relaxed);
        let result =
            BnbRunner::run_with(&m, &BnbConfig::default(), &mut stop_after_first, Some(cancel))
                .unwrap();
        assert!(result.cancelled);
        assert_eq!(result.improvements, 1);
        assert!(result.best_cost.is_some());
    }
}
