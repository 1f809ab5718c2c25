//! Hook for tours discovered during the search.

/// Receives every strictly improving complete tour, in discovery order.
///
/// The search knows nothing about what happens to a tour once handed over;
/// exporters and recorders live on this side of the seam. Implementations
/// must not fail: an exporter that can hit I/O errors should latch them and
/// report later (see [`TurtleScript`](crate::trace::TurtleScript)).
///
/// Implemented for `()` (ignore everything), for closures, and for
/// `Vec<(Vec<usize>, u64)>` (record everything).
///
/// # Examples
///
/// ```
/// use u_tsp_exact::bnb::{BnbConfig, BnbRunner};
/// use u_tsp_exact::instance::InstanceConfig;
///
/// let instance = InstanceConfig::default().with_vertices(6).build().unwrap();
/// let mut seen: Vec<(Vec<usize>, u64)> = Vec::new();
/// let result = BnbRunner::run_with_observer(&instance.matrix, &BnbConfig::default(), &mut seen)
///     .unwrap();
/// assert_eq!(seen.last().map(|(_, c)| *c), result.best_cost);
/// ```
pub trait TourObserver {
    /// `tour` starts at vertex 0 and lists every vertex once; the closing
    /// edge back to 0 is implied. `cost` includes it.
    fn on_improvement(&mut self, tour: &[usize], cost: u64);
}

impl TourObserver for () {
    fn on_improvement(&mut self, _tour: &[usize], _cost: u64) {}
}

impl<F: FnMut(&[usize], u64)> TourObserver for F {
    fn on_improvement(&mut self, tour: &[usize], cost: u64) {
        self(tour, cost)
    }
}

impl TourObserver for Vec<(Vec<usize>, u64)> {
    fn on_improvement(&mut self, tour: &[usize], cost: u64) {
        self.push((tour.to_vec(), cost));
    }
}
