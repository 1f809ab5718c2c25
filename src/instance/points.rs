//! Integer points in the plane.

use super::rng::MinStd;

/// A vertex location. Coordinates lie in `[0, bound - 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Point {
    pub x: u32,
    pub y: u32,
}

impl Point {
    pub fn new(x: u32, y: u32) -> Self {
        Self { x, y }
    }

    /// Euclidean distance truncated toward zero.
    ///
    /// The squared distance is exact in `u64`; only the square root goes
    /// through `f64`, and the cast truncates.
    pub fn distance(&self, other: &Point) -> u64 {
        let dx = self.x.abs_diff(other.x) as u64;
        let dy = self.y.abs_diff(other.y) as u64;
        ((dx * dx + dy * dy) as f64).sqrt() as u64
    }
}

impl From<(u32, u32)> for Point {
    fn from((x, y): (u32, u32)) -> Self {
        Self { x, y }
    }
}

/// Draws `count` points from `rng`, `x` then `y` for each point.
///
/// # Panics
/// Panics if `bound` is zero.
pub fn generate(count: usize, bound: u32, rng: &mut MinStd) -> Vec<Point> {
    (0..count)
        .map(|_| {
            let x = rng.next_below(bound);
            let y = rng.next_below(bound);
            Point { x, y }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_seed_one() {
        let mut rng = MinStd::new(1);
        let points = generate(3, 20_000, &mut rng);
        assert_eq!(
            points,
            vec![
                Point::new(16807, 15249),
                Point::new(10073, 3658),
                Point::new(8930, 11272)
            ]
        );
    }

    #[test]
    fn test_generate_respects_bound() {
        let mut rng = MinStd::new(5);
        for p in generate(500, 37, &mut rng) {
            assert!(p.x < 37 && p.y < 37);
        }
    }

    #[test]
    fn test_distance_truncates() {
        let a = Point::new(0, 0);
        assert_eq!(a.distance(&Point::new(3, 4)), 5);
        assert_eq!(a.distance(&Point::new(10, 10)), 14); // 14.142...
        assert_eq!(a.distance(&Point::new(1, 1)), 1); // 1.414...
        assert_eq!(a.distance(&a), 0);
    }

    #[test]
    fn test_distance_symmetric_without_underflow() {
        let a = Point::new(19_999, 3);
        let b = Point::new(2, 19_998);
        assert_eq!(a.distance(&b), b.distance(&a));
        assert_eq!(a.distance(&b), 28_278);
    }
}
