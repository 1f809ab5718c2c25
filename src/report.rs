//! One-line run summaries.

use std::fmt;
use std::time::Duration;

use crate::bnb::BnbResult;

/// Formats `value` with `,` between groups of three digits.
///
/// ```
/// use u_tsp_exact::report::format_count;
///
/// assert_eq!(format_count(0), "0");
/// assert_eq!(format_count(1_234_567), "1,234,567");
/// ```
pub fn format_count(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Summary of a solved instance.
///
/// Renders as `n = 8; bestCost = 53,591; nbCalls = 3,814; time = 0.001s`.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RunReport {
    pub n: usize,
    pub best_cost: Option<u64>,
    pub calls: u64,
    pub elapsed: Duration,
}

impl RunReport {
    pub fn new(n: usize, result: &BnbResult) -> Self {
        Self {
            n,
            best_cost: result.best_cost,
            calls: result.calls,
            elapsed: result.elapsed,
        }
    }
}

impl fmt::Display for RunReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let cost = match self.best_cost {
            Some(c) => format_count(c),
            None => "-".to_string(),
        };
        write!(
            f,
            "n = {}; bestCost = {}; nbCalls = {}; time = {:.3}s",
            self.n,
            cost,
            format_count(self.calls),
            self.elapsed.as_secs_f64()
        )
    }
}
