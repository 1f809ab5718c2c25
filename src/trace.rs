//! Python `turtle` export of the points and of each improving tour.
//!
//! The generated module defines `draw_path_permutations(turtle_speed)`, which
//! marks every vertex and then replays the tours one by one, waiting for a
//! key press between them. It imports `mark_point` from a sibling `utils`
//! module supplied by the viewer.

use std::io::{self, Write};

use crate::bnb::TourObserver;
use crate::instance::Point;

/// Writes a turtle script to `W` while the search runs.
///
/// # Examples
///
/// ```
/// use u_tsp_exact::bnb::{BnbConfig, BnbRunner};
/// use u_tsp_exact::instance::InstanceConfig;
/// use u_tsp_exact::trace::TurtleScript;
///
/// let instance = InstanceConfig::default().with_vertices(5).build().unwrap();
/// let mut script = TurtleScript::new(Vec::new(), &instance.points, instance.bound).unwrap();
/// BnbRunner::run_with_observer(&instance.matrix, &BnbConfig::default(), &mut script).unwrap();
/// assert!(script.tours() > 0);
/// let text = String::from_utf8(script.finish().unwrap()).unwrap();
/// assert!(text.starts_with("import turtle"));
/// ```
#[derive(Debug)]
pub struct TurtleScript<W: Write> {
    out: W,
    tours: usize,
    error: Option<io::Error>,
}

impl<W: Write> TurtleScript<W> {
    /// Writes the script header: world coordinates, one `pN` per point and
    /// the `mark_all_points` helper.
    pub fn new(mut out: W, points: &[Point], bound: u32) -> io::Result<Self> {
        writeln!(out, "import turtle\n")?;
        writeln!(out, "from utils import mark_point\n")?;
        writeln!(out, "def draw_path_permutations(turtle_speed):")?;
        writeln!(
            out,
            "    turtle.setworldcoordinates(0, 0, {}, {})",
            bound,
            bound as u64 + 100
        )?;
        for (i, p) in points.iter().enumerate() {
            writeln!(out, "    p{i}=({},{})", p.x, p.y)?;
        }
        writeln!(out)?;
        writeln!(out, "    def mark_all_points():")?;
        if points.is_empty() {
            writeln!(out, "        pass")?;
        }
        for i in 0..points.len() {
            writeln!(out, "        mark_point(p{i})")?;
        }
        writeln!(out)?;
        writeln!(out, "    turtle.speed(turtle_speed)")?;
        writeln!(out, "    mark_all_points()\n")?;
        writeln!(out, "    wait = input(\"Enter return to start\")\n")?;
        Ok(Self {
            out,
            tours: 0,
            error: None,
        })
    }

    /// Number of tours written so far.
    pub fn tours(&self) -> usize {
        self.tours
    }

    fn write_tour(&mut self, tour: &[usize], cost: u64) -> io::Result<()> {
        let Some(&first) = tour.first() else {
            return Ok(());
        };
        let out = &mut self.out;
        writeln!(out, "    # tour cost {cost}")?;
        writeln!(out, "    turtle.clear()")?;
        writeln!(out, "    mark_all_points()")?;
        writeln!(out, "    turtle.penup()")?;
        writeln!(out, "    turtle.goto(p{first})")?;
        writeln!(out, "    turtle.pendown()")?;
        for v in &tour[1..] {
            writeln!(out, "    turtle.goto(p{v})")?;
        }
        writeln!(out, "    turtle.goto(p{first})")?;
        writeln!(out, "    turtle.update()")?;
        writeln!(out, "    wait = input(\"Enter return to continue\")\n")?;
        Ok(())
    }

    /// Flushes and returns the writer, or the first error met while writing.
    pub fn finish(mut self) -> io::Result<W> {
        if let Some(err) = self.error.take() {
            return Err(err);
        }
        self.out.flush()?;
        Ok(self.out)
    }
}

impl<W: Write> TourObserver for TurtleScript<W> {
    fn on_improvement(&mut self, tour: &[usize], cost: u64) {
        if self.error.is_some() {
            return;
        }
        match self.write_tour(tour, cost) {
            Ok(()) => self.tours += 1,
            Err(err) => {
                log::warn!("trace: write failed, dropping further tours: {err}");
                self.error = Some(err);
            }
        }
    }
}
