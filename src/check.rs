use std::fmt::Display;

use indicatif::ProgressBar;
use log::info;

use crate::layout::{CellRef, TriangleLayout};

/// One cell whose round trip failed: what went in and what came back.
#[derive(Debug, PartialEq, Eq)]
pub struct Mismatch {
    pub expected: CellRef,
    pub recovered: Option<CellRef>,
}

/// Outcome of sweeping a whole layout through the forward and inverse
/// derivations. `errors` holds the cells that failed to round-trip and
/// `steps` records every cell visited; [`Display`] prints the error summary
/// first and the full step log after it.
#[derive(Debug)]
pub struct CheckReport {
    pub errors: Vec<Mismatch>,
    pub steps: Vec<String>,
}

impl CheckReport {
    pub fn is_clean(&self) -> bool {
        self.errors.is_empty()
    }
}

impl Display for CheckReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.errors.is_empty() {
            writeln!(f, "all {} cells round-tripped, no errors", self.steps.len())?;
        } else {
            writeln!(
                f,
                "{} of {} cells failed to round-trip:",
                self.errors.len(),
                self.steps.len()
            )?;
            for mismatch in &self.errors {
                match mismatch.recovered {
                    Some(got) => writeln!(f, "  {} came back as {}", mismatch.expected, got)?,
                    None => writeln!(f, "  {} came back as no cell", mismatch.expected)?,
                }
            }
        }
        writeln!(f)?;
        for step in &self.steps {
            writeln!(f, "{}", step)?;
        }
        Ok(())
    }
}

impl TriangleLayout {
    /// Round-trips every cell of the layout through `vertices_of` and
    /// `locate` and reports the outcome.
    ///
    /// A clean report is the layout's correctness contract: the forward and
    /// inverse derivations agree on the entire grid.
    pub fn self_check(&self) -> CheckReport {
        let bar = ProgressBar::new((self.row_count() * self.col_count()) as u64);
        let mut errors = vec![];
        let mut steps = vec![];
        for row in self.rows() {
            for col in self.cols() {
                let here = CellRef { row, col };
                let triangle = self.vertices_of(here);
                let recovered = self.locate(&triangle);
                if recovered != Some(here) {
                    errors.push(Mismatch {
                        expected: here,
                        recovered,
                    });
                }
                steps.push(match recovered {
                    Some(back) => format!("{} -> {} -> {}", here, triangle, back),
                    None => format!("{} -> {} -> no cell", here, triangle),
                });
                bar.inc(1);
            }
        }
        bar.finish_and_clear();
        info!(
            "sweep finished: {} cells, {} mismatches",
            steps.len(),
            errors.len()
        );
        CheckReport { errors, steps }
    }
}
