//! Load classifier - maps utilization to a load level and detects transitions
//!
//! Three states (`Normal`, `Warning`, `Critical`), any edge between them is a
//! single transition. Staying in the same band, however the ratio moves inside
//! it, is reported as unchanged; that is what keeps alerts from flapping.

use super::aggregator::UtilizationFigures;
use crate::domain::{LoadLevel, Thresholds};
use tracing::debug;

/// A reported level transition
#[derive(Debug, Clone, PartialEq)]
pub struct LevelChange {
    pub previous: LoadLevel,
    pub current: LoadLevel,
    pub message: String,
}

/// Result of one classification step
#[derive(Debug, Clone, PartialEq)]
pub struct Classification {
    pub level: LoadLevel,
    pub load: f64,
    /// `Some` only when the level differs from the previous step
    pub change: Option<LevelChange>,
}

impl Classification {
    pub fn changed(&self) -> bool {
        self.change.is_some()
    }
}

/// Stateful classifier; owns the current load level
pub struct LoadClassifier {
    thresholds: Thresholds,
    current: LoadLevel,
}

impl LoadClassifier {
    pub fn new(thresholds: Thresholds) -> Self {
        Self {
            thresholds,
            current: LoadLevel::Normal,
        }
    }

    pub fn current(&self) -> LoadLevel {
        self.current
    }

    pub fn thresholds(&self) -> &Thresholds {
        &self.thresholds
    }

    /// Level for a utilization ratio, most severe first (boundaries inclusive)
    pub fn target_level(&self, load: f64) -> LoadLevel {
        if load >= self.thresholds.critical() {
            LoadLevel::Critical
        } else if load >= self.thresholds.warning() {
            LoadLevel::Warning
        } else {
            LoadLevel::Normal
        }
    }

    /// Classify the figures and update the current level
    pub fn classify(&mut self, figures: &UtilizationFigures) -> Classification {
        let load = figures.load();
        let level = self.target_level(load);

        if level == self.current {
            return Classification {
                level,
                load,
                change: None,
            };
        }

        let previous = self.current;
        self.current = level;
        debug!(
            previous = %previous,
            current = %level,
            load = %load,
            "Load level transition"
        );

        Classification {
            level,
            load,
            change: Some(LevelChange {
                previous,
                current: level,
                message: self.describe(level, figures),
            }),
        }
    }

    /// Level-tagged message for `level` with the raw busy/max figures
    pub fn describe(&self, level: LoadLevel, figures: &UtilizationFigures) -> String {
        let ratio = format!("{}/{}", figures.busy_threads(), figures.max_threads);
        match self.thresholds.for_level(level) {
            Some(threshold) => format!(
                "{}: thread pool load is more than {}% ({})",
                level,
                format_percent(threshold),
                ratio
            ),
            None => format!("INFO: thread pool load is back to normal values ({})", ratio),
        }
    }
}

/// `0.7` -> `"70"`, `0.855` -> `"85.5"`
fn format_percent(ratio: f64) -> String {
    let tenths = (ratio * 1000.0).round() / 10.0;
    if tenths.fract() == 0.0 {
        format!("{:.0}", tenths)
    } else {
        format!("{:.1}", tenths)
    }
}
