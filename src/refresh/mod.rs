//! Refresh tasks: one fetch-and-render unit per UI concern, plus the
//! scheduler that arms them.
//!
//! Every task follows the same failure policy: a transport error or a
//! malformed body is logged, nothing on the page changes, and there is no
//! retry before the next tick.

pub mod charts;
pub mod freshness;
pub mod last_values;
pub mod rainfall;
pub mod scheduler;

use std::fmt;
use std::future::Future;

use crate::error::AppResult;
use crate::view::{Page, Region};

pub use rainfall::{RainControl, RainSelection, RainStamp};
pub use scheduler::Scheduler;

/// The six independently scheduled refresh units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TaskKind {
    LastValues,
    RiskBadge,
    EnvironmentCharts,
    RiskTrend,
    Rainfall,
    Freshness,
}

impl TaskKind {
    pub const ALL: [Self; 6] = [
        Self::LastValues,
        Self::RiskBadge,
        Self::EnvironmentCharts,
        Self::RiskTrend,
        Self::Rainfall,
        Self::Freshness,
    ];

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::LastValues => "last_values",
            Self::RiskBadge => "risk_badge",
            Self::EnvironmentCharts => "environment_charts",
            Self::RiskTrend => "risk_trend",
            Self::Rainfall => "rainfall",
            Self::Freshness => "freshness",
        }
    }

    /// Whether the page carries a region this task renders into.
    ///
    /// The standalone badge task only runs on pages without value cards;
    /// otherwise the last-values task already renders the badge.
    #[must_use]
    pub fn is_present_on(self, page: &Page) -> bool {
        let any = |regions: &[Region]| regions.iter().any(|r| page.contains(*r));
        match self {
            Self::LastValues => any(&LAST_VALUES_REGIONS),
            Self::RiskBadge => {
                page.contains(Region::RiskBadge) && !Self::LastValues.is_present_on(page)
            }
            Self::EnvironmentCharts => {
                any(&[Region::TempGraph, Region::HumGraph, Region::PressGraph])
            }
            Self::RiskTrend => page.contains(Region::RiskTrendGraph),
            Self::Rainfall => page.contains(Region::RainValue),
            Self::Freshness => page.contains(Region::MeteoUpdateTime),
        }
    }
}

const LAST_VALUES_REGIONS: [Region; 4] = [
    Region::TempValue,
    Region::HumValue,
    Region::PressValue,
    Region::WindValue,
];

impl fmt::Display for TaskKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// What one successful invocation did to the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Rendered,
    /// Response meant "nothing new"; the page was left as is.
    Unchanged,
    /// Response was superseded by a newer configuration or request.
    Discarded,
}

/// Await one task invocation and apply the shared failure policy.
pub async fn run_logged<F>(kind: TaskKind, invocation: F) -> Option<Outcome>
where
    F: Future<Output = AppResult<Outcome>>,
{
    match invocation.await {
        Ok(outcome) => {
            tracing::debug!(task = %kind, ?outcome, "Refresh finished");
            Some(outcome)
        }
        Err(e) => {
            tracing::warn!(
                task = %kind,
                error = %e,
                transient = e.is_transient(),
                "Refresh failed, keeping last render"
            );
            None
        }
    }
}
