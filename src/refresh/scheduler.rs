use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::{MissedTickBehavior, interval};

use crate::config::Config;
use crate::error::{AppError, AppResult};
use crate::refresh::rainfall::{RainControl, RainSelection, refresh_rainfall};
use crate::refresh::{Outcome, TaskKind, charts, freshness, last_values, run_logged};
use crate::station::StationSource;
use crate::view::{DomWriter, Page, Region};

/// Everything one task invocation needs, cheap to clone into spawned work.
struct TaskContext<S> {
    source: Arc<S>,
    writer: DomWriter,
    rain: Arc<RainControl>,
}

impl<S> Clone for TaskContext<S> {
    fn clone(&self) -> Self {
        Self {
            source: Arc::clone(&self.source),
            writer: self.writer.clone(),
            rain: Arc::clone(&self.rain),
        }
    }
}

impl<S: StationSource> TaskContext<S> {
    /// Spawn one invocation of `kind`. The rainfall task gets a copy of the
    /// selection as it is right now, not a reference to it.
    fn dispatch(&self, kind: TaskKind) -> JoinHandle<Option<Outcome>> {
        let ctx = self.clone();
        let stamp = (kind == TaskKind::Rainfall).then(|| ctx.rain.stamp());

        tokio::spawn(async move {
            let source = ctx.source.as_ref();
            let writer = &ctx.writer;
            match (kind, stamp) {
                (TaskKind::LastValues, _) => {
                    run_logged(kind, last_values::refresh_last_values(source, writer)).await
                }
                (TaskKind::RiskBadge, _) => {
                    run_logged(kind, last_values::refresh_risk_badge(source, writer)).await
                }
                (TaskKind::EnvironmentCharts, _) => {
                    run_logged(kind, charts::refresh_environment_charts(source, writer)).await
                }
                (TaskKind::RiskTrend, _) => {
                    run_logged(kind, charts::refresh_risk_trend(source, writer)).await
                }
                (TaskKind::Rainfall, Some(stamp)) => {
                    run_logged(kind, refresh_rainfall(source, writer, &ctx.rain, stamp)).await
                }
                (TaskKind::Rainfall, None) => None,
                (TaskKind::Freshness, _) => {
                    run_logged(kind, freshness::refresh_freshness(source, writer)).await
                }
            }
        })
    }
}

/// A periodically re-armed task. Cancelling stops future ticks; invocations
/// already in flight run to completion.
#[derive(Debug)]
pub struct ArmedTask {
    pub kind: TaskKind,
    pub period: Duration,
    handle: JoinHandle<()>,
}

impl ArmedTask {
    pub fn cancel(&self) {
        self.handle.abort();
    }
}

/// Arms every refresh task the page has a region for and owns the rainfall
/// interval selection.
pub struct Scheduler<S> {
    ctx: TaskContext<S>,
    refresh_period: Duration,
    freshness_period: Duration,
    tasks: Mutex<Vec<ArmedTask>>,
}

impl<S: StationSource> Scheduler<S> {
    /// Build a scheduler over `page`. The interval selector, if the page has
    /// one, is initialised to the configured default.
    #[must_use]
    pub fn new(source: Arc<S>, page: Page, config: &Config) -> Self {
        let writer = DomWriter::new(page);
        let rain = Arc::new(RainControl::new(
            config.rain_interval_options.clone(),
            config.rain_interval_default,
        ));

        writer.set_selector(
            Region::RainInterval,
            rain.current().interval_hours,
            rain.options(),
        );

        Self {
            ctx: TaskContext {
                source,
                writer,
                rain,
            },
            refresh_period: config.refresh_period(),
            freshness_period: config.freshness_period(),
            tasks: Mutex::new(Vec::new()),
        }
    }

    #[must_use]
    pub fn page(&self) -> &Page {
        self.ctx.writer.page()
    }

    #[must_use]
    pub fn period_of(&self, kind: TaskKind) -> Duration {
        match kind {
            TaskKind::Freshness => self.freshness_period,
            _ => self.refresh_period,
        }
    }

    /// Arm every task whose region is on the page: one immediate invocation,
    /// then one per period. While any task is armed, calling this again
    /// re-arms nothing.
    pub fn start(&self) -> Vec<TaskKind> {
        let mut tasks = self.tasks.lock().unwrap_or_else(PoisonError::into_inner);
        if !tasks.is_empty() {
            return tasks.iter().map(|t| t.kind).collect();
        }

        for kind in TaskKind::ALL {
            if !kind.is_present_on(self.page()) {
                tracing::debug!(task = %kind, "Region not on page, task not armed");
                continue;
            }
            let period = self.period_of(kind);
            tasks.push(ArmedTask {
                kind,
                period,
                handle: self.arm(kind, period),
            });
        }

        let armed: Vec<TaskKind> = tasks.iter().map(|t| t.kind).collect();
        tracing::info!(
            tasks = ?armed,
            refresh_secs = self.refresh_period.as_secs(),
            freshness_secs = self.freshness_period.as_secs(),
            "Refresh tasks armed"
        );
        armed
    }

    fn arm(&self, kind: TaskKind, period: Duration) -> JoinHandle<()> {
        let ctx = self.ctx.clone();

        tokio::spawn(async move {
            let mut ticker = interval(period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

            loop {
                // First tick completes immediately
                ticker.tick().await;
                tracing::trace!(task = %kind, "Tick");
                // Not awaited: a slow request must not shift the cadence.
                drop(ctx.dispatch(kind));
            }
        })
    }

    /// Kinds of the tasks currently armed.
    #[must_use]
    pub fn armed(&self) -> Vec<TaskKind> {
        self.tasks
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .map(|t| t.kind)
            .collect()
    }

    /// One out-of-band invocation of `kind`, outside its periodic timer.
    pub fn dispatch(&self, kind: TaskKind) -> JoinHandle<Option<Outcome>> {
        self.ctx.dispatch(kind)
    }

    #[must_use]
    pub fn rain_selection(&self) -> RainSelection {
        self.ctx.rain.current()
    }

    #[must_use]
    pub fn rain_control(&self) -> &RainControl {
        &self.ctx.rain
    }

    /// Handle a user selection on the rainfall interval selector.
    ///
    /// The selection is applied before this returns, and one rainfall fetch
    /// for the new interval is dispatched immediately. The periodic rainfall
    /// timer is neither reset nor paused.
    ///
    /// # Errors
    ///
    /// `NotFound` if the page has no selector, `BadRequest` if
    /// `interval_hours` is not one of its options.
    pub fn select_rain_interval(&self, interval_hours: u32) -> AppResult<RainSelection> {
        if !self.page().contains(Region::RainInterval) {
            return Err(AppError::NotFound(
                "Rainfall interval selector is not on the page".to_string(),
            ));
        }

        let selection = self.ctx.rain.select(interval_hours)?;
        self.ctx.writer.set_selector(
            Region::RainInterval,
            selection.interval_hours,
            self.ctx.rain.options(),
        );
        tracing::info!(
            interval_hours,
            generation = selection.generation,
            "Rainfall interval selected"
        );

        if TaskKind::Rainfall.is_present_on(self.page()) {
            drop(self.ctx.dispatch(TaskKind::Rainfall));
        }
        Ok(selection)
    }

    /// Stop the periodic timer of `kind`. Returns false if it was not armed.
    pub fn cancel(&self, kind: TaskKind) -> bool {
        let mut tasks = self.tasks.lock().unwrap_or_else(PoisonError::into_inner);
        match tasks.iter().position(|t| t.kind == kind) {
            Some(index) => {
                tasks.remove(index).cancel();
                tracing::debug!(task = %kind, "Task cancelled");
                true
            }
            None => false,
        }
    }

    /// Cancel every armed task.
    pub fn shutdown(&self) {
        let mut tasks = self.tasks.lock().unwrap_or_else(PoisonError::into_inner);
        for task in tasks.drain(..) {
            task.cancel();
        }
        tracing::info!("Refresh tasks stopped");
    }
}
