use serde::Serialize;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, PoisonError};
use tokio::sync::watch;
use utoipa::ToSchema;

use crate::error::{AppError, AppResult};
use crate::refresh::Outcome;
use crate::station::StationSource;
use crate::view::{DomWriter, Region, format};

/// The selected rainfall interval. `generation` increases on every user
/// selection, even when the same interval is picked again.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
pub struct RainSelection {
    pub interval_hours: u32,
    pub generation: u64,
}

/// Configuration snapshot copied into one rainfall request at dispatch time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RainStamp {
    pub interval_hours: u32,
    pub generation: u64,
    /// Monotonic per-dispatch sequence number
    pub seq: u64,
}

/// Owner of the rainfall interval and of the stale-response guard.
///
/// A response is rendered only if it was requested under the current
/// selection and is newer than the last rendered response.
#[derive(Debug)]
pub struct RainControl {
    options: Vec<u32>,
    selection: watch::Sender<RainSelection>,
    next_seq: AtomicU64,
    last_rendered_seq: Mutex<u64>,
}

impl RainControl {
    /// `initial` must be one of `options`; the config loader enforces this.
    #[must_use]
    pub fn new(options: Vec<u32>, initial: u32) -> Self {
        let (selection, _) = watch::channel(RainSelection {
            interval_hours: initial,
            generation: 0,
        });

        Self {
            options,
            selection,
            next_seq: AtomicU64::new(1),
            last_rendered_seq: Mutex::new(0),
        }
    }

    #[must_use]
    pub fn options(&self) -> &[u32] {
        &self.options
    }

    #[must_use]
    pub fn current(&self) -> RainSelection {
        *self.selection.borrow()
    }

    /// Receiver notified on every selection change.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<RainSelection> {
        self.selection.subscribe()
    }

    /// Switch to `interval_hours`. Only the scheduler's selection handler
    /// calls this.
    pub(crate) fn select(&self, interval_hours: u32) -> AppResult<RainSelection> {
        if !self.options.contains(&interval_hours) {
            return Err(AppError::BadRequest(format!(
                "Rainfall interval {interval_hours}h is not one of {:?}",
                self.options
            )));
        }

        self.selection.send_modify(|s| {
            s.interval_hours = interval_hours;
            s.generation += 1;
        });
        Ok(self.current())
    }

    /// Copy the current configuration for a request about to be dispatched.
    #[must_use]
    pub fn stamp(&self) -> RainStamp {
        let current = self.current();
        RainStamp {
            interval_hours: current.interval_hours,
            generation: current.generation,
            seq: self.next_seq.fetch_add(1, Ordering::Relaxed),
        }
    }

    /// Run `render` if `stamp` is still current; returns whether it ran.
    pub fn render_if_current(&self, stamp: RainStamp, render: impl FnOnce()) -> bool {
        let mut last = self
            .last_rendered_seq
            .lock()
            .unwrap_or_else(PoisonError::into_inner);

        if stamp.generation != self.current().generation || stamp.seq <= *last {
            return false;
        }

        *last = stamp.seq;
        render();
        true
    }
}

/// Fetch the accumulated rainfall for the interval in `stamp` and render it,
/// unless a newer selection or a newer response got there first.
///
/// # Errors
///
/// Propagates a failed fetch. A response attributed to a different interval
/// than the one requested is malformed.
pub async fn refresh_rainfall<S: StationSource>(
    source: &S,
    writer: &DomWriter,
    control: &RainControl,
    stamp: RainStamp,
) -> AppResult<Outcome> {
    let response = source.rainfall(stamp.interval_hours).await?;

    if let Some(ore) = response.ore
        && ore != stamp.interval_hours
    {
        return Err(AppError::MalformedResponse(format!(
            "/api/pioggia/{}: response is for {ore}h",
            stamp.interval_hours
        )));
    }

    let text = format::rainfall(response.pioggia);
    if control.render_if_current(stamp, || {
        writer.set_text(Region::RainValue, text);
    }) {
        Ok(Outcome::Rendered)
    } else {
        tracing::debug!(
            interval_hours = stamp.interval_hours,
            generation = stamp.generation,
            seq = stamp.seq,
            current = ?control.current(),
            "Discarding stale rainfall response"
        );
        Ok(Outcome::Discarded)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn select_rejects_unknown_interval() {
        let control = RainControl::new(vec![1, 3, 6], 3);
        assert!(matches!(control.select(4), Err(AppError::BadRequest(_))));
        assert_eq!(control.current().interval_hours, 3);
        assert_eq!(control.current().generation, 0);
    }

    #[test]
    fn reselecting_same_interval_bumps_generation() {
        let control = RainControl::new(vec![1, 3, 6], 3);
        let first = control.select(3).unwrap();
        let second = control.select(3).unwrap();
        assert_eq!(first.generation + 1, second.generation);
    }

    #[test]
    fn stamps_copy_selection_and_increase() {
        let control = RainControl::new(vec![3, 6], 3);
        let a = control.stamp();
        control.select(6).unwrap();
        let b = control.stamp();

        assert_eq!((a.interval_hours, a.generation), (3, 0));
        assert_eq!((b.interval_hours, b.generation), (6, 1));
        assert!(b.seq > a.seq);
    }

    #[test]
    fn stamp_from_previous_selection_is_discarded() {
        let control = RainControl::new(vec![3, 6], 3);
        let stale = control.stamp();
        control.select(6).unwrap();
        let fresh = control.stamp();

        let mut rendered = Vec::new();
        assert!(control.render_if_current(fresh, || rendered.push(fresh.interval_hours)));
        assert!(!control.render_if_current(stale, || rendered.push(stale.interval_hours)));
        assert_eq!(rendered, vec![6]);
    }

    #[test]
    fn older_response_of_same_selection_is_discarded() {
        let control = RainControl::new(vec![3], 3);
        let older = control.stamp();
        let newer = control.stamp();

        assert!(control.render_if_current(newer, || {}));
        assert!(!control.render_if_current(older, || {}));
    }

    #[test]
    fn subscribers_see_selection_changes() {
        let control = RainControl::new(vec![3, 12], 3);
        let mut rx = control.subscribe();
        control.select(12).unwrap();
        assert!(rx.has_changed().unwrap());
        assert_eq!(rx.borrow_and_update().interval_hours, 12);
    }
}
