use chrono::NaiveDate;
use std::sync::{
    Arc,
    atomic::{AtomicBool, Ordering},
};
use std::time::Duration;
use strum_macros::{Display, EnumString};
use tokio::{
    sync::{Mutex, RwLock},
    task::JoinHandle,
    time::MissedTickBehavior,
};
use tracing::{error, info, warn};

use crate::{
    model::view::ViewModel,
    services::reconcile::{IdentityMap, reconcile},
    source::RecordSource,
    utils::date_utils::local_today,
};

/// The only failure text the dashboard ever shows.
pub const FETCH_ERROR_MESSAGE: &str = "Failed to load data from Google Sheets";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PollState {
    Loading,
    Ready { view: ViewModel },
    Error { message: String },
}

/// What to do when a tick fires while the previous cycle is still fetching.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq, Display, EnumString)]
#[strum(serialize_all = "snake_case")]
pub enum OverlapPolicy {
    /// Start another cycle anyway; whichever finishes last is shown
    #[default]
    Allow,
    /// Drop the tick
    Skip,
}

pub struct Poller {
    source: Arc<dyn RecordSource>,
    identity: Mutex<IdentityMap>,
    state: RwLock<PollState>,
    overlap: OverlapPolicy,
    in_flight: AtomicBool,
    today: fn() -> NaiveDate,
}

impl Poller {
    pub fn new(source: Arc<dyn RecordSource>, identity: IdentityMap, overlap: OverlapPolicy) -> Self {
        Self {
            source,
            identity: Mutex::new(identity),
            state: RwLock::new(PollState::Loading),
            overlap,
            in_flight: AtomicBool::new(false),
            today: local_today,
        }
    }

    /// Replace the clock used to decide what "today" is.
    pub fn with_today(mut self, today: fn() -> NaiveDate) -> Self {
        self.today = today;
        self
    }

    pub async fn snapshot(&self) -> PollState {
        self.state.read().await.clone()
    }

    pub fn today(&self) -> NaiveDate {
        (self.today)()
    }

    /// Run one fetch + reconcile cycle. Returns `false` if it was skipped
    /// because another cycle was still running.
    pub async fn poll_once(&self) -> bool {
        let _guard = match self.overlap {
            OverlapPolicy::Allow => None,
            OverlapPolicy::Skip => match InFlight::acquire(&self.in_flight) {
                Some(guard) => Some(guard),
                None => {
                    warn!("Previous poll still running, skipping tick");
                    return false;
                }
            },
        };

        let fetched = futures::try_join!(
            self.source.fetch_employees(),
            self.source.fetch_attendance()
        );

        let next = match fetched {
            Ok((employees, attendance)) => {
                let view = {
                    let mut identity = self.identity.lock().await;
                    reconcile(&employees, &attendance, self.today(), &mut identity)
                };
                info!(
                    employees = employees.len(),
                    attendance = attendance.len(),
                    present = view.present_today,
                    "Poll cycle complete"
                );
                PollState::Ready { view }
            }
            Err(e) => {
                error!(error = %e, "Poll cycle failed");
                PollState::Error {
                    message: FETCH_ERROR_MESSAGE.to_string(),
                }
            }
        };

        *self.state.write().await = next;
        true
    }

    /// Poll now and then every `period` until the handle is cancelled or dropped.
    ///
    /// Each tick runs its cycle as a separate task, so a slow fetch does not
    /// delay the schedule. Cancelling stops the timer only; cycles already
    /// started run to completion.
    pub fn start(self: &Arc<Self>, period: Duration) -> TaskHandle {
        let poller = Arc::clone(self);
        let inner = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                ticker.tick().await;
                let cycle = Arc::clone(&poller);
                tokio::spawn(async move {
                    cycle.poll_once().await;
                });
            }
        });
        info!(period_secs = period.as_secs(), "Poller started");
        TaskHandle { inner }
    }
}

/// Owns the repeating poll timer. Dropping it cancels the timer.
#[derive(Debug)]
pub struct TaskHandle {
    inner: JoinHandle<()>,
}

impl TaskHandle {
    pub fn cancel(&self) {
        self.inner.abort();
    }

    pub fn is_finished(&self) -> bool {
        self.inner.is_finished()
    }
}

impl Drop for TaskHandle {
    fn drop(&mut self) {
        self.inner.abort();
    }
}

/// Clears the in-flight flag however the cycle ends.
struct InFlight<'a>(&'a AtomicBool);

impl<'a> InFlight<'a> {
    fn acquire(flag: &'a AtomicBool) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| InFlight(flag))
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}
