//! Waits for an externally loaded widget script and mounts it once.
//!
//! The widget's `<script>` may finish loading before or after this module
//! runs, so availability is polled on a fixed interval up to a ceiling. The
//! poller is a plain state machine; timers come in through [`Scheduler`] so
//! it can be driven by hand.

use std::cell::RefCell;
use std::rc::Rc;

use gloo_timers::callback::Timeout;
use thiserror::Error;

use crate::config;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MountState {
    Waiting,
    Mounted,
    GaveUp,
}

#[derive(Debug, Error)]
pub enum MountError {
    #[error("widget initializer is missing: {0}")]
    MissingInitializer(String),
    #[error("widget initializer threw: {0}")]
    Initializer(String),
}

/// The page-side view of an embeddable widget.
pub trait WidgetHost {
    /// True once the external initializer can be called.
    fn initializer_ready(&self) -> bool;
    /// Removes the placeholder and hands the container to the initializer.
    fn mount(&self) -> Result<(), MountError>;
}

/// One-shot deferred callbacks.
pub trait Scheduler {
    fn schedule(&self, delay_ms: u32, callback: Box<dyn FnOnce()>);
}

pub struct TimeoutScheduler;

impl Scheduler for TimeoutScheduler {
    fn schedule(&self, delay_ms: u32, callback: Box<dyn FnOnce()>) {
        Timeout::new(delay_ms, callback).forget();
    }
}

#[derive(Clone, Copy, Debug)]
pub struct PollSettings {
    pub interval_ms: u32,
    /// Re-checks allowed after the immediate probe.
    pub max_attempts: u32,
}

impl Default for PollSettings {
    fn default() -> Self {
        Self {
            interval_ms: config::WIDGET_POLL_INTERVAL_MS,
            max_attempts: config::WIDGET_POLL_MAX_ATTEMPTS,
        }
    }
}

pub struct MountPoller<H> {
    host: H,
    settings: PollSettings,
    state: MountState,
    attempts: u32,
}

impl<H: WidgetHost> MountPoller<H> {
    pub fn new(host: H, settings: PollSettings) -> Self {
        Self {
            host,
            settings,
            state: MountState::Waiting,
            attempts: 0,
        }
    }

    #[cfg(test)]
    pub fn state(&self) -> MountState {
        self.state
    }

    #[cfg(test)]
    pub fn attempts(&self) -> u32 {
        self.attempts
    }

    /// The check made before any timer is scheduled.
    pub fn probe(&mut self) -> MountState {
        if self.state == MountState::Waiting {
            self.try_mount();
        }
        self.state
    }

    /// A timer-driven check. Terminal states are left alone.
    pub fn recheck(&mut self) -> MountState {
        if self.state != MountState::Waiting {
            return self.state;
        }
        self.attempts += 1;
        if !self.try_mount() && self.attempts >= self.settings.max_attempts {
            log::info!("Scheduling widget unavailable after {} attempts, keeping placeholder", self.attempts);
            self.state = MountState::GaveUp;
        }
        self.state
    }

    fn try_mount(&mut self) -> bool {
        if !self.host.initializer_ready() {
            return false;
        }
        // Mounted even on failure: the initializer is never called twice
        // for the same container.
        if let Err(e) = self.host.mount() {
            log::warn!("Scheduling widget mount failed: {}", e);
        }
        self.state = MountState::Mounted;
        true
    }
}

/// Probes right away and keeps rescheduling until the poller settles.
pub fn start<H, S>(poller: MountPoller<H>, scheduler: Rc<S>) -> Rc<RefCell<MountPoller<H>>>
where
    H: WidgetHost + 'static,
    S: Scheduler + 'static,
{
    let poller = Rc::new(RefCell::new(poller));
    if poller.borrow_mut().probe() == MountState::Waiting {
        schedule_next(poller.clone(), scheduler);
    }
    poller
}

fn schedule_next<H, S>(poller: Rc<RefCell<MountPoller<H>>>, scheduler: Rc<S>)
where
    H: WidgetHost + 'static,
    S: Scheduler + 'static,
{
    let interval = poller.borrow().settings.interval_ms;
    let next = scheduler.clone();
    scheduler.schedule(
        interval,
        Box::new(move || {
            let state = poller.borrow_mut().recheck();
            if state == MountState::Waiting {
                schedule_next(poller, next);
            }
        }),
    );
}
