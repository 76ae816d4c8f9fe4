//! Draw scheduling and request coalescing.
//!
//! At most one reconciliation pass is in flight at a time. Requests made
//! while a pass runs do not queue individually: only the latest request's
//! intent survives, and the driver runs a single trailing pass with a fresh
//! viewport once the in-flight pass completes. Every caller awaiting any
//! coalesced request resolves when the pass covering its request finishes.
//!
//! The machine is explicit - generation counters and stored wakers - rather
//! than relying on incidental task wake ordering.

use std::cell::RefCell;
use std::future::Future;
use std::pin::Pin;
use std::rc::Rc;
use std::task::{Context, Poll, Waker};

use log::debug;

use crate::error::Result;

/// Where the active draw pass currently is.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DrawPhase {
    /// No pass in flight.
    #[default]
    Idle,
    /// Awaiting the data listener.
    Fetching,
    /// Patching the surface and running style listeners.
    Reconciling,
}

#[derive(Debug, Default)]
struct SchedulerState {
    phase: DrawPhase,
    /// Generation of the newest draw request.
    requested: u64,
    /// Highest request generation whose covering pass has completed.
    completed: u64,
    /// Whether some caller is currently driving passes.
    driving: bool,
    /// Result of the most recently completed pass, shared with waiters.
    last_result: Option<Result<()>>,
    wakers: Vec<Waker>,
}

/// Serializes and coalesces draw requests.
#[derive(Debug, Clone, Default)]
pub(crate) struct DrawScheduler {
    state: Rc<RefCell<SchedulerState>>,
}

impl DrawScheduler {
    /// Register a new draw request; returns its generation ticket.
    pub fn request(&self) -> u64 {
        let mut s = self.state.borrow_mut();
        s.requested += 1;
        s.requested
    }

    /// Attempt to become the driver. Exactly one caller wins until
    /// [`DrawScheduler::stop_driving`].
    pub fn try_drive(&self) -> bool {
        let mut s = self.state.borrow_mut();
        if s.driving {
            false
        } else {
            s.driving = true;
            true
        }
    }

    /// Newest request generation; a pass started now covers all requests up
    /// to this point.
    pub fn latest(&self) -> u64 {
        self.state.borrow().requested
    }

    /// True while requests newer than the last completed pass exist.
    pub fn pending(&self) -> bool {
        let s = self.state.borrow();
        s.requested > s.completed
    }

    /// Current phase of the active pass.
    pub fn phase(&self) -> DrawPhase {
        self.state.borrow().phase
    }

    pub fn set_phase(&self, phase: DrawPhase) {
        self.state.borrow_mut().phase = phase;
    }

    /// Mark every request up to `upto` as completed with `result`, waking
    /// all coalesced waiters.
    pub fn finish_pass(&self, upto: u64, result: &Result<()>) {
        let wakers = {
            let mut s = self.state.borrow_mut();
            s.completed = s.completed.max(upto);
            s.last_result = Some(result.clone());
            debug!(
                "draw pass complete through generation {upto} ({} waiters)",
                s.wakers.len()
            );
            std::mem::take(&mut s.wakers)
        };
        for waker in wakers {
            waker.wake();
        }
    }

    /// Release the driver slot and return to idle.
    pub fn stop_driving(&self) {
        let mut s = self.state.borrow_mut();
        s.driving = false;
        s.phase = DrawPhase::Idle;
    }

    /// A future resolving once the pass covering `ticket` completes,
    /// yielding that pass's result.
    pub fn wait(&self, ticket: u64) -> DrawWait {
        DrawWait {
            state: Rc::clone(&self.state),
            ticket,
        }
    }
}

/// Completion handle for one coalesced draw request.
pub(crate) struct DrawWait {
    state: Rc<RefCell<SchedulerState>>,
    ticket: u64,
}

impl Future for DrawWait {
    type Output = Result<()>;

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        let mut s = self.state.borrow_mut();
        if s.completed >= self.ticket {
            Poll::Ready(s.last_result.clone().unwrap_or(Ok(())))
        } else {
            s.wakers.push(cx.waker().clone());
            Poll::Pending
        }
    }
}
