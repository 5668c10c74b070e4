use std::time::{Duration, Instant};

/// Identifies one scheduled transition. A ticket that no longer matches the
/// pending transition is stale and must be ignored.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TransitionTicket(u64);

#[derive(Clone, Copy, Debug)]
struct PendingTransition {
    ticket: TransitionTicket,
    due: Instant,
}

/// At most one outstanding delayed transition.
#[derive(Debug, Default)]
pub struct DwellTimer {
    next_id: u64,
    pending: Option<PendingTransition>,
}

impl DwellTimer {
    /// Schedule a transition `dwell` after `now`, replacing any pending one.
    pub fn schedule(&mut self, now: Instant, dwell: Duration) -> TransitionTicket {
        self.next_id += 1;
        let ticket = TransitionTicket(self.next_id);
        self.pending = Some(PendingTransition {
            ticket,
            due: now + dwell,
        });
        ticket
    }

    pub fn cancel(&mut self) -> bool {
        self.pending.take().is_some()
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    pub fn ticket(&self) -> Option<TransitionTicket> {
        self.pending.map(|p| p.ticket)
    }

    pub fn remaining(&self, now: Instant) -> Option<Duration> {
        self.pending.map(|p| p.due.saturating_duration_since(now))
    }

    /// The pending ticket, if its deadline has passed.
    pub fn due(&self, now: Instant) -> Option<TransitionTicket> {
        self.pending.filter(|p| now >= p.due).map(|p| p.ticket)
    }

    /// Consume the pending transition if `ticket` is the current one.
    pub fn take(&mut self, ticket: TransitionTicket) -> bool {
        match self.pending {
            Some(p) if p.ticket == ticket => {
                self.pending = None;
                true
            }
            _ => false,
        }
    }
}
