use std::time::Duration;

use tokio::sync::mpsc::UnboundedSender;
use tokio::task::JoinHandle;

use super::{Completion, Ticket};

struct DebounceTimer {
    ticket: Ticket,
    handle: JoinHandle<()>,
}

impl Drop for DebounceTimer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

/// Holds at most one pending timer. Scheduling a new one aborts the old one.
pub(crate) struct Debouncer {
    delay: Duration,
    pending: Option<DebounceTimer>,
    next_ticket: u64,
}

impl Debouncer {
    pub(crate) fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: None,
            next_ticket: 0,
        }
    }

    pub(crate) fn schedule(&mut self, query: String, tx: &UnboundedSender<Completion>) -> Ticket {
        self.cancel();
        self.next_ticket += 1;
        let ticket = Ticket(self.next_ticket);
        let delay = self.delay;
        let tx = tx.clone();
        let handle = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            let _ = tx.send(Completion::TimerFired { ticket, query });
        });
        self.pending = Some(DebounceTimer { ticket, handle });
        ticket
    }

    pub(crate) fn cancel(&mut self) -> bool {
        self.pending.take().is_some()
    }

    /// Consume the pending timer if `ticket` is still the current one.
    pub(crate) fn fire(&mut self, ticket: Ticket) -> bool {
        match &self.pending {
            Some(timer) if timer.ticket == ticket => {
                self.pending = None;
                true
            }
            _ => false,
        }
    }

    pub(crate) fn is_pending(&self) -> bool {
        self.pending.is_some()
    }
}
