use std::sync::Arc;

use tokio::sync::mpsc::UnboundedSender;
use tokio::sync::oneshot;

use super::{Completion, Ticket};
use crate::error::{GeoInputError, Result};
use crate::models::AddressCandidate;
use crate::provider::SuggestionProvider;

struct PendingRequest {
    ticket: Ticket,
    query: String,
    // Dropping the sender cancels as well as sending on it.
    cancel: oneshot::Sender<()>,
}

/// Holds at most one in-flight autocomplete request.
///
/// Starting a request always cancels the previous one first; the canceled
/// task then reports [`GeoInputError::Canceled`] for its ticket. Outcomes for
/// any ticket other than the pending one are downgraded to `Canceled` as
/// well, so a response that was already received when a newer request
/// started can never reach the list.
pub(crate) struct RequestSlot {
    pending: Option<PendingRequest>,
    next_ticket: u64,
}

impl RequestSlot {
    pub(crate) fn new() -> Self {
        Self {
            pending: None,
            next_ticket: 0,
        }
    }

    pub(crate) fn start(
        &mut self,
        provider: Arc<dyn SuggestionProvider>,
        query: String,
        tx: &UnboundedSender<Completion>,
    ) -> Ticket {
        self.cancel();
        self.next_ticket += 1;
        let ticket = Ticket(self.next_ticket);
        let (cancel, cancelled) = oneshot::channel::<()>();
        let tx = tx.clone();
        let text = query.clone();

        tokio::spawn(async move {
            let outcome = tokio::select! {
                biased;
                _ = cancelled => Err(GeoInputError::Canceled),
                res = provider.suggest(&text) => res,
            };
            let _ = tx.send(Completion::RequestSettled { ticket, outcome });
        });

        self.pending = Some(PendingRequest {
            ticket,
            query,
            cancel,
        });
        ticket
    }

    pub(crate) fn cancel(&mut self) -> bool {
        match self.pending.take() {
            Some(request) => {
                tracing::debug!(query = %request.query, "canceling in-flight autocomplete request");
                let _ = request.cancel.send(());
                true
            }
            None => false,
        }
    }

    /// Resolve the outcome reported for `ticket`.
    pub(crate) fn settle(
        &mut self,
        ticket: Ticket,
        outcome: Result<Vec<AddressCandidate>>,
    ) -> Result<Vec<AddressCandidate>> {
        match &self.pending {
            Some(request) if request.ticket == ticket => {
                self.pending = None;
                outcome
            }
            _ => Err(GeoInputError::Canceled),
        }
    }

    pub(crate) fn is_pending(&self) -> bool {
        self.pending.is_some()
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use async_trait::async_trait;
    use tokio::sync::mpsc;

    use super::*;

    struct Slow;

    #[async_trait]
    impl SuggestionProvider for Slow {
        async fn suggest(&self, text: &str) -> Result<Vec<AddressCandidate>> {
            tokio::time::sleep(Duration::from_secs(1)).await;
            Ok(vec![AddressCandidate::new(text)])
        }
    }

    fn settled(completion: Option<Completion>) -> (Ticket, Result<Vec<AddressCandidate>>) {
        match completion {
            Some(Completion::RequestSettled { ticket, outcome }) => (ticket, outcome),
            _ => panic!("expected a request completion"),
        }
    }

    #[tokio::test(start_paused = true)]
    async fn new_request_cancels_previous_first() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut slot = RequestSlot::new();
        let provider: Arc<dyn SuggestionProvider> = Arc::new(Slow);

        let first = slot.start(provider.clone(), "12 Main".to_string(), &tx);
        let second = slot.start(provider, "12 Main St".to_string(), &tx);

        let (ticket, outcome) = settled(rx.recv().await);
        assert_eq!(ticket, first);
        assert!(matches!(outcome, Err(GeoInputError::Canceled)));

        let (ticket, outcome) = settled(rx.recv().await);
        assert_eq!(ticket, second);
        let items = slot.settle(ticket, outcome).unwrap();
        assert_eq!(items[0].formatted, "12 Main St");
        assert!(!slot.is_pending());
    }

    #[tokio::test]
    async fn stale_success_is_downgraded_to_canceled() {
        let mut slot = RequestSlot::new();
        let outcome = slot.settle(Ticket(7), Ok(vec![AddressCandidate::new("late")]));
        assert!(matches!(outcome, Err(GeoInputError::Canceled)));
    }
}
