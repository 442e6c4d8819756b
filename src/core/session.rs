use crate::core::orchestrator::SearchOrchestrator;
use crate::core::{Geocoder, NearbyLookup, SearchEvent, SearchObserver, SearchRequest, SearchResult};
use crate::utils::error::Result;
use std::sync::atomic::{AtomicU64, Ordering};

#[derive(Debug)]
pub enum SearchOutcome {
    Current(Result<SearchResult>),
    /// A newer search was submitted while this one was in flight.
    Superseded,
}

impl SearchOutcome {
    pub fn is_superseded(&self) -> bool {
        matches!(self, SearchOutcome::Superseded)
    }

    pub fn into_current(self) -> Option<Result<SearchResult>> {
        match self {
            SearchOutcome::Current(result) => Some(result),
            SearchOutcome::Superseded => None,
        }
    }
}

struct GenerationGuard<'a, O: SearchObserver> {
    ticket: u64,
    generation: &'a AtomicU64,
    inner: &'a O,
}

impl<O: SearchObserver> GenerationGuard<'_, O> {
    fn is_current(&self) -> bool {
        self.generation.load(Ordering::SeqCst) == self.ticket
    }
}

impl<O: SearchObserver> SearchObserver for GenerationGuard<'_, O> {
    fn on_event(&self, event: &SearchEvent) {
        if self.is_current() {
            self.inner.on_event(event);
        } else {
            tracing::debug!(
                "Dropping {:?} from superseded search #{}",
                event.state(),
                self.ticket
            );
        }
    }
}

/// Front door for repeated searches sharing one observer. Only the most
/// recently submitted search may write to the observer; anything an older,
/// still-running search produces is discarded.
///
/// The generation check and the observer write are not one atomic step, so
/// drive a session from a single task. Concurrent `submit` calls from other
/// threads may let one stale event through.
pub struct SearchSession<G: Geocoder, N: NearbyLookup, O: SearchObserver> {
    orchestrator: SearchOrchestrator<G, N>,
    observer: O,
    generation: AtomicU64,
}

impl<G: Geocoder, N: NearbyLookup, O: SearchObserver> SearchSession<G, N, O> {
    pub fn new(orchestrator: SearchOrchestrator<G, N>, observer: O) -> Self {
        Self {
            orchestrator,
            observer,
            generation: AtomicU64::new(0),
        }
    }

    pub fn observer(&self) -> &O {
        &self.observer
    }

    pub fn current_generation(&self) -> u64 {
        self.generation.load(Ordering::SeqCst)
    }

    pub async fn submit(&self, request: SearchRequest) -> SearchOutcome {
        let ticket = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        tracing::debug!("Starting search #{} for '{}'", ticket, request.location_text);

        let guard = GenerationGuard {
            ticket,
            generation: &self.generation,
            inner: &self.observer,
        };
        guard.on_event(&SearchEvent::Reset);
        let result = self.orchestrator.run(request, &guard).await;

        if guard.is_current() {
            SearchOutcome::Current(result)
        } else {
            tracing::warn!(
                "Search #{} finished after search #{} started; discarding its result",
                ticket,
                self.current_generation()
            );
            SearchOutcome::Superseded
        }
    }
}
