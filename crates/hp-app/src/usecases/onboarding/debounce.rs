//! Debounced field validation.
//!
//! Each edit replaces the pending validation task for its field: the old task
//! is aborted and a new one sleeps for the debounce delay before validating
//! the value captured at edit time. A per-field generation counter guards the
//! publish step, so a task that loses the race with a newer edit still cannot
//! overwrite the newer result.

use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use tokio::task::AbortHandle;
use tokio::time::sleep;
use tracing::{debug, trace};

use hp_core::onboarding::{validate_field, FieldInput, FieldKind, FieldValidationState};
use hp_core::ports::{ClockPort, OnboardingEventPort};

struct PendingValidation {
    generation: u64,
    handle: AbortHandle,
}

#[derive(Default)]
struct SchedulerState {
    pending: HashMap<FieldKind, PendingValidation>,
    generations: HashMap<FieldKind, u64>,
    results: BTreeMap<FieldKind, FieldValidationState>,
}

impl SchedulerState {
    fn bump(&mut self, field: FieldKind) -> u64 {
        let generation = self.generations.entry(field).or_insert(0);
        *generation += 1;
        *generation
    }
}

pub struct DebouncedValidationScheduler {
    delay: Duration,
    clock: Arc<dyn ClockPort>,
    events: Arc<dyn OnboardingEventPort>,
    state: Arc<Mutex<SchedulerState>>,
}

fn lock(state: &Mutex<SchedulerState>) -> MutexGuard<'_, SchedulerState> {
    // The map stays consistent even if a holder panicked; keep going.
    state.lock().unwrap_or_else(PoisonError::into_inner)
}

impl DebouncedValidationScheduler {
    pub fn new(
        delay: Duration,
        clock: Arc<dyn ClockPort>,
        events: Arc<dyn OnboardingEventPort>,
    ) -> Self {
        Self {
            delay,
            clock,
            events,
            state: Arc::new(Mutex::new(SchedulerState::default())),
        }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Replace any pending validation for `input`'s field with a new one.
    ///
    /// Must be called from within a Tokio runtime.
    pub fn schedule(&self, input: FieldInput) {
        let field = input.kind();
        let delay = self.delay;
        let clock = Arc::clone(&self.clock);
        let events = Arc::clone(&self.events);
        let shared = Arc::clone(&self.state);

        let mut state = lock(&self.state);
        if let Some(previous) = state.pending.remove(&field) {
            previous.handle.abort();
            trace!(?field, generation = previous.generation, "validation superseded");
        }
        let generation = state.bump(field);

        let handle = tokio::spawn(async move {
            sleep(delay).await;
            let result = validate_field(&input, clock.today());

            {
                let mut state = lock(&shared);
                if state.generations.get(&field).copied() != Some(generation) {
                    return;
                }
                state.pending.remove(&field);
                state.results.insert(field, result.clone());
            }

            debug!(?field, valid = result.is_valid(), "field validated");
            events.emit_field_validated(field, result).await;
        });

        state.pending.insert(
            field,
            PendingValidation {
                generation,
                handle: handle.abort_handle(),
            },
        );
    }

    /// Cancel the pending validation for `field`, if any.
    pub fn cancel(&self, field: FieldKind) {
        let mut state = lock(&self.state);
        if let Some(pending) = state.pending.remove(&field) {
            pending.handle.abort();
        }
        // Invalidate a task that already woke and is waiting for the lock.
        state.bump(field);
    }

    pub fn cancel_all(&self) {
        let mut state = lock(&self.state);
        let fields: Vec<FieldKind> = state.pending.keys().copied().collect();
        for (_, pending) in state.pending.drain() {
            pending.handle.abort();
        }
        for field in fields {
            state.bump(field);
        }
    }

    /// Cancel everything and forget published results.
    pub fn reset(&self) {
        self.cancel_all();
        lock(&self.state).results.clear();
    }

    pub fn is_pending(&self, field: FieldKind) -> bool {
        lock(&self.state).pending.contains_key(&field)
    }

    pub fn validation_state(&self, field: FieldKind) -> Option<FieldValidationState> {
        lock(&self.state).results.get(&field).cloned()
    }

    pub fn snapshot(&self) -> BTreeMap<FieldKind, FieldValidationState> {
        lock(&self.state).results.clone()
    }
}

impl Drop for DebouncedValidationScheduler {
    fn drop(&mut self) {
        self.cancel_all();
    }
}
