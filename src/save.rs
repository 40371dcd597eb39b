//! Save tracking: snapshot comparison, simulated save latency and autosave

/// Tracks what was last saved and any save in flight.
///
/// A save compares the serialised document against the last saved
/// snapshot; an identical snapshot is a no-op. Otherwise the tracker
/// reports `saving` until `latency_ms` has passed.
#[derive(Debug, Clone)]
pub struct SaveTracker {
    latency_ms: u64,
    autosave_interval_ms: u64,
    last_saved: Option<String>,
    last_saved_at_ms: Option<u64>,
    in_flight: Option<InFlight>,
    next_autosave_ms: Option<u64>,
}

#[derive(Debug, Clone)]
struct InFlight {
    snapshot: String,
    completes_at_ms: u64,
}

impl SaveTracker {
    pub fn new(latency_ms: u64, autosave_interval_ms: u64) -> Self {
        Self {
            latency_ms,
            autosave_interval_ms,
            last_saved: None,
            last_saved_at_ms: None,
            in_flight: None,
            next_autosave_ms: None,
        }
    }

    /// Start saving `snapshot`. Returns false when there is nothing new to save.
    pub fn request(&mut self, snapshot: String, now_ms: u64) -> bool {
        let pending = self.in_flight.as_ref().map(|f| &f.snapshot);
        if self.last_saved.as_ref() == Some(&snapshot) || pending == Some(&snapshot) {
            return false;
        }
        log::debug!("saving {} bytes, done at {}", snapshot.len(), now_ms + self.latency_ms);
        self.in_flight = Some(InFlight {
            snapshot,
            completes_at_ms: now_ms.saturating_add(self.latency_ms),
        });
        true
    }

    /// Finish the save in flight once its latency has elapsed.
    /// Returns true when a save completed during this call.
    pub fn poll(&mut self, now_ms: u64) -> bool {
        match self.in_flight.take() {
            Some(flight) if now_ms >= flight.completes_at_ms => {
                self.last_saved = Some(flight.snapshot);
                self.last_saved_at_ms = Some(flight.completes_at_ms);
                true
            }
            other => {
                self.in_flight = other;
                false
            }
        }
    }

    /// True once every autosave interval. The first call arms the timer.
    pub fn autosave_due(&mut self, now_ms: u64) -> bool {
        match self.next_autosave_ms {
            None => {
                self.next_autosave_ms = Some(now_ms.saturating_add(self.autosave_interval_ms));
                false
            }
            Some(due) if now_ms >= due => {
                self.next_autosave_ms = Some(now_ms.saturating_add(self.autosave_interval_ms));
                true
            }
            Some(_) => false,
        }
    }

    /// Restart the autosave interval from `now_ms`, after an edit
    pub fn rearm_autosave(&mut self, now_ms: u64) {
        self.next_autosave_ms = Some(now_ms.saturating_add(self.autosave_interval_ms));
    }

    pub fn is_saving(&self) -> bool {
        self.in_flight.is_some()
    }

    pub fn last_saved_at_ms(&self) -> Option<u64> {
        self.last_saved_at_ms
    }
}
