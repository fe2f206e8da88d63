use parley_core::{PayloadKind, Token};
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

pub const INITIAL_FREQUENCY: u64 = 100;
pub const MAX_FREQUENCY: u64 = 1_000_000;

/// Counts received messages across every channel and decides when a
/// liveness summary is due.
///
/// A summary is due on every `frequency`-th message. Once the count reaches
/// ten times the current frequency, the frequency grows tenfold (capped at
/// [`MAX_FREQUENCY`]), so log volume shrinks logarithmically under load.
#[derive(Debug)]
pub struct ReceptionCounter {
    count: AtomicU64,
    frequency: AtomicU64,
}

impl Default for ReceptionCounter {
    fn default() -> Self {
        Self::new()
    }
}

impl ReceptionCounter {
    pub fn new() -> Self {
        Self {
            count: AtomicU64::new(0),
            frequency: AtomicU64::new(INITIAL_FREQUENCY),
        }
    }

    /// Count one message. Returns the running total when a summary is due.
    pub fn record(&self) -> Option<u64> {
        let count = self.count.fetch_add(1, Ordering::AcqRel) + 1;
        let frequency = self.frequency.load(Ordering::Acquire);

        if count % frequency != 0 {
            return None;
        }

        if count >= frequency * 10 && frequency < MAX_FREQUENCY {
            // A racing caller may already have bumped it.
            let _ = self.frequency.compare_exchange(
                frequency,
                frequency * 10,
                Ordering::AcqRel,
                Ordering::Acquire,
            );
        }
        Some(count)
    }

    pub fn count(&self) -> u64 {
        self.count.load(Ordering::Acquire)
    }

    pub fn frequency(&self) -> u64 {
        self.frequency.load(Ordering::Acquire)
    }
}

/// Periodic diagnostic line about the most recent message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReceptionSummary {
    pub total: u64,
    pub peer: Token,
    pub kind: PayloadKind,
    pub size: usize,
    pub echoed: bool,
}

impl fmt::Display for ReceptionSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Received {} messages in total from peer with {}, most recent of type {} and {}successfully echoed most recent message of size {} back to {}",
            self.total,
            self.peer,
            self.kind,
            if self.echoed { "" } else { "un" },
            self.size,
            self.peer
        )
    }
}
