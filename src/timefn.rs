// timefn - microsecond clock used for verbose timing
//
// `Instant` is monotonic on every supported platform, so there is no
// high-resolution/fallback split to pick at runtime: the choice is made once
// when the `Clock` is constructed and the clock is then handed to whoever
// needs to time something.

use std::time::Instant;

/// Microsecond tick count. Only differences between two readings are meaningful.
pub type Micros = u64;

/// A source of microsecond ticks.
///
/// The invoker is generic over this so tests can substitute a scripted clock
/// and observe exactly when (and whether) time is read.
pub trait TimeSource {
    /// Returns the current tick count in microseconds.
    fn now_us(&self) -> Micros;
}

/// Process clock. Construct once at startup and pass by reference.
#[derive(Debug, Clone, Copy)]
pub struct Clock {
    origin: Instant,
}

impl Clock {
    pub fn new() -> Self {
        Clock {
            origin: Instant::now(),
        }
    }
}

impl Default for Clock {
    fn default() -> Self {
        Clock::new()
    }
}

impl TimeSource for Clock {
    fn now_us(&self) -> Micros {
        self.origin.elapsed().as_micros() as Micros
    }
}

/// Returns the microseconds between two readings, saturating at zero if the
/// readings are out of order.
pub fn span_us(start: Micros, end: Micros) -> Micros {
    end.saturating_sub(start)
}
