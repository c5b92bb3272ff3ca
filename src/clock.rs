use chrono::Utc;

/// Time source for entry timestamps and animation scheduling. Injected so
/// the deferred-delete state machine can be driven without real delays.
pub trait Clock {
    fn now_ms(&self) -> i64;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_ms(&self) -> i64 {
        Utc::now().timestamp_millis()
    }
}
