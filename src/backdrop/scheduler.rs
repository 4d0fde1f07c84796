/// Caps the tick rate of a callback that the host invokes on every display refresh.
///
/// The host re-arms the callback for as long as [`FrameScheduler::is_armed`] holds; each
/// invocation passes a monotonic timestamp and at most one tick is accepted per interval.
#[derive(Debug)]
pub struct FrameScheduler {
    interval_ms: f64,
    last_tick_ms: f64,
    armed: bool,
    accepted: u64,
}

impl FrameScheduler {
    pub fn new(interval_ms: f64) -> Self {
        Self {
            interval_ms,
            last_tick_ms: 0.0,
            armed: false,
            accepted: 0,
        }
    }

    pub fn is_armed(&self) -> bool {
        self.armed
    }

    #[cfg(test)]
    pub(super) fn accepted_ticks(&self) -> u64 {
        self.accepted
    }

    /// Arms the schedule with `now_ms` as the reference timestamp. Any standing schedule is
    /// replaced, never duplicated.
    pub fn start(&mut self, now_ms: f64) {
        if self.armed {
            log::debug!("frame scheduler restarted at {now_ms:.1} ms");
        } else {
            log::debug!("frame scheduler started at {now_ms:.1} ms");
        }
        self.last_tick_ms = now_ms;
        self.armed = true;
    }

    pub fn stop(&mut self) {
        if self.armed {
            log::debug!("frame scheduler stopped after {} ticks", self.accepted);
        }
        self.armed = false;
    }

    /// Returns whether a tick should run for the invocation at `now_ms`.
    ///
    /// An accepted tick moves the reference forward by whole intervals only, so the
    /// remainder carries into the next one instead of accumulating as drift.
    pub fn poll(&mut self, now_ms: f64) -> bool {
        if !self.armed {
            return false;
        }

        let elapsed = now_ms - self.last_tick_ms;
        if elapsed < self.interval_ms {
            return false;
        }

        self.last_tick_ms += elapsed - elapsed.rem_euclid(self.interval_ms);
        self.accepted += 1;
        true
    }
}
