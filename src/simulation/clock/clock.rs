//! Turns real elapsed time into a whole number of fixed simulation ticks.

/// Small negative buffers inside this window are treated as "on time".
const SMOOTHING_WINDOW_MS: f64 = 9.0;

#[derive(Clone, Debug)]
pub struct FixedStepClock {
    frame_rate: f32,
    max_catch_up_ms: f64,
    buffer_ms: f64,
}

impl FixedStepClock {
    pub fn new(frame_rate: f32, max_catch_up_ms: f64) -> Self {
        invariant!(frame_rate > 0.0, "frame rate must be positive");
        Self {
            frame_rate,
            max_catch_up_ms,
            buffer_ms: 0.0,
        }
    }

    /// Milliseconds per tick.
    #[inline]
    pub fn step_ms(&self) -> f64 {
        1000.0 / self.frame_rate as f64
    }

    pub fn buffer_ms(&self) -> f64 {
        self.buffer_ms
    }

    pub fn set_frame_rate(&mut self, frame_rate: f32) {
        if frame_rate > 0.0 {
            self.frame_rate = frame_rate;
        }
    }

    pub fn set_max_catch_up_ms(&mut self, ms: f64) {
        self.max_catch_up_ms = ms.max(0.0);
    }

    pub fn reset(&mut self) {
        self.buffer_ms = 0.0;
    }

    /// Feed `frame_ms` of real time and get the number of ticks owed.
    ///
    /// The buffer is capped at `max_catch_up_ms` so a long stall runs a few
    /// ticks instead of a spiral of them. A paused clock accumulates nothing
    /// and owes nothing.
    pub fn advance(&mut self, frame_ms: f64, paused: bool) -> u32 {
        if !paused && frame_ms.is_finite() {
            self.buffer_ms += frame_ms;
        }
        self.buffer_ms = self.buffer_ms.min(self.max_catch_up_ms);
        if paused {
            return 0;
        }

        let mut smoothing = 0.0;
        if self.buffer_ms < 0.0 && self.buffer_ms > -SMOOTHING_WINDOW_MS {
            smoothing = self.buffer_ms;
            self.buffer_ms = 0.0;
        }

        let step = self.step_ms();
        let mut ticks = 0;
        while self.buffer_ms >= 0.0 {
            ticks += 1;
            self.buffer_ms -= step;
        }
        self.buffer_ms += smoothing;
        ticks
    }
}

impl Default for FixedStepClock {
    fn default() -> Self {
        Self::new(60.0, 50.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn steady_frames_owe_one_tick() {
        let mut clock = FixedStepClock::default();
        let frame = clock.step_ms();
        // the very first frame also runs the tick for time zero
        assert_eq!(clock.advance(frame, false), 2);
        for _ in 0..10 {
            assert_eq!(clock.advance(frame, false), 1);
        }
    }

    #[test]
    fn long_stall_is_capped() {
        let mut clock = FixedStepClock::default();
        let ticks = clock.advance(1000.0, false);
        assert!(ticks <= 4, "ran {ticks} ticks");
        assert!(ticks >= 3);
    }

    #[test]
    fn slightly_short_frame_still_ticks() {
        let mut clock = FixedStepClock::default();
        let frame = clock.step_ms();
        clock.advance(frame, false);
        assert_eq!(clock.advance(frame - 2.0, false), 1);
    }

    #[test]
    fn paused_accumulates_nothing() {
        let mut clock = FixedStepClock::default();
        let frame = clock.step_ms();
        clock.advance(frame, false);
        let before = clock.buffer_ms();
        assert_eq!(clock.advance(500.0, true), 0);
        assert_eq!(clock.buffer_ms(), before);
        assert_eq!(clock.advance(frame, false), 1);
    }

    #[test]
    fn non_finite_frame_time_is_ignored() {
        let mut clock = FixedStepClock::default();
        clock.advance(clock.step_ms(), false);
        assert_eq!(clock.advance(f64::NAN, false), 0);
    }
}
