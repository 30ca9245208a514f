#![forbid(unsafe_code)]

//! Easing curves and the scroll tween used for click navigation.
//!
//! Animations are host-ticked: the caller advances them with a `dt` taken
//! from its own clock. Nothing here reads wall time, so identical tick
//! sequences produce identical positions.

use std::time::Duration;

// ---------------------------------------------------------------------------
// Easing functions
// ---------------------------------------------------------------------------

/// Easing function signature: maps `t` in [0, 1] to output in [0, 1].
pub type EasingFn = fn(f32) -> f32;

/// Identity easing (constant velocity).
#[inline]
pub fn linear(t: f32) -> f32 {
    t.clamp(0.0, 1.0)
}

/// Cubic ease-out (fast start, slow end).
#[inline]
pub fn ease_out_cubic(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    1.0 - (1.0 - t).powi(3)
}

// ---------------------------------------------------------------------------
// Animation trait
// ---------------------------------------------------------------------------

/// A time-based animation producing values in [0.0, 1.0].
pub trait Animation {
    /// Advance the animation by `dt`.
    fn tick(&mut self, dt: Duration);

    /// Whether the animation has reached its end.
    fn is_complete(&self) -> bool;

    /// Current output value, clamped to [0.0, 1.0].
    fn value(&self) -> f32;

    /// Reset the animation to its initial state.
    fn reset(&mut self);

    /// Time elapsed past completion.
    fn overshoot(&self) -> Duration {
        Duration::ZERO
    }
}

// ---------------------------------------------------------------------------
// Scroll requests
// ---------------------------------------------------------------------------

/// A fire-and-forget request to animate the document scroll position.
#[derive(Debug, Clone, Copy)]
pub struct ScrollRequest {
    /// Target vertical scroll offset in document pixels.
    pub target: f64,
    /// Total animation time.
    pub duration: Duration,
    /// Easing curve applied to progress.
    pub easing: EasingFn,
}

impl ScrollRequest {
    /// Create a request with linear easing.
    pub fn new(target: f64, duration: Duration) -> Self {
        Self {
            target,
            duration,
            easing: linear,
        }
    }

    /// Set the easing function (builder).
    #[must_use]
    pub fn easing(mut self, easing: EasingFn) -> Self {
        self.easing = easing;
        self
    }

    /// Start a tween from the given scroll offset toward this request's target.
    pub fn tween_from(&self, from: f64) -> ScrollTween {
        ScrollTween::new(from, self.target, self.duration).easing(self.easing)
    }
}

// ---------------------------------------------------------------------------
// ScrollTween
// ---------------------------------------------------------------------------

/// Interpolates a scroll offset between `from` and `to` over a duration.
///
/// [`Animation::value`] returns the eased progress; use
/// [`ScrollTween::position`] for the interpolated offset.
#[derive(Debug, Clone, Copy)]
pub struct ScrollTween {
    from: f64,
    to: f64,
    elapsed: Duration,
    duration: Duration,
    easing: EasingFn,
}

impl ScrollTween {
    /// Create a new tween from `from` to `to` over `duration`.
    pub fn new(from: f64, to: f64, duration: Duration) -> Self {
        Self {
            from,
            to,
            elapsed: Duration::ZERO,
            duration: if duration.is_zero() {
                Duration::from_nanos(1)
            } else {
                duration
            },
            easing: linear,
        }
    }

    /// Set the easing function (builder).
    #[must_use]
    pub fn easing(mut self, easing: EasingFn) -> Self {
        self.easing = easing;
        self
    }

    /// Final offset this tween settles on.
    pub fn target(&self) -> f64 {
        self.to
    }

    fn progress(&self) -> f32 {
        let t = self.elapsed.as_secs_f64() / self.duration.as_secs_f64();
        (t as f32).clamp(0.0, 1.0)
    }

    /// Current interpolated scroll offset.
    pub fn position(&self) -> f64 {
        if self.is_complete() {
            return self.to;
        }
        let t = f64::from((self.easing)(self.progress()));
        self.from + (self.to - self.from) * t
    }
}

impl Animation for ScrollTween {
    fn tick(&mut self, dt: Duration) {
        self.elapsed = self.elapsed.saturating_add(dt);
    }

    fn is_complete(&self) -> bool {
        self.elapsed >= self.duration
    }

    fn value(&self) -> f32 {
        (self.easing)(self.progress())
    }

    fn reset(&mut self) {
        self.elapsed = Duration::ZERO;
    }

    fn overshoot(&self) -> Duration {
        self.elapsed.saturating_sub(self.duration)
    }
}
