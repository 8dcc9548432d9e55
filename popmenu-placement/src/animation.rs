use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};

use crate::geometry::OverlaySize;

pub const DEFAULT_DURATION_MS: u64 = 300;

/// Timing curve applied to animation progress.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Easing {
    Linear,
    /// Material standard curve, cubic-bezier(0.4, 0, 0.2, 1).
    #[default]
    Standard,
    EaseInOut,
    CubicBezier(f32, f32, f32, f32),
}

impl Easing {
    /// Map linear progress in `[0, 1]` onto the curve.
    pub fn transform(&self, fraction: f32) -> f32 {
        match *self {
            Easing::Linear => fraction.clamp(0.0, 1.0),
            Easing::Standard => cubic_bezier(0.4, 0.0, 0.2, 1.0, fraction),
            Easing::EaseInOut => cubic_bezier(0.42, 0.0, 0.58, 1.0, fraction),
            Easing::CubicBezier(x1, y1, x2, y2) => {
                cubic_bezier(x1, y1, x2, y2, fraction)
            },
        }
    }
}

fn cubic_bezier(x1: f32, y1: f32, x2: f32, y2: f32, fraction: f32) -> f32 {
    if fraction <= 0.0 {
        return 0.0;
    }
    if fraction >= 1.0 {
        return 1.0;
    }

    let cx = 3.0 * x1;
    let bx = 3.0 * (x2 - x1) - cx;
    let ax = 1.0 - cx - bx;

    let cy = 3.0 * y1;
    let by = 3.0 * (y2 - y1) - cy;
    let ay = 1.0 - cy - by;

    let sample = |a: f32, b: f32, c: f32, t: f32| ((a * t + b) * t + c) * t;
    let slope =
        |a: f32, b: f32, c: f32, t: f32| (3.0 * a * t + 2.0 * b) * t + c;

    // Newton-Raphson on x(t), then bisection if it stalls.
    let mut t = fraction;
    let mut solved = false;
    for _ in 0..8 {
        let x = sample(ax, bx, cx, t) - fraction;
        if x.abs() < 1e-6 {
            solved = true;
            break;
        }
        let dx = slope(ax, bx, cx, t);
        if dx.abs() < 1e-6 {
            break;
        }
        t = (t - x / dx).clamp(0.0, 1.0);
    }

    if !solved {
        let mut low = 0.0;
        let mut high = 1.0;
        t = fraction;
        for _ in 0..20 {
            let delta = sample(ax, bx, cx, t) - fraction;
            if delta.abs() < 1e-6 {
                break;
            }
            if delta > 0.0 {
                high = t;
            } else {
                low = t;
            }
            t = 0.5 * (low + high);
        }
    }

    sample(ay, by, cy, t)
}

/// Duration and curve shared by the entrance and exit animations.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnimationSpec {
    pub duration_ms: u64,
    pub easing: Easing,
}

impl Default for AnimationSpec {
    fn default() -> Self {
        Self {
            duration_ms: DEFAULT_DURATION_MS,
            easing: Easing::Standard,
        }
    }
}

impl AnimationSpec {
    pub fn duration(&self) -> Duration {
        Duration::from_millis(self.duration_ms)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnimationDirection {
    Entrance,
    Exit,
}

/// Animated values at one instant.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnimationFrame {
    pub size: OverlaySize,
    pub opacity: f32,
}

impl AnimationFrame {
    pub const START: AnimationFrame = AnimationFrame {
        size: OverlaySize::ZERO,
        opacity: 0.0,
    };
}

/// Owned interpolation of size and opacity for a single show or hide.
///
/// The clock starts on the first [`AnimationSession::advance`] call, so the
/// session can be created before the surface starts delivering frames.
#[derive(Debug, Clone)]
pub struct AnimationSession {
    direction: AnimationDirection,
    spec: AnimationSpec,
    from: AnimationFrame,
    to: AnimationFrame,
    started_at: Option<Instant>,
    current: AnimationFrame,
    finished: bool,
}

impl AnimationSession {
    /// Grow from nothing to `target` while fading in.
    pub fn entrance(spec: AnimationSpec, target: OverlaySize) -> Self {
        Self::new(
            AnimationDirection::Entrance,
            spec,
            AnimationFrame::START,
            AnimationFrame {
                size: target,
                opacity: 1.0,
            },
        )
    }

    /// Fade out from `from`, keeping its size.
    pub fn exit(spec: AnimationSpec, from: AnimationFrame) -> Self {
        Self::new(
            AnimationDirection::Exit,
            spec,
            from,
            AnimationFrame {
                size: from.size,
                opacity: 0.0,
            },
        )
    }

    fn new(
        direction: AnimationDirection,
        spec: AnimationSpec,
        from: AnimationFrame,
        to: AnimationFrame,
    ) -> Self {
        Self {
            direction,
            spec,
            from,
            to,
            started_at: None,
            current: from,
            finished: false,
        }
    }

    pub fn direction(&self) -> AnimationDirection {
        self.direction
    }

    pub fn current(&self) -> AnimationFrame {
        self.current
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Move the animation to `now`. Returns `true` on the tick that
    /// completes it.
    pub fn advance(&mut self, now: Instant) -> bool {
        if self.finished {
            return false;
        }

        let started_at = *self.started_at.get_or_insert(now);
        let elapsed = now.saturating_duration_since(started_at);
        let duration = self.spec.duration();
        let linear = if duration.is_zero() {
            1.0
        } else {
            (elapsed.as_secs_f32() / duration.as_secs_f32()).min(1.0)
        };

        if linear >= 1.0 {
            self.current = self.to;
            self.finished = true;
            return true;
        }

        let eased = self.spec.easing.transform(linear);
        self.current = AnimationFrame {
            size: OverlaySize {
                width: lerp(self.from.size.width, self.to.size.width, eased),
                height: lerp(self.from.size.height, self.to.size.height, eased),
            },
            opacity: lerp(self.from.opacity, self.to.opacity, eased),
        };
        false
    }
}

fn lerp(from: f32, to: f32, fraction: f32) -> f32 {
    from + (to - from) * fraction
}
