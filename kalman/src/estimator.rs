//! One-dimensional Kalman filter with constant dynamics.
//!
//! The state is assumed not to change between measurements: there is no
//! process noise and no control input, so prediction leaves both the estimate
//! and its variance untouched and all the work happens in [`ScalarKalman::update`].

/// Scalar estimator over a noisy, nominally constant signal.
///
/// `p` and `r` are variances and must stay non-negative. The estimator does
/// not check this; degenerate inputs propagate arithmetically.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScalarKalman {
    /// State estimate.
    x: f32,
    /// Estimate uncertainty.
    p: f32,
    /// Measurement uncertainty.
    r: f32,
}

impl Default for ScalarKalman {
    fn default() -> Self {
        Self {
            x: 0.0,
            p: 1.0,
            r: 0.0,
        }
    }
}

impl ScalarKalman {
    pub fn new(x: f32, p: f32, r: f32) -> Self {
        Self { x, p, r }
    }

    #[inline]
    pub fn x(&self) -> f32 {
        self.x
    }

    #[inline]
    pub fn p(&self) -> f32 {
        self.p
    }

    #[inline]
    pub fn r(&self) -> f32 {
        self.r
    }

    #[inline]
    pub fn set_x(&mut self, x: f32) {
        self.x = x;
    }

    #[inline]
    pub fn set_p(&mut self, p: f32) {
        self.p = p;
    }

    #[inline]
    pub fn set_r(&mut self, r: f32) {
        self.r = r;
    }

    /// Gain for the current uncertainties. Zero when `p + r == 0`.
    #[inline]
    pub fn gain(&self) -> f32 {
        let s = self.p + self.r;
        if s == 0.0 {
            0.0
        } else {
            self.p / s
        }
    }

    /// Time update. A no-op under constant dynamics.
    #[inline]
    pub fn predict(&mut self) {}

    /// Measurement update with observation `z`.
    ///
    /// Moves `x` toward `z` by the gain and shrinks `p` by `(1 - k)`.
    #[inline]
    pub fn update(&mut self, z: f32) {
        let k = self.gain();
        let y = z - self.x;
        self.x += k * y;
        self.p *= 1.0 - k;
    }
}
