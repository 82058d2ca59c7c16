//! Per-pixel temporal Kalman filtering for video.
//!
//! Every pixel position gets its own scalar Kalman filter with constant
//! dynamics. Frames are fed in order; each frame nudges every estimate toward
//! the newly observed sample, which smooths temporal noise while still
//! following real intensity changes.
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use kalman::{FilterBank, FilterConfig};
//!
//! let mut bank = FilterBank::new(FilterConfig::new(100.0, 100.0));
//! for frame in frames {
//!     // frame: Vec<u8>, width * height gray samples
//!     bank.process(&mut frame, width, height)?;
//!     display(&frame);
//! }
//! ```

mod config;
mod error;
mod estimator;
mod filter_bank;
mod frame;
mod sample;

pub use config::FilterConfig;
pub use error::{Error, Result};
pub use estimator::ScalarKalman;
pub use filter_bank::{BankState, FilterBank, FrameOutcome};
pub use frame::{FrameDesc, FrameFilter};
pub use sample::Sample;
