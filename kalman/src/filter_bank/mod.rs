//! One [`ScalarKalman`] per pixel, updated across successive frames.
//!
//! Estimator `i` always belongs to raster position `i`. The bank keeps that
//! mapping for as long as the pixel count stays the same; any frame with a
//! different count discards every estimator and reseeds from that frame.
//!
//! Both the reseed pass and the steady-state pass run data-parallel over the
//! pixel range. Position `i` reads and writes only `pixels[i]` and
//! `filters[i]`, so chunks share no mutable state.

use common::parallel::ParZipMut;
use rayon::prelude::*;

use crate::config::FilterConfig;
use crate::error::{Error, Result};
use crate::estimator::ScalarKalman;
use crate::sample::Sample;


/// Lifecycle of a [`FilterBank`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum BankState {
    /// No frame processed since construction or [`FilterBank::reset`].
    #[default]
    Uninitialized,
    /// Holding one estimator per pixel of the last frame.
    Ready(usize),
}

/// Which path a call to [`FilterBank::process`] took.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameOutcome {
    /// Estimators were rebuilt from this frame; pixels are unchanged.
    Reseeded,
    /// Every pixel was replaced with its clamped estimate.
    Filtered,
}

/// Per-pixel temporal filter for single-channel frames.
#[derive(Debug, Clone, Default)]
pub struct FilterBank {
    filters: Vec<ScalarKalman>,
    state: BankState,
    config: FilterConfig,
}

impl FilterBank {
    pub fn new(config: FilterConfig) -> Self {
        Self {
            filters: Vec::new(),
            state: BankState::Uninitialized,
            config,
        }
    }

    pub fn config(&self) -> FilterConfig {
        self.config
    }

    /// Replaces the configuration. Takes effect at the next reseed; existing
    /// estimators keep their accumulated `p` and `r`.
    pub fn set_config(&mut self, config: FilterConfig) {
        self.config = config;
    }

    pub fn set_p(&mut self, p: f32) {
        self.config.p = p;
    }

    pub fn set_r(&mut self, r: f32) {
        self.config.r = r;
    }

    pub fn state(&self) -> BankState {
        self.state
    }

    pub fn len(&self) -> usize {
        self.filters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.filters.is_empty()
    }

    pub fn estimators(&self) -> &[ScalarKalman] {
        &self.filters
    }

    /// Drops all estimators. The next frame reseeds.
    pub fn reset(&mut self) {
        self.filters = Vec::new();
        self.state = BankState::Uninitialized;
    }

    /// Filters one frame in place.
    ///
    /// `pixels` holds `width * height` samples in row-major order. The buffer
    /// is only borrowed for the duration of the call.
    ///
    /// If the pixel count differs from the current estimator count (or the
    /// bank is uninitialized) the estimators are rebuilt, each seeded with the
    /// raw sample at its position, and the frame is left untouched. Otherwise
    /// each estimator is updated with its sample and the sample is overwritten
    /// with the estimate clamped to the range of `T`.
    ///
    /// Fails before touching any state if the dimensions overflow or the
    /// buffer length does not match them.
    pub fn process<T: Sample>(
        &mut self,
        pixels: &mut [T],
        width: usize,
        height: usize,
    ) -> Result<FrameOutcome> {
        let count = width
            .checked_mul(height)
            .ok_or(Error::DimensionOverflow { width, height })?;
        if pixels.len() != count {
            return Err(Error::BufferSizeMismatch {
                expected: count,
                actual: pixels.len(),
            });
        }

        if self.state == BankState::Ready(count) {
            self.update(pixels);
            Ok(FrameOutcome::Filtered)
        } else {
            tracing::debug!(
                "Reseeding filter bank: {:?} -> {} pixels ({}x{})",
                self.state,
                count,
                width,
                height
            );
            self.reseed(pixels);
            Ok(FrameOutcome::Reseeded)
        }
    }

    fn reseed<T: Sample>(&mut self, pixels: &[T]) {
        let FilterConfig { p, r } = self.config;
        pixels
            .par_iter()
            .map(|&sample| ScalarKalman::new(sample.to_f32(), p, r))
            .collect_into_vec(&mut self.filters);
        self.state = BankState::Ready(self.filters.len());
    }

    fn update<T: Sample>(&mut self, pixels: &mut [T]) {
        debug_assert_eq!(self.filters.len(), pixels.len());

        self.filters
            .as_mut_slice()
            .par_zip(pixels)
            .par_chunks_mut_auto()
            .for_each(|(_, (filters, pixels))| {
                for (filter, pixel) in filters.iter_mut().zip(pixels.iter_mut()) {
                    filter.predict();
                    filter.update(pixel.to_f32());
                    *pixel = T::from_f32_clamped(filter.x());
                }
            });
    }
}
