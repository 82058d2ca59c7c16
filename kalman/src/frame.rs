//! Interleaved, row-padded frames on top of per-channel [`FilterBank`]s.
//!
//! Each channel gets its own bank and is filtered independently. Samples are
//! gathered into a contiguous plane per channel, filtered, and scattered back.
//! Row padding between `width * channels` and `stride` is never touched.

use common::parallel::ParRowsMutAuto;
use rayon::prelude::*;

use crate::config::FilterConfig;
use crate::error::{Error, Result};
use crate::filter_bank::{BankState, FilterBank, FrameOutcome};
use crate::sample::Sample;

/// Layout of an interleaved frame. `stride` is in samples, not bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FrameDesc {
    pub width: usize,
    pub height: usize,
    pub channels: usize,
    pub stride: usize,
}

impl FrameDesc {
    pub fn new(width: usize, height: usize, channels: usize, stride: usize) -> Self {
        Self {
            width,
            height,
            channels,
            stride,
        }
    }

    /// A frame whose rows follow each other without padding.
    pub fn packed(width: usize, height: usize, channels: usize) -> Self {
        Self::new(width, height, channels, width * channels)
    }

    /// Samples in one row, excluding padding.
    pub fn row_len(&self) -> usize {
        self.width * self.channels
    }

    pub fn pixel_count(&self) -> usize {
        self.width * self.height
    }

    /// Minimum buffer length: padding after the last row is optional.
    pub fn required_len(&self) -> usize {
        if self.width == 0 || self.height == 0 {
            0
        } else {
            self.stride * (self.height - 1) + self.row_len()
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.channels == 0 {
            return Err(Error::InvalidFrameDesc(
                "channel count must be > 0".to_string(),
            ));
        }
        let row_len = self
            .width
            .checked_mul(self.channels)
            .ok_or(Error::DimensionOverflow {
                width: self.width,
                height: self.height,
            })?;
        if self.stride < row_len {
            return Err(Error::InvalidFrameDesc(format!(
                "stride {} is shorter than row length {}",
                self.stride, row_len
            )));
        }
        let overflow = Error::DimensionOverflow {
            width: self.width,
            height: self.height,
        };
        self.width.checked_mul(self.height).ok_or(overflow)?;
        if self.height > 0 {
            self.stride
                .checked_mul(self.height - 1)
                .and_then(|len| len.checked_add(row_len))
                .ok_or(Error::DimensionOverflow {
                    width: self.width,
                    height: self.height,
                })?;
        }
        Ok(())
    }
}

/// Temporal filter for multi-channel frames, one [`FilterBank`] per channel.
#[derive(Debug, Clone)]
pub struct FrameFilter<T: Sample> {
    banks: Vec<FilterBank>,
    planes: Vec<Vec<T>>,
    config: FilterConfig,
}

impl<T: Sample> FrameFilter<T> {
    pub fn new(config: FilterConfig) -> Self {
        Self {
            banks: Vec::new(),
            planes: Vec::new(),
            config,
        }
    }

    pub fn config(&self) -> FilterConfig {
        self.config
    }

    /// Takes effect at each channel's next reseed.
    pub fn set_config(&mut self, config: FilterConfig) {
        self.config = config;
        for bank in &mut self.banks {
            bank.set_config(config);
        }
    }

    pub fn channels(&self) -> usize {
        self.banks.len()
    }

    /// Per-channel banks, in channel order.
    pub fn banks(&self) -> &[FilterBank] {
        &self.banks
    }

    /// State shared by every channel bank.
    pub fn state(&self) -> BankState {
        self.banks
            .first()
            .map_or(BankState::Uninitialized, FilterBank::state)
    }

    pub fn reset(&mut self) {
        self.banks.clear();
        self.planes.clear();
    }

    /// Filters one interleaved frame in place.
    ///
    /// A change in channel count rebuilds every bank, so that frame is a
    /// reseed frame for all channels. Pixel count changes are handled by the
    /// banks themselves.
    pub fn process(&mut self, data: &mut [T], desc: FrameDesc) -> Result<FrameOutcome> {
        desc.validate()?;
        let required = desc.required_len();
        if data.len() < required {
            return Err(Error::BufferSizeMismatch {
                expected: required,
                actual: data.len(),
            });
        }

        if self.banks.len() != desc.channels {
            if !self.banks.is_empty() {
                tracing::debug!(
                    "Channel count changed: {} -> {}",
                    self.banks.len(),
                    desc.channels
                );
            }
            self.banks = (0..desc.channels)
                .map(|_| FilterBank::new(self.config))
                .collect();
            self.planes = vec![Vec::new(); desc.channels];
        }

        let pixel_count = desc.pixel_count();
        for plane in &mut self.planes {
            plane.resize(pixel_count, T::from_f32_clamped(0.0));
        }

        if pixel_count > 0 {
            self.gather(data, desc);
        }

        let mut outcome = FrameOutcome::Filtered;
        for (bank, plane) in self.banks.iter_mut().zip(self.planes.iter_mut()) {
            outcome = bank.process(plane, desc.width, desc.height)?;
        }

        if pixel_count > 0 && outcome == FrameOutcome::Filtered {
            self.scatter(data, desc);
        }

        Ok(outcome)
    }

    fn gather(&mut self, data: &[T], desc: FrameDesc) {
        let FrameDesc {
            width,
            channels,
            stride,
            ..
        } = desc;

        for (c, plane) in self.planes.iter_mut().enumerate() {
            plane
                .par_rows_mut_auto(width)
                .for_each(|(chunk_start_row, chunk)| {
                    for (local_y, plane_row) in chunk.chunks_exact_mut(width).enumerate() {
                        let src = &data[(chunk_start_row + local_y) * stride..];
                        for (x, sample) in plane_row.iter_mut().enumerate() {
                            *sample = src[x * channels + c];
                        }
                    }
                });
        }
    }

    fn scatter(&self, data: &mut [T], desc: FrameDesc) {
        let FrameDesc {
            width,
            height,
            channels,
            stride,
        } = desc;
        let planes = &self.planes;

        data.par_chunks_mut(stride)
            .take(height)
            .enumerate()
            .for_each(|(y, row)| {
                let offset = y * width;
                for (c, plane) in planes.iter().enumerate() {
                    let plane_row = &plane[offset..offset + width];
                    for (x, &sample) in plane_row.iter().enumerate() {
                        row[x * channels + c] = sample;
                    }
                }
            });
    }
}
