//! Delta computation and normalization
//!
//! Two passes over the whole animation:
//! 1. delta = frame[i] - reference[i], widening one global [`AxisBounds`]
//! 2. rescale every delta component into [0, 1] against those bounds
//!
//! Bounds are global, so pass 2 cannot start until every frame has
//! contributed to pass 1. Both passes run per frame in parallel; per-frame
//! bounds are merged by a reduction after pass 1 completes.

use glam::Vec3;
use rayon::prelude::*;

use crate::error::{Attribute, BakeError, BakeResult};

/// Normalized value emitted on an axis with no variation (min == max)
pub const DEGENERATE_AXIS_VALUE: f32 = 0.5;

/// Axis-wise delta bounds
///
/// Seeded at zero and only ever widened, so zero always lies inside the
/// range even when every delta on an axis has the same sign. Playback
/// shaders depend on this exact range to reconstruct deltas.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AxisBounds {
    pub min: Vec3,
    pub max: Vec3,
}

impl Default for AxisBounds {
    fn default() -> Self {
        Self {
            min: Vec3::ZERO,
            max: Vec3::ZERO,
        }
    }
}

impl AxisBounds {
    #[inline]
    pub fn include(&mut self, delta: Vec3) {
        self.min = self.min.min(delta);
        self.max = self.max.max(delta);
    }

    #[inline]
    pub fn merge(self, other: AxisBounds) -> AxisBounds {
        AxisBounds {
            min: self.min.min(other.min),
            max: self.max.max(other.max),
        }
    }

    /// Inverse-lerp each component from [min, max] to [0, 1]
    #[inline]
    pub fn normalize(&self, delta: Vec3) -> Vec3 {
        Vec3::new(
            inverse_lerp(self.min.x, self.max.x, delta.x),
            inverse_lerp(self.min.y, self.max.y, delta.y),
            inverse_lerp(self.min.z, self.max.z, delta.z),
        )
    }

    /// Shader-side reconstruction: `lerp(min, max, t)`
    #[inline]
    pub fn denormalize(&self, t: Vec3) -> Vec3 {
        self.min + (self.max - self.min) * t
    }
}

#[inline]
fn inverse_lerp(min: f32, max: f32, value: f32) -> f32 {
    if min == max {
        return DEGENERATE_AXIS_VALUE;
    }
    ((value - min) / (max - min)).clamp(0.0, 1.0)
}

/// Normalized deltas for every frame plus the bounds that produced them
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedDeltaSet {
    /// `deltas[frame][element]`, each component in [0, 1]
    pub deltas: Vec<Vec<Vec3>>,
    pub bounds: AxisBounds,
}

/// Compute normalized deltas of `frames` against `reference`
///
/// Every frame must have exactly as many elements as the reference;
/// `attribute` names the data in the mismatch error otherwise.
pub fn normalize_deltas<F>(
    reference: &[Vec3],
    frames: &[F],
    attribute: Attribute,
) -> BakeResult<NormalizedDeltaSet>
where
    F: AsRef<[Vec3]> + Sync,
{
    // Pass 1: raw deltas and per-frame bounds
    let per_frame: Vec<(Vec<Vec3>, AxisBounds)> = frames
        .par_iter()
        .enumerate()
        .map(|(index, frame)| {
            let frame = frame.as_ref();
            if frame.len() != reference.len() {
                return Err(BakeError::ShapeMismatch {
                    attribute,
                    frame: index,
                    expected: reference.len(),
                    found: frame.len(),
                });
            }

            let mut bounds = AxisBounds::default();
            let deltas = frame
                .iter()
                .zip(reference)
                .map(|(value, origin)| {
                    let delta = *value - *origin;
                    bounds.include(delta);
                    delta
                })
                .collect();
            Ok((deltas, bounds))
        })
        .collect::<BakeResult<_>>()?;

    let bounds = per_frame
        .iter()
        .fold(AxisBounds::default(), |acc, (_, b)| acc.merge(*b));
    let mut deltas: Vec<Vec<Vec3>> = per_frame.into_iter().map(|(d, _)| d).collect();

    // Pass 2: rescale against the global bounds
    deltas.par_iter_mut().for_each(|frame| {
        for delta in frame.iter_mut() {
            *delta = bounds.normalize(*delta);
        }
    });

    tracing::debug!(
        "Normalized {} frames, bounds min={:?} max={:?}",
        deltas.len(),
        bounds.min,
        bounds.max
    );

    Ok(NormalizedDeltaSet { deltas, bounds })
}
