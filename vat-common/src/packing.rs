//! Texel channel packing utilities
//!
//! Converts normalized [0, 1] channel values to fixed-width storage:
//! - f32 → unorm8 (reference encoding, 1 byte per channel)
//! - f32 → unorm16 (2 bytes per channel)
//! - f32 → f16 (IEEE 754 half-float, 2 bytes per channel)
//!
//! Every packer has a matching decoder so baked textures can be inspected
//! on the CPU the same way a shader samples them.

use glam::Vec3;
use half::f16;

// ============================================================================
// Basic Conversion Functions
// ============================================================================

/// Convert f32 to unsigned normalized 8-bit integer (unorm8)
///
/// Maps f32 range [0.0, 1.0] to u8 range [0, 255]. Truncates, so 0.5 maps
/// to 127; the error is always below one step.
#[inline]
pub fn f32_to_unorm8(value: f32) -> u8 {
    let clamped = value.clamp(0.0, 1.0);
    (clamped * 255.0) as u8
}

/// Convert unorm8 back to f32 in [0.0, 1.0]
#[inline]
pub fn unorm8_to_f32(value: u8) -> f32 {
    value as f32 / 255.0
}

/// Convert f32 to unsigned normalized 16-bit integer (unorm16)
///
/// Maps f32 range [0.0, 1.0] to u16 range [0, 65535].
#[inline]
pub fn f32_to_unorm16(value: f32) -> u16 {
    let clamped = value.clamp(0.0, 1.0);
    (clamped * 65535.0) as u16
}

/// Convert unorm16 back to f32 in [0.0, 1.0]
#[inline]
pub fn unorm16_to_f32(value: u16) -> f32 {
    value as f32 / 65535.0
}

// ============================================================================
// RGB Texel Packing
// ============================================================================

/// Pack a normalized value to RGB unorm8
#[inline]
pub fn pack_rgb_unorm8(v: Vec3) -> [u8; 3] {
    [f32_to_unorm8(v.x), f32_to_unorm8(v.y), f32_to_unorm8(v.z)]
}

#[inline]
pub fn unpack_rgb_unorm8(rgb: [u8; 3]) -> Vec3 {
    Vec3::new(
        unorm8_to_f32(rgb[0]),
        unorm8_to_f32(rgb[1]),
        unorm8_to_f32(rgb[2]),
    )
}

/// Pack a normalized value to RGB unorm16
#[inline]
pub fn pack_rgb_unorm16(v: Vec3) -> [u16; 3] {
    [f32_to_unorm16(v.x), f32_to_unorm16(v.y), f32_to_unorm16(v.z)]
}

#[inline]
pub fn unpack_rgb_unorm16(rgb: [u16; 3]) -> Vec3 {
    Vec3::new(
        unorm16_to_f32(rgb[0]),
        unorm16_to_f32(rgb[1]),
        unorm16_to_f32(rgb[2]),
    )
}

/// Pack a normalized value to RGB half-float
///
/// Values are clamped to [0.0, 1.0] like the fixed-point encodings so all
/// formats share the same domain.
#[inline]
pub fn pack_rgb_f16(v: Vec3) -> [f16; 3] {
    let v = v.clamp(Vec3::ZERO, Vec3::ONE);
    [f16::from_f32(v.x), f16::from_f32(v.y), f16::from_f32(v.z)]
}

#[inline]
pub fn unpack_rgb_f16(rgb: [f16; 3]) -> Vec3 {
    Vec3::new(rgb[0].to_f32(), rgb[1].to_f32(), rgb[2].to_f32())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_f32_to_unorm8_range() {
        assert_eq!(f32_to_unorm8(0.0), 0);
        assert_eq!(f32_to_unorm8(0.5), 127);
        assert_eq!(f32_to_unorm8(1.0), 255);
    }

    #[test]
    fn test_f32_to_unorm8_clamps() {
        assert_eq!(f32_to_unorm8(-0.5), 0);
        assert_eq!(f32_to_unorm8(2.0), 255);
    }

    #[test]
    fn test_f32_to_unorm16_range() {
        assert_eq!(f32_to_unorm16(0.0), 0);
        assert_eq!(f32_to_unorm16(1.0), 65535);
        assert_eq!(f32_to_unorm16(0.5), 32767);
    }

    #[test]
    fn test_unorm8_error_bound() {
        for i in 0..=100 {
            let value = i as f32 / 100.0;
            let decoded = unorm8_to_f32(f32_to_unorm8(value));
            assert!((decoded - value).abs() <= 1.0 / 255.0, "value {value}");
        }
    }

    #[test]
    fn test_rgb_unorm16_finer_than_unorm8() {
        let v = Vec3::new(0.1234, 0.5678, 0.9012);
        let err8 = (unpack_rgb_unorm8(pack_rgb_unorm8(v)) - v).abs().max_element();
        let err16 = (unpack_rgb_unorm16(pack_rgb_unorm16(v)) - v).abs().max_element();
        assert!(err16 < err8);
        assert!(err16 <= 1.0 / 65535.0);
    }

    #[test]
    fn test_rgb_f16_endpoints_exact() {
        let packed = pack_rgb_f16(Vec3::new(0.0, 0.5, 1.0));
        assert_eq!(unpack_rgb_f16(packed), Vec3::new(0.0, 0.5, 1.0));
    }
}
