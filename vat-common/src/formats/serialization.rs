//! Binary serialization trait for format headers.
//!
//! Each header keeps its type-specific `to_bytes()` returning a fixed-size
//! array; the trait lets loaders and asset checks read any header through one
//! generic interface.

/// Trait for binary-serializable format headers.
///
/// Returns `Vec<u8>` because associated consts cannot size a return array yet.
///
/// # Example
///
/// ```
/// use vat_common::formats::{BinarySerializable, TexelFormat, VatTextureHeader};
///
/// let header = VatTextureHeader::new(64, 64, 30, TexelFormat::Rgb8Unorm);
///
/// let bytes = header.serialize();
/// let parsed = VatTextureHeader::deserialize(&bytes).unwrap();
/// assert_eq!(parsed, header);
/// ```
pub trait BinarySerializable: Sized {
    /// Size of the serialized header in bytes.
    const SIZE: usize;

    /// Serialize to bytes.
    fn serialize(&self) -> Vec<u8>;

    /// Deserialize from bytes.
    ///
    /// Returns `None` if the byte slice is too short or contains invalid data.
    fn deserialize(bytes: &[u8]) -> Option<Self>;
}

impl BinarySerializable for super::VatMeshHeader {
    const SIZE: usize = Self::SIZE;

    fn serialize(&self) -> Vec<u8> {
        self.to_bytes().to_vec()
    }

    fn deserialize(bytes: &[u8]) -> Option<Self> {
        Self::from_bytes(bytes)
    }
}

impl BinarySerializable for super::VatTextureHeader {
    const SIZE: usize = Self::SIZE;

    fn serialize(&self) -> Vec<u8> {
        self.to_bytes().to_vec()
    }

    fn deserialize(bytes: &[u8]) -> Option<Self> {
        Self::from_bytes(bytes)
    }
}
