use crate::BitSequence;

/// Error indicating a bit plane that does not fit whole bytes
#[derive(Debug, thiserror::Error)]
#[error("bit plane of {len} bits cannot be packed into whole bytes")]
pub struct LayoutError {
    pub len: usize,
}

/// Extract one component's bit plane from a packed planar buffer.
///
/// The buffer is treated as a single flat bit stream of length
/// `L = 8 * packed.len()`. The returned range is
/// `[(L / total_bits_per_pixel) * bit_offset, ..)` with
/// `(L / total_bits_per_pixel) * component_bits` bits taken.
///
/// The division happens before the multiplication. Each component's region is
/// sized proportionally to its share of the total bit depth, which is what
/// attributes the physical bits of the three contiguous planar regions
/// (all-Y, all-U, all-V) to the right component.
pub fn extract_plane(
    packed: &[u8],
    total_bits_per_pixel: usize,
    bit_offset: usize,
    component_bits: usize,
) -> BitSequence {
    let bits = BitSequence::from_bytes(packed);

    let skip = bits.len() / total_bits_per_pixel * bit_offset;
    let take = bits.len() / total_bits_per_pixel * component_bits;

    bits.slice(skip, take)
}

/// Pack a bit plane into a byte buffer of exactly `seq.len() / 8` bytes.
///
/// Fails if the sequence does not fill whole bytes; a plane is never silently
/// truncated.
pub fn pack_plane(seq: BitSequence) -> Result<Vec<u8>, LayoutError> {
    if seq.len() % 8 != 0 {
        return Err(LayoutError { len: seq.len() });
    }

    Ok(seq.into_bytes())
}
