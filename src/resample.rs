use crate::BitSequence;

/// Nearest-neighbor resize of one bit plane.
///
/// The plane is treated as a row-major `src_w` x `src_h` grid of samples and
/// mapped onto a `dst_w` x `dst_h` grid; the returned sequence has
/// `dst_w * dst_h` bits. Both loops step by `unit_bits`, and each step copies
/// `unit_bits` consecutive bits from source index
/// `(i * src_h / dst_h) * src_w + (j * src_w / dst_w)` to destination index
/// `i * dst_w + j`. The floor-based ratio mapping is the resampling law.
///
/// When the destination dimensions are not multiples of `unit_bits` the final
/// step of a row or column is clamped to the end of both sequences instead of
/// copying out of bounds; a unit copy that starts near a row's end may still
/// spill into the following row (accepted lossy behavior for ragged
/// dimensions).
///
/// # Panics
///
/// If `unit_bits` is zero or `src.len() < src_w * src_h`
pub fn resize_bit_plane(
    src: &BitSequence,
    src_w: usize,
    src_h: usize,
    dst_w: usize,
    dst_h: usize,
    unit_bits: usize,
) -> BitSequence {
    assert!(unit_bits > 0, "sample unit width must be at least one bit");
    assert!(
        src.len() >= src_w * src_h,
        "source plane too short: {} bits for {src_w}x{src_h}",
        src.len()
    );

    let mut dst = BitSequence::zeroed(dst_w * dst_h);

    let mut i = 0;
    while i < dst_h {
        let py = i * src_h / dst_h;

        let mut j = 0;
        while j < dst_w {
            let px = j * src_w / dst_w;

            let src_index = py * src_w + px;
            let dst_index = i * dst_w + j;

            let span = unit_bits
                .min(dst.len() - dst_index)
                .min(src.len() - src_index);

            for k in 0..span {
                if src.get(src_index + k) {
                    dst.set(dst_index + k, true);
                }
            }

            j += unit_bits;
        }

        i += unit_bits;
    }

    dst
}
