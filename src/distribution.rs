/// How the bits of one packed pixel are split between the Y, U and V components.
///
/// The components are stored planar: all Y bits for the whole frame first,
/// then all U bits, then all V bits, each region sized proportionally to the
/// component's bit depth. Offsets within a pixel are cumulative and fixed:
/// Y at 0, U at `y_bits`, V at `y_bits + u_bits`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BitsDistribution {
    y_bits: usize,
    u_bits: usize,
    v_bits: usize,
}

impl BitsDistribution {
    /// The reference configuration, 8/2/2 for a total of 12 bits per pixel.
    pub const I420: Self = Self::new(8, 2, 2);

    pub const fn new(y_bits: usize, u_bits: usize, v_bits: usize) -> Self {
        Self {
            y_bits,
            u_bits,
            v_bits,
        }
    }

    pub const fn y_bits(&self) -> usize {
        self.y_bits
    }

    pub const fn u_bits(&self) -> usize {
        self.u_bits
    }

    pub const fn v_bits(&self) -> usize {
        self.v_bits
    }

    /// Total bits per pixel across all three components.
    pub const fn total(&self) -> usize {
        self.y_bits + self.u_bits + self.v_bits
    }

    pub const fn y_offset(&self) -> usize {
        0
    }

    pub const fn u_offset(&self) -> usize {
        self.y_bits
    }

    pub const fn v_offset(&self) -> usize {
        self.y_bits + self.u_bits
    }

    /// Required packed buffer size in bytes for the given dimensions.
    pub const fn buffer_size(&self, width: usize, height: usize) -> usize {
        (width * height * self.total()).div_ceil(8)
    }

    /// Size in bytes of each component plane for the given dimensions.
    pub const fn plane_sizes(&self, width: usize, height: usize) -> [usize; 3] {
        [
            (width * height * self.y_bits).div_ceil(8),
            (width * height * self.u_bits).div_ceil(8),
            (width * height * self.v_bits).div_ceil(8),
        ]
    }

    /// Per-plane strides (bytes per row) for a packed image of the given width.
    ///
    /// Derived from the component bit depths instead of the fixed ratios a
    /// renderer for one specific distribution might assume.
    pub const fn packed_strides(&self, width: usize) -> [usize; 3] {
        [
            (width * self.y_bits).div_ceil(8),
            (width * self.u_bits).div_ceil(8),
            (width * self.v_bits).div_ceil(8),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::BitsDistribution;

    #[test]
    fn i420_reference_configuration() {
        let dist = BitsDistribution::I420;

        assert_eq!(dist.total(), 12);
        assert_eq!(dist.y_offset(), 0);
        assert_eq!(dist.u_offset(), 8);
        assert_eq!(dist.v_offset(), 10);
    }

    #[test]
    fn buffer_size_matches_component_planes() {
        let dist = BitsDistribution::I420;

        assert_eq!(dist.buffer_size(640, 360), 640 * 360 * 12 / 8);
        assert_eq!(
            dist.plane_sizes(640, 360),
            [640 * 360, 640 * 360 / 4, 640 * 360 / 4]
        );
    }

    #[test]
    fn strides_derive_from_bit_depths() {
        assert_eq!(BitsDistribution::I420.packed_strides(640), [640, 160, 160]);
        assert_eq!(BitsDistribution::new(10, 3, 3).packed_strides(8), [10, 3, 3]);
    }
}
