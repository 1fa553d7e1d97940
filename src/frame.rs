use crate::BitsDistribution;

/// A decoded planar video frame with one owned buffer per component.
///
/// The decode layer creates the frame; the resize pipeline mutates the
/// buffers, dimensions and strides in place exactly once, then the same frame
/// travels through the delivery bridge to the renderer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VideoFrame {
    /// Width in pixels
    pub width: usize,
    /// Height in pixels
    pub height: usize,

    pub y: Vec<u8>,
    pub u: Vec<u8>,
    pub v: Vec<u8>,

    /// Bytes per row of the Y plane
    pub stride_y: usize,
    /// Bytes per row of the U plane
    pub stride_u: usize,
    /// Bytes per row of the V plane
    pub stride_v: usize,
}

impl VideoFrame {
    pub fn new(
        width: usize,
        height: usize,
        y: Vec<u8>,
        u: Vec<u8>,
        v: Vec<u8>,
        strides: [usize; 3],
    ) -> Self {
        Self {
            width,
            height,
            y,
            u,
            v,
            stride_y: strides[0],
            stride_u: strides[1],
            stride_v: strides[2],
        }
    }

    /// A zeroed frame with plane sizes and strides derived from `distribution`.
    pub fn blank(distribution: &BitsDistribution, width: usize, height: usize) -> Self {
        let [y_size, u_size, v_size] = distribution.plane_sizes(width, height);

        Self::new(
            width,
            height,
            vec![0u8; y_size],
            vec![0u8; u_size],
            vec![0u8; v_size],
            distribution.packed_strides(width),
        )
    }
}
