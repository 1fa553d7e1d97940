use crate::{
    BitsDistribution, FrameDeliveryBridge, LayoutError, VideoFrame,
    planes::{extract_plane, pack_plane},
    resample::resize_bit_plane,
};
use std::sync::Mutex;

/// Frame rate reported to the renderer, for lack of a negotiated value
pub const ASSUMED_FRAME_RATE: usize = 30;

/// Everything that can go wrong while resizing one frame.
///
/// Both variants are fatal for that single frame only: the frame is dropped,
/// nothing already queued in the bridge is affected, and the next arriving
/// frame is processed independently.
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error("target width or height must not be zero")]
    InvalidDimensions,

    #[error(transparent)]
    Layout(#[from] LayoutError),
}

/// Parameters handed to the renderer exactly once, when the first frame has
/// been resized and its display surface can be sized.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SurfaceConfig {
    pub width: usize,
    pub height: usize,
    pub frame_rate: usize,
    pub bits_per_pixel: usize,
}

impl SurfaceConfig {
    /// Uncompressed bitrate in bits per second, for renderer configuration
    pub fn bitrate(&self) -> usize {
        self.frame_rate * self.width * self.height * self.bits_per_pixel
    }
}

type SurfaceReadyFn = Box<dyn FnOnce(SurfaceConfig) + Send>;

/// One-shot renderer binding state, transitioned atomically under one lock
enum SurfaceState {
    Pending(SurfaceReadyFn),
    Bound,
    Closed,
}

/// Receives decoded frames from the decode/network callback thread, reshapes
/// each one in place and queues it for the render thread.
///
/// [`handle_frame`](Self::handle_frame) runs the whole
/// extract/resample/repack step synchronously on the calling thread; it must
/// finish within the inter-frame interval or the bridge's drop policy starts
/// discarding the backlog. The render thread pulls independently via
/// [`try_serve_frame`](Self::try_serve_frame).
pub struct ResizePipeline {
    distribution: BitsDistribution,
    target_width: usize,
    target_height: usize,

    bridge: FrameDeliveryBridge,
    surface: Mutex<SurfaceState>,
}

impl ResizePipeline {
    /// `on_surface_ready` fires exactly once, on the decode thread that
    /// delivers the first frame, and is expected to dispatch to whatever
    /// execution context owns the rendering surface without blocking.
    pub fn new(
        distribution: BitsDistribution,
        target_width: usize,
        target_height: usize,
        bridge_capacity: usize,
        on_surface_ready: impl FnOnce(SurfaceConfig) + Send + 'static,
    ) -> Self {
        Self {
            distribution,
            target_width,
            target_height,
            bridge: FrameDeliveryBridge::new(bridge_capacity),
            surface: Mutex::new(SurfaceState::Pending(Box::new(on_surface_ready))),
        }
    }

    pub fn distribution(&self) -> BitsDistribution {
        self.distribution
    }

    pub fn bridge(&self) -> &FrameDeliveryBridge {
        &self.bridge
    }

    /// Process one decoded frame and queue it for the renderer.
    ///
    /// The frame is mutated in place and handed downstream unchanged in
    /// identity. Frames arriving after [`close`](Self::close) are released
    /// without processing.
    pub fn handle_frame(&self, mut frame: VideoFrame) -> Result<(), PipelineError> {
        {
            let surface = self.surface.lock().expect("surface state mutex poisoned");

            if matches!(*surface, SurfaceState::Closed) {
                tracing::debug!("pipeline closed, releasing frame");
                return Ok(());
            }
        }

        if let Err(err) = self.resize_frame(&mut frame) {
            tracing::debug!(error = %err, "rejecting malformed frame");
            return Err(err);
        }

        self.notify_surface_ready(&frame);

        self.bridge.push(frame);

        Ok(())
    }

    /// Pull operation for the renderer; `None` is a normal underrun.
    pub fn try_serve_frame(&self) -> Option<VideoFrame> {
        self.bridge.try_serve_frame()
    }

    /// Reshape `frame` to the pipeline's target dimensions in place.
    ///
    /// On error the frame is left untouched; no partial write occurs.
    pub fn resize_frame(&self, frame: &mut VideoFrame) -> Result<(), PipelineError> {
        if self.target_width == 0 || self.target_height == 0 {
            return Err(PipelineError::InvalidDimensions);
        }

        let dist = &self.distribution;
        let total = dist.total();

        // One flat planar buffer: all of Y, then U, then V
        let byte_size = dist.buffer_size(frame.width, frame.height);
        let mut packed = Vec::with_capacity(byte_size);
        packed.extend_from_slice(&frame.y);
        packed.extend_from_slice(&frame.u);
        packed.extend_from_slice(&frame.v);
        packed.resize(byte_size, 0);

        let y = extract_plane(&packed, total, dist.y_offset(), dist.y_bits());
        let u = extract_plane(&packed, total, dist.u_offset(), dist.u_bits());
        let v = extract_plane(&packed, total, dist.v_offset(), dist.v_bits());

        let (src_w, src_h) = (frame.width, frame.height);
        let (dst_w, dst_h) = (self.target_width, self.target_height);

        let y = resize_bit_plane(&y, src_w, src_h, dst_w, dst_h, dist.y_bits());
        let u = resize_bit_plane(&u, src_w, src_h, dst_w, dst_h, dist.u_bits());
        let v = resize_bit_plane(&v, src_w, src_h, dst_w, dst_h, dist.v_bits());

        // Pack all three before mutating anything
        let y = pack_plane(y)?;
        let u = pack_plane(u)?;
        let v = pack_plane(v)?;

        frame.width = dst_w;
        frame.height = dst_h;

        let [stride_y, stride_u, stride_v] = dist.packed_strides(dst_w);
        frame.stride_y = stride_y;
        frame.stride_u = stride_u;
        frame.stride_v = stride_v;

        frame.y = y;
        frame.u = u;
        frame.v = v;

        Ok(())
    }

    /// Tear the pipeline down: drop the pending surface callback and release
    /// every queued frame buffer. In-flight resizes run to completion; frames
    /// handed in afterwards are released unprocessed.
    pub fn close(&self) {
        *self.surface.lock().expect("surface state mutex poisoned") = SurfaceState::Closed;

        self.bridge.clear();

        tracing::debug!("pipeline closed");
    }

    /// Fire the one-shot surface binding if this is the first frame.
    fn notify_surface_ready(&self, frame: &VideoFrame) {
        let callback = {
            let mut surface = self.surface.lock().expect("surface state mutex poisoned");

            match std::mem::replace(&mut *surface, SurfaceState::Bound) {
                SurfaceState::Pending(callback) => callback,
                other => {
                    // Already bound or closed; put the state back
                    *surface = other;
                    return;
                }
            }
        };

        let config = SurfaceConfig {
            width: frame.width,
            height: frame.height,
            frame_rate: ASSUMED_FRAME_RATE,
            bits_per_pixel: self.distribution.total(),
        };

        tracing::info!(
            width = config.width,
            height = config.height,
            frame_rate = config.frame_rate,
            "binding rendering surface to first frame"
        );

        // Invoked outside the lock; the callback dispatches to the renderer's
        // own context and must not block frame processing
        callback(config);
    }
}

#[cfg(test)]
mod tests {
    use super::{ASSUMED_FRAME_RATE, PipelineError, ResizePipeline, SurfaceConfig};
    use crate::{BitsDistribution, DEFAULT_BRIDGE_CAPACITY, VideoFrame};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    fn pipeline(dst_w: usize, dst_h: usize) -> ResizePipeline {
        ResizePipeline::new(
            BitsDistribution::I420,
            dst_w,
            dst_h,
            DEFAULT_BRIDGE_CAPACITY,
            |_| {},
        )
    }

    fn patterned_frame(width: usize, height: usize) -> VideoFrame {
        let mut frame = VideoFrame::blank(&BitsDistribution::I420, width, height);
        for (i, byte) in frame.y.iter_mut().enumerate() {
            *byte = (i % 251) as u8;
        }
        for (i, byte) in frame.u.iter_mut().enumerate() {
            *byte = (i % 127) as u8;
        }
        for (i, byte) in frame.v.iter_mut().enumerate() {
            *byte = (i % 83) as u8;
        }
        frame
    }

    #[test]
    fn resize_updates_dimensions_strides_and_buffers() {
        let pipeline = pipeline(8, 8);
        let mut frame = patterned_frame(16, 16);

        pipeline.resize_frame(&mut frame).unwrap();

        assert_eq!((frame.width, frame.height), (8, 8));
        assert_eq!(
            [frame.stride_y, frame.stride_u, frame.stride_v],
            [8, 2, 2]
        );
        assert_eq!(frame.y.len(), 8 * 8 / 8);
        assert_eq!(frame.u.len(), 8 * 8 / 8);
        assert_eq!(frame.v.len(), 8 * 8 / 8);
    }

    #[test]
    fn same_dimension_resize_keeps_unit_aligned_y_bytes() {
        // With an 8-bit Y unit the loops step by 8, so at identical
        // dimensions the bytes at unit-aligned grid positions survive
        // bit-exactly while the rest of the plane is left zeroed.
        let pipeline = pipeline(16, 16);
        let mut frame = patterned_frame(16, 16);
        let original_y = frame.y.clone();

        pipeline.resize_frame(&mut frame).unwrap();

        assert_eq!(frame.y.len(), 16 * 16 / 8);
        // (i, j) = (0, 0) and (0, 8) copy source bits 0..16
        assert_eq!(frame.y[0], original_y[0]);
        assert_eq!(frame.y[1], original_y[1]);
        // (8, 0) copies source bits 128..136 to destination bits 128..136
        assert_eq!(frame.y[16], original_y[16]);
        // Positions between the unit steps are never written
        assert_eq!(frame.y[2], 0);
    }

    #[test]
    fn zero_target_dimension_rejects_before_touching_the_frame() {
        for (w, h) in [(0, 8), (8, 0), (0, 0)] {
            let pipeline = pipeline(w, h);
            let mut frame = patterned_frame(16, 16);
            let original = frame.clone();

            let err = pipeline.resize_frame(&mut frame).unwrap_err();

            assert!(matches!(err, PipelineError::InvalidDimensions));
            assert_eq!(frame, original);
        }
    }

    #[test]
    fn handled_frames_reach_the_renderer_in_order() {
        let pipeline = pipeline(8, 8);

        for tag in 1..=3u8 {
            let mut frame = patterned_frame(16, 16);
            frame.y[0] = tag;
            pipeline.handle_frame(frame).unwrap();
        }

        // The first Y byte sits at a unit-aligned position and survives the
        // resample bit-exactly, so the tags identify each served frame
        let mut served = Vec::new();
        while let Some(frame) = pipeline.try_serve_frame() {
            served.push(frame.y[0]);
        }
        assert_eq!(served, [1, 2, 3]);
    }

    #[test]
    fn surface_binding_fires_once_with_resized_dimensions() {
        let seen = Arc::new(AtomicUsize::new(0));
        let config = Arc::new(std::sync::Mutex::new(None::<SurfaceConfig>));

        let pipeline = {
            let seen = seen.clone();
            let config = config.clone();
            ResizePipeline::new(BitsDistribution::I420, 8, 8, 2, move |c| {
                seen.fetch_add(1, Ordering::SeqCst);
                *config.lock().unwrap() = Some(c);
            })
        };

        for _ in 0..3 {
            pipeline.handle_frame(patterned_frame(16, 16)).unwrap();
        }

        assert_eq!(seen.load(Ordering::SeqCst), 1);

        let config = config.lock().unwrap().unwrap();
        assert_eq!((config.width, config.height), (8, 8));
        assert_eq!(config.frame_rate, ASSUMED_FRAME_RATE);
        assert_eq!(config.bitrate(), ASSUMED_FRAME_RATE * 8 * 8 * 12);
    }

    #[test]
    fn rejected_frame_does_not_fire_surface_binding() {
        let seen = Arc::new(AtomicUsize::new(0));

        let pipeline = {
            let seen = seen.clone();
            ResizePipeline::new(BitsDistribution::I420, 0, 8, 2, move |_| {
                seen.fetch_add(1, Ordering::SeqCst);
            })
        };

        assert!(pipeline.handle_frame(patterned_frame(16, 16)).is_err());
        assert_eq!(seen.load(Ordering::SeqCst), 0);
        assert!(pipeline.try_serve_frame().is_none());
    }

    #[test]
    fn close_drains_the_bridge_and_releases_later_frames() {
        let pipeline = pipeline(8, 8);

        pipeline.handle_frame(patterned_frame(16, 16)).unwrap();
        assert_eq!(pipeline.bridge().len(), 1);

        pipeline.close();
        assert!(pipeline.bridge().is_empty());

        pipeline.handle_frame(patterned_frame(16, 16)).unwrap();
        assert!(pipeline.try_serve_frame().is_none());
    }
}
