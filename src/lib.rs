//! Reshape incoming planar video frames and hand them to a pull-based
//! renderer without blocking frame arrival.
//!
//! The crate is one peer's receive path of a two-party real-time video
//! exchange. Decoded frames are pushed in from a network/decode callback,
//! resized in place at bit granularity and queued in a bounded bridge the
//! render thread drains on its own schedule:
//!
//! ```text
//! decode callback -> ResizePipeline -> FrameDeliveryBridge -> renderer pull
//! ```
//!
//! The three pixel components may have unequal, non-byte-aligned bit depths
//! ([`BitsDistribution`], 8/2/2 in the reference configuration), so plane
//! extraction, nearest-neighbor resampling and repacking all operate on an
//! explicit [`BitSequence`] rather than on raw bytes.
//!
//! ```
//! use bitframe::{BitsDistribution, DEFAULT_BRIDGE_CAPACITY, ResizePipeline, VideoFrame};
//!
//! let pipeline = ResizePipeline::new(
//!     BitsDistribution::I420,
//!     640,
//!     360,
//!     DEFAULT_BRIDGE_CAPACITY,
//!     |config| println!("surface ready: {}x{}", config.width, config.height),
//! );
//!
//! // Decode thread
//! pipeline.handle_frame(VideoFrame::blank(&BitsDistribution::I420, 1280, 720))?;
//!
//! // Render thread
//! let frame = pipeline.try_serve_frame().expect("a frame was queued");
//! assert_eq!((frame.width, frame.height), (640, 360));
//! # Ok::<(), bitframe::PipelineError>(())
//! ```

pub use bits::BitSequence;
pub use bridge::{DEFAULT_BRIDGE_CAPACITY, FrameDeliveryBridge};
pub use distribution::BitsDistribution;
pub use frame::VideoFrame;
pub use pipeline::{ASSUMED_FRAME_RATE, PipelineError, ResizePipeline, SurfaceConfig};
pub use planes::{LayoutError, extract_plane, pack_plane};
pub use resample::resize_bit_plane;

mod bits;
mod bridge;
mod distribution;
mod frame;
mod pipeline;
mod planes;
mod resample;
