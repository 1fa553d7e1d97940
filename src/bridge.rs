use crate::VideoFrame;
use std::collections::VecDeque;
use std::sync::Mutex;

/// Bridge capacity used by [`crate::ResizePipeline`] when none is given
pub const DEFAULT_BRIDGE_CAPACITY: usize = 5;

/// Bounded FIFO handoff between the decode thread pushing resized frames and
/// the renderer pulling them on its own schedule.
///
/// The producer never blocks: at capacity a push evicts the oldest queued
/// frame, bounding end-to-end latency instead of buffering everything. An
/// empty pull is a normal underrun, not an error.
///
/// One mutex guards only the queue bookkeeping; it is never held across
/// resampling work.
pub struct FrameDeliveryBridge {
    queue: Mutex<VecDeque<VideoFrame>>,
    capacity: usize,
}

impl FrameDeliveryBridge {
    /// # Panics
    ///
    /// If `capacity` is zero
    pub fn new(capacity: usize) -> Self {
        assert!(capacity > 0, "bridge capacity must be at least one frame");

        Self {
            queue: Mutex::new(VecDeque::with_capacity(capacity)),
            capacity,
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.queue.lock().expect("frame queue mutex poisoned").len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Queue a frame for the renderer, evicting the oldest one at capacity.
    pub fn push(&self, frame: VideoFrame) {
        let mut queue = self.queue.lock().expect("frame queue mutex poisoned");

        if queue.len() == self.capacity {
            queue.pop_front();

            tracing::debug!(
                capacity = self.capacity,
                "bridge at capacity, dropped oldest frame"
            );
        }

        queue.push_back(frame);
    }

    /// Dequeue the next frame if one is available.
    ///
    /// `None` means the renderer asked before a new frame arrived; it is
    /// expected to tolerate this and e.g. hold the last displayed frame.
    pub fn try_serve_frame(&self) -> Option<VideoFrame> {
        let frame = self
            .queue
            .lock()
            .expect("frame queue mutex poisoned")
            .pop_front();

        if frame.is_none() {
            tracing::trace!("no frame queued, renderer underrun");
        }

        frame
    }

    /// Release every queued frame buffer.
    pub(crate) fn clear(&self) {
        self.queue
            .lock()
            .expect("frame queue mutex poisoned")
            .clear();
    }
}
