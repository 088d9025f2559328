use crate::core::frame::{Frame, FrameSequence};
use crate::core::loader::{DatasetLoader, LoadError};
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackState {
    Idle,
    Running,
    Finished,
}

impl Default for PlaybackState {
    fn default() -> Self {
        PlaybackState::Idle
    }
}

/// FrameSink receives every frame the scheduler presents. It must tolerate car numbers that are
/// unknown to the registry.
pub trait FrameSink {
    fn present_frame(&mut self, frame_idx: usize, frame: &Frame);
}

impl<F> FrameSink for F
where
    F: FnMut(usize, &Frame),
{
    fn present_frame(&mut self, frame_idx: usize, frame: &Frame) {
        self(frame_idx, frame)
    }
}

/// The Scheduler steps through a frame sequence with a fixed frame delay. It does not keep time
/// itself, the host reports the elapsed time via `tick`.
///
/// Possible states:
/// * `Idle` -> nothing loaded, not started yet, or stopped (the cursor is kept when stopping)
/// * `Running` -> each tick accumulates time and presents the next frame once the next frame time
/// is reached
/// * `Finished` -> the last frame was presented
///
/// At most one frame is presented per tick, even if the reported delta covers several frame
/// delays. Skipped frame times are not caught up.
#[derive(Debug)]
pub struct Scheduler {
    frames: Arc<FrameSequence>,
    frame_delay: Duration,
    state: PlaybackState,
    cur_frame: usize,
    elapsed: Duration,
    next_frame_time: Duration,
}

impl Scheduler {
    pub fn new(frame_delay: Duration) -> Scheduler {
        Scheduler::with_frames(Arc::new(FrameSequence::default()), frame_delay)
    }

    pub fn with_frames(frames: Arc<FrameSequence>, frame_delay: Duration) -> Scheduler {
        Scheduler {
            frames,
            frame_delay,
            state: PlaybackState::Idle,
            cur_frame: 0,
            elapsed: Duration::ZERO,
            next_frame_time: Duration::ZERO,
        }
    }

    /// The method loads a dataset via the inserted loader and replaces the current frames. A
    /// failed load leaves the scheduler with an empty frame sequence.
    pub fn load_data(
        &mut self,
        loader: &mut DatasetLoader,
        filepath: &Path,
    ) -> Result<Arc<FrameSequence>, LoadError> {
        match loader.load(filepath) {
            Ok(frames) => {
                self.set_frames(Arc::clone(&frames));
                Ok(frames)
            }
            Err(err) => {
                self.set_frames(Arc::new(FrameSequence::default()));
                Err(err)
            }
        }
    }

    /// The method replaces the frames, which stops the playback and rewinds the cursor.
    pub fn set_frames(&mut self, frames: Arc<FrameSequence>) {
        self.frames = frames;
        self.state = PlaybackState::Idle;
        self.cur_frame = 0;
        self.elapsed = Duration::ZERO;
        self.next_frame_time = Duration::ZERO;
    }

    /// The method starts the playback from the first frame. It returns false (and does nothing)
    /// if no frames are available or the playback is already running.
    pub fn start(&mut self) -> bool {
        if self.state == PlaybackState::Running {
            debug!("Replay is already running");
            return false;
        }
        if self.frames.is_empty() {
            warn!("No race data available, replay not started");
            return false;
        }

        self.state = PlaybackState::Running;
        self.cur_frame = 0;
        self.elapsed = Duration::ZERO;
        self.next_frame_time = Duration::ZERO;
        info!(tot_no_frames = self.frames.len(), "Started replay");
        true
    }

    pub fn stop(&mut self) {
        if self.state == PlaybackState::Running {
            self.state = PlaybackState::Idle;
            info!(cur_frame = self.cur_frame, "Stopped replay");
        }
    }

    pub fn reset(&mut self) {
        self.stop();
        self.cur_frame = 0;
        self.start();
    }

    /// The method advances the playback by the elapsed time delta. If the next frame time is
    /// reached, the current frame is handed to the sink and its index is returned.
    pub fn tick<S: FrameSink + ?Sized>(&mut self, delta: Duration, sink: &mut S) -> Option<usize> {
        if self.state != PlaybackState::Running {
            return None;
        }

        self.elapsed += delta;

        if self.elapsed < self.next_frame_time {
            return None;
        }

        let frame_idx = self.cur_frame;
        let presented = self.present_frame(frame_idx, sink);

        self.cur_frame += 1;
        self.next_frame_time = self.elapsed + self.frame_delay;

        if self.cur_frame >= self.frames.len() {
            self.state = PlaybackState::Finished;
            info!("Reached the end of the race data");
        }

        if presented {
            Some(frame_idx)
        } else {
            None
        }
    }

    fn present_frame<S: FrameSink + ?Sized>(&self, frame_idx: usize, sink: &mut S) -> bool {
        match self.frames.get(frame_idx) {
            Some(frame) => {
                sink.present_frame(frame_idx, frame);
                true
            }
            None => false,
        }
    }

    pub fn state(&self) -> PlaybackState {
        self.state
    }

    /// Index of the next frame to be presented.
    pub fn cur_frame(&self) -> usize {
        self.cur_frame
    }

    pub fn tot_no_frames(&self) -> usize {
        self.frames.len()
    }
}
