//! In-memory sink that records what the synthesizer asks of a device.

#![allow(dead_code)]

use carillon::PlaybackError;
use carillon::SampleBuffer;
use carillon::playback::{AudioSink, PlaybackHandle};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

/// Counts device acquisitions and open handles. Handles never finish on
/// their own, so a playing tone stays open until stopped or dropped.
#[derive(Default)]
pub struct FakeSink {
    open: Arc<AtomicUsize>,
    max_open: Arc<AtomicUsize>,
    acquisitions: AtomicUsize,
    played: Mutex<Vec<usize>>,
    fail: AtomicBool,
}

impl FakeSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Shared counter of handles not yet stopped.
    pub fn open_counter(&self) -> Arc<AtomicUsize> {
        Arc::clone(&self.open)
    }

    pub fn open(&self) -> usize {
        self.open.load(Ordering::SeqCst)
    }

    /// Largest number of handles that were ever open at once.
    pub fn max_open(&self) -> usize {
        self.max_open.load(Ordering::SeqCst)
    }

    pub fn acquisitions(&self) -> usize {
        self.acquisitions.load(Ordering::SeqCst)
    }

    /// Lengths of every buffer handed to `play`, in order.
    pub fn played(&self) -> Vec<usize> {
        self.played.lock().unwrap().clone()
    }

    /// Makes subsequent `play` calls fail as if no device were present.
    pub fn set_failing(&self, fail: bool) {
        self.fail.store(fail, Ordering::SeqCst);
    }
}

impl AudioSink for FakeSink {
    type Handle = FakeHandle;

    fn play(&self, buffer: SampleBuffer) -> Result<FakeHandle, PlaybackError> {
        if self.fail.load(Ordering::SeqCst) {
            return Err(PlaybackError::NoDevice);
        }
        self.acquisitions.fetch_add(1, Ordering::SeqCst);
        self.played.lock().unwrap().push(buffer.len());
        let now_open = self.open.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_open.fetch_max(now_open, Ordering::SeqCst);
        Ok(FakeHandle {
            open: Some(Arc::clone(&self.open)),
        })
    }
}

pub struct FakeHandle {
    open: Option<Arc<AtomicUsize>>,
}

impl PlaybackHandle for FakeHandle {
    fn stop(&mut self) {
        if let Some(open) = self.open.take() {
            open.fetch_sub(1, Ordering::SeqCst);
        }
    }

    fn is_finished(&self) -> bool {
        self.open.is_none()
    }
}

impl Drop for FakeHandle {
    fn drop(&mut self) {
        self.stop();
    }
}
