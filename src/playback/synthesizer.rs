//! Fire-and-forget tone playback.
//!
//! Requests go to a single worker thread that renders the tone and hands it
//! to the sink. Every request bumps a generation counter; the worker drops
//! any request whose generation is no longer the latest, both before
//! rendering and again right before playing, so only the last request is
//! ever heard.

use super::sink::{AudioSink, PlaybackHandle};
use crate::catalog::{ToneId, generate};
use crate::error::{PlaybackError, ToneError, ToneResult};
use std::panic;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::mpsc::{self, Receiver, Sender, SyncSender};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::thread::{self, JoinHandle};
use tracing::{debug, error, warn};

enum Request {
    Play { tone: ToneId, generation: u64 },
    /// Answered once every earlier request has been handled.
    Flush(SyncSender<()>),
}

struct Shared<S: AudioSink> {
    sink: S,
    generation: AtomicU64,
    active: Mutex<Option<S::Handle>>,
    last_error: Mutex<Option<PlaybackError>>,
}

impl<S: AudioSink> Shared<S> {
    fn is_current(&self, generation: u64) -> bool {
        self.generation.load(Ordering::SeqCst) == generation
    }

    fn handle_play(&self, tone: ToneId, generation: u64) {
        if !self.is_current(generation) {
            debug!(%tone, generation, "skipping superseded request");
            return;
        }

        let buffer = match panic::catch_unwind(|| generate(tone)) {
            Ok(buffer) => buffer,
            Err(_) => {
                error!(%tone, "tone synthesis panicked, request abandoned");
                return;
            }
        };

        let previous = {
            let mut active = lock(&self.active);
            if !self.is_current(generation) {
                debug!(%tone, generation, "discarding superseded tone");
                return;
            }
            active.take()
        };
        if let Some(mut previous) = previous {
            previous.stop();
        }

        // Opening the device can be slow; stop_playback must not wait on it
        let samples = buffer.len();
        match self.sink.play(buffer) {
            Ok(mut handle) => {
                let mut active = lock(&self.active);
                if self.is_current(generation) {
                    debug!(%tone, samples, "playing tone");
                    *active = Some(handle);
                } else {
                    drop(active);
                    debug!(%tone, generation, "tone superseded while opening the device");
                    handle.stop();
                }
            }
            Err(err) => {
                warn!(%tone, error = %err, "tone playback failed");
                *lock(&self.last_error) = Some(err);
            }
        }
    }

    fn stop_active(&self) -> bool {
        match lock(&self.active).take() {
            Some(mut handle) => {
                handle.stop();
                true
            }
            None => false,
        }
    }
}

fn run_worker<S: AudioSink>(shared: Arc<Shared<S>>, requests: Receiver<Request>) {
    for request in requests {
        match request {
            Request::Play { tone, generation } => shared.handle_play(tone, generation),
            Request::Flush(done) => {
                let _ = done.send(());
            }
        }
    }
    debug!("synthesis worker exiting");
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Plays catalog tones through an [`AudioSink`], one at a time.
///
/// A new request supersedes whatever is playing or still being rendered:
/// the previous playback is stopped and its device released before the new
/// one opens. Playback failures are logged and kept for
/// [`take_last_error`](Self::take_last_error); they never poison the
/// synthesizer.
///
/// Dropping the synthesizer releases it.
///
/// # Examples
///
/// ```no_run
/// # #[cfg(feature = "playback")]
/// # fn main() -> Result<(), carillon::ToneError> {
/// use carillon::ToneId;
/// use carillon::playback::{CpalSink, ToneSynthesizer};
///
/// let synth = ToneSynthesizer::new(CpalSink::default())?;
/// synth.play_tone(ToneId::ZenBowl)?;
/// synth.play_tone_named("soft-gong")?;
/// synth.wait_until_idle();
/// synth.release();
/// # Ok(())
/// # }
/// # #[cfg(not(feature = "playback"))]
/// # fn main() {}
/// ```
pub struct ToneSynthesizer<S: AudioSink> {
    shared: Arc<Shared<S>>,
    requests: Mutex<Option<Sender<Request>>>,
    worker: Mutex<Option<JoinHandle<()>>>,
    released: AtomicBool,
}

impl<S: AudioSink> ToneSynthesizer<S> {
    /// Starts the synthesis worker. Nothing is opened on the sink until the
    /// first tone is requested.
    pub fn new(sink: S) -> ToneResult<Self> {
        let shared = Arc::new(Shared {
            sink,
            generation: AtomicU64::new(0),
            active: Mutex::new(None),
            last_error: Mutex::new(None),
        });
        let (sender, receiver) = mpsc::channel();
        let worker_shared = Arc::clone(&shared);
        let worker = thread::Builder::new()
            .name("tone-synth".into())
            .spawn(move || run_worker(worker_shared, receiver))
            .map_err(ToneError::Spawn)?;

        Ok(Self {
            shared,
            requests: Mutex::new(Some(sender)),
            worker: Mutex::new(Some(worker)),
            released: AtomicBool::new(false),
        })
    }

    /// Queues `tone` for playback and returns immediately.
    ///
    /// Fails only when the synthesizer has been released. Device errors
    /// happen later, on the worker, and are reported through
    /// [`take_last_error`](Self::take_last_error).
    pub fn play_tone(&self, tone: ToneId) -> ToneResult<()> {
        if self.released.load(Ordering::SeqCst) {
            warn!(%tone, "tone requested after release");
            return Err(ToneError::Released);
        }
        let requests = lock(&self.requests);
        let sender = requests.as_ref().ok_or(ToneError::Released)?;
        let generation = self.shared.generation.fetch_add(1, Ordering::SeqCst) + 1;
        sender
            .send(Request::Play { tone, generation })
            .map_err(|_| ToneError::Playback(PlaybackError::WorkerLost))
    }

    /// Parses `name` (see [`ToneId`]'s `FromStr`) and plays it.
    ///
    /// An unknown name is rejected here, before the sink is touched.
    pub fn play_tone_named(&self, name: &str) -> ToneResult<()> {
        let tone = name.parse::<ToneId>()?;
        self.play_tone(tone)
    }

    /// Stops the current playback, if any, and cancels pending requests.
    /// Safe to call at any time, any number of times.
    pub fn stop_playback(&self) {
        self.shared.generation.fetch_add(1, Ordering::SeqCst);
        if self.shared.stop_active() {
            debug!("playback stopped");
        }
    }

    /// Whether a tone is currently sounding.
    pub fn is_playing(&self) -> bool {
        lock(&self.shared.active)
            .as_ref()
            .is_some_and(|handle| !handle.is_finished())
    }

    /// Blocks until every request made so far has been handled by the
    /// worker. Returns at once after release.
    pub fn wait_until_idle(&self) {
        let Some(sender) = lock(&self.requests).clone() else {
            return;
        };
        let (done_tx, done_rx) = mpsc::sync_channel(1);
        if sender.send(Request::Flush(done_tx)).is_ok() {
            let _ = done_rx.recv();
        }
    }

    /// The most recent playback error not yet taken.
    pub fn take_last_error(&self) -> Option<PlaybackError> {
        lock(&self.shared.last_error).take()
    }

    /// The sink tones are played on.
    pub fn sink(&self) -> &S {
        &self.shared.sink
    }

    /// True once [`release`](Self::release) has run.
    pub fn is_released(&self) -> bool {
        self.released.load(Ordering::SeqCst)
    }

    /// Stops playback, shuts the worker down and releases every device
    /// resource. Idempotent.
    pub fn release(&self) {
        if self.released.swap(true, Ordering::SeqCst) {
            return;
        }
        self.stop_playback();
        drop(lock(&self.requests).take());
        if let Some(worker) = lock(&self.worker).take() {
            if worker.join().is_err() {
                error!("synthesis worker panicked");
            }
        }
        // A request that raced with release may have started playing
        self.shared.stop_active();
        debug!("tone synthesizer released");
    }
}

impl<S: AudioSink> Drop for ToneSynthesizer<S> {
    fn drop(&mut self) {
        self.release();
    }
}
