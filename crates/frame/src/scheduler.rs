use crossbeam_channel::{Receiver, RecvTimeoutError, Sender, TryRecvError};
use simplengine_common::EngineConfig;
use simplengine_common::config::DEFAULT_TARGET_FPS;
use std::panic::{self, AssertUnwindSafe};
use std::sync::atomic::{AtomicBool, AtomicU32, AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use crate::fault::{CallbackResult, FaultLog, FrameFault, Phase};
use crate::timer::{FrameStats, FrameTimer};

/// How long `stop` waits for the loop thread to finish.
pub const STOP_TIMEOUT: Duration = Duration::from_millis(1000);

const NANOS_PER_SECOND: u64 = 1_000_000_000;
const FPS_WINDOW: Duration = Duration::from_secs(1);
const TIMER_HISTORY: usize = 240;
const THREAD_NAME: &str = "simplengine-frame-loop";

/// Update callback: receives the elapsed seconds since the previous frame.
pub type UpdateFn = Box<dyn FnMut(f64) -> CallbackResult + Send>;

/// Render callback, called right after update in the same frame.
pub type RenderFn = Box<dyn FnMut() -> CallbackResult + Send>;

/// Errors from controlling the scheduler.
#[derive(Debug, thiserror::Error)]
pub enum SchedulerError {
    #[error("failed to spawn frame loop thread: {0}")]
    Spawn(#[from] std::io::Error),
}

/// A replaceable callback.
///
/// The loop takes the callback out while calling it so callbacks may replace
/// or clear themselves. `generation` tells the loop whether the slot changed
/// during the call; if it did, the taken callback is dropped.
struct CallbackSlot<F> {
    inner: Mutex<SlotState<F>>,
}

struct SlotState<F> {
    callback: Option<F>,
    generation: u64,
}

impl<F> CallbackSlot<F> {
    fn new() -> Self {
        Self {
            inner: Mutex::new(SlotState {
                callback: None,
                generation: 0,
            }),
        }
    }

    fn replace(&self, callback: Option<F>) {
        let mut state = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
        state.callback = callback;
        state.generation += 1;
    }

    fn is_set(&self) -> bool {
        self.inner
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .callback
            .is_some()
    }

    fn take(&self) -> Option<(F, u64)> {
        let mut state = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
        let generation = state.generation;
        state.callback.take().map(|f| (f, generation))
    }

    fn restore(&self, callback: F, generation: u64) {
        let mut state = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
        if state.generation == generation {
            state.callback = Some(callback);
        }
    }
}

/// State shared between the scheduler handle and its loop thread.
struct Shared {
    running: AtomicBool,
    target_fps: AtomicU32,
    target_frame_nanos: AtomicU64,
    current_fps: AtomicU32,
    frame_count: AtomicU64,
    update: CallbackSlot<UpdateFn>,
    render: CallbackSlot<RenderFn>,
    faults: FaultLog,
    timer: Mutex<FrameTimer>,
}

impl Shared {
    fn run_update(&self, frame: u64, dt: f64) {
        let Some((mut f, generation)) = self.update.take() else {
            return;
        };
        let outcome = panic::catch_unwind(AssertUnwindSafe(|| f(dt)));
        self.absorb(Phase::Update, frame, outcome);
        self.update.restore(f, generation);
    }

    fn run_render(&self, frame: u64) {
        let Some((mut f, generation)) = self.render.take() else {
            return;
        };
        let outcome = panic::catch_unwind(AssertUnwindSafe(|| f()));
        self.absorb(Phase::Render, frame, outcome);
        self.render.restore(f, generation);
    }

    fn absorb(&self, phase: Phase, frame: u64, outcome: thread::Result<CallbackResult>) {
        match outcome {
            Ok(Ok(())) => {}
            Ok(Err(err)) => self
                .faults
                .record(FrameFault::from_error(phase, frame, err.as_ref())),
            Err(payload) => self
                .faults
                .record(FrameFault::from_panic(phase, frame, payload.as_ref())),
        }
    }

    fn target_frame_duration(&self) -> Duration {
        Duration::from_nanos(self.target_frame_nanos.load(Ordering::SeqCst))
    }
}

/// The running loop thread and the channels used to stop it.
struct LoopHandle {
    thread: JoinHandle<()>,
    stop_tx: Sender<()>,
    done_rx: Receiver<()>,
}

/// Signals loop exit when dropped, including on unwind.
struct DoneSignal(Sender<()>);

impl Drop for DoneSignal {
    fn drop(&mut self) {
        let _ = self.0.try_send(());
    }
}

/// Fixed-cadence frame loop.
///
/// Owns one background thread while running. Each iteration measures `dt`,
/// calls the update callback, calls the render callback, then sleeps for the
/// rest of the frame budget (or yields if the frame overran). The number of
/// frames completed in each wall-clock second is published as the current FPS.
///
/// `start` and `stop` are serialized; starting a running scheduler does
/// nothing. Callbacks and target FPS may be changed at any time and apply from
/// the next iteration.
pub struct Scheduler {
    shared: Arc<Shared>,
    control: Mutex<Option<LoopHandle>>,
}

impl Default for Scheduler {
    fn default() -> Self {
        Self::new(DEFAULT_TARGET_FPS as i64)
    }
}

impl Scheduler {
    /// A stopped scheduler targeting `target_fps`. Non-positive values leave
    /// the default of 144.
    pub fn new(target_fps: i64) -> Self {
        let shared = Shared {
            running: AtomicBool::new(false),
            target_fps: AtomicU32::new(DEFAULT_TARGET_FPS),
            target_frame_nanos: AtomicU64::new(NANOS_PER_SECOND / DEFAULT_TARGET_FPS as u64),
            current_fps: AtomicU32::new(0),
            frame_count: AtomicU64::new(0),
            update: CallbackSlot::new(),
            render: CallbackSlot::new(),
            faults: FaultLog::default(),
            timer: Mutex::new(FrameTimer::new(TIMER_HISTORY)),
        };
        let scheduler = Self {
            shared: Arc::new(shared),
            control: Mutex::new(None),
        };
        scheduler.set_target_fps(target_fps);
        scheduler
    }

    pub fn from_config(config: &EngineConfig) -> Self {
        Self::new(config.target_fps)
    }

    /// A stopped scheduler with both callbacks installed.
    pub fn with_callbacks<U, R>(target_fps: i64, update: U, render: R) -> Self
    where
        U: FnMut(f64) -> CallbackResult + Send + 'static,
        R: FnMut() -> CallbackResult + Send + 'static,
    {
        let scheduler = Self::new(target_fps);
        scheduler.set_update(update);
        scheduler.set_render(render);
        scheduler
    }

    pub fn set_update<U>(&self, update: U)
    where
        U: FnMut(f64) -> CallbackResult + Send + 'static,
    {
        self.shared.update.replace(Some(Box::new(update)));
    }

    pub fn set_render<R>(&self, render: R)
    where
        R: FnMut() -> CallbackResult + Send + 'static,
    {
        self.shared.render.replace(Some(Box::new(render)));
    }

    pub fn clear_update(&self) {
        self.shared.update.replace(None);
    }

    pub fn clear_render(&self) {
        self.shared.render.replace(None);
    }

    pub fn has_update(&self) -> bool {
        self.shared.update.is_set()
    }

    pub fn has_render(&self) -> bool {
        self.shared.render.is_set()
    }

    /// Change the frame rate. Values `<= 0` (or too large for `u32`) are ignored.
    pub fn set_target_fps(&self, fps: i64) {
        let Ok(fps) = u32::try_from(fps) else {
            return;
        };
        if fps == 0 {
            return;
        }
        self.shared
            .target_frame_nanos
            .store(NANOS_PER_SECOND / fps as u64, Ordering::SeqCst);
        self.shared.target_fps.store(fps, Ordering::SeqCst);
    }

    pub fn target_fps(&self) -> u32 {
        self.shared.target_fps.load(Ordering::SeqCst)
    }

    pub fn target_frame_duration(&self) -> Duration {
        self.shared.target_frame_duration()
    }

    /// Frames completed during the last full second of running.
    pub fn current_fps(&self) -> u32 {
        self.shared.current_fps.load(Ordering::SeqCst)
    }

    /// Total frames completed since construction.
    pub fn frame_count(&self) -> u64 {
        self.shared.frame_count.load(Ordering::SeqCst)
    }

    /// Number of callback faults absorbed since construction.
    pub fn fault_count(&self) -> u64 {
        self.shared.faults.count()
    }

    pub fn last_fault(&self) -> Option<FrameFault> {
        self.shared.faults.last()
    }

    /// Work time (update + render) of recent frames.
    pub fn frame_stats(&self) -> FrameStats {
        self.shared
            .timer
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .stats()
    }

    pub fn is_running(&self) -> bool {
        self.shared.running.load(Ordering::SeqCst)
    }

    /// Spawn the loop thread. Does nothing if already running.
    pub fn start(&self) -> Result<(), SchedulerError> {
        let mut control = self.control.lock().unwrap_or_else(PoisonError::into_inner);
        if self.shared.running.load(Ordering::SeqCst) {
            return Ok(());
        }

        let (stop_tx, stop_rx) = crossbeam_channel::bounded(1);
        let (done_tx, done_rx) = crossbeam_channel::bounded(1);
        let shared = Arc::clone(&self.shared);
        let thread = thread::Builder::new()
            .name(THREAD_NAME.into())
            .spawn(move || run_loop(&shared, &stop_rx, DoneSignal(done_tx)))?;

        self.shared.running.store(true, Ordering::SeqCst);
        *control = Some(LoopHandle {
            thread,
            stop_tx,
            done_rx,
        });
        tracing::info!(target_fps = self.target_fps(), "frame loop started");
        Ok(())
    }

    /// Ask the loop to exit and wait up to [`STOP_TIMEOUT`] for it.
    ///
    /// Always leaves the scheduler stopped. If the loop is stuck inside a
    /// callback past the timeout, its thread is detached and exits on its own
    /// once the callback returns.
    ///
    /// A detached loop keeps whichever callback it was running until that
    /// callback returns. A loop started before then runs without it, and the
    /// detached loop may still call the render callback once before exiting.
    pub fn stop(&self) {
        let mut control = self.control.lock().unwrap_or_else(PoisonError::into_inner);
        self.shared.running.store(false, Ordering::SeqCst);
        let Some(handle) = control.take() else {
            return;
        };

        let LoopHandle {
            thread,
            stop_tx,
            done_rx,
        } = handle;
        let _ = stop_tx.try_send(());
        drop(stop_tx);

        match done_rx.recv_timeout(STOP_TIMEOUT) {
            Ok(()) | Err(RecvTimeoutError::Disconnected) => {
                if thread.join().is_err() {
                    tracing::warn!("frame loop thread panicked");
                }
                tracing::info!(frames = self.frame_count(), "frame loop stopped");
            }
            Err(RecvTimeoutError::Timeout) => {
                tracing::warn!(
                    timeout_ms = STOP_TIMEOUT.as_millis() as u64,
                    "frame loop did not stop in time; detaching thread"
                );
            }
        }
    }
}

impl Drop for Scheduler {
    fn drop(&mut self) {
        self.stop();
    }
}

/// True once `stop` has signalled or dropped the stop channel.
fn stop_requested(stop_rx: &Receiver<()>) -> bool {
    !matches!(stop_rx.try_recv(), Err(TryRecvError::Empty))
}

fn run_loop(shared: &Shared, stop_rx: &Receiver<()>, _done: DoneSignal) {
    let mut last_frame = Instant::now();
    let mut last_fps_tick = last_frame;
    let mut frames_in_window: u32 = 0;

    while !stop_requested(stop_rx) {
        let frame_start = Instant::now();
        let dt = frame_start.duration_since(last_frame).as_secs_f64();
        last_frame = frame_start;
        let frame = shared.frame_count.load(Ordering::SeqCst);

        shared.run_update(frame, dt);
        shared.run_render(frame);

        let work = frame_start.elapsed();
        shared
            .timer
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .record(work);

        match shared.target_frame_duration().checked_sub(work) {
            Some(remaining) if !remaining.is_zero() => {
                // Sleeping on the stop channel lets `stop` wake the loop early.
                if !matches!(
                    stop_rx.recv_timeout(remaining),
                    Err(RecvTimeoutError::Timeout)
                ) {
                    break;
                }
            }
            _ => thread::yield_now(),
        }

        frames_in_window += 1;
        shared.frame_count.fetch_add(1, Ordering::SeqCst);

        let now = Instant::now();
        if now.duration_since(last_fps_tick) >= FPS_WINDOW {
            shared.current_fps.store(frames_in_window, Ordering::SeqCst);
            tracing::debug!(fps = frames_in_window, "frame rate");
            frames_in_window = 0;
            last_fps_tick = now;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_target_is_144() {
        let s = Scheduler::default();
        assert_eq!(s.target_fps(), 144);
        assert_eq!(s.target_frame_duration(), Duration::from_nanos(1_000_000_000 / 144));
        assert!(!s.is_running());
        assert_eq!(s.current_fps(), 0);
    }

    #[test]
    fn non_positive_fps_is_ignored() {
        let s = Scheduler::new(60);
        s.set_target_fps(0);
        assert_eq!(s.target_fps(), 60);
        s.set_target_fps(-5);
        assert_eq!(s.target_fps(), 60);
        assert_eq!(Scheduler::new(-1).target_fps(), 144);
    }

    #[test]
    fn set_target_fps_recomputes_duration() {
        let s = Scheduler::new(60);
        s.set_target_fps(30);
        assert_eq!(s.target_fps(), 30);
        assert_eq!(s.target_frame_duration(), Duration::from_nanos(33_333_333));
    }

    #[test]
    fn from_config_uses_target_fps() {
        let config = EngineConfig {
            target_fps: 75,
            ..EngineConfig::default()
        };
        assert_eq!(Scheduler::from_config(&config).target_fps(), 75);
    }

    #[test]
    fn callbacks_can_be_set_and_cleared() {
        let s = Scheduler::new(60);
        assert!(!s.has_update());
        s.set_update(|_| Ok(()));
        s.set_render(|| Ok(()));
        assert!(s.has_update());
        assert!(s.has_render());
        s.clear_update();
        s.clear_render();
        assert!(!s.has_update());
        assert!(!s.has_render());
    }

    #[test]
    fn slot_restore_respects_replacement() {
        let slot: CallbackSlot<u32> = CallbackSlot::new();
        slot.replace(Some(1));
        let (value, generation) = slot.take().unwrap();
        slot.replace(Some(2));
        slot.restore(value, generation);
        assert_eq!(slot.take().map(|(v, _)| v), Some(2));

        slot.replace(Some(3));
        let (value, generation) = slot.take().unwrap();
        slot.restore(value, generation);
        assert_eq!(slot.take().map(|(v, _)| v), Some(3));
    }

    #[test]
    fn stop_without_start_is_harmless() {
        let s = Scheduler::new(60);
        s.stop();
        assert!(!s.is_running());
    }
}
