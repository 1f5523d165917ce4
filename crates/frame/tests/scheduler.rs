use simplengine_frame::{Phase, Scheduler};
use std::collections::HashSet;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::{Duration, Instant};

#[test]
fn start_then_stop_returns_promptly() {
    let scheduler = Scheduler::new(60);
    scheduler.set_update(|_| Ok(()));
    scheduler.set_render(|| Ok(()));

    scheduler.start().unwrap();
    assert!(scheduler.is_running());
    thread::sleep(Duration::from_millis(100));

    let begin = Instant::now();
    scheduler.stop();
    assert!(begin.elapsed() < Duration::from_millis(1000));
    assert!(!scheduler.is_running());
    assert!(scheduler.frame_count() > 0);
}

#[test]
fn measured_fps_tracks_target() {
    let scheduler = Scheduler::with_callbacks(60, |_| Ok(()), || Ok(()));
    scheduler.start().unwrap();
    thread::sleep(Duration::from_millis(1500));
    let fps = scheduler.current_fps();
    scheduler.stop();

    assert!((40..=62).contains(&fps), "measured {fps} fps for a 60 fps target");
}

#[test]
fn update_runs_before_render_every_frame() {
    let order = Arc::new(Mutex::new(Vec::new()));
    let scheduler = Scheduler::new(120);
    let o = Arc::clone(&order);
    scheduler.set_update(move |_| {
        o.lock().unwrap().push('u');
        Ok(())
    });
    let o = Arc::clone(&order);
    scheduler.set_render(move || {
        o.lock().unwrap().push('r');
        Ok(())
    });

    scheduler.start().unwrap();
    thread::sleep(Duration::from_millis(100));
    scheduler.stop();

    let order = order.lock().unwrap();
    assert!(order.len() >= 2);
    for pair in order.chunks(2) {
        assert_eq!(pair[0], 'u');
        if pair.len() == 2 {
            assert_eq!(pair[1], 'r');
        }
    }
}

#[test]
fn dt_reflects_frame_duration() {
    let samples = Arc::new(Mutex::new(Vec::new()));
    let s = Arc::clone(&samples);
    let scheduler = Scheduler::new(50);
    scheduler.set_update(move |dt| {
        s.lock().unwrap().push(dt);
        Ok(())
    });

    scheduler.start().unwrap();
    thread::sleep(Duration::from_millis(300));
    scheduler.stop();

    let samples = samples.lock().unwrap();
    assert!(samples.len() > 3);
    // The first frame has nothing to measure against.
    for &dt in &samples[1..] {
        assert!(dt >= 0.015, "dt {dt} shorter than the frame budget");
        assert!(dt < 0.5, "dt {dt} unexpectedly long");
    }
}

#[test]
fn second_start_is_a_noop() {
    let threads = Arc::new(Mutex::new(HashSet::new()));
    let t = Arc::clone(&threads);
    let scheduler = Scheduler::new(120);
    scheduler.set_update(move |_| {
        t.lock().unwrap().insert(thread::current().id());
        Ok(())
    });

    scheduler.start().unwrap();
    scheduler.start().unwrap();
    thread::sleep(Duration::from_millis(100));
    scheduler.stop();

    assert_eq!(threads.lock().unwrap().len(), 1);
}

#[test]
fn restart_after_stop() {
    let scheduler = Scheduler::with_callbacks(120, |_| Ok(()), || Ok(()));
    scheduler.start().unwrap();
    thread::sleep(Duration::from_millis(50));
    scheduler.stop();
    let after_first = scheduler.frame_count();

    scheduler.start().unwrap();
    thread::sleep(Duration::from_millis(50));
    scheduler.stop();
    assert!(scheduler.frame_count() > after_first);
}

#[test]
fn callback_faults_are_recorded_and_loop_survives() {
    let calls = Arc::new(AtomicU64::new(0));
    let c = Arc::clone(&calls);
    let scheduler = Scheduler::new(120);
    scheduler.set_update(move |_| {
        let n = c.fetch_add(1, Ordering::SeqCst);
        if n % 2 == 0 {
            Err(format!("bad frame {n}").into())
        } else {
            Ok(())
        }
    });
    scheduler.set_render(|| panic!("render exploded"));

    scheduler.start().unwrap();
    thread::sleep(Duration::from_millis(150));
    scheduler.stop();

    let frames = scheduler.frame_count();
    assert!(frames >= 3, "loop died after {frames} frames");
    assert!(calls.load(Ordering::SeqCst) >= 3);
    // Every render panics, every other update errors.
    assert!(scheduler.fault_count() >= frames);

    let last = scheduler.last_fault().unwrap();
    assert_eq!(last.phase, Phase::Render);
    assert!(last.panicked);
    assert_eq!(last.message, "render exploded");
}

#[test]
fn stop_gives_up_on_a_stuck_callback() {
    let scheduler = Scheduler::new(60);
    scheduler.set_update(|_| {
        thread::sleep(Duration::from_secs(3));
        Ok(())
    });

    scheduler.start().unwrap();
    thread::sleep(Duration::from_millis(50));

    let begin = Instant::now();
    scheduler.stop();
    let waited = begin.elapsed();
    assert!(waited >= Duration::from_millis(900), "returned after {waited:?}");
    assert!(waited < Duration::from_millis(2500), "returned after {waited:?}");
    assert!(!scheduler.is_running());
}

#[test]
fn callback_can_clear_itself_while_running() {
    let calls = Arc::new(AtomicU64::new(0));
    let scheduler = Arc::new(Scheduler::new(120));

    let c = Arc::clone(&calls);
    let weak = Arc::downgrade(&scheduler);
    scheduler.set_update(move |_| {
        c.fetch_add(1, Ordering::SeqCst);
        if let Some(s) = weak.upgrade() {
            s.clear_update();
        }
        Ok(())
    });

    scheduler.start().unwrap();
    thread::sleep(Duration::from_millis(100));
    scheduler.stop();

    assert_eq!(calls.load(Ordering::SeqCst), 1);
    assert!(!scheduler.has_update());
}

#[test]
fn frame_stats_cover_recent_frames() {
    let scheduler = Scheduler::with_callbacks(
        100,
        |_| {
            thread::sleep(Duration::from_millis(2));
            Ok(())
        },
        || Ok(()),
    );
    scheduler.start().unwrap();
    thread::sleep(Duration::from_millis(200));
    scheduler.stop();

    let stats = scheduler.frame_stats();
    assert!(stats.samples > 0);
    assert!(stats.min >= Duration::from_millis(2));
    assert!(stats.min <= stats.average && stats.average <= stats.max);
}

#[test]
fn retargeting_while_running_takes_effect() {
    let scheduler = Scheduler::with_callbacks(30, |_| Ok(()), || Ok(()));
    scheduler.start().unwrap();
    thread::sleep(Duration::from_millis(1200));
    let before = scheduler.current_fps();

    scheduler.set_target_fps(120);
    assert!(scheduler.is_running());
    // Skip the window that straddles the change.
    thread::sleep(Duration::from_millis(2100));
    let after = scheduler.current_fps();
    scheduler.stop();

    assert!((20..=32).contains(&before), "measured {before} fps for a 30 fps target");
    assert!(after >= 80, "measured {after} fps after retargeting to 120");
}

#[test]
fn overrunning_frames_yield_without_sleeping() {
    let samples = Arc::new(Mutex::new(Vec::new()));
    let s = Arc::clone(&samples);
    // 10 ms budget, 30 ms of work.
    let scheduler = Scheduler::new(100);
    scheduler.set_update(move |dt| {
        s.lock().unwrap().push(dt);
        thread::sleep(Duration::from_millis(30));
        Ok(())
    });

    scheduler.start().unwrap();
    thread::sleep(Duration::from_millis(1300));
    let fps = scheduler.current_fps();
    scheduler.stop();

    assert!(fps > 0 && fps <= 34, "measured {fps} fps with 30 ms frames");
    assert!(scheduler.frame_stats().min >= Duration::from_millis(30));

    let mut dts: Vec<f64> = samples.lock().unwrap()[1..].to_vec();
    assert!(dts.len() >= 10);
    for &dt in &dts {
        assert!(dt >= 0.030, "dt {dt} shorter than the work");
    }
    // A sleep on top of the overrun would push dt past 40 ms.
    dts.sort_by(f64::total_cmp);
    let median = dts[dts.len() / 2];
    assert!(median < 0.038, "median dt {median} includes a sleep");
}
