// Copyright (C) 2025 Category Labs, Inc.
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with this program.  If not, see <http://www.gnu.org/licenses/>.

#![cfg(feature = "enabled")]

use chrome_trace_format::{read_array, CompleteEvent, Phase};
use rstest::{fixture, rstest};
use spantrace::{profile_function, profile_scope, ManualClock, Profiler};
use std::collections::HashSet;
use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tempfile::TempDir;

struct TestSetup {
    _temp_dir: TempDir,
    output_path: PathBuf,
}

#[fixture]
fn setup() -> TestSetup {
    let temp_dir = TempDir::new().expect("failed to create temp dir");
    let output_path = temp_dir.path().join("out.json");
    TestSetup {
        _temp_dir: temp_dir,
        output_path,
    }
}

fn read_events(path: &Path) -> Vec<CompleteEvent> {
    let file = File::open(path).expect("failed to open trace");
    read_array(file)
        .expect("failed to parse trace")
        .into_iter()
        .filter_map(|event| event.as_complete().cloned())
        .collect()
}

#[cfg(target_os = "linux")]
fn current_tid() -> u32 {
    unsafe { libc::syscall(libc::SYS_gettid) as u32 }
}

#[rstest]
fn test_demo_session(setup: TestSetup) {
    let clock = Arc::new(ManualClock::new(0));
    let profiler = Profiler::builder().clock(clock.clone()).build();
    profiler.start_session("demo", &setup.output_path).unwrap();

    for (name, category, start, end) in [
        ("a", "x", 0, 100),
        ("b", "y", 100, 250),
        ("c", "x", 250, 260),
    ] {
        clock.set(start);
        let mut timer = profiler.timer_with_category(name, category);
        clock.set(end);
        timer.stop();
    }

    let report = profiler.end_session().unwrap().unwrap();
    assert_eq!(report.name, "demo");
    assert_eq!(report.spans, 3);

    let raw: serde_json::Value =
        serde_json::from_reader(File::open(&setup.output_path).unwrap()).unwrap();
    let events = raw.as_array().expect("trace must be a bare array");
    assert_eq!(events.len(), 3);

    let expected = [("a", "x", 0, 100), ("b", "y", 100, 150), ("c", "x", 250, 10)];
    let tid = events[0]["tid"].as_u64().unwrap();
    for (event, (name, cat, ts, dur)) in events.iter().zip(expected) {
        assert_eq!(event["name"], name);
        assert_eq!(event["cat"], cat);
        assert_eq!(event["ph"], "X");
        assert_eq!(event["ts"], ts);
        assert_eq!(event["dur"], dur);
        assert_eq!(event["pid"], 0);
        assert_eq!(event["tid"].as_u64().unwrap(), tid);
    }

    #[cfg(target_os = "linux")]
    assert_eq!(tid, current_tid() as u64);
}

#[rstest]
fn test_monotonic_clock_durations(setup: TestSetup) {
    let profiler = Profiler::new();
    profiler.start_session("real", &setup.output_path).unwrap();
    {
        let _outer = profiler.timer("outer");
        let _inner = profiler.timer("inner");
        std::thread::sleep(std::time::Duration::from_millis(2));
    }
    profiler.end_session().unwrap();

    let events = read_events(&setup.output_path);
    assert_eq!(events.len(), 2);
    assert_eq!(events[0].name, "inner");
    assert_eq!(events[1].name, "outer");
    for event in &events {
        assert_eq!(event.ph, Phase::Complete);
        assert!(event.dur >= 2_000, "dur = {}", event.dur);
    }
    assert!(events[1].ts <= events[0].ts);
    assert!(events[1].end() >= events[0].end());
}

#[rstest]
fn test_spans_from_many_threads(setup: TestSetup) {
    const THREADS: usize = 4;
    const SPANS_PER_THREAD: usize = 50;

    let profiler = Profiler::new();
    profiler.start_session("threads", &setup.output_path).unwrap();

    std::thread::scope(|s| {
        for worker in 0..THREADS {
            let profiler = profiler.clone();
            s.spawn(move || {
                for i in 0..SPANS_PER_THREAD {
                    let _timer =
                        profiler.timer_with_category(format!("worker{worker}-{i}"), "worker");
                }
            });
        }
    });

    let report = profiler.end_session().unwrap().unwrap();
    assert_eq!(report.spans, THREADS * SPANS_PER_THREAD);

    let events = read_events(&setup.output_path);
    let names: HashSet<_> = events.iter().map(|event| event.name.clone()).collect();
    assert_eq!(names.len(), THREADS * SPANS_PER_THREAD);
    let tids: HashSet<_> = events.iter().map(|event| event.tid).collect();
    assert_eq!(tids.len(), THREADS);
}

fn instrumented(profiler: &Profiler) {
    profile_function!(profiler, "api");
    profile_scope!(profiler, "body");
}

#[rstest]
fn test_macros(setup: TestSetup) {
    let profiler = Profiler::new();
    profiler.start_session("macros", &setup.output_path).unwrap();
    instrumented(&profiler);
    profiler.end_session().unwrap();

    let events = read_events(&setup.output_path);
    assert_eq!(events.len(), 2);
    assert_eq!(events[0].name, "body");
    assert_eq!(events[0].cat.as_deref(), Some("function"));
    assert!(events[1].name.ends_with("::instrumented"), "{}", events[1].name);
    assert_eq!(events[1].cat.as_deref(), Some("api"));
}

#[rstest]
fn test_timer_spanning_sessions_lands_in_later_one(setup: TestSetup) {
    let second_path = setup.output_path.with_file_name("second.json");
    let profiler = Profiler::new();
    profiler.start_session("first", &setup.output_path).unwrap();
    let timer = profiler.timer("long");
    profiler.start_session("second", &second_path).unwrap();
    drop(timer);
    profiler.end_session().unwrap();

    assert!(read_events(&setup.output_path).is_empty());
    assert_eq!(read_events(&second_path).len(), 1);
}
