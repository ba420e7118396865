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

use spantrace::{profile_function, profile_scope, Profiler, SessionReport};
use std::path::Path;
use std::thread;
use std::time::Duration;
use tracing::warn;

/// Runs a small multi-threaded workload under a session written to `output`.
pub fn record_demo(
    profiler: &Profiler,
    output: &Path,
    workers: usize,
    iterations: u32,
) -> spantrace::Result<Option<SessionReport>> {
    profiler.start_session("record", output)?;

    thread::scope(|s| {
        for worker in 0..workers {
            let spawned = thread::Builder::new()
                .name(format!("worker-{worker}"))
                .spawn_scoped(s, || {
                    for _ in 0..iterations {
                        iteration(profiler);
                    }
                });
            if let Err(e) = spawned {
                warn!(error = %e, worker, "failed to spawn worker");
            }
        }
    });

    profiler.end_session()
}

fn iteration(profiler: &Profiler) {
    profile_function!(profiler, "demo");
    {
        profile_scope!(profiler, "prepare", "demo");
        thread::sleep(Duration::from_micros(200));
    }
    {
        profile_scope!(profiler, "compute", "demo");
        let mut acc = 0u64;
        for i in 0..10_000u64 {
            acc = acc.wrapping_mul(31).wrapping_add(i);
        }
        std::hint::black_box(acc);
    }
}
