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

//! Records nested scopes on a few threads and writes them as a Chrome trace.
//!
//! Usage: nested_scopes <output_file>

use spantrace::{profile_function, profile_scope, Profiler};
use std::env;
use std::thread;
use std::time::Duration;

fn step(profiler: &Profiler, depth: u32) {
    profile_function!(profiler, "step");
    thread::sleep(Duration::from_millis(1));
    if depth > 0 {
        profile_scope!(profiler, format!("depth {depth}"), "recursion");
        step(profiler, depth - 1);
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = env::args().collect();
    let output_file = if args.len() > 1 {
        &args[1]
    } else {
        eprintln!("Usage: {} <output_file>", args[0]);
        std::process::exit(1);
    };

    let profiler = Profiler::new();
    profiler.start_session("nested_scopes", output_file)?;

    thread::scope(|s| {
        for _ in 0..3 {
            s.spawn(|| step(&profiler, 4));
        }
    });

    if let Some(report) = profiler.end_session()? {
        println!("wrote {} spans to {}", report.spans, report.output_path.display());
    }
    Ok(())
}
