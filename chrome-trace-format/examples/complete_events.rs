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

//! Writes a small hand-built trace in the JSON Array Format.
//!
//! Usage: complete_events <output_file>

use chrome_trace_format::*;
use std::env;
use std::fs::File;
use std::io::{BufWriter, Write};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = env::args().collect();
    let output_file = if args.len() > 1 {
        &args[1]
    } else {
        eprintln!("Usage: {} <output_file>", args[0]);
        std::process::exit(1);
    };

    let events = vec![
        CompleteEvent::builder()
            .name("Complete_frame")
            .cat("render".to_string())
            .ts(1_000)
            .dur(16_000)
            .pid(1234)
            .tid(5678)
            .build(),
        CompleteEvent::builder()
            .name("Complete_layout")
            .cat("render".to_string())
            .ts(2_000)
            .dur(4_000)
            .pid(1234)
            .tid(5678)
            .args(serde_json::json!({"nodes": 512}))
            .build(),
        CompleteEvent::builder()
            .name("Complete_decode")
            .cat("io".to_string())
            .ts(3_000)
            .dur(9_000)
            .pid(1234)
            .tid(5679)
            .build(),
    ];

    let mut writer = BufWriter::new(File::create(output_file)?);
    write_array(&mut writer, &events)?;
    writer.flush()?;

    println!("Trace written to: {}", output_file);
    Ok(())
}
