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

use std::path::PathBuf;

/// What an ended session wrote.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionReport {
    pub name: String,
    pub output_path: PathBuf,
    pub spans: usize,
}

#[cfg(feature = "enabled")]
pub(crate) use active::Session;

#[cfg(feature = "enabled")]
mod active {
    use chrome_trace_format::{write_array, CompleteEvent};
    use std::fs::File;
    use std::io::{BufWriter, Write};
    use std::path::PathBuf;
    use tracing::debug;

    use super::SessionReport;
    use crate::{ProfileSpan, ProfilerError, Result};

    pub(crate) struct Session {
        name: String,
        output_path: PathBuf,
        writer: BufWriter<File>,
        spans: Vec<ProfileSpan>,
    }

    impl Session {
        /// Creates or truncates the output file right away.
        pub(crate) fn open(name: String, output_path: PathBuf) -> Result<Self> {
            let file = File::create(&output_path).map_err(|source| {
                ProfilerError::OutputUnwritable {
                    path: output_path.clone(),
                    source,
                }
            })?;
            debug!(session = %name, path = %output_path.display(), "session started");
            Ok(Self {
                name,
                output_path,
                writer: BufWriter::new(file),
                spans: Vec::with_capacity(1024),
            })
        }

        pub(crate) fn name(&self) -> &str {
            &self.name
        }

        pub(crate) fn push(&mut self, span: ProfileSpan) {
            self.spans.push(span);
        }

        /// Writes every buffered span as one JSON array and closes the file.
        pub(crate) fn finish(mut self, pid: u32) -> Result<SessionReport> {
            let events: Vec<CompleteEvent> =
                self.spans.iter().map(|span| span.to_event(pid)).collect();
            write_array(&mut self.writer, &events)?;
            self.writer.flush()?;

            debug!(
                session = %self.name,
                path = %self.output_path.display(),
                spans = events.len(),
                "session ended"
            );
            Ok(SessionReport {
                name: self.name,
                output_path: self.output_path,
                spans: events.len(),
            })
        }
    }
}
