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

use chrome_trace_format::CompleteEvent;

/// One completed, timed interval.
///
/// Name and category are owned so a span can sit in the session buffer
/// for as long as the session runs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileSpan {
    name: String,
    category: String,
    thread_id: u32,
    start_micros: u64,
    end_micros: u64,
}

impl ProfileSpan {
    /// An `end_micros` earlier than `start_micros` is clamped to the start.
    pub fn new(
        name: impl Into<String>,
        category: impl Into<String>,
        thread_id: u32,
        start_micros: u64,
        end_micros: u64,
    ) -> Self {
        Self {
            name: name.into(),
            category: category.into(),
            thread_id,
            start_micros,
            end_micros: end_micros.max(start_micros),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn thread_id(&self) -> u32 {
        self.thread_id
    }

    pub fn start_micros(&self) -> u64 {
        self.start_micros
    }

    pub fn end_micros(&self) -> u64 {
        self.end_micros
    }

    pub fn duration_micros(&self) -> u64 {
        self.end_micros - self.start_micros
    }

    /// Encodes the span as a complete (`"X"`) trace event.
    pub fn to_event(&self, pid: u32) -> CompleteEvent {
        CompleteEvent::builder()
            .name(self.name.as_str())
            .cat(self.category.clone())
            .ts(self.start_micros)
            .dur(self.duration_micros())
            .pid(pid)
            .tid(self.thread_id)
            .build()
    }
}
