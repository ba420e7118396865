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

//! # Chrome Trace Format
//!
//! Serde types for the subset of the Chrome Trace Event Format that scope
//! tracers emit: complete events (`"ph": "X"`) laid out in the
//! **JSON Array Format**, a bare array of events with no enclosing object.
//!
//! Files in this shape load directly in `chrome://tracing` and
//! <https://ui.perfetto.dev>.
//!
//! ## Timestamps
//!
//! All timestamps and durations are in microseconds.
//!
//! ## Writing
//!
//! ```rust
//! use chrome_trace_format::{write_array, CompleteEvent};
//!
//! let event = CompleteEvent::builder()
//!     .name("load_assets")
//!     .cat("io".to_string())
//!     .ts(1_000)
//!     .dur(250)
//!     .pid(0)
//!     .tid(7)
//!     .build();
//!
//! let mut out = Vec::new();
//! write_array(&mut out, &[event])?;
//! assert!(out.starts_with(b"[{"));
//! # Ok::<(), serde_json::Error>(())
//! ```
//!
//! ## Reading
//!
//! [`read_array`] accepts arrays produced by other tools as well. Events
//! that are not complete events are kept as raw JSON in [`TraceEvent::Other`].

use bon::Builder;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::io::{Read, Write};

/// Event phase. Only the complete phase is modelled as a typed value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    /// Complete event that combines begin and end with a duration.
    #[serde(rename = "X")]
    Complete,
}

/// Complete event combining begin and end with a duration.
///
/// Complete events are more efficient than separate B/E events when the duration
/// is known. They reduce trace size by about half compared to duration events.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Builder)]
pub struct CompleteEvent {
    /// Display name of the event in the trace viewer.
    #[builder(into)]
    pub name: String,
    /// Comma-separated list of categories for filtering in the trace viewer.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cat: Option<String>,
    /// Event phase, always Complete (X).
    #[builder(default = Phase::Complete)]
    pub ph: Phase,
    /// Start timestamp in microseconds.
    pub ts: u64,
    /// Duration in microseconds.
    pub dur: u64,
    /// Process ID.
    ///
    /// Used to group events by process in the trace viewer.
    pub pid: u32,
    /// Thread ID.
    ///
    /// Events are grouped by thread within each process in the trace viewer.
    pub tid: u32,
    /// Custom arguments displayed in the trace viewer.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub args: Option<Value>,
}

impl CompleteEvent {
    /// End timestamp in microseconds.
    pub fn end(&self) -> u64 {
        self.ts.saturating_add(self.dur)
    }
}

/// One element of a trace array as read back from disk.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TraceEvent {
    Complete(CompleteEvent),
    /// Any other event kind, left uninterpreted.
    Other(Value),
}

impl TraceEvent {
    pub fn as_complete(&self) -> Option<&CompleteEvent> {
        match self {
            TraceEvent::Complete(event) => Some(event),
            TraceEvent::Other(_) => None,
        }
    }
}

/// Serializes `events` as a JSON array into `writer`.
///
/// The writer is not flushed.
pub fn write_array<W: Write>(writer: W, events: &[CompleteEvent]) -> serde_json::Result<()> {
    serde_json::to_writer(writer, events)
}

/// Parses a JSON array trace from `reader`.
pub fn read_array<R: Read>(reader: R) -> serde_json::Result<Vec<TraceEvent>> {
    serde_json::from_reader(reader)
}
