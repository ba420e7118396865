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

//! # spantrace
//!
//! Scope tracer that records named, timed spans and writes them as a
//! Chrome Trace Event Format array, ready for `chrome://tracing` or
//! <https://ui.perfetto.dev>.
//!
//! ## Recording a session
//!
//! ```rust
//! use spantrace::Profiler;
//!
//! # let dir = tempfile::TempDir::new()?;
//! # let path = dir.path().join("out.json");
//! let profiler = Profiler::new();
//! profiler.start_session("demo", &path)?;
//!
//! {
//!     let _timer = profiler.timer_with_category("load", "io");
//!     // work...
//! }
//!
//! let mut timer = profiler.timer("parse");
//! // work...
//! timer.stop();
//!
//! profiler.end_session()?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! Every span becomes one complete event:
//!
//! ```json
//! {"name":"load","cat":"io","ph":"X","ts":1200,"dur":85,"pid":0,"tid":4242}
//! ```
//!
//! ## Sessions
//!
//! A [`Profiler`] holds at most one session. The output file is opened when
//! the session starts and written in one go when it ends. Starting a second
//! session either ends the first one or fails, depending on
//! [`SessionPolicy`].
//!
//! ## Threads
//!
//! `Profiler` is `Send + Sync` and clones share one session, so spans from
//! any thread land in the same trace tagged with their thread id.
//!
//! ## Disabling
//!
//! Building without the default `enabled` feature swaps [`Profiler`] and
//! [`Timer`] for zero-sized types with the same API that do nothing.

mod clock;
mod config;
mod error;
mod macros;
mod session;
mod span;

#[cfg(feature = "enabled")]
mod profiler;
#[cfg(feature = "enabled")]
mod thread;
#[cfg(feature = "enabled")]
mod timer;

#[cfg(not(feature = "enabled"))]
mod noop;

pub use clock::{Clock, ManualClock, MonotonicClock};
pub use config::{ProfilerConfig, SessionPolicy, DEFAULT_CATEGORY, DEFAULT_OUTPUT_PATH};
pub use error::{ProfilerError, Result};
#[doc(hidden)]
pub use macros::__trim_function_name;
pub use session::SessionReport;
pub use span::ProfileSpan;

#[cfg(feature = "enabled")]
pub use profiler::{Profiler, ProfilerBuilder};
#[cfg(feature = "enabled")]
pub use timer::Timer;

#[cfg(not(feature = "enabled"))]
pub use noop::{Profiler, ProfilerBuilder, Timer};
