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

use crate::thread::current_thread_id;
use crate::{ProfileSpan, Profiler};

/// Measures one interval and reports it to its [`Profiler`] exactly once.
///
/// The start timestamp is taken on construction. The span is reported on the
/// first call to [`Timer::stop`] or, failing that, when the timer is dropped,
/// so early returns and unwinding panics are still recorded.
#[must_use = "a timer reports when dropped; binding it to `_` ends it immediately"]
pub struct Timer<'p> {
    profiler: &'p Profiler,
    name: String,
    category: String,
    thread_id: u32,
    start_micros: u64,
    finished: bool,
}

impl<'p> Timer<'p> {
    pub(crate) fn new(profiler: &'p Profiler, name: String, category: String) -> Self {
        let start_micros = profiler.now_micros();
        Self {
            profiler,
            name,
            category,
            thread_id: current_thread_id(),
            start_micros,
            finished: false,
        }
    }

    /// Ends the interval and reports the span. Later calls do nothing.
    pub fn stop(&mut self) {
        if self.finished {
            return;
        }
        self.finished = true;

        let end_micros = self.profiler.now_micros();
        let span = ProfileSpan::new(
            std::mem::take(&mut self.name),
            std::mem::take(&mut self.category),
            self.thread_id,
            self.start_micros,
            end_micros,
        );
        self.profiler.write_profile(span);
    }

    pub fn elapsed_micros(&self) -> u64 {
        self.profiler
            .now_micros()
            .saturating_sub(self.start_micros)
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }
}

impl Drop for Timer<'_> {
    fn drop(&mut self) {
        self.stop();
    }
}
