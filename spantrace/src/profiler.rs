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

use parking_lot::Mutex;
use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tracing::{trace, warn};

use crate::clock::{Clock, MonotonicClock};
use crate::config::{ProfilerConfig, SessionPolicy};
use crate::session::{Session, SessionReport};
use crate::{ProfileSpan, ProfilerError, Result, Timer};

/// Session store that collects spans and writes them out as a Chrome trace.
///
/// `Profiler` is a cheap handle: clones share the same session. It is
/// `Send + Sync`, so one instance can be handed to every thread that records
/// spans. At most one session is active at a time.
///
/// When the last handle is dropped, an active session is ended and flushed.
#[derive(Clone)]
pub struct Profiler {
    inner: Arc<Inner>,
}

struct Inner {
    clock: Arc<dyn Clock>,
    config: ProfilerConfig,
    session: Mutex<Option<Session>>,
    dropped: AtomicU64,
}

#[derive(Default)]
pub struct ProfilerBuilder {
    clock: Option<Arc<dyn Clock>>,
    config: Option<ProfilerConfig>,
}

impl ProfilerBuilder {
    pub fn clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = Some(clock);
        self
    }

    pub fn config(mut self, config: ProfilerConfig) -> Self {
        self.config = Some(config);
        self
    }

    pub fn build(self) -> Profiler {
        Profiler {
            inner: Arc::new(Inner {
                clock: self.clock.unwrap_or_else(|| Arc::new(MonotonicClock)),
                config: self.config.unwrap_or_default(),
                session: Mutex::new(None),
                dropped: AtomicU64::new(0),
            }),
        }
    }
}

impl Default for Profiler {
    fn default() -> Self {
        Self::new()
    }
}

impl Profiler {
    pub fn new() -> Self {
        Self::builder().build()
    }

    pub fn with_config(config: ProfilerConfig) -> Self {
        Self::builder().config(config).build()
    }

    pub fn builder() -> ProfilerBuilder {
        ProfilerBuilder::default()
    }

    pub fn config(&self) -> &ProfilerConfig {
        &self.inner.config
    }

    /// Starts a session writing to `output_path`.
    ///
    /// The file is created (or truncated) immediately. If a session is
    /// already running, [`SessionPolicy::Replace`] ends and flushes it first,
    /// while [`SessionPolicy::Strict`] returns
    /// [`ProfilerError::SessionAlreadyActive`].
    pub fn start_session(
        &self,
        name: impl Into<String>,
        output_path: impl AsRef<Path>,
    ) -> Result<()> {
        let mut slot = self.inner.session.lock();

        if let Some(current) = slot.as_ref() {
            if self.inner.config.session_policy == SessionPolicy::Strict {
                return Err(ProfilerError::SessionAlreadyActive {
                    name: current.name().to_string(),
                });
            }
        }
        if let Some(previous) = slot.take() {
            previous.finish(self.inner.config.pid)?;
        }

        *slot = Some(Session::open(
            name.into(),
            output_path.as_ref().to_path_buf(),
        )?);
        Ok(())
    }

    /// Starts a session writing to the configured `output_path`.
    pub fn start_default_session(&self, name: impl Into<String>) -> Result<()> {
        let output_path = self.inner.config.output_path.clone();
        self.start_session(name, output_path)
    }

    /// Ends the active session, writing its spans to the output file.
    ///
    /// Returns `Ok(None)` without touching any file when no session is
    /// active. The session is over once this returns, even on error.
    pub fn end_session(&self) -> Result<Option<SessionReport>> {
        let session = self.inner.session.lock().take();
        match session {
            Some(session) => session.finish(self.inner.config.pid).map(Some),
            None => Ok(None),
        }
    }

    pub fn is_active(&self) -> bool {
        self.inner.session.lock().is_some()
    }

    pub fn session_name(&self) -> Option<String> {
        self.inner
            .session
            .lock()
            .as_ref()
            .map(|session| session.name().to_string())
    }

    /// Adds a completed span to the active session.
    ///
    /// Spans reported while no session is active are dropped and counted in
    /// [`Profiler::dropped_spans`].
    pub fn write_profile(&self, span: ProfileSpan) {
        if let Some(session) = self.inner.session.lock().as_mut() {
            session.push(span);
            return;
        }
        self.inner.dropped.fetch_add(1, Ordering::Relaxed);
        trace!(name = span.name(), "span dropped, no active session");
    }

    /// Spans discarded because no session was active when they finished.
    pub fn dropped_spans(&self) -> u64 {
        self.inner.dropped.load(Ordering::Relaxed)
    }

    /// Starts a timer in the configured default category.
    pub fn timer(&self, name: impl Into<String>) -> Timer<'_> {
        let category = self.inner.config.default_category.clone();
        Timer::new(self, name.into(), category)
    }

    pub fn timer_with_category(
        &self,
        name: impl Into<String>,
        category: impl Into<String>,
    ) -> Timer<'_> {
        Timer::new(self, name.into(), category.into())
    }

    pub(crate) fn now_micros(&self) -> u64 {
        self.inner.clock.now_micros()
    }
}

impl Drop for Inner {
    fn drop(&mut self) {
        if let Some(session) = self.session.get_mut().take() {
            if let Err(e) = session.finish(self.config.pid) {
                warn!(error = %e, "failed to flush session on profiler drop");
            }
        }
    }
}
