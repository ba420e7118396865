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

//! Zero-sized stand-ins used when the `enabled` feature is off.
//!
//! Every method has the same signature as its recording counterpart and
//! compiles to nothing: no clock reads, no allocation, no files.

use std::marker::PhantomData;
use std::path::Path;
use std::sync::{Arc, OnceLock};

use crate::clock::Clock;
use crate::config::ProfilerConfig;
use crate::session::SessionReport;
use crate::{ProfileSpan, Result};

#[derive(Debug, Default, Clone, Copy)]
pub struct Profiler;

#[derive(Default)]
pub struct ProfilerBuilder;

impl ProfilerBuilder {
    #[inline(always)]
    pub fn clock(self, _clock: Arc<dyn Clock>) -> Self {
        self
    }

    #[inline(always)]
    pub fn config(self, _config: ProfilerConfig) -> Self {
        self
    }

    #[inline(always)]
    pub fn build(self) -> Profiler {
        Profiler
    }
}

impl Profiler {
    #[inline(always)]
    pub fn new() -> Self {
        Profiler
    }

    #[inline(always)]
    pub fn with_config(_config: ProfilerConfig) -> Self {
        Profiler
    }

    #[inline(always)]
    pub fn builder() -> ProfilerBuilder {
        ProfilerBuilder
    }

    /// Always the default config; a disabled profiler keeps none.
    pub fn config(&self) -> &ProfilerConfig {
        static DEFAULT: OnceLock<ProfilerConfig> = OnceLock::new();
        DEFAULT.get_or_init(ProfilerConfig::default)
    }

    #[inline(always)]
    pub fn start_session(
        &self,
        _name: impl Into<String>,
        _output_path: impl AsRef<Path>,
    ) -> Result<()> {
        Ok(())
    }

    #[inline(always)]
    pub fn start_default_session(&self, _name: impl Into<String>) -> Result<()> {
        Ok(())
    }

    #[inline(always)]
    pub fn end_session(&self) -> Result<Option<SessionReport>> {
        Ok(None)
    }

    #[inline(always)]
    pub fn is_active(&self) -> bool {
        false
    }

    #[inline(always)]
    pub fn session_name(&self) -> Option<String> {
        None
    }

    #[inline(always)]
    pub fn write_profile(&self, _span: ProfileSpan) {}

    #[inline(always)]
    pub fn dropped_spans(&self) -> u64 {
        0
    }

    #[inline(always)]
    pub fn timer(&self, _name: impl Into<String>) -> Timer<'_> {
        Timer(PhantomData)
    }

    #[inline(always)]
    pub fn timer_with_category(
        &self,
        _name: impl Into<String>,
        _category: impl Into<String>,
    ) -> Timer<'_> {
        Timer(PhantomData)
    }
}

#[must_use = "a timer reports when dropped; binding it to `_` ends it immediately"]
pub struct Timer<'p>(PhantomData<&'p Profiler>);

impl Timer<'_> {
    #[inline(always)]
    pub fn stop(&mut self) {}

    #[inline(always)]
    pub fn elapsed_micros(&self) -> u64 {
        0
    }

    /// Always `true`: a disabled timer never has a span pending.
    #[inline(always)]
    pub fn is_finished(&self) -> bool {
        true
    }
}
