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

use chrome_trace_format::{read_array, TraceEvent};
use std::collections::HashMap;
use std::fmt;
use std::io::Read;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpanStats {
    pub name: String,
    pub count: u64,
    pub total_micros: u64,
    pub max_micros: u64,
}

impl SpanStats {
    pub fn mean_micros(&self) -> u64 {
        self.total_micros / self.count.max(1)
    }
}

#[derive(Debug, Default)]
pub struct Summary {
    /// Sorted by total duration, largest first.
    pub spans: Vec<SpanStats>,
    pub complete_events: usize,
    pub other_events: usize,
}

impl Summary {
    pub fn from_reader<R: Read>(reader: R) -> eyre::Result<Self> {
        let events = read_array(reader)?;
        Ok(Self::from_events(&events))
    }

    pub fn from_events(events: &[TraceEvent]) -> Self {
        let mut by_name: HashMap<&str, SpanStats> = HashMap::new();
        let mut summary = Summary::default();

        for event in events {
            let Some(event) = event.as_complete() else {
                summary.other_events += 1;
                continue;
            };
            summary.complete_events += 1;
            let stats = by_name
                .entry(event.name.as_str())
                .or_insert_with(|| SpanStats {
                    name: event.name.clone(),
                    count: 0,
                    total_micros: 0,
                    max_micros: 0,
                });
            stats.count = stats.count.saturating_add(1);
            stats.total_micros = stats.total_micros.saturating_add(event.dur);
            stats.max_micros = stats.max_micros.max(event.dur);
        }

        summary.spans = by_name.into_values().collect();
        summary.spans.sort_by(|a, b| {
            b.total_micros
                .cmp(&a.total_micros)
                .then_with(|| a.name.cmp(&b.name))
        });
        summary
    }

    pub fn truncate(&mut self, top: usize) {
        self.spans.truncate(top);
    }
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "{:<40} {:>8} {:>12} {:>10} {:>10}",
            "name", "count", "total(us)", "mean(us)", "max(us)"
        )?;
        for stats in &self.spans {
            writeln!(
                f,
                "{:<40} {:>8} {:>12} {:>10} {:>10}",
                stats.name,
                stats.count,
                stats.total_micros,
                stats.mean_micros(),
                stats.max_micros
            )?;
        }
        write!(
            f,
            "{} complete events, {} other events",
            self.complete_events, self.other_events
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::*;

    #[fixture]
    fn trace() -> String {
        serde_json::json!([
            {"name": "a", "cat": "x", "ph": "X", "ts": 0, "dur": 100, "pid": 0, "tid": 1},
            {"name": "b", "cat": "y", "ph": "X", "ts": 100, "dur": 150, "pid": 0, "tid": 1},
            {"name": "a", "cat": "x", "ph": "X", "ts": 250, "dur": 10, "pid": 0, "tid": 2},
            {"name": "thread_name", "ph": "M", "pid": 0, "tid": 1, "args": {"name": "main"}}
        ])
        .to_string()
    }

    #[rstest]
    fn test_aggregates_by_name(trace: String) {
        let summary = Summary::from_reader(trace.as_bytes()).unwrap();
        assert_eq!(summary.complete_events, 3);
        assert_eq!(summary.other_events, 1);
        assert_eq!(
            summary.spans,
            vec![
                SpanStats {
                    name: "b".to_string(),
                    count: 1,
                    total_micros: 150,
                    max_micros: 150,
                },
                SpanStats {
                    name: "a".to_string(),
                    count: 2,
                    total_micros: 110,
                    max_micros: 100,
                },
            ]
        );
        assert_eq!(summary.spans[1].mean_micros(), 55);
    }

    #[rstest]
    fn test_truncate(trace: String) {
        let mut summary = Summary::from_reader(trace.as_bytes()).unwrap();
        summary.truncate(1);
        assert_eq!(summary.spans.len(), 1);
        assert_eq!(summary.spans[0].name, "b");
    }

    #[rstest]
    fn test_total_saturates_on_huge_durations() {
        let trace = serde_json::json!([
            {"name": "a", "ph": "X", "ts": 0, "dur": u64::MAX, "pid": 0, "tid": 1},
            {"name": "a", "ph": "X", "ts": 0, "dur": 1, "pid": 0, "tid": 1}
        ])
        .to_string();
        let summary = Summary::from_reader(trace.as_bytes()).unwrap();
        assert_eq!(summary.spans[0].count, 2);
        assert_eq!(summary.spans[0].total_micros, u64::MAX);
        assert_eq!(summary.spans[0].max_micros, u64::MAX);
    }

    #[rstest]
    fn test_empty_trace() {
        let summary = Summary::from_reader("[]".as_bytes()).unwrap();
        assert!(summary.spans.is_empty());
        assert!(summary.to_string().ends_with("0 complete events, 0 other events"));
    }

    #[rstest]
    fn test_not_an_array() {
        assert!(Summary::from_reader(r#"{"traceEvents": []}"#.as_bytes()).is_err());
    }
}
