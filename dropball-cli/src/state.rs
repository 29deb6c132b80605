use std::collections::VecDeque;

use dropball_web::physics::BodyState;
use dropball_web::TickReport;

// ─── Event Log ───────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub struct LogLine {
    /// Total ticks when the line was written.
    pub tick: u64,
    pub text: String,
}

pub struct LogBuffer {
    pub lines: Vec<LogLine>,
    max_lines: usize,
}

impl LogBuffer {
    pub fn new(max_lines: usize) -> Self {
        Self {
            lines: Vec::new(),
            max_lines,
        }
    }

    pub fn push(&mut self, tick: u64, text: String) {
        if self.lines.len() >= self.max_lines {
            self.lines.remove(0);
        }
        self.lines.push(LogLine { tick, text });
    }

    /// The newest `n` lines, oldest first.
    pub fn tail(&self, n: usize) -> &[LogLine] {
        &self.lines[self.lines.len().saturating_sub(n)..]
    }

    pub fn clear(&mut self) {
        self.lines.clear();
    }
}

// ─── Height History ──────────────────────────────────────────────────

/// Fixed-size window of the sphere's recent heights.
pub struct HeightHistory {
    samples: VecDeque<f32>,
    capacity: usize,
}

impl HeightHistory {
    pub fn new(capacity: usize) -> Self {
        Self {
            samples: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    pub fn push(&mut self, height: f32) {
        if self.samples.len() >= self.capacity {
            self.samples.pop_front();
        }
        self.samples.push_back(height);
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn max(&self) -> f32 {
        self.samples.iter().copied().fold(0.0, f32::max)
    }

    /// Heights in centimetres above zero, for sparkline widgets.
    pub fn sparkline_data(&self) -> Vec<u64> {
        self.samples
            .iter()
            .map(|h| (h.max(0.0) * 100.0).round() as u64)
            .collect()
    }
}

// ─── Watch State ─────────────────────────────────────────────────────

pub struct WatchState {
    pub config_label: String,
    pub ticks: u64,
    pub resets: u64,
    pub last_report: Option<TickReport>,
    pub sphere: Option<BodyState>,
    pub heights: HeightHistory,
    pub log: LogBuffer,
    pub paused: bool,
    pub should_quit: bool,
}

impl WatchState {
    pub fn new(config_label: String) -> Self {
        Self {
            config_label,
            ticks: 0,
            resets: 0,
            last_report: None,
            sphere: None,
            heights: HeightHistory::new(240),
            log: LogBuffer::new(500),
            paused: false,
            should_quit: false,
        }
    }

    /// Fold one tick's outcome into the view state.
    pub fn record(&mut self, report: TickReport, sphere: Option<BodyState>) {
        self.ticks += 1;
        if report.reset {
            self.resets += 1;
            self.log.push(self.ticks, format!("sphere reset (#{})", self.resets));
        }
        if let Some(state) = &sphere {
            self.heights.push(state.position.y);
        }
        self.last_report = Some(report);
        self.sphere = sphere;
    }

    pub fn toggle_pause(&mut self) {
        self.paused = !self.paused;
        let text = if self.paused { "paused" } else { "resumed" };
        self.log.push(self.ticks, text.to_string());
    }
}
