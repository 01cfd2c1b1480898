//! Progress reporting between the engine and whatever front-end drives it.
//!
//! The engine only ever calls a sink from the aggregating thread, never from
//! workers.

use std::io::{Write, stderr};

use crossterm::{
    cursor::MoveToColumn,
    queue,
    style::Print,
    terminal::{Clear, ClearType},
};

/// Receiver for status text and percentage updates.
pub trait ProgressSink {
    fn set_status(&mut self, message: &str);
    fn update_progress(&mut self, percent: u8);
}

/// Discards every update.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoProgress;

impl ProgressSink for NoProgress {
    fn set_status(&mut self, _message: &str) {}
    fn update_progress(&mut self, _percent: u8) {}
}

/// Forwards updates to `tracing`, logging each distinct percentage once.
#[derive(Debug, Default)]
pub struct TracingProgress {
    last: Option<u8>,
}

impl ProgressSink for TracingProgress {
    fn set_status(&mut self, message: &str) {
        tracing::info!(status = message, "progress");
    }

    fn update_progress(&mut self, percent: u8) {
        if self.last != Some(percent) {
            self.last = Some(percent);
            tracing::debug!(percent, "progress");
        }
    }
}

/// Single-line status and percentage bar redrawn in place on stderr.
#[derive(Debug)]
pub struct TerminalProgress {
    status: String,
    last: Option<u8>,
    bar_width: usize,
}

impl Default for TerminalProgress {
    fn default() -> Self {
        Self {
            status: String::new(),
            last: None,
            bar_width: 40,
        }
    }
}

impl TerminalProgress {
    fn redraw(&self, percent: Option<u8>) {
        let line = match percent {
            Some(p) => format!("{} {}", self.status, render_bar(p, self.bar_width)),
            None => self.status.clone(),
        };
        let mut err = stderr();
        // Write errors are ignored: stderr may be closed.
        let _ = queue!(err, MoveToColumn(0), Clear(ClearType::CurrentLine), Print(line));
        let _ = err.flush();
    }

    /// Move past the progress line so later output starts on a fresh line.
    pub fn finish(&mut self) {
        let mut err = stderr();
        let _ = writeln!(err);
    }
}

impl ProgressSink for TerminalProgress {
    fn set_status(&mut self, message: &str) {
        self.status = message.to_string();
        self.last = None;
        self.redraw(None);
    }

    fn update_progress(&mut self, percent: u8) {
        if self.last != Some(percent) {
            self.last = Some(percent);
            self.redraw(Some(percent));
        }
    }
}

/// `[#####.....]  50%` style bar.
pub fn render_bar(percent: u8, width: usize) -> String {
    let percent = percent.min(100);
    let filled = width * percent as usize / 100;
    format!(
        "[{}{}] {:>3}%",
        "#".repeat(filled),
        ".".repeat(width - filled),
        percent
    )
}

/// Records every call; handy for asserting on reporting order.
#[derive(Debug, Default, Clone)]
pub struct RecordingProgress {
    pub statuses: Vec<String>,
    pub percents: Vec<u8>,
}

impl ProgressSink for RecordingProgress {
    fn set_status(&mut self, message: &str) {
        self.statuses.push(message.to_string());
    }

    fn update_progress(&mut self, percent: u8) {
        self.percents.push(percent);
    }
}
