//! Labelled start/end timing printed as plain text lines.
//!
//! A measurement is a pair of calls: [`begin`] prints the start timestamp and
//! returns it, [`finish`] takes that value back, prints the end timestamp and
//! the elapsed milliseconds. Nothing is stored between the two calls; the
//! caller carries the start value.

use std::io::{self, Stdout, Write};

use tracing::{debug, warn};

use crate::clock::{Clock, ElapsedMillis, SystemClock, Timestamp};
use crate::error::{Result, StopwatchError};

const SEPARATOR: &str = "-------END-------";

/// Stopwatch bound to a clock and an output sink.
pub struct Stopwatch<C = SystemClock, W = Stdout> {
    clock: C,
    writer: W,
}

impl Stopwatch {
    /// Wall clock, standard output.
    pub fn stdout() -> Self {
        Self::new(SystemClock, io::stdout())
    }
}

impl<C: Clock, W: Write> Stopwatch<C, W> {
    pub const fn new(clock: C, writer: W) -> Self {
        Self { clock, writer }
    }

    /// Read the clock and print `Start (<title>): <timestamp>`.
    pub fn try_begin(&mut self, title: &str) -> Result<Timestamp> {
        let start = self.clock.now();
        self.emit_start(title, start)?;
        Ok(start)
    }

    /// Read the clock, print the end timestamp, the elapsed time and the separator.
    ///
    /// `start` is not validated: a value later than the current reading
    /// prints as a negative duration.
    pub fn try_finish(&mut self, start: Timestamp) -> Result<ElapsedMillis> {
        let end = self.clock.now();
        let elapsed = end - start;
        self.emit_finish(start, end, elapsed)?;
        Ok(elapsed)
    }

    /// Infallible [`Self::try_begin`]. Write failures are logged and the
    /// timestamp is returned regardless.
    pub fn begin(&mut self, title: &str) -> Timestamp {
        let start = self.clock.now();
        if let Err(err) = self.emit_start(title, start) {
            warn!(error = %err, "stopwatch output lost");
        }
        start
    }

    /// Infallible [`Self::try_finish`]. Write failures are logged and the
    /// elapsed time is still returned.
    pub fn finish(&mut self, start: Timestamp) -> ElapsedMillis {
        let end = self.clock.now();
        let elapsed = end - start;
        if let Err(err) = self.emit_finish(start, end, elapsed) {
            warn!(error = %err, "stopwatch output lost");
        }
        elapsed
    }

    /// Run `f` between a [`Self::begin`] and a [`Self::finish`] and return its output.
    pub fn measure<T, F>(&mut self, title: &str, f: F) -> T
    where
        F: FnOnce() -> T,
    {
        let start = self.begin(title);
        let output = f();
        self.finish(start);
        output
    }

    pub const fn clock(&self) -> &C {
        &self.clock
    }

    pub fn into_inner(self) -> W {
        self.writer
    }

    fn emit_start(&mut self, title: &str, start: Timestamp) -> Result<()> {
        debug!(title, start = start.as_millis(), "stopwatch started");

        writeln!(self.writer, "Start ({title}): {start}")
            .map_err(|err| StopwatchError::write("start", err))?;
        self.flush()
    }

    fn emit_finish(&mut self, start: Timestamp, end: Timestamp, elapsed: ElapsedMillis) -> Result<()> {
        if elapsed.is_negative() {
            warn!(
                start = start.as_millis(),
                end = end.as_millis(),
                "start timestamp is later than the end timestamp"
            );
        }
        debug!(
            start = start.as_millis(),
            end = end.as_millis(),
            elapsed_ms = elapsed.as_millis(),
            "stopwatch finished"
        );

        writeln!(self.writer, "End: {end}").map_err(|err| StopwatchError::write("end", err))?;
        writeln!(self.writer, "Elapsed time in milliseconds: {elapsed}")
            .map_err(|err| StopwatchError::write("elapsed", err))?;
        writeln!(self.writer, "{SEPARATOR}")
            .and_then(|()| writeln!(self.writer))
            .map_err(|err| StopwatchError::write("separator", err))?;
        self.flush()
    }

    fn flush(&mut self) -> Result<()> {
        self.writer
            .flush()
            .map_err(|err| StopwatchError::write("flush", err))
    }
}

/// Print `Start (<title>): <timestamp>` to stdout and return the timestamp.
pub fn begin(title: &str) -> Timestamp {
    Stopwatch::stdout().begin(title)
}

/// Print the end timestamp and the milliseconds elapsed since `start` to stdout.
pub fn finish(start: Timestamp) {
    Stopwatch::stdout().finish(start);
}

/// Time `f` with a [`begin`]/[`finish`] pair on stdout.
pub fn measure<T, F>(title: &str, f: F) -> T
where
    F: FnOnce() -> T,
{
    Stopwatch::stdout().measure(title, f)
}
