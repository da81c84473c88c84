//! Destinations for the animation event stream.

use crate::event::AnimationEvent;
use std::io::{self, BufWriter, Write};
use tracing::{debug, instrument};

/// Receives animation events in order.
pub trait AnimationSink {
    /// Records one event.
    fn emit(&mut self, event: &AnimationEvent) -> io::Result<()>;

    /// Flushes whatever is buffered; called once after the last event.
    fn finish(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl<S: AnimationSink + ?Sized> AnimationSink for &mut S {
    fn emit(&mut self, event: &AnimationEvent) -> io::Result<()> {
        (**self).emit(event)
    }

    fn finish(&mut self) -> io::Result<()> {
        (**self).finish()
    }
}

/// In-memory recorder.
impl AnimationSink for Vec<AnimationEvent> {
    fn emit(&mut self, event: &AnimationEvent) -> io::Result<()> {
        self.push(event.clone());
        Ok(())
    }
}

/// Writes the line-oriented animation script.
#[derive(Debug)]
pub struct ScriptWriter<W: Write> {
    out: BufWriter<W>,
    lines: usize,
}

impl<W: Write> ScriptWriter<W> {
    /// Wraps `out` in a buffered script writer.
    pub fn new(out: W) -> Self {
        Self {
            out: BufWriter::new(out),
            lines: 0,
        }
    }

    /// Lines written so far.
    pub fn lines(&self) -> usize {
        self.lines
    }

    /// Flushes and returns the underlying writer.
    pub fn into_inner(self) -> io::Result<W> {
        self.out.into_inner().map_err(|e| e.into_error())
    }
}

impl<W: Write> AnimationSink for ScriptWriter<W> {
    fn emit(&mut self, event: &AnimationEvent) -> io::Result<()> {
        writeln!(self.out, "{}", event)?;
        self.lines += 1;
        Ok(())
    }

    #[instrument(skip(self), fields(lines = self.lines))]
    fn finish(&mut self) -> io::Result<()> {
        debug!("Flushing animation script");
        self.out.flush()
    }
}

/// Writes one JSON object per event.
#[derive(Debug)]
pub struct JsonLinesWriter<W: Write> {
    out: BufWriter<W>,
}

impl<W: Write> JsonLinesWriter<W> {
    /// Wraps `out` in a buffered JSON-lines writer.
    pub fn new(out: W) -> Self {
        Self {
            out: BufWriter::new(out),
        }
    }

    /// Flushes and returns the underlying writer.
    pub fn into_inner(self) -> io::Result<W> {
        self.out.into_inner().map_err(|e| e.into_error())
    }
}

impl<W: Write> AnimationSink for JsonLinesWriter<W> {
    fn emit(&mut self, event: &AnimationEvent) -> io::Result<()> {
        serde_json::to_writer(&mut self.out, event)?;
        self.out.write_all(b"\n")
    }

    fn finish(&mut self) -> io::Result<()> {
        self.out.flush()
    }
}

/// Sends every event to two sinks.
#[derive(Debug)]
pub struct Tee<A, B> {
    first: A,
    second: B,
}

impl<A, B> Tee<A, B> {
    /// Pairs two sinks; `first` always sees an event before `second`.
    pub fn new(first: A, second: B) -> Self {
        Self { first, second }
    }

    /// Splits the pair back apart.
    pub fn into_parts(self) -> (A, B) {
        (self.first, self.second)
    }
}

impl<A: AnimationSink, B: AnimationSink> AnimationSink for Tee<A, B> {
    fn emit(&mut self, event: &AnimationEvent) -> io::Result<()> {
        self.first.emit(event)?;
        self.second.emit(event)
    }

    fn finish(&mut self) -> io::Result<()> {
        self.first.finish()?;
        self.second.finish()
    }
}
