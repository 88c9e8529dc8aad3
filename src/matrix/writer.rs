use std::io::Write;
use log::{debug, trace};

use crate::config::subsystems::matrix::DEFAULT_BUFFER_SIZE;
use crate::error::Result;
use crate::types::PairScore;

/// Buffers matrix rows and writes them to the sink in blocks.
pub struct MatrixWriter<W: Write> {
    sink: W,
    buffer: Vec<PairScore>,
    capacity: usize,
    rows_written: usize,
}

impl<W: Write> MatrixWriter<W> {
    pub fn new(sink: W) -> Self {
        Self::with_capacity(sink, DEFAULT_BUFFER_SIZE)
    }

    pub fn with_capacity(sink: W, capacity: usize) -> Self {
        let capacity = capacity.max(1);
        MatrixWriter {
            sink,
            buffer: Vec::with_capacity(capacity),
            capacity,
            rows_written: 0,
        }
    }

    pub fn push(&mut self, pair: PairScore) -> Result<()> {
        self.buffer.push(pair);
        if self.buffer.len() >= self.capacity {
            self.flush()?;
        }
        Ok(())
    }

    pub fn flush(&mut self) -> Result<()> {
        if self.buffer.is_empty() {
            return Ok(());
        }

        let mut block = String::with_capacity(self.buffer.len() * 24);
        for pair in &self.buffer {
            block.push_str(&pair.to_row());
            block.push('\n');
        }
        self.sink.write_all(block.as_bytes())?;
        self.sink.flush()?;

        self.rows_written += self.buffer.len();
        trace!("Flushed {} matrix rows ({} total)", self.buffer.len(), self.rows_written);
        self.buffer.clear();
        Ok(())
    }

    /// Writes out whatever is still buffered and hands back the sink.
    pub fn finish(mut self) -> Result<W> {
        self.flush()?;
        debug!("Matrix writer finished after {} rows", self.rows_written);
        Ok(self.sink)
    }

    pub fn rows_written(&self) -> usize {
        self.rows_written
    }
}

/// Streams every pair of `pairs` to `sink`; returns the number of rows.
pub fn write_matrix<W, I>(sink: W, pairs: I, buffer_size: usize) -> Result<usize>
where
    W: Write,
    I: IntoIterator<Item = PairScore>,
{
    let mut writer = MatrixWriter::with_capacity(sink, buffer_size);
    for pair in pairs {
        writer.push(pair)?;
    }
    let rows = writer.rows_written() + writer.buffer.len();
    writer.finish()?;
    Ok(rows)
}
