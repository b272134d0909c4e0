// SPDX-License-Identifier: MIT
// Copyright (c) 2026 ADNT Sarl <info@adnt.io>

//! Line sources for the firmware console.

use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};

/// Serial read timeout; bounds how long the spinner goes without a tick.
const READ_TIMEOUT: Duration = Duration::from_millis(200);

/// Outcome of one read attempt.
#[derive(Debug, PartialEq, Eq)]
pub enum Read {
    Line(String),
    /// Nothing complete yet; try again.
    Idle,
    Eof,
}

/// Console text coming from a serial port, stdin or a captured log.
pub struct Source {
    reader: Box<dyn BufRead>,
    pending: Vec<u8>,
    name: String,
}

impl Source {
    /// Open a serial port.
    pub fn serial(port: &str, baud: u32) -> Result<Self> {
        let port_handle = serialport::new(port, baud)
            .timeout(READ_TIMEOUT)
            .open()
            .with_context(|| format!("Failed to open serial port {}", port))?;

        Ok(Self::from_reader(BufReader::new(port_handle), port))
    }

    /// Read standard input, e.g. piped from `espflash monitor`.
    pub fn stdin() -> Self {
        Self::from_reader(io::stdin().lock(), "stdin")
    }

    /// Read a captured console log.
    pub fn file(path: &Path) -> Result<Self> {
        let file = File::open(path).with_context(|| format!("Failed to read {}", path.display()))?;
        Ok(Self::from_reader(BufReader::new(file), &path.display().to_string()))
    }

    pub fn from_reader(reader: impl BufRead + 'static, name: &str) -> Self {
        Self {
            reader: Box::new(reader),
            pending: Vec::new(),
            name: name.to_string(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Read the next complete line, without its terminator.
    ///
    /// Bytes received before a timeout are kept until the rest of the line
    /// arrives.
    pub fn read(&mut self) -> Result<Read> {
        match self.reader.read_until(b'\n', &mut self.pending) {
            Ok(0) if self.pending.is_empty() => Ok(Read::Eof),
            // A final line may lack its terminator
            Ok(_) => Ok(Read::Line(self.take_line())),
            Err(e) if e.kind() == io::ErrorKind::TimedOut => Ok(Read::Idle),
            Err(e) if e.kind() == io::ErrorKind::Interrupted => Ok(Read::Idle),
            Err(e) => Err(e).with_context(|| format!("Failed to read from {}", self.name)),
        }
    }

    fn take_line(&mut self) -> String {
        let line = String::from_utf8_lossy(&self.pending)
            .trim_end_matches(['\r', '\n'])
            .to_string();
        self.pending.clear();
        line
    }
}
