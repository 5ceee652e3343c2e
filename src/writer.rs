use std::io::{self, Stderr, Stdout, Write};

pub struct ConsoleWriter {
    out: Stdout,
    err: Stderr,
}

impl ConsoleWriter {
    pub fn new() -> Self {
        ConsoleWriter {
            out: io::stdout(),
            err: io::stderr(),
        }
    }
}

impl Default for ConsoleWriter {
    fn default() -> Self {
        Self::new()
    }
}

// Where command output goes; swapped for a buffer in tests
pub trait OutErr {
    fn write_err(&mut self, s: &str);
    fn write(&mut self, s: &str);
}

impl OutErr for ConsoleWriter {
    fn write_err(&mut self, s: &str) {
        if let Err(e) = self.err.write_all(s.as_bytes()) {
            log::error!("unable to write to stderr: {}", e);
        }
    }

    fn write(&mut self, s: &str) {
        if let Err(e) = self.out.write_all(s.as_bytes()) {
            log::error!("unable to write to stdout: {}", e);
        }
    }
}
