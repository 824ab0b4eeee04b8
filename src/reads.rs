// src/reads.rs
//
// Buffered scanner for region read files: whitespace-delimited
// nucleotide tokens, one read per token, no header. Alphabet is not
// validated here; length validation happens at graph ingestion.

use std::io::{self, Read};

const READ_BUF_SIZE: usize = 16384;

pub struct ReadScanner<'a> {
    reader: Box<dyn Read + 'a>,
    buf: Vec<u8>,
    begin: usize,
    end: usize,
    is_eof: bool,
}

#[path = "reads_test.rs"]
mod reads_test;

impl<'a> ReadScanner<'a> {
    pub fn new(reader: Box<dyn Read + 'a>) -> Self {
        ReadScanner {
            reader,
            buf: vec![0; READ_BUF_SIZE],
            begin: 0,
            end: 0,
            is_eof: false,
        }
    }

    fn fill_buf(&mut self) -> io::Result<usize> {
        if self.is_eof {
            return Ok(0);
        }
        self.begin = 0;
        self.end = self.reader.read(&mut self.buf)?;
        if self.end == 0 {
            self.is_eof = true;
        }
        Ok(self.end)
    }

    /// Scan the next whitespace-delimited token into `token`. Returns
    /// false at end of input. Runs of whitespace are skipped, so empty
    /// records never come back.
    pub fn next_read(&mut self, token: &mut Vec<u8>) -> io::Result<bool> {
        token.clear();

        // Skip leading whitespace.
        loop {
            if self.begin >= self.end {
                if self.fill_buf()? == 0 {
                    return Ok(false);
                }
            }
            while self.begin < self.end && self.buf[self.begin].is_ascii_whitespace() {
                self.begin += 1;
            }
            if self.begin < self.end {
                break;
            }
        }

        // Accumulate token bytes, refilling across buffer boundaries.
        loop {
            let mut i = self.begin;
            while i < self.end && !self.buf[i].is_ascii_whitespace() {
                i += 1;
            }
            token.extend_from_slice(&self.buf[self.begin..i]);
            self.begin = i;
            if i < self.end {
                break;
            }
            if self.fill_buf()? == 0 {
                break;
            }
        }

        Ok(true)
    }
}
