use anyhow::{Context as _, Result};
use std::fs;
use std::path::Path;

/// Whole file held in memory. Every read is a slice of `buf`, so an offset
/// at or past the end just yields an empty slice instead of an I/O error.
#[derive(Debug)]
pub struct BinBuf {
    pub buf: Vec<u8>,
}

impl BinBuf {
    pub fn open<P: AsRef<Path>>(path: P) -> Result<BinBuf> {
        let path = path.as_ref();
        let buf =
            fs::read(path).with_context(|| format!("failed to read {}", path.display()))?;
        Ok(BinBuf { buf })
    }

    /// Bytes from `offset` up to but not including the first null byte, or
    /// to the end of the buffer when no null byte follows.
    pub fn cstr_at(&self, offset: usize) -> &[u8] {
        if offset >= self.buf.len() {
            return &[];
        }
        let tail = &self.buf[offset..];
        let end = tail.iter().position(|&c| c == 0).unwrap_or(tail.len());
        &tail[..end]
    }

    pub fn str_at(&self, offset: usize) -> Result<&str> {
        std::str::from_utf8(self.cstr_at(offset))
            .with_context(|| format!("bytes at offset {offset:#x} are not valid UTF-8"))
    }
}
