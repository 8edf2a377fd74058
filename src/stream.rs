//! Positioned little-endian reader over a page's byte source.
//!
//! Every codec in this crate pulls bytes through [`PrpReader`]; nothing else
//! touches the underlying source.  Reads are strictly little-endian, and an
//! end-of-stream during any read is reported as
//! [`PrpError::TruncatedInput`] with the offset the read started at.

use byteorder::{LittleEndian, ReadBytesExt};
use std::io::{self, Read, Seek, SeekFrom};

use crate::error::{PrpError, Result};

/// Anything a page can be decoded from.
pub trait Source: Read + Seek {}
impl<T: Read + Seek> Source for T {}

pub struct PrpReader {
    inner: Box<dyn Source>,
}

impl PrpReader {
    pub fn new<R: Read + Seek + 'static>(source: R) -> Self {
        Self { inner: Box::new(source) }
    }

    /// Current absolute byte position.
    pub fn position(&mut self) -> Result<u64> {
        Ok(self.inner.stream_position()?)
    }

    /// Move the cursor to an absolute offset.  Seeking past the end is not
    /// an error by itself; the next read reports the truncation.
    pub fn seek(&mut self, offset: u64) -> Result<()> {
        self.inner.seek(SeekFrom::Start(offset))?;
        Ok(())
    }

    pub fn read_u8(&mut self) -> Result<u8> {
        let offset = self.position()?;
        self.inner.read_u8().map_err(|e| truncated(e, offset, 1))
    }

    pub fn read_u16(&mut self) -> Result<u16> {
        let offset = self.position()?;
        self.inner
            .read_u16::<LittleEndian>()
            .map_err(|e| truncated(e, offset, 2))
    }

    pub fn read_u32(&mut self) -> Result<u32> {
        let offset = self.position()?;
        self.inner
            .read_u32::<LittleEndian>()
            .map_err(|e| truncated(e, offset, 4))
    }

    /// Read exactly `n` bytes.  Memory grows with the bytes actually
    /// present, not with `n`.
    pub fn read_bytes(&mut self, n: usize) -> Result<Vec<u8>> {
        let offset = self.position()?;
        let mut buf = Vec::new();
        self.inner.by_ref().take(n as u64).read_to_end(&mut buf)?;
        if buf.len() < n {
            return Err(PrpError::TruncatedInput { offset, need: n });
        }
        Ok(buf)
    }

    /// Consume `n` bytes without keeping them.  Unlike a relative seek this
    /// fails when fewer than `n` bytes remain.
    pub fn skip(&mut self, n: usize) -> Result<()> {
        let offset = self.position()?;
        let copied = io::copy(&mut self.inner.by_ref().take(n as u64), &mut io::sink())?;
        if copied < n as u64 {
            return Err(PrpError::TruncatedInput { offset, need: n });
        }
        Ok(())
    }
}

fn truncated(err: io::Error, offset: u64, need: usize) -> PrpError {
    if err.kind() == io::ErrorKind::UnexpectedEof {
        PrpError::TruncatedInput { offset, need }
    } else {
        PrpError::Io(err)
    }
}
