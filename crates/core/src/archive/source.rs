//! Byte sources backing packaged archives.
//!
//! A container is either a whole file, a byte range of a file (a stored entry
//! of an outer container), or an in-memory buffer (a compressed entry that had
//! to be inflated). [`Origin`] describes where the bytes live and can be opened
//! any number of times, so every handle gets its own file descriptor.

use std::fs::File;
use std::io::{self, Cursor, Read, Seek, SeekFrom};
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Debug, Clone)]
pub enum Origin {
    File(PathBuf),
    Slice { path: PathBuf, start: u64, len: u64 },
    Bytes(Arc<[u8]>),
}

impl Origin {
    pub fn open(&self) -> io::Result<ContainerSource> {
        match self {
            Origin::File(path) => Ok(ContainerSource::File(File::open(path)?)),
            Origin::Slice { path, start, len } => {
                let range = RangeReader::new(File::open(path)?, *start, *len)?;
                Ok(ContainerSource::Range(range))
            }
            Origin::Bytes(bytes) => Ok(ContainerSource::Memory(Cursor::new(bytes.clone()))),
        }
    }

    /// Narrow this origin to `len` bytes starting at `offset` (relative to it).
    pub fn slice(&self, offset: u64, len: u64) -> io::Result<Origin> {
        match self {
            Origin::File(path) => Ok(Origin::Slice {
                path: path.clone(),
                start: offset,
                len,
            }),
            Origin::Slice {
                path,
                start,
                len: outer,
            } => {
                if offset.saturating_add(len) > *outer {
                    return Err(out_of_bounds(offset, len, *outer));
                }
                Ok(Origin::Slice {
                    path: path.clone(),
                    start: start + offset,
                    len,
                })
            }
            Origin::Bytes(bytes) => {
                let total = bytes.len() as u64;
                if offset.saturating_add(len) > total {
                    return Err(out_of_bounds(offset, len, total));
                }
                let (from, to) = (offset as usize, (offset + len) as usize);
                Ok(Origin::Bytes(Arc::from(&bytes[from..to])))
            }
        }
    }
}

fn out_of_bounds(offset: u64, len: u64, total: u64) -> io::Error {
    io::Error::new(
        io::ErrorKind::InvalidData,
        format!("range {}+{} exceeds container of {} bytes", offset, len, total),
    )
}

pub enum ContainerSource {
    File(File),
    Range(RangeReader),
    Memory(Cursor<Arc<[u8]>>),
}

impl Read for ContainerSource {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        match self {
            ContainerSource::File(f) => f.read(buf),
            ContainerSource::Range(r) => r.read(buf),
            ContainerSource::Memory(c) => c.read(buf),
        }
    }
}

impl Seek for ContainerSource {
    fn seek(&mut self, pos: SeekFrom) -> io::Result<u64> {
        match self {
            ContainerSource::File(f) => f.seek(pos),
            ContainerSource::Range(r) => r.seek(pos),
            ContainerSource::Memory(c) => c.seek(pos),
        }
    }
}

/// A `Read + Seek` window over `[start, start + len)` of a file.
pub struct RangeReader {
    file: File,
    start: u64,
    len: u64,
    pos: u64,
}

impl RangeReader {
    pub fn new(mut file: File, start: u64, len: u64) -> io::Result<Self> {
        let file_len = file.metadata()?.len();
        if start.saturating_add(len) > file_len {
            return Err(out_of_bounds(start, len, file_len));
        }
        file.seek(SeekFrom::Start(start))?;
        Ok(Self {
            file,
            start,
            len,
            pos: 0,
        })
    }
}

impl Read for RangeReader {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let remaining = self.len.saturating_sub(self.pos);
        if remaining == 0 || buf.is_empty() {
            return Ok(0);
        }
        let want = buf.len().min(remaining as usize);
        self.file.seek(SeekFrom::Start(self.start + self.pos))?;
        let read = self.file.read(&mut buf[..want])?;
        self.pos += read as u64;
        Ok(read)
    }
}

impl Seek for RangeReader {
    fn seek(&mut self, pos: SeekFrom) -> io::Result<u64> {
        let target = match pos {
            SeekFrom::Start(n) => Some(n),
            SeekFrom::End(delta) => self.len.checked_add_signed(delta),
            SeekFrom::Current(delta) => self.pos.checked_add_signed(delta),
        };
        match target {
            Some(n) => {
                self.pos = n;
                Ok(n)
            }
            None => Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                "seek before start of range",
            )),
        }
    }
}
