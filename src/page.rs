//! Page façade.
//!
//! [`Page`] owns the byte source for its lifetime.  Opening a page decodes
//! the header and the whole keyring eagerly; any failure there aborts the
//! open, so a partially decoded page is never handed out.  Object bodies
//! are decoded lazily, once per call, and are not cached: decoding the same
//! key twice re-reads the record.  A failed object decode affects only that
//! call.
//!
//! Every decode seeks and then reads, so all access goes through `&mut self`.
//! Callers that want concurrent decoding should open one `Page` per thread.

use log::debug;
use std::fmt;
use std::fs::File;
use std::io::{BufReader, Read, Seek};
use std::path::Path;

use crate::error::{PrpError, Result};
use crate::header::PageHeader;
use crate::keyring::{Key, Keyring};
use crate::location::Location;
use crate::objects::PlasmaObject;
use crate::registry::Registry;
use crate::stream::PrpReader;

/// Default read buffer when opening a page from a path: 64 KiB.
pub const DEFAULT_BUFFER_CAPACITY: usize = 64 * 1024;

/// Options for opening a page.
#[derive(Debug, Clone)]
pub struct OpenOptions {
    /// Read buffer size used by [`Page::open_with`].
    pub buffer_capacity: usize,
    /// Decoders the page dispatches object records through.
    pub registry: Registry,
}

impl Default for OpenOptions {
    fn default() -> Self {
        Self {
            buffer_capacity: DEFAULT_BUFFER_CAPACITY,
            registry: Registry::builtin(),
        }
    }
}

impl OpenOptions {
    pub fn buffer_capacity(mut self, capacity: usize) -> Self {
        self.buffer_capacity = capacity.max(1);
        self
    }

    pub fn registry(mut self, registry: Registry) -> Self {
        self.registry = registry;
        self
    }
}

pub struct Page {
    reader: PrpReader,
    header: PageHeader,
    keyring: Keyring,
    registry: Registry,
}

impl Page {
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::open_with(path, OpenOptions::default())
    }

    pub fn open_with<P: AsRef<Path>>(path: P, options: OpenOptions) -> Result<Self> {
        let path = path.as_ref();
        debug!("opening page {}", path.display());
        let file = File::open(path)?;
        let source = BufReader::with_capacity(options.buffer_capacity, file);
        Self::from_reader_with(source, options)
    }

    pub fn from_reader<R: Read + Seek + 'static>(source: R) -> Result<Self> {
        Self::from_reader_with(source, OpenOptions::default())
    }

    /// Decode header and keyring from `source`.
    pub fn from_reader_with<R: Read + Seek + 'static>(
        source: R,
        options: OpenOptions,
    ) -> Result<Self> {
        let mut reader = PrpReader::new(source);
        let header = PageHeader::read(&mut reader)?;
        debug!(
            "page header: age={} page={} location={} index@{:#x}",
            header.age_name, header.page_name, header.location, header.index_offset
        );

        let keyring = Keyring::read(&mut reader, header.index_offset)?;
        debug!(
            "keyring: {} classes, {} keys",
            keyring.class_ids().count(),
            keyring.len()
        );

        Ok(Self {
            reader,
            header,
            keyring,
            registry: options.registry,
        })
    }

    // ── Identity ─────────────────────────────────────────────────────────────

    pub fn header(&self) -> &PageHeader {
        &self.header
    }

    pub fn location(&self) -> Location {
        self.header.location
    }

    pub fn age_name(&self) -> &str {
        &self.header.age_name
    }

    pub fn page_name(&self) -> &str {
        &self.header.page_name
    }

    /// The page's internal format version (the `u16` after the names).
    pub fn format_version(&self) -> u16 {
        self.header.internal_version
    }

    pub fn index_offset(&self) -> u32 {
        self.header.index_offset
    }

    /// File name the engine expects for this page.
    pub fn expected_file_name(&self) -> String {
        format!("{}_District_{}.prp", self.header.age_name, self.header.page_name)
    }

    // ── Keys ─────────────────────────────────────────────────────────────────

    pub fn keyring(&self) -> &Keyring {
        &self.keyring
    }

    /// Keys of `class_id` in declaration order; empty if the class is absent.
    pub fn keys_of(&self, class_id: u16) -> &[Key] {
        self.keyring.keys_of(class_id)
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    // ── Objects ──────────────────────────────────────────────────────────────

    /// Decode the object `key` points at.
    pub fn decode(&mut self, key: &Key) -> Result<PlasmaObject> {
        self.reader.seek(key.offset as u64)?;
        self.registry.decode(key.class_type(), &mut self.reader)
    }

    /// Like [`decode`](Self::decode), but an unsupported class yields `None`.
    pub fn decode_supported(&mut self, key: &Key) -> Result<Option<PlasmaObject>> {
        match self.decode(key) {
            Ok(obj) => Ok(Some(obj)),
            Err(PrpError::UnsupportedClass(class)) => {
                debug!("skipping {} (class {:#06x} not implemented)", key.uoid, class);
                Ok(None)
            }
            Err(e) => Err(e),
        }
    }

    /// Raw record bytes: `key.length` bytes starting at `key.offset`.
    pub fn read_record(&mut self, key: &Key) -> Result<Vec<u8>> {
        self.reader.seek(key.offset as u64)?;
        self.reader.read_bytes(key.length as usize)
    }
}

impl fmt::Display for Page {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[AGE: {}] [PAGE: {}] [LOC: {}]",
            self.header.age_name, self.header.page_name, self.header.location
        )
    }
}

impl fmt::Debug for Page {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Page")
            .field("header", &self.header)
            .field("keys", &self.keyring.len())
            .finish()
    }
}
