//! Keyring: the page's index of object keys, grouped by class.
//!
//! # Layout (at the header's index offset)
//! ```text
//! u32 bucket_count
//! per bucket:
//!   u16 class_id
//!   u32 bucket_byte_length   (ignored)
//!   u8  reserved             (ignored)
//!   u32 key_count
//!   per key: UOID, u32 offset, u32 length
//! ```
//! Keys keep file declaration order.  Nothing is sorted or deduplicated;
//! a class declared by two buckets gets the second bucket's keys appended.

use log::trace;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::hash::{Hash, Hasher};

use crate::error::Result;
use crate::stream::PrpReader;
use crate::uoid::Uoid;

/// An object identifier plus where its record lives in the page.
///
/// Keys compare and hash by identifier only; `offset` and `length` are
/// ignored.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Key {
    pub uoid: Uoid,
    /// Absolute byte position of the object record.
    pub offset: u32,
    /// Record byte length.  Informational; decoders never rely on it.
    pub length: u32,
}

impl Key {
    pub fn read(reader: &mut PrpReader) -> Result<Self> {
        let uoid = Uoid::read(reader)?;
        let offset = reader.read_u32()?;
        let length = reader.read_u32()?;
        Ok(Self { uoid, offset, length })
    }

    pub fn class_type(&self) -> u16 {
        self.uoid.class_type
    }

    pub fn name(&self) -> &str {
        &self.uoid.name
    }
}

impl PartialEq for Key {
    fn eq(&self, other: &Self) -> bool {
        self.uoid == other.uoid
    }
}

impl Eq for Key {}

impl Hash for Key {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.uoid.hash(state);
    }
}

#[derive(Debug, Clone, Default)]
pub struct Keyring {
    buckets: BTreeMap<u16, Vec<Key>>,
}

impl Keyring {
    /// Seek to `index_offset` and decode every bucket.  Any short read fails
    /// the whole keyring.
    pub fn read(reader: &mut PrpReader, index_offset: u32) -> Result<Self> {
        reader.seek(index_offset as u64)?;
        let bucket_count = reader.read_u32()?;

        let mut buckets: BTreeMap<u16, Vec<Key>> = BTreeMap::new();
        for _ in 0..bucket_count {
            let class_id = reader.read_u16()?;
            reader.skip(4)?; // bucket byte length
            reader.skip(1)?; // reserved
            let key_count = reader.read_u32()?;
            trace!("keyring bucket {:#06x}: {} keys", class_id, key_count);

            let bucket = buckets.entry(class_id).or_default();
            for _ in 0..key_count {
                bucket.push(Key::read(reader)?);
            }
        }
        Ok(Self { buckets })
    }

    /// Keys of one class in declaration order; empty when the class is absent.
    pub fn keys_of(&self, class_id: u16) -> &[Key] {
        self.buckets.get(&class_id).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Classes present, ascending.
    pub fn class_ids(&self) -> impl Iterator<Item = u16> + '_ {
        self.buckets.keys().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (u16, &[Key])> {
        self.buckets.iter().map(|(id, keys)| (*id, keys.as_slice()))
    }

    /// First key of `class_id` named `name`.
    pub fn find(&self, class_id: u16, name: &str) -> Option<&Key> {
        self.keys_of(class_id).iter().find(|k| k.name() == name)
    }

    /// Total number of keys across all classes.
    pub fn len(&self) -> usize {
        self.buckets.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
