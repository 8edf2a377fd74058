//! Object decoder registry: class id → decoder function.
//!
//! # Record layout
//! ```text
//! u16  class_id   (restated; must equal the key's class)
//! UOID            (keyed-object base, always present)
//! ...             (class-specific fields)
//! ```
//!
//! Supporting a new class means adding one [`Registration`] — either to
//! [`BUILTIN`] or at runtime via [`Registry::register`].  Existing entries
//! are never replaced.  A class without an entry decodes to
//! [`PrpError::UnsupportedClass`], which callers may treat as "skip".

use log::trace;
use std::collections::BTreeMap;

use crate::classes::{display_name, SOUND_BUFFER};
use crate::error::{PrpError, Result};
use crate::objects::{PlasmaObject, SoundBuffer};
use crate::stream::PrpReader;

/// Decodes a record body.  The reader sits just past the restated class id.
pub type DecodeFn = fn(&mut PrpReader) -> Result<PlasmaObject>;

#[derive(Debug, Clone, Copy)]
pub struct Registration {
    pub class_type: u16,
    pub decode: DecodeFn,
}

impl Registration {
    /// Engine class name, for diagnostics only.
    pub fn name(&self) -> String {
        display_name(self.class_type)
    }
}

// ── Built-in decoders ───────────────────────────────────────────────────────

fn decode_sound_buffer(reader: &mut PrpReader) -> Result<PlasmaObject> {
    SoundBuffer::read(reader).map(PlasmaObject::SoundBuffer)
}

pub const BUILTIN: &[Registration] = &[
    Registration {
        class_type: SOUND_BUFFER,
        decode:     decode_sound_buffer,
    },
];

// ── Registry ────────────────────────────────────────────────────────────────

#[derive(Debug, Clone)]
pub struct Registry {
    entries: BTreeMap<u16, Registration>,
}

impl Registry {
    /// A registry with no decoders; every class is unsupported.
    pub fn empty() -> Self {
        Self { entries: BTreeMap::new() }
    }

    pub fn builtin() -> Self {
        let mut registry = Self::empty();
        for entry in BUILTIN {
            registry.register(*entry);
        }
        registry
    }

    /// Add a decoder.  Returns `false` and leaves the registry untouched if
    /// the class already has one.
    pub fn register(&mut self, entry: Registration) -> bool {
        if self.entries.contains_key(&entry.class_type) {
            return false;
        }
        self.entries.insert(entry.class_type, entry);
        true
    }

    pub fn supports(&self, class_type: u16) -> bool {
        self.entries.contains_key(&class_type)
    }

    pub fn get(&self, class_type: u16) -> Option<&Registration> {
        self.entries.get(&class_type)
    }

    /// Decode the record at the reader's position as `class_type`.
    pub fn decode(&self, class_type: u16, reader: &mut PrpReader) -> Result<PlasmaObject> {
        let offset = reader.position()?;
        let found = reader.read_u16()?;
        if found != class_type {
            return Err(PrpError::ClassMismatch { offset, expected: class_type, found });
        }
        let entry = self
            .get(class_type)
            .ok_or(PrpError::UnsupportedClass(class_type))?;
        trace!("decoding {} at {:#x}", entry.name(), offset);
        (entry.decode)(reader)
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::builtin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classes::class_name;
    use std::io::Cursor;

    fn never(_: &mut PrpReader) -> Result<PlasmaObject> {
        Err(PrpError::UnsupportedClass(0))
    }

    #[test]
    fn builtin_supports_sound_buffer_only() {
        let registry = Registry::builtin();
        assert!(registry.supports(SOUND_BUFFER));
        assert!(!registry.supports(0x0004));
    }

    #[test]
    fn register_never_replaces() {
        let mut registry = Registry::builtin();
        let clash = Registration { class_type: SOUND_BUFFER, decode: never };
        assert!(!registry.register(clash));
        let kept = registry.get(SOUND_BUFFER).unwrap();
        assert_eq!(kept.decode as usize, decode_sound_buffer as DecodeFn as usize);

        let fresh = Registration { class_type: 0x0004, decode: never };
        assert!(registry.register(fresh));
        assert!(registry.supports(0x0004));
    }

    #[test]
    fn registration_names_come_from_class_table() {
        for entry in BUILTIN {
            assert_eq!(Some(entry.name().as_str()), class_name(entry.class_type));
        }
        assert_eq!(BUILTIN[0].name(), "plSoundBuffer");
        let unknown = Registration { class_type: 0x0123, decode: never };
        assert_eq!(unknown.name(), "0x0123");
    }

    #[test]
    fn mismatch_is_checked_before_lookup() {
        let registry = Registry::empty();
        let mut r = PrpReader::new(Cursor::new(vec![0x04, 0x00]));
        match registry.decode(0x0029, &mut r) {
            Err(PrpError::ClassMismatch { offset, expected, found }) => {
                assert_eq!((offset, expected, found), (0, 0x0029, 0x0004));
            }
            other => panic!("expected ClassMismatch, got {other:?}"),
        }
    }

    #[test]
    fn unknown_class_is_unsupported() {
        let registry = Registry::builtin();
        let mut r = PrpReader::new(Cursor::new(vec![0x04, 0x00]));
        let err = registry.decode(0x0004, &mut r).unwrap_err();
        assert!(err.is_unsupported_class());
    }
}
