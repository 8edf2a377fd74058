//! Typed object bodies.
//!
//! Every record starts with the keyed-object base (an always-present UOID);
//! class-specific fields follow.  Decoders read what they understand and stop.
//! Trailing bytes up to the key's length are left untouched, which is safe
//! because every record is located by absolute offset.

pub mod sound_buffer;

use serde::{Deserialize, Serialize};

use crate::error::{PrpError, Result};
use crate::stream::PrpReader;
use crate::uoid::Uoid;

pub use sound_buffer::{SoundBuffer, StereoChannel};

/// A decoded object body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[non_exhaustive]
pub enum PlasmaObject {
    SoundBuffer(SoundBuffer),
}

impl PlasmaObject {
    pub fn uoid(&self) -> &Uoid {
        match self {
            PlasmaObject::SoundBuffer(s) => &s.uoid,
        }
    }

    pub fn class_type(&self) -> u16 {
        self.uoid().class_type
    }

    pub fn as_sound_buffer(&self) -> Option<&SoundBuffer> {
        match self {
            PlasmaObject::SoundBuffer(s) => Some(s),
        }
    }

    pub fn into_sound_buffer(self) -> Option<SoundBuffer> {
        match self {
            PlasmaObject::SoundBuffer(s) => Some(s),
        }
    }
}

/// Keyed-object base: the record's own identifier, which must be present.
pub(crate) fn read_base_uoid(reader: &mut PrpReader) -> Result<Uoid> {
    let offset = reader.position()?;
    Uoid::read_optional(reader)?.ok_or(PrpError::MissingIdentity { offset })
}
