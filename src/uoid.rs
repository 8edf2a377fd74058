use serde::{Deserialize, Serialize};
use std::fmt;
use std::hash::{Hash, Hasher};

use crate::error::Result;
use crate::location::Location;
use crate::safe_string::read_safe_string;
use crate::stream::PrpReader;

/// `contents` bit: a clone descriptor trails the name.
pub const HAS_CLONE_IDS: u8 = 0x01;
/// `contents` bit: a load-mask byte follows the location.
pub const HAS_LOAD_MASK: u8 = 0x02;

/// Clone descriptor carried by identifiers of cloned objects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CloneId {
    pub clone_id: u16,
    pub reserved: u16,
    pub clone_player_id: u32,
}

/// Persistent object identifier: what an object is and which page owns it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Uoid {
    pub location: Location,
    pub class_type: u16,
    pub name: String,
    pub load_mask: Option<u8>,
    pub clone_id: Option<CloneId>,
}

impl Uoid {
    /// Decode an identifier whose "present" byte has already been consumed.
    pub fn read(reader: &mut PrpReader) -> Result<Self> {
        let contents = reader.read_u8()?;
        let location = Location::read(reader)?;
        let load_mask = if contents & HAS_LOAD_MASK != 0 {
            Some(reader.read_u8()?)
        } else {
            None
        };
        let class_type = reader.read_u16()?;
        // Object id: a live-engine handle, meaningless outside it.
        reader.skip(4)?;
        let name = read_safe_string(reader)?;
        let clone_id = if contents & HAS_CLONE_IDS != 0 {
            Some(CloneId {
                clone_id: reader.read_u16()?,
                reserved: reader.read_u16()?,
                clone_player_id: reader.read_u32()?,
            })
        } else {
            None
        };
        Ok(Self {
            location,
            class_type,
            name,
            load_mask,
            clone_id,
        })
    }

    /// Decode a `u8` presence flag followed, when non-zero, by an identifier.
    pub fn read_optional(reader: &mut PrpReader) -> Result<Option<Self>> {
        if reader.read_u8()? == 0 {
            return Ok(None);
        }
        Self::read(reader).map(Some)
    }

    pub fn is_clone(&self) -> bool {
        self.clone_id.is_some()
    }
}

// Identity is (location, class, name); clone descriptors and load masks
// describe a particular reference, not a different object.
impl PartialEq for Uoid {
    fn eq(&self, other: &Self) -> bool {
        self.location == other.location
            && self.class_type == other.class_type
            && self.name == other.name
    }
}

impl Eq for Uoid {}

impl Hash for Uoid {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.location.hash(state);
        self.class_type.hash(state);
        self.name.hash(state);
    }
}

impl fmt::Display for Uoid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} [{:#06x}] @ {}", self.name, self.class_type, self.location)
    }
}
