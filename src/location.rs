//! Page location: the packed sequence number plus flag word that identifies
//! one page within an age.
//!
//! # Packing
//! On disk the (prefix, suffix) pair is a single biased `u32`:
//!
//! | Range | Meaning |
//! |-------|---------|
//! | high bit clear | `packed = (prefix << 16) + suffix + 33` |
//! | high bit set   | `packed = (-prefix << 16) + suffix + 0xFF000001` |
//!
//! The bias constants are a frozen format contract.  Getting either wrong
//! does not fail; it silently yields a different page identity.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::Result;
use crate::stream::PrpReader;

/// Bias applied to locations with a non-negative prefix.
pub const NORMAL_BIAS: i64 = 33;
/// Bias applied to locations with a negative prefix (global/common pages).
pub const GLOBAL_BIAS: i64 = 0xFF00_0001;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Location {
    pub prefix: i32,
    pub suffix: i32,
    pub flags: u16,
}

impl Location {
    pub const LOCAL_ONLY: u16 = 0x0001;
    pub const VOLATILE: u16 = 0x0002;
    pub const RESERVED: u16 = 0x0004;
    pub const BUILT_IN: u16 = 0x0008;
    pub const ITINERANT: u16 = 0x0010;

    /// Undo the biased packing of a sequence number.
    pub fn from_packed(packed: u32, flags: u16) -> Self {
        // i64 so the bias subtraction and the shifts behave arithmetically
        // even for out-of-range packed values.
        let (prefix, suffix) = if packed & 0x8000_0000 != 0 {
            let n = packed as i64 - GLOBAL_BIAS;
            let prefix = -(n >> 16);
            (prefix, n - ((-prefix) << 16))
        } else {
            let n = packed as i64 - NORMAL_BIAS;
            let prefix = n >> 16;
            (prefix, n - (prefix << 16))
        };
        Self {
            prefix: prefix as i32,
            suffix: suffix as i32,
            flags,
        }
    }

    /// Decode a location: `u32` packed sequence number, then `u16` flags.
    pub fn read(reader: &mut PrpReader) -> Result<Self> {
        let packed = reader.read_u32()?;
        let flags = reader.read_u16()?;
        Ok(Self::from_packed(packed, flags))
    }

    /// Negative prefixes are reserved for global (common) pages.
    pub fn is_global(&self) -> bool {
        self.prefix < 0
    }

    pub fn has_flag(&self, flag: u16) -> bool {
        self.flags & flag != 0
    }

    pub fn is_reserved(&self) -> bool {
        self.has_flag(Self::RESERVED)
    }

    pub fn is_built_in(&self) -> bool {
        self.has_flag(Self::BUILT_IN)
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.prefix, self.suffix)
    }
}
