use serde::{Deserialize, Serialize};

use crate::error::{PrpError, Result};
use crate::location::Location;
use crate::safe_string::read_safe_string;
use crate::stream::PrpReader;

/// The only page version this decoder understands.
pub const SUPPORTED_VERSION: u32 = 6;

/// Page header, read from offset 0.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageHeader {
    pub version: u32,
    pub location: Location,
    pub age_name: String,
    pub page_name: String,
    pub internal_version: u16,
    /// Read but never validated.
    pub checksum: u32,
    /// Read but never used; objects are addressed through their keys.
    pub data_start: u32,
    pub index_offset: u32,
}

impl PageHeader {
    pub fn read(reader: &mut PrpReader) -> Result<Self> {
        reader.seek(0)?;
        let version = reader.read_u32()?;
        if version != SUPPORTED_VERSION {
            return Err(PrpError::UnsupportedVersion(version));
        }
        Ok(Self {
            version,
            location: Location::read(reader)?,
            age_name: read_safe_string(reader)?,
            page_name: read_safe_string(reader)?,
            internal_version: reader.read_u16()?,
            checksum: reader.read_u32()?,
            data_start: reader.read_u32()?,
            index_offset: reader.read_u32()?,
        })
    }
}
