//! Audio sample descriptor (`plSoundBuffer`).
//!
//! Fields after the base identifier, in order:
//!
//! | Type   | Field |
//! |--------|-------|
//! | u32    | flags |
//! | u32    | declared data length |
//! | string | file name (safe string) |
//! | u16    | format tag |
//! | u16    | channel count |
//! | u32    | sample rate |
//! | u32    | average bytes per second |
//! | u16    | block align |
//! | u16    | bits per sample |

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::objects::read_base_uoid;
use crate::safe_string::read_safe_string;
use crate::stream::PrpReader;
use crate::uoid::Uoid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StereoChannel {
    Left,
    Right,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SoundBuffer {
    pub uoid: Uoid,
    pub flags: u32,
    pub declared_data_length: u32,
    pub file_name: String,
    pub format_tag: u16,
    pub channel_count: u16,
    pub sample_rate: u32,
    pub avg_bytes_per_sec: u32,
    pub block_align: u16,
    pub bits_per_sample: u16,
}

impl SoundBuffer {
    pub const IS_EXTERNAL: u32 = 0x01;
    pub const ALWAYS_EXTERNAL: u32 = 0x02;
    pub const ONLY_LEFT_CHANNEL: u32 = 0x04;
    pub const ONLY_RIGHT_CHANNEL: u32 = 0x08;
    pub const STREAM_COMPRESSED: u32 = 0x10;

    /// Decode the body; `reader` sits just past the record's class id.
    pub fn read(reader: &mut PrpReader) -> Result<Self> {
        let uoid = read_base_uoid(reader)?;
        Ok(Self {
            uoid,
            flags: reader.read_u32()?,
            declared_data_length: reader.read_u32()?,
            file_name: read_safe_string(reader)?,
            format_tag: reader.read_u16()?,
            channel_count: reader.read_u16()?,
            sample_rate: reader.read_u32()?,
            avg_bytes_per_sec: reader.read_u32()?,
            block_align: reader.read_u16()?,
            bits_per_sample: reader.read_u16()?,
        })
    }

    /// Sample data lives in an external audio file rather than the page.
    pub fn has_external_audio_file(&self) -> bool {
        self.flags & Self::IS_EXTERNAL != 0
    }

    pub fn is_always_external(&self) -> bool {
        self.flags & Self::ALWAYS_EXTERNAL != 0
    }

    /// Only one channel of a stereo source is played.
    pub fn uses_split_stereo_channels(&self) -> bool {
        self.flags & (Self::ONLY_LEFT_CHANNEL | Self::ONLY_RIGHT_CHANNEL) != 0
    }

    /// Which channel is kept when the source is split.  Left wins if both
    /// bits are set.
    pub fn split_channel(&self) -> Option<StereoChannel> {
        if self.flags & Self::ONLY_LEFT_CHANNEL != 0 {
            Some(StereoChannel::Left)
        } else if self.flags & Self::ONLY_RIGHT_CHANNEL != 0 {
            Some(StereoChannel::Right)
        } else {
            None
        }
    }

    pub fn is_streamed_and_compressed(&self) -> bool {
        self.flags & Self::STREAM_COMPRESSED != 0
    }
}
