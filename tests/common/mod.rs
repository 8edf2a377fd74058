//! In-memory page fixtures.
#![allow(dead_code)]

use byteorder::{LittleEndian, WriteBytesExt};

pub const SOUND_BUFFER: u16 = 0x0029;

/// Inverse of the location bias: `(prefix, suffix)` → packed sequence number.
pub fn encode_location(prefix: i32, suffix: i32) -> u32 {
    let packed = if prefix < 0 {
        ((-prefix as i64) << 16) + suffix as i64 + 0xFF00_0001
    } else {
        ((prefix as i64) << 16) + suffix as i64 + 33
    };
    packed as u32
}

pub fn write_location(buf: &mut Vec<u8>, prefix: i32, suffix: i32, flags: u16) {
    buf.write_u32::<LittleEndian>(encode_location(prefix, suffix)).unwrap();
    buf.write_u16::<LittleEndian>(flags).unwrap();
}

/// Modern-marker safe string, optionally stored inverted.
pub fn write_safe_string(buf: &mut Vec<u8>, s: &[u8], invert: bool) {
    buf.write_u16::<LittleEndian>(0xF000 | s.len() as u16).unwrap();
    if invert {
        buf.extend(s.iter().map(|b| !b));
    } else {
        buf.extend_from_slice(s);
    }
}

/// UOID without load mask or clone descriptor (no presence byte).
pub fn write_uoid(buf: &mut Vec<u8>, location: (i32, i32), class_type: u16, name: &str) {
    buf.write_u8(0).unwrap();
    write_location(buf, location.0, location.1, 0);
    buf.write_u16::<LittleEndian>(class_type).unwrap();
    buf.write_u32::<LittleEndian>(0x1234).unwrap(); // object id
    write_safe_string(buf, name.as_bytes(), false);
}

/// Sound-buffer fields that follow the base identifier.
pub fn sound_body(flags: u32, file_name: &str) -> Vec<u8> {
    let mut b = Vec::new();
    b.write_u32::<LittleEndian>(flags).unwrap();
    b.write_u32::<LittleEndian>(88_200).unwrap();
    write_safe_string(&mut b, file_name.as_bytes(), false);
    b.write_u16::<LittleEndian>(1).unwrap(); // PCM
    b.write_u16::<LittleEndian>(2).unwrap();
    b.write_u32::<LittleEndian>(44_100).unwrap();
    b.write_u32::<LittleEndian>(176_400).unwrap();
    b.write_u16::<LittleEndian>(4).unwrap();
    b.write_u16::<LittleEndian>(16).unwrap();
    b
}

pub struct ObjectSpec {
    pub name: String,
    /// Class restated at the start of the record, if different from the bucket's.
    pub restated_class: Option<u16>,
    pub body: Vec<u8>,
}

impl ObjectSpec {
    pub fn new(name: &str, body: Vec<u8>) -> Self {
        Self { name: name.to_string(), restated_class: None, body }
    }

    pub fn sound(name: &str, flags: u32, file_name: &str) -> Self {
        Self::new(name, sound_body(flags, file_name))
    }
}

pub struct PageBuilder {
    pub version: u32,
    pub location: (i32, i32, u16),
    pub age: String,
    pub page: String,
    pub buckets: Vec<(u16, Vec<ObjectSpec>)>,
}

impl PageBuilder {
    pub fn new(age: &str, page: &str) -> Self {
        Self {
            version: 6,
            location: (-1, 200, 0),
            age: age.to_string(),
            page: page.to_string(),
            buckets: Vec::new(),
        }
    }

    pub fn bucket(mut self, class_type: u16, objects: Vec<ObjectSpec>) -> Self {
        self.buckets.push((class_type, objects));
        self
    }

    /// Header, object records, then the keyring; the header's index offset
    /// is patched last.
    pub fn build(&self) -> Vec<u8> {
        let mut buf = Vec::new();
        buf.write_u32::<LittleEndian>(self.version).unwrap();
        let (prefix, suffix, flags) = self.location;
        write_location(&mut buf, prefix, suffix, flags);
        write_safe_string(&mut buf, self.age.as_bytes(), false);
        write_safe_string(&mut buf, self.page.as_bytes(), true);
        buf.write_u16::<LittleEndian>(70).unwrap();
        buf.write_u32::<LittleEndian>(0xCAFE_F00D).unwrap(); // checksum
        let data_start_pos = buf.len();
        buf.write_u32::<LittleEndian>(0).unwrap();
        let index_pos = buf.len();
        buf.write_u32::<LittleEndian>(0).unwrap();

        let data_start = buf.len() as u32;
        let mut placed: Vec<Vec<(String, u32, u32)>> = Vec::new();
        for (class_type, objects) in &self.buckets {
            let mut keys = Vec::new();
            for obj in objects {
                let offset = buf.len() as u32;
                buf.write_u16::<LittleEndian>(obj.restated_class.unwrap_or(*class_type)).unwrap();
                buf.write_u8(1).unwrap();
                write_uoid(&mut buf, (prefix, suffix), *class_type, &obj.name);
                buf.extend_from_slice(&obj.body);
                keys.push((obj.name.clone(), offset, buf.len() as u32 - offset));
            }
            placed.push(keys);
        }

        let index_offset = buf.len() as u32;
        buf.write_u32::<LittleEndian>(self.buckets.len() as u32).unwrap();
        for ((class_type, _), keys) in self.buckets.iter().zip(&placed) {
            buf.write_u16::<LittleEndian>(*class_type).unwrap();
            buf.write_u32::<LittleEndian>(0xFFFF_FFFF).unwrap(); // byte length, unused
            buf.write_u8(0).unwrap();
            buf.write_u32::<LittleEndian>(keys.len() as u32).unwrap();
            for (name, offset, length) in keys {
                write_uoid(&mut buf, (prefix, suffix), *class_type, name);
                buf.write_u32::<LittleEndian>(*offset).unwrap();
                buf.write_u32::<LittleEndian>(*length).unwrap();
            }
        }

        buf[data_start_pos..data_start_pos + 4].copy_from_slice(&data_start.to_le_bytes());
        buf[index_pos..index_pos + 4].copy_from_slice(&index_offset.to_le_bytes());
        buf
    }
}
