//! Well-known engine class ids.
//!
//! Only used for naming things in diagnostics and for parsing class
//! arguments; decoding never depends on this table.

pub const SCENE_NODE: u16 = 0x0000;
pub const SCENE_OBJECT: u16 = 0x0001;
pub const KEYED_OBJECT: u16 = 0x0002;
pub const BITMAP: u16 = 0x0003;
pub const MIPMAP: u16 = 0x0004;
pub const CUBIC_ENVIRONMAP: u16 = 0x0005;
pub const LAYER: u16 = 0x0006;
pub const MATERIAL: u16 = 0x0007;
pub const COORDINATE_INTERFACE: u16 = 0x0015;
pub const DRAW_INTERFACE: u16 = 0x0016;
pub const SOUND_BUFFER: u16 = 0x0029;
pub const DRAWABLE_SPANS: u16 = 0x004C;
/// Class id of a null object reference.
pub const NULL_CLASS: u16 = 0x8000;

const NAMES: &[(u16, &str)] = &[
    (SCENE_NODE,           "plSceneNode"),
    (SCENE_OBJECT,         "plSceneObject"),
    (KEYED_OBJECT,         "hsKeyedObject"),
    (BITMAP,               "plBitmap"),
    (MIPMAP,               "plMipmap"),
    (CUBIC_ENVIRONMAP,     "plCubicEnvironmap"),
    (LAYER,                "plLayer"),
    (MATERIAL,             "hsGMaterial"),
    (COORDINATE_INTERFACE, "plCoordinateInterface"),
    (DRAW_INTERFACE,       "plDrawInterface"),
    (SOUND_BUFFER,         "plSoundBuffer"),
    (DRAWABLE_SPANS,       "plDrawableSpans"),
];

pub fn class_name(class_type: u16) -> Option<&'static str> {
    NAMES.iter().find(|(id, _)| *id == class_type).map(|(_, n)| *n)
}

/// `plSoundBuffer` for known classes, `0x00ab` otherwise.
pub fn display_name(class_type: u16) -> String {
    match class_name(class_type) {
        Some(name) => name.to_string(),
        None       => format!("{class_type:#06x}"),
    }
}

/// Parse a class given as decimal, `0x`-prefixed hex, or a known name
/// (case-insensitive).
pub fn parse_class(s: &str) -> Option<u16> {
    let s = s.trim();
    if let Some(hex) = s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        return u16::from_str_radix(hex, 16).ok();
    }
    if let Ok(n) = s.parse::<u16>() {
        return Some(n);
    }
    NAMES
        .iter()
        .find(|(_, name)| name.eq_ignore_ascii_case(s))
        .map(|(id, _)| *id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_and_parsing() {
        assert_eq!(class_name(SOUND_BUFFER), Some("plSoundBuffer"));
        assert_eq!(class_name(0x0123), None);
        assert_eq!(display_name(0x0123), "0x0123");
        assert_eq!(parse_class("0x29"), Some(SOUND_BUFFER));
        assert_eq!(parse_class("41"), Some(SOUND_BUFFER));
        assert_eq!(parse_class("plsoundbuffer"), Some(SOUND_BUFFER));
        assert_eq!(parse_class("plNothing"), None);
    }
}
