//! Built-in demo inputs: a classic overflow payload at width 4 and a simple
//! two-section stack at width 8.

use std::num::NonZeroUsize;

use crate::layout::Section;

const fn width(n: usize) -> NonZeroUsize {
    match NonZeroUsize::new(n) {
        Some(width) => width,
        None => panic!("preset width must be non-zero"),
    }
}

const WORD: NonZeroUsize = width(4);
const QWORD: NonZeroUsize = width(8);

/// A ready-to-render set of bytes, sections and row width.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Preset {
    pub bytes: Vec<u8>,
    pub sections: Vec<Section>,
    pub width: NonZeroUsize,
}

/// Look up the preset for a row width, if one exists.
pub fn preset_for_width(width: usize) -> Option<Preset> {
    match width {
        4 => Some(overflow_payload()),
        8 => Some(two_sections()),
        _ => None,
    }
}

/// NOP sled, filler buffer, saved frame pointer and return address.
pub fn overflow_payload() -> Preset {
    let mut bytes = vec![0x90; 8];
    bytes.extend([0x41; 16]);
    bytes.extend([0x12, 0x34, 0x56, 0x78]);
    bytes.extend([0x66; 4]);

    Preset {
        bytes,
        sections: vec![
            Section::new("nop sled", 8),
            Section::new("buffer", 16),
            Section::new("Old RBP", 4),
            Section::new("ret ADDR", 4),
        ],
        width: WORD,
    }
}

pub fn two_sections() -> Preset {
    Preset {
        bytes: (1..=15).collect(),
        sections: vec![Section::new("Section 1", 8), Section::new("Section 2", 7)],
        width: QWORD,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::StackLayout;

    #[test]
    fn presets_exist_for_supported_widths() {
        assert_eq!(preset_for_width(4).unwrap().width.get(), 4);
        assert_eq!(preset_for_width(8).unwrap().width.get(), 8);
        assert!(preset_for_width(16).is_none());
    }

    #[test]
    fn overflow_payload_fills_its_sections_exactly() {
        let preset = overflow_payload();
        let stack = StackLayout::build(&preset.bytes, &preset.sections, preset.width);
        assert_eq!(stack.rows.len(), 8);
        assert_eq!(stack.zero_filled, 0);
        assert_eq!(stack.dropped, 0);
        assert_eq!(stack.rows[6].bytes, vec![0x12, 0x34, 0x56, 0x78]);
        assert_eq!(stack.rows[7].position_text(), "+0x1c");
    }
}
