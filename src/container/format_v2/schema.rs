// src/container/format_v2/schema.rs
// Header schema - the single source of truth for field offsets

//! Each header field is declared once as a [`Field`] chained off the one
//! before it, so offsets are derived in `const` context and shared by the
//! packing and unpacking code. Reordering or resizing a field moves every
//! later offset with it.

use super::constants::{
    CATEGORY_FIELD_LEN, CREATOR_FIELD_LEN, HEADER_SIZE, NAME_FIELD_LEN, RESERVED_LEN,
};
use std::borrow::Cow;
use std::ops::Range;

/// Shape of a header field
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FieldKind {
    /// Little-endian unsigned 32-bit integer
    U32,
    /// Zero-terminated, zero-padded UTF-8 text of the given width
    Text(usize),
    /// Bytes that are always written as zero
    Reserved(usize),
}

impl FieldKind {
    pub const fn width(self) -> usize {
        match self {
            FieldKind::U32 => 4,
            FieldKind::Text(len) | FieldKind::Reserved(len) => len,
        }
    }
}

/// A named, fixed-width header field at a derived offset
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Field {
    pub name: &'static str,
    pub kind: FieldKind,
    pub offset: usize,
}

impl Field {
    const fn first(name: &'static str, kind: FieldKind) -> Self {
        Field {
            name,
            kind,
            offset: 0,
        }
    }

    const fn then(self, name: &'static str, kind: FieldKind) -> Self {
        Field {
            name,
            kind,
            offset: self.end(),
        }
    }

    pub const fn width(&self) -> usize {
        self.kind.width()
    }

    pub const fn end(&self) -> usize {
        self.offset + self.width()
    }

    pub fn range(&self) -> Range<usize> {
        self.offset..self.end()
    }

    /// Read a U32 field from a header block
    pub fn read_u32(&self, header: &[u8; HEADER_SIZE]) -> u32 {
        debug_assert_eq!(self.kind, FieldKind::U32);
        let mut raw = [0u8; 4];
        raw.copy_from_slice(&header[self.range()]);
        u32::from_le_bytes(raw)
    }

    pub fn write_u32(&self, header: &mut [u8; HEADER_SIZE], value: u32) {
        debug_assert_eq!(self.kind, FieldKind::U32);
        header[self.range()].copy_from_slice(&value.to_le_bytes());
    }

    /// Read a text field up to its first zero byte, never past the field end
    pub fn read_text<'a>(&self, header: &'a [u8; HEADER_SIZE]) -> Cow<'a, str> {
        let raw = &header[self.range()];
        let len = raw.iter().position(|&b| b == 0).unwrap_or(raw.len());
        String::from_utf8_lossy(&raw[..len])
    }

    /// Write text truncated to `width - 1` bytes, zero-padding the rest
    pub fn write_text(&self, header: &mut [u8; HEADER_SIZE], text: &str) {
        let stored = truncate_to_field(text, self.width());
        let slot = &mut header[self.range()];
        slot.fill(0);
        slot[..stored.len()].copy_from_slice(stored.as_bytes());
    }
}

/// Longest prefix of `text` that fits a text field of `width` bytes with its
/// terminator, cut on a character boundary
pub fn truncate_to_field(text: &str, width: usize) -> &str {
    let max = width.saturating_sub(1);
    if text.len() <= max {
        return text;
    }
    let mut end = max;
    while !text.is_char_boundary(end) {
        end -= 1;
    }
    &text[..end]
}

pub const MAGIC: Field = Field::first("magic", FieldKind::U32);
pub const VERSION: Field = MAGIC.then("version", FieldKind::U32);
pub const NAME: Field = VERSION.then("name", FieldKind::Text(NAME_FIELD_LEN));
pub const CREATOR: Field = NAME.then("creator", FieldKind::Text(CREATOR_FIELD_LEN));
pub const CATEGORY: Field = CREATOR.then("category", FieldKind::Text(CATEGORY_FIELD_LEN));
pub const TOTAL_SIZE: Field = CATEGORY.then("size", FieldKind::U32);
pub const CODE_OFFSET: Field = TOTAL_SIZE.then("code_offset", FieldKind::U32);
pub const CODE_SIZE: Field = CODE_OFFSET.then("code_size", FieldKind::U32);
pub const ICON_OFFSET: Field = CODE_SIZE.then("icon_offset", FieldKind::U32);
pub const ICON_SIZE: Field = ICON_OFFSET.then("icon_size", FieldKind::U32);
pub const CHECKSUM: Field = ICON_SIZE.then("checksum", FieldKind::U32);
pub const RESERVED: Field = CHECKSUM.then("reserved", FieldKind::Reserved(RESERVED_LEN));

/// Header fields in on-disk order
pub const HEADER_FIELDS: [Field; 12] = [
    MAGIC,
    VERSION,
    NAME,
    CREATOR,
    CATEGORY,
    TOTAL_SIZE,
    CODE_OFFSET,
    CODE_SIZE,
    ICON_OFFSET,
    ICON_SIZE,
    CHECKSUM,
    RESERVED,
];

const _: () = assert!(RESERVED.end() == HEADER_SIZE);
