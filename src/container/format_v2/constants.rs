// src/container/format_v2/constants.rs
// Core format constants that never change
// For limits and configuration, see defaults.rs

// Magic number, stored little-endian at offset 0 ("APP2")
pub const APP_MAGIC: u32 = 0x4150_5032;

// Format version - immutable for this module
pub const FORMAT_VERSION: u32 = 2;
pub const SUPPORTED_VERSIONS: &[u32] = &[FORMAT_VERSION];

// Fixed sizes - part of the format specification
pub const HEADER_SIZE: usize = 128;
pub const NAME_FIELD_LEN: usize = 32; // 31 bytes + terminator
pub const CREATOR_FIELD_LEN: usize = 32; // 31 bytes + terminator
pub const CATEGORY_FIELD_LEN: usize = 16; // 15 bytes + terminator
pub const RESERVED_LEN: usize = 16;

// Icon geometry (RGB565, row-major)
pub const ICON_WIDTH: usize = 128;
pub const ICON_HEIGHT: usize = 128;
pub const ICON_BYTES_PER_PIXEL: usize = 2;
pub const ICON_PIXELS: usize = ICON_WIDTH * ICON_HEIGHT;
pub const ICON_SIZE: usize = ICON_PIXELS * ICON_BYTES_PER_PIXEL;

// Sections follow the header in this order with no padding
pub const ICON_OFFSET: usize = HEADER_SIZE;
pub const CODE_OFFSET: usize = ICON_OFFSET + ICON_SIZE;

/// Whether this reader understands the given format version
pub fn is_supported_version(version: u32) -> bool {
    SUPPORTED_VERSIONS.contains(&version)
}
