// src/container/format_v2/header.rs
// APP2 header block - fixed 128 bytes at the start of every container

use super::constants::{APP_MAGIC, FORMAT_VERSION, HEADER_SIZE};
use super::schema;
use crate::exceptions::{AppError, Result};

/// Decoded header fields. Text is kept as stored, after terminator stripping.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Header {
    pub magic: u32,
    pub version: u32,
    pub name: String,
    pub creator: String,
    pub category: String,
    pub total_size: u32,
    pub code_offset: u32,
    pub code_size: u32,
    pub icon_offset: u32,
    pub icon_size: u32,
    pub checksum: u32,
}

impl Header {
    /// Create a header with the current magic and version and empty bookkeeping
    pub fn new(name: &str, creator: &str, category: &str) -> Self {
        Header {
            magic: APP_MAGIC,
            version: FORMAT_VERSION,
            name: schema::truncate_to_field(name, schema::NAME.width()).to_string(),
            creator: schema::truncate_to_field(creator, schema::CREATOR.width()).to_string(),
            category: schema::truncate_to_field(category, schema::CATEGORY.width()).to_string(),
            total_size: 0,
            code_offset: 0,
            code_size: 0,
            icon_offset: 0,
            icon_size: 0,
            checksum: 0,
        }
    }

    /// Borrow the header block at the start of a container
    pub fn block(data: &[u8]) -> Result<&[u8; HEADER_SIZE]> {
        data.get(..HEADER_SIZE)
            .and_then(|head| head.try_into().ok())
            .ok_or(AppError::Truncated { len: data.len() })
    }

    /// Unpack a header block. No validation beyond reading the fields.
    pub fn unpack(block: &[u8; HEADER_SIZE]) -> Self {
        Header {
            magic: schema::MAGIC.read_u32(block),
            version: schema::VERSION.read_u32(block),
            name: schema::NAME.read_text(block).into_owned(),
            creator: schema::CREATOR.read_text(block).into_owned(),
            category: schema::CATEGORY.read_text(block).into_owned(),
            total_size: schema::TOTAL_SIZE.read_u32(block),
            code_offset: schema::CODE_OFFSET.read_u32(block),
            code_size: schema::CODE_SIZE.read_u32(block),
            icon_offset: schema::ICON_OFFSET.read_u32(block),
            icon_size: schema::ICON_SIZE.read_u32(block),
            checksum: schema::CHECKSUM.read_u32(block),
        }
    }

    /// Pack the header; reserved bytes are zero and the checksum is written as stored
    pub fn pack(&self) -> [u8; HEADER_SIZE] {
        let mut block = [0u8; HEADER_SIZE];
        schema::MAGIC.write_u32(&mut block, self.magic);
        schema::VERSION.write_u32(&mut block, self.version);
        schema::NAME.write_text(&mut block, &self.name);
        schema::CREATOR.write_text(&mut block, &self.creator);
        schema::CATEGORY.write_text(&mut block, &self.category);
        schema::TOTAL_SIZE.write_u32(&mut block, self.total_size);
        schema::CODE_OFFSET.write_u32(&mut block, self.code_offset);
        schema::CODE_SIZE.write_u32(&mut block, self.code_size);
        schema::ICON_OFFSET.write_u32(&mut block, self.icon_offset);
        schema::ICON_SIZE.write_u32(&mut block, self.icon_size);
        schema::CHECKSUM.write_u32(&mut block, self.checksum);
        block
    }
}
