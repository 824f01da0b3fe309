//! APP2 container codec.
//!
//! `encode` is permissive about text (over-long fields are truncated) and
//! strict about the icon and the size limit, so anything it produces under a
//! given [`DecodeOptions`] decodes under the same options. `decode` validates in a fixed order and reports the
//! first failure as its own [`AppError`] variant:
//!
//! 1. header present (`Truncated`)
//! 2. magic (`BadMagic`)
//! 3. version (`UnsupportedVersion`)
//! 4. size limit (`TooLarge`)
//! 5. recorded size equals buffer length (`SizeMismatch`)
//! 6. icon then code, contiguous after the header (`LayoutCorrupt`)
//! 7. checksum with its own field zeroed (`ChecksumMismatch`)
//!
//! Neither direction logs or touches anything beyond its arguments.

use super::checksums::container_checksum;
use super::constants::{
    APP_MAGIC, CODE_OFFSET, HEADER_SIZE, ICON_OFFSET, ICON_SIZE, is_supported_version,
};
use super::defaults::DEFAULT_MAX_APP_SIZE;
use super::descriptor::{AppDescriptor, AppView};
use super::header::Header;
use super::schema;
use crate::exceptions::{AppError, Result};

/// Size limit shared by encoding and decoding
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecodeOptions {
    /// Largest container accepted, in bytes
    pub max_app_size: u64,
}

impl DecodeOptions {
    pub fn with_max_app_size(max_app_size: u64) -> Self {
        DecodeOptions { max_app_size }
    }
}

impl Default for DecodeOptions {
    /// The device's per-app limit
    fn default() -> Self {
        DecodeOptions {
            max_app_size: DEFAULT_MAX_APP_SIZE,
        }
    }
}

/// Serialize a descriptor into a complete container under the default limit
pub fn encode(app: &AppDescriptor) -> Result<Vec<u8>> {
    encode_with_options(app, &DecodeOptions::default())
}

/// [`encode`] with explicit limits
pub fn encode_with_options(app: &AppDescriptor, options: &DecodeOptions) -> Result<Vec<u8>> {
    if app.icon.len() != ICON_SIZE {
        return Err(AppError::InvalidInput(format!(
            "icon must be {} bytes, got {}",
            ICON_SIZE,
            app.icon.len()
        )));
    }

    let total = HEADER_SIZE + app.icon.len() + app.code.len();
    let total_size = u32::try_from(total).map_err(|_| {
        AppError::InvalidInput(format!(
            "code section of {} bytes does not fit a 32-bit container",
            app.code.len()
        ))
    })?;
    if total as u64 > options.max_app_size {
        return Err(AppError::TooLarge {
            size: total as u64,
            max: options.max_app_size,
        });
    }

    // Every offset below is <= total_size, so the casts cannot truncate
    let mut header = Header::new(&app.name, &app.creator, &app.category);
    header.icon_offset = ICON_OFFSET as u32;
    header.icon_size = ICON_SIZE as u32;
    header.code_offset = CODE_OFFSET as u32;
    header.code_size = app.code.len() as u32;
    header.total_size = total_size;

    let mut out = Vec::with_capacity(total);
    out.extend_from_slice(&header.pack());
    out.extend_from_slice(&app.icon);
    out.extend_from_slice(&app.code);

    let checksum = container_checksum(&out);
    out[schema::CHECKSUM.range()].copy_from_slice(&checksum.to_le_bytes());
    Ok(out)
}

/// Validate a container under the default limit and copy it into an owned descriptor
pub fn decode(data: &[u8]) -> Result<AppDescriptor> {
    decode_with_options(data, &DecodeOptions::default())
}

/// [`decode`] with explicit limits
pub fn decode_with_options(data: &[u8], options: &DecodeOptions) -> Result<AppDescriptor> {
    decode_view(data, options).map(|view| view.to_descriptor())
}

/// Validate a container and borrow its sections from `data`
pub fn decode_view<'a>(data: &'a [u8], options: &DecodeOptions) -> Result<AppView<'a>> {
    let block = Header::block(data)?;

    let magic = schema::MAGIC.read_u32(block);
    if magic != APP_MAGIC {
        return Err(AppError::BadMagic { found: magic });
    }

    let version = schema::VERSION.read_u32(block);
    if !is_supported_version(version) {
        return Err(AppError::UnsupportedVersion { found: version });
    }

    let actual = data.len() as u64;
    if actual > options.max_app_size {
        return Err(AppError::TooLarge {
            size: actual,
            max: options.max_app_size,
        });
    }

    let recorded = schema::TOTAL_SIZE.read_u32(block);
    if u64::from(recorded) != actual {
        return Err(AppError::SizeMismatch {
            recorded,
            actual: data.len(),
        });
    }

    let (icon, code) = check_layout(block, data.len())?;

    let stored = schema::CHECKSUM.read_u32(block);
    let computed = container_checksum(data);
    if stored != computed {
        return Err(AppError::ChecksumMismatch { stored, computed });
    }

    Ok(AppView {
        version,
        name: schema::NAME.read_text(block),
        creator: schema::CREATOR.read_text(block),
        category: schema::CATEGORY.read_text(block),
        checksum: stored,
        icon: &data[icon],
        code: &data[code],
    })
}

type Span = std::ops::Range<usize>;

/// Check section bookkeeping against a buffer of `len` bytes and return the
/// icon and code ranges
fn check_layout(block: &[u8; HEADER_SIZE], len: usize) -> Result<(Span, Span)> {
    let icon = section(block, schema::ICON_OFFSET, schema::ICON_SIZE, "icon")?;
    let code = section(block, schema::CODE_OFFSET, schema::CODE_SIZE, "code")?;

    if icon.start != ICON_OFFSET {
        return Err(AppError::LayoutCorrupt(format!(
            "icon section starts at {}, expected {}",
            icon.start, ICON_OFFSET
        )));
    }
    if icon.len() != ICON_SIZE {
        return Err(AppError::LayoutCorrupt(format!(
            "icon section is {} bytes, expected {}",
            icon.len(),
            ICON_SIZE
        )));
    }
    if code.start != icon.end {
        return Err(AppError::LayoutCorrupt(format!(
            "code section starts at {}, expected {} (end of icon)",
            code.start, icon.end
        )));
    }
    if code.end != len {
        return Err(AppError::LayoutCorrupt(format!(
            "code section ends at {}, container is {} bytes",
            code.end, len
        )));
    }
    Ok((icon, code))
}

fn section(
    block: &[u8; HEADER_SIZE],
    offset: schema::Field,
    size: schema::Field,
    what: &str,
) -> Result<Span> {
    let start = offset.read_u32(block) as usize;
    let len = size.read_u32(block) as usize;
    let end = start.checked_add(len).ok_or_else(|| {
        AppError::LayoutCorrupt(format!("{what} section {start}+{len} overflows"))
    })?;
    Ok(start..end)
}
