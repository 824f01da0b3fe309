//! App container format implementations

pub mod format_v2;

use crate::exceptions::{AppError, Result};
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Supported container formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContainerFormat {
    AppV2,
}

impl ContainerFormat {
    pub fn name(&self) -> &'static str {
        match self {
            ContainerFormat::AppV2 => "APP2",
        }
    }
}

/// Identify a container from its leading magic and version words.
///
/// Only the first 8 bytes are examined; full validation is `decode`'s job.
pub fn detect_format_bytes(prefix: &[u8]) -> Result<ContainerFormat> {
    use format_v2::schema::{MAGIC, VERSION};

    let word = |field: format_v2::schema::Field| -> Option<u32> {
        let raw = prefix.get(field.range())?;
        Some(u32::from_le_bytes(raw.try_into().ok()?))
    };

    let magic = word(MAGIC).ok_or(AppError::Truncated { len: prefix.len() })?;
    if magic != format_v2::constants::APP_MAGIC {
        return Err(AppError::BadMagic { found: magic });
    }
    let version = word(VERSION).ok_or(AppError::Truncated { len: prefix.len() })?;
    if format_v2::constants::is_supported_version(version) {
        Ok(ContainerFormat::AppV2)
    } else {
        Err(AppError::UnsupportedVersion { found: version })
    }
}

/// Detect the format of a container file by reading its first 8 bytes
pub fn detect_format(path: &Path) -> Result<ContainerFormat> {
    log::trace!("Detecting format for: {:?}", path);
    let mut prefix = Vec::with_capacity(8);
    File::open(path)?.take(8).read_to_end(&mut prefix)?;
    let format = detect_format_bytes(&prefix)?;
    log::debug!("Detected {} container", format.name());
    Ok(format)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_format_bytes() {
        let mut prefix = format_v2::constants::APP_MAGIC.to_le_bytes().to_vec();
        prefix.extend_from_slice(&2u32.to_le_bytes());
        assert_eq!(detect_format_bytes(&prefix).unwrap(), ContainerFormat::AppV2);

        prefix[4] = 1;
        assert!(matches!(
            detect_format_bytes(&prefix),
            Err(AppError::UnsupportedVersion { found: 1 })
        ));

        assert!(matches!(
            detect_format_bytes(b"\x7fELF\x02\x01\x01\x00"),
            Err(AppError::BadMagic { .. })
        ));
        assert!(matches!(
            detect_format_bytes(b"2PP"),
            Err(AppError::Truncated { len: 3 })
        ));
    }

    #[test]
    fn test_detect_format_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("Calculator.app");
        let app = format_v2::AppDescriptor::new(
            "Calculator",
            "Acme",
            "utility",
            format_v2::icon::test_pattern(),
            vec![0u8; 16],
        );
        std::fs::write(&path, format_v2::encode(&app).unwrap()).unwrap();
        assert_eq!(detect_format(&path).unwrap(), ContainerFormat::AppV2);
    }
}
