//! High-level API for appbundle operations

use crate::container::format_v2::checksums::{self, ChecksumAlgorithm};
use crate::container::format_v2::constants::ICON_SIZE;
use crate::container::format_v2::defaults::{
    DEFAULT_APP_EXTENSION, DEFAULT_CODE_SIZE, get_max_app_size,
};
use crate::container::format_v2::{self, AppCategory, AppDescriptor, DecodeOptions, icon};
use crate::container::{self, ContainerFormat};
use crate::exceptions::{AppError, Result};
use log::{debug, info, warn};
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Options for building an app container
#[derive(Debug, Default)]
pub struct BuildOptions {
    /// Output path; defaults to `<name with '_' for spaces>.app`
    pub output: Option<PathBuf>,
    /// Raw RGB565 icon file; defaults to the gradient test pattern
    pub icon_path: Option<PathBuf>,
    /// Code blob file; defaults to a zero-filled placeholder
    pub code_path: Option<PathBuf>,
    /// Size limit for the written container; defaults to the configured maximum
    pub max_app_size: Option<u64>,
    /// Skip re-reading and decoding the written file
    pub skip_verification: bool,
}

/// Options for inspecting an app container
#[derive(Debug, Default)]
pub struct InspectOptions {
    /// Size limit; defaults to the configured maximum
    pub max_app_size: Option<u64>,
}

/// Summary of a valid container, as reported to users
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AppInfo {
    pub path: PathBuf,
    pub format: String,
    pub version: u32,
    pub name: String,
    pub creator: String,
    pub category: String,
    pub category_kind: AppCategory,
    pub total_size: usize,
    pub icon_size: usize,
    pub code_size: usize,
    pub checksum: String,
    pub sha256: String,
}

impl AppInfo {
    /// Pretty-printed JSON for machine consumers
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Default output file name for an app name
pub fn default_output_path(name: &str) -> PathBuf {
    PathBuf::from(format!(
        "{}.{}",
        name.replace(' ', "_"),
        DEFAULT_APP_EXTENSION
    ))
}

/// Encode an app from its fields and write it to disk
pub fn build_app(
    name: &str,
    creator: &str,
    category: &str,
    options: BuildOptions,
) -> Result<AppInfo> {
    let output = options
        .output
        .clone()
        .unwrap_or_else(|| default_output_path(name));
    let max_app_size = options.max_app_size.unwrap_or_else(get_max_app_size);

    if AppCategory::parse(category).is_none() {
        warn!(
            "Category {category:?} is not a launcher category; it will be shown as \"other\""
        );
    }

    let icon = match &options.icon_path {
        Some(path) => {
            debug!("Loading icon from {path:?}");
            fs::read(path)?
        }
        None => icon::test_pattern(),
    };
    if icon.len() != ICON_SIZE {
        return Err(AppError::InvalidInput(format!(
            "icon file must hold {} bytes of RGB565 pixels, got {}",
            ICON_SIZE,
            icon.len()
        )));
    }

    let code = match &options.code_path {
        Some(path) => {
            debug!("Loading code from {path:?}");
            fs::read(path)?
        }
        None => vec![0u8; DEFAULT_CODE_SIZE],
    };

    let app = AppDescriptor::new(name, creator, category, icon, code);
    let limits = DecodeOptions::with_max_app_size(max_app_size);
    let bytes = format_v2::encode_with_options(&app, &limits)?;

    fs::write(&output, &bytes)?;
    info!("Wrote {} bytes to {:?}", bytes.len(), output);

    if options.skip_verification {
        return summarize(&output, ContainerFormat::AppV2, &bytes, &limits);
    }
    inspect_app(
        &output,
        InspectOptions {
            max_app_size: Some(max_app_size),
        },
    )
}

/// Load and fully validate a container file
pub fn inspect_app(path: &Path, options: InspectOptions) -> Result<AppInfo> {
    info!("Inspecting app container: {path:?}");
    let decode_options = DecodeOptions::with_max_app_size(
        options.max_app_size.unwrap_or_else(get_max_app_size),
    );

    let format = container::detect_format(path)?;

    // Refuse before allocating for oversized files
    let size = fs::metadata(path)?.len();
    if size > decode_options.max_app_size {
        return Err(AppError::TooLarge {
            size,
            max: decode_options.max_app_size,
        });
    }

    let bytes = fs::read(path)?;
    summarize(path, format, &bytes, &decode_options)
}

fn summarize(
    path: &Path,
    format: ContainerFormat,
    bytes: &[u8],
    options: &DecodeOptions,
) -> Result<AppInfo> {
    let view = format_v2::decode_view(bytes, options)?;
    debug!(
        "Decoded {:?} by {:?}: icon {} bytes, code {} bytes",
        view.name,
        view.creator,
        view.icon.len(),
        view.code.len()
    );

    Ok(AppInfo {
        path: path.to_path_buf(),
        format: format.name().to_string(),
        version: view.version,
        name: view.name.to_string(),
        creator: view.creator.to_string(),
        category: view.category.to_string(),
        category_kind: view.category_kind(),
        total_size: bytes.len(),
        icon_size: view.icon.len(),
        code_size: view.code.len(),
        checksum: format!("crc32:{:08x}", view.checksum),
        sha256: checksums::calculate_checksum_bytes(bytes, ChecksumAlgorithm::Sha256),
    })
}

/// Compare a file against a published fingerprint such as `sha256:…`
pub fn verify_app_checksum(path: &Path, expected: &str) -> Result<bool> {
    let bytes = fs::read(path)?;
    let matches = checksums::verify_checksum(&bytes, expected).map_err(AppError::Generic)?;
    debug!("Fingerprint {expected} for {path:?}: {}", if matches { "match" } else { "MISMATCH" });
    Ok(matches)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn build_in(dir: &TempDir, name: &str, options: BuildOptions) -> Result<AppInfo> {
        build_app(
            name,
            "Acme",
            "utility",
            BuildOptions {
                output: Some(dir.path().join(default_output_path(name))),
                ..options
            },
        )
    }

    #[test]
    fn test_app_info_to_json() {
        let dir = TempDir::new().unwrap();
        let info = build_in(&dir, "Calculator", BuildOptions::default()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&info.to_json().unwrap()).unwrap();
        assert_eq!(value["name"], "Calculator");
        assert_eq!(value["category_kind"], "utility");
        assert_eq!(value["total_size"], 33920);
    }

    #[test]
    fn test_default_output_path() {
        assert_eq!(
            default_output_path("My Cool App"),
            PathBuf::from("My_Cool_App.app")
        );
    }

    #[test]
    fn test_build_and_inspect() {
        let dir = TempDir::new().unwrap();
        let built = build_in(&dir, "Calculator", BuildOptions::default()).unwrap();
        assert_eq!(built.total_size, 33920);
        assert_eq!(built.code_size, DEFAULT_CODE_SIZE);
        assert_eq!(built.category_kind, AppCategory::Utility);

        let path = dir.path().join("Calculator.app");
        let inspected = inspect_app(&path, InspectOptions::default()).unwrap();
        assert_eq!(inspected, built);
        assert_eq!(inspected.name, "Calculator");
        assert!(inspected.checksum.starts_with("crc32:"));

        let decoded = format_v2::decode(&fs::read(&path).unwrap()).unwrap();
        assert_eq!(decoded.icon, icon::test_pattern());
    }

    #[test]
    fn test_build_with_custom_inputs() {
        let dir = TempDir::new().unwrap();
        let icon_path = dir.path().join("icon.rgb565");
        let code_path = dir.path().join("code.bin");
        fs::write(&icon_path, vec![0xFFu8; ICON_SIZE]).unwrap();
        fs::write(&code_path, b"\x01\x02\x03").unwrap();

        let info = build_in(
            &dir,
            "Paint",
            BuildOptions {
                icon_path: Some(icon_path),
                code_path: Some(code_path),
                ..Default::default()
            },
        )
        .unwrap();
        assert_eq!(info.code_size, 3);

        let decoded =
            format_v2::decode(&fs::read(dir.path().join("Paint.app")).unwrap()).unwrap();
        assert_eq!(decoded.code, b"\x01\x02\x03");
        assert!(decoded.icon.iter().all(|&b| b == 0xFF));
    }

    #[test]
    fn test_build_rejects_wrong_icon_size() {
        let dir = TempDir::new().unwrap();
        let icon_path = dir.path().join("icon.raw");
        fs::write(&icon_path, vec![0u8; 100]).unwrap();
        let err = build_in(
            &dir,
            "Broken",
            BuildOptions {
                icon_path: Some(icon_path),
                ..Default::default()
            },
        )
        .unwrap_err();
        assert!(matches!(err, AppError::InvalidInput(_)));
        assert!(!dir.path().join("Broken.app").exists());
    }

    #[test]
    fn test_build_respects_size_limit() {
        let dir = TempDir::new().unwrap();
        let err = build_in(
            &dir,
            "Huge",
            BuildOptions {
                max_app_size: Some(1000),
                ..Default::default()
            },
        )
        .unwrap_err();
        assert!(matches!(err, AppError::TooLarge { size: 33920, max: 1000 }));
    }

    #[test]
    fn test_inspect_rejects_oversized_file_before_reading() {
        let dir = TempDir::new().unwrap();
        build_in(&dir, "Calculator", BuildOptions::default()).unwrap();
        let err = inspect_app(
            &dir.path().join("Calculator.app"),
            InspectOptions {
                max_app_size: Some(4096),
            },
        )
        .unwrap_err();
        assert!(matches!(err, AppError::TooLarge { .. }));
    }

    #[test]
    fn test_inspect_reports_failure_kinds() {
        let dir = TempDir::new().unwrap();
        build_in(&dir, "Calculator", BuildOptions::default()).unwrap();
        let path = dir.path().join("Calculator.app");
        let mut bytes = fs::read(&path).unwrap();

        let last = bytes.len() - 1;
        bytes[last] ^= 0x80;
        fs::write(&path, &bytes).unwrap();
        assert!(matches!(
            inspect_app(&path, InspectOptions::default()),
            Err(AppError::ChecksumMismatch { .. })
        ));

        let other = dir.path().join("notes.txt");
        fs::write(&other, "just some text, definitely not an app").unwrap();
        assert!(matches!(
            inspect_app(&other, InspectOptions::default()),
            Err(AppError::BadMagic { .. })
        ));

        assert!(matches!(
            inspect_app(&dir.path().join("missing.app"), InspectOptions::default()),
            Err(AppError::IoError(_))
        ));
    }

    #[test]
    fn test_verify_app_checksum() {
        let dir = TempDir::new().unwrap();
        let info = build_in(&dir, "Calculator", BuildOptions::default()).unwrap();
        let path = dir.path().join("Calculator.app");

        assert!(verify_app_checksum(&path, &info.sha256).unwrap());
        let crc = checksums::calculate_checksum_bytes(
            &fs::read(&path).unwrap(),
            ChecksumAlgorithm::Crc32,
        );
        assert!(verify_app_checksum(&path, &crc).unwrap());
        assert!(!verify_app_checksum(&path, "crc32:00000000").unwrap());
        assert!(matches!(
            verify_app_checksum(&path, "md5:abc"),
            Err(AppError::Generic(_))
        ));
    }
}
