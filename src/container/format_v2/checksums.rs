//! Checksum utilities.
//!
//! The container checksum is CRC-32 (IEEE, as zlib computes it) over the whole
//! file with the checksum field read as zero. Both the encoder and the decoder
//! go through [`container_checksum`].
//!
//! Whole-file fingerprints use a prefixed format: "algorithm:hexvalue"
//! (e.g. "crc32:1c291ca3", "sha256:cafe8008...").

use super::schema::CHECKSUM;
use flate2::Crc;
use sha2::{Digest, Sha256};
use std::fmt;

/// CRC-32 of a container with the checksum field treated as zero.
///
/// Bytes of the checksum field that lie beyond the end of `data` are ignored.
pub fn container_checksum(data: &[u8]) -> u32 {
    let field = CHECKSUM.range();
    let mut crc = Crc::new();
    if data.len() < field.end {
        crc.update(data);
        return crc.sum();
    }
    crc.update(&data[..field.start]);
    crc.update(&[0u8; 4]);
    crc.update(&data[field.end..]);
    crc.sum()
}

/// Supported fingerprint algorithms
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChecksumAlgorithm {
    Crc32,
    Adler32,
    Sha256,
}

impl fmt::Display for ChecksumAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChecksumAlgorithm::Crc32 => write!(f, "crc32"),
            ChecksumAlgorithm::Adler32 => write!(f, "adler32"),
            ChecksumAlgorithm::Sha256 => write!(f, "sha256"),
        }
    }
}

/// Parse a checksum string that may or may not have a prefix
pub fn parse_checksum(checksum_str: &str) -> Result<(ChecksumAlgorithm, String), String> {
    if let Some((prefix, value)) = checksum_str.split_once(':') {
        let algo = match prefix.to_ascii_lowercase().as_str() {
            "crc32" => ChecksumAlgorithm::Crc32,
            "adler32" => ChecksumAlgorithm::Adler32,
            "sha256" => ChecksumAlgorithm::Sha256,
            other => return Err(format!("Unknown checksum algorithm: {other}")),
        };
        return Ok((algo, value.to_ascii_lowercase()));
    }

    // Bare hex - guess from the length
    let algo = match checksum_str.len() {
        8 => ChecksumAlgorithm::Crc32,
        64 => ChecksumAlgorithm::Sha256,
        n => return Err(format!("Cannot infer checksum algorithm from {n} hex digits")),
    };
    Ok((algo, checksum_str.to_ascii_lowercase()))
}

/// Prefixed fingerprint of a byte slice
pub fn calculate_checksum_bytes(data: &[u8], algorithm: ChecksumAlgorithm) -> String {
    match algorithm {
        ChecksumAlgorithm::Crc32 => {
            let mut crc = Crc::new();
            crc.update(data);
            format!("crc32:{:08x}", crc.sum())
        }
        ChecksumAlgorithm::Adler32 => {
            format!("adler32:{:08x}", adler::adler32_slice(data))
        }
        ChecksumAlgorithm::Sha256 => {
            format!("sha256:{}", hex::encode(Sha256::digest(data)))
        }
    }
}

/// Verify data against a checksum string
pub fn verify_checksum(data: &[u8], checksum_str: &str) -> Result<bool, String> {
    let (algo, expected) = parse_checksum(checksum_str)?;
    let actual = calculate_checksum_bytes(data, algo);
    let actual_hex = actual.split_once(':').map_or(actual.as_str(), |(_, v)| v);
    Ok(actual_hex == expected)
}
