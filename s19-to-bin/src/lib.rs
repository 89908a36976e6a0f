//! Convert a Motorola S-record (S19) memory image into a flat binary image.
//!
//! Only the 16-bit address record types are interpreted: `S0` header,
//! `S1` data and `S9` termination. Data bytes land at their record address,
//! so the resulting image starts at address zero.

use log::{debug, info, warn};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SRecordError {
    #[error("line {line}: record too short ({len} characters)")]
    TooShort { line: usize, len: usize },

    #[error("line {line}: record contains non-ASCII characters")]
    NonAscii { line: usize },

    #[error("line {line}: invalid hex in {field}: `{text}`")]
    InvalidHex {
        line: usize,
        field: &'static str,
        text: String,
    },
}

/// One parsed record line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SRecord {
    pub record_type: String,
    pub byte_count: u8,
    pub address: u16,
    pub data: Vec<u8>,
    pub checksum: u8,
}

impl SRecord {
    /// Parse a single trimmed record line.
    pub fn parse(line_no: usize, line: &str) -> Result<Self, SRecordError> {
        if !line.is_ascii() {
            return Err(SRecordError::NonAscii { line: line_no });
        }
        // type (2) + count (2) + address (4) + checksum (2)
        if line.len() < 10 {
            return Err(SRecordError::TooShort {
                line: line_no,
                len: line.len(),
            });
        }

        let record_type = line[..2].to_string();
        let byte_count = parse_u8(line_no, "byte count", &line[2..4])?;
        let address = parse_u16(line_no, "address", &line[4..8])?;
        let data = decode_hex(line_no, &line[8..line.len() - 2])?;
        let checksum = parse_u8(line_no, "checksum", &line[line.len() - 2..])?;

        Ok(Self {
            record_type,
            byte_count,
            address,
            data,
            checksum,
        })
    }

    /// One's complement of the low byte of the sum of count, address and data.
    pub fn expected_checksum(&self) -> u8 {
        let [hi, lo] = self.address.to_be_bytes();
        let header = u32::from(self.byte_count) + u32::from(hi) + u32::from(lo);
        let sum = self.data.iter().fold(header, |acc, b| acc + u32::from(*b));
        !(sum as u8)
    }

    pub fn checksum_ok(&self) -> bool {
        self.checksum == self.expected_checksum()
    }
}

fn parse_u8(line: usize, field: &'static str, text: &str) -> Result<u8, SRecordError> {
    u8::from_str_radix(text, 16).map_err(|_| SRecordError::InvalidHex {
        line,
        field,
        text: text.to_string(),
    })
}

fn parse_u16(line: usize, field: &'static str, text: &str) -> Result<u16, SRecordError> {
    u16::from_str_radix(text, 16).map_err(|_| SRecordError::InvalidHex {
        line,
        field,
        text: text.to_string(),
    })
}

fn decode_hex(line: usize, text: &str) -> Result<Vec<u8>, SRecordError> {
    if text.len() % 2 != 0 {
        return Err(SRecordError::InvalidHex {
            line,
            field: "data",
            text: text.to_string(),
        });
    }
    (0..text.len())
        .step_by(2)
        .map(|i| parse_u8(line, "data", &text[i..i + 2]))
        .collect()
}

/// Convert the text of an S19 file into a memory image.
///
/// The image grows to cover the highest written address; gaps are zero.
/// Later records overwrite earlier ones at the same address.
pub fn convert(s19: &str) -> Result<Vec<u8>, SRecordError> {
    let mut image: Vec<u8> = Vec::new();

    for (idx, line) in s19.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let record = SRecord::parse(idx + 1, line)?;
        if !record.checksum_ok() {
            warn!(
                "line {}: checksum {:02X} does not match computed {:02X}",
                idx + 1,
                record.checksum,
                record.expected_checksum()
            );
        }

        match record.record_type.as_str() {
            "S0" => info!("S0 (Header): {}", String::from_utf8_lossy(&record.data)),
            "S1" => {
                debug!(
                    "S1 (Data): {} bytes at {:04X}",
                    record.data.len(),
                    record.address
                );
                let start = usize::from(record.address);
                let end = start + record.data.len();
                if image.len() < end {
                    image.resize(end, 0);
                }
                image[start..end].copy_from_slice(&record.data);
            }
            "S9" => info!("S9 (Termination): start address {:04X}", record.address),
            other => warn!("line {}: ignoring {} record", idx + 1, other),
        }
    }

    Ok(image)
}
