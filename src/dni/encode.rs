use log::{debug, trace};
use thiserror::Error;

use super::board::is_special_board;
use super::checksum::dni_checksum;
use super::header::{DniHeader, HEADER_LEN};

/// Image version written when the caller does not supply one.
pub const DEFAULT_VERSION: &str = "1.00.00";

/// Bytes added around the payload of a non-special board.
pub const IMAGE_OVERHEAD: usize = HEADER_LEN + 1;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum EncodeError {
    #[error("no memory for buffer ({size} bytes)")]
    AllocationFailed { size: usize },
}

/**
 * Everything needed to build one image. Values are raw bytes and end up in
 * the header verbatim. The board id is expected to be non-empty; rejecting a
 * missing board is up to the caller.
 */
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodingRequest {
    board_id: Vec<u8>,
    version: Vec<u8>,
    region: Vec<u8>,
    hardware_id: Option<Vec<u8>>,
    payload: Vec<u8>,
}

impl EncodingRequest {
    pub fn new(board_id: impl Into<Vec<u8>>, payload: Vec<u8>) -> Self {
        Self {
            board_id: board_id.into(),
            version: DEFAULT_VERSION.into(),
            region: Vec::new(),
            hardware_id: None,
            payload,
        }
    }

    pub fn version(mut self, version: impl Into<Vec<u8>>) -> Self {
        self.version = version.into();
        self
    }

    pub fn region(mut self, region: impl Into<Vec<u8>>) -> Self {
        self.region = region.into();
        self
    }

    pub fn hardware_id<T: Into<Vec<u8>>>(mut self, hardware_id: Option<T>) -> Self {
        self.hardware_id = hardware_id.map(Into::into);
        self
    }
}

/**
 * Builds the flashable image for `request`.
 *
 * Special boards get their payload back untouched. Every other board gets
 *  [ header (128) | payload | checksum (1) ]
 * assembled in a single buffer, where the checksum covers the header and the
 * payload.
 */
pub fn encode(request: EncodingRequest) -> Result<Vec<u8>, EncodeError> {
    if is_special_board(&request.board_id) {
        debug!(
            "Board '{}' takes a bare image ({} bytes)",
            String::from_utf8_lossy(&request.board_id),
            request.payload.len()
        );
        return Ok(request.payload);
    }

    let header = DniHeader::new(
        &request.board_id,
        &request.version,
        &request.region,
        request.hardware_id.as_deref(),
    );
    debug!(
        "DNI header for '{}': {} text bytes, hd_id line {:?}",
        String::from_utf8_lossy(&request.board_id),
        header.text_len(),
        header.hd_id_line()
    );

    let payload_len = request.payload.len();
    let size = payload_len
        .checked_add(IMAGE_OVERHEAD)
        .ok_or(EncodeError::AllocationFailed { size: usize::MAX })?;
    let mut image: Vec<u8> = Vec::new();
    image
        .try_reserve_exact(size)
        .map_err(|_| EncodeError::AllocationFailed { size })?;

    // Offsets: 0 for the header, HEADER_LEN for the payload, then checksum
    image.extend_from_slice(header.as_bytes());
    image.extend_from_slice(&request.payload);
    let cs = dni_checksum(&image);
    image.push(cs);
    trace!("Checksum 0x{:02x} over {} bytes", cs, HEADER_LEN + payload_len);

    Ok(image)
}

//----------------------------------------------------------------------------
// Tests
//----------------------------------------------------------------------------
