/// Size of the DNI header, in bytes.
pub const HEADER_LEN: usize = 128;

/// What became of the `hd_id:` line while the header was built.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HdIdLine {
    /// No hardware id was requested.
    Absent,
    /// The whole line is in the header.
    Recorded,
    /// The line was started but cut short by the end of the header.
    Truncated,
    /// Fewer than two bytes were left, so nothing was written.
    Omitted,
}

/**
 * The fixed-size DNI header: `key:value` text lines starting at byte 0,
 * zero-padded to [`HEADER_LEN`] bytes.
 *
 * Values are copied byte for byte, without escaping or validation. The text
 * never reaches the last byte, which is kept as a terminator for the
 * bootloader's string parser. When the `hd_id` line does not fit it is cut or
 * dropped without error, so a caller that cares must check [`hd_id_line`].
 *
 * [`hd_id_line`]: DniHeader::hd_id_line
 */
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DniHeader {
    bytes: [u8; HEADER_LEN],
    text_len: usize,
    hd_id: HdIdLine,
}

impl DniHeader {
    pub fn new(board_id: &[u8], version: &[u8], region: &[u8], hardware_id: Option<&[u8]>) -> Self {
        let mut bytes = [0u8; HEADER_LEN];

        let pos = bounded_copy(
            &mut bytes,
            &[
                b"device:",
                board_id,
                b"\nversion:V",
                version,
                b"\nregion:",
                region,
                b"\n",
            ],
        );
        let mut text_len = pos.min(HEADER_LEN - 1);

        let hd_id = match (hardware_id, HEADER_LEN.checked_sub(pos)) {
            (None, _) => HdIdLine::Absent,
            (Some(id), Some(rem)) if rem > 1 => {
                let len = bounded_copy(&mut bytes[pos..], &[b"hd_id:", id, b"\n"]);
                text_len = pos + len.min(rem - 1);
                if len < rem {
                    HdIdLine::Recorded
                } else {
                    log::debug!("Line 'hd_id:' cut to {} of {} bytes", rem - 1, len);
                    HdIdLine::Truncated
                }
            }
            (Some(_), _) => {
                log::debug!("No room left for 'hd_id:' (header text is {} bytes)", pos);
                HdIdLine::Omitted
            }
        };

        Self {
            bytes,
            text_len,
            hd_id,
        }
    }

    pub fn as_bytes(&self) -> &[u8; HEADER_LEN] {
        &self.bytes
    }

    /// Number of text bytes actually stored; everything after is zero.
    pub fn text_len(&self) -> usize {
        self.text_len
    }

    pub fn hd_id_line(&self) -> HdIdLine {
        self.hd_id
    }

    /// True only when the complete `hd_id:` line made it into the header.
    pub fn has_hardware_id(&self) -> bool {
        self.hd_id == HdIdLine::Recorded
    }
}

/**
 * Copies `parts` back to back into `dst` the way `snprintf` formats: at most
 * `dst.len() - 1` bytes are stored, and the untruncated length is returned.
 */
fn bounded_copy(dst: &mut [u8], parts: &[&[u8]]) -> usize {
    let limit = dst.len().saturating_sub(1);
    let mut filled = 0;
    let mut wanted = 0;
    for part in parts.iter() {
        let n = limit.saturating_sub(filled).min(part.len());
        dst[filled..filled + n].copy_from_slice(&part[..n]);
        filled += n;
        wanted += part.len();
    }
    wanted
}

//----------------------------------------------------------------------------
// Tests
//----------------------------------------------------------------------------
