use lazy_static::lazy_static;
use std::collections::HashSet;

/**
 * Boards whose bootloaders expect a bare payload, without the DNI header or
 * the trailing checksum byte.
 */
pub const SPECIAL_BOARD_IDS: [&str; 2] = [
    "PINEAPPLE_TETRA",
    "WNDR4300",
    // "WNDR3700v4",
];

// Read-only after first use, so concurrent lookups need no locking
lazy_static! {
    static ref SPECIAL_BOARDS: HashSet<&'static [u8]> =
        SPECIAL_BOARD_IDS.into_iter().map(str::as_bytes).collect();
}

/// Exact, case-sensitive membership test against [`SPECIAL_BOARD_IDS`].
pub fn is_special_board(board_id: &[u8]) -> bool {
    SPECIAL_BOARDS.contains(board_id)
}

//----------------------------------------------------------------------------
// Tests
//----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn listed_boards_are_special() {
        for id in SPECIAL_BOARD_IDS.iter() {
            assert!(is_special_board(id.as_bytes()), "{} should be special", id);
        }
    }

    #[test]
    fn membership_is_exact_and_case_sensitive() {
        assert!(!is_special_board(b"wndr4300"));
        assert!(!is_special_board(b"WNDR4300v2"));
        assert!(!is_special_board(b"WNDR430"));
        assert!(!is_special_board(b" PINEAPPLE_TETRA"));
        assert!(!is_special_board(b"WNDR3700v4"));
        assert!(!is_special_board(b""));
        assert!(!is_special_board(b"WNDR4300\xff"));
    }
}
