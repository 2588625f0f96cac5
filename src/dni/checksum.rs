use std::num::Wrapping;

/**
 * One's-complement of the modulo-256 sum of `data`, as expected by the DNI
 * bootloaders in the last byte of an image.
 */
pub fn dni_checksum(data: &[u8]) -> u8 {
    let mut cs: Wrapping<u8> = Wrapping(0);
    for x in data.iter() {
        cs += Wrapping(*x);
    }
    (Wrapping(0xff) - cs).0
}

//----------------------------------------------------------------------------
// Tests
//----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::dni_checksum;

    #[test]
    fn empty_data_sums_to_zero() {
        assert_eq!(dni_checksum(&[]), 0xff);
    }

    #[test]
    fn accumulation_wraps() {
        // 0xff + 0x01 == 0x00 (mod 256)
        assert_eq!(dni_checksum(&[0xff, 0x01]), 0xff);
        assert_eq!(dni_checksum(&[0x80, 0x80, 0x80]), 0x7f);
        assert_eq!(dni_checksum(&[0x10, 0x20]), 0xcf);
    }

    #[test]
    fn appending_checksum_gives_all_ones() {
        let data: Vec<u8> = (0..=255u8).chain(0..17).collect();
        let cs = dni_checksum(&data);
        let total = data
            .iter()
            .chain(std::iter::once(&cs))
            .fold(0u8, |s, x| s.wrapping_add(*x));
        assert_eq!(total, 0xff);
    }
}
