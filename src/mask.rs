//! Bucket index arithmetic.
//!
//! The bucket count is always a power of two and is stored as its base-2
//! logarithm. A bucket index is the low-order bits of a hash:
//!
//! ```text
//! log2 = 2   count = 0b100   mask = 0b011
//! hash = 0b1010_1010_1010_1   index = hash & mask = 0b01
//! ```
//!
//! This works on the integer value, so byte order never matters.

/// Largest supported `log2` of the bucket count
pub const MAX_BUCKET_COUNT_LOG2: u8 = 32;

/// Number of buckets for a given `log2` (`1 << log2`)
#[inline]
pub const fn bucket_count(log2: u8) -> u64 {
    debug_assert!(log2 <= MAX_BUCKET_COUNT_LOG2);
    1 << log2
}

/// Contiguous low-bit mask for a given `log2`
///
/// `log2 = 3` gives `0b111`.
#[inline]
pub const fn bucket_mask(log2: u8) -> u64 {
    bucket_count(log2) - 1
}

/// Bucket index of `hash`, equal to `hash % bucket_count(log2)`
#[inline]
pub const fn bucket_index(hash: u64, log2: u8) -> u64 {
    hash & bucket_mask(log2)
}

/// Bit that joins the mask when growing from `log2` to `log2 + 1`
#[inline]
pub const fn split_bit(log2: u8) -> u64 {
    bucket_count(log2)
}

/// Returns `value` with all of `bits` set
#[inline]
pub const fn set_bits(value: u64, bits: u64) -> u64 {
    value | bits
}

/// Returns `true` if any of `bits` is set in `value`
#[inline]
pub const fn has_bits(value: u64, bits: u64) -> bool {
    value & bits != 0
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_log::test;

    #[test]
    fn test_bucket_count() {
        assert_eq!(bucket_count(0), 1);
        assert_eq!(bucket_count(2), 4);
        assert_eq!(bucket_count(MAX_BUCKET_COUNT_LOG2), 1 << 32);
    }

    #[test]
    fn test_bucket_mask() {
        assert_eq!(bucket_mask(0), 0);
        assert_eq!(bucket_mask(2), 0b11);
        assert_eq!(bucket_mask(3), 0b111);
        assert_eq!(bucket_mask(MAX_BUCKET_COUNT_LOG2), u64::from(u32::MAX));
    }

    #[test]
    fn test_bucket_index_low_bits() {
        let hash = 0b1_0101_0101_0101;
        assert_eq!(bucket_index(hash, 0), 0);
        assert_eq!(bucket_index(hash, 2), 0b01);
        assert_eq!(bucket_index(hash, 3), 0b101);

        // hard-coded hash from the original walkthrough, 4 buckets
        assert_eq!(bucket_index(2_232_323_424, 2), 2_232_323_424 % 4);
    }

    #[test]
    fn test_bucket_index_ignores_byte_order() {
        let hash = 0x0102_0304_0506_0708u64;
        let swapped = hash.swap_bytes();
        assert_eq!(bucket_index(hash, 8), 0x08);
        assert_eq!(bucket_index(swapped, 8), 0x01);
        assert_eq!(bucket_index(u64::from_le_bytes(hash.to_le_bytes()), 8), 0x08);
    }

    #[test]
    fn test_split_bit() {
        for log2 in 0..MAX_BUCKET_COUNT_LOG2 {
            let bit = split_bit(log2);
            assert_eq!(bucket_mask(log2 + 1), set_bits(bucket_mask(log2), bit));
            assert!(!has_bits(bucket_mask(log2), bit));
        }
    }

    #[test]
    fn test_split_halves() {
        let log2 = 3;
        for hash in [0u64, 5, 8, 13, 0xFFFF, 0x1234_5678_9ABC_DEF0] {
            let old = bucket_index(hash, log2);
            let new = bucket_index(hash, log2 + 1);
            if has_bits(hash, split_bit(log2)) {
                assert_eq!(new, set_bits(old, split_bit(log2)));
            } else {
                assert_eq!(new, old);
            }
        }
    }
}
