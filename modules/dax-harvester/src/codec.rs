//! Mapping between source tweet ids (`u64`) and the signed `BIGINT` column.
//!
//! The unsigned range is shifted down by 2^63, so `0` lands on `i64::MIN` and
//! `u64::MAX` on `i64::MAX`. Ordering is preserved on both sides.

/// Source id to storage id.
pub fn encode(id: u64) -> i64 {
    (id as i64).wrapping_add(i64::MIN)
}

/// Storage id back to source id.
pub fn decode(stored: i64) -> u64 {
    stored.wrapping_sub(i64::MIN) as u64
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn range_endpoints() {
        assert_eq!(encode(0), i64::MIN);
        assert_eq!(encode(u64::MAX), i64::MAX);
        assert_eq!(encode(1 << 63), 0);
        assert_eq!(decode(i64::MIN), 0);
        assert_eq!(decode(i64::MAX), u64::MAX);
        assert_eq!(decode(0), 1 << 63);
    }

    #[test]
    fn real_tweet_id() {
        let id = 1_050_118_621_198_921_728;
        assert_eq!(decode(encode(id)), id);
        assert!(encode(id) < 0);
    }

    proptest! {
        #[test]
        fn round_trips(x in any::<u64>()) {
            prop_assert_eq!(decode(encode(x)), x);
        }

        #[test]
        fn storage_round_trips(s in any::<i64>()) {
            prop_assert_eq!(encode(decode(s)), s);
        }

        #[test]
        fn preserves_order(x in any::<u64>(), y in any::<u64>()) {
            prop_assert_eq!(x.cmp(&y), encode(x).cmp(&encode(y)));
        }
    }
}
