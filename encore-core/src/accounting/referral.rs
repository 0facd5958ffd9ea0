//! Referral bonus propagation
//!
//! A bound referee earns their referrer one bonus unit per
//! `plays_per_bonus_unit` new qualifying plays. Fractional progress is
//! carried per referee on the referrer's record; a shared scalar would let
//! one referee's partial progress be consumed by another's update.

use crate::listener::ListenerRecord;

/// Credit the referrer for `new_plays` freshly deduplicated plays by
/// `referee_id`, returning the whole bonus units awarded
///
/// The referee's fractional remainder is left in `[0, 1)`.
pub fn propagate_bonus(
    referrer: &mut ListenerRecord,
    referee_id: &str,
    new_plays: u64,
    plays_per_bonus_unit: u32,
) -> u64 {
    if new_plays == 0 || plays_per_bonus_unit == 0 {
        return 0;
    }

    let remainder = referrer
        .fractional_remainders
        .entry(referee_id.to_string())
        .or_insert(0.0);

    *remainder += new_plays as f64 / plays_per_bonus_unit as f64;
    let whole_units = remainder.floor() as u64;
    *remainder -= whole_units as f64;

    referrer.bonus_units += whole_units;
    whole_units
}

#[cfg(test)]
mod tests {
    use super::*;

    fn referrer() -> ListenerRecord {
        ListenerRecord::new("referrer-wallet")
    }

    #[test]
    fn test_four_plays_in_one_update_yield_one_unit() {
        let mut record = referrer();
        let awarded = propagate_bonus(&mut record, "referee", 4, 4);

        assert_eq!(awarded, 1);
        assert_eq!(record.bonus_units, 1);
        assert_eq!(record.fractional_remainders["referee"], 0.0);
    }

    #[test]
    fn test_remainder_carries_across_updates() {
        let mut record = referrer();
        for _ in 0..4 {
            propagate_bonus(&mut record, "referee", 1, 4);
        }

        assert_eq!(record.bonus_units, 1);
        assert_eq!(record.fractional_remainders["referee"], 0.0);
    }

    #[test]
    fn test_remainder_stays_below_one() {
        let mut record = referrer();
        propagate_bonus(&mut record, "referee", 7, 4);

        assert_eq!(record.bonus_units, 1);
        let remainder = record.fractional_remainders["referee"];
        assert!((0.0..1.0).contains(&remainder));
        assert!((remainder - 0.75).abs() < 1e-9);
    }

    #[test]
    fn test_per_referee_isolation() {
        // A's partial progress must never be consumed by B's update
        let mut record = referrer();
        propagate_bonus(&mut record, "referee-a", 2, 4);
        propagate_bonus(&mut record, "referee-b", 2, 4);

        assert_eq!(record.bonus_units, 0);
        assert_eq!(record.fractional_remainders["referee-a"], 0.5);
        assert_eq!(record.fractional_remainders["referee-b"], 0.5);

        // A finishing their four plays awards exactly one unit
        propagate_bonus(&mut record, "referee-a", 2, 4);
        assert_eq!(record.bonus_units, 1);
        assert_eq!(record.fractional_remainders["referee-a"], 0.0);
        assert_eq!(record.fractional_remainders["referee-b"], 0.5);
    }

    #[test]
    fn test_zero_new_plays_is_noop() {
        let mut record = referrer();
        assert_eq!(propagate_bonus(&mut record, "referee", 0, 4), 0);
        assert!(record.fractional_remainders.is_empty());
    }

    #[test]
    fn test_bonus_units_only_increase() {
        let mut record = referrer();
        propagate_bonus(&mut record, "referee", 5, 4);
        let after_first = record.bonus_units;
        propagate_bonus(&mut record, "referee", 1, 4);
        assert!(record.bonus_units >= after_first);
    }
}
