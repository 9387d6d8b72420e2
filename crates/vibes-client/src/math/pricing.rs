use anchor_lang::prelude::*;

use crate::errors::ClientError;
use crate::state::PriceTier;

/// Checks that the schedule is non-empty and ascending by `start_ts`.
/// Equal start times are allowed; the later tier wins.
fn validate_schedule(schedule: &[PriceTier]) -> Result<()> {
    require!(!schedule.is_empty(), ClientError::EmptyPriceSchedule);
    if schedule.windows(2).any(|pair| pair[1].start_ts < pair[0].start_ts) {
        msg!("price schedule out of order ({} tiers)", schedule.len());
        return err!(ClientError::UnsortedPriceSchedule);
    }
    Ok(())
}

/// Returns the USD price in force at `now`.
///
/// ```text
/// price = price_usd of the LAST tier with start_ts <= now
///       = price_usd of the first tier if no tier has started yet
/// ```
pub fn current_price(schedule: &[PriceTier], now: i64) -> Result<f64> {
    validate_schedule(schedule)?;

    let tier = schedule
        .iter()
        .rev()
        .find(|tier| tier.start_ts <= now)
        .unwrap_or(&schedule[0]);
    Ok(tier.price_usd)
}

/// First tier that starts strictly after `now`, if any.
pub fn next_price_change(schedule: &[PriceTier], now: i64) -> Result<Option<PriceTier>> {
    validate_schedule(schedule)?;
    Ok(schedule.iter().find(|tier| tier.start_ts > now).copied())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tier(start_ts: i64, price_usd: f64) -> PriceTier {
        PriceTier { start_ts, price_usd }
    }

    fn schedule() -> Vec<PriceTier> {
        vec![tier(100, 1.0), tier(100, 2.0), tier(200, 3.0)]
    }

    #[test]
    fn test_later_duplicate_tier_wins() {
        assert_eq!(current_price(&schedule(), 150).unwrap(), 2.0);
        assert_eq!(current_price(&schedule(), 100).unwrap(), 2.0);
    }

    #[test]
    fn test_before_first_tier_uses_first_price() {
        assert_eq!(current_price(&schedule(), 50).unwrap(), 1.0);
        assert_eq!(current_price(&schedule(), i64::MIN).unwrap(), 1.0);
    }

    #[test]
    fn test_tier_boundaries() {
        assert_eq!(current_price(&schedule(), 199).unwrap(), 2.0);
        assert_eq!(current_price(&schedule(), 200).unwrap(), 3.0);
        assert_eq!(current_price(&schedule(), i64::MAX).unwrap(), 3.0);
    }

    #[test]
    fn test_single_tier() {
        let schedule = vec![tier(1_000, 0.01)];
        assert_eq!(current_price(&schedule, 0).unwrap(), 0.01);
        assert_eq!(current_price(&schedule, 5_000).unwrap(), 0.01);
        assert_eq!(next_price_change(&schedule, 5_000).unwrap(), None);
    }

    #[test]
    fn test_empty_schedule_rejected() {
        assert_eq!(
            current_price(&[], 0).unwrap_err(),
            ClientError::EmptyPriceSchedule.into()
        );
        assert_eq!(
            next_price_change(&[], 0).unwrap_err(),
            ClientError::EmptyPriceSchedule.into()
        );
    }

    #[test]
    fn test_unsorted_schedule_rejected() {
        let schedule = vec![tier(200, 1.0), tier(100, 2.0)];
        assert_eq!(
            current_price(&schedule, 150).unwrap_err(),
            ClientError::UnsortedPriceSchedule.into()
        );
    }

    #[test]
    fn test_next_price_change() {
        assert_eq!(next_price_change(&schedule(), 50).unwrap(), Some(tier(100, 1.0)));
        assert_eq!(next_price_change(&schedule(), 100).unwrap(), Some(tier(200, 3.0)));
        assert_eq!(next_price_change(&schedule(), 200).unwrap(), None);
    }
}
