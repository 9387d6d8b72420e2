use anchor_lang::prelude::*;

use crate::constants::*;
use crate::errors::ClientError;
use crate::state::VestingSchedule;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum VestingPhase {
    InCliff,
    Vesting,
    FullyVested,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct VestingStatus {
    pub phase: VestingPhase,
    pub vested: u64,
    pub claimable: u64,
    /// Next unlock event, `None` once fully vested.
    pub next_unlock_ts: Option<i64>,
    pub progress_percent: f64,
    pub cliff_end_ts: i64,
    pub cancelled: bool,
}

/// Vesting state of a schedule at `now`.
///
/// ```text
/// cliff_end = listing_ts + 365 days
/// now < cliff_end  => vested = 0
/// months           = floor((now - cliff_end) / 30 days)
/// vested           = floor(total * (40 + 20 * min(months, 3)) / 100)
/// claimable        = max(0, vested - claimed)
/// ```
///
/// Pure in `(schedule, now)`: calling it twice without an intervening claim
/// gives the same result.
pub fn vesting_status(schedule: &VestingSchedule, now: i64) -> Result<VestingStatus> {
    let total = schedule.total_amount;
    let cliff_end_ts = schedule
        .listing_ts
        .checked_add(VESTING_CLIFF_SECONDS)
        .ok_or(ClientError::MathOverflow)?;

    if now < cliff_end_ts {
        return Ok(VestingStatus {
            phase: VestingPhase::InCliff,
            vested: 0,
            claimable: 0,
            next_unlock_ts: Some(cliff_end_ts),
            progress_percent: 0.0,
            cliff_end_ts,
            cancelled: schedule.cancelled,
        });
    }

    let months = now
        .checked_sub(cliff_end_ts)
        .ok_or(ClientError::MathOverflow)?
        / VESTING_MONTH_SECONDS;
    let tranches = months.min(VESTING_TRANCHE_COUNT);

    // Single floor over the whole unlocked percentage.
    let unlocked_pct = VESTING_CLIFF_UNLOCK_PCT + VESTING_MONTHLY_UNLOCK_PCT * tranches as u128;
    let total_wide = total as u128;
    let vested = (total_wide * unlocked_pct / 100).min(total_wide) as u64;

    let (phase, next_unlock_ts) = if tranches >= VESTING_TRANCHE_COUNT {
        (VestingPhase::FullyVested, None)
    } else {
        let next = (tranches + 1)
            .checked_mul(VESTING_MONTH_SECONDS)
            .and_then(|offset| cliff_end_ts.checked_add(offset))
            .ok_or(ClientError::MathOverflow)?;
        (VestingPhase::Vesting, Some(next))
    };

    let progress_percent = if total == 0 {
        0.0
    } else {
        vested as f64 * 100.0 / total as f64
    };

    Ok(VestingStatus {
        phase,
        vested,
        claimable: vested.saturating_sub(schedule.claimed_amount),
        next_unlock_ts,
        progress_percent,
        cliff_end_ts,
        cancelled: schedule.cancelled,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const LISTING: i64 = 1_700_000_000;

    fn schedule(total_amount: u64, claimed_amount: u64) -> VestingSchedule {
        VestingSchedule {
            authority: Pubkey::new_from_array([1; 32]),
            beneficiary: Pubkey::new_from_array([2; 32]),
            token_mint: Pubkey::new_from_array([3; 32]),
            total_amount,
            claimed_amount,
            listing_ts: LISTING,
            cancelled: false,
        }
    }

    fn at(offset: i64) -> i64 {
        LISTING + offset
    }

    #[test]
    fn test_boundary_table() {
        let schedule = schedule(10_000, 0);
        let day = SECONDS_PER_DAY;
        let cases = [
            (364 * day, 0, VestingPhase::InCliff),
            (365 * day - 1, 0, VestingPhase::InCliff),
            (365 * day, 4_000, VestingPhase::Vesting),
            (395 * day, 6_000, VestingPhase::Vesting),
            (455 * day, 10_000, VestingPhase::FullyVested),
            ((365 + 400) * day, 10_000, VestingPhase::FullyVested),
            (10_000 * day, 10_000, VestingPhase::FullyVested),
        ];
        for (offset, vested, phase) in cases {
            let status = vesting_status(&schedule, at(offset)).unwrap();
            assert_eq!(status.vested, vested, "offset {}", offset);
            assert_eq!(status.claimable, vested);
            assert_eq!(status.phase, phase);
        }
    }

    #[test]
    fn test_one_second_before_tranche() {
        let schedule = schedule(10_000, 0);
        let status = vesting_status(&schedule, at(395 * SECONDS_PER_DAY - 1)).unwrap();
        assert_eq!(status.vested, 4_000);
        assert_eq!(status.next_unlock_ts, Some(at(395 * SECONDS_PER_DAY)));
    }

    #[test]
    fn test_in_cliff_reports_cliff_end() {
        let status = vesting_status(&schedule(10_000, 0), LISTING).unwrap();
        assert_eq!(status.cliff_end_ts, at(VESTING_CLIFF_SECONDS));
        assert_eq!(status.next_unlock_ts, Some(status.cliff_end_ts));
        assert_eq!(status.progress_percent, 0.0);
    }

    #[test]
    fn test_fully_vested_has_no_next_event() {
        let status = vesting_status(&schedule(10_000, 0), at(455 * SECONDS_PER_DAY)).unwrap();
        assert_eq!(status.next_unlock_ts, None);
        assert_eq!(status.progress_percent, 100.0);
    }

    #[test]
    fn test_claimed_is_subtracted() {
        let status = vesting_status(&schedule(10_000, 4_000), at(395 * SECONDS_PER_DAY)).unwrap();
        assert_eq!(status.vested, 6_000);
        assert_eq!(status.claimable, 2_000);
        assert_eq!(status.progress_percent, 60.0);
    }

    #[test]
    fn test_claimed_above_vested_clamps() {
        let status = vesting_status(&schedule(10_000, 9_000), at(365 * SECONDS_PER_DAY)).unwrap();
        assert_eq!(status.claimable, 0);
    }

    #[test]
    fn test_idempotent_without_claim() {
        let schedule = schedule(12_345, 1_000);
        let now = at(400 * SECONDS_PER_DAY);
        assert_eq!(
            vesting_status(&schedule, now).unwrap(),
            vesting_status(&schedule, now).unwrap()
        );
    }

    #[test]
    fn test_vested_floors_once() {
        // floor(7 * 60%) = 4, floor(7 * 80%) = 5
        let schedule = schedule(7, 0);
        assert_eq!(vesting_status(&schedule, at(395 * SECONDS_PER_DAY)).unwrap().vested, 4);
        assert_eq!(vesting_status(&schedule, at(425 * SECONDS_PER_DAY)).unwrap().vested, 5);
        assert_eq!(vesting_status(&schedule, at(455 * SECONDS_PER_DAY)).unwrap().vested, 7);

        let schedule = VestingSchedule { total_amount: 9, ..schedule };
        assert_eq!(vesting_status(&schedule, at(425 * SECONDS_PER_DAY)).unwrap().vested, 7);

        let schedule = VestingSchedule { total_amount: 1_000_000_009, ..schedule };
        let status = vesting_status(&schedule, at(425 * SECONDS_PER_DAY)).unwrap();
        assert_eq!(status.vested, 800_000_007);
        assert_eq!(status.claimable, 800_000_007);
    }

    #[test]
    fn test_extreme_timestamps_do_not_panic() {
        let mut schedule = schedule(10_000, 0);
        schedule.listing_ts = i64::MIN;
        let err = vesting_status(&schedule, i64::MAX).unwrap_err();
        assert_eq!(err, ClientError::MathOverflow.into());

        schedule.listing_ts = i64::MAX;
        assert_eq!(
            vesting_status(&schedule, 0).unwrap_err(),
            ClientError::MathOverflow.into()
        );
    }

    #[test]
    fn test_zero_total() {
        let status = vesting_status(&schedule(0, 0), at(500 * SECONDS_PER_DAY)).unwrap();
        assert_eq!(status.vested, 0);
        assert_eq!(status.progress_percent, 0.0);
    }

    #[test]
    fn test_cancelled_is_carried() {
        let mut schedule = schedule(10_000, 0);
        schedule.cancelled = true;
        let status = vesting_status(&schedule, at(400 * SECONDS_PER_DAY)).unwrap();
        assert!(status.cancelled);
        assert_eq!(status.vested, 6_000);
    }
}
