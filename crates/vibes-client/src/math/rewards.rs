//! Reward accrual for presale stakers and staking pool users.
//!
//! Two modes, picked by the global accumulator:
//!
//! ```text
//! accumulator (acc > 0):  pending = floor(stake * acc / 1e12) - reward_debt   (>= 0)
//! estimated   (acc == 0): pending = floor(stake * apy_bps * elapsed / (10_000 * 31_536_000))
//!                         elapsed = max(0, now - max(last_personal, last_global))
//! total = accumulated_rewards + pending
//! ```
//!
//! The estimated figure is never presented as authoritative: every result
//! carries its `RewardSource`.

use anchor_lang::prelude::*;

use crate::constants::*;
use crate::errors::ClientError;
use crate::state::{BuyerState, PresaleState, StakePool, UserStake};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RewardSource {
    /// Derived from the on-chain accumulator.
    Accumulator,
    /// APY projection; the accumulator has not been advanced yet.
    Estimated,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RewardSnapshot {
    pub pending: u64,
    pub total: u64,
    pub source: RewardSource,
}

impl RewardSnapshot {
    pub fn is_estimated(&self) -> bool {
        self.source == RewardSource::Estimated
    }
}

/// Everything the accrual formula reads, independent of which program the
/// numbers came from.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct AccrualInput {
    pub stake_amount: u64,
    pub acc_reward_per_token: u128,
    pub reward_debt: u128,
    pub accumulated_rewards: u64,
    pub apy_bps: u64,
    pub last_personal_update_ts: i64,
    pub last_global_update_ts: i64,
}

impl AccrualInput {
    /// Presale buyer: the stake is the purchased amount.
    pub fn from_presale(presale: &PresaleState, buyer: &BuyerState, apy_bps: u64) -> Self {
        Self {
            stake_amount: buyer.total_purchased_vibes,
            acc_reward_per_token: presale.acc_reward_per_token,
            reward_debt: buyer.reward_debt,
            accumulated_rewards: buyer.accumulated_rewards,
            apy_bps,
            last_personal_update_ts: buyer.last_update_ts,
            last_global_update_ts: presale.last_reward_update_ts,
        }
    }

    /// Staking pool user. The pool keeps no accumulator, so this always
    /// lands in estimated mode; `reward_debt` on `UserStake` holds rewards
    /// already settled at `last_stake_ts`.
    pub fn from_stake(pool: &StakePool, stake: &UserStake) -> Self {
        Self {
            stake_amount: stake.stake_amount,
            acc_reward_per_token: 0,
            reward_debt: 0,
            accumulated_rewards: stake.reward_debt,
            apy_bps: pool.apy_bps,
            last_personal_update_ts: stake.last_stake_ts,
            last_global_update_ts: stake.last_stake_ts,
        }
    }
}

/// `floor(stake * acc / 1e12) - reward_debt`, clamped at zero.
///
/// The product is split as `stake * (acc / S) + stake * (acc % S) / S`,
/// which is exact and only overflows when the final value would.
pub fn accumulator_pending(stake_amount: u64, acc_reward_per_token: u128, reward_debt: u128) -> Result<u64> {
    let stake = stake_amount as u128;
    let whole = stake
        .checked_mul(acc_reward_per_token / ACC_REWARD_SCALE)
        .ok_or(ClientError::MathOverflow)?;
    let fraction = stake
        .checked_mul(acc_reward_per_token % ACC_REWARD_SCALE)
        .ok_or(ClientError::MathOverflow)?
        / ACC_REWARD_SCALE;
    let earned = whole.checked_add(fraction).ok_or(ClientError::MathOverflow)?;

    let pending = earned.saturating_sub(reward_debt);
    u64::try_from(pending).map_err(|_| error!(ClientError::MathOverflow))
}

/// APY projection of the reward earned over `elapsed` seconds.
pub fn estimated_pending(stake_amount: u64, apy_bps: u64, elapsed: i64) -> Result<u64> {
    let elapsed = elapsed.max(0) as u128;
    let pending = (stake_amount as u128)
        .checked_mul(apy_bps as u128)
        .ok_or(ClientError::MathOverflow)?
        .checked_mul(elapsed)
        .ok_or(ClientError::MathOverflow)?
        / (BPS_DENOMINATOR * SECONDS_PER_YEAR as u128);
    u64::try_from(pending).map_err(|_| error!(ClientError::MathOverflow))
}

pub fn compute_rewards(input: &AccrualInput, now: i64) -> Result<RewardSnapshot> {
    let source = if input.acc_reward_per_token > 0 {
        RewardSource::Accumulator
    } else {
        RewardSource::Estimated
    };

    let pending = if input.stake_amount == 0 {
        0
    } else {
        match source {
            RewardSource::Accumulator => accumulator_pending(
                input.stake_amount,
                input.acc_reward_per_token,
                input.reward_debt,
            )?,
            RewardSource::Estimated => {
                // Late joiners are measured from the later of the two
                // updates, so their estimate can understate.
                let since = input.last_personal_update_ts.max(input.last_global_update_ts);
                let elapsed = now.saturating_sub(since);
                msg!("accumulator not advanced, estimating over {}s", elapsed.max(0));
                estimated_pending(input.stake_amount, input.apy_bps, elapsed)?
            }
        }
    };

    let total = input
        .accumulated_rewards
        .checked_add(pending)
        .ok_or(ClientError::MathOverflow)?;

    Ok(RewardSnapshot { pending, total, source })
}
