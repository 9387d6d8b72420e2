//! Client-side mirrors of the accounts owned by the presale, staking and
//! vesting programs.
//!
//! Field order and widths follow the on-chain layouts exactly; the records
//! are (de)serialized with the same borsh encoding Anchor uses for
//! `#[account]` structs.

use anchor_lang::prelude::*;
use anchor_lang::Discriminator;

use crate::constants::*;

/// Behaviour shared by every decodable account record.
pub trait AccountRecord: Discriminator + AnchorSerialize + AnchorDeserialize {
    const KIND: AccountKind;

    /// Size of the fixed-width body (after the discriminator), with every
    /// variable-length section empty.
    const MIN_BODY_LEN: usize;

    /// Body length implied by the length prefixes found in `body`.
    /// Returns `None` when the implied length does not fit in `usize`.
    fn required_body_len(_body: &[u8]) -> Option<usize> {
        Some(Self::MIN_BODY_LEN)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AccountKind {
    PresaleState,
    BuyerState,
    VestingSchedule,
    StakePool,
    UserStake,
}

impl AccountKind {
    pub fn name(&self) -> &'static str {
        match self {
            AccountKind::PresaleState => "PresaleState",
            AccountKind::BuyerState => "BuyerState",
            AccountKind::VestingSchedule => "VestingSchedule",
            AccountKind::StakePool => "StakePool",
            AccountKind::UserStake => "UserStake",
        }
    }
}

// ============================================================================
// PRESALE PROGRAM
// ============================================================================

/// One step of the presale price schedule.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq)]
pub struct PriceTier {
    pub start_ts: i64,
    pub price_usd: f64,
}

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug, PartialEq)]
pub struct PresaleState {
    pub authority: Pubkey,
    pub token_mint: Pubkey,
    pub usdc_mint: Pubkey,
    /// Chronological, ascending by `start_ts`.
    pub price_schedule: Vec<PriceTier>,
    pub start_ts: i64,
    pub end_ts: i64,
    pub hard_cap_total: u64,
    pub raised_sol: u64,
    pub raised_usdc: u64,
    pub total_staked_during_presale: u64,
    /// Cumulative reward per staked unit, scaled by `ACC_REWARD_SCALE`.
    pub acc_reward_per_token: u128,
    pub last_reward_update_ts: i64,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PresalePhase {
    NotStarted,
    Active,
    Ended,
}

impl PresaleState {
    // authority + token_mint + usdc_mint
    const PRICE_SCHEDULE_LEN_OFFSET: usize = 3 * PUBKEY_LEN;

    pub fn phase(&self, now: i64) -> PresalePhase {
        if now < self.start_ts {
            PresalePhase::NotStarted
        } else if now < self.end_ts {
            PresalePhase::Active
        } else {
            PresalePhase::Ended
        }
    }
}

impl Discriminator for PresaleState {
    const DISCRIMINATOR: [u8; 8] = [32, 18, 85, 188, 213, 180, 10, 241];
}

impl AccountRecord for PresaleState {
    const KIND: AccountKind = AccountKind::PresaleState;
    // authority(32) + token_mint(32) + usdc_mint(32) + price_schedule len(4)
    // + start_ts(8) + end_ts(8) + hard_cap_total(8) + raised_sol(8) + raised_usdc(8)
    // + total_staked_during_presale(8) + acc_reward_per_token(16) + last_reward_update_ts(8)
    const MIN_BODY_LEN: usize = 3 * PUBKEY_LEN + 4 + 8 + 8 + 8 + 8 + 8 + 8 + 16 + 8;

    fn required_body_len(body: &[u8]) -> Option<usize> {
        let offset = Self::PRICE_SCHEDULE_LEN_OFFSET;
        let len_bytes: [u8; 4] = body.get(offset..offset + 4)?.try_into().ok()?;
        let tiers = u32::from_le_bytes(len_bytes) as usize;
        tiers
            .checked_mul(PRICE_TIER_LEN)?
            .checked_add(Self::MIN_BODY_LEN)
    }
}

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug, PartialEq, Eq)]
pub struct BuyerState {
    pub buyer: Pubkey,
    pub total_purchased_vibes: u64,
    pub sol_contributed: u64,
    pub usdc_contributed: u64,
    /// Rewards settled on-chain but not yet claimed.
    pub accumulated_rewards: u64,
    /// Accumulator snapshot, same scale as `acc_reward_per_token`.
    pub reward_debt: u128,
    pub total_rewards_claimed: u64,
    pub last_update_ts: i64,
    pub transferred_to_vesting: bool,
    pub final_vesting_amount: u64,
}

impl Discriminator for BuyerState {
    const DISCRIMINATOR: [u8; 8] = [196, 226, 50, 172, 9, 123, 201, 250];
}

impl AccountRecord for BuyerState {
    const KIND: AccountKind = AccountKind::BuyerState;
    // buyer(32) + total_purchased_vibes(8) + sol_contributed(8) + usdc_contributed(8)
    // + accumulated_rewards(8) + reward_debt(16) + total_rewards_claimed(8)
    // + last_update_ts(8) + transferred_to_vesting(1) + final_vesting_amount(8)
    const MIN_BODY_LEN: usize = PUBKEY_LEN + 8 + 8 + 8 + 8 + 16 + 8 + 8 + 1 + 8;
}

// ============================================================================
// VESTING PROGRAM
// ============================================================================

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug, PartialEq, Eq)]
pub struct VestingSchedule {
    pub authority: Pubkey,
    pub beneficiary: Pubkey,
    pub token_mint: Pubkey,
    pub total_amount: u64,
    pub claimed_amount: u64,
    /// Listing time; the cliff starts here.
    pub listing_ts: i64,
    pub cancelled: bool,
}

impl Discriminator for VestingSchedule {
    const DISCRIMINATOR: [u8; 8] = [130, 200, 173, 148, 39, 75, 243, 147];
}

impl AccountRecord for VestingSchedule {
    const KIND: AccountKind = AccountKind::VestingSchedule;
    // authority(32) + beneficiary(32) + token_mint(32) + total_amount(8)
    // + claimed_amount(8) + listing_ts(8) + cancelled(1)
    const MIN_BODY_LEN: usize = 3 * PUBKEY_LEN + 8 + 8 + 8 + 1;
}

// ============================================================================
// STAKING PROGRAM
// ============================================================================

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug, PartialEq, Eq)]
pub struct StakePool {
    pub apy_bps: u64,
    pub global_cap: u64,
    pub total_staked: u64,
}

impl StakePool {
    pub fn remaining_capacity(&self) -> u64 {
        self.global_cap.saturating_sub(self.total_staked)
    }
}

impl Discriminator for StakePool {
    const DISCRIMINATOR: [u8; 8] = [121, 34, 206, 21, 79, 127, 255, 28];
}

impl AccountRecord for StakePool {
    const KIND: AccountKind = AccountKind::StakePool;
    // apy_bps(8) + global_cap(8) + total_staked(8)
    const MIN_BODY_LEN: usize = 8 + 8 + 8;
}

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug, PartialEq, Eq)]
pub struct UserStake {
    pub stake_amount: u64,
    /// Rewards settled at `last_stake_ts` and not yet paid out.
    pub reward_debt: u64,
    pub last_stake_ts: i64,
}

impl Discriminator for UserStake {
    const DISCRIMINATOR: [u8; 8] = [102, 53, 163, 107, 9, 138, 87, 153];
}

impl AccountRecord for UserStake {
    const KIND: AccountKind = AccountKind::UserStake;
    // stake_amount(8) + reward_debt(8) + last_stake_ts(8)
    const MIN_BODY_LEN: usize = 8 + 8 + 8;
}
