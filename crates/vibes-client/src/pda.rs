//! Program-derived addresses for the presale, staking and vesting programs.
//!
//! Every helper reproduces the seed scheme of the owning program byte for
//! byte. Seeds are `literal ‖ raw address bytes`, in that order.

use anchor_lang::prelude::*;

use crate::constants::*;
use crate::errors::ClientError;

/// Derives a program address and its bump from an ordered seed set.
///
/// Fails with `SeedDerivationFailure` when no bump in `[0, 255]` yields an
/// off-curve address, which only happens for a malformed seed set (for
/// example a seed longer than 32 bytes).
pub fn derive(program_id: &Pubkey, seeds: &[&[u8]]) -> Result<(Pubkey, u8)> {
    Pubkey::try_find_program_address(seeds, program_id).ok_or_else(|| {
        msg!("no valid bump for {} seeds under {}", seeds.len(), program_id);
        error!(ClientError::SeedDerivationFailure)
    })
}

/// Program ids of the three external programs, with the PDA helpers for the
/// accounts each one owns.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ProgramAddresses {
    pub presale_program: Pubkey,
    pub staking_program: Pubkey,
    pub vesting_program: Pubkey,
}

impl ProgramAddresses {
    pub fn presale_state(&self) -> Result<Pubkey> {
        derive(&self.presale_program, &[SEED_PRESALE_STATE]).map(|(address, _)| address)
    }

    pub fn buyer_state(&self, buyer: &Pubkey) -> Result<Pubkey> {
        derive(&self.presale_program, &[SEED_BUYER_STATE, buyer.as_ref()])
            .map(|(address, _)| address)
    }

    pub fn sol_vault(&self, presale: &Pubkey) -> Result<Pubkey> {
        derive(&self.presale_program, &[SEED_SOL_VAULT, presale.as_ref()])
            .map(|(address, _)| address)
    }

    pub fn usdc_vault(&self, presale: &Pubkey) -> Result<Pubkey> {
        derive(&self.presale_program, &[SEED_USDC_VAULT, presale.as_ref()])
            .map(|(address, _)| address)
    }

    pub fn stake_pool(&self) -> Result<Pubkey> {
        derive(&self.staking_program, &[SEED_STAKE_POOL]).map(|(address, _)| address)
    }

    pub fn user_stake(&self, user: &Pubkey) -> Result<Pubkey> {
        derive(&self.staking_program, &[SEED_USER_STAKE, user.as_ref()])
            .map(|(address, _)| address)
    }

    pub fn vesting_schedule(&self, beneficiary: &Pubkey) -> Result<Pubkey> {
        derive(&self.vesting_program, &[SEED_VESTING, beneficiary.as_ref()])
            .map(|(address, _)| address)
    }

    pub fn vesting_vault(&self, schedule: &Pubkey) -> Result<Pubkey> {
        derive(&self.vesting_program, &[SEED_VESTING_VAULT, schedule.as_ref()])
            .map(|(address, _)| address)
    }

    /// Derives every singleton PDA once so a bad program id fails at startup
    /// instead of on first use.
    pub fn validate(&self) -> Result<()> {
        let presale = self.presale_state()?;
        self.sol_vault(&presale)?;
        self.usdc_vault(&presale)?;
        self.stake_pool()?;
        Ok(())
    }
}
