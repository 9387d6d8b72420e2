use anchor_lang::prelude::*;
use anchor_lang::solana_program::instruction::Instruction;
use anchor_lang::{Discriminator, InstructionData};

use crate::constants::*;
use crate::instructions::stake::StakeAccounts;
use crate::pda::ProgramAddresses;

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub struct ClaimRewards;

impl Discriminator for ClaimRewards {
    const DISCRIMINATOR: [u8; 8] = IX_CLAIM_REWARDS;
}

impl InstructionData for ClaimRewards {}

pub fn claim_rewards(
    programs: &ProgramAddresses,
    user: Pubkey,
    token_mint: Pubkey,
) -> Result<Instruction> {
    let accounts = StakeAccounts::resolve(programs, user, token_mint)?;
    // Same accounts as stake, minus system_program; the user only signs.
    let accounts = vec![
        AccountMeta::new(accounts.stake_pool, false),
        AccountMeta::new(accounts.user_stake, false),
        AccountMeta::new(accounts.user_token_account, false),
        AccountMeta::new(accounts.pool_token_account, false),
        AccountMeta::new_readonly(accounts.user, true),
        AccountMeta::new_readonly(accounts.token_program, false),
    ];
    Ok(Instruction {
        program_id: programs.staking_program,
        accounts,
        data: ClaimRewards.data(),
    })
}
