use anchor_lang::prelude::*;
use anchor_lang::solana_program::instruction::Instruction;
use anchor_lang::{system_program, Discriminator, InstructionData};
use anchor_spl::associated_token::get_associated_token_address;
use anchor_spl::token;

use crate::constants::*;
use crate::errors::ClientError;
use crate::pda::ProgramAddresses;

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub struct Stake {
    pub amount: u64,
}

impl Discriminator for Stake {
    const DISCRIMINATOR: [u8; 8] = IX_STAKE;
}

impl InstructionData for Stake {}

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub struct Unstake {
    pub amount: u64,
}

impl Discriminator for Unstake {
    const DISCRIMINATOR: [u8; 8] = IX_UNSTAKE;
}

impl InstructionData for Unstake {}

/// Accounts shared by `stake`, `unstake` and `claim_rewards`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StakeAccounts {
    pub stake_pool: Pubkey,
    pub user_stake: Pubkey,
    pub user_token_account: Pubkey,
    /// Pool-owned associated token account holding staked tokens
    pub pool_token_account: Pubkey,
    pub user: Pubkey,
    pub token_program: Pubkey,
    pub system_program: Pubkey,
}

impl StakeAccounts {
    pub fn resolve(programs: &ProgramAddresses, user: Pubkey, token_mint: Pubkey) -> Result<Self> {
        let stake_pool = programs.stake_pool()?;
        Ok(Self {
            stake_pool,
            user_stake: programs.user_stake(&user)?,
            user_token_account: get_associated_token_address(&user, &token_mint),
            pool_token_account: get_associated_token_address(&stake_pool, &token_mint),
            user,
            token_program: token::ID,
            system_program: system_program::ID,
        })
    }
}

impl ToAccountMetas for StakeAccounts {
    fn to_account_metas(&self, _is_signer: Option<bool>) -> Vec<AccountMeta> {
        vec![
            AccountMeta::new(self.stake_pool, false),
            AccountMeta::new(self.user_stake, false),
            AccountMeta::new(self.user_token_account, false),
            AccountMeta::new(self.pool_token_account, false),
            AccountMeta::new(self.user, true),
            AccountMeta::new_readonly(self.token_program, false),
            AccountMeta::new_readonly(self.system_program, false),
        ]
    }
}

pub fn stake(
    programs: &ProgramAddresses,
    user: Pubkey,
    token_mint: Pubkey,
    amount: u64,
) -> Result<Instruction> {
    require!(amount > 0, ClientError::ZeroAmount);

    let accounts = StakeAccounts::resolve(programs, user, token_mint)?;
    Ok(Instruction {
        program_id: programs.staking_program,
        accounts: accounts.to_account_metas(None),
        data: Stake { amount }.data(),
    })
}

pub fn unstake(
    programs: &ProgramAddresses,
    user: Pubkey,
    token_mint: Pubkey,
    amount: u64,
) -> Result<Instruction> {
    require!(amount > 0, ClientError::ZeroAmount);

    let accounts = StakeAccounts::resolve(programs, user, token_mint)?;
    Ok(Instruction {
        program_id: programs.staking_program,
        accounts: accounts.to_account_metas(None),
        data: Unstake { amount }.data(),
    })
}
