use anchor_lang::prelude::*;
use anchor_lang::solana_program::instruction::Instruction;
use anchor_lang::{Discriminator, InstructionData};
use anchor_spl::associated_token::get_associated_token_address;
use anchor_spl::token;

use crate::constants::*;
use crate::pda::ProgramAddresses;

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub struct ClaimVested;

impl Discriminator for ClaimVested {
    const DISCRIMINATOR: [u8; 8] = IX_CLAIM_VESTED;
}

impl InstructionData for ClaimVested {}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ClaimVestedAccounts {
    pub vesting_schedule: Pubkey,
    pub vesting_vault: Pubkey,
    pub beneficiary_token_account: Pubkey,
    pub beneficiary: Pubkey,
    pub token_program: Pubkey,
}

impl ClaimVestedAccounts {
    pub fn resolve(
        programs: &ProgramAddresses,
        beneficiary: Pubkey,
        token_mint: Pubkey,
    ) -> Result<Self> {
        let vesting_schedule = programs.vesting_schedule(&beneficiary)?;
        Ok(Self {
            vesting_schedule,
            vesting_vault: programs.vesting_vault(&vesting_schedule)?,
            beneficiary_token_account: get_associated_token_address(&beneficiary, &token_mint),
            beneficiary,
            token_program: token::ID,
        })
    }
}

impl ToAccountMetas for ClaimVestedAccounts {
    fn to_account_metas(&self, _is_signer: Option<bool>) -> Vec<AccountMeta> {
        vec![
            AccountMeta::new(self.vesting_schedule, false),
            AccountMeta::new(self.vesting_vault, false),
            AccountMeta::new(self.beneficiary_token_account, false),
            AccountMeta::new_readonly(self.beneficiary, true),
            AccountMeta::new_readonly(self.token_program, false),
        ]
    }
}

pub fn claim_vested(
    programs: &ProgramAddresses,
    beneficiary: Pubkey,
    token_mint: Pubkey,
) -> Result<Instruction> {
    let accounts = ClaimVestedAccounts::resolve(programs, beneficiary, token_mint)?;
    Ok(Instruction {
        program_id: programs.vesting_program,
        accounts: accounts.to_account_metas(None),
        data: ClaimVested.data(),
    })
}
