use anchor_lang::prelude::*;
use anchor_lang::solana_program::instruction::Instruction;
use anchor_lang::{Discriminator, InstructionData};

use crate::constants::*;
use crate::pda::ProgramAddresses;

/// Presale `opt_into_staking` takes no arguments.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub struct OptIntoStaking;

impl Discriminator for OptIntoStaking {
    const DISCRIMINATOR: [u8; 8] = IX_OPT_INTO_STAKING;
}

impl InstructionData for OptIntoStaking {}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct OptIntoStakingAccounts {
    pub presale_state: Pubkey,
    pub buyer_state: Pubkey,
    pub buyer: Pubkey,
}

impl ToAccountMetas for OptIntoStakingAccounts {
    fn to_account_metas(&self, _is_signer: Option<bool>) -> Vec<AccountMeta> {
        vec![
            AccountMeta::new(self.presale_state, false),
            AccountMeta::new(self.buyer_state, false),
            AccountMeta::new_readonly(self.buyer, true),
        ]
    }
}

pub fn opt_into_staking(programs: &ProgramAddresses, buyer: Pubkey) -> Result<Instruction> {
    let accounts = OptIntoStakingAccounts {
        presale_state: programs.presale_state()?,
        buyer_state: programs.buyer_state(&buyer)?,
        buyer,
    };
    Ok(Instruction {
        program_id: programs.presale_program,
        accounts: accounts.to_account_metas(None),
        data: OptIntoStaking.data(),
    })
}
