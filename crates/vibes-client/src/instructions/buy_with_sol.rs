use anchor_lang::prelude::*;
use anchor_lang::solana_program::instruction::Instruction;
use anchor_lang::{system_program, Discriminator, InstructionData};

use crate::constants::*;
use crate::errors::ClientError;
use crate::pda::ProgramAddresses;

/// Args of the presale `buy_with_sol` instruction.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub struct BuyWithSol {
    pub lamports: u64,
}

impl Discriminator for BuyWithSol {
    const DISCRIMINATOR: [u8; 8] = IX_BUY_WITH_SOL;
}

impl InstructionData for BuyWithSol {}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BuyWithSolAccounts {
    pub presale_state: Pubkey,
    pub buyer_state: Pubkey,
    pub sol_vault: Pubkey,
    pub buyer: Pubkey,
    pub system_program: Pubkey,
}

impl BuyWithSolAccounts {
    pub fn resolve(programs: &ProgramAddresses, buyer: Pubkey) -> Result<Self> {
        let presale_state = programs.presale_state()?;
        Ok(Self {
            presale_state,
            buyer_state: programs.buyer_state(&buyer)?,
            sol_vault: programs.sol_vault(&presale_state)?,
            buyer,
            system_program: system_program::ID,
        })
    }
}

impl ToAccountMetas for BuyWithSolAccounts {
    fn to_account_metas(&self, _is_signer: Option<bool>) -> Vec<AccountMeta> {
        vec![
            AccountMeta::new(self.presale_state, false),
            AccountMeta::new(self.buyer_state, false),
            AccountMeta::new(self.sol_vault, false),
            AccountMeta::new(self.buyer, true),
            AccountMeta::new_readonly(self.system_program, false),
        ]
    }
}

pub fn buy_with_sol(programs: &ProgramAddresses, buyer: Pubkey, lamports: u64) -> Result<Instruction> {
    require!(lamports > 0, ClientError::ZeroAmount);

    let accounts = BuyWithSolAccounts::resolve(programs, buyer)?;
    Ok(Instruction {
        program_id: programs.presale_program,
        accounts: accounts.to_account_metas(None),
        data: BuyWithSol { lamports }.data(),
    })
}
