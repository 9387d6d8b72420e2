use anchor_lang::prelude::*;
use anchor_lang::solana_program::instruction::Instruction;
use anchor_lang::{system_program, Discriminator, InstructionData};
use anchor_spl::associated_token::get_associated_token_address;
use anchor_spl::token;

use crate::constants::*;
use crate::errors::ClientError;
use crate::pda::ProgramAddresses;

/// Args of the presale `buy_with_usdc` instruction. `amount` is in USDC base
/// units (6 decimals).
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub struct BuyWithUsdc {
    pub amount: u64,
}

impl Discriminator for BuyWithUsdc {
    const DISCRIMINATOR: [u8; 8] = IX_BUY_WITH_USDC;
}

impl InstructionData for BuyWithUsdc {}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BuyWithUsdcAccounts {
    pub presale_state: Pubkey,
    pub buyer_state: Pubkey,
    pub usdc_vault: Pubkey,
    /// Buyer's USDC associated token account
    pub buyer_usdc_account: Pubkey,
    pub usdc_mint: Pubkey,
    pub buyer: Pubkey,
    pub token_program: Pubkey,
    pub system_program: Pubkey,
}

impl BuyWithUsdcAccounts {
    pub fn resolve(programs: &ProgramAddresses, buyer: Pubkey, usdc_mint: Pubkey) -> Result<Self> {
        let presale_state = programs.presale_state()?;
        Ok(Self {
            presale_state,
            buyer_state: programs.buyer_state(&buyer)?,
            usdc_vault: programs.usdc_vault(&presale_state)?,
            buyer_usdc_account: get_associated_token_address(&buyer, &usdc_mint),
            usdc_mint,
            buyer,
            token_program: token::ID,
            system_program: system_program::ID,
        })
    }
}

impl ToAccountMetas for BuyWithUsdcAccounts {
    fn to_account_metas(&self, _is_signer: Option<bool>) -> Vec<AccountMeta> {
        vec![
            AccountMeta::new(self.presale_state, false),
            AccountMeta::new(self.buyer_state, false),
            AccountMeta::new(self.usdc_vault, false),
            AccountMeta::new(self.buyer_usdc_account, false),
            AccountMeta::new_readonly(self.usdc_mint, false),
            AccountMeta::new(self.buyer, true),
            AccountMeta::new_readonly(self.token_program, false),
            AccountMeta::new_readonly(self.system_program, false),
        ]
    }
}

pub fn buy_with_usdc(
    programs: &ProgramAddresses,
    buyer: Pubkey,
    usdc_mint: Pubkey,
    amount: u64,
) -> Result<Instruction> {
    require!(amount > 0, ClientError::ZeroAmount);

    let accounts = BuyWithUsdcAccounts::resolve(programs, buyer, usdc_mint)?;
    Ok(Instruction {
        program_id: programs.presale_program,
        accounts: accounts.to_account_metas(None),
        data: BuyWithUsdc { amount }.data(),
    })
}
