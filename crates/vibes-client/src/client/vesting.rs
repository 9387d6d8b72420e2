use std::sync::Arc;

use anchor_lang::prelude::*;
use anchor_lang::solana_program::instruction::Instruction;

use crate::client::fetch_record;
use crate::config::ClientConfig;
use crate::errors::ClientError;
use crate::instructions;
use crate::math::{vesting_status, VestingStatus};
use crate::state::VestingSchedule;
use crate::transport::{RpcTransport, TransactionSubmitter, WriteOutcome};

#[derive(Clone, Debug, PartialEq)]
pub struct VestingView {
    pub schedule: VestingSchedule,
    pub status: VestingStatus,
}

pub struct VestingClient<T, S> {
    config: ClientConfig,
    transport: Arc<T>,
    submitter: S,
}

impl<T: RpcTransport, S: TransactionSubmitter> VestingClient<T, S> {
    pub fn new(config: ClientConfig, transport: Arc<T>, submitter: S) -> Self {
        Self {
            config,
            transport,
            submitter,
        }
    }

    pub fn submitter(&self) -> &S {
        &self.submitter
    }

    /// Schedules are per beneficiary; there is no global vesting account.
    pub async fn fetch_state(&self, beneficiary: &Pubkey) -> Result<Option<VestingSchedule>> {
        let address = self.config.programs.vesting_schedule(beneficiary)?;
        fetch_record(self.transport.as_ref(), &address).await
    }

    pub async fn fetch_status(&self, beneficiary: &Pubkey, now: i64) -> Result<Option<VestingView>> {
        let Some(schedule) = self.fetch_state(beneficiary).await? else {
            return Ok(None);
        };
        let status = vesting_status(&schedule, now)?;
        Ok(Some(VestingView { schedule, status }))
    }

    /// Builds `claim_vested` only when something is actually claimable.
    pub async fn build_claim(&self, beneficiary: Pubkey, now: i64) -> Result<Instruction> {
        let view = self
            .fetch_status(&beneficiary, now)
            .await?
            .ok_or(ClientError::AccountNotFound)?;
        require!(!view.schedule.cancelled, ClientError::ScheduleCancelled);
        require!(view.status.claimable > 0, ClientError::NothingToClaim);

        instructions::claim_vested(&self.config.programs, beneficiary, view.schedule.token_mint)
    }

    pub async fn claim_vested(&self, beneficiary: Pubkey, now: i64) -> Result<WriteOutcome> {
        let ix = self.build_claim(beneficiary, now).await?;
        self.submitter.submit(&[ix], &beneficiary).await
    }
}
