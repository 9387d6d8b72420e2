use std::sync::Arc;

use anchor_lang::prelude::*;

use crate::client::fetch_record;
use crate::config::ClientConfig;
use crate::errors::ClientError;
use crate::instructions;
use crate::math::{compute_rewards, AccrualInput, RewardSnapshot};
use crate::state::{StakePool, UserStake};
use crate::transport::{RpcTransport, TransactionSubmitter, WriteOutcome};

#[derive(Clone, Debug, PartialEq)]
pub struct StakePosition {
    pub pool: StakePool,
    /// `None` until the user stakes for the first time.
    pub stake: Option<UserStake>,
    /// Always an APY estimate; the pool keeps no accumulator.
    pub rewards: Option<RewardSnapshot>,
    pub remaining_capacity: u64,
}

pub struct StakingClient<T, S> {
    config: ClientConfig,
    transport: Arc<T>,
    submitter: S,
}

impl<T: RpcTransport, S: TransactionSubmitter> StakingClient<T, S> {
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

    pub async fn fetch_state(&self) -> Result<Option<StakePool>> {
        let address = self.config.programs.stake_pool()?;
        fetch_record(self.transport.as_ref(), &address).await
    }

    pub async fn fetch_participant(&self, user: &Pubkey) -> Result<Option<UserStake>> {
        let address = self.config.programs.user_stake(user)?;
        fetch_record(self.transport.as_ref(), &address).await
    }

    pub async fn fetch_position(&self, user: &Pubkey, now: i64) -> Result<Option<StakePosition>> {
        let (pool, stake) = tokio::join!(self.fetch_state(), self.fetch_participant(user));
        let Some(pool) = pool? else {
            return Ok(None);
        };
        let stake = stake?;

        let rewards = stake
            .as_ref()
            .map(|stake| compute_rewards(&AccrualInput::from_stake(&pool, stake), now))
            .transpose()?;

        Ok(Some(StakePosition {
            remaining_capacity: pool.remaining_capacity(),
            pool,
            stake,
            rewards,
        }))
    }

    /// Refuses amounts above the pool's remaining capacity before anything
    /// is signed.
    pub async fn stake(&self, user: Pubkey, amount: u64) -> Result<WriteOutcome> {
        let ix = instructions::stake(&self.config.programs, user, self.config.token_mint, amount)?;

        let pool = self.fetch_state().await?.ok_or(ClientError::AccountNotFound)?;
        if amount > pool.remaining_capacity() {
            msg!("stake of {} exceeds remaining capacity {}", amount, pool.remaining_capacity());
            return err!(ClientError::PoolCapacityExceeded);
        }

        self.submitter.submit(&[ix], &user).await
    }

    pub async fn unstake(&self, user: Pubkey, amount: u64) -> Result<WriteOutcome> {
        let ix = instructions::unstake(&self.config.programs, user, self.config.token_mint, amount)?;

        let stake = self.fetch_participant(&user).await?.ok_or(ClientError::AccountNotFound)?;
        require!(amount <= stake.stake_amount, ClientError::InsufficientStake);

        self.submitter.submit(&[ix], &user).await
    }

    pub async fn claim_rewards(&self, user: Pubkey) -> Result<WriteOutcome> {
        let ix = instructions::claim_rewards(&self.config.programs, user, self.config.token_mint)?;
        self.submitter.submit(&[ix], &user).await
    }
}
