use std::sync::Arc;

use anchor_lang::prelude::*;

use crate::client::fetch_record;
use crate::config::ClientConfig;
use crate::constants::*;
use crate::errors::ClientError;
use crate::instructions;
use crate::math::{compute_rewards, current_price, next_price_change, AccrualInput, RewardSnapshot};
use crate::price::{PriceCache, PriceQuote, PriceSource, PythPriceSource};
use crate::state::{BuyerState, PresalePhase, PresaleState, PriceTier};
use crate::transport::{RpcTransport, TransactionId, TransactionSubmitter, WriteOutcome};

/// Everything the presale page shows for one buyer.
#[derive(Clone, Debug, PartialEq)]
pub struct PresaleDashboard {
    pub presale: PresaleState,
    pub buyer: Option<BuyerState>,
    pub phase: PresalePhase,
    /// `None` while the schedule has no tiers.
    pub current_price_usd: Option<f64>,
    pub next_price_change: Option<PriceTier>,
    /// `None` when the buyer has no record yet.
    pub rewards: Option<RewardSnapshot>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct PurchaseQuote {
    pub sol_usd: PriceQuote,
    pub token_price_usd: f64,
    pub usd_value: f64,
    /// Base units, rounded down.
    pub estimated_tokens: u64,
}

pub struct PresaleClient<T, S> {
    config: ClientConfig,
    transport: Arc<T>,
    submitter: S,
    prices: PriceCache,
}

impl<T: RpcTransport, S: TransactionSubmitter> PresaleClient<T, S> {
    pub fn new(config: ClientConfig, transport: Arc<T>, submitter: S) -> Self {
        let prices = PriceCache::new(config.price_cache_ttl_seconds);
        Self {
            config,
            transport,
            submitter,
            prices,
        }
    }

    pub fn submitter(&self) -> &S {
        &self.submitter
    }

    /// Pyth SOL/USD source reading the configured feed account.
    pub fn sol_price_source(&self) -> PythPriceSource<T> {
        PythPriceSource::new(self.transport.clone(), self.config.sol_usd_feed)
    }

    pub async fn fetch_state(&self) -> Result<Option<PresaleState>> {
        let address = self.config.programs.presale_state()?;
        fetch_record(self.transport.as_ref(), &address).await
    }

    pub async fn fetch_participant(&self, buyer: &Pubkey) -> Result<Option<BuyerState>> {
        let address = self.config.programs.buyer_state(buyer)?;
        fetch_record(self.transport.as_ref(), &address).await
    }

    /// Presale and buyer records are fetched concurrently. `None` when the
    /// presale itself has not been initialized.
    pub async fn fetch_dashboard(&self, buyer: &Pubkey, now: i64) -> Result<Option<PresaleDashboard>> {
        let (presale, participant) = tokio::join!(self.fetch_state(), self.fetch_participant(buyer));
        let Some(presale) = presale? else {
            return Ok(None);
        };
        let participant = participant?;

        let rewards = participant
            .as_ref()
            .map(|buyer| {
                let input = AccrualInput::from_presale(&presale, buyer, self.config.presale_reward_apy_bps);
                compute_rewards(&input, now)
            })
            .transpose()?;

        // An empty schedule leaves the price blank; an unsorted one is still an error.
        let (current_price_usd, next_price_change) = if presale.price_schedule.is_empty() {
            (None, None)
        } else {
            (
                Some(current_price(&presale.price_schedule, now)?),
                next_price_change(&presale.price_schedule, now)?,
            )
        };

        Ok(Some(PresaleDashboard {
            phase: presale.phase(now),
            current_price_usd,
            next_price_change,
            presale,
            buyer: participant,
            rewards,
        }))
    }

    /// Estimated token amount for a SOL payment at the current tier price.
    ///
    /// ```text
    /// usd_value = lamports / 1e9 * sol_usd
    /// tokens    = floor(usd_value / tier_price * 10^decimals)
    /// ```
    pub async fn quote_sol_purchase<P: PriceSource>(
        &self,
        source: &P,
        lamports: u64,
        now: i64,
    ) -> Result<PurchaseQuote> {
        require!(lamports > 0, ClientError::ZeroAmount);

        let presale = self.fetch_state().await?.ok_or(ClientError::AccountNotFound)?;
        let token_price_usd = current_price(&presale.price_schedule, now)?;
        require!(token_price_usd > 0.0, ClientError::PriceUnavailable);

        let sol_usd = self.prices.get_price(source, PAIR_SOL_USD, now).await?;
        let usd_value = lamports as f64 / LAMPORTS_PER_SOL as f64 * sol_usd.price;
        let estimated_tokens = (usd_value / token_price_usd * 10f64.powi(VIBES_DECIMALS as i32)).floor() as u64;

        Ok(PurchaseQuote {
            sol_usd,
            token_price_usd,
            usd_value,
            estimated_tokens,
        })
    }

    pub async fn buy_with_sol(&self, buyer: Pubkey, lamports: u64) -> Result<WriteOutcome> {
        let ix = instructions::buy_with_sol(&self.config.programs, buyer, lamports)?;
        self.submitter.submit(&[ix], &buyer).await
    }

    pub async fn buy_with_usdc(&self, buyer: Pubkey, amount: u64) -> Result<WriteOutcome> {
        let ix = instructions::buy_with_usdc(&self.config.programs, buyer, self.config.usdc_mint, amount)?;
        self.submitter.submit(&[ix], &buyer).await
    }

    pub async fn opt_into_staking(&self, buyer: Pubkey) -> Result<WriteOutcome> {
        let ix = instructions::opt_into_staking(&self.config.programs, buyer)?;
        self.submitter.submit(&[ix], &buyer).await
    }

    /// Devnet and localnet faucet.
    pub async fn request_airdrop(&self, wallet: &Pubkey, lamports: u64) -> Result<TransactionId> {
        require!(!self.config.cluster.is_production(), ClientError::AirdropUnavailable);
        require!(lamports > 0, ClientError::ZeroAmount);

        msg!("requesting airdrop of {} lamports to {}", lamports, wallet);
        self.transport.request_airdrop(wallet, lamports).await
    }
}
