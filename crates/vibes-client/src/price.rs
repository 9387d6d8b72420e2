//! Price quotes with a short-lived cache in front of the oracle.
//!
//! Lookup order for a pair:
//! 1. fresh cache entry (younger than the TTL)
//! 2. live fetch from the source, stored on success
//! 3. expired cache entry, flagged `cached`
//! 4. hardcoded last-resort constant, flagged `fallback`
//!
//! Pairs with no constant fail with `PriceUnavailable`.

use std::collections::HashMap;
use std::future::Future;
use std::sync::{Arc, Mutex, PoisonError};

use anchor_lang::prelude::*;
use pyth_sdk_solana::state::SolanaPriceAccount;

use crate::constants::*;
use crate::errors::ClientError;
use crate::transport::RpcTransport;

pub trait PriceSource: Send + Sync {
    fn name(&self) -> &'static str;

    fn fetch_price(&self, pair: &str, now: i64) -> impl Future<Output = Result<f64>> + Send;
}

#[derive(Clone, Debug, PartialEq)]
pub struct PriceQuote {
    pub pair: String,
    pub price: f64,
    pub source: String,
    pub fetched_at: i64,
    /// Served from an expired cache entry because the source failed.
    pub cached: bool,
    /// Served from the hardcoded constant.
    pub fallback: bool,
}

#[derive(Clone, Debug, PartialEq)]
struct CachedPrice {
    price: f64,
    source: String,
    fetched_at: i64,
}

pub struct PriceCache {
    ttl_seconds: i64,
    entries: Mutex<HashMap<String, CachedPrice>>,
}

impl PriceCache {
    pub fn new(ttl_seconds: i64) -> Self {
        Self {
            ttl_seconds,
            entries: Mutex::new(HashMap::new()),
        }
    }

    fn entry(&self, pair: &str) -> Option<CachedPrice> {
        let entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        entries.get(pair).cloned()
    }

    /// Stores a quote. Last write wins.
    pub fn insert(&self, pair: &str, price: f64, source: &str, fetched_at: i64) {
        let mut entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        entries.insert(
            pair.to_string(),
            CachedPrice {
                price,
                source: source.to_string(),
                fetched_at,
            },
        );
    }

    pub async fn get_price<P: PriceSource>(&self, source: &P, pair: &str, now: i64) -> Result<PriceQuote> {
        let entry = self.entry(pair);

        if let Some(entry) = &entry {
            if now.saturating_sub(entry.fetched_at) < self.ttl_seconds {
                return Ok(quote(pair, entry, false));
            }
        }

        match source.fetch_price(pair, now).await {
            Ok(price) => {
                self.insert(pair, price, source.name(), now);
                Ok(PriceQuote {
                    pair: pair.to_string(),
                    price,
                    source: source.name().to_string(),
                    fetched_at: now,
                    cached: false,
                    fallback: false,
                })
            }
            Err(e) => {
                msg!("{} fetch from {} failed: {}", pair, source.name(), e);
                if let Some(entry) = &entry {
                    msg!("serving stale {} quote from {}", pair, entry.fetched_at);
                    return Ok(quote(pair, entry, true));
                }
                fallback_quote(pair, now)
            }
        }
    }
}

impl Default for PriceCache {
    fn default() -> Self {
        Self::new(PRICE_CACHE_TTL_SECONDS)
    }
}

fn quote(pair: &str, entry: &CachedPrice, cached: bool) -> PriceQuote {
    PriceQuote {
        pair: pair.to_string(),
        price: entry.price,
        source: entry.source.clone(),
        fetched_at: entry.fetched_at,
        cached,
        fallback: false,
    }
}

fn fallback_quote(pair: &str, now: i64) -> Result<PriceQuote> {
    let (_, price) = FALLBACK_PRICES
        .iter()
        .find(|(name, _)| *name == pair)
        .ok_or(ClientError::PriceUnavailable)?;
    msg!("serving fallback {} quote {}", pair, price);
    Ok(PriceQuote {
        pair: pair.to_string(),
        price: *price,
        source: "fallback".to_string(),
        fetched_at: now,
        cached: false,
        fallback: true,
    })
}

/// SOL/USD from a Pyth price account read through the RPC transport.
pub struct PythPriceSource<T> {
    transport: Arc<T>,
    feed: Pubkey,
}

impl<T: RpcTransport> PythPriceSource<T> {
    pub fn new(transport: Arc<T>, feed: Pubkey) -> Self {
        Self { transport, feed }
    }

    pub fn feed(&self) -> &Pubkey {
        &self.feed
    }
}

impl<T: RpcTransport> PriceSource for PythPriceSource<T> {
    fn name(&self) -> &'static str {
        "pyth"
    }

    async fn fetch_price(&self, pair: &str, now: i64) -> Result<f64> {
        require!(pair == PAIR_SOL_USD, ClientError::PriceUnavailable);

        let data = self
            .transport
            .get_account_data(&self.feed)
            .await?
            .ok_or(ClientError::AccountNotFound)?;
        parse_pyth_price(&self.feed, data, now)
    }
}

/// Reads the aggregate price of a Pyth price account, rejecting quotes older
/// than `PYTH_MAX_PRICE_AGE_SECONDS`.
pub fn parse_pyth_price(feed: &Pubkey, mut data: Vec<u8>, now: i64) -> Result<f64> {
    require!(
        data.len() >= std::mem::size_of::<SolanaPriceAccount>(),
        ClientError::PriceUnavailable
    );

    let mut lamports = 0u64;
    let owner = Pubkey::default();
    let account_info = AccountInfo::new(feed, false, false, &mut lamports, &mut data, &owner, false, 0);

    let price_feed = SolanaPriceAccount::account_info_to_feed(&account_info)
        .map_err(|_| ClientError::PriceUnavailable)?;
    let price = price_feed
        .get_price_no_older_than(now, PYTH_MAX_PRICE_AGE_SECONDS)
        .ok_or(ClientError::PriceUnavailable)?;
    require!(price.price > 0, ClientError::PriceUnavailable);

    Ok(price.price as f64 * 10f64.powi(price.expo))
}
