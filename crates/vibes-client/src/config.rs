use std::str::FromStr;

use anchor_lang::prelude::*;
use serde::Deserialize;

use crate::constants::*;
use crate::errors::ClientError;
use crate::pda::ProgramAddresses;

/// Cluster the client talks to. Only non-production clusters allow airdrops.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Cluster {
    Mainnet,
    Devnet,
    Localnet,
}

impl Cluster {
    pub fn is_production(&self) -> bool {
        matches!(self, Cluster::Mainnet)
    }
}

/// Deployment settings as they come from a settings file or the environment,
/// before validation.
#[derive(Clone, Debug, Deserialize)]
pub struct RawClientConfig {
    pub cluster: Cluster,
    pub presale_program_id: String,
    pub staking_program_id: String,
    pub vesting_program_id: String,
    pub token_mint: String,
    pub usdc_mint: String,
    #[serde(default = "default_sol_usd_feed")]
    pub sol_usd_feed: String,
    #[serde(default = "default_presale_reward_apy_bps")]
    pub presale_reward_apy_bps: u64,
    #[serde(default = "default_price_cache_ttl")]
    pub price_cache_ttl_seconds: i64,
}

fn default_sol_usd_feed() -> String {
    PYTH_SOL_USD_FEED.to_string()
}

fn default_presale_reward_apy_bps() -> u64 {
    DEFAULT_PRESALE_REWARD_APY_BPS
}

fn default_price_cache_ttl() -> i64 {
    PRICE_CACHE_TTL_SECONDS
}

/// Validated client configuration, built once at process start.
#[derive(Clone, Debug, PartialEq)]
pub struct ClientConfig {
    pub cluster: Cluster,
    pub programs: ProgramAddresses,
    pub token_mint: Pubkey,
    pub usdc_mint: Pubkey,
    pub sol_usd_feed: Pubkey,
    /// APY used to estimate presale rewards until the accumulator moves.
    pub presale_reward_apy_bps: u64,
    pub price_cache_ttl_seconds: i64,
}

impl ClientConfig {
    /// Parses every address and derives the singleton PDAs up front, so a
    /// misconfigured deployment fails here rather than on first use.
    pub fn new(raw: RawClientConfig) -> Result<Self> {
        let programs = ProgramAddresses {
            presale_program: parse_pubkey("presale_program_id", &raw.presale_program_id)?,
            staking_program: parse_pubkey("staking_program_id", &raw.staking_program_id)?,
            vesting_program: parse_pubkey("vesting_program_id", &raw.vesting_program_id)?,
        };
        let token_mint = parse_pubkey("token_mint", &raw.token_mint)?;
        let usdc_mint = parse_pubkey("usdc_mint", &raw.usdc_mint)?;
        let sol_usd_feed = parse_pubkey("sol_usd_feed", &raw.sol_usd_feed)?;

        require!(
            token_mint != Pubkey::default() && usdc_mint != Pubkey::default(),
            ClientError::InvalidConfiguration
        );
        require!(token_mint != usdc_mint, ClientError::InvalidConfiguration);
        require!(
            raw.price_cache_ttl_seconds > 0,
            ClientError::InvalidConfiguration
        );

        programs.validate()?;

        Ok(Self {
            cluster: raw.cluster,
            programs,
            token_mint,
            usdc_mint,
            sol_usd_feed,
            presale_reward_apy_bps: raw.presale_reward_apy_bps,
            price_cache_ttl_seconds: raw.price_cache_ttl_seconds,
        })
    }
}

fn parse_pubkey(field: &str, value: &str) -> Result<Pubkey> {
    Pubkey::from_str(value).map_err(|_| {
        msg!("invalid {}: {:?}", field, value);
        error!(ClientError::InvalidConfiguration)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw() -> RawClientConfig {
        RawClientConfig {
            cluster: Cluster::Devnet,
            presale_program_id: Pubkey::new_from_array([1; 32]).to_string(),
            staking_program_id: Pubkey::new_from_array([2; 32]).to_string(),
            vesting_program_id: Pubkey::new_from_array([3; 32]).to_string(),
            token_mint: Pubkey::new_from_array([4; 32]).to_string(),
            usdc_mint: Pubkey::new_from_array([5; 32]).to_string(),
            sol_usd_feed: PYTH_SOL_USD_FEED.to_string(),
            presale_reward_apy_bps: 1_000,
            price_cache_ttl_seconds: 120,
        }
    }

    #[test]
    fn test_valid_config() {
        let config = ClientConfig::new(raw()).unwrap();
        assert_eq!(config.programs.presale_program, Pubkey::new_from_array([1; 32]));
        assert_eq!(config.token_mint, Pubkey::new_from_array([4; 32]));
        assert_eq!(config.presale_reward_apy_bps, 1_000);
        assert!(!config.cluster.is_production());
    }

    #[test]
    fn test_bad_address_fails_fast() {
        let mut raw = raw();
        raw.staking_program_id = "not-a-pubkey".to_string();
        let err = ClientConfig::new(raw).unwrap_err();
        assert_eq!(err, ClientError::InvalidConfiguration.into());
    }

    #[test]
    fn test_same_mint_rejected() {
        let mut raw = raw();
        raw.usdc_mint = raw.token_mint.clone();
        assert!(ClientConfig::new(raw).is_err());
    }

    #[test]
    fn test_zero_ttl_rejected() {
        let mut raw = raw();
        raw.price_cache_ttl_seconds = 0;
        assert!(ClientConfig::new(raw).is_err());
    }

    #[test]
    fn test_deserialize_with_defaults() {
        let json = format!(
            r#"{{
                "cluster": "mainnet",
                "presale_program_id": "{}",
                "staking_program_id": "{}",
                "vesting_program_id": "{}",
                "token_mint": "{}",
                "usdc_mint": "{}"
            }}"#,
            Pubkey::new_from_array([1; 32]),
            Pubkey::new_from_array([2; 32]),
            Pubkey::new_from_array([3; 32]),
            Pubkey::new_from_array([4; 32]),
            Pubkey::new_from_array([5; 32]),
        );
        let raw: RawClientConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(raw.presale_reward_apy_bps, DEFAULT_PRESALE_REWARD_APY_BPS);
        assert_eq!(raw.price_cache_ttl_seconds, PRICE_CACHE_TTL_SECONDS);
        let config = ClientConfig::new(raw).unwrap();
        assert!(config.cluster.is_production());
        assert_eq!(config.sol_usd_feed.to_string(), PYTH_SOL_USD_FEED);
    }
}
