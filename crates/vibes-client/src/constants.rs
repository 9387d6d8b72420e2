// ============================================================================
// PDA SEEDS
// ============================================================================

pub const SEED_PRESALE_STATE: &[u8] = b"presale_state";
pub const SEED_BUYER_STATE: &[u8] = b"buyer_state";
pub const SEED_SOL_VAULT: &[u8] = b"sol_vault";
pub const SEED_USDC_VAULT: &[u8] = b"usdc_vault";
pub const SEED_STAKE_POOL: &[u8] = b"pool";
pub const SEED_USER_STAKE: &[u8] = b"stake";
pub const SEED_VESTING: &[u8] = b"vesting";
pub const SEED_VESTING_VAULT: &[u8] = b"vesting_vault";

// ============================================================================
// INSTRUCTION DISCRIMINATORS
// ============================================================================
//
// Published selectors of the external programs. These are looked up, never
// recomputed: a wrong value selects a different instruction on-chain.

pub const IX_BUY_WITH_SOL: [u8; 8] = [0x31, 0x39, 0x7c, 0xc2, 0xf0, 0x14, 0xd8, 0x66];
pub const IX_BUY_WITH_USDC: [u8; 8] = [0x21, 0xd1, 0xd3, 0x7c, 0x37, 0x8e, 0x7a, 0xd4];
pub const IX_OPT_INTO_STAKING: [u8; 8] = [0xd1, 0x53, 0x57, 0xad, 0x00, 0x4e, 0x4c, 0x43];
pub const IX_STAKE: [u8; 8] = [0xce, 0xb0, 0xca, 0x12, 0xc8, 0xd1, 0xb3, 0x6c];
pub const IX_UNSTAKE: [u8; 8] = [0x5a, 0x5f, 0x6b, 0x2a, 0xcd, 0x7c, 0x32, 0xe1];
pub const IX_CLAIM_REWARDS: [u8; 8] = [0x04, 0x90, 0x84, 0x47, 0x74, 0x17, 0x97, 0x50];
pub const IX_CLAIM_VESTED: [u8; 8] = [0xd0, 0xbe, 0xa6, 0x72, 0xcb, 0xe1, 0x8c, 0xd0];

/// Name to selector lookup used by `codec::encode_instruction`.
pub const INSTRUCTION_DISCRIMINATORS: [(&str, [u8; 8]); 7] = [
    ("buy_with_sol", IX_BUY_WITH_SOL),
    ("buy_with_usdc", IX_BUY_WITH_USDC),
    ("opt_into_staking", IX_OPT_INTO_STAKING),
    ("stake", IX_STAKE),
    ("unstake", IX_UNSTAKE),
    ("claim_rewards", IX_CLAIM_REWARDS),
    ("claim_vested", IX_CLAIM_VESTED),
];

// ============================================================================
// ACCOUNT LAYOUT
// ============================================================================

pub const ACCOUNT_DISCRIMINATOR_LEN: usize = 8;
pub const PUBKEY_LEN: usize = 32;
/// start_ts(8) + price_usd(8)
pub const PRICE_TIER_LEN: usize = 8 + 8;

// ============================================================================
// REWARD MATH
// ============================================================================

/// Fixed-point scale of `acc_reward_per_token`.
pub const ACC_REWARD_SCALE: u128 = 1_000_000_000_000;
pub const BPS_DENOMINATOR: u128 = 10_000;
pub const SECONDS_PER_DAY: i64 = 86_400;
pub const SECONDS_PER_YEAR: i64 = 365 * SECONDS_PER_DAY;

// ============================================================================
// VESTING CONTRACT PARAMETERS
// ============================================================================
//
// Mirrors the external vesting program. Changing any of these desynchronizes
// the client from the on-chain schedule.

pub const VESTING_CLIFF_SECONDS: i64 = 365 * SECONDS_PER_DAY;
pub const VESTING_MONTH_SECONDS: i64 = 30 * SECONDS_PER_DAY;
pub const VESTING_CLIFF_UNLOCK_PCT: u128 = 40;
pub const VESTING_MONTHLY_UNLOCK_PCT: u128 = 20;
pub const VESTING_TRANCHE_COUNT: i64 = 3;

// ============================================================================
// PRICE CACHE
// ============================================================================

pub const PAIR_SOL_USD: &str = "SOL/USD";
pub const PAIR_USDC_USD: &str = "USDC/USD";
pub const PRICE_CACHE_TTL_SECONDS: i64 = 120;
/// Oldest Pyth publish time accepted by `PythPriceSource`.
pub const PYTH_MAX_PRICE_AGE_SECONDS: u64 = 60;
/// Pyth SOL/USD price account on mainnet.
pub const PYTH_SOL_USD_FEED: &str = "H6ARzDJwhJiCqy9sJfqKhMCH2RKM9nEYYGNGhLVK8t4b";

/// Last-resort quotes served when no source and no cache entry is available.
pub const FALLBACK_PRICES: [(&str, f64); 2] = [(PAIR_SOL_USD, 150.0), (PAIR_USDC_USD, 1.0)];

// ============================================================================
// UNITS
// ============================================================================

pub const LAMPORTS_PER_SOL: u64 = 1_000_000_000;
pub const VIBES_DECIMALS: u32 = 9;
/// Default presale reward APY used while the accumulator is not yet advanced.
pub const DEFAULT_PRESALE_REWARD_APY_BPS: u64 = 1_200;
