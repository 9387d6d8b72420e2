//! Off-chain client for the VIBES presale, staking and vesting programs.
//!
//! Decodes the programs' accounts, encodes their instructions, and computes
//! the time-dependent schedules (tier pricing, reward accrual, vesting) the
//! way the programs do.

pub mod client;
pub mod codec;
pub mod config;
pub mod constants;
pub mod demo;
pub mod errors;
pub mod instructions;
pub mod math;
pub mod pda;
pub mod price;
pub mod state;
pub mod transport;

pub use client::{PresaleClient, StakingClient, VestingClient};
pub use codec::{decode, decode_account, encode_account, encode_instruction, DecodedAccount};
pub use config::{ClientConfig, Cluster, RawClientConfig};
pub use errors::ClientError;
pub use pda::{derive, ProgramAddresses};
pub use price::{PriceCache, PriceQuote, PriceSource, PythPriceSource};
pub use transport::{
    ConfirmationStatus, RpcSubmitter, RpcTransport, TransactionId, TransactionSubmitter,
    WalletSigner, WriteOutcome,
};
