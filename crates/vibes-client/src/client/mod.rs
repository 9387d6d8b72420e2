//! Orchestration clients: fetch and decode state, derive the presented
//! values, and drive writes through an injected `TransactionSubmitter`.
//!
//! A missing account reads as `Ok(None)`. Transport failures propagate
//! unchanged and are never turned into zero values. Nothing here retries.

pub mod presale;
pub mod staking;
pub mod vesting;

pub use presale::*;
pub use staking::*;
pub use vesting::*;

use anchor_lang::prelude::*;

use crate::codec::decode_account;
use crate::state::AccountRecord;
use crate::transport::RpcTransport;

pub(crate) async fn fetch_record<T: AccountRecord, R: RpcTransport>(
    transport: &R,
    address: &Pubkey,
) -> Result<Option<T>> {
    match transport.get_account_data(address).await? {
        Some(data) => decode_account::<T>(&data).map(Some),
        None => Ok(None),
    }
}
