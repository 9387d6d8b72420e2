//! RPC boundary: account reads, transaction submission and confirmation.
//!
//! The transport itself lives outside this crate. Implementations map every
//! network or node error to `ClientError::TransportFailure`; "no such
//! account" is `Ok(None)`, never an error.

use std::fmt;
use std::future::Future;
use std::sync::Arc;

use anchor_lang::prelude::*;
use solana_program::hash::Hash;
use solana_program::instruction::Instruction;
use solana_program::message::Message;

use crate::errors::ClientError;

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct TransactionId(pub String);

impl fmt::Display for TransactionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ConfirmationStatus {
    Confirmed,
    Pending,
    Failed(String),
}

/// Result of a write. Only `Rejected` means the chain refused it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum WriteOutcome {
    Confirmed(TransactionId),
    /// Dispatched but not confirmed yet (or the confirmation call failed).
    Submitted(TransactionId),
    Rejected { id: TransactionId, reason: String },
}

impl WriteOutcome {
    pub fn id(&self) -> &TransactionId {
        match self {
            WriteOutcome::Confirmed(id) | WriteOutcome::Submitted(id) => id,
            WriteOutcome::Rejected { id, .. } => id,
        }
    }
}

pub trait RpcTransport: Send + Sync {
    fn get_account_data(
        &self,
        address: &Pubkey,
    ) -> impl Future<Output = Result<Option<Vec<u8>>>> + Send;

    fn get_latest_blockhash(&self) -> impl Future<Output = Result<Hash>> + Send;

    fn send_transaction(
        &self,
        signed: Vec<u8>,
    ) -> impl Future<Output = Result<TransactionId>> + Send;

    fn confirm_transaction(
        &self,
        id: &TransactionId,
    ) -> impl Future<Output = Result<ConfirmationStatus>> + Send;

    /// Only served by non-production clusters.
    fn request_airdrop(
        &self,
        address: &Pubkey,
        lamports: u64,
    ) -> impl Future<Output = Result<TransactionId>> + Send;
}

/// External wallet. Key handling and signature cryptography stay on its
/// side; a refusal is `SignatureRejected`.
pub trait WalletSigner: Send + Sync {
    fn pubkey(&self) -> Pubkey;

    fn sign_transaction(&self, message: &Message) -> impl Future<Output = Result<Vec<u8>>> + Send;
}

pub trait TransactionSubmitter: Send + Sync {
    fn submit(
        &self,
        instructions: &[Instruction],
        payer: &Pubkey,
    ) -> impl Future<Output = Result<WriteOutcome>> + Send;
}

/// Submits through a real transport:
/// blockhash -> message -> sign -> send -> confirm.
pub struct RpcSubmitter<T, S> {
    transport: Arc<T>,
    signer: S,
}

impl<T: RpcTransport, S: WalletSigner> RpcSubmitter<T, S> {
    pub fn new(transport: Arc<T>, signer: S) -> Self {
        Self { transport, signer }
    }
}

impl<T: RpcTransport, S: WalletSigner> TransactionSubmitter for RpcSubmitter<T, S> {
    async fn submit(&self, instructions: &[Instruction], payer: &Pubkey) -> Result<WriteOutcome> {
        require_keys_eq!(*payer, self.signer.pubkey(), ClientError::SignatureRejected);

        let blockhash = self.transport.get_latest_blockhash().await?;
        let message = Message::new_with_blockhash(instructions, Some(payer), &blockhash);
        let signed = self.signer.sign_transaction(&message).await?;
        let id = self.transport.send_transaction(signed).await?;

        // The transaction is out; a failed status query must not hide that.
        let outcome = match self.transport.confirm_transaction(&id).await {
            Ok(ConfirmationStatus::Confirmed) => WriteOutcome::Confirmed(id),
            Ok(ConfirmationStatus::Pending) => WriteOutcome::Submitted(id),
            Ok(ConfirmationStatus::Failed(reason)) => {
                msg!("transaction {} rejected: {}", id, reason);
                WriteOutcome::Rejected { id, reason }
            }
            Err(e) => {
                msg!("confirmation of {} failed: {}", id, e);
                WriteOutcome::Submitted(id)
            }
        };
        Ok(outcome)
    }
}
