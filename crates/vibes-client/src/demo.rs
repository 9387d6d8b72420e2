//! In-memory doubles for running the clients without a cluster.
//!
//! `DemoLedger` stands in for the RPC transport, `DemoSigner` for the wallet
//! and `SimulatedSubmitter` for the whole write path. Placeholder records are
//! written here, as real encoded account bytes, and nowhere else.

use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};

use anchor_lang::prelude::*;
use solana_program::hash::{hash, Hash};
use solana_program::instruction::Instruction;
use solana_program::message::Message;

use crate::codec::encode_account;
use crate::config::{ClientConfig, Cluster, RawClientConfig};
use crate::constants::*;
use crate::errors::ClientError;
use crate::state::*;
use crate::transport::*;

struct LedgerState {
    accounts: HashMap<Pubkey, Vec<u8>>,
    offline: bool,
    confirmation: std::result::Result<ConfirmationStatus, ()>,
    sent: Vec<Vec<u8>>,
    airdrops: Vec<(Pubkey, u64)>,
    next_id: u64,
}

/// Account store and transaction sink behind the `RpcTransport` interface.
pub struct DemoLedger {
    state: Mutex<LedgerState>,
}

impl DemoLedger {
    pub fn new() -> Self {
        Self {
            state: Mutex::new(LedgerState {
                accounts: HashMap::new(),
                offline: false,
                confirmation: Ok(ConfirmationStatus::Confirmed),
                sent: Vec::new(),
                airdrops: Vec::new(),
                next_id: 0,
            }),
        }
    }

    fn state(&self) -> std::sync::MutexGuard<'_, LedgerState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn set_account(&self, address: Pubkey, data: Vec<u8>) {
        self.state().accounts.insert(address, data);
    }

    pub fn set_record<T: AccountRecord>(&self, address: Pubkey, record: &T) -> Result<()> {
        let data = encode_account(record)?;
        self.set_account(address, data);
        Ok(())
    }

    pub fn remove_account(&self, address: &Pubkey) {
        self.state().accounts.remove(address);
    }

    /// While offline every call fails with `TransportFailure`.
    pub fn set_offline(&self, offline: bool) {
        self.state().offline = offline;
    }

    /// Status returned by `confirm_transaction`; `Err(())` makes the
    /// confirmation call itself fail.
    pub fn set_confirmation(&self, confirmation: std::result::Result<ConfirmationStatus, ()>) {
        self.state().confirmation = confirmation;
    }

    pub fn sent_transactions(&self) -> Vec<Vec<u8>> {
        self.state().sent.clone()
    }

    pub fn airdrops(&self) -> Vec<(Pubkey, u64)> {
        self.state().airdrops.clone()
    }

    fn online(&self) -> Result<std::sync::MutexGuard<'_, LedgerState>> {
        let state = self.state();
        if state.offline {
            msg!("demo ledger offline");
            return err!(ClientError::TransportFailure);
        }
        Ok(state)
    }

    fn next_id(state: &mut LedgerState, prefix: &str) -> TransactionId {
        state.next_id += 1;
        TransactionId(format!("{}-{}", prefix, state.next_id))
    }

    /// Writes a running presale and a partly filled staking pool, so the
    /// dashboards have something to show. Buyer, stake and vesting records
    /// are left absent.
    pub fn seed_placeholder(&self, config: &ClientConfig, now: i64) -> Result<()> {
        let week = 7 * SECONDS_PER_DAY;
        let one_vibes = 10u64.pow(VIBES_DECIMALS);

        let presale = PresaleState {
            authority: Pubkey::default(),
            token_mint: config.token_mint,
            usdc_mint: config.usdc_mint,
            price_schedule: vec![
                PriceTier { start_ts: now - week, price_usd: 0.001 },
                PriceTier { start_ts: now + week, price_usd: 0.0015 },
                PriceTier { start_ts: now + 3 * week, price_usd: 0.002 },
            ],
            start_ts: now - week,
            end_ts: now + 5 * week,
            hard_cap_total: 1_000_000_000 * one_vibes,
            raised_sol: 420 * LAMPORTS_PER_SOL,
            raised_usdc: 35_000_000_000,
            total_staked_during_presale: 0,
            acc_reward_per_token: 0,
            last_reward_update_ts: now - week,
        };
        self.set_record(config.programs.presale_state()?, &presale)?;

        let pool = StakePool {
            apy_bps: DEFAULT_PRESALE_REWARD_APY_BPS,
            global_cap: 100_000_000 * one_vibes,
            total_staked: 25_000_000 * one_vibes,
        };
        self.set_record(config.programs.stake_pool()?, &pool)?;
        Ok(())
    }
}

impl Default for DemoLedger {
    fn default() -> Self {
        Self::new()
    }
}

impl RpcTransport for DemoLedger {
    async fn get_account_data(&self, address: &Pubkey) -> Result<Option<Vec<u8>>> {
        let state = self.online()?;
        Ok(state.accounts.get(address).cloned())
    }

    async fn get_latest_blockhash(&self) -> Result<Hash> {
        let state = self.online()?;
        Ok(hash(&state.next_id.to_le_bytes()))
    }

    async fn send_transaction(&self, signed: Vec<u8>) -> Result<TransactionId> {
        let mut state = self.online()?;
        state.sent.push(signed);
        Ok(Self::next_id(&mut state, "demo-tx"))
    }

    async fn confirm_transaction(&self, _id: &TransactionId) -> Result<ConfirmationStatus> {
        let state = self.online()?;
        state
            .confirmation
            .clone()
            .map_err(|_| error!(ClientError::TransportFailure))
    }

    async fn request_airdrop(&self, address: &Pubkey, lamports: u64) -> Result<TransactionId> {
        let mut state = self.online()?;
        state.airdrops.push((*address, lamports));
        Ok(Self::next_id(&mut state, "demo-airdrop"))
    }
}

/// Wallet double. "Signing" returns the serialized message unchanged.
pub struct DemoSigner {
    pubkey: Pubkey,
    refuse: bool,
}

impl DemoSigner {
    pub fn new(pubkey: Pubkey) -> Self {
        Self { pubkey, refuse: false }
    }

    /// A wallet whose user declines every request.
    pub fn refusing(pubkey: Pubkey) -> Self {
        Self { pubkey, refuse: true }
    }
}

impl WalletSigner for DemoSigner {
    fn pubkey(&self) -> Pubkey {
        self.pubkey
    }

    async fn sign_transaction(&self, message: &Message) -> Result<Vec<u8>> {
        require!(!self.refuse, ClientError::SignatureRejected);
        Ok(message.serialize())
    }
}

/// Write path that never touches a transport. Every submission is recorded
/// and confirmed with a deterministic id.
#[derive(Default)]
pub struct SimulatedSubmitter {
    submissions: Mutex<Vec<(Pubkey, Vec<Instruction>)>>,
}

impl SimulatedSubmitter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn submissions(&self) -> Vec<(Pubkey, Vec<Instruction>)> {
        self.submissions
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl TransactionSubmitter for SimulatedSubmitter {
    async fn submit(&self, instructions: &[Instruction], payer: &Pubkey) -> Result<WriteOutcome> {
        let mut submissions = self.submissions.lock().unwrap_or_else(PoisonError::into_inner);
        submissions.push((*payer, instructions.to_vec()));
        let id = TransactionId(format!("simulated-{}", submissions.len()));
        msg!("simulated submission {} ({} instructions)", id, instructions.len());
        Ok(WriteOutcome::Confirmed(id))
    }
}

/// Localnet configuration with fixed program ids and mints.
pub fn demo_config() -> Result<ClientConfig> {
    ClientConfig::new(RawClientConfig {
        cluster: Cluster::Localnet,
        presale_program_id: Pubkey::new_from_array([11; 32]).to_string(),
        staking_program_id: Pubkey::new_from_array([12; 32]).to_string(),
        vesting_program_id: Pubkey::new_from_array([13; 32]).to_string(),
        token_mint: Pubkey::new_from_array([14; 32]).to_string(),
        usdc_mint: Pubkey::new_from_array([15; 32]).to_string(),
        sol_usd_feed: PYTH_SOL_USD_FEED.to_string(),
        presale_reward_apy_bps: DEFAULT_PRESALE_REWARD_APY_BPS,
        price_cache_ttl_seconds: PRICE_CACHE_TTL_SECONDS,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::decode_account;

    #[tokio::test]
    async fn test_ledger_round_trips_records() {
        let ledger = DemoLedger::new();
        let address = Pubkey::new_unique();
        let pool = StakePool { apy_bps: 500, global_cap: 10, total_staked: 3 };
        ledger.set_record(address, &pool).unwrap();

        let data = ledger.get_account_data(&address).await.unwrap().unwrap();
        assert_eq!(decode_account::<StakePool>(&data).unwrap(), pool);

        ledger.remove_account(&address);
        assert_eq!(ledger.get_account_data(&address).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_offline_ledger_fails() {
        let ledger = DemoLedger::new();
        ledger.set_offline(true);
        let err = ledger.get_account_data(&Pubkey::new_unique()).await.unwrap_err();
        assert_eq!(err, ClientError::TransportFailure.into());
    }

    #[tokio::test]
    async fn test_seed_placeholder() {
        let config = demo_config().unwrap();
        let ledger = DemoLedger::new();
        ledger.seed_placeholder(&config, 1_700_000_000).unwrap();

        let data = ledger
            .get_account_data(&config.programs.presale_state().unwrap())
            .await
            .unwrap()
            .unwrap();
        let presale = decode_account::<PresaleState>(&data).unwrap();
        assert_eq!(presale.phase(1_700_000_000), PresalePhase::Active);
        assert_eq!(presale.price_schedule.len(), 3);
    }

    #[tokio::test]
    async fn test_simulated_submitter_ids_are_deterministic() {
        let submitter = SimulatedSubmitter::new();
        let payer = Pubkey::new_unique();
        let first = submitter.submit(&[], &payer).await.unwrap();
        let second = submitter.submit(&[], &payer).await.unwrap();
        assert_eq!(first, WriteOutcome::Confirmed(TransactionId("simulated-1".into())));
        assert_eq!(second.id().0, "simulated-2");
        assert_eq!(submitter.submissions().len(), 2);
    }

    #[test]
    fn test_demo_config_is_not_production() {
        let config = demo_config().unwrap();
        assert_eq!(config.cluster, Cluster::Localnet);
        assert!(!config.cluster.is_production());
    }
}
