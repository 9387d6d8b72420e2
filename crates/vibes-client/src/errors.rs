use anchor_lang::prelude::*;

#[error_code]
pub enum ClientError {
    #[msg("Account has not been created yet")]
    AccountNotFound,
    #[msg("Account data is shorter than its fixed layout")]
    TruncatedAccount,
    #[msg("Account data does not match the expected layout")]
    MalformedAccount,
    #[msg("RPC transport failure")]
    TransportFailure,
    #[msg("No valid bump found for seed set")]
    SeedDerivationFailure,
    #[msg("Invalid client configuration")]
    InvalidConfiguration,
    #[msg("Price schedule is empty")]
    EmptyPriceSchedule,
    #[msg("Price schedule is not sorted by start time")]
    UnsortedPriceSchedule,
    #[msg("Math overflow")]
    MathOverflow,
    #[msg("Unknown instruction name")]
    UnknownInstruction,
    #[msg("Nothing to claim")]
    NothingToClaim,
    #[msg("Vesting schedule has been cancelled")]
    ScheduleCancelled,
    #[msg("Airdrops are not available on this cluster")]
    AirdropUnavailable,
    #[msg("No price available for pair")]
    PriceUnavailable,
    #[msg("Wallet refused to sign the transaction")]
    SignatureRejected,
    #[msg("Amount must be greater than zero")]
    ZeroAmount,
    #[msg("Stake exceeds remaining pool capacity")]
    PoolCapacityExceeded,
    #[msg("Unstake amount exceeds staked balance")]
    InsufficientStake,
}
