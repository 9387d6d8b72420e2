pub mod buy_with_sol;
pub mod buy_with_usdc;
pub mod opt_into_staking;
pub mod stake;
pub mod claim_rewards;
pub mod claim_vested;

pub use buy_with_sol::*;
pub use buy_with_usdc::*;
pub use opt_into_staking::*;
pub use stake::*;
pub use claim_rewards::*;
pub use claim_vested::*;
