pub mod pricing;
pub mod rewards;
pub mod vesting;

pub use pricing::*;
pub use rewards::*;
pub use vesting::*;
