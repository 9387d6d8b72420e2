//! Account decoding and instruction payload encoding.

use anchor_lang::prelude::*;

use crate::constants::*;
use crate::errors::ClientError;
use crate::state::*;

/// Any decoded account, tagged by kind.
#[derive(Clone, Debug, PartialEq)]
pub enum DecodedAccount {
    PresaleState(PresaleState),
    BuyerState(BuyerState),
    VestingSchedule(VestingSchedule),
    StakePool(StakePool),
    UserStake(UserStake),
}

/// Decodes raw account bytes into a typed record.
///
/// The 8-byte discriminator is checked and skipped. Trailing bytes past the
/// record are ignored so that programs can grow their accounts.
pub fn decode_account<T: AccountRecord>(data: &[u8]) -> Result<T> {
    require!(
        data.len() >= ACCOUNT_DISCRIMINATOR_LEN + T::MIN_BODY_LEN,
        ClientError::TruncatedAccount
    );
    if data[..ACCOUNT_DISCRIMINATOR_LEN] != T::DISCRIMINATOR {
        msg!("discriminator mismatch for {}", T::KIND.name());
        return err!(ClientError::MalformedAccount);
    }

    let mut body = &data[ACCOUNT_DISCRIMINATOR_LEN..];
    let required = T::required_body_len(body).ok_or(ClientError::MalformedAccount)?;
    require!(body.len() >= required, ClientError::TruncatedAccount);

    T::deserialize(&mut body).map_err(|e| {
        msg!("failed to decode {}: {}", T::KIND.name(), e);
        error!(ClientError::MalformedAccount)
    })
}

/// Decodes raw account bytes as the given kind.
pub fn decode(kind: AccountKind, data: &[u8]) -> Result<DecodedAccount> {
    Ok(match kind {
        AccountKind::PresaleState => DecodedAccount::PresaleState(decode_account(data)?),
        AccountKind::BuyerState => DecodedAccount::BuyerState(decode_account(data)?),
        AccountKind::VestingSchedule => DecodedAccount::VestingSchedule(decode_account(data)?),
        AccountKind::StakePool => DecodedAccount::StakePool(decode_account(data)?),
        AccountKind::UserStake => DecodedAccount::UserStake(decode_account(data)?),
    })
}

/// Produces the exact on-chain byte image of a record:
/// discriminator ‖ body.
pub fn encode_account<T: AccountRecord>(record: &T) -> Result<Vec<u8>> {
    let mut data = Vec::with_capacity(ACCOUNT_DISCRIMINATOR_LEN + T::MIN_BODY_LEN);
    data.extend_from_slice(&T::DISCRIMINATOR);
    record.serialize(&mut data).map_err(|e| {
        msg!("failed to encode {}: {}", T::KIND.name(), e);
        error!(ClientError::MalformedAccount)
    })?;
    Ok(data)
}

/// Looks up the published selector of an instruction.
pub fn instruction_discriminator(name: &str) -> Result<[u8; 8]> {
    INSTRUCTION_DISCRIMINATORS
        .iter()
        .find(|(ix_name, _)| *ix_name == name)
        .map(|(_, discriminator)| *discriminator)
        .ok_or_else(|| {
            msg!("unknown instruction {:?}", name);
            error!(ClientError::UnknownInstruction)
        })
}

/// Builds instruction data: discriminator(8) ‖ packed args.
pub fn encode_instruction(name: &str, args: &[u8]) -> Result<Vec<u8>> {
    let discriminator = instruction_discriminator(name)?;
    let mut data = Vec::with_capacity(discriminator.len() + args.len());
    data.extend_from_slice(&discriminator);
    data.extend_from_slice(args);
    Ok(data)
}

#[cfg(test)]
mod tests {
    use super::*;
    use anchor_lang::solana_program::hash::hash;
    use anchor_lang::Discriminator;

    fn presale_state() -> PresaleState {
        PresaleState {
            authority: Pubkey::new_from_array([1; 32]),
            token_mint: Pubkey::new_from_array([2; 32]),
            usdc_mint: Pubkey::new_from_array([3; 32]),
            price_schedule: vec![
                PriceTier { start_ts: 1_700_000_000, price_usd: 0.01 },
                PriceTier { start_ts: 1_700_600_000, price_usd: 0.0125 },
                PriceTier { start_ts: 1_701_200_000, price_usd: 0.015 },
            ],
            start_ts: 1_700_000_000,
            end_ts: 1_710_000_000,
            hard_cap_total: 5_000_000_000_000_000,
            raised_sol: 12_345_000_000_000,
            raised_usdc: 987_654_000_000,
            total_staked_during_presale: 3_000_000_000_000_000,
            acc_reward_per_token: (7u128 << 64) + 123_456_789,
            last_reward_update_ts: 1_700_700_000,
        }
    }

    fn buyer_state() -> BuyerState {
        BuyerState {
            buyer: Pubkey::new_from_array([9; 32]),
            total_purchased_vibes: 1_000_000_000_000,
            sol_contributed: 2_000_000_000,
            usdc_contributed: 150_000_000,
            accumulated_rewards: 42,
            reward_debt: u128::MAX - 1,
            total_rewards_claimed: 7,
            last_update_ts: 1_700_000_123,
            transferred_to_vesting: true,
            final_vesting_amount: 1_000_000_042,
        }
    }

    #[test]
    fn test_presale_state_round_trip() {
        let state = presale_state();
        let data = encode_account(&state).unwrap();
        assert_eq!(&data[..8], &PresaleState::DISCRIMINATOR);
        assert_eq!(
            data.len(),
            8 + PresaleState::MIN_BODY_LEN + 3 * PRICE_TIER_LEN
        );
        assert_eq!(decode_account::<PresaleState>(&data).unwrap(), state);
    }

    #[test]
    fn test_buyer_state_round_trip() {
        let buyer = buyer_state();
        let data = encode_account(&buyer).unwrap();
        assert_eq!(data.len(), 8 + BuyerState::MIN_BODY_LEN);
        assert_eq!(decode_account::<BuyerState>(&data).unwrap(), buyer);
    }

    #[test]
    fn test_small_records_round_trip() {
        let schedule = VestingSchedule {
            authority: Pubkey::new_from_array([1; 32]),
            beneficiary: Pubkey::new_from_array([2; 32]),
            token_mint: Pubkey::new_from_array([3; 32]),
            total_amount: 10_000,
            claimed_amount: 4_000,
            listing_ts: 1_750_000_000,
            cancelled: false,
        };
        let pool = StakePool { apy_bps: 1_500, global_cap: 1 << 50, total_staked: 1 << 40 };
        let stake = UserStake { stake_amount: 5_000, reward_debt: 12, last_stake_ts: -5 };

        let decoded = decode(AccountKind::VestingSchedule, &encode_account(&schedule).unwrap());
        assert_eq!(decoded.unwrap(), DecodedAccount::VestingSchedule(schedule));
        let decoded = decode(AccountKind::StakePool, &encode_account(&pool).unwrap());
        assert_eq!(decoded.unwrap(), DecodedAccount::StakePool(pool));
        let decoded = decode(AccountKind::UserStake, &encode_account(&stake).unwrap());
        assert_eq!(decoded.unwrap(), DecodedAccount::UserStake(stake));
    }

    #[test]
    fn test_field_offsets() {
        let state = presale_state();
        let data = encode_account(&state).unwrap();
        let body = &data[8..];
        assert_eq!(&body[..32], state.authority.as_ref());
        assert_eq!(&body[96..100], &3u32.to_le_bytes());
        assert_eq!(&body[100..108], &1_700_000_000i64.to_le_bytes());
        assert_eq!(&body[108..116], &0.01f64.to_le_bytes());

        // acc_reward_per_token sits 24 bytes before the end: low half then high half.
        let acc = &body[body.len() - 24..body.len() - 8];
        assert_eq!(&acc[..8], &123_456_789u64.to_le_bytes());
        assert_eq!(&acc[8..], &7u64.to_le_bytes());
    }

    #[test]
    fn test_u128_reconstructed_from_halves() {
        let mut data = encode_account(&buyer_state()).unwrap();
        // reward_debt: buyer(32) + four u64 fields(32) after the discriminator
        let offset = 8 + 32 + 32;
        data[offset..offset + 8].copy_from_slice(&5u64.to_le_bytes());
        data[offset + 8..offset + 16].copy_from_slice(&3u64.to_le_bytes());
        let decoded = decode_account::<BuyerState>(&data).unwrap();
        assert_eq!(decoded.reward_debt, 5 + 3 * (1u128 << 64));
    }

    #[test]
    fn test_truncated_account() {
        let data = encode_account(&buyer_state()).unwrap();
        let err = decode_account::<BuyerState>(&data[..data.len() - 1]).unwrap_err();
        assert_eq!(err, ClientError::TruncatedAccount.into());
        let err = decode_account::<BuyerState>(&[]).unwrap_err();
        assert_eq!(err, ClientError::TruncatedAccount.into());
    }

    #[test]
    fn test_truncated_price_schedule() {
        let data = encode_account(&presale_state()).unwrap();
        // Fixed prefix present, but the third tier is cut short.
        let cut = data.len() - 4;
        let err = decode_account::<PresaleState>(&data[..cut]).unwrap_err();
        assert_eq!(err, ClientError::TruncatedAccount.into());
    }

    #[test]
    fn test_trailing_bytes_ignored() {
        let buyer = buyer_state();
        let mut data = encode_account(&buyer).unwrap();
        data.extend_from_slice(&[0xAB; 64]);
        assert_eq!(decode_account::<BuyerState>(&data).unwrap(), buyer);
    }

    #[test]
    fn test_wrong_discriminator() {
        let data = encode_account(&buyer_state()).unwrap();
        let err = decode_account::<VestingSchedule>(&data).unwrap_err();
        assert_eq!(err, ClientError::MalformedAccount.into());
    }

    #[test]
    fn test_invalid_bool_is_malformed() {
        let mut data = encode_account(&buyer_state()).unwrap();
        // transferred_to_vesting is the byte before final_vesting_amount.
        let offset = data.len() - 9;
        data[offset] = 2;
        let err = decode_account::<BuyerState>(&data).unwrap_err();
        assert_eq!(err, ClientError::MalformedAccount.into());
    }

    #[test]
    fn test_instruction_table_follows_anchor_convention() {
        for (name, discriminator) in INSTRUCTION_DISCRIMINATORS {
            let digest = hash(format!("global:{}", name).as_bytes()).to_bytes();
            assert_eq!(&digest[..8], &discriminator, "{}", name);
        }
    }

    #[test]
    fn test_encode_instruction() {
        let data = encode_instruction("buy_with_sol", &1_500_000_000u64.to_le_bytes()).unwrap();
        assert_eq!(
            data,
            vec![
                0x31, 0x39, 0x7c, 0xc2, 0xf0, 0x14, 0xd8, 0x66, 0x00, 0x2f, 0x68, 0x59, 0x00,
                0x00, 0x00, 0x00
            ]
        );
        let data = encode_instruction("opt_into_staking", &[]).unwrap();
        assert_eq!(data, vec![0xd1, 0x53, 0x57, 0xad, 0x00, 0x4e, 0x4c, 0x43]);
    }

    #[test]
    fn test_unknown_instruction() {
        let err = encode_instruction("buy_with_btc", &[]).unwrap_err();
        assert_eq!(err, ClientError::UnknownInstruction.into());
    }
}
