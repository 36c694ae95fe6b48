//! Account state layouts for the stake pool program.
//!
//! These records mirror the on-chain byte layouts field for field; order and
//! widths are load-bearing. Values are decoded fresh from fetched account
//! data and never mutated in place; a changed value is re-encoded.

use solana_program::pubkey::Pubkey;

use crate::{
    codec::{Codec, FutureEpoch, Reader, Writer},
    error::CodecError,
};

/// Tag byte identifying which record an account holds.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum AccountType {
    /// Account has not been initialized yet.
    #[default]
    Uninitialized,
    /// Stake pool configuration record.
    StakePool,
    /// Validator list record.
    ValidatorList,
}

impl Codec for AccountType {
    const SPAN: Option<usize> = Some(1);

    fn encode(&self, buf: &mut [u8], offset: usize) -> Result<usize, CodecError> {
        (*self as u8).encode(buf, offset)
    }

    fn decode_at(buf: &[u8], offset: usize) -> Result<(Self, usize), CodecError> {
        let (tag, consumed) = u8::decode_at(buf, offset)?;
        let value = match tag {
            0 => Self::Uninitialized,
            1 => Self::StakePool,
            2 => Self::ValidatorList,
            value => return Err(CodecError::InvalidDiscriminant { field: "", value }),
        };
        Ok((value, consumed))
    }

    fn value_span(&self) -> usize {
        1
    }
}

/// Fee assessed by the stake pool, expressed as the ratio
/// `numerator / denominator`.
///
/// The codec enforces nothing about the ratio (a zero denominator is
/// representable), so callers must guard the division themselves.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Fee {
    /// Denominator of the fee ratio. Serialized before the numerator.
    pub denominator: u64,
    /// Numerator of the fee ratio.
    pub numerator: u64,
}

impl Codec for Fee {
    const SPAN: Option<usize> = Some(8 + 8);

    fn encode(&self, buf: &mut [u8], offset: usize) -> Result<usize, CodecError> {
        let mut w = Writer::with_offset(buf, offset);
        w.write("denominator", &self.denominator)?;
        w.write("numerator", &self.numerator)?;
        Ok(w.position() - offset)
    }

    fn decode_at(buf: &[u8], offset: usize) -> Result<(Self, usize), CodecError> {
        let mut r = Reader::with_offset(buf, offset);
        let denominator = r.read("denominator")?;
        let numerator = r.read("numerator")?;
        Ok((
            Self {
                denominator,
                numerator,
            },
            r.position() - offset,
        ))
    }

    fn value_span(&self) -> usize {
        16
    }
}

/// Withdrawal restrictions carried over from the underlying stake program.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Lockup {
    /// Unix timestamp before which withdrawals are gated to the custodian.
    pub unix_timestamp: i64,
    /// Epoch before which withdrawals are gated to the custodian.
    pub epoch: u64,
    /// Custodian allowed to act during the lockup.
    pub custodian: Pubkey,
}

impl Codec for Lockup {
    const SPAN: Option<usize> = Some(8 + 8 + 32);

    fn encode(&self, buf: &mut [u8], offset: usize) -> Result<usize, CodecError> {
        let mut w = Writer::with_offset(buf, offset);
        w.write("unix_timestamp", &self.unix_timestamp)?;
        w.write("epoch", &self.epoch)?;
        w.write("custodian", &self.custodian)?;
        Ok(w.position() - offset)
    }

    fn decode_at(buf: &[u8], offset: usize) -> Result<(Self, usize), CodecError> {
        let mut r = Reader::with_offset(buf, offset);
        let unix_timestamp = r.read("unix_timestamp")?;
        let epoch = r.read("epoch")?;
        let custodian = r.read("custodian")?;
        Ok((
            Self {
                unix_timestamp,
                epoch,
                custodian,
            },
            r.position() - offset,
        ))
    }

    fn value_span(&self) -> usize {
        48
    }
}

/// Stake pool configuration account.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct StakePool {
    /// Account tag, `AccountType::StakePool` once initialized.
    pub account_type: AccountType,

    /// Authority that can change fees, the staker, and funding authorities.
    pub manager: Pubkey,

    /// Authority that manages the validator set and rebalancing.
    pub staker: Pubkey,

    /// Authority that must co-sign stake deposits.
    pub stake_deposit_authority: Pubkey,

    /// Bump seed of the pool's withdraw authority program address.
    pub stake_withdraw_bump_seed: u8,

    /// Address of the pool's validator list account.
    pub validator_list: Pubkey,

    /// Address of the pool's reserve stake account.
    pub reserve_stake: Pubkey,

    /// Mint of the pool tokens representing ownership of the pool.
    pub pool_mint: Pubkey,

    /// Token account receiving the manager's fees.
    pub manager_fee_account: Pubkey,

    /// Token program the pool mint belongs to.
    pub token_program_id: Pubkey,

    /// Total lamports under management, as of `last_update_epoch`.
    pub total_lamports: u64,

    /// Pool token supply, as of `last_update_epoch`.
    pub pool_token_supply: u64,

    /// Last epoch the balance fields were updated.
    pub last_update_epoch: u64,

    /// Lockup applied to the pool's stake accounts.
    pub lockup: Lockup,

    /// Fee taken from epoch rewards.
    pub epoch_fee: Fee,

    /// Epoch fee scheduled to replace `epoch_fee`.
    pub next_epoch_fee: FutureEpoch<Fee>,

    /// Validator that stake deposits must target, when set.
    pub preferred_deposit_validator_vote_address: Option<Pubkey>,

    /// Validator that stake withdrawals must draw from first, when set.
    pub preferred_withdraw_validator_vote_address: Option<Pubkey>,

    /// Fee assessed on stake deposits.
    pub stake_deposit_fee: Fee,

    /// Fee assessed on stake withdrawals.
    pub stake_withdrawal_fee: Fee,

    /// Withdrawal fee scheduled to replace `stake_withdrawal_fee`.
    pub next_stake_withdrawal_fee: FutureEpoch<Fee>,

    /// Portion of the stake deposit fee granted to referrers, in percent.
    pub stake_referral_fee: u8,

    /// Authority that must co-sign SOL deposits, when set.
    pub sol_deposit_authority: Option<Pubkey>,

    /// Fee assessed on SOL deposits.
    pub sol_deposit_fee: Fee,

    /// Portion of the SOL deposit fee granted to referrers, in percent.
    pub sol_referral_fee: u8,

    /// Authority that must co-sign SOL withdrawals, when set.
    pub sol_withdraw_authority: Option<Pubkey>,

    /// Fee assessed on SOL withdrawals.
    pub sol_withdrawal_fee: Fee,

    /// SOL withdrawal fee scheduled to replace `sol_withdrawal_fee`.
    pub next_sol_withdrawal_fee: FutureEpoch<Fee>,

    /// Pool token supply as of the previous epoch's update.
    pub last_epoch_pool_token_supply: u64,

    /// Total lamports as of the previous epoch's update.
    pub last_epoch_total_lamports: u64,
}

impl StakePool {
    /// Decodes a pool account fetched off-chain.
    pub fn decode(data: &[u8]) -> Result<Self, CodecError> {
        Self::decode_at(data, 0).map(|(pool, _)| pool)
    }
}

impl Codec for StakePool {
    const SPAN: Option<usize> = None;

    fn encode(&self, buf: &mut [u8], offset: usize) -> Result<usize, CodecError> {
        let mut w = Writer::with_offset(buf, offset);
        w.write("account_type", &self.account_type)?;
        w.write("manager", &self.manager)?;
        w.write("staker", &self.staker)?;
        w.write("stake_deposit_authority", &self.stake_deposit_authority)?;
        w.write("stake_withdraw_bump_seed", &self.stake_withdraw_bump_seed)?;
        w.write("validator_list", &self.validator_list)?;
        w.write("reserve_stake", &self.reserve_stake)?;
        w.write("pool_mint", &self.pool_mint)?;
        w.write("manager_fee_account", &self.manager_fee_account)?;
        w.write("token_program_id", &self.token_program_id)?;
        w.write("total_lamports", &self.total_lamports)?;
        w.write("pool_token_supply", &self.pool_token_supply)?;
        w.write("last_update_epoch", &self.last_update_epoch)?;
        w.write("lockup", &self.lockup)?;
        w.write("epoch_fee", &self.epoch_fee)?;
        w.write("next_epoch_fee", &self.next_epoch_fee)?;
        w.write(
            "preferred_deposit_validator_vote_address",
            &self.preferred_deposit_validator_vote_address,
        )?;
        w.write(
            "preferred_withdraw_validator_vote_address",
            &self.preferred_withdraw_validator_vote_address,
        )?;
        w.write("stake_deposit_fee", &self.stake_deposit_fee)?;
        w.write("stake_withdrawal_fee", &self.stake_withdrawal_fee)?;
        w.write("next_stake_withdrawal_fee", &self.next_stake_withdrawal_fee)?;
        w.write("stake_referral_fee", &self.stake_referral_fee)?;
        w.write("sol_deposit_authority", &self.sol_deposit_authority)?;
        w.write("sol_deposit_fee", &self.sol_deposit_fee)?;
        w.write("sol_referral_fee", &self.sol_referral_fee)?;
        w.write("sol_withdraw_authority", &self.sol_withdraw_authority)?;
        w.write("sol_withdrawal_fee", &self.sol_withdrawal_fee)?;
        w.write("next_sol_withdrawal_fee", &self.next_sol_withdrawal_fee)?;
        w.write(
            "last_epoch_pool_token_supply",
            &self.last_epoch_pool_token_supply,
        )?;
        w.write("last_epoch_total_lamports", &self.last_epoch_total_lamports)?;
        Ok(w.position() - offset)
    }

    fn decode_at(buf: &[u8], offset: usize) -> Result<(Self, usize), CodecError> {
        let mut r = Reader::with_offset(buf, offset);
        let pool = Self {
            account_type: r.read("account_type")?,
            manager: r.read("manager")?,
            staker: r.read("staker")?,
            stake_deposit_authority: r.read("stake_deposit_authority")?,
            stake_withdraw_bump_seed: r.read("stake_withdraw_bump_seed")?,
            validator_list: r.read("validator_list")?,
            reserve_stake: r.read("reserve_stake")?,
            pool_mint: r.read("pool_mint")?,
            manager_fee_account: r.read("manager_fee_account")?,
            token_program_id: r.read("token_program_id")?,
            total_lamports: r.read("total_lamports")?,
            pool_token_supply: r.read("pool_token_supply")?,
            last_update_epoch: r.read("last_update_epoch")?,
            lockup: r.read("lockup")?,
            epoch_fee: r.read("epoch_fee")?,
            next_epoch_fee: r.read("next_epoch_fee")?,
            preferred_deposit_validator_vote_address: r
                .read("preferred_deposit_validator_vote_address")?,
            preferred_withdraw_validator_vote_address: r
                .read("preferred_withdraw_validator_vote_address")?,
            stake_deposit_fee: r.read("stake_deposit_fee")?,
            stake_withdrawal_fee: r.read("stake_withdrawal_fee")?,
            next_stake_withdrawal_fee: r.read("next_stake_withdrawal_fee")?,
            stake_referral_fee: r.read("stake_referral_fee")?,
            sol_deposit_authority: r.read("sol_deposit_authority")?,
            sol_deposit_fee: r.read("sol_deposit_fee")?,
            sol_referral_fee: r.read("sol_referral_fee")?,
            sol_withdraw_authority: r.read("sol_withdraw_authority")?,
            sol_withdrawal_fee: r.read("sol_withdrawal_fee")?,
            next_sol_withdrawal_fee: r.read("next_sol_withdrawal_fee")?,
            last_epoch_pool_token_supply: r.read("last_epoch_pool_token_supply")?,
            last_epoch_total_lamports: r.read("last_epoch_total_lamports")?,
        };
        Ok((pool, r.position() - offset))
    }

    fn value_span(&self) -> usize {
        self.account_type.value_span()
            + self.manager.value_span()
            + self.staker.value_span()
            + self.stake_deposit_authority.value_span()
            + self.stake_withdraw_bump_seed.value_span()
            + self.validator_list.value_span()
            + self.reserve_stake.value_span()
            + self.pool_mint.value_span()
            + self.manager_fee_account.value_span()
            + self.token_program_id.value_span()
            + self.total_lamports.value_span()
            + self.pool_token_supply.value_span()
            + self.last_update_epoch.value_span()
            + self.lockup.value_span()
            + self.epoch_fee.value_span()
            + self.next_epoch_fee.value_span()
            + self.preferred_deposit_validator_vote_address.value_span()
            + self.preferred_withdraw_validator_vote_address.value_span()
            + self.stake_deposit_fee.value_span()
            + self.stake_withdrawal_fee.value_span()
            + self.next_stake_withdrawal_fee.value_span()
            + self.stake_referral_fee.value_span()
            + self.sol_deposit_authority.value_span()
            + self.sol_deposit_fee.value_span()
            + self.sol_referral_fee.value_span()
            + self.sol_withdraw_authority.value_span()
            + self.sol_withdrawal_fee.value_span()
            + self.next_sol_withdrawal_fee.value_span()
            + self.last_epoch_pool_token_supply.value_span()
            + self.last_epoch_total_lamports.value_span()
    }
}

/// Status of a validator's stake accounts within the pool.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum StakeStatus {
    /// Stake is active and earning.
    #[default]
    Active,
    /// Validator was removed, but a deactivating transient stake remains.
    DeactivatingTransient,
    /// No stake accounts remain; the entry can be reaped.
    ReadyForRemoval,
}

impl Codec for StakeStatus {
    const SPAN: Option<usize> = Some(1);

    fn encode(&self, buf: &mut [u8], offset: usize) -> Result<usize, CodecError> {
        (*self as u8).encode(buf, offset)
    }

    fn decode_at(buf: &[u8], offset: usize) -> Result<(Self, usize), CodecError> {
        let (tag, consumed) = u8::decode_at(buf, offset)?;
        let value = match tag {
            0 => Self::Active,
            1 => Self::DeactivatingTransient,
            2 => Self::ReadyForRemoval,
            value => return Err(CodecError::InvalidDiscriminant { field: "", value }),
        };
        Ok((value, consumed))
    }

    fn value_span(&self) -> usize {
        1
    }
}

/// Per-validator entry in the validator list account.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ValidatorStakeInfo {
    /// Amount of lamports on the validator's stake account, including rent.
    ///
    /// Note that if `last_update_epoch` does not match the current epoch
    /// then this field may not be accurate.
    pub active_stake_lamports: u64,

    /// Amount of transient stake delegated to this validator.
    ///
    /// Note that if `last_update_epoch` does not match the current epoch
    /// then this field may not be accurate.
    pub transient_stake_lamports: u64,

    /// Last epoch the stake lamports fields were updated.
    pub last_update_epoch: u64,

    /// Start of the range of seed suffixes used for the validator's
    /// transient stake accounts.
    pub transient_seed_suffix_start: u64,

    /// End of that seed suffix range.
    pub transient_seed_suffix_end: u64,

    /// Status of the validator stake account.
    pub status: StakeStatus,

    /// Validator vote account address.
    pub vote_account_address: Pubkey,
}

impl ValidatorStakeInfo {
    /// Serialized size of one entry. Every field is fixed-width:
    /// five u64 (40) + status (1) + vote address (32).
    pub const LEN: usize = 5 * 8 + 1 + 32;
}

impl Codec for ValidatorStakeInfo {
    const SPAN: Option<usize> = Some(Self::LEN);

    fn encode(&self, buf: &mut [u8], offset: usize) -> Result<usize, CodecError> {
        let mut w = Writer::with_offset(buf, offset);
        w.write("active_stake_lamports", &self.active_stake_lamports)?;
        w.write("transient_stake_lamports", &self.transient_stake_lamports)?;
        w.write("last_update_epoch", &self.last_update_epoch)?;
        w.write(
            "transient_seed_suffix_start",
            &self.transient_seed_suffix_start,
        )?;
        w.write("transient_seed_suffix_end", &self.transient_seed_suffix_end)?;
        w.write("status", &self.status)?;
        w.write("vote_account_address", &self.vote_account_address)?;
        Ok(w.position() - offset)
    }

    fn decode_at(buf: &[u8], offset: usize) -> Result<(Self, usize), CodecError> {
        let mut r = Reader::with_offset(buf, offset);
        let info = Self {
            active_stake_lamports: r.read("active_stake_lamports")?,
            transient_stake_lamports: r.read("transient_stake_lamports")?,
            last_update_epoch: r.read("last_update_epoch")?,
            transient_seed_suffix_start: r.read("transient_seed_suffix_start")?,
            transient_seed_suffix_end: r.read("transient_seed_suffix_end")?,
            status: r.read("status")?,
            vote_account_address: r.read("vote_account_address")?,
        };
        Ok((info, r.position() - offset))
    }

    fn value_span(&self) -> usize {
        Self::LEN
    }
}

/// Validator list account: which validators the pool stakes to and how much
/// is on each.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ValidatorList {
    /// Account tag, `AccountType::ValidatorList` once initialized.
    pub account_type: AccountType,

    /// Maximum number of entries the account was sized for.
    pub max_validators: u32,

    /// One entry per validator currently in the pool. The serialized entry
    /// count is independent of `max_validators`.
    pub validators: Vec<ValidatorStakeInfo>,
}

impl ValidatorList {
    /// Bytes preceding the entries: tag (1) + max_validators (4) +
    /// entry count (4).
    pub const HEADER_LEN: usize = 1 + 4 + 4;

    /// Size in bytes of a pre-allocated list account able to hold
    /// `max_validators` entries.
    pub fn required_len(max_validators: usize) -> usize {
        Self::HEADER_LEN + max_validators * ValidatorStakeInfo::LEN
    }

    /// Decodes a validator list account fetched off-chain.
    pub fn decode(data: &[u8]) -> Result<Self, CodecError> {
        Self::decode_at(data, 0).map(|(list, _)| list)
    }
}

impl Codec for ValidatorList {
    const SPAN: Option<usize> = None;

    fn encode(&self, buf: &mut [u8], offset: usize) -> Result<usize, CodecError> {
        let mut w = Writer::with_offset(buf, offset);
        w.write("account_type", &self.account_type)?;
        w.write("max_validators", &self.max_validators)?;
        w.write("validators", &self.validators)?;
        Ok(w.position() - offset)
    }

    fn decode_at(buf: &[u8], offset: usize) -> Result<(Self, usize), CodecError> {
        let mut r = Reader::with_offset(buf, offset);
        let list = Self {
            account_type: r.read("account_type")?,
            max_validators: r.read("max_validators")?,
            validators: r.read("validators")?,
        };
        Ok((list, r.position() - offset))
    }

    fn value_span(&self) -> usize {
        Self::HEADER_LEN + self.validators.len() * ValidatorStakeInfo::LEN
    }
}

/// Decodes a batch of fetched accounts of one record type.
///
/// One malformed account never aborts the rest of the batch: its slot
/// becomes `None` and the failure is logged with the account address.
pub fn decode_batch<T: Codec>(accounts: &[(Pubkey, Vec<u8>)]) -> Vec<Option<T>> {
    accounts
        .iter()
        .map(|(address, data)| match T::decode_at(data, 0) {
            Ok((record, _)) => Some(record),
            Err(err) => {
                log::warn!("could not decode account {address}: {err}");
                None
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled_pool() -> StakePool {
        StakePool {
            account_type: AccountType::StakePool,
            manager: Pubkey::new_unique(),
            staker: Pubkey::new_unique(),
            stake_deposit_authority: Pubkey::new_unique(),
            stake_withdraw_bump_seed: 255,
            validator_list: Pubkey::new_unique(),
            reserve_stake: Pubkey::new_unique(),
            pool_mint: Pubkey::new_unique(),
            manager_fee_account: Pubkey::new_unique(),
            token_program_id: spl_token::id(),
            total_lamports: 1_000_000_000,
            pool_token_supply: 900_000_000,
            last_update_epoch: 410,
            lockup: Lockup {
                unix_timestamp: -1,
                epoch: 3,
                custodian: Pubkey::new_unique(),
            },
            epoch_fee: Fee {
                denominator: 100,
                numerator: 3,
            },
            next_epoch_fee: FutureEpoch::Some(Fee {
                denominator: 100,
                numerator: 4,
            }),
            preferred_deposit_validator_vote_address: Some(Pubkey::new_unique()),
            preferred_withdraw_validator_vote_address: None,
            stake_deposit_fee: Fee {
                denominator: 1000,
                numerator: 1,
            },
            stake_withdrawal_fee: Fee {
                denominator: 1000,
                numerator: 2,
            },
            next_stake_withdrawal_fee: FutureEpoch::None,
            stake_referral_fee: 50,
            sol_deposit_authority: None,
            sol_deposit_fee: Fee {
                denominator: 0,
                numerator: 0,
            },
            sol_referral_fee: 0,
            sol_withdraw_authority: Some(Pubkey::new_unique()),
            sol_withdrawal_fee: Fee {
                denominator: 1000,
                numerator: 3,
            },
            next_sol_withdrawal_fee: FutureEpoch::Some(Fee {
                denominator: 1000,
                numerator: 4,
            }),
            last_epoch_pool_token_supply: 899_000_000,
            last_epoch_total_lamports: 999_000_000,
        }
    }

    #[test]
    fn stake_pool_round_trips() {
        let pool = filled_pool();
        let bytes = pool.to_bytes().unwrap();
        assert_eq!(bytes.len(), pool.value_span());
        assert_eq!(StakePool::decode(&bytes), Ok(pool.clone()));

        // Byte-exact re-encode of a decoded record.
        let decoded = StakePool::decode(&bytes).unwrap();
        assert_eq!(decoded.to_bytes().unwrap(), bytes);
    }

    #[test]
    fn fee_wire_order_is_denominator_first() {
        let fee = Fee {
            denominator: 7,
            numerator: 9,
        };
        let bytes = fee.to_bytes().unwrap();
        assert_eq!(&bytes[..8], &7u64.to_le_bytes());
        assert_eq!(&bytes[8..], &9u64.to_le_bytes());
    }

    #[test]
    fn account_type_domain() {
        assert_eq!(
            AccountType::decode_at(&[2], 0),
            Ok((AccountType::ValidatorList, 1))
        );
        assert_eq!(
            AccountType::decode_at(&[3], 0),
            Err(CodecError::InvalidDiscriminant { field: "", value: 3 })
        );
    }

    #[test]
    fn stake_status_domain() {
        assert_eq!(
            StakeStatus::decode_at(&[1], 0),
            Ok((StakeStatus::DeactivatingTransient, 1))
        );
        assert_eq!(
            StakeStatus::decode_at(&[9], 0),
            Err(CodecError::InvalidDiscriminant { field: "", value: 9 })
        );
    }

    #[test]
    fn validator_entry_is_73_bytes() {
        assert_eq!(ValidatorStakeInfo::LEN, 73);
        let info = ValidatorStakeInfo {
            active_stake_lamports: 12,
            transient_stake_lamports: 0,
            last_update_epoch: 9,
            transient_seed_suffix_start: 1,
            transient_seed_suffix_end: 2,
            status: StakeStatus::ReadyForRemoval,
            vote_account_address: Pubkey::new_unique(),
        };
        let bytes = info.to_bytes().unwrap();
        assert_eq!(bytes.len(), 73);
        assert_eq!(ValidatorStakeInfo::decode_at(&bytes, 0), Ok((info, 73)));
    }

    #[test]
    fn validator_list_sizing() {
        assert_eq!(ValidatorList::HEADER_LEN, 9);
        assert_eq!(ValidatorList::required_len(0), 9);
        assert_eq!(ValidatorList::required_len(100), 9 + 100 * 73);
    }

    #[test]
    fn validator_list_count_is_independent_of_max() {
        let list = ValidatorList {
            account_type: AccountType::ValidatorList,
            max_validators: 1000,
            validators: vec![ValidatorStakeInfo::default()],
        };
        let bytes = list.to_bytes().unwrap();
        // tag + max + one serialized entry behind a count of 1
        assert_eq!(bytes.len(), 9 + 73);
        assert_eq!(&bytes[1..5], &1000u32.to_le_bytes());
        assert_eq!(&bytes[5..9], &1u32.to_le_bytes());
        assert_eq!(ValidatorList::decode(&bytes), Ok(list));
    }

    #[test]
    fn pool_field_errors_are_named() {
        let pool = filled_pool();
        let mut bytes = pool.to_bytes().unwrap();
        // The tag of next_epoch_fee sits right after the fixed prefix:
        // tag (1) + 8 keys (256) + bump (1) + 3 u64 (24) + lockup (48) +
        // epoch_fee (16) = 346.
        assert_eq!(bytes[346], 2);
        bytes[346] = 9;
        assert_eq!(
            StakePool::decode(&bytes),
            Err(CodecError::InvalidFutureEpochDiscriminant {
                field: "next_epoch_fee",
                value: 9
            })
        );
    }

    #[test]
    fn truncated_pool_account_fails_cleanly() {
        let bytes = filled_pool().to_bytes().unwrap();
        assert!(matches!(
            StakePool::decode(&bytes[..200]),
            Err(CodecError::BufferTooShort { .. })
        ));
    }

    #[test]
    fn batch_decode_skips_malformed_accounts() {
        let good = filled_pool();
        let bytes = good.to_bytes().unwrap();
        let accounts = vec![
            (Pubkey::new_unique(), bytes.clone()),
            (Pubkey::new_unique(), bytes[..40].to_vec()),
            (Pubkey::new_unique(), bytes),
        ];
        let decoded = decode_batch::<StakePool>(&accounts);
        assert_eq!(decoded.len(), 3);
        assert_eq!(decoded[0].as_ref(), Some(&good));
        assert!(decoded[1].is_none());
        assert_eq!(decoded[2].as_ref(), Some(&good));
    }
}
