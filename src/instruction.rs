//! Instruction types and builders for the stake pool program.
//!
//! Instruction data is a one-byte opcode followed by that instruction's
//! parameter block. [`StakePoolInstruction::pack`] and
//! [`StakePoolInstruction::unpack`] convert between the enum and the raw
//! bytes; the free functions below additionally assemble the account list
//! each operation expects and return a ready [`Instruction`].

use std::num::NonZeroU32;

use solana_program::{
    instruction::{AccountMeta, Instruction},
    pubkey::Pubkey,
    stake, system_program, sysvar,
};

use crate::{
    codec::{Codec, Reader, Writer},
    error::CodecError,
    find_stake_program_address, find_transient_stake_program_address,
    find_withdraw_authority_program_address,
    state::Fee,
};

/// Which preferred validator a `SetPreferredValidator` instruction updates.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PreferredValidatorType {
    /// Validator that stake deposits must target.
    Deposit,
    /// Validator that stake withdrawals must draw from first.
    Withdraw,
}

impl Codec for PreferredValidatorType {
    const SPAN: Option<usize> = Some(1);

    fn encode(&self, buf: &mut [u8], offset: usize) -> Result<usize, CodecError> {
        (*self as u8).encode(buf, offset)
    }

    fn decode_at(buf: &[u8], offset: usize) -> Result<(Self, usize), CodecError> {
        let (tag, consumed) = u8::decode_at(buf, offset)?;
        let value = match tag {
            0 => Self::Deposit,
            1 => Self::Withdraw,
            value => return Err(CodecError::InvalidDiscriminant { field: "", value }),
        };
        Ok((value, consumed))
    }

    fn value_span(&self) -> usize {
        1
    }
}

/// Which authority a `SetFundingAuthority` instruction replaces.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FundingType {
    /// Authority that must co-sign stake deposits.
    StakeDeposit,
    /// Authority that must co-sign SOL deposits.
    SolDeposit,
    /// Authority that must co-sign SOL withdrawals.
    SolWithdraw,
}

impl Codec for FundingType {
    const SPAN: Option<usize> = Some(1);

    fn encode(&self, buf: &mut [u8], offset: usize) -> Result<usize, CodecError> {
        (*self as u8).encode(buf, offset)
    }

    fn decode_at(buf: &[u8], offset: usize) -> Result<(Self, usize), CodecError> {
        let (tag, consumed) = u8::decode_at(buf, offset)?;
        let value = match tag {
            0 => Self::StakeDeposit,
            1 => Self::SolDeposit,
            2 => Self::SolWithdraw,
            value => return Err(CodecError::InvalidDiscriminant { field: "", value }),
        };
        Ok((value, consumed))
    }

    fn value_span(&self) -> usize {
        1
    }
}

/// Which pool fee a `SetFee` instruction replaces, and its new value.
/// One variant per fee knob on the pool record.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FeeType {
    /// Referral fee for SOL deposits, in percent.
    SolReferral(u8),
    /// Referral fee for stake deposits, in percent.
    StakeReferral(u8),
    /// Fee taken from epoch rewards.
    Epoch(Fee),
    /// Fee assessed on stake withdrawals.
    StakeWithdrawal(Fee),
    /// Fee assessed on SOL deposits.
    SolDeposit(Fee),
    /// Fee assessed on stake deposits.
    StakeDeposit(Fee),
    /// Fee assessed on SOL withdrawals.
    SolWithdrawal(Fee),
}

impl Codec for FeeType {
    const SPAN: Option<usize> = None;

    fn encode(&self, buf: &mut [u8], offset: usize) -> Result<usize, CodecError> {
        let mut w = Writer::with_offset(buf, offset);
        match self {
            Self::SolReferral(pct) => {
                w.write("fee_type", &0u8)?;
                w.write("sol_referral", pct)?;
            }
            Self::StakeReferral(pct) => {
                w.write("fee_type", &1u8)?;
                w.write("stake_referral", pct)?;
            }
            Self::Epoch(fee) => {
                w.write("fee_type", &2u8)?;
                w.write("epoch", fee)?;
            }
            Self::StakeWithdrawal(fee) => {
                w.write("fee_type", &3u8)?;
                w.write("stake_withdrawal", fee)?;
            }
            Self::SolDeposit(fee) => {
                w.write("fee_type", &4u8)?;
                w.write("sol_deposit", fee)?;
            }
            Self::StakeDeposit(fee) => {
                w.write("fee_type", &5u8)?;
                w.write("stake_deposit", fee)?;
            }
            Self::SolWithdrawal(fee) => {
                w.write("fee_type", &6u8)?;
                w.write("sol_withdrawal", fee)?;
            }
        }
        Ok(w.position() - offset)
    }

    fn decode_at(buf: &[u8], offset: usize) -> Result<(Self, usize), CodecError> {
        let mut r = Reader::with_offset(buf, offset);
        let tag: u8 = r.read("fee_type")?;
        let value = match tag {
            0 => Self::SolReferral(r.read("sol_referral")?),
            1 => Self::StakeReferral(r.read("stake_referral")?),
            2 => Self::Epoch(r.read("epoch")?),
            3 => Self::StakeWithdrawal(r.read("stake_withdrawal")?),
            4 => Self::SolDeposit(r.read("sol_deposit")?),
            5 => Self::StakeDeposit(r.read("stake_deposit")?),
            6 => Self::SolWithdrawal(r.read("sol_withdrawal")?),
            value => {
                return Err(CodecError::InvalidDiscriminant {
                    field: "fee_type",
                    value,
                })
            }
        };
        Ok((value, r.position() - offset))
    }

    fn value_span(&self) -> usize {
        1 + match self {
            Self::SolReferral(_) | Self::StakeReferral(_) => 1,
            _ => 16,
        }
    }
}

/// Instructions supported by the stake pool program.
#[derive(Clone, Debug, PartialEq)]
pub enum StakePoolInstruction {
    /// Initializes a new stake pool.
    ///
    /// Accounts expected:
    /// 0. `[w]` New stake pool account to initialize
    /// 1. `[s]` Manager
    /// 2. `[]` Staker
    /// 3. `[]` Stake pool withdraw authority
    /// 4. `[w]` Uninitialized validator list account
    /// 5. `[]` Reserve stake account
    /// 6. `[w]` Pool token mint
    /// 7. `[w]` Manager's fee account
    /// 8. `[]` Token program id
    /// 9. `[s]` (Optional) Deposit authority that must sign all deposits
    Initialize {
        /// Fee taken from epoch rewards.
        fee: Fee,
        /// Fee charged per withdrawal.
        withdrawal_fee: Fee,
        /// Fee charged per deposit.
        deposit_fee: Fee,
        /// Percentage [0-100] of the deposit fee that goes to the referrer.
        referral_fee: u8,
        /// Maximum number of validators the pool can manage.
        max_validators: u32,
    },

    /// (Staker only) Adds a stake account delegated to a validator to the
    /// pool's list of managed validators.
    ///
    /// Accounts expected:
    /// 0. `[w]` Stake pool
    /// 1. `[s]` Staker
    /// 2. `[w]` Reserve stake account
    /// 3. `[]` Stake pool withdraw authority
    /// 4. `[w]` Validator list storage account
    /// 5. `[w]` Stake account to add to the pool
    /// 6. `[]` Validator vote account the stake will be delegated to
    /// 7. `[]` Rent sysvar
    /// 8. `[]` Clock sysvar
    /// 9. `[]` Stake history sysvar
    /// 10. `[]` Stake config sysvar
    /// 11. `[]` System program
    /// 12. `[]` Stake program
    AddValidatorToPool {
        /// Seed used to derive the validator stake account address;
        /// 0 means no seed.
        seed: u32,
    },

    /// (Staker only) Removes a validator from the pool.
    ///
    /// Accounts expected:
    /// 0. `[w]` Stake pool
    /// 1. `[s]` Staker
    /// 2. `[]` Stake pool withdraw authority
    /// 3. `[w]` Validator list storage account
    /// 4. `[w]` Stake account to remove from the pool
    /// 5. `[w]` Transient stake account, checked for an ongoing activation
    /// 6. `[]` Clock sysvar
    /// 7. `[]` Stake program
    RemoveValidatorFromPool,

    /// (Staker only) Decreases active stake on a validator, eventually
    /// moving it to the reserve.
    ///
    /// Accounts expected:
    /// 0. `[]` Stake pool
    /// 1. `[s]` Staker
    /// 2. `[]` Stake pool withdraw authority
    /// 3. `[w]` Validator list storage account
    /// 4. `[w]` Canonical stake account to split from
    /// 5. `[w]` Transient stake account to receive the split
    /// 6. `[]` Clock sysvar
    /// 7. `[]` Rent sysvar
    /// 8. `[]` System program
    /// 9. `[]` Stake program
    DecreaseValidatorStake {
        /// Lamports to split into the transient stake account.
        lamports: u64,
        /// Seed used to derive the transient stake account address.
        transient_stake_seed: u64,
    },

    /// (Staker only) Increases stake on a validator from the reserve.
    ///
    /// Accounts expected:
    /// 0. `[]` Stake pool
    /// 1. `[s]` Staker
    /// 2. `[]` Stake pool withdraw authority
    /// 3. `[w]` Validator list storage account
    /// 4. `[w]` Reserve stake account
    /// 5. `[w]` Transient stake account to receive the split
    /// 6. `[]` Canonical stake account to check
    /// 7. `[]` Validator vote account to delegate to
    /// 8. `[]` Clock sysvar
    /// 9. `[]` Rent sysvar
    /// 10. `[]` Stake history sysvar
    /// 11. `[]` Stake config sysvar
    /// 12. `[]` System program
    /// 13. `[]` Stake program
    IncreaseValidatorStake {
        /// Lamports to split out of the reserve.
        lamports: u64,
        /// Seed used to derive the transient stake account address.
        transient_stake_seed: u64,
    },

    /// (Staker only) Sets the preferred deposit or withdraw validator.
    ///
    /// Accounts expected:
    /// 0. `[w]` Stake pool
    /// 1. `[s]` Staker
    /// 2. `[]` Validator list storage account
    SetPreferredValidator {
        /// Which preference to update.
        validator_type: PreferredValidatorType,
        /// New preferred validator, or `None` to clear the preference.
        validator_vote_address: Option<Pubkey>,
    },

    /// Updates balances of validator and transient stake accounts in the
    /// pool.
    ///
    /// Accounts expected:
    /// 0. `[]` Stake pool
    /// 1. `[]` Stake pool withdraw authority
    /// 2. `[w]` Validator list storage account
    /// 3. `[w]` Reserve stake account
    /// 4. `[]` Clock sysvar
    /// 5. `[]` Stake history sysvar
    /// 6. `[]` Stake program
    /// 7. ..7+2N `[w]` N pairs of validator and transient stake accounts
    UpdateValidatorListBalance {
        /// Index of the validator list entry to start updating from.
        start_index: u32,
        /// If true, don't try to merge transient stake accounts.
        no_merge: bool,
    },

    /// Updates the total pool balance from the balances recorded in the
    /// reserve and validator list.
    ///
    /// Accounts expected:
    /// 0. `[w]` Stake pool
    /// 1. `[]` Stake pool withdraw authority
    /// 2. `[w]` Validator list storage account
    /// 3. `[]` Reserve stake account
    /// 4. `[w]` Manager's fee account
    /// 5. `[w]` Pool token mint
    /// 6. `[]` Token program id
    UpdateStakePoolBalance,

    /// Cleans up validator list entries marked ready for removal.
    ///
    /// Accounts expected:
    /// 0. `[]` Stake pool
    /// 1. `[w]` Validator list storage account
    CleanupRemovedValidatorEntries,

    /// Deposits a stake account into the pool in exchange for pool tokens.
    ///
    /// Accounts expected:
    /// 0. `[w]` Stake pool
    /// 1. `[w]` Validator list storage account
    /// 2. `[]` Stake pool deposit authority
    /// 3. `[]` Stake pool withdraw authority
    /// 4. `[w]` Stake account to join the pool
    /// 5. `[w]` Validator stake account to merge with
    /// 6. `[w]` Reserve stake account, to withdraw the rent-exempt reserve
    /// 7. `[w]` User account to receive pool tokens
    /// 8. `[w]` Manager's fee account
    /// 9. `[w]` Referrer's pool token account
    /// 10. `[w]` Pool token mint
    /// 11. `[]` Clock sysvar
    /// 12. `[]` Stake history sysvar
    /// 13. `[]` Token program id
    /// 14. `[]` Stake program
    DepositStake,

    /// Withdraws a stake account from the pool in exchange for pool tokens.
    ///
    /// Accounts expected:
    /// 0. `[w]` Stake pool
    /// 1. `[w]` Validator list storage account
    /// 2. `[]` Stake pool withdraw authority
    /// 3. `[w]` Validator or reserve stake account to split
    /// 4. `[w]` Uninitialized stake account to receive the withdrawal
    /// 5. `[]` User account to set as the new withdraw authority
    /// 6. `[s]` User transfer authority for the pool token account
    /// 7. `[w]` User pool token account to burn from
    /// 8. `[w]` Manager's fee account
    /// 9. `[w]` Pool token mint
    /// 10. `[]` Clock sysvar
    /// 11. `[]` Token program id
    /// 12. `[]` Stake program
    WithdrawStake {
        /// Pool tokens to burn in exchange for stake.
        amount: u64,
    },

    /// (Manager only) Updates the manager.
    ///
    /// Accounts expected:
    /// 0. `[w]` Stake pool
    /// 1. `[s]` Manager
    /// 2. `[s]` New manager
    /// 3. `[]` New manager's fee account
    SetManager,

    /// (Manager only) Updates one of the pool's fees.
    ///
    /// Accounts expected:
    /// 0. `[w]` Stake pool
    /// 1. `[s]` Manager
    SetFee {
        /// Fee knob to update, with its new value.
        fee: FeeType,
    },

    /// (Manager or staker) Updates the staker.
    ///
    /// Accounts expected:
    /// 0. `[w]` Stake pool
    /// 1. `[s]` Manager or current staker
    /// 2. `[]` New staker
    SetStaker,

    /// Deposits SOL directly into the pool's reserve in exchange for pool
    /// tokens.
    ///
    /// Accounts expected:
    /// 0. `[w]` Stake pool
    /// 1. `[]` Stake pool withdraw authority
    /// 2. `[w]` Reserve stake account
    /// 3. `[ws]` Funding account (must be a system account)
    /// 4. `[w]` User account to receive pool tokens
    /// 5. `[w]` Manager's fee account
    /// 6. `[w]` Referrer's pool token account
    /// 7. `[w]` Pool token mint
    /// 8. `[]` System program
    /// 9. `[]` Token program id
    /// 10. `[s]` (Optional) Stake pool SOL deposit authority
    DepositSol {
        /// Lamports to deposit.
        amount: u64,
    },

    /// (Manager only) Replaces a deposit or withdraw authority.
    ///
    /// Accounts expected:
    /// 0. `[w]` Stake pool
    /// 1. `[s]` Manager
    /// 2. `[]` (Optional) New authority; omitted to unset
    SetFundingAuthority {
        /// Which authority to replace.
        funding_type: FundingType,
    },

    /// Withdraws SOL directly from the pool's reserve.
    ///
    /// Accounts expected:
    /// 0. `[w]` Stake pool
    /// 1. `[]` Stake pool withdraw authority
    /// 2. `[s]` User transfer authority for the pool token account
    /// 3. `[w]` User pool token account to burn from
    /// 4. `[w]` Reserve stake account
    /// 5. `[w]` Destination system account for the lamports
    /// 6. `[w]` Manager's fee account
    /// 7. `[w]` Pool token mint
    /// 8. `[]` Clock sysvar
    /// 9. `[]` Stake history sysvar
    /// 10. `[]` Stake program
    /// 11. `[]` Token program id
    /// 12. `[s]` (Optional) Stake pool SOL withdraw authority
    WithdrawSol {
        /// Pool tokens to burn.
        amount: u64,
    },

    /// (Manager only) Creates pool token metadata in the metadata program.
    ///
    /// Accounts expected:
    /// 0. `[]` Stake pool
    /// 1. `[s]` Manager
    /// 2. `[]` Stake pool withdraw authority
    /// 3. `[]` Pool token mint
    /// 4. `[ws]` Payer for the metadata account
    /// 5. `[w]` Token metadata account
    /// 6. `[]` Metadata program id
    /// 7. `[]` System program
    CreateTokenMetadata {
        /// Token name.
        name: String,
        /// Token symbol, e.g. "stkSOL".
        symbol: String,
        /// URI of the token's metadata document.
        uri: String,
    },

    /// (Manager only) Updates pool token metadata.
    ///
    /// Accounts expected:
    /// 0. `[]` Stake pool
    /// 1. `[s]` Manager
    /// 2. `[]` Stake pool withdraw authority
    /// 3. `[w]` Token metadata account
    /// 4. `[]` Metadata program id
    UpdateTokenMetadata {
        /// Token name.
        name: String,
        /// Token symbol.
        symbol: String,
        /// URI of the token's metadata document.
        uri: String,
    },

    /// (Staker only) Increases stake on a validator through an ephemeral
    /// stake account, on top of any in-flight transient stake.
    ///
    /// Accounts expected:
    /// 0. `[]` Stake pool
    /// 1. `[s]` Staker
    /// 2. `[]` Stake pool withdraw authority
    /// 3. `[w]` Validator list storage account
    /// 4. `[w]` Reserve stake account
    /// 5. `[w]` Ephemeral stake account used during the operation
    /// 6. `[w]` Transient stake account to receive the split
    /// 7. `[]` Canonical stake account to check
    /// 8. `[]` Validator vote account to delegate to
    /// 9. `[]` Clock sysvar
    /// 10. `[]` Stake history sysvar
    /// 11. `[]` Stake config sysvar
    /// 12. `[]` System program
    /// 13. `[]` Stake program
    IncreaseAdditionalValidatorStake {
        /// Lamports to move onto the validator.
        lamports: u64,
        /// Seed used to derive the transient stake account address.
        transient_stake_seed: u64,
        /// Seed used to derive the ephemeral stake account address.
        ephemeral_stake_seed: u64,
    },

    /// (Staker only) Decreases active stake on a validator through an
    /// ephemeral stake account, on top of any in-flight transient stake.
    ///
    /// Accounts expected:
    /// 0. `[]` Stake pool
    /// 1. `[s]` Staker
    /// 2. `[]` Stake pool withdraw authority
    /// 3. `[w]` Validator list storage account
    /// 4. `[w]` Reserve stake account
    /// 5. `[w]` Canonical stake account to split from
    /// 6. `[w]` Ephemeral stake account used during the operation
    /// 7. `[w]` Transient stake account to receive the split
    /// 8. `[]` Clock sysvar
    /// 9. `[]` Stake history sysvar
    /// 10. `[]` System program
    /// 11. `[]` Stake program
    DecreaseAdditionalValidatorStake {
        /// Lamports to split into the transient stake account.
        lamports: u64,
        /// Seed used to derive the transient stake account address.
        transient_stake_seed: u64,
        /// Seed used to derive the ephemeral stake account address.
        ephemeral_stake_seed: u64,
    },

    /// (Staker only) Decreases active stake on a validator, paying the
    /// transient account's rent from the reserve.
    ///
    /// Accounts expected:
    /// 0. `[]` Stake pool
    /// 1. `[s]` Staker
    /// 2. `[]` Stake pool withdraw authority
    /// 3. `[w]` Validator list storage account
    /// 4. `[w]` Reserve stake account
    /// 5. `[w]` Canonical stake account to split from
    /// 6. `[w]` Transient stake account to receive the split
    /// 7. `[]` Clock sysvar
    /// 8. `[]` Stake history sysvar
    /// 9. `[]` System program
    /// 10. `[]` Stake program
    DecreaseValidatorStakeWithReserve {
        /// Lamports to split into the transient stake account.
        lamports: u64,
        /// Seed used to derive the transient stake account address.
        transient_stake_seed: u64,
    },

    /// (Staker only) Moves stake from one validator to another without
    /// passing through the reserve.
    ///
    /// Accounts expected:
    /// 0. `[]` Stake pool
    /// 1. `[s]` Staker
    /// 2. `[]` Stake pool withdraw authority
    /// 3. `[w]` Validator list storage account
    /// 4. `[w]` Source canonical stake account to split from
    /// 5. `[w]` Source transient stake account
    /// 6. `[w]` Ephemeral stake account used during the operation
    /// 7. `[w]` Destination transient stake account
    /// 8. `[w]` Destination canonical stake account
    /// 9. `[]` Destination validator vote account
    /// 10. `[]` Clock sysvar
    /// 11. `[]` Stake history sysvar
    /// 12. `[]` Stake config sysvar
    /// 13. `[]` System program
    /// 14. `[]` Stake program
    Redelegate {
        /// Lamports to redelegate.
        lamports: u64,
        /// Seed of the source transient stake account.
        source_transient_stake_seed: u64,
        /// Seed of the ephemeral stake account.
        ephemeral_stake_seed: u64,
        /// Seed of the destination transient stake account.
        destination_transient_stake_seed: u64,
    },
}

impl StakePoolInstruction {
    /// Serializes into instruction data: opcode byte, then parameters.
    pub fn pack(&self) -> Result<Vec<u8>, CodecError> {
        self.to_bytes()
    }

    /// Deserializes instruction data produced by [`Self::pack`] or by
    /// another client of the same program.
    pub fn unpack(input: &[u8]) -> Result<Self, CodecError> {
        Self::decode_at(input, 0).map(|(instruction, _)| instruction)
    }
}

impl Codec for StakePoolInstruction {
    const SPAN: Option<usize> = None;

    fn encode(&self, buf: &mut [u8], offset: usize) -> Result<usize, CodecError> {
        let mut w = Writer::with_offset(buf, offset);
        match self {
            Self::Initialize {
                fee,
                withdrawal_fee,
                deposit_fee,
                referral_fee,
                max_validators,
            } => {
                w.write("opcode", &0u8)?;
                w.write("fee", fee)?;
                w.write("withdrawal_fee", withdrawal_fee)?;
                w.write("deposit_fee", deposit_fee)?;
                w.write("referral_fee", referral_fee)?;
                w.write("max_validators", max_validators)?;
            }
            Self::AddValidatorToPool { seed } => {
                w.write("opcode", &1u8)?;
                w.write("seed", seed)?;
            }
            Self::RemoveValidatorFromPool => {
                w.write("opcode", &2u8)?;
            }
            Self::DecreaseValidatorStake {
                lamports,
                transient_stake_seed,
            } => {
                w.write("opcode", &3u8)?;
                w.write("lamports", lamports)?;
                w.write("transient_stake_seed", transient_stake_seed)?;
            }
            Self::IncreaseValidatorStake {
                lamports,
                transient_stake_seed,
            } => {
                w.write("opcode", &4u8)?;
                w.write("lamports", lamports)?;
                w.write("transient_stake_seed", transient_stake_seed)?;
            }
            Self::SetPreferredValidator {
                validator_type,
                validator_vote_address,
            } => {
                w.write("opcode", &5u8)?;
                w.write("validator_type", validator_type)?;
                w.write("validator_vote_address", validator_vote_address)?;
            }
            Self::UpdateValidatorListBalance {
                start_index,
                no_merge,
            } => {
                w.write("opcode", &6u8)?;
                w.write("start_index", start_index)?;
                w.write("no_merge", no_merge)?;
            }
            Self::UpdateStakePoolBalance => {
                w.write("opcode", &7u8)?;
            }
            Self::CleanupRemovedValidatorEntries => {
                w.write("opcode", &8u8)?;
            }
            Self::DepositStake => {
                w.write("opcode", &9u8)?;
            }
            Self::WithdrawStake { amount } => {
                w.write("opcode", &10u8)?;
                w.write("amount", amount)?;
            }
            Self::SetManager => {
                w.write("opcode", &11u8)?;
            }
            Self::SetFee { fee } => {
                w.write("opcode", &12u8)?;
                w.write("fee", fee)?;
            }
            Self::SetStaker => {
                w.write("opcode", &13u8)?;
            }
            Self::DepositSol { amount } => {
                w.write("opcode", &14u8)?;
                w.write("amount", amount)?;
            }
            Self::SetFundingAuthority { funding_type } => {
                w.write("opcode", &15u8)?;
                w.write("funding_type", funding_type)?;
            }
            Self::WithdrawSol { amount } => {
                w.write("opcode", &16u8)?;
                w.write("amount", amount)?;
            }
            Self::CreateTokenMetadata { name, symbol, uri } => {
                w.write("opcode", &17u8)?;
                w.write("name", name)?;
                w.write("symbol", symbol)?;
                w.write("uri", uri)?;
            }
            Self::UpdateTokenMetadata { name, symbol, uri } => {
                w.write("opcode", &18u8)?;
                w.write("name", name)?;
                w.write("symbol", symbol)?;
                w.write("uri", uri)?;
            }
            Self::IncreaseAdditionalValidatorStake {
                lamports,
                transient_stake_seed,
                ephemeral_stake_seed,
            } => {
                w.write("opcode", &19u8)?;
                w.write("lamports", lamports)?;
                w.write("transient_stake_seed", transient_stake_seed)?;
                w.write("ephemeral_stake_seed", ephemeral_stake_seed)?;
            }
            Self::DecreaseAdditionalValidatorStake {
                lamports,
                transient_stake_seed,
                ephemeral_stake_seed,
            } => {
                w.write("opcode", &20u8)?;
                w.write("lamports", lamports)?;
                w.write("transient_stake_seed", transient_stake_seed)?;
                w.write("ephemeral_stake_seed", ephemeral_stake_seed)?;
            }
            Self::DecreaseValidatorStakeWithReserve {
                lamports,
                transient_stake_seed,
            } => {
                w.write("opcode", &21u8)?;
                w.write("lamports", lamports)?;
                w.write("transient_stake_seed", transient_stake_seed)?;
            }
            Self::Redelegate {
                lamports,
                source_transient_stake_seed,
                ephemeral_stake_seed,
                destination_transient_stake_seed,
            } => {
                w.write("opcode", &22u8)?;
                w.write("lamports", lamports)?;
                w.write("source_transient_stake_seed", source_transient_stake_seed)?;
                w.write("ephemeral_stake_seed", ephemeral_stake_seed)?;
                w.write(
                    "destination_transient_stake_seed",
                    destination_transient_stake_seed,
                )?;
            }
        }
        Ok(w.position() - offset)
    }

    fn decode_at(buf: &[u8], offset: usize) -> Result<(Self, usize), CodecError> {
        let mut r = Reader::with_offset(buf, offset);
        let opcode: u8 = r.read("opcode")?;
        let instruction = match opcode {
            0 => Self::Initialize {
                fee: r.read("fee")?,
                withdrawal_fee: r.read("withdrawal_fee")?,
                deposit_fee: r.read("deposit_fee")?,
                referral_fee: r.read("referral_fee")?,
                max_validators: r.read("max_validators")?,
            },
            1 => Self::AddValidatorToPool {
                seed: r.read("seed")?,
            },
            2 => Self::RemoveValidatorFromPool,
            3 => Self::DecreaseValidatorStake {
                lamports: r.read("lamports")?,
                transient_stake_seed: r.read("transient_stake_seed")?,
            },
            4 => Self::IncreaseValidatorStake {
                lamports: r.read("lamports")?,
                transient_stake_seed: r.read("transient_stake_seed")?,
            },
            5 => Self::SetPreferredValidator {
                validator_type: r.read("validator_type")?,
                validator_vote_address: r.read("validator_vote_address")?,
            },
            6 => Self::UpdateValidatorListBalance {
                start_index: r.read("start_index")?,
                no_merge: r.read("no_merge")?,
            },
            7 => Self::UpdateStakePoolBalance,
            8 => Self::CleanupRemovedValidatorEntries,
            9 => Self::DepositStake,
            10 => Self::WithdrawStake {
                amount: r.read("amount")?,
            },
            11 => Self::SetManager,
            12 => Self::SetFee {
                fee: r.read("fee")?,
            },
            13 => Self::SetStaker,
            14 => Self::DepositSol {
                amount: r.read("amount")?,
            },
            15 => Self::SetFundingAuthority {
                funding_type: r.read("funding_type")?,
            },
            16 => Self::WithdrawSol {
                amount: r.read("amount")?,
            },
            17 => Self::CreateTokenMetadata {
                name: r.read("name")?,
                symbol: r.read("symbol")?,
                uri: r.read("uri")?,
            },
            18 => Self::UpdateTokenMetadata {
                name: r.read("name")?,
                symbol: r.read("symbol")?,
                uri: r.read("uri")?,
            },
            19 => Self::IncreaseAdditionalValidatorStake {
                lamports: r.read("lamports")?,
                transient_stake_seed: r.read("transient_stake_seed")?,
                ephemeral_stake_seed: r.read("ephemeral_stake_seed")?,
            },
            20 => Self::DecreaseAdditionalValidatorStake {
                lamports: r.read("lamports")?,
                transient_stake_seed: r.read("transient_stake_seed")?,
                ephemeral_stake_seed: r.read("ephemeral_stake_seed")?,
            },
            21 => Self::DecreaseValidatorStakeWithReserve {
                lamports: r.read("lamports")?,
                transient_stake_seed: r.read("transient_stake_seed")?,
            },
            22 => Self::Redelegate {
                lamports: r.read("lamports")?,
                source_transient_stake_seed: r.read("source_transient_stake_seed")?,
                ephemeral_stake_seed: r.read("ephemeral_stake_seed")?,
                destination_transient_stake_seed: r
                    .read("destination_transient_stake_seed")?,
            },
            opcode => return Err(CodecError::UnknownInstruction { opcode }),
        };
        Ok((instruction, r.position() - offset))
    }

    fn value_span(&self) -> usize {
        1 + match self {
            Self::Initialize { .. } => 3 * 16 + 1 + 4,
            Self::AddValidatorToPool { .. } => 4,
            Self::RemoveValidatorFromPool
            | Self::UpdateStakePoolBalance
            | Self::CleanupRemovedValidatorEntries
            | Self::DepositStake
            | Self::SetManager
            | Self::SetStaker => 0,
            Self::DecreaseValidatorStake { .. }
            | Self::IncreaseValidatorStake { .. }
            | Self::DecreaseValidatorStakeWithReserve { .. } => 16,
            Self::SetPreferredValidator {
                validator_vote_address,
                ..
            } => 1 + validator_vote_address.value_span(),
            Self::UpdateValidatorListBalance { .. } => 5,
            Self::WithdrawStake { .. } | Self::DepositSol { .. } | Self::WithdrawSol { .. } => 8,
            Self::SetFee { fee } => fee.value_span(),
            Self::SetFundingAuthority { .. } => 1,
            Self::CreateTokenMetadata { name, symbol, uri }
            | Self::UpdateTokenMetadata { name, symbol, uri } => {
                name.value_span() + symbol.value_span() + uri.value_span()
            }
            Self::IncreaseAdditionalValidatorStake { .. }
            | Self::DecreaseAdditionalValidatorStake { .. } => 24,
            Self::Redelegate { .. } => 32,
        }
    }
}

/// Creates an `Initialize` instruction.
#[allow(clippy::too_many_arguments)]
pub fn initialize(
    program_id: &Pubkey,
    stake_pool: &Pubkey,
    manager: &Pubkey,
    staker: &Pubkey,
    withdraw_authority: &Pubkey,
    validator_list: &Pubkey,
    reserve_stake: &Pubkey,
    pool_mint: &Pubkey,
    manager_fee_account: &Pubkey,
    token_program_id: &Pubkey,
    deposit_authority: Option<&Pubkey>,
    fee: Fee,
    withdrawal_fee: Fee,
    deposit_fee: Fee,
    referral_fee: u8,
    max_validators: u32,
) -> Result<Instruction, CodecError> {
    let data = StakePoolInstruction::Initialize {
        fee,
        withdrawal_fee,
        deposit_fee,
        referral_fee,
        max_validators,
    }
    .pack()?;
    let mut accounts = vec![
        AccountMeta::new(*stake_pool, false),
        AccountMeta::new_readonly(*manager, true),
        AccountMeta::new_readonly(*staker, false),
        AccountMeta::new_readonly(*withdraw_authority, false),
        AccountMeta::new(*validator_list, false),
        AccountMeta::new_readonly(*reserve_stake, false),
        AccountMeta::new(*pool_mint, false),
        AccountMeta::new(*manager_fee_account, false),
        AccountMeta::new_readonly(*token_program_id, false),
    ];
    if let Some(deposit_authority) = deposit_authority {
        accounts.push(AccountMeta::new_readonly(*deposit_authority, true));
    }
    Ok(Instruction {
        program_id: *program_id,
        accounts,
        data,
    })
}

/// Creates an `AddValidatorToPool` instruction.
#[allow(clippy::too_many_arguments)]
pub fn add_validator_to_pool(
    program_id: &Pubkey,
    stake_pool: &Pubkey,
    staker: &Pubkey,
    reserve_stake: &Pubkey,
    withdraw_authority: &Pubkey,
    validator_list: &Pubkey,
    validator_stake: &Pubkey,
    validator_vote: &Pubkey,
    seed: Option<NonZeroU32>,
) -> Result<Instruction, CodecError> {
    let data = StakePoolInstruction::AddValidatorToPool {
        seed: seed.map_or(0, NonZeroU32::get),
    }
    .pack()?;
    Ok(Instruction {
        program_id: *program_id,
        accounts: vec![
            AccountMeta::new(*stake_pool, false),
            AccountMeta::new_readonly(*staker, true),
            AccountMeta::new(*reserve_stake, false),
            AccountMeta::new_readonly(*withdraw_authority, false),
            AccountMeta::new(*validator_list, false),
            AccountMeta::new(*validator_stake, false),
            AccountMeta::new_readonly(*validator_vote, false),
            AccountMeta::new_readonly(sysvar::rent::id(), false),
            AccountMeta::new_readonly(sysvar::clock::id(), false),
            AccountMeta::new_readonly(sysvar::stake_history::id(), false),
            AccountMeta::new_readonly(stake::config::id(), false),
            AccountMeta::new_readonly(system_program::id(), false),
            AccountMeta::new_readonly(stake::program::id(), false),
        ],
        data,
    })
}

/// Creates an `AddValidatorToPool` instruction from the validator's vote
/// account, deriving the stake account and withdraw authority addresses.
pub fn add_validator_to_pool_with_vote(
    program_id: &Pubkey,
    stake_pool: &Pubkey,
    staker: &Pubkey,
    validator_list: &Pubkey,
    reserve_stake: &Pubkey,
    validator_vote: &Pubkey,
    seed: Option<NonZeroU32>,
) -> Result<Instruction, CodecError> {
    let (withdraw_authority, _) = find_withdraw_authority_program_address(program_id, stake_pool);
    let (validator_stake, _) =
        find_stake_program_address(program_id, validator_vote, stake_pool, seed);
    add_validator_to_pool(
        program_id,
        stake_pool,
        staker,
        reserve_stake,
        &withdraw_authority,
        validator_list,
        &validator_stake,
        validator_vote,
        seed,
    )
}

/// Creates a `RemoveValidatorFromPool` instruction.
pub fn remove_validator_from_pool(
    program_id: &Pubkey,
    stake_pool: &Pubkey,
    staker: &Pubkey,
    withdraw_authority: &Pubkey,
    validator_list: &Pubkey,
    validator_stake: &Pubkey,
    transient_stake: &Pubkey,
) -> Result<Instruction, CodecError> {
    let data = StakePoolInstruction::RemoveValidatorFromPool.pack()?;
    Ok(Instruction {
        program_id: *program_id,
        accounts: vec![
            AccountMeta::new(*stake_pool, false),
            AccountMeta::new_readonly(*staker, true),
            AccountMeta::new_readonly(*withdraw_authority, false),
            AccountMeta::new(*validator_list, false),
            AccountMeta::new(*validator_stake, false),
            AccountMeta::new(*transient_stake, false),
            AccountMeta::new_readonly(sysvar::clock::id(), false),
            AccountMeta::new_readonly(stake::program::id(), false),
        ],
        data,
    })
}

/// Creates a `RemoveValidatorFromPool` instruction from the validator's
/// vote account, deriving the stake, transient, and authority addresses.
#[allow(clippy::too_many_arguments)]
pub fn remove_validator_from_pool_with_vote(
    program_id: &Pubkey,
    stake_pool: &Pubkey,
    staker: &Pubkey,
    validator_list: &Pubkey,
    validator_vote: &Pubkey,
    validator_stake_seed: Option<NonZeroU32>,
    transient_stake_seed: u64,
) -> Result<Instruction, CodecError> {
    let (withdraw_authority, _) = find_withdraw_authority_program_address(program_id, stake_pool);
    let (validator_stake, _) =
        find_stake_program_address(program_id, validator_vote, stake_pool, validator_stake_seed);
    let (transient_stake, _) = find_transient_stake_program_address(
        program_id,
        validator_vote,
        stake_pool,
        transient_stake_seed,
    );
    remove_validator_from_pool(
        program_id,
        stake_pool,
        staker,
        &withdraw_authority,
        validator_list,
        &validator_stake,
        &transient_stake,
    )
}

/// Creates a `DecreaseValidatorStake` instruction.
#[allow(clippy::too_many_arguments)]
pub fn decrease_validator_stake(
    program_id: &Pubkey,
    stake_pool: &Pubkey,
    staker: &Pubkey,
    withdraw_authority: &Pubkey,
    validator_list: &Pubkey,
    validator_stake: &Pubkey,
    transient_stake: &Pubkey,
    lamports: u64,
    transient_stake_seed: u64,
) -> Result<Instruction, CodecError> {
    let data = StakePoolInstruction::DecreaseValidatorStake {
        lamports,
        transient_stake_seed,
    }
    .pack()?;
    Ok(Instruction {
        program_id: *program_id,
        accounts: vec![
            AccountMeta::new_readonly(*stake_pool, false),
            AccountMeta::new_readonly(*staker, true),
            AccountMeta::new_readonly(*withdraw_authority, false),
            AccountMeta::new(*validator_list, false),
            AccountMeta::new(*validator_stake, false),
            AccountMeta::new(*transient_stake, false),
            AccountMeta::new_readonly(sysvar::clock::id(), false),
            AccountMeta::new_readonly(sysvar::rent::id(), false),
            AccountMeta::new_readonly(system_program::id(), false),
            AccountMeta::new_readonly(stake::program::id(), false),
        ],
        data,
    })
}

/// Creates a `DecreaseValidatorStakeWithReserve` instruction.
#[allow(clippy::too_many_arguments)]
pub fn decrease_validator_stake_with_reserve(
    program_id: &Pubkey,
    stake_pool: &Pubkey,
    staker: &Pubkey,
    withdraw_authority: &Pubkey,
    validator_list: &Pubkey,
    reserve_stake: &Pubkey,
    validator_stake: &Pubkey,
    transient_stake: &Pubkey,
    lamports: u64,
    transient_stake_seed: u64,
) -> Result<Instruction, CodecError> {
    let data = StakePoolInstruction::DecreaseValidatorStakeWithReserve {
        lamports,
        transient_stake_seed,
    }
    .pack()?;
    Ok(Instruction {
        program_id: *program_id,
        accounts: vec![
            AccountMeta::new_readonly(*stake_pool, false),
            AccountMeta::new_readonly(*staker, true),
            AccountMeta::new_readonly(*withdraw_authority, false),
            AccountMeta::new(*validator_list, false),
            AccountMeta::new(*reserve_stake, false),
            AccountMeta::new(*validator_stake, false),
            AccountMeta::new(*transient_stake, false),
            AccountMeta::new_readonly(sysvar::clock::id(), false),
            AccountMeta::new_readonly(sysvar::stake_history::id(), false),
            AccountMeta::new_readonly(system_program::id(), false),
            AccountMeta::new_readonly(stake::program::id(), false),
        ],
        data,
    })
}

/// Creates a `DecreaseAdditionalValidatorStake` instruction.
#[allow(clippy::too_many_arguments)]
pub fn decrease_additional_validator_stake(
    program_id: &Pubkey,
    stake_pool: &Pubkey,
    staker: &Pubkey,
    withdraw_authority: &Pubkey,
    validator_list: &Pubkey,
    reserve_stake: &Pubkey,
    validator_stake: &Pubkey,
    ephemeral_stake: &Pubkey,
    transient_stake: &Pubkey,
    lamports: u64,
    transient_stake_seed: u64,
    ephemeral_stake_seed: u64,
) -> Result<Instruction, CodecError> {
    let data = StakePoolInstruction::DecreaseAdditionalValidatorStake {
        lamports,
        transient_stake_seed,
        ephemeral_stake_seed,
    }
    .pack()?;
    Ok(Instruction {
        program_id: *program_id,
        accounts: vec![
            AccountMeta::new_readonly(*stake_pool, false),
            AccountMeta::new_readonly(*staker, true),
            AccountMeta::new_readonly(*withdraw_authority, false),
            AccountMeta::new(*validator_list, false),
            AccountMeta::new(*reserve_stake, false),
            AccountMeta::new(*validator_stake, false),
            AccountMeta::new(*ephemeral_stake, false),
            AccountMeta::new(*transient_stake, false),
            AccountMeta::new_readonly(sysvar::clock::id(), false),
            AccountMeta::new_readonly(sysvar::stake_history::id(), false),
            AccountMeta::new_readonly(system_program::id(), false),
            AccountMeta::new_readonly(stake::program::id(), false),
        ],
        data,
    })
}

/// Creates an `IncreaseValidatorStake` instruction.
#[allow(clippy::too_many_arguments)]
pub fn increase_validator_stake(
    program_id: &Pubkey,
    stake_pool: &Pubkey,
    staker: &Pubkey,
    withdraw_authority: &Pubkey,
    validator_list: &Pubkey,
    reserve_stake: &Pubkey,
    transient_stake: &Pubkey,
    validator_stake: &Pubkey,
    validator_vote: &Pubkey,
    lamports: u64,
    transient_stake_seed: u64,
) -> Result<Instruction, CodecError> {
    let data = StakePoolInstruction::IncreaseValidatorStake {
        lamports,
        transient_stake_seed,
    }
    .pack()?;
    Ok(Instruction {
        program_id: *program_id,
        accounts: vec![
            AccountMeta::new_readonly(*stake_pool, false),
            AccountMeta::new_readonly(*staker, true),
            AccountMeta::new_readonly(*withdraw_authority, false),
            AccountMeta::new(*validator_list, false),
            AccountMeta::new(*reserve_stake, false),
            AccountMeta::new(*transient_stake, false),
            AccountMeta::new_readonly(*validator_stake, false),
            AccountMeta::new_readonly(*validator_vote, false),
            AccountMeta::new_readonly(sysvar::clock::id(), false),
            AccountMeta::new_readonly(sysvar::rent::id(), false),
            AccountMeta::new_readonly(sysvar::stake_history::id(), false),
            AccountMeta::new_readonly(stake::config::id(), false),
            AccountMeta::new_readonly(system_program::id(), false),
            AccountMeta::new_readonly(stake::program::id(), false),
        ],
        data,
    })
}

/// Creates an `IncreaseAdditionalValidatorStake` instruction.
#[allow(clippy::too_many_arguments)]
pub fn increase_additional_validator_stake(
    program_id: &Pubkey,
    stake_pool: &Pubkey,
    staker: &Pubkey,
    withdraw_authority: &Pubkey,
    validator_list: &Pubkey,
    reserve_stake: &Pubkey,
    ephemeral_stake: &Pubkey,
    transient_stake: &Pubkey,
    validator_stake: &Pubkey,
    validator_vote: &Pubkey,
    lamports: u64,
    transient_stake_seed: u64,
    ephemeral_stake_seed: u64,
) -> Result<Instruction, CodecError> {
    let data = StakePoolInstruction::IncreaseAdditionalValidatorStake {
        lamports,
        transient_stake_seed,
        ephemeral_stake_seed,
    }
    .pack()?;
    Ok(Instruction {
        program_id: *program_id,
        accounts: vec![
            AccountMeta::new_readonly(*stake_pool, false),
            AccountMeta::new_readonly(*staker, true),
            AccountMeta::new_readonly(*withdraw_authority, false),
            AccountMeta::new(*validator_list, false),
            AccountMeta::new(*reserve_stake, false),
            AccountMeta::new(*ephemeral_stake, false),
            AccountMeta::new(*transient_stake, false),
            AccountMeta::new_readonly(*validator_stake, false),
            AccountMeta::new_readonly(*validator_vote, false),
            AccountMeta::new_readonly(sysvar::clock::id(), false),
            AccountMeta::new_readonly(sysvar::stake_history::id(), false),
            AccountMeta::new_readonly(stake::config::id(), false),
            AccountMeta::new_readonly(system_program::id(), false),
            AccountMeta::new_readonly(stake::program::id(), false),
        ],
        data,
    })
}

/// Creates a `SetPreferredValidator` instruction.
pub fn set_preferred_validator(
    program_id: &Pubkey,
    stake_pool: &Pubkey,
    staker: &Pubkey,
    validator_list: &Pubkey,
    validator_type: PreferredValidatorType,
    validator_vote_address: Option<Pubkey>,
) -> Result<Instruction, CodecError> {
    let data = StakePoolInstruction::SetPreferredValidator {
        validator_type,
        validator_vote_address,
    }
    .pack()?;
    Ok(Instruction {
        program_id: *program_id,
        accounts: vec![
            AccountMeta::new(*stake_pool, false),
            AccountMeta::new_readonly(*staker, true),
            AccountMeta::new_readonly(*validator_list, false),
        ],
        data,
    })
}

/// Creates an `UpdateValidatorListBalance` instruction.
///
/// `validator_and_transient_stake_pairs` lists, for each validator entry
/// being updated, its canonical stake account followed by its transient
/// stake account.
#[allow(clippy::too_many_arguments)]
pub fn update_validator_list_balance(
    program_id: &Pubkey,
    stake_pool: &Pubkey,
    withdraw_authority: &Pubkey,
    validator_list: &Pubkey,
    reserve_stake: &Pubkey,
    validator_and_transient_stake_pairs: &[Pubkey],
    start_index: u32,
    no_merge: bool,
) -> Result<Instruction, CodecError> {
    let data = StakePoolInstruction::UpdateValidatorListBalance {
        start_index,
        no_merge,
    }
    .pack()?;
    let mut accounts = vec![
        AccountMeta::new_readonly(*stake_pool, false),
        AccountMeta::new_readonly(*withdraw_authority, false),
        AccountMeta::new(*validator_list, false),
        AccountMeta::new(*reserve_stake, false),
        AccountMeta::new_readonly(sysvar::clock::id(), false),
        AccountMeta::new_readonly(sysvar::stake_history::id(), false),
        AccountMeta::new_readonly(stake::program::id(), false),
    ];
    accounts.extend(
        validator_and_transient_stake_pairs
            .iter()
            .map(|pubkey| AccountMeta::new(*pubkey, false)),
    );
    Ok(Instruction {
        program_id: *program_id,
        accounts,
        data,
    })
}

/// Creates an `UpdateStakePoolBalance` instruction.
pub fn update_stake_pool_balance(
    program_id: &Pubkey,
    stake_pool: &Pubkey,
    withdraw_authority: &Pubkey,
    validator_list: &Pubkey,
    reserve_stake: &Pubkey,
    manager_fee_account: &Pubkey,
    pool_mint: &Pubkey,
    token_program_id: &Pubkey,
) -> Result<Instruction, CodecError> {
    let data = StakePoolInstruction::UpdateStakePoolBalance.pack()?;
    Ok(Instruction {
        program_id: *program_id,
        accounts: vec![
            AccountMeta::new(*stake_pool, false),
            AccountMeta::new_readonly(*withdraw_authority, false),
            AccountMeta::new(*validator_list, false),
            AccountMeta::new_readonly(*reserve_stake, false),
            AccountMeta::new(*manager_fee_account, false),
            AccountMeta::new(*pool_mint, false),
            AccountMeta::new_readonly(*token_program_id, false),
        ],
        data,
    })
}

/// Creates a `CleanupRemovedValidatorEntries` instruction.
pub fn cleanup_removed_validator_entries(
    program_id: &Pubkey,
    stake_pool: &Pubkey,
    validator_list: &Pubkey,
) -> Result<Instruction, CodecError> {
    let data = StakePoolInstruction::CleanupRemovedValidatorEntries.pack()?;
    Ok(Instruction {
        program_id: *program_id,
        accounts: vec![
            AccountMeta::new_readonly(*stake_pool, false),
            AccountMeta::new(*validator_list, false),
        ],
        data,
    })
}

/// Creates a `DepositStake` instruction.
#[allow(clippy::too_many_arguments)]
pub fn deposit_stake(
    program_id: &Pubkey,
    stake_pool: &Pubkey,
    validator_list: &Pubkey,
    deposit_authority: &Pubkey,
    withdraw_authority: &Pubkey,
    deposit_stake_address: &Pubkey,
    validator_stake: &Pubkey,
    reserve_stake: &Pubkey,
    destination_pool_account: &Pubkey,
    manager_fee_account: &Pubkey,
    referral_pool_account: &Pubkey,
    pool_mint: &Pubkey,
    token_program_id: &Pubkey,
) -> Result<Instruction, CodecError> {
    let data = StakePoolInstruction::DepositStake.pack()?;
    Ok(Instruction {
        program_id: *program_id,
        accounts: vec![
            AccountMeta::new(*stake_pool, false),
            AccountMeta::new(*validator_list, false),
            AccountMeta::new_readonly(*deposit_authority, false),
            AccountMeta::new_readonly(*withdraw_authority, false),
            AccountMeta::new(*deposit_stake_address, false),
            AccountMeta::new(*validator_stake, false),
            AccountMeta::new(*reserve_stake, false),
            AccountMeta::new(*destination_pool_account, false),
            AccountMeta::new(*manager_fee_account, false),
            AccountMeta::new(*referral_pool_account, false),
            AccountMeta::new(*pool_mint, false),
            AccountMeta::new_readonly(sysvar::clock::id(), false),
            AccountMeta::new_readonly(sysvar::stake_history::id(), false),
            AccountMeta::new_readonly(*token_program_id, false),
            AccountMeta::new_readonly(stake::program::id(), false),
        ],
        data,
    })
}

/// Creates a `WithdrawStake` instruction.
#[allow(clippy::too_many_arguments)]
pub fn withdraw_stake(
    program_id: &Pubkey,
    stake_pool: &Pubkey,
    validator_list: &Pubkey,
    withdraw_authority: &Pubkey,
    validator_stake: &Pubkey,
    destination_stake: &Pubkey,
    destination_stake_authority: &Pubkey,
    source_transfer_authority: &Pubkey,
    source_pool_account: &Pubkey,
    manager_fee_account: &Pubkey,
    pool_mint: &Pubkey,
    token_program_id: &Pubkey,
    amount: u64,
) -> Result<Instruction, CodecError> {
    let data = StakePoolInstruction::WithdrawStake { amount }.pack()?;
    Ok(Instruction {
        program_id: *program_id,
        accounts: vec![
            AccountMeta::new(*stake_pool, false),
            AccountMeta::new(*validator_list, false),
            AccountMeta::new_readonly(*withdraw_authority, false),
            AccountMeta::new(*validator_stake, false),
            AccountMeta::new(*destination_stake, false),
            AccountMeta::new_readonly(*destination_stake_authority, false),
            AccountMeta::new_readonly(*source_transfer_authority, true),
            AccountMeta::new(*source_pool_account, false),
            AccountMeta::new(*manager_fee_account, false),
            AccountMeta::new(*pool_mint, false),
            AccountMeta::new_readonly(sysvar::clock::id(), false),
            AccountMeta::new_readonly(*token_program_id, false),
            AccountMeta::new_readonly(stake::program::id(), false),
        ],
        data,
    })
}

/// Creates a `DepositSol` instruction. A pool with a SOL deposit authority
/// requires it as the trailing signer.
#[allow(clippy::too_many_arguments)]
pub fn deposit_sol(
    program_id: &Pubkey,
    stake_pool: &Pubkey,
    withdraw_authority: &Pubkey,
    reserve_stake: &Pubkey,
    funding_account: &Pubkey,
    destination_pool_account: &Pubkey,
    manager_fee_account: &Pubkey,
    referral_pool_account: &Pubkey,
    pool_mint: &Pubkey,
    token_program_id: &Pubkey,
    sol_deposit_authority: Option<&Pubkey>,
    amount: u64,
) -> Result<Instruction, CodecError> {
    let data = StakePoolInstruction::DepositSol { amount }.pack()?;
    let mut accounts = vec![
        AccountMeta::new(*stake_pool, false),
        AccountMeta::new_readonly(*withdraw_authority, false),
        AccountMeta::new(*reserve_stake, false),
        AccountMeta::new(*funding_account, true),
        AccountMeta::new(*destination_pool_account, false),
        AccountMeta::new(*manager_fee_account, false),
        AccountMeta::new(*referral_pool_account, false),
        AccountMeta::new(*pool_mint, false),
        AccountMeta::new_readonly(system_program::id(), false),
        AccountMeta::new_readonly(*token_program_id, false),
    ];
    if let Some(sol_deposit_authority) = sol_deposit_authority {
        accounts.push(AccountMeta::new_readonly(*sol_deposit_authority, true));
    }
    Ok(Instruction {
        program_id: *program_id,
        accounts,
        data,
    })
}

/// Creates a `WithdrawSol` instruction. A pool with a SOL withdraw
/// authority requires it as the trailing signer.
#[allow(clippy::too_many_arguments)]
pub fn withdraw_sol(
    program_id: &Pubkey,
    stake_pool: &Pubkey,
    withdraw_authority: &Pubkey,
    source_transfer_authority: &Pubkey,
    source_pool_account: &Pubkey,
    reserve_stake: &Pubkey,
    destination_system_account: &Pubkey,
    manager_fee_account: &Pubkey,
    pool_mint: &Pubkey,
    token_program_id: &Pubkey,
    sol_withdraw_authority: Option<&Pubkey>,
    amount: u64,
) -> Result<Instruction, CodecError> {
    let data = StakePoolInstruction::WithdrawSol { amount }.pack()?;
    let mut accounts = vec![
        AccountMeta::new(*stake_pool, false),
        AccountMeta::new_readonly(*withdraw_authority, false),
        AccountMeta::new_readonly(*source_transfer_authority, true),
        AccountMeta::new(*source_pool_account, false),
        AccountMeta::new(*reserve_stake, false),
        AccountMeta::new(*destination_system_account, false),
        AccountMeta::new(*manager_fee_account, false),
        AccountMeta::new(*pool_mint, false),
        AccountMeta::new_readonly(sysvar::clock::id(), false),
        AccountMeta::new_readonly(sysvar::stake_history::id(), false),
        AccountMeta::new_readonly(stake::program::id(), false),
        AccountMeta::new_readonly(*token_program_id, false),
    ];
    if let Some(sol_withdraw_authority) = sol_withdraw_authority {
        accounts.push(AccountMeta::new_readonly(*sol_withdraw_authority, true));
    }
    Ok(Instruction {
        program_id: *program_id,
        accounts,
        data,
    })
}

/// Creates a `SetManager` instruction. Both the current and the new
/// manager must sign.
pub fn set_manager(
    program_id: &Pubkey,
    stake_pool: &Pubkey,
    manager: &Pubkey,
    new_manager: &Pubkey,
    new_fee_receiver: &Pubkey,
) -> Result<Instruction, CodecError> {
    let data = StakePoolInstruction::SetManager.pack()?;
    Ok(Instruction {
        program_id: *program_id,
        accounts: vec![
            AccountMeta::new(*stake_pool, false),
            AccountMeta::new_readonly(*manager, true),
            AccountMeta::new_readonly(*new_manager, true),
            AccountMeta::new_readonly(*new_fee_receiver, false),
        ],
        data,
    })
}

/// Creates a `SetFee` instruction.
pub fn set_fee(
    program_id: &Pubkey,
    stake_pool: &Pubkey,
    manager: &Pubkey,
    fee: FeeType,
) -> Result<Instruction, CodecError> {
    let data = StakePoolInstruction::SetFee { fee }.pack()?;
    Ok(Instruction {
        program_id: *program_id,
        accounts: vec![
            AccountMeta::new(*stake_pool, false),
            AccountMeta::new_readonly(*manager, true),
        ],
        data,
    })
}

/// Creates a `SetStaker` instruction. The signer may be the manager or the
/// current staker.
pub fn set_staker(
    program_id: &Pubkey,
    stake_pool: &Pubkey,
    set_staker_authority: &Pubkey,
    new_staker: &Pubkey,
) -> Result<Instruction, CodecError> {
    let data = StakePoolInstruction::SetStaker.pack()?;
    Ok(Instruction {
        program_id: *program_id,
        accounts: vec![
            AccountMeta::new(*stake_pool, false),
            AccountMeta::new_readonly(*set_staker_authority, true),
            AccountMeta::new_readonly(*new_staker, false),
        ],
        data,
    })
}

/// Creates a `SetFundingAuthority` instruction. Passing `None` for
/// `new_authority` unsets the authority.
pub fn set_funding_authority(
    program_id: &Pubkey,
    stake_pool: &Pubkey,
    manager: &Pubkey,
    new_authority: Option<&Pubkey>,
    funding_type: FundingType,
) -> Result<Instruction, CodecError> {
    let data = StakePoolInstruction::SetFundingAuthority { funding_type }.pack()?;
    let mut accounts = vec![
        AccountMeta::new(*stake_pool, false),
        AccountMeta::new_readonly(*manager, true),
    ];
    if let Some(new_authority) = new_authority {
        accounts.push(AccountMeta::new_readonly(*new_authority, false));
    }
    Ok(Instruction {
        program_id: *program_id,
        accounts,
        data,
    })
}

/// Creates a `CreateTokenMetadata` instruction.
#[allow(clippy::too_many_arguments)]
pub fn create_token_metadata(
    program_id: &Pubkey,
    stake_pool: &Pubkey,
    manager: &Pubkey,
    withdraw_authority: &Pubkey,
    pool_mint: &Pubkey,
    payer: &Pubkey,
    token_metadata: &Pubkey,
    metadata_program_id: &Pubkey,
    name: String,
    symbol: String,
    uri: String,
) -> Result<Instruction, CodecError> {
    let data = StakePoolInstruction::CreateTokenMetadata { name, symbol, uri }.pack()?;
    Ok(Instruction {
        program_id: *program_id,
        accounts: vec![
            AccountMeta::new_readonly(*stake_pool, false),
            AccountMeta::new_readonly(*manager, true),
            AccountMeta::new_readonly(*withdraw_authority, false),
            AccountMeta::new_readonly(*pool_mint, false),
            AccountMeta::new(*payer, true),
            AccountMeta::new(*token_metadata, false),
            AccountMeta::new_readonly(*metadata_program_id, false),
            AccountMeta::new_readonly(system_program::id(), false),
        ],
        data,
    })
}

/// Creates an `UpdateTokenMetadata` instruction.
#[allow(clippy::too_many_arguments)]
pub fn update_token_metadata(
    program_id: &Pubkey,
    stake_pool: &Pubkey,
    manager: &Pubkey,
    withdraw_authority: &Pubkey,
    token_metadata: &Pubkey,
    metadata_program_id: &Pubkey,
    name: String,
    symbol: String,
    uri: String,
) -> Result<Instruction, CodecError> {
    let data = StakePoolInstruction::UpdateTokenMetadata { name, symbol, uri }.pack()?;
    Ok(Instruction {
        program_id: *program_id,
        accounts: vec![
            AccountMeta::new_readonly(*stake_pool, false),
            AccountMeta::new_readonly(*manager, true),
            AccountMeta::new_readonly(*withdraw_authority, false),
            AccountMeta::new(*token_metadata, false),
            AccountMeta::new_readonly(*metadata_program_id, false),
        ],
        data,
    })
}

/// Creates a `Redelegate` instruction.
#[allow(clippy::too_many_arguments)]
pub fn redelegate(
    program_id: &Pubkey,
    stake_pool: &Pubkey,
    staker: &Pubkey,
    withdraw_authority: &Pubkey,
    validator_list: &Pubkey,
    source_validator_stake: &Pubkey,
    source_transient_stake: &Pubkey,
    ephemeral_stake: &Pubkey,
    destination_transient_stake: &Pubkey,
    destination_validator_stake: &Pubkey,
    validator_vote: &Pubkey,
    lamports: u64,
    source_transient_stake_seed: u64,
    ephemeral_stake_seed: u64,
    destination_transient_stake_seed: u64,
) -> Result<Instruction, CodecError> {
    let data = StakePoolInstruction::Redelegate {
        lamports,
        source_transient_stake_seed,
        ephemeral_stake_seed,
        destination_transient_stake_seed,
    }
    .pack()?;
    Ok(Instruction {
        program_id: *program_id,
        accounts: vec![
            AccountMeta::new_readonly(*stake_pool, false),
            AccountMeta::new_readonly(*staker, true),
            AccountMeta::new_readonly(*withdraw_authority, false),
            AccountMeta::new(*validator_list, false),
            AccountMeta::new(*source_validator_stake, false),
            AccountMeta::new(*source_transient_stake, false),
            AccountMeta::new(*ephemeral_stake, false),
            AccountMeta::new(*destination_transient_stake, false),
            AccountMeta::new(*destination_validator_stake, false),
            AccountMeta::new_readonly(*validator_vote, false),
            AccountMeta::new_readonly(sysvar::clock::id(), false),
            AccountMeta::new_readonly(sysvar::stake_history::id(), false),
            AccountMeta::new_readonly(stake::config::id(), false),
            AccountMeta::new_readonly(system_program::id(), false),
            AccountMeta::new_readonly(stake::program::id(), false),
        ],
        data,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn withdraw_stake_golden_bytes() {
        let data = StakePoolInstruction::WithdrawStake {
            amount: 0x0102_0304_0506_0708,
        }
        .pack()
        .unwrap();
        let mut expected = vec![10u8];
        expected.extend_from_slice(&0x0102_0304_0506_0708u64.to_le_bytes());
        assert_eq!(data, expected);
    }

    #[test]
    fn initialize_golden_layout() {
        let data = StakePoolInstruction::Initialize {
            fee: Fee {
                denominator: 100,
                numerator: 2,
            },
            withdrawal_fee: Fee::default(),
            deposit_fee: Fee::default(),
            referral_fee: 40,
            max_validators: 2950,
        }
        .pack()
        .unwrap();
        assert_eq!(data.len(), 1 + 3 * 16 + 1 + 4);
        assert_eq!(data[0], 0);
        assert_eq!(&data[1..9], &100u64.to_le_bytes());
        assert_eq!(&data[9..17], &2u64.to_le_bytes());
        assert_eq!(data[49], 40);
        assert_eq!(&data[50..54], &2950u32.to_le_bytes());
    }

    #[test]
    fn update_validator_list_balance_golden_bytes() {
        let data = StakePoolInstruction::UpdateValidatorListBalance {
            start_index: 7,
            no_merge: true,
        }
        .pack()
        .unwrap();
        assert_eq!(data, vec![6, 7, 0, 0, 0, 1]);
    }

    #[test]
    fn token_metadata_strings_are_length_prefixed() {
        let data = StakePoolInstruction::UpdateTokenMetadata {
            name: "Pool".into(),
            symbol: "PSOL".into(),
            uri: "https://example.org/pool.json".into(),
        }
        .pack()
        .unwrap();
        assert_eq!(data[0], 18);
        assert_eq!(&data[1..5], &4u32.to_le_bytes());
        assert_eq!(&data[5..9], b"Pool");
        assert_eq!(&data[9..13], &4u32.to_le_bytes());
        assert_eq!(&data[13..17], b"PSOL");
        assert_eq!(&data[17..21], &29u32.to_le_bytes());
        assert_eq!(StakePoolInstruction::unpack(&data).unwrap().value_span(), data.len());
    }

    #[test]
    fn every_opcode_round_trips() {
        let cases = vec![
            StakePoolInstruction::Initialize {
                fee: Fee {
                    denominator: 100,
                    numerator: 3,
                },
                withdrawal_fee: Fee::default(),
                deposit_fee: Fee::default(),
                referral_fee: 0,
                max_validators: 10,
            },
            StakePoolInstruction::AddValidatorToPool { seed: 0 },
            StakePoolInstruction::RemoveValidatorFromPool,
            StakePoolInstruction::DecreaseValidatorStake {
                lamports: 1,
                transient_stake_seed: 2,
            },
            StakePoolInstruction::IncreaseValidatorStake {
                lamports: 3,
                transient_stake_seed: 4,
            },
            StakePoolInstruction::SetPreferredValidator {
                validator_type: PreferredValidatorType::Withdraw,
                validator_vote_address: Some(Pubkey::new_unique()),
            },
            StakePoolInstruction::SetPreferredValidator {
                validator_type: PreferredValidatorType::Deposit,
                validator_vote_address: None,
            },
            StakePoolInstruction::UpdateValidatorListBalance {
                start_index: 5,
                no_merge: false,
            },
            StakePoolInstruction::UpdateStakePoolBalance,
            StakePoolInstruction::CleanupRemovedValidatorEntries,
            StakePoolInstruction::DepositStake,
            StakePoolInstruction::WithdrawStake { amount: 6 },
            StakePoolInstruction::SetManager,
            StakePoolInstruction::SetFee {
                fee: FeeType::Epoch(Fee {
                    denominator: 50,
                    numerator: 1,
                }),
            },
            StakePoolInstruction::SetFee {
                fee: FeeType::StakeReferral(30),
            },
            StakePoolInstruction::SetStaker,
            StakePoolInstruction::DepositSol { amount: 7 },
            StakePoolInstruction::SetFundingAuthority {
                funding_type: FundingType::SolWithdraw,
            },
            StakePoolInstruction::WithdrawSol { amount: 8 },
            StakePoolInstruction::CreateTokenMetadata {
                name: "n".into(),
                symbol: "s".into(),
                uri: "u".into(),
            },
            StakePoolInstruction::UpdateTokenMetadata {
                name: String::new(),
                symbol: String::new(),
                uri: String::new(),
            },
            StakePoolInstruction::IncreaseAdditionalValidatorStake {
                lamports: 9,
                transient_stake_seed: 10,
                ephemeral_stake_seed: 11,
            },
            StakePoolInstruction::DecreaseAdditionalValidatorStake {
                lamports: 12,
                transient_stake_seed: 13,
                ephemeral_stake_seed: 14,
            },
            StakePoolInstruction::DecreaseValidatorStakeWithReserve {
                lamports: 15,
                transient_stake_seed: 16,
            },
            StakePoolInstruction::Redelegate {
                lamports: 17,
                source_transient_stake_seed: 18,
                ephemeral_stake_seed: 19,
                destination_transient_stake_seed: 20,
            },
        ];
        for instruction in cases {
            let data = instruction.pack().unwrap();
            assert_eq!(data.len(), instruction.value_span());
            assert_eq!(StakePoolInstruction::unpack(&data), Ok(instruction));
        }
    }

    #[test]
    fn unknown_opcode_is_rejected() {
        assert_eq!(
            StakePoolInstruction::unpack(&[23]),
            Err(CodecError::UnknownInstruction { opcode: 23 })
        );
        assert_eq!(
            StakePoolInstruction::unpack(&[0xFF]),
            Err(CodecError::UnknownInstruction { opcode: 0xFF })
        );
    }

    #[test]
    fn fee_type_domain() {
        let bytes = FeeType::SolWithdrawal(Fee {
            denominator: 10,
            numerator: 1,
        })
        .to_bytes()
        .unwrap();
        assert_eq!(bytes[0], 6);
        assert_eq!(bytes.len(), 17);

        assert_eq!(
            FeeType::decode_at(&[7, 0], 0),
            Err(CodecError::InvalidDiscriminant {
                field: "fee_type",
                value: 7
            })
        );
    }

    #[test]
    fn deposit_sol_appends_optional_authority() {
        let program_id = crate::id();
        let keys: Vec<Pubkey> = (0..9).map(|_| Pubkey::new_unique()).collect();
        let without = deposit_sol(
            &program_id,
            &keys[0],
            &keys[1],
            &keys[2],
            &keys[3],
            &keys[4],
            &keys[5],
            &keys[6],
            &keys[7],
            &spl_token::id(),
            None,
            100,
        )
        .unwrap();
        assert_eq!(without.accounts.len(), 10);

        let with = deposit_sol(
            &program_id,
            &keys[0],
            &keys[1],
            &keys[2],
            &keys[3],
            &keys[4],
            &keys[5],
            &keys[6],
            &keys[7],
            &spl_token::id(),
            Some(&keys[8]),
            100,
        )
        .unwrap();
        assert_eq!(with.accounts.len(), 11);
        let authority = with.accounts.last().unwrap();
        assert_eq!(authority.pubkey, keys[8]);
        assert!(authority.is_signer);
        assert!(!authority.is_writable);
    }

    #[test]
    fn set_manager_requires_both_signatures() {
        let program_id = crate::id();
        let stake_pool = Pubkey::new_unique();
        let manager = Pubkey::new_unique();
        let new_manager = Pubkey::new_unique();
        let fee_receiver = Pubkey::new_unique();
        let instruction =
            set_manager(&program_id, &stake_pool, &manager, &new_manager, &fee_receiver).unwrap();
        assert_eq!(instruction.data, vec![11]);
        assert!(instruction.accounts[1].is_signer);
        assert!(instruction.accounts[2].is_signer);
        assert!(!instruction.accounts[3].is_signer);
    }

    #[test]
    fn add_validator_with_vote_derives_stake_account() {
        let program_id = crate::id();
        let stake_pool = Pubkey::new_unique();
        let staker = Pubkey::new_unique();
        let validator_list = Pubkey::new_unique();
        let reserve_stake = Pubkey::new_unique();
        let vote = Pubkey::new_unique();
        let instruction = add_validator_to_pool_with_vote(
            &program_id,
            &stake_pool,
            &staker,
            &validator_list,
            &reserve_stake,
            &vote,
            None,
        )
        .unwrap();
        let (expected_stake, _) =
            find_stake_program_address(&program_id, &vote, &stake_pool, None);
        assert_eq!(instruction.accounts[5].pubkey, expected_stake);
        assert_eq!(instruction.data, vec![1, 0, 0, 0, 0]);
    }
}
