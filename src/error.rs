use num_derive::FromPrimitive;
use solana_program::{decode_error::DecodeError, program_error::ProgramError};
use thiserror::Error;

/// Failures raised while encoding or decoding the program's wire format.
///
/// Every error is detected synchronously at the offending byte and returned
/// immediately; nothing in the codec retries or recovers. Tag-domain errors
/// carry the name of the field that was being decoded, attached by the
/// enclosing record, so that a corrupt account can be diagnosed from the
/// message alone.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CodecError {
    /// A read or write would have run past the end of the buffer.
    #[error("buffer too short: needed {needed} bytes at offset {offset}, had {available}")]
    BufferTooShort {
        offset: usize,
        needed: usize,
        available: usize,
    },

    /// A boolean byte held something other than 0 or 1.
    #[error("invalid boolean byte {value:#04x} for field `{field}`")]
    InvalidBoolean { field: &'static str, value: u8 },

    /// An optional-value tag held something other than 0 (absent) or 1 (present).
    #[error("invalid option discriminant {value:#04x} for field `{field}`")]
    InvalidOptionDiscriminant { field: &'static str, value: u8 },

    /// A future-epoch tag held something other than 0, 1, or 2.
    #[error("invalid future-epoch discriminant {value:#04x} for field `{field}`")]
    InvalidFutureEpochDiscriminant { field: &'static str, value: u8 },

    /// An enum tag byte fell outside the variants defined for the field.
    #[error("invalid discriminant {value:#04x} for field `{field}`")]
    InvalidDiscriminant { field: &'static str, value: u8 },

    /// Instruction data began with an opcode the program does not define.
    #[error("unrecognized instruction opcode {opcode:#04x}")]
    UnknownInstruction { opcode: u8 },

    /// A fixed-size blob was given a source of the wrong length. This is a
    /// usage error; the codec never truncates or pads.
    #[error("size mismatch for field `{field}`: expected {expected} bytes, got {actual}")]
    SizeMismatch {
        field: &'static str,
        expected: usize,
        actual: usize,
    },

    /// A numeric value's magnitude does not fit the declared byte width.
    #[error("value does not fit in {width} bytes for field `{field}`")]
    NumericOverflow { field: &'static str, width: usize },

    /// A length-prefixed string held bytes that are not valid UTF-8.
    #[error("invalid utf-8 in field `{field}`")]
    InvalidUtf8 { field: &'static str },
}

impl CodecError {
    /// Attaches a field name to an error raised below the field level.
    /// Already-named errors keep the innermost name.
    pub(crate) fn named(self, name: &'static str) -> Self {
        match self {
            Self::InvalidBoolean { field: "", value } => Self::InvalidBoolean { field: name, value },
            Self::InvalidOptionDiscriminant { field: "", value } => {
                Self::InvalidOptionDiscriminant { field: name, value }
            }
            Self::InvalidFutureEpochDiscriminant { field: "", value } => {
                Self::InvalidFutureEpochDiscriminant { field: name, value }
            }
            Self::InvalidDiscriminant { field: "", value } => {
                Self::InvalidDiscriminant { field: name, value }
            }
            Self::SizeMismatch {
                field: "",
                expected,
                actual,
            } => Self::SizeMismatch {
                field: name,
                expected,
                actual,
            },
            Self::NumericOverflow { field: "", width } => {
                Self::NumericOverflow { field: name, width }
            }
            Self::InvalidUtf8 { field: "" } => Self::InvalidUtf8 { field: name },
            other => other,
        }
    }
}

/// Errors the on-chain stake pool program reports as custom error codes.
///
/// Returned by the program inside `ProgramError::Custom(n)`; the
/// `FromPrimitive` impl maps a code observed in transaction logs or
/// simulation results back to its variant.
#[derive(Error, Debug, Copy, Clone, FromPrimitive, PartialEq, Eq)]
pub enum StakePoolError {
    #[error("The account cannot be initialized because it is already being used")]
    AlreadyInUse,

    #[error("The program address provided doesn't match the value generated by the program")]
    InvalidProgramAddress,

    #[error("The stake pool state is invalid")]
    InvalidState,

    #[error("The calculation failed")]
    CalculationFailure,

    #[error("Stake pool fee > 1")]
    FeeTooHigh,

    #[error("Token account is associated with the wrong mint")]
    WrongAccountMint,

    #[error("Wrong pool manager account")]
    WrongManager,

    #[error("Required signature is missing")]
    SignatureMissing,

    #[error("Invalid validator stake list account")]
    InvalidValidatorStakeList,

    #[error("Invalid manager fee account")]
    InvalidFeeAccount,

    #[error("Specified pool mint account is wrong")]
    WrongPoolMint,

    #[error("Stake account is not in the state expected by the program")]
    WrongStakeState,

    #[error("User stake is not active")]
    UserStakeNotActive,

    #[error("Stake account voting for this validator already exists in the pool")]
    ValidatorAlreadyAdded,

    #[error("Stake account for this validator not found in the pool")]
    ValidatorNotFound,

    #[error("Stake account address not properly derived from the validator address")]
    InvalidStakeAccountAddress,

    #[error("Identified validator stake account has a different stake amount than last update")]
    StakeListOutOfDate,

    #[error("First update old validator stake account balances and then pool stake balance")]
    StakeListAndPoolOutOfDate,

    #[error("Validator stake account is not found in the list storage")]
    UnknownValidatorStakeAccount,

    #[error("Wrong minting authority set for mint pool account")]
    WrongMintingAuthority,

    #[error("The size of the given validator stake list does not match the expected amount")]
    UnexpectedValidatorListAccountSize,

    #[error("Wrong pool staker account")]
    WrongStaker,

    #[error("Pool token supply is not zero on initialization")]
    NonZeroPoolTokenSupply,

    #[error("The lamports in the validator stake account is not equal to the minimum")]
    StakeLamportsNotEqualToMinimum,

    #[error("The provided deposit stake account is not delegated to the preferred deposit vote account")]
    IncorrectDepositVoteAddress,

    #[error("The provided withdraw stake account is not the preferred withdraw vote account")]
    IncorrectWithdrawVoteAddress,

    #[error("The pool mint has an invalid freeze authority")]
    InvalidMintFreezeAuthority,

    #[error("The fee cannot increase by more than a factor of 2")]
    FeeIncreaseTooHigh,

    #[error("The withdrawal in pool tokens is too small")]
    WithdrawalTooSmall,

    #[error("The deposit in stake or SOL is too small")]
    DepositTooSmall,

    #[error("Provided stake deposit authority does not match the program's")]
    InvalidStakeDepositAuthority,

    #[error("Provided sol deposit authority does not match the program's")]
    InvalidSolDepositAuthority,

    #[error("Provided preferred validator is invalid")]
    InvalidPreferredValidator,

    #[error("Provided validator stake account already has a transient stake account in use")]
    TransientAccountInUse,

    #[error("Provided sol withdraw authority does not match the program's")]
    InvalidSolWithdrawAuthority,

    #[error("Too much SOL withdrawn from the stake pool's reserve account")]
    SolWithdrawalTooLarge,

    #[error("Provided metadata account does not match metadata account derived for pool mint")]
    InvalidMetadataAccount,

    #[error("The mint has an unsupported extension")]
    UnsupportedMintExtension,

    #[error("The fee account has an unsupported extension")]
    UnsupportedFeeAccountExtension,

    #[error("Instruction exceeds desired slippage limit")]
    ExceededSlippage,

    #[error("Provided mint does not have 9 decimals to match SOL")]
    IncorrectMintDecimals,

    #[error("Pool reserve does not have enough lamports to fund rent-exempt reserve in split destination")]
    ReserveDepleted,

    #[error("Missing required sysvar account")]
    MissingRequiredSysvar,
}

impl From<StakePoolError> for ProgramError {
    fn from(e: StakePoolError) -> Self {
        ProgramError::Custom(e as u32)
    }
}

impl<T> DecodeError<T> for StakePoolError {
    fn type_of() -> &'static str {
        "StakePoolError"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use num_traits::FromPrimitive;

    #[test]
    fn custom_error_codes_round_trip() {
        assert_eq!(
            ProgramError::from(StakePoolError::AlreadyInUse),
            ProgramError::Custom(0)
        );
        assert_eq!(
            StakePoolError::from_u32(StakePoolError::ValidatorNotFound as u32),
            Some(StakePoolError::ValidatorNotFound)
        );
        assert_eq!(StakePoolError::from_u32(10_000), None);
    }

    #[test]
    fn named_keeps_innermost_field() {
        let inner = CodecError::InvalidOptionDiscriminant {
            field: "custodian",
            value: 3,
        };
        assert_eq!(inner.clone().named("lockup"), inner);

        let unnamed = CodecError::InvalidBoolean { field: "", value: 7 };
        assert_eq!(
            unnamed.named("no_merge"),
            CodecError::InvalidBoolean {
                field: "no_merge",
                value: 7
            }
        );
    }
}
