//! Client SDK for the stake pool program.
//!
//! The on-chain program manages a pool of stake accounts spread over many
//! validators and issues a token representing ownership of the pool. This
//! crate is the off-chain half: it decodes the program's accounts, encodes
//! its instruction data, assembles instructions with the right account
//! lists, and derives the program addresses the program expects.
//!
//! It deliberately stops there. Fetching account bytes, building and
//! signing transactions, and deciding which validators to touch are the
//! caller's concern; everything in this crate is pure computation over
//! byte buffers and keys.

pub mod codec;
pub mod error;
pub mod instruction;
pub mod state;

use std::num::NonZeroU32;

use solana_program::pubkey::Pubkey;

solana_program::declare_id!("SPoo1Ku8WFXoNDMHPsrGSTSG1Y47rzgn41SLUNakuHy");

/// Seed of the pool's withdraw authority program address.
const AUTHORITY_WITHDRAW: &[u8] = b"withdraw";

/// Seed of the pool's default deposit authority program address.
const AUTHORITY_DEPOSIT: &[u8] = b"deposit";

/// Seed prefix of transient stake accounts.
const TRANSIENT_STAKE_SEED_PREFIX: &[u8] = b"transient";

/// Seed prefix of ephemeral stake accounts.
const EPHEMERAL_STAKE_SEED_PREFIX: &[u8] = b"ephemeral";

/// Derives the pool's withdraw authority address.
pub fn find_withdraw_authority_program_address(
    program_id: &Pubkey,
    stake_pool: &Pubkey,
) -> (Pubkey, u8) {
    Pubkey::find_program_address(&[stake_pool.as_ref(), AUTHORITY_WITHDRAW], program_id)
}

/// Derives the pool's default stake deposit authority address.
pub fn find_deposit_authority_program_address(
    program_id: &Pubkey,
    stake_pool: &Pubkey,
) -> (Pubkey, u8) {
    Pubkey::find_program_address(&[stake_pool.as_ref(), AUTHORITY_DEPOSIT], program_id)
}

/// Derives the canonical stake account address for a validator in a pool.
/// A non-zero `seed` selects one of the validator's auxiliary stake
/// accounts.
pub fn find_stake_program_address(
    program_id: &Pubkey,
    vote_account_address: &Pubkey,
    stake_pool: &Pubkey,
    seed: Option<NonZeroU32>,
) -> (Pubkey, u8) {
    let seed_bytes = seed.map(|seed| seed.get().to_le_bytes());
    let mut seeds = vec![vote_account_address.as_ref(), stake_pool.as_ref()];
    if let Some(seed_bytes) = &seed_bytes {
        seeds.push(seed_bytes);
    }
    Pubkey::find_program_address(&seeds, program_id)
}

/// Derives the transient stake account address for a validator in a pool.
pub fn find_transient_stake_program_address(
    program_id: &Pubkey,
    vote_account_address: &Pubkey,
    stake_pool: &Pubkey,
    seed: u64,
) -> (Pubkey, u8) {
    Pubkey::find_program_address(
        &[
            TRANSIENT_STAKE_SEED_PREFIX,
            vote_account_address.as_ref(),
            stake_pool.as_ref(),
            &seed.to_le_bytes(),
        ],
        program_id,
    )
}

/// Derives an ephemeral stake account address for a pool.
pub fn find_ephemeral_stake_program_address(
    program_id: &Pubkey,
    stake_pool: &Pubkey,
    seed: u64,
) -> (Pubkey, u8) {
    Pubkey::find_program_address(
        &[
            EPHEMERAL_STAKE_SEED_PREFIX,
            stake_pool.as_ref(),
            &seed.to_le_bytes(),
        ],
        program_id,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn derived_addresses_are_stable() {
        let stake_pool = Pubkey::new_unique();
        let vote = Pubkey::new_unique();

        let (withdraw, _) = find_withdraw_authority_program_address(&id(), &stake_pool);
        assert_eq!(
            withdraw,
            find_withdraw_authority_program_address(&id(), &stake_pool).0
        );

        let (unseeded, _) = find_stake_program_address(&id(), &vote, &stake_pool, None);
        let (seeded, _) =
            find_stake_program_address(&id(), &vote, &stake_pool, NonZeroU32::new(1));
        assert_ne!(unseeded, seeded);

        let (transient_a, _) =
            find_transient_stake_program_address(&id(), &vote, &stake_pool, 0);
        let (transient_b, _) =
            find_transient_stake_program_address(&id(), &vote, &stake_pool, 1);
        assert_ne!(transient_a, transient_b);
    }
}
