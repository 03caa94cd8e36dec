//! PDA helpers for deriving Polymer prover program addresses.

use solana_sdk::pubkey::Pubkey;

pub const INTERNAL_SEED_STR: &[u8] = b"internal";
pub const CACHE_SEED_STR: &[u8] = b"cache";

/// The program-wide account holding the client type, signer address, and chain ID.
pub fn find_internal_address(program_id: &Pubkey) -> (Pubkey, u8) {
    Pubkey::find_program_address(&[INTERNAL_SEED_STR], program_id)
}

/// The per-authority account proofs are loaded into before validation.
pub fn find_cache_address(authority: &Pubkey, program_id: &Pubkey) -> (Pubkey, u8) {
    Pubkey::find_program_address(&[CACHE_SEED_STR, authority.as_ref()], program_id)
}

#[cfg(test)]
mod tests {
    use polymer_prover_interface::program;

    use super::*;

    #[test]
    fn cache_addresses_are_per_authority() {
        let a = Pubkey::new_from_array([1; 32]);
        let b = Pubkey::new_from_array([2; 32]);
        assert_ne!(
            find_cache_address(&a, &program::ID).0,
            find_cache_address(&b, &program::ID).0
        );
        assert_eq!(
            find_cache_address(&a, &program::ID),
            find_cache_address(&a, &program::ID)
        );
    }

    #[test]
    fn addresses_depend_on_the_program_id() {
        let other = Pubkey::new_from_array([7; 32]);
        assert_ne!(find_internal_address(&program::ID).0, find_internal_address(&other).0);
    }

    #[test]
    fn internal_address_matches_create_program_address() {
        let (address, bump) = find_internal_address(&program::ID);
        assert_eq!(
            Pubkey::create_program_address(&[INTERNAL_SEED_STR, &[bump]], &program::ID).unwrap(),
            address
        );
    }
}
