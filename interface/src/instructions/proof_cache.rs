use crate::accounts::instruction_accounts;

instruction_accounts! {
    /// The accounts shared by every instruction that touches a user's proof cache:
    /// `ClearProofCache`, `CloseAccounts`, `CreateAccounts`, and `LoadProof`.
    ///
    /// ### Accounts
    ///  0. `[WRITE, SIGNER]` Authority
    ///  1. `[WRITE]` Proof cache PDA
    ///  2. `[READ]` System program
    pub struct ProofCacheAccounts {
        /// The owner of the proof cache.
        authority: (signer = true, writable = true),
        /// The proof cache PDA, seeded with `cache` and the authority's pubkey.
        cache_account: (signer = false, writable = true),
        system_program: (signer = false, writable = false),
    }
}
