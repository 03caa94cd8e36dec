use crate::accounts::instruction_accounts;

instruction_accounts! {
    /// Validates the proof in the authority's cache against the program's internal account, then
    /// clears the cache.
    ///
    /// ### Accounts
    ///  0. `[WRITE, SIGNER]` Authority
    ///  1. `[WRITE]` Proof cache PDA
    ///  2. `[READ]` Internal account PDA
    ///  3. `[READ]` Instructions sysvar
    pub struct ValidateEventAccounts {
        authority: (signer = true, writable = true),
        cache_account: (signer = false, writable = true),
        /// Holds the client type, signer address, and chain ID the proof is checked against.
        internal: (signer = false, writable = false),
        /// Lets the program tell whether it was invoked directly or through CPI.
        instructions: (signer = false, writable = false),
    }
}
