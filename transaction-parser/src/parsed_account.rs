use derive_more::{
    AsRef,
    Deref,
    Index,
    IntoIterator,
};
use solana_sdk::{
    instruction::AccountMeta,
    pubkey::Pubkey,
};

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct ParsedAccount {
    pub pubkey: Pubkey,
    pub writable: bool,
    pub signer: bool,
}

impl From<&ParsedAccount> for Pubkey {
    fn from(account: &ParsedAccount) -> Self {
        account.pubkey
    }
}

impl From<&ParsedAccount> for AccountMeta {
    fn from(account: &ParsedAccount) -> Self {
        AccountMeta {
            pubkey: account.pubkey,
            is_signer: account.signer,
            is_writable: account.writable,
        }
    }
}

#[derive(Clone, Debug, Default, Eq, PartialEq, Deref, Index, IntoIterator, AsRef)]
pub struct ParsedAccounts(Vec<ParsedAccount>);

impl ParsedAccounts {
    pub fn pubkeys(&self) -> Vec<Pubkey> {
        self.iter().map(|p| p.pubkey).collect()
    }

    pub fn account_metas(&self) -> Vec<AccountMeta> {
        self.iter().map(AccountMeta::from).collect()
    }
}

impl FromIterator<ParsedAccount> for ParsedAccounts {
    fn from_iter<I: IntoIterator<Item = ParsedAccount>>(iter: I) -> Self {
        ParsedAccounts(iter.into_iter().collect())
    }
}
