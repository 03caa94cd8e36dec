//! Account role schemas. Each instruction declares an ordered list of named roles, and the
//! accounts a transaction supplies are mapped onto those roles by position.

use solana_sdk::{
    instruction::AccountMeta,
    pubkey::Pubkey,
};

/// A single named account slot an instruction expects.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct AccountRole {
    pub name: &'static str,
    pub signer: bool,
    pub writable: bool,
}

/// A struct of named [`AccountMeta`]s, one per [`AccountRole`], in schema order.
pub trait InstructionAccounts: Sized {
    const ROLES: &'static [AccountRole];

    /// Maps `metas` onto the roles by position. Returns `None` if there are fewer metas than roles;
    /// any extra metas are not consumed.
    fn from_metas(metas: &[AccountMeta]) -> Option<Self>;

    fn to_metas(&self) -> Vec<AccountMeta>;

    /// Builds the account metas from bare pubkeys, taking the signer and writable flags from the
    /// schema.
    fn from_pubkeys(pubkeys: &[Pubkey]) -> Option<Self> {
        let metas = Self::ROLES
            .iter()
            .zip(pubkeys)
            .map(|(role, pubkey)| AccountMeta {
                pubkey: *pubkey,
                is_signer: role.signer,
                is_writable: role.writable,
            })
            .collect::<Vec<_>>();
        Self::from_metas(&metas)
    }
}

/// Declares a struct of named account metas and implements [`InstructionAccounts`] for it. The
/// field order is the positional order on the wire.
macro_rules! instruction_accounts {
    (
        $(#[$struct_meta:meta])*
        pub struct $name:ident {
            $(
                $(#[$field_meta:meta])*
                $field:ident: (signer = $signer:literal, writable = $writable:literal),
            )+
        }
    ) => {
        $(#[$struct_meta])*
        #[derive(Clone, Debug, Eq, PartialEq)]
        pub struct $name {
            $(
                $(#[$field_meta])*
                pub $field: solana_sdk::instruction::AccountMeta,
            )+
        }

        impl $name {
            /// Builds the accounts from their pubkeys, taking the signer and writable flags from
            /// the schema.
            pub fn new($( $field: solana_sdk::pubkey::Pubkey, )+) -> Self {
                Self {
                    $(
                        $field: solana_sdk::instruction::AccountMeta {
                            pubkey: $field,
                            is_signer: $signer,
                            is_writable: $writable,
                        },
                    )+
                }
            }
        }

        impl $crate::accounts::InstructionAccounts for $name {
            const ROLES: &'static [$crate::accounts::AccountRole] = &[
                $(
                    $crate::accounts::AccountRole {
                        name: stringify!($field),
                        signer: $signer,
                        writable: $writable,
                    },
                )+
            ];

            fn from_metas(metas: &[solana_sdk::instruction::AccountMeta]) -> Option<Self> {
                let mut metas = metas.iter();
                Some(Self {
                    $( $field: metas.next()?.clone(), )+
                })
            }

            fn to_metas(&self) -> Vec<solana_sdk::instruction::AccountMeta> {
                vec![ $( self.$field.clone(), )+ ]
            }
        }
    };
}

pub(crate) use instruction_accounts;
