use super::balance::Balance;
use crate::catalog::Catalog;

/// The immutable rules a session is played under.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Ruleset {
    pub catalog: Catalog,
    pub balance: Balance,
}

impl Ruleset {
    pub fn new(catalog: Catalog, balance: Balance) -> Self {
        Self { catalog, balance }
    }

    pub fn with_balance(balance: Balance) -> Self {
        Self {
            catalog: Catalog::builtin(),
            balance,
        }
    }
}
