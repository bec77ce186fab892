//! Supply conservation invariant checker.
//!
//! Mathematical invariant enforced after every ledger movement:
//! ```text
//! ∀ token: Σ(balances) == Σ(deposits) + Σ(pulled revenue) - Σ(withdrawals)
//! ```
//!
//! Settlement debits only move balance between entries; a pulled payment
//! is the one inflow that did not arrive through `deposit`.

use std::collections::HashMap;

use feesponsor_types::{Amount, Result, SponsorError, TokenId};

/// Tracks per-token ledger inflows and outflows.
#[derive(Debug, Clone, Default)]
pub struct SupplyConservation {
    /// Total deposits per token since genesis.
    deposits: HashMap<TokenId, Amount>,
    /// Revenue credited after a direct token pull.
    pulled: HashMap<TokenId, Amount>,
    /// Total withdrawals per token since genesis.
    withdrawals: HashMap<TokenId, Amount>,
}

impl SupplyConservation {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// # Errors
    /// `ArithmeticOverflow` if the running total would exceed `u128`; the
    /// total is left unchanged.
    pub fn record_deposit(&mut self, token: TokenId, amount: Amount) -> Result<()> {
        bump(&mut self.deposits, token, amount)
    }

    /// # Errors
    /// As [`record_deposit`](Self::record_deposit).
    pub fn record_pulled(&mut self, token: TokenId, amount: Amount) -> Result<()> {
        bump(&mut self.pulled, token, amount)
    }

    /// # Errors
    /// As [`record_deposit`](Self::record_deposit).
    pub fn record_withdrawal(&mut self, token: TokenId, amount: Amount) -> Result<()> {
        bump(&mut self.withdrawals, token, amount)
    }

    /// Expected ledger total: deposits + pulled − withdrawals.
    ///
    /// `None` if withdrawals exceed inflows, which no valid history allows,
    /// or if the inflows together exceed `u128`.
    #[must_use]
    pub fn expected_supply(&self, token: TokenId) -> Option<Amount> {
        self.total_deposits(token)
            .checked_add(self.total_pulled(token))?
            .checked_sub(self.total_withdrawals(token))
    }

    /// Verify that the actual ledger total matches the expected supply.
    ///
    /// # Errors
    /// Returns [`SponsorError::SupplyInvariantViolation`] if actual ≠ expected.
    pub fn verify(&self, token: TokenId, actual_supply: Amount) -> Result<()> {
        let expected = self.expected_supply(token);
        if expected != Some(actual_supply) {
            return Err(SponsorError::SupplyInvariantViolation {
                reason: format!(
                    "Token {token}: actual supply {actual_supply} != expected {expected:?} \
                     (deposits={}, pulled={}, withdrawals={})",
                    self.total_deposits(token),
                    self.total_pulled(token),
                    self.total_withdrawals(token),
                ),
            });
        }
        Ok(())
    }

    #[must_use]
    pub fn total_deposits(&self, token: TokenId) -> Amount {
        self.deposits.get(&token).copied().unwrap_or(0)
    }

    #[must_use]
    pub fn total_pulled(&self, token: TokenId) -> Amount {
        self.pulled.get(&token).copied().unwrap_or(0)
    }

    #[must_use]
    pub fn total_withdrawals(&self, token: TokenId) -> Amount {
        self.withdrawals.get(&token).copied().unwrap_or(0)
    }
}

fn bump(totals: &mut HashMap<TokenId, Amount>, token: TokenId, amount: Amount) -> Result<()> {
    let total = totals.entry(token).or_insert(0);
    *total = total
        .checked_add(amount)
        .ok_or(SponsorError::ArithmeticOverflow { op: "supply" })?;
    Ok(())
}
