//! Deposit ledger: per-(token, account) escrow balances.
//!
//! Balances are never negative. Every mutation is atomic: either the full
//! operation succeeds or every touched entry is unchanged.

use std::collections::HashMap;

use feesponsor_types::{AccountId, Amount, Result, SponsorError, TokenId};

use crate::lock::WithdrawalLock;
use crate::registry::TokenRegistry;
use crate::supply::SupplyConservation;

/// Escrow balances held by the sponsor on behalf of accounts.
///
/// Admission reads it, deposits and withdrawals move funds in and out, and
/// settlement transfers between an account and the sponsor owner.
#[derive(Debug, Default)]
pub struct DepositLedger {
    /// Per-(token, account) balances.
    balances: HashMap<(TokenId, AccountId), Amount>,
    /// Inflow/outflow totals for conservation checks.
    supply: SupplyConservation,
}

impl DepositLedger {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `amount` to `account`'s balance of `token`. Anyone may fund any
    /// account. Returns the new balance.
    ///
    /// # Errors
    /// - `UnsupportedToken` if `token` is not registered
    /// - `BalanceOverflow` if the balance would overflow
    /// - `ArithmeticOverflow` if the token's deposit total would overflow
    pub fn deposit(
        &mut self,
        registry: &TokenRegistry,
        token: TokenId,
        account: AccountId,
        amount: Amount,
    ) -> Result<Amount> {
        if !registry.is_registered(token) {
            return Err(SponsorError::UnsupportedToken(token));
        }
        let balance = self.credited(token, account, amount)?;
        self.supply.record_deposit(token, amount)?;
        self.balances.insert((token, account), balance);
        tracing::debug!(token = %token, account = %account, amount, balance, "deposit");
        Ok(balance)
    }

    /// Balance of `account` in `token`; zero if never funded.
    #[must_use]
    pub fn balance_of(&self, token: TokenId, account: AccountId) -> Amount {
        self.balances.get(&(token, account)).copied().unwrap_or(0)
    }

    /// Remove `amount` from `account`'s balance once `lock` allows it.
    /// Returns the new balance.
    ///
    /// # Errors
    /// - `WithdrawalLocked` if `lock` reports the account locked at `current_block`
    /// - `InsufficientBalance` if `amount` exceeds the balance
    pub fn withdraw(
        &mut self,
        token: TokenId,
        account: AccountId,
        amount: Amount,
        lock: &dyn WithdrawalLock,
        current_block: u64,
    ) -> Result<Amount> {
        if !lock.is_unlocked(account, current_block) {
            return Err(SponsorError::WithdrawalLocked {
                account,
                unlock_block: lock.unlock_block(account),
                current_block,
            });
        }
        let balance = self.debited(token, account, amount)?;
        self.supply.record_withdrawal(token, amount)?;
        self.balances.insert((token, account), balance);
        tracing::debug!(token = %token, account = %account, amount, balance, "withdraw");
        Ok(balance)
    }

    /// Move `amount` from `payer` to `payee` within `token`.
    ///
    /// Both the debit and the credit are checked before either is applied.
    ///
    /// # Errors
    /// - `InsufficientBalance` if `payer` holds less than `amount`
    /// - `BalanceOverflow` if `payee`'s balance would overflow
    pub fn settle(
        &mut self,
        token: TokenId,
        payer: AccountId,
        payee: AccountId,
        amount: Amount,
    ) -> Result<()> {
        let available = self.balance_of(token, payer);
        if available < amount {
            return Err(SponsorError::InsufficientBalance {
                needed: amount,
                available,
            });
        }
        if payer == payee {
            return Ok(());
        }
        let credited = self
            .balance_of(token, payee)
            .checked_add(amount)
            .ok_or(SponsorError::BalanceOverflow {
                token,
                account: payee,
            })?;

        self.balances.insert((token, payer), available - amount);
        self.balances.insert((token, payee), credited);
        tracing::debug!(
            token = %token,
            payer = %payer,
            payee = %payee,
            amount,
            "ledger settle"
        );
        Ok(())
    }

    /// Credit revenue that reached the sponsor outside the ledger (a direct
    /// token pull). Returns the new balance.
    ///
    /// # Errors
    /// `BalanceOverflow` if the balance would overflow, `ArithmeticOverflow`
    /// if the pulled-supply total would.
    pub fn credit(&mut self, token: TokenId, account: AccountId, amount: Amount) -> Result<Amount> {
        let balance = self.credited(token, account, amount)?;
        self.supply.record_pulled(token, amount)?;
        self.balances.insert((token, account), balance);
        tracing::debug!(token = %token, account = %account, amount, balance, "credit");
        Ok(balance)
    }

    /// Sum of every balance held in `token`.
    ///
    /// # Errors
    /// `ArithmeticOverflow` if the sum does not fit a `u128`.
    pub fn total_supply(&self, token: TokenId) -> Result<Amount> {
        self.balances
            .iter()
            .filter(|((t, _), _)| *t == token)
            .try_fold(0u128, |acc, (_, amount)| acc.checked_add(*amount))
            .ok_or(SponsorError::ArithmeticOverflow {
                op: "total_supply",
            })
    }

    /// Verify supply conservation for `token`.
    pub fn verify_supply(&self, token: TokenId) -> Result<()> {
        self.supply.verify(token, self.total_supply(token)?)
    }

    /// Access the supply tracker.
    #[must_use]
    pub fn supply(&self) -> &SupplyConservation {
        &self.supply
    }

    /// Balance after crediting `amount`, without applying it.
    fn credited(&self, token: TokenId, account: AccountId, amount: Amount) -> Result<Amount> {
        self.balance_of(token, account)
            .checked_add(amount)
            .ok_or(SponsorError::BalanceOverflow { token, account })
    }

    /// Balance after debiting `amount`, without applying it.
    fn debited(&self, token: TokenId, account: AccountId, amount: Amount) -> Result<Amount> {
        let available = self.balance_of(token, account);
        available
            .checked_sub(amount)
            .ok_or(SponsorError::InsufficientBalance {
                needed: amount,
                available,
            })
    }
}
