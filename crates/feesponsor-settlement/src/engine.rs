//! Two-phase admission and settlement.
//!
//! **Admission** runs before the sponsored operation and before its cost is
//! known:
//! 1. Verification budget must exceed the settlement overhead
//! 2. Decode `[sponsor][token]` from the request payload
//! 3. Convert the budget ceiling to tokens at the current price
//! 4. Check (not reserve) the account's deposit against that estimate
//! 5. Emit the encoded [`AdmissionContext`]
//!
//! **Settlement** runs afterwards with the same context bytes:
//! 1. Bill `(actual + overhead) * estimated / budget_ceiling` tokens
//! 2. Pull the tokens directly unless the caller reports degraded recovery
//! 3. Otherwise, or if the pull fails, debit the account's deposit
//! 4. Credit the sponsor owner exactly once
//!
//! `settle_once` adds replay protection keyed by the caller's operation id.
//!
//! The admission check holds no lock. Two admissions may pass against the
//! same balance; the second deposit debit then fails with
//! `InsufficientBalance`, which is surfaced to the caller.

use std::sync::Arc;

use chrono::Utc;
use feesponsor_ledger::{
    DepositLedger, PriceConverter, PriceSource, PriceSourceFactory, TokenRegistry,
    WithdrawalLock, math,
};
use feesponsor_types::{
    AccountId, AdmissionContext, AdmissionDecision, Amount, BlockContext, DepositInfo,
    EngineConfig, OutcomeMode, PaymentPath, PriceSourceConfig, ReceiptId, Result,
    SettlementReceipt, SponsorError, SponsorPayload, SponsoredRequest, TokenId,
    ValidityWindow, constants, digest_bytes, operation_digest,
};
use primitive_types::U256;

use crate::puller::TokenPuller;
use crate::replay_guard::ReplayGuard;
use crate::withdraw_lock::UnlockSchedule;

/// The sponsor: registry, ledger and withdraw lock behind the two-phase
/// admission/settlement protocol.
pub struct SponsorEngine {
    config: EngineConfig,
    registry: TokenRegistry,
    converter: PriceConverter,
    ledger: DepositLedger,
    unlocks: UnlockSchedule,
    /// Operation ids already settled through `settle_once`.
    replay: ReplayGuard,
    puller: Box<dyn TokenPuller>,
}

impl SponsorEngine {
    /// # Errors
    /// `Configuration` if `config` fails validation.
    pub fn new(
        config: EngineConfig,
        factory: Box<dyn PriceSourceFactory>,
        puller: Box<dyn TokenPuller>,
    ) -> Result<Self> {
        config.validate()?;
        let converter = PriceConverter::new(config.price_scale_decimals)?;
        tracing::info!(
            version = constants::VERSION,
            sponsor = %config.sponsor,
            owner = %config.owner,
            scale = converter.scale_decimals(),
            post_settlement_gas = config.post_settlement_gas,
            "sponsor engine started"
        );
        Ok(Self {
            registry: TokenRegistry::new(factory, config.price_scale_decimals),
            converter,
            ledger: DepositLedger::new(),
            unlocks: UnlockSchedule::new(),
            replay: ReplayGuard::new(config.replay_cache_size),
            puller,
            config,
        })
    }

    // -----------------------------------------------------------------
    // Tokens and deposits
    // -----------------------------------------------------------------

    /// Accept `token`, priced by a new source bound to `price_config`.
    pub fn register_token(
        &mut self,
        token: TokenId,
        price_config: PriceSourceConfig,
    ) -> Result<Arc<dyn PriceSource>> {
        self.registry.register(token, price_config)
    }

    /// Fund `account`'s deposit. Any caller may fund any account, and
    /// funding does not touch the account's withdraw lock.
    pub fn deposit_for(&mut self, token: TokenId, account: AccountId, amount: Amount) -> Result<Amount> {
        self.ledger.deposit(&self.registry, token, account, amount)
    }

    #[must_use]
    pub fn balance_of(&self, token: TokenId, account: AccountId) -> Amount {
        self.ledger.balance_of(token, account)
    }

    /// Balance and unlock block for one deposit.
    #[must_use]
    pub fn deposit_info(&self, token: TokenId, account: AccountId) -> DepositInfo {
        DepositInfo {
            amount: self.ledger.balance_of(token, account),
            unlock_block: self.unlocks.unlock_block(account),
        }
    }

    /// Start the unlock countdown for `account`'s deposits.
    pub fn unlock_deposit(&mut self, account: AccountId, current_block: u64) {
        self.unlocks.request_unlock(account, current_block);
    }

    /// Lock `account`'s deposits again.
    pub fn lock_deposit(&mut self, account: AccountId) {
        self.unlocks.lock(account);
    }

    /// Withdraw from `account`'s deposit once unlocked.
    pub fn withdraw(
        &mut self,
        token: TokenId,
        account: AccountId,
        amount: Amount,
        current_block: u64,
    ) -> Result<Amount> {
        let remaining = self
            .ledger
            .withdraw(token, account, amount, &self.unlocks, current_block)?;
        tracing::info!(token = %token, account = %account, amount, remaining, "deposit withdrawn");
        Ok(remaining)
    }

    /// Token value of `native_cost` at `token`'s current price.
    pub fn quote(&self, token: TokenId, native_cost: Amount) -> Result<Amount> {
        self.converter.convert(&self.registry, native_cost, token)
    }

    /// The `[sponsor][token]` payload a request must carry to pay in `token`.
    #[must_use]
    pub fn sponsor_payload(&self, token: TokenId) -> Vec<u8> {
        SponsorPayload::new(self.config.sponsor, token).encode()
    }

    // -----------------------------------------------------------------
    // Phase 1: admission
    // -----------------------------------------------------------------

    /// Decide whether to sponsor `request` up to `budget_ceiling` native
    /// units. Nothing is mutated, whether admitted or rejected.
    ///
    /// # Errors
    /// - `InsufficientVerificationBudget` if the verification budget does
    ///   not exceed the settlement overhead
    /// - `MalformedPayload` if the payload is not `[sponsor][token]`
    /// - `ZeroBudget` if `budget_ceiling` is zero
    /// - `UnsupportedToken`, `InvalidPrice`, `ArithmeticOverflow` from conversion
    /// - `InsufficientDeposit` if the deposit is below the converted estimate
    pub fn admit(
        &self,
        request: &SponsoredRequest,
        budget_ceiling: Amount,
        block: BlockContext,
    ) -> Result<AdmissionDecision> {
        let required = self.config.post_settlement_gas;
        if request.verification_budget <= required {
            return Err(SponsorError::InsufficientVerificationBudget {
                budget: request.verification_budget,
                required,
            });
        }

        let payload = request.payload()?;
        if budget_ceiling == 0 {
            return Err(SponsorError::ZeroBudget);
        }
        let token = payload.token;
        let account = request.sender;

        let estimated_token_cost = self.converter.convert(&self.registry, budget_ceiling, token)?;
        let available = self.ledger.balance_of(token, account);
        if available < estimated_token_cost {
            return Err(SponsorError::InsufficientDeposit {
                needed: estimated_token_cost,
                available,
            });
        }

        let context = AdmissionContext {
            account,
            token,
            gas_price: request.gas_price(block.base_fee),
            estimated_token_cost,
            budget_ceiling,
        };
        let price = self
            .registry
            .display_price(token)
            .map_or_else(|_| String::from("n/a"), |p| p.to_string());
        tracing::info!(
            account = %account,
            token = %token,
            block = block.number,
            price = %price,
            budget_ceiling,
            estimated_token_cost,
            available,
            "request admitted"
        );
        Ok(AdmissionDecision {
            context: context.encode(),
            validity: ValidityWindow::Always,
        })
    }

    // -----------------------------------------------------------------
    // Phase 2: settlement
    // -----------------------------------------------------------------

    /// Bill the account for `actual_native_cost` using the rate fixed in
    /// `context`, and credit the sponsor owner.
    ///
    /// A failed pull is not an error: the deposit is debited instead.
    ///
    /// # Errors
    /// - `MalformedContext` if `context` does not decode
    /// - `ArithmeticOverflow` if the bill overflows
    /// - `InsufficientBalance` if the deposit debit underflows; nothing is
    ///   debited or credited
    pub fn settle(
        &mut self,
        context: &[u8],
        mode: OutcomeMode,
        actual_native_cost: Amount,
    ) -> Result<SettlementReceipt> {
        let ctx = AdmissionContext::decode(context)?;
        let token_cost = self.actual_token_cost(&ctx, actual_native_cost)?;
        let owner = self.config.owner;

        let path = if mode.allows_pull() && self.try_pull(&ctx, token_cost)? {
            self.ledger.credit(ctx.token, owner, token_cost)?;
            PaymentPath::Pulled
        } else {
            self.ledger.settle(ctx.token, ctx.account, owner, token_cost)?;
            PaymentPath::DepositDebit
        };

        tracing::info!(
            account = %ctx.account,
            token = %ctx.token,
            mode = %mode,
            path = %path,
            actual_native_cost,
            token_cost,
            "request settled"
        );
        Ok(SettlementReceipt {
            id: ReceiptId::new(),
            account: ctx.account,
            token: ctx.token,
            mode,
            path,
            native_cost: actual_native_cost,
            token_cost,
            context_digest: digest_bytes(context),
            settled_at: Utc::now(),
        })
    }

    /// [`settle`](Self::settle), at most once per `operation_id`.
    ///
    /// The id is claimed before settling and released again if settlement
    /// fails, so a failed attempt may be retried (typically in degraded
    /// mode).
    ///
    /// # Errors
    /// `OperationReplayed` if `operation_id` was already settled, otherwise
    /// as [`settle`](Self::settle).
    pub fn settle_once(
        &mut self,
        operation_id: &[u8],
        context: &[u8],
        mode: OutcomeMode,
        actual_native_cost: Amount,
    ) -> Result<SettlementReceipt> {
        let key = operation_digest(operation_id);
        if !self.replay.claim(key) {
            let operation = hex::encode(key);
            tracing::warn!(operation = %operation, "operation already settled");
            return Err(SponsorError::OperationReplayed(operation));
        }
        let settled = self.settle(context, mode, actual_native_cost);
        if settled.is_err() {
            self.replay.release(&key);
        }
        settled
    }

    /// `(actual + overhead * gas_price) * estimated / budget_ceiling`.
    ///
    /// The ratio comes from the context, never from the live price. The
    /// whole expression is evaluated in 256 bits.
    fn actual_token_cost(&self, ctx: &AdmissionContext, actual_native_cost: Amount) -> Result<Amount> {
        let native = U256::from(actual_native_cost)
            + U256::from(self.config.post_settlement_gas) * U256::from(ctx.gas_price);
        let scaled = native
            .checked_mul(U256::from(ctx.estimated_token_cost))
            .ok_or(SponsorError::ArithmeticOverflow { op: "settle" })?;
        math::narrow(scaled / U256::from(ctx.budget_ceiling), "settle")
    }

    /// Attempt the direct pull. `Ok(false)` means fall back to the deposit.
    ///
    /// The owner's balance and the pulled-supply total are checked for room
    /// first so a successful pull can always be credited.
    fn try_pull(&self, ctx: &AdmissionContext, token_cost: Amount) -> Result<bool> {
        let owner = self.config.owner;
        if self
            .ledger
            .balance_of(ctx.token, owner)
            .checked_add(token_cost)
            .is_none()
        {
            return Err(SponsorError::BalanceOverflow {
                token: ctx.token,
                account: owner,
            });
        }
        if self
            .ledger
            .supply()
            .total_pulled(ctx.token)
            .checked_add(token_cost)
            .is_none()
        {
            return Err(SponsorError::ArithmeticOverflow { op: "supply" });
        }

        match self
            .puller
            .pull(ctx.token, ctx.account, self.config.sponsor, token_cost)
        {
            Ok(()) => Ok(true),
            Err(err) => {
                tracing::warn!(
                    account = %ctx.account,
                    token = %ctx.token,
                    token_cost,
                    error = %err,
                    "token pull failed, debiting deposit"
                );
                Ok(false)
            }
        }
    }

    // -----------------------------------------------------------------
    // Accessors
    // -----------------------------------------------------------------

    #[must_use]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    #[must_use]
    pub fn registry(&self) -> &TokenRegistry {
        &self.registry
    }

    #[must_use]
    pub fn ledger(&self) -> &DepositLedger {
        &self.ledger
    }

    #[must_use]
    pub fn unlocks(&self) -> &UnlockSchedule {
        &self.unlocks
    }

    /// Number of settled operation ids still remembered.
    #[must_use]
    pub fn settled_count(&self) -> usize {
        self.replay.len()
    }
}

#[cfg(test)]
mod tests {
    use feesponsor_ledger::{ManualFeedFactory, ManualPriceFeed};
    use feesponsor_types::SponsorId;
    use feesponsor_types::constants::SPONSOR_PAYLOAD_LEN;

    use super::*;
    use crate::puller::ScriptedPuller;

    const E18: i128 = 1_000_000_000_000_000_000;

    struct Harness {
        engine: SponsorEngine,
        feed: ManualPriceFeed,
        puller: ScriptedPuller,
        token: TokenId,
        owner: AccountId,
    }

    /// Price 2000 tokens per native unit; overhead of 1 gas unit so the
    /// arithmetic stays readable.
    fn harness() -> Harness {
        let factory = ManualFeedFactory::new();
        let token = TokenId::random();
        let feed = factory.with_price(token, 2_000 * E18);
        let puller = ScriptedPuller::new();
        let owner = AccountId::random();

        let mut config = EngineConfig::new(SponsorId::random(), owner);
        config.post_settlement_gas = 1;
        let mut engine =
            SponsorEngine::new(config, Box::new(factory), Box::new(puller.clone())).unwrap();
        engine
            .register_token(token, PriceSourceConfig::new("ETH", "TKN", 18))
            .unwrap();
        Harness {
            engine,
            feed,
            puller,
            token,
            owner,
        }
    }

    fn request(engine: &SponsorEngine, sender: AccountId, token: TokenId) -> SponsoredRequest {
        SponsoredRequest {
            sender,
            max_fee_per_gas: 1,
            max_priority_fee_per_gas: 1,
            verification_budget: 100_000,
            sponsor_data: engine.sponsor_payload(token),
        }
    }

    #[test]
    fn admit_returns_always_valid_context() {
        let mut h = harness();
        let alice = AccountId::random();
        h.engine.deposit_for(h.token, alice, 5_000).unwrap();

        let decision = h
            .engine
            .admit(&request(&h.engine, alice, h.token), 2, BlockContext::default())
            .unwrap();
        assert_eq!(decision.validity, ValidityWindow::Always);

        let ctx = AdmissionContext::decode(&decision.context).unwrap();
        assert_eq!(ctx.account, alice);
        assert_eq!(ctx.token, h.token);
        assert_eq!(ctx.estimated_token_cost, 4_000);
        assert_eq!(ctx.budget_ceiling, 2);
        assert_eq!(ctx.gas_price, 1);
    }

    #[test]
    fn verification_budget_must_exceed_overhead() {
        let mut h = harness();
        let alice = AccountId::random();
        h.engine.deposit_for(h.token, alice, 5_000).unwrap();
        let mut req = request(&h.engine, alice, h.token);

        req.verification_budget = 1;
        let err = h.engine.admit(&req, 2, BlockContext::default()).unwrap_err();
        assert!(matches!(
            err,
            SponsorError::InsufficientVerificationBudget {
                budget: 1,
                required: 1
            }
        ));

        req.verification_budget = 2;
        assert!(h.engine.admit(&req, 2, BlockContext::default()).is_ok());
    }

    #[test]
    fn payload_width_enforced() {
        let h = harness();
        let mut req = request(&h.engine, AccountId::random(), h.token);
        req.sponsor_data.pop();
        let err = h.engine.admit(&req, 2, BlockContext::default()).unwrap_err();
        assert!(matches!(
            err,
            SponsorError::MalformedPayload {
                expected: SPONSOR_PAYLOAD_LEN,
                ..
            }
        ));
    }

    #[test]
    fn zero_budget_rejected() {
        let h = harness();
        let req = request(&h.engine, AccountId::random(), h.token);
        let err = h.engine.admit(&req, 0, BlockContext::default()).unwrap_err();
        assert!(matches!(err, SponsorError::ZeroBudget));
    }

    #[test]
    fn conversion_errors_propagate() {
        let h = harness();
        let alice = AccountId::random();
        let unknown = TokenId::random();
        let err = h
            .engine
            .admit(&request(&h.engine, alice, unknown), 2, BlockContext::default())
            .unwrap_err();
        assert!(matches!(err, SponsorError::UnsupportedToken(t) if t == unknown));

        h.feed.set_price(0);
        let err = h
            .engine
            .admit(&request(&h.engine, alice, h.token), 2, BlockContext::default())
            .unwrap_err();
        assert!(matches!(err, SponsorError::InvalidPrice { .. }));
    }

    #[test]
    fn admission_boundary_is_inclusive() {
        let mut h = harness();
        let exact = AccountId::random();
        let short = AccountId::random();
        h.engine.deposit_for(h.token, exact, 4_000).unwrap();
        h.engine.deposit_for(h.token, short, 3_999).unwrap();

        assert!(
            h.engine
                .admit(&request(&h.engine, exact, h.token), 2, BlockContext::default())
                .is_ok()
        );
        let err = h
            .engine
            .admit(&request(&h.engine, short, h.token), 2, BlockContext::default())
            .unwrap_err();
        assert!(matches!(
            err,
            SponsorError::InsufficientDeposit {
                needed: 4_000,
                available: 3_999
            }
        ));
    }

    #[test]
    fn wei_scale_budget_admits_and_settles() {
        let mut h = harness();
        let alice = AccountId::random();
        let one_native: Amount = 10u128.pow(18);
        assert_eq!(h.engine.quote(h.token, one_native).unwrap(), 2_000 * one_native);

        h.engine
            .deposit_for(h.token, alice, 10_000 * one_native)
            .unwrap();
        let decision = h
            .engine
            .admit(&request(&h.engine, alice, h.token), one_native, BlockContext::default())
            .unwrap();
        assert_eq!(
            AdmissionContext::decode(&decision.context)
                .unwrap()
                .estimated_token_cost,
            2_000 * one_native
        );

        // (0.5 native + 1 wei overhead) at 2000 tokens per native
        let receipt = h
            .engine
            .settle(&decision.context, OutcomeMode::DegradedRecovery, one_native / 2)
            .unwrap();
        assert_eq!(receipt.token_cost, 1_000 * one_native + 2_000);
    }

    #[test]
    fn bill_beyond_u128_is_overflow() {
        let mut h = harness();
        let ctx = AdmissionContext {
            account: AccountId::random(),
            token: h.token,
            gas_price: 1,
            estimated_token_cost: u128::MAX,
            budget_ceiling: 1,
        };
        let err = h
            .engine
            .settle(&ctx.encode(), OutcomeMode::DegradedRecovery, 1)
            .unwrap_err();
        assert!(matches!(err, SponsorError::ArithmeticOverflow { op: "settle" }));
    }

    #[test]
    fn admission_does_not_touch_balance() {
        let mut h = harness();
        let alice = AccountId::random();
        h.engine.deposit_for(h.token, alice, 5_000).unwrap();
        h.engine
            .admit(&request(&h.engine, alice, h.token), 2, BlockContext::default())
            .unwrap();
        assert_eq!(h.engine.balance_of(h.token, alice), 5_000);
    }

    #[test]
    fn successful_pull_credits_owner_without_debit() {
        let mut h = harness();
        let alice = AccountId::random();
        h.engine.deposit_for(h.token, alice, 10_000).unwrap();
        let decision = h
            .engine
            .admit(&request(&h.engine, alice, h.token), 4, BlockContext::default())
            .unwrap();

        let receipt = h
            .engine
            .settle(&decision.context, OutcomeMode::Succeeded, 2)
            .unwrap();
        assert_eq!(receipt.path, PaymentPath::Pulled);
        assert_eq!(receipt.token_cost, 6_000);
        assert_eq!(h.puller.total_pulled(), 6_000);
        assert_eq!(h.engine.balance_of(h.token, alice), 10_000);
        assert_eq!(h.engine.balance_of(h.token, h.owner), 6_000);
        h.engine.ledger().verify_supply(h.token).unwrap();
    }

    #[test]
    fn degraded_mode_never_pulls() {
        let mut h = harness();
        let alice = AccountId::random();
        h.engine.deposit_for(h.token, alice, 10_000).unwrap();
        let decision = h
            .engine
            .admit(&request(&h.engine, alice, h.token), 4, BlockContext::default())
            .unwrap();

        let receipt = h
            .engine
            .settle(&decision.context, OutcomeMode::DegradedRecovery, 2)
            .unwrap();
        assert_eq!(receipt.path, PaymentPath::DepositDebit);
        assert!(h.puller.calls().is_empty());
        assert_eq!(h.engine.balance_of(h.token, alice), 4_000);
        assert_eq!(h.engine.balance_of(h.token, h.owner), 6_000);
    }

    #[test]
    fn failed_pull_falls_back_once() {
        let mut h = harness();
        let alice = AccountId::random();
        h.engine.deposit_for(h.token, alice, 10_000).unwrap();
        h.puller.set_failing(true);
        let decision = h
            .engine
            .admit(&request(&h.engine, alice, h.token), 4, BlockContext::default())
            .unwrap();

        let receipt = h
            .engine
            .settle(&decision.context, OutcomeMode::Reverted, 2)
            .unwrap();
        assert_eq!(receipt.path, PaymentPath::DepositDebit);
        assert_eq!(h.puller.calls().len(), 1);
        assert_eq!(h.puller.total_pulled(), 0);
        assert_eq!(h.engine.balance_of(h.token, alice), 4_000);
        assert_eq!(h.engine.balance_of(h.token, h.owner), 6_000);
    }

    #[test]
    fn replayed_operation_rejected() {
        let mut h = harness();
        let alice = AccountId::random();
        h.engine.deposit_for(h.token, alice, 20_000).unwrap();
        let decision = h
            .engine
            .admit(&request(&h.engine, alice, h.token), 4, BlockContext::default())
            .unwrap();

        h.engine
            .settle_once(b"op-1", &decision.context, OutcomeMode::DegradedRecovery, 2)
            .unwrap();
        let err = h
            .engine
            .settle_once(b"op-1", &decision.context, OutcomeMode::DegradedRecovery, 2)
            .unwrap_err();
        assert!(matches!(err, SponsorError::OperationReplayed(_)));
        assert_eq!(h.engine.balance_of(h.token, alice), 14_000);
        assert_eq!(h.engine.settled_count(), 1);

        // Identical context under a different operation is a separate bill
        h.engine
            .settle_once(b"op-2", &decision.context, OutcomeMode::DegradedRecovery, 2)
            .unwrap();
        assert_eq!(h.engine.balance_of(h.token, alice), 8_000);
        assert_eq!(h.engine.settled_count(), 2);
    }

    #[test]
    fn failed_settlement_does_not_consume_operation() {
        let mut h = harness();
        let alice = AccountId::random();
        h.engine.deposit_for(h.token, alice, 8_000).unwrap();
        let decision = h
            .engine
            .admit(&request(&h.engine, alice, h.token), 4, BlockContext::default())
            .unwrap();

        assert!(
            h.engine
                .settle_once(b"op", &decision.context, OutcomeMode::DegradedRecovery, 9)
                .is_err()
        );
        assert_eq!(h.engine.settled_count(), 0);
        h.engine
            .settle_once(b"op", &decision.context, OutcomeMode::DegradedRecovery, 2)
            .unwrap();
        assert_eq!(h.engine.balance_of(h.token, alice), 2_000);
    }

    #[test]
    fn underflow_leaves_both_entries_untouched() {
        let mut h = harness();
        let alice = AccountId::random();
        h.engine.deposit_for(h.token, alice, 8_000).unwrap();
        let decision = h
            .engine
            .admit(&request(&h.engine, alice, h.token), 4, BlockContext::default())
            .unwrap();

        // bill = (9 + 1) * 8000 / 4 = 20_000 > 8_000
        let err = h
            .engine
            .settle(&decision.context, OutcomeMode::DegradedRecovery, 9)
            .unwrap_err();
        assert!(matches!(
            err,
            SponsorError::InsufficientBalance {
                needed: 20_000,
                available: 8_000
            }
        ));
        assert_eq!(h.engine.balance_of(h.token, alice), 8_000);
        assert_eq!(h.engine.balance_of(h.token, h.owner), 0);
    }

    #[test]
    fn malformed_context_rejected() {
        let mut h = harness();
        let err = h
            .engine
            .settle(&[0u8; 10], OutcomeMode::Succeeded, 1)
            .unwrap_err();
        assert!(matches!(err, SponsorError::MalformedContext { .. }));
    }

    #[test]
    fn deposit_info_reports_unlock_block() {
        let mut h = harness();
        let alice = AccountId::random();
        h.engine.deposit_for(h.token, alice, 50).unwrap();
        assert_eq!(
            h.engine.deposit_info(h.token, alice),
            DepositInfo {
                amount: 50,
                unlock_block: 0
            }
        );
        h.engine.unlock_deposit(alice, 12);
        assert_eq!(h.engine.deposit_info(h.token, alice).unlock_block, 12);
        h.engine.lock_deposit(alice);
        assert_eq!(h.engine.deposit_info(h.token, alice).unlock_block, 0);
    }

    #[test]
    fn invalid_config_rejected() {
        let mut config = EngineConfig::new(SponsorId::random(), AccountId::random());
        config.replay_cache_size = 0;
        let err = SponsorEngine::new(
            config,
            Box::new(ManualFeedFactory::new()),
            Box::new(ScriptedPuller::new()),
        )
        .err()
        .unwrap();
        assert!(matches!(err, SponsorError::Configuration(_)));
    }
}
