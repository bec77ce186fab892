//! # feesponsor-types
//!
//! Shared types, errors, and configuration for the **feesponsor** token
//! fee sponsor.
//!
//! This crate is the leaf dependency of the workspace; every other crate
//! depends on it. It defines:
//!
//! - **Identifiers**: [`TokenId`], [`AccountId`], [`SponsorId`], [`ReceiptId`]
//! - **Request model**: [`SponsoredRequest`], [`SponsorPayload`], [`BlockContext`]
//! - **Admission model**: [`AdmissionContext`], [`AdmissionDecision`], [`ValidityWindow`], [`OutcomeMode`]
//! - **Balance model**: [`Amount`], [`DepositInfo`]
//! - **Receipt model**: [`SettlementReceipt`], [`PaymentPath`]
//! - **Configuration**: [`EngineConfig`], [`PriceSourceConfig`]
//! - **Errors**: [`SponsorError`] with `SF_ERR_` prefix codes
//! - **Constants**: protocol constants and defaults

pub mod balance;
pub mod config;
pub mod constants;
pub mod context;
pub mod error;
pub mod ids;
pub mod receipt;
pub mod request;

pub use balance::*;
pub use config::*;
pub use context::*;
pub use error::*;
pub use ids::*;
pub use receipt::*;
pub use request::*;

// Constants are accessed via `feesponsor_types::constants::FOO`
// (not re-exported to avoid name collisions).
