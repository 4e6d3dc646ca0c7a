//! Centralized balance constants for the Airship Freedom engine.
//!
//! These values pin down the starting snapshot and the fixed valuations the
//! engine and progression tables rely on. The economy is tuned here, not in
//! the JSON content assets.

// Ledger keys ---------------------------------------------------------------
pub(crate) const RES_CASH: &str = "cash";
pub(crate) const RES_BITCOIN: &str = "bitcoin";
pub(crate) const RES_ADVENTURE_POINTS: &str = "adventurePoints";

// Starting snapshot ---------------------------------------------------------
pub(crate) const START_CASH: f64 = 1_200.0;
pub(crate) const START_BITCOIN: f64 = 0.15;
pub(crate) const START_ADVENTURE_POINTS: f64 = 45.0;
pub(crate) const START_STORY: &str = "laptop_crisis";
pub(crate) const START_LOCATION: &str = "bangkok";

// Valuation -----------------------------------------------------------------
/// Fixed bitcoin valuation used for wealth-based progression. The game never
/// simulates a live market; every tier check prices holdings at this rate.
pub const BTC_PRICE_USD: f64 = 50_000.0;

// Achievement thresholds ----------------------------------------------------
pub(crate) const WHALE_THRESHOLD_BTC: f64 = 1.0;
pub(crate) const ADVENTURE_MASTER_THRESHOLD: f64 = 100.0;

#[cfg(test)]
pub(crate) const FLOAT_EPSILON: f64 = 1e-9;
