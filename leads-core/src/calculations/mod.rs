//! Calculation modules for the lead funnel widget.
//!
//! [`funnel`] derives the conversion funnel and the value generated from a
//! [`CalculatorInput`](crate::CalculatorInput); [`pricing`] turns the funnel
//! into an advisory plan recommendation.

pub mod common;
pub mod funnel;
pub mod pricing;

pub use funnel::{FunnelCalculator, FunnelConfig, FunnelConfigError, compute};
pub use pricing::{PricingConfig, PricingConfigError, PricingSummary, recommend};
