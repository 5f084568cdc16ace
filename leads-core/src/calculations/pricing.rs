//! Advisory plan recommendation and return-on-investment estimate.
//!
//! The recommendation is a threshold classification on the number of leads
//! analyzed per month. The investment estimate charges a flat price per
//! analyzed lead.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::{CalculatorResult, LeadAllowance, Plan};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PricingConfigError {
    #[error("price per lead must be non-negative, got {0}")]
    NegativePricePerLead(Decimal),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PricingConfig {
    /// Pay-as-you-go price charged per analyzed lead.
    pub price_per_lead: Decimal,
}

impl Default for PricingConfig {
    fn default() -> Self {
        Self {
            price_per_lead: Decimal::new(80, 2),
        }
    }
}

impl PricingConfig {
    pub fn validate(&self) -> Result<(), PricingConfigError> {
        if self.price_per_lead < Decimal::ZERO {
            return Err(PricingConfigError::NegativePricePerLead(
                self.price_per_lead,
            ));
        }
        Ok(())
    }
}

/// Recommends a plan for the given monthly volume of analyzed leads.
///
/// # Examples
///
/// ```
/// use leads_core::{Plan, recommend};
///
/// assert_eq!(recommend(500), Plan::Starter);
/// assert_eq!(recommend(501), Plan::Agency);
/// assert_eq!(recommend(2501), Plan::Expert);
/// ```
pub fn recommend(analyzed_jobs_per_month: u32) -> Plan {
    [Plan::Starter, Plan::Agency]
        .into_iter()
        .find(|plan| match plan.leads() {
            LeadAllowance::Limited(limit) => analyzed_jobs_per_month <= limit,
            LeadAllowance::Custom | LeadAllowance::Flexible => false,
        })
        .unwrap_or(Plan::Expert)
}

/// Recommended plan together with the estimated monthly spend and return.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PricingSummary {
    pub recommended_plan: Plan,

    /// Analyzed leads times the price per lead.
    pub est_monthly_investment: Decimal,

    /// Projected earnings from won projects.
    pub est_return: Decimal,

    /// Return divided by investment. `None` when nothing would be spent.
    pub roi: Option<Decimal>,
}

impl PricingSummary {
    /// Derives the pricing summary from a funnel result.
    ///
    /// # Example
    ///
    /// ```
    /// use rust_decimal_macros::dec;
    /// use leads_core::{Coverage, Plan, PricingConfig, PricingSummary, compute};
    ///
    /// let result = compute(3000, Coverage::new(100).unwrap(), dec!(40), dec!(1500));
    /// let summary = PricingSummary::from_result(&result, &PricingConfig::default());
    ///
    /// assert_eq!(summary.recommended_plan, Plan::Expert);
    /// assert_eq!(summary.est_monthly_investment, dec!(2400));
    /// assert_eq!(summary.roi, Some(dec!(14.375)));
    /// ```
    pub fn from_result(
        result: &CalculatorResult,
        config: &PricingConfig,
    ) -> Self {
        let recommended_plan = recommend(result.analyzed_jobs);
        let est_monthly_investment =
            Decimal::from(result.analyzed_jobs).saturating_mul(config.price_per_lead);
        let est_return = result.earnings;

        let roi = if est_monthly_investment.is_zero() {
            debug!("no analyzed leads; ROI undefined");
            None
        } else {
            Some(
                est_return
                    .checked_div(est_monthly_investment)
                    .unwrap_or(Decimal::MAX),
            )
        };

        Self {
            recommended_plan,
            est_monthly_investment,
            est_return,
            roi,
        }
    }
}
