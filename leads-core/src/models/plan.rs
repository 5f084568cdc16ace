use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::format::{format_count, format_currency};

/// Subscription plans offered next to the calculator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Plan {
    Starter,
    Agency,
    Expert,
    PayAsYouGo,
}

/// Monthly price of a plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlanPrice {
    Fixed(Decimal),
    Custom,
    Flexible,
}

/// Number of analyzed leads included in a plan each month.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LeadAllowance {
    Limited(u32),
    Custom,
    Flexible,
}

impl Plan {
    /// The full catalog, in the order it is presented.
    pub fn all() -> &'static [Plan] {
        &[Plan::Starter, Plan::Agency, Plan::Expert, Plan::PayAsYouGo]
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Starter => "Starter Plan",
            Self::Agency => "Agency Plan",
            Self::Expert => "Lead Gen Expert",
            Self::PayAsYouGo => "Pay-As-You-Go",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Self::Starter => "Solo freelancers",
            Self::Agency => "Growing agencies",
            Self::Expert => "Multi-client pros",
            Self::PayAsYouGo => "Flexible users",
        }
    }

    pub fn price(&self) -> PlanPrice {
        match self {
            Self::Starter => PlanPrice::Fixed(Decimal::from(250)),
            Self::Agency => PlanPrice::Fixed(Decimal::from(1250)),
            Self::Expert => PlanPrice::Custom,
            Self::PayAsYouGo => PlanPrice::Flexible,
        }
    }

    pub fn leads(&self) -> LeadAllowance {
        match self {
            Self::Starter => LeadAllowance::Limited(500),
            Self::Agency => LeadAllowance::Limited(2500),
            Self::Expert => LeadAllowance::Custom,
            Self::PayAsYouGo => LeadAllowance::Flexible,
        }
    }
}

impl fmt::Display for Plan {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl fmt::Display for PlanPrice {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        match self {
            Self::Fixed(amount) => write!(f, "{}/mo", format_currency(*amount)),
            Self::Custom => f.write_str("Custom"),
            Self::Flexible => f.write_str("Flexible"),
        }
    }
}

impl fmt::Display for LeadAllowance {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        match self {
            Self::Limited(leads) => write!(f, "{} leads", format_count(u64::from(*leads))),
            Self::Custom => f.write_str("Custom"),
            Self::Flexible => f.write_str("Flexible"),
        }
    }
}
