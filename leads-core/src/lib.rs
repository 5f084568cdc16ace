pub mod calculations;
pub mod format;
pub mod models;
pub mod simulation;

pub use calculations::{
    FunnelCalculator, FunnelConfig, FunnelConfigError, PricingConfig, PricingConfigError,
    PricingSummary, compute, recommend,
};
pub use models::*;
pub use simulation::{FixedLeadVolume, LeadVolumeSource, RandomLeadVolume};
