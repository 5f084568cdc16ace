use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::FunnelStage;

/// Derived funnel counts and value figures.
///
/// The zero value is what the widget shows before a calculation has run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalculatorResult {
    pub analyzed_jobs: u32,
    pub suitable_jobs: u32,
    pub opened_jobs: u32,
    pub replied_jobs: u32,
    pub won_jobs: u32,

    /// Won jobs times the average project value.
    pub earnings: Decimal,
    /// Connects not spent on unsuitable leads, in dollars.
    pub saved_connects: Decimal,
    pub saved_time_minutes: u64,
    /// Saved time valued at the user's hourly rate.
    pub saved_time_value: Decimal,
    pub total_value: Decimal,
}

impl CalculatorResult {
    /// Size of the given funnel stage.
    pub fn stage_count(
        &self,
        stage: FunnelStage,
    ) -> u32 {
        match stage {
            FunnelStage::Analyzed => self.analyzed_jobs,
            FunnelStage::Suitable => self.suitable_jobs,
            FunnelStage::Opened => self.opened_jobs,
            FunnelStage::Replied => self.replied_jobs,
            FunnelStage::Won => self.won_jobs,
        }
    }
}
