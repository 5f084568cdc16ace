use serde::{Deserialize, Serialize};

use crate::{Coverage, EconomicInputs};

/// Everything the funnel calculation depends on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalculatorInput {
    /// Simulated monthly lead volume for the submitted keyword.
    pub total_jobs: u32,
    pub coverage: Coverage,
    pub economics: EconomicInputs,
}
