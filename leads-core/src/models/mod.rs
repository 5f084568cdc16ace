mod calculator_input;
mod calculator_result;
mod coverage;
mod economic_inputs;
mod funnel_stage;
mod plan;

pub use calculator_input::CalculatorInput;
pub use calculator_result::CalculatorResult;
pub use coverage::{Coverage, CoverageError};
pub use economic_inputs::{EconomicInputError, EconomicInputs};
pub use funnel_stage::FunnelStage;
pub use plan::{LeadAllowance, Plan, PlanPrice};
