use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EconomicInputError {
    #[error("hourly rate must be positive, got {0}")]
    NonPositiveHourlyRate(Decimal),

    #[error("average project value must be positive, got {0}")]
    NonPositiveProjectPrice(Decimal),
}

/// The two economic parameters entered in the rates modal.
///
/// Both values are strictly positive; construction fails otherwise.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EconomicInputs {
    hourly_rate: Decimal,
    average_project_price: Decimal,
}

impl EconomicInputs {
    pub fn new(
        hourly_rate: Decimal,
        average_project_price: Decimal,
    ) -> Result<Self, EconomicInputError> {
        if hourly_rate <= Decimal::ZERO {
            return Err(EconomicInputError::NonPositiveHourlyRate(hourly_rate));
        }
        if average_project_price <= Decimal::ZERO {
            return Err(EconomicInputError::NonPositiveProjectPrice(
                average_project_price,
            ));
        }
        Ok(Self {
            hourly_rate,
            average_project_price,
        })
    }

    pub fn hourly_rate(&self) -> Decimal {
        self.hourly_rate
    }

    pub fn average_project_price(&self) -> Decimal {
        self.average_project_price
    }
}
