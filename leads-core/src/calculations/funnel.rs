//! Lead funnel and value-generated calculations.
//!
//! # Funnel Structure
//!
//! Each stage is the floor of the previous stage times a fixed conversion
//! ratio. Floors compound from stage to stage, so the order below is part of
//! the result.
//!
//! | Stage    | Derivation |
//! |----------|------------|
//! | Analyzed | floor(total jobs × coverage / 100) |
//! | Suitable | floor(analyzed × 13.25%) |
//! | Opened   | floor(suitable × 60%) |
//! | Replied  | floor(opened × 30%) |
//! | Won      | floor(replied × 33.33%) |
//!
//! # Value Generated
//!
//! | Figure             | Derivation |
//! |--------------------|------------|
//! | Earnings           | won × average project value |
//! | Saved connects     | (analyzed − suitable) × $3 |
//! | Saved time         | analyzed × 12 minutes |
//! | Saved time value   | saved minutes / 60 × hourly rate |
//! | Total value        | earnings + saved connects + saved time value |
//!
//! Dollar figures saturate at [`Decimal::MAX`] rather than overflowing, so
//! any positive rate pair yields a result.
//!
//! # Example
//!
//! ```
//! use rust_decimal_macros::dec;
//! use leads_core::{Coverage, compute};
//!
//! let result = compute(1000, Coverage::new(10).unwrap(), dec!(50), dec!(2000));
//!
//! assert_eq!(result.analyzed_jobs, 100);
//! assert_eq!(result.suitable_jobs, 13);
//! assert_eq!(result.total_value, dec!(1261));
//! ```

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, trace};

use crate::calculations::common::apply_ratio;
use crate::{CalculatorInput, CalculatorResult, Coverage, FunnelStage};

/// Errors raised when validating a [`FunnelConfig`].
#[derive(Debug, Error, PartialEq, Eq)]
pub enum FunnelConfigError {
    /// A conversion ratio fell outside `[0, 1]`.
    #[error("{stage} conversion ratio must be between 0 and 1, got {ratio}")]
    InvalidRatio { stage: FunnelStage, ratio: Decimal },

    /// The dollar value of a saved connect must be non-negative.
    #[error("connect value must be non-negative, got {0}")]
    NegativeConnectValue(Decimal),
}

/// Conversion ratios and unit values used by the funnel.
///
/// [`Default`] yields the ratios measured during the beta. Missing keys in a
/// configuration file fall back to the same defaults.
///
/// # Example
///
/// ```
/// use rust_decimal_macros::dec;
/// use leads_core::FunnelConfig;
///
/// let config = FunnelConfig::default();
///
/// assert_eq!(config.suitable_ratio, dec!(0.1325));
/// assert_eq!(config.minutes_per_lead, 12);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FunnelConfig {
    /// Share of analyzed leads worth applying to.
    pub suitable_ratio: Decimal,

    /// Share of suitable leads whose client opens the proposal.
    pub opened_ratio: Decimal,

    /// Share of opened proposals that receive a reply.
    pub replied_ratio: Decimal,

    /// Share of replied proposals that turn into won projects.
    pub won_ratio: Decimal,

    /// Dollar value of one connect not spent on an unsuitable lead.
    pub connect_value: Decimal,

    /// Minutes of proposal writing saved per analyzed lead.
    pub minutes_per_lead: u32,
}

impl Default for FunnelConfig {
    fn default() -> Self {
        Self {
            suitable_ratio: Decimal::new(1325, 4),
            opened_ratio: Decimal::new(6, 1),
            replied_ratio: Decimal::new(3, 1),
            won_ratio: Decimal::new(3333, 4),
            connect_value: Decimal::from(3),
            minutes_per_lead: 12,
        }
    }
}

impl FunnelConfig {
    /// Conversion ratio applied to enter `stage`.
    ///
    /// `Analyzed` has no fixed ratio; it is governed by coverage.
    pub fn ratio(
        &self,
        stage: FunnelStage,
    ) -> Option<Decimal> {
        match stage {
            FunnelStage::Analyzed => None,
            FunnelStage::Suitable => Some(self.suitable_ratio),
            FunnelStage::Opened => Some(self.opened_ratio),
            FunnelStage::Replied => Some(self.replied_ratio),
            FunnelStage::Won => Some(self.won_ratio),
        }
    }

    /// Validates the configuration values.
    ///
    /// # Errors
    ///
    /// Returns [`FunnelConfigError`] if any ratio is outside `[0, 1]` or the
    /// connect value is negative.
    ///
    /// # Example
    ///
    /// ```
    /// use rust_decimal_macros::dec;
    /// use leads_core::{FunnelConfig, FunnelConfigError, FunnelStage};
    ///
    /// let config = FunnelConfig {
    ///     opened_ratio: dec!(1.2),
    ///     ..FunnelConfig::default()
    /// };
    ///
    /// assert_eq!(
    ///     config.validate(),
    ///     Err(FunnelConfigError::InvalidRatio {
    ///         stage: FunnelStage::Opened,
    ///         ratio: dec!(1.2),
    ///     })
    /// );
    /// ```
    pub fn validate(&self) -> Result<(), FunnelConfigError> {
        for &stage in FunnelStage::all() {
            if let Some(ratio) = self.ratio(stage) {
                if ratio < Decimal::ZERO || ratio > Decimal::ONE {
                    return Err(FunnelConfigError::InvalidRatio { stage, ratio });
                }
            }
        }
        if self.connect_value < Decimal::ZERO {
            return Err(FunnelConfigError::NegativeConnectValue(
                self.connect_value,
            ));
        }
        Ok(())
    }
}

/// Calculator for the lead funnel and the value it generates.
///
/// Holds a validated [`FunnelConfig`]; every calculation is a pure function
/// of its arguments.
///
/// # Example
///
/// ```
/// use rust_decimal_macros::dec;
/// use leads_core::{Coverage, FunnelCalculator, FunnelConfig};
///
/// let calculator = FunnelCalculator::new(FunnelConfig::default()).unwrap();
/// let result = calculator.calculate(1000, Coverage::new(10).unwrap(), dec!(50), dec!(2000));
///
/// // 100 analyzed leads, 13 of them suitable
/// assert_eq!(result.saved_connects, dec!(261));
/// ```
#[derive(Debug, Clone, Default)]
pub struct FunnelCalculator {
    config: FunnelConfig,
}

impl FunnelCalculator {
    /// Creates a calculator after validating `config`.
    ///
    /// # Errors
    ///
    /// Returns [`FunnelConfigError`] if the configuration is invalid.
    pub fn new(config: FunnelConfig) -> Result<Self, FunnelConfigError> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &FunnelConfig {
        &self.config
    }

    /// Computes the funnel for a [`CalculatorInput`].
    pub fn calculate_input(
        &self,
        input: &CalculatorInput,
    ) -> CalculatorResult {
        self.calculate(
            input.total_jobs,
            input.coverage,
            input.economics.hourly_rate(),
            input.economics.average_project_price(),
        )
    }

    /// Computes the funnel and value generated.
    ///
    /// The economic inputs are not validated here; callers are expected to
    /// pass positive values (see [`EconomicInputs`](crate::EconomicInputs)).
    pub fn calculate(
        &self,
        total_jobs: u32,
        coverage: Coverage,
        hourly_rate: Decimal,
        average_project_price: Decimal,
    ) -> CalculatorResult {
        let analyzed_jobs = self.analyzed_jobs(total_jobs, coverage);
        let suitable_jobs = apply_ratio(analyzed_jobs, self.config.suitable_ratio);
        let opened_jobs = apply_ratio(suitable_jobs, self.config.opened_ratio);
        let replied_jobs = apply_ratio(opened_jobs, self.config.replied_ratio);
        let won_jobs = apply_ratio(replied_jobs, self.config.won_ratio);

        trace!(
            total_jobs,
            analyzed_jobs,
            suitable_jobs,
            opened_jobs,
            replied_jobs,
            won_jobs,
            "funnel stages"
        );

        let earnings = Decimal::from(won_jobs).saturating_mul(average_project_price);
        let saved_connects = self.saved_connects(analyzed_jobs, suitable_jobs);
        let saved_time_minutes = self.saved_time_minutes(analyzed_jobs);
        let saved_time_value = Self::saved_time_value(saved_time_minutes, hourly_rate);
        let total_value = earnings
            .saturating_add(saved_connects)
            .saturating_add(saved_time_value);

        debug!(
            coverage = coverage.percent(),
            analyzed_jobs,
            won_jobs,
            total_value = %total_value,
            "funnel computed"
        );

        CalculatorResult {
            analyzed_jobs,
            suitable_jobs,
            opened_jobs,
            replied_jobs,
            won_jobs,
            earnings,
            saved_connects,
            saved_time_minutes,
            saved_time_value,
            total_value,
        }
    }

    /// Leads analyzed at the given coverage, in exact integer arithmetic.
    fn analyzed_jobs(
        &self,
        total_jobs: u32,
        coverage: Coverage,
    ) -> u32 {
        let analyzed = u64::from(total_jobs) * u64::from(coverage.percent()) / 100;
        // coverage <= 100, so analyzed <= total_jobs
        u32::try_from(analyzed).unwrap_or(total_jobs)
    }

    fn saved_connects(
        &self,
        analyzed_jobs: u32,
        suitable_jobs: u32,
    ) -> Decimal {
        let skipped = analyzed_jobs.saturating_sub(suitable_jobs);
        Decimal::from(skipped).saturating_mul(self.config.connect_value)
    }

    fn saved_time_minutes(
        &self,
        analyzed_jobs: u32,
    ) -> u64 {
        u64::from(analyzed_jobs) * u64::from(self.config.minutes_per_lead)
    }

    fn saved_time_value(
        saved_time_minutes: u64,
        hourly_rate: Decimal,
    ) -> Decimal {
        (Decimal::from(saved_time_minutes) / Decimal::from(60)).saturating_mul(hourly_rate)
    }
}

/// Computes the funnel with the default conversion ratios.
pub fn compute(
    total_jobs: u32,
    coverage: Coverage,
    hourly_rate: Decimal,
    average_project_price: Decimal,
) -> CalculatorResult {
    FunnelCalculator::default().calculate(total_jobs, coverage, hourly_rate, average_project_price)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;
    use crate::EconomicInputs;

    fn coverage(pct: u8) -> Coverage {
        Coverage::new(pct).unwrap()
    }

    // =========================================================================
    // FunnelConfig::validate tests
    // =========================================================================

    #[test]
    fn validate_accepts_default_config() {
        assert_eq!(FunnelConfig::default().validate(), Ok(()));
    }

    #[test]
    fn validate_rejects_negative_ratio() {
        let config = FunnelConfig {
            won_ratio: dec!(-0.1),
            ..FunnelConfig::default()
        };

        assert_eq!(
            config.validate(),
            Err(FunnelConfigError::InvalidRatio {
                stage: FunnelStage::Won,
                ratio: dec!(-0.1),
            })
        );
    }

    #[test]
    fn validate_accepts_boundary_ratios() {
        let config = FunnelConfig {
            suitable_ratio: dec!(1),
            opened_ratio: dec!(0),
            ..FunnelConfig::default()
        };

        assert_eq!(config.validate(), Ok(()));
    }

    #[test]
    fn validate_rejects_negative_connect_value() {
        let config = FunnelConfig {
            connect_value: dec!(-3),
            ..FunnelConfig::default()
        };

        assert_eq!(
            config.validate(),
            Err(FunnelConfigError::NegativeConnectValue(dec!(-3)))
        );
    }

    #[test]
    fn new_refuses_invalid_config() {
        let config = FunnelConfig {
            suitable_ratio: dec!(2),
            ..FunnelConfig::default()
        };

        assert!(FunnelCalculator::new(config).is_err());
    }

    // =========================================================================
    // Funnel stage tests
    // =========================================================================

    #[test]
    fn reference_example_funnel_stages() {
        let result = compute(1000, coverage(10), dec!(50), dec!(2000));

        assert_eq!(result.analyzed_jobs, 100);
        assert_eq!(result.suitable_jobs, 13);
        assert_eq!(result.opened_jobs, 7);
        assert_eq!(result.replied_jobs, 2);
        assert_eq!(result.won_jobs, 0);
    }

    #[test]
    fn reference_example_value_generated() {
        let result = compute(1000, coverage(10), dec!(50), dec!(2000));

        assert_eq!(result.earnings, dec!(0));
        assert_eq!(result.saved_connects, dec!(261));
        assert_eq!(result.saved_time_minutes, 1200);
        assert_eq!(result.saved_time_value, dec!(1000));
        assert_eq!(result.total_value, dec!(1261));
    }

    #[test]
    fn full_coverage_produces_won_jobs() {
        // 3000 -> 397 -> 238 -> 71 -> 23
        let result = compute(3000, coverage(100), dec!(40), dec!(1500));

        assert_eq!(result.analyzed_jobs, 3000);
        assert_eq!(result.suitable_jobs, 397);
        assert_eq!(result.opened_jobs, 238);
        assert_eq!(result.replied_jobs, 71);
        assert_eq!(result.won_jobs, 23);
        assert_eq!(result.earnings, dec!(34500));
        assert_eq!(result.saved_connects, dec!(7809));
        assert_eq!(result.saved_time_minutes, 36000);
        assert_eq!(result.saved_time_value, dec!(24000));
        assert_eq!(result.total_value, dec!(66309));
    }

    #[test]
    fn analyzed_jobs_floors_partial_leads() {
        let result = compute(999, coverage(33), dec!(1), dec!(1));

        // 999 * 33 / 100 = 329.67
        assert_eq!(result.analyzed_jobs, 329);
    }

    #[test]
    fn zero_coverage_yields_zero_result() {
        let result = compute(2500, coverage(0), dec!(75), dec!(5000));

        assert_eq!(result, CalculatorResult::default());
    }

    #[test]
    fn zero_total_jobs_yields_zero_result() {
        let result = compute(0, coverage(100), dec!(75), dec!(5000));

        assert_eq!(result.analyzed_jobs, 0);
        assert_eq!(result.total_value, dec!(0));
    }

    #[test]
    fn saved_time_value_handles_fractional_hours() {
        // 7 analyzed leads -> 84 minutes -> 1.4 hours
        let result = compute(70, coverage(10), dec!(25), dec!(100));

        assert_eq!(result.saved_time_minutes, 84);
        assert_eq!(result.saved_time_value, dec!(35));
    }

    #[test]
    fn funnel_is_monotonic_across_inputs() {
        for total_jobs in (100..=3000).step_by(37) {
            for pct in 0..=100 {
                let result = compute(total_jobs, coverage(pct), dec!(10), dec!(10));

                assert!(result.analyzed_jobs <= total_jobs);
                assert_eq!(
                    result.analyzed_jobs,
                    total_jobs * u32::from(pct) / 100,
                    "analyzed mismatch for {total_jobs} at {pct}%"
                );
                assert!(result.suitable_jobs <= result.analyzed_jobs);
                assert!(result.opened_jobs <= result.suitable_jobs);
                assert!(result.replied_jobs <= result.opened_jobs);
                assert!(result.won_jobs <= result.replied_jobs);
                assert!(result.total_value >= Decimal::ZERO);
            }
        }
    }

    #[test]
    fn calculate_is_idempotent() {
        let calculator = FunnelCalculator::default();
        let first = calculator.calculate(1834, coverage(57), dec!(62.5), dec!(3100));
        let second = calculator.calculate(1834, coverage(57), dec!(62.5), dec!(3100));

        assert_eq!(first, second);
    }

    #[test]
    fn calculate_input_matches_calculate() {
        let calculator = FunnelCalculator::default();
        let input = CalculatorInput {
            total_jobs: 1200,
            coverage: coverage(45),
            economics: EconomicInputs::new(dec!(80), dec!(2500)).unwrap(),
        };

        assert_eq!(
            calculator.calculate_input(&input),
            calculator.calculate(1200, coverage(45), dec!(80), dec!(2500))
        );
    }

    #[test]
    fn huge_average_project_price_saturates_earnings() {
        let result = compute(3000, coverage(100), dec!(40), Decimal::MAX);

        assert_eq!(result.won_jobs, 23);
        assert_eq!(result.earnings, Decimal::MAX);
        assert_eq!(result.total_value, Decimal::MAX);
    }

    #[test]
    fn huge_hourly_rate_saturates_saved_time_value() {
        let result = compute(3000, coverage(100), Decimal::MAX, dec!(1500));

        assert_eq!(result.saved_time_value, Decimal::MAX);
        assert_eq!(result.earnings, dec!(34500));
        assert_eq!(result.total_value, Decimal::MAX);
    }

    #[test]
    fn custom_connect_value_scales_saved_connects() {
        let calculator = FunnelCalculator::new(FunnelConfig {
            connect_value: dec!(0.15),
            ..FunnelConfig::default()
        })
        .unwrap();

        let result = calculator.calculate(1000, coverage(10), dec!(50), dec!(2000));

        assert_eq!(result.saved_connects, dec!(13.05));
    }
}
