use leads_core::EconomicInputs;
use rust_decimal::Decimal;
use thiserror::Error;

/// Error returned when modal text cannot be used as a money amount.
#[derive(Debug, Error)]
pub enum ParseDecimalError {
    #[error("value is required")]
    Empty,

    #[error("invalid decimal '{input}': {source}")]
    Invalid {
        input: String,
        #[source]
        source: rust_decimal::Error,
    },

    #[error("value must be positive, got {0}")]
    NotPositive(Decimal),
}

/// Normalizes input for decimal parsing: trims whitespace, drops a leading `$`
/// and removes commas (thousands separator).
fn normalize_decimal_input(s: &str) -> String {
    let trimmed = s.trim();
    trimmed
        .strip_prefix('$')
        .unwrap_or(trimmed)
        .trim_start()
        .replace(',', "")
}

/// Parses a string into a [`Decimal`].
///
/// Handles comma as thousands separator (e.g. `"1,234.56"`) and an optional
/// dollar sign. Empty input is an error.
pub fn parse_decimal(s: &str) -> Result<Decimal, ParseDecimalError> {
    let normalized = normalize_decimal_input(s);
    if normalized.is_empty() {
        return Err(ParseDecimalError::Empty);
    }
    normalized.parse().map_err(|e| {
        tracing::debug!(input = %s, "invalid decimal: {}", e);
        ParseDecimalError::Invalid {
            input: s.to_string(),
            source: e,
        }
    })
}

/// Parses a strictly positive amount, as required by the rates modal.
pub fn parse_positive_decimal(s: &str) -> Result<Decimal, ParseDecimalError> {
    let value = parse_decimal(s)?;
    if value <= Decimal::ZERO {
        return Err(ParseDecimalError::NotPositive(value));
    }
    Ok(value)
}

/// Parses the hourly rate and average project value entered in the modal.
///
/// Returns `None` when either entry is missing, non-numeric or not positive.
pub fn parse_economic_inputs(
    hourly_rate: &str,
    average_project_price: &str,
) -> Option<EconomicInputs> {
    let hourly_rate = parse_positive_decimal(hourly_rate).ok()?;
    let average_project_price = parse_positive_decimal(average_project_price).ok()?;
    EconomicInputs::new(hourly_rate, average_project_price).ok()
}
