//! Text rendering of the calculator widget.

use std::fmt;

use leads_core::calculations::common::round_half_up;
use leads_core::format::{format_count, format_currency, format_duration, format_percent};
use leads_core::{FunnelStage, Plan, PricingConfig, PricingSummary};

use crate::state::CalculatorSession;

pub const TITLE: &str = "Lancer Leads Calculator";

const LABEL_WIDTH: usize = 18;
const VALUE_WIDTH: usize = 14;

/// The whole widget for one session state, rendered through [`fmt::Display`].
pub struct Report<'a> {
    session: &'a CalculatorSession,
    pricing: &'a PricingConfig,
}

impl<'a> Report<'a> {
    pub fn new(
        session: &'a CalculatorSession,
        pricing: &'a PricingConfig,
    ) -> Self {
        Self { session, pricing }
    }
}

impl fmt::Display for Report<'_> {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        write_report(f, self.session, self.pricing)
    }
}

/// Renders the whole widget for the current session state.
pub fn render_report(
    session: &CalculatorSession,
    pricing: &PricingConfig,
) -> String {
    Report::new(session, pricing).to_string()
}

fn write_report(
    out: &mut fmt::Formatter<'_>,
    session: &CalculatorSession,
    pricing: &PricingConfig,
) -> fmt::Result {
    writeln!(out, "{TITLE}")?;
    writeln!(out, "{}", "=".repeat(TITLE.len()))?;

    if !session.keyword().is_empty() {
        writeln!(out, "Keyword: {}", session.keyword())?;
    }
    if session.total_jobs() > 0 {
        writeln!(
            out,
            "Monthly Forecast: {} leads",
            format_count(u64::from(session.total_jobs()))
        )?;
    }

    let ready = session.mode().is_ready();
    if !ready {
        writeln!(out)?;
        writeln!(out, "(calculator disabled until your rates are entered)")?;
    }

    writeln!(out)?;
    writeln!(out, "Coverage: {}", session.coverage())?;

    write_funnel(out, session)?;
    write_value(out, session)?;

    if ready {
        write_pricing(out, session, pricing)?;
    }
    Ok(())
}

fn write_row(
    out: &mut fmt::Formatter<'_>,
    label: &str,
    value: &str,
    subtext: &str,
) -> fmt::Result {
    writeln!(
        out,
        "  {label:<LABEL_WIDTH$}{value:>VALUE_WIDTH$}   {subtext}"
    )
}

fn write_funnel(
    out: &mut fmt::Formatter<'_>,
    session: &CalculatorSession,
) -> fmt::Result {
    let result = session.result();
    let config = session.calculator().config();

    writeln!(out)?;
    writeln!(out, "Lead Funnel")?;
    for &stage in FunnelStage::all() {
        let subtext = match config.ratio(stage) {
            Some(ratio) => format!("{} conversion", format_percent(ratio)),
            None => format!("{} coverage", session.coverage()),
        };
        let count = format_count(u64::from(result.stage_count(stage)));
        write_row(out, stage.label(), &count, &subtext)?;
    }
    Ok(())
}

fn write_value(
    out: &mut fmt::Formatter<'_>,
    session: &CalculatorSession,
) -> fmt::Result {
    let result = session.result();
    let config = session.calculator().config();
    let average_project = session
        .mode()
        .economics()
        .map(|economics| economics.average_project_price())
        .unwrap_or_default();

    writeln!(out)?;
    writeln!(out, "Value Generated")?;
    write_row(
        out,
        "Won Deals Value",
        &format_currency(result.earnings),
        &format!("Avg. project: {}", format_currency(average_project)),
    )?;
    write_row(
        out,
        "Connects Saved",
        &format_currency(result.saved_connects),
        &format!("{} per connect", format_currency(config.connect_value)),
    )?;
    write_row(
        out,
        "Time Saved",
        &format_duration(result.saved_time_minutes),
        &format!("Value: {}", format_currency(result.saved_time_value)),
    )?;
    write_row(
        out,
        "Total Value",
        &format_currency(result.total_value),
        "All benefits combined",
    )
}

fn write_pricing(
    out: &mut fmt::Formatter<'_>,
    session: &CalculatorSession,
    pricing: &PricingConfig,
) -> fmt::Result {
    let summary = PricingSummary::from_result(session.result(), pricing);
    let plan = summary.recommended_plan;

    writeln!(out)?;
    writeln!(
        out,
        "You're investing {} and we're projecting {} returns.",
        format_currency(summary.est_monthly_investment),
        format_currency(summary.est_return)
    )?;
    writeln!(
        out,
        "Pay only for what you use at {} per analyzed lead.",
        format_currency(pricing.price_per_lead)
    )?;
    writeln!(
        out,
        "Recommended plan: {} ({}, {}, {})",
        plan.name(),
        plan.description(),
        plan.price(),
        plan.leads()
    )?;
    match summary.roi {
        Some(roi) => writeln!(out, "Estimated ROI: {:.2}x", round_half_up(roi))?,
        None => writeln!(out, "Estimated ROI: n/a")?,
    }

    writeln!(out)?;
    writeln!(out, "Plans")?;
    for &offer in Plan::all() {
        let marker = if offer == plan { '*' } else { ' ' };
        writeln!(
            out,
            "{marker} {:<LABEL_WIDTH$}{:>VALUE_WIDTH$}   {}, {}",
            offer.name(),
            offer.price().to_string(),
            offer.leads(),
            offer.description()
        )?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use leads_core::{Coverage, FixedLeadVolume, FunnelCalculator};

    use super::*;

    fn session() -> CalculatorSession {
        CalculatorSession::new(
            FunnelCalculator::default(),
            Box::new(FixedLeadVolume(1000)),
            Coverage::DEFAULT,
        )
    }

    #[test]
    fn disabled_report_hides_pricing() {
        let mut session = session();
        session.submit_keyword("rust");

        let report = render_report(&session, &PricingConfig::default());

        assert!(report.contains("Monthly Forecast: 1,000 leads"));
        assert!(report.contains("calculator disabled"));
        assert!(!report.contains("You're investing"));
    }

    #[test]
    fn ready_report_shows_funnel_value_and_pricing() {
        let mut session = session();
        session.submit_keyword("rust");
        session.confirm_rates("50", "2000");

        let report = render_report(&session, &PricingConfig::default());

        assert!(report.contains("Coverage: 10%"));
        assert!(report.contains("13.25% conversion"));
        assert!(report.contains("33.33% conversion"));
        assert!(report.contains("$261.00"));
        assert!(report.contains("2d 4h"));
        assert!(report.contains("Value: $1,000.00"));
        assert!(report.contains("$1,261.00"));
        assert!(report.contains("Avg. project: $2,000.00"));
        assert!(report.contains("You're investing $80.00 and we're projecting $0.00 returns."));
        assert!(report.contains("Pay only for what you use at $0.80 per analyzed lead."));
        assert!(report.contains("Recommended plan: Starter Plan"));
        assert!(report.contains("Estimated ROI: 0.00x"));
    }

    #[test]
    fn ready_report_lists_catalog_with_recommendation_marked() {
        let mut session = session();
        session.submit_keyword("rust");
        session.confirm_rates("50", "2000");

        let report = render_report(&session, &PricingConfig::default());
        let marked: Vec<&str> = report
            .lines()
            .filter(|line| line.starts_with('*'))
            .collect();

        assert_eq!(marked.len(), 1);
        assert!(marked[0].contains("Starter Plan"));
        assert!(marked[0].contains("$250.00/mo"));
        assert!(report.contains("Pay-As-You-Go"));
        assert!(report.contains("Flexible, Flexible users"));
    }

    #[test]
    fn report_display_matches_rendered_string() {
        let mut session = session();
        session.submit_keyword("rust");

        let pricing = PricingConfig::default();

        assert_eq!(
            Report::new(&session, &pricing).to_string(),
            render_report(&session, &pricing)
        );
    }

    #[test]
    fn zero_coverage_reports_undefined_roi() {
        let mut session = session();
        session.submit_keyword("rust");
        session.confirm_rates("50", "2000");
        session.set_coverage(Coverage::new(0).unwrap());

        let report = render_report(&session, &PricingConfig::default());

        assert!(report.contains("Estimated ROI: n/a"));
    }
}
