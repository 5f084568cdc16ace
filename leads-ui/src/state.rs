//! Calculator session state for the leads calculator UI.
//!
//! This module holds everything the widget keeps between user actions: the
//! submitted keyword, the simulated lead volume, the coverage slider, the
//! rates modal and the latest [`CalculatorResult`]. Recalculation is explicit:
//! each handler that changes an input re-invokes the calculator and notifies
//! subscribers.

use leads_core::{
    CalculatorInput, CalculatorResult, Coverage, EconomicInputs, FunnelCalculator,
    LeadVolumeSource,
};
use tracing::{debug, info};

use crate::utils::parse_economic_inputs;

/// Whether the calculator has received valid rates yet.
///
/// The only transition is `Collecting -> Ready`, on the first valid
/// confirmation of the rates modal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    #[default]
    Collecting,
    Ready(EconomicInputs),
}

impl Mode {
    pub fn is_ready(&self) -> bool {
        matches!(self, Self::Ready(_))
    }

    pub fn economics(&self) -> Option<EconomicInputs> {
        match self {
            Self::Ready(economics) => Some(*economics),
            Self::Collecting => None,
        }
    }
}

/// What a session handler did in response to a user action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionUpdate {
    /// The action had no effect (empty keyword, modal not open).
    Ignored,
    /// A lead volume was drawn and the rates modal is open.
    ModalOpened { total_jobs: u32 },
    /// The rates did not parse as positive numbers; the modal stays open.
    RatesRejected,
    ModalClosed,
    /// Coverage was stored without recalculating.
    CoverageStored(Coverage),
    /// A fresh result was computed and published to subscribers.
    Computed(CalculatorResult),
}

type Subscriber = Box<dyn FnMut(&CalculatorResult)>;

/// In-memory state of one calculator widget.
pub struct CalculatorSession {
    calculator: FunnelCalculator,
    lead_source: Box<dyn LeadVolumeSource>,
    keyword: String,
    total_jobs: u32,
    coverage: Coverage,
    mode: Mode,
    modal_open: bool,
    result: CalculatorResult,
    subscribers: Vec<Subscriber>,
}

impl CalculatorSession {
    pub fn new(
        calculator: FunnelCalculator,
        lead_source: Box<dyn LeadVolumeSource>,
        coverage: Coverage,
    ) -> Self {
        Self {
            calculator,
            lead_source,
            keyword: String::new(),
            total_jobs: 0,
            coverage,
            mode: Mode::Collecting,
            modal_open: false,
            result: CalculatorResult::default(),
            subscribers: Vec::new(),
        }
    }

    pub fn calculator(&self) -> &FunnelCalculator {
        &self.calculator
    }

    pub fn keyword(&self) -> &str {
        &self.keyword
    }

    /// Simulated monthly lead volume; zero until a keyword is submitted.
    pub fn total_jobs(&self) -> u32 {
        self.total_jobs
    }

    pub fn coverage(&self) -> Coverage {
        self.coverage
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn is_modal_open(&self) -> bool {
        self.modal_open
    }

    /// Latest computed result, or zeros before the first calculation.
    pub fn result(&self) -> &CalculatorResult {
        &self.result
    }

    /// The full calculator input, available once the session is ready.
    pub fn input(&self) -> Option<CalculatorInput> {
        self.mode.economics().map(|economics| CalculatorInput {
            total_jobs: self.total_jobs,
            coverage: self.coverage,
            economics,
        })
    }

    /// Registers a callback invoked with every freshly computed result.
    pub fn subscribe<F>(
        &mut self,
        subscriber: F,
    ) where
        F: FnMut(&CalculatorResult) + 'static,
    {
        self.subscribers.push(Box::new(subscriber));
    }

    /// Handles a keyword submission.
    ///
    /// Draws a new monthly lead volume and opens the rates modal. When the
    /// session is already ready the result follows the new volume at once.
    pub fn submit_keyword(
        &mut self,
        keyword: &str,
    ) -> SessionUpdate {
        if keyword.is_empty() {
            debug!("empty keyword ignored");
            return SessionUpdate::Ignored;
        }

        self.keyword = keyword.to_string();
        self.total_jobs = self.lead_source.simulate();
        self.modal_open = true;
        info!(keyword, total_jobs = self.total_jobs, "keyword submitted");

        if self.mode.is_ready() {
            self.recompute();
        }

        SessionUpdate::ModalOpened {
            total_jobs: self.total_jobs,
        }
    }

    /// Handles the modal's "Calculate" action.
    ///
    /// Invalid entries leave the modal open and the mode unchanged.
    pub fn confirm_rates(
        &mut self,
        hourly_rate: &str,
        average_project_price: &str,
    ) -> SessionUpdate {
        if !self.modal_open {
            debug!("rates confirmed without an open modal; ignored");
            return SessionUpdate::Ignored;
        }

        let Some(economics) = parse_economic_inputs(hourly_rate, average_project_price) else {
            debug!(hourly_rate, average_project_price, "rates rejected");
            return SessionUpdate::RatesRejected;
        };

        self.mode = Mode::Ready(economics);
        self.modal_open = false;
        info!(
            hourly_rate = %economics.hourly_rate(),
            average_project_price = %economics.average_project_price(),
            "calculator enabled"
        );

        SessionUpdate::Computed(self.recompute())
    }

    /// Closes the modal without touching the mode.
    pub fn cancel_modal(&mut self) -> SessionUpdate {
        if !self.modal_open {
            return SessionUpdate::Ignored;
        }
        self.modal_open = false;
        SessionUpdate::ModalClosed
    }

    /// Handles a coverage slider change.
    ///
    /// Recalculates only once the session is ready and a lead volume exists.
    pub fn set_coverage(
        &mut self,
        coverage: Coverage,
    ) -> SessionUpdate {
        self.coverage = coverage;

        if self.mode.is_ready() && self.total_jobs > 0 {
            SessionUpdate::Computed(self.recompute())
        } else {
            SessionUpdate::CoverageStored(coverage)
        }
    }

    fn recompute(&mut self) -> CalculatorResult {
        let Some(input) = self.input() else {
            return self.result.clone();
        };

        self.result = self.calculator.calculate_input(&input);
        for subscriber in &mut self.subscribers {
            subscriber(&self.result);
        }
        self.result.clone()
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use leads_core::FixedLeadVolume;
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    fn session(total_jobs: u32) -> CalculatorSession {
        CalculatorSession::new(
            FunnelCalculator::default(),
            Box::new(FixedLeadVolume(total_jobs)),
            Coverage::DEFAULT,
        )
    }

    fn ready_session(total_jobs: u32) -> CalculatorSession {
        let mut session = session(total_jobs);
        session.submit_keyword("rust");
        session.confirm_rates("50", "2000");
        session
    }

    #[test]
    fn new_session_is_collecting_with_zero_result() {
        let session = session(1000);

        assert_eq!(session.mode(), Mode::Collecting);
        assert_eq!(session.total_jobs(), 0);
        assert_eq!(session.coverage(), Coverage::DEFAULT);
        assert_eq!(session.result(), &CalculatorResult::default());
        assert!(!session.is_modal_open());
    }

    #[test]
    fn empty_keyword_is_ignored() {
        let mut session = session(1000);

        assert_eq!(session.submit_keyword(""), SessionUpdate::Ignored);
        assert!(!session.is_modal_open());
        assert_eq!(session.total_jobs(), 0);
    }

    #[test]
    fn keyword_draws_volume_and_opens_modal() {
        let mut session = session(1000);

        let update = session.submit_keyword("logo design");

        assert_eq!(update, SessionUpdate::ModalOpened { total_jobs: 1000 });
        assert!(session.is_modal_open());
        assert_eq!(session.keyword(), "logo design");
        assert_eq!(session.mode(), Mode::Collecting);
    }

    #[test]
    fn valid_rates_enable_calculator() {
        let mut session = session(1000);
        session.submit_keyword("rust");

        let update = session.confirm_rates("50", "2000");

        let SessionUpdate::Computed(result) = &update else {
            panic!("expected a computed result, got {update:?}");
        };
        assert_eq!(result.total_value, dec!(1261));
        assert!(session.mode().is_ready());
        assert!(!session.is_modal_open());
    }

    #[test]
    fn invalid_rates_keep_modal_open_and_calculator_disabled() {
        for (hourly, project) in [("0", "2000"), ("-5", "2000"), ("50", "abc")] {
            let mut session = session(1000);
            session.submit_keyword("rust");

            let update = session.confirm_rates(hourly, project);

            assert_eq!(update, SessionUpdate::RatesRejected);
            assert!(session.is_modal_open());
            assert_eq!(session.mode(), Mode::Collecting);
            assert_eq!(session.result(), &CalculatorResult::default());
        }
    }

    #[test]
    fn confirm_without_modal_is_ignored() {
        let mut session = session(1000);

        assert_eq!(session.confirm_rates("50", "2000"), SessionUpdate::Ignored);
        assert_eq!(session.mode(), Mode::Collecting);
    }

    #[test]
    fn cancel_closes_modal_without_enabling() {
        let mut session = session(1000);
        session.submit_keyword("rust");

        assert_eq!(session.cancel_modal(), SessionUpdate::ModalClosed);
        assert!(!session.is_modal_open());
        assert_eq!(session.mode(), Mode::Collecting);
        assert_eq!(session.cancel_modal(), SessionUpdate::Ignored);
    }

    #[test]
    fn coverage_before_ready_is_stored_only() {
        let mut session = session(1000);
        let coverage = Coverage::new(40).unwrap();

        assert_eq!(
            session.set_coverage(coverage),
            SessionUpdate::CoverageStored(coverage)
        );
        assert_eq!(session.coverage(), coverage);
        assert_eq!(session.result(), &CalculatorResult::default());
    }

    #[test]
    fn coverage_after_ready_recomputes_without_redrawing() {
        let mut session = ready_session(1000);

        let update = session.set_coverage(Coverage::new(50).unwrap());

        let SessionUpdate::Computed(result) = &update else {
            panic!("expected a computed result, got {update:?}");
        };
        assert_eq!(result.analyzed_jobs, 500);
        assert_eq!(session.total_jobs(), 1000);
    }

    #[test]
    fn resubmitting_keyword_stays_ready_and_follows_new_volume() {
        let mut session = ready_session(1000);

        session.submit_keyword("another keyword");

        assert!(session.mode().is_ready());
        assert!(session.is_modal_open());
        assert_eq!(session.result().analyzed_jobs, 100);
    }

    #[test]
    fn subscribers_receive_every_recompute() {
        let mut session = session(1000);
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        session.subscribe(move |result| sink.borrow_mut().push(result.analyzed_jobs));

        session.set_coverage(Coverage::new(20).unwrap());
        session.submit_keyword("rust");
        session.confirm_rates("50", "2000");
        session.set_coverage(Coverage::new(30).unwrap());
        session.set_coverage(Coverage::new(30).unwrap());

        assert_eq!(*seen.borrow(), vec![200, 300, 300]);
    }

    #[test]
    fn input_is_available_only_when_ready() {
        let mut session = session(1000);
        assert_eq!(session.input(), None);

        session.submit_keyword("rust");
        session.confirm_rates("50", "2000");

        let input = session.input().unwrap();
        assert_eq!(input.total_jobs, 1000);
        assert_eq!(input.economics.hourly_rate(), dec!(50));
    }
}
