pub mod app;
pub mod config;
pub mod logging;
pub mod report;
pub mod state;
pub mod utils;

pub use app::{build_session, run_interactive, run_once};
pub use config::AppConfig;
pub use state::{CalculatorSession, Mode, SessionUpdate};
