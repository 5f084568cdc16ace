use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FunnelStage {
    Analyzed,
    Suitable,
    Opened,
    Replied,
    Won,
}

impl FunnelStage {
    /// Stages in funnel order, widest first.
    pub fn all() -> &'static [FunnelStage] {
        &[
            FunnelStage::Analyzed,
            FunnelStage::Suitable,
            FunnelStage::Opened,
            FunnelStage::Replied,
            FunnelStage::Won,
        ]
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Analyzed => "Analyzed",
            Self::Suitable => "Suitable",
            Self::Opened => "Opened",
            Self::Replied => "Replied",
            Self::Won => "Won",
        }
    }
}

impl fmt::Display for FunnelStage {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.write_str(self.label())
    }
}
