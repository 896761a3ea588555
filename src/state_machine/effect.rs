//! Effects produced by state transitions

use crate::questions::Presentation;
use crate::report::GameReport;

/// Effects to be executed after a state transition
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Show or play a question through the rendering layer
    Present(Presentation),

    /// Send final game metrics to the results service
    ReportResult(GameReport),
}

impl Effect {
    pub fn present(presentation: &Presentation) -> Self {
        Effect::Present(presentation.clone())
    }
}
