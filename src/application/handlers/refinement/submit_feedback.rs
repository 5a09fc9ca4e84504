//! SubmitFeedbackHandler - records a user's verdict on a refinement.

use std::sync::Arc;

use tracing::info;

use crate::application::AccessGate;
use crate::domain::document::{DocumentError, Refinement};
use crate::domain::foundation::{RefinementId, UserId};
use crate::ports::RefinementRepository;

/// Command to set feedback on a refinement.
///
/// Both fields overwrite what is stored; `None` clears.
#[derive(Debug, Clone)]
pub struct SubmitFeedbackCommand {
    pub refinement_id: RefinementId,
    pub user_id: UserId,
    pub feedback: Option<String>,
    pub comment: Option<String>,
}

pub struct SubmitFeedbackHandler {
    gate: AccessGate,
    refinements: Arc<dyn RefinementRepository>,
}

impl SubmitFeedbackHandler {
    pub fn new(gate: AccessGate, refinements: Arc<dyn RefinementRepository>) -> Self {
        Self { gate, refinements }
    }

    pub async fn handle(&self, cmd: SubmitFeedbackCommand) -> Result<Refinement, DocumentError> {
        let (mut refinement, _) = self
            .gate
            .refinement_for(&cmd.refinement_id, &cmd.user_id)
            .await?;

        refinement.record_feedback(cmd.feedback, cmd.comment);
        self.refinements.update_feedback(&refinement).await?;

        info!(refinement_id = %refinement.id(), "Refinement feedback recorded");
        Ok(refinement)
    }
}
