//! Submission workflow: normalization, dispatch and post-submit effects

use tracing::{info, instrument, warn};
use validator::ValidationErrors;

use super::form::{parse_int, FormState};
use super::{EditorHost, EditorState, PlanCatalogue, RedemptionEditor};
use crate::error::ConsoleError;
use crate::export::{codes_to_text, export_file_name};
use crate::i18n::{Localizer, Message};
use crate::models::redemption::REDEMPTION_NAME_MAX_CHARS;
use crate::models::RedemptionPayload;
use crate::quota::QuotaFormatter;
use crate::ConsoleResult;

/// Result of one submit action
#[derive(Debug)]
pub enum SubmitOutcome {
    /// Blocked by field validation, nothing was sent
    Invalid(ValidationErrors),
    /// The backend refused the request or could not be reached
    Rejected { message: String },
    Updated,
    Created {
        name: String,
        codes: Vec<String>,
        /// Whether the operator accepted the export
        exported: bool,
    },
}

impl SubmitOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, SubmitOutcome::Updated | SubmitOutcome::Created { .. })
    }
}

/// Trims and caps a name at the maximum number of code points
pub fn truncate_name(value: &str) -> String {
    let capped: String = value.trim().chars().take(REDEMPTION_NAME_MAX_CHARS).collect();
    capped.trim_end().to_string()
}

/// Builds the request body from the current form values
pub fn normalize(
    form: &FormState,
    plans: &PlanCatalogue,
    formatter: &QuotaFormatter,
    localizer: &dyn Localizer,
) -> RedemptionPayload {
    let values = form.values();

    let plan_id = values.plan_id.filter(|id| *id > 0).unwrap_or(0);
    let quota = if plan_id > 0 {
        0
    } else {
        parse_int(&values.quota).unwrap_or(0)
    };

    let name = if !form.is_edit() && values.name.trim().is_empty() {
        default_name(plan_id, quota, plans, formatter, localizer)
    } else {
        truncate_name(&values.name)
    };

    let count = parse_int(&values.count).unwrap_or(0);
    let expired_time = values.expired_time.map(|at| at.timestamp()).unwrap_or(0);

    RedemptionPayload {
        id: form.editing_id(),
        name,
        quota,
        plan_id,
        count,
        expired_time,
        status: form.retained_status().filter(|_| form.is_edit()),
    }
}

fn default_name(
    plan_id: i64,
    quota: i64,
    plans: &PlanCatalogue,
    formatter: &QuotaFormatter,
    localizer: &dyn Localizer,
) -> String {
    if plan_id <= 0 {
        return formatter.render(quota);
    }

    let fallback = localizer.text(Message::SubscriptionPlan);
    let name = truncate_name(plans.label_for(plan_id).unwrap_or(&fallback));
    if name.is_empty() {
        fallback
    } else {
        name
    }
}

impl<H: EditorHost> RedemptionEditor<H> {
    /// Validates, normalizes and sends the form; exactly one API call per
    /// accepted submission
    #[instrument(skip(self))]
    pub async fn submit(&mut self) -> ConsoleResult<SubmitOutcome> {
        self.clear_in_flight();
        if !matches!(self.state, EditorState::Creating | EditorState::Editing) {
            return Err(ConsoleError::InvalidInput(format!(
                "editor is not ready for submission (state: {:?})",
                self.state
            )));
        }

        if let Err(errors) = self.form.validate(self.localizer.as_ref()) {
            info!("Submission blocked by validation");
            return Ok(SubmitOutcome::Invalid(errors));
        }

        let payload = normalize(
            &self.form,
            &self.plans,
            &self.formatter,
            self.localizer.as_ref(),
        );

        self.submitting = true;
        let outcome = if payload.is_update() {
            self.send_update(&payload).await
        } else {
            self.send_create(&payload).await
        };
        self.submitting = false;

        Ok(outcome)
    }

    async fn send_update(&mut self, payload: &RedemptionPayload) -> SubmitOutcome {
        let envelope = match self.api.update_redemption(payload).await {
            Ok(envelope) => envelope,
            Err(e) => return self.reject_transport(e.to_string()),
        };

        if !envelope.success {
            return self.reject(envelope.message);
        }

        let message = self.localizer.text(Message::RedemptionUpdated);
        self.host.notify_success(&message);
        self.host.refresh();
        self.close();

        SubmitOutcome::Updated
    }

    async fn send_create(&mut self, payload: &RedemptionPayload) -> SubmitOutcome {
        let envelope = match self.api.create_redemption(payload).await {
            Ok(envelope) => envelope,
            Err(e) => return self.reject_transport(e.to_string()),
        };

        if !envelope.success {
            return self.reject(envelope.message);
        }

        let message = self.localizer.text(Message::RedemptionCreated);
        self.host.notify_success(&message);
        self.host.refresh();
        self.form.reset();
        self.close();

        let codes = envelope.data.unwrap_or_default();
        let exported = !codes.is_empty() && self.offer_export(&payload.name, &codes);

        SubmitOutcome::Created {
            name: payload.name.clone(),
            codes,
            exported,
        }
    }

    /// Asks the operator whether to save the generated codes
    fn offer_export(&mut self, name: &str, codes: &[String]) -> bool {
        let title = self.localizer.text(Message::DownloadTitle);
        let content = [
            self.localizer.text(Message::DownloadPrompt),
            self.localizer.text(Message::DownloadHint),
        ];

        if !self.host.confirm(&title, &content) {
            return false;
        }

        match self
            .host
            .download_text(&export_file_name(name), &codes_to_text(codes))
        {
            Ok(()) => true,
            Err(e) => {
                warn!("Code export failed: {}", e);
                self.host.notify_error(&e.to_string());
                false
            }
        }
    }

    fn reject(&mut self, message: String) -> SubmitOutcome {
        warn!("Redemption submission rejected: {}", message);
        self.host.notify_error(&message);
        SubmitOutcome::Rejected { message }
    }

    fn reject_transport(&mut self, detail: String) -> SubmitOutcome {
        let message = format!("{}: {}", self.localizer.text(Message::RequestFailed), detail);
        self.reject(message)
    }
}
