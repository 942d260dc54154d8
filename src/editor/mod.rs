//! Redemption editor
//!
//! Headless counterpart of the admin "create / edit redemption" dialog.
//! The editor owns the form state and the plan catalogue, and talks to
//! the backend through [`RedemptionApi`] and to the operator through an
//! [`EditorHost`].
//!
//! State machine:
//!
//! ```text
//! Closed --open(None)-----> Creating --submit ok--> Closed
//! Closed --open(Some(id))-> Loading --> Editing --submit ok--> Closed
//! ```
//!
//! A failed submission leaves the editor in `Creating` / `Editing`.

mod form;
mod host;
mod plans;
mod submission;

pub use form::{
    field_messages, parse_int, quota_preset, FormMode, FormState, FormValues, DEFAULT_COUNT,
    DEFAULT_QUOTA, FULL_SPAN, HALF_SPAN, QUOTA_PRESETS,
};
pub use host::EditorHost;
pub use plans::{PlanCatalogue, PlanLoadError};
pub use submission::{normalize, truncate_name, SubmitOutcome};

use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

use crate::api::RedemptionApi;
use crate::i18n::{Catalog, Localizer, Message};
use crate::models::PlanOption;
use crate::quota::QuotaFormatter;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorState {
    Closed,
    Loading,
    Editing,
    Creating,
}

pub struct RedemptionEditor<H: EditorHost> {
    api: Arc<dyn RedemptionApi>,
    host: H,
    localizer: Box<dyn Localizer>,
    formatter: QuotaFormatter,
    state: EditorState,
    form: FormState,
    plans: PlanCatalogue,
    submitting: bool,
}

impl<H: EditorHost> RedemptionEditor<H> {
    pub fn new(api: Arc<dyn RedemptionApi>, host: H) -> Self {
        Self {
            api,
            host,
            localizer: Box::new(Catalog::default()),
            formatter: QuotaFormatter::default(),
            state: EditorState::Closed,
            form: FormState::new(FormMode::Create),
            plans: PlanCatalogue::new(),
            submitting: false,
        }
    }

    pub fn with_localizer(mut self, localizer: Box<dyn Localizer>) -> Self {
        self.localizer = localizer;
        self
    }

    pub fn with_formatter(mut self, formatter: QuotaFormatter) -> Self {
        self.formatter = formatter;
        self
    }

    pub fn state(&self) -> EditorState {
        self.state
    }

    pub fn is_open(&self) -> bool {
        self.state != EditorState::Closed
    }

    pub fn is_loading(&self) -> bool {
        self.state == EditorState::Loading || self.submitting
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    pub fn form(&self) -> &FormState {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut FormState {
        &mut self.form
    }

    pub fn plan_options(&self) -> &[PlanOption] {
        self.plans.options()
    }

    pub fn plans_loading(&self) -> bool {
        self.plans.is_loading()
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    pub fn into_host(self) -> H {
        self.host
    }

    /// Equivalent-amount hint for the current quota field
    pub fn quota_hint(&self) -> String {
        let quota = parse_int(&self.form.values().quota).unwrap_or(0);
        self.formatter.render_with_prompt(quota, self.localizer.as_ref())
    }

    /// Opens the editor: `None` creates a new redemption, `Some(id)` edits one.
    ///
    /// Every open refetches the plan list. A failed plan load is reported
    /// to the host and leaves the selector empty; it does not stop the
    /// editor from opening.
    ///
    /// Returns `false` when the record to edit could not be loaded; the
    /// editor is then in `Editing` with the create defaults.
    #[instrument(skip(self))]
    pub async fn open(&mut self, target: Option<i64>) -> bool {
        self.clear_in_flight();
        self.reload_plans().await;

        match target {
            Some(id) => {
                info!("Opening redemption editor: id={}", id);
                self.state = EditorState::Loading;
                self.form = FormState::new(FormMode::Edit { id });
                let loaded = self.load_record(id).await;
                self.state = EditorState::Editing;
                loaded
            }
            None => {
                info!("Opening redemption editor for a new redemption");
                self.form = FormState::new(FormMode::Create);
                self.state = EditorState::Creating;
                true
            }
        }
    }

    /// Refetches the plan options, notifying the host on failure
    pub async fn reload_plans(&mut self) {
        if let Err(e) = self.plans.load(self.api.as_ref()).await {
            let message = match e {
                PlanLoadError::Rejected(message) => message,
                PlanLoadError::Request(_) => self.localizer.text(Message::RequestFailed),
            };
            self.host.notify_error(&message);
        }
    }

    /// Cancels editing and hides the editor
    pub fn cancel(&mut self) {
        info!("Redemption editor cancelled");
        self.clear_in_flight();
        self.close();
    }

    /// Drops the busy flags left behind by a request future that was
    /// dropped before it completed
    fn clear_in_flight(&mut self) {
        if self.submitting || self.plans.is_loading() {
            debug!("Clearing abandoned request flags");
        }
        self.submitting = false;
        self.plans.abandon_load();
    }

    fn close(&mut self) {
        self.state = EditorState::Closed;
        self.host.close();
    }

    async fn load_record(&mut self, id: i64) -> bool {
        match self.api.get_redemption(id).await {
            Ok(envelope) if envelope.success => match envelope.data {
                Some(record) => {
                    self.form.load_record(&record);
                    true
                }
                None => {
                    warn!("Redemption {} returned without data", id);
                    let message = self.localizer.text(Message::RequestFailed);
                    self.host.notify_error(&message);
                    false
                }
            },
            Ok(envelope) => {
                warn!("Failed to load redemption {}: {}", id, envelope.message);
                self.host.notify_error(&envelope.message);
                false
            }
            Err(e) => {
                warn!("Failed to load redemption {}: {}", id, e);
                let message = format!("{}: {}", self.localizer.text(Message::RequestFailed), e);
                self.host.notify_error(&message);
                false
            }
        }
    }
}
