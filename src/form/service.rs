use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tokio::time::Instant;
use tracing::{debug, error, info, info_span, instrument, warn, Instrument};

use super::state::{DismissReason, Field, FormState, FormView, RequestKind};
use crate::api::UserApi;
use crate::clients::FormClient;
use crate::config::FormConfig;
use crate::domain::{UserPayload, UserRecord};
use crate::host::OnSave;
use crate::messages::{FormRequest, ServiceResponse, SubmissionOutcome, SubmitStatus};

struct InFlight {
    submission: u64,
    handle: JoinHandle<()>,
}

/// The form's single writer.
///
/// Every transition (field edits, record changes, submissions, network
/// results, notification timers) is applied here, one event at a time.
/// Requests run in spawned tasks that report back through a channel owned by
/// this loop, so once the loop is gone their results go nowhere.
pub struct FormService {
    receiver: mpsc::Receiver<FormRequest>,
    completions: mpsc::Receiver<SubmissionOutcome>,
    completions_tx: mpsc::Sender<SubmissionOutcome>,
    views: watch::Sender<FormView>,
    state: FormState,
    api: Arc<dyn UserApi>,
    on_save: Arc<dyn OnSave>,
    auto_hide: Option<Duration>,
    hide_at: Option<Instant>,
    in_flight: Option<InFlight>,
    next_submission: u64,
}

impl FormService {
    pub fn new(
        config: &FormConfig,
        api: Arc<dyn UserApi>,
        on_save: Arc<dyn OnSave>,
        user: Option<Arc<UserRecord>>,
    ) -> (Self, FormClient) {
        let (sender, receiver) = mpsc::channel(config.buffer_size());
        let (completions_tx, completions) = mpsc::channel(config.buffer_size());
        let state = FormState::new(user);
        let (views, view_rx) = watch::channel(state.view());
        let service = Self {
            receiver,
            completions,
            completions_tx,
            views,
            state,
            api,
            on_save,
            auto_hide: config.notification_auto_hide(),
            hide_at: None,
            in_flight: None,
            next_submission: 1,
        };
        (service, FormClient::new(sender, view_rx))
    }

    /// Runs until [`FormClient::unmount`] is called or every client is dropped.
    #[instrument(name = "form_service", skip(self))]
    pub async fn run(mut self) {
        info!("FormService starting");

        loop {
            let hide_at = self.hide_at;
            tokio::select! {
                msg = self.receiver.recv() => match msg {
                    Some(FormRequest::Unmount) => {
                        info!("FormService unmounting");
                        break;
                    }
                    Some(msg) => self.handle_request(msg),
                    None => {
                        debug!("All clients dropped");
                        break;
                    }
                },
                Some(outcome) = self.completions.recv() => {
                    self.handle_submission_outcome(outcome);
                }
                () = notification_deadline(hide_at) => {
                    self.handle_auto_hide();
                }
            }
        }

        if let Some(in_flight) = self.in_flight.take() {
            warn!(submission = in_flight.submission, "Abandoning outstanding submission");
            in_flight.handle.abort();
        }
        info!("FormService stopped");
    }

    fn handle_request(&mut self, msg: FormRequest) {
        match msg {
            FormRequest::SetUser { user, respond_to } => self.handle_set_user(user, respond_to),
            FormRequest::SetField {
                field,
                value,
                respond_to,
            } => self.handle_set_field(field, value, respond_to),
            FormRequest::Reset { respond_to } => self.handle_reset(respond_to),
            FormRequest::Submit { respond_to } => self.handle_submit(respond_to),
            FormRequest::DismissNotification { reason, respond_to } => {
                self.handle_dismiss(reason, respond_to)
            }
            FormRequest::GetView { respond_to } => {
                let _ = respond_to.send(self.state.view());
            }
            // Handled by the run loop.
            FormRequest::Unmount => {}
        }
    }

    #[instrument(fields(user_id = ?user.as_ref().and_then(|u| u.id.as_ref())), skip(self, user, respond_to))]
    fn handle_set_user(&mut self, user: Option<Arc<UserRecord>>, respond_to: ServiceResponse<bool>) {
        let changed = self.state.sync_record(user);
        if changed {
            debug!("Fields replaced from new record");
            self.publish();
        }
        let _ = respond_to.send(changed);
    }

    #[instrument(fields(field = %field), skip(self, value, respond_to))]
    fn handle_set_field(&mut self, field: Field, value: String, respond_to: ServiceResponse<()>) {
        self.state.set_field(field, value);
        self.publish();
        let _ = respond_to.send(());
    }

    #[instrument(skip(self, respond_to))]
    fn handle_reset(&mut self, respond_to: ServiceResponse<()>) {
        self.state.reset();
        self.publish();
        let _ = respond_to.send(());
    }

    /// **Background handler** - the request task owns the HTTP call and
    /// reports its result as a [`SubmissionOutcome`].
    #[instrument(skip(self, respond_to))]
    fn handle_submit(&mut self, respond_to: ServiceResponse<SubmitStatus>) {
        let status = match self.state.begin_submission() {
            Some((kind, payload)) => {
                self.hide_at = None;
                let submission = self.next_submission;
                self.next_submission += 1;
                info!(submission, kind = ?kind, "Submitting user");

                let handle = self.spawn_request(submission, kind.clone(), payload);
                self.in_flight = Some(InFlight { submission, handle });
                SubmitStatus::Started(kind)
            }
            None => {
                warn!("Submission already in flight, ignoring");
                SubmitStatus::AlreadySubmitting
            }
        };
        self.publish();
        let _ = respond_to.send(status);
    }

    fn spawn_request(&self, submission: u64, kind: RequestKind, payload: UserPayload) -> JoinHandle<()> {
        let api = Arc::clone(&self.api);
        let completions = self.completions_tx.clone();
        let span = info_span!("user_request", submission);
        tokio::spawn(
            async move {
                let result = match &kind {
                    RequestKind::Create => api.create_user(payload).await,
                    RequestKind::Update(id) => api.update_user(id.clone(), payload).await,
                };
                let outcome = SubmissionOutcome {
                    submission,
                    kind,
                    result,
                };
                if completions.send(outcome).await.is_err() {
                    debug!("Form gone, dropping response");
                }
            }
            .instrument(span),
        )
    }

    #[instrument(fields(submission = outcome.submission), skip(self, outcome))]
    fn handle_submission_outcome(&mut self, outcome: SubmissionOutcome) {
        match &self.in_flight {
            Some(in_flight) if in_flight.submission == outcome.submission => {}
            _ => {
                debug!("Discarding stale submission outcome");
                return;
            }
        }
        self.in_flight = None;

        match outcome.result {
            Ok(()) => {
                info!("User saved");
                self.state.finish_submission(&outcome.kind, true);
                self.hide_at = None;
                self.on_save.on_save();
                self.publish();
            }
            Err(e) => {
                match &outcome.kind {
                    RequestKind::Update(id) => {
                        error!(error = %e, user_id = %id, "There was an error updating the user")
                    }
                    RequestKind::Create => error!(error = %e, "There was an error creating the user"),
                }
                self.state.finish_submission(&outcome.kind, false);
                self.hide_at = self.auto_hide.map(|after| Instant::now() + after);
                self.publish();
            }
        }
    }

    #[instrument(skip(self, respond_to))]
    fn handle_dismiss(&mut self, reason: DismissReason, respond_to: ServiceResponse<bool>) {
        let hidden = self.state.dismiss(&reason);
        if hidden {
            self.hide_at = None;
            self.publish();
        } else {
            debug!("Notification left as is");
        }
        let _ = respond_to.send(hidden);
    }

    fn handle_auto_hide(&mut self) {
        self.hide_at = None;
        if self.state.dismiss(&DismissReason::Timeout) {
            debug!("Notification auto-hidden");
            self.publish();
        }
    }

    fn publish(&self) {
        self.views.send_replace(self.state.view());
    }
}

async fn notification_deadline(at: Option<Instant>) {
    match at {
        Some(at) => tokio::time::sleep_until(at).await,
        None => std::future::pending().await,
    }
}
