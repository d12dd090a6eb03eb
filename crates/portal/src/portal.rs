//! The portal: every user-facing flow behind one typed command interface.
//!
//! A [`Portal`] owns its session store, local store, latency source and
//! clock. Callers send a [`Command`] and get back an [`Outcome`] carrying
//! the notifications to show, an optional redirect, inline field errors and
//! the projection recomputed after the command ran.

use std::sync::Arc;

use deer_hub_core::{
    Document, DocumentId, Email, LeaveDraft, LeaveRequest, LeaveRequestId, Session,
};
use serde::Serialize;
use tracing::instrument;

use crate::auth::{self, LoginForm, RegistrationForm};
use crate::clock::{Clock, SystemClock};
use crate::config::PortalConfig;
use crate::error::PortalError;
use crate::forms::FieldErrors;
use crate::latency::{Delay, Latency, SimulatedLatency};
use crate::leave::{self, LEAVE_BALANCES, LeaveBalance, LeaveForm};
use crate::notify::{Notification, ToastSlot};
use crate::pages::Page;
use crate::policy::{self, AccessPolicy, Capability, Decision, Denial};
use crate::projection::{ActionTarget, Projection, project};
use crate::session::SessionStore;
use crate::storage::{FileStore, KeyValueStore, RecordList, keys, read_json, write_json};
use crate::ticker::Ticker;
use crate::upload::{self, UploadError, UploadForm, UploadProgress, ViewMode};

/// A user action.
#[derive(Debug)]
pub enum Command {
    /// Open a page.
    Visit(Page),
    Login(LoginForm),
    Register(RegistrationForm),
    Logout,
    SubmitLeave(LeaveForm),
    SaveLeaveDraft(LeaveForm),
    Upload(UploadForm),
    DownloadDocument(DocumentId),
    ViewDocument(DocumentId),
    /// Activate the quick action card with this title.
    QuickAction(String),
    /// Activate the hero call-to-action button.
    HeroAction,
    SetViewMode(ViewMode),
}

/// Result of running a [`Command`].
#[derive(Debug, Clone, Serialize)]
pub struct Outcome {
    /// Whether the command did what was asked.
    pub success: bool,
    pub notifications: Vec<Notification>,
    /// Page to navigate to.
    pub redirect: Option<Page>,
    pub field_errors: FieldErrors,
    pub projection: Projection,
}

/// What a flow did, before the projection is attached.
#[derive(Debug, Default)]
struct Effect {
    success: bool,
    notifications: Vec<Notification>,
    redirect: Option<Page>,
    field_errors: FieldErrors,
}

impl Effect {
    fn ok() -> Self {
        Self {
            success: true,
            ..Self::default()
        }
    }

    fn failed() -> Self {
        Self::default()
    }

    fn invalid(field_errors: FieldErrors) -> Self {
        Self {
            field_errors,
            ..Self::default()
        }
    }

    fn denied(denial: &Denial) -> Self {
        Self {
            notifications: vec![Notification::warning(denial.message)],
            redirect: denial.redirect(),
            ..Self::default()
        }
    }

    fn notify(mut self, notification: Notification) -> Self {
        self.notifications.push(notification);
        self
    }

    fn redirect(mut self, page: Page) -> Self {
        self.redirect = Some(page);
        self
    }
}

/// The DEER Hub portal.
pub struct Portal<S, L> {
    sessions: SessionStore<S>,
    local: Arc<S>,
    leave_requests: RecordList<LeaveRequest, Arc<S>>,
    documents: RecordList<Document, Arc<S>>,
    policy: AccessPolicy,
    latency: L,
    clock: Arc<dyn Clock>,
    toast: ToastSlot,
    ticker: Ticker,
    view_mode: ViewMode,
}

impl Portal<FileStore, SimulatedLatency> {
    /// Open a portal over file stores under the configured data directory.
    ///
    /// # Errors
    ///
    /// Returns an error if a store directory cannot be created.
    pub fn open(config: &PortalConfig) -> Result<Self, PortalError> {
        let session_store =
            FileStore::open(config.session_dir())?.with_quota(config.storage_quota_bytes);
        let local_store =
            FileStore::open(config.local_dir())?.with_quota(config.storage_quota_bytes);
        tracing::debug!(data_dir = %config.data_dir.display(), "Opened portal stores");

        Ok(Self::new(
            session_store,
            local_store,
            SimulatedLatency::new(config.simulate_latency),
            Arc::new(SystemClock),
        ))
    }
}

impl<S: KeyValueStore, L: Latency> Portal<S, L> {
    /// Create a portal from its dependencies.
    pub fn new(session_store: S, local_store: S, latency: L, clock: Arc<dyn Clock>) -> Self {
        let local = Arc::new(local_store);
        let ticker = Ticker::with_defaults(clock.today());
        Self {
            sessions: SessionStore::new(session_store),
            leave_requests: RecordList::new(Arc::clone(&local), keys::LEAVE_REQUESTS),
            documents: RecordList::new(Arc::clone(&local), keys::DOCUMENTS),
            local,
            policy: AccessPolicy::default(),
            latency,
            clock,
            toast: ToastSlot::new(),
            ticker,
            view_mode: ViewMode::default(),
        }
    }

    /// Replace the access policy.
    #[must_use]
    pub fn with_policy(mut self, policy: AccessPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// The current session, if any.
    pub fn session(&self) -> Option<Session> {
        self.sessions.get()
    }

    /// Render instructions for the current session.
    pub fn projection(&self) -> Projection {
        project(self.session().as_ref(), &self.policy)
    }

    /// Decide whether the current session may use `capability`.
    pub fn check(&self, capability: Capability) -> Decision {
        self.policy.check(self.session().as_ref(), capability)
    }

    /// The toast on screen right now.
    pub fn visible_toast(&self) -> Option<&Notification> {
        self.toast.visible_at(self.clock.now())
    }

    pub const fn ticker(&self) -> &Ticker {
        &self.ticker
    }

    pub fn ticker_mut(&mut self) -> &mut Ticker {
        &mut self.ticker
    }

    pub const fn view_mode(&self) -> ViewMode {
        self.view_mode
    }

    /// Run `command`.
    pub async fn dispatch(&mut self, command: Command) -> Outcome {
        let effect = match command {
            Command::Visit(page) => self.navigate(page),
            Command::Login(form) => self.login(&form).await,
            Command::Register(form) => self.register(&form).await,
            Command::Logout => self.logout(),
            Command::SubmitLeave(form) => self.submit_leave(&form).await,
            Command::SaveLeaveDraft(form) => self.save_leave_draft(&form),
            Command::Upload(form) => self.upload(&form).await,
            Command::DownloadDocument(id) => {
                self.document_placeholder(id, upload::DOWNLOAD_PLACEHOLDER)
            }
            Command::ViewDocument(id) => self.document_placeholder(id, upload::VIEWER_PLACEHOLDER),
            Command::QuickAction(title) => self.quick_action(&title),
            Command::HeroAction => self.activate(self.projection().hero.target),
            Command::SetViewMode(mode) => {
                self.view_mode = mode;
                Effect::ok()
            }
        };
        self.finish(effect)
    }

    fn finish(&mut self, effect: Effect) -> Outcome {
        for notification in &effect.notifications {
            tracing::info!(
                level = %notification.level,
                message = %notification.message,
                "Notification"
            );
        }
        if let Some(last) = effect.notifications.last() {
            self.toast.show(last.clone(), self.clock.now());
        }

        Outcome {
            success: effect.success,
            notifications: effect.notifications,
            redirect: effect.redirect,
            field_errors: effect.field_errors,
            projection: self.projection(),
        }
    }

    /// The current session if it may use `capability`.
    fn authorize(&self, capability: Capability) -> Result<Session, Effect> {
        let session = self.session();
        match (self.policy.check(session.as_ref(), capability), session) {
            (Decision::Allow, Some(session)) => Ok(session),
            (Decision::Deny(denial), _) => {
                tracing::debug!(?capability, reason = %denial.reason, "Access denied");
                Err(Effect::denied(&denial))
            }
            (Decision::Allow, None) => Err(Effect::failed()
                .notify(Notification::warning(policy::LOGIN_REQUIRED))
                .redirect(Page::Login)),
        }
    }

    fn navigate(&self, page: Page) -> Effect {
        if let Some(capability) = Capability::for_page(page)
            && let Decision::Deny(denial) = self.check(capability)
        {
            tracing::debug!(%page, reason = %denial.reason, "Page access denied");
            return Effect::denied(&denial);
        }
        Effect::ok().redirect(page)
    }

    fn activate(&self, target: ActionTarget) -> Effect {
        match target {
            ActionTarget::Navigate(page) => self.navigate(page),
            ActionTarget::Notice(message) => Effect::ok().notify(Notification::info(message)),
        }
    }

    fn quick_action(&self, title: &str) -> Effect {
        let projection = self.projection();
        match projection.quick_actions.iter().find(|a| a.title == title) {
            Some(action) => self.activate(action.target),
            None => {
                tracing::warn!(title, state = ?projection.state, "Unknown quick action");
                Effect::failed()
            }
        }
    }

    #[instrument(skip(self, form), fields(email = %form.email))]
    async fn login(&self, form: &LoginForm) -> Effect {
        if let Err(errors) = form.validate() {
            return Effect::invalid(errors);
        }

        self.latency.pause(Delay::Login).await;

        let Some(account) = auth::verify_credentials(form.email.trim(), &form.password) else {
            tracing::info!("Rejected login");
            return Effect::failed().notify(Notification::error(auth::INVALID_CREDENTIALS));
        };

        let email = match Email::parse(account.email) {
            Ok(email) => email,
            Err(e) => {
                tracing::error!(error = %e, "Mock account has an invalid email");
                return Effect::failed().notify(Notification::error(auth::LOGIN_FAILED));
            }
        };
        let session = Session::new(account.name, email, account.role, self.clock.now());
        if !self.sessions.save(&session) {
            return Effect::failed().notify(Notification::error(auth::LOGIN_FAILED));
        }

        tracing::info!(role = %session.role, "User logged in");
        Effect::ok()
            .notify(Notification::success(auth::LOGIN_SUCCESS))
            .redirect(Page::Home)
    }

    #[instrument(skip(self, form), fields(email = %form.email))]
    async fn register(&self, form: &RegistrationForm) -> Effect {
        let registration = match form.validate() {
            Ok(registration) => registration,
            Err(errors) => return Effect::invalid(errors),
        };

        self.latency.pause(Delay::Register).await;

        let session = Session::new(
            registration.name,
            registration.email,
            registration.role,
            self.clock.now(),
        );
        if !self.sessions.save(&session) {
            return Effect::failed().notify(Notification::error(auth::REGISTRATION_FAILED));
        }
        tracing::info!(role = %session.role, "User registered");

        self.latency.pause(Delay::RegisterRedirect).await;
        Effect::ok()
            .notify(Notification::success(auth::REGISTRATION_SUCCESS))
            .redirect(Page::Home)
    }

    fn logout(&self) -> Effect {
        if !self.sessions.clear() {
            return Effect::failed().notify(Notification::error(auth::LOGOUT_FAILED));
        }
        tracing::info!("User logged out");
        Effect::ok()
            .notify(Notification::info(auth::LOGOUT_SUCCESS))
            .redirect(Page::Home)
    }

    #[instrument(skip(self, form))]
    async fn submit_leave(&self, form: &LeaveForm) -> Effect {
        let owner = match self.authorize(Capability::SubmitLeave) {
            Ok(session) => session,
            Err(effect) => return effect,
        };

        let leave = match form.validate(self.clock.today()) {
            Ok(leave) => leave,
            Err(errors) => {
                let mut effect = Effect::invalid(errors);
                if effect.field_errors.get("endDate") == Some(leave::END_BEFORE_START) {
                    effect = effect.notify(Notification::error(leave::END_BEFORE_START));
                }
                return effect;
            }
        };

        let submitted_at = self.clock.now();
        self.latency.pause(Delay::LeaveSubmit).await;

        let request = leave.into_request(
            LeaveRequestId::from_timestamp(submitted_at),
            &owner,
            submitted_at,
        );
        let id = request.id;
        match self.leave_requests.prepend(vec![request]) {
            Ok(_) => {
                tracing::info!(%id, "Leave request submitted");
                Effect::ok().notify(Notification::success(leave::SUBMIT_SUCCESS))
            }
            Err(e) => {
                tracing::error!(error = %e, "Error saving leave request");
                Effect::failed().notify(Notification::error(leave::SUBMIT_FAILED))
            }
        }
    }

    fn save_leave_draft(&self, form: &LeaveForm) -> Effect {
        let owner = match self.authorize(Capability::SubmitLeave) {
            Ok(session) => session,
            Err(effect) => return effect,
        };

        let now = self.clock.now();
        let draft = form.to_draft(LeaveRequestId::from_timestamp(now), &owner, now);
        match write_json(self.local.as_ref(), keys::LEAVE_DRAFT, &draft) {
            Ok(()) => Effect::ok().notify(Notification::info(leave::DRAFT_SAVED)),
            Err(e) => {
                tracing::error!(error = %e, "Error saving leave draft");
                Effect::failed().notify(Notification::error(leave::DRAFT_FAILED))
            }
        }
    }

    /// The saved leave draft, if any.
    pub fn load_leave_draft(&self) -> Option<LeaveDraft> {
        match read_json(self.local.as_ref(), keys::LEAVE_DRAFT) {
            Ok(draft) => draft,
            Err(e) => {
                tracing::warn!(error = %e, "Error reading leave draft");
                None
            }
        }
    }

    /// All leave requests, newest first.
    pub fn leave_requests(&self) -> Vec<LeaveRequest> {
        self.leave_requests.load()
    }

    /// The newest few leave requests.
    pub fn recent_leave_requests(&self) -> Vec<LeaveRequest> {
        self.leave_requests.recent(leave::RECENT_REQUESTS)
    }

    #[allow(clippy::unused_self)]
    pub const fn leave_balances(&self) -> &'static [LeaveBalance] {
        &LEAVE_BALANCES
    }

    #[instrument(skip(self, form), fields(files = form.files.len()))]
    async fn upload(&self, form: &UploadForm) -> Effect {
        let uploader = match self.authorize(Capability::UploadDocuments) {
            Ok(session) => session,
            Err(effect) => return effect,
        };

        let upload = match form.validate() {
            Ok(upload) => upload,
            Err(UploadError::Fields(errors)) => return Effect::invalid(errors),
            Err(UploadError::NoFiles) => {
                return Effect::failed().notify(Notification::warning(upload::NO_FILES_SELECTED));
            }
        };

        let started_at = self.clock.now();
        let mut progress = UploadProgress::new();
        while !progress.is_complete() {
            self.latency.pause(Delay::UploadTick).await;
            progress.tick(&mut rand::rng());
            tracing::debug!(%progress, "Upload progress");
        }
        self.latency.pause(Delay::UploadFinalize).await;

        let count = upload.files.len();
        let documents = upload.into_documents(
            DocumentId::from_timestamp(started_at),
            &uploader.name,
            started_at,
        );
        match self.documents.prepend(documents) {
            Ok(_) => {
                tracing::info!(count, "Documents uploaded");
                Effect::ok().notify(Notification::success(upload::upload_success(count)))
            }
            Err(e) => {
                tracing::error!(error = %e, "Error saving documents");
                Effect::failed().notify(Notification::error(upload::UPLOAD_FAILED))
            }
        }
    }

    fn document_placeholder(&self, id: DocumentId, message: &'static str) -> Effect {
        if !self.documents.load().iter().any(|d| d.id == id) {
            tracing::warn!(%id, "Document not in library");
        }
        Effect::ok().notify(Notification::info(message))
    }

    /// The whole document library, newest first.
    pub fn documents(&self) -> Vec<Document> {
        self.documents.load()
    }

    /// The newest few uploads.
    pub fn recent_documents(&self) -> Vec<Document> {
        self.documents.recent(upload::RECENT_UPLOADS)
    }

    /// Library documents matching `query`.
    pub fn search_documents(&self, query: &str) -> Vec<Document> {
        self.documents
            .load()
            .into_iter()
            .filter(|d| d.matches_query(query))
            .collect()
    }
}
