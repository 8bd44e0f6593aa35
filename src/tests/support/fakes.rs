//! In-memory adapters for use-case tests.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use uuid::Uuid;

use crate::auth::application::domain::entities::User;
use crate::auth::application::ports::outgoing::user_query::UserQueryResult;
use crate::auth::application::ports::outgoing::{
    HashError, PasswordHasher, TokenRepository, TokenRepositoryError, UserQuery, UserQueryError,
    UserRepository, UserRepositoryError,
};
use crate::contact::application::domain::entities::{ContactMessage, ContactSubmission};
use crate::contact::application::ports::outgoing::{
    ContactMessageQuery, ContactMessageQueryError, ContactMessageRepository,
    ContactMessageRepositoryError,
};
use crate::email::application::ports::outgoing::{
    PasswordResetNotificationError, PasswordResetNotifier,
};
use crate::review::application::domain::entities::{NewReview, Review};
use crate::review::application::ports::outgoing::{
    ReviewQuery, ReviewQueryError, ReviewRepository, ReviewRepositoryError,
};
use crate::service_request::application::domain::entities::{RequestStatus, ServiceRequest};
use crate::service_request::application::ports::outgoing::{
    InvoiceDraft, InvoiceIssuer, InvoiceIssuerError, IssuedInvoice, NewServiceRequest,
    ServiceRequestChanges, ServiceRequestFilter, ServiceRequestQuery, ServiceRequestQueryError,
    ServiceRequestRepository, ServiceRequestRepositoryError,
};
use crate::shared::api::PatchField;

// ─── Users ─────────────────────────────────────────────────────────────────

#[derive(Clone, Default)]
pub struct InMemoryUsers {
    users: Arc<Mutex<Vec<User>>>,
    otp_attempts: Arc<Mutex<HashMap<Uuid, u16>>>,
    create_conflict: bool,
}

impl InMemoryUsers {
    /// `create_user` reports a unique-constraint race.
    pub fn with_create_conflict(mut self) -> Self {
        self.create_conflict = true;
        self
    }

    pub fn insert_user(&self, username: &str, email: &str, password_hash: &str) -> User {
        let user = User::new(username.into(), email.into(), password_hash.into());
        self.users.lock().unwrap().push(user.clone());
        user
    }

    pub fn set_otp(&self, username: &str, otp_hash: String, expires_at: DateTime<Utc>) {
        let mut users = self.users.lock().unwrap();
        let user = users
            .iter_mut()
            .find(|u| u.username == username)
            .expect("user exists");
        user.reset_otp_hash = Some(otp_hash);
        user.reset_otp_expires_at = Some(expires_at);
        self.otp_attempts.lock().unwrap().remove(&user.id);
    }

    pub fn get_by_username(&self, username: &str) -> Option<User> {
        self.users
            .lock()
            .unwrap()
            .iter()
            .find(|u| u.username == username)
            .cloned()
    }

    fn to_result(user: &User) -> UserQueryResult {
        UserQueryResult {
            id: user.id,
            email: user.email.clone(),
            username: user.username.clone(),
            password_hash: user.password_hash.clone(),
            reset_otp_hash: user.reset_otp_hash.clone(),
            reset_otp_expires_at: user.reset_otp_expires_at,
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }

    fn update<F: FnOnce(&mut User)>(&self, user_id: Uuid, f: F) -> Result<(), UserRepositoryError> {
        let mut users = self.users.lock().unwrap();
        let user = users
            .iter_mut()
            .find(|u| u.id == user_id)
            .ok_or(UserRepositoryError::UserNotFound)?;
        f(user);
        user.updated_at = Utc::now();
        Ok(())
    }
}

#[async_trait]
impl UserQuery for InMemoryUsers {
    async fn find_by_email(&self, email: &str) -> Result<Option<UserQueryResult>, UserQueryError> {
        Ok(self
            .users
            .lock()
            .unwrap()
            .iter()
            .find(|u| u.email == email)
            .map(Self::to_result))
    }

    async fn find_by_username(
        &self,
        username: &str,
    ) -> Result<Option<UserQueryResult>, UserQueryError> {
        Ok(self
            .get_by_username(username)
            .as_ref()
            .map(Self::to_result))
    }
}

#[async_trait]
impl UserRepository for InMemoryUsers {
    async fn create_user(&self, user: User) -> Result<User, UserRepositoryError> {
        if self.create_conflict {
            return Err(UserRepositoryError::UserAlreadyExists);
        }
        self.users.lock().unwrap().push(user.clone());
        Ok(user)
    }

    async fn set_reset_otp(
        &self,
        user_id: Uuid,
        otp_hash: String,
        expires_at: DateTime<Utc>,
    ) -> Result<(), UserRepositoryError> {
        self.otp_attempts.lock().unwrap().remove(&user_id);
        self.update(user_id, |u| {
            u.reset_otp_hash = Some(otp_hash);
            u.reset_otp_expires_at = Some(expires_at);
        })
    }

    async fn record_failed_otp_attempt(
        &self,
        user_id: Uuid,
        max_attempts: u16,
    ) -> Result<bool, UserRepositoryError> {
        let attempts = {
            let mut counts = self.otp_attempts.lock().unwrap();
            let count = counts.entry(user_id).or_insert(0);
            *count += 1;
            *count
        };
        if attempts < max_attempts {
            return Ok(false);
        }
        self.otp_attempts.lock().unwrap().remove(&user_id);
        self.update(user_id, |u| {
            u.reset_otp_hash = None;
            u.reset_otp_expires_at = None;
        })?;
        Ok(true)
    }

    async fn update_password(
        &self,
        user_id: Uuid,
        new_password_hash: String,
    ) -> Result<(), UserRepositoryError> {
        self.otp_attempts.lock().unwrap().remove(&user_id);
        self.update(user_id, |u| {
            u.password_hash = new_password_hash;
            u.reset_otp_hash = None;
            u.reset_otp_expires_at = None;
        })
    }
}

// ─── Password hashing ──────────────────────────────────────────────────────

/// Reversible "hash" so tests can assert on stored values.
pub struct FakeHasher;

#[async_trait]
impl PasswordHasher for FakeHasher {
    async fn hash_password(&self, password: &str) -> Result<String, HashError> {
        Ok(format!("hashed:{password}"))
    }

    async fn verify_password(&self, password: &str, hash: &str) -> Result<bool, HashError> {
        Ok(hash == format!("hashed:{password}"))
    }
}

// ─── Token blacklist ───────────────────────────────────────────────────────

#[derive(Clone, Default)]
pub struct InMemoryTokenRepository {
    hashes: Arc<Mutex<Vec<String>>>,
    fail: bool,
}

impl InMemoryTokenRepository {
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    pub fn len(&self) -> usize {
        self.hashes.lock().unwrap().len()
    }
}

#[async_trait]
impl TokenRepository for InMemoryTokenRepository {
    async fn blacklist_token(
        &self,
        token_hash: String,
        _user_id: Uuid,
        _expires_at: DateTime<Utc>,
    ) -> Result<(), TokenRepositoryError> {
        if self.fail {
            return Err(TokenRepositoryError::DatabaseError(
                "Connection failed".to_string(),
            ));
        }
        self.hashes.lock().unwrap().push(token_hash);
        Ok(())
    }

    async fn is_token_blacklisted(&self, token_hash: &str) -> Result<bool, TokenRepositoryError> {
        Ok(self.hashes.lock().unwrap().iter().any(|h| h == token_hash))
    }
}

// ─── Reset notifications ───────────────────────────────────────────────────

#[derive(Clone, Default)]
pub struct RecordingResetNotifier {
    sent: Arc<Mutex<Vec<(String, String)>>>,
    fail: bool,
}

impl RecordingResetNotifier {
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    /// `(email, code)` pairs in send order.
    pub fn sent(&self) -> Vec<(String, String)> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl PasswordResetNotifier for RecordingResetNotifier {
    async fn send_reset_code(
        &self,
        email: &str,
        _username: &str,
        code: &str,
        _valid_for_minutes: i64,
    ) -> Result<(), PasswordResetNotificationError> {
        if self.fail {
            return Err(PasswordResetNotificationError::EmailSendingFailed(
                "smtp unavailable".into(),
            ));
        }
        self.sent
            .lock()
            .unwrap()
            .push((email.to_string(), code.to_string()));
        Ok(())
    }
}

// ─── Service requests ──────────────────────────────────────────────────────

#[derive(Clone, Default)]
pub struct InMemoryServiceRequests {
    requests: Arc<Mutex<Vec<ServiceRequest>>>,
    failing: bool,
    /// Status the store reports instead of the real one on conditional writes.
    concurrent_status: Option<RequestStatus>,
}

impl InMemoryServiceRequests {
    pub fn failing() -> Self {
        Self {
            failing: true,
            ..Default::default()
        }
    }

    /// Simulates another writer moving the request to `status` before ours lands.
    pub fn with_concurrent_status(mut self, status: RequestStatus) -> Self {
        self.concurrent_status = Some(status);
        self
    }

    pub fn seed(&self, request: ServiceRequest) -> ServiceRequest {
        self.requests.lock().unwrap().push(request.clone());
        request
    }

    pub fn get(&self, id: Uuid) -> Option<ServiceRequest> {
        self.requests
            .lock()
            .unwrap()
            .iter()
            .find(|r| r.id == id)
            .cloned()
    }

    pub fn len(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    fn db_error<E>(&self, make: fn(String) -> E) -> Result<(), E> {
        if self.failing {
            Err(make("connection refused".into()))
        } else {
            Ok(())
        }
    }
}

fn apply_changes(request: &mut ServiceRequest, changes: ServiceRequestChanges) {
    if let Some(status) = changes.status {
        request.status = status;
    }
    match changes.progress {
        PatchField::Unset => {}
        PatchField::Null => request.progress = None,
        PatchField::Value(p) => request.progress = Some(p),
    }
    match changes.invoice_url {
        PatchField::Unset => {}
        PatchField::Null => request.invoice_url = None,
        PatchField::Value(url) => request.invoice_url = Some(url),
    }
    if let Some(urls) = changes.invoice_urls {
        request.invoice_urls = urls;
    }
    if let Some(id) = changes.invoice_id {
        request.invoice_id = Some(id);
    }
    if let Some(reviewed) = changes.reviewed {
        request.reviewed = reviewed;
    }
    if let Some(review) = changes.review {
        request.review = Some(review);
    }
    if let Some(paid_at) = changes.paid_at {
        request.paid = true;
        request.paid_at = Some(paid_at);
    }
    if let Some(details) = changes.payment_details {
        request.payment_details = Some(details);
    }
    request.updated_at = Utc::now();
}

#[async_trait]
impl ServiceRequestQuery for InMemoryServiceRequests {
    async fn find_by_id(&self, id: Uuid) -> Result<ServiceRequest, ServiceRequestQueryError> {
        self.db_error(ServiceRequestQueryError::DatabaseError)?;
        self.get(id).ok_or(ServiceRequestQueryError::NotFound)
    }

    async fn find_by_invoice_id(
        &self,
        invoice_id: &str,
    ) -> Result<ServiceRequest, ServiceRequestQueryError> {
        self.db_error(ServiceRequestQueryError::DatabaseError)?;
        self.requests
            .lock()
            .unwrap()
            .iter()
            .find(|r| r.invoice_id.as_deref() == Some(invoice_id))
            .cloned()
            .ok_or(ServiceRequestQueryError::NotFound)
    }

    async fn list(
        &self,
        filter: ServiceRequestFilter,
    ) -> Result<Vec<ServiceRequest>, ServiceRequestQueryError> {
        self.db_error(ServiceRequestQueryError::DatabaseError)?;
        let mut out: Vec<ServiceRequest> = self
            .requests
            .lock()
            .unwrap()
            .iter()
            .filter(|r| filter.username.as_deref().map_or(true, |u| r.username == u))
            .cloned()
            .collect();
        out.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(out)
    }
}

#[async_trait]
impl ServiceRequestRepository for InMemoryServiceRequests {
    async fn create(
        &self,
        data: NewServiceRequest,
    ) -> Result<ServiceRequest, ServiceRequestRepositoryError> {
        self.db_error(ServiceRequestRepositoryError::DatabaseError)?;
        let now = Utc::now();
        let draft = data.draft;
        let request = ServiceRequest {
            id: Uuid::new_v4(),
            username: data.username,
            project_name: draft.project_name,
            service_type: draft.service_type,
            description: draft.description,
            timeline: draft.timeline,
            budget: draft.budget,
            additional_notes: draft.additional_notes,
            reference_links: draft.reference_links,
            status: RequestStatus::Pending,
            progress: None,
            invoice_url: None,
            invoice_urls: vec![],
            invoice_id: None,
            paid: false,
            paid_at: None,
            payment_details: None,
            reviewed: false,
            review: None,
            created_at: now,
            updated_at: now,
        };
        Ok(self.seed(request))
    }

    async fn update(
        &self,
        id: Uuid,
        expected_status: Option<RequestStatus>,
        changes: ServiceRequestChanges,
    ) -> Result<ServiceRequest, ServiceRequestRepositoryError> {
        self.db_error(ServiceRequestRepositoryError::DatabaseError)?;
        let mut requests = self.requests.lock().unwrap();
        let request = requests
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or(ServiceRequestRepositoryError::NotFound)?;

        if let Some(expected) = expected_status {
            let stored = self.concurrent_status.unwrap_or(request.status);
            if stored != expected {
                return Err(ServiceRequestRepositoryError::StatusConflict);
            }
        }

        apply_changes(request, changes);
        Ok(request.clone())
    }

    async fn delete(&self, id: Uuid) -> Result<(), ServiceRequestRepositoryError> {
        self.db_error(ServiceRequestRepositoryError::DatabaseError)?;
        let mut requests = self.requests.lock().unwrap();
        let before = requests.len();
        requests.retain(|r| r.id != id);
        if requests.len() == before {
            return Err(ServiceRequestRepositoryError::NotFound);
        }
        Ok(())
    }
}

// ─── Invoicing ─────────────────────────────────────────────────────────────

#[derive(Clone, Default)]
pub struct RecordingInvoiceIssuer {
    issued: Arc<Mutex<Vec<InvoiceDraft>>>,
    failure: Option<InvoiceIssuerError>,
}

impl RecordingInvoiceIssuer {
    pub fn failing(err: InvoiceIssuerError) -> Self {
        Self {
            failure: Some(err),
            ..Default::default()
        }
    }

    pub fn issued(&self) -> Vec<InvoiceDraft> {
        self.issued.lock().unwrap().clone()
    }
}

#[async_trait]
impl InvoiceIssuer for RecordingInvoiceIssuer {
    async fn issue(&self, draft: &InvoiceDraft) -> Result<IssuedInvoice, InvoiceIssuerError> {
        if let Some(err) = &self.failure {
            return Err(err.clone());
        }
        self.issued.lock().unwrap().push(draft.clone());
        Ok(IssuedInvoice {
            invoice_id: "INV2-TEST-0001".into(),
            invoice_url: "https://www.sandbox.paypal.com/invoice/p/#INV2-TEST-0001".into(),
        })
    }
}

// ─── Reviews ───────────────────────────────────────────────────────────────

#[derive(Clone, Default)]
pub struct InMemoryReviews {
    reviews: Arc<Mutex<Vec<Review>>>,
    failing: bool,
}

impl InMemoryReviews {
    pub fn failing() -> Self {
        Self {
            failing: true,
            ..Default::default()
        }
    }

    /// Stores a review for `request_id`, each one newer than the last.
    pub fn seed_for(&self, request_id: Uuid) -> Review {
        let mut reviews = self.reviews.lock().unwrap();
        let review = Review {
            id: Uuid::new_v4(),
            request_id,
            username: "alice".into(),
            project_name: "Site".into(),
            service_type: "web-design".into(),
            rating: 5,
            title: "Great".into(),
            review: "Delivered early and polished.".into(),
            avatar: None,
            created_at: Utc::now() + Duration::seconds(reviews.len() as i64),
        };
        reviews.push(review.clone());
        review
    }

    pub fn len(&self) -> usize {
        self.reviews.lock().unwrap().len()
    }

    pub fn for_request(&self, request_id: Uuid) -> Option<Review> {
        self.reviews
            .lock()
            .unwrap()
            .iter()
            .find(|r| r.request_id == request_id)
            .cloned()
    }
}

#[async_trait]
impl ReviewRepository for InMemoryReviews {
    async fn create(&self, new: NewReview) -> Result<Review, ReviewRepositoryError> {
        if self.failing {
            return Err(ReviewRepositoryError::DatabaseError("connection refused".into()));
        }
        let mut reviews = self.reviews.lock().unwrap();
        if reviews.iter().any(|r| r.request_id == new.request_id) {
            return Err(ReviewRepositoryError::Duplicate);
        }
        let review = Review {
            id: Uuid::new_v4(),
            request_id: new.request_id,
            username: new.username,
            project_name: new.project_name,
            service_type: new.service_type,
            rating: new.rating,
            title: new.title,
            review: new.review,
            avatar: new.avatar,
            created_at: Utc::now(),
        };
        reviews.push(review.clone());
        Ok(review)
    }

    async fn upsert_for_request(&self, new: NewReview) -> Result<Review, ReviewRepositoryError> {
        if self.failing {
            return Err(ReviewRepositoryError::DatabaseError("connection refused".into()));
        }
        let existing = {
            let mut reviews = self.reviews.lock().unwrap();
            reviews
                .iter_mut()
                .find(|r| r.request_id == new.request_id)
                .map(|r| {
                    r.rating = new.rating;
                    r.title = new.title.clone();
                    r.review = new.review.clone();
                    r.clone()
                })
        };
        match existing {
            Some(review) => Ok(review),
            None => self.create(new).await,
        }
    }
}

#[async_trait]
impl ReviewQuery for InMemoryReviews {
    async fn list(&self) -> Result<Vec<Review>, ReviewQueryError> {
        if self.failing {
            return Err(ReviewQueryError::DatabaseError("connection refused".into()));
        }
        let mut out = self.reviews.lock().unwrap().clone();
        out.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(out)
    }
}

// ─── Contact messages ──────────────────────────────────────────────────────

#[derive(Clone, Default)]
pub struct InMemoryContactMessages {
    messages: Arc<Mutex<Vec<ContactMessage>>>,
    failing: bool,
}

impl InMemoryContactMessages {
    pub fn failing() -> Self {
        Self {
            failing: true,
            ..Default::default()
        }
    }

    /// Unread message with `subject`, newer than any seeded before it.
    pub fn seed(&self, subject: &str) -> ContactMessage {
        let mut messages = self.messages.lock().unwrap();
        let message = ContactMessage {
            id: Uuid::new_v4(),
            name: "Jane".into(),
            email: "jane@example.com".into(),
            subject: subject.into(),
            message: "Hello there".into(),
            read: false,
            created_at: Utc::now() + Duration::seconds(messages.len() as i64),
        };
        messages.push(message.clone());
        message
    }

    pub fn get(&self, id: Uuid) -> Option<ContactMessage> {
        self.messages
            .lock()
            .unwrap()
            .iter()
            .find(|m| m.id == id)
            .cloned()
    }

    pub fn len(&self) -> usize {
        self.messages.lock().unwrap().len()
    }
}

#[async_trait]
impl ContactMessageRepository for InMemoryContactMessages {
    async fn create(
        &self,
        submission: ContactSubmission,
    ) -> Result<ContactMessage, ContactMessageRepositoryError> {
        if self.failing {
            return Err(ContactMessageRepositoryError::DatabaseError(
                "connection refused".into(),
            ));
        }
        let message = ContactMessage {
            id: Uuid::new_v4(),
            name: submission.name().to_string(),
            email: submission.email().to_string(),
            subject: submission.subject().to_string(),
            message: submission.message().to_string(),
            read: false,
            created_at: Utc::now(),
        };
        self.messages.lock().unwrap().push(message.clone());
        Ok(message)
    }

    async fn mark_read(&self, id: Uuid) -> Result<ContactMessage, ContactMessageRepositoryError> {
        if self.failing {
            return Err(ContactMessageRepositoryError::DatabaseError(
                "connection refused".into(),
            ));
        }
        let mut messages = self.messages.lock().unwrap();
        let message = messages
            .iter_mut()
            .find(|m| m.id == id)
            .ok_or(ContactMessageRepositoryError::NotFound)?;
        message.read = true;
        Ok(message.clone())
    }
}

#[async_trait]
impl ContactMessageQuery for InMemoryContactMessages {
    async fn list(&self) -> Result<Vec<ContactMessage>, ContactMessageQueryError> {
        if self.failing {
            return Err(ContactMessageQueryError::DatabaseError(
                "connection refused".into(),
            ));
        }
        let mut out = self.messages.lock().unwrap().clone();
        out.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(out)
    }
}
