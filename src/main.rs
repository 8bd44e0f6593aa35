pub mod api;
pub mod health;
pub mod modules;
pub mod shared;

pub use modules::auth;
pub use modules::contact;
pub use modules::email;
pub use modules::review;
pub use modules::service_request;

use crate::api::openapi::ApiDoc;
use crate::auth::adapter::outgoing::jwt::{JwtConfig, JwtTokenService};
use crate::auth::adapter::outgoing::security::{Argon2Hasher, DualSchemeHasher};
use crate::auth::adapter::outgoing::token_repository_redis::RedisTokenRepository;
use crate::auth::adapter::outgoing::user_query_postgres::UserQueryPostgres;
use crate::auth::adapter::outgoing::user_repository_postgres::UserRepositoryPostgres;
use crate::auth::application::ports::outgoing::password_hasher::PasswordHasher;
use crate::auth::application::ports::outgoing::token_provider::TokenProvider;
use crate::auth::application::services::otp::OtpConfig;
use crate::auth::application::use_cases::{
    login_user::{ILoginUserUseCase, LoginUserUseCase},
    logout_user::{ILogoutUseCase, LogoutUseCase},
    refresh_token::{IRefreshTokenUseCase, RefreshTokenUseCase},
    request_password_reset::{IRequestPasswordResetUseCase, RequestPasswordResetUseCase},
    set_password::{ISetPasswordUseCase, SetPasswordUseCase},
    signup_user::{ISignupUserUseCase, SignupUserUseCase},
    verify_reset_otp::{IVerifyResetOtpUseCase, VerifyResetOtpUseCase},
};
use crate::contact::adapter::outgoing::contact_message_postgres::ContactMessagePostgres;
use crate::contact::application::contact_use_cases::ContactUseCases;
use crate::contact::application::service::{
    ListContactMessagesService, MarkContactMessageReadService, SubmitContactMessageService,
};
use crate::email::adapter::outgoing::smtp_sender::SmtpEmailSender;
use crate::email::application::ports::outgoing::email_sender::EmailSender;
use crate::email::application::services::ResetEmailService;
use crate::review::adapter::outgoing::review_query_postgres::ReviewQueryPostgres;
use crate::review::adapter::outgoing::review_repository_postgres::ReviewRepositoryPostgres;
use crate::review::application::review_use_cases::ReviewUseCases;
use crate::review::application::service::{CreateReviewService, ListReviewsService};
use crate::service_request::adapter::outgoing::paypal::{
    DisabledInvoiceIssuer, PaypalConfig, PaypalInvoiceIssuer,
};
use crate::service_request::adapter::outgoing::service_request_query_postgres::ServiceRequestQueryPostgres;
use crate::service_request::adapter::outgoing::service_request_repository_postgres::ServiceRequestRepositoryPostgres;
use crate::service_request::application::ports::outgoing::InvoiceIssuer;
use crate::service_request::application::service::{
    CreateServiceRequestService, DeleteServiceRequestService, GetServiceRequestService,
    IssueInvoiceService, ListServiceRequestsService, PatchServiceRequestService,
    RecordInvoicePaymentService,
};
use crate::service_request::application::service_request_use_cases::ServiceRequestUseCases;
use crate::shared::api::{custom_json_config, custom_query_config};

use actix_web::{web, App, HttpServer};
use anyhow::Context;
use deadpool_redis::{Config, Runtime};
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use std::env;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[cfg(test)]
mod tests;

#[derive(Clone)]
pub struct AppState {
    pub signup_user_use_case: Arc<dyn ISignupUserUseCase + Send + Sync>,
    pub login_user_use_case: Arc<dyn ILoginUserUseCase + Send + Sync>,
    pub refresh_token_use_case: Arc<dyn IRefreshTokenUseCase + Send + Sync>,
    pub logout_user_use_case: Arc<dyn ILogoutUseCase + Send + Sync>,
    pub request_password_reset_use_case: Arc<dyn IRequestPasswordResetUseCase + Send + Sync>,
    pub verify_reset_otp_use_case: Arc<dyn IVerifyResetOtpUseCase + Send + Sync>,
    pub set_password_use_case: Arc<dyn ISetPasswordUseCase + Send + Sync>,
    pub service_request: ServiceRequestUseCases,
    pub review: ReviewUseCases,
    pub contact: ContactUseCases,
}

fn required_env(key: &str) -> anyhow::Result<String> {
    env::var(key).with_context(|| format!("{key} is not set"))
}

#[cfg(not(tarpaulin_include))]
fn invoice_issuer() -> Arc<dyn InvoiceIssuer + Send + Sync> {
    match PaypalConfig::from_env() {
        Ok(config) => {
            info!(sandbox = config.is_sandbox(), "PayPal invoicing enabled");
            Arc::new(PaypalInvoiceIssuer::new(config))
        }
        Err(e) => {
            warn!(error = %e, "PayPal invoicing disabled");
            Arc::new(DisabledInvoiceIssuer)
        }
    }
}

#[cfg(not(tarpaulin_include))]
fn service_request_use_cases(db: &Arc<DatabaseConnection>) -> ServiceRequestUseCases {
    let query = ServiceRequestQueryPostgres::new(Arc::clone(db));
    let repository = ServiceRequestRepositoryPostgres::new(Arc::clone(db));

    ServiceRequestUseCases {
        create: Arc::new(CreateServiceRequestService::new(repository.clone())),
        list: Arc::new(ListServiceRequestsService::new(query.clone())),
        get: Arc::new(GetServiceRequestService::new(query.clone())),
        patch: Arc::new(PatchServiceRequestService::new(
            query.clone(),
            repository.clone(),
            ReviewRepositoryPostgres::new(Arc::clone(db)),
        )),
        delete: Arc::new(DeleteServiceRequestService::new(
            query.clone(),
            repository.clone(),
        )),
        issue_invoice: Arc::new(IssueInvoiceService::new(
            query.clone(),
            repository.clone(),
            invoice_issuer(),
        )),
        record_payment: Arc::new(RecordInvoicePaymentService::new(query, repository)),
    }
}

#[cfg(not(tarpaulin_include))]
fn review_use_cases(db: &Arc<DatabaseConnection>) -> ReviewUseCases {
    let reviews = ReviewQueryPostgres::new(Arc::clone(db));

    ReviewUseCases {
        create: Arc::new(CreateReviewService::new(
            ServiceRequestQueryPostgres::new(Arc::clone(db)),
            ServiceRequestRepositoryPostgres::new(Arc::clone(db)),
            ReviewRepositoryPostgres::new(Arc::clone(db)),
        )),
        list: Arc::new(ListReviewsService::new(reviews)),
    }
}

#[cfg(not(tarpaulin_include))]
fn contact_use_cases(db: &Arc<DatabaseConnection>) -> ContactUseCases {
    let store = ContactMessagePostgres::new(Arc::clone(db));

    ContactUseCases {
        submit: Arc::new(SubmitContactMessageService::new(store.clone())),
        list: Arc::new(ListContactMessagesService::new(store.clone())),
        mark_read: Arc::new(MarkContactMessageReadService::new(store)),
    }
}

#[actix_web::main]
#[cfg(not(tarpaulin_include))]
async fn start() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,actix_web=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // rediss:// connections need a process-wide crypto provider
    if rustls::crypto::ring::default_provider()
        .install_default()
        .is_err()
    {
        warn!("rustls crypto provider was already installed");
    }

    info!("Starting application...");

    // Try .env.{environment} first, then fall back to .env
    let rust_env = env::var("RUST_ENV").unwrap_or_else(|_| "development".to_string());
    let env_file = format!(".env.{}", rust_env);
    if dotenvy::from_filename(&env_file).is_err() {
        dotenvy::dotenv().ok();
    }

    let db_url = required_env("DATABASE_URL")?;
    let host = required_env("HOST")?;
    let port = required_env("PORT")?;
    let redis_url = required_env("REDIS_URL")?;
    let admin_username = required_env("ADMIN_USERNAME")?;

    let server_url = format!("{host}:{port}");
    info!(%server_url, env = %rust_env, "Configuration loaded");

    // Database connection
    let mut opt = ConnectOptions::new(db_url);
    opt.max_connections(50)
        .min_connections(10)
        .connect_timeout(Duration::from_secs(5))
        .acquire_timeout(Duration::from_secs(5))
        .idle_timeout(Duration::from_secs(300))
        .max_lifetime(Duration::from_secs(1800))
        .sqlx_logging(false);

    let db_arc = Arc::new(
        Database::connect(opt)
            .await
            .context("Failed to connect to database")?,
    );

    // Redis connection
    let redis_arc = Arc::new(
        Config::from_url(&redis_url)
            .create_pool(Some(Runtime::Tokio1))
            .context("Failed to create Redis pool")?,
    );

    // Auth components
    let jwt_service = JwtTokenService::new(JwtConfig::from_env()?);
    let token_provider_arc: Arc<dyn TokenProvider + Send + Sync> = Arc::new(jwt_service);
    let hasher: Arc<dyn PasswordHasher + Send + Sync> = Arc::new(DualSchemeHasher::new(
        Argon2Hasher::from_env().context("Invalid Argon2 parameters")?,
    ));

    let user_query = UserQueryPostgres::new(Arc::clone(&db_arc));
    let user_repo = UserRepositoryPostgres::new(Arc::clone(&db_arc));
    let redis_token_repo = RedisTokenRepository::new(Arc::clone(&redis_arc));

    let smtp_sender: Arc<dyn EmailSender + Send + Sync> =
        Arc::new(SmtpEmailSender::from_env().context("Failed to configure SMTP")?);
    let reset_notifier = Arc::new(ResetEmailService::new(smtp_sender));

    let otp_config = OtpConfig::from_env();

    let state = AppState {
        signup_user_use_case: Arc::new(SignupUserUseCase::new(
            user_query.clone(),
            user_repo.clone(),
            Arc::clone(&hasher),
        )),
        login_user_use_case: Arc::new(LoginUserUseCase::new(
            user_query.clone(),
            Arc::clone(&hasher),
            Arc::clone(&token_provider_arc),
            admin_username,
        )),
        refresh_token_use_case: Arc::new(RefreshTokenUseCase::new(
            redis_token_repo.clone(),
            Arc::clone(&token_provider_arc),
        )),
        logout_user_use_case: Arc::new(LogoutUseCase::new(
            redis_token_repo,
            Arc::clone(&token_provider_arc),
        )),
        request_password_reset_use_case: Arc::new(RequestPasswordResetUseCase::new(
            user_query.clone(),
            user_repo.clone(),
            reset_notifier,
            otp_config.clone(),
        )),
        verify_reset_otp_use_case: Arc::new(VerifyResetOtpUseCase::new(
            user_query.clone(),
            user_repo.clone(),
            otp_config.clone(),
        )),
        set_password_use_case: Arc::new(SetPasswordUseCase::new(
            user_query,
            user_repo,
            Arc::clone(&hasher),
            otp_config,
        )),
        service_request: service_request_use_cases(&db_arc),
        review: review_use_cases(&db_arc),
        contact: contact_use_cases(&db_arc),
    };

    let openapi = ApiDoc::openapi();

    HttpServer::new(move || {
        App::new()
            .app_data(web::Data::new(state.clone()))
            .app_data(web::Data::new(Arc::clone(&token_provider_arc)))
            .app_data(web::Data::new(Arc::clone(&db_arc)))
            .app_data(web::Data::new(Arc::clone(&redis_arc)))
            .app_data(custom_json_config())
            .app_data(custom_query_config())
            .service(
                SwaggerUi::new("/swagger-ui/{_:.*}")
                    .url("/api-docs/openapi.json", openapi.clone()),
            )
            .configure(init_routes)
    })
    .bind(server_url)?
    .run()
    .await?;

    Ok(())
}

#[cfg(not(tarpaulin_include))]
fn init_routes(cfg: &mut web::ServiceConfig) {
    use crate::auth::adapter::incoming::web::routes as auth_routes;
    use crate::contact::adapter::incoming::web::routes as contact_routes;
    use crate::review::adapter::incoming::web::routes as review_routes;
    use crate::service_request::adapter::incoming::web::routes as request_routes;

    // Health
    cfg.service(crate::health::health);
    cfg.service(crate::health::readiness);
    // Auth
    cfg.service(auth_routes::signup_user_handler);
    cfg.service(auth_routes::login_user_handler);
    cfg.service(auth_routes::refresh_token_handler);
    cfg.service(auth_routes::logout_user_handler);
    cfg.service(auth_routes::request_reset_handler);
    cfg.service(auth_routes::verify_otp_handler);
    cfg.service(auth_routes::set_password_handler);
    // Service requests
    cfg.service(request_routes::paypal_webhook_handler);
    cfg.service(request_routes::create_service_request_handler);
    cfg.service(request_routes::list_service_requests_handler);
    cfg.service(request_routes::get_service_request_handler);
    cfg.service(request_routes::patch_service_request_handler);
    cfg.service(request_routes::delete_service_request_handler);
    cfg.service(request_routes::issue_invoice_handler);
    // Reviews
    cfg.service(review_routes::create_review_handler);
    cfg.service(review_routes::list_reviews_handler);
    // Contact
    cfg.service(contact_routes::submit_contact_message_handler);
    cfg.service(contact_routes::list_contact_messages_handler);
    cfg.service(contact_routes::mark_contact_message_read_handler);
}

#[cfg(not(tarpaulin_include))]
fn main() {
    if let Err(e) = start() {
        eprintln!("Error starting app: {e:#}");
    }
}
