use crate::{
    application::{
        submit_company::use_case::SubmitCompanyUseCase, submit_review::use_case::SubmitReviewUseCase,
    },
    config::Config,
    domain::{company::repository::CompanyRepository, review::repository::ReviewRepository},
    workers::subscription_checker::SubscriptionCheckWorker,
};
use sqlx::PgPool;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    pub redis: redis::Client,
    pub config: Config,
    pub company_repo: Arc<dyn CompanyRepository>,
    pub review_repo: Arc<dyn ReviewRepository>,
    pub submit_company: Arc<SubmitCompanyUseCase>,
    pub submit_review: Arc<SubmitReviewUseCase>,
    pub subscription_worker: Arc<SubscriptionCheckWorker>,
}
