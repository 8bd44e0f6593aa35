use std::sync::Arc;

use crate::contact::application::ports::incoming::use_cases::{
    ListContactMessagesUseCase, MarkContactMessageReadUseCase, SubmitContactMessageUseCase,
};

#[derive(Clone)]
pub struct ContactUseCases {
    pub submit: Arc<dyn SubmitContactMessageUseCase + Send + Sync>,
    pub list: Arc<dyn ListContactMessagesUseCase + Send + Sync>,
    pub mark_read: Arc<dyn MarkContactMessageReadUseCase + Send + Sync>,
}
