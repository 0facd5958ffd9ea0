//! Error types for encore-core

use thiserror::Error;

use crate::accounting::AccountingError;
use crate::provider::ProviderError;
use crate::store::StoreError;

/// Top-level error type for encore-core
#[derive(Error, Debug)]
pub enum EncoreError {
    #[error("accounting error: {0}")]
    Accounting(#[from] AccountingError),

    #[error("provider error: {0}")]
    Provider(#[from] ProviderError),

    #[error("store error: {0}")]
    Store(#[from] StoreError),
}
