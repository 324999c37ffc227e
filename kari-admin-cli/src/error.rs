//! CLI errors and exit codes.

use kari_admin_lib::error::Error as KariError;
use thiserror::Error;

use crate::settings::SettingsError;

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Kari(#[from] KariError),

    #[error("settings: {0}")]
    Settings(#[from] SettingsError),

    #[error("not logged in; run `kari-admin login` first")]
    NotLoggedIn,

    #[error("{0}")]
    Input(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl CliError {
    /// Process exit code: 2 for authentication problems, 1 otherwise.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::NotLoggedIn => 2,
            Self::Kari(err) if err.is_unauthorized() => 2,
            _ => 1,
        }
    }
}

macro_rules! impl_from_kari {
    ($($ty:ty),* $(,)?) => {
        $(
            impl From<$ty> for CliError {
                fn from(err: $ty) -> Self {
                    Self::Kari(err.into())
                }
            }
        )*
    };
}

impl_from_kari!(
    kari_admin_lib::error::ApiError,
    kari_admin_lib::error::AuthError,
    kari_admin_lib::error::TableError,
    kari_admin_lib::error::AggregateError,
    kari_admin_lib::error::AdapterError,
);
