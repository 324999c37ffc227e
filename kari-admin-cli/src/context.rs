//! Per-run state shared by the commands.

use std::sync::Arc;

use kari_admin_lib::KariClient;
use kari_admin_lib::auth::Session;
use kari_admin_lib::auth::SessionSnapshot;
use kari_admin_lib::auth::TokenProvider;

use crate::config::Config;
use crate::error::CliError;
use crate::settings;
use crate::settings::Settings;

pub struct Context {
    pub config: Config,
    pub settings: Settings,
    pub session: Session,
    /// Session as loaded from settings, to detect changes on exit.
    loaded: Option<SessionSnapshot>,
}

impl Context {
    pub async fn load(config: Config, settings: Settings) -> Result<Self, CliError> {
        let loaded = settings.get_lenient(&settings::SESSION).await?;
        let session = match &loaded {
            Some(snapshot) => Session::restore(config.api_url.clone(), snapshot.clone()),
            None => Session::new(config.api_url.clone()),
        };

        Ok(Self {
            config,
            settings,
            session,
            loaded,
        })
    }

    /// API client authenticated through the session.
    pub fn client(&self) -> Result<KariClient, CliError> {
        if !self.session.is_authenticated() {
            return Err(CliError::NotLoggedIn);
        }
        let provider: Arc<dyn TokenProvider> = Arc::new(self.session.clone());
        Ok(KariClient::builder()
            .url(self.config.api_url.clone())
            .shared_token_provider(provider)
            .build()?)
    }

    /// Writes the session back if it changed: saved after login, removed
    /// after logout or when the API rejected the token.
    pub async fn persist_session(&self) -> Result<(), CliError> {
        let current = self.session.snapshot();
        if current == self.loaded {
            return Ok(());
        }
        match current {
            Some(snapshot) => self.settings.set(&settings::SESSION, &snapshot).await?,
            None => {
                log::info!("Removing saved session");
                self.settings.delete(&settings::SESSION).await?
            }
        }
        Ok(())
    }
}
