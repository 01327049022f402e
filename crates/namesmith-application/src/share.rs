//! Sharing names and the app.
//!
//! A native share channel is used when one is registered. Otherwise, or when
//! it fails, a pre-filled message link is built and handed to a
//! [`LinkOpener`]. Sharing is fire-and-forget: failures are logged and
//! reported through [`ShareOutcome`], never as errors.

use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use url::Url;

use namesmith_core::name::NameRecord;

/// Messaging endpoint used for fallback links.
const FALLBACK_SHARE_BASE: &str = "https://wa.me/";

/// A platform share capability.
#[async_trait]
pub trait ShareChannel: Send + Sync {
    fn name(&self) -> &str;

    async fn share(&self, text: &str) -> Result<()>;
}

/// Opens a fallback link in whatever external context the front end has.
pub trait LinkOpener: Send + Sync {
    fn open(&self, url: &Url) -> Result<()>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShareOutcome {
    /// Handled by the native channel.
    Native,
    /// Handed off as a pre-filled message link.
    FallbackLink(Url),
    /// Neither path worked; details are in the log.
    Failed,
}

/// Short summary of one name for sharing.
pub fn share_record_text(record: &NameRecord, app_name: &str) -> String {
    format!(
        "{} ({}) means \"{}\". Origin: {}. Found with {}.",
        record.script, record.transliteration, record.meaning, record.origin, app_name
    )
}

/// Invitation text for sharing the app itself.
pub fn share_app_text(app_name: &str) -> String {
    format!(
        "Looking for a meaningful name? Try {} to discover names with their script, meaning and origin.",
        app_name
    )
}

/// Builds the fallback message link carrying `text`.
pub fn fallback_link(text: &str) -> Result<Url> {
    Ok(Url::parse_with_params(FALLBACK_SHARE_BASE, &[("text", text)])?)
}

pub struct ShareService {
    native: Option<Arc<dyn ShareChannel>>,
    opener: Arc<dyn LinkOpener>,
    app_name: String,
}

impl ShareService {
    pub fn new(opener: Arc<dyn LinkOpener>, app_name: impl Into<String>) -> Self {
        Self {
            native: None,
            opener,
            app_name: app_name.into(),
        }
    }

    /// Registers a native share channel tried before the fallback link.
    pub fn with_native(mut self, channel: Arc<dyn ShareChannel>) -> Self {
        self.native = Some(channel);
        self
    }

    pub async fn share_record(&self, record: &NameRecord) -> ShareOutcome {
        self.share_text(&share_record_text(record, &self.app_name))
            .await
    }

    pub async fn share_app(&self) -> ShareOutcome {
        self.share_text(&share_app_text(&self.app_name)).await
    }

    pub async fn share_text(&self, text: &str) -> ShareOutcome {
        if let Some(native) = &self.native {
            match native.share(text).await {
                Ok(()) => return ShareOutcome::Native,
                Err(e) => {
                    tracing::warn!(
                        "[Share] Native channel '{}' failed, using fallback link: {}",
                        native.name(),
                        e
                    );
                }
            }
        }

        let url = match fallback_link(text) {
            Ok(url) => url,
            Err(e) => {
                tracing::error!("[Share] Could not build fallback link: {}", e);
                return ShareOutcome::Failed;
            }
        };

        match self.opener.open(&url) {
            Ok(()) => ShareOutcome::FallbackLink(url),
            Err(e) => {
                tracing::error!("[Share] Could not open fallback link: {}", e);
                ShareOutcome::Failed
            }
        }
    }
}
