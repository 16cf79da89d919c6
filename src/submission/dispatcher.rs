use std::sync::Arc;

use tokio::task::JoinHandle;

use crate::config::MailConfig;
use crate::db::LeadStore;
use crate::email::{Mailer, OutboundEmail, templates};
use crate::error::SubmissionError;
use crate::models::{ChannelOutcome, DeliveryOutcome, PersistOutcome, SubmissionRecord};

/// Sends the admin notification and auto-reply and stores the lead.
///
/// Built once at startup; the mailer and store handles are shared by every
/// request.
pub struct Dispatcher {
    mailer: Arc<dyn Mailer>,
    store: Option<Arc<dyn LeadStore>>,
    mail: MailConfig,
}

impl Dispatcher {
    pub fn new(
        mailer: Arc<dyn Mailer>,
        store: Option<Arc<dyn LeadStore>>,
        mail: MailConfig,
    ) -> Self {
        Self {
            mailer,
            store,
            mail,
        }
    }

    pub fn has_store(&self) -> bool {
        self.store.is_some()
    }

    /// Run all three side effects concurrently and wait for every one of them.
    ///
    /// Individual failures are captured in the outcome. Only a missing
    /// required field or a crashed admin send is returned as an error.
    pub async fn dispatch(
        &self,
        record: &SubmissionRecord,
    ) -> Result<DeliveryOutcome, SubmissionError> {
        check_required(record)?;

        let admin = self.spawn_send(templates::admin_notification(record, &self.mail));
        let auto_reply = self.spawn_send(templates::auto_reply(record, &self.mail));
        let database = self.spawn_persist(record);

        let (admin, auto_reply, database) = tokio::join!(admin, auto_reply, database);

        let admin = admin.map_err(|e| SubmissionError::Internal(format!("Admin email task failed: {e}")))?;
        let auto_reply = auto_reply.unwrap_or_else(|e| Err(format!("Auto-reply task failed: {e}")));
        let database = database.unwrap_or_else(|e| PersistOutcome::failed(format!("Database task failed: {e}")));

        if let Err(e) = &admin {
            tracing::error!("Admin email failed: {e}");
        }
        if let Err(e) = &auto_reply {
            tracing::error!("Auto-reply email failed: {e}");
        }
        if let Some(reason) = database.reason.as_deref().filter(|_| self.has_store()) {
            tracing::warn!("Database save failed (non-critical): {reason}");
        }

        Ok(DeliveryOutcome {
            admin,
            auto_reply,
            database,
        })
    }

    fn spawn_send(&self, email: OutboundEmail) -> JoinHandle<ChannelOutcome> {
        let mailer = Arc::clone(&self.mailer);
        tokio::spawn(async move { mailer.send(&email).await })
    }

    fn spawn_persist(&self, record: &SubmissionRecord) -> JoinHandle<PersistOutcome> {
        let store = self.store.clone();
        let record = record.clone();
        tokio::spawn(async move {
            let Some(store) = store else {
                return PersistOutcome::not_configured();
            };
            match store.insert(&record).await {
                Ok(id) => {
                    tracing::debug!("Lead {id} saved");
                    PersistOutcome::saved()
                }
                Err(e) => PersistOutcome::failed(e),
            }
        })
    }
}

/// Name, service and budget must all be present before anything is sent.
pub fn check_required(record: &SubmissionRecord) -> Result<(), SubmissionError> {
    let missing: Vec<&'static str> = [
        ("name", &record.name),
        ("service", &record.service),
        ("budget", &record.budget),
    ]
    .into_iter()
    .filter(|(_, value)| value.is_empty())
    .map(|(field, _)| field)
    .collect();

    if missing.is_empty() {
        Ok(())
    } else {
        Err(SubmissionError::MissingRequiredFields(missing))
    }
}
