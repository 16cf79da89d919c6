use serde::Serialize;

/// Result of a single email send: provider message id, or the failure reason.
pub type ChannelOutcome = Result<String, String>;

/// What happened to the optional database insert.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PersistOutcome {
    pub saved: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

impl PersistOutcome {
    pub fn saved() -> Self {
        Self {
            saved: true,
            reason: None,
        }
    }

    pub fn not_configured() -> Self {
        Self::failed("Database not configured")
    }

    pub fn failed(reason: impl Into<String>) -> Self {
        Self {
            saved: false,
            reason: Some(reason.into()),
        }
    }
}

/// Composite outcome of the three side effects for one submission.
#[derive(Debug, Clone)]
pub struct DeliveryOutcome {
    pub admin: ChannelOutcome,
    pub auto_reply: ChannelOutcome,
    pub database: PersistOutcome,
}

impl DeliveryOutcome {
    pub fn admin_email_sent(&self) -> bool {
        self.admin.is_ok()
    }

    pub fn auto_reply_sent(&self) -> bool {
        self.auto_reply.is_ok()
    }

    pub fn persisted(&self) -> bool {
        self.database.saved
    }

    pub fn persist_failure_reason(&self) -> Option<&str> {
        self.database.reason.as_deref()
    }

    /// The lead counts as delivered once the admin has been notified.
    pub fn is_success(&self) -> bool {
        self.admin_email_sent()
    }
}
