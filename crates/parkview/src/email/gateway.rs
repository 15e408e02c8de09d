/// Rendered message handed to the delivery provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutboundEmail {
    pub from_label: String,
    pub to: String,
    pub subject: String,
    pub html_body: String,
}

/// Provider acknowledgement. Delivery beyond acceptance is not tracked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeliveryReceipt {
    pub message_id: String,
}

#[derive(Debug, thiserror::Error)]
pub enum EmailError {
    #[error("email transport unavailable: {0}")]
    Transport(String),
    #[error("email provider rejected the message ({status}): {body}")]
    Rejected { status: u16, body: String },
}

/// Seam over the transactional email provider.
///
/// Callers on best-effort paths log failures and move on; the send is
/// never retried here.
pub trait EmailGateway: Send + Sync {
    fn send(&self, message: &OutboundEmail) -> Result<DeliveryReceipt, EmailError>;
}
