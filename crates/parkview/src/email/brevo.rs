use reqwest::blocking::Client;
use serde::Serialize;

use super::gateway::{DeliveryReceipt, EmailError, EmailGateway, OutboundEmail};

const BREVO_ENDPOINT: &str = "https://api.brevo.com/v3/smtp/email";

/// Transactional email via the Brevo v3 HTTP API.
///
/// The blocking client is built per send, on the blocking thread the
/// gateway is invoked from.
pub struct BrevoEmailGateway {
    api_key: String,
    sender_address: String,
}

#[derive(Serialize)]
struct BrevoSender<'a> {
    name: &'a str,
    email: &'a str,
}

#[derive(Serialize)]
struct BrevoRecipient<'a> {
    email: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct BrevoPayload<'a> {
    sender: BrevoSender<'a>,
    to: Vec<BrevoRecipient<'a>>,
    subject: &'a str,
    html_content: &'a str,
}

#[derive(serde::Deserialize)]
#[serde(rename_all = "camelCase")]
struct BrevoAccepted {
    #[serde(default)]
    message_id: String,
}

impl BrevoEmailGateway {
    pub fn new(api_key: String, sender_address: String) -> Self {
        Self {
            api_key,
            sender_address,
        }
    }
}

impl EmailGateway for BrevoEmailGateway {
    fn send(&self, message: &OutboundEmail) -> Result<DeliveryReceipt, EmailError> {
        let payload = BrevoPayload {
            sender: BrevoSender {
                name: &message.from_label,
                email: &self.sender_address,
            },
            to: vec![BrevoRecipient { email: &message.to }],
            subject: &message.subject,
            html_content: &message.html_body,
        };

        let client = Client::new();
        let response = client
            .post(BREVO_ENDPOINT)
            .header("api-key", &self.api_key)
            .json(&payload)
            .send()
            .map_err(|err| EmailError::Transport(err.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_else(|_| "(no body)".to_string());
            return Err(EmailError::Rejected {
                status: status.as_u16(),
                body,
            });
        }

        let accepted: BrevoAccepted = response
            .json()
            .map_err(|err| EmailError::Transport(err.to_string()))?;
        Ok(DeliveryReceipt {
            message_id: accepted.message_id,
        })
    }
}
