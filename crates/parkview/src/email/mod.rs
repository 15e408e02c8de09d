//! Outbound transactional email: the delivery seam, the Brevo client, and
//! the typed HTML renderer.

pub mod brevo;
pub mod gateway;
pub mod render;

pub use brevo::BrevoEmailGateway;
pub use gateway::{DeliveryReceipt, EmailError, EmailGateway, OutboundEmail};
pub use render::{
    render_application_confirmation, render_fee_request_notice, render_viewing_notice,
    ApplicationConfirmation, FeeRequestNotice, ViewingNotice,
};
