use std::fmt::Write as _;

use chrono::NaiveDate;

use crate::workflows::fees::domain::PaymentMethod;
use crate::workflows::viewings::domain::ViewingSlot;

/// Subject line plus self-contained HTML document, ready for the gateway.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedEmail {
    pub subject: String,
    pub html_body: String,
}

/// The closed set of documents this service sends.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Template {
    FeeRequestNotice,
    ApplicationConfirmation,
    ViewingNotice,
}

impl Template {
    pub const fn name(self) -> &'static str {
        match self {
            Template::FeeRequestNotice => "fee_request_notice",
            Template::ApplicationConfirmation => "application_confirmation",
            Template::ViewingNotice => "viewing_notice",
        }
    }

    /// Outer document skeleton. The `{{body}}` and `{{year}}` slots are the
    /// only substitution points; everything else is fixed at compile time.
    const fn skeleton(self) -> &'static str {
        match self {
            Template::FeeRequestNotice | Template::ViewingNotice => ADMIN_SHELL,
            Template::ApplicationConfirmation => APPLICANT_SHELL,
        }
    }
}

const BODY_SLOT: &str = "{{body}}";
const YEAR_SLOT: &str = "{{year}}";

const ADMIN_SHELL: &str = concat!(
    "<!DOCTYPE html>\n<html>\n",
    "<body style=\"font-family: Arial, sans-serif; line-height: 1.6; color: #333;\">\n",
    "<div style=\"max-width: 600px; margin: 0 auto; padding: 20px; border: 1px solid #e0e0e0;\">\n",
    "{{body}}",
    "<hr style=\"margin-top: 30px; border: none; border-top: 1px solid #eee;\">\n",
    "<p style=\"font-size: 0.8em; color: #999;\">Internal notification &middot; ",
    "&copy; {{year}} Parkview Apartments</p>\n",
    "</div>\n</body>\n</html>\n",
);

const APPLICANT_SHELL: &str = concat!(
    "<!DOCTYPE html>\n<html>\n",
    "<body style=\"font-family: Arial, sans-serif; line-height: 1.6; color: #333;\">\n",
    "<div style=\"max-width: 600px; margin: 0 auto; padding: 20px;\">\n",
    "{{body}}",
    "<p>Questions? Just reply to this email and our leasing team will help.</p>\n",
    "<hr style=\"margin-top: 30px; border: none; border-top: 1px solid #eee;\">\n",
    "<p style=\"font-size: 0.8em; color: #999;\">&copy; {{year}} Parkview Apartments</p>\n",
    "</div>\n</body>\n</html>\n",
);

fn wrap(template: Template, body: &str, rendered_on: NaiveDate) -> String {
    // Year first, so a literal "{{year}}" inside user-supplied body text is
    // left alone.
    template
        .skeleton()
        .replace(YEAR_SLOT, &rendered_on.format("%Y").to_string())
        .replace(BODY_SLOT, body)
}

/// Data for the admin notification fired when a fee request is created.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeeRequestNotice {
    pub transaction_id: String,
    pub applicant_name: String,
    pub applicant_email: String,
    pub applicant_phone: Option<String>,
    pub apartment_title: String,
    pub amount: u32,
    pub payment_method: PaymentMethod,
}

pub fn render_fee_request_notice(notice: &FeeRequestNotice, rendered_on: NaiveDate) -> RenderedEmail {
    let mut body = String::new();
    writeln!(body, "<h2>New application fee request</h2>").expect("write heading");
    writeln!(
        body,
        "<p>A prospective tenant selected <strong>{}</strong> for the application fee on <strong>{}</strong>.</p>",
        escape_html(notice.payment_method.label()),
        escape_html(&notice.apartment_title)
    )
    .expect("write intro");

    writeln!(body, "<table style=\"border-collapse: collapse;\">").expect("write table");
    detail_row(&mut body, "Tracking code", &notice.transaction_id);
    detail_row(&mut body, "Applicant", &notice.applicant_name);
    detail_row(&mut body, "Email", &notice.applicant_email);
    if let Some(phone) = &notice.applicant_phone {
        detail_row(&mut body, "Phone", phone);
    }
    detail_row(&mut body, "Amount", &format!("${}", notice.amount));
    writeln!(body, "</table>").expect("close table");

    writeln!(body, "<h3>Next steps</h3>\n<ol>").expect("write steps heading");
    match notice.payment_method {
        PaymentMethod::Zelle => {
            writeln!(
                body,
                "<li>Reply to the applicant with the Zelle recipient tag for this property.</li>"
            )
            .expect("write step");
        }
        PaymentMethod::Chime => {
            writeln!(
                body,
                "<li>Reply to the applicant with the Chime $ChimeSign ID for this property.</li>"
            )
            .expect("write step");
        }
    }
    writeln!(
        body,
        "<li>Include the tracking code <strong>{}</strong> so the payment can be matched.</li>",
        escape_html(&notice.transaction_id)
    )
    .expect("write step");
    writeln!(
        body,
        "<li>Once the applicant sends a payment screenshot, verify it and mark the fee record accordingly.</li>\n</ol>"
    )
    .expect("write step");

    RenderedEmail {
        subject: format!(
            "ACTION REQUIRED: Application fee request {}",
            notice.transaction_id
        ),
        html_body: wrap(Template::FeeRequestNotice, &body, rendered_on),
    }
}

/// Data for the applicant-facing confirmation of a submitted application.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApplicationConfirmation {
    pub tracking_number: String,
    pub applicant_name: String,
    pub apartment_title: String,
    pub move_in_date: NaiveDate,
    pub tracking_url: String,
}

pub fn render_application_confirmation(
    confirmation: &ApplicationConfirmation,
    rendered_on: NaiveDate,
) -> RenderedEmail {
    let mut body = String::new();
    writeln!(
        body,
        "<h2>Thanks, {} — we have your application</h2>",
        escape_html(&confirmation.applicant_name)
    )
    .expect("write heading");
    writeln!(
        body,
        "<p>Your rental application for <strong>{}</strong> with a requested move-in of <strong>{}</strong> has been submitted to our leasing team.</p>",
        escape_html(&confirmation.apartment_title),
        confirmation.move_in_date.format("%B %-d, %Y")
    )
    .expect("write intro");
    writeln!(
        body,
        "<p>Your tracking number is <strong>{}</strong>. Keep it handy when contacting us.</p>",
        escape_html(&confirmation.tracking_number)
    )
    .expect("write tracking");
    writeln!(
        body,
        "<p style=\"margin: 25px 0;\"><a href=\"{}\" style=\"background-color: #2f6f4f; color: white; padding: 10px 20px; text-decoration: none; border-radius: 5px; display: inline-block;\">Track your application</a></p>",
        escape_html(&confirmation.tracking_url)
    )
    .expect("write link");

    RenderedEmail {
        subject: format!(
            "Application received — {}",
            confirmation.tracking_number
        ),
        html_body: wrap(Template::ApplicationConfirmation, &body, rendered_on),
    }
}

/// Data for the admin notification about a requested viewing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewingNotice {
    pub applicant_name: String,
    pub applicant_email: String,
    pub applicant_phone: String,
    pub apartment_title: String,
    pub preferred_date: NaiveDate,
    pub slot: ViewingSlot,
    pub message: Option<String>,
}

pub fn render_viewing_notice(notice: &ViewingNotice, rendered_on: NaiveDate) -> RenderedEmail {
    let mut body = String::new();
    writeln!(body, "<h2>New viewing request</h2>").expect("write heading");
    writeln!(
        body,
        "<p><strong>{}</strong> would like to tour <strong>{}</strong> on <strong>{}</strong> at <strong>{}</strong>.</p>",
        escape_html(&notice.applicant_name),
        escape_html(&notice.apartment_title),
        notice.preferred_date.format("%B %-d, %Y"),
        notice.slot.label()
    )
    .expect("write intro");

    writeln!(body, "<table style=\"border-collapse: collapse;\">").expect("write table");
    detail_row(&mut body, "Email", &notice.applicant_email);
    detail_row(&mut body, "Phone", &notice.applicant_phone);
    writeln!(body, "</table>").expect("close table");

    if let Some(message) = &notice.message {
        writeln!(
            body,
            "<p><em>&ldquo;{}&rdquo;</em></p>",
            escape_html(message)
        )
        .expect("write message");
    }

    RenderedEmail {
        subject: format!("New viewing request for {}", notice.apartment_title),
        html_body: wrap(Template::ViewingNotice, &body, rendered_on),
    }
}

fn detail_row(body: &mut String, label: &str, value: &str) {
    writeln!(
        body,
        "<tr><td style=\"padding: 4px 12px 4px 0; color: #666;\">{}</td><td style=\"padding: 4px 0;\"><strong>{}</strong></td></tr>",
        label,
        escape_html(value)
    )
    .expect("write detail row");
}

pub(crate) fn escape_html(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            other => escaped.push(other),
        }
    }
    escaped
}
