use anyhow::Context as _;
use chrono::{Datelike, Utc};
use lettre::message::{Mailbox, MultiPart};
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};

use crate::config::AuthConfig;
use crate::domain::repository::Mailer;
use crate::domain::types::{MailContent, MailTemplate};
use crate::error::AuthServiceError;

/// SMTP mailer. The transport is built once at startup and cloned into
/// handlers through `AppState`; it pools connections internally.
#[derive(Clone)]
pub struct SmtpMailer {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from: Mailbox,
}

impl SmtpMailer {
    pub fn new(config: &AuthConfig) -> anyhow::Result<Self> {
        let transport = AsyncSmtpTransport::<Tokio1Executor>::relay(&config.smtp_host)
            .context("invalid SMTP relay host")?
            .port(config.smtp_port)
            .credentials(Credentials::new(
                config.smtp_username.clone(),
                config.smtp_password.clone(),
            ))
            .build();
        let from = config
            .smtp_from
            .parse::<Mailbox>()
            .context("invalid SMTP_FROM address")?;
        Ok(Self { transport, from })
    }
}

impl Mailer for SmtpMailer {
    async fn send(
        &self,
        to: &str,
        subject: &str,
        content: &MailContent,
    ) -> Result<(), AuthServiceError> {
        let to_mailbox = to
            .parse::<Mailbox>()
            .map_err(|e| anyhow::anyhow!("invalid recipient address: {e}"))?;

        let builder = Message::builder()
            .from(self.from.clone())
            .to(to_mailbox)
            .subject(subject);

        let message = match &content.html {
            Some(template) => builder
                .multipart(MultiPart::alternative_plain_html(
                    content.text.clone(),
                    render_template(template),
                ))
                .context("build multipart mail")?,
            None => builder
                .header(lettre::message::header::ContentType::TEXT_PLAIN)
                .body(content.text.clone())
                .context("build plain mail")?,
        };

        self.transport
            .send(message)
            .await
            .map_err(|e| AuthServiceError::Delivery(e.into()))?;

        tracing::debug!(subject, "mail sent");
        Ok(())
    }
}

/// Render the HTML rendition: header with title, body copy, optional OTP
/// block, optional call-to-action button, footer.
fn render_template(template: &MailTemplate) -> String {
    let otp_block = match &template.otp {
        Some(otp) => format!(r#"<p>Your OTP code is:</p><p class="otp">{otp}</p>"#),
        None => String::new(),
    };
    let button_block = match &template.button {
        Some(button) => format!(
            r#"<div style="text-align: center;"><a href="{}" class="button">{}</a></div>"#,
            button.url, button.text
        ),
        None => String::new(),
    };
    let footer = match &template.footer {
        Some(footer) => footer.clone(),
        None => format!("© {} Sesame. All rights reserved.", Utc::now().year()),
    };
    let body = template.body.replace('\n', "<br>");

    format!(
        r#"<!DOCTYPE html>
<html>
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{title}</title>
    <style>
        body {{
            font-family: 'Segoe UI', Tahoma, Geneva, Verdana, sans-serif;
            line-height: 1.6;
            color: #333;
            max-width: 600px;
            margin: 0 auto;
            padding: 20px;
        }}
        .email-container {{
            border: 1px solid #e0e0e0;
            border-radius: 8px;
            overflow: hidden;
        }}
        .email-header {{
            background-color: #4f46e5;
            color: white;
            padding: 20px;
            text-align: center;
        }}
        .email-body {{
            padding: 30px;
            background-color: #ffffff;
            font-size: 16px;
        }}
        .otp {{
            font-size: 24px;
            font-weight: bold;
            background: #f4f4f4;
            padding: 10px;
            display: inline-block;
            border-radius: 5px;
            margin: 10px 0;
        }}
        .email-footer {{
            padding: 20px;
            text-align: center;
            font-size: 12px;
            color: #666;
            background-color: #f9f9f9;
        }}
        .button {{
            display: inline-block;
            padding: 12px 24px;
            background-color: #4f46e5;
            color: white;
            text-decoration: none;
            border-radius: 4px;
            font-weight: bold;
            margin: 20px 0;
        }}
    </style>
</head>
<body>
    <div class="email-container">
        <div class="email-header">
            <h1>{title}</h1>
        </div>
        <div class="email-body">
            <p>{body}</p>
            {otp_block}
            {button_block}
        </div>
        <div class="email-footer">
            {footer}
        </div>
    </div>
</body>
</html>
"#,
        title = template.title,
    )
}
