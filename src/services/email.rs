use lettre::{
    message::{header::ContentType, Mailbox},
    transport::smtp::authentication::Credentials,
    AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
};

use crate::config::SmtpConfig;
use crate::models::otp_models::OtpPurpose;
use crate::utils::error::{AppError, AppResult};
use crate::utils::otp::OTP_TTL_MINUTES;

pub struct Mailer {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from: Mailbox,
}

impl Mailer {
    pub fn from_config(smtp: &SmtpConfig) -> AppResult<Self> {
        let transport = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&smtp.host)
            .map_err(|e| AppError::EmailError(format!("Invalid SMTP relay: {}", e)))?
            .port(smtp.port)
            .credentials(Credentials::new(
                smtp.username.clone(),
                smtp.password.clone(),
            ))
            .build();

        let from = format!("{} <{}>", smtp.from_name, smtp.from_address)
            .parse()
            .map_err(|e| AppError::EmailError(format!("Invalid from address: {}", e)))?;

        Ok(Self { transport, from })
    }

    pub async fn send_otp(&self, to: &str, code: &str, purpose: OtpPurpose) -> AppResult<()> {
        let to_mailbox: Mailbox = to
            .parse()
            .map_err(|_| AppError::ValidationError("Invalid email address".to_string()))?;

        let message = Message::builder()
            .from(self.from.clone())
            .to(to_mailbox)
            .subject(subject_for(purpose))
            .header(ContentType::TEXT_HTML)
            .body(otp_body(code, purpose))
            .map_err(|e| AppError::EmailError(format!("Failed to build email: {}", e)))?;

        self.transport
            .send(message)
            .await
            .map_err(|e| AppError::EmailError(format!("Failed to send email: {}", e)))?;

        tracing::info!(%to, purpose = purpose.as_str(), "OTP email sent");

        Ok(())
    }
}

fn subject_for(purpose: OtpPurpose) -> &'static str {
    match purpose {
        OtpPurpose::Registration => "Verify Your Email Address",
        OtpPurpose::PasswordReset => "Reset Your Password",
    }
}

fn otp_body(code: &str, purpose: OtpPurpose) -> String {
    format!(
        "<h1>{}</h1>\
         <p>Your verification code is: <strong>{}</strong></p>\
         <p>This code will expire in {} minutes.</p>\
         <p>If you didn't request this, please ignore this email.</p>",
        subject_for(purpose),
        code,
        OTP_TTL_MINUTES
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn subject_depends_on_purpose() {
        assert_eq!(
            subject_for(OtpPurpose::Registration),
            "Verify Your Email Address"
        );
        assert_eq!(subject_for(OtpPurpose::PasswordReset), "Reset Your Password");
    }

    #[test]
    fn body_contains_code_and_ttl() {
        let body = otp_body("482916", OtpPurpose::Registration);
        assert!(body.contains("482916"));
        assert!(body.contains("10 minutes"));
    }
}
