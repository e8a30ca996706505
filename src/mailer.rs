use async_trait::async_trait;
use lettre::{
    message::header::ContentType, transport::smtp::authentication::Credentials,
    AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
};
use tracing::info;

use crate::config::SmtpConfig;

/// Outbound mail seam. The app holds `Option<Arc<dyn Mailer>>`: `None` means
/// mail is not configured and accounts skip verification entirely.
#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send_verification(&self, to: &str, nombre: &str, token: &str) -> anyhow::Result<()>;
}

pub struct SmtpMailer {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from: String,
    base_url: String,
}

impl SmtpMailer {
    pub fn new(cfg: &SmtpConfig, base_url: &str) -> anyhow::Result<Self> {
        let transport = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&cfg.host)?
            .port(cfg.port)
            .credentials(Credentials::new(cfg.username.clone(), cfg.password.clone()))
            .build();

        Ok(Self {
            transport,
            from: format!("{} <{}>", cfg.from_name, cfg.from_email),
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    fn verification_url(&self, token: &str) -> String {
        format!("{}/api/verificar-email?token={}", self.base_url, token)
    }
}

#[async_trait]
impl Mailer for SmtpMailer {
    async fn send_verification(&self, to: &str, nombre: &str, token: &str) -> anyhow::Result<()> {
        let url = self.verification_url(token);
        let html = format!(
            r#"<body style="font-family: Arial, sans-serif; max-width: 600px; margin: 0 auto; padding: 20px;">
    <h1>¡Bienvenido a UAN Films, {nombre}!</h1>
    <p>Confirma tu dirección de correo haciendo clic en el botón:</p>
    <p style="text-align: center; margin: 30px 0;">
        <a href="{url}" style="background-color: #4CAF50; color: white; padding: 12px 24px; text-decoration: none; border-radius: 4px; display: inline-block;">Verificar correo</a>
    </p>
    <p style="color: #666; font-size: 14px;">O copia y pega este enlace en tu navegador:</p>
    <p style="color: #666; font-size: 14px; word-break: break-all;">{url}</p>
    <p style="color: #999; font-size: 12px; margin-top: 40px;">Este enlace expira en 24 horas.</p>
</body>"#
        );

        let email = Message::builder()
            .from(self.from.parse()?)
            .to(to.parse()?)
            .subject("Verifica tu cuenta de UAN Films")
            .header(ContentType::TEXT_HTML)
            .body(html)?;

        self.transport.send(email).await?;
        info!(to = %to, "verification email sent");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn smtp_cfg() -> SmtpConfig {
        SmtpConfig {
            host: "smtp.example.com".into(),
            port: 587,
            username: "user".into(),
            password: "pass".into(),
            from_email: "noreply@uanfilms.test".into(),
            from_name: "UAN Films".into(),
        }
    }

    #[test]
    fn verification_url_joins_base_and_token() {
        let mailer = SmtpMailer::new(&smtp_cfg(), "http://localhost:3000/").expect("build mailer");
        assert_eq!(
            mailer.verification_url("abc123"),
            "http://localhost:3000/api/verificar-email?token=abc123"
        );
    }
}
