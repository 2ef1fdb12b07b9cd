use crate::config::smtp::SmtpConfig;
use crate::core::{Notification, Notifier};
use crate::utils::error::{Result, WatchError};
use crate::utils::validation::Validate;
use async_trait::async_trait;
use lettre::message::header::ContentType;
use lettre::message::Mailbox;
use lettre::transport::smtp::authentication::Credentials;
use lettre::transport::smtp::client::{Tls, TlsParameters};
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};

fn delivery_error(e: impl std::fmt::Display) -> WatchError {
    WatchError::DeliveryError {
        message: e.to_string(),
    }
}

/// Sends plain-text mail over SMTP with mandatory STARTTLS and login auth.
pub struct SmtpNotifier {
    config: SmtpConfig,
}

impl SmtpNotifier {
    pub fn new(config: SmtpConfig) -> Self {
        if config.accept_invalid_certs {
            tracing::warn!(
                "⚠️ TLS certificate verification is disabled for {}",
                config.host
            );
        }
        Self { config }
    }

    pub fn build_message(&self, notification: &Notification) -> Result<Message> {
        let from: Mailbox = self.config.from_address.parse().map_err(delivery_error)?;
        let to: Mailbox = notification.recipient.parse().map_err(delivery_error)?;

        Message::builder()
            .from(from)
            .to(to)
            .subject(notification.subject.as_str())
            .header(ContentType::TEXT_PLAIN)
            .body(notification.body.clone())
            .map_err(delivery_error)
    }

    fn transport(&self) -> Result<AsyncSmtpTransport<Tokio1Executor>> {
        let tls = TlsParameters::builder(self.config.host.clone())
            .dangerous_accept_invalid_certs(self.config.accept_invalid_certs)
            .build_rustls()
            .map_err(delivery_error)?;

        // Tls::Required: refuse to continue if the server does not offer STARTTLS
        Ok(
            AsyncSmtpTransport::<Tokio1Executor>::builder_dangerous(self.config.host.as_str())
                .port(self.config.port)
                .tls(Tls::Required(tls))
                .credentials(Credentials::new(
                    self.config.username.clone(),
                    self.config.password.clone(),
                ))
                .build(),
        )
    }
}

#[async_trait]
impl Notifier for SmtpNotifier {
    async fn notify(&self, notification: &Notification) -> Result<()> {
        self.config.validate()?;

        let message = self.build_message(notification)?;
        let transport = self.transport()?;

        tracing::debug!(
            "Sending mail to {} via {}:{}",
            notification.recipient,
            self.config.host,
            self.config.port
        );
        transport.send(message).await.map_err(delivery_error)?;

        tracing::debug!("Mail accepted by {}", self.config.host);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
    use tokio::net::TcpListener;
    use tokio::task::JoinHandle;

    /// SMTP server that never offers STARTTLS. Returns the commands it received.
    async fn plaintext_smtp_server() -> (u16, JoinHandle<Vec<String>>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let port = listener.local_addr().unwrap().port();

        let handle = tokio::spawn(async move {
            let mut commands = Vec::new();
            let Ok(Ok((stream, _))) =
                tokio::time::timeout(Duration::from_secs(5), listener.accept()).await
            else {
                return commands;
            };

            let (read, mut write) = stream.into_split();
            let mut lines = BufReader::new(read).lines();
            if write.write_all(b"220 mail.test ESMTP\r\n").await.is_err() {
                return commands;
            }

            while let Ok(Ok(Some(line))) =
                tokio::time::timeout(Duration::from_secs(5), lines.next_line()).await
            {
                let reply: &[u8] = if line.starts_with("EHLO") {
                    b"250-mail.test\r\n250-8BITMIME\r\n250 AUTH PLAIN LOGIN\r\n"
                } else if line.starts_with("QUIT") {
                    b"221 bye\r\n"
                } else {
                    b"250 OK\r\n"
                };
                commands.push(line);
                if write.write_all(reply).await.is_err() {
                    break;
                }
            }
            commands
        });

        (port, handle)
    }

    fn config() -> SmtpConfig {
        SmtpConfig {
            host: "127.0.0.1".to_string(),
            port: 1,
            username: "watch".to_string(),
            password: "secret".to_string(),
            from_address: "watch@example.com".to_string(),
            accept_invalid_certs: false,
        }
    }

    fn notification() -> Notification {
        Notification {
            recipient: "me@example.com".to_string(),
            subject: "TOEFL iBT AVAILABLE".to_string(),
            body: "Good news!\n\nTOEFL iBT capacity is now 2.".to_string(),
        }
    }

    #[test]
    fn test_build_message_headers() {
        let notifier = SmtpNotifier::new(config());
        let message = notifier.build_message(&notification()).unwrap();
        let raw = String::from_utf8(message.formatted()).unwrap();

        assert!(raw.contains("From: watch@example.com"));
        assert!(raw.contains("To: me@example.com"));
        assert!(raw.contains("Subject: TOEFL iBT AVAILABLE"));
        assert!(raw.contains("Content-Type: text/plain"));
        assert!(raw.contains("capacity is now 2."));
    }

    #[test]
    fn test_build_message_rejects_bad_recipient() {
        let notifier = SmtpNotifier::new(config());
        let mut bad = notification();
        bad.recipient = "not an address".to_string();

        assert!(matches!(
            notifier.build_message(&bad),
            Err(WatchError::DeliveryError { .. })
        ));
    }

    #[tokio::test]
    async fn test_notify_fails_fast_on_empty_fields() {
        for field in ["host", "username", "password", "from_address"] {
            let mut cfg = config();
            match field {
                "host" => cfg.host.clear(),
                "username" => cfg.username.clear(),
                "password" => cfg.password.clear(),
                _ => cfg.from_address.clear(),
            }

            let err = SmtpNotifier::new(cfg)
                .notify(&notification())
                .await
                .unwrap_err();
            assert!(
                matches!(err, WatchError::MissingConfigError { .. }),
                "{} should be reported as missing, got {:?}",
                field,
                err
            );
        }
    }

    #[tokio::test]
    async fn test_notify_connection_refused_is_delivery_error() {
        let err = SmtpNotifier::new(config())
            .notify(&notification())
            .await
            .unwrap_err();
        assert!(matches!(err, WatchError::DeliveryError { .. }));
        assert!(!err.is_fatal());
    }

    #[tokio::test]
    async fn test_notify_refuses_server_without_starttls() {
        let (port, server) = plaintext_smtp_server().await;
        let mut cfg = config();
        cfg.host = "localhost".to_string();
        cfg.port = port;

        let err = SmtpNotifier::new(cfg)
            .notify(&notification())
            .await
            .unwrap_err();
        assert!(matches!(err, WatchError::DeliveryError { .. }));

        let commands = server.await.unwrap();
        assert!(
            commands.iter().any(|c| c.starts_with("EHLO")),
            "client never greeted the server: {:?}",
            commands
        );
        // 沒有加密就不能登入或送信
        assert!(!commands.iter().any(|c| c.starts_with("AUTH")));
        assert!(!commands.iter().any(|c| c.starts_with("MAIL FROM")));
        assert!(!commands.iter().any(|c| c.starts_with("DATA")));
    }
}
