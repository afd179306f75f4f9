//! Direct SMTP submission client
//!
//! Speaks the submission protocol itself rather than going through a local
//! mail server: connect, `EHLO`, `STARTTLS`, `EHLO` again over TLS,
//! `AUTH LOGIN`, envelope, `DATA`, `QUIT`. Any reply code other than the
//! expected one at any stage aborts the exchange immediately and closes
//! the channel; the caller decides whether to retry.

use async_trait::async_trait;
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, AsyncRead, AsyncWrite, AsyncWriteExt, BufStream};
use tokio::net::TcpStream;
use tokio::time::timeout;
use tokio_rustls::rustls::pki_types::ServerName;
use tokio_rustls::rustls::{ClientConfig, RootCertStore};
use tokio_rustls::TlsConnector;
use tracing::{info, warn};
use uuid::Uuid;

use crate::config::SmtpConfig;
use crate::error::MailError;

/// A message handed to a mailer for one delivery attempt
#[derive(Debug, Clone)]
pub struct OutgoingEmail {
    /// Stable id used for the Message-ID header
    pub message_id: Uuid,
    pub to: String,
    pub subject: String,
    pub body: String,
}

/// Seam between the dispatcher and the concrete transport
#[async_trait]
pub trait Mailer: Send + Sync {
    /// Performs exactly one delivery attempt
    async fn send(&self, mail: &OutgoingEmail) -> Result<(), MailError>;
}

/// SMTP submission client with STARTTLS and AUTH LOGIN
#[derive(Clone)]
pub struct SmtpMailer {
    config: SmtpConfig,
    tls: TlsConnector,
}

impl SmtpMailer {
    pub fn new(config: SmtpConfig) -> Self {
        let mut roots = RootCertStore::empty();
        roots.extend(webpki_roots::TLS_SERVER_ROOTS.iter().cloned());
        let tls_config = ClientConfig::builder()
            .with_root_certificates(roots)
            .with_no_client_auth();

        Self {
            config,
            tls: TlsConnector::from(Arc::new(tls_config)),
        }
    }

    async fn session(&self, mail: &OutgoingEmail) -> Result<(), MailError> {
        let host = &self.config.host;
        let port = self.config.port;

        let tcp = TcpStream::connect((host.as_str(), port))
            .await
            .map_err(|e| MailError::Connect {
                host: host.clone(),
                port,
                message: e.to_string(),
            })?;

        // Plaintext phase: greeting, capabilities, upgrade request.
        let mut plain = BufStream::new(tcp);
        expect_reply(&mut plain, 220, "greeting").await?;
        command(&mut plain, &format!("EHLO {host}"), 250, "EHLO").await?;
        command(&mut plain, "STARTTLS", 220, "STARTTLS").await?;

        let server_name = ServerName::try_from(host.clone())
            .map_err(|e| MailError::Tls(e.to_string()))?;
        let tls_stream = self
            .tls
            .connect(server_name, plain.into_inner())
            .await
            .map_err(|e| MailError::Tls(e.to_string()))?;

        // Encrypted phase: re-greet, authenticate, envelope, payload.
        let mut stream = BufStream::new(tls_stream);
        command(&mut stream, &format!("EHLO {host}"), 250, "EHLO over TLS").await?;

        command(&mut stream, "AUTH LOGIN", 334, "AUTH LOGIN").await?;
        command(
            &mut stream,
            &BASE64.encode(&self.config.username),
            334,
            "AUTH username",
        )
        .await?;
        command(
            &mut stream,
            &BASE64.encode(&self.config.password),
            235,
            "AUTH password",
        )
        .await?;

        command(
            &mut stream,
            &format!("MAIL FROM:<{}>", self.config.sender),
            250,
            "MAIL FROM",
        )
        .await?;
        command(&mut stream, &format!("RCPT TO:<{}>", mail.to), 250, "RCPT TO").await?;
        command(&mut stream, "DATA", 354, "DATA").await?;

        let payload = self.render(mail);
        stream
            .write_all(payload.as_bytes())
            .await
            .map_err(|e| MailError::io("message body", e))?;
        stream
            .write_all(b"\r\n.\r\n")
            .await
            .map_err(|e| MailError::io("message body", e))?;
        stream
            .flush()
            .await
            .map_err(|e| MailError::io("message body", e))?;
        expect_reply(&mut stream, 250, "message body").await?;

        // Best-effort goodbye; the message is already accepted.
        let _ = stream.write_all(b"QUIT\r\n").await;
        let _ = stream.flush().await;

        Ok(())
    }

    /// Renders headers plus the dot-stuffed body with CRLF line endings
    fn render(&self, mail: &OutgoingEmail) -> String {
        format!(
            "MIME-Version: 1.0\r\n\
             Content-Type: text/plain; charset=utf-8\r\n\
             From: {name} <{sender}>\r\n\
             To: {to}\r\n\
             Subject: {subject}\r\n\
             Message-ID: <{id}@{host}>\r\n\
             \r\n\
             {body}",
            name = self.config.sender_name,
            sender = self.config.sender,
            to = mail.to,
            subject = mail.subject,
            id = mail.message_id,
            host = self.config.host,
            body = dot_stuff(&mail.body),
        )
    }
}

#[async_trait]
impl Mailer for SmtpMailer {
    async fn send(&self, mail: &OutgoingEmail) -> Result<(), MailError> {
        let budget = self.config.timeout();
        let result = match timeout(budget, self.session(mail)).await {
            Ok(result) => result,
            Err(_) => Err(MailError::Timeout {
                seconds: self.config.timeout_secs,
            }),
        };

        match &result {
            Ok(()) => info!(
                recipient = %mail.to,
                subject = %mail.subject,
                "SMTP delivery succeeded"
            ),
            Err(e) => warn!(
                recipient = %mail.to,
                subject = %mail.subject,
                error = %e,
                "SMTP delivery failed"
            ),
        }
        result
    }
}

/// Reads one (possibly multiline) reply and checks its code.
///
/// Continuation lines carry a `-` after the code (`250-SIZE ...`). The
/// final line usually has a space there, but a bare `250<CRLF>` is also
/// legal, so anything other than `-` ends the reply.
async fn expect_reply<S>(
    stream: &mut BufStream<S>,
    expected: u16,
    stage: &'static str,
) -> Result<(), MailError>
where
    S: AsyncRead + AsyncWrite + Unpin + Send,
{
    let mut line = String::new();
    loop {
        line.clear();
        let n = stream
            .read_line(&mut line)
            .await
            .map_err(|e| MailError::io(stage, e))?;
        if n == 0 {
            return Err(MailError::ConnectionClosed { stage });
        }
        if line.len() < 4 || line.as_bytes()[3] != b'-' {
            break;
        }
    }

    let code: u16 = line
        .get(..3)
        .and_then(|digits| digits.parse().ok())
        .ok_or_else(|| MailError::UnexpectedReply {
            stage,
            expected,
            reply: line.trim_end().to_string(),
        })?;

    if code != expected {
        return Err(MailError::UnexpectedReply {
            stage,
            expected,
            reply: line.trim_end().to_string(),
        });
    }
    Ok(())
}

/// Writes one command line and checks the reply
async fn command<S>(
    stream: &mut BufStream<S>,
    line: &str,
    expected: u16,
    stage: &'static str,
) -> Result<(), MailError>
where
    S: AsyncRead + AsyncWrite + Unpin + Send,
{
    stream
        .write_all(line.as_bytes())
        .await
        .map_err(|e| MailError::io(stage, e))?;
    stream
        .write_all(b"\r\n")
        .await
        .map_err(|e| MailError::io(stage, e))?;
    stream.flush().await.map_err(|e| MailError::io(stage, e))?;
    expect_reply(stream, expected, stage).await
}

/// Normalizes line endings to CRLF and doubles leading dots so body text
/// cannot terminate the DATA section early
fn dot_stuff(body: &str) -> String {
    let mut out = String::with_capacity(body.len() + 8);
    for (i, line) in body.split('\n').enumerate() {
        if i > 0 {
            out.push_str("\r\n");
        }
        let line = line.strip_suffix('\r').unwrap_or(line);
        if line.starts_with('.') {
            out.push('.');
        }
        out.push_str(line);
    }
    out
}
