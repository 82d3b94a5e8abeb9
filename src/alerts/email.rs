use std::sync::Arc;
use std::time::Duration;

use anyhow::{bail, Context, Result};
use async_trait::async_trait;
use lettre::message::header::ContentType;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use tracing::{info, warn};

use crate::core::config::EmailConfig;
use crate::store::alert_log::AlertLog;
use crate::store::opportunities::Opportunity;

const SMTP_TIMEOUT: Duration = Duration::from_secs(10);

/// Pushes alert-worthy opportunities to the operator.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AlertDispatcher: Send + Sync {
    /// Sends one notification covering the whole batch. Only called with a
    /// non-empty batch.
    async fn notify(&self, opportunities: &[Opportunity]) -> Result<()>;

    /// Sends a fixed probe message so the operator can verify delivery.
    async fn send_test(&self) -> Result<()>;
}

/// HTML email alerts over SMTP (STARTTLS).
pub struct EmailAlerter {
    mailer: AsyncSmtpTransport<Tokio1Executor>,
    config: EmailConfig,
    alert_log: Arc<AlertLog>,
}

impl EmailAlerter {
    pub fn new(config: EmailConfig, alert_log: Arc<AlertLog>) -> Result<Self> {
        let mailer = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.smtp_host)?
            .port(config.smtp_port)
            .credentials(Credentials::new(
                config.user.clone(),
                config.password.clone(),
            ))
            .timeout(Some(SMTP_TIMEOUT))
            .build();

        Ok(Self {
            mailer,
            config,
            alert_log,
        })
    }

    async fn send_html(&self, to: &str, subject: &str, html: String) -> Result<()> {
        let email = Message::builder()
            .from(self.config.user.parse().context("sender address")?)
            .to(to.parse().context("alert recipient address")?)
            .subject(subject)
            .header(ContentType::TEXT_HTML)
            .body(html)?;

        self.mailer.send(email).await?;
        Ok(())
    }
}

#[async_trait]
impl AlertDispatcher for EmailAlerter {
    async fn notify(&self, opportunities: &[Opportunity]) -> Result<()> {
        let Some(alert_to) = self.config.alert_to.as_deref() else {
            warn!("⚠️ No alert email configured, skipping alert");
            return Ok(());
        };

        let subject = alert_subject(opportunities.len());
        self.send_html(alert_to, &subject, alert_body(opportunities))
            .await?;

        self.alert_log.record(opportunities).await;
        info!("📧 Alert sent to {}", alert_to);
        Ok(())
    }

    async fn send_test(&self) -> Result<()> {
        let Some(alert_to) = self.config.alert_to.as_deref() else {
            bail!("no alert email configured");
        };

        let html = "<h2>✅ Email alerts are working!</h2>\
                    <p>You will receive notifications when new flip opportunities are found.</p>"
            .to_string();
        self.send_html(alert_to, "✅ Card Flip Assistant - Email Test", html)
            .await?;

        info!("📧 Test email sent to {}", alert_to);
        Ok(())
    }
}

fn alert_subject(count: usize) -> String {
    let noun = if count == 1 { "Opportunity" } else { "Opportunities" };
    format!("🚨 {} New Card Flip {} Found!", count, noun)
}

fn alert_body(opportunities: &[Opportunity]) -> String {
    let mut html = String::new();
    html.push_str("<div style=\"font-family: Arial, sans-serif; max-width: 600px; margin: 0 auto;\">");
    html.push_str(
        "<div style=\"background: linear-gradient(135deg, #667eea 0%, #764ba2 100%); \
         color: white; padding: 20px; text-align: center;\">",
    );
    html.push_str("<h1>🚨 New Flip Opportunities!</h1>");
    html.push_str(&format!(
        "<p>{} cards found with profit potential</p></div>",
        opportunities.len()
    ));

    for opp in opportunities {
        html.push_str("<div style=\"border: 1px solid #ddd; margin: 10px; padding: 15px; border-radius: 8px;\">");
        html.push_str(&format!("<h3>{}</h3>", opp.title));
        html.push_str(&format!(
            "<p><strong>💰 Buy:</strong> ${} → <strong>Sell:</strong> ${}</p>",
            opp.projection.current_price, opp.projection.projected_sale_price
        ));
        html.push_str(&format!(
            "<p><strong>📈 Profit:</strong> ${} ({}% ROI)</p>",
            opp.projection.net_profit, opp.projection.roi
        ));
        html.push_str(&format!(
            "<p><strong>🎯 Confidence:</strong> {}% | <strong>Risk:</strong> {}</p>",
            opp.projection.confidence, opp.projection.risk_level
        ));
        html.push_str(&format!(
            "<p><strong>🏷️ Type:</strong> {} | <strong>Category:</strong> {}</p>",
            opp.strategy.label(),
            opp.category.label()
        ));
        html.push_str(&format!(
            "<a href=\"{}\" style=\"background: #28a745; color: white; padding: 10px 20px; \
             text-decoration: none; border-radius: 5px; display: inline-block;\">View Listing</a>",
            opp.item_url
        ));
        html.push_str("</div>");
    }

    html.push_str(
        "<div style=\"background: #f8f9fa; padding: 15px; text-align: center; \
         font-size: 12px; color: #666;\">",
    );
    html.push_str("<p>💡 Tip: Act fast on high-confidence opportunities!</p></div></div>");
    html
}
