//! Webhooks tab: filters, delivery cards and the simulated test delivery.

use chrono::{DateTime, NaiveDate, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

use super::{matches_choice, matches_search};
use crate::models::webhook::{Model as WebhookModel, TEST_EVENT};
use crate::models::webhook_log::Model as WebhookLogModel;
use crate::repositories::webhook::DeliveryRecord;

#[derive(Debug, Clone, Default, Deserialize, Serialize, IntoParams, ToSchema)]
#[into_params(parameter_in = Query)]
pub struct WebhookFilter {
    /// Substring searched in name and URL
    pub search: Option<String>,
    /// all | active | inactive | error
    pub status: Option<String>,
    pub platform: Option<String>,
}

impl WebhookFilter {
    pub fn matches(&self, webhook: &WebhookModel) -> bool {
        matches_search(self.search.as_deref(), &[&webhook.name, &webhook.url])
            && matches_choice(self.status.as_deref(), &webhook.status)
            && matches_choice(self.platform.as_deref(), &webhook.platform)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct WebhookStats {
    pub active_webhooks: usize,
    /// Deliveries logged on `today` (UTC)
    pub calls_today: usize,
    /// Rounded percentage of successful deliveries; 100 with no deliveries
    pub success_rate: f64,
    pub failed_calls: usize,
}

/// Cards over every webhook and the loaded delivery logs.
pub fn stats(webhooks: &[WebhookModel], logs: &[WebhookLogModel], today: NaiveDate) -> WebhookStats {
    let successes = logs.iter().filter(|log| log.status == "success").count();
    let success_rate = if logs.is_empty() {
        100.0
    } else {
        (successes as f64 / logs.len() as f64 * 100.0).round()
    };

    WebhookStats {
        active_webhooks: webhooks.iter().filter(|w| w.status == "active").count(),
        calls_today: logs
            .iter()
            .filter(|log| log.timestamp.with_timezone(&Utc).date_naive() == today)
            .count(),
        success_rate,
        failed_calls: logs.iter().filter(|log| log.status == "failed").count(),
    }
}

/// Body recorded for a test delivery.
pub fn test_payload(webhook_id: Uuid, now: DateTime<Utc>) -> Value {
    json!({
        "event": TEST_EVENT,
        "timestamp": now.to_rfc3339(),
        "data": {
            "message": "Test webhook from LicenseHub Admin Dashboard",
            "webhook_id": webhook_id,
        }
    })
}

/// A successful simulated delivery with a response time in 100..600 ms.
pub fn simulated_test_delivery<R: Rng + ?Sized>(
    rng: &mut R,
    webhook_id: Uuid,
    now: DateTime<Utc>,
) -> DeliveryRecord {
    DeliveryRecord {
        event: TEST_EVENT.to_string(),
        status: "success".to_string(),
        response_code: Some(200),
        response_time_ms: rng.gen_range(100..600),
        payload: test_payload(webhook_id, now),
        error: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn webhook(name: &str, status: &str, platform: &str) -> WebhookModel {
        WebhookModel {
            id: Uuid::new_v4(),
            name: name.to_string(),
            url: format!("https://{}.example.com/hook", name.to_lowercase()),
            platform: platform.to_string(),
            events: None,
            status: status.to_string(),
            secret: "whsec_x".to_string(),
            retry_count: 3,
            timeout: 30,
            total_calls: 0,
            success_rate: 100.0,
            last_triggered: None,
            created_at: Utc::now().fixed_offset(),
        }
    }

    fn log(status: &str, at: DateTime<Utc>) -> WebhookLogModel {
        WebhookLogModel {
            id: Uuid::new_v4(),
            webhook_id: Uuid::new_v4(),
            event: TEST_EVENT.to_string(),
            status: status.to_string(),
            response_code: Some(200),
            response_time: 150,
            payload: "{}".to_string(),
            error: None,
            retry_count: 0,
            timestamp: at.fixed_offset(),
        }
    }

    #[test]
    fn filter_by_status_platform_and_url() {
        let hooks = [
            webhook("Orders", "active", "lebonlogiciel"),
            webhook("Leads", "error", "prospection"),
        ];
        let filter = WebhookFilter {
            search: Some("leads.example".into()),
            status: Some("error".into()),
            platform: Some("prospection".into()),
        };
        assert!(!filter.matches(&hooks[0]));
        assert!(filter.matches(&hooks[1]));
        assert!(hooks.iter().all(|h| WebhookFilter::default().matches(h)));
    }

    #[test]
    fn stats_without_logs() {
        let hooks = [webhook("a", "active", "lebonlogiciel"), webhook("b", "inactive", "prospection")];
        let today = Utc::now().date_naive();
        let stats = stats(&hooks, &[], today);
        assert_eq!(stats.active_webhooks, 1);
        assert_eq!(stats.calls_today, 0);
        assert_eq!(stats.success_rate, 100.0);
        assert_eq!(stats.failed_calls, 0);
    }

    #[test]
    fn stats_count_today_and_failures() {
        let now = Utc.with_ymd_and_hms(2025, 3, 10, 12, 0, 0).unwrap();
        let logs = [
            log("success", now),
            log("failed", now - Duration::hours(1)),
            log("success", now - Duration::days(2)),
        ];
        let stats = stats(&[], &logs, now.date_naive());
        assert_eq!(stats.calls_today, 2);
        assert_eq!(stats.failed_calls, 1);
        assert_eq!(stats.success_rate, 67.0);
    }

    #[test]
    fn simulated_delivery_is_a_success_within_bounds() {
        let mut rng = StdRng::seed_from_u64(7);
        let id = Uuid::new_v4();
        let now = Utc::now();
        for _ in 0..50 {
            let delivery = simulated_test_delivery(&mut rng, id, now);
            assert!((100..600).contains(&delivery.response_time_ms));
            assert_eq!(delivery.status, "success");
            assert_eq!(delivery.response_code, Some(200));
            assert_eq!(delivery.event, "test.webhook");
            assert_eq!(delivery.payload["data"]["webhook_id"], json!(id));
        }
    }
}
