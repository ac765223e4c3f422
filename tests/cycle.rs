//! Whole cycles against a mocked device and a mocked Telegram API.

use std::time::Duration;

use chrono::{DateTime, Utc};
use simwatch::{
    ChannelKey, ChannelState, CycleReport, DebouncePolicy, DeviceSource, Monitor, Reading,
    StateSnapshot, StateStore, TelegramNotifier,
};
use simwatch_adapters::device::StatusPageClient;
use simwatch_adapters::telegram::TelegramClient;
use tempfile::TempDir;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn at(s: &str) -> DateTime<Utc> {
    s.parse().unwrap()
}

fn status_page(port: u16, sim: &str) -> String {
    format!(
        r#"<html><body><table>
        <tr><td>Port</td><td>{port}</td></tr>
        <tr><td>SIM</td><td id="l{port}_gsm_sim">{sim}</td></tr>
        <tr><td>Module</td><td id="l{port}_module_status">Ready</td></tr>
        <tr><td>GSM</td><td id="l{port}_gsm_status"><span>Registered</span></td></tr>
        <tr><td>Line</td><td id="l{port}_status_line">Idle</td></tr>
        </table></body></html>"#
    )
}

struct Harness {
    device: MockServer,
    telegram: MockServer,
    dir: TempDir,
}

impl Harness {
    async fn start() -> Self {
        let telegram = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/bot42:secret/sendMessage"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!({ "ok": true, "result": {} })),
            )
            .mount(&telegram)
            .await;

        Self {
            device: MockServer::start().await,
            telegram,
            dir: TempDir::new().unwrap(),
        }
    }

    async fn serve_page(&self, page: String) {
        self.device.reset().await;
        Mock::given(method("GET"))
            .and(path("/status.html"))
            .and(header("authorization", "Basic YWRtaW46c2VjcmV0"))
            .respond_with(ResponseTemplate::new(200).set_body_string(page))
            .mount(&self.device)
            .await;
    }

    async fn serve(&self, response: ResponseTemplate) {
        self.device.reset().await;
        Mock::given(method("GET"))
            .respond_with(response)
            .mount(&self.device)
            .await;
    }

    fn store(&self) -> StateStore {
        StateStore::new(self.dir.path().join("state").join("statuses.json"))
    }

    fn monitor(&self, port: u16) -> Monitor {
        let client = StatusPageClient::builder()
            .endpoint(self.device.uri())
            .credentials("admin", "secret")
            .timeout(Duration::from_millis(300))
            .build()
            .unwrap();
        let telegram = TelegramClient::builder()
            .api_base(self.telegram.uri())
            .token("42:secret")
            .chat_id("-100777")
            .build()
            .unwrap();

        Monitor::new(
            Box::new(DeviceSource::new(client)),
            Box::new(TelegramNotifier::new(telegram)),
            self.store(),
            DebouncePolicy::new(Duration::from_secs(120)),
            port,
        )
    }

    async fn messages(&self) -> Vec<String> {
        self.telegram
            .received_requests()
            .await
            .unwrap_or_default()
            .iter()
            .map(|request| {
                let body: serde_json::Value = serde_json::from_slice(&request.body).unwrap();
                body["text"].as_str().unwrap().to_string()
            })
            .collect()
    }
}

fn gsm_sim_down_since(since: &str, alert_sent: bool) -> StateSnapshot {
    let mut state = StateSnapshot::new();
    state.insert(
        ChannelKey::GsmSim,
        ChannelState {
            value: Reading::down(),
            since: at(since),
            alert_sent,
        },
    );
    state
}

#[tokio::test]
async fn test_down_alert_then_recovery() {
    let harness = Harness::start().await;
    harness
        .store()
        .save(&gsm_sim_down_since("2024-01-01T00:00:00Z", false))
        .unwrap();
    let monitor = harness.monitor(1);

    harness.serve_page(status_page(1, "N")).await;
    let report = monitor.run_cycle_at(at("2024-01-01T00:02:30Z")).await;

    assert_eq!(report.events().len(), 1);
    assert!(report.events()[0].is_down());
    let state = harness.store().load();
    assert_eq!(state[&ChannelKey::GsmSim], ChannelState {
        value: Reading::down(),
        since: at("2024-01-01T00:00:00Z"),
        alert_sent: true,
    });

    harness.serve_page(status_page(1, "1")).await;
    let report = monitor.run_cycle_at(at("2024-01-01T00:03:00Z")).await;

    assert_eq!(report.events().len(), 1);
    assert!(report.events()[0].is_recovery());
    let state = harness.store().load();
    assert_eq!(state[&ChannelKey::GsmSim], ChannelState {
        value: Reading::new("1"),
        since: at("2024-01-01T00:03:00Z"),
        alert_sent: false,
    });

    let messages = harness.messages().await;
    assert_eq!(messages.len(), 2);
    assert!(messages[0].starts_with("❌ <b>gsm_sim</b> down for more than 2m."));
    assert!(messages[0].contains("🧩 <b>SIM status (port 1):</b>"));
    assert!(messages[0].contains("⚠ GSM Status: <code>Registered</code>"));
    assert!(messages[1].starts_with("✅ <b>gsm_sim</b> recovered after 3m."));
    assert!(messages[1].contains("📍 SIM Inserted: <code>1</code>"));
}

#[tokio::test]
async fn test_down_within_grace_is_silent() {
    let harness = Harness::start().await;
    harness
        .store()
        .save(&gsm_sim_down_since("2024-01-01T00:00:00Z", false))
        .unwrap();
    let monitor = harness.monitor(1);

    harness.serve_page(status_page(1, "")).await;
    let report = monitor.run_cycle_at(at("2024-01-01T00:01:59Z")).await;

    assert!(report.events().is_empty());
    assert!(harness.messages().await.is_empty());
    assert!(!harness.store().load()[&ChannelKey::GsmSim].alert_sent);
}

#[tokio::test]
async fn test_fetch_timeout_keeps_state_file() {
    let harness = Harness::start().await;
    harness
        .store()
        .save(&gsm_sim_down_since("2024-01-01T00:00:00Z", false))
        .unwrap();
    let before = std::fs::read(harness.store().path()).unwrap();
    let monitor = harness.monitor(1);

    harness
        .serve(ResponseTemplate::new(200).set_delay(Duration::from_secs(2)))
        .await;
    let report = monitor.run_cycle_at(at("2024-01-01T00:10:00Z")).await;

    assert!(matches!(report, CycleReport::FetchFailed { auth: false, notified: true, .. }));
    let messages = harness.messages().await;
    assert_eq!(messages.len(), 1);
    assert!(messages[0].starts_with("❗ <b>Failed to fetch device status:</b>"));
    assert!(messages[0].contains("timed out"));
    assert_eq!(std::fs::read(harness.store().path()).unwrap(), before);
}

#[tokio::test]
async fn test_rejected_credentials() {
    let harness = Harness::start().await;
    let monitor = harness.monitor(1);

    harness.serve(ResponseTemplate::new(401)).await;
    let report = monitor.run_cycle().await;

    assert!(matches!(report, CycleReport::FetchFailed { auth: true, .. }));
    let messages = harness.messages().await;
    assert_eq!(messages.len(), 1);
    assert!(messages[0].starts_with("🔒 <b>Device rejected credentials (401)</b>"));
    assert!(!harness.store().path().exists());
}

#[tokio::test]
async fn test_telegram_outage_still_persists() {
    let harness = Harness::start().await;
    harness.telegram.reset().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&harness.telegram)
        .await;
    harness
        .store()
        .save(&gsm_sim_down_since("2024-01-01T00:00:00Z", false))
        .unwrap();
    let monitor = harness.monitor(1);

    harness.serve_page(status_page(1, "N")).await;
    let report = monitor.run_cycle_at(at("2024-01-01T00:05:00Z")).await;

    assert!(matches!(report, CycleReport::Evaluated { notified: false, persisted: true, .. }));
    assert!(harness.store().load()[&ChannelKey::GsmSim].alert_sent);
}

#[tokio::test]
async fn test_other_ports_are_ignored() {
    let harness = Harness::start().await;
    let monitor = harness.monitor(2);

    let page = format!("{}{}", status_page(1, "N"), status_page(2, "Y"));
    harness.serve_page(page).await;
    let report = monitor.run_cycle_at(at("2024-01-01T00:00:00Z")).await;

    match report {
        CycleReport::Evaluated { snapshot, .. } => {
            assert_eq!(snapshot.port, 2);
            assert_eq!(snapshot.get(ChannelKey::GsmSim).unwrap().as_str(), "Y");
        }
        other => panic!("unexpected report: {other:?}"),
    }
}

#[tokio::test]
async fn test_dry_run_leaves_no_state() {
    let harness = Harness::start().await;
    let monitor = harness.monitor(1).dry_run(true);

    harness.serve_page(status_page(1, "Y")).await;
    let report = monitor.run_cycle().await;

    assert!(matches!(report, CycleReport::Evaluated { persisted: false, .. }));
    assert!(!harness.store().path().exists());
}
