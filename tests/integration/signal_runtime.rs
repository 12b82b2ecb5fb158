//! Integration tests for the signal polling pass

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use levelwatch::core::runtime::{PassSummary, RuntimeConfig, SignalRuntime};
use levelwatch::jobs::{process_symbol, JobContext};
use levelwatch::services::binance::{BinanceMarketDataProvider, BinanceRestClient};
use levelwatch::services::chart::PngChartRenderer;
use levelwatch::services::pushbullet::PushbulletNotifier;
use levelwatch::signals::DirectionClassifier;
use levelwatch::storage::{FileModelStore, MemoryModelStore};
use levelwatch::Error;
use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use crate::test_utils::{
    create_test_candles, mock_binance_klines, RecordingSink, StaticMarketData,
};

struct Harness {
    runtime: SignalRuntime,
    context: Arc<JobContext>,
    sink: Arc<RecordingSink>,
    store: Arc<MemoryModelStore>,
    _dir: tempfile::TempDir,
}

fn harness(symbols: &str, provider: StaticMarketData) -> Harness {
    let dir = tempfile::tempdir().unwrap();
    let symbols_file = dir.path().join("symbols.txt");
    std::fs::write(&symbols_file, symbols).unwrap();

    let sink = Arc::new(RecordingSink::new());
    let store = Arc::new(MemoryModelStore::new());
    let renderer = PngChartRenderer::new(dir.path().join("images")).unwrap();
    let context = Arc::new(JobContext::new(
        Arc::new(provider),
        DirectionClassifier::new(store.clone()),
        Arc::new(renderer),
        sink.clone(),
    ));
    let runtime = SignalRuntime::new(
        RuntimeConfig {
            poll_interval: Duration::from_secs(600),
            symbols_file,
        },
        context.clone(),
    );

    Harness {
        runtime,
        context,
        sink,
        store,
        _dir: dir,
    }
}

#[tokio::test]
async fn failing_symbol_does_not_abort_pass() {
    let provider = StaticMarketData::new()
        .with("BTC/USDT", create_test_candles(100, 30_000.0))
        .with("ETH/USDT", create_test_candles(100, 2_000.0));
    let h = harness("BTC/USDT\nFOO/BAR\n\nETH/USDT\n", provider);

    let summary = h.runtime.run_pass().await.unwrap();
    assert_eq!(
        summary,
        PassSummary {
            succeeded: 2,
            failed: 1
        }
    );

    let sent = h.sink.sent();
    assert_eq!(sent.len(), 2);
    assert_eq!(sent[0].title, "Tín hiệu BTC/USDT");
    assert_eq!(sent[0].symbol.as_deref(), Some("BTC/USDT"));
    assert!(sent[0].message.starts_with("=== TÍN HIỆU BTC/USDT ==="));
    assert!(sent[0].message.contains("💡 Dự đoán: "));
    let image = sent[0].image.as_deref().unwrap();
    assert!(image.ends_with("BTC_USDT.png"));
    assert!(image.is_file());
    assert_eq!(sent[1].title, "Tín hiệu ETH/USDT");
    assert_eq!(h.store.len(), 2);
}

#[tokio::test]
async fn second_pass_reuses_models() {
    let provider = StaticMarketData::new().with("BTC/USDT", create_test_candles(100, 30_000.0));
    let h = harness("BTC/USDT\n", provider);

    h.runtime.run_pass().await.unwrap();
    h.runtime.run_pass().await.unwrap();

    let sent = h.sink.sent();
    assert_eq!(sent.len(), 2);
    assert_eq!(sent[0].message, sent[1].message);
    assert_eq!(h.store.len(), 1);
}

#[tokio::test]
async fn short_history_is_insufficient() {
    let provider = StaticMarketData::new().with("BTC/USDT", create_test_candles(30, 30_000.0));
    let h = harness("BTC/USDT\n", provider);

    let result = process_symbol(&h.context, "BTC/USDT").await;
    assert!(matches!(result, Err(Error::InsufficientData(_))));
    assert!(h.sink.sent().is_empty());
    assert!(h.store.is_empty());
}

#[tokio::test]
async fn missing_symbols_file_fails_the_pass() {
    let h = harness("", StaticMarketData::new());
    std::fs::remove_file(&h.runtime.config().symbols_file).unwrap();

    assert!(h.runtime.run_pass().await.is_err());
}

#[tokio::test]
async fn empty_symbols_file_is_an_empty_pass() {
    let h = harness("\n\n", StaticMarketData::new());
    assert_eq!(h.runtime.run_pass().await.unwrap(), PassSummary::default());
}

#[tokio::test]
async fn end_to_end_over_http() {
    let binance = MockServer::start().await;
    mock_binance_klines(&binance, "ETHUSDT", 100, 2_000.0).await;

    let pushbullet = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v2/upload-request"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "file_name": "ETH_USDT.png",
            "file_type": "image/png",
            "file_url": "https://files.example/ETH_USDT.png",
            "upload_url": format!("{}/upload", pushbullet.uri()),
        })))
        .mount(&pushbullet)
        .await;
    Mock::given(method("POST"))
        .and(path("/upload"))
        .respond_with(ResponseTemplate::new(204))
        .mount(&pushbullet)
        .await;
    Mock::given(method("GET"))
        .and(path("/v2/channels"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "channels": [{"iden": "c1", "tag": "eth_channel"}]
        })))
        .mount(&pushbullet)
        .await;
    Mock::given(method("POST"))
        .and(path("/v2/pushes"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"iden": "p1"})))
        .expect(1)
        .mount(&pushbullet)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let provider = BinanceMarketDataProvider::new(BinanceRestClient::with_client(
        binance.uri(),
        reqwest::Client::new(),
    ));
    let notifier = PushbulletNotifier::with_client(
        pushbullet.uri(),
        "token",
        reqwest::Client::new(),
        HashMap::from([("ETH/USDT".to_string(), "eth_channel".to_string())]),
    );
    let store = FileModelStore::new(dir.path().join("models")).unwrap();
    let context = JobContext::new(
        Arc::new(provider),
        DirectionClassifier::new(Arc::new(store)),
        Arc::new(PngChartRenderer::new(dir.path().join("images")).unwrap()),
        Arc::new(notifier),
    );

    process_symbol(&context, "ETH/USDT").await.expect("signal sent");

    assert!(dir.path().join("models").join("ETH_USDT_model.json").is_file());
    let requests = pushbullet.received_requests().await.unwrap();
    let push = requests
        .iter()
        .find(|r| r.url.path() == "/v2/pushes")
        .expect("push request");
    let body: serde_json::Value = serde_json::from_slice(&push.body).unwrap();
    assert_eq!(body["type"], "file");
    assert_eq!(body["channel_tag"], "eth_channel");
    assert!(body["body"].as_str().unwrap().starts_with("=== TÍN HIỆU ETH/USDT ==="));
}
