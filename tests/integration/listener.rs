//! Integration tests for the entry command listener

use std::collections::HashMap;
use std::sync::Arc;

use levelwatch::core::listener::{CommandListener, InboxCursor, PollOutcome};
use levelwatch::indicators::structure::LevelConfig;
use levelwatch::models::signal::EntrySide;
use levelwatch::services::binance::{BinanceMarketDataProvider, BinanceRestClient};
use levelwatch::services::pushbullet::PushbulletNotifier;
use levelwatch::signals::entry::EntryConfig;
use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use crate::test_utils::{create_test_candles, mock_binance_klines, RecordingSink, StaticMarketData};

async fn listener_with(sink: Arc<RecordingSink>) -> CommandListener {
    let provider = StaticMarketData::new().with("BTC/USDT", create_test_candles(100, 30_000.0));
    let symbols = vec!["BTC/USDT".to_string(), "DOGE/USDT".to_string()];
    let history = CommandListener::preload(&provider, &symbols, "4h", 100).await;
    CommandListener::new(sink, history, LevelConfig::default(), EntryConfig::default())
}

#[tokio::test]
async fn preload_skips_failing_symbols() {
    let listener = listener_with(Arc::new(RecordingSink::new())).await;
    assert!(listener.has_history("btc/usdt"));
    assert!(listener.has_history("BTC/USDT"));
    assert!(!listener.has_history("DOGE/USDT"));
}

#[tokio::test]
async fn entry_command_gets_analysis_reply() {
    let sink = Arc::new(RecordingSink::new());
    let listener = listener_with(sink.clone()).await;
    let mut cursor = InboxCursor::new();

    sink.post("m1", "LONG 30500 btc/usdt");
    let outcome = listener.poll_once(&mut cursor).await.unwrap();

    let analysis = match outcome {
        PollOutcome::Analyzed(analysis) => analysis,
        other => panic!("expected analysis, got {:?}", other),
    };
    assert_eq!(analysis.symbol, "BTC/USDT");
    assert_eq!(analysis.side, EntrySide::Long);
    assert_eq!(analysis.entry_price, 30500.0);
    assert!(analysis.stop_loss < 30500.0);
    assert!(analysis.take_profit > 30500.0);
    assert_eq!(cursor.last_id.as_deref(), Some("m1"));

    let sent = sink.sent();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].title, "Phân tích lệnh");
    assert!(sent[0]
        .message
        .starts_with("=== PHÂN TÍCH LỆNH 'LONG 30500.0' (BTC/USDT) ==="));
    assert_eq!(sent[0].image, None);
    assert_eq!(sent[0].symbol, None);
}

#[tokio::test]
async fn same_message_is_handled_once() {
    let sink = Arc::new(RecordingSink::new());
    let listener = listener_with(sink.clone()).await;
    let mut cursor = InboxCursor::new();

    sink.post("m1", "short 31000 btc/usdt");
    assert!(matches!(
        listener.poll_once(&mut cursor).await.unwrap(),
        PollOutcome::Analyzed(_)
    ));
    assert_eq!(listener.poll_once(&mut cursor).await.unwrap(), PollOutcome::Idle);
    assert_eq!(sink.sent().len(), 1);

    sink.post("m2", "short 31000 btc/usdt");
    assert!(matches!(
        listener.poll_once(&mut cursor).await.unwrap(),
        PollOutcome::Analyzed(_)
    ));
    assert_eq!(sink.sent().len(), 2);
}

#[tokio::test]
async fn unknown_symbol_gets_error_reply() {
    let sink = Arc::new(RecordingSink::new());
    let listener = listener_with(sink.clone()).await;
    let mut cursor = InboxCursor::new();

    sink.post("m1", "long 0.5 doge/usdt");
    assert_eq!(
        listener.poll_once(&mut cursor).await.unwrap(),
        PollOutcome::MissingData("DOGE/USDT".to_string())
    );

    let sent = sink.sent();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].title, "Lỗi");
    assert_eq!(sent[0].message, "Không tìm thấy dữ liệu cho DOGE/USDT");
}

#[tokio::test]
async fn chatter_is_ignored() {
    let sink = Arc::new(RecordingSink::new());
    let listener = listener_with(sink.clone()).await;
    let mut cursor = InboxCursor::new();

    assert_eq!(listener.poll_once(&mut cursor).await.unwrap(), PollOutcome::Idle);

    sink.post("m1", "Tín hiệu BTC/USDT");
    assert_eq!(listener.poll_once(&mut cursor).await.unwrap(), PollOutcome::Ignored);
    assert_eq!(cursor.last_id.as_deref(), Some("m1"));
    assert!(sink.sent().is_empty());
}

#[tokio::test]
async fn listener_over_http() {
    let binance = MockServer::start().await;
    mock_binance_klines(&binance, "BTCUSDT", 100, 30_000.0).await;

    let pushbullet = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v2/pushes"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "pushes": [{"iden": "abc", "body": "long 30000 btc/usdt"}]
        })))
        .mount(&pushbullet)
        .await;
    Mock::given(method("POST"))
        .and(path("/v2/pushes"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"iden": "reply"})))
        .expect(1)
        .mount(&pushbullet)
        .await;

    let provider = BinanceMarketDataProvider::new(BinanceRestClient::with_client(
        binance.uri(),
        reqwest::Client::new(),
    ));
    let history =
        CommandListener::preload(&provider, &["BTC/USDT".to_string()], "4h", 100).await;
    let notifier = PushbulletNotifier::with_client(
        pushbullet.uri(),
        "token",
        reqwest::Client::new(),
        HashMap::new(),
    );
    let listener = CommandListener::new(
        Arc::new(notifier),
        history,
        LevelConfig::default(),
        EntryConfig::default(),
    );

    let mut cursor = InboxCursor::new();
    assert!(matches!(
        listener.poll_once(&mut cursor).await.unwrap(),
        PollOutcome::Analyzed(_)
    ));
    assert_eq!(listener.poll_once(&mut cursor).await.unwrap(), PollOutcome::Idle);
}
