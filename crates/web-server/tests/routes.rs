use axum::body::{Body, to_bytes};
use axum::http::{Request, StatusCode};
use configuration::settings::Config;
use serde_json::Value;
use tower::ServiceExt;

fn config_in(dir: &std::path::Path) -> Config {
    let mut config = Config::default();
    config.paths.status_file = dir.join("status.json");
    config.paths.metrics_file = dir.join("metrics.json");
    config.paths.trade_ledger = dir.join("data.csv");
    config
}

async fn get(config: &Config, uri: &str) -> (StatusCode, Vec<u8>) {
    let response = web_server::router(config)
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, body.to_vec())
}

#[tokio::test]
async fn root_is_inert() {
    let dir = tempfile::tempdir().unwrap();
    let (status, body) = get(&config_in(dir.path()), "/").await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body, b"Access Denied");
}

#[tokio::test]
async fn unknown_paths_do_not_exist() {
    let dir = tempfile::tempdir().unwrap();
    let (status, _) = get(&config_in(dir.path()), "/api/health").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn report_without_upstream_data_is_best_effort() {
    let dir = tempfile::tempdir().unwrap();
    let config = config_in(dir.path());
    let (status, body) = get(&config, &config.server.report_path).await;
    assert_eq!(status, StatusCode::OK);

    let report: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(report["equity"], 0.0);
    assert_eq!(report["last_equity"], 100000.0);
    assert_eq!(report["max_dd"], 0.0);
    assert_eq!(report["sharpe"], 0.0);
    assert_eq!(report["trades"], Value::Array(Vec::new()));
}

#[tokio::test]
async fn report_reflects_files() {
    let dir = tempfile::tempdir().unwrap();
    let mut config = config_in(dir.path());
    config.server.report_path = "/report".to_string();

    std::fs::write(
        &config.paths.status_file,
        r#"{ "equity": 99000.0, "cash": 500.0, "invested": 98500.0, "last_equity": 99000.0 }"#,
    )
    .unwrap();
    std::fs::write(
        &config.paths.metrics_file,
        r#"{ "high_water_mark": 110000.0, "max_drawdown": -10.0 }"#,
    )
    .unwrap();
    std::fs::write(
        &config.paths.trade_ledger,
        "timestamp,action,price,qty,cash_available,shares_held\n\
         2025-03-01 10:00:00,BUY,1.00,100,900.00,100\n\
         2025-03-01 10:05:00,SELL,1.10,100,1010.00,0\n",
    )
    .unwrap();

    let (status, body) = get(&config, "/report").await;
    assert_eq!(status, StatusCode::OK);
    let report: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(report["equity"], 99000.0);
    assert_eq!(report["daily_pct"], 0.0);
    assert_eq!(report["total_pct"], -1.0);
    assert_eq!(report["max_dd"], -10.0);
    assert_eq!(report["high_water_mark"], 110000.0);
    assert_eq!(report["trades"][0]["action"], "SELL");
    assert_eq!(report["trades"][0]["timestamp"], "2025-03-01 10:05:00");
    assert_eq!(report["trades"][1]["action"], "BUY");

    // The default route is gone once another is configured.
    let (status, _) = get(&config, "/live-quant-strategy-doge").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
