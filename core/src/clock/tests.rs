use super::*;
use crate::adapter::tests::MemoryStorage;
use crate::request::{HttpMethod, MockHttpClient};
use serde_json::json;

// =========================================================
// 辅助函数
// =========================================================

const USER: &str = "u1";
const BASE: &str = "http://backend";

fn create_clock(
    date: &str,
) -> (
    SimulatedClock<MemoryStorage, MockHttpClient>,
    MemoryStorage,
    MockHttpClient,
) {
    let storage = MemoryStorage::new();
    if !date.is_empty() {
        storage.set(KEY_SIM_DATE, date);
    }
    let client = MockHttpClient::new();
    let api = Api::new(BASE, client.clone());
    (SimulatedClock::new(storage.clone(), api), storage, client)
}

fn mock_check_ok(client: &MockHttpClient) {
    client.mock_response(
        HttpMethod::Post,
        "http://backend/users/u1/check-streak",
        200,
        json!({ "message": "streak extended" }),
    );
}

fn mock_publish_ok(client: &MockHttpClient) {
    client.mock_response(HttpMethod::Post, "http://backend/newsletters", 201, json!({}));
}

/// 指定方法与 URL 的请求体列表
fn bodies_of(client: &MockHttpClient, method: &str, url: &str) -> Vec<String> {
    client
        .sent()
        .into_iter()
        .filter(|r| r.method == method && r.url == url)
        .map(|r| r.body.unwrap_or_default())
        .collect()
}

// =========================================================
// current_date 测试
// =========================================================

#[tokio::test]
async fn test_current_date_defaults_to_epoch() {
    let (clock, _storage, _client) = create_clock("");
    assert_eq!(clock.current_date(), SimDate::epoch());

    let (clock, _storage, _client) = create_clock("garbage");
    assert_eq!(clock.current_date(), SimDate::epoch());
}

// =========================================================
// advance 测试
// =========================================================

#[tokio::test]
async fn test_advance_commits_next_day() {
    let (clock, storage, client) = create_clock("2025-02-20");
    mock_check_ok(&client);
    mock_publish_ok(&client);

    let next = clock.advance(USER).await;
    assert_eq!(next.to_string(), "2025-02-21");
    assert_eq!(storage.get(KEY_SIM_DATE), Some("2025-02-21".to_string()));
}

#[tokio::test]
async fn test_advance_checks_leaving_day_and_publishes_next() {
    let (clock, _storage, client) = create_clock("2025-02-20");
    mock_check_ok(&client);
    mock_publish_ok(&client);

    clock.advance(USER).await;

    // 恰好一次 check-streak，参数是被离开的旧日期
    let checks = bodies_of(&client, "POST", "http://backend/users/u1/check-streak");
    assert_eq!(checks.len(), 1);
    assert!(checks[0].contains("2025-02-20"));

    // 恰好一次发布，参数是新日期（21 日在窗口内且非周日）
    let publishes = bodies_of(&client, "POST", "http://backend/newsletters");
    assert_eq!(publishes.len(), 1);
    assert!(publishes[0].contains("2025-02-21"));
}

#[tokio::test]
async fn test_advance_at_window_tail_still_publishes() {
    let (clock, _storage, client) = create_clock("2025-02-27");
    mock_check_ok(&client);
    mock_publish_ok(&client);

    clock.advance(USER).await;

    let checks = bodies_of(&client, "POST", "http://backend/users/u1/check-streak");
    assert_eq!(checks.len(), 1);
    assert!(checks[0].contains("2025-02-27"));
    let publishes = bodies_of(&client, "POST", "http://backend/newsletters");
    assert_eq!(publishes.len(), 1);
    assert!(publishes[0].contains("2025-02-28"));
}

#[tokio::test]
async fn test_advance_out_of_window_never_publishes() {
    // 2 月 28 日之后离开窗口，从 3 月起不再发布
    let (clock, storage, client) = create_clock("2025-02-28");
    mock_check_ok(&client);
    mock_publish_ok(&client);

    clock.advance(USER).await;
    assert_eq!(storage.get(KEY_SIM_DATE), Some("2025-03-01".to_string()));
    assert!(bodies_of(&client, "POST", "http://backend/newsletters").is_empty());

    clock.advance(USER).await;
    clock.advance(USER).await;
    assert!(bodies_of(&client, "POST", "http://backend/newsletters").is_empty());
}

#[tokio::test]
async fn test_advance_onto_rest_day_skips_publish() {
    // 2025-02-23 是周日：check 照发，发布跳过
    let (clock, _storage, client) = create_clock("2025-02-22");
    mock_check_ok(&client);
    mock_publish_ok(&client);

    clock.advance(USER).await;

    assert_eq!(client.sent_to("/check-streak"), 1);
    assert!(bodies_of(&client, "POST", "http://backend/newsletters").is_empty());
}

#[tokio::test]
async fn test_advance_commits_even_if_check_fails() {
    // check-streak 未配置响应 → 404，提交照常
    let (clock, storage, client) = create_clock("2025-02-20");
    mock_publish_ok(&client);

    let next = clock.advance(USER).await;
    assert_eq!(next.to_string(), "2025-02-21");
    assert_eq!(storage.get(KEY_SIM_DATE), Some("2025-02-21".to_string()));
    // 失败的 check 仍然发出过
    assert_eq!(client.sent_to("/check-streak"), 1);
}

// =========================================================
// reset 测试
// =========================================================

#[tokio::test]
async fn test_reset_returns_to_epoch_from_any_date() {
    for start in ["2025-03-05", "2026-01-01", "2025-02-20"] {
        let (clock, storage, _client) = create_clock(start);
        let date = clock.reset(USER).await;
        assert_eq!(date, SimDate::epoch());
        assert_eq!(storage.get(KEY_SIM_DATE), Some("2025-02-20".to_string()));
    }
}

#[tokio::test]
async fn test_reset_issues_all_cleanup_calls_even_when_all_fail() {
    // 三个清理全部 404（未配置响应），但必须都发出
    let (clock, storage, client) = create_clock("2025-03-05");

    clock.reset(USER).await;

    let sent = client.sent();
    assert_eq!(sent.len(), 3);
    assert_eq!(client.sent_to("/newsletters"), 1);
    assert_eq!(client.sent_to("/users/u1/history"), 1);
    assert_eq!(client.sent_to("/users/u1/progress"), 1);
    // 日期不受清理失败影响
    assert_eq!(storage.get(KEY_SIM_DATE), Some("2025-02-20".to_string()));
}

#[tokio::test]
async fn test_reset_twice_is_idempotent() {
    let (clock, storage, client) = create_clock("2025-02-26");

    clock.reset(USER).await;
    clock.reset(USER).await;

    assert_eq!(storage.get(KEY_SIM_DATE), Some("2025-02-20".to_string()));
    // 清理尽力而为地执行了两轮
    assert_eq!(client.sent().len(), 6);
}

#[tokio::test]
async fn test_reset_cleanup_targets_epoch() {
    let (clock, _storage, client) = create_clock("2025-03-05");

    clock.reset(USER).await;

    let deletes = bodies_of(&client, "DELETE", "http://backend/newsletters");
    assert_eq!(deletes.len(), 1);
    assert!(deletes[0].contains("2025-02-20"));
}
