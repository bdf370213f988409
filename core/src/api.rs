//! 后端 REST 网关
//!
//! 每个后端操作一个方法，对具体 HTTP 实现泛型。
//! 网关只负责传输与解码；重试、回滚一概不做，由调用方决定如何消化失败。

use crate::error::{ClientError, ClientResult};
use crate::log_error;
use crate::request::{HttpClient, HttpMethod, HttpRequest, HttpResponse};
use newscase_shared::date::SimDate;
use newscase_shared::history::{HistoryEntry, HistoryResponse};
use newscase_shared::{
    CampaignEffectivenessRow, LeaderboardRow, MetricUser, MostViewedNewsletter, Newsletter, Role,
    SessionUser, SourceDistributionRow, StreakStatus,
};
use serde::Deserialize;
use serde_json::json;

// =========================================================
// 网关内部的响应包装
// =========================================================

/// 登录成功响应
#[derive(Debug, Clone, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    pub user: SessionUser,
    #[serde(default, rename = "redirectTo")]
    pub redirect_to: Option<String>,
}

/// 登录失败时后端返回的错误体
#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    error: String,
}

#[derive(Debug, Deserialize)]
struct StreakBody {
    #[serde(default)]
    streak: u32,
    /// 旧版后端不返回 highscore
    highscore: Option<u32>,
}

#[derive(Debug, Deserialize)]
struct MessageBody {
    #[serde(default)]
    message: String,
}

#[derive(Debug, Deserialize)]
struct AvatarIdBody {
    #[serde(default, rename = "avatarId")]
    avatar_id: String,
}

#[derive(Debug, Deserialize)]
struct RoleBody {
    #[serde(default)]
    role: Role,
}

#[derive(Debug, Deserialize)]
struct EmailBody {
    #[serde(default)]
    email: String,
}

// =========================================================
// 网关
// =========================================================

/// REST 网关
#[derive(Debug, Clone)]
pub struct Api<C> {
    base_url: String,
    token: Option<String>,
    client: C,
}

impl<C: HttpClient> Api<C> {
    pub fn new(base_url: impl Into<String>, client: C) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            base_url,
            token: None,
            client,
        }
    }

    /// 附带 bearer 令牌（登录后的所有调用）
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// 头像图片本体走独立的二进制地址，由 `<img>` 直接加载；
    /// 版本号拼进查询串实现按版本失效。
    pub fn avatar_image_url(&self, user_id: &str, version: u32) -> String {
        format!("{}/users/{}/avatar?v={}", self.base_url, user_id, version)
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn request(&self, path: &str, method: HttpMethod) -> HttpRequest {
        let req = HttpRequest::new(&self.url(path), method);
        match &self.token {
            Some(t) => req.with_header("Authorization", &format!("Bearer {}", t)),
            None => req,
        }
    }

    /// 发送并要求 2xx
    async fn send_ok(&self, req: HttpRequest, op: &str) -> ClientResult<HttpResponse> {
        let res = self
            .client
            .send(req)
            .await
            .map_err(|e| e.in_op(op.to_string()))?;
        if !res.ok() {
            return Err(ClientError::network(format!("HTTP {}", res.status)).in_op(op.to_string()));
        }
        Ok(res)
    }

    // ---- 认证 ----

    /// 登录。旧部署仍暴露 /login，404 时回退一次。
    pub async fn login(&self, email: &str, password: &str) -> ClientResult<LoginResponse> {
        let body = json!({ "email": email, "password": password });
        let mut res = self
            .client
            .send(self.request("/auth/login", HttpMethod::Post).with_json(body.clone()))
            .await?;
        if res.status == 404 {
            res = self
                .client
                .send(self.request("/login", HttpMethod::Post).with_json(body))
                .await?;
        }
        if !res.ok() {
            let msg = res.json::<ErrorBody>().map(|b| b.error).unwrap_or_default();
            let msg = if msg.is_empty() {
                format!("登录失败: HTTP {}", res.status)
            } else {
                msg
            };
            return Err(ClientError::auth(msg));
        }
        res.json::<LoginResponse>()
    }

    // ---- 内容 ----

    pub async fn newsletters(&self) -> ClientResult<Vec<Newsletter>> {
        self.send_ok(self.request("/newsletters", HttpMethod::Get), "api.newsletters")
            .await?
            .json()
    }

    pub async fn newsletter(&self, id: &str) -> ClientResult<Newsletter> {
        self.send_ok(
            self.request(&format!("/newsletters/{}", id), HttpMethod::Get),
            "api.newsletter",
        )
        .await?
        .json()
    }

    /// 为指定模拟日期发布一期内容
    pub async fn publish_newsletter(&self, date: SimDate) -> ClientResult<()> {
        self.send_ok(
            self.request("/newsletters", HttpMethod::Post)
                .with_json(json!({ "date": date.to_string() })),
            "api.publish_newsletter",
        )
        .await?;
        Ok(())
    }

    /// 删除指定日期之后的全部内容（重置清理）
    pub async fn delete_newsletters_after(&self, date: SimDate) -> ClientResult<()> {
        self.send_ok(
            self.request("/newsletters", HttpMethod::Delete)
                .with_json(json!({ "date": date.to_string() })),
            "api.delete_newsletters_after",
        )
        .await?;
        Ok(())
    }

    // ---- 阅读历史 ----

    /// 读取历史并归一化
    ///
    /// 载荷形态不稳定：整体解析失败时降级为空列表，只记日志。
    pub async fn history(&self, user_id: &str) -> ClientResult<Vec<HistoryEntry>> {
        let res = self
            .send_ok(
                self.request(&format!("/users/{}/history", user_id), HttpMethod::Get),
                "api.history",
            )
            .await?;
        let parsed: HistoryResponse = match res.json() {
            Ok(p) => p,
            Err(e) => {
                log_error!("[Api] history payload unreadable: {}", e);
                return Ok(Vec::new());
            }
        };
        Ok(parsed.history.normalize())
    }

    pub async fn append_history(
        &self,
        user_id: &str,
        newsletter_id: &str,
        date: SimDate,
    ) -> ClientResult<()> {
        self.send_ok(
            self.request(&format!("/users/{}/history", user_id), HttpMethod::Post)
                .with_json(json!({
                    "newsletterId": newsletter_id,
                    "simulatedDate": date.to_string(),
                })),
            "api.append_history",
        )
        .await?;
        Ok(())
    }

    pub async fn delete_history(&self, user_id: &str) -> ClientResult<()> {
        self.send_ok(
            self.request(&format!("/users/{}/history", user_id), HttpMethod::Delete),
            "api.delete_history",
        )
        .await?;
        Ok(())
    }

    // ---- 连续打卡 ----

    pub async fn streak(&self, user_id: &str) -> ClientResult<StreakStatus> {
        let body: StreakBody = self
            .send_ok(
                self.request(&format!("/users/{}/streak", user_id), HttpMethod::Get),
                "api.streak",
            )
            .await?
            .json()?;
        Ok(StreakStatus {
            streak: body.streak,
            highscore: body.highscore.unwrap_or(body.streak),
        })
    }

    /// 请后端判定指定日期的打卡是否延续（豁免规则在服务端）
    pub async fn check_streak(&self, user_id: &str, date: SimDate) -> ClientResult<String> {
        let body: MessageBody = self
            .send_ok(
                self.request(&format!("/users/{}/check-streak", user_id), HttpMethod::Post)
                    .with_json(json!({ "date": date.to_string() })),
                "api.check_streak",
            )
            .await?
            .json()
            .unwrap_or(MessageBody {
                message: String::new(),
            });
        Ok(body.message)
    }

    pub async fn delete_progress(&self, user_id: &str) -> ClientResult<()> {
        self.send_ok(
            self.request(&format!("/users/{}/progress", user_id), HttpMethod::Delete),
            "api.delete_progress",
        )
        .await?;
        Ok(())
    }

    // ---- 头像 ----

    pub async fn avatar_id(&self, user_id: &str) -> ClientResult<String> {
        let body: AvatarIdBody = self
            .send_ok(
                self.request(&format!("/users/{}/avatar-id", user_id), HttpMethod::Get),
                "api.avatar_id",
            )
            .await?
            .json()?;
        Ok(body.avatar_id)
    }

    /// 持久化头像选择（提交的是图片路径）
    pub async fn set_avatar(&self, user_id: &str, image_path: &str) -> ClientResult<()> {
        self.send_ok(
            self.request(&format!("/users/{}/avatar", user_id), HttpMethod::Put)
                .with_json(json!({ "avatar": image_path })),
            "api.set_avatar",
        )
        .await?;
        Ok(())
    }

    // ---- 用户信息 ----

    pub async fn role(&self, user_id: &str) -> ClientResult<Role> {
        let body: RoleBody = self
            .send_ok(
                self.request(&format!("/users/{}/role", user_id), HttpMethod::Get),
                "api.role",
            )
            .await?
            .json()?;
        Ok(body.role)
    }

    pub async fn email(&self, user_id: &str) -> ClientResult<String> {
        let body: EmailBody = self
            .send_ok(
                self.request(&format!("/users/{}/email", user_id), HttpMethod::Get),
                "api.email",
            )
            .await?
            .json()?;
        Ok(body.email)
    }

    // ---- 管理 ----

    pub async fn leaderboard(&self) -> ClientResult<Vec<LeaderboardRow>> {
        self.send_ok(self.request("/leaderboard", HttpMethod::Get), "api.leaderboard")
            .await?
            .json()
    }

    pub async fn most_viewed_newsletter(&self) -> ClientResult<MostViewedNewsletter> {
        self.send_ok(
            self.request("/statistics/most-viewed-newsletter", HttpMethod::Get),
            "api.most_viewed_newsletter",
        )
        .await?
        .json()
    }

    pub async fn highest_streak_user(&self) -> ClientResult<MetricUser> {
        self.send_ok(
            self.request("/statistics/highest-streak-user", HttpMethod::Get),
            "api.highest_streak_user",
        )
        .await?
        .json()
    }

    pub async fn highest_highscore_user(&self) -> ClientResult<MetricUser> {
        self.send_ok(
            self.request("/statistics/highest-highscore-user", HttpMethod::Get),
            "api.highest_highscore_user",
        )
        .await?
        .json()
    }

    pub async fn user_distribution(&self) -> ClientResult<Vec<SourceDistributionRow>> {
        self.send_ok(
            self.request("/statistics/user-distribution", HttpMethod::Get),
            "api.user_distribution",
        )
        .await?
        .json()
    }

    pub async fn campaign_effectiveness(&self) -> ClientResult<Vec<CampaignEffectivenessRow>> {
        self.send_ok(
            self.request("/statistics/campaign-effectiveness", HttpMethod::Get),
            "api.campaign_effectiveness",
        )
        .await?
        .json()
    }
}

// =========================================================
// 测试
// =========================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::request::MockHttpClient;

    const BASE: &str = "http://backend";

    fn create_api() -> (Api<MockHttpClient>, MockHttpClient) {
        let client = MockHttpClient::new();
        (Api::new(BASE, client.clone()), client)
    }

    #[tokio::test]
    async fn test_login_success() {
        let (api, client) = create_api();
        client.mock_response(
            HttpMethod::Post,
            "http://backend/auth/login",
            200,
            serde_json::json!({
                "token": "t-1",
                "user": { "id": "u1", "role": "admin" },
                "redirectTo": "/dashboard"
            }),
        );

        let res = api.login("a@b.c", "pw").await.unwrap();
        assert_eq!(res.token, "t-1");
        assert_eq!(res.user.role, Role::Admin);
        assert_eq!(res.redirect_to.as_deref(), Some("/dashboard"));
    }

    #[tokio::test]
    async fn test_login_falls_back_to_legacy_path() {
        let (api, client) = create_api();
        // /auth/login 未配置 → 404 → 回退 /login
        client.mock_response(
            HttpMethod::Post,
            "http://backend/login",
            200,
            serde_json::json!({ "token": "t-2", "user": { "id": "u1", "role": "user" } }),
        );

        let res = api.login("a@b.c", "pw").await.unwrap();
        assert_eq!(res.token, "t-2");
        assert_eq!(client.sent_to("/auth/login"), 1);
        assert_eq!(client.sent_to("/login"), 2); // "/auth/login" 也包含该片段
    }

    #[tokio::test]
    async fn test_login_surfaces_backend_error_message() {
        let (api, client) = create_api();
        client.mock_response(
            HttpMethod::Post,
            "http://backend/auth/login",
            401,
            serde_json::json!({ "error": "senha incorreta" }),
        );

        let err = api.login("a@b.c", "bad").await.unwrap_err();
        assert_eq!(err.status, crate::ErrorStatus::Auth);
        assert_eq!(err.message, "senha incorreta");
    }

    #[tokio::test]
    async fn test_streak_defaults_highscore_to_streak() {
        let (api, client) = create_api();
        client.mock_response(
            HttpMethod::Get,
            "http://backend/users/u1/streak",
            200,
            serde_json::json!({ "streak": 3 }),
        );

        let status = api.streak("u1").await.unwrap();
        assert_eq!(status.streak, 3);
        assert_eq!(status.highscore, 3);
    }

    #[tokio::test]
    async fn test_history_normalizes_both_wire_shapes() {
        let (api, client) = create_api();
        client.mock_response(
            HttpMethod::Get,
            "http://backend/users/u1/history",
            200,
            serde_json::json!({ "history": ["5|2025-02-21T10:00:00Z"] }),
        );
        client.mock_response(
            HttpMethod::Get,
            "http://backend/users/u2/history",
            200,
            serde_json::json!({ "history": "[\"5|2025-02-21T10:00:00Z\"]" }),
        );

        let a = api.history("u1").await.unwrap();
        let b = api.history("u2").await.unwrap();
        assert_eq!(a, b);
        assert_eq!(a[0].newsletter_id, "5");
    }

    #[tokio::test]
    async fn test_history_garbage_degrades_to_empty() {
        let (api, client) = create_api();
        client.mock_response(
            HttpMethod::Get,
            "http://backend/users/u1/history",
            200,
            serde_json::json!({ "history": "not json" }),
        );

        assert!(api.history("u1").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_non_2xx_maps_to_network_error() {
        let (api, _client) = create_api();
        let err = api.newsletters().await.unwrap_err();
        assert_eq!(err.status, crate::ErrorStatus::Network);
    }

    #[tokio::test]
    async fn test_bearer_token_attached_when_present() {
        let client = MockHttpClient::new();
        let api = Api::new(BASE, client.clone()).with_token("t-9");
        client.mock_response(
            HttpMethod::Get,
            "http://backend/newsletters",
            200,
            serde_json::json!([]),
        );

        api.newsletters().await.unwrap();
        let sent = client.sent();
        assert_eq!(sent.len(), 1);
        assert_eq!(
            sent[0].headers.get("Authorization").map(String::as_str),
            Some("Bearer t-9")
        );
    }

    #[tokio::test]
    async fn test_unauthenticated_api_sends_no_bearer() {
        let (api, client) = create_api();
        client.mock_response(
            HttpMethod::Get,
            "http://backend/newsletters",
            200,
            serde_json::json!([]),
        );

        api.newsletters().await.unwrap();
        assert!(client.sent()[0].headers.get("Authorization").is_none());
    }
}
