//! 会话存取
//!
//! 登录成功后 token/role/user 一起写入；登出整体清空并保留后端地址。
//! 读取是纯函数，不发起任何网络请求。

use crate::adapter::KvStorage;
use crate::api::Api;
use crate::error::ClientResult;
use crate::request::HttpClient;
use newscase_shared::{KEY_BACKEND_URL, KEY_ROLE, KEY_TOKEN, KEY_USER, Role, Session, SessionUser};

/// 会话存储
#[derive(Clone, Copy)]
pub struct SessionStore<S> {
    storage: S,
}

impl<S: KvStorage> SessionStore<S> {
    pub fn new(storage: S) -> Self {
        Self { storage }
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// 提交凭据并持久化会话
    ///
    /// 失败时不触碰已有的持久化会话。
    pub async fn login<C: HttpClient>(
        &self,
        api: &Api<C>,
        email: &str,
        password: &str,
    ) -> ClientResult<Session> {
        let res = api.login(email, password).await?;
        let user_json = serde_json::to_string(&res.user)?;

        // 三个键整体写入，缺一不可
        self.storage.set(KEY_TOKEN, &res.token);
        self.storage.set(KEY_ROLE, res.user.role.as_str());
        self.storage.set(KEY_USER, &user_json);

        Ok(Session {
            user_id: res.user.id,
            token: res.token,
            role: res.user.role,
        })
    }

    /// 读取当前会话；任一片段缺失或损坏均视为未登录
    pub fn current_session(&self) -> Option<Session> {
        let token = self.storage.get(KEY_TOKEN)?;
        let role = Role::parse(&self.storage.get(KEY_ROLE)?);
        let user: SessionUser = serde_json::from_str(&self.storage.get(KEY_USER)?).ok()?;
        Some(Session {
            user_id: user.id,
            token,
            role,
        })
    }

    /// 登出：会话与派生状态（模拟日期、缓存）整体清空；幂等，不走网络
    ///
    /// 后端地址属于配置而非会话，清空后放回。
    pub fn logout(&self) {
        let backend_url = self.storage.get(KEY_BACKEND_URL);
        self.storage.clear();
        if let Some(url) = backend_url {
            self.storage.set(KEY_BACKEND_URL, &url);
        }
    }
}

// =========================================================
// 测试
// =========================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapter::tests::MemoryStorage;
    use crate::request::{HttpMethod, MockHttpClient};
    use newscase_shared::KEY_SIM_DATE;
    use serde_json::json;

    const BASE: &str = "http://backend";

    fn create_store() -> (SessionStore<MemoryStorage>, MemoryStorage, MockHttpClient) {
        let storage = MemoryStorage::new();
        let client = MockHttpClient::new();
        (SessionStore::new(storage.clone()), storage, client)
    }

    fn mock_login_ok(client: &MockHttpClient) {
        client.mock_response(
            HttpMethod::Post,
            "http://backend/auth/login",
            200,
            json!({ "token": "t-1", "user": { "id": "u1", "role": "user" } }),
        );
    }

    #[tokio::test]
    async fn test_login_persists_whole_session() {
        let (store, storage, client) = create_store();
        mock_login_ok(&client);
        let api = Api::new(BASE, client.clone());

        let session = store.login(&api, "a@b.c", "pw").await.unwrap();
        assert_eq!(session.user_id, "u1");
        assert_eq!(session.role, Role::User);

        assert_eq!(storage.get(KEY_TOKEN), Some("t-1".to_string()));
        assert_eq!(storage.get(KEY_ROLE), Some("user".to_string()));
        assert!(storage.get(KEY_USER).unwrap().contains("u1"));
    }

    #[tokio::test]
    async fn test_failed_login_leaves_existing_session_intact() {
        let (store, storage, client) = create_store();
        client.mock_response(
            HttpMethod::Post,
            "http://backend/auth/login",
            401,
            json!({ "error": "bad credentials" }),
        );
        let api = Api::new(BASE, client.clone());

        // 预置一份已有会话
        storage.set(KEY_TOKEN, "old-token");
        storage.set(KEY_ROLE, "admin");
        storage.set(KEY_USER, r#"{"id":"u0","role":"admin"}"#);

        let err = store.login(&api, "a@b.c", "bad").await.unwrap_err();
        assert_eq!(err.message, "bad credentials");
        assert_eq!(storage.get(KEY_TOKEN), Some("old-token".to_string()));
        assert_eq!(store.current_session().unwrap().user_id, "u0");
    }

    #[tokio::test]
    async fn test_current_session_roundtrip() {
        let (store, _storage, client) = create_store();
        mock_login_ok(&client);
        let api = Api::new(BASE, client.clone());

        let logged_in = store.login(&api, "a@b.c", "pw").await.unwrap();
        assert_eq!(store.current_session(), Some(logged_in));
    }

    #[test]
    fn test_current_session_requires_all_pieces() {
        let (store, storage, _client) = create_store();
        assert_eq!(store.current_session(), None);

        // 只有 token 不构成会话
        storage.set(KEY_TOKEN, "t");
        assert_eq!(store.current_session(), None);

        storage.set(KEY_ROLE, "user");
        assert_eq!(store.current_session(), None);

        // user 损坏同样视为未登录
        storage.set(KEY_USER, "{broken");
        assert_eq!(store.current_session(), None);

        storage.set(KEY_USER, r#"{"id":"u1","role":"user"}"#);
        assert!(store.current_session().is_some());
    }

    #[test]
    fn test_logout_clears_session_and_derived_state() {
        let (store, storage, _client) = create_store();
        storage.set(KEY_TOKEN, "t");
        storage.set(KEY_ROLE, "user");
        storage.set(KEY_USER, r#"{"id":"u1","role":"user"}"#);
        storage.set(KEY_SIM_DATE, "2025-02-25");
        storage.set(KEY_BACKEND_URL, "http://backend");

        store.logout();

        assert_eq!(storage.get(KEY_TOKEN), None);
        assert_eq!(storage.get(KEY_ROLE), None);
        assert_eq!(storage.get(KEY_USER), None);
        assert_eq!(storage.get(KEY_SIM_DATE), None);
        // 配置保留
        assert_eq!(storage.get(KEY_BACKEND_URL), Some("http://backend".to_string()));
        assert_eq!(store.current_session(), None);

        // 幂等
        store.logout();
        assert_eq!(store.current_session(), None);
    }
}
