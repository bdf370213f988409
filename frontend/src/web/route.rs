//! 路由定义模块 - 领域模型
//!
//! 这是纯粹的业务逻辑层，不依赖于 DOM 或 web_sys。
//! 守卫判定委托给逻辑层的 `guard` 模块。

use newscase_core::guard::Access;
use std::fmt::Display;

/// 应用路由枚举
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum AppRoute {
    /// 登录页面 (默认路由)
    #[default]
    Login,
    /// 用户面板 (需要认证)
    Dashboard,
    /// Newsletter 详情 (需要认证)
    Newsletter(String),
    /// 管理面板 (需要管理员)
    Admin,
}

impl AppRoute {
    /// 将 URL path 解析为路由枚举
    ///
    /// 未知路径回落到默认已认证视图（守卫会把未登录者再转去登录页）。
    pub fn from_path(path: &str) -> Self {
        match path {
            "/" | "/login" => Self::Login,
            "/dashboard" => Self::Dashboard,
            "/admin" => Self::Admin,
            _ => match path.strip_prefix("/newsletter/") {
                Some(id) if !id.is_empty() && !id.contains('/') => {
                    Self::Newsletter(id.to_string())
                }
                _ => Self::Dashboard,
            },
        }
    }

    /// 获取路由对应的 URL path
    pub fn to_path(&self) -> String {
        match self {
            Self::Login => "/".to_string(),
            Self::Dashboard => "/dashboard".to_string(),
            Self::Newsletter(id) => format!("/newsletter/{}", id),
            Self::Admin => "/admin".to_string(),
        }
    }

    /// **核心守卫输入：该路由的访问级别**
    pub fn access(&self) -> Access {
        match self {
            Self::Login => Access::Public,
            Self::Dashboard | Self::Newsletter(_) => Access::Authenticated,
            Self::Admin => Access::Admin,
        }
    }

    /// 定义已认证用户是否应该离开此路由（如登录页）
    pub fn should_redirect_when_authenticated(&self) -> bool {
        matches!(self, Self::Login)
    }

    /// 获取认证失败时的重定向目标
    pub fn auth_failure_redirect() -> Self {
        Self::Login
    }

    /// 获取角色不足时的重定向目标
    pub fn role_failure_redirect() -> Self {
        Self::Dashboard
    }

    /// 获取认证成功时的重定向目标（从登录页）
    pub fn auth_success_redirect() -> Self {
        Self::Dashboard
    }
}

impl Display for AppRoute {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_path())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_paths() {
        assert_eq!(AppRoute::from_path("/"), AppRoute::Login);
        assert_eq!(AppRoute::from_path("/login"), AppRoute::Login);
        assert_eq!(AppRoute::from_path("/dashboard"), AppRoute::Dashboard);
        assert_eq!(AppRoute::from_path("/admin"), AppRoute::Admin);
        assert_eq!(
            AppRoute::from_path("/newsletter/42"),
            AppRoute::Newsletter("42".to_string())
        );
    }

    #[test]
    fn test_unknown_paths_fall_back_to_dashboard() {
        assert_eq!(AppRoute::from_path("/nope"), AppRoute::Dashboard);
        assert_eq!(AppRoute::from_path("/newsletter/"), AppRoute::Dashboard);
        assert_eq!(AppRoute::from_path("/newsletter/1/extra"), AppRoute::Dashboard);
    }

    #[test]
    fn test_path_roundtrip() {
        for route in [
            AppRoute::Dashboard,
            AppRoute::Admin,
            AppRoute::Newsletter("7".to_string()),
        ] {
            assert_eq!(AppRoute::from_path(&route.to_path()), route);
        }
    }
}
