//! 路由守卫判定
//!
//! 纯判定逻辑，不依赖 DOM 与具体路由机制。
//! 未认证检查严格先于角色检查。

use newscase_shared::{Role, Session};

/// 路由的访问级别
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    /// 无需认证
    Public,
    /// 需要已登录会话
    Authenticated,
    /// 需要管理员角色
    Admin,
}

/// 守卫结论
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardOutcome {
    /// 放行
    Allow,
    /// 跳转登录页
    RedirectLogin,
    /// 跳转默认已认证视图
    RedirectDashboard,
}

/// 判定当前会话能否进入目标访问级别
pub fn check(access: Access, session: Option<&Session>) -> GuardOutcome {
    match access {
        Access::Public => GuardOutcome::Allow,
        Access::Authenticated => match session {
            Some(_) => GuardOutcome::Allow,
            None => GuardOutcome::RedirectLogin,
        },
        Access::Admin => match session {
            // 未认证优先于角色判定
            None => GuardOutcome::RedirectLogin,
            Some(s) if s.role == Role::Admin => GuardOutcome::Allow,
            Some(_) => GuardOutcome::RedirectDashboard,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session(role: Role) -> Session {
        Session {
            user_id: "u1".to_string(),
            token: "t".to_string(),
            role,
        }
    }

    #[test]
    fn test_no_session_always_redirects_to_login() {
        assert_eq!(check(Access::Authenticated, None), GuardOutcome::RedirectLogin);
        assert_eq!(check(Access::Admin, None), GuardOutcome::RedirectLogin);
    }

    #[test]
    fn test_public_always_allows() {
        assert_eq!(check(Access::Public, None), GuardOutcome::Allow);
        assert_eq!(
            check(Access::Public, Some(&session(Role::User))),
            GuardOutcome::Allow
        );
    }

    #[test]
    fn test_authenticated_allows_any_role() {
        assert_eq!(
            check(Access::Authenticated, Some(&session(Role::User))),
            GuardOutcome::Allow
        );
        assert_eq!(
            check(Access::Authenticated, Some(&session(Role::Admin))),
            GuardOutcome::Allow
        );
    }

    #[test]
    fn test_non_admin_redirects_to_dashboard_not_login() {
        assert_eq!(
            check(Access::Admin, Some(&session(Role::User))),
            GuardOutcome::RedirectDashboard
        );
    }

    #[test]
    fn test_admin_allowed_into_admin_routes() {
        assert_eq!(
            check(Access::Admin, Some(&session(Role::Admin))),
            GuardOutcome::Allow
        );
    }
}
