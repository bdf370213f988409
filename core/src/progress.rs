//! 连续打卡进度引擎
//!
//! streak 的加减由后端权威计算，客户端只做两件事：
//! 周期性拉取快照（最后到达的响应无条件覆盖缓存），
//! 以及基于历史最高分做头像解锁判定。

use std::cell::RefCell;
use std::rc::Rc;

use crate::api::Api;
use crate::error::{ClientError, ClientResult};
use crate::log_error;
use crate::request::HttpClient;
use newscase_shared::avatar::{self, AvatarDef};


/// 进度快照（引擎缓存的本地副本）
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProgressSnapshot {
    pub streak: u32,
    pub highscore: u32,
    pub avatar_id: String,
}

/// 进度引擎
///
/// 克隆共享同一份缓存：视图持有的各个句柄看到的是同一个快照。
#[derive(Clone)]
pub struct ProgressEngine<C> {
    api: Api<C>,
    user_id: String,
    cached: Rc<RefCell<ProgressSnapshot>>,
}

impl<C: HttpClient> ProgressEngine<C> {
    pub fn new(api: Api<C>, user_id: impl Into<String>) -> Self {
        Self {
            api,
            user_id: user_id.into(),
            cached: Rc::new(RefCell::new(ProgressSnapshot::default())),
        }
    }

    /// 最近一次缓存的快照
    pub fn cached(&self) -> ProgressSnapshot {
        self.cached.borrow().clone()
    }

    /// 拉取一次进度
    ///
    /// 慢响应不去重也不取消：到达即覆盖，最后写入生效。
    /// streak 读取失败时保留旧缓存；头像 id 读取失败只记日志。
    pub async fn poll_status(&self) -> ClientResult<ProgressSnapshot> {
        let (streak, avatar_id) = futures::join!(
            self.api.streak(&self.user_id),
            self.api.avatar_id(&self.user_id),
        );
        let status = streak?;
        let avatar_id = avatar_id.unwrap_or_else(|e| {
            log_error!("[Progress] avatar-id fetch failed: {}", e);
            self.cached.borrow().avatar_id.clone()
        });

        let snapshot = ProgressSnapshot {
            streak: status.streak,
            highscore: status.highscore,
            avatar_id,
        };
        *self.cached.borrow_mut() = snapshot.clone();
        Ok(snapshot)
    }

    /// 当前已解锁的头像（依据缓存的历史最高分）
    pub fn unlocked(&self) -> Vec<AvatarDef> {
        avatar::unlocked_avatars(self.cached.borrow().highscore)
    }

    /// 选择头像
    ///
    /// 未解锁的选择在本地直接拒绝，不发网络请求。
    /// 已解锁的选择先乐观更新缓存，再持久化到后端；
    /// 持久化失败只记日志并返回错误，不回滚本地选择。
    pub async fn select_avatar(&self, avatar_id: &str) -> ClientResult<()> {
        let highscore = self.cached.borrow().highscore;
        let def = avatar::find_avatar(avatar_id)
            .ok_or_else(|| ClientError::policy(format!("unknown avatar: {}", avatar_id)))?;
        if def.threshold > highscore {
            return Err(ClientError::policy(format!(
                "avatar {} locked (requires {}, highscore {})",
                avatar_id, def.threshold, highscore
            )));
        }

        self.cached.borrow_mut().avatar_id = def.id.to_string();

        if let Err(e) = self.api.set_avatar(&self.user_id, def.image).await {
            log_error!("[Progress] persist avatar failed: {}", e);
            return Err(e);
        }
        Ok(())
    }
}
