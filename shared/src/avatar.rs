//! 头像解锁表与激励文案
//!
//! 解锁表编译进客户端，不从后端拉取；解锁判定只看历史最高分。

/// 单个可解锁头像
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AvatarDef {
    pub id: &'static str,
    /// 解锁所需的历史最高连续天数
    pub threshold: u32,
    /// 图片路径（后端持久化的也是此路径）
    pub image: &'static str,
    pub description: &'static str,
}

/// 解锁表，按阈值严格递增；首项阈值为 0，始终解锁
pub const AVATARS: [AvatarDef; 5] = [
    AvatarDef {
        id: "mug-classic",
        threshold: 0,
        image: "/resources/images/avatars/mug-classic.png",
        description: "经典马克杯",
    },
    AvatarDef {
        id: "mug-bronze",
        threshold: 3,
        image: "/resources/images/avatars/mug-bronze.png",
        description: "青铜马克杯",
    },
    AvatarDef {
        id: "mug-silver",
        threshold: 7,
        image: "/resources/images/avatars/mug-silver.png",
        description: "白银马克杯",
    },
    AvatarDef {
        id: "mug-gold",
        threshold: 14,
        image: "/resources/images/avatars/mug-gold.png",
        description: "黄金马克杯",
    },
    AvatarDef {
        id: "mug-diamond",
        threshold: 30,
        image: "/resources/images/avatars/mug-diamond.png",
        description: "钻石马克杯",
    },
];

/// 给定历史最高分，返回已解锁的头像（保持表序）
pub fn unlocked_avatars(highscore: u32) -> Vec<AvatarDef> {
    AVATARS
        .iter()
        .copied()
        .filter(|a| a.threshold <= highscore)
        .collect()
}

/// 按 id 查表
pub fn find_avatar(id: &str) -> Option<AvatarDef> {
    AVATARS.iter().copied().find(|a| a.id == id)
}

// =========================================================
// 激励文案
// =========================================================

/// 第一档上界：streak 低于此值时鼓励起步
pub const MESSAGE_BAND_LOW: u32 = 2;
/// 第二档上界：streak 达到此值进入最高档
pub const MESSAGE_BAND_HIGH: u32 = 4;

/// streak 的三档阶跃文案
pub fn motivational_message(streak: u32) -> &'static str {
    if streak < MESSAGE_BAND_LOW {
        "今天也来读一期吧！"
    } else if streak < MESSAGE_BAND_HIGH {
        "势头不错，继续保持！"
    } else {
        "火力全开，连续打卡达人！"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_thresholds_strictly_increasing() {
        for pair in AVATARS.windows(2) {
            assert!(pair[0].threshold < pair[1].threshold);
        }
    }

    #[test]
    fn test_zero_threshold_always_unlocked() {
        assert_eq!(AVATARS[0].threshold, 0);
        for h in [0, 1, 5, 100] {
            let unlocked = unlocked_avatars(h);
            assert_eq!(unlocked[0].id, AVATARS[0].id);
        }
    }

    #[test]
    fn test_unlocked_is_monotonic() {
        // h1 <= h2 时 unlocked(h1) 是 unlocked(h2) 的前缀
        let mut prev_len = 0;
        for h in 0..=40 {
            let unlocked = unlocked_avatars(h);
            assert!(unlocked.len() >= prev_len);
            for (i, a) in unlocked.iter().enumerate() {
                assert_eq!(a.id, AVATARS[i].id);
            }
            prev_len = unlocked.len();
        }
        assert_eq!(unlocked_avatars(40).len(), AVATARS.len());
    }

    #[test]
    fn test_find_avatar() {
        assert_eq!(find_avatar("mug-gold").unwrap().threshold, 14);
        assert!(find_avatar("nonexistent").is_none());
    }

    #[test]
    fn test_message_bands() {
        let low = motivational_message(0);
        assert_eq!(motivational_message(1), low);
        let mid = motivational_message(2);
        assert_ne!(mid, low);
        assert_eq!(motivational_message(3), mid);
        let high = motivational_message(4);
        assert_ne!(high, mid);
        assert_eq!(motivational_message(100), high);
    }
}
