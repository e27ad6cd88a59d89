//! 启动阶段的退避重试
//!
//! 数据库可能晚于服务就绪（容器编排、滚动升级），连接失败时按指数退避重试。

use std::future::Future;
use std::time::Duration;

use tracing::{info, warn};

/// 指数退避策略
#[derive(Debug, Clone, Copy)]
pub struct Backoff {
    /// 总尝试次数（至少 1 次）
    pub attempts: u32,
    pub base: Duration,
    pub cap: Duration,
}

impl Default for Backoff {
    fn default() -> Self {
        Self {
            attempts: 5,
            base: Duration::from_secs(1),
            cap: Duration::from_secs(30),
        }
    }
}

impl Backoff {
    /// 每次失败后的等待时间：base、2·base、4·base…，不超过 cap
    pub fn delays(&self) -> impl Iterator<Item = Duration> {
        let Backoff { attempts, base, cap } = *self;
        (0..attempts.max(1) - 1).map(move |n| base.saturating_mul(1 << n.min(16)).min(cap))
    }

    /// 执行操作，失败时按退避等待后重试，全部失败返回最后一次错误
    pub async fn retry<F, Fut, T, E>(&self, what: &str, mut operation: F) -> Result<T, E>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, E>>,
        E: std::fmt::Display,
    {
        let mut delays = self.delays();
        let mut attempt = 1;
        loop {
            match operation().await {
                Ok(value) => {
                    if attempt > 1 {
                        info!(what, attempt, "Succeeded after retry");
                    }
                    return Ok(value);
                }
                Err(e) => match delays.next() {
                    Some(delay) => {
                        warn!(
                            what,
                            attempt,
                            error = %e,
                            retry_in_ms = delay.as_millis() as u64,
                            "Attempt failed"
                        );
                        tokio::time::sleep(delay).await;
                        attempt += 1;
                    }
                    None => {
                        warn!(what, attempts = attempt, error = %e, "Giving up");
                        return Err(e);
                    }
                },
            }
        }
    }
}
