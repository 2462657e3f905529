use std::time::Duration;

use async_trait::async_trait;

/// 处理请求时的人工延迟能力
///
/// 延迟只影响墙钟时间，不影响记录下来的延迟值；测试注入 [`NoDelay`]。
#[async_trait]
pub trait ProcessingDelay: Send + Sync {
    /// 按模拟延迟（秒）等待
    async fn wait(&self, latency: f64);

    /// 获取延迟实现名称
    fn name(&self) -> &str;
}

/// 不等待，直接返回
#[derive(Debug, Clone, Copy, Default)]
pub struct NoDelay;

#[async_trait]
impl ProcessingDelay for NoDelay {
    async fn wait(&self, _latency: f64) {}

    fn name(&self) -> &str {
        "NoDelay"
    }
}

/// 按比例缩放后真实休眠，`scale = 0.1` 时休眠延迟的十分之一
#[derive(Debug, Clone, Copy)]
pub struct ScaledSleep {
    scale: f64,
}

impl ScaledSleep {
    pub fn new(scale: f64) -> Self {
        Self { scale }
    }

    pub fn scale(&self) -> f64 {
        self.scale
    }

    /// 负值或非有限值不休眠
    pub fn duration_for(&self, latency: f64) -> Duration {
        let seconds = latency * self.scale;
        if seconds.is_finite() && seconds > 0.0 {
            Duration::from_secs_f64(seconds)
        } else {
            Duration::ZERO
        }
    }
}

impl Default for ScaledSleep {
    fn default() -> Self {
        Self::new(0.1)
    }
}

#[async_trait]
impl ProcessingDelay for ScaledSleep {
    async fn wait(&self, latency: f64) {
        let duration = self.duration_for(latency);
        if !duration.is_zero() {
            tokio::time::sleep(duration).await;
        }
    }

    fn name(&self) -> &str {
        "ScaledSleep"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scaled_sleep_duration() {
        let delay = ScaledSleep::new(0.1);
        assert_eq!(delay.duration_for(0.5), Duration::from_secs_f64(0.05));
        assert_eq!(delay.duration_for(-0.02), Duration::ZERO);
        assert_eq!(delay.duration_for(f64::NAN), Duration::ZERO);
    }

    #[tokio::test]
    async fn test_no_delay_returns_immediately() {
        let start = std::time::Instant::now();
        NoDelay.wait(10.0).await;
        assert!(start.elapsed() < Duration::from_millis(100));
    }
}
