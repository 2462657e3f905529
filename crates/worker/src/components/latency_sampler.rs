use lrt_core::NegativeLatencyPolicy;
use rand::rngs::StdRng;
use rand::Rng;

/// 模拟延迟采样器：`baseline + U(-jitter, +jitter)`，随机源由外部注入
#[derive(Debug)]
pub struct LatencySampler {
    baseline: f64,
    jitter: f64,
    policy: NegativeLatencyPolicy,
    rng: StdRng,
}

impl LatencySampler {
    pub fn new(baseline: f64, jitter: f64, policy: NegativeLatencyPolicy, rng: StdRng) -> Self {
        Self {
            baseline,
            jitter,
            policy,
            rng,
        }
    }

    pub fn sample(&mut self) -> f64 {
        // jitter 为0时不消耗随机数，样本恰好等于基线
        let offset = if self.jitter > 0.0 {
            self.rng.random_range(-self.jitter..=self.jitter)
        } else {
            0.0
        };
        self.policy.apply(self.baseline + offset)
    }

    pub fn baseline(&self) -> f64 {
        self.baseline
    }

    pub fn jitter(&self) -> f64 {
        self.jitter
    }
}
