pub mod latency_sampler;
pub mod latency_window;

pub use latency_sampler::LatencySampler;
pub use latency_window::LatencyWindow;
