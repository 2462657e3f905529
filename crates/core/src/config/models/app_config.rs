use std::collections::HashSet;
use std::path::Path;

use anyhow::{Context, Result};
use config::{Config as ConfigBuilder, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{
    dispatcher_worker::{DispatcherConfig, SimulationConfig},
    observability::ObservabilityConfig,
};
use crate::models::WorkerSpec;

/// System configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub simulation: SimulationConfig,
    pub dispatcher: DispatcherConfig,
    pub workers: Vec<WorkerSpec>,
    pub observability: ObservabilityConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            simulation: SimulationConfig::default(),
            dispatcher: DispatcherConfig::default(),
            workers: vec![
                WorkerSpec::new("Server1", 0.1),
                WorkerSpec::new("Server2", 0.15),
                WorkerSpec::new("Server3", 0.2),
            ],
            observability: ObservabilityConfig::default(),
        }
    }
}

impl AppConfig {
    /// Load configuration from config file and environment variables
    ///
    /// Load order:
    /// 1. Default configuration (missing keys fall back to `Default`)
    /// 2. Config file (TOML format)
    /// 3. Environment variable overrides (prefix: LRT_, nested separator: __)
    ///
    /// # Arguments
    ///
    /// * `config_path` - Config file path, if None use default paths
    pub fn load(config_path: Option<&str>) -> Result<Self> {
        let mut builder = ConfigBuilder::builder();

        if let Some(path) = config_path {
            if Path::new(path).exists() {
                debug!("加载配置文件: {}", path);
                builder = builder.add_source(File::new(path, FileFormat::Toml));
            } else {
                return Err(anyhow::anyhow!("配置文件不存在: {}", path));
            }
        } else {
            let default_paths = ["config/lrt.toml", "lrt.toml"];
            if let Some(path) = default_paths.iter().find(|p| Path::new(p).exists()) {
                debug!("使用默认配置文件: {}", path);
                builder = builder.add_source(File::new(path, FileFormat::Toml));
            }
        }

        builder = builder.add_source(
            Environment::with_prefix("LRT")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let config: AppConfig = builder
            .build()
            .context("构建配置失败")?
            .try_deserialize()
            .context("反序列化配置失败")?;

        config.validate()?;
        debug!("配置加载完成: {} 个Worker", config.workers.len());

        Ok(config)
    }

    /// Load configuration from TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self> {
        let config: AppConfig = toml::from_str(toml_str).context("解析TOML配置失败")?;

        config.validate()?;
        Ok(config)
    }

    /// Serialize configuration to TOML string
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).context("序列化配置为TOML失败")
    }

    /// Validate configuration effectiveness
    pub fn validate(&self) -> Result<()> {
        self.simulation.validate().context("模拟配置验证失败")?;

        self.dispatcher
            .validate()
            .context("Dispatcher配置验证失败")?;

        self.validate_workers().context("Worker配置验证失败")?;

        self.observability
            .validate()
            .context("可观测性配置验证失败")?;

        Ok(())
    }

    fn validate_workers(&self) -> Result<()> {
        if self.workers.is_empty() {
            return Err(anyhow::anyhow!("Worker列表不能为空"));
        }

        let mut seen = HashSet::new();
        for worker in &self.workers {
            worker.validate()?;
            if !seen.insert(worker.id.as_str()) {
                return Err(anyhow::anyhow!("Worker ID重复: {}", worker.id));
            }
        }

        Ok(())
    }
}
