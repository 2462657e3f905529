use std::path::Path;

use anyhow::{Context, Result};
use clap::{Arg, ArgAction, Command};
use lrt_core::{AppConfig, VALID_STRATEGIES};
use lrt_sim::{render_outcome, render_summary, write_report, Application};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> Result<()> {
    // 解析命令行参数
    let matches = Command::new("lrt-sim")
        .version("1.0.0")
        .about("最小响应时间调度模拟器")
        .arg(
            Arg::new("config")
                .short('c')
                .long("config")
                .value_name("FILE")
                .help("配置文件路径（缺省时查找 config/lrt.toml 或 lrt.toml）"),
        )
        .arg(
            Arg::new("requests")
                .short('n')
                .long("requests")
                .value_name("N")
                .help("模拟请求数")
                .value_parser(clap::value_parser!(u64)),
        )
        .arg(
            Arg::new("seed")
                .short('s')
                .long("seed")
                .value_name("SEED")
                .help("随机种子，固定后结果可复现")
                .value_parser(clap::value_parser!(u64)),
        )
        .arg(
            Arg::new("strategy")
                .long("strategy")
                .value_name("STRATEGY")
                .help("调度策略")
                .value_parser(VALID_STRATEGIES),
        )
        .arg(
            Arg::new("no-delay")
                .long("no-delay")
                .help("不进行真实休眠，仅记录模拟延迟")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("report")
                .short('r')
                .long("report")
                .value_name("FILE")
                .help("将路由记录写入JSON报告"),
        )
        .arg(
            Arg::new("log-level")
                .short('l')
                .long("log-level")
                .value_name("LEVEL")
                .help("日志级别")
                .value_parser(["trace", "debug", "info", "warn", "error"]),
        )
        .arg(
            Arg::new("log-format")
                .long("log-format")
                .value_name("FORMAT")
                .help("日志格式")
                .value_parser(["json", "pretty"]),
        )
        .get_matches();

    let config_path = matches.get_one::<String>("config");

    // 加载配置
    let mut config = AppConfig::load(config_path.map(String::as_str)).with_context(|| {
        format!(
            "加载配置失败: {}",
            config_path.map(String::as_str).unwrap_or("<默认>")
        )
    })?;

    // 命令行参数覆盖配置文件
    if let Some(requests) = matches.get_one::<u64>("requests") {
        config.simulation.requests = *requests;
    }
    if let Some(seed) = matches.get_one::<u64>("seed") {
        config.simulation.seed = Some(*seed);
    }
    if let Some(strategy) = matches.get_one::<String>("strategy") {
        config.dispatcher.strategy = strategy.clone();
    }
    if matches.get_flag("no-delay") {
        config.simulation.delay_enabled = false;
    }
    if let Some(level) = matches.get_one::<String>("log-level") {
        config.observability.log_level = level.clone();
    }
    if let Some(format) = matches.get_one::<String>("log-format") {
        config.observability.log_format = format.clone();
    }
    config.validate()?;

    // 初始化日志系统
    init_logging(&config.observability.log_level, &config.observability.log_format)?;

    let app = Application::new(config)?;

    println!(
        "Simulating {} requests with {} load balancing...",
        app.config().simulation.requests,
        app.dispatcher().strategy_name()
    );
    for (request_id, outcome) in app.run().await {
        println!("{}", render_outcome(request_id, &outcome));
    }

    let report = app.report().await;
    println!();
    print!("{}", render_summary(&report));

    if let Some(path) = matches.get_one::<String>("report") {
        write_report(&report, Path::new(path))?;
        println!();
        println!("Simulation report saved as '{path}'");
        info!("模拟报告已写入: {path}");
    }

    Ok(())
}

/// 初始化日志系统
fn init_logging(log_level: &str, log_format: &str) -> Result<()> {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));

    let registry = tracing_subscriber::registry().with(env_filter);

    match log_format {
        "json" => {
            registry
                .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
                .try_init()
                .context("初始化JSON日志格式失败")?;
        }
        "pretty" => {
            registry
                .with(tracing_subscriber::fmt::layer().pretty().with_writer(std::io::stderr))
                .try_init()
                .context("初始化Pretty日志格式失败")?;
        }
        _ => {
            return Err(anyhow::anyhow!("不支持的日志格式: {log_format}"));
        }
    }

    Ok(())
}
