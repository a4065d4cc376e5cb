//! 环境变量配置模块
//!
//! 允许在不改代码的情况下通过环境变量追加一个标准输出 sink。

use crate::config::{init_with_config, SinkConfig, SinkLogConfig};
use crate::error::Result;
use crate::level::LevelSet;
use std::env;

/// 标准输出 sink 的级别，例如 `info,warning,error`、`all` 或 `none`
pub const STDOUT_LEVELS_VAR: &str = "SINKLOG_STDOUT_LEVELS";

/// 环境变量配置管理器
pub struct EnvConfig;

impl EnvConfig {
    /// 从环境变量读取标准输出 sink 的级别
    ///
    /// 变量未设置或为空时返回 `None`；无法解析时返回错误。
    pub fn stdout_levels() -> Result<Option<LevelSet>> {
        Self::levels_from(STDOUT_LEVELS_VAR)
    }

    fn levels_from(var: &str) -> Result<Option<LevelSet>> {
        match env::var(var) {
            Ok(value) if !value.trim().is_empty() => Ok(Some(value.parse()?)),
            _ => Ok(None),
        }
    }
}

impl SinkLogConfig {
    /// 若设置了 `SINKLOG_STDOUT_LEVELS`，追加一个对应级别的标准输出 sink
    pub fn with_env_overrides(self) -> Result<Self> {
        Ok(match EnvConfig::stdout_levels()? {
            Some(levels) => self.with_sink(SinkConfig::stdout(levels)),
            None => self,
        })
    }
}

/// 仅依据环境变量配置进程级注册表
pub fn init_from_env() -> Result<()> {
    let config = SinkLogConfig::new().with_env_overrides()?;
    init_with_config(&config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SinkTarget;
    use crate::level::Level;

    // 每个测试使用独立的变量名，避免并行测试互相干扰
    #[test]
    fn test_levels_from_env() {
        env::set_var("SINKLOG_TEST_LEVELS_A", "info, error");
        let levels = EnvConfig::levels_from("SINKLOG_TEST_LEVELS_A").unwrap();
        assert_eq!(levels, Some(Level::Info | Level::Error));
        env::remove_var("SINKLOG_TEST_LEVELS_A");
    }

    #[test]
    fn test_missing_or_empty_var() {
        assert_eq!(EnvConfig::levels_from("SINKLOG_TEST_LEVELS_UNSET").unwrap(), None);

        env::set_var("SINKLOG_TEST_LEVELS_B", "  ");
        assert_eq!(EnvConfig::levels_from("SINKLOG_TEST_LEVELS_B").unwrap(), None);
        env::remove_var("SINKLOG_TEST_LEVELS_B");
    }

    #[test]
    fn test_invalid_levels_error() {
        env::set_var("SINKLOG_TEST_LEVELS_C", "info,shouting");
        assert!(EnvConfig::levels_from("SINKLOG_TEST_LEVELS_C").is_err());
        env::remove_var("SINKLOG_TEST_LEVELS_C");
    }

    #[test]
    fn test_with_env_overrides_appends_stdout_sink() {
        env::set_var(STDOUT_LEVELS_VAR, "all");
        let config = SinkLogConfig::new().with_env_overrides().unwrap();
        env::remove_var(STDOUT_LEVELS_VAR);

        assert_eq!(config.sinks.len(), 1);
        assert_eq!(config.sinks[0].target, SinkTarget::Stdout);
        assert_eq!(config.sinks[0].levels, LevelSet::ALL);
    }
}
