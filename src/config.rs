//! 定义 SinkLog 注册表的配置结构体。
//!
//! 配置可以直接在代码中构造，也可以由调用方从任意 serde 数据源反序列化；
//! 本 crate 自身不读取配置文件。

use crate::core::registry::{with_registry, SinkRegistry};
use crate::error::{Result, SinkLogError};
use crate::level::LevelSet;
use crate::sinks::Destination;
use serde::Deserialize;
use std::path::PathBuf;

/// 注册表的顶层配置
#[derive(Deserialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct SinkLogConfig {
    /// 按顺序注册的 sink
    #[serde(default)]
    pub sinks: Vec<SinkConfig>,
    /// 注册完成后并入所有 sink 的级别
    #[serde(default)]
    pub broadcast: LevelSet,
}

/// 单个 sink 的配置
#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct SinkConfig {
    pub target: SinkTarget,
    pub levels: LevelSet,
}

/// sink 的输出目标
#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SinkTarget {
    Stdout,
    Stderr,
    File { path: PathBuf },
}

impl SinkConfig {
    pub fn stdout(levels: impl Into<LevelSet>) -> Self {
        Self {
            target: SinkTarget::Stdout,
            levels: levels.into(),
        }
    }

    pub fn stderr(levels: impl Into<LevelSet>) -> Self {
        Self {
            target: SinkTarget::Stderr,
            levels: levels.into(),
        }
    }

    pub fn file(path: impl Into<PathBuf>, levels: impl Into<LevelSet>) -> Self {
        Self {
            target: SinkTarget::File { path: path.into() },
            levels: levels.into(),
        }
    }
}

impl SinkLogConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// 追加一个 sink
    pub fn with_sink(mut self, sink: SinkConfig) -> Self {
        self.sinks.push(sink);
        self
    }

    /// 设置广播级别
    pub fn with_broadcast(mut self, levels: impl Into<LevelSet>) -> Self {
        self.broadcast |= levels.into();
        self
    }

    /// 校验配置
    pub fn validate(&self) -> Result<()> {
        for (index, sink) in self.sinks.iter().enumerate() {
            if let SinkTarget::File { path } = &sink.target {
                if path.as_os_str().is_empty() {
                    return Err(SinkLogError::config(format!(
                        "sink #{} has an empty file path",
                        index
                    )));
                }
            }
        }
        Ok(())
    }

    /// 按顺序注册所有 sink，然后广播放宽
    ///
    /// 某个文件打不开时返回错误，此前已注册的 sink 保持注册状态。
    pub fn apply_to(&self, registry: &mut SinkRegistry) -> Result<()> {
        self.validate()?;
        for sink in &self.sinks {
            match &sink.target {
                SinkTarget::Stdout => {
                    registry.register(Destination::Stdout, sink.levels);
                }
                SinkTarget::Stderr => {
                    registry.register(Destination::Stderr, sink.levels);
                }
                SinkTarget::File { path } => {
                    registry.register_owned(path, sink.levels)?;
                }
            }
        }
        if self.broadcast.any() {
            registry.broadcast_widen(self.broadcast);
        }
        Ok(())
    }
}

/// 把配置应用到进程级注册表
pub fn init_with_config(config: &SinkLogConfig) -> Result<()> {
    with_registry(|registry| config.apply_to(registry))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::level::Level;
    use tempfile::TempDir;

    #[test]
    fn test_deserialize_full_config() {
        let json = r#"{
            "sinks": [
                { "target": "stdout", "levels": ["info", "warning", "error", "debug"] },
                { "target": { "file": { "path": "test.txt" } }, "levels": "info,debug,error" }
            ],
            "broadcast": ["important"]
        }"#;

        let config: SinkLogConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.sinks.len(), 2);
        assert_eq!(config.sinks[0].target, SinkTarget::Stdout);
        assert_eq!(
            config.sinks[1].target,
            SinkTarget::File {
                path: PathBuf::from("test.txt")
            }
        );
        assert_eq!(
            config.sinks[1].levels,
            Level::Info | Level::Debug | Level::Error
        );
        assert_eq!(config.broadcast, Level::Important.as_set());
    }

    #[test]
    fn test_unknown_fields_are_rejected() {
        let json = r#"{ "sinks": [], "rotation": "daily" }"#;
        assert!(serde_json::from_str::<SinkLogConfig>(json).is_err());
    }

    #[test]
    fn test_invalid_level_is_rejected() {
        let json = r#"{ "sinks": [{ "target": "stderr", "levels": ["verbose"] }] }"#;
        assert!(serde_json::from_str::<SinkLogConfig>(json).is_err());
    }

    #[test]
    fn test_empty_path_fails_validation() {
        let config = SinkLogConfig::new().with_sink(SinkConfig::file("", Level::Info));
        assert!(matches!(
            config.validate(),
            Err(SinkLogError::ConfigError(_))
        ));
    }

    #[test]
    fn test_apply_registers_in_order_then_broadcasts() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("configured.log");
        let config = SinkLogConfig::new()
            .with_sink(SinkConfig::stderr(Level::Error))
            .with_sink(SinkConfig::file(&path, Level::Info))
            .with_broadcast(Level::Important);

        let mut registry = SinkRegistry::new();
        config.apply_to(&mut registry).unwrap();

        let sinks: Vec<_> = registry.iter().collect();
        assert_eq!(sinks.len(), 2);
        assert_eq!(sinks[0].label(), "stderr");
        assert!(sinks[1].is_owned());
        assert!(sinks.iter().all(|sink| sink.accepts(Level::Important)));
        assert!(path.exists());
    }
}
