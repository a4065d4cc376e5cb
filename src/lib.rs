//! SinkLog - 分级、多目标日志库
//!
//! 调用方以严重级别记录消息；每个输出目标（sink）都有自己的级别掩码，
//! 消息只会写入掩码接受该级别的 sink，并带上经过时间、调用位置与
//! 严重级别标签等装饰。
//!
//! # 快速开始
//!
//! ```rust,no_run
//! use sinklog::{Destination, Level};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     sinklog::add_stream(
//!         Destination::Stdout,
//!         Level::Info | Level::Error | Level::Warning | Level::Debug,
//!     );
//!     sinklog::add_file_stream("test.txt", Level::Info | Level::Debug | Level::Error)?;
//!     sinklog::broadcast_widen(Level::Important);
//!
//!     sinklog::important!("info test");
//!     sinklog::debug!("debug test");
//!     sinklog::error!("error test");
//!     sinklog::warning!("warning test");
//!
//!     let bar = 1231;
//!     sinklog::log!(Level::Info, "{}: {}", "bar", bar);
//!
//!     // 关闭注册表打开的文件
//!     sinklog::shutdown();
//!     Ok(())
//! }
//! ```
//!
//! 行格式为 `[%6.2fs] [<function>:<line>] [<TAG>] <message>`：位置前缀只在
//! sink 接受 `debug` 时出现，`[ERR]`/`[WARN]` 只在对应级别出现。

pub mod color;
pub mod config;
pub mod core;
pub mod diagnostics;
pub mod env_config;
pub mod error;
pub mod level;
mod macros;
pub mod sinks;

// 重新导出主要类型
pub use color::{colorize, Style};
pub use config::{init_with_config, SinkConfig, SinkLogConfig, SinkTarget};
pub use crate::core::{shutdown, with_registry, CallSite, Emission, SinkId, SinkRegistry};
pub use diagnostics::{get_diagnostics, DiagnosticsSnapshot};
pub use env_config::{init_from_env, EnvConfig};
pub use error::{Result, SinkLogError};
pub use level::{Level, LevelSet, LEVEL_COUNT};
pub use sinks::{Destination, SharedWriter, Sink};

use crate::core::emitter::format_body;
use std::fmt;
use std::path::Path;

/// 库版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// 在进程级注册表末尾注册一个外部提供的目标
///
/// 注册表不会关闭该目标。
pub fn add_stream(destination: Destination, mask: impl Into<LevelSet>) -> SinkId {
    with_registry(|registry| registry.register(destination, mask))
}

/// 以截断方式打开 `path` 并注册；文件在 [`shutdown`] 时关闭
///
/// # 错误
///
/// 文件无法打开时返回 `SinkLogError::IoError`。
pub fn add_file_stream<P: AsRef<Path>>(path: P, mask: impl Into<LevelSet>) -> Result<SinkId> {
    with_registry(|registry| registry.register_owned(path, mask))
}

/// 把级别并入当前已注册的所有 sink
pub fn broadcast_widen(levels: impl Into<LevelSet>) {
    with_registry(|registry| registry.broadcast_widen(levels))
}

/// 放宽单个已注册 sink 的级别掩码
pub fn widen_stream(id: SinkId, levels: impl Into<LevelSet>) -> Result<()> {
    with_registry(|registry| registry.widen(id, levels))
}

/// 显式替换单个已注册 sink 的级别掩码
pub fn replace_stream_mask(id: SinkId, mask: impl Into<LevelSet>) -> Result<()> {
    with_registry(|registry| registry.replace_mask(id, mask))
}

/// 以显式的调用点记录一条消息
///
/// 宏（[`log!`]、[`info!`] 等）会自动填入调用点。
///
/// 消息参数在注册表锁之外格式化，所以参数的 `Display`/`Debug` 实现
/// 可以再次调用本库记录日志；它们的输出先于外层消息写出。
///
/// # Panics
///
/// 消息参数的某个格式化实现返回错误时 panic。
pub fn log_at(level: Level, callsite: Option<&CallSite>, args: fmt::Arguments<'_>) -> Emission {
    // 没有 sink 接受时直接在锁内记账返回，不做格式化
    let unrouted = with_registry(|registry| {
        (!registry.accepts_any(level)).then(|| registry.emit(level, callsite, args))
    });
    if let Some(emission) = unrouted {
        return emission;
    }

    let body = format_body(args);
    with_registry(|registry| registry.emit_formatted(level, callsite, &body))
}

/// 记录一条消息，位置取调用方的源文件与行号
#[track_caller]
pub fn log(level: Level, args: fmt::Arguments<'_>) -> Emission {
    let callsite = CallSite::caller();
    log_at(level, Some(&callsite), args)
}

/// 原样记录一段文本
#[track_caller]
pub fn message(level: Level, text: &str) -> Emission {
    log(level, format_args!("{}", text))
}

#[track_caller]
pub fn debug(args: fmt::Arguments<'_>) {
    log(Level::Debug, args);
}

#[track_caller]
pub fn info(args: fmt::Arguments<'_>) {
    log(Level::Info, args);
}

#[track_caller]
pub fn progress(args: fmt::Arguments<'_>) {
    log(Level::Progress, args);
}

#[track_caller]
pub fn important(args: fmt::Arguments<'_>) {
    log(Level::Important, args);
}

#[track_caller]
pub fn warning(args: fmt::Arguments<'_>) {
    log(Level::Warning, args);
}

#[track_caller]
pub fn error(args: fmt::Arguments<'_>) {
    log(Level::Error, args);
}
