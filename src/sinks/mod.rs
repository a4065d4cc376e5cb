//! SinkLog Sinks 模块
//!
//! 提供输出目标（标准输出、标准错误、共享写入器、文件）以及
//! 带级别过滤器的 `Sink`。

pub mod destination;
pub mod sink;

// 重新导出主要类型
pub use destination::{Destination, OwnedFile, SharedWriter};
pub use sink::Sink;
