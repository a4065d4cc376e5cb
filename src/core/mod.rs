//! SinkLog 核心模块
//!
//! 本模块包含时钟参考点、调用点、sink 注册表以及发射路径。

pub mod callsite;
pub mod clock;
pub mod emitter;
pub mod registry;

// 重新导出核心类型
pub use callsite::CallSite;
pub use emitter::Emission;
pub use registry::{shutdown, with_registry, SinkId, SinkRegistry};
