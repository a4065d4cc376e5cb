//! Sink 注册表
//!
//! 注册表按插入顺序持有所有 sink，插入顺序即遍历顺序。sink 一旦加入就
//! 不会被移除，过滤器只能被放宽或被显式替换。
//!
//! 进程级实例在首次访问时惰性创建，由一把互斥锁保护：注册与发射
//! 都会持有这把锁，因此同一目标上的并发写入会被串行化。

use crate::core::callsite::CallSite;
use crate::core::clock;
use crate::core::emitter::{self, Body, Emission};
use crate::error::{Result, SinkLogError};
use crate::level::{Level, LevelSet};
use crate::sinks::{Destination, Sink};
use once_cell::sync::Lazy;
use std::fmt;
use std::path::Path;
use std::sync::{Mutex, PoisonError};
use std::time::Duration;

/// 注册表中 sink 的标识，即其插入位置
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SinkId(usize);

impl SinkId {
    pub fn index(&self) -> usize {
        self.0
    }
}

/// 有序的 sink 集合
#[derive(Debug, Default)]
pub struct SinkRegistry {
    sinks: Vec<Sink>,
}

impl SinkRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// 追加一个已构造的 sink
    pub fn push(&mut self, sink: Sink) -> SinkId {
        let id = SinkId(self.sinks.len());
        tracing::debug!(sink = %sink.label(), mask = %sink.mask(), "sink registered");
        self.sinks.push(sink);
        id
    }

    /// 注册一个外部提供的目标，注册表不会关闭它
    pub fn register(&mut self, destination: Destination, mask: impl Into<LevelSet>) -> SinkId {
        self.push(Sink::new(destination, mask))
    }

    /// 以截断方式打开文件并注册，文件随注册表一起关闭
    ///
    /// # 错误
    ///
    /// 文件无法打开时返回 `SinkLogError::IoError`，注册表保持不变。
    pub fn register_owned<P: AsRef<Path>>(
        &mut self,
        path: P,
        mask: impl Into<LevelSet>,
    ) -> Result<SinkId> {
        let sink = Sink::open_file(path, mask)?;
        Ok(self.push(sink))
    }

    /// 把 `additional` 并入当前所有 sink 的过滤器
    ///
    /// 之后注册的 sink 不受影响。
    pub fn broadcast_widen(&mut self, additional: impl Into<LevelSet>) {
        let additional = additional.into();
        for sink in &mut self.sinks {
            sink.widen_mask(additional);
        }
        tracing::debug!(levels = %additional, sinks = self.sinks.len(), "widened all sinks");
    }

    /// 放宽单个 sink 的过滤器
    pub fn widen(&mut self, id: SinkId, additional: impl Into<LevelSet>) -> Result<()> {
        self.sink_mut(id)?.widen_mask(additional);
        Ok(())
    }

    /// 显式替换单个 sink 的过滤器
    pub fn replace_mask(&mut self, id: SinkId, mask: impl Into<LevelSet>) -> Result<()> {
        self.sink_mut(id)?.replace_mask(mask);
        Ok(())
    }

    pub fn get(&self, id: SinkId) -> Option<&Sink> {
        self.sinks.get(id.0)
    }

    fn sink_mut(&mut self, id: SinkId) -> Result<&mut Sink> {
        let len = self.sinks.len();
        self.sinks.get_mut(id.0).ok_or_else(|| {
            SinkLogError::config(format!(
                "unknown sink id {} (registry holds {} sinks)",
                id.0, len
            ))
        })
    }

    /// 按插入顺序遍历
    pub fn iter(&self) -> std::slice::Iter<'_, Sink> {
        self.sinks.iter()
    }

    pub fn len(&self) -> usize {
        self.sinks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sinks.is_empty()
    }

    /// 是否有任一 sink 接受 `level`
    pub fn accepts_any(&self, level: Level) -> bool {
        self.sinks.iter().any(|sink| sink.accepts(level))
    }

    /// 以进程时钟的经过时间发射一条消息
    pub fn emit(
        &mut self,
        level: Level,
        callsite: Option<&CallSite>,
        args: fmt::Arguments<'_>,
    ) -> Emission {
        self.emit_at(clock::elapsed(), level, callsite, args)
    }

    /// 以给定的经过时间发射一条消息
    pub fn emit_at(
        &mut self,
        elapsed: Duration,
        level: Level,
        callsite: Option<&CallSite>,
        args: fmt::Arguments<'_>,
    ) -> Emission {
        emitter::emit(&mut self.sinks, elapsed, level, callsite, Body::Pending(args))
    }

    /// 发射一段已经格式化好的消息体，原样写出
    pub fn emit_formatted(
        &mut self,
        level: Level,
        callsite: Option<&CallSite>,
        body: &str,
    ) -> Emission {
        emitter::emit(
            &mut self.sinks,
            clock::elapsed(),
            level,
            callsite,
            Body::Ready(body),
        )
    }
}

impl<'a> IntoIterator for &'a SinkRegistry {
    type Item = &'a Sink;
    type IntoIter = std::slice::Iter<'a, Sink>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// 进程级注册表，首次访问时创建；时钟参考点同时确定
static GLOBAL_REGISTRY: Lazy<Mutex<SinkRegistry>> = Lazy::new(|| {
    clock::start();
    Mutex::new(SinkRegistry::new())
});

/// 在持有锁的情况下访问进程级注册表
///
/// 中毒的锁会被恢复：发射路径中的 panic 不应让日志从此失效。
/// 在 `f` 内部再次调用 [`crate::log_at`] 等日志函数会死锁；日志函数自身
/// 在锁外格式化消息参数，因此参数的 `Display` 实现可以安全地记录日志。
pub fn with_registry<R>(f: impl FnOnce(&mut SinkRegistry) -> R) -> R {
    let mut guard = GLOBAL_REGISTRY
        .lock()
        .unwrap_or_else(PoisonError::into_inner);
    f(&mut *guard)
}

/// 拆除进程级注册表，关闭所有由注册表打开的文件
///
/// 返回被拆除的 sink 数量。之后的注册从一个空注册表重新开始。
pub fn shutdown() -> usize {
    let registry = with_registry(std::mem::take);
    let count = registry.len();
    drop(registry);
    tracing::debug!(sinks = count, "sink registry torn down");
    count
}
