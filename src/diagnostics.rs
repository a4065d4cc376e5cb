//! 定义 SinkLog 日志设施的内部诊断与指标。
//!
//! 单个 sink 的写入失败不会中断对其它 sink 的投递，只会在这里计数。

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::OnceLock;
use std::time::{Duration, Instant};

/// 内部诊断与指标数据结构。
///
/// 使用原子操作确保线程安全。
#[derive(Debug, Default)]
pub struct Diagnostics {
    /// 诊断实例创建时间
    start_time: Option<Instant>,

    /// 经过发射路径的日志调用总数
    events_emitted: AtomicU64,

    /// 没有任何 sink 接受的日志调用数
    events_unrouted: AtomicU64,

    /// 成功写入的行数（按 sink 计）
    lines_written: AtomicU64,

    /// 写入失败次数（按 sink 计）
    write_failures: AtomicU64,
}

/// 诊断数据的快照，用于外部查询。
#[derive(Debug, Clone, PartialEq)]
pub struct DiagnosticsSnapshot {
    pub uptime: Option<Duration>,
    pub events_emitted: u64,
    pub events_unrouted: u64,
    pub lines_written: u64,
    pub write_failures: u64,
    /// 写入成功率（百分比）
    pub write_success_rate_percent: f64,
}

impl Diagnostics {
    /// 创建新的诊断实例。
    pub fn new() -> Self {
        Self {
            start_time: Some(Instant::now()),
            ..Default::default()
        }
    }

    pub fn increment_events_emitted(&self) {
        self.events_emitted.fetch_add(1, Ordering::Relaxed);
    }

    pub fn increment_events_unrouted(&self) {
        self.events_unrouted.fetch_add(1, Ordering::Relaxed);
    }

    pub fn increment_lines_written(&self) {
        self.lines_written.fetch_add(1, Ordering::Relaxed);
    }

    pub fn increment_write_failures(&self) {
        self.write_failures.fetch_add(1, Ordering::Relaxed);
    }

    /// 获取诊断数据的快照。
    pub fn snapshot(&self) -> DiagnosticsSnapshot {
        let lines_written = self.lines_written.load(Ordering::Relaxed);
        let write_failures = self.write_failures.load(Ordering::Relaxed);
        let attempts = lines_written + write_failures;

        let write_success_rate_percent = if attempts > 0 {
            (lines_written as f64 / attempts as f64) * 100.0
        } else {
            100.0
        };

        DiagnosticsSnapshot {
            uptime: self.start_time.map(|start| start.elapsed()),
            events_emitted: self.events_emitted.load(Ordering::Relaxed),
            events_unrouted: self.events_unrouted.load(Ordering::Relaxed),
            lines_written,
            write_failures,
            write_success_rate_percent,
        }
    }

    /// 重置所有计数器（主要用于测试）。
    pub fn reset(&self) {
        self.events_emitted.store(0, Ordering::Relaxed);
        self.events_unrouted.store(0, Ordering::Relaxed);
        self.lines_written.store(0, Ordering::Relaxed);
        self.write_failures.store(0, Ordering::Relaxed);
    }
}

static GLOBAL_DIAGNOSTICS: OnceLock<Diagnostics> = OnceLock::new();

/// 全局诊断实例，首次访问时创建。
pub fn diagnostics() -> &'static Diagnostics {
    GLOBAL_DIAGNOSTICS.get_or_init(Diagnostics::new)
}

/// 获取全局诊断数据快照
pub fn get_diagnostics() -> DiagnosticsSnapshot {
    diagnostics().snapshot()
}
