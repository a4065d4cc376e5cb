//! 进程级时钟参考点
//!
//! 参考点在首次使用时确定，此后在进程生命周期内保持不变，
//! 可以在没有同步的情况下并发读取。

use once_cell::sync::Lazy;
use std::time::{Duration, Instant};

static CLOCK_START: Lazy<Instant> = Lazy::new(Instant::now);

/// 参考点；首次调用时确定
pub fn start() -> Instant {
    *CLOCK_START
}

/// 自参考点以来经过的时间
pub fn elapsed() -> Duration {
    CLOCK_START.elapsed()
}
