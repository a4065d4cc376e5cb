//! 发射路径
//!
//! 每次日志调用都会经过这里：按注册顺序遍历 sink，跳过不接受该级别的
//! sink，对接受的 sink 写入一行带装饰的输出：
//!
//! ```text
//! [%6.2fs] [<function>:<line>] [<TAG>] <message>\n
//! ```
//!
//! 位置前缀只在 sink 同时接受 `debug` 时出现；`[ERR]`/`[WARN]` 标签只在
//! `error`/`warning` 级别出现，并用颜色转义包裹。

use crate::core::callsite::CallSite;
use crate::diagnostics::diagnostics;
use crate::error::SinkLogError;
use crate::level::Level;
use crate::sinks::Sink;
use std::borrow::Cow;
use std::fmt::{self, Write as _};
use std::time::Duration;

pub const ANSI_COLOR_RED: &str = "\x1b[31m";
pub const ANSI_COLOR_YELLOW: &str = "\x1b[33m";
pub const ANSI_COLOR_RESET: &str = "\x1b[0m";

/// 一次发射的投递结果
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Emission {
    /// 接受该级别的 sink 数量
    pub accepted: usize,
    /// 其中写入失败的数量
    pub failed: usize,
}

impl Emission {
    /// 成功写入的 sink 数量
    pub fn delivered(&self) -> usize {
        self.accepted - self.failed
    }
}

/// 经过时间前缀，如 `[  1.25s] `
pub fn elapsed_prefix(elapsed: Duration) -> String {
    format!("[{:6.2}s] ", elapsed.as_secs_f64())
}

/// `error`/`warning` 的彩色标签
pub fn severity_tag(level: Level) -> Option<String> {
    match level {
        Level::Error => Some(format!("{}[ERR] {}", ANSI_COLOR_RED, ANSI_COLOR_RESET)),
        Level::Warning => Some(format!("{}[WARN] {}", ANSI_COLOR_YELLOW, ANSI_COLOR_RESET)),
        _ => None,
    }
}

/// 组装一整行输出
pub fn render_line(prefix: &str, location: Option<&CallSite>, level: Level, body: &str) -> String {
    let mut line = String::with_capacity(prefix.len() + body.len() + 32);
    line.push_str(prefix);
    if let Some(site) = location {
        let _ = write!(line, "[{}] ", site);
    }
    if let Some(tag) = severity_tag(level) {
        line.push_str(&tag);
    }
    line.push_str(body);
    line.push('\n');
    line
}

/// 格式化消息体
///
/// # Panics
///
/// 某个 `Display`/`Debug` 实现返回错误时立即 panic：这是调用点的编程错误。
pub(crate) fn format_body(args: fmt::Arguments<'_>) -> String {
    if let Some(text) = args.as_str() {
        return text.to_string();
    }
    let mut body = String::new();
    if body.write_fmt(args).is_err() {
        panic!(
            "{}",
            SinkLogError::FormatError(
                "a formatting trait implementation returned an error".to_string()
            )
        );
    }
    body
}

/// 待投递的消息体：尚未格式化的参数，或已经格式化好的文本
#[derive(Clone, Copy)]
pub(crate) enum Body<'a> {
    Pending(fmt::Arguments<'a>),
    Ready(&'a str),
}

impl<'a> Body<'a> {
    fn render(self) -> Cow<'a, str> {
        match self {
            Body::Pending(args) => Cow::Owned(format_body(args)),
            Body::Ready(text) => Cow::Borrowed(text),
        }
    }
}

/// 将一条消息投递到所有接受该级别的 sink
///
/// 消息体只在第一个接受的 sink 出现时格式化一次；单个 sink 写入失败
/// 只记录并计数，不影响后续 sink。
pub(crate) fn emit(
    sinks: &mut [Sink],
    elapsed: Duration,
    level: Level,
    callsite: Option<&CallSite>,
    body: Body<'_>,
) -> Emission {
    let diag = diagnostics();
    diag.increment_events_emitted();

    let prefix = elapsed_prefix(elapsed);
    let mut rendered: Option<Cow<'_, str>> = None;
    let mut emission = Emission::default();

    for sink in sinks.iter_mut() {
        if !sink.accepts(level) {
            continue;
        }
        emission.accepted += 1;

        let text: &str = rendered.get_or_insert_with(|| body.render());
        let location = callsite.filter(|_| sink.accepts(Level::Debug));
        let line = render_line(&prefix, location, level, text);

        match sink.destination().write_line(line.as_bytes()) {
            Ok(()) => diag.increment_lines_written(),
            Err(e) => {
                emission.failed += 1;
                diag.increment_write_failures();
                tracing::warn!("Failed to write log line to {}: {}", sink.label(), e);
            }
        }
    }

    if emission.accepted == 0 {
        diag.increment_events_unrouted();
    }
    emission
}
