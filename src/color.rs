//! 消息体着色
//!
//! 与 `[ERR]`/`[WARN]` 标签不同，消息体的颜色由调用方决定，并遵循
//! `colored` 的终端检测与 `NO_COLOR`/`CLICOLOR_FORCE` 约定。

use colored::Colorize;

/// 可用的颜色与效果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Style {
    Red,
    Green,
    Yellow,
    Blue,
    Magenta,
    Cyan,
    Blink,
}

/// 用颜色转义包裹 `text`
pub fn colorize(style: Style, text: &str) -> String {
    let styled = match style {
        Style::Red => text.red(),
        Style::Green => text.green(),
        Style::Yellow => text.yellow(),
        Style::Blue => text.blue(),
        Style::Magenta => text.magenta(),
        Style::Cyan => text.cyan(),
        Style::Blink => text.blink(),
    };
    styled.to_string()
}
