//! 调用点信息：函数名与行号

use std::fmt;
use std::panic::Location;

/// 一次日志调用的源码位置
///
/// 宏会捕获外层函数名；`#[track_caller]` 函数只能拿到文件路径，
/// 此时以文件路径代替函数名。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CallSite {
    function: &'static str,
    line: u32,
}

impl CallSite {
    pub const fn new(function: &'static str, line: u32) -> Self {
        Self { function, line }
    }

    /// 由调用方位置构造
    #[track_caller]
    pub fn caller() -> Self {
        let location = Location::caller();
        Self::new(location.file(), location.line())
    }

    pub fn function(&self) -> &'static str {
        self.function
    }

    pub fn line(&self) -> u32 {
        self.line
    }
}

impl fmt::Display for CallSite {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.function, self.line)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        assert_eq!(CallSite::new("main", 42).to_string(), "main:42");
    }

    #[test]
    fn test_caller_reports_this_file() {
        let site = CallSite::caller();
        assert!(site.function().ends_with("callsite.rs"));
        assert!(site.line() > 0);
    }
}
