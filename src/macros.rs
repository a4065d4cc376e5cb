//! 捕获调用点的日志宏
//!
//! 这些宏记录外层函数名与行号，然后转发到 [`crate::log_at`]。

/// 外层函数的名称
#[doc(hidden)]
#[macro_export]
macro_rules! __function_name {
    () => {{
        fn f() {}
        fn type_name_of<T>(_: T) -> &'static str {
            ::std::any::type_name::<T>()
        }
        let name = type_name_of(f);
        let name = name.strip_suffix("::f").unwrap_or(name);
        name.rsplit("::")
            .find(|part| *part != "{{closure}}")
            .unwrap_or(name)
    }};
}

/// 当前位置的 [`CallSite`](crate::CallSite)
#[macro_export]
macro_rules! callsite {
    () => {
        $crate::CallSite::new($crate::__function_name!(), ::std::line!())
    };
}

/// 以给定级别记录一条格式化消息
///
/// ```rust
/// use sinklog::{log, Level};
///
/// let bar = 1231;
/// log!(Level::Info, "{}: {}", "bar", bar);
/// ```
#[macro_export]
macro_rules! log {
    ($level:expr, $($arg:tt)+) => {
        $crate::log_at($level, ::std::option::Option::Some(&$crate::callsite!()), ::std::format_args!($($arg)+))
    };
}

#[macro_export]
macro_rules! debug {
    ($($arg:tt)+) => { $crate::log!($crate::Level::Debug, $($arg)+) };
}

#[macro_export]
macro_rules! info {
    ($($arg:tt)+) => { $crate::log!($crate::Level::Info, $($arg)+) };
}

#[macro_export]
macro_rules! progress {
    ($($arg:tt)+) => { $crate::log!($crate::Level::Progress, $($arg)+) };
}

#[macro_export]
macro_rules! important {
    ($($arg:tt)+) => { $crate::log!($crate::Level::Important, $($arg)+) };
}

#[macro_export]
macro_rules! warning {
    ($($arg:tt)+) => { $crate::log!($crate::Level::Warning, $($arg)+) };
}

#[macro_export]
macro_rules! error {
    ($($arg:tt)+) => { $crate::log!($crate::Level::Error, $($arg)+) };
}

/// 原样记录一段文本，不做格式化
#[macro_export]
macro_rules! message {
    ($level:expr, $text:expr $(,)?) => {
        $crate::log!($level, "{}", $text)
    };
}

/// 条件为假时记录一条 `error` 日志，然后继续执行
///
/// 宏的值是条件本身，调用方可以据此决定是否中止。
///
/// ```rust
/// let held = sinklog::log_assert!(1 + 1 == 3, "off by {}", 1);
/// assert!(!held);
/// ```
#[macro_export]
macro_rules! log_assert {
    ($cond:expr $(,)?) => {{
        let held: bool = $cond;
        if !held {
            $crate::log!($crate::Level::Error, "assertion failed: {}", ::std::stringify!($cond));
        }
        held
    }};
    ($cond:expr, $($arg:tt)+) => {{
        let held: bool = $cond;
        if !held {
            $crate::log!(
                $crate::Level::Error,
                "assertion failed: {}: {}",
                ::std::stringify!($cond),
                ::std::format_args!($($arg)+)
            );
        }
        held
    }};
}
