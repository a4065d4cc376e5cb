//! SinkLog 基本使用示例
//!
//! 标准输出接受 debug，因此每行带有调用位置；文件 sink 不接受 debug。

use sinklog::{colorize, Destination, Level, Style};

fn main() -> sinklog::Result<()> {
    sinklog::add_stream(
        Destination::Stdout,
        Level::Info | Level::Error | Level::Warning | Level::Debug,
    );
    sinklog::add_file_stream("test.txt", Level::Info | Level::Debug | Level::Error)?;
    sinklog::broadcast_widen(Level::Important);

    sinklog::important!("info test");
    sinklog::debug!("debug test");
    sinklog::error!("error test");
    sinklog::warning!("warning test");
    sinklog::log!(Level::Error, "test");
    sinklog::log!(Level::Info, "{}", "hello world");

    let bar = 1231;
    sinklog::log!(Level::Info, "{}: {}", "bar", bar);
    sinklog::info!("{}", colorize(Style::Blue, &format!("test {}", bar)));
    sinklog::important!("{}: {}", "bar", bar);
    sinklog::info!("{}", colorize(Style::Blink, "test asdf"));

    sinklog::log_assert!(false == true, "test");
    sinklog::log_assert!(true == false, "test {}", "asdf");
    sinklog::message!(Level::Error, "test");

    sinklog::progress(format_args!("plain function call, located by file"));

    let stats = sinklog::get_diagnostics();
    sinklog::info!(
        "{} events, {} lines written, {} write failures",
        stats.events_emitted,
        stats.lines_written,
        stats.write_failures
    );

    sinklog::shutdown();
    Ok(())
}
