//! Sink：输出目标与其级别过滤器的组合

use crate::error::Result;
use crate::level::{Level, LevelSet};
use crate::sinks::destination::Destination;
use std::path::Path;

/// 一个输出目标及其独立的级别过滤器
#[derive(Debug)]
pub struct Sink {
    destination: Destination,
    mask: LevelSet,
}

impl Sink {
    /// 包装一个已经打开的目标
    ///
    /// 外部提供的目标（标准输出、共享写入器）不会在 sink 销毁时被关闭。
    pub fn new(destination: Destination, mask: impl Into<LevelSet>) -> Self {
        Self {
            destination,
            mask: mask.into(),
        }
    }

    /// 以截断方式打开 `path` 并拥有该文件
    ///
    /// # 错误
    ///
    /// 无法打开文件时（权限、无效路径、资源耗尽）返回 `SinkLogError::IoError`。
    pub fn open_file<P: AsRef<Path>>(path: P, mask: impl Into<LevelSet>) -> Result<Self> {
        Ok(Self::new(Destination::open_file(path)?, mask))
    }

    /// 把额外的级别并入过滤器，从不移除已有级别
    pub fn widen_mask(&mut self, additional: impl Into<LevelSet>) {
        self.mask |= additional;
    }

    /// 显式替换过滤器
    pub fn replace_mask(&mut self, mask: impl Into<LevelSet>) {
        self.mask = mask.into();
    }

    /// `level` 与当前过滤器有交集时返回 true
    pub fn accepts(&self, level: Level) -> bool {
        (self.mask & level).any()
    }

    pub fn mask(&self) -> LevelSet {
        self.mask
    }

    /// 供发射路径写入的原始目标
    pub fn destination(&mut self) -> &mut Destination {
        &mut self.destination
    }

    pub fn is_owned(&self) -> bool {
        self.destination.is_owned()
    }

    pub fn label(&self) -> String {
        self.destination.label()
    }
}

impl Drop for Sink {
    fn drop(&mut self) {
        if !self.destination.is_owned() {
            return;
        }
        if let Err(e) = self.destination.flush() {
            tracing::warn!("Failed to flush {} before closing: {}", self.label(), e);
        }
        tracing::debug!(sink = %self.label(), "closing owned log file");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};
    use tempfile::TempDir;

    fn shared_sink(mask: impl Into<LevelSet>) -> (Sink, Arc<Mutex<Vec<u8>>>) {
        let buffer = Arc::new(Mutex::new(Vec::new()));
        (Sink::new(Destination::shared(buffer.clone()), mask), buffer)
    }

    #[test]
    fn test_info_only_sink_filters_other_levels() {
        let (sink, _) = shared_sink(Level::Info);

        assert!(sink.accepts(Level::Info));
        for level in [
            Level::Debug,
            Level::Progress,
            Level::Important,
            Level::Warning,
            Level::Error,
        ] {
            assert!(!sink.accepts(level), "{} should be rejected", level);
        }
    }

    #[test]
    fn test_widen_never_removes_levels() {
        let (mut sink, _) = shared_sink(Level::Info | Level::Error);

        sink.widen_mask(Level::Important);
        sink.widen_mask(LevelSet::EMPTY);

        assert!(sink.accepts(Level::Info));
        assert!(sink.accepts(Level::Error));
        assert!(sink.accepts(Level::Important));
        assert_eq!(sink.mask().len(), 3);
    }

    #[test]
    fn test_replace_mask() {
        let (mut sink, _) = shared_sink(LevelSet::ALL);
        sink.replace_mask(Level::Warning);
        assert_eq!(sink.mask(), Level::Warning.as_set());
        assert!(!sink.accepts(Level::Debug));
    }

    #[test]
    fn test_dropping_unowned_sink_leaves_writer_usable() {
        let (sink, buffer) = shared_sink(Level::Info);
        assert!(!sink.is_owned());
        drop(sink);

        assert_eq!(Arc::strong_count(&buffer), 1);
        use std::io::Write;
        buffer.lock().unwrap().write_all(b"still open").unwrap();
    }

    #[test]
    fn test_owned_file_sink() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("owned.log");

        let mut sink = Sink::open_file(&path, Level::Error).unwrap();
        assert!(sink.is_owned());
        sink.destination().write_line(b"boom\n").unwrap();
        drop(sink);

        assert_eq!(std::fs::read_to_string(&path).unwrap(), "boom\n");
    }
}
