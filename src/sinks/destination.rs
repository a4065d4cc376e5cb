//! 输出目标
//!
//! 目标分为两类：由调用方提供、不归注册表所有的流（标准输出、标准错误、
//! 共享写入器），以及由注册表打开并拥有的文件。只有后者会在 sink 销毁时关闭。

use crate::error::{Result, SinkLogError};
use std::fmt;
use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, PoisonError};

/// 调用方持有的共享写入器
///
/// 注册表只持有一个克隆的句柄，丢弃 sink 不会关闭底层写入器。
pub type SharedWriter = Arc<Mutex<dyn Write + Send>>;

/// 日志行的输出目标
pub enum Destination {
    /// 进程继承的标准输出
    Stdout,
    /// 进程继承的标准错误
    Stderr,
    /// 外部提供的写入器
    Shared(SharedWriter),
    /// 由注册表打开的文件
    File(OwnedFile),
}

/// 注册表打开并拥有的文件
///
/// 句柄只在这里持有一份，随 `OwnedFile` 一起被丢弃时关闭。
pub struct OwnedFile {
    path: PathBuf,
    file: File,
}

impl OwnedFile {
    /// 文件路径
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Destination {
    /// 包装一个外部写入器
    pub fn shared<W: Write + Send + 'static>(writer: Arc<Mutex<W>>) -> Self {
        Self::Shared(writer)
    }

    /// 以截断方式创建并打开文件
    pub(crate) fn open_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(path)
            .map_err(|e| SinkLogError::io_at(path, e))?;

        Ok(Self::File(OwnedFile {
            path: path.to_path_buf(),
            file,
        }))
    }

    /// 目标是否归注册表所有
    pub fn is_owned(&self) -> bool {
        matches!(self, Self::File(_))
    }

    /// 用于诊断输出的名称
    pub fn label(&self) -> String {
        match self {
            Self::Stdout => "stdout".to_string(),
            Self::Stderr => "stderr".to_string(),
            Self::Shared(_) => "shared".to_string(),
            Self::File(owned) => owned.path.display().to_string(),
        }
    }

    /// 写入一整行
    ///
    /// 终端目标在每行之后刷新；文件不经过用户态缓冲，整行一次写入。
    pub fn write_line(&mut self, line: &[u8]) -> io::Result<()> {
        match self {
            Self::Stdout => {
                let mut out = io::stdout().lock();
                out.write_all(line)?;
                out.flush()
            }
            Self::Stderr => {
                let mut err = io::stderr().lock();
                err.write_all(line)?;
                err.flush()
            }
            Self::Shared(writer) => {
                let mut guard = writer.lock().unwrap_or_else(PoisonError::into_inner);
                guard.write_all(line)?;
                guard.flush()
            }
            Self::File(owned) => owned.file.write_all(line),
        }
    }

    /// 刷新目标
    pub fn flush(&mut self) -> io::Result<()> {
        match self {
            Self::Stdout => io::stdout().flush(),
            Self::Stderr => io::stderr().flush(),
            Self::Shared(writer) => writer
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .flush(),
            Self::File(owned) => owned.file.flush(),
        }
    }
}

impl fmt::Debug for Destination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Stdout => f.write_str("Stdout"),
            Self::Stderr => f.write_str("Stderr"),
            Self::Shared(_) => f.write_str("Shared(..)"),
            Self::File(owned) => f.debug_tuple("File").field(&owned.path).finish(),
        }
    }
}
