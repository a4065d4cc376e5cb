//! 日志级别与级别集合
//!
//! `Level` 是六个按紧急程度递增排列的严重级别之一；`LevelSet` 是一个
//! 六位宽的位掩码，每个级别占一位。每个 sink 以一个 `LevelSet` 作为过滤器，
//! 消息级别与过滤器的交集非空即通过。

use crate::error::{Result, SinkLogError};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{BitAnd, BitAndAssign, BitOr, BitOrAssign};
use std::str::FromStr;

/// 已定义的级别数量，同时也是 `LevelSet` 的位宽
pub const LEVEL_COUNT: usize = 6;

/// 日志严重级别，按紧急程度递增排列
///
/// 反序列化与 [`FromStr`] 共用同一套解析规则（不区分大小写，接受 `warn`/`err`）。
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", try_from = "String")]
#[repr(u8)]
pub enum Level {
    Debug = 0,
    Info = 1,
    Progress = 2,
    Important = 3,
    Warning = 4,
    Error = 5,
}

const _: () = assert!(
    Level::ALL.len() == LEVEL_COUNT && Level::Error as usize == LEVEL_COUNT - 1,
    "level count doesn't match the level set width"
);

impl Level {
    /// 所有级别，按紧急程度排列
    pub const ALL: [Level; LEVEL_COUNT] = [
        Level::Debug,
        Level::Info,
        Level::Progress,
        Level::Important,
        Level::Warning,
        Level::Error,
    ];

    /// 该级别在位掩码中对应的位
    pub const fn bit(self) -> u8 {
        1 << (self as u8)
    }

    /// 转换为只包含该级别的单元素集合
    pub const fn as_set(self) -> LevelSet {
        LevelSet::new(self.bit())
    }

    /// 小写名称
    pub const fn as_str(self) -> &'static str {
        match self {
            Level::Debug => "debug",
            Level::Info => "info",
            Level::Progress => "progress",
            Level::Important => "important",
            Level::Warning => "warning",
            Level::Error => "error",
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Level {
    type Err = SinkLogError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "debug" => Ok(Level::Debug),
            "info" => Ok(Level::Info),
            "progress" => Ok(Level::Progress),
            "important" => Ok(Level::Important),
            "warning" | "warn" => Ok(Level::Warning),
            "error" | "err" => Ok(Level::Error),
            _ => Err(SinkLogError::InvalidLogLevel(s.to_string())),
        }
    }
}

impl TryFrom<String> for Level {
    type Error = SinkLogError;

    fn try_from(name: String) -> Result<Self> {
        name.parse()
    }
}

/// 级别集合：每个级别占一位的位掩码
///
/// 值语义、不可变；所有运算都是纯函数，且在六位定义域上是全函数。
/// 位于定义域之外的位无法通过公开 API 构造出来。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "LevelSetRepr", into = "Vec<Level>")]
pub struct LevelSet {
    bits: u8,
}

impl LevelSet {
    const fn new(bits: u8) -> Self {
        Self { bits }
    }

    /// 定义域掩码：六个已定义级别的所有位
    pub const DOMAIN_MASK: u8 = (1 << LEVEL_COUNT) - 1;

    /// 空集合
    pub const EMPTY: Self = Self::new(0);

    /// 包含全部六个级别的集合
    pub const ALL: Self = Self::new(Self::DOMAIN_MASK);

    /// 从原始位构造；定义域之外的位会被拒绝
    pub fn from_bits(bits: u8) -> Result<Self> {
        if bits & !Self::DOMAIN_MASK != 0 {
            return Err(SinkLogError::ConfigInvariantError(bits));
        }
        Ok(Self::new(bits))
    }

    /// 原始位
    pub const fn bits(self) -> u8 {
        self.bits
    }

    /// 至少包含一个级别时为 true，即过滤谓词
    pub const fn any(self) -> bool {
        self.bits != 0
    }

    pub const fn is_empty(self) -> bool {
        self.bits == 0
    }

    pub const fn contains(self, level: Level) -> bool {
        self.bits & level.bit() != 0
    }

    pub const fn union(self, other: Self) -> Self {
        Self::new(self.bits | other.bits)
    }

    pub const fn intersection(self, other: Self) -> Self {
        Self::new(self.bits & other.bits)
    }

    /// 集合中的级别数量
    pub const fn len(self) -> usize {
        self.bits.count_ones() as usize
    }

    /// 按紧急程度递增遍历集合中的级别
    pub fn iter(self) -> impl Iterator<Item = Level> {
        Level::ALL.into_iter().filter(move |level| self.contains(*level))
    }
}

impl From<Level> for LevelSet {
    fn from(level: Level) -> Self {
        level.as_set()
    }
}

impl FromIterator<Level> for LevelSet {
    fn from_iter<I: IntoIterator<Item = Level>>(iter: I) -> Self {
        iter.into_iter()
            .fold(LevelSet::EMPTY, |set, level| set | level)
    }
}

impl From<LevelSet> for Vec<Level> {
    fn from(set: LevelSet) -> Self {
        set.iter().collect()
    }
}

// 级别与集合任意组合的 `|` 与 `&`，结果总是 `LevelSet`
macro_rules! impl_set_ops {
    ($lhs:ty, $rhs:ty) => {
        impl BitOr<$rhs> for $lhs {
            type Output = LevelSet;

            fn bitor(self, rhs: $rhs) -> LevelSet {
                LevelSet::from(self).union(LevelSet::from(rhs))
            }
        }

        impl BitAnd<$rhs> for $lhs {
            type Output = LevelSet;

            fn bitand(self, rhs: $rhs) -> LevelSet {
                LevelSet::from(self).intersection(LevelSet::from(rhs))
            }
        }
    };
}

impl_set_ops!(Level, Level);
impl_set_ops!(Level, LevelSet);
impl_set_ops!(LevelSet, Level);
impl_set_ops!(LevelSet, LevelSet);

impl<T: Into<LevelSet>> BitOrAssign<T> for LevelSet {
    fn bitor_assign(&mut self, rhs: T) {
        *self = self.union(rhs.into());
    }
}

impl<T: Into<LevelSet>> BitAndAssign<T> for LevelSet {
    fn bitand_assign(&mut self, rhs: T) {
        *self = self.intersection(rhs.into());
    }
}

impl fmt::Display for LevelSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return f.write_str("none");
        }
        for (i, level) in self.iter().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            f.write_str(level.as_str())?;
        }
        Ok(())
    }
}

impl FromStr for LevelSet {
    type Err = SinkLogError;

    /// 解析逗号或 `|` 分隔的级别名称，另外接受 `all` 与 `none`
    fn from_str(s: &str) -> Result<Self> {
        let trimmed = s.trim();
        match trimmed.to_lowercase().as_str() {
            "all" => return Ok(LevelSet::ALL),
            "none" | "" => return Ok(LevelSet::EMPTY),
            _ => {}
        }
        trimmed
            .split([',', '|'])
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .map(Level::from_str)
            .collect()
    }
}

/// 反序列化时接受的表示形式：级别列表或字符串
#[derive(Deserialize)]
#[serde(untagged)]
enum LevelSetRepr {
    List(Vec<Level>),
    Text(String),
}

impl TryFrom<LevelSetRepr> for LevelSet {
    type Error = SinkLogError;

    fn try_from(repr: LevelSetRepr) -> Result<Self> {
        match repr {
            LevelSetRepr::List(levels) => Ok(levels.into_iter().collect()),
            LevelSetRepr::Text(text) => text.parse(),
        }
    }
}
