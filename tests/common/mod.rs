//! 集成测试共用的辅助函数

/// 拆分 `[%6.2fs] ` 经过时间前缀，返回秒数与其后的内容
///
/// 秒数至少占六个字符宽；超过 999.99 秒时会更宽。
pub fn split_elapsed_prefix(line: &str) -> (f64, &str) {
    assert!(line.starts_with('['), "missing '[' in {:?}", line);
    let end = line
        .find("s] ")
        .unwrap_or_else(|| panic!("missing \"s] \" in {:?}", line));
    assert!(end >= 7, "seconds narrower than six columns in {:?}", line);
    let seconds: f64 = line[1..end]
        .trim()
        .parse()
        .unwrap_or_else(|e| panic!("bad seconds in {:?}: {}", line, e));
    assert!(seconds >= 0.0);
    (seconds, &line[end + 3..])
}

#[test]
fn test_split_elapsed_prefix() {
    assert_eq!(split_elapsed_prefix("[  0.00s] hello"), (0.0, "hello"));
    assert_eq!(split_elapsed_prefix("[  1.25s] [main:3] x"), (1.25, "[main:3] x"));
    assert_eq!(split_elapsed_prefix("[1234.50s] late"), (1234.5, "late"));
}
