use regex_lite::Regex;
use std::sync::OnceLock;

const ANSI_PATTERN: &str = r"\x1B\[[;\d]*[A-Za-z]";

/// 로그 텍스트에서 ANSI 색상/스타일 이스케이프 시퀀스를 제거합니다.
pub fn strip_ansi_codes(text: &str) -> String {
    static ANSI: OnceLock<Option<Regex>> = OnceLock::new();

    match ANSI.get_or_init(|| Regex::new(ANSI_PATTERN).ok()) {
        Some(regex) => regex.replace_all(text, "").into_owned(),
        None => text.to_string(),
    }
}

/// 로그 스트림 옵션
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogOptions {
    pub tail: usize,
    pub follow: bool,
    pub timestamps: bool,
}

impl Default for LogOptions {
    fn default() -> Self {
        Self {
            tail: 100,
            follow: true,
            timestamps: false,
        }
    }
}
