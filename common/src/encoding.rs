//! 文字コード・区切り文字の判定
//!
//! Google Ads キーワードプランナーの出力は文字コードを明示しない。
//! UTF-16LE → UTF-8 の順にデコードを試し、ヘッダー行（3行目）に
//! タブかカンマが現れた最初の候補を採用する。

use crate::error::{DecodeError, Result};
use encoding_rs::{UTF_16LE, UTF_8};
use serde::Serialize;
use std::fmt;

/// 先頭のメタデータ行数（タイトル行・期間行）
pub const METADATA_LINES: usize = 2;

const BOM: char = '\u{FEFF}';

/// 試行する文字コード
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum TextEncoding {
    Utf16Le,
    Utf8,
}

impl TextEncoding {
    /// 試行順
    pub const CANDIDATES: [TextEncoding; 2] = [TextEncoding::Utf16Le, TextEncoding::Utf8];

    /// バイト列をデコード（不正なバイト列ならNone）
    pub fn decode(&self, bytes: &[u8]) -> Option<String> {
        let encoding = match self {
            TextEncoding::Utf16Le => UTF_16LE,
            TextEncoding::Utf8 => UTF_8,
        };
        let text = encoding.decode_without_bom_handling_and_without_replacement(bytes)?;
        Some(text.strip_prefix(BOM).unwrap_or(&*text).to_string())
    }
}

impl fmt::Display for TextEncoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TextEncoding::Utf16Le => write!(f, "UTF-16LE"),
            TextEncoding::Utf8 => write!(f, "UTF-8"),
        }
    }
}

/// 区切り文字
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Delimiter {
    Tab,
    Comma,
}

impl Delimiter {
    pub fn as_byte(&self) -> u8 {
        match self {
            Delimiter::Tab => b'\t',
            Delimiter::Comma => b',',
        }
    }

    /// ヘッダー行の出現数から選択（同数ならタブ、どちらも0ならNone）
    pub fn choose(counts: DelimiterCounts) -> Option<Self> {
        match (counts.tabs, counts.commas) {
            (0, 0) => None,
            (tabs, commas) if tabs >= commas => Some(Delimiter::Tab),
            _ => Some(Delimiter::Comma),
        }
    }
}

impl fmt::Display for Delimiter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Delimiter::Tab => write!(f, "TAB"),
            Delimiter::Comma => write!(f, "COMMA"),
        }
    }
}

/// ヘッダー行内の区切り文字候補の出現数
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DelimiterCounts {
    pub tabs: usize,
    pub commas: usize,
}

impl DelimiterCounts {
    pub fn of_line(line: &str) -> Self {
        line.chars().fold(Self::default(), |mut acc, c| {
            match c {
                '\t' => acc.tabs += 1,
                ',' => acc.commas += 1,
                _ => {}
            }
            acc
        })
    }
}

/// デコード結果
#[derive(Debug, Clone)]
pub struct DecodedText {
    pub text: String,
    pub encoding: TextEncoding,
    pub delimiter: Delimiter,
}

/// ヘッダー行（メタデータ2行の次の物理行）を取得
pub fn header_line(text: &str) -> &str {
    text.split('\n').nth(METADATA_LINES).unwrap_or("")
}

/// バイト列の文字コードと区切り文字を判定してデコード
///
/// # Errors
/// * UTF-8 としても不正なバイト列 → `DecodeError::InvalidUtf8`
/// * どちらの文字コードでもヘッダー行に区切り文字がない → `DecodeError::NoDelimiter`
pub fn detect_and_decode(bytes: &[u8]) -> Result<DecodedText> {
    for encoding in TextEncoding::CANDIDATES {
        let Some(text) = encoding.decode(bytes) else {
            log::debug!("{}: デコード失敗", encoding);
            if encoding == TextEncoding::Utf8 {
                return Err(DecodeError::InvalidUtf8.into());
            }
            continue;
        };

        let header = header_line(&text);
        let counts = DelimiterCounts::of_line(header);
        log::debug!(
            "{}: {}文字, ヘッダー行のタブ={} カンマ={}",
            encoding,
            text.chars().count(),
            counts.tabs,
            counts.commas
        );

        match Delimiter::choose(counts) {
            Some(delimiter) => {
                log::debug!("文字コード {} / 区切り文字 {} を使用", encoding, delimiter);
                return Ok(DecodedText {
                    text,
                    encoding,
                    delimiter,
                });
            }
            None => log::debug!("{}: 区切り文字が見つからないため次の候補へ", encoding),
        }
    }

    Err(DecodeError::NoDelimiter.into())
}
