/// ドメインサービス: 表示用フォーマット
///
/// APIが返すISO 8601の日時をユーザー設定のタイムゾーンオフセットで表示し、
/// 長さやサイズを人間向けの文字列にする。
use crate::config::BYTES_PER_MB;
use chrono::{DateTime, FixedOffset};

/// ISO 8601 の日時をユーザー設定のオフセットでフォーマット
///
/// # 戻り値
/// - オフセット0: "2024-12-01 14:30:45 UTC"
/// - それ以外: "2024-12-01 23:30:45 +09:00"
///
/// パースできない場合やオフセットが不正な場合は、元の文字列をそのまま返します。
pub fn format_timestamp(timestamp: &str, offset_seconds: i32) -> String {
    let Ok(parsed) = DateTime::parse_from_rfc3339(timestamp) else {
        return timestamp.to_string();
    };
    let Some(offset) = FixedOffset::east_opt(offset_seconds) else {
        return timestamp.to_string();
    };

    let local = parsed.with_timezone(&offset);
    if offset_seconds == 0 {
        local.format("%Y-%m-%d %H:%M:%S UTC").to_string()
    } else {
        local.format("%Y-%m-%d %H:%M:%S %:z").to_string()
    }
}

/// 秒数を "m:ss"（1時間以上は "h:mm:ss"）にする
pub fn format_duration(seconds: f64) -> String {
    let total = seconds.max(0.0).round() as u64;
    let (hours, minutes, secs) = (total / 3600, (total % 3600) / 60, total % 60);
    if hours > 0 {
        format!("{}:{:02}:{:02}", hours, minutes, secs)
    } else {
        format!("{}:{:02}", minutes, secs)
    }
}

/// バイト数を MB 表記にする
pub fn format_size(bytes: u64) -> String {
    format!("{:.2} MB", bytes as f64 / BYTES_PER_MB as f64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_timestamp_utc() {
        let result = format_timestamp("2025-11-29T16:49:10+00:00", 0);
        assert_eq!(result, "2025-11-29 16:49:10 UTC");
    }

    #[test]
    fn test_format_timestamp_with_offset() {
        // UTC 16:49:10 → UTC+9 01:49:10 (翌日)
        let result = format_timestamp("2025-11-29T16:49:10+00:00", 32400);
        assert_eq!(result, "2025-11-30 01:49:10 +09:00");
    }

    #[test]
    fn test_format_timestamp_invalid_input() {
        assert_eq!(format_timestamp("yesterday", 0), "yesterday");
    }

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(0.0), "0:00");
        assert_eq!(format_duration(75.4), "1:15");
        assert_eq!(format_duration(3725.0), "1:02:05");
    }

    #[test]
    fn test_format_size() {
        assert_eq!(format_size(10_485_760), "10.00 MB");
    }
}
