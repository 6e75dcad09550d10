/// ドメインサービス: 入力バリデーション
///
/// 字幕ファイル、言語コード、ダウンロード先の検証を行う。
/// 設定値（最大ファイルサイズ、対応形式）はAPP_CONFIGから取得します。
use crate::config::APP_CONFIG;
use crate::domain::error::DomainError;
use std::path::Path;

/// 検証済みの字幕ファイル
#[derive(Debug)]
pub struct CaptionFile {
    pub path: String,
    pub content: String,
}

/// アップロード対象の字幕ファイルを検証して読み込む
///
/// # エラー
/// - ファイルが存在しない / ディレクトリが指定された
/// - ファイルが空 / サイズ超過
/// - 対応していない拡張子
/// - UTF-8 テキストではない
pub fn validate_caption_file(file_path: &str) -> Result<CaptionFile, DomainError> {
    let path = Path::new(file_path);

    let metadata =
        std::fs::metadata(path).map_err(|_| DomainError::file_not_found(file_path))?;

    if metadata.is_dir() {
        return Err(DomainError::NotAFile {
            path: file_path.to_string(),
        });
    }

    let size = metadata.len();
    if size == 0 {
        return Err(DomainError::EmptyFile {
            path: file_path.to_string(),
        });
    }

    let max_file_size = APP_CONFIG.captions.max_file_size;
    if size > max_file_size {
        return Err(DomainError::FileTooLarge {
            size,
            max: max_file_size,
        });
    }

    let supported_formats = &APP_CONFIG.captions.supported_formats;
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_lowercase)
        .ok_or_else(|| DomainError::invalid_format(file_path, supported_formats, "no extension"))?;

    if !supported_formats.contains(&extension) {
        return Err(DomainError::invalid_format(
            file_path,
            supported_formats,
            extension,
        ));
    }

    let bytes = std::fs::read(path).map_err(|_| DomainError::file_not_found(file_path))?;
    let content = String::from_utf8(bytes).map_err(|_| DomainError::NotText {
        path: file_path.to_string(),
    })?;

    Ok(CaptionFile {
        path: file_path.to_string(),
        content,
    })
}

/// 言語コードを検証する
///
/// 2〜3文字の英字、任意で `-` に続く2〜4文字の英数字（例: `fr`, `eng`, `pt-BR`, `zh-Hant`）
pub fn validate_language_code(code: &str) -> Result<(), DomainError> {
    let invalid = || DomainError::InvalidLanguageCode {
        code: code.to_string(),
    };

    let mut parts = code.splitn(2, '-');
    let primary = parts.next().unwrap_or_default();
    if !(2..=3).contains(&primary.len()) || !primary.chars().all(|c| c.is_ascii_alphabetic()) {
        return Err(invalid());
    }

    if let Some(region) = parts.next()
        && (!(2..=4).contains(&region.len())
            || !region.chars().all(|c| c.is_ascii_alphanumeric()))
    {
        return Err(invalid());
    }

    Ok(())
}

/// ダウンロード先を検証する
///
/// 既存ファイルの上書きは `overwrite` が true の場合のみ許可します。
pub fn validate_output_path(output_path: &str, overwrite: bool) -> Result<(), DomainError> {
    let path = Path::new(output_path);

    if path.is_dir() {
        return Err(DomainError::NotAFile {
            path: output_path.to_string(),
        });
    }

    if path.exists() && !overwrite {
        return Err(DomainError::OutputExists {
            path: output_path.to_string(),
        });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const SRT: &str = "1\n00:00:00,000 --> 00:00:02,000\nHello\n";

    #[test]
    fn test_valid_caption_file() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("captions.SRT");
        std::fs::write(&file, SRT).unwrap();

        let caption = validate_caption_file(file.to_str().unwrap()).unwrap();
        assert!(caption.path.ends_with("captions.SRT"));
        assert_eq!(caption.content, SRT);
    }

    #[test]
    fn test_missing_caption_file() {
        let result = validate_caption_file("/nonexistent/captions.srt");
        assert!(matches!(result, Err(DomainError::FileNotFound { .. })));
    }

    #[test]
    fn test_empty_caption_file() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("empty.srt");
        std::fs::write(&file, "").unwrap();

        let result = validate_caption_file(file.to_str().unwrap());
        assert!(matches!(result, Err(DomainError::EmptyFile { .. })));
    }

    #[test]
    fn test_unsupported_caption_extension() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("captions.txt");
        std::fs::write(&file, SRT).unwrap();

        let result = validate_caption_file(file.to_str().unwrap());
        assert!(matches!(result, Err(DomainError::InvalidFormat { .. })));
    }

    #[test]
    fn test_binary_caption_file() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("captions.vtt");
        std::fs::write(&file, [0xff, 0xfe, 0x00, 0x80]).unwrap();

        let result = validate_caption_file(file.to_str().unwrap());
        assert!(matches!(result, Err(DomainError::NotText { .. })));
    }

    #[test]
    fn test_language_codes() {
        for code in ["fr", "eng", "pt-BR", "zh-Hant"] {
            assert!(validate_language_code(code).is_ok(), "{} should be valid", code);
        }
        for code in ["", "f", "french", "fr-", "fr/../x", "12"] {
            assert!(validate_language_code(code).is_err(), "{} should be invalid", code);
        }
    }

    #[test]
    fn test_output_path_rules() {
        let dir = TempDir::new().unwrap();
        let existing = dir.path().join("video.mp4");
        std::fs::write(&existing, b"data").unwrap();

        assert!(matches!(
            validate_output_path(existing.to_str().unwrap(), false),
            Err(DomainError::OutputExists { .. })
        ));
        assert!(validate_output_path(existing.to_str().unwrap(), true).is_ok());
        assert!(matches!(
            validate_output_path(dir.path().to_str().unwrap(), true),
            Err(DomainError::NotAFile { .. })
        ));
        assert!(validate_output_path(dir.path().join("new.mp4").to_str().unwrap(), false).is_ok());
    }
}
