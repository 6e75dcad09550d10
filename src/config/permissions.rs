/// ファイルパーミッション管理モジュール
///
/// APIトークンを含む config.toml を所有者のみが読み書きできるようにします。
/// Unix系 (Linux, macOS) では 0600、それ以外のプラットフォームでは何もしません。
use crate::config::error::ConfigError;
use std::path::Path;

/// トークンを保存したファイルを所有者専用にする
///
/// # Errors
/// ファイルが存在しない場合、またはパーミッション設定に失敗した場合に ConfigError を返します。
pub fn restrict_to_owner(file_path: &Path) -> Result<(), ConfigError> {
    if !file_path.is_file() {
        return Err(ConfigError::file_system(
            format!("Token file not found: {}", file_path.display()),
            std::io::Error::new(std::io::ErrorKind::NotFound, "File does not exist"),
        ));
    }

    apply_owner_only(file_path)
}

#[cfg(unix)]
fn apply_owner_only(file_path: &Path) -> Result<(), ConfigError> {
    use std::os::unix::fs::PermissionsExt;

    std::fs::set_permissions(file_path, std::fs::Permissions::from_mode(0o600)).map_err(|e| {
        ConfigError::file_system(
            format!("Failed to restrict permissions (0600) on {}", file_path.display()),
            e,
        )
    })
}

// Windows ではユーザープロファイル配下のファイルは既定で所有者のみアクセス可能
#[cfg(not(unix))]
fn apply_owner_only(_file_path: &Path) -> Result<(), ConfigError> {
    Ok(())
}
