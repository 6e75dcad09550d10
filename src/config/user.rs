/// ユーザー設定モジュール
///
/// 実行時にユーザーディレクトリから読み込まれる動的設定を管理します。
/// Windows: C:\Users\<User>\AppData\Roaming\wistia-cli\config.toml
/// macOS:   /Users/<User>/Library/Application Support/wistia-cli/config.toml
/// Linux:   /home/<user>/.config/wistia-cli/config.toml
///
/// 初回起動時にデフォルト値から自動的にconfig.tomlを作成します。
use crate::config::error::ConfigError;
use crate::config::permissions;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// 保存済みトークンより優先される環境変数
pub const TOKEN_ENV_VAR: &str = "WISTIA_API_TOKEN";

/// デフォルトのタイムゾーンオフセット（UTC）
const DEFAULT_TIMEZONE_OFFSET: i32 = 0;

/// タイムゾーンオフセットの許容範囲（±18時間）
const MAX_TIMEZONE_OFFSET: i32 = 64800;
const MIN_TIMEZONE_OFFSET: i32 = -64800;

/// Wistia認証設定
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Wistia API トークン（https://<account>.wistia.com/account/api で発行）
    pub api_token: String,
}

/// ユーザー設定
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserConfig {
    /// 認証情報
    pub auth: Option<AuthConfig>,

    /// `list` でプロジェクトIDを省略した場合に使用するプロジェクト
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_project_id: Option<String>,

    /// タイムゾーンオフセット(秒単位)
    /// 例: UTC=0, JST(UTC+9)=32400, PST(UTC-8)=-28800
    #[serde(default = "default_timezone_offset")]
    pub timezone_offset_seconds: i32,
}

fn default_timezone_offset() -> i32 {
    DEFAULT_TIMEZONE_OFFSET
}

impl Default for UserConfig {
    fn default() -> Self {
        Self {
            auth: None,
            default_project_id: None,
            timezone_offset_seconds: DEFAULT_TIMEZONE_OFFSET,
        }
    }
}

impl UserConfig {
    /// ユーザー設定ファイルのパスを取得
    ///
    /// # Errors
    /// 設定ディレクトリが取得できない場合に ConfigError::DirectoryNotFound を返します。
    pub fn config_path() -> Result<PathBuf, ConfigError> {
        dirs::config_dir()
            .ok_or_else(|| ConfigError::directory_not_found("Failed to get user config directory"))
            .map(|config_dir| config_dir.join("wistia-cli").join("config.toml"))
    }

    /// ユーザー設定を既定の場所から読み込む
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&Self::config_path()?)
    }

    /// 指定したパスからユーザー設定を読み込む
    ///
    /// ファイルが存在しない場合はデフォルトテンプレートから作成します。
    /// 読み込み後、自動的に検証を実行します（Fail Fast）。
    pub fn load_from(config_path: &Path) -> Result<Self, ConfigError> {
        if !config_path.exists() {
            Self::create_default_config(config_path)?;
        }

        let content = fs::read_to_string(config_path).map_err(|e| {
            ConfigError::file_system(
                format!("Failed to read config file: {}", config_path.display()),
                e,
            )
        })?;

        let config: Self = toml::from_str(&content).map_err(|e| {
            ConfigError::parse_error(
                format!("Failed to parse config file ({})", config_path.display()),
                e,
            )
        })?;

        config.validate()?;

        Ok(config)
    }

    fn create_default_config(config_path: &Path) -> Result<(), ConfigError> {
        Self::ensure_parent_dir(config_path)?;

        fs::write(config_path, Self::default_toml_content()).map_err(|e| {
            ConfigError::file_system(
                format!("Failed to create default config file: {}", config_path.display()),
                e,
            )
        })
    }

    fn ensure_parent_dir(config_path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                ConfigError::file_system(
                    format!("Failed to create config directory: {}", parent.display()),
                    e,
                )
            })?;
        }
        Ok(())
    }

    fn default_toml_content() -> String {
        format!(
            r#"# Wistia CLI - User Configuration
# The API token is stored with 'wistia login'

# Project used by 'wistia list' when no project id is given
# default_project_id = "abc123"

# Timezone offset in seconds
# Examples: UTC=0, JST(UTC+9)=32400, PST(UTC-8)=-28800
timezone_offset_seconds = {}
"#,
            DEFAULT_TIMEZONE_OFFSET
        )
    }

    /// ユーザー設定を既定の場所へ保存する
    pub fn save(&self) -> Result<(), ConfigError> {
        self.save_to(&Self::config_path()?)
    }

    /// ユーザー設定を指定したパスへ保存する
    ///
    /// トークンを含むためファイルは所有者のみアクセス可能にします。
    pub fn save_to(&self, config_path: &Path) -> Result<(), ConfigError> {
        Self::ensure_parent_dir(config_path)?;

        let content = toml::to_string_pretty(self)
            .map_err(|e| ConfigError::serialize_error("Failed to serialize config", e))?;

        fs::write(config_path, content).map_err(|e| {
            ConfigError::file_system(
                format!("Failed to write config file: {}", config_path.display()),
                e,
            )
        })?;

        permissions::restrict_to_owner(config_path)
    }

    /// ユーザー設定を検証
    ///
    /// # Errors
    /// トークンが空白のみ、またはタイムゾーンオフセットが範囲外の場合に
    /// ConfigError::ValidationError を返します。
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(auth) = &self.auth
            && auth.api_token.trim().is_empty()
        {
            return Err(ConfigError::validation_error(
                "Authentication api_token cannot be empty. Please run 'wistia login' again.",
            ));
        }

        if let Some(project_id) = &self.default_project_id
            && project_id.trim().is_empty()
        {
            return Err(ConfigError::validation_error(
                "default_project_id cannot be empty. Remove the entry or set a project id.",
            ));
        }

        if !(MIN_TIMEZONE_OFFSET..=MAX_TIMEZONE_OFFSET).contains(&self.timezone_offset_seconds) {
            return Err(ConfigError::validation_error(format!(
                "Invalid timezone offset '{}' seconds. Must be between {} and {} (±18 hours)",
                self.timezone_offset_seconds, MIN_TIMEZONE_OFFSET, MAX_TIMEZONE_OFFSET
            )));
        }

        Ok(())
    }

    /// APIトークンを設定
    pub fn set_token(&mut self, api_token: String) {
        self.auth = Some(AuthConfig { api_token });
    }

    /// 保存済みのAPIトークンを取得
    ///
    /// # Errors
    /// トークンが設定されていない場合に ConfigError::TokenNotFound を返します。
    pub fn stored_token(&self) -> Result<&str, ConfigError> {
        self.auth
            .as_ref()
            .map(|auth| auth.api_token.as_str())
            .ok_or_else(|| {
                ConfigError::token_not_found(
                    "API token not found. Please run 'wistia login' first.",
                )
            })
    }

    /// 実際に使用するAPIトークンを取得
    ///
    /// 環境変数 `WISTIA_API_TOKEN` が空でなければ保存済みトークンより優先します。
    pub fn resolve_token(&self) -> Result<String, ConfigError> {
        match std::env::var(TOKEN_ENV_VAR) {
            Ok(token) if !token.trim().is_empty() => Ok(token.trim().to_string()),
            _ => self.stored_token().map(str::to_string),
        }
    }

    /// トークンが保存されているかチェック
    pub fn has_token(&self) -> bool {
        self.auth.is_some()
    }

    /// トークンを削除
    pub fn clear_token(&mut self) {
        self.auth = None;
    }
}
