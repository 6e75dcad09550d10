/// HTTPクライアント
///
/// Wistia Data API との通信を担当するクライアント。
/// 各操作は1回のHTTPリクエストに対応し、再試行やキャッシュは行いません。
/// レスポンスのデコード規則（空ボディなら None、それ以外はJSON）は
/// `dispatch` に一本化しています。
use crate::api::auth::BearerAuth;
use crate::api::error::RequestError;
use crate::api::types::{Asset, Caption, Media};
use crate::config::APP_CONFIG;
use futures::stream::{self, Stream, TryStreamExt};
use reqwest::header::AUTHORIZATION;
use reqwest::multipart::{Form, Part};
use reqwest::{Client, Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use std::time::Duration;
use tokio::io::{AsyncWrite, AsyncWriteExt};
use tracing::{debug, trace, warn};

/// APIクライアントの結果型
pub type ApiResult<T> = Result<T, RequestError>;

/// ダウンロード時に書き込む1チャンクのサイズ (1 MiB)
pub const DOWNLOAD_CHUNK_SIZE: usize = 1 << 20;

/// ダウンロード進捗のコールバック
///
/// 受信済みバイト数 / 宣言サイズ を受け取ります。
pub type ProgressCallback<'a> = &'a mut (dyn FnMut(f64) + Send);

/// Wistia Data API クライアント
///
/// 生成後は不変で、内部に可変状態を持たないため複数タスクから共有できます。
#[derive(Debug, Clone)]
pub struct WistiaClient {
    client: Client,
    base_url: String,
    auth: BearerAuth,
    timeout: Duration,
}

impl WistiaClient {
    /// 埋め込み設定のエンドポイントを使うクライアントを作成
    ///
    /// ネットワーク通信は行いません。
    pub fn new(token: impl Into<String>) -> ApiResult<Self> {
        Self::with_endpoint(APP_CONFIG.api.endpoint.as_str(), token)
    }

    /// 任意のベースURLを使うクライアントを作成
    ///
    /// # Arguments
    /// * `base_url` - APIのベースURL（例: "https://api.wistia.com/v1"）
    /// * `token` - APIトークン
    pub fn with_endpoint(base_url: impl Into<String>, token: impl Into<String>) -> ApiResult<Self> {
        let auth = BearerAuth::new(token)?;
        let timeout = Duration::from_secs(APP_CONFIG.api.timeout_seconds);

        // 全体タイムアウトはAPI呼び出しごとに設定する（ダウンロードには適用しない）
        let client = Client::builder()
            .connect_timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| RequestError::network("Failed to create HTTP client", e))?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            auth,
            timeout,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// マスキング済みのトークン（表示用）
    pub fn masked_token(&self) -> String {
        self.auth.masked_token()
    }

    /// プロジェクトのメディアを新しい順に1ページ分取得
    ///
    /// # Arguments
    /// * `project_id` - プロジェクトのハッシュID
    /// * `page` - 1始まりのページ番号
    /// * `per_page` - 1ページあたりの件数
    pub async fn list_media_page(
        &self,
        project_id: &str,
        page: u32,
        per_page: u32,
    ) -> ApiResult<Vec<Media>> {
        if page == 0 {
            return Err(RequestError::invalid_argument("page must be a positive integer"));
        }
        if per_page == 0 {
            return Err(RequestError::invalid_argument(
                "per_page must be a positive integer",
            ));
        }

        let query = [
            ("project_id", project_id.to_string()),
            ("page", page.to_string()),
            ("per_page", per_page.to_string()),
            ("sort_by", "created".to_string()),
            // 0 = 降順
            ("sort_direction", "0".to_string()),
        ];
        let request = self.request(Method::GET, "medias.json").query(&query);

        let medias: Option<Vec<Media>> = self.dispatch(request, "GET", "medias.json").await?;
        Ok(medias.unwrap_or_default())
    }

    /// プロジェクトの全メディアを新しい順に遅延取得するストリーム
    ///
    /// ページ1から順に要求し、`per_page` 件未満のページが返った時点で終了します。
    /// 途中のエラーはストリームの要素として返り、その後は何も返しません。
    /// 呼び出すたびにページ1からやり直す新しいストリームになります。
    pub fn list_all_media<'a>(
        &'a self,
        project_id: &'a str,
        per_page: u32,
    ) -> impl Stream<Item = ApiResult<Media>> + Send + 'a {
        stream::try_unfold(Some(1u32), move |next_page| async move {
            let Some(page) = next_page else {
                return Ok::<_, RequestError>(None);
            };

            let medias = self.list_media_page(project_id, page, per_page).await?;
            let following = if medias.len() < per_page as usize {
                debug!(page, count = medias.len(), "short page, pagination finished");
                None
            } else {
                Some(page + 1)
            };

            let items = stream::iter(medias.into_iter().map(Ok::<Media, RequestError>));
            Ok::<_, RequestError>(Some((items, following)))
        })
        .try_flatten()
    }

    /// トークンに紐づくアカウント情報を取得
    ///
    /// トークンの有効性確認に使用します。
    pub async fn show_account(&self) -> ApiResult<Option<serde_json::Value>> {
        let request = self.request(Method::GET, "account.json");
        self.dispatch(request, "GET", "account.json").await
    }

    /// メディアの詳細（アセット一覧を含む）を取得
    pub async fn show_media(&self, media_hashed_id: &str) -> ApiResult<Option<Media>> {
        require_segment("media hashed id", media_hashed_id)?;
        let path = format!("medias/{}.json", media_hashed_id);
        let request = self.request(Method::GET, &path);
        self.dispatch(request, "GET", &path).await
    }

    /// メディアを削除
    pub async fn delete_media(&self, media_hashed_id: &str) -> ApiResult<Option<Media>> {
        require_segment("media hashed id", media_hashed_id)?;
        let path = format!("medias/{}.json", media_hashed_id);
        let request = self.request(Method::DELETE, &path);
        self.dispatch(request, "DELETE", &path).await
    }

    /// アセットを `sink` へストリーミングでダウンロード
    ///
    /// 本文は1 MiB単位で順に書き込み、各チャンクの書き込み後に `progress` へ
    /// 受信済みバイト数 / `asset.file_size` を渡します。宣言サイズが0の場合は呼びません。
    /// 本文の受信が途中で失敗した場合、受信済みの分をすべて `sink` に書き込んでから
    /// エラーを返します。
    ///
    /// アセットURLは外部の配信URLのため、認証ヘッダーは付与しません。
    ///
    /// # エラー
    /// `url` または `fileSize` がないアセットは `InvalidArgument` になります。
    pub async fn download_asset<W>(
        &self,
        asset: &Asset,
        sink: &mut W,
        mut progress: Option<ProgressCallback<'_>>,
    ) -> ApiResult<()>
    where
        W: AsyncWrite + Unpin + ?Sized,
    {
        let (Some(url), Some(declared_size)) = (asset.url.as_deref(), asset.file_size) else {
            return Err(RequestError::invalid_argument(
                "asset must have both a url and a fileSize",
            ));
        };
        debug!(size = declared_size, "starting asset download");

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| RequestError::from_send("GET asset", e))?;
        let mut response = Self::check_response(response, "asset").await?;

        let mut buffer: Vec<u8> = Vec::with_capacity(DOWNLOAD_CHUNK_SIZE);
        let mut received: u64 = 0;

        loop {
            let bytes = match response.chunk().await {
                Ok(Some(bytes)) => bytes,
                Ok(None) => break,
                Err(e) => {
                    warn!(received, declared = declared_size, "asset body interrupted");
                    if !buffer.is_empty() {
                        write_chunk(sink, &mut buffer, &mut received, declared_size, &mut progress)
                            .await?;
                    }
                    sink.flush().await?;
                    return Err(RequestError::from_send("GET asset (body)", e));
                }
            };

            let mut rest: &[u8] = &bytes;
            while !rest.is_empty() {
                let take = (DOWNLOAD_CHUNK_SIZE - buffer.len()).min(rest.len());
                buffer.extend_from_slice(&rest[..take]);
                rest = &rest[take..];

                if buffer.len() == DOWNLOAD_CHUNK_SIZE {
                    write_chunk(sink, &mut buffer, &mut received, declared_size, &mut progress)
                        .await?;
                }
            }
        }

        if !buffer.is_empty() {
            write_chunk(sink, &mut buffer, &mut received, declared_size, &mut progress).await?;
        }
        sink.flush().await?;

        debug!(received, declared = declared_size, "asset download finished");
        Ok(())
    }

    /// 字幕をアップロード
    ///
    /// `language` をフォームフィールド、`content` を `caption_file` ファイルパートとして送信します。
    pub async fn upload_caption(
        &self,
        media_hashed_id: &str,
        language_code: &str,
        content: impl Into<String>,
    ) -> ApiResult<Option<serde_json::Value>> {
        require_segment("media hashed id", media_hashed_id)?;
        require_segment("language code", language_code)?;

        let path = format!("medias/{}/captions.json", media_hashed_id);
        let form = Form::new()
            .text("language", language_code.to_string())
            .part(
                "caption_file",
                Part::text(content.into()).file_name("caption_file"),
            );
        let request = self.request(Method::POST, &path).multipart(form);
        self.dispatch(request, "POST", &path).await
    }

    /// メディアの字幕一覧を取得
    pub async fn list_captions(&self, media_hashed_id: &str) -> ApiResult<Vec<Caption>> {
        require_segment("media hashed id", media_hashed_id)?;
        let path = format!("medias/{}/captions.json", media_hashed_id);
        let request = self.request(Method::GET, &path);
        let captions: Option<Vec<Caption>> = self.dispatch(request, "GET", &path).await?;
        Ok(captions.unwrap_or_default())
    }

    /// 指定言語の字幕を削除
    pub async fn delete_caption(
        &self,
        media_hashed_id: &str,
        language_code: &str,
    ) -> ApiResult<Option<serde_json::Value>> {
        require_segment("media hashed id", media_hashed_id)?;
        require_segment("language code", language_code)?;
        let path = format!("medias/{}/captions/{}.json", media_hashed_id, language_code);
        let request = self.request(Method::DELETE, &path);
        self.dispatch(request, "DELETE", &path).await
    }

    /// 認証ヘッダーとタイムアウトを付与したリクエストを構築
    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        self.client
            .request(method, format!("{}/{}", self.base_url, path))
            .header(AUTHORIZATION, self.auth.header_value())
            .timeout(self.timeout)
    }

    /// リクエストを送信し、レスポンスをデコードする
    ///
    /// 2xx 以外は RequestError::Api、空ボディは None、それ以外はJSONとしてパースします。
    async fn dispatch<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
        method: &str,
        path: &str,
    ) -> ApiResult<Option<T>> {
        let operation = format!("{} {}", method, path);
        debug!(%operation, "sending request");

        let response = request
            .send()
            .await
            .map_err(|e| RequestError::from_send(&operation, e))?;
        let response = Self::check_response(response, path).await?;

        let body = response
            .bytes()
            .await
            .map_err(|e| RequestError::from_send(&operation, e))?;
        if body.is_empty() {
            return Ok(None);
        }

        serde_json::from_slice(&body)
            .map(Some)
            .map_err(|source| RequestError::Decode {
                endpoint: path.to_string(),
                source,
            })
    }

    /// レスポンスをチェックしてエラーを返す
    async fn check_response(response: Response, endpoint: &str) -> ApiResult<Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let error_body = response
            .text()
            .await
            .unwrap_or_else(|_| "Unable to read error response".to_string());
        warn!(endpoint, status = status.as_u16(), "request failed");

        Err(RequestError::api(endpoint, status.as_u16(), error_body))
    }
}

/// 1チャンクを書き込み、進捗を通知する
async fn write_chunk<W>(
    sink: &mut W,
    buffer: &mut Vec<u8>,
    received: &mut u64,
    declared_size: u64,
    progress: &mut Option<ProgressCallback<'_>>,
) -> ApiResult<()>
where
    W: AsyncWrite + Unpin + ?Sized,
{
    sink.write_all(buffer).await?;
    *received += buffer.len() as u64;
    trace!(chunk = buffer.len(), received = *received, "chunk written");
    buffer.clear();

    if declared_size > 0
        && let Some(callback) = progress.as_mut()
    {
        callback(*received as f64 / declared_size as f64);
    }
    Ok(())
}

/// URLパスに埋め込む識別子を検証
fn require_segment(name: &str, value: &str) -> ApiResult<()> {
    if value.trim().is_empty() {
        return Err(RequestError::invalid_argument(format!("{} cannot be empty", name)));
    }
    if value.contains(['/', '?', '#']) {
        return Err(RequestError::invalid_argument(format!(
            "{} contains invalid characters: {}",
            name, value
        )));
    }
    Ok(())
}
