/// プレゼンテーション層モジュール
///
/// コマンド結果とUI表示の橋渡しを行います。
/// プレゼンテーション層はドメイン層に依存しますが、その逆はありません。
///
/// # モジュール
/// - `input`: トークン入力と確認プロンプト
/// - `output`: コマンド結果・エラーの出力（人間向け・機械向け）
/// - `progress`: ダウンロード進捗のDTO変換
pub mod input;
pub mod output;
pub mod progress;
