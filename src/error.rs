// ============================================
// src/error.rs
// クイズ全体のエラー型
// ============================================

use thiserror::Error;

/// クイズで発生しうるエラー
///
/// `UnknownCountry` は首都テーブルにない国を引いたとき（正しく
/// 出題している限り起こらないはず）、`InsufficientCountries` は
/// 出題数に対して国が足りないとき（起動時に検出する設定ミス）。
#[derive(Debug, Error)]
pub enum QuizError {
    /// テーブルに存在しない国名
    #[error("unknown country: {0}")]
    UnknownCountry(String),

    /// ラウンドの問題数 > テーブルの国数
    #[error("not enough countries: requested {requested}, table has {available}")]
    InsufficientCountries { requested: usize, available: usize },

    /// 端末まわりの入出力エラー（描画側から `?` で上がってくる）
    #[error("terminal I/O error: {0}")]
    Io(#[from] std::io::Error),
}
