//! エラーハンドリングシステム
//!
//! memoru 全体で使用される統一されたエラー型とユーティリティを定義
//! 回復可能な入力エラーは通知のみ、チャネル故障だけが `run` から伝播する

use thiserror::Error;

/// アプリケーション全体のエラー型
#[derive(Error, Debug, Clone)]
pub enum MemoruError {
    /// 入力処理エラー
    #[error("Input processing failed")]
    Input(#[from] InputError),

    /// 入出力チャネルエラー
    #[error("IO error: {message}")]
    Io { message: String },

    /// 設定エラー
    #[error("Configuration error: {0}")]
    Config(String),
}

/// 入力処理固有のエラー
#[derive(Error, Debug, Clone)]
pub enum InputError {
    #[error("Command not found: {command}")]
    CommandNotFound { command: String },

    #[error("Invalid argument: {arg}")]
    InvalidArgument { arg: String },
}

impl From<std::io::Error> for MemoruError {
    fn from(err: std::io::Error) -> Self {
        MemoruError::Io {
            message: err.to_string(),
        }
    }
}

/// アプリケーション全体で使用する標準Result型
pub type Result<T> = std::result::Result<T, MemoruError>;

/// パニックハンドラの設定
///
/// 致命的エラーは詳細を表示して即座に終了する
pub fn setup_panic_handler() {
    std::panic::set_hook(Box::new(|panic_info| {
        let location = panic_info
            .location()
            .unwrap_or_else(|| std::panic::Location::caller());

        let message = if let Some(s) = panic_info.payload().downcast_ref::<&str>() {
            s
        } else if let Some(s) = panic_info.payload().downcast_ref::<String>() {
            s
        } else {
            "Unknown panic payload"
        };

        eprintln!("PANIC at {}:{}: {}", location.file(), location.line(), message);
        eprintln!("Stack trace: {}", std::backtrace::Backtrace::capture());

        std::process::exit(1);
    }));
}
