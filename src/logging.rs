//! ロギングシステム
//!
//! 開発者向けの詳細ログ出力を提供する。通常実行では警告以上のみ、
//! `--debug-log` 指定時はデバッグレベルをファイルへも書き出す

use std::fs::OpenOptions;
use std::io::Write;
use std::path::PathBuf;

/// ログレベル
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogLevel {
    Debug,
    Info,
    Warning,
    Error,
}

impl LogLevel {
    fn tag(self) -> &'static str {
        match self {
            LogLevel::Debug => "DEBUG",
            LogLevel::Info => "INFO",
            LogLevel::Warning => "WARNING",
            LogLevel::Error => "ERROR",
        }
    }
}

/// ロガー
///
/// 対話プロンプトと混ざらないよう、出力先は標準エラーとファイルのみ
#[derive(Debug, Clone)]
pub struct Logger {
    level: LogLevel,
    output_stderr: bool,
    output_file: Option<PathBuf>,
}

impl Logger {
    /// デフォルト構築
    pub fn new(level: LogLevel) -> Self {
        Self {
            level,
            output_stderr: true,
            output_file: None,
        }
    }

    /// 開発者向けロガー（デバッグレベル）
    pub fn for_development() -> Self {
        Self::new(LogLevel::Debug)
    }

    /// ログレベルを取得
    pub fn level(&self) -> LogLevel {
        self.level
    }

    /// ログレベルを変更
    pub fn with_level(mut self, level: LogLevel) -> Self {
        self.level = level;
        self
    }

    /// ファイル出力を設定
    pub fn with_file_output<P: Into<PathBuf>>(mut self, path: P) -> Self {
        self.output_file = Some(path.into());
        self
    }

    /// 標準エラー出力を無効化（テスト向け）
    pub fn without_stderr(mut self) -> Self {
        self.output_stderr = false;
        self
    }

    fn should_log(&self, level: LogLevel) -> bool {
        level >= self.level
    }

    fn write_line(&self, message: &str) {
        if self.output_stderr {
            eprintln!("{}", message);
        }

        if let Some(path) = &self.output_file {
            if let Ok(mut file) = OpenOptions::new().create(true).append(true).open(path) {
                let _ = writeln!(file, "{}", message);
            }
        }
    }

    /// 任意のログレベルでメッセージを出力
    pub fn log(&self, level: LogLevel, message: impl AsRef<str>) {
        if self.should_log(level) {
            self.write_line(&format!("{}: {}", level.tag(), message.as_ref()));
        }
    }

    /// コンテキスト付きでログを出力
    pub fn log_with_context(
        &self,
        level: LogLevel,
        context: Option<&str>,
        message: impl AsRef<str>,
    ) {
        let context_info = context.unwrap_or("unknown");
        self.log(level, format!("{} in {}", message.as_ref(), context_info));
    }

    /// デバッグログ
    pub fn log_debug(&self, message: impl AsRef<str>, context: Option<&str>) {
        self.log_with_context(LogLevel::Debug, context, message);
    }

    /// 情報ログ
    pub fn log_info(&self, message: impl AsRef<str>, context: Option<&str>) {
        self.log_with_context(LogLevel::Info, context, message);
    }

    /// 警告ログ
    pub fn log_warning(&self, message: impl AsRef<str>, context: Option<&str>) {
        self.log_with_context(LogLevel::Warning, context, message);
    }
}

impl Default for Logger {
    fn default() -> Self {
        Self::new(LogLevel::Warning)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn logger_respects_log_level() {
        let logger = Logger::for_development().without_stderr();
        assert!(logger.should_log(LogLevel::Debug));
        assert!(logger.should_log(LogLevel::Error));

        let warn_logger = Logger::for_development()
            .with_level(LogLevel::Warning)
            .without_stderr();
        assert!(!warn_logger.should_log(LogLevel::Debug));
        assert!(!warn_logger.should_log(LogLevel::Info));
        assert!(warn_logger.should_log(LogLevel::Error));
    }

    #[test]
    fn logger_appends_to_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("debug.log");

        let logger = Logger::for_development()
            .without_stderr()
            .with_file_output(&path);
        logger.log_info("first entry", Some("test"));
        logger.log_warning("second entry", None);

        let contents = std::fs::read_to_string(&path).unwrap();
        assert!(contents.contains("INFO: first entry in test"));
        assert!(contents.contains("WARNING: second entry in unknown"));
    }

    #[test]
    fn level_filter_suppresses_file_output() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("debug.log");

        let logger = Logger::new(LogLevel::Error)
            .without_stderr()
            .with_file_output(&path);
        logger.log_debug("hidden", None);

        assert!(!path.exists());
    }
}
