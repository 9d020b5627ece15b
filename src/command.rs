//! コマンドシステム
//!
//! 編集コマンドの定義と実行。対応する操作は固定の6種類で、
//! 取り消しに対応するのは Append のみ（単一レベル）

use crate::buffer::FixedBuffer;
use crate::error::InputError;

/// コマンドの種類
///
/// 引数はトークン解決時に入力行の残りから取り込まれる
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// バッファ内容の表示
    Print,
    /// バッファ末尾への追記
    Append { text: String },
    /// バッファ先頭からの削除
    TruncateFront { arg: String },
    /// バッファの全消去
    Clear,
    /// 現在長の報告
    ReportLength,
    /// 何もしない（ヘルプ・終了・未知コマンド用）
    NoOp,
}

/// コマンド実行の結果
#[derive(Debug, Clone)]
pub struct CommandResult {
    /// 実行が成功したか
    pub success: bool,
    /// 応答行（`>>` 前置で出力チャネルへ書かれる）
    pub message: Option<String>,
}

impl CommandResult {
    /// 応答なしの成功結果を作成
    pub fn success() -> Self {
        Self {
            success: true,
            message: None,
        }
    }

    /// メッセージ付き成功結果を作成
    pub fn success_with_message(message: String) -> Self {
        Self {
            success: true,
            message: Some(message),
        }
    }

    /// 拒否結果を作成（状態は変更されない）
    pub fn rejected(message: String) -> Self {
        Self {
            success: false,
            message: Some(message),
        }
    }
}

/// コマンド実行器
///
/// 全コマンド変種の実行と取り消しを担い、直近の Append を
/// 逆転するための記憶を1段だけ保持する
#[derive(Debug, Clone, Default)]
pub struct CommandExecutor {
    /// 直近の Append で書き込んだバイト数（取り消し済みなら None）
    last_append: Option<usize>,
}

impl CommandExecutor {
    pub fn new() -> Self {
        Self::default()
    }

    /// 選択されたコマンドを実行する
    pub fn execute(&mut self, command: &Command, buffer: &mut FixedBuffer) -> CommandResult {
        match command {
            Command::Print => Self::execute_print(buffer),
            Command::Append { text } => self.execute_append(text, buffer),
            Command::TruncateFront { arg } => Self::execute_truncate_front(arg, buffer),
            Command::Clear => Self::execute_clear(buffer),
            Command::ReportLength => CommandResult::success_with_message(buffer.len().to_string()),
            Command::NoOp => CommandResult::success(),
        }
    }

    /// 直近に選択されたコマンドを取り消す
    ///
    /// Append 以外は逆転不能として何もしない。記憶は消費されるため、
    /// 追記を挟まず二度呼んでもそれ以上は巻き戻らない
    pub fn undo(&mut self, command: &Command, buffer: &mut FixedBuffer) -> CommandResult {
        match command {
            Command::Append { .. } => match self.last_append.take() {
                Some(written) => {
                    buffer.truncate_back(written);
                    CommandResult::success_with_message("[ Undid add. ]".to_string())
                }
                None => CommandResult::success(),
            },
            _ => CommandResult::success(),
        }
    }

    fn execute_print(buffer: &FixedBuffer) -> CommandResult {
        if buffer.is_empty() {
            CommandResult::success_with_message("[ Buffer is empty. ]".to_string())
        } else {
            CommandResult::success_with_message(buffer.to_display_string())
        }
    }

    fn execute_append(&mut self, text: &str, buffer: &mut FixedBuffer) -> CommandResult {
        if text.bytes().any(|b| b.is_ascii_control()) {
            log::warn!("Control characters in appended text are stored verbatim");
        }

        let written = buffer.append(text.as_bytes());
        self.last_append = Some(written);
        CommandResult::success_with_message("[ Added ]".to_string())
    }

    fn execute_truncate_front(arg: &str, buffer: &mut FixedBuffer) -> CommandResult {
        if buffer.is_empty() {
            return CommandResult::success_with_message("[ Buffer is already empty. ]".to_string());
        }

        let count = match parse_count(arg) {
            Ok(count) => count,
            Err(err) => return CommandResult::rejected(format!("[ {} ]", err)),
        };

        let removed = buffer.drop_front(count);
        CommandResult::success_with_message(format!("[ Removing {} characters. ]", removed))
    }

    fn execute_clear(buffer: &mut FixedBuffer) -> CommandResult {
        buffer.clear();
        CommandResult::success_with_message("[ Buffer emptied. ]".to_string())
    }
}

/// 削除数引数の解析
///
/// 非負の10進整数のみ受け付ける。負数・非数値は拒否する
fn parse_count(arg: &str) -> Result<usize, InputError> {
    let trimmed = arg.trim();
    trimmed
        .parse::<usize>()
        .map_err(|_| InputError::InvalidArgument {
            arg: trimmed.to_string(),
        })
}
