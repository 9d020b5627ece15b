//! 対話シェル実装
//!
//! 入力チャネルから1文字トークンを読み取り、コマンド変種へ振り分ける
//! ディスパッチャ。チャネルは `BufRead` / `Write` として抽象化されており、
//! 標準入出力でもメモリ上のテストチャネルでも同じループが動く

use std::io::{BufRead, Write};

use crate::buffer::FixedBuffer;
use crate::command::{Command, CommandExecutor, CommandResult};
use crate::error::{InputError, Result};
use crate::logging::Logger;

const PROMPT: &str = "Enter command ('?' for help): ";

const HELP_TEXT: &str = "\n\tp - Print buffer\
\n\ta <str> - Append string to buffer\
\n\tr <n> - Remove 'n' chars from start of buffer\
\n\te - Empty buffer\
\n\tl - Return length of buffer\
\n\tu - Undo last command\
\n\tq - Quit\n";

/// シェルの実行状態
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShellState {
    Running,
    Terminated,
}

/// トークン解決の結果
enum Dispatch {
    /// 新しいコマンドを選択して実行する
    Select(Command),
    /// 直前に選択したコマンドの取り消しを要求する
    Undo,
    /// コマンド一覧を表示する
    Help,
    /// ループを終了する
    Quit,
}

/// 対話シェル構造体
///
/// バッファと実行器を所有し、終了トークンか入力の尽きるまで
/// 読み取り・振り分け・応答のサイクルを繰り返す
pub struct Shell<R, W> {
    reader: R,
    writer: W,
    buffer: FixedBuffer,
    executor: CommandExecutor,
    /// 直近に選択されたコマンド（取り消しの対象）
    selected: Command,
    state: ShellState,
    logger: Logger,
}

impl<R: BufRead, W: Write> Shell<R, W> {
    /// 新しいシェルを作成
    pub fn new(reader: R, writer: W, buffer: FixedBuffer, logger: Logger) -> Self {
        Self {
            reader,
            writer,
            buffer,
            executor: CommandExecutor::new(),
            selected: Command::NoOp,
            state: ShellState::Running,
            logger,
        }
    }

    /// 現在の実行状態
    pub fn state(&self) -> ShellState {
        self.state
    }

    /// 共有バッファへの参照
    pub fn buffer(&self) -> &FixedBuffer {
        &self.buffer
    }

    /// メインループ
    ///
    /// 終了トークンまたは入力チャネルの尽きるまで1行ずつ処理する。
    /// 入力の尽きる場合も正常終了として扱う
    pub fn run(&mut self) -> Result<()> {
        while self.state == ShellState::Running {
            write!(self.writer, "{}", PROMPT)?;
            self.writer.flush()?;

            match self.read_line()? {
                Some(line) => self.dispatch_line(&line)?,
                None => {
                    self.logger.log_info("input channel exhausted", Some("shell"));
                    self.state = ShellState::Terminated;
                }
            }
        }
        Ok(())
    }

    fn read_line(&mut self) -> Result<Option<String>> {
        let mut line = String::new();
        let read = self.reader.read_line(&mut line)?;
        if read == 0 {
            Ok(None)
        } else {
            Ok(Some(line))
        }
    }

    /// 1行分の入力を処理する
    ///
    /// 行の残りはトークン解決時に引数として取り込まれるため、
    /// 次のサイクルは常に新しいトークンから始まる
    fn dispatch_line(&mut self, raw: &str) -> Result<()> {
        let line = trim_line_terminator(raw);

        let mut undo_requested = false;
        match self.resolve(line) {
            Ok(Dispatch::Select(command)) => {
                self.selected = command;
            }
            Ok(Dispatch::Undo) => {
                undo_requested = true;
            }
            Ok(Dispatch::Help) => {
                self.write_response(HELP_TEXT)?;
                self.selected = Command::NoOp;
            }
            Ok(Dispatch::Quit) => {
                self.logger.log_info("quit requested", Some("shell"));
                self.state = ShellState::Terminated;
                self.selected = Command::NoOp;
            }
            Err(err) => {
                self.logger.log_warning(err.to_string(), Some("shell"));
                self.write_response("[ Unknown command, please try again ]")?;
                self.selected = Command::NoOp;
            }
        }

        let result = if undo_requested {
            self.logger
                .log_debug(format!("undo on {}", variant_name(&self.selected)), Some("shell"));
            self.executor.undo(&self.selected, &mut self.buffer)
        } else {
            self.logger
                .log_debug(format!("execute {}", variant_name(&self.selected)), Some("shell"));
            self.executor.execute(&self.selected, &mut self.buffer)
        };

        self.write_result(&result)
    }

    /// トークンをディスパッチ先へ解決する
    fn resolve(&self, line: &str) -> std::result::Result<Dispatch, InputError> {
        let mut chars = line.chars();
        let Some(token) = chars.next() else {
            // 空行は何もしない
            return Ok(Dispatch::Select(Command::NoOp));
        };
        let argument = strip_separator(chars.as_str());

        match token {
            'p' => Ok(Dispatch::Select(Command::Print)),
            'a' => Ok(Dispatch::Select(Command::Append {
                text: argument.to_string(),
            })),
            'r' => Ok(Dispatch::Select(Command::TruncateFront {
                arg: argument.to_string(),
            })),
            'e' => Ok(Dispatch::Select(Command::Clear)),
            'l' => Ok(Dispatch::Select(Command::ReportLength)),
            'u' => Ok(Dispatch::Undo),
            'q' => Ok(Dispatch::Quit),
            '?' => Ok(Dispatch::Help),
            other => Err(InputError::CommandNotFound {
                command: other.to_string(),
            }),
        }
    }

    fn write_result(&mut self, result: &CommandResult) -> Result<()> {
        if let Some(message) = &result.message {
            self.write_response(message)?;
        }
        Ok(())
    }

    fn write_response(&mut self, message: &str) -> Result<()> {
        writeln!(self.writer, ">>{}", message)?;
        Ok(())
    }
}

/// 行末の改行（LF / CRLF）を取り除く
fn trim_line_terminator(raw: &str) -> &str {
    let line = raw.strip_suffix('\n').unwrap_or(raw);
    line.strip_suffix('\r').unwrap_or(line)
}

/// トークン直後の区切り文字を1文字だけ読み飛ばす
fn strip_separator(rest: &str) -> &str {
    let mut chars = rest.chars();
    chars.next();
    chars.as_str()
}

fn variant_name(command: &Command) -> &'static str {
    match command {
        Command::Print => "print",
        Command::Append { .. } => "append",
        Command::TruncateFront { .. } => "truncate-front",
        Command::Clear => "clear",
        Command::ReportLength => "report-length",
        Command::NoOp => "no-op",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logging::LogLevel;

    fn quiet_logger() -> Logger {
        Logger::new(LogLevel::Error).without_stderr()
    }

    fn run_script(script: &str, capacity: usize) -> (String, Vec<u8>, ShellState) {
        let mut output = Vec::new();
        let mut shell = Shell::new(
            script.as_bytes(),
            &mut output,
            FixedBuffer::with_capacity(capacity),
            quiet_logger(),
        );
        shell.run().expect("shell loop failed");
        let content = shell.buffer().as_bytes().to_vec();
        let state = shell.state();
        drop(shell);
        (String::from_utf8(output).unwrap(), content, state)
    }

    /// 応答行（`>>` 前置）だけを取り出す
    fn response_lines(output: &str) -> Vec<&str> {
        output
            .lines()
            .filter_map(|line| {
                let line = line.rsplit(PROMPT).next().unwrap_or(line);
                line.strip_prefix(">>")
            })
            .collect()
    }

    #[test]
    fn quit_token_terminates_loop() {
        let (_, content, state) = run_script("q\n", 16);
        assert_eq!(state, ShellState::Terminated);
        assert!(content.is_empty());
    }

    #[test]
    fn end_of_input_terminates_gracefully() {
        let (_, _, state) = run_script("a hello\n", 16);
        assert_eq!(state, ShellState::Terminated);
    }

    #[test]
    fn append_then_print_round_trip() {
        let (output, content, _) = run_script("a hello\np\nq\n", 16);
        assert_eq!(content, b"hello");
        let responses = response_lines(&output);
        assert_eq!(responses, vec!["[ Added ]", "hello"]);
    }

    #[test]
    fn unknown_token_recovers_and_loop_continues() {
        let (output, content, _) = run_script("z\nl\nq\n", 16);
        assert!(content.is_empty());
        let responses = response_lines(&output);
        assert_eq!(
            responses,
            vec!["[ Unknown command, please try again ]", "0"]
        );
    }

    #[test]
    fn undo_applies_to_previously_selected_command() {
        // 'u' は新しいコマンドを選択しないため、直前の Append が巻き戻る
        let (_, content, _) = run_script("a hello\nu\np\nq\n", 16);
        assert!(content.is_empty());
    }

    #[test]
    fn undo_after_print_does_not_touch_append_memory() {
        // 直近の選択が Print になるため取り消しは何も起こさない
        let (_, content, _) = run_script("a hello\np\nu\nq\n", 16);
        assert_eq!(content, b"hello");
    }

    #[test]
    fn undo_with_no_prior_action_is_harmless() {
        let (output, content, state) = run_script("u\nq\n", 16);
        assert!(content.is_empty());
        assert_eq!(state, ShellState::Terminated);
        assert!(response_lines(&output).is_empty());
    }

    #[test]
    fn blank_line_is_a_no_op() {
        let (output, content, _) = run_script("\n\nl\nq\n", 16);
        assert!(content.is_empty());
        assert_eq!(response_lines(&output), vec!["0"]);
    }

    #[test]
    fn help_lists_command_vocabulary() {
        let (output, _, _) = run_script("?\nq\n", 16);
        assert!(output.contains("p - Print buffer"));
        assert!(output.contains("a <str> - Append string to buffer"));
        assert!(output.contains("r <n> - Remove 'n' chars from start of buffer"));
        assert!(output.contains("u - Undo last command"));
        assert!(output.contains("q - Quit"));
    }

    #[test]
    fn prompt_is_written_each_cycle() {
        let (output, _, _) = run_script("l\nq\n", 16);
        assert_eq!(output.matches(PROMPT).count(), 2);
    }

    #[test]
    fn token_without_separator_consumes_first_argument_char() {
        // 区切り文字は内容を問わず1文字だけ読み飛ばされる
        let (_, content, _) = run_script("ahello\nq\n", 16);
        assert_eq!(content, b"ello");
    }

    #[test]
    fn crlf_input_is_accepted() {
        let (_, content, _) = run_script("a hi\r\np\r\nq\r\n", 16);
        assert_eq!(content, b"hi");
    }
}
