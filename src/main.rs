use memoru::buffer::{DEFAULT_CAPACITY, FixedBuffer};
use memoru::logging::{LogLevel, Logger};
use memoru::{error, MemoruError, Result, Shell};
use std::io::{stdin, stdout};
use std::path::PathBuf;

fn main() -> Result<()> {
    error::setup_panic_handler();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let options = parse_options(&args)?;

    println!("memoru - Minimal command-driven text buffer editor");
    println!("Version: {}", env!("CARGO_PKG_VERSION"));
    println!();

    let logger = match &options.debug_log {
        Some(path) => Logger::for_development().with_file_output(path),
        None => Logger::new(LogLevel::Warning),
    };

    let stdin = stdin();
    let stdout = stdout();
    let mut shell = Shell::new(
        stdin.lock(),
        stdout.lock(),
        FixedBuffer::with_capacity(options.capacity),
        logger,
    );
    shell.run()
}

struct Options {
    capacity: usize,
    debug_log: Option<PathBuf>,
}

fn parse_options(args: &[String]) -> Result<Options> {
    let mut capacity = DEFAULT_CAPACITY;
    let mut debug_log: Option<PathBuf> = None;

    let mut iter = args.iter().peekable();
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--capacity" => {
                let value = iter
                    .next()
                    .ok_or_else(|| MemoruError::Config("--capacity requires a value".to_string()))?;
                capacity = value
                    .parse::<usize>()
                    .ok()
                    .filter(|n| *n > 0)
                    .ok_or_else(|| MemoruError::Config(format!("invalid capacity: {}", value)))?;
            }
            "--debug-log" => {
                let path = iter.peek().and_then(|next| {
                    if !next.starts_with('-') {
                        Some(PathBuf::from((*next).clone()))
                    } else {
                        None
                    }
                });
                if path.is_some() {
                    debug_log = path;
                    iter.next();
                } else {
                    debug_log = Some(PathBuf::from("debug.log"));
                }
            }
            _ => {}
        }
    }

    Ok(Options { capacity, debug_log })
}
