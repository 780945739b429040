//! External command execution.
//!
//! Registry and container tools are invoked directly (no shell), with their
//! stdout and stderr captured together so failures carry the tool's own
//! diagnostics.

use crate::error::{GcrError, Result};
use crate::shell::cancel::CancellationToken;
use std::io::{BufRead, BufReader, Read, Write};
use std::process::{Child, Command, ExitStatus, Stdio};
use std::sync::mpsc;
use std::thread;
use std::time::{Duration, Instant};

/// How often a running child is checked for exit or cancellation.
const POLL_INTERVAL: Duration = Duration::from_millis(25);

/// Result of executing a command.
#[derive(Debug, Clone)]
pub struct CommandResult {
    /// Exit code (None if killed by signal).
    pub exit_code: Option<i32>,

    /// Interleaved stdout and stderr, lossily decoded as UTF-8.
    pub output: String,

    /// Execution duration.
    pub duration: Duration,

    /// Whether command succeeded (exit code 0).
    pub success: bool,
}

/// Options for command execution.
#[derive(Debug, Clone, Default)]
pub struct CommandOptions {
    /// Data written to the child's stdin, which is then closed.
    pub stdin: Option<String>,

    /// Cancels the command by killing the child.
    pub cancel: Option<CancellationToken>,
}

/// Render a program and its arguments for logs and errors.
pub fn display_command(program: &str, args: &[&str]) -> String {
    std::iter::once(program)
        .chain(args.iter().copied())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Execute a program and wait for it.
///
/// A non-zero exit is reported in the returned [`CommandResult`], not as an
/// error.
///
/// # Errors
///
/// Returns `CommandFailed` if the program cannot be started and `Cancelled`
/// if the token fires before the program exits.
pub fn execute(program: &str, args: &[&str], options: &CommandOptions) -> Result<CommandResult> {
    let command_line = display_command(program, args);
    if options.cancel.as_ref().is_some_and(|c| c.is_cancelled()) {
        return Err(GcrError::Cancelled { step: command_line });
    }

    tracing::debug!("Running: {}", command_line);
    let start = Instant::now();

    let mut cmd = Command::new(program);
    cmd.args(args);
    cmd.stdin(if options.stdin.is_some() {
        Stdio::piped()
    } else {
        Stdio::null()
    });
    cmd.stdout(Stdio::piped());
    cmd.stderr(Stdio::piped());

    let mut child = cmd.spawn().map_err(|e| GcrError::CommandFailed {
        command: command_line.clone(),
        code: None,
        output: e.to_string(),
    })?;

    let writer = match (options.stdin.clone(), child.stdin.take()) {
        (Some(input), Some(mut stdin)) => {
            Some(thread::spawn(move || stdin.write_all(input.as_bytes())))
        }
        _ => None,
    };

    let (tx, rx) = mpsc::channel();
    let mut readers = Vec::new();
    if let Some(stdout) = child.stdout.take() {
        readers.push(spawn_reader(stdout, tx.clone()));
    }
    if let Some(stderr) = child.stderr.take() {
        readers.push(spawn_reader(stderr, tx.clone()));
    }
    drop(tx);

    let status = wait_with_cancel(&mut child, options.cancel.as_ref())?;

    if let Some(writer) = writer {
        match writer.join() {
            Ok(Err(e)) => tracing::debug!("Writing stdin of {} failed: {}", command_line, e),
            Err(_) => tracing::debug!("Stdin writer for {} panicked", command_line),
            Ok(Ok(())) => {}
        }
    }

    let Some(status) = status else {
        tracing::warn!("Cancelled: {}", command_line);
        return Err(GcrError::Cancelled { step: command_line });
    };

    for reader in readers {
        let _ = reader.join();
    }
    let output: String = rx.into_iter().collect();
    let duration = start.elapsed();

    Ok(CommandResult {
        exit_code: status.code(),
        output,
        duration,
        success: status.success(),
    })
}

/// Execute a program and turn a non-zero exit into `CommandFailed`.
pub fn execute_checked(
    program: &str,
    args: &[&str],
    options: &CommandOptions,
) -> Result<CommandResult> {
    let result = execute(program, args, options)?;
    if result.success {
        Ok(result)
    } else {
        Err(GcrError::CommandFailed {
            command: display_command(program, args),
            code: result.exit_code,
            output: result.output,
        })
    }
}

fn spawn_reader<R: Read + Send + 'static>(
    stream: R,
    tx: mpsc::Sender<String>,
) -> thread::JoinHandle<()> {
    thread::spawn(move || {
        // Lines are decoded lossily; the pipe is always drained to EOF.
        let mut reader = BufReader::new(stream);
        let mut line = Vec::new();
        loop {
            line.clear();
            match reader.read_until(b'\n', &mut line) {
                Ok(0) | Err(_) => break,
                Ok(_) => {
                    let mut text = String::from_utf8_lossy(&line).into_owned();
                    if !text.ends_with('\n') {
                        text.push('\n');
                    }
                    let _ = tx.send(text);
                }
            }
        }
    })
}

/// Wait for the child, killing it if the token fires.
///
/// Returns `None` when cancelled.
fn wait_with_cancel(
    child: &mut Child,
    cancel: Option<&CancellationToken>,
) -> Result<Option<ExitStatus>> {
    loop {
        if let Some(status) = child.try_wait()? {
            return Ok(Some(status));
        }

        if cancel.is_some_and(|c| c.is_cancelled()) {
            let _ = child.kill();
            let _ = child.wait();
            return Ok(None);
        }

        thread::sleep(POLL_INTERVAL);
    }
}
