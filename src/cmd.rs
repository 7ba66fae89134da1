use anyhow::{Context, Result};
use std::ffi::OsStr;
use std::io::Read;
use std::process::{Command, Stdio};
use std::sync::mpsc;
use std::thread;
use std::time::{Duration, Instant};

/// How often a running child is polled while waiting for it to exit
const POLL_INTERVAL: Duration = Duration::from_millis(10);

/// Run a program and capture its stdout, killing it if it outlives `timeout`.
///
/// Stderr is discarded. A non-zero exit status is an error, as is expiry of
/// the deadline. The deadline also covers reading stdout to EOF, which a
/// backgrounded grandchild holding the pipe open can otherwise delay.
pub fn run_output_timeout<I, S>(program: &str, args: I, timeout: Duration) -> Result<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<OsStr>,
{
    let args: Vec<_> = args.into_iter().collect();
    let args_str: Vec<_> = args.iter().map(|s| s.as_ref().to_string_lossy()).collect();

    tracing::debug!("> {} {} (timeout {:?})", program, args_str.join(" "), timeout);

    let mut child = Command::new(program)
        .args(&args)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::null())
        .spawn()
        .with_context(|| format!("Failed to run {}", program))?;

    // Drain stdout on a separate thread so a chatty child cannot block on a full pipe
    let mut stdout = child
        .stdout
        .take()
        .with_context(|| format!("Failed to capture stdout of {}", program))?;
    let (tx, rx) = mpsc::channel();
    thread::spawn(move || {
        let mut buf = Vec::new();
        let result = stdout.read_to_end(&mut buf).map(|_| buf);
        let _ = tx.send(result);
    });

    let deadline = Instant::now() + timeout;
    let status = loop {
        if let Some(status) = child
            .try_wait()
            .with_context(|| format!("Failed to wait for {}", program))?
        {
            break status;
        }

        if Instant::now() >= deadline {
            let _ = child.kill();
            let _ = child.wait();
            anyhow::bail!("{} timed out after {:?}", program, timeout);
        }

        thread::sleep(POLL_INTERVAL);
    };

    if !status.success() {
        anyhow::bail!("{} failed with exit code {:?}", program, status.code());
    }

    let remaining = deadline.saturating_duration_since(Instant::now());
    let stdout = match rx.recv_timeout(remaining) {
        Ok(read) => read.with_context(|| format!("Failed to read output of {}", program))?,
        Err(mpsc::RecvTimeoutError::Timeout) => {
            anyhow::bail!("{} output still open after {:?}", program, timeout)
        }
        Err(mpsc::RecvTimeoutError::Disconnected) => {
            anyhow::bail!("Failed to read output of {}", program)
        }
    };

    Ok(String::from_utf8_lossy(&stdout).trim().to_string())
}
