//! External hash providers
//!
//! Algorithms without an in-process compressor can still be served by
//! delegating the whole keyed-hash computation to an external tool. The
//! engine only sees the [`HmacProvider`] trait, so unit tests can inject
//! a fake instead of spawning processes.
//!
//! [`OpensslProvider`] is the stock implementation: it shells out to the
//! `openssl` binary, the same fallback the original toolchain used.

use std::ffi::OsString;
use std::io::Write;
use std::process::{Command, Stdio};
use std::time::{Duration, Instant};

use crate::error::ProviderError;
use crate::hash::Algorithm;

/// Computes a keyed hash out of process.
///
/// Implementations return the tag as a lowercase hex string of exactly
/// `2 * algorithm.digest_size()` characters.
pub trait HmacProvider {
    fn hmac(&self, message: &[u8], key: &[u8], algorithm: Algorithm) -> Result<String, ProviderError>;
}

/// Provider backed by the `openssl dgst` command.
///
/// The message is fed over stdin and the key passed as an argv element,
/// so nothing is interpolated through a shell. The child is polled
/// against a deadline and killed on expiry rather than waited on
/// indefinitely.
#[derive(Debug, Clone)]
pub struct OpensslProvider {
    command: String,
    timeout: Duration,
}

impl OpensslProvider {
    pub fn new() -> Self {
        Self {
            command: "openssl".into(),
            timeout: Duration::from_secs(5),
        }
    }

    /// Overrides the binary name (for tests and unusual installs).
    pub fn with_command(command: impl Into<String>) -> Self {
        Self {
            command: command.into(),
            ..Self::new()
        }
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    fn wait_with_deadline(
        &self,
        mut child: std::process::Child,
    ) -> Result<std::process::Output, ProviderError> {
        let deadline = Instant::now() + self.timeout;
        loop {
            match child.try_wait()? {
                Some(_) => return Ok(child.wait_with_output()?),
                None if Instant::now() >= deadline => {
                    log::warn!("provider {:?} exceeded {:?}, killing", self.command, self.timeout);
                    let _ = child.kill();
                    let _ = child.wait();
                    return Err(ProviderError::Timeout(self.timeout));
                }
                None => std::thread::sleep(Duration::from_millis(10)),
            }
        }
    }
}

impl Default for OpensslProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl HmacProvider for OpensslProvider {
    fn hmac(&self, message: &[u8], key: &[u8], algorithm: Algorithm) -> Result<String, ProviderError> {
        log::debug!(
            "delegating hmac-{} of {} message bytes to {:?}",
            algorithm,
            message.len(),
            self.command
        );

        let mut child = Command::new(&self.command)
            .arg("dgst")
            .arg(format!("-{}", algorithm.name()))
            .arg("-hmac")
            .arg(key_arg(key)?)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::null())
            .spawn()?;

        if let Some(mut stdin) = child.stdin.take() {
            if let Err(err) = stdin.write_all(message) {
                // a child that failed or exited early breaks the pipe;
                // reap it before reporting so no zombie lingers
                drop(stdin);
                let _ = child.kill();
                let _ = child.wait();
                return Err(err.into());
            }
        }

        let output = self.wait_with_deadline(child)?;
        if !output.status.success() {
            return Err(ProviderError::EmptyOutput(format!(
                "{:?} exited with {}",
                self.command, output.status
            )));
        }

        parse_dgst_output(&output.stdout, algorithm.digest_size())
    }
}

/// Prepares the key for `openssl dgst -hmac`, which takes it as an
/// argv element.
///
/// The bytes must reach the child exactly as supplied; a lossy UTF-8
/// conversion would make openssl authenticate a different key and
/// return a wrong tag as success. On Unix, argv carries arbitrary
/// bytes, so the key is passed through unchanged; elsewhere, keys that
/// are not valid UTF-8 are rejected instead of being mangled. Interior
/// NUL bytes cannot cross an argv boundary on any platform.
fn key_arg(key: &[u8]) -> Result<OsString, ProviderError> {
    if key.contains(&0) {
        return Err(ProviderError::UnsupportedKey(
            "key contains NUL bytes, which argv cannot carry".into(),
        ));
    }

    #[cfg(unix)]
    {
        use std::os::unix::ffi::OsStrExt;
        Ok(std::ffi::OsStr::from_bytes(key).to_os_string())
    }

    #[cfg(not(unix))]
    {
        match std::str::from_utf8(key) {
            Ok(s) => Ok(OsString::from(s)),
            Err(_) => Err(ProviderError::UnsupportedKey(
                "key is not valid UTF-8 and cannot be passed via argv on this platform".into(),
            )),
        }
    }
}

/// Extracts the hex tag from `openssl dgst` output.
///
/// The output looks like `HMAC-SHA2-512(stdin)= <hex>`; older builds
/// print just the hex. Either way the tag is the last whitespace-
/// separated token on the line.
fn parse_dgst_output(stdout: &[u8], digest_size: usize) -> Result<String, ProviderError> {
    let text = String::from_utf8_lossy(stdout);
    let tag = text
        .split_whitespace()
        .last()
        .unwrap_or("")
        .to_ascii_lowercase();

    if tag.is_empty() {
        return Err(ProviderError::EmptyOutput("empty stdout".into()));
    }

    let expected_len = digest_size * 2;
    if tag.len() != expected_len || !tag.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(ProviderError::MalformedOutput {
            output: tag,
            expected_len,
        });
    }

    Ok(tag)
}
