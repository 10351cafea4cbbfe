//! Article text extraction through an external readability tool.

use async_trait::async_trait;
use std::process::{ExitStatus, Stdio};
use thiserror::Error;
use tokio::process::Command;
use tracing::debug;

#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("failed to run extractor '{program}': {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("extractor failed ({status}): {stderr}")]
    Failed { status: ExitStatus, stderr: String },

    #[error("extractor returned no text")]
    Empty,
}

/// Turns an article URL into its plain text.
#[async_trait]
pub trait Extractor: Send + Sync {
    async fn extract(&self, url: &str) -> Result<String, ExtractError>;
}

/// Runs an external program with the URL as its last argument and reads the
/// article text from its stdout.
///
/// The child is killed if the extraction future is dropped.
#[derive(Debug, Clone)]
pub struct CommandExtractor {
    program: String,
    args: Vec<String>,
}

impl CommandExtractor {
    pub fn new(program: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            args,
        }
    }

    /// Builds an extractor from a full command line such as
    /// `["node", "readability/index.js"]`. Returns `None` for an empty one.
    pub fn from_argv(argv: &[String]) -> Option<Self> {
        let (program, args) = argv.split_first()?;
        Some(Self::new(program.clone(), args.to_vec()))
    }
}

#[async_trait]
impl Extractor for CommandExtractor {
    async fn extract(&self, url: &str) -> Result<String, ExtractError> {
        debug!(program = %self.program, url, "running extractor");

        let output = Command::new(&self.program)
            .args(&self.args)
            .arg(url)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .output()
            .await
            .map_err(|source| ExtractError::Spawn {
                program: self.program.clone(),
                source,
            })?;

        if !output.status.success() {
            return Err(ExtractError::Failed {
                status: output.status,
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        let text = String::from_utf8_lossy(&output.stdout).into_owned();
        if text.trim().is_empty() {
            return Err(ExtractError::Empty);
        }

        Ok(text)
    }
}

#[cfg(all(test, unix))]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn shell(script: &str) -> CommandExtractor {
        // `sh -c script sh URL` exposes the URL as $1
        CommandExtractor::new(
            "sh",
            vec!["-c".to_string(), script.to_string(), "sh".to_string()],
        )
    }

    #[test]
    fn test_from_argv() {
        let argv = vec!["node".to_string(), "readability/index.js".to_string()];
        let extractor = CommandExtractor::from_argv(&argv).unwrap();
        assert_eq!(extractor.program, "node");
        assert_eq!(extractor.args, vec!["readability/index.js".to_string()]);

        assert!(CommandExtractor::from_argv(&[]).is_none());
    }

    #[tokio::test]
    async fn test_extract_passes_url_and_reads_stdout() {
        let extractor = shell("printf 'Titel\\n\\nText von %s' \"$1\"");
        let text = extractor.extract("https://example.de/a").await.unwrap();
        assert_eq!(text, "Titel\n\nText von https://example.de/a");
    }

    #[tokio::test]
    async fn test_extract_non_zero_exit() {
        let extractor = shell("echo 'cannot parse' >&2; exit 3");
        let err = extractor.extract("https://example.de").await.unwrap_err();
        match err {
            ExtractError::Failed { status, stderr } => {
                assert_eq!(status.code(), Some(3));
                assert_eq!(stderr, "cannot parse");
            }
            other => panic!("expected Failed, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_extract_empty_output() {
        let extractor = shell("printf '  \\n'");
        let err = extractor.extract("https://example.de").await.unwrap_err();
        assert!(matches!(err, ExtractError::Empty));
    }

    #[tokio::test]
    async fn test_extract_missing_program() {
        let extractor = CommandExtractor::new("langtutor-no-such-extractor", vec![]);
        let err = extractor.extract("https://example.de").await.unwrap_err();
        assert!(matches!(err, ExtractError::Spawn { .. }));
    }
}
