use std::path::{Path, PathBuf};
use std::process::{Output, Stdio};
use std::str::FromStr;
use std::time::Duration;

use serde::Serialize;
use tokio::process::Command;
use uuid::Uuid;

use crate::config::ExecutionConfig;
use crate::error::{AppError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Language {
    Cpp,
    Python,
    JavaScript,
}

impl FromStr for Language {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "cpp" => Ok(Language::Cpp),
            "python" => Ok(Language::Python),
            "javascript" => Ok(Language::JavaScript),
            _ => Err(AppError::validation("Unsupported language")),
        }
    }
}

impl Language {
    pub fn extension(&self) -> &'static str {
        match self {
            Language::Cpp => "cpp",
            Language::Python => "py",
            Language::JavaScript => "js",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RunOutput {
    pub output: String,
}

/// Runs submitted snippets with the host toolchains.
///
/// Each run writes `<temp_dir>/<uuid>.<ext>`, executes it with the temp dir
/// as working directory, and removes the source (and the compiled binary for
/// C++) whatever the outcome. Program failures are reported in the output,
/// not as errors.
#[derive(Debug, Clone)]
pub struct CodeRunner {
    temp_dir: PathBuf,
    timeout: Duration,
}

impl CodeRunner {
    pub fn new(config: &ExecutionConfig) -> Self {
        Self {
            temp_dir: config.temp_dir.clone(),
            timeout: config.timeout,
        }
    }

    pub async fn run(&self, language: Language, source: &str) -> Result<RunOutput> {
        tokio::fs::create_dir_all(&self.temp_dir).await?;
        let dir = tokio::fs::canonicalize(&self.temp_dir).await?;

        let id = Uuid::new_v4().to_string();
        let file_name = format!("{}.{}", id, language.extension());
        let source_path = dir.join(&file_name);
        tokio::fs::write(&source_path, source).await?;

        tracing::debug!(language = ?language, file = %source_path.display(), "Running code");

        let result = tokio::time::timeout(
            self.timeout,
            execute(language, &dir, &file_name, &id),
        )
        .await;

        remove_quietly(&source_path).await;
        if language == Language::Cpp {
            remove_quietly(&dir.join(&id)).await;
        }

        let output = match result {
            Ok(output) => output,
            Err(_) => {
                tracing::warn!(language = ?language, "Code execution timed out");
                format!("Execution timed out after {}ms", self.timeout.as_millis())
            }
        };

        Ok(RunOutput { output })
    }
}

async fn execute(language: Language, dir: &Path, file_name: &str, id: &str) -> String {
    match language {
        Language::Cpp => {
            let compiled = match spawn(Command::new("g++").args([file_name, "-o", id]), dir).await {
                Ok(output) => output,
                Err(message) => return message,
            };
            if !compiled.status.success() {
                return collect(compiled);
            }
            spawn(&mut Command::new(dir.join(id)), dir)
                .await
                .map_or_else(|message| message, collect)
        }
        Language::Python => spawn(Command::new("python3").arg(file_name), dir)
            .await
            .map_or_else(|message| message, collect),
        Language::JavaScript => spawn(Command::new("node").arg(file_name), dir)
            .await
            .map_or_else(|message| message, collect),
    }
}

async fn spawn(command: &mut Command, dir: &Path) -> std::result::Result<Output, String> {
    command
        .current_dir(dir)
        .stdin(Stdio::null())
        .kill_on_drop(true)
        .output()
        .await
        .map_err(|e| {
            tracing::warn!(error = %e, "Failed to start process");
            format!("Failed to start process: {}", e)
        })
}

/// stdout on success; stderr (or the exit status) on failure
fn collect(output: Output) -> String {
    if output.status.success() {
        return String::from_utf8_lossy(&output.stdout).into_owned();
    }

    let stderr = String::from_utf8_lossy(&output.stderr);
    if stderr.is_empty() {
        format!("Command failed: {}", output.status)
    } else {
        stderr.into_owned()
    }
}

async fn remove_quietly(path: &Path) {
    if let Err(e) = tokio::fs::remove_file(path).await {
        if e.kind() != std::io::ErrorKind::NotFound {
            tracing::warn!(error = %e, file = %path.display(), "Failed to remove temp file");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn runner(dir: &Path) -> CodeRunner {
        CodeRunner::new(&ExecutionConfig {
            temp_dir: dir.to_path_buf(),
            timeout: Duration::from_secs(5),
        })
    }

    fn scratch_dir(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("interview-exec-{}-{}", name, Uuid::new_v4()))
    }

    #[test]
    fn test_language_parse() {
        assert_eq!("cpp".parse::<Language>().unwrap(), Language::Cpp);
        assert_eq!("python".parse::<Language>().unwrap(), Language::Python);
        assert_eq!("javascript".parse::<Language>().unwrap(), Language::JavaScript);

        let err = "rust".parse::<Language>().unwrap_err();
        assert_eq!(err.to_string(), "Unsupported language");
    }

    #[test]
    fn test_extensions() {
        assert_eq!(Language::Cpp.extension(), "cpp");
        assert_eq!(Language::Python.extension(), "py");
        assert_eq!(Language::JavaScript.extension(), "js");
    }

    #[tokio::test]
    async fn test_run_leaves_no_files_behind() {
        let dir = scratch_dir("cleanup");
        let runner = runner(&dir);

        // Interpreter may be missing; either way the output is reported and files are removed
        let result = runner.run(Language::Python, "print('hi')").await.unwrap();
        assert!(!result.output.is_empty());

        let mut entries = tokio::fs::read_dir(&dir).await.unwrap();
        assert!(entries.next_entry().await.unwrap().is_none());

        tokio::fs::remove_dir_all(&dir).await.ok();
    }

    #[cfg(unix)]
    #[test]
    fn test_collect_prefers_stdout_then_stderr() {
        use std::os::unix::process::ExitStatusExt;

        let ok = Output {
            status: std::process::ExitStatus::from_raw(0),
            stdout: b"42\n".to_vec(),
            stderr: b"warning".to_vec(),
        };
        assert_eq!(collect(ok), "42\n");

        let failed = Output {
            status: std::process::ExitStatus::from_raw(1 << 8),
            stdout: b"partial".to_vec(),
            stderr: b"SyntaxError".to_vec(),
        };
        assert_eq!(collect(failed), "SyntaxError");

        let silent = Output {
            status: std::process::ExitStatus::from_raw(1 << 8),
            stdout: Vec::new(),
            stderr: Vec::new(),
        };
        assert!(collect(silent).starts_with("Command failed"));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_spawn_failure_is_reported_as_output() {
        let dir = std::env::temp_dir();
        let message = spawn(&mut Command::new("definitely-not-a-real-binary-xyz"), &dir)
            .await
            .unwrap_err();
        assert!(message.starts_with("Failed to start process"));
    }
}
