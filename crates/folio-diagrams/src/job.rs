//! One isolated renderer invocation.

use std::fs::{self, File};
use std::process::{Child, Stdio};
use std::time::{Duration, Instant};

use serde::Serialize;
use tempfile::TempDir;

use crate::RenderError;
use crate::command::RendererCommand;
use crate::consts::{DEFAULT_BACKGROUND, DEFAULT_LINK_WIDTH, POLL_INTERVAL, SANDBOX_ARGS};

const INPUT_FILE: &str = "diagram.mmd";
const OUTPUT_FILE: &str = "diagram.svg";
const CONFIG_FILE: &str = "puppeteer-config.json";
const STDERR_FILE: &str = "stderr.log";

#[derive(Serialize)]
struct PuppeteerConfig {
    args: [&'static str; 2],
}

/// A single diagram to render to SVG.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderJob {
    pub source: String,
    pub width: u32,
    pub background: String,
}

impl RenderJob {
    #[must_use]
    pub fn new(source: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            width: DEFAULT_LINK_WIDTH,
            background: DEFAULT_BACKGROUND.to_owned(),
        }
    }

    #[must_use]
    pub fn width(mut self, width: u32) -> Self {
        self.width = width;
        self
    }

    #[must_use]
    pub fn background(mut self, background: impl Into<String>) -> Self {
        self.background = background.into();
        self
    }

    /// Run the renderer and return the SVG text.
    ///
    /// The job owns a fresh temporary directory holding the input, the
    /// browser configuration and the output. It is removed when this
    /// function returns, whatever the outcome.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError`] on spawn failure, non-zero exit, timeout or
    /// missing output.
    pub fn run(&self, command: &RendererCommand, timeout: Duration) -> Result<String, RenderError> {
        let workspace = tempfile::Builder::new()
            .prefix("folio-mmd-")
            .tempdir()
            .map_err(RenderError::Workspace)?;
        self.run_in(&workspace, command, timeout)
    }

    fn run_in(
        &self,
        workspace: &TempDir,
        command: &RendererCommand,
        timeout: Duration,
    ) -> Result<String, RenderError> {
        let input = workspace.path().join(INPUT_FILE);
        let output = workspace.path().join(OUTPUT_FILE);
        let config = workspace.path().join(CONFIG_FILE);
        let stderr_path = workspace.path().join(STDERR_FILE);

        let config_json = serde_json::to_string(&PuppeteerConfig { args: SANDBOX_ARGS })
            .map_err(|e| RenderError::Workspace(e.into()))?;
        fs::write(&input, &self.source).map_err(RenderError::Workspace)?;
        fs::write(&config, config_json).map_err(RenderError::Workspace)?;
        let stderr_file = File::create(&stderr_path).map_err(RenderError::Workspace)?;

        let mut cmd = command.command();
        cmd.arg("-i")
            .arg(&input)
            .arg("-o")
            .arg(&output)
            .arg("-b")
            .arg(&self.background)
            .arg("-w")
            .arg(self.width.to_string())
            .arg("-p")
            .arg(&config)
            .current_dir(workspace.path())
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::from(stderr_file));
        // Own process group, so a timeout also reaches the browser mmdc starts.
        #[cfg(unix)]
        {
            use std::os::unix::process::CommandExt;
            cmd.process_group(0);
        }

        tracing::debug!(program = %command.program(), width = self.width, "Running renderer");

        let child = cmd.spawn().map_err(|source| RenderError::Spawn {
            program: command.program(),
            source,
        })?;

        let exit_code = wait_with_timeout(child, timeout)?;
        if exit_code != 0 {
            let stderr = fs::read_to_string(&stderr_path).unwrap_or_default();
            return Err(RenderError::Failed {
                exit_code,
                stderr: stderr.trim().to_owned(),
            });
        }

        fs::read_to_string(&output).map_err(RenderError::Output)
    }
}

/// Wait for the child, killing it once `timeout` has elapsed.
///
/// Returns the exit code (-1 when terminated by a signal).
fn wait_with_timeout(mut child: Child, timeout: Duration) -> Result<i32, RenderError> {
    let start = Instant::now();
    loop {
        match child.try_wait() {
            Ok(Some(status)) => return Ok(status.code().unwrap_or(-1)),
            Ok(None) => {
                if start.elapsed() >= timeout {
                    kill_tree(&mut child);
                    tracing::warn!(timeout_secs = timeout.as_secs_f32(), "Renderer timed out");
                    return Err(RenderError::Timeout(timeout));
                }
                std::thread::sleep(POLL_INTERVAL);
            }
            Err(e) => {
                kill_tree(&mut child);
                return Err(RenderError::Output(e));
            }
        }
    }
}

/// Kill the child together with everything it spawned, then reap it.
fn kill_tree(child: &mut Child) {
    #[cfg(unix)]
    if let Ok(pid) = libc::pid_t::try_from(child.id()) {
        // SAFETY: plain signal delivery to the group led by our own child.
        unsafe {
            libc::kill(-pid, libc::SIGKILL);
        }
    }
    let _ = child.kill();
    let _ = child.wait();
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::path::{Path, PathBuf};

    /// A stand-in renderer: `sh <script>` followed by the job arguments.
    fn fake_renderer(dir: &Path, body: &str) -> RendererCommand {
        let script = dir.join("fake-mmdc.sh");
        let prelude = r#"
while [ $# -gt 0 ]; do
  case "$1" in
    -i) input="$2"; shift ;;
    -o) out="$2"; shift ;;
    -b) bg="$2"; shift ;;
    -w) width="$2"; shift ;;
    -p) cfg="$2"; shift ;;
  esac
  shift
done
"#;
        fs::write(&script, format!("{prelude}{body}\n")).unwrap();
        RendererCommand::new("sh").with_prefix_args([script])
    }

    #[test]
    fn test_run_returns_svg() {
        let dir = tempfile::tempdir().unwrap();
        let cmd = fake_renderer(
            dir.path(),
            r#"printf '<svg viewBox="0 0 %s 10">' "$width" > "$out"; cat "$input" >> "$out"; printf '</svg>' >> "$out""#,
        );

        let svg = RenderJob::new("graph TD; A-->B")
            .width(900)
            .run(&cmd, Duration::from_secs(10))
            .unwrap();
        assert_eq!(svg, r#"<svg viewBox="0 0 900 10">graph TD; A-->B</svg>"#);
    }

    #[test]
    fn test_run_passes_background_and_browser_config() {
        let dir = tempfile::tempdir().unwrap();
        let cmd = fake_renderer(
            dir.path(),
            r#"printf '%s|' "$bg" > "$out"; cat "$cfg" >> "$out""#,
        );

        let out = RenderJob::new("x")
            .background("white")
            .run(&cmd, Duration::from_secs(10))
            .unwrap();
        assert_eq!(
            out,
            r#"white|{"args":["--no-sandbox","--disable-setuid-sandbox"]}"#
        );
    }

    #[test]
    fn test_workspace_removed_after_success() {
        let dir = tempfile::tempdir().unwrap();
        let cmd = fake_renderer(dir.path(), r#"printf '%s' "$input" > "$out""#);

        let input = RenderJob::new("x")
            .run(&cmd, Duration::from_secs(10))
            .unwrap();
        let input = PathBuf::from(input);
        let workspace = input.parent().unwrap();

        assert!(
            workspace
                .file_name()
                .unwrap()
                .to_string_lossy()
                .starts_with("folio-mmd-")
        );
        assert!(!workspace.exists());
    }

    #[test]
    fn test_workspace_removed_after_failure() {
        let dir = tempfile::tempdir().unwrap();
        let marker = dir.path().join("workspace.txt");
        let cmd = fake_renderer(
            dir.path(),
            &format!(r#"dirname "$input" > '{}'; exit 1"#, marker.display()),
        );

        let result = RenderJob::new("x").run(&cmd, Duration::from_secs(10));
        assert!(result.is_err());

        let workspace = fs::read_to_string(&marker).unwrap();
        assert!(!Path::new(workspace.trim()).exists());
    }

    #[test]
    fn test_non_zero_exit_captures_stderr() {
        let dir = tempfile::tempdir().unwrap();
        let cmd = fake_renderer(dir.path(), "echo 'Parse error on line 1' >&2; exit 3");

        let err = RenderJob::new("graph ???")
            .run(&cmd, Duration::from_secs(10))
            .unwrap_err();
        match err {
            RenderError::Failed { exit_code, stderr } => {
                assert_eq!(exit_code, 3);
                assert_eq!(stderr, "Parse error on line 1");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_missing_output_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let cmd = fake_renderer(dir.path(), "exit 0");

        let err = RenderJob::new("x")
            .run(&cmd, Duration::from_secs(10))
            .unwrap_err();
        assert!(matches!(err, RenderError::Output(_)));
    }

    #[test]
    fn test_timeout_kills_renderer() {
        let dir = tempfile::tempdir().unwrap();
        let cmd = fake_renderer(dir.path(), "exec sleep 30");

        let start = Instant::now();
        let err = RenderJob::new("x")
            .run(&cmd, Duration::from_millis(200))
            .unwrap_err();
        assert!(matches!(err, RenderError::Timeout(_)));
        assert!(start.elapsed() < Duration::from_secs(10));
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn test_timeout_kills_grandchildren() {
        let dir = tempfile::tempdir().unwrap();
        let pid_file = dir.path().join("grandchild.pid");
        let cmd = fake_renderer(
            dir.path(),
            &format!("sleep 300 &\necho $! > '{}'\nwait", pid_file.display()),
        );

        let err = RenderJob::new("x")
            .run(&cmd, Duration::from_millis(300))
            .unwrap_err();
        assert!(matches!(err, RenderError::Timeout(_)));

        let pid = fs::read_to_string(&pid_file).unwrap();
        let stat = PathBuf::from(format!("/proc/{}/stat", pid.trim()));
        let deadline = Instant::now() + Duration::from_secs(2);
        let gone = loop {
            let alive = fs::read_to_string(&stat)
                .is_ok_and(|s| s.rsplit(") ").next().is_some_and(|rest| !rest.starts_with('Z')));
            if !alive {
                break true;
            }
            if Instant::now() >= deadline {
                break false;
            }
            std::thread::sleep(Duration::from_millis(20));
        };
        assert!(gone, "background child outlived the renderer timeout");
    }

    #[test]
    fn test_spawn_failure() {
        let cmd = RendererCommand::new("/definitely/not/a/renderer");
        let err = RenderJob::new("x")
            .run(&cmd, Duration::from_secs(1))
            .unwrap_err();
        assert!(matches!(err, RenderError::Spawn { .. }));
    }
}
