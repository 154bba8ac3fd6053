//! Command sources - where structured output comes from
//!
//! The normalizer does not care whether a document arrived over NX-API,
//! from `vsh` on the box itself, or out of a file captured last week.
//! [`CommandSource`] is that seam: every implementation hands back
//! *normalized* tables, so the single-row/multi-row quirk never leaks
//! past the transport layer.

use serde_json::{Map, Value};
use std::path::{Path, PathBuf};
use std::process::Command;
use tracing::debug;

use crate::error::{AnnealError, Result};

/// A device, or a stand-in for one, that can execute CLI commands.
///
/// `run_structured` yields the parsed and normalized document for
/// `{cmd} | json`; `run_raw` yields the plaintext a human would see.
/// Consumers take a `CommandSource` rather than a concrete transport so
/// captures can stand in for live switches in demos and tests.
pub trait CommandSource {
    /// Execute `cmd` with structured output and normalize the result.
    fn run_structured(&self, cmd: &str) -> Result<Map<String, Value>>;

    /// Execute `cmd` and return its plaintext output.
    fn run_raw(&self, cmd: &str) -> Result<String>;
}

/// A capture file standing in for a device.
///
/// The file holds exactly what `{cmd} | json` printed, so the command
/// passed to [`CommandSource::run_structured`] is only logged, never
/// executed.
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        FileSource { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl CommandSource for FileSource {
    fn run_structured(&self, cmd: &str) -> Result<Map<String, Value>> {
        debug!(
            "reading captured output of {:?} from {}",
            cmd,
            self.path.display()
        );
        let text = std::fs::read_to_string(&self.path)?;
        crate::normalize_document(&text)
    }

    fn run_raw(&self, cmd: &str) -> Result<String> {
        debug!(
            "reading captured output of {:?} from {}",
            cmd,
            self.path.display()
        );
        Ok(std::fs::read_to_string(&self.path)?)
    }
}

/// On-box execution through `vsh -c`.
///
/// NX-OS exposes its CLI to the guestshell and to Python scripts via the
/// `vsh` binary; piping through `| json` yields the same structured body
/// NX-API would return.
pub struct VshSource {
    program: PathBuf,
}

impl VshSource {
    /// Use `vsh` from `PATH`.
    pub fn new() -> Self {
        VshSource {
            program: PathBuf::from("vsh"),
        }
    }

    /// Use an explicit binary, e.g. `/isan/bin/vsh` outside the guestshell.
    pub fn with_program(program: impl Into<PathBuf>) -> Self {
        VshSource {
            program: program.into(),
        }
    }

    fn execute(&self, cli_line: &str) -> Result<Vec<u8>> {
        debug!("running {} -c {:?}", self.program.display(), cli_line);
        let output = Command::new(&self.program)
            .arg("-c")
            .arg(cli_line)
            .output()?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            let message = match stderr.trim() {
                "" => format!("vsh exited with {}", output.status),
                reason => reason.to_string(),
            };
            return Err(AnnealError::Device { message });
        }

        Ok(output.stdout)
    }
}

impl Default for VshSource {
    fn default() -> Self {
        Self::new()
    }
}

impl CommandSource for VshSource {
    fn run_structured(&self, cmd: &str) -> Result<Map<String, Value>> {
        let stdout = self.execute(&format!("{} | json", cmd))?;
        let text = String::from_utf8_lossy(&stdout);
        crate::normalize_document(&text)
    }

    fn run_raw(&self, cmd: &str) -> Result<String> {
        let stdout = self.execute(cmd)?;
        Ok(String::from_utf8_lossy(&stdout).into_owned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::io::Write;

    fn capture_file(content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_file_source_normalizes_on_read() {
        let file = capture_file(
            r#"{ "TABLE_intf": { "ROW_intf": { "intf-name": "Eth1/1" } } }"#,
        );

        let table = FileSource::new(file.path())
            .run_structured("show interface brief")
            .unwrap();

        assert_eq!(
            Value::Object(table),
            json!({ "TABLE_intf": { "ROW_intf": [{ "intf-name": "Eth1/1" }] } }),
        );
    }

    #[test]
    fn test_file_source_raw_passthrough() {
        let file = capture_file("Eth1/1 is up\n");
        let text = FileSource::new(file.path()).run_raw("show interface brief").unwrap();
        assert_eq!(text, "Eth1/1 is up\n");
    }

    #[test]
    fn test_file_source_missing_file() {
        let result = FileSource::new("/no/such/capture.json").run_structured("show version");
        assert!(matches!(result, Err(AnnealError::Io(_))));
    }

    #[test]
    fn test_file_source_invalid_json() {
        let file = capture_file("not json at all");
        let result = FileSource::new(file.path()).run_structured("show version");
        assert!(matches!(result, Err(AnnealError::Json(_))));
    }

    #[cfg(unix)]
    mod vsh {
        use super::*;
        use std::os::unix::fs::PermissionsExt;

        /// Stand-in for `vsh` that prints a canned document no matter
        /// what command it is handed.
        fn fake_vsh(script_body: &str) -> tempfile::NamedTempFile {
            let mut file = tempfile::NamedTempFile::new().unwrap();
            writeln!(file, "#!/bin/sh\n{}", script_body).unwrap();
            let mut permissions = file.as_file().metadata().unwrap().permissions();
            permissions.set_mode(0o755);
            file.as_file().set_permissions(permissions).unwrap();
            // Swap the write handle for a read-only one: Linux refuses to
            // exec a file that is still open for writing (ETXTBSY).
            let (write_handle, path) = file.into_parts();
            drop(write_handle);
            let read_handle = std::fs::File::open(&path).unwrap();
            tempfile::NamedTempFile::from_parts(read_handle, path)
        }

        #[test]
        fn test_vsh_source_normalizes_stdout() {
            let vsh = fake_vsh(
                r#"echo '{ "TABLE_asn": { "ROW_asn": { "asn": "65001" } } }'"#,
            );

            let table = VshSource::with_program(vsh.path())
                .run_structured("show ip eigrp neighbors")
                .unwrap();

            assert_eq!(
                Value::Object(table),
                json!({ "TABLE_asn": { "ROW_asn": [{ "asn": "65001" }] } }),
            );
        }

        #[test]
        fn test_vsh_source_failure_surfaces_stderr() {
            let vsh = fake_vsh("echo '% Invalid command' >&2\nexit 16");

            let result = VshSource::with_program(vsh.path()).run_structured("show bogus");
            match result {
                Err(AnnealError::Device { message }) => {
                    assert_eq!(message, "% Invalid command")
                }
                other => panic!("expected Device error, got {:?}", other),
            }
        }

        #[test]
        fn test_vsh_source_failure_without_stderr_reports_status() {
            let vsh = fake_vsh("exit 3");

            let result = VshSource::with_program(vsh.path()).run_raw("show bogus");
            match result {
                Err(AnnealError::Device { message }) => {
                    assert!(message.contains("exit"), "message was {:?}", message)
                }
                other => panic!("expected Device error, got {:?}", other),
            }
        }
    }
}
