use assert_cmd::{cargo::cargo_bin_cmd, Command};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::{tempdir, TempDir};

/// Get a Command for guidance-compress, isolated from the user's environment
pub fn guidance(fixture: &Fixture) -> Command {
    let mut cmd = cargo_bin_cmd!("guidance-compress");
    cmd.env("GUIDANCE_COMPRESS_CONFIG_DIR", fixture.config_dir())
        .env_remove("CLAUDE_HOOK_PARAMS")
        .env_remove("GUIDANCE_COMPRESS_LOG")
        .env_remove("RUST_LOG")
        .current_dir(fixture.dir.path());
    cmd
}

/// A scratch guidance tree plus its config directory
pub struct Fixture {
    pub dir: TempDir,
}

impl Fixture {
    pub fn new() -> Self {
        let dir = tempdir().unwrap();
        fs::create_dir_all(dir.path().join("guidance")).unwrap();
        fs::create_dir_all(dir.path().join("config")).unwrap();
        Self { dir }
    }

    pub fn root(&self) -> PathBuf {
        self.dir.path().join("guidance")
    }

    pub fn config_dir(&self) -> PathBuf {
        self.dir.path().join("config")
    }

    /// Write a document of `lines` prose lines under the guidance root.
    pub fn write_doc(&self, relative: &str, lines: usize) -> PathBuf {
        self.write_raw(relative, &prose(lines))
    }

    pub fn write_raw(&self, relative: &str, content: &str) -> PathBuf {
        let path = self.root().join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(&path, content).unwrap();
        path
    }

    /// Write `config.toml` pointing at the guidance root and `worker`.
    pub fn write_config(&self, worker: &Path, extra: &str) {
        let config = format!(
            "root = {:?}\n{}\n[compressor]\ncommand = [{:?}]\n",
            self.root().display().to_string(),
            extra,
            worker.display().to_string()
        );
        fs::write(self.config_dir().join("config.toml"), config).unwrap();
    }

    /// Config whose worker does not exist.
    pub fn write_unavailable_config(&self) {
        self.write_config(&self.dir.path().join("no-such-worker"), "");
    }

    /// Write `body` as a shell script named `name` with the given mode.
    #[cfg(unix)]
    pub fn install_script(&self, name: &str, body: &str, mode: u32) -> PathBuf {
        use std::os::unix::fs::PermissionsExt;

        let path = self.dir.path().join(name);
        fs::write(&path, format!("#!/bin/sh\n{}", body)).unwrap();
        fs::set_permissions(&path, fs::Permissions::from_mode(mode)).unwrap();
        path
    }

    /// Install a worker that answers every request with `compressed`.
    #[cfg(unix)]
    pub fn install_worker(&self, compressed: &str) -> PathBuf {
        let reply = serde_json::json!({
            "compressed_prompt": compressed,
            "origin_tokens": 400,
            "compressed_tokens": 200,
            "ratio": "2.0x",
        })
        .to_string();
        let script = format!(
            "while IFS= read -r line; do\n  printf '%s\\n' '{}'\ndone\n",
            reply
        );
        self.install_script("worker.sh", &script, 0o755)
    }

    /// Like [`Fixture::install_worker`], but the last request received is
    /// saved to the returned log path.
    #[cfg(unix)]
    pub fn install_recording_worker(&self, compressed: &str) -> (PathBuf, PathBuf) {
        let log = self.dir.path().join("last-request.json");
        let reply = serde_json::json!({
            "compressed_prompt": compressed,
            "origin_tokens": 400,
            "compressed_tokens": 200,
        })
        .to_string();
        let script = format!(
            "while IFS= read -r line; do\n  printf '%s\\n' \"$line\" > '{}'\n  printf '%s\\n' '{}'\ndone\n",
            log.display(),
            reply
        );
        (self.install_script("recorder.sh", &script, 0o755), log)
    }

    /// The last request a recording worker received.
    #[cfg(unix)]
    pub fn last_request(log: &Path) -> serde_json::Value {
        serde_json::from_str(&fs::read_to_string(log).unwrap()).unwrap()
    }

    /// Sorted file names directly under `relative` in the guidance root.
    pub fn listing(&self, relative: &str) -> Vec<String> {
        let mut names: Vec<String> = fs::read_dir(self.root().join(relative))
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().to_string())
            .collect();
        names.sort();
        names
    }
}

pub fn prose(lines: usize) -> String {
    (0..lines)
        .map(|i| format!("Rule {} tells the agent what to do in detail.\n", i))
        .collect()
}
