//! Executable script fixtures for integration tests.

use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

/// A temporary directory holding executable `sh` fixtures.
///
/// The directory outlives the run that uses the scripts, so files a script
/// writes next to itself (like a recorded pid) survive work-directory
/// cleanup and stay observable to the test.
pub struct ScriptDir {
    dir: TempDir,
}

impl ScriptDir {
    pub fn new() -> Self {
        Self {
            dir: tempfile::tempdir().expect("create script fixture directory"),
        }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Write `body` as an executable `sh` script and return its path.
    pub fn script(&self, name: &str, body: &str) -> PathBuf {
        let path = self.dir.path().join(name);
        fs::write(&path, format!("#!/bin/sh\n{body}\n")).expect("write script fixture");
        let mut perms = fs::metadata(&path)
            .expect("stat script fixture")
            .permissions();
        perms.set_mode(0o755);
        fs::set_permissions(&path, perms).expect("chmod script fixture");
        path
    }

    /// A script that exits with `code`.
    pub fn exit_script(&self, code: i32) -> PathBuf {
        self.script(&format!("exit_{code}.sh"), &format!("exit {code}"))
    }

    /// A script that sleeps for `secs` seconds, then exits 0.
    pub fn sleep_script(&self, secs: u32) -> PathBuf {
        self.script(&format!("sleep_{secs}.sh"), &format!("sleep {secs}"))
    }

    /// A sleeping script that first records its pid next to itself.
    ///
    /// Returns the script path and the pid file path.
    pub fn sleep_script_with_pid_file(&self, secs: u32) -> (PathBuf, PathBuf) {
        let pid_file = self.dir.path().join("pid");
        let script = self.script(
            "sleep_pid.sh",
            &format!("echo $$ > \"{}\"\nsleep {secs}", pid_file.display()),
        );
        (script, pid_file)
    }

    /// A script that kills itself with `signo`, leaving the default
    /// disposition to take effect.
    pub fn self_signal_script(&self, signo: i32) -> PathBuf {
        self.script(&format!("signal_{signo}.sh"), &format!("kill -{signo} $$"))
    }

    /// A script that writes one line to stdout and one to stderr.
    pub fn output_script(&self) -> PathBuf {
        self.script("output.sh", "echo to-stdout\necho to-stderr 1>&2")
    }

    /// A script that prints the observable isolation state: working
    /// directory, HOME, TZ, LANG and the umask.
    pub fn env_dump_script(&self) -> PathBuf {
        self.script(
            "env_dump.sh",
            "pwd\necho \"HOME=$HOME\"\necho \"TZ=$TZ\"\necho \"LANG=${LANG:-unset}\"\numask",
        )
    }

    /// A plain non-executable file; spawning it must fail.
    pub fn non_executable(&self) -> PathBuf {
        let path = self.dir.path().join("not_runnable");
        fs::write(&path, "just data\n").expect("write fixture file");
        path
    }
}

impl Default for ScriptDir {
    fn default() -> Self {
        Self::new()
    }
}
