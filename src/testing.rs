//! In-memory host and recording runner for unit tests.

use crate::error::{AutobuildError, Result};
use crate::exec::{Invocation, Runner};
use crate::system::Host;
use std::cell::RefCell;
use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};

pub struct FakeHost {
    pub os: String,
    pub arch: String,
    pub root: PathBuf,
    pub vars: HashMap<String, String>,
    pub files: HashMap<String, String>,
    pub programs: HashSet<String>,
    pub writable: HashSet<PathBuf>,
}

impl FakeHost {
    pub fn linux() -> Self {
        Self {
            os: "linux".to_string(),
            arch: "x86_64".to_string(),
            root: PathBuf::from("/"),
            vars: HashMap::new(),
            files: HashMap::new(),
            programs: HashSet::new(),
            writable: HashSet::new(),
        }
    }

    pub fn with_os(mut self, os: &str) -> Self {
        self.os = os.to_string();
        self
    }

    pub fn with_arch(mut self, arch: &str) -> Self {
        self.arch = arch.to_string();
        self
    }

    pub fn with_file(mut self, path: &str, content: &str) -> Self {
        self.files.insert(path.to_string(), content.to_string());
        self
    }

    pub fn with_var(mut self, key: &str, value: &str) -> Self {
        self.vars.insert(key.to_string(), value.to_string());
        self
    }

    pub fn with_programs(mut self, names: &[&str]) -> Self {
        self.programs.extend(names.iter().map(|n| n.to_string()));
        self
    }

    pub fn with_writable(mut self, path: impl Into<PathBuf>) -> Self {
        self.writable.insert(path.into());
        self
    }

    pub fn with_writable_root(self) -> Self {
        let root = self.root.clone();
        self.with_writable(root)
    }
}

impl Host for FakeHost {
    fn os(&self) -> &str {
        &self.os
    }

    fn arch(&self) -> &str {
        &self.arch
    }

    fn var(&self, key: &str) -> Option<String> {
        self.vars.get(key).cloned()
    }

    fn root(&self) -> &Path {
        &self.root
    }

    fn file_exists(&self, path: &str) -> bool {
        self.files.contains_key(path)
    }

    fn read_file(&self, path: &str) -> Option<String> {
        self.files.get(path).cloned()
    }

    fn find_program(&self, name: &str) -> Option<PathBuf> {
        self.programs
            .contains(name)
            .then(|| PathBuf::from("/usr/bin").join(name))
    }

    fn is_writable(&self, path: &Path) -> bool {
        self.writable.contains(path)
    }
}

/// Records invocations instead of spawning them
#[derive(Default)]
pub struct RecordingRunner {
    pub ran: RefCell<Vec<Invocation>>,
    pub replaced: RefCell<Vec<Invocation>>,
    /// Programs whose invocation fails
    pub failing: HashSet<String>,
}

impl RecordingRunner {
    pub fn failing_on(names: &[&str]) -> Self {
        Self {
            failing: names.iter().map(|n| n.to_string()).collect(),
            ..Self::default()
        }
    }

    pub fn lines(&self) -> Vec<String> {
        self.ran.borrow().iter().map(|i| i.to_string()).collect()
    }

    pub fn spawned_nothing(&self) -> bool {
        self.ran.borrow().is_empty() && self.replaced.borrow().is_empty()
    }
}

impl Runner for RecordingRunner {
    fn run(&self, invocation: &Invocation) -> Result<()> {
        self.ran.borrow_mut().push(invocation.clone());

        if self.failing.contains(&invocation.program) {
            return Err(AutobuildError::SystemCommandFailed {
                command: invocation.to_string(),
                reason: "exited with status 1".to_string(),
            });
        }
        Ok(())
    }

    fn replace(&self, invocation: &Invocation) -> Result<i32> {
        self.replaced.borrow_mut().push(invocation.clone());
        Ok(0)
    }
}
