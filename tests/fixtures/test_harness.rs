use anyhow::Result;
/// Test harness: a working tree cloned from a local bare remote, in a temp dir
use std::path::{Path, PathBuf};
use std::process::Command;
use tempfile::TempDir;

pub const BRANCH: &str = "main";

pub struct TestHarness {
    temp_dir: TempDir,
}

impl TestHarness {
    /// Create a bare remote and a clone of it with one initial commit pushed.
    ///
    /// The clone has `playoffs/data/` in place and tracks `origin/main`.
    pub fn with_remote() -> Result<Self> {
        let harness = Self {
            temp_dir: tempfile::tempdir()?,
        };

        std::fs::create_dir_all(harness.remote_dir())?;
        run_git(&harness.remote_dir(), &["init", "--bare", "--quiet"])?;
        run_git(&harness.remote_dir(), &["symbolic-ref", "HEAD", "refs/heads/main"])?;

        let remote = harness.remote_dir().display().to_string();
        let work = harness.work_dir().display().to_string();
        run_git(harness.path(), &["clone", "--quiet", &remote, &work])?;
        harness.setup_git_config(&harness.work_dir())?;
        run_git(&harness.work_dir(), &["symbolic-ref", "HEAD", "refs/heads/main"])?;

        harness.create_file("README.md", "# Playoff brackets\n")?;
        harness.create_file("playoffs/data/.gitkeep", "")?;
        harness.commit_all("Initial commit")?;
        run_git(&harness.work_dir(), &["push", "--quiet", "-u", "origin", BRANCH])?;

        Ok(harness)
    }

    /// Root of the temporary directory
    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    pub fn work_dir(&self) -> PathBuf {
        self.path().join("work")
    }

    pub fn remote_dir(&self) -> PathBuf {
        self.path().join("remote.git")
    }

    pub fn artifact(&self, year: i32) -> PathBuf {
        self.work_dir().join(format!("playoffs/data/{year}.json"))
    }

    /// Create a file in the working tree, creating parent directories
    pub fn create_file(&self, relative_path: &str, content: &str) -> Result<PathBuf> {
        let file_path = self.work_dir().join(relative_path);
        if let Some(parent) = file_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&file_path, content)?;
        Ok(file_path)
    }

    /// Commit all files in the working tree and push them
    pub fn commit_and_push(&self, message: &str) -> Result<()> {
        self.commit_all(message)?;
        run_git(&self.work_dir(), &["push", "--quiet"])?;
        Ok(())
    }

    pub fn commit_all(&self, message: &str) -> Result<()> {
        run_git(&self.work_dir(), &["add", "."])?;
        run_git(&self.work_dir(), &["commit", "--quiet", "-m", message])?;
        Ok(())
    }

    /// Run git in the working tree and return stdout
    pub fn git(&self, args: &[&str]) -> Result<String> {
        run_git(&self.work_dir(), args)
    }

    pub fn local_commit_count(&self) -> Result<usize> {
        Ok(self.git(&["rev-list", "--count", "HEAD"])?.trim().parse()?)
    }

    pub fn remote_commit_count(&self) -> Result<usize> {
        Ok(run_git(&self.remote_dir(), &["rev-list", "--count", BRANCH])?
            .trim()
            .parse()?)
    }

    pub fn remote_head_message(&self) -> Result<String> {
        Ok(run_git(&self.remote_dir(), &["log", "-1", "--format=%s", BRANCH])?
            .trim()
            .to_string())
    }

    /// Push a commit to the remote from a second clone so the first one falls behind
    pub fn advance_remote(&self, file: &str, content: &str) -> Result<()> {
        let other = self.path().join("other");
        let remote = self.remote_dir().display().to_string();
        let other_str = other.display().to_string();
        run_git(self.path(), &["clone", "--quiet", &remote, &other_str])?;
        self.setup_git_config(&other)?;
        std::fs::write(other.join(file), content)?;
        run_git(&other, &["add", file])?;
        run_git(&other, &["commit", "--quiet", "-m", "Concurrent update"])?;
        run_git(&other, &["push", "--quiet"])?;
        Ok(())
    }

    /// Set up basic Git configuration for testing
    fn setup_git_config(&self, repo_path: &Path) -> Result<()> {
        run_git(repo_path, &["config", "user.name", "Test User"])?;
        run_git(repo_path, &["config", "user.email", "test@example.com"])?;
        run_git(repo_path, &["config", "commit.gpgsign", "false"])?;
        Ok(())
    }
}

fn run_git(dir: &Path, args: &[&str]) -> Result<String> {
    let output = Command::new("git").args(args).current_dir(dir).output()?;

    if !output.status.success() {
        anyhow::bail!(
            "git {} failed: {}",
            args.join(" "),
            String::from_utf8_lossy(&output.stderr)
        );
    }

    Ok(String::from_utf8_lossy(&output.stdout).to_string())
}
