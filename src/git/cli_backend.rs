use std::ffi::OsString;
use std::fs;
use std::path::Path;

use tracing::{debug, info};

use crate::config::SyncRequest;
use crate::error::SyncError;
use crate::runner::CommandRunner;

const GIT: &str = "git";

/// Remote name a clone sets up for the upstream it came from.
const CANONICAL_REMOTE: &str = "origin";

/// What currently sits at the destination path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DestinationState {
    /// Nothing there yet: clone.
    Missing,
    /// An existing git working copy: fetch, checkout, clean.
    Checkout,
    /// Something that is not a working copy. Never touched.
    Foreign,
}

impl DestinationState {
    /// Classify `dest`. A working copy is recognised by a `.git` directory.
    pub fn inspect(dest: &Path) -> Self {
        if !dest.exists() {
            DestinationState::Missing
        } else if dest.join(".git").is_dir() {
            DestinationState::Checkout
        } else {
            DestinationState::Foreign
        }
    }
}

fn git(args: &[&str]) -> Vec<OsString> {
    std::iter::once(GIT)
        .chain(args.iter().copied())
        .map(OsString::from)
        .collect()
}

/// Commands that refresh an existing checkout to `tag`, in execution order.
///
/// 1. `git fetch --tags <repo>`
/// 2. `git fetch origin <tag>` (the tag may only exist on the remote we cloned from)
/// 3. `git checkout --force <tag>`
/// 4. `git clean -fdx`
pub fn update_commands(repo: &str, tag: &str) -> Vec<Vec<OsString>> {
    vec![
        git(&["fetch", "--tags", repo]),
        git(&["fetch", CANONICAL_REMOTE, tag]),
        git(&["checkout", "--force", tag]),
        git(&["clean", "-fdx"]),
    ]
}

/// Shallow, single-branch clone of `tag` straight into `dest`.
pub fn clone_command(repo: &str, tag: &str, dest: &Path) -> Vec<OsString> {
    let mut cmd = git(&["clone", "--branch", tag, "--depth", "1", repo]);
    cmd.push(dest.as_os_str().to_os_string());
    cmd
}

/// Make `request.destination()` a clean checkout of the request's tag.
///
/// - Missing destination: create its parent directories, then shallow-clone the tag.
/// - Existing working copy: fetch tags, fetch the tag from `origin`, force checkout,
///   and remove untracked and ignored files.
/// - Anything else: [`SyncError::InvalidDestination`], and no command is run.
///
/// The first failing command aborts the sequence. An update interrupted midway is
/// not rolled back; running again converges it.
///
/// # Errors
/// Returns the first error raised by the filesystem or `runner`.
pub fn ensure_repo<R>(runner: &R, request: &SyncRequest) -> Result<(), SyncError>
where
    R: CommandRunner + ?Sized,
{
    let dest = request.destination();
    let tag = request.tag();
    let state = DestinationState::inspect(dest);
    info!(dest = %dest.display(), %tag, ?state, "inspected destination");

    match state {
        DestinationState::Foreign => Err(SyncError::InvalidDestination {
            path: dest.to_path_buf(),
        }),
        DestinationState::Checkout => {
            for cmd in update_commands(request.repo(), &tag) {
                runner.run(&cmd, Some(dest))?;
            }
            Ok(())
        }
        DestinationState::Missing => {
            if let Some(parent) = dest.parent().filter(|p| !p.as_os_str().is_empty()) {
                debug!(parent = %parent.display(), "creating parent directories");
                fs::create_dir_all(parent).map_err(|source| SyncError::CreateParent {
                    path: parent.to_path_buf(),
                    source,
                })?;
            }
            runner.run(&clone_command(request.repo(), &tag, dest), None)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::path::PathBuf;
    use tempfile::tempdir;

    /// Records every invocation; optionally fails the n-th one (0-based).
    #[derive(Default)]
    struct FakeRunner {
        calls: RefCell<Vec<(Vec<String>, Option<PathBuf>)>>,
        fail_at: Option<usize>,
    }

    impl FakeRunner {
        fn failing_at(n: usize) -> Self {
            Self {
                fail_at: Some(n),
                ..Default::default()
            }
        }

        fn argv(&self) -> Vec<Vec<String>> {
            self.calls.borrow().iter().map(|(a, _)| a.clone()).collect()
        }
    }

    impl CommandRunner for FakeRunner {
        fn run(&self, args: &[OsString], cwd: Option<&Path>) -> Result<(), SyncError> {
            let idx = self.calls.borrow().len();
            let argv: Vec<String> = args
                .iter()
                .map(|a| a.to_string_lossy().into_owned())
                .collect();
            self.calls
                .borrow_mut()
                .push((argv.clone(), cwd.map(Path::to_path_buf)));
            if self.fail_at == Some(idx) {
                return Err(SyncError::CommandFailed {
                    command: argv.join(" "),
                    cwd: cwd.map(Path::to_path_buf),
                    code: Some(128),
                });
            }
            Ok(())
        }
    }

    fn strs(v: &[&str]) -> Vec<String> {
        v.iter().map(|s| s.to_string()).collect()
    }

    fn fake_checkout(dir: &Path) {
        fs::create_dir_all(dir.join(".git")).unwrap();
        fs::write(dir.join("README.md"), "cef").unwrap();
    }

    #[test]
    fn inspect_classifies_destination() {
        let td = tempdir().unwrap();
        let base = td.path();

        assert_eq!(
            DestinationState::inspect(&base.join("absent")),
            DestinationState::Missing
        );

        let plain = base.join("plain");
        fs::create_dir_all(&plain).unwrap();
        assert_eq!(DestinationState::inspect(&plain), DestinationState::Foreign);

        let repo = base.join("repo");
        fake_checkout(&repo);
        assert_eq!(DestinationState::inspect(&repo), DestinationState::Checkout);
    }

    #[test]
    fn git_file_instead_of_dir_is_foreign() {
        let td = tempdir().unwrap();
        fs::write(td.path().join(".git"), "gitdir: elsewhere").unwrap();
        assert_eq!(
            DestinationState::inspect(td.path()),
            DestinationState::Foreign
        );
    }

    #[test]
    fn fresh_clone_creates_parents_and_clones_into_destination() {
        let td = tempdir().unwrap();
        let dest = td.path().join("a").join("b").join("cef_source");
        let req = SyncRequest::new("9.9.9", "https://example.test/repo.git", &dest).unwrap();
        let runner = FakeRunner::default();

        ensure_repo(&runner, &req).unwrap();

        assert!(dest.parent().unwrap().is_dir());
        let calls = runner.calls.borrow();
        assert_eq!(calls.len(), 1);
        let (argv, cwd) = &calls[0];
        assert_eq!(
            argv,
            &strs(&[
                "git",
                "clone",
                "--branch",
                "cef_9.9.9",
                "--depth",
                "1",
                "https://example.test/repo.git",
                dest.to_str().unwrap(),
            ])
        );
        assert!(cwd.is_none());
    }

    #[test]
    fn existing_checkout_runs_four_commands_in_order() {
        let td = tempdir().unwrap();
        let dest = td.path().join("cef");
        fake_checkout(&dest);
        let req = SyncRequest::new("2.0.0", "https://example.test/repo.git", &dest).unwrap();
        let runner = FakeRunner::default();

        ensure_repo(&runner, &req).unwrap();

        assert_eq!(
            runner.argv(),
            vec![
                strs(&["git", "fetch", "--tags", "https://example.test/repo.git"]),
                strs(&["git", "fetch", "origin", "cef_2.0.0"]),
                strs(&["git", "checkout", "--force", "cef_2.0.0"]),
                strs(&["git", "clean", "-fdx"]),
            ]
        );
        for (_, cwd) in runner.calls.borrow().iter() {
            assert_eq!(cwd.as_deref(), Some(dest.as_path()));
        }
    }

    #[test]
    fn foreign_destination_is_rejected_without_commands() {
        let td = tempdir().unwrap();
        let dest = td.path().join("not-a-repo");
        fs::create_dir_all(&dest).unwrap();
        fs::write(dest.join("keep.txt"), "mine").unwrap();
        let req = SyncRequest::new("1.0.0", "https://example.test/repo.git", &dest).unwrap();
        let runner = FakeRunner::default();

        let err = ensure_repo(&runner, &req).unwrap_err();

        assert!(matches!(err, SyncError::InvalidDestination { ref path } if path == &dest));
        assert!(runner.calls.borrow().is_empty());
        assert_eq!(fs::read_to_string(dest.join("keep.txt")).unwrap(), "mine");
    }

    #[test]
    fn failure_stops_the_update_sequence() {
        let td = tempdir().unwrap();
        let dest = td.path().join("cef");
        fake_checkout(&dest);
        let req = SyncRequest::new("2.0.0", "https://example.test/repo.git", &dest).unwrap();
        let runner = FakeRunner::failing_at(1);

        let err = ensure_repo(&runner, &req).unwrap_err();

        match err {
            SyncError::CommandFailed { command, code, .. } => {
                assert_eq!(command, "git fetch origin cef_2.0.0");
                assert_eq!(code, Some(128));
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert_eq!(runner.calls.borrow().len(), 2);
    }

    #[test]
    fn failed_clone_is_propagated() {
        let td = tempdir().unwrap();
        let dest = td.path().join("cef");
        let req = SyncRequest::new("3.0.0", "https://example.test/repo.git", &dest).unwrap();
        let runner = FakeRunner::failing_at(0);

        let err = ensure_repo(&runner, &req).unwrap_err();
        assert!(matches!(err, SyncError::CommandFailed { .. }));
        assert_eq!(runner.calls.borrow().len(), 1);
    }

    #[test]
    fn rerun_on_converged_checkout_repeats_same_commands() {
        let td = tempdir().unwrap();
        let dest = td.path().join("cef");
        fake_checkout(&dest);
        let req = SyncRequest::new("2.0.0", "https://example.test/repo.git", &dest).unwrap();

        let first = FakeRunner::default();
        ensure_repo(&first, &req).unwrap();
        let second = FakeRunner::default();
        ensure_repo(&second, &req).unwrap();

        assert_eq!(first.argv(), second.argv());
        assert_eq!(fs::read_to_string(dest.join("README.md")).unwrap(), "cef");
    }

    #[test]
    fn relative_destination_without_parent_skips_mkdir() {
        let dest = Path::new("cefsrc-test-nonexistent-checkout");
        let req = SyncRequest::new("1.0", "https://example.test/repo.git", dest).unwrap();
        let runner = FakeRunner::default();

        ensure_repo(&runner, &req).unwrap();
        assert_eq!(
            runner.argv()[0].last().map(String::as_str),
            Some("cefsrc-test-nonexistent-checkout")
        );
    }

    #[test]
    fn clone_command_targets_destination_verbatim() {
        let dest = Path::new("third_party/cef_source");
        let cmd = clone_command("u", "cef_1", dest);
        assert_eq!(cmd.last().unwrap(), dest.as_os_str());
    }
}
