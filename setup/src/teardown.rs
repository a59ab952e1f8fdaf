//! `teardown`: confirm, then delete the teardown target.

use std::fs;
use std::io::{BufRead, ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::thread;

use anyhow::{Context, Result, anyhow};
use tracing::{debug, info, instrument};

use crate::core::confirm::TeardownState;
use crate::io::environment::ensure_not_active;
use crate::io::prompt::ask;

pub const DONE_MESSAGE: &str = "Done";
pub const NOTHING_DONE_MESSAGE: &str = "Nothing done";

/// Prompt on `input`/`output` and delete `target` iff the answer is `y`.
///
/// Deletion runs on a background thread and is joined before `Done` is
/// printed. Returns the final state (`Done` or `Aborted`).
#[instrument(skip_all, fields(target = %target.display()))]
pub fn run_teardown<R: BufRead, W: Write>(
    target: &Path,
    active_prefix: Option<&Path>,
    input: &mut R,
    output: &mut W,
) -> Result<TeardownState> {
    ensure_not_active(target, active_prefix)?;

    let question = format!("Delete {}? (y/n)", target.display());
    let answer = ask(input, output, &question)?;
    let state = TeardownState::AwaitingConfirmation.answer(answer.as_deref());
    debug!(?state, "confirmation answered");

    match state {
        TeardownState::Deleting => {
            let handle = delete_in_background(target.to_path_buf());
            join_deletion(handle)?;
            info!("target deleted");
            writeln!(output, "{DONE_MESSAGE}").context("write completion")?;
            Ok(state.deleted())
        }
        _ => {
            writeln!(output, "{NOTHING_DONE_MESSAGE}").context("write abort notice")?;
            Ok(state)
        }
    }
}

fn delete_in_background(target: PathBuf) -> thread::JoinHandle<Result<()>> {
    thread::spawn(move || remove_path(&target))
}

fn join_deletion(handle: thread::JoinHandle<Result<()>>) -> Result<()> {
    match handle.join() {
        Ok(result) => result,
        Err(_) => Err(anyhow!("deletion thread panicked")),
    }
}

/// `rm -rf` semantics: a missing path is not an error.
fn remove_path(path: &Path) -> Result<()> {
    let meta = match fs::symlink_metadata(path) {
        Ok(meta) => meta,
        Err(err) if err.kind() == ErrorKind::NotFound => {
            debug!(path = %path.display(), "nothing to delete");
            return Ok(());
        }
        Err(err) => return Err(err).with_context(|| format!("stat {}", path.display())),
    };
    if meta.is_dir() {
        fs::remove_dir_all(path).with_context(|| format!("remove {}", path.display()))
    } else {
        fs::remove_file(path).with_context(|| format!("remove {}", path.display()))
    }
}
