//! Rename engine.
//!
//! Expands the request's source glob lazily, derives each destination by
//! regex substitution on the file name, resolves collisions and hands the
//! move to a `PathMover`. One candidate is finished (moved and reported)
//! before the next glob entry is read.

use anyhow::anyhow;
use glob::{MatchOptions, Paths};
use std::path::{Component, Path, PathBuf};
use tracing::{debug, info, trace, warn};

use crate::errors::XmvError;
use crate::fs_ops::{PathMover, ResolvedAction, resolve_collision};
use crate::notify::Notifier;
use crate::request::RenameRequest;
use crate::shutdown;

/// A matched path and its file name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    pub path: PathBuf,
    pub filename: String,
}

impl Candidate {
    pub fn from_path(path: PathBuf) -> Result<Self, anyhow::Error> {
        let filename = match path.file_name() {
            Some(name) => name
                .to_str()
                .ok_or_else(|| XmvError::NonUtf8Name(path.clone()))?
                .to_owned(),
            None => return Err(anyhow!("matched path has no file name: {}", path.display())),
        };
        Ok(Self { path, filename })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// The destination exists and the user declined to overwrite it.
    OverwriteDeclined,
}

#[derive(Debug)]
pub enum MoveOutcome {
    Moved {
        source: PathBuf,
        destination: PathBuf,
    },
    /// Dry run: the move that would have happened.
    Planned {
        source: PathBuf,
        destination: PathBuf,
    },
    Skipped {
        source: PathBuf,
        destination: PathBuf,
        reason: SkipReason,
    },
    Failed {
        source: PathBuf,
        error: anyhow::Error,
    },
}

impl MoveOutcome {
    pub fn source(&self) -> &Path {
        match self {
            MoveOutcome::Moved { source, .. }
            | MoveOutcome::Planned { source, .. }
            | MoveOutcome::Skipped { source, .. }
            | MoveOutcome::Failed { source, .. } => source,
        }
    }

    pub fn is_moved(&self) -> bool {
        matches!(self, MoveOutcome::Moved { .. })
    }

    pub fn is_planned(&self) -> bool {
        matches!(self, MoveOutcome::Planned { .. })
    }
}

/// Outcome counters for a finished batch.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Summary {
    pub moved: usize,
    pub planned: usize,
    pub skipped: usize,
    pub failed: usize,
}

impl Summary {
    pub fn record(&mut self, outcome: &MoveOutcome) {
        match outcome {
            MoveOutcome::Moved { .. } => self.moved += 1,
            MoveOutcome::Planned { .. } => self.planned += 1,
            MoveOutcome::Skipped { .. } => self.skipped += 1,
            MoveOutcome::Failed { .. } => self.failed += 1,
        }
    }
}

/// Wildcards never cross `/`. The leading-dot rule is applied by
/// `Outcomes` on the raw `OsStr` names, since glob's own check needs UTF-8.
const GLOB_OPTIONS: MatchOptions = MatchOptions {
    case_sensitive: true,
    require_literal_separator: true,
    require_literal_leading_dot: false,
};

/// For each trailing component of `source_glob`, last first: whether that
/// component starts with a literal dot. Stops at `**`, which spans any depth.
fn dot_rules(source_glob: &str) -> Vec<bool> {
    let mut rules = Vec::new();
    for component in Path::new(source_glob).components().rev() {
        let Component::Normal(part) = component else {
            break;
        };
        let part = part.as_encoded_bytes();
        if part == b"**" {
            break;
        }
        rules.push(part.first() == Some(&b'.'));
    }
    rules
}

/// A dot-file matched by a component that did not ask for one.
fn is_unwanted_hidden(path: &Path, rules: &[bool]) -> bool {
    path.components()
        .rev()
        .zip(rules)
        .any(|(component, &allows_dot)| match component {
            Component::Normal(name) => !allows_dot && name.as_encoded_bytes().first() == Some(&b'.'),
            _ => false,
        })
}

/// `dir/.` or `dir/..`, which glob yields for patterns like `.*`.
fn is_dot_entry(path: &Path) -> bool {
    let bytes = path.as_os_str().as_encoded_bytes();
    let last = bytes
        .rsplit(|b| std::path::is_separator(char::from(*b)))
        .next()
        .unwrap_or(bytes);
    last == b"." || last == b".."
}

pub struct RenameEngine<M, N> {
    mover: M,
    notifier: N,
    destination_root: PathBuf,
}

impl<M: PathMover, N: Notifier> RenameEngine<M, N> {
    /// Destinations are resolved relative to the working directory.
    pub fn new(mover: M, notifier: N) -> Self {
        Self {
            mover,
            notifier,
            destination_root: PathBuf::new(),
        }
    }

    /// Resolve relative destinations against `root` instead of the working directory.
    pub fn with_destination_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.destination_root = root.into();
        self
    }

    pub fn destination_root(&self) -> &Path {
        &self.destination_root
    }

    pub fn into_parts(self) -> (M, N) {
        (self.mover, self.notifier)
    }

    /// Start the batch. Outcomes are produced as the iterator is driven;
    /// file names left unchanged by the substitution produce no outcome.
    pub fn run<'a>(&'a mut self, request: &'a RenameRequest) -> Result<Outcomes<'a, M, N>, XmvError> {
        let paths = glob::glob_with(request.source_glob(), GLOB_OPTIONS).map_err(|e| {
            XmvError::InvalidGlob {
                glob: request.source_glob().to_string(),
                reason: e.to_string(),
            }
        })?;
        debug!(
            glob = request.source_glob(),
            pattern = request.pattern(),
            replacement = request.replacement(),
            policy = %request.policy(),
            "Starting batch"
        );
        Ok(Outcomes {
            engine: self,
            request,
            paths,
            dot_rules: dot_rules(request.source_glob()),
            stopped: false,
        })
    }

    /// Drive a whole batch and collect every outcome.
    pub fn run_to_end(&mut self, request: &RenameRequest) -> Result<Vec<MoveOutcome>, XmvError> {
        Ok(self.run(request)?.collect())
    }

    /// Process one matched path. `None` when the substitution changes nothing.
    pub fn process(&mut self, request: &RenameRequest, path: PathBuf) -> Option<MoveOutcome> {
        let candidate = match Candidate::from_path(path.clone()) {
            Ok(c) => c,
            Err(error) => {
                debug!(path = %path.display(), error = %error, "Cannot process matched path");
                return Some(MoveOutcome::Failed { source: path, error });
            }
        };

        let replaced = request.substitution().apply(&candidate.filename).into_owned();
        if replaced == candidate.filename {
            trace!(file = %candidate.filename, "Name unchanged; skipping");
            return None;
        }
        if replaced.is_empty() {
            let error = anyhow!("substitution produced an empty name for '{}'", candidate.filename);
            debug!(path = %candidate.path.display(), "Empty destination");
            return Some(MoveOutcome::Failed {
                source: candidate.path,
                error,
            });
        }

        let destination = self.destination_root.join(&replaced);
        let target = match resolve_collision(
            &candidate.path,
            &candidate.filename,
            &destination,
            request.policy(),
            &mut self.notifier,
        ) {
            ResolvedAction::ProceedAt(p) => p,
            ResolvedAction::Abort => {
                info!(src = %candidate.path.display(), dest = %destination.display(), "Left in place");
                return Some(MoveOutcome::Skipped {
                    source: candidate.path,
                    destination,
                    reason: SkipReason::OverwriteDeclined,
                });
            }
        };

        match self.mover.move_path(&candidate.path, &target) {
            Ok(()) if self.mover.is_dry_run() => Some(MoveOutcome::Planned {
                source: candidate.path,
                destination: target,
            }),
            Ok(()) => {
                info!(src = %candidate.path.display(), dest = %target.display(), "Moved");
                if request.verbose() {
                    self.notifier.notify_moved(&candidate.filename, &target);
                }
                Some(MoveOutcome::Moved {
                    source: candidate.path,
                    destination: target,
                })
            }
            Err(error) => {
                debug!(src = %candidate.path.display(), dest = %target.display(), error = %error, "Move failed");
                Some(MoveOutcome::Failed {
                    source: candidate.path,
                    error,
                })
            }
        }
    }
}

/// Lazy sequence of outcomes for one batch.
///
/// Stops early, between candidates, once a shutdown was requested.
pub struct Outcomes<'a, M, N> {
    engine: &'a mut RenameEngine<M, N>,
    request: &'a RenameRequest,
    paths: Paths,
    dot_rules: Vec<bool>,
    stopped: bool,
}

impl<M: PathMover, N: Notifier> Iterator for Outcomes<'_, M, N> {
    type Item = MoveOutcome;

    fn next(&mut self) -> Option<MoveOutcome> {
        loop {
            if self.stopped {
                return None;
            }
            if shutdown::is_requested() {
                warn!(code = XmvError::Interrupted.code(), "Interrupted; remaining files left untouched");
                self.stopped = true;
                return None;
            }

            match self.paths.next()? {
                Ok(path) if is_dot_entry(&path) => {
                    trace!(path = %path.display(), "Ignoring directory self/parent entry");
                }
                Ok(path) if is_unwanted_hidden(&path, &self.dot_rules) => {
                    trace!(path = %path.display(), "Hidden entry needs an explicit leading dot");
                }
                Ok(path) => {
                    if let Some(outcome) = self.engine.process(self.request, path) {
                        return Some(outcome);
                    }
                }
                Err(e) => {
                    let source = e.path().to_path_buf();
                    debug!(path = %source.display(), error = %e, "Cannot read glob entry");
                    return Some(MoveOutcome::Failed {
                        source,
                        error: anyhow::Error::new(e),
                    });
                }
            }
        }
    }
}
