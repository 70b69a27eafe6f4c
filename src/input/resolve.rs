use std::path::{Path, PathBuf};

use anyhow::Context as _;
use globset::{Glob, GlobMatcher};

use crate::foundation::error::{TopoError, TopoResult};

/// Glob for neighbours snapshots.
pub const NEIGHBOURS_PATTERN: &str = "neighbours*.dot";
/// Glob for connections snapshots.
pub const CONNECTIONS_PATTERN: &str = "connections*.dot";
/// Glob for propagation hop graphs.
pub const HOP_PATTERN: &str = "hop*.dot";
/// Fixed starting graph of a propagation sequence.
pub const PROPAGATION_REFERENCE: &str = "neighbours-000.dot";

/// Producer-side name of the `n`th neighbours snapshot.
pub fn neighbours_file_name(n: usize) -> String {
    format!("neighbours-{n:03}.dot")
}

/// Producer-side name of the `n`th connections snapshot.
pub fn connections_file_name(n: usize) -> String {
    format!("connections-{n:03}.dot")
}

/// Producer-side name of the `n`th hop graph.
pub fn hop_file_name(n: usize) -> String {
    format!("hop-{n:03}.dot")
}

/// Which snapshot families a dual-mode run draws.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PlotSelection {
    /// Draw `connections*` snapshots.
    pub connections: bool,
    /// Draw `neighbours*` snapshots.
    pub neighbours: bool,
}

/// Resolved dual-mode inputs. Lists are empty for families that were not requested, and
/// equal in length when both were.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DualInputs {
    /// Sorted neighbours files.
    pub neighbours: Vec<PathBuf>,
    /// Sorted connections files.
    pub connections: Vec<PathBuf>,
}

impl DualInputs {
    /// Number of timesteps to render.
    pub fn len(&self) -> usize {
        self.neighbours.len().max(self.connections.len())
    }

    /// Whether there is nothing to render.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// File the layout is computed from: the first neighbours file when neighbours are
    /// drawn, otherwise the first connections file.
    pub fn reference(&self) -> Option<&Path> {
        self.neighbours
            .first()
            .or_else(|| self.connections.first())
            .map(PathBuf::as_path)
    }
}

/// Resolved propagation-mode inputs.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PropagationInputs {
    /// The step-0 neighbours graph drawn as background.
    pub start: PathBuf,
    /// Sorted hop graphs.
    pub hops: Vec<PathBuf>,
}

/// Discover neighbours and/or connections snapshots in `dir`.
///
/// The selection is checked before touching the filesystem. Pairing of the two families is
/// purely positional after each list is sorted on its own.
pub fn resolve_dual(dir: &Path, selection: PlotSelection) -> TopoResult<DualInputs> {
    if !selection.connections && !selection.neighbours {
        return Err(TopoError::NoGraphTypeSelected);
    }

    let mut inputs = DualInputs::default();
    if selection.neighbours {
        inputs.neighbours = require_matches(dir, NEIGHBOURS_PATTERN)?;
    }
    if selection.connections {
        inputs.connections = require_matches(dir, CONNECTIONS_PATTERN)?;
    }

    if selection.neighbours
        && selection.connections
        && inputs.neighbours.len() != inputs.connections.len()
    {
        return Err(TopoError::CountMismatch {
            neighbours: inputs.neighbours.len(),
            connections: inputs.connections.len(),
        });
    }

    tracing::debug!(
        dir = %dir.display(),
        neighbours = inputs.neighbours.len(),
        connections = inputs.connections.len(),
        "resolved dual inputs"
    );
    Ok(inputs)
}

/// Discover the starting graph and hop graphs of a propagation sequence in `dir`.
pub fn resolve_propagation(dir: &Path) -> TopoResult<PropagationInputs> {
    let start = dir.join(PROPAGATION_REFERENCE);
    if !start.is_file() {
        return Err(TopoError::MissingReference(start));
    }
    let hops = require_matches(dir, HOP_PATTERN)?;

    tracing::debug!(dir = %dir.display(), hops = hops.len(), "resolved propagation inputs");
    Ok(PropagationInputs { start, hops })
}

fn require_matches(dir: &Path, pattern: &str) -> TopoResult<Vec<PathBuf>> {
    let found = list_matching(dir, pattern)?;
    if found.is_empty() {
        return Err(TopoError::NoInputFiles {
            dir: dir.to_path_buf(),
            pattern: pattern.to_owned(),
        });
    }
    Ok(found)
}

/// Regular files directly inside `dir` whose names match `pattern`, sorted by file name.
pub fn list_matching(dir: &Path, pattern: &str) -> TopoResult<Vec<PathBuf>> {
    let matcher: GlobMatcher = Glob::new(pattern)
        .with_context(|| format!("invalid glob pattern '{pattern}'"))?
        .compile_matcher();

    let rd = std::fs::read_dir(dir)
        .with_context(|| format!("read input directory '{}'", dir.display()))?;

    let mut out = Vec::new();
    for entry in rd {
        let entry = entry.with_context(|| format!("list '{}'", dir.display()))?;
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        let Some(name) = path.file_name() else {
            continue;
        };
        if matcher.is_match(Path::new(name)) {
            out.push(path);
        }
    }
    out.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    Ok(out)
}

#[cfg(test)]
#[path = "../../tests/unit/input/resolve.rs"]
mod tests;
