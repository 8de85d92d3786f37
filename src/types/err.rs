//! Error types used in the library.
//!
//! - Errors here are *recoverable* at some boundary, e.g. a deadline expiring mid-evaluation is reported to the planner, which may report partial results.
//! - Violations of structural invariants (an empty landmark cut, a disjunctive precondition handed to a relaxation heuristic, etc.) are not errors in this sense.
//!   Those indicate a defect upstream, are logged with the values involved, and abort via a panic.
//!
//! Throughout the library `err::{self}` is used to prefix use of the types with `err::`.

use std::time::Duration;

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum ErrorKind {
    AtomDB(AtomDBError),
    Config(ConfigError),
    Deadline(DeadlineError),
    Dump(DumpError),
    Heuristic(HeuristicError),
    Parse(ParseError),
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::AtomDB(e) => write!(f, "atom database: {e:?}"),
            Self::Config(e) => write!(f, "configuration: {e:?}"),
            Self::Deadline(e) => write!(f, "{e}"),
            Self::Dump(e) => write!(f, "{e}"),
            Self::Heuristic(e) => write!(f, "heuristic: {e:?}"),
            Self::Parse(e) => write!(f, "parse: {e:?}"),
        }
    }
}

impl std::error::Error for ErrorKind {}

/// Errors when extending the atom universe.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum AtomDBError {
    /// There are no more fresh atoms, as the pair of codes for a fresh atom would exceed [ATOM_MAX](crate::structures::atom::ATOM_MAX).
    AtomsExhausted,

    /// Some state has been created, and so the width of a state is fixed.
    LayoutFixed,

    /// An atom with the given name already exists.
    Duplicate(String),
}

impl From<AtomDBError> for ErrorKind {
    fn from(e: AtomDBError) -> Self {
        ErrorKind::AtomDB(e)
    }
}

/// Errors when revising a configuration.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ConfigError {
    /// The value is outside the bounds of the option.
    OutOfBounds,
}

impl From<ConfigError> for ErrorKind {
    fn from(e: ConfigError) -> Self {
        ErrorKind::Config(e)
    }
}

/// An installed [deadline](crate::generic::deadline) reported it was over.
///
/// The explanation is supplied by the deadline, and elapsed is the resource spent since the deadline was created.
/// Together, these allow a caller to decide whether to retry with a larger budget.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct DeadlineError {
    pub explanation: String,
    pub elapsed: Duration,
}

impl std::fmt::Display for DeadlineError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "deadline reached after {:.3}s: {}",
            self.elapsed.as_secs_f64(),
            self.explanation
        )
    }
}

impl From<DeadlineError> for ErrorKind {
    fn from(e: DeadlineError) -> Self {
        ErrorKind::Deadline(e)
    }
}

/// Errors when writing a debug dump of a cache.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum DumpError {
    /// The destination could not be opened.
    Open {
        path: String,
        kind: std::io::ErrorKind,
    },

    /// Writing to the destination failed part way.
    Write(std::io::ErrorKind),
}

impl std::fmt::Display for DumpError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Open { path, kind } => write!(f, "unable to open '{path}' for the dump: {kind}"),
            Self::Write(kind) => write!(f, "failed to write the dump: {kind}"),
        }
    }
}

impl From<DumpError> for ErrorKind {
    fn from(e: DumpError) -> Self {
        ErrorKind::Dump(e)
    }
}

/// Errors when building a heuristic.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum HeuristicError {
    /// No heuristic is known by the given name.
    UnknownName(String),
}

impl From<HeuristicError> for ErrorKind {
    fn from(e: HeuristicError) -> Self {
        ErrorKind::Heuristic(e)
    }
}

/// Errors when reading a state from a string.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum ParseError {
    /// No atom is known by the given name or code.
    UnknownAtom(String),

    /// An empty string, where some non-empty string was required.
    Empty,
}

impl From<ParseError> for ErrorKind {
    fn from(e: ParseError) -> Self {
        ErrorKind::Parse(e)
    }
}
