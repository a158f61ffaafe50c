use std::fmt::Display;
use std::hash::BuildHasherDefault;
use wyhash::WyHash;

pub type NodeId = usize;
pub type VarId = usize;
pub type Level = usize;

pub type HashMap<T, U> = hashbrown::HashMap<T, U, BuildHasherDefault<WyHash>>;
pub type HashSet<T> = hashbrown::HashSet<T, BuildHasherDefault<WyHash>>;

/// Errors reported by manager operations that take a variable index.
///
/// Kernels that only consume handles are infallible; a handle is assumed to
/// be live (the client must hold a reference across `gc` points).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DdError {
    VarOutOfRange { var: VarId, num_vars: usize },
}

impl Display for DdError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::VarOutOfRange { var, num_vars } => {
                write!(f, "variable index {} out of range 1..={}", var, num_vars)
            }
        }
    }
}

impl std::error::Error for DdError {}

pub type Result<T> = std::result::Result<T, DdError>;
