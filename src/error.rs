use thiserror::Error;

use crate::model::roles::ROLE_COUNT;

/// Fatal conditions that abort an optimization call.
#[derive(Debug, Error, PartialEq)]
pub enum EngineError {
    #[error(
        "insufficient candidates: need at least {required} distinct players, got {usable} usable of {supplied} supplied"
    )]
    InsufficientCandidates {
        required: usize,
        supplied: usize,
        usable: usize,
    },
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

impl EngineError {
    pub fn insufficient(supplied: usize, usable: usize) -> Self {
        EngineError::InsufficientCandidates {
            required: ROLE_COUNT,
            supplied,
            usable,
        }
    }
}

pub type EngineResult<T> = Result<T, EngineError>;
