mod error;
mod tag;
mod types;

pub use error::UnknownSchemeError;
pub use tag::Tag;
pub use types::{
    BranchDifference, Change, Commit, Issue, MergeRequest, MergeType, Project, SchemeId,
};
