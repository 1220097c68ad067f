pub mod changes;
pub mod deployment;
pub mod merge;
pub mod overview;
pub mod tagging;
pub mod tracker_sync;
