mod notify;
mod tracker;
mod vcs;

pub use notify::Notifier;
pub use tracker::TrackerProvider;
pub use vcs::VcsProvider;
