// Termux Bridge Infrastructure - System Adapters
// Implements: IntentSubmitter, HostProbe

pub mod am_submitter;
pub mod constants;
pub mod package_probe;

pub use am_submitter::AmIntentSubmitter;
pub use package_probe::PackageManagerProbe;
