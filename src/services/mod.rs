pub mod preferences;

pub use preferences::PreferenceService;
