pub mod load;
pub mod save;
pub mod types;

pub use load::{ConfigError, load_settings_from, settings_path};
pub use save::{add_recent_path, save_settings, save_settings_to};
pub use types::{Config, Language, MAX_RECENT_PATHS, UserSettings};
