//! Settings for pomsense.
//!
//! Settings are written in TOML. pomsense looks for them in these locations
//! (first match wins):
//!
//! 1. `pomsense.toml` in the workspace root
//! 2. `$XDG_CONFIG_HOME/pomsense/config.toml` (or the platform config dir)
//! 3. Built-in defaults
//!
//! ```toml
//! [diagnostics]
//! conflicts = true
//!
//! [discovery]
//! pattern = "**/pom.xml"
//! exclude = ["**/target/**"]
//!
//! [maven]
//! executable = "mvn"
//! prefer-wrapper = true
//!
//! [scheduler]
//! floor-ms = 350
//! growth-factor = 1.3
//! capacity = 32
//!
//! [edit]
//! indent = "    "
//! eol = "\n"
//! ```

mod error;
mod settings;

pub use error::{ConfigError, Result};
pub use settings::{
	DiagnosticsSettings, DiscoverySettings, EditSettings, MavenSettings, SchedulerSettings,
	Settings, WORKSPACE_FILE_NAME, user_config_path,
};
