//! Fixed names used to locate configuration

pub const APP_DIR: &str = "verigate";
pub const CONFIG_FILE: &str = "config.toml";

pub const ENV_OUTPUT: &str = "VERIGATE_OUTPUT";
pub const ENV_COLOR: &str = "VERIGATE_COLOR";
pub const ENV_LOG_CAPACITY: &str = "VERIGATE_LOG_CAPACITY";
pub const ENV_FINGERPRINT: &str = "VERIGATE_FINGERPRINT";
