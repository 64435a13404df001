/// Product identifier stamped on documents created by kunai.
pub const PRODID: &str = "-//Kunai//Kunai Scheduling Diff//EN";

/// Name of the optional settings file, looked up in the working directory.
pub const CONFIG_FILE_NAME: &str = "kunai.toml";

/// Prefix for environment variables that override settings.
pub const ENV_PREFIX: &str = "KUNAI";
