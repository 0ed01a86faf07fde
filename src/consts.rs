// src/consts.rs
//! Shared constants — store layout, defaults, output schema values

/// Extension of every encrypted entry in a pass/gopass store
pub const GPG_EXTENSION: &str = "gpg";

/// Suffix stripped from bare `<website>.gpg` files
pub const GPG_SUFFIX: &str = ".gpg";

/// Line that opens the YAML metadata block of a gopass entry
pub const METADATA_SEPARATOR: &str = "---";

/// Metadata keys checked for a username, highest precedence first
pub const USERNAME_KEYS: [&str; 4] = ["user", "User", "username", "Username"];

/// Schemes that mark a website label as an absolute URL already
pub const URL_SCHEMES: [&str; 3] = ["http://", "https://", "ftp://"];

/// Scheme prepended to bare host names
pub const DEFAULT_URL_SCHEME: &str = "https://";

/// Default store root, relative to the home directory
pub const DEFAULT_STORE_DIR: &str = "~/.local/share/gopass/stores/root/websites";

/// Default decryption binary
pub const DEFAULT_GPG_BINARY: &str = "/usr/bin/gpg";

/// Default destination of the exported document
pub const DEFAULT_OUTPUT_FILE: &str = "pass.json";

/// Environment variable pointing at a TOML config file
pub const CONFIG_ENV_VAR: &str = "PASS2BW_CONFIG";

/// Bitwarden cipher type for login items
pub const BITWARDEN_LOGIN_TYPE: u8 = 1;

/// Indentation used by the JSON serializer
pub const JSON_INDENT: &[u8] = b"    ";
