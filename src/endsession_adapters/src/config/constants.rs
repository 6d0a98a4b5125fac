pub mod env {
    pub const ENV_PREFIX: &str = "ENDSESSION";
    pub const ENV_SEPARATOR: &str = "__";
}

/// Optional settings file, resolved relative to the working directory.
pub const CONFIG_FILE: &str = "config/base";

pub mod prod {
    pub const APP_ADDRESS: &str = "0.0.0.0:3000";
    pub const LOGOUT_PATH: &str = "/connect/logout";
    pub const MAX_FORM_BODY_BYTES: usize = 64 * 1024;
}

pub mod test {
    pub const APP_ADDRESS: &str = "127.0.0.1:0";
}
