//! Logging setup
//!
//! The library only writes through the `log` facade. Binaries pick the
//! backend; [`init`] wires up `env_logger` the way the demo wants it.

/// Install `env_logger`, honouring `RUST_LOG` and falling back to `default_filter`
///
/// Only the first call installs a logger; later calls do nothing.
pub fn init(default_filter: &str) {
    let env = env_logger::Env::default().default_filter_or(default_filter);
    if env_logger::Builder::from_env(env).try_init().is_err() {
        log::debug!("Logger already installed");
    }
}
