//! Runtime settings loaded via OrthoConfig.
//!
//! Settings merge CLI flags, `JOBBOARD_*` environment variables, and
//! configuration files in the usual OrthoConfig order.

use std::net::SocketAddr;
use std::path::PathBuf;

use actix_web::cookie::Key;
use color_eyre::eyre::{WrapErr, eyre};
use ortho_config::OrthoConfig;
use serde::Deserialize;
use sha2::{Digest, Sha256};
use tracing::{info, warn};
use zeroize::Zeroize;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
const DEFAULT_SESSION_KEY_FILE: &str = "/var/run/secrets/session_key";

/// Minimum session key material accepted by cookie key derivation.
const MIN_KEY_BYTES: usize = 32;

/// Application settings.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "JOBBOARD")]
pub struct AppSettings {
    /// Socket address the HTTP server binds to.
    pub bind_addr: Option<String>,
    /// Path to the session key file.
    pub session_key_file: Option<PathBuf>,
    /// Permit an ephemeral, generated session key when the key file is
    /// unreadable. Always permitted in debug builds.
    #[ortho_config(default = false)]
    pub allow_ephemeral_key: bool,
    /// Mark session cookies `Secure`.
    #[ortho_config(default = true)]
    pub cookie_secure: bool,
    /// Seed the in-memory store with demonstration associations.
    ///
    /// Association documents are created out-of-band in production; the
    /// seed is that out-of-band step for local runs.
    #[ortho_config(default = true)]
    pub seed_demo_data: bool,
}

impl AppSettings {
    /// Parse the configured bind address, falling back to the default.
    pub fn bind_addr(&self) -> color_eyre::Result<SocketAddr> {
        let raw = self.bind_addr.as_deref().unwrap_or(DEFAULT_BIND_ADDR);
        raw.parse()
            .wrap_err_with(|| format!("invalid bind address: {raw}"))
    }

    /// Return the configured session key path, falling back to the default.
    #[must_use]
    pub fn session_key_file(&self) -> PathBuf {
        self.session_key_file
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_SESSION_KEY_FILE))
    }

    /// Load and derive the session cookie key.
    ///
    /// Logs a SHA-256 fingerprint of the key material so operators can
    /// confirm which key a process runs with, without exposing the key.
    /// Key bytes are zeroized after derivation.
    pub fn session_key(&self) -> color_eyre::Result<Key> {
        let path = self.session_key_file();
        match std::fs::read(&path) {
            Ok(mut bytes) if bytes.len() >= MIN_KEY_BYTES => {
                let fingerprint: String = hex::encode(Sha256::digest(&bytes))
                    .chars()
                    .take(12)
                    .collect();
                info!(path = %path.display(), fingerprint, "session key loaded");
                let key = Key::derive_from(&bytes);
                bytes.zeroize();
                Ok(key)
            }
            Ok(mut bytes) => {
                bytes.zeroize();
                Err(eyre!(
                    "session key at {} is shorter than {MIN_KEY_BYTES} bytes",
                    path.display()
                ))
            }
            Err(error) => {
                if cfg!(debug_assertions) || self.allow_ephemeral_key {
                    warn!(path = %path.display(), %error, "using temporary session key (dev only)");
                    Ok(Key::generate())
                } else {
                    Err(eyre!(
                        "failed to read session key at {}: {error}",
                        path.display()
                    ))
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn settings() -> AppSettings {
        AppSettings {
            bind_addr: None,
            session_key_file: None,
            allow_ephemeral_key: false,
            cookie_secure: true,
            seed_demo_data: true,
        }
    }

    #[rstest]
    fn bind_addr_falls_back_to_default() {
        let addr = settings().bind_addr().expect("default parses");
        assert_eq!(addr.port(), 8080);
    }

    #[rstest]
    fn bind_addr_rejects_garbage() {
        let mut cfg = settings();
        cfg.bind_addr = Some("not-an-address".to_owned());
        assert!(cfg.bind_addr().is_err());
    }

    #[rstest]
    fn session_key_file_falls_back_to_default() {
        assert_eq!(
            settings().session_key_file(),
            PathBuf::from(DEFAULT_SESSION_KEY_FILE)
        );
    }

    #[rstest]
    fn short_key_files_are_rejected() {
        let dir = std::env::temp_dir();
        let path = dir.join("jobboard-short-key-test");
        std::fs::write(&path, b"too short").expect("write key file");

        let mut cfg = settings();
        cfg.session_key_file = Some(path.clone());
        let result = cfg.session_key();
        std::fs::remove_file(&path).ok();
        assert!(result.is_err());
    }

    #[rstest]
    fn long_key_files_derive_a_key() {
        let dir = std::env::temp_dir();
        let path = dir.join("jobboard-long-key-test");
        std::fs::write(&path, [7u8; 64]).expect("write key file");

        let mut cfg = settings();
        cfg.session_key_file = Some(path.clone());
        let result = cfg.session_key();
        std::fs::remove_file(&path).ok();
        assert!(result.is_ok());
    }
}
