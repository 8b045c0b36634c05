//! Argon2id password hashing, verification, and rehash detection.
//!
//! The hashed material is the password followed by the account's `created_at`
//! (decimal seconds), so a stored hash only verifies together with the
//! creation time of the account it belongs to. Hashes use the PHC string
//! format, which embeds algorithm, version, cost parameters and salt.

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::{Algorithm, Argon2, Params, Version};
use launchpad_core::types::EpochSecs;

/// Cost parameters for newly produced hashes.
#[derive(Debug, Clone)]
pub struct HasherConfig {
    /// Memory cost in KiB (default: 19456).
    pub memory_kib: u32,
    /// Number of passes (default: 2).
    pub iterations: u32,
    /// Degree of parallelism (default: 1).
    pub parallelism: u32,
}

impl Default for HasherConfig {
    fn default() -> Self {
        Self {
            memory_kib: Params::DEFAULT_M_COST,
            iterations: Params::DEFAULT_T_COST,
            parallelism: Params::DEFAULT_P_COST,
        }
    }
}

impl HasherConfig {
    /// Load hashing cost parameters from environment variables.
    ///
    /// | Env Var              | Default |
    /// |----------------------|---------|
    /// | `ARGON2_MEMORY_KIB`  | `19456` |
    /// | `ARGON2_ITERATIONS`  | `2`     |
    /// | `ARGON2_PARALLELISM` | `1`     |
    ///
    /// # Panics
    ///
    /// Panics if a variable is set but is not a valid `u32`.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            memory_kib: env_u32("ARGON2_MEMORY_KIB", defaults.memory_kib),
            iterations: env_u32("ARGON2_ITERATIONS", defaults.iterations),
            parallelism: env_u32("ARGON2_PARALLELISM", defaults.parallelism),
        }
    }
}

fn env_u32(key: &str, default: u32) -> u32 {
    match std::env::var(key) {
        Ok(raw) => raw
            .parse()
            .unwrap_or_else(|_| panic!("{key} must be a valid u32")),
        Err(_) => default,
    }
}

/// Hashes and verifies account passwords under the configured Argon2id parameters.
pub struct CredentialHasher {
    argon2: Argon2<'static>,
    /// Hash verified against when a login names an unknown account, so that
    /// path costs the same as a wrong password.
    decoy_hash: String,
}

impl CredentialHasher {
    /// Build a hasher from cost parameters.
    ///
    /// Fails if the parameters are outside what Argon2 accepts.
    pub fn new(config: &HasherConfig) -> Result<Self, argon2::password_hash::Error> {
        let params = Params::new(
            config.memory_kib,
            config.iterations,
            config.parallelism,
            None,
        )?;
        let argon2 = Argon2::new(Algorithm::Argon2id, Version::V0x13, params);
        let salt = SaltString::generate(&mut OsRng);
        let decoy_hash = argon2
            .hash_password(b"decoy-password0", &salt)?
            .to_string();
        Ok(Self { argon2, decoy_hash })
    }

    /// Hash `password` bound to `created_at`.
    pub fn hash(
        &self,
        password: &str,
        created_at: EpochSecs,
    ) -> Result<String, argon2::password_hash::Error> {
        let salt = SaltString::generate(&mut OsRng);
        let hash = self
            .argon2
            .hash_password(bound_input(password, created_at).as_bytes(), &salt)?;
        Ok(hash.to_string())
    }

    /// Check `password` and `created_at` against a stored hash.
    ///
    /// Malformed hashes and mismatches both yield `false`; this never errors.
    pub fn verify(&self, stored_hash: &str, password: &str, created_at: EpochSecs) -> bool {
        let Ok(parsed) = PasswordHash::new(stored_hash) else {
            return false;
        };
        self.argon2
            .verify_password(bound_input(password, created_at).as_bytes(), &parsed)
            .is_ok()
    }

    /// Run one verification against the decoy hash and discard the result.
    pub fn verify_decoy(&self, password: &str) {
        let _ = self.verify(&self.decoy_hash, password, 0);
    }

    /// True if `stored_hash` was not produced under the current algorithm,
    /// version, and cost parameters.
    pub fn needs_rehash(&self, stored_hash: &str) -> bool {
        let Ok(parsed) = PasswordHash::new(stored_hash) else {
            return true;
        };
        if parsed.algorithm != Algorithm::Argon2id.ident() {
            return true;
        }
        if parsed.version != Some(Version::V0x13 as u32) {
            return true;
        }
        let Ok(params) = Params::try_from(&parsed) else {
            return true;
        };
        let current = self.argon2.params();
        params.m_cost() != current.m_cost()
            || params.t_cost() != current.t_cost()
            || params.p_cost() != current.p_cost()
    }
}

fn bound_input(password: &str, created_at: EpochSecs) -> String {
    format!("{password}{created_at}")
}
