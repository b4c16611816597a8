//! RSA key management for JWT signing and verification

use std::fs;
use std::path::{Path, PathBuf};

use jsonwebtoken::crypto;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey};

use crate::errors::KeyError;

const PROBE_MESSAGE: &[u8] = b"tollgate-key-probe";

/// Where the key material came from, for diagnostics only
#[derive(Debug, Clone, PartialEq, Eq)]
enum KeySource {
    Files {
        private_key_path: Option<PathBuf>,
        public_key_path: PathBuf,
    },
    Memory,
}

/// RSA key pair used for RS256 operations
///
/// The private half is optional: a verify-only pair can check tokens but every
/// signing attempt fails. Key material never appears in `Debug` output.
#[derive(Clone)]
pub struct RsaKeyPair {
    /// Private key for signing JWTs
    encoding_key: Option<EncodingKey>,
    /// Public key for verifying JWTs
    decoding_key: DecodingKey,
    source: KeySource,
}

impl std::fmt::Debug for RsaKeyPair {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RsaKeyPair")
            .field("can_sign", &self.can_sign())
            .field("source", &self.source)
            .finish()
    }
}

impl RsaKeyPair {
    /// Loads a key pair from PEM files
    ///
    /// # Arguments
    ///
    /// * `private_key_path` - PEM-encoded RSA private key, PKCS#8 or PKCS#1
    /// * `public_key_path` - PEM-encoded RSA public key (PKIX)
    ///
    /// # Returns
    ///
    /// * `Ok(RsaKeyPair)` - Both keys loaded
    /// * `Err(KeyError::Read)` - A file could not be read
    /// * `Err(KeyError::Format)` - A file is not a usable RSA key
    ///
    /// # Example
    ///
    /// ```no_run
    /// use tg_core::services::token::RsaKeyPair;
    ///
    /// let keys = RsaKeyPair::from_files(
    ///     "config/keys/private.pem",
    ///     "config/keys/public.pem",
    /// ).expect("Failed to load keys");
    /// ```
    pub fn from_files<P: AsRef<Path>, Q: AsRef<Path>>(
        private_key_path: P,
        public_key_path: Q,
    ) -> Result<Self, KeyError> {
        let private_key_path = private_key_path.as_ref().to_path_buf();
        let public_key_path = public_key_path.as_ref().to_path_buf();

        let private_key_pem = read_key_file(&private_key_path)?;
        let public_key_pem = read_key_file(&public_key_path)?;

        let mut keys = Self::from_pem(&private_key_pem, &public_key_pem)?;
        keys.source = KeySource::Files {
            private_key_path: Some(private_key_path),
            public_key_path,
        };
        Ok(keys)
    }

    /// Builds a key pair from PEM bytes (useful for testing or embedded keys)
    pub fn from_pem(private_key_pem: &[u8], public_key_pem: &[u8]) -> Result<Self, KeyError> {
        let encoding_key = EncodingKey::from_rsa_pem(private_key_pem).map_err(|e| KeyError::Format {
            message: format!("private key: {}", e),
        })?;
        let decoding_key = parse_public_key(public_key_pem)?;

        Ok(Self {
            encoding_key: Some(encoding_key),
            decoding_key,
            source: KeySource::Memory,
        })
    }

    /// Loads only the public key; the resulting pair cannot sign
    pub fn verify_only_from_file<P: AsRef<Path>>(public_key_path: P) -> Result<Self, KeyError> {
        let public_key_path = public_key_path.as_ref().to_path_buf();
        let public_key_pem = read_key_file(&public_key_path)?;

        let mut keys = Self::verify_only_from_pem(&public_key_pem)?;
        keys.source = KeySource::Files {
            private_key_path: None,
            public_key_path,
        };
        Ok(keys)
    }

    /// Builds a verify-only pair from PEM bytes
    pub fn verify_only_from_pem(public_key_pem: &[u8]) -> Result<Self, KeyError> {
        Ok(Self {
            encoding_key: None,
            decoding_key: parse_public_key(public_key_pem)?,
            source: KeySource::Memory,
        })
    }

    /// Returns the encoding key, if the private half is loaded
    pub fn encoding_key(&self) -> Option<&EncodingKey> {
        self.encoding_key.as_ref()
    }

    /// Returns the decoding key for verifying JWTs
    pub fn decoding_key(&self) -> &DecodingKey {
        &self.decoding_key
    }

    /// Whether the private half is loaded
    pub fn can_sign(&self) -> bool {
        self.encoding_key.is_some()
    }

    /// Signs and verifies a fixed message to prove the halves belong together
    ///
    /// A verify-only pair passes trivially.
    pub fn probe(&self) -> Result<(), KeyError> {
        let Some(encoding_key) = &self.encoding_key else {
            return Ok(());
        };

        let signature = crypto::sign(PROBE_MESSAGE, encoding_key, Algorithm::RS256).map_err(|e| {
            KeyError::Format {
                message: format!("private key cannot sign: {}", e),
            }
        })?;

        match crypto::verify(&signature, PROBE_MESSAGE, &self.decoding_key, Algorithm::RS256) {
            Ok(true) => Ok(()),
            Ok(false) => Err(KeyError::Format {
                message: "public key does not match private key".to_string(),
            }),
            Err(e) => Err(KeyError::Format {
                message: format!("public key cannot verify: {}", e),
            }),
        }
    }
}

fn read_key_file(path: &Path) -> Result<Vec<u8>, KeyError> {
    fs::read(path).map_err(|e| KeyError::Read {
        path: path.display().to_string(),
        message: e.to_string(),
    })
}

fn parse_public_key(public_key_pem: &[u8]) -> Result<DecodingKey, KeyError> {
    DecodingKey::from_rsa_pem(public_key_pem).map_err(|e| KeyError::Format {
        message: format!("public key: {}", e),
    })
}
