use rand::Rng;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use subtle::ConstantTimeEq;
use tracing::debug;

/// In-process one-time-passcode store, keyed by email.
///
/// Codes never expire and the map is unbounded; a failed verification
/// leaves the stored code in place so the user can retry, a successful
/// one consumes it.
#[derive(Clone, Default)]
pub struct OtpStore {
    codes: Arc<Mutex<HashMap<String, String>>>,
}

impl OtpStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Generate and store a fresh 6-digit code for `email`, replacing
    /// any previous one. Returns the code.
    pub fn issue(&self, email: &str) -> String {
        let code = format!("{:06}", rand::rng().random_range(0..1_000_000u32));
        self.codes
            .lock()
            .expect("otp store lock poisoned")
            .insert(email.to_string(), code.clone());
        debug!(email, "issued one-time passcode");
        code
    }

    /// Constant-time verify; consumes the stored code on success.
    pub fn verify_and_consume(&self, email: &str, candidate: &str) -> bool {
        let mut codes = self.codes.lock().expect("otp store lock poisoned");
        let Some(stored) = codes.get(email) else {
            return false;
        };
        if bool::from(stored.as_bytes().ct_eq(candidate.as_bytes())) {
            codes.remove(email);
            true
        } else {
            false
        }
    }

    pub fn peek(&self, email: &str) -> Option<String> {
        self.codes
            .lock()
            .expect("otp store lock poisoned")
            .get(email)
            .cloned()
    }

    pub fn contains(&self, email: &str) -> bool {
        self.codes
            .lock()
            .expect("otp store lock poisoned")
            .contains_key(email)
    }
}
