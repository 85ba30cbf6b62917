//! Provider API-key resolution.

use sw_domain::config::AuthConfig;
use sw_domain::error::{Error, Result};

/// Resolve the API key from an [`AuthConfig`].
///
/// Precedence:
/// 1. `key` field (plaintext — warn)
/// 2. `service` + `account` → OS keychain via `keyring`
/// 3. `env` field (reads environment variable)
/// 4. Fallback for keychain mode: env var `{SERVICE}_{ACCOUNT}` uppercased
/// 5. `None` — requests go out unauthenticated
///
/// A fully empty `AuthConfig` is not an error: local dev providers run
/// without auth. A *configured* source that cannot produce a key is an
/// error, since the operator clearly intended requests to be signed.
pub fn resolve_api_key(auth: &AuthConfig) -> Result<Option<String>> {
    // 1. Plaintext key (warn the user)
    if let Some(ref key) = auth.key {
        tracing::warn!(
            "API key loaded from plaintext config field 'key' — \
             prefer 'env' or the keychain fields instead"
        );
        return Ok(Some(key.clone()));
    }

    // 2. OS keychain via service + account
    if let (Some(ref service), Some(ref account)) = (&auth.service, &auth.account) {
        match resolve_from_keychain(service, account) {
            Ok(secret) => return Ok(Some(secret)),
            Err(e) => {
                tracing::warn!(
                    service = %service,
                    account = %account,
                    error = %e,
                    "keychain lookup failed, falling through to env"
                );
            }
        }
    }

    // 3. Env var
    if let Some(ref env_var) = auth.env {
        return match std::env::var(env_var) {
            Ok(val) => Ok(Some(val)),
            Err(_) => Err(Error::Auth(format!(
                "environment variable '{env_var}' not set or not valid UTF-8"
            ))),
        };
    }

    // 4. Headless fallback: {SERVICE}_{ACCOUNT} uppercased
    if let (Some(ref service), Some(ref account)) = (&auth.service, &auth.account) {
        let fallback_var = keychain_fallback_env_name(service, account);
        if let Ok(val) = std::env::var(&fallback_var) {
            tracing::info!(
                env_var = %fallback_var,
                "API key resolved from keychain headless fallback env var"
            );
            return Ok(Some(val));
        }
        return Err(Error::Auth(format!(
            "keychain entry {service}/{account} unavailable and \
             fallback ${fallback_var} not set"
        )));
    }

    // 5. Nothing configured — unauthenticated
    Ok(None)
}

/// Try to read a secret from the OS keychain.
///
/// Uses the `keyring` crate which wraps platform-native credential stores
/// (macOS Keychain, Windows Credential Manager, Linux Secret Service / D-Bus).
/// Returns an error on headless systems where no keychain daemon is available.
pub fn resolve_from_keychain(service: &str, account: &str) -> Result<String> {
    let entry = keyring::Entry::new(service, account)
        .map_err(|e| Error::Auth(format!("keyring entry creation failed: {e}")))?;
    entry
        .get_password()
        .map_err(|e| Error::Auth(format!("keyring get_password failed: {e}")))
}

/// Store a secret in the OS keychain.
pub fn store_in_keychain(service: &str, account: &str, secret: &str) -> Result<()> {
    let entry = keyring::Entry::new(service, account)
        .map_err(|e| Error::Auth(format!("keyring entry creation failed: {e}")))?;
    entry
        .set_password(secret)
        .map_err(|e| Error::Auth(format!("keyring set_password failed: {e}")))
}

/// Build the headless fallback env var name for a keychain service/account.
///
/// Uppercases both parts and replaces hyphens with underscores, then joins
/// with `_`. Example: `("sitewrench", "lab-api-key")` → `"SITEWRENCH_LAB_API_KEY"`.
pub fn keychain_fallback_env_name(service: &str, account: &str) -> String {
    format!(
        "{}_{}",
        service.to_uppercase().replace('-', "_"),
        account.to_uppercase().replace('-', "_"),
    )
}
