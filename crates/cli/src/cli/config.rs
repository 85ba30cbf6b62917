//! `sitewrench config` — configuration utilities.

use sw_domain::config::{Config, ConfigSeverity};
use sw_store::auth;

/// Parse and validate the config, printing any issues.
///
/// Returns `true` when no errors were found (warnings alone still pass).
pub fn validate(config: &Config, config_path: &str) -> bool {
    let issues = config.validate();

    if issues.is_empty() {
        println!("Config OK ({config_path})");
        return true;
    }

    let error_count = issues
        .iter()
        .filter(|e| e.severity == ConfigSeverity::Error)
        .count();
    let warning_count = issues.len() - error_count;

    for issue in &issues {
        println!("{issue}");
    }

    println!(
        "\n{} error(s), {} warning(s) in {config_path}",
        error_count, warning_count,
    );

    error_count == 0
}

/// Dump the resolved config (with all defaults filled in) as TOML.
pub fn show(config: &Config) {
    match toml::to_string_pretty(config) {
        Ok(output) => print!("{output}"),
        Err(e) => {
            eprintln!("Failed to serialize config: {e}");
            std::process::exit(1);
        }
    }
}

/// Prompt for the provider API key and store it in the OS keychain.
///
/// Requires `service` and `account` under `[provider.auth]` so the key
/// lands where `resolve_api_key` will look for it.
pub fn set_secret(config: &Config) -> anyhow::Result<()> {
    let (service, account) = keychain_target(config)?;

    let secret = rpassword::prompt_password_stderr(&format!("API key for {service}/{account}: "))
        .map_err(|e| anyhow::anyhow!("reading key from terminal: {e}"))?;
    let secret = secret.trim();
    if secret.is_empty() {
        anyhow::bail!("empty key, nothing stored");
    }

    auth::store_in_keychain(&service, &account, secret)?;
    eprintln!("Stored. Run `sitewrench doctor` to confirm it resolves.");
    Ok(())
}

/// Read the API key back from the OS keychain and print a masked form.
pub fn get_secret(config: &Config) -> anyhow::Result<()> {
    let (service, account) = keychain_target(config)?;
    let secret = auth::resolve_from_keychain(&service, &account)?;
    println!("{service}/{account}: {}", mask(&secret));
    Ok(())
}

fn keychain_target(config: &Config) -> anyhow::Result<(String, String)> {
    let auth = &config.provider.auth;
    match (&auth.service, &auth.account) {
        (Some(service), Some(account)) => Ok((service.clone(), account.clone())),
        _ => anyhow::bail!(
            "no keychain target: set both `service` and `account` under [provider.auth]"
        ),
    }
}

/// Enough of a secret to recognize it without disclosing it.
fn mask(secret: &str) -> String {
    let length = secret.chars().count();
    if length <= 8 {
        return "*".repeat(length);
    }
    let head: String = secret.chars().take(4).collect();
    format!("{head}... ({length} chars)")
}
