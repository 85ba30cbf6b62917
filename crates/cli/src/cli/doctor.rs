//! `sitewrench doctor` — environment diagnostics.

use sw_domain::config::ConfigSeverity;
use sw_store::auth;

use crate::context::CliContext;

/// Run all diagnostic checks and print a summary.
///
/// Returns `Ok(true)` when every check passes, `Ok(false)` when at least
/// one check failed.
pub async fn run(ctx: &CliContext) -> anyhow::Result<bool> {
    println!("sitewrench doctor");
    println!("=================\n");

    let mut all_passed = true;

    // 1. Config file
    check_config_file(&ctx.config_path, &mut all_passed);

    // 2. Config validation
    check_config_validation(ctx, &mut all_passed);

    // 3. Credentials
    check_credentials(ctx, &mut all_passed);

    // 4. Provider connectivity and site visibility
    check_provider(ctx, &mut all_passed).await;

    // Summary
    println!();
    if all_passed {
        println!("All checks passed.");
    } else {
        println!("Some checks failed. Review the output above.");
    }

    Ok(all_passed)
}

// ── Individual checks ─────────────────────────────────────────────────

fn check_config_file(config_path: &str, all_passed: &mut bool) {
    let exists = std::path::Path::new(config_path).exists();
    print_check(
        "Config file exists",
        exists,
        if exists {
            config_path.to_owned()
        } else {
            format!("{config_path} not found (using defaults)")
        },
    );
    if !exists {
        *all_passed = false;
    }
}

fn check_config_validation(ctx: &CliContext, all_passed: &mut bool) {
    let issues = ctx.config.validate();
    let error_count = issues
        .iter()
        .filter(|e| e.severity == ConfigSeverity::Error)
        .count();

    if issues.is_empty() {
        print_check("Config validation", true, "no issues".into());
    } else {
        print_check(
            "Config validation",
            error_count == 0,
            format!("{} issue(s) ({} error(s))", issues.len(), error_count),
        );
        for issue in &issues {
            println!("      {issue}");
        }
        if error_count > 0 {
            *all_passed = false;
        }
    }
}

fn check_credentials(ctx: &CliContext, all_passed: &mut bool) {
    match auth::resolve_api_key(&ctx.config.provider.auth) {
        Ok(Some(_)) => print_check("API key resolves", true, "configured".into()),
        Ok(None) => print_check(
            "API key resolves",
            true,
            "none configured (unauthenticated)".into(),
        ),
        Err(e) => {
            print_check("API key resolves", false, e.to_string());
            *all_passed = false;
        }
    }
}

async fn check_provider(ctx: &CliContext, all_passed: &mut bool) {
    let url = &ctx.config.provider.base_url;

    let store = match ctx.store() {
        Ok(store) => store,
        Err(e) => {
            print_check("Provider reachable", false, format!("{url} ({e})"));
            print_check("Site visible", false, "skipped".into());
            *all_passed = false;
            return;
        }
    };

    let reachable = store.ping().await.is_ok();
    print_check(
        "Provider reachable",
        reachable,
        if reachable {
            url.clone()
        } else {
            format!("{url} (unreachable)")
        },
    );
    if !reachable {
        print_check("Site visible", false, "skipped".into());
        *all_passed = false;
        return;
    }

    let site = &ctx.config.provider.site;
    match sw_objects::sites::get_site(store.as_ref(), site).await {
        Ok(view) => print_check(
            "Site visible",
            true,
            format!(
                "{} ({})",
                view.site_code,
                view.site_name.as_deref().unwrap_or("unnamed"),
            ),
        ),
        Err(e) => {
            print_check("Site visible", false, format!("{site}: {e}"));
            *all_passed = false;
        }
    }
}

// ── Formatting helper ─────────────────────────────────────────────────

fn print_check(name: &str, passed: bool, detail: String) {
    let status = if passed { "PASS" } else { "FAIL" };
    println!("  [{status}] {name}: {detail}");
}
