//! Config resolution: the file is the base layer, command-line flags
//! override it, and a missing file falls back to defaults.

use clap::Parser;

use sw_cli::cli::Cli;
use sw_cli::context::CliContext;

fn cli(args: &[&str]) -> Cli {
    Cli::try_parse_from(args).unwrap()
}

#[test]
fn missing_config_file_falls_back_to_defaults() {
    let cli = cli(&[
        "sitewrench",
        "--config",
        "/nonexistent/sitewrench.toml",
        "version",
    ]);
    let ctx = CliContext::load(&cli).unwrap();

    assert_eq!(ctx.config.provider.base_url, "https://localhost:8530");
    assert_eq!(ctx.config_path, "/nonexistent/sitewrench.toml");
    assert!(!ctx.json);
}

#[test]
fn file_values_load_and_cli_overrides_win() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(
        &path,
        r#"
[provider]
base_url = "https://cm01.corp.example"
site = "PR1"
timeout_ms = 5000
"#,
    )
    .unwrap();

    let cli = cli(&[
        "sitewrench",
        "--config",
        path.to_str().unwrap(),
        "--site",
        "LAB",
        "site",
        "list",
    ]);
    let ctx = CliContext::load(&cli).unwrap();

    assert_eq!(ctx.config.provider.base_url, "https://cm01.corp.example");
    assert_eq!(ctx.config.provider.site, "LAB");
    assert_eq!(ctx.config.provider.timeout_ms, 5000);
}

#[test]
fn unparseable_config_file_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "provider = \"not a table\"").unwrap();

    let cli = cli(&["sitewrench", "--config", path.to_str().unwrap(), "version"]);
    let err = CliContext::load(&cli).unwrap_err();
    assert!(err.to_string().contains("parsing"));
}

#[test]
fn url_override_applies_on_top_of_defaults() {
    let cli = cli(&[
        "sitewrench",
        "--config",
        "/nonexistent/sitewrench.toml",
        "--url",
        "http://cm02.corp.example:8530",
        "doctor",
    ]);
    let ctx = CliContext::load(&cli).unwrap();

    assert_eq!(ctx.config.provider.base_url, "http://cm02.corp.example:8530");
}
