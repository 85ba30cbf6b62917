//! `sitewrench site` — sites visible through the provider.

use sw_objects::sites;

use crate::cli::{print_json, SiteCommand};
use crate::context::CliContext;

pub async fn run(ctx: &CliContext, cmd: &SiteCommand) -> anyhow::Result<()> {
    let store = ctx.store()?;
    match cmd {
        SiteCommand::List => {
            let sites = sites::list_sites(store.as_ref()).await?;
            if ctx.json {
                return print_json(&sites);
            }
            for site in &sites {
                println!(
                    "{}  {}",
                    site.site_code,
                    site.site_name.as_deref().unwrap_or("(unnamed)"),
                );
            }
            Ok(())
        }
        SiteCommand::Show { code } => {
            let site = sites::get_site(store.as_ref(), code).await?;
            if ctx.json {
                return print_json(&site);
            }
            println!("Site:    {}", site.site_code);
            if let Some(name) = &site.site_name {
                println!("Name:    {name}");
            }
            if let Some(server) = &site.server_name {
                println!("Server:  {server}");
            }
            if let Some(version) = &site.version {
                println!("Version: {version}");
            }
            Ok(())
        }
    }
}
