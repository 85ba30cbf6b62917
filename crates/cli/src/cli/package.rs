//! `sitewrench package` — software packages.

use sw_objects::packages;
use sw_objects::NewPackage;

use crate::cli::{print_json, PackageCommand};
use crate::context::CliContext;

pub async fn run(ctx: &CliContext, cmd: &PackageCommand) -> anyhow::Result<()> {
    let store = ctx.store()?;
    match cmd {
        PackageCommand::List => {
            let list = packages::list_packages(store.as_ref()).await?;
            if ctx.json {
                return print_json(&list);
            }
            for p in &list {
                match &p.version {
                    Some(v) => println!("{}  {} {v}", p.package_id, p.name),
                    None => println!("{}  {}", p.package_id, p.name),
                }
            }
            Ok(())
        }
        PackageCommand::Show { id } => {
            let p = packages::get_package(store.as_ref(), id).await?;
            if ctx.json {
                return print_json(&p);
            }
            println!("Package:      {}", p.package_id);
            println!("Name:         {}", p.name);
            if let Some(version) = &p.version {
                println!("Version:      {version}");
            }
            if let Some(manufacturer) = &p.manufacturer {
                println!("Manufacturer: {manufacturer}");
            }
            if let Some(description) = &p.description {
                println!("Description:  {description}");
            }
            if let Some(path) = &p.source_path {
                println!("Source:       {path}");
            }
            Ok(())
        }
        PackageCommand::Create {
            name,
            version,
            manufacturer,
            description,
            source_path,
        } => {
            let new = NewPackage {
                name,
                version: version.as_deref(),
                manufacturer: manufacturer.as_deref(),
                description: description.as_deref(),
                source_path: source_path.as_deref(),
            };
            let p = packages::create_package(store.as_ref(), new).await?;
            if ctx.json {
                return print_json(&p);
            }
            println!("Created package {} ({})", p.package_id, p.name);
            Ok(())
        }
        PackageCommand::Delete { id } => {
            packages::delete_package(store.as_ref(), id).await?;
            if ctx.json {
                return print_json(&serde_json::json!({ "deleted": id }));
            }
            println!("Deleted package {id}");
            Ok(())
        }
    }
}
