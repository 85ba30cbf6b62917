//! `sitewrench computer` — managed computer records.

use sw_objects::computers;
use sw_objects::Computer;

use crate::cli::{print_json, ComputerCommand};
use crate::context::CliContext;

pub async fn run(ctx: &CliContext, cmd: &ComputerCommand) -> anyhow::Result<()> {
    let store = ctx.store()?;
    match cmd {
        ComputerCommand::Show { resource } => {
            let computer = computers::get_computer(store.as_ref(), *resource).await?;
            if ctx.json {
                return print_json(&computer);
            }
            print_computer(&computer);
            Ok(())
        }
        ComputerCommand::Find { name } => {
            let found = computers::find_computers_by_name(store.as_ref(), name).await?;
            if ctx.json {
                return print_json(&found);
            }
            for c in &found {
                match &c.domain {
                    Some(domain) => println!("{}  {}  ({domain})", c.resource_id, c.name),
                    None => println!("{}  {}", c.resource_id, c.name),
                }
            }
            Ok(())
        }
        ComputerCommand::Import { name, mac } => {
            let computer = computers::import_computer(store.as_ref(), name, mac).await?;
            if ctx.json {
                return print_json(&computer);
            }
            println!("Imported as resource {}", computer.resource_id);
            print_computer(&computer);
            Ok(())
        }
        ComputerCommand::Delete { resource } => {
            computers::delete_computer(store.as_ref(), *resource).await?;
            if ctx.json {
                return print_json(&serde_json::json!({ "deleted": resource }));
            }
            println!("Deleted computer {resource}");
            Ok(())
        }
    }
}

fn print_computer(c: &Computer) {
    println!("Resource:   {}", c.resource_id);
    println!("Name:       {}", c.name);
    if let Some(domain) = &c.domain {
        println!("Domain:     {domain}");
    }
    if let Some(version) = &c.client_version {
        println!("Client:     {version}");
    }
    if let Some(mac) = &c.mac_address {
        println!("MAC:        {mac}");
    }
    if let Some(logon) = c.last_logon {
        println!("Last logon: {}", logon.to_rfc3339());
    }
}
