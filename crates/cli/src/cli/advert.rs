//! `sitewrench advert` — advertisements targeting programs at collections.

use sw_objects::advertisements;
use sw_objects::NewAdvertisement;
use sw_schedule::ScheduleToken;

use crate::cli::{print_json, AdvertCommand};
use crate::context::CliContext;

pub async fn run(ctx: &CliContext, cmd: &AdvertCommand) -> anyhow::Result<()> {
    let store = ctx.store()?;
    match cmd {
        AdvertCommand::List => {
            let list = advertisements::list_advertisements(store.as_ref()).await?;
            if ctx.json {
                return print_json(&list);
            }
            for a in &list {
                println!(
                    "{}  {}  ({}/{} to {})",
                    a.advertisement_id, a.name, a.package_id, a.program_name, a.collection_id,
                );
            }
            Ok(())
        }
        AdvertCommand::Show { id } => {
            let a = advertisements::get_advertisement(store.as_ref(), id).await?;
            if ctx.json {
                return print_json(&a);
            }
            println!("Advertisement: {}", a.advertisement_id);
            println!("Name:          {}", a.name);
            println!("Package:       {}", a.package_id);
            println!("Program:       {}", a.program_name);
            println!("Collection:    {}", a.collection_id);
            if let Some(present) = a.present_time {
                println!("Present:       {}", present.to_rfc3339());
            }
            println!("Scheduled:     {}", if a.has_schedule { "yes" } else { "no" });
            Ok(())
        }
        AdvertCommand::Create {
            name,
            package,
            program,
            collection,
            comment,
            present,
            schedule,
        } => {
            let token = match schedule {
                Some(path) => Some(read_token(path)?),
                None => None,
            };
            let new = NewAdvertisement {
                name,
                package_id: package,
                program_name: program,
                collection_id: collection,
                comment: comment.as_deref(),
                present_time: *present,
            };
            let a =
                advertisements::create_advertisement(store.as_ref(), new, token.as_ref()).await?;
            if ctx.json {
                return print_json(&a);
            }
            println!("Created advertisement {} ({})", a.advertisement_id, a.name);
            Ok(())
        }
        AdvertCommand::Delete { id } => {
            advertisements::delete_advertisement(store.as_ref(), id).await?;
            if ctx.json {
                return print_json(&serde_json::json!({ "deleted": id }));
            }
            println!("Deleted advertisement {id}");
            Ok(())
        }
    }
}

/// Read a schedule token JSON document from a file, or stdin for "-".
fn read_token(path: &str) -> anyhow::Result<ScheduleToken> {
    let raw = if path == "-" {
        use std::io::Read;
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .map_err(|e| anyhow::anyhow!("reading schedule token from stdin: {e}"))?;
        buf
    } else {
        std::fs::read_to_string(path).map_err(|e| anyhow::anyhow!("reading {path}: {e}"))?
    };
    serde_json::from_str(&raw).map_err(|e| anyhow::anyhow!("parsing schedule token: {e}"))
}
