//! `sitewrench collection` — collections and direct membership rules.

use sw_objects::collections;

use crate::cli::{print_json, CollectionCommand};
use crate::context::CliContext;

pub async fn run(ctx: &CliContext, cmd: &CollectionCommand) -> anyhow::Result<()> {
    let store = ctx.store()?;
    match cmd {
        CollectionCommand::List => {
            let list = collections::list_collections(store.as_ref()).await?;
            if ctx.json {
                return print_json(&list);
            }
            for c in &list {
                match c.member_count {
                    Some(n) => println!("{}  {} ({n} members)", c.collection_id, c.name),
                    None => println!("{}  {}", c.collection_id, c.name),
                }
            }
            Ok(())
        }
        CollectionCommand::Show { id } => {
            let c = collections::get_collection(store.as_ref(), id).await?;
            if ctx.json {
                return print_json(&c);
            }
            println!("Collection: {}", c.collection_id);
            println!("Name:       {}", c.name);
            if let Some(comment) = &c.comment {
                println!("Comment:    {comment}");
            }
            if let Some(n) = c.member_count {
                println!("Members:    {n}");
            }
            Ok(())
        }
        CollectionCommand::Members { id } => {
            let members = collections::collection_members(store.as_ref(), id).await?;
            if ctx.json {
                return print_json(&members);
            }
            for m in &members {
                let name = m.name.as_deref().unwrap_or("(unnamed)");
                match &m.domain {
                    Some(domain) => println!("{}  {name}  ({domain})", m.resource_id),
                    None => println!("{}  {name}", m.resource_id),
                }
            }
            Ok(())
        }
        CollectionCommand::Create { name, comment } => {
            let c =
                collections::create_collection(store.as_ref(), name, comment.as_deref()).await?;
            if ctx.json {
                return print_json(&c);
            }
            println!("Created collection {} ({})", c.collection_id, c.name);
            Ok(())
        }
        CollectionCommand::Delete { id } => {
            collections::delete_collection(store.as_ref(), id).await?;
            if ctx.json {
                return print_json(&serde_json::json!({ "deleted": id }));
            }
            println!("Deleted collection {id}");
            Ok(())
        }
        CollectionCommand::AddMember { id, resource, name } => {
            let member =
                collections::add_direct_rule(store.as_ref(), id, *resource, name.as_deref())
                    .await?;
            if ctx.json {
                return print_json(&member);
            }
            println!(
                "Added resource {} to {id} (rule: {})",
                member.resource_id,
                member.name.as_deref().unwrap_or("unnamed"),
            );
            Ok(())
        }
        CollectionCommand::RemoveMember { id, resource } => {
            collections::remove_direct_rule(store.as_ref(), id, *resource).await?;
            if ctx.json {
                return print_json(&serde_json::json!({ "removed": resource }));
            }
            println!("Removed resource {resource} from {id}");
            Ok(())
        }
        CollectionCommand::Refresh { id } => {
            let rc = collections::request_refresh(store.as_ref(), id).await?;
            if ctx.json {
                return print_json(&serde_json::json!({ "returnValue": rc }));
            }
            println!("Refresh requested for {id} (return code {rc})");
            Ok(())
        }
    }
}
