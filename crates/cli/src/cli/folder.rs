//! `sitewrench folder` — console folders for organizing objects.

use sw_objects::folders;

use crate::cli::{print_json, FolderCommand};
use crate::context::CliContext;

pub async fn run(ctx: &CliContext, cmd: &FolderCommand) -> anyhow::Result<()> {
    let store = ctx.store()?;
    match cmd {
        FolderCommand::List { object_type } => {
            let list = folders::list_folders(store.as_ref(), object_type.as_deref()).await?;
            if ctx.json {
                return print_json(&list);
            }
            for f in &list {
                match f.parent_node_id {
                    Some(parent) => println!(
                        "{}  {}  [{}] (under {parent})",
                        f.container_node_id, f.name, f.object_type,
                    ),
                    None => println!("{}  {}  [{}]", f.container_node_id, f.name, f.object_type),
                }
            }
            Ok(())
        }
        FolderCommand::Create {
            name,
            object_type,
            parent,
        } => {
            let f = folders::create_folder(store.as_ref(), name, object_type, *parent).await?;
            if ctx.json {
                return print_json(&f);
            }
            println!("Created folder {} ({})", f.container_node_id, f.name);
            Ok(())
        }
        FolderCommand::Move {
            key,
            object_type,
            folder,
        } => {
            folders::move_to_folder(store.as_ref(), key, object_type, *folder).await?;
            if ctx.json {
                return print_json(&serde_json::json!({ "moved": key, "folder": folder }));
            }
            println!("Moved {key} to folder {folder}");
            Ok(())
        }
        FolderCommand::Delete { id } => {
            folders::delete_folder(store.as_ref(), *id).await?;
            if ctx.json {
                return print_json(&serde_json::json!({ "deleted": id }));
            }
            println!("Deleted folder {id}");
            Ok(())
        }
    }
}
