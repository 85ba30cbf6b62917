//! `sitewrench client` — on-demand actions on managed clients.

use sw_objects::triggers;

use crate::cli::{print_json, ClientCommand};
use crate::context::CliContext;

pub async fn run(ctx: &CliContext, cmd: &ClientCommand) -> anyhow::Result<()> {
    match cmd {
        ClientCommand::Trigger { resource, action } => {
            let store = ctx.store()?;
            let rc = triggers::trigger_client_action(store.as_ref(), *resource, *action).await?;
            if ctx.json {
                return print_json(&serde_json::json!({
                    "resource": resource,
                    "action": action,
                    "returnValue": rc,
                }));
            }
            println!("Sent {action} to resource {resource} (return code {rc})");
            Ok(())
        }
    }
}
