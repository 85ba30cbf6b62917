//! `sitewrench program` — programs inside a package.

use sw_objects::programs;
use sw_objects::NewProgram;

use crate::cli::{print_json, ProgramCommand};
use crate::context::CliContext;

pub async fn run(ctx: &CliContext, cmd: &ProgramCommand) -> anyhow::Result<()> {
    let store = ctx.store()?;
    match cmd {
        ProgramCommand::List { package } => {
            let list = programs::list_programs(store.as_ref(), package).await?;
            if ctx.json {
                return print_json(&list);
            }
            for p in &list {
                println!("{}  ({})", p.program_name, p.command_line);
            }
            Ok(())
        }
        ProgramCommand::Create {
            package,
            name,
            command_line,
            comment,
        } => {
            let new = NewProgram {
                package_id: package,
                program_name: name,
                command_line,
                comment: comment.as_deref(),
            };
            let p = programs::create_program(store.as_ref(), new).await?;
            if ctx.json {
                return print_json(&p);
            }
            println!("Created program {} under {}", p.program_name, p.package_id);
            Ok(())
        }
        ProgramCommand::Delete { package, name } => {
            programs::delete_program(store.as_ref(), package, name).await?;
            if ctx.json {
                return print_json(&serde_json::json!({ "deleted": name, "package": package }));
            }
            println!("Deleted program {name} from {package}");
            Ok(())
        }
    }
}
