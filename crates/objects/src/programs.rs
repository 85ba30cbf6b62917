//! Programs — the runnable command lines a package carries.
//!
//! Programs have no identity of their own in the provider; they are
//! keyed by `(PackageID, ProgramName)`.

use serde::Serialize;

use sw_domain::error::Result;
use sw_store::{ManagedObject, ManagementStore, QueryRequest};

use crate::util::{find_one, save_and_fetch, set_opt};

const CLASS: &str = "Program";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Program {
    pub package_id: String,
    pub program_name: String,
    pub command_line: String,
    pub comment: Option<String>,
}

impl Program {
    pub fn from_object(obj: &ManagedObject) -> Result<Self> {
        Ok(Self {
            package_id: obj.require_str("PackageID")?.to_owned(),
            program_name: obj.require_str("ProgramName")?.to_owned(),
            command_line: obj.require_str("CommandLine")?.to_owned(),
            comment: obj.get_str("Comment").map(str::to_owned),
        })
    }
}

#[derive(Debug, Clone)]
pub struct NewProgram<'a> {
    pub package_id: &'a str,
    pub program_name: &'a str,
    pub command_line: &'a str,
    pub comment: Option<&'a str>,
}

pub async fn list_programs(
    store: &dyn ManagementStore,
    package_id: &str,
) -> Result<Vec<Program>> {
    let objs = store
        .query(QueryRequest::all(CLASS).with("PackageID", package_id))
        .await?;
    objs.iter().map(Program::from_object).collect()
}

pub async fn get_program(
    store: &dyn ManagementStore,
    package_id: &str,
    program_name: &str,
) -> Result<Program> {
    let obj = program_object(store, package_id, program_name).await?;
    Program::from_object(&obj)
}

pub async fn create_program(
    store: &dyn ManagementStore,
    new: NewProgram<'_>,
) -> Result<Program> {
    let mut obj = store.create_instance(CLASS).await?;
    obj.set("PackageID", new.package_id);
    obj.set("ProgramName", new.program_name);
    obj.set("CommandLine", new.command_line);
    set_opt(&mut obj, "Comment", new.comment);

    let stored = save_and_fetch(store, &obj).await?;
    Program::from_object(&stored)
}

pub async fn delete_program(
    store: &dyn ManagementStore,
    package_id: &str,
    program_name: &str,
) -> Result<()> {
    let obj = program_object(store, package_id, program_name).await?;
    store.delete(obj.require_path()?).await
}

async fn program_object(
    store: &dyn ManagementStore,
    package_id: &str,
    program_name: &str,
) -> Result<ManagedObject> {
    find_one(
        store,
        QueryRequest::all(CLASS)
            .with("PackageID", package_id)
            .with("ProgramName", program_name),
        format!("program {program_name} in package {package_id}"),
    )
    .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use sw_domain::error::Error;
    use sw_store::MemoryStore;

    async fn setup() -> (MemoryStore, Program) {
        let store = MemoryStore::with_provider_classes();
        let prog = create_program(
            &store,
            NewProgram {
                package_id: "SW00001",
                program_name: "Silent Install",
                command_line: "setup.exe /quiet /norestart",
                comment: None,
            },
        )
        .await
        .unwrap();
        (store, prog)
    }

    #[tokio::test]
    async fn programs_are_keyed_by_package_and_name() {
        let (store, prog) = setup().await;

        let fetched = get_program(&store, "SW00001", "Silent Install").await.unwrap();
        assert_eq!(fetched, prog);
        assert_eq!(fetched.command_line, "setup.exe /quiet /norestart");

        assert!(matches!(
            get_program(&store, "SW00002", "Silent Install").await.unwrap_err(),
            Error::NotFound(_)
        ));
    }

    #[tokio::test]
    async fn list_is_scoped_to_one_package() {
        let (store, _) = setup().await;
        create_program(
            &store,
            NewProgram {
                package_id: "SW00002",
                program_name: "Repair",
                command_line: "setup.exe /repair",
                comment: None,
            },
        )
        .await
        .unwrap();

        let listed = list_programs(&store, "SW00001").await.unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].program_name, "Silent Install");
    }

    #[tokio::test]
    async fn delete_removes_exactly_one_program() {
        let (store, _) = setup().await;
        delete_program(&store, "SW00001", "Silent Install").await.unwrap();
        assert!(list_programs(&store, "SW00001").await.unwrap().is_empty());
    }
}
