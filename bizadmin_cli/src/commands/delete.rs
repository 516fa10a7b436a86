use anyhow::Result;
use bizadmin_lib::{AdminClient, Resource};
use clap::Args;

use super::{dispatch, ResourceKind};

#[derive(Args)]
pub struct DeleteArgs {
    /// Resource the records belong to
    #[arg(value_enum)]
    pub resource: ResourceKind,

    /// Ids of the records to delete
    #[arg(required = true, num_args = 1..)]
    pub ids: Vec<String>,
}

pub async fn run(args: &DeleteArgs, client: &AdminClient) -> Result<()> {
    dispatch!(args.resource, delete_records(&args.ids, client))
}

async fn delete_records<R: Resource>(ids: &[String], client: &AdminClient) -> Result<()> {
    let resp = client.delete::<R>(ids).await?;
    let message = if resp.message.is_empty() {
        "Deleted"
    } else {
        resp.message.as_str()
    };
    eprintln!("{} ({} {})", message, ids.len(), R::NAME);
    Ok(())
}
