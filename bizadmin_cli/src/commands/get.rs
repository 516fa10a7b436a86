use anyhow::Result;
use bizadmin_lib::{AdminClient, Resource};
use clap::Args;

use super::{dispatch, ResourceKind};
use crate::output::{print_record, OutputFormat};

#[derive(Args)]
pub struct GetArgs {
    /// Resource the record belongs to
    #[arg(value_enum)]
    pub resource: ResourceKind,

    /// Record id
    pub id: String,
}

pub async fn run(args: &GetArgs, client: &AdminClient, format: &OutputFormat) -> Result<()> {
    dispatch!(args.resource, get_record(&args.id, client, format))
}

async fn get_record<R: Resource>(
    id: &str,
    client: &AdminClient,
    format: &OutputFormat,
) -> Result<()> {
    let ids = bizadmin_lib::validation::validate_ids(&[id.to_string()])?;
    let record = client.detail::<R>(&ids[0]).await?;
    print_record(&record, format)
}
