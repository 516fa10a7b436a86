use anyhow::{Context, Result};
use bizadmin_lib::validation::Validate;
use bizadmin_lib::{AdminClient, Resource};
use clap::Args;
use serde::de::DeserializeOwned;

use super::{dispatch, ResourceKind};
use crate::output::{print_record, OutputFormat};

#[derive(Args)]
pub struct SaveArgs {
    /// Resource to create or update
    #[arg(value_enum)]
    pub resource: ResourceKind,

    /// Id of the record to update; omit to create a new one
    #[arg(long)]
    pub id: Option<String>,

    /// Record body as JSON, or @path to read it from a file
    #[arg(long)]
    pub json: String,
}

pub async fn run(args: &SaveArgs, client: &AdminClient, format: &OutputFormat) -> Result<()> {
    let body = read_body(&args.json)?;
    dispatch!(
        args.resource,
        save_record(args.id.as_deref(), &body, client, format)
    )
}

/// Inline JSON, or the contents of the file named after a leading `@`.
fn read_body(arg: &str) -> Result<String> {
    match arg.strip_prefix('@') {
        Some(path) => std::fs::read_to_string(path).with_context(|| format!("reading {}", path)),
        None => Ok(arg.to_string()),
    }
}

fn parse_payload<P: DeserializeOwned>(body: &str, resource: &str) -> Result<P> {
    serde_json::from_str(body).with_context(|| format!("invalid {} payload", resource))
}

async fn save_record<R>(
    id: Option<&str>,
    body: &str,
    client: &AdminClient,
    format: &OutputFormat,
) -> Result<()>
where
    R: Resource,
    R::Payload: DeserializeOwned + Validate,
{
    let payload: R::Payload = parse_payload(body, R::NAME)?;
    let resp = client.save::<R>(id, &payload).await?;

    if !resp.message.is_empty() {
        eprintln!("{}", resp.message);
    }
    if !resp.data.is_null() {
        print_record(&resp.data, format)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use bizadmin_lib::types::{ContractPayload, ReceiptPayload};

    use super::*;

    #[test]
    fn inline_body_is_used_as_is() {
        assert_eq!(read_body(r#"{"a":1}"#).unwrap(), r#"{"a":1}"#);
    }

    #[test]
    fn missing_file_is_an_error() {
        let err = read_body("@/definitely/not/here.json").unwrap_err();
        assert!(err.to_string().contains("/definitely/not/here.json"));
    }

    #[test]
    fn payload_parses_camel_case() {
        let payload: ContractPayload = parse_payload(
            r#"{"contractNumber":"HD-1","customerId":"cu-1","totalValue":10}"#,
            "contract",
        )
        .unwrap();
        assert_eq!(payload.contract_number, "HD-1");
        assert_eq!(payload.total_value, 10.0);
    }

    #[test]
    fn malformed_payload_names_the_resource() {
        let err = parse_payload::<ReceiptPayload>("{", "receipt").unwrap_err();
        assert_eq!(err.to_string(), "invalid receipt payload");
    }
}
