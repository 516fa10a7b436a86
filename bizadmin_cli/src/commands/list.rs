use anyhow::{bail, Result};
use bizadmin_lib::validation;
use bizadmin_lib::{AdminClient, ListStatus, Query, RecordStatus, Resource};
use clap::Args;

use super::{dispatch, ResourceKind};
use crate::output::{print_records, OutputFormat};

#[derive(Args)]
pub struct ListArgs {
    /// Resource to list
    #[arg(value_enum)]
    pub resource: ResourceKind,

    /// Page number
    #[arg(long, default_value = "1")]
    pub page: i64,

    /// Results per page
    #[arg(long, default_value = "20")]
    pub page_size: i64,

    /// Free-text search
    #[arg(long)]
    pub search: Option<String>,

    /// Show the recycle bin instead of active records
    #[arg(long)]
    pub deleted: bool,

    /// Start date (YYYY-MM-DD), requires --to
    #[arg(long, requires = "to")]
    pub from: Option<String>,

    /// End date (YYYY-MM-DD), requires --from
    #[arg(long, requires = "from")]
    pub to: Option<String>,

    /// Accounting month (YYYY-MM)
    #[arg(long)]
    pub month: Option<String>,

    /// Endpoint-specific filter value
    #[arg(long)]
    pub filter: Option<String>,

    /// Extra query parameter as key=value (repeatable, e.g. customerId=cu-17)
    #[arg(long = "filter-by")]
    pub filter_by: Vec<String>,
}

pub async fn run(args: &ListArgs, client: &AdminClient, format: &OutputFormat) -> Result<()> {
    dispatch!(args.resource, list_resource(args, client, format))
}

/// Builds the resource's query from the common list flags.
pub fn build_query<Q: Query + Default>(args: &ListArgs) -> Result<Q> {
    let mut query = Q::default()
        .with_page_number(validation::validate_page(args.page)?)
        .with_page_size(validation::validate_page_size(args.page_size)?);

    if let Some(ref search) = args.search {
        query = query.with_search(&validation::validate_search(search)?);
    }
    if args.deleted {
        query = query.with_status(RecordStatus::Deleted);
    }
    if let (Some(from), Some(to)) = (&args.from, &args.to) {
        let (from, to) = validation::validate_date_range(from, to)?;
        query = query.with_date_range(from, to);
    }
    if let Some(ref month) = args.month {
        query = query.with_month(&validation::validate_month(month)?);
    }
    if let Some(ref filter) = args.filter {
        query = query.with_filter(&validation::validate_search(filter)?);
    }
    for pair in &args.filter_by {
        let (key, value) = validation::validate_filter_pair(pair)?;
        query = query.with_extra_filter(&key, &value);
    }
    Ok(query)
}

async fn list_resource<R: Resource>(
    args: &ListArgs,
    client: &AdminClient,
    format: &OutputFormat,
) -> Result<()> {
    let query = build_query::<R::Query>(args)?;
    let vm = client.list::<R>(query).await?;

    match vm.status() {
        ListStatus::Error(e) => bail!("{}", e.user_message()),
        ListStatus::Loading => bail!("{} list is still loading", R::NAME),
        ListStatus::Empty => {
            eprintln!("No {} found.", R::COLLECTION);
            Ok(())
        }
        ListStatus::Ready(items) => {
            eprintln!(
                "Page {}/{} ({} total {})",
                vm.pagination.page_number,
                vm.pagination.total_pages,
                vm.pagination.total_record,
                R::COLLECTION
            );
            print_records(items, format)
        }
    }
}

#[cfg(test)]
mod tests {
    use bizadmin_lib::ContractQuery;
    use clap::Parser;

    use super::*;

    #[derive(Parser)]
    struct TestCli {
        #[command(flatten)]
        args: ListArgs,
    }

    fn parse(argv: &[&str]) -> ListArgs {
        TestCli::try_parse_from(std::iter::once("list").chain(argv.iter().copied()))
            .unwrap()
            .args
    }

    fn query_string(q: &ContractQuery) -> String {
        q.to_query_pairs()
            .iter()
            .map(|(k, v)| format!("{}={}", k, v))
            .collect::<Vec<_>>()
            .join("&")
    }

    #[test]
    fn defaults_request_first_page() {
        let args = parse(&["contracts"]);
        let q: ContractQuery = build_query(&args).unwrap();
        assert_eq!(query_string(&q), "pageNumber=1&pageSize=20");
    }

    #[test]
    fn all_flags_map_to_parameters() {
        let args = parse(&[
            "receipts",
            "--page",
            "2",
            "--page-size",
            "50",
            "--search",
            " rent ",
            "--deleted",
            "--from",
            "2024-01-01",
            "--to",
            "2024-01-31",
            "--month",
            "2024-01",
            "--filter",
            "open",
            "--filter-by",
            "bankAccountId=ba-1",
        ]);
        assert_eq!(args.resource, ResourceKind::Receipts);
        let q: ContractQuery = build_query(&args).unwrap();
        assert_eq!(
            query_string(&q),
            "pageNumber=2&pageSize=50&search=rent&Status=0&fromDate=2024-01-01&toDate=2024-01-31&Month=2024-01&Filter=open&bankAccountId=ba-1"
        );
    }

    #[test]
    fn invalid_input_is_rejected() {
        assert!(build_query::<ContractQuery>(&parse(&["contracts", "--page", "0"])).is_err());
        assert!(
            build_query::<ContractQuery>(&parse(&["contracts", "--month", "2024-13"])).is_err()
        );
        assert!(
            build_query::<ContractQuery>(&parse(&["contracts", "--filter-by", "novalue"])).is_err()
        );
    }

    #[test]
    fn from_requires_to() {
        let result = TestCli::try_parse_from(["list", "contracts", "--from", "2024-01-01"]);
        assert!(result.is_err());
    }
}
