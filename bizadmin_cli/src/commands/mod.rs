//! CLI subcommand implementations.

use clap::ValueEnum;

/// Resources reachable from the command line.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum ResourceKind {
    BankAccounts,
    Categories,
    Contracts,
    Customers,
    Products,
    Receipts,
    Warehouses,
}

/// Expands to a `match` over `ResourceKind` that calls `$func::<R>(args)`
/// with the matching resource type and awaits it.
macro_rules! dispatch {
    ($kind:expr, $func:ident($($arg:expr),* $(,)?)) => {{
        use bizadmin_lib::types::{
            BankAccount, Category, Contract, Customer, Product, Receipt, Warehouse,
        };
        use $crate::commands::ResourceKind;
        match $kind {
            ResourceKind::BankAccounts => $func::<BankAccount>($($arg),*).await,
            ResourceKind::Categories => $func::<Category>($($arg),*).await,
            ResourceKind::Contracts => $func::<Contract>($($arg),*).await,
            ResourceKind::Customers => $func::<Customer>($($arg),*).await,
            ResourceKind::Products => $func::<Product>($($arg),*).await,
            ResourceKind::Receipts => $func::<Receipt>($($arg),*).await,
            ResourceKind::Warehouses => $func::<Warehouse>($($arg),*).await,
        }
    }};
}
pub(crate) use dispatch;

pub mod delete;
pub mod get;
pub mod list;
pub mod save;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kinds_parse_from_kebab_case() {
        assert_eq!(
            ResourceKind::from_str("bank-accounts", false).unwrap(),
            ResourceKind::BankAccounts
        );
        assert_eq!(
            ResourceKind::from_str("Receipts", true).unwrap(),
            ResourceKind::Receipts
        );
        assert!(ResourceKind::from_str("invoices", false).is_err());
    }
}
