mod client;
mod errors;
mod query;
pub mod types;
pub use self::client::{Client, DEFAULT_TIMEOUT};
pub use self::errors::{Error, ErrorPayload};
pub use self::query::{
    ContractQuery, DateRange, ListQuery, ProductQuery, Query, ReceiptQuery, RecordStatus,
    COMMON_PARAMS,
};
pub use self::types::Resource;
