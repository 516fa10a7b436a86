mod common;
pub use self::common::{DateRange, COMMON_PARAMS, ListQuery, Query, RecordStatus};

mod contract;
pub use self::contract::ContractQuery;

mod receipt;
pub use self::receipt::ReceiptQuery;

mod product;
pub use self::product::ProductQuery;
