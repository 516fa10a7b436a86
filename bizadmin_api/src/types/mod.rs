mod envelope;
pub use self::envelope::{ListEnvelope, ListPage, MutationResponse, Pagination, Response};

mod resource;
pub use self::resource::{DeleteMode, EntityId, Resource, API_PREFIX};

mod bank_account;
pub use self::bank_account::{BankAccount, BankAccountPayload};

mod category;
pub use self::category::{Category, CategoryPayload};

mod contract;
pub use self::contract::{Contract, ContractPayload, ContractStatus};

mod customer;
pub use self::customer::{Customer, CustomerPayload};

mod product;
pub use self::product::{Product, ProductPayload};

mod receipt;
pub use self::receipt::{Receipt, ReceiptPayload, ReceiptType};

mod warehouse;
pub use self::warehouse::{Warehouse, WarehousePayload};
