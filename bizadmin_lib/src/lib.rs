//! Library layer for bizadmin: cached list resources, view models, and
//! invalidating mutations.
//!
//! Wraps the `bizadmin_api` crate with a stale-while-revalidate cache that
//! de-duplicates requests per URL, tag-based invalidation after writes,
//! input validation, and a session-scoped permission store.

pub mod cache;
pub mod client;
pub mod config;
pub mod error;
pub mod resource;
pub mod session;
pub mod validation;
pub mod view;

pub use bizadmin_api;
pub use bizadmin_api::types;
pub use bizadmin_api::{
    ContractQuery, DateRange, ListQuery, ProductQuery, Query, ReceiptQuery, RecordStatus, Resource,
};

pub use cache::{CacheConfig, CacheSnapshot, EntryState, MutateHandle, SwrCache};
pub use client::AdminClient;
pub use config::Config;
pub use error::AdminError;
pub use resource::ListResource;
pub use session::{Action, Session, SessionStore};
pub use validation::Validate;
pub use view::{project, ListStatus, ListViewModel, LoadFlags};
