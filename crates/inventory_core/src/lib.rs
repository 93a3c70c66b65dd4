pub mod commands;
pub mod domain;
pub mod export;
pub mod kv;
pub mod locale;
pub mod metrics;
pub mod ports;
pub mod query;
pub mod sample;
pub mod settings;
pub mod store;
pub mod validator;
pub mod view;

pub use commands::{Command, CommandOutcome, InventoryApp, Outcome};
pub use domain::{
    Category, NewProduct, Product, ProductId, ProductPatch, QueryState, SessionSettings,
    SortField, SortOrder,
};
pub use kv::MemoryKeyValueStore;
pub use locale::Locale;
pub use ports::{KeyValueStore, PortError, PortResult, ViewRenderer};
