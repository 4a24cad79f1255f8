//! Vector index gateway: the single point of contact with the external
//! similarity-search store.

mod filter;
mod gateway;
mod http;

pub use filter::{DeleteSelector, MetadataFilter};
pub use gateway::{
    ScoredRecord, UpsertReceipt, VectorIndexGateway, VectorRecord, MAX_UPSERT_BATCH,
};
pub use http::HttpVectorIndex;
