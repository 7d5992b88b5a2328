pub mod client;
pub mod page;
pub mod request;

pub use client::ApiClient;
pub use page::{PageInfo, Paged};
pub use request::{ApiRequest, FormPart};
