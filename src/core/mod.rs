pub mod cancel;
pub mod client;
pub mod normalize;

pub use crate::domain::http::{HttpMethod, HttpRequest, HttpResponse};
pub use crate::domain::ports::{ConfigProvider, TokenStore, Transport};
pub use crate::utils::error::Result;
