pub mod api;
pub mod filter;
pub mod form;
pub mod session;
pub mod view;

pub use api::{CatalogClient, ClientError, DEFAULT_API_URL};
pub use filter::{apply_filters, Choice, Filters};
pub use form::PropertyForm;
pub use session::{CatalogSession, Notice};
pub use view::{CatalogView, Rendered};
