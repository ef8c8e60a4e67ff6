#[allow(clippy::module_inception)]
pub mod api;
pub mod chat;
pub mod message;
pub mod query;
pub mod reply_markup;
pub mod update;
pub mod user;

pub use api::*;
pub use chat::*;
pub use message::*;
pub use query::*;
pub use reply_markup::*;
pub use update::*;
pub use user::*;
