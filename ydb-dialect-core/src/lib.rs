mod db;
mod driver;
mod executor;
mod explain;
mod field;
mod migrator;
mod query;
mod registry;
mod sql_writer;
mod transaction;
mod util;
mod value;

pub use ::anyhow::Context as ErrorContext;
pub use db::*;
pub use driver::*;
pub use executor::*;
pub use explain::*;
pub use field::*;
pub use migrator::*;
pub use query::*;
pub use registry::*;
pub use sql_writer::*;
pub use transaction::*;
pub use util::*;
pub use value::*;
pub mod stream {
    pub use ::futures::stream::*;
}
pub use ::futures::future;
pub use ::indoc;

pub type Result<T> = anyhow::Result<T>;
pub type Error = anyhow::Error;
