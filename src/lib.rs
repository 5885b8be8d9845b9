mod config;
mod connection;
mod driver;
mod sql_writer;
mod util;
mod value_holder;

pub use config::*;
pub use connection::*;
pub use driver::*;
pub use sql_writer::*;
pub(crate) use value_holder::*;
