use crate::{ConnPool, Error, Result};
use futures::future::BoxFuture;
use std::{
    collections::HashMap,
    sync::{Arc, LazyLock, PoisonError, RwLock},
};

/// Opens a pool from a data source name.
pub type OpenPool = fn(String) -> BoxFuture<'static, Result<Arc<dyn ConnPool>>>;

static DRIVERS: LazyLock<RwLock<HashMap<String, OpenPool>>> =
    LazyLock::new(|| RwLock::new(HashMap::new()));

/// Make a generic driver available under `name`, for drivers configured by name only.
///
/// Registering the same name twice is an error, the first registration is kept.
pub fn register_driver(name: impl Into<String>, open: OpenPool) -> Result<()> {
    let name = name.into();
    let mut drivers = DRIVERS.write().unwrap_or_else(PoisonError::into_inner);
    if drivers.contains_key(&name) {
        let error = Error::msg(format!("Driver `{}` is already registered", name));
        log::warn!("{:#}", error);
        return Err(error);
    }
    drivers.insert(name, open);
    Ok(())
}

pub fn is_driver_registered(name: &str) -> bool {
    DRIVERS
        .read()
        .unwrap_or_else(PoisonError::into_inner)
        .contains_key(name)
}

/// Open a pool through the driver registered under `name`.
pub async fn open_pool(name: &str, dsn: &str) -> Result<Arc<dyn ConnPool>> {
    let open = DRIVERS
        .read()
        .unwrap_or_else(PoisonError::into_inner)
        .get(name)
        .copied();
    let Some(open) = open else {
        let error = Error::msg(format!(
            "Unknown driver `{}` (forgotten to register it?)",
            name
        ));
        log::error!("{:#}", error);
        return Err(error);
    };
    open(dsn.to_owned()).await
}
