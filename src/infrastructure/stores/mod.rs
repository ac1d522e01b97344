pub mod restdb;

use std::sync::Arc;

use anyhow::bail;
use anyhow::Result;

use crate::domain::models::StoreBox;

pub struct StoreManager {}

impl StoreManager {
    pub fn get(name: &str) -> Result<StoreBox> {
        if name == "restdb" {
            return Ok(Arc::new(restdb::RestDb::default()));
        }

        bail!(format!("No store implemented for {name}"))
    }
}
