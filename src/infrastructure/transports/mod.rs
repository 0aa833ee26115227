pub mod wizard;

use std::sync::Arc;

use anyhow::bail;
use anyhow::Result;

use crate::domain::models::TransportBox;
use crate::domain::models::TransportName;

pub struct TransportManager {}

impl TransportManager {
    pub fn get(name: TransportName) -> Result<TransportBox> {
        if name == TransportName::Wizard {
            return Ok(Arc::<wizard::Wizard>::default());
        }

        bail!(format!("No transport implemented for {name}"))
    }
}
