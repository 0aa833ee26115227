pub mod keyword;
pub mod remote;

use std::sync::Arc;

use anyhow::bail;
use anyhow::Result;

use crate::domain::models::ClassifierBox;
use crate::domain::models::ClassifierName;

pub struct ClassifierManager {}

impl ClassifierManager {
    pub fn get(name: ClassifierName) -> Result<ClassifierBox> {
        if name == ClassifierName::Keyword {
            return Ok(Arc::<keyword::Keyword>::default());
        }

        if name == ClassifierName::Remote {
            return Ok(Arc::<remote::Remote>::default());
        }

        bail!(format!("No classifier implemented for {name}"))
    }
}
