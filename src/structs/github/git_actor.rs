use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GitActor {
    pub name: Option<String>,
    pub date: Option<DateTime<Utc>>,
}
