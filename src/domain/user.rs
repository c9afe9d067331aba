use serde::{Deserialize, Serialize};

/// An authenticated account. Rows are provisioned by the external OAuth
/// flow; this service only ever reads them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub email: String,
}
