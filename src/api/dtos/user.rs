use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Serialize)]
pub struct EditUserDTO {
    pub name: Option<String>,
    pub email: Option<String>,
}
