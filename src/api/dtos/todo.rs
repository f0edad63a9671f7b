use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Serialize)]
pub struct CreateTodoDTO {
    pub title: String,
    pub description: Option<String>,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct EditTodoDTO {
    pub title: Option<String>,
    pub description: Option<String>,
    pub completed: Option<bool>,
}
