use crate::api::dtos::todo::EditTodoDTO;
use crate::schema::*;
use diesel::{AsChangeset, Insertable, Queryable};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, Insertable, Queryable)]
#[table_name = "todos"]
pub struct Todo {
    pub id: uuid::Uuid,
    pub title: String,
    pub description: Option<String>,
    pub completed: bool,
    pub created_at: chrono::NaiveDateTime,
    pub updated_at: chrono::NaiveDateTime,
    pub user_id: uuid::Uuid,
}

impl Todo {
    pub fn from_details(title: String, description: Option<String>, user_id: uuid::Uuid) -> Self {
        Self {
            id: uuid::Uuid::new_v4(),
            title,
            description,
            completed: false,
            created_at: chrono::Local::now().naive_local(),
            updated_at: chrono::Local::now().naive_local(),
            user_id,
        }
    }
}

/// Partial update for a todo, fields left as `None` are kept as is.
/// `updated_at` is always refreshed.
#[derive(Debug, AsChangeset)]
#[table_name = "todos"]
pub struct TodoChangeset {
    pub title: Option<String>,
    pub description: Option<String>,
    pub completed: Option<bool>,
    pub updated_at: chrono::NaiveDateTime,
}

impl From<EditTodoDTO> for TodoChangeset {
    fn from(dto: EditTodoDTO) -> Self {
        Self {
            title: dto.title,
            description: dto.description,
            completed: dto.completed,
            updated_at: chrono::Local::now().naive_local(),
        }
    }
}
