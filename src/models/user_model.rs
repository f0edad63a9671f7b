use super::DbConnection;
use crate::api::dtos::user::EditUserDTO;
use crate::api::errors::TodoApiError;
use crate::schema::*;
use diesel::prelude::*;
use diesel::{AsChangeset, Insertable, Queryable};
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Serialize, Insertable, Queryable)]
#[table_name = "users"]
pub struct User {
    pub id: uuid::Uuid,
    pub email: String,
    pub created_at: chrono::NaiveDateTime,
    pub updated_at: chrono::NaiveDateTime,
    pub password: String,
    pub name: String,
}

impl User {
    pub fn from_details<T: Into<String>>(name: T, email: T, password: T) -> User {
        User {
            id: uuid::Uuid::new_v4(),
            email: email.into(),
            created_at: chrono::Local::now().naive_local(),
            updated_at: chrono::Local::now().naive_local(),
            password: password.into(),
            name: name.into(),
        }
    }
}

/// User as it is allowed to leave the server, without the password hash
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SlimUser {
    pub id: uuid::Uuid,
    pub email: String,
    pub name: String,
}

impl From<User> for SlimUser {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            email: user.email,
            name: user.name,
        }
    }
}

#[derive(Debug, AsChangeset)]
#[table_name = "users"]
pub struct UserChangeset {
    pub name: Option<String>,
    pub email: Option<String>,
    pub updated_at: chrono::NaiveDateTime,
}

impl From<EditUserDTO> for UserChangeset {
    fn from(dto: EditUserDTO) -> Self {
        Self {
            name: dto.name,
            email: dto.email,
            updated_at: chrono::Local::now().naive_local(),
        }
    }
}

/// Gets a user by id
pub fn get_user_by_id(conn: &DbConnection, user_id: &str) -> Result<User, TodoApiError> {
    use crate::schema::users::dsl::*;

    let uid = uuid::Uuid::parse_str(user_id)?;

    users
        .filter(id.eq(uid))
        .first::<User>(conn)
        .optional()?
        .ok_or_else(|| TodoApiError::NotFound("User".to_string()))
}
