use actix_web::{web, HttpResponse};

use super::errors::TodoApiError;
use super::middlewares::auth::Authenticated;
use crate::api::dtos::todo::{CreateTodoDTO, EditTodoDTO};
use crate::models::todo_model::{Todo, TodoChangeset};
use crate::models::{DbConnection, Pool};

use diesel::prelude::*;

/// Api handler for getting all todos for a user
pub async fn get_todos(
    auth: Authenticated,
    pool: web::Data<Pool>,
) -> Result<HttpResponse, actix_web::Error> {
    let list = web::block(move || get_all_todos_for_user(pool, &auth.id)).await??;

    Ok(HttpResponse::Ok().json(&list))
}

/// Get a single todo by id
///
/// A todo someone else owns is answered exactly like a todo that
/// does not exist: 200 with an empty body
pub async fn get_todo(
    auth: Authenticated,
    params: web::Path<String>,
    pool: web::Data<Pool>,
) -> Result<HttpResponse, actix_web::Error> {
    let found =
        web::block(move || get_todo_for_user(pool, params.into_inner().as_str(), &auth.id))
            .await??;

    match found {
        Some(todo) => Ok(HttpResponse::Ok().json(&todo)),
        None => Ok(HttpResponse::Ok().finish()),
    }
}

/// Create a new todo owned by the requester
pub async fn create_todo(
    request_data: web::Json<CreateTodoDTO>,
    pool: web::Data<Pool>,
    auth: Authenticated,
) -> Result<HttpResponse, actix_web::Error> {
    let inserted =
        web::block(move || insert_new_todo(pool, request_data.into_inner(), &auth.id)).await??;

    Ok(HttpResponse::Created().json(&inserted))
}

/// Partially update a todo, rejecting requesters that don't own it
pub async fn edit_todo(
    auth: Authenticated,
    params: web::Path<String>,
    request_data: web::Json<EditTodoDTO>,
    pool: web::Data<Pool>,
) -> Result<HttpResponse, actix_web::Error> {
    let updated = web::block(move || {
        update_owned_todo(
            pool,
            params.into_inner().as_str(),
            &auth.id,
            request_data.into_inner(),
        )
    })
    .await??;

    Ok(HttpResponse::Ok().json(&updated))
}

/// Api to Delete a todo, rejecting requesters that don't own it
pub async fn delete_todo(
    auth: Authenticated,
    params: web::Path<String>,
    pool: web::Data<Pool>,
) -> Result<HttpResponse, actix_web::Error> {
    web::block(move || remove_owned_todo(pool, params.into_inner().as_str(), &auth.id)).await??;

    Ok(HttpResponse::NoContent().finish())
}

/// Fetch-then-check protocol shared by every id-addressed operation:
/// load the row by primary key, keep it only if the requester owns it.
/// Absent and wrong-owner collapse into the same `None` so the two
/// cases are not distinguishable from outside.
fn find_owned_todo(
    conn: &DbConnection,
    requester_id: &str,
    todo_id: &str,
) -> Result<Option<Todo>, TodoApiError> {
    use crate::schema::todos::dsl::*;

    let tid = uuid::Uuid::parse_str(todo_id)?;
    let uid = uuid::Uuid::parse_str(requester_id)?;

    let found = todos.filter(id.eq(tid)).first::<Todo>(conn).optional()?;

    Ok(found.filter(|todo| todo.user_id == uid))
}

/// Get all todos for a user, oldest first
fn get_all_todos_for_user(
    pool: web::Data<Pool>,
    requester_id: &str,
) -> Result<Vec<Todo>, TodoApiError> {
    use crate::schema::todos::dsl::*;

    let conn = &pool.get()?;

    let uid = uuid::Uuid::parse_str(requester_id)?;

    let todos_list = todos
        .filter(user_id.eq(uid))
        .order(created_at.asc())
        .load::<Todo>(conn)?;

    Ok(todos_list)
}

fn get_todo_for_user(
    pool: web::Data<Pool>,
    todo_id: &str,
    requester_id: &str,
) -> Result<Option<Todo>, TodoApiError> {
    let conn = &pool.get()?;

    find_owned_todo(conn, requester_id, todo_id)
}

fn insert_new_todo(
    pool: web::Data<Pool>,
    todo: CreateTodoDTO,
    requester_id: &str,
) -> Result<Todo, TodoApiError> {
    use crate::schema::todos::dsl::*;

    let conn = &pool.get()?;

    let uid = uuid::Uuid::parse_str(requester_id)?;

    let new_todo = Todo::from_details(todo.title, todo.description, uid);

    let inserted = diesel::insert_into(todos)
        .values(&new_todo)
        .get_result::<Todo>(conn)?;

    Ok(inserted)
}

/// Apply a partial update to a todo owned by the requester
fn update_owned_todo(
    pool: web::Data<Pool>,
    todo_id: &str,
    requester_id: &str,
    changes: EditTodoDTO,
) -> Result<Todo, TodoApiError> {
    use crate::schema::todos::dsl::*;

    let conn = &pool.get()?;

    let todo = find_owned_todo(conn, requester_id, todo_id)?.ok_or(TodoApiError::Forbidden)?;

    let updated = diesel::update(todos.filter(id.eq(todo.id)))
        .set(&TodoChangeset::from(changes))
        .get_result::<Todo>(conn)?;

    Ok(updated)
}

/// Remove a todo owned by the requester
fn remove_owned_todo(
    pool: web::Data<Pool>,
    todo_id: &str,
    requester_id: &str,
) -> Result<(), TodoApiError> {
    use crate::schema::todos::dsl::*;

    let conn = &pool.get()?;

    let todo = find_owned_todo(conn, requester_id, todo_id)?.ok_or(TodoApiError::Forbidden)?;

    let deleted_count = diesel::delete(todos.filter(id.eq(todo.id))).execute(conn)?;

    // A concurrent delete can win the race between the check and here,
    // the row is gone either way
    if deleted_count == 0 {
        log::warn!("Todo {} was already deleted", todo.id);
    }

    Ok(())
}
