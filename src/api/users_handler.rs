use actix_web::{web, HttpResponse};
use diesel::prelude::*;

use super::errors::TodoApiError;
use super::middlewares::auth::Authenticated;
use crate::api::dtos::user::EditUserDTO;
use crate::models::user_model::{get_user_by_id, SlimUser, User, UserChangeset};
use crate::models::Pool;

/// Profile of the currently authenticated user
pub async fn get_me(
    auth: Authenticated,
    pool: web::Data<Pool>,
) -> Result<HttpResponse, actix_web::Error> {
    let user = web::block(move || {
        let conn = &pool.get()?;

        get_user_by_id(conn, &auth.id)
    })
    .await??;

    Ok(HttpResponse::Ok().json(&SlimUser::from(user)))
}

/// Partially update the authenticated user's profile
pub async fn edit_user(
    auth: Authenticated,
    request_data: web::Json<EditUserDTO>,
    pool: web::Data<Pool>,
) -> Result<HttpResponse, actix_web::Error> {
    let updated =
        web::block(move || update_user(pool, &auth.id, request_data.into_inner())).await??;

    Ok(HttpResponse::Ok().json(&SlimUser::from(updated)))
}

fn update_user(
    pool: web::Data<Pool>,
    user_id: &str,
    changes: EditUserDTO,
) -> Result<User, TodoApiError> {
    use crate::schema::users::dsl::*;

    let conn = &pool.get()?;

    let uid = uuid::Uuid::parse_str(user_id)?;

    let updated = diesel::update(users.filter(id.eq(uid)))
        .set(&UserChangeset::from(changes))
        .get_result::<User>(conn)?;

    Ok(updated)
}
