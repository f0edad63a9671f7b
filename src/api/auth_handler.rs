use actix_web::{route, web, HttpResponse};
use diesel::prelude::*;

use crate::{
    api::auth_utils::{encode_token, hash_password, verify_hash},
    api::errors::AuthError,
    models::{
        user_model::{SlimUser, User},
        Pool,
    },
};

use super::{
    dtos::auth::{SigninDTO, SigninResponseDTO, SignupRequestDTO, SignupResponseDTO},
    errors::TodoApiError,
};

#[route("/auth/signup", method = "POST")]
pub async fn signup(
    request_data: web::Json<SignupRequestDTO>,
    pool: web::Data<Pool>,
) -> Result<HttpResponse, actix_web::Error> {
    let user = web::block(move || insert_new_user(pool, request_data.into_inner())).await??;

    Ok(HttpResponse::Created().json(&user))
}

#[route("/auth/signin", method = "POST")]
/// Sign in a user, issuing a fresh token
pub async fn signin(
    request_data: web::Json<SigninDTO>,
    pool: web::Data<Pool>,
) -> Result<HttpResponse, actix_web::Error> {
    let user = web::block(move || get_user(pool, request_data.into_inner())).await??;

    Ok(HttpResponse::Ok().json(&user))
}

/// Look a user up by email and check the supplied password
fn get_user(pool: web::Data<Pool>, user_data: SigninDTO) -> Result<SigninResponseDTO, TodoApiError> {
    use crate::schema::users::dsl::*;

    let conn = &pool.get()?;

    let found = users
        .filter(email.eq(&user_data.email))
        .first::<User>(conn)
        .optional()?;

    let user = found.ok_or_else(|| TodoApiError::BadRequest("No user found".into()))?;

    if !verify_hash(&user.password, &user_data.password)? {
        return Err(TodoApiError::AuthError(AuthError::Unauthorized));
    }

    let slim_user: SlimUser = user.into();

    let token = encode_token(&slim_user).map_err(TodoApiError::AuthError)?;

    Ok(SigninResponseDTO {
        id: slim_user.id.to_string(),
        email: slim_user.email,
        access_token: token,
    })
}

/// Query Database to insert a new user on signup
fn insert_new_user(
    pool: web::Data<Pool>,
    user_data: SignupRequestDTO,
) -> Result<SignupResponseDTO, TodoApiError> {
    use crate::schema::users::dsl::*;

    let conn = &pool.get()?;

    let existing = users
        .filter(email.eq(&user_data.email))
        .first::<User>(conn)
        .optional()?;

    if existing.is_some() {
        return Err(TodoApiError::BadRequest("User Already Exists".into()));
    }

    let hashed = hash_password(&user_data.password)?;

    let new_user = User::from_details(user_data.name, user_data.email, hashed);

    // Unique email violations from a signup race surface as BadRequest
    // through the diesel error mapping
    let inserted: User = diesel::insert_into(users)
        .values(&new_user)
        .get_result(conn)?;

    let slim_user: SlimUser = inserted.into();

    let token = encode_token(&slim_user).map_err(TodoApiError::AuthError)?;

    Ok(SignupResponseDTO {
        id: slim_user.id.to_string(),
        email: slim_user.email,
        access_token: token,
    })
}
