use actix_web::{self, web, App, HttpServer};
use diesel::r2d2::ConnectionManager;
use r2d2::Pool;

use crate::config;
use crate::models;

use super::{auth_handler, middlewares::auth::TokenAuth, todos_handler, users_handler};

/// Mounts every route of the api, shared between the server and tests
pub fn configure_app(cfg: &mut web::ServiceConfig) {
    cfg.service(auth_handler::signup)
        .service(auth_handler::signin)
        .service(
            web::scope("/todos")
                .wrap(TokenAuth)
                .route("", web::get().to(todos_handler::get_todos))
                .route("", web::post().to(todos_handler::create_todo))
                .route("/{id}", web::get().to(todos_handler::get_todo))
                .route("/{id}", web::patch().to(todos_handler::edit_todo))
                .route("/{id}", web::delete().to(todos_handler::delete_todo)),
        )
        .service(
            web::scope("/users")
                .wrap(TokenAuth)
                .route("/me", web::get().to(users_handler::get_me))
                .route("", web::patch().to(users_handler::edit_user)),
        );
}

#[actix_web::main]
pub async fn start_server() -> std::io::Result<()> {
    dotenv::dotenv().ok();

    if std::env::var("RUST_LOG").is_err() {
        std::env::set_var("RUST_LOG", "todo_api=debug,actix_web=info,actix_server=info");
    }

    env_logger::init();

    let database_url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");

    let manager = ConnectionManager::<diesel::PgConnection>::new(database_url);

    let pool: models::Pool = Pool::builder()
        .build(manager)
        .expect("Failed to connect to PG database");

    log::info!("Starting server on {}", config::API_URL.as_str());

    HttpServer::new(move || {
        App::new()
            .app_data(web::Data::new(pool.clone()))
            .wrap(actix_web::middleware::Logger::default())
            .configure(configure_app)
    })
    .workers(1) // Num of threads
    .bind(config::API_URL.as_str())?
    .run()
    .await
}

#[cfg(test)]
mod test {
    use super::*;
    use actix_web::{http::StatusCode, test};
    use serde_json::json;

    /// The end to end flow needs a live database, skip when none is configured
    fn test_pool() -> Option<models::Pool> {
        dotenv::dotenv().ok();

        let database_url = match std::env::var("DATABASE_URL") {
            Ok(url) => url,
            Err(_) => {
                eprintln!("DATABASE_URL not set, skipping database backed test");
                return None;
            }
        };

        let manager = ConnectionManager::<diesel::PgConnection>::new(database_url);

        Some(
            Pool::builder()
                .build(manager)
                .expect("Failed to connect to PG database"),
        )
    }

    #[actix_web::test]
    async fn end_to_end_todo_flow() {
        let pool = match test_pool() {
            Some(pool) => pool,
            None => return,
        };

        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(pool))
                .configure(configure_app),
        )
        .await;

        let email = format!("{}@example.com", uuid::Uuid::new_v4());

        // Signup
        let req = test::TestRequest::post()
            .uri("/auth/signup")
            .set_json(json!({"email": email, "password": "123", "name": "Chuba"}))
            .to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::CREATED);
        let body: serde_json::Value = test::read_body_json(res).await;
        assert!(body["access_token"].is_string());

        // Signup with a missing field is rejected before any handler runs
        let req = test::TestRequest::post()
            .uri("/auth/signup")
            .set_json(json!({"password": "123"}))
            .to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);

        // Signin
        let req = test::TestRequest::post()
            .uri("/auth/signin")
            .set_json(json!({"email": email, "password": "123"}))
            .to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::OK);
        let body: serde_json::Value = test::read_body_json(res).await;
        let token = format!("Bearer {}", body["access_token"].as_str().unwrap());

        // Current user
        let req = test::TestRequest::get()
            .uri("/users/me")
            .insert_header(("Authorization", token.clone()))
            .to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::OK);
        let body: serde_json::Value = test::read_body_json(res).await;
        assert_eq!(body["email"], email.as_str());

        // Edit profile
        let req = test::TestRequest::patch()
            .uri("/users")
            .insert_header(("Authorization", token.clone()))
            .set_json(json!({"name": "Chuba Akpom"}))
            .to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::OK);
        let body: serde_json::Value = test::read_body_json(res).await;
        assert_eq!(body["name"], "Chuba Akpom");

        // Empty list to start with
        let req = test::TestRequest::get()
            .uri("/todos")
            .insert_header(("Authorization", token.clone()))
            .to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::OK);
        let body: serde_json::Value = test::read_body_json(res).await;
        assert_eq!(body.as_array().unwrap().len(), 0);

        // Create
        let req = test::TestRequest::post()
            .uri("/todos")
            .insert_header(("Authorization", token.clone()))
            .set_json(json!({"title": "Todo #1", "description": "Get Milk"}))
            .to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::CREATED);
        let body: serde_json::Value = test::read_body_json(res).await;
        assert_eq!(body["title"], "Todo #1");
        assert_eq!(body["description"], "Get Milk");
        assert_eq!(body["completed"], false);
        let todo_id = body["id"].as_str().unwrap().to_string();

        // Create without a title is a schema violation
        let req = test::TestRequest::post()
            .uri("/todos")
            .insert_header(("Authorization", token.clone()))
            .set_json(json!({"description": "Get Milk"}))
            .to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);

        // List now has the one todo
        let req = test::TestRequest::get()
            .uri("/todos")
            .insert_header(("Authorization", token.clone()))
            .to_request();
        let res = test::call_service(&app, req).await;
        let body: serde_json::Value = test::read_body_json(res).await;
        assert_eq!(body.as_array().unwrap().len(), 1);

        // Get by id
        let req = test::TestRequest::get()
            .uri(&format!("/todos/{}", todo_id))
            .insert_header(("Authorization", token.clone()))
            .to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::OK);
        let body: serde_json::Value = test::read_body_json(res).await;
        assert_eq!(body["id"], todo_id.as_str());

        // Partial update changes only the supplied field
        let req = test::TestRequest::patch()
            .uri(&format!("/todos/{}", todo_id))
            .insert_header(("Authorization", token.clone()))
            .set_json(json!({"description": "Get bread"}))
            .to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::OK);
        let body: serde_json::Value = test::read_body_json(res).await;
        assert_eq!(body["description"], "Get bread");
        assert_eq!(body["title"], "Todo #1");
        assert_eq!(body["id"], todo_id.as_str());

        // A second user can see none of it
        let other_email = format!("{}@example.com", uuid::Uuid::new_v4());
        let req = test::TestRequest::post()
            .uri("/auth/signup")
            .set_json(json!({"email": other_email, "password": "123", "name": "Eve"}))
            .to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::CREATED);
        let body: serde_json::Value = test::read_body_json(res).await;
        let other_token = format!("Bearer {}", body["access_token"].as_str().unwrap());

        let req = test::TestRequest::get()
            .uri("/todos")
            .insert_header(("Authorization", other_token.clone()))
            .to_request();
        let res = test::call_service(&app, req).await;
        let body: serde_json::Value = test::read_body_json(res).await;
        assert_eq!(body.as_array().unwrap().len(), 0);

        // Foreign read is indistinguishable from a missing row
        let req = test::TestRequest::get()
            .uri(&format!("/todos/{}", todo_id))
            .insert_header(("Authorization", other_token.clone()))
            .to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::OK);
        let bytes = test::read_body(res).await;
        assert!(bytes.is_empty());

        // Foreign mutations are rejected
        let req = test::TestRequest::patch()
            .uri(&format!("/todos/{}", todo_id))
            .insert_header(("Authorization", other_token.clone()))
            .set_json(json!({"title": "Hijacked"}))
            .to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::FORBIDDEN);

        let req = test::TestRequest::delete()
            .uri(&format!("/todos/{}", todo_id))
            .insert_header(("Authorization", other_token.clone()))
            .to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::FORBIDDEN);

        // The record is unchanged after the rejected edit
        let req = test::TestRequest::get()
            .uri(&format!("/todos/{}", todo_id))
            .insert_header(("Authorization", token.clone()))
            .to_request();
        let res = test::call_service(&app, req).await;
        let body: serde_json::Value = test::read_body_json(res).await;
        assert_eq!(body["title"], "Todo #1");
        assert_eq!(body["description"], "Get bread");

        // Owner deletes
        let req = test::TestRequest::delete()
            .uri(&format!("/todos/{}", todo_id))
            .insert_header(("Authorization", token.clone()))
            .to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::NO_CONTENT);

        // Gone from the list and from direct reads
        let req = test::TestRequest::get()
            .uri("/todos")
            .insert_header(("Authorization", token.clone()))
            .to_request();
        let res = test::call_service(&app, req).await;
        let body: serde_json::Value = test::read_body_json(res).await;
        assert_eq!(body.as_array().unwrap().len(), 0);

        let req = test::TestRequest::get()
            .uri(&format!("/todos/{}", todo_id))
            .insert_header(("Authorization", token.clone()))
            .to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::OK);
        let bytes = test::read_body(res).await;
        assert!(bytes.is_empty());
    }
}
