pub mod api;
mod auth_handler;
mod auth_utils;
pub(crate) mod dtos;
pub(crate) mod errors;
mod middlewares;
mod todos_handler;
mod users_handler;
