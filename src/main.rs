use api::api::start_server;

#[macro_use]
extern crate diesel;

mod api;
mod config;
mod models;
mod schema;

fn main() -> std::io::Result<()> {
    start_server()
}
