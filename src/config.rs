lazy_static::lazy_static! {
    /// Address the HTTP server binds to
    pub static ref API_URL: String = std::env::var("API_URL").unwrap_or_else(|_| String::from("localhost:5900"));

    /// Secret mixed into argon2 password hashes
    pub static ref SECRET_KEY: String = std::env::var("SECRET_KEY").unwrap_or_else(|_| "0123".repeat(8));

    /// Key used to sign and verify JWTs
    pub static ref JWT_SECRET: String = std::env::var("JWT_SECRET").unwrap_or_else(|_| String::from("secure jwt secret"));
}
