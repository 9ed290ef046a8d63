//! Helpers for integration tests.
#![allow(dead_code)]

use diesel::prelude::*;
use hoots::db::{DbPool, establish_connection_pool, run_migrations};
use hoots::models::user::User;
use hoots::schema::users;
use tempfile::NamedTempFile;

/// Temporary database used in integration tests.
pub struct TestDb {
    _tempfile: NamedTempFile,
    pool: DbPool,
}

impl TestDb {
    pub fn new() -> Self {
        let tempfile = NamedTempFile::new().expect("Failed to create temp file");
        let pool = establish_connection_pool(tempfile.path().to_str().unwrap())
            .expect("Failed to establish SQLite connection.");
        let mut conn = pool
            .get()
            .expect("Failed to get SQLite connection from pool.");
        run_migrations(&mut conn).expect("Migrations failed");
        TestDb {
            _tempfile: tempfile,
            pool,
        }
    }

    pub fn pool(&self) -> DbPool {
        self.pool.clone()
    }

    /// Seed the account read model.
    pub fn insert_user(&self, id: i32, username: &str) {
        let mut conn = self.pool.get().expect("Failed to get connection");
        diesel::insert_into(users::table)
            .values(User {
                id,
                username: username.to_string(),
            })
            .execute(&mut conn)
            .expect("Failed to insert user");
    }
}

pub const TEST_SECRET: &str = "integration-secret";

/// Sign an HS256 token carrying `payload` as the user claim.
pub fn mint_token(payload: serde_json::Value, secret: &str) -> String {
    let claims = serde_json::json!({ "payload": payload });
    jsonwebtoken::encode(
        &jsonwebtoken::Header::default(),
        &claims,
        &jsonwebtoken::EncodingKey::from_secret(secret.as_bytes()),
    )
    .expect("Failed to sign token")
}

/// Sign a token with an explicit `exp` claim.
pub fn mint_token_expiring(payload: serde_json::Value, secret: &str, exp: i64) -> String {
    let claims = serde_json::json!({ "payload": payload, "exp": exp });
    jsonwebtoken::encode(
        &jsonwebtoken::Header::default(),
        &claims,
        &jsonwebtoken::EncodingKey::from_secret(secret.as_bytes()),
    )
    .expect("Failed to sign token")
}

/// `Authorization` header value for a user with the given id and name.
pub fn bearer(id: i32, username: &str) -> String {
    let token = mint_token(
        serde_json::json!({ "_id": id, "username": username }),
        TEST_SECRET,
    );
    format!("Bearer {token}")
}
