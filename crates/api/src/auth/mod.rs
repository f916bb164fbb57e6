//! Authentication primitives: JWT access tokens, password hashing.

pub mod jwt;
pub mod password;
