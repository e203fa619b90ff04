/// API route handlers
///
/// This module contains all route handlers organized by resource:
///
/// - `health`: Liveness and health check endpoints
/// - `auth`: Authentication endpoints (register, login)
/// - `resources`: Document CRUD shared by projects, blogs and skills

pub mod auth;
pub mod health;
pub mod resources;
