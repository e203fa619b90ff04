/// Middleware modules for the API server
///
/// - `auth`: optional bearer-token guard on resource writes

pub mod auth;
