pub mod routes;
pub mod handlers;
pub mod server;

pub use server::start_server;
