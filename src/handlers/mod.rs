pub mod health_handler;
pub mod webhook_handler;

pub use health_handler::{health_check, health_check_live};
pub use webhook_handler::receive_update;
