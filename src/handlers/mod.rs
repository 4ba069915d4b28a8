pub mod address_handlers;
pub mod default_handler;
pub mod health_handlers;
