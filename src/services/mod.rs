pub mod address_book_service;
pub mod in_memory;
