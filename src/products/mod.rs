//! Product routes and their handlers

pub mod handlers;

pub use handlers::{
    AppState, create_product, delete_product, get_product, list_products, product_stats,
    search_products, update_product,
};
