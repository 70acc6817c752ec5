pub mod page_data;
pub mod unmatched_products;
