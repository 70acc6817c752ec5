pub mod csv_link;
pub mod search_field;
pub mod system_label;
pub mod table;
