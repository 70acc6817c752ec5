pub mod ui_state_store;
