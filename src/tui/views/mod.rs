pub mod address_bar;
pub mod detail_modal;
pub mod results;
pub mod search;
