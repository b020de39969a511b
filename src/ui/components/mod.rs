pub mod daily_view;
pub mod header;
pub mod monthly_table;
pub mod ticker;
pub mod theme;
pub mod upload_view;
