/// Fixed-offset clock and timestamp formatting for the dashboard's zone
pub mod datetime;
/// reqwest client singleton and GET helpers
pub mod http;
/// Numeric text parsing with separator stripping
pub mod text;
