pub mod listing;
pub mod marketplace_config;
pub mod settlement;
pub mod treasury;
pub mod user_account;


pub use listing::*;
pub use marketplace_config::*;
pub use settlement::*;
pub use treasury::*;
pub use user_account::*;
