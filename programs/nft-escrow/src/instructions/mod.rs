pub mod initialize_marketplace;
pub mod register_user;
pub mod mint_and_list;
pub mod purchase;
pub mod cancel_listing;
pub mod withdraw_treasury;

pub use initialize_marketplace::*;
pub use register_user::*;
pub use mint_and_list::*;
pub use purchase::*;
pub use cancel_listing::*;
pub use withdraw_treasury::*;
