pub mod admin;
pub mod login;
pub mod otc;
pub mod register;
pub mod token;
pub mod verify_email;
