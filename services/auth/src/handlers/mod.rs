pub mod health;
pub mod otp;
pub mod token;
pub mod users;
