pub mod login_user;
pub mod logout_user;
pub mod refresh_token;
pub mod request_password_reset;
pub mod set_password;
pub mod signup_user;
pub mod verify_reset_otp;
