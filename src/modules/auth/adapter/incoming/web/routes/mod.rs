mod login_user;
mod logout_user;
mod refresh_token;
mod request_reset;
mod set_password;
mod signup_user;
mod verify_otp;

pub use login_user::{login_user_handler, LoginRequestDto};
pub use logout_user::{logout_user_handler, LogoutRequestDto, LogoutResponseBody};
pub use refresh_token::{refresh_token_handler, RefreshTokenRequestDto};
pub use request_reset::{request_reset_handler, PasswordResetRequestDto};
pub use set_password::{set_password_handler, SetPasswordRequestDto};
pub use signup_user::{signup_user_handler, SignedUpUser, SignupRequestDto};
pub use verify_otp::{verify_otp_handler, VerifyOtpRequestDto};

// Referenced by `paths(...)` in the OpenAPI document
pub use login_user::__path_login_user_handler;
pub use logout_user::__path_logout_user_handler;
pub use refresh_token::__path_refresh_token_handler;
pub use request_reset::__path_request_reset_handler;
pub use set_password::__path_set_password_handler;
pub use signup_user::__path_signup_user_handler;
pub use verify_otp::__path_verify_otp_handler;
