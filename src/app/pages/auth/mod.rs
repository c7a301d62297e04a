//! Sign-in, registration and account recovery screens, rendered inside
//! `AuthLayout`.

mod recovery;
mod signin;

pub use recovery::{ResetPassword, SendEmail, VerifyCode, VerifyEmail};
pub use signin::{Login, Register, Unauthorized};
