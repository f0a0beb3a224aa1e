pub mod otp;

pub use otp::OtpStore;
