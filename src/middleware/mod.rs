pub mod session;

pub use session::{MaybeSessionUser, SessionUser};
