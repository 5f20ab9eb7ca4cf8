mod session_user;

pub use session_user::SessionUser;
