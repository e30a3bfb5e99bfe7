pub mod config;
pub mod error;

// Session token view shared by the gate, the role watcher and the pages
pub mod session;

// Backend payloads
pub mod course;
pub mod grading;
pub mod lecture;
pub mod material;
pub mod question;
pub mod submission;
pub mod user;

pub use config::*;
pub use error::*;
pub use session::*;

pub use course::*;
pub use grading::*;
pub use lecture::*;
pub use material::*;
pub use question::*;
pub use submission::*;
pub use user::*;
