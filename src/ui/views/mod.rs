pub mod projects;
pub mod status;
pub mod watch;
