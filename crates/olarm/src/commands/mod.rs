pub mod action;
pub mod check;
pub mod devices;
pub mod status;
pub mod watch;
