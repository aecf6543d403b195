//! Write commands. Run these using
//! [crate::write_commands::WriteCommandRunnerHandle].

pub mod member;
pub mod member_admin;
pub mod report;
pub mod report_admin;
pub mod warning_admin;
