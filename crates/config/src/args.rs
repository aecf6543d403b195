//! Config given as command line arguments

use clap::{Args, Parser};
use simple_backend_config::args::ServerModeArgs;

#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct ArgsConfig {
    #[command(flatten)]
    pub server: ServerModeArgs,

    #[command(subcommand)]
    pub mode: Option<AppMode>,
}

#[derive(Parser, Debug, Clone)]
pub enum AppMode {
    /// Print API documentation JSON to stdout
    OpenApi,
    /// Add new member and print its access token
    AddMember(AddMemberArgs),
}

#[derive(Args, Debug, Clone)]
pub struct AddMemberArgs {
    /// Member name
    #[arg(long, value_name = "NAME")]
    pub name: String,

    /// Grant admin role
    #[arg(long)]
    pub admin: bool,
}

#[cfg(test)]
mod tests {
    use clap::Parser;

    use super::*;

    #[test]
    fn parse_add_member_mode() {
        let args =
            ArgsConfig::try_parse_from(["moderation-backend", "add-member", "--name", "a", "--admin"])
                .unwrap();
        match args.mode {
            Some(AppMode::AddMember(member)) => {
                assert_eq!(member.name, "a");
                assert!(member.admin);
            }
            _ => panic!("unexpected mode"),
        }
    }

    #[test]
    fn server_mode_has_no_subcommand() {
        let args =
            ArgsConfig::try_parse_from(["moderation-backend", "--sqlite-in-ram"]).unwrap();
        assert!(args.mode.is_none());
        assert!(args.server.sqlite_in_ram);
    }
}
