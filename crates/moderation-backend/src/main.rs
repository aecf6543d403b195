#![deny(unsafe_code)]
#![deny(unused_must_use)]
#![deny(unused_features)]
#![warn(unused_crate_dependencies)]

mod member_tools;

use std::process::ExitCode;

use clap::Parser;
use config::{
    args::{AppMode, ArgsConfig},
    get_config,
};
use server::{ModerationServer, api_doc::ApiDoc};

fn main() -> ExitCode {
    let args = ArgsConfig::parse();

    if let Some(AppMode::OpenApi) = args.mode {
        return match ApiDoc::open_api_json_string() {
            Ok(json) => {
                println!("{}", json);
                ExitCode::SUCCESS
            }
            Err(e) => {
                eprintln!("{:?}", e);
                ExitCode::FAILURE
            }
        };
    }

    let config = match get_config(args) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{:?}", e);
            return ExitCode::FAILURE;
        }
    };

    let runtime = match tokio::runtime::Runtime::new() {
        Ok(runtime) => runtime,
        Err(e) => {
            eprintln!("Tokio runtime creation failed: {}", e);
            return ExitCode::FAILURE;
        }
    };

    match config.current_mode() {
        Some(AppMode::AddMember(member)) => {
            runtime.block_on(async { member_tools::add_member(config, member).await })
        }
        Some(AppMode::OpenApi) | None => {
            runtime.block_on(async { ModerationServer::new(config).run().await });
            ExitCode::SUCCESS
        }
    }
}
