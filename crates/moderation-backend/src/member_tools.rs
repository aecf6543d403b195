//! Member Directory bootstrap from the command line

use std::{process::ExitCode, sync::Arc};

use config::{Config, args::AddMemberArgs};
use model::NewMember;
use server_data::{
    DatabaseManager, content::DisabledContentService, write_commands::WriteCommandRunnerHandle,
};

pub async fn add_member(config: Config, args: AddMemberArgs) -> ExitCode {
    let (manager, _, write) =
        match DatabaseManager::new(Arc::new(config), Arc::new(DisabledContentService)).await {
            Ok(handles) => handles,
            Err(e) => {
                eprintln!("Database init failed: {:?}", e);
                return ExitCode::FAILURE;
            }
        };

    let data = NewMember {
        name: args.name,
        admin: args.admin,
    };
    let result = WriteCommandRunnerHandle::new(write)
        .write(move |cmds| async move { cmds.member().add_member(data).await })
        .await;

    manager.close().await;

    match result {
        Ok(credentials) => {
            println!("member_id: {}", credentials.member);
            println!("access_token: {}", credentials.access_token.as_str());
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Adding member failed: {:?}", e);
            ExitCode::FAILURE
        }
    }
}
