#![allow(dead_code)]

use std::{
    path::PathBuf,
    sync::{
        Arc,
        atomic::{AtomicBool, AtomicUsize, Ordering},
    },
};

use config::{Config, file::ConfigFile};
use error_stack::Result;
use model::{
    ContentLookup, ContentPreview, ContentRef, ContentRemoval, MemberId, NewMember,
};
use server_data::{
    DataError, DatabaseManager, RouterDatabaseReadHandle,
    content::{ContentService, ContentServiceError},
    write_commands::WriteCommandRunnerHandle,
};
use simple_backend_config::{SimpleBackendConfig, args::ServerModeArgs, file::SimpleBackendConfigFile};
use simple_backend_utils::ContextExt;

/// Content service which keeps removed content in memory.
#[derive(Default)]
pub struct TestContentService {
    pub unavailable: AtomicBool,
    pub removals: AtomicUsize,
}

#[async_trait::async_trait]
impl ContentService for TestContentService {
    async fn fetch_content(
        &self,
        content: ContentRef,
    ) -> Result<ContentLookup, ContentServiceError> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(ContentServiceError::Unavailable.report());
        }
        if self.removals.load(Ordering::SeqCst) > 0 {
            return Ok(ContentLookup::NotFound);
        }
        Ok(ContentLookup::Found(ContentPreview {
            title: Some(format!("Thread {}", content.content_id)),
            body: "Reported text".to_string(),
        }))
    }

    async fn remove_content(
        &self,
        _content: ContentRef,
    ) -> Result<ContentRemoval, ContentServiceError> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(ContentServiceError::Unavailable.report());
        }
        if self.removals.fetch_add(1, Ordering::SeqCst) > 0 {
            Ok(ContentRemoval::AlreadyRemoved)
        } else {
            Ok(ContentRemoval::Removed)
        }
    }
}

pub struct TestContext {
    dir: PathBuf,
    manager: DatabaseManager,
    pub read: RouterDatabaseReadHandle,
    pub write: WriteCommandRunnerHandle,
    pub content: Arc<TestContentService>,
}

impl TestContext {
    pub async fn new(name: &str) -> Self {
        Self::with_config(name, ConfigFile::default()).await
    }

    pub async fn with_config(name: &str, file: ConfigFile) -> Self {
        let dir = std::env::temp_dir().join(format!(
            "moderation_server_data_test_{}_{}",
            name,
            std::process::id()
        ));
        let _ = std::fs::remove_dir_all(&dir);

        let args = ServerModeArgs {
            data_dir: Some(dir.clone()),
            sqlite_in_ram: false,
        };
        let simple_backend_config = SimpleBackendConfig::new(
            SimpleBackendConfigFile::minimal_config_for_api_doc_json(),
            args,
        )
        .unwrap();
        let config = Config::new(file, Arc::new(simple_backend_config), None).unwrap();

        let content = Arc::new(TestContentService::default());
        let (manager, read, write) = DatabaseManager::new(Arc::new(config), content.clone())
            .await
            .unwrap();

        Self {
            dir,
            manager,
            read,
            write: WriteCommandRunnerHandle::new(write),
            content,
        }
    }

    pub async fn add_member(&self, name: &str, admin: bool) -> MemberId {
        let data = NewMember {
            name: name.to_string(),
            admin,
        };
        self.write
            .write(move |cmds| async move { cmds.member().add_member(data).await })
            .await
            .unwrap()
            .member
    }

    pub async fn close(self) {
        self.manager.close().await;
        let _ = std::fs::remove_dir_all(&self.dir);
    }
}

pub fn is_error<T: std::fmt::Debug>(
    result: server_data::result::Result<T, DataError>,
    expected: fn(&DataError) -> bool,
) -> bool {
    match result {
        Ok(value) => panic!("Expected error, got {:?}", value),
        Err(e) => expected(e.current_context()),
    }
}
