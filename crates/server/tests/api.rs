use std::{path::PathBuf, sync::Arc};

use axum::{Router, body::Body};
use config::{Config, file::ConfigFile};
use http::{Request, StatusCode, header};
use model::{
    ContentLookup, ContentPreview, ContentRef, ContentRemoval, IssueWarningResult, Member,
    MemberId, MemberStatus, NewMember, Report, ReportStatus, WarningList,
};
use serde::de::DeserializeOwned;
use server::app::{AppState, routes_connected::ConnectedApp};
use server_data::{
    DatabaseManager,
    content::{ContentService, ContentServiceError},
    write_commands::WriteCommandRunnerHandle,
};
use simple_backend_config::{SimpleBackendConfig, args::ServerModeArgs, file::SimpleBackendConfigFile};
use tower::ServiceExt;

struct AlwaysAvailableContent;

#[async_trait::async_trait]
impl ContentService for AlwaysAvailableContent {
    async fn fetch_content(
        &self,
        _content: ContentRef,
    ) -> error_stack::Result<ContentLookup, ContentServiceError> {
        Ok(ContentLookup::Found(ContentPreview {
            title: Some("Thread".to_string()),
            body: "Text".to_string(),
        }))
    }

    async fn remove_content(
        &self,
        _content: ContentRef,
    ) -> error_stack::Result<ContentRemoval, ContentServiceError> {
        Ok(ContentRemoval::Removed)
    }
}

struct TestServer {
    dir: PathBuf,
    manager: DatabaseManager,
    write: WriteCommandRunnerHandle,
    router: Router,
}

struct TestMember {
    id: MemberId,
    token: String,
}

impl TestServer {
    async fn new(name: &str) -> Self {
        let dir = std::env::temp_dir().join(format!(
            "moderation_server_api_test_{}_{}",
            name,
            std::process::id()
        ));
        let _ = std::fs::remove_dir_all(&dir);

        let simple_backend_config = SimpleBackendConfig::new(
            SimpleBackendConfigFile::minimal_config_for_api_doc_json(),
            ServerModeArgs {
                data_dir: Some(dir.clone()),
                sqlite_in_ram: false,
            },
        )
        .unwrap();
        let config = Arc::new(
            Config::new(ConfigFile::default(), Arc::new(simple_backend_config), None).unwrap(),
        );

        let (manager, read, write) =
            DatabaseManager::new(config.clone(), Arc::new(AlwaysAvailableContent))
                .await
                .unwrap();
        let write = WriteCommandRunnerHandle::new(write);
        let state = AppState::create_app_state(read, write.clone(), config);
        let router = ConnectedApp::new(state).router();

        Self {
            dir,
            manager,
            write,
            router,
        }
    }

    async fn add_member(&self, name: &str, admin: bool) -> TestMember {
        let data = NewMember {
            name: name.to_string(),
            admin,
        };
        let credentials = self
            .write
            .write(move |cmds| async move { cmds.member().add_member(data).await })
            .await
            .unwrap();
        TestMember {
            id: credentials.member,
            token: credentials.access_token.into_string(),
        }
    }

    async fn request(
        &self,
        method: &str,
        path: &str,
        token: Option<&str>,
        body: Option<serde_json::Value>,
    ) -> (StatusCode, Vec<u8>) {
        let mut builder = Request::builder().method(method).uri(path);
        if let Some(token) = token {
            builder = builder.header("x-access-token", token);
        }
        let body = match body {
            Some(json) => {
                builder = builder.header(header::CONTENT_TYPE, "application/json");
                Body::from(json.to_string())
            }
            None => Body::empty(),
        };

        let response = self
            .router
            .clone()
            .oneshot(builder.body(body).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, bytes.to_vec())
    }

    async fn request_json<T: DeserializeOwned>(
        &self,
        method: &str,
        path: &str,
        token: &str,
        body: Option<serde_json::Value>,
    ) -> T {
        let (status, bytes) = self.request(method, path, Some(token), body).await;
        assert_eq!(status, StatusCode::OK, "{method} {path}");
        serde_json::from_slice(&bytes).unwrap()
    }

    async fn close(self) {
        drop(self.router);
        self.manager.close().await;
        let _ = std::fs::remove_dir_all(&self.dir);
    }
}

fn warning_json(member: MemberId, reason: &str) -> serde_json::Value {
    serde_json::json!({
        "member": { "mid": member.mid },
        "reason": reason,
        "message": "Please follow the forum rules",
        "content": null,
    })
}

#[tokio::test]
async fn warnings_escalate_to_ban_and_ban_is_enforced() {
    let server = TestServer::new("escalation").await;
    let admin = server.add_member("admin", true).await;
    let member = server.add_member("member", false).await;

    for _ in 0..2 {
        let result: IssueWarningResult = server
            .request_json(
                "POST",
                "/moderation_api/admin/issue_warning",
                &admin.token,
                Some(warning_json(member.id, "spam")),
            )
            .await;
        assert!(!result.automatic_ban);
    }

    let path = format!("/moderation_api/admin/member/{}", member.id.mid);
    let status: Member = server.request_json("GET", &path, &admin.token, None).await;
    assert_eq!(status.warning_count, 2);
    assert_eq!(status.status, MemberStatus::Active);

    let (code, _) = server
        .request("GET", "/moderation_api/member_status", Some(&member.token), None)
        .await;
    assert_eq!(code, StatusCode::OK);

    let third: IssueWarningResult = server
        .request_json(
            "POST",
            "/moderation_api/admin/issue_warning",
            &admin.token,
            Some(warning_json(member.id, "spam")),
        )
        .await;
    assert_eq!(third.warning_count, 3);
    assert!(third.automatic_ban);

    let status: Member = server.request_json("GET", &path, &admin.token, None).await;
    assert_eq!(status.status, MemberStatus::Banned);

    let report = serde_json::json!({
        "content_type": "Thread",
        "content_id": 1,
        "reason": "spam",
    });
    let (code, _) = server
        .request("POST", "/moderation_api/report", Some(&member.token), Some(report))
        .await;
    assert_eq!(code, StatusCode::FORBIDDEN);
    let (code, _) = server
        .request("GET", "/moderation_api/own_warnings", Some(&member.token), None)
        .await;
    assert_eq!(code, StatusCode::FORBIDDEN);

    let (code, _) = server
        .request(
            "POST",
            "/moderation_api/admin/issue_warning",
            Some(&admin.token),
            Some(warning_json(member.id, "spam")),
        )
        .await;
    assert_eq!(code, StatusCode::CONFLICT);

    let warnings_path = format!("/moderation_api/warnings/{}", member.id.mid);
    let warnings: WarningList = server
        .request_json("GET", &warnings_path, &admin.token, None)
        .await;
    assert_eq!(warnings.warnings.len(), 3);

    server.close().await;
}

#[tokio::test]
async fn resolved_report_can_not_be_resolved_again() {
    let server = TestServer::new("resolve").await;
    let admin = server.add_member("admin", true).await;
    let reporter = server.add_member("reporter", false).await;

    let report: Report = server
        .request_json(
            "POST",
            "/moderation_api/report",
            &reporter.token,
            Some(serde_json::json!({
                "content_type": "Thread",
                "content_id": 42,
                "reason": "off-topic",
            })),
        )
        .await;
    assert_eq!(report.status, ReportStatus::Pending);
    assert_eq!(report.reporter, reporter.id);

    let other: Report = server
        .request_json(
            "POST",
            "/moderation_api/report",
            &reporter.token,
            Some(serde_json::json!({
                "content_type": "Comment",
                "content_id": 43,
                "reason": "spam",
            })),
        )
        .await;

    let resolve = serde_json::json!({
        "report": { "rid": report.id.rid },
        "action_taken": "Content removed",
    });
    let resolved: Report = server
        .request_json(
            "POST",
            "/moderation_api/admin/resolve_report",
            &admin.token,
            Some(resolve.clone()),
        )
        .await;
    assert_eq!(resolved.status, ReportStatus::Resolved);
    assert_eq!(resolved.resolved_by, Some(admin.id));
    assert!(resolved.resolved_at.is_some());
    assert_eq!(resolved.action_taken.as_deref(), Some("Content removed"));

    let (code, _) = server
        .request(
            "POST",
            "/moderation_api/admin/resolve_report",
            Some(&admin.token),
            Some(resolve),
        )
        .await;
    assert_eq!(code, StatusCode::CONFLICT);

    let pending: model::ReportList = server
        .request_json(
            "GET",
            "/moderation_api/admin/reports?status=Pending",
            &admin.token,
            None,
        )
        .await;
    assert_eq!(pending.reports.len(), 1);
    assert_eq!(pending.reports[0].id, other.id);
    assert_eq!(pending.reports[0].resolved_by, None);
    assert_eq!(pending.reports[0].action_taken, None);

    server.close().await;
}

#[tokio::test]
async fn admin_routes_require_session_and_admin_role() {
    let server = TestServer::new("authorization").await;
    let member = server.add_member("member", false).await;
    let other = server.add_member("other", false).await;

    let (code, _) = server
        .request(
            "POST",
            "/moderation_api/admin/issue_warning",
            None,
            Some(warning_json(other.id, "spam")),
        )
        .await;
    assert_eq!(code, StatusCode::UNAUTHORIZED);

    let (code, _) = server
        .request(
            "POST",
            "/moderation_api/admin/issue_warning",
            Some("unknown-token"),
            Some(warning_json(other.id, "spam")),
        )
        .await;
    assert_eq!(code, StatusCode::UNAUTHORIZED);

    let (code, _) = server
        .request(
            "POST",
            "/moderation_api/admin/issue_warning",
            Some(&member.token),
            Some(warning_json(other.id, "spam")),
        )
        .await;
    assert_eq!(code, StatusCode::FORBIDDEN);

    let own_path = format!("/moderation_api/warnings/{}", member.id.mid);
    let (code, _) = server
        .request("GET", &own_path, Some(&member.token), None)
        .await;
    assert_eq!(code, StatusCode::OK);

    let other_path = format!("/moderation_api/warnings/{}", other.id.mid);
    let (code, _) = server
        .request("GET", &other_path, Some(&member.token), None)
        .await;
    assert_eq!(code, StatusCode::FORBIDDEN);

    server.close().await;
}

#[tokio::test]
async fn invalid_input_is_bad_request() {
    let server = TestServer::new("validation").await;
    let admin = server.add_member("admin", true).await;

    let (code, _) = server
        .request(
            "POST",
            "/moderation_api/report",
            Some(&admin.token),
            Some(serde_json::json!({
                "content_type": "Thread",
                "content_id": 1,
                "reason": "  ",
            })),
        )
        .await;
    assert_eq!(code, StatusCode::BAD_REQUEST);

    let (code, _) = server
        .request(
            "POST",
            "/moderation_api/report",
            Some(&admin.token),
            Some(serde_json::json!({
                "content_type": "Forum",
                "content_id": 1,
                "reason": "off-topic",
            })),
        )
        .await;
    assert_eq!(code, StatusCode::BAD_REQUEST);

    let (code, _) = server
        .request(
            "POST",
            "/moderation_api/report",
            Some(&admin.token),
            Some(serde_json::json!({
                "content_type": "Comment",
                "content_id": 1,
            })),
        )
        .await;
    assert_eq!(code, StatusCode::BAD_REQUEST);

    let (code, _) = server
        .request(
            "POST",
            "/moderation_api/admin/issue_warning",
            Some(&admin.token),
            Some(warning_json(MemberId::new(12345), "spam")),
        )
        .await;
    assert_eq!(code, StatusCode::NOT_FOUND);

    server.close().await;
}
