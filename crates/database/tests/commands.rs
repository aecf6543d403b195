use std::path::PathBuf;

use database::{
    DIESEL_MIGRATIONS, DieselConnection,
    current::{read::CurrentSyncReadCommands, write::CurrentSyncWriteCommands},
};
use diesel::{Connection, SqliteConnection};
use diesel_migrations::MigrationHarness;
use model::{
    AccessToken, ContentRef, ContentType, IssueWarning, MemberId, MemberStatus, ReportStatus,
    RoleFlags, SubmitReport, UnixTime,
};

struct TestDatabase {
    dir: PathBuf,
    conn: DieselConnection,
}

impl TestDatabase {
    fn new(name: &str) -> Self {
        let dir = std::env::temp_dir().join(format!(
            "moderation_database_test_{}_{}",
            name,
            std::process::id()
        ));
        let _ = std::fs::remove_dir_all(&dir);
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("current.db");
        let mut conn = SqliteConnection::establish(&path.to_string_lossy()).unwrap();
        conn.run_pending_migrations(DIESEL_MIGRATIONS).unwrap();
        Self { dir, conn }
    }

    fn write(&mut self) -> CurrentSyncWriteCommands<'_> {
        CurrentSyncWriteCommands::new(&mut self.conn)
    }

    fn read(&mut self) -> CurrentSyncReadCommands<'_> {
        CurrentSyncReadCommands::new(&mut self.conn)
    }
}

impl Drop for TestDatabase {
    fn drop(&mut self) {
        let _ = std::fs::remove_dir_all(&self.dir);
    }
}

fn thread_report(content_id: i64) -> SubmitReport {
    SubmitReport {
        content_type: ContentType::Thread,
        content_id,
        reason: "off-topic".to_string(),
    }
}

#[test]
fn new_member_is_active_without_warnings() {
    let mut db = TestDatabase::new("new_member");
    let id = db
        .write()
        .member()
        .insert_member("alice", RoleFlags::MEMBER, UnixTime::new(10))
        .unwrap();

    let member = db.read().member().member(id).unwrap().unwrap();
    assert_eq!(member.name, "alice");
    assert_eq!(member.status, MemberStatus::Active);
    assert_eq!(member.warning_count, 0);
    assert!(!member.roles.admin);
    assert!(db.read().member().member(MemberId::new(999)).unwrap().is_none());
}

#[test]
fn access_token_resolves_current_status() {
    let mut db = TestDatabase::new("token");
    let id = db
        .write()
        .member()
        .insert_member("admin", RoleFlags::MEMBER | RoleFlags::ADMIN, UnixTime::new(1))
        .unwrap();
    let token = AccessToken::generate_new();
    db.write().token().insert_access_token(id, &token).unwrap();

    let caller = db.read().token().caller_identity(&token).unwrap().unwrap();
    assert_eq!(caller.id, id);
    assert!(caller.is_admin());
    assert_eq!(caller.status, MemberStatus::Active);

    db.write()
        .member()
        .set_status(id, MemberStatus::Banned, None, Some("test"), UnixTime::new(2))
        .unwrap();
    let caller = db.read().token().caller_identity(&token).unwrap().unwrap();
    assert_eq!(caller.status, MemberStatus::Banned);

    let unknown = AccessToken::new("unknown".to_string());
    assert!(db.read().token().caller_identity(&unknown).unwrap().is_none());
}

#[test]
fn report_terminal_update_happens_only_once() {
    let mut db = TestDatabase::new("report_terminal");
    let reporter = db
        .write()
        .member()
        .insert_member("reporter", RoleFlags::MEMBER, UnixTime::new(1))
        .unwrap();
    let admin = db
        .write()
        .member()
        .insert_member("admin", RoleFlags::MEMBER | RoleFlags::ADMIN, UnixTime::new(1))
        .unwrap();

    let report = db
        .write()
        .report()
        .insert_report(reporter, &thread_report(42), UnixTime::new(5))
        .unwrap();
    assert_eq!(report.status, ReportStatus::Pending);
    assert_eq!(report.resolved_at, None);

    let updated = db
        .write()
        .report()
        .mark_terminal(
            report.id,
            ReportStatus::Resolved,
            admin,
            Some("Content removed"),
            UnixTime::new(6),
        )
        .unwrap();
    assert_eq!(updated, 1);

    let updated = db
        .write()
        .report()
        .mark_terminal(report.id, ReportStatus::Dismissed, admin, None, UnixTime::new(7))
        .unwrap();
    assert_eq!(updated, 0);

    let stored = db.read().report().report(report.id).unwrap().unwrap();
    assert_eq!(stored.status, ReportStatus::Resolved);
    assert_eq!(stored.resolved_at, Some(UnixTime::new(6)));
    assert_eq!(stored.resolved_by, Some(admin));
    assert_eq!(stored.action_taken.as_deref(), Some("Content removed"));
}

#[test]
fn terminal_update_changes_only_the_selected_report() {
    let mut db = TestDatabase::new("report_terminal_single_row");
    let reporter = db
        .write()
        .member()
        .insert_member("reporter", RoleFlags::MEMBER, UnixTime::new(1))
        .unwrap();
    let admin = db
        .write()
        .member()
        .insert_member("admin", RoleFlags::ADMIN, UnixTime::new(1))
        .unwrap();

    let resolved = db
        .write()
        .report()
        .insert_report(reporter, &thread_report(1), UnixTime::new(5))
        .unwrap();
    let other = db
        .write()
        .report()
        .insert_report(reporter, &thread_report(2), UnixTime::new(5))
        .unwrap();

    let updated = db
        .write()
        .report()
        .mark_terminal(
            resolved.id,
            ReportStatus::Resolved,
            admin,
            Some("Content removed"),
            UnixTime::new(6),
        )
        .unwrap();
    assert_eq!(updated, 1);

    let other = db.read().report().report(other.id).unwrap().unwrap();
    assert_eq!(other.status, ReportStatus::Pending);
    assert_eq!(other.resolved_at, None);
    assert_eq!(other.resolved_by, None);
    assert_eq!(other.action_taken, None);

    let updated = db
        .write()
        .report()
        .mark_terminal(other.id, ReportStatus::Dismissed, admin, None, UnixTime::new(7))
        .unwrap();
    assert_eq!(updated, 1);
}

#[test]
fn reports_are_listed_newest_first_and_filtered() {
    let mut db = TestDatabase::new("report_list");
    let reporter = db
        .write()
        .member()
        .insert_member("reporter", RoleFlags::MEMBER, UnixTime::new(1))
        .unwrap();
    let admin = db
        .write()
        .member()
        .insert_member("admin", RoleFlags::ADMIN, UnixTime::new(1))
        .unwrap();

    let first = db
        .write()
        .report()
        .insert_report(reporter, &thread_report(1), UnixTime::new(10))
        .unwrap();
    let second = db
        .write()
        .report()
        .insert_report(reporter, &thread_report(2), UnixTime::new(10))
        .unwrap();
    let third = db
        .write()
        .report()
        .insert_report(reporter, &thread_report(3), UnixTime::new(20))
        .unwrap();
    db.write()
        .report()
        .mark_terminal(second.id, ReportStatus::Dismissed, admin, None, UnixTime::new(30))
        .unwrap();

    let all: Vec<_> = db
        .read()
        .report()
        .reports(None)
        .unwrap()
        .into_iter()
        .map(|r| r.id)
        .collect();
    assert_eq!(all, vec![third.id, second.id, first.id]);

    let pending: Vec<_> = db
        .read()
        .report()
        .reports(Some(ReportStatus::Pending))
        .unwrap()
        .into_iter()
        .map(|r| r.id)
        .collect();
    assert_eq!(pending, vec![third.id, first.id]);
}

#[test]
fn pending_report_lookup_ignores_terminal_reports() {
    let mut db = TestDatabase::new("report_pending_lookup");
    let reporter = db
        .write()
        .member()
        .insert_member("reporter", RoleFlags::MEMBER, UnixTime::new(1))
        .unwrap();
    let content = ContentRef {
        content_type: ContentType::Thread,
        content_id: 42,
    };

    let report = db
        .write()
        .report()
        .insert_report(reporter, &thread_report(42), UnixTime::new(1))
        .unwrap();
    let found = db
        .read()
        .report()
        .pending_report_for_content(reporter, content)
        .unwrap();
    assert_eq!(found.map(|r| r.id), Some(report.id));

    db.write()
        .report()
        .mark_terminal(report.id, ReportStatus::Dismissed, reporter, None, UnixTime::new(2))
        .unwrap();
    let found = db
        .read()
        .report()
        .pending_report_for_content(reporter, content)
        .unwrap();
    assert!(found.is_none());
}

#[test]
fn warnings_are_listed_oldest_first_and_counted() {
    let mut db = TestDatabase::new("warnings");
    let member = db
        .write()
        .member()
        .insert_member("member", RoleFlags::MEMBER, UnixTime::new(1))
        .unwrap();
    let other = db
        .write()
        .member()
        .insert_member("other", RoleFlags::MEMBER, UnixTime::new(1))
        .unwrap();
    let admin = db
        .write()
        .member()
        .insert_member("admin", RoleFlags::ADMIN, UnixTime::new(1))
        .unwrap();

    let warning = |member: MemberId, content: Option<ContentRef>| IssueWarning {
        member,
        reason: "spam".to_string(),
        message: "Please stop".to_string(),
        content,
    };
    let content = ContentRef {
        content_type: ContentType::Comment,
        content_id: 7,
    };

    let first = db
        .write()
        .warning()
        .insert_warning(&warning(member, Some(content)), admin, UnixTime::new(5))
        .unwrap();
    db.write()
        .warning()
        .insert_warning(&warning(other, None), admin, UnixTime::new(6))
        .unwrap();
    let second = db
        .write()
        .warning()
        .insert_warning(&warning(member, None), admin, UnixTime::new(7))
        .unwrap();

    let warnings = db.read().warning().warnings_for_member(member).unwrap();
    assert_eq!(
        warnings.iter().map(|w| w.id).collect::<Vec<_>>(),
        vec![first.id, second.id]
    );
    assert_eq!(warnings[0].content, Some(content));
    assert_eq!(warnings[0].issued_by, admin);
    assert_eq!(db.read().warning().warning_count(member).unwrap(), 2);
    assert_eq!(db.read().warning().all_warnings().unwrap().len(), 3);
}

#[test]
fn warning_for_unknown_member_violates_foreign_key() {
    let mut db = TestDatabase::new("warning_fk");
    // Migrations do not enable foreign keys for this connection.
    diesel::RunQueryDsl::execute(diesel::sql_query("PRAGMA foreign_keys=ON;"), &mut db.conn)
        .unwrap();
    let admin = db
        .write()
        .member()
        .insert_member("admin", RoleFlags::ADMIN, UnixTime::new(1))
        .unwrap();
    let data = IssueWarning {
        member: MemberId::new(12345),
        reason: "spam".to_string(),
        message: "Please stop".to_string(),
        content: None,
    };
    assert!(
        db.write()
            .warning()
            .insert_warning(&data, admin, UnixTime::new(1))
            .is_err()
    );
}
