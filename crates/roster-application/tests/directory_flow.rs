//! End-to-end flows through the facade and orchestrator, against both record
//! store backings.

use std::sync::Arc;

use tempfile::TempDir;

use roster_application::bootstrap::build_directory;
use roster_application::directory_service::{fields, DirectoryService};
use roster_application::{DirectoryFacade, Reply};
use roster_core::config::{RosterConfig, StorageBacking};
use roster_core::error::RosterError;
use roster_core::notify::{DirectoryEvent, Notifier};
use roster_core::submission::{FilePart, FormSubmission};
use roster_core::user::UserRepository;
use roster_infrastructure::{JsonUserRepository, SqliteUserRepository, UploadStore};

async fn json_service(dir: &TempDir) -> DirectoryService {
    let repository = JsonUserRepository::open(dir.path().join("users.json"))
        .await
        .unwrap();
    let uploads = UploadStore::open(dir.path().join("uploads")).await.unwrap();
    DirectoryService::new(Arc::new(repository), uploads)
}

async fn sqlite_service(dir: &TempDir) -> DirectoryService {
    let repository = SqliteUserRepository::in_memory().await.unwrap();
    let uploads = UploadStore::open(dir.path().join("uploads")).await.unwrap();
    DirectoryService::new(Arc::new(repository), uploads)
}

async fn json_facade(dir: &TempDir) -> DirectoryFacade {
    DirectoryFacade::new(json_service(dir).await).unwrap()
}

fn create_bob() -> FormSubmission {
    FormSubmission::new()
        .with_field(fields::USER_NAME, "bob")
        .with_field(fields::EMAIL, "b@x.com")
        .with_field(fields::TELEPHONE, "555")
        .with_file(FilePart::new("bob.png", vec![0x89, 0x50, 0x4e, 0x47]))
}

#[tokio::test]
async fn test_create_search_edit_scenario() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let service = json_service(&dir).await;

    service.create_user(&create_bob()).await?;

    let bob = service.search_user("bob").await?;
    assert_eq!(bob.username, "bob");
    assert_eq!(bob.email, Some("b@x.com".to_string()));
    assert_eq!(bob.telephone, Some("555".to_string()));
    assert_eq!(bob.image, "bob.png");

    // Edit without a file: email changes, the stored image is kept
    let edit = FormSubmission::new()
        .with_field(fields::EDIT_USERNAME, "bob")
        .with_field(fields::USER_NAME, "bob")
        .with_field(fields::EMAIL, "new@x.com");
    service.edit_user(&edit).await?;

    let bob = service.search_user("bob").await?;
    assert_eq!(bob.email, Some("new@x.com".to_string()));
    assert_eq!(bob.telephone, None);
    assert_eq!(bob.image, "bob.png");
    Ok(())
}

#[tokio::test]
async fn test_create_stores_the_upload_on_disk() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let service = json_service(&dir).await;

    service.create_user(&create_bob()).await?;

    let stored = std::fs::read(dir.path().join("uploads").join("bob.png"))?;
    assert_eq!(stored, vec![0x89, 0x50, 0x4e, 0x47]);
    Ok(())
}

#[tokio::test]
async fn test_edit_with_new_file_replaces_image() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let service = json_service(&dir).await;

    service.create_user(&create_bob()).await?;

    let edit = FormSubmission::new()
        .with_field(fields::EDIT_USERNAME, "bob")
        .with_field(fields::USER_NAME, "bob")
        .with_file(FilePart::new("bob2.png", vec![1, 2]));
    service.edit_user(&edit).await?;

    let bob = service.search_user("bob").await?;
    assert_eq!(bob.image, "bob2.png");
    Ok(())
}

#[tokio::test]
async fn test_rename_preserves_identity_through_the_orchestrator() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let service = json_service(&dir).await;

    let create = FormSubmission::new().with_field(fields::USER_NAME, "alice");
    service.create_user(&create).await?;

    let rename = FormSubmission::new()
        .with_field(fields::EDIT_USERNAME, "alice")
        .with_field(fields::USER_NAME, "alice2")
        .with_field(fields::EMAIL, "a2@x.com");
    service.edit_user(&rename).await?;

    let err = service.search_user("alice").await.unwrap_err();
    assert!(err.is_not_found());

    let alice2 = service.search_user("alice2").await?;
    assert_eq!(alice2.email, Some("a2@x.com".to_string()));
    Ok(())
}

#[tokio::test]
async fn test_edit_missing_user_is_not_found() {
    let dir = TempDir::new().unwrap();
    let service = json_service(&dir).await;

    let edit = FormSubmission::new()
        .with_field(fields::EDIT_USERNAME, "ghost")
        .with_field(fields::USER_NAME, "ghost");
    let err = service.edit_user(&edit).await.unwrap_err();
    assert!(err.is_not_found());
}

#[tokio::test]
async fn test_sqlite_backing_runs_the_same_flows() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let service = sqlite_service(&dir).await;

    service.create_user(&create_bob()).await?;

    let edit = FormSubmission::new()
        .with_field(fields::EDIT_USERNAME, "bob")
        .with_field(fields::USER_NAME, "bob")
        .with_field(fields::EMAIL, "new@x.com");
    service.edit_user(&edit).await?;

    let bob = service.search_user("bob").await?;
    assert_eq!(bob.email, Some("new@x.com".to_string()));
    assert_eq!(bob.image, "bob.png");

    service.delete_user("bob").await?;
    assert!(service.search_user("bob").await.unwrap_err().is_not_found());
    Ok(())
}

// ---------------------------------------------------------------------------
// Facade reply mapping
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_create_redirects_to_index() {
    let dir = TempDir::new().unwrap();
    let facade = json_facade(&dir).await;

    let reply = facade.handle_create(&create_bob()).await;
    assert_eq!(reply, Reply::redirect_to_index());
}

#[tokio::test]
async fn test_duplicate_create_is_a_409() {
    let dir = TempDir::new().unwrap();
    let facade = json_facade(&dir).await;

    facade.handle_create(&create_bob()).await;
    let reply = facade.handle_create(&create_bob()).await;
    assert_eq!(reply.status(), 409);
}

#[tokio::test]
async fn test_search_replies_with_prefilled_edit_form() {
    let dir = TempDir::new().unwrap();
    let facade = json_facade(&dir).await;

    facade.handle_create(&create_bob()).await;
    let search = FormSubmission::new().with_field(fields::USERNAME, "bob");
    let reply = facade.handle_search(&search).await;

    assert_eq!(reply.status(), 200);
    let Reply::Html { body } = reply else {
        panic!("expected html reply");
    };
    assert!(body.contains(r#"name="edit-username" value="bob""#));
    assert!(body.contains("b@x.com"));
}

#[tokio::test]
async fn test_search_missing_user_is_a_404() {
    let dir = TempDir::new().unwrap();
    let facade = json_facade(&dir).await;

    let search = FormSubmission::new().with_field(fields::USERNAME, "ghost");
    assert_eq!(facade.handle_search(&search).await.status(), 404);
}

#[tokio::test]
async fn test_search_without_username_is_a_400() {
    let dir = TempDir::new().unwrap();
    let facade = json_facade(&dir).await;
    assert_eq!(facade.handle_search(&FormSubmission::new()).await.status(), 400);
}

#[tokio::test]
async fn test_delete_then_search_is_a_404() {
    let dir = TempDir::new().unwrap();
    let facade = json_facade(&dir).await;

    facade.handle_create(&create_bob()).await;
    let by_username = FormSubmission::new().with_field(fields::USERNAME, "bob");

    assert_eq!(
        facade.handle_delete(&by_username).await,
        Reply::redirect_to_index()
    );
    assert_eq!(facade.handle_search(&by_username).await.status(), 404);
    // A second delete finds nothing
    assert_eq!(facade.handle_delete(&by_username).await.status(), 404);
}

#[tokio::test]
async fn test_view_lists_every_user_in_creation_order() {
    let dir = TempDir::new().unwrap();
    let facade = json_facade(&dir).await;

    for name in ["carol", "alice", "bob"] {
        let create = FormSubmission::new().with_field(fields::USER_NAME, name);
        facade.handle_create(&create).await;
    }

    let reply = facade.handle_view().await;
    let Reply::Html { body } = reply else {
        panic!("expected html reply");
    };
    let carol = body.find("<h2>carol</h2>").unwrap();
    let alice = body.find("<h2>alice</h2>").unwrap();
    let bob = body.find("<h2>bob</h2>").unwrap();
    assert!(carol < alice && alice < bob);
}

// ---------------------------------------------------------------------------
// Notifier contract
// ---------------------------------------------------------------------------

struct FailingNotifier;

#[async_trait::async_trait]
impl Notifier for FailingNotifier {
    async fn notify(&self, _event: &DirectoryEvent) -> roster_core::Result<()> {
        Err(RosterError::internal("notification sink offline"))
    }
}

struct RecordingNotifier {
    events: std::sync::Mutex<Vec<DirectoryEvent>>,
}

#[async_trait::async_trait]
impl Notifier for RecordingNotifier {
    async fn notify(&self, event: &DirectoryEvent) -> roster_core::Result<()> {
        self.events.lock().unwrap().push(event.clone());
        Ok(())
    }
}

#[tokio::test]
async fn test_notifier_failure_does_not_affect_mutation_outcome() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let service = json_service(&dir).await.with_notifier(Arc::new(FailingNotifier));

    let created = service.create_user(&create_bob()).await?;
    assert_eq!(created.username, "bob");
    assert!(service.search_user("bob").await.is_ok());
    Ok(())
}

#[tokio::test]
async fn test_mutations_emit_outcome_events() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let notifier = Arc::new(RecordingNotifier {
        events: std::sync::Mutex::new(Vec::new()),
    });
    let service = json_service(&dir).await.with_notifier(notifier.clone());

    service.create_user(&create_bob()).await?;
    service.delete_user("bob").await?;
    let _ = service.delete_user("bob").await;

    let events = notifier.events.lock().unwrap();
    assert_eq!(
        *events,
        vec![
            DirectoryEvent::Created {
                username: "bob".to_string()
            },
            DirectoryEvent::Deleted {
                username: "bob".to_string()
            },
            DirectoryEvent::NotFound {
                username: "bob".to_string()
            },
        ]
    );
    Ok(())
}

// ---------------------------------------------------------------------------
// Bootstrap
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_bootstrap_builds_a_working_json_directory() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let config = RosterConfig {
        backing: StorageBacking::Json,
        data_file: dir.path().join("users.json"),
        upload_dir: dir.path().join("uploads"),
        ..RosterConfig::default()
    };

    let facade = build_directory(&config).await?;
    assert_eq!(
        facade.handle_create(&create_bob()).await,
        Reply::redirect_to_index()
    );
    assert!(dir.path().join("users.json").exists());
    Ok(())
}

#[tokio::test]
async fn test_repository_contract_is_object_safe() {
    // The facade only ever sees the trait object, whatever the backing
    let dir = TempDir::new().unwrap();
    let repository: Arc<dyn UserRepository> = Arc::new(
        JsonUserRepository::open(dir.path().join("users.json"))
            .await
            .unwrap(),
    );
    assert!(repository.list_all().await.unwrap().is_empty());
}
