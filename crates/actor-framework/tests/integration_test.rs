use actor_framework::{ActorEntity, FrameworkError, ResourceActor};
use async_trait::async_trait;

// --- Test Entity ---

#[derive(Clone, Debug, PartialEq)]
struct Account {
    id: u32,
    email: String,
    name: String,
    verified: bool,
}

#[derive(Debug)]
struct AccountCreate {
    email: String,
    name: String,
}

#[derive(Debug)]
struct AccountUpdate {
    name: Option<String>,
}

#[derive(Debug)]
enum AccountAction {
    Verify,
}

#[derive(Debug, thiserror::Error)]
enum AccountError {
    #[error("name must not be empty")]
    EmptyName,
    #[error("account is pinned")]
    Pinned,
}

#[async_trait]
impl ActorEntity for Account {
    type Id = u32;
    type Create = AccountCreate;
    type Update = AccountUpdate;
    type Action = AccountAction;
    type ActionResult = bool;
    type Context = ();
    type Error = AccountError;

    fn from_create_params(id: u32, params: AccountCreate) -> Result<Self, Self::Error> {
        if params.name.trim().is_empty() {
            return Err(AccountError::EmptyName);
        }
        Ok(Self {
            id,
            email: params.email,
            name: params.name,
            verified: false,
        })
    }

    fn unique_key(&self) -> Option<String> {
        Some(self.email.to_lowercase())
    }

    async fn on_update(&mut self, update: AccountUpdate, _ctx: &()) -> Result<(), Self::Error> {
        if let Some(name) = update.name {
            if name.trim().is_empty() {
                return Err(AccountError::EmptyName);
            }
            self.name = name;
        }
        Ok(())
    }

    async fn on_delete(&self, _ctx: &()) -> Result<(), Self::Error> {
        if self.name == "pinned" {
            return Err(AccountError::Pinned);
        }
        Ok(())
    }

    async fn handle_action(&mut self, action: AccountAction, _ctx: &()) -> Result<bool, Self::Error> {
        match action {
            AccountAction::Verify => {
                let changed = !self.verified;
                self.verified = true;
                Ok(changed)
            }
        }
    }
}

fn account(email: &str, name: &str) -> AccountCreate {
    AccountCreate {
        email: email.into(),
        name: name.into(),
    }
}

// --- Tests ---

#[tokio::test]
async fn test_framework_full_lifecycle() {
    let (actor, client) = ResourceActor::<Account>::new(10);
    tokio::spawn(actor.run(()));

    // 1. Create
    let id: u32 = client.create(account("alice@example.com", "Alice")).await.unwrap();
    assert_eq!(id, 1);

    // 2. Action
    assert!(client.perform_action(id, AccountAction::Verify).await.unwrap());
    assert!(client.get(id).await.unwrap().unwrap().verified);

    // 3. Action again reports no change
    assert!(!client.perform_action(id, AccountAction::Verify).await.unwrap());

    // 4. Update
    let updated = client
        .update(id, AccountUpdate { name: Some("Alicia".into()) })
        .await
        .unwrap();
    assert_eq!(updated.name, "Alicia");

    // 5. Delete
    client.delete(id).await.unwrap();
    assert!(client.get(id).await.unwrap().is_none());
}

#[tokio::test]
async fn test_list_returns_ascending_ids() {
    let (actor, client) = ResourceActor::<Account>::new(10);
    tokio::spawn(actor.run(()));

    for i in 0..5 {
        client
            .create(account(&format!("user{i}@example.com"), &format!("User {i}")))
            .await
            .unwrap();
    }

    let all = client.list(|_| true).await.unwrap();
    assert_eq!(all.iter().map(|a| a.id).collect::<Vec<_>>(), vec![1, 2, 3, 4, 5]);

    let odd = client.list(|a: &Account| a.id % 2 == 1).await.unwrap();
    assert_eq!(odd.iter().map(|a| a.id).collect::<Vec<_>>(), vec![1, 3, 5]);
}

#[tokio::test]
async fn test_unique_key_conflict_reports_holder() {
    let (actor, client) = ResourceActor::<Account>::new(10);
    tokio::spawn(actor.run(()));

    let first = client.create(account("bob@example.com", "Bob")).await.unwrap();
    let err = client
        .create(account("BOB@example.com", "Other Bob"))
        .await
        .unwrap_err();

    match err {
        FrameworkError::Conflict { key, existing } => {
            assert_eq!(key, "bob@example.com");
            assert_eq!(existing, first.to_string());
        }
        other => panic!("expected conflict, got {other:?}"),
    }

    // The key is released once the holder is deleted.
    client.delete(first).await.unwrap();
    assert!(client.create(account("bob@example.com", "Bob again")).await.is_ok());
}

#[tokio::test]
async fn test_delete_where_skips_records_whose_hook_fails() {
    let (actor, client) = ResourceActor::<Account>::new(10);
    tokio::spawn(actor.run(()));

    client.create(account("a@example.com", "temp")).await.unwrap();
    client.create(account("b@example.com", "pinned")).await.unwrap();
    client.create(account("c@example.com", "temp")).await.unwrap();
    client.create(account("d@example.com", "keep")).await.unwrap();

    let removed = client
        .delete_where(|a: &Account| a.name != "keep")
        .await
        .unwrap();
    assert_eq!(removed, 2);

    let left = client.list(|_| true).await.unwrap();
    assert_eq!(
        left.iter().map(|a| a.name.as_str()).collect::<Vec<_>>(),
        vec!["pinned", "keep"]
    );
}

#[tokio::test]
async fn test_entity_errors_are_recoverable() {
    let (actor, client) = ResourceActor::<Account>::new(10);
    tokio::spawn(actor.run(()));

    let err = client.create(account("x@example.com", "  ")).await.unwrap_err();
    assert!(matches!(
        err.into_entity::<AccountError>(),
        Ok(AccountError::EmptyName)
    ));

    let missing = client.update(42, AccountUpdate { name: None }).await.unwrap_err();
    assert!(matches!(missing, FrameworkError::NotFound(id) if id == "42"));

    // A failed create does not consume the unique key.
    assert!(client.create(account("x@example.com", "Xavier")).await.is_ok());
}
