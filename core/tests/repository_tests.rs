// tests/repository_tests.rs
mod common;

use common::*;
use rust_decimal_macros::dec;
use serial_test::serial;
use storefront::model::{Category, CategoryDraft, Review, ReviewDraft, User, UserDraft};
use storefront::{InMemoryRepository, Repository, StoreError};
use uuid::Uuid;

fn category(name: &str, slug: &str) -> CategoryDraft {
  CategoryDraft {
    name: name.to_string(),
    description: None,
    slug: slug.to_string(),
  }
}

fn user(username: &str) -> UserDraft {
  UserDraft {
    username: username.to_string(),
    email: format!("{username}@example.com"),
    password_hash: Some("$argon2id$v=19$m=19456,t=2,p=1$c2FsdA$aGFzaA".to_string()),
  }
}

#[tokio::test]
#[serial]
async fn test_category_crud() {
  setup_tracing();
  let repo = InMemoryRepository::<Category>::new();

  let created = repo.create(category("Laptops", "laptops")).await.unwrap();
  assert_eq!(repo.get(created.id).await.unwrap(), created);

  let updated = repo
    .update(
      created.id,
      CategoryDraft {
        description: Some("Portable computers".to_string()),
        ..category("Notebooks", "notebooks")
      },
    )
    .await
    .unwrap();
  assert_eq!(updated.id, created.id);
  assert_eq!(updated.name, "Notebooks");
  assert_eq!(updated.created_date, created.created_date);
  assert!(updated.updated_date >= created.updated_date);

  repo.delete(created.id).await.unwrap();
  assert!(matches!(
    repo.get(created.id).await,
    Err(StoreError::NotFound { resource: "category", .. })
  ));
  assert!(repo.is_empty());
}

#[tokio::test]
#[serial]
async fn test_list_is_oldest_first() {
  setup_tracing();
  let repo = InMemoryRepository::<Category>::new();
  let first = repo.create(category("Phones", "phones")).await.unwrap();
  let second = repo.create(category("Tablets", "tablets")).await.unwrap();
  let third = repo.create(category("Audio", "audio")).await.unwrap();

  let ids: Vec<Uuid> = repo.list().await.unwrap().into_iter().map(|c| c.id).collect();
  let mut expected = vec![first, second, third];
  expected.sort_by_key(|c| (c.created_date, c.id));
  assert_eq!(ids, expected.into_iter().map(|c| c.id).collect::<Vec<_>>());
}

#[tokio::test]
#[serial]
async fn test_duplicate_slug_conflicts() {
  setup_tracing();
  let repo = InMemoryRepository::<Category>::new();
  repo.create(category("Cameras", "cameras")).await.unwrap();

  match repo.create(category("Photo", "cameras")).await {
    Err(StoreError::Conflict(msg)) => assert!(msg.contains("slug 'cameras'"), "{msg}"),
    other => panic!("Expected Conflict, got {:?}", other),
  }
  assert_eq!(repo.len(), 1);
}

#[tokio::test]
#[serial]
async fn test_update_may_keep_own_unique_values() {
  setup_tracing();
  let repo = InMemoryRepository::<Category>::new();
  let tv = repo.create(category("TVs", "tvs")).await.unwrap();
  let other = repo.create(category("Consoles", "consoles")).await.unwrap();

  let same = repo
    .update(
      tv.id,
      CategoryDraft {
        description: Some("Televisions".to_string()),
        ..category("TVs", "tvs")
      },
    )
    .await
    .unwrap();
  assert_eq!(same.description.as_deref(), Some("Televisions"));

  assert!(matches!(
    repo.update(other.id, category("TVs", "consoles")).await,
    Err(StoreError::Conflict(_))
  ));
  assert_eq!(repo.get(other.id).await.unwrap().name, "Consoles");
}

#[tokio::test]
#[serial]
async fn test_invalid_drafts_are_rejected() {
  setup_tracing();
  let categories = InMemoryRepository::<Category>::new();
  match categories.create(category("Drones", "Drones!")).await {
    Err(StoreError::Validation(v)) => assert_eq!(v.field, "slug"),
    other => panic!("Expected Validation, got {:?}", other),
  }

  let shop = Storefront::new();
  let free = shop.products.create(product_draft("Sticker", dec!(0), 5)).await;
  assert!(matches!(free, Err(StoreError::Validation(ref v)) if v.field == "price"));
  let negative = shop.products.create(product_draft("Sticker pack", dec!(1.00), -1)).await;
  assert!(matches!(negative, Err(StoreError::Validation(ref v)) if v.field == "stock_quantity"));
  assert!(shop.products.is_empty());
}

#[tokio::test]
#[serial]
async fn test_unknown_ids_are_not_found() {
  setup_tracing();
  let repo = InMemoryRepository::<Category>::new();
  let id = Uuid::new_v4();
  assert!(matches!(repo.update(id, category("Misc", "misc")).await, Err(StoreError::NotFound { .. })));
  assert!(matches!(repo.delete(id).await, Err(StoreError::NotFound { .. })));
}

#[tokio::test]
#[serial]
async fn test_usernames_are_unique() {
  setup_tracing();
  let users = InMemoryRepository::<User>::new();
  let ada = users.create(user("ada")).await.unwrap();
  assert!(matches!(users.create(user("ada")).await, Err(StoreError::Conflict(_))));

  let json = serde_json::to_value(&ada).unwrap();
  assert!(json.get("password_hash").is_none());
  assert_eq!(json["username"], "ada");
}

#[tokio::test]
#[serial]
async fn test_user_replace_without_password_keeps_hash() {
  setup_tracing();
  let users = InMemoryRepository::<User>::new();

  let mut nameless = user("linus");
  nameless.password_hash = None;
  assert!(matches!(users.create(nameless).await, Err(StoreError::Validation(ref v)) if v.field == "password"));

  let linus = users.create(user("linus")).await.unwrap();
  let renamed = users
    .update(
      linus.id,
      UserDraft {
        email: "torvalds@example.com".to_string(),
        password_hash: None,
        ..user("linus")
      },
    )
    .await
    .unwrap();
  assert_eq!(renamed.email, "torvalds@example.com");
  assert_eq!(renamed.password_hash, linus.password_hash);

  let rehashed = users
    .update(
      linus.id,
      UserDraft {
        password_hash: Some("$argon2id$v=19$m=19456,t=2,p=1$bmV3$bmV3".to_string()),
        ..user("linus")
      },
    )
    .await
    .unwrap();
  assert_ne!(rehashed.password_hash, linus.password_hash);
}

#[tokio::test]
#[serial]
async fn test_review_rating_bounds() {
  setup_tracing();
  let reviews = InMemoryRepository::<Review>::new();
  let draft = |rating| ReviewDraft {
    product_id: Uuid::new_v4(),
    user_id: Uuid::new_v4(),
    rating,
    review_content: "Solid battery life.".to_string(),
  };

  assert!(reviews.create(draft(5)).await.is_ok());
  assert!(matches!(reviews.create(draft(0)).await, Err(StoreError::Validation(ref v)) if v.field == "rating"));
  assert!(matches!(reviews.create(draft(6)).await, Err(StoreError::Validation(_))));
  assert_eq!(reviews.len(), 1);
}
