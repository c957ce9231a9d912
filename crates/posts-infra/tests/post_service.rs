use std::sync::Arc;

use posts_core::ports::{PostRepository, TagRepository};
use posts_core::{DomainError, PostService};
use posts_infra::InMemoryStore;
use posts_shared::PostPayload;

fn service() -> (PostService, Arc<InMemoryStore>) {
    let store = Arc::new(InMemoryStore::new());
    (PostService::new(store.clone(), store.clone()), store)
}

fn payload(title: &str, author: &str, tags: Option<&[&str]>) -> PostPayload {
    PostPayload {
        title: title.to_owned(),
        content: format!("{title} content"),
        author: author.to_owned(),
        tags: tags.map(|t| t.iter().map(|s| s.to_string()).collect()),
        ..Default::default()
    }
}

#[tokio::test]
async fn test_create_resolves_new_tags() {
    let (service, store) = service();

    let created = service
        .create(payload("Hello", "ann", Some(&["Java", "Spring"])))
        .await
        .unwrap();

    assert!(created.id.is_some());
    assert_eq!(created.tags, Some(vec!["Java".to_string(), "Spring".to_string()]));
    assert!(created.created_at.is_some());
    assert_eq!(created.created_at, created.updated_at);
    assert!(store.find_by_name("Java").await.unwrap().is_some());
    assert!(store.find_by_name("Spring").await.unwrap().is_some());
}

#[tokio::test]
async fn test_create_reuses_existing_tag_record() {
    let (service, store) = service();

    service.create(payload("one", "ann", Some(&["Java"]))).await.unwrap();
    let java = store.find_by_name("Java").await.unwrap().unwrap();

    service.create(payload("two", "bob", Some(&["Java"]))).await.unwrap();
    let again = store.find_by_name("Java").await.unwrap().unwrap();

    assert_eq!(java.id, again.id);
    assert_eq!(service.get_by_tag("Java").await.unwrap().len(), 2);
}

#[tokio::test]
async fn test_create_skips_blank_and_trims_tag_names() {
    let (service, _) = service();

    let created = service
        .create(payload("t", "ann", Some(&["  Rust  ", "", "   ", "Rust"])))
        .await
        .unwrap();

    assert_eq!(created.tags, Some(vec!["Rust".to_string()]));
}

#[tokio::test]
async fn test_create_published_stamps_published_at() {
    let (service, _) = service();
    let mut input = payload("t", "ann", None);
    input.is_published = true;

    let created = service.create(input).await.unwrap();
    assert!(created.is_published);
    assert_eq!(created.published_at, created.created_at);

    let draft = service.create(payload("d", "ann", None)).await.unwrap();
    assert!(draft.published_at.is_none());
    assert_eq!(draft.tags, Some(vec![]));
}

#[tokio::test]
async fn test_get_by_id_missing_is_not_found() {
    let (service, _) = service();

    let err = service.get_by_id(99).await.unwrap_err();
    assert!(matches!(err, DomainError::NotFound { id: 99, .. }));
    assert_eq!(err.to_string(), "Post not found with id: 99");
}

#[tokio::test]
async fn test_update_with_null_tags_keeps_existing() {
    let (service, _) = service();
    let created = service
        .create(payload("t", "ann", Some(&["a", "b"])))
        .await
        .unwrap();
    let id = created.id.unwrap();

    let updated = service
        .update(id, payload("renamed", "ann", None))
        .await
        .unwrap();

    assert_eq!(updated.title, "renamed");
    assert_eq!(updated.tags, Some(vec!["a".to_string(), "b".to_string()]));
    assert_eq!(updated.created_at, created.created_at);
}

#[tokio::test]
async fn test_update_with_tag_list_replaces_associations() {
    let (service, _) = service();
    let id = service
        .create(payload("t", "ann", Some(&["a", "b"])))
        .await
        .unwrap()
        .id
        .unwrap();

    let updated = service
        .update(id, payload("t", "ann", Some(&["c"])))
        .await
        .unwrap();
    assert_eq!(updated.tags, Some(vec!["c".to_string()]));

    let cleared = service.update(id, payload("t", "ann", Some(&[]))).await.unwrap();
    assert_eq!(cleared.tags, Some(vec![]));
    assert!(service.get_by_tag("a").await.unwrap().is_empty());
}

#[tokio::test]
async fn test_update_leaves_published_at_alone() {
    let (service, _) = service();
    let id = service.create(payload("t", "ann", None)).await.unwrap().id.unwrap();
    let published = service.publish(id).await.unwrap();

    // Flag flips, timestamp stays.
    let updated = service.update(id, payload("t", "ann", None)).await.unwrap();
    assert!(!updated.is_published);
    assert_eq!(updated.published_at, published.published_at);
}

#[tokio::test]
async fn test_update_missing_is_not_found() {
    let (service, _) = service();
    let err = service.update(5, payload("t", "a", None)).await.unwrap_err();
    assert!(matches!(err, DomainError::NotFound { id: 5, .. }));
}

#[tokio::test]
async fn test_publish_and_unpublish() {
    let (service, _) = service();
    let id = service.create(payload("t", "ann", None)).await.unwrap().id.unwrap();

    let published = service.publish(id).await.unwrap();
    assert!(published.is_published);
    assert!(published.published_at.is_some());
    assert_eq!(service.get_published().await.unwrap().len(), 1);

    let unpublished = service.unpublish(id).await.unwrap();
    assert!(!unpublished.is_published);
    assert!(unpublished.published_at.is_none());
    assert!(service.get_published().await.unwrap().is_empty());

    assert!(matches!(
        service.publish(42).await,
        Err(DomainError::NotFound { id: 42, .. })
    ));
    assert!(matches!(
        service.unpublish(42).await,
        Err(DomainError::NotFound { id: 42, .. })
    ));
}

#[tokio::test]
async fn test_delete() {
    let (service, _) = service();
    let id = service.create(payload("t", "ann", None)).await.unwrap().id.unwrap();

    service.delete(id).await.unwrap();
    assert!(matches!(
        service.get_by_id(id).await,
        Err(DomainError::NotFound { .. })
    ));
    assert!(matches!(
        service.delete(id).await,
        Err(DomainError::NotFound { .. })
    ));
}

#[tokio::test]
async fn test_delete_by_author() {
    let (service, _) = service();
    for title in ["a", "b"] {
        service.create(payload(title, "ann", None)).await.unwrap();
    }
    service.create(payload("c", "bob", None)).await.unwrap();

    assert_eq!(service.delete_by_author("nobody").await.unwrap(), 0);
    assert_eq!(service.delete_by_author("ann").await.unwrap(), 2);

    let remaining = service.get_all().await.unwrap();
    assert_eq!(remaining.len(), 1);
    assert_eq!(remaining[0].author, "bob");
}

#[tokio::test]
async fn test_search_newest_first() {
    let (service, _) = service();
    service.create(payload("java basics", "ann", None)).await.unwrap();
    service.create(payload("python", "javafan", None)).await.unwrap();
    service.create(payload("go", "bob", None)).await.unwrap();

    let titles: Vec<String> = service
        .search("java")
        .await
        .unwrap()
        .into_iter()
        .map(|p| p.title)
        .collect();
    assert_eq!(titles, vec!["python", "java basics"]);
}

#[tokio::test]
async fn test_all_tag_names_are_distinct() {
    let (service, store) = service();
    service.create(payload("a", "ann", Some(&["Java", "Spring"]))).await.unwrap();
    service.create(payload("b", "bob", Some(&["Java"]))).await.unwrap();
    store.get_or_create("Unused", chrono::Utc::now()).await.unwrap();

    let mut names = service.get_all_tag_names().await.unwrap();
    names.sort();
    assert_eq!(names, vec!["Java", "Spring"]);
}

#[tokio::test]
async fn test_get_by_author_exact_match() {
    let (service, _) = service();
    service.create(payload("a", "ann", None)).await.unwrap();
    service.create(payload("b", "annie", None)).await.unwrap();

    let posts = service.get_by_author("ann").await.unwrap();
    assert_eq!(posts.len(), 1);
    assert_eq!(posts[0].title, "a");
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_creates_share_one_tag() {
    const WRITERS: usize = 64;
    let (service, store) = service();

    let handles: Vec<_> = (0..WRITERS)
        .map(|i| {
            let service = service.clone();
            let title = format!("post {i}");
            tokio::spawn(async move {
                service
                    .create(payload(&title, "ann", Some(&["Shared"])))
                    .await
            })
        })
        .collect();

    for handle in handles {
        let created = handle.await.unwrap().unwrap();
        assert_eq!(created.tags, Some(vec!["Shared".to_string()]));
    }

    let tag = store.find_by_name("Shared").await.unwrap().unwrap();
    let tagged = store.find_by_tag("Shared").await.unwrap();
    assert_eq!(tagged.len(), WRITERS);
    assert!(tagged.iter().all(|p| p.tags.ids() == vec![tag.id]));

    assert_eq!(service.get_by_tag("Shared").await.unwrap().len(), WRITERS);
    assert_eq!(service.get_all_tag_names().await.unwrap(), vec!["Shared"]);
}
