use mdsnips_core::models::search::{SearchParams, SortBy};
use mdsnips_core::models::snippet::{NewSnippet, UpdateSnippet};
use mdsnips_store::{MemorySnippetStore, SnippetStore, StoreError};

fn new_snippet(title: &str, body: &str) -> NewSnippet {
    NewSnippet {
        title: title.to_string(),
        body: body.to_string(),
    }
}

#[tokio::test]
async fn orders_are_exact_reversals() {
    let store = MemorySnippetStore::new();
    for i in 0..5 {
        store
            .create(&new_snippet(&format!("t{i}"), "body"))
            .await
            .unwrap();
    }

    let params = |sort_by| SearchParams {
        text: None,
        limit: 10,
        skip: 0,
        sort_by,
    };
    let asc = store.search(&params(SortBy::CreateDateAsc)).await.unwrap();
    let mut desc = store.search(&params(SortBy::CreateDateDesc)).await.unwrap();
    desc.reverse();
    assert_eq!(asc, desc);
    assert_eq!(asc.len(), 5);
}

#[tokio::test]
async fn text_match_is_case_insensitive_any_term() {
    let store = MemorySnippetStore::new();
    store
        .create(&new_snippet("Tokio notes", "spawn_blocking and timeouts"))
        .await
        .unwrap();
    store
        .create(&new_snippet("Serde", "derive macros"))
        .await
        .unwrap();

    let hits = store
        .search(&SearchParams {
            text: Some("TOKIO macros".to_string()),
            ..SearchParams::default()
        })
        .await
        .unwrap();
    assert_eq!(hits.len(), 2);

    let hits = store
        .search(&SearchParams {
            text: Some("axum".to_string()),
            ..SearchParams::default()
        })
        .await
        .unwrap();
    assert!(hits.is_empty());
}

#[tokio::test]
async fn update_and_delete_behave_like_the_index_store() {
    let store = MemorySnippetStore::new();
    let created = store.create(&new_snippet("a", "b")).await.unwrap();

    let err = store
        .update(&UpdateSnippet {
            id: "missing".to_string(),
            ..UpdateSnippet::default()
        })
        .await
        .unwrap_err();
    assert!(matches!(err, StoreError::NotFound { .. }));

    assert!(!store.delete(&created.snippet.id, "nope").await.unwrap());
    assert!(store.delete(&created.snippet.id, &created.update_key).await.unwrap());
    assert!(store.get(&created.snippet.id).await.unwrap().is_none());
}
