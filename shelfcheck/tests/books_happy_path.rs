//! Books happy path against the stub catalog.

use http::Method;
use shelfcheck::prelude::*;
use shelfcheck::suites::{books, run_suite};
use shelfcheck::testing::{StubCatalog, StubOptions};

async fn stub() -> (StubCatalog, ApiClient) {
    TracingConfig::for_tests().init();
    let stub = StubCatalog::start().await.unwrap();
    let client = stub.client().unwrap();
    (stub, client)
}

#[tokio::test]
async fn test_get_all_books() {
    let (_stub, client) = stub().await;
    books::get_all_books(&client).await.unwrap();
}

#[tokio::test]
async fn test_get_book_by_id() {
    let (stub, client) = stub().await;
    books::get_book_by_id(&client).await.unwrap();

    let paths: Vec<String> = stub.requests().into_iter().map(|r| r.path).collect();
    assert_eq!(paths, ["/api/v1/Books", "/api/v1/Books/1"]);
}

#[tokio::test]
async fn test_get_first_listed_book_returns_same_id() {
    let stub = StubOptions::new().books(5).start().await.unwrap();
    let client = stub.client().unwrap();

    let listed: Vec<Book> = client
        .get(&client.config().books_url())
        .await
        .unwrap()
        .json()
        .unwrap();
    assert_eq!(listed.len(), 5);
    assert!(listed.iter().all(Book::is_valid));

    let first = &listed[0];
    let fetched: Book = client
        .get(&client.config().book_url(first.id))
        .await
        .unwrap()
        .json()
        .unwrap();
    assert_eq!(fetched.id, first.id);
    assert_eq!(&fetched, first);
}

#[tokio::test]
async fn test_create_book() {
    let (stub, client) = stub().await;
    books::create_book(&client).await.unwrap();

    let created = stub.inspect(|c| c.book(201).cloned()).unwrap();
    assert_eq!(created.title(), "Automated Testing Guide");
    assert_eq!(created.page_count, 350);
    assert!(created.is_valid());
}

#[tokio::test]
async fn test_create_book_response_echoes_title() {
    let (_stub, client) = stub().await;
    let response = client
        .post(&client.config().books_url(), &books::new_book())
        .await
        .unwrap();

    assert_status_created(&response, "Expected HTTP 201 Created status code");
    let created: Book = response.json().unwrap();
    assert_eq!(created.title(), "Automated Testing Guide");
    assert!(created.id > 0);
}

#[tokio::test]
async fn test_update_book() {
    let (stub, client) = stub().await;
    books::update_book(&client).await.unwrap();

    let updated = stub.inspect(|c| c.book(1).cloned()).unwrap();
    assert_eq!(updated.title(), "Updated: API Testing Masterclass");
    assert_eq!(updated.page_count, 400);

    let put = stub.requests().into_iter().find(|r| r.method == Method::PUT).unwrap();
    assert_eq!(put.path, "/api/v1/Books/1");
}

#[tokio::test]
async fn test_delete_book() {
    let (stub, client) = stub().await;
    books::delete_book(&client).await.unwrap();

    assert!(stub.inspect(|c| c.book(1).is_none()));
    assert_eq!(stub.inspect(|c| c.books().count()), 199);
}

#[tokio::test]
#[should_panic(expected = "Books list should not be empty")]
async fn test_get_book_by_id_requires_books() {
    let stub = StubOptions::new().books(0).start().await.unwrap();
    let client = stub.client().unwrap();
    books::get_book_by_id(&client).await.unwrap();
}

#[tokio::test]
async fn test_books_suite_in_priority_order() {
    let (stub, client) = stub().await;

    let outcome = run_suite(books::GROUP, books::SCENARIOS, &client).await;
    assert!(outcome.is_success(), "{:?}", outcome.failed);
    assert_eq!(
        outcome.passed,
        ["get_all_books", "get_book_by_id", "create_book", "update_book", "delete_book"]
    );

    let methods: Vec<Method> = stub.requests().into_iter().map(|r| r.method).collect();
    assert_eq!(methods.first(), Some(&Method::GET));
    assert_eq!(methods.last(), Some(&Method::DELETE));
}
