//! Books happy path.

use crate::assertions::{assert_body_contains, assert_status_created, assert_status_in, assert_status_ok};
use crate::client::ApiClient;
use crate::config::{HTTP_200_OK, HTTP_204_NO_CONTENT};
use crate::error::Result;
use crate::models::Book;
use crate::scenario::Scenario;

use super::{ScenarioDef, first_id};

pub const GROUP: &str = "Books Happy Path Tests";

pub const SCENARIOS: &[ScenarioDef] = &[
    ScenarioDef {
        priority: 1,
        name: "get_all_books",
        description: "GET all books - Happy Path",
        run: |c| Box::pin(async move { get_all_books(&c).await }),
    },
    ScenarioDef {
        priority: 2,
        name: "get_book_by_id",
        description: "GET specific book by ID - Happy Path",
        run: |c| Box::pin(async move { get_book_by_id(&c).await }),
    },
    ScenarioDef {
        priority: 3,
        name: "create_book",
        description: "POST create new book - Happy Path",
        run: |c| Box::pin(async move { create_book(&c).await }),
    },
    ScenarioDef {
        priority: 4,
        name: "update_book",
        description: "PUT update book - Happy Path",
        run: |c| Box::pin(async move { update_book(&c).await }),
    },
    ScenarioDef {
        priority: 5,
        name: "delete_book",
        description: "DELETE book - Happy Path",
        run: |c| Box::pin(async move { delete_book(&c).await }),
    },
];

/// The payload `create_book` submits.
pub fn new_book() -> Book {
    Book {
        description: Some("A comprehensive guide to API automation testing".to_string()),
        excerpt: Some("Learn the best practices for API testing".to_string()),
        publish_date: Some("2024-02-08T00:00:00".to_string()),
        ..Book::draft("Automated Testing Guide", 350)
    }
}

async fn first_book_id(client: &ApiClient) -> Result<Option<i64>> {
    first_id::<Book>(client, &client.config().books_url(), |b| b.id).await
}

pub async fn get_all_books(client: &ApiClient) -> Result<()> {
    let s = Scenario::begin(GROUP, "Get All Books");

    s.step(1, "Making GET request to retrieve all books");
    let response = client.get(&client.config().books_url()).await?;

    s.step(2, "Verifying HTTP 200 status code");
    assert_status_ok(&response, "Expected HTTP 200 OK status code");

    s.step(3, "Validating response body contains books");
    assert_body_contains(&response, "id", "Response should contain book IDs");
    assert_body_contains(&response, "title", "Response should contain book titles");

    s.success("GET all books test passed");
    Ok(())
}

pub async fn get_book_by_id(client: &ApiClient) -> Result<()> {
    let s = Scenario::begin(GROUP, "Get Book By ID");

    s.step(1, "Fetching all books to get a valid ID");
    let Some(book_id) = first_book_id(client).await? else {
        panic!("Books list should not be empty");
    };
    s.info(format!("Using book ID: {book_id}"));

    s.step(2, format!("Making GET request for book ID: {book_id}"));
    let response = client.get(&client.config().book_url(book_id)).await?;

    s.step(3, "Verifying HTTP 200 status code");
    assert_status_ok(&response, "Expected HTTP 200 OK status code");

    s.step(4, "Validating book details");
    let book: Book = response.json()?;
    assert_eq!(book.id, book_id, "Book ID should match the requested ID");
    assert!(book.title.is_some(), "Book title should not be null");

    s.success("GET specific book test passed");
    Ok(())
}

pub async fn create_book(client: &ApiClient) -> Result<()> {
    let s = Scenario::begin(GROUP, "Create New Book");

    s.step(1, "Creating new book object");
    let book = new_book();
    s.info(format!("New book: {}", book.title()));

    s.step(2, "Sending POST request to create book");
    let response = client.post(&client.config().books_url(), &book).await?;

    s.step(3, "Verifying HTTP 201 Created status code");
    assert_status_created(&response, "Expected HTTP 201 Created status code");

    s.step(4, "Validating response contains created book");
    let created: Book = response.json()?;
    assert_eq!(created.title, book.title, "Title should match");
    assert!(created.id > 0, "Created book should have an ID");

    s.success("POST create book test passed");
    Ok(())
}

pub async fn update_book(client: &ApiClient) -> Result<()> {
    let s = Scenario::begin(GROUP, "Update Book");

    s.step(1, "Fetching first book to get valid ID");
    let Some(book_id) = first_book_id(client).await? else {
        panic!("Books list should not be empty");
    };
    s.info(format!("Using book ID: {book_id}"));

    s.step(2, "Creating updated book object");
    let updated = Book {
        id: book_id,
        description: Some("Updated description for comprehensive testing".to_string()),
        excerpt: Some("Master API testing techniques".to_string()),
        publish_date: Some("2024-02-08T00:00:00".to_string()),
        ..Book::draft("Updated: API Testing Masterclass", 400)
    };
    s.info(format!("Updated book title: {}", updated.title()));

    s.step(3, "Sending PUT request to update book");
    let response = client.put(&client.config().book_url(book_id), &updated).await?;

    s.step(4, "Verifying HTTP 200 OK status code");
    assert_status_ok(&response, "Expected HTTP 200 OK status code");

    s.success("PUT update book test passed");
    Ok(())
}

pub async fn delete_book(client: &ApiClient) -> Result<()> {
    let s = Scenario::begin(GROUP, "Delete Book");

    s.step(1, "Fetching a book to delete");
    let Some(book_id) = first_book_id(client).await? else {
        panic!("Books list should not be empty");
    };
    s.info(format!("Deleting book ID: {book_id}"));

    s.step(2, "Sending DELETE request");
    let response = client.delete(&client.config().book_url(book_id)).await?;

    s.step(3, "Verifying HTTP 200 or 204 status code");
    assert_status_in(
        &response,
        &[HTTP_200_OK, HTTP_204_NO_CONTENT],
        "Expected HTTP 200 or 204 status code",
    );

    s.success("DELETE book test passed");
    Ok(())
}
