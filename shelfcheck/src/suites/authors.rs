//! Authors happy path.
//!
//! The scenarios that need an existing author skip quietly when the
//! collection is empty.

use crate::assertions::{assert_status_in, assert_status_ok};
use crate::client::ApiClient;
use crate::config::{HTTP_200_OK, HTTP_201_CREATED, HTTP_204_NO_CONTENT};
use crate::error::Result;
use crate::models::Author;
use crate::response::ApiResponse;
use crate::scenario::Scenario;

use super::{ScenarioDef, first_id};

pub const GROUP: &str = "Authors Happy Path Tests";

pub const SCENARIOS: &[ScenarioDef] = &[
    ScenarioDef {
        priority: 1,
        name: "get_all_authors",
        description: "GET all authors - Happy Path",
        run: |c| Box::pin(async move { get_all_authors(&c).await }),
    },
    ScenarioDef {
        priority: 2,
        name: "get_author_by_id",
        description: "GET specific author by ID - Happy Path",
        run: |c| Box::pin(async move { get_author_by_id(&c).await }),
    },
    ScenarioDef {
        priority: 3,
        name: "create_author",
        description: "POST create new author - Happy Path",
        run: |c| Box::pin(async move { create_author(&c).await }),
    },
    ScenarioDef {
        priority: 4,
        name: "update_author",
        description: "PUT update author - Happy Path",
        run: |c| Box::pin(async move { update_author(&c).await }),
    },
    ScenarioDef {
        priority: 5,
        name: "delete_author",
        description: "DELETE author - Happy Path",
        run: |c| Box::pin(async move { delete_author(&c).await }),
    },
];

async fn first_author_id(client: &ApiClient) -> Result<Option<i64>> {
    first_id::<Author>(client, &client.config().authors_url(), |a| a.id).await
}

fn assert_author_payload(response: &ApiResponse) {
    let body = response.text();
    assert!(
        body.contains("firstName") || body.contains("id"),
        "Response should contain author information"
    );
}

pub async fn get_all_authors(client: &ApiClient) -> Result<()> {
    let s = Scenario::begin(GROUP, "Get All Authors");

    s.step(1, "Making GET request to retrieve all authors");
    let response = client.get(&client.config().authors_url()).await?;

    s.step(2, "Verifying HTTP 200 status code");
    assert_status_ok(&response, "Expected HTTP 200 OK status code");

    s.step(3, "Validating response body contains authors");
    assert_author_payload(&response);

    s.success("GET all authors test passed");
    Ok(())
}

pub async fn get_author_by_id(client: &ApiClient) -> Result<()> {
    let s = Scenario::begin(GROUP, "Get Author By ID");

    s.step(1, "Fetching all authors to get a valid ID");
    let Some(author_id) = first_author_id(client).await? else {
        s.info("No authors found in API");
        return Ok(());
    };
    s.info(format!("Using author ID: {author_id}"));

    s.step(2, format!("Making GET request for author ID: {author_id}"));
    let response = client.get(&client.config().author_url(author_id)).await?;

    s.step(3, "Verifying HTTP 200 status code");
    assert_status_ok(&response, "Expected HTTP 200 OK status code");

    s.step(4, "Validating author details");
    let author: Author = response.json()?;
    assert_eq!(author.id, author_id, "Author ID should match the requested ID");

    s.success("GET specific author test passed");
    Ok(())
}

pub async fn create_author(client: &ApiClient) -> Result<()> {
    let s = Scenario::begin(GROUP, "Create New Author");

    s.step(1, "Creating new author object");
    let author = Author::named("John", "Doe").with_book("1");
    s.info(format!("New author: {}", author.full_name()));

    s.step(2, "Sending POST request to create author");
    let response = client.post(&client.config().authors_url(), &author).await?;

    s.step(3, "Verifying response status code");
    s.info(format!("Response status code: {}", response.status_code()));
    assert_status_in(
        &response,
        &[HTTP_200_OK, HTTP_201_CREATED],
        "Expected HTTP 200 or 201 status code",
    );

    s.step(4, "Validating response");
    assert_author_payload(&response);

    s.success("POST create author test passed");
    Ok(())
}

pub async fn update_author(client: &ApiClient) -> Result<()> {
    let s = Scenario::begin(GROUP, "Update Author");

    s.step(1, "Fetching first author to get valid ID");
    let Some(author_id) = first_author_id(client).await? else {
        s.info("No authors found to update");
        return Ok(());
    };
    s.info(format!("Using author ID: {author_id}"));

    s.step(2, "Creating updated author object");
    let updated = Author {
        id: author_id,
        ..Author::named("Jane", "Smith").with_book("1")
    };
    s.info(format!("Updated author name: {}", updated.full_name()));

    s.step(3, "Sending PUT request to update author");
    let response = client.put(&client.config().author_url(author_id), &updated).await?;

    s.step(4, "Verifying HTTP 200 OK status code");
    assert_status_ok(&response, "Expected HTTP 200 OK status code");

    s.success("PUT update author test passed");
    Ok(())
}

pub async fn delete_author(client: &ApiClient) -> Result<()> {
    let s = Scenario::begin(GROUP, "Delete Author");

    s.step(1, "Fetching an author to delete");
    let Some(author_id) = first_author_id(client).await? else {
        s.info("No authors found to delete");
        return Ok(());
    };
    s.info(format!("Deleting author ID: {author_id}"));

    s.step(2, "Sending DELETE request");
    let response = client.delete(&client.config().author_url(author_id)).await?;

    s.step(3, "Verifying response status code");
    assert_status_in(
        &response,
        &[HTTP_200_OK, HTTP_204_NO_CONTENT],
        "Expected HTTP 200 or 204 status code",
    );

    s.success("DELETE author test passed");
    Ok(())
}
