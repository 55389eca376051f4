//! In-memory catalog state and routing for the stub server.

use std::collections::BTreeMap;

use bytes::Bytes;
use http::{Method, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::{Value, json};

use crate::config::{AUTHORS_ENDPOINT, BOOKS_ENDPOINT};
use crate::models::{Author, Book};

/// What the router produced for one request.
#[derive(Debug, Clone, PartialEq)]
pub struct Reply {
    pub status: StatusCode,
    /// JSON body; `None` for an empty body.
    pub body: Option<Bytes>,
}

impl Reply {
    fn empty(status: StatusCode) -> Self {
        Self { status, body: None }
    }

    fn json(status: StatusCode, value: &impl Serialize) -> Self {
        match serde_json::to_vec(value) {
            Ok(body) => Self {
                status,
                body: Some(Bytes::from(body)),
            },
            Err(_) => Self::empty(StatusCode::INTERNAL_SERVER_ERROR),
        }
    }

    fn problem(status: StatusCode, title: &str) -> Self {
        Self::json(
            status,
            &json!({
                "type": "https://tools.ietf.org/html/rfc7231",
                "title": title,
                "status": status.as_u16(),
            }),
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Collection {
    Books,
    Authors,
}

/// Books and authors held by one stub instance.
///
/// The stub is as permissive as the public service: it stores a book with
/// a null title or a negative page count without complaint. Only malformed
/// JSON and non-numeric ids are rejected.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    books: BTreeMap<i64, Book>,
    authors: BTreeMap<i64, Author>,
}

impl Catalog {
    /// A catalog pre-filled with `books` books and `authors` authors.
    ///
    /// Book `n` has title `Book n` and `n * 100` pages; author `n` refers to
    /// book `(n + 1) / 2`.
    pub fn seeded(books: i64, authors: i64) -> Self {
        let mut catalog = Self::default();
        for id in 1..=books {
            catalog.books.insert(
                id,
                Book {
                    id,
                    title: Some(format!("Book {id}")),
                    description: Some("Lorem lorem lorem.".to_string()),
                    page_count: (id * 100) as i32,
                    excerpt: Some("Lorem ipsum dolor sit amet.".to_string()),
                    publish_date: Some("2024-02-08T00:00:00".to_string()),
                },
            );
        }
        for id in 1..=authors {
            catalog.authors.insert(
                id,
                Author {
                    id,
                    id_book: Some(((id + 1) / 2).to_string()),
                    first_name: Some(format!("First Name {id}")),
                    last_name: Some(format!("Last Name {id}")),
                },
            );
        }
        catalog
    }

    pub fn books(&self) -> impl Iterator<Item = &Book> {
        self.books.values()
    }

    pub fn authors(&self) -> impl Iterator<Item = &Author> {
        self.authors.values()
    }

    pub fn book(&self, id: i64) -> Option<&Book> {
        self.books.get(&id)
    }

    pub fn author(&self, id: i64) -> Option<&Author> {
        self.authors.get(&id)
    }

    /// Routes one request against the catalog.
    pub fn handle(&mut self, method: &Method, path: &str, body: &[u8]) -> Reply {
        let Some((collection, id)) = route(path) else {
            return Reply::problem(StatusCode::NOT_FOUND, "Not Found");
        };

        let id = match id.map(str::parse::<i64>) {
            None => None,
            Some(Ok(id)) => Some(id),
            Some(Err(_)) => {
                return Reply::problem(
                    StatusCode::BAD_REQUEST,
                    "One or more validation errors occurred.",
                );
            }
        };

        match collection {
            Collection::Books => dispatch(&mut self.books, method, id, body, book_json, |b, id| b.id = id),
            Collection::Authors => {
                dispatch(&mut self.authors, method, id, body, author_json, |a, id| a.id = id)
            }
        }
    }
}

fn route(path: &str) -> Option<(Collection, Option<&str>)> {
    let (collection, rest) = if let Some(rest) = path.strip_prefix(BOOKS_ENDPOINT) {
        (Collection::Books, rest)
    } else if let Some(rest) = path.strip_prefix(AUTHORS_ENDPOINT) {
        (Collection::Authors, rest)
    } else {
        return None;
    };

    match rest.trim_end_matches('/') {
        "" => Some((collection, None)),
        tail => {
            let id = tail.strip_prefix('/')?;
            (!id.contains('/')).then_some((collection, Some(id)))
        }
    }
}

fn dispatch<T>(
    items: &mut BTreeMap<i64, T>,
    method: &Method,
    id: Option<i64>,
    body: &[u8],
    render: fn(&T) -> Value,
    set_id: fn(&mut T, i64),
) -> Reply
where
    T: DeserializeOwned,
{
    match (method, id) {
        (&Method::GET, None) => {
            let all: Vec<Value> = items.values().map(render).collect();
            Reply::json(StatusCode::OK, &all)
        }
        (&Method::GET, Some(id)) => match items.get(&id) {
            Some(item) => Reply::json(StatusCode::OK, &render(item)),
            None => Reply::problem(StatusCode::NOT_FOUND, "Not Found"),
        },
        (&Method::POST, None) => {
            let Ok(mut item) = serde_json::from_slice::<T>(body) else {
                return Reply::problem(StatusCode::BAD_REQUEST, "Invalid JSON payload.");
            };
            let requested = serde_json::from_slice::<Value>(body)
                .ok()
                .and_then(|v| v.get("id").and_then(Value::as_i64))
                .unwrap_or_default();
            let id = if requested > 0 {
                requested
            } else {
                items.keys().next_back().copied().unwrap_or_default() + 1
            };
            set_id(&mut item, id);
            let reply = Reply::json(StatusCode::CREATED, &render(&item));
            items.insert(id, item);
            reply
        }
        (&Method::PUT, Some(id)) => {
            if !items.contains_key(&id) {
                return Reply::problem(StatusCode::NOT_FOUND, "Not Found");
            }
            let Ok(mut item) = serde_json::from_slice::<T>(body) else {
                return Reply::problem(StatusCode::BAD_REQUEST, "Invalid JSON payload.");
            };
            set_id(&mut item, id);
            let reply = Reply::json(StatusCode::OK, &render(&item));
            items.insert(id, item);
            reply
        }
        (&Method::DELETE, Some(id)) => match items.remove(&id) {
            Some(_) => Reply::empty(StatusCode::OK),
            None => Reply::problem(StatusCode::NOT_FOUND, "Not Found"),
        },
        _ => Reply::empty(StatusCode::METHOD_NOT_ALLOWED),
    }
}

fn book_json(book: &Book) -> Value {
    serde_json::to_value(book).unwrap_or(Value::Null)
}

/// The public service sends `idBook` as a number.
fn author_json(author: &Author) -> Value {
    let mut value = serde_json::to_value(author).unwrap_or(Value::Null);
    if let Some(id_book) = author.id_book.as_deref().and_then(|s| s.parse::<i64>().ok()) {
        value["idBook"] = Value::from(id_book);
    }
    value
}
