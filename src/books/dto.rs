use serde::{Deserialize, Serialize};
use crate::books::domain::Book;
use crate::books::domain::model::BookEntity;

// BookDto is the catalog snapshot row: only what the issued books screen shows.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookDto {
    pub isbn: String,
    pub title: String,
    #[serde(default)]
    pub cover_image_url: Option<String>,
}

impl BookDto {
    pub fn new(isbn: &str, title: &str) -> BookDto {
        BookDto {
            isbn: isbn.to_string(),
            title: title.to_string(),
            cover_image_url: None,
        }
    }
}

impl Book for BookDto {
    fn isbn(&self) -> &str {
        self.isbn.as_str()
    }

    fn title(&self) -> &str {
        self.title.as_str()
    }

    fn cover_image_url(&self) -> Option<&str> {
        self.cover_image_url.as_deref()
    }
}

impl From<&BookEntity> for BookDto {
    fn from(entity: &BookEntity) -> Self {
        BookDto {
            isbn: entity.isbn.clone(),
            title: entity.title.clone(),
            cover_image_url: entity.cover_image_url.clone().filter(|url| !url.is_empty()),
        }
    }
}
