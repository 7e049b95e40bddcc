use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use url::Url;
use crate::books::domain::Book;
use crate::transactions::domain::Transaction;
use crate::utils::date::{format_due, serializer};

pub const ISSUED_BOOKS_TITLE: &str = "Issued Books";
pub const UNKNOWN_TITLE: &str = "Unknown Title";
pub const PLACEHOLDER_SYMBOL: &str = "book.fill";
pub const NO_ISSUED_BOOKS: &str = "No issued books found.";
pub const NO_MATCHING_ISSUED_BOOKS: &str = "No matching issued books found.";

// CoverPhase is the load state of a remote cover image on the client
#[derive(Debug, PartialEq, Eq, Clone, Copy, Serialize, Deserialize)]
pub enum CoverPhase {
    Loading,
    Loaded,
    Failed,
}

// CoverArt is the artwork shown on an issued book card
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CoverArt {
    Remote { url: String },
    Placeholder { symbol: String },
}

impl CoverArt {
    pub fn placeholder() -> Self {
        CoverArt::Placeholder { symbol: PLACEHOLDER_SYMBOL.to_string() }
    }

    // from_url keeps only absolute urls, anything else shows the placeholder
    pub fn from_url(cover_image_url: Option<&str>) -> Self {
        match cover_image_url.map(Url::parse) {
            Some(Ok(url)) => CoverArt::Remote { url: url.to_string() },
            _ => CoverArt::placeholder(),
        }
    }

    pub fn for_phase(&self, phase: CoverPhase) -> Self {
        match phase {
            CoverPhase::Failed => CoverArt::placeholder(),
            CoverPhase::Loading | CoverPhase::Loaded => self.clone(),
        }
    }
}

// IssuedBookCard is one row of the issued books screen
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub struct IssuedBookCard {
    pub transaction_id: String,
    pub book_id: String,
    pub title: String,
    pub member_label: String,
    pub due_label: String,
    #[serde(with = "serializer")]
    pub due_at: NaiveDateTime,
    pub cover: CoverArt,
}

impl IssuedBookCard {
    pub fn build<T: Transaction, B: Book>(transaction: &T, book: Option<&B>, due_date_fmt: &str) -> Self {
        IssuedBookCard {
            transaction_id: transaction.transaction_id().to_string(),
            book_id: transaction.book_id().to_string(),
            title: book.map(|b| b.title()).unwrap_or(UNKNOWN_TITLE).to_string(),
            member_label: format!("Member ID: {}", transaction.member_id()),
            due_label: format!("Due: {}", format_due(transaction.due_at(), due_date_fmt)),
            due_at: transaction.due_at(),
            cover: CoverArt::from_url(book.and_then(|b| b.cover_image_url())),
        }
    }
}

#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub struct IssuedBooksView {
    pub title: String,
    pub query: String,
    pub cards: Vec<IssuedBookCard>,
    pub empty_message: Option<String>,
}

impl IssuedBooksView {
    pub fn new(query: &str, cards: Vec<IssuedBookCard>) -> Self {
        let empty_message = if !cards.is_empty() {
            None
        } else if query.is_empty() {
            Some(NO_ISSUED_BOOKS.to_string())
        } else {
            Some(NO_MATCHING_ISSUED_BOOKS.to_string())
        };
        IssuedBooksView {
            title: ISSUED_BOOKS_TITLE.to_string(),
            query: query.to_string(),
            cards,
            empty_message,
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDateTime;
    use crate::books::dto::BookDto;
    use crate::core::library::TransactionStatus;
    use crate::issued::card::{CoverArt, CoverPhase, IssuedBookCard, IssuedBooksView, NO_ISSUED_BOOKS, NO_MATCHING_ISSUED_BOOKS, PLACEHOLDER_SYMBOL, UNKNOWN_TITLE};
    use crate::transactions::dto::TransactionDto;
    use crate::utils::date::DATE_FMT;

    fn issued(book_id: &str, member_id: &str) -> TransactionDto {
        let mut transaction = TransactionDto::new(book_id, member_id, TransactionStatus::Issued);
        transaction.due_at = NaiveDateTime::parse_from_str("2026-10-19T12:00:00", DATE_FMT).expect("should parse");
        transaction
    }

    #[tokio::test]
    async fn test_should_build_card_for_known_book() {
        let transaction = issued("A1", "M100");
        let book = BookDto::new("A1", "Dune");
        let card = IssuedBookCard::build(&transaction, Some(&book), "%b %-d");
        assert_eq!(transaction.transaction_id, card.transaction_id);
        assert_eq!("A1", card.book_id.as_str());
        assert_eq!("Dune", card.title.as_str());
        assert_eq!("Member ID: M100", card.member_label.as_str());
        assert_eq!("Due: Oct 19", card.due_label.as_str());
        assert_eq!(CoverArt::placeholder(), card.cover);
        let card = IssuedBookCard::build(&transaction, Some(&book), "%Q");
        assert_eq!("Due: Oct 19", card.due_label.as_str());
    }

    #[tokio::test]
    async fn test_should_build_card_for_missing_book() {
        let transaction = issued("ZZZ", "M100");
        let card = IssuedBookCard::build::<TransactionDto, BookDto>(&transaction, None, "%b %-d");
        assert_eq!(UNKNOWN_TITLE, card.title.as_str());
        assert_eq!(CoverArt::Placeholder { symbol: PLACEHOLDER_SYMBOL.to_string() }, card.cover);
    }

    #[tokio::test]
    async fn test_should_pick_cover_art() {
        assert_eq!(CoverArt::Remote { url: "https://covers.example.org/dune.jpg".to_string() },
                   CoverArt::from_url(Some("https://covers.example.org/dune.jpg")));
        assert_eq!(CoverArt::placeholder(), CoverArt::from_url(Some("not a url")));
        assert_eq!(CoverArt::placeholder(), CoverArt::from_url(Some("")));
        assert_eq!(CoverArt::placeholder(), CoverArt::from_url(None));

        let mut book = BookDto::new("A1", "Dune");
        book.cover_image_url = Some("https://covers.example.org/dune.jpg".to_string());
        let card = IssuedBookCard::build(&issued("A1", "M1"), Some(&book), "%b %-d");
        assert!(matches!(card.cover, CoverArt::Remote { .. }));
    }

    #[tokio::test]
    async fn test_should_fall_back_when_cover_fails() {
        let remote = CoverArt::from_url(Some("https://covers.example.org/dune.jpg"));
        assert_eq!(remote, remote.for_phase(CoverPhase::Loading));
        assert_eq!(remote, remote.for_phase(CoverPhase::Loaded));
        assert_eq!(CoverArt::placeholder(), remote.for_phase(CoverPhase::Failed));
        assert_eq!(CoverArt::placeholder(), CoverArt::placeholder().for_phase(CoverPhase::Loaded));
    }

    #[tokio::test]
    async fn test_should_pick_empty_message() {
        assert_eq!(Some(NO_ISSUED_BOOKS.to_string()), IssuedBooksView::new("", vec![]).empty_message);
        assert_eq!(Some(NO_MATCHING_ISSUED_BOOKS.to_string()), IssuedBooksView::new("dune", vec![]).empty_message);

        let card = IssuedBookCard::build::<TransactionDto, BookDto>(&issued("A1", "M1"), None, "%b %-d");
        let view = IssuedBooksView::new("m1", vec![card]);
        assert_eq!(None, view.empty_message);
        assert_eq!("Issued Books", view.title.as_str());
        assert_eq!("m1", view.query.as_str());
    }

    #[tokio::test]
    async fn test_should_serialize_cover_kind() {
        let json = serde_json::to_string(&CoverArt::placeholder()).expect("should serialize");
        assert_eq!("{\"kind\":\"placeholder\",\"symbol\":\"book.fill\"}", json);
    }
}
