// Search over currently issued books. Borrowing records are joined to catalog
// entries by isbn. A record is kept when it is still issued and its book title or
// member id contains the query, ignoring case. Inputs are only borrowed and the
// output is a stable subsequence of `transactions`.

use crate::books::domain::Book;
use crate::transactions::domain::Transaction;

// title matched against when the catalog has no entry for a record's book
pub const MISSING_TITLE: &str = "";

// resolve_book is a linear first-match scan, so filter_issued is O(transactions x books).
pub fn resolve_book<'a, B: Book>(books: &'a [B], book_id: &str) -> Option<&'a B> {
    books.iter().find(|book| book.isbn() == book_id)
}

// An empty query returns every issued transaction. The query is not trimmed.
pub fn filter_issued<'a, T: Transaction, B: Book>(transactions: &'a [T], books: &[B], query: &str) -> Vec<&'a T> {
    let issued = transactions.iter()
        .filter(|transaction| transaction.status().is_issued());
    if query.is_empty() {
        return issued.collect();
    }
    let needle = query.to_lowercase();
    issued.filter(|transaction| {
        let title = resolve_book(books, transaction.book_id())
            .map(|book| book.title())
            .unwrap_or(MISSING_TITLE);
        title.to_lowercase().contains(needle.as_str())
            || transaction.member_id().to_lowercase().contains(needle.as_str())
    }).collect()
}
