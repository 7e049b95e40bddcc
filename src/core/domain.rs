use serde::{Deserialize, Serialize};
use crate::utils::date::DUE_DATE_FMT;

// Identifiable defines common traits that can be shared by persistent objects
pub trait Identifiable : Sync + Send {
    fn id(&self) -> String;
    fn version(&self) -> i64;
}

// Configuration abstracts config options for the issued books service
#[derive(Debug, PartialEq, Serialize, Deserialize, Clone)]
pub struct Configuration {
    pub branch_id: String,
    // chrono pattern for the due date printed on issued book cards
    pub due_date_fmt: String,
    // page size used by providers when loading a full snapshot from a repository
    pub load_page_size: usize,
}

impl Configuration {
    pub fn new(branch_id: &str) -> Self {
        Configuration {
            branch_id: branch_id.to_string(),
            due_date_fmt: DUE_DATE_FMT.to_string(),
            load_page_size: 100,
        }
    }
}
