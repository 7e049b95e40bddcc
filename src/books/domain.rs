pub mod model;

// Book is the read view of a catalog entry that the issued books screen joins on.
pub trait Book: Sync + Send {
    fn isbn(&self) -> &str;
    fn title(&self) -> &str;
    fn cover_image_url(&self) -> Option<&str>;
}
