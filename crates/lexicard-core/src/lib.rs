pub mod dictionary;
pub mod error;
pub mod markup;
pub mod parser;
pub mod phrases;
pub mod record;
pub mod session;

pub use dictionary::{Dictionary, HttpFetcher, PageFetcher};
pub use error::{CommandError, LookupError, RecordError};
pub use markup::{HtmlNode, MarkupNode};
pub use session::{PAGE_SIZE, Session, Transition};
