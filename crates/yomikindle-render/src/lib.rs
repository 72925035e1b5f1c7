pub mod error;
pub mod opf;
pub mod xhtml;

pub use error::RenderError;
pub use opf::PackageManifest;
pub use xhtml::{EntriesDocument, XhtmlOptions, render_documents, render_entries};
