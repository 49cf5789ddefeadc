pub use approval::*;
pub use content::*;
pub use content_draft::*;
pub use content_kind::*;
pub use content_status::*;
pub use content_version::*;

mod approval;
mod content;
mod content_draft;
mod content_kind;
mod content_status;
mod content_version;
