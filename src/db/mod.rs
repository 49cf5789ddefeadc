pub use approvals::*;
pub use content::*;
pub use db::*;
pub use drafts::*;
pub use versions::*;

mod approvals;
mod content;
mod db;
mod drafts;
mod versions;
