use actix_web::web;

pub mod approvals;
pub mod content;
pub mod drafts;
pub mod history;

pub fn configure(cfg: &mut web::ServiceConfig) {
    content::configure(cfg);
    history::configure(cfg);
    drafts::configure(cfg);
    approvals::configure(cfg);
}
