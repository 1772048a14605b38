// Campaign CRUD plus the cohort/creative reads and edits the review UI uses.

pub mod handlers;
