// api/mod.rs - Request extraction shared by every handler tier
//
// Extractors here turn axum rejections into ApiError so every failure,
// including a malformed body or query string, leaves in the same envelope.

pub mod extract;
pub mod todo_query;

pub use extract::{not_blank, ApiPath, ApiQuery, ValidatedJson};
pub use todo_query::TodoListParams;
