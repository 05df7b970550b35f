// handlers/mod.rs - 3-Tier Handler Architecture
//
// Public (no auth) -> Protected (JWT auth) -> Elevated (JWT auth + ADMIN role)
//
// The tiers differ only in the middleware stacked on their routes in
// routes.rs; handlers themselves never re-check authentication.
pub mod elevated;
pub mod protected;
pub mod public;

/*
HANDLER LAYOUT:

src/handlers/
├── public/
│   ├── home.rs      ← GET /, GET /health
│   └── auth.rs      ← POST /auth/signup, POST /auth/signin
├── protected/
│   ├── todos.rs     ← /todos, /todos/:todo_id
│   ├── comments.rs  ← /todos/:todo_id/comments
│   ├── managers.rs  ← /todos/:todo_id/managers[/:manager_id]
│   └── users.rs     ← /users, /users/:user_id
└── elevated/
    └── admin.rs     ← /admin/users/:user_id, /admin/comments/:comment_id

Every handler takes State<AppState>, delegates to one service call and
returns ApiResult<T>, so errors leave through ApiError's envelope.
*/
