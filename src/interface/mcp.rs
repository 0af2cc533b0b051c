//! MCP Server for bookshelf-mcp
//!
//! MCP Protocol (stdio) <-> application::ShelfService / ShelfView
//!
//! 6 tools: add_book, toggle_book, edit_book, delete_book, search_books, list_books

use std::path::PathBuf;
use std::sync::{Arc, Mutex, RwLock};

use rmcp::{
    handler::server::{tool::ToolCallContext, tool::ToolRouter, wrapper::Parameters},
    model::{
        CallToolRequestParams, CallToolResult, Content, Implementation, ListToolsResult,
        PaginatedRequestParams, ProtocolVersion, ServerCapabilities, ServerInfo,
    },
    service::{RequestContext, RoleServer},
    tool, tool_router,
    transport::stdio,
    ErrorData as McpError, ServerHandler, ServiceExt,
};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::application::error::AppError;
use crate::application::service::ShelfService;
use crate::application::view::ShelfView;
use crate::domain::model::id::BookId;
use crate::infra::json_store::JsonShelfRepository;

// =============================================================================
// Public entry point
// =============================================================================

/// MCP Serverを起動する。data_dir配下の `books.json` を本棚として開く。
pub async fn run(data_dir: PathBuf) -> anyhow::Result<()> {
    let repo = JsonShelfRepository::in_dir(&data_dir);
    tracing::info!(path = %repo.path().display(), "opening shelf");
    let service = ShelfService::open(repo)?;

    let server = BookshelfMcpServer::new(service);
    let running = server.serve(stdio()).await?;
    running.waiting().await?;
    Ok(())
}

// =============================================================================
// Intents
// =============================================================================

/// UIからの操作。1回に1つずつ、届いた順に処理する。
#[derive(Debug, Clone, PartialEq, Eq)]
enum Intent {
    Add {
        title: String,
        author: String,
        year: String,
        is_complete: bool,
    },
    Toggle(BookId),
    Edit {
        id: BookId,
        title: String,
        author: String,
        year: String,
    },
    Delete(BookId),
    Search(String),
    List,
}

// =============================================================================
// MCP Server
// =============================================================================

#[derive(Clone)]
struct BookshelfMcpServer {
    shelf: Arc<Mutex<ShelfService<JsonShelfRepository>>>,
    /// 現在の検索語。変更操作の後もこの語で再描画する（追加時のみクリア）。
    search: Arc<RwLock<String>>,
    tool_router: ToolRouter<Self>,
}

impl BookshelfMcpServer {
    fn new(service: ShelfService<JsonShelfRepository>) -> Self {
        Self {
            shelf: Arc::new(Mutex::new(service)),
            search: Arc::new(RwLock::new(String::new())),
            tool_router: Self::tool_router(),
        }
    }

    fn to_mcp_error(e: AppError) -> McpError {
        match e {
            AppError::Domain(d) => McpError::invalid_params(format!("{d}"), None),
            other => McpError::internal_error(format!("{other}"), None),
        }
    }

    /// 操作 → Store変更 → 永続化 → 射影の再計算 → 描画。
    fn dispatch(&self, intent: Intent) -> Result<String, McpError> {
        let mut svc = self
            .shelf
            .lock()
            .map_err(|_| McpError::internal_error("Lock poisoned", None))?;
        let mut search = self
            .search
            .write()
            .map_err(|_| McpError::internal_error("Lock poisoned", None))?;

        let status = match intent {
            Intent::Add {
                title,
                author,
                year,
                is_complete,
            } => {
                let book = svc
                    .add(&title, &author, &year, is_complete)
                    .map_err(Self::to_mcp_error)?;
                search.clear();
                Some(format!("Added: {}", ShelfView::render_book(&book)))
            }
            Intent::Toggle(id) => {
                if svc.toggle_completion(id).map_err(Self::to_mcp_error)? {
                    svc.find(id).map(|b| {
                        let state = if b.is_complete() {
                            "finished"
                        } else {
                            "unfinished"
                        };
                        format!("Marked as {state}: {}", ShelfView::render_book(b))
                    })
                } else {
                    Some(no_such_book(id))
                }
            }
            Intent::Edit {
                id,
                title,
                author,
                year,
            } => {
                if svc
                    .edit(id, &title, &author, &year)
                    .map_err(Self::to_mcp_error)?
                {
                    svc.find(id)
                        .map(|b| format!("Updated: {}", ShelfView::render_book(b)))
                } else {
                    Some(no_such_book(id))
                }
            }
            Intent::Delete(id) => {
                let line = svc.find(id).map(ShelfView::render_book);
                if svc.delete(id).map_err(Self::to_mcp_error)? {
                    line.map(|l| format!("Deleted: {l}"))
                } else {
                    Some(no_such_book(id))
                }
            }
            Intent::Search(query) => {
                *search = query.trim().to_string();
                None
            }
            Intent::List => {
                search.clear();
                None
            }
        };

        let view = ShelfView::render(&svc.project(&search), &search);
        Ok(match status {
            Some(status) => format!("{status}\n\n{view}"),
            None => view,
        })
    }

    fn respond(&self, intent: Intent) -> Result<CallToolResult, McpError> {
        let text = self.dispatch(intent)?;
        Ok(CallToolResult::success(vec![Content::text(text)]))
    }
}

fn no_such_book(id: BookId) -> String {
    format!("No book with id {id}. Nothing changed.")
}

// =============================================================================
// ServerHandler impl
// =============================================================================

impl ServerHandler for BookshelfMcpServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::V_2025_03_26,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: "bookshelf-mcp".to_string(),
                title: Some("Bookshelf MCP - Reading List".to_string()),
                description: Some(
                    "Personal bookshelf split into unfinished and finished lists, \
                     with title search."
                        .to_string(),
                ),
                version: env!("CARGO_PKG_VERSION").to_string(),
                icons: None,
                website_url: None,
            },
            instructions: Some(
                "Keep track of books and whether they have been read.\n\
                 \n\
                 Tools: `list_books` to see the shelf, `add_book` to add, \
                 `toggle_book` / `edit_book` / `delete_book` with an id from the list, \
                 `search_books` to filter by title. Every tool returns the updated shelf."
                    .to_string(),
            ),
        }
    }

    async fn list_tools(
        &self,
        _request: Option<PaginatedRequestParams>,
        _context: RequestContext<RoleServer>,
    ) -> Result<ListToolsResult, McpError> {
        Ok(ListToolsResult {
            tools: self.tool_router.list_all(),
            next_cursor: None,
            meta: None,
        })
    }

    async fn call_tool(
        &self,
        request: CallToolRequestParams,
        context: RequestContext<RoleServer>,
    ) -> Result<CallToolResult, McpError> {
        let tool_ctx = ToolCallContext::new(self, request, context);
        self.tool_router.call(tool_ctx).await
    }
}

// =============================================================================
// Request types
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
struct McpAddBookRequest {
    #[schemars(description = "Book title (required)")]
    pub title: String,
    #[schemars(description = "Author name (required)")]
    pub author: String,
    #[schemars(description = "Publication year as an integer, e.g. '2005'")]
    pub year: String,
    #[schemars(description = "Already read? (default: false)")]
    #[serde(default)]
    pub is_complete: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
struct McpBookIdRequest {
    #[schemars(description = "Book id shown in brackets in the shelf listing")]
    pub id: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
struct McpEditBookRequest {
    #[schemars(description = "Book id shown in brackets in the shelf listing")]
    pub id: i64,
    #[schemars(description = "New title (required)")]
    pub title: String,
    #[schemars(description = "New author (required)")]
    pub author: String,
    #[schemars(description = "New publication year (required)")]
    pub year: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
struct McpSearchRequest {
    #[schemars(description = "Case-insensitive title substring. Empty shows all books.")]
    #[serde(default)]
    pub query: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
struct McpListRequest {}

// =============================================================================
// Tool implementations
// =============================================================================

#[tool_router]
impl BookshelfMcpServer {
    #[tool(
        name = "add_book",
        description = "Add a book to the shelf. Title, author and an integer year are required. Clears the active search.",
        annotations(
            read_only_hint = false,
            destructive_hint = false,
            idempotent_hint = false,
            open_world_hint = false
        )
    )]
    async fn add_book(
        &self,
        Parameters(req): Parameters<McpAddBookRequest>,
    ) -> Result<CallToolResult, McpError> {
        self.respond(Intent::Add {
            title: req.title,
            author: req.author,
            year: req.year,
            is_complete: req.is_complete,
        })
    }

    #[tool(
        name = "toggle_book",
        description = "Move a book between the unfinished and finished lists.",
        annotations(
            read_only_hint = false,
            destructive_hint = false,
            idempotent_hint = false,
            open_world_hint = false
        )
    )]
    async fn toggle_book(
        &self,
        Parameters(req): Parameters<McpBookIdRequest>,
    ) -> Result<CallToolResult, McpError> {
        self.respond(Intent::Toggle(BookId::from(req.id)))
    }

    #[tool(
        name = "edit_book",
        description = "Replace a book's title, author and year. All three are required; if any is invalid nothing changes.",
        annotations(
            read_only_hint = false,
            destructive_hint = false,
            idempotent_hint = true,
            open_world_hint = false
        )
    )]
    async fn edit_book(
        &self,
        Parameters(req): Parameters<McpEditBookRequest>,
    ) -> Result<CallToolResult, McpError> {
        self.respond(Intent::Edit {
            id: BookId::from(req.id),
            title: req.title,
            author: req.author,
            year: req.year,
        })
    }

    #[tool(
        name = "delete_book",
        description = "Permanently remove a book from the shelf.",
        annotations(
            read_only_hint = false,
            destructive_hint = true,
            idempotent_hint = true,
            open_world_hint = false
        )
    )]
    async fn delete_book(
        &self,
        Parameters(req): Parameters<McpBookIdRequest>,
    ) -> Result<CallToolResult, McpError> {
        self.respond(Intent::Delete(BookId::from(req.id)))
    }

    #[tool(
        name = "search_books",
        description = "Filter both lists by title (case-insensitive substring). The search stays active for later toggle/edit/delete calls.",
        annotations(
            read_only_hint = true,
            destructive_hint = false,
            open_world_hint = false
        )
    )]
    async fn search_books(
        &self,
        Parameters(req): Parameters<McpSearchRequest>,
    ) -> Result<CallToolResult, McpError> {
        self.respond(Intent::Search(req.query))
    }

    #[tool(
        name = "list_books",
        description = "Show the whole shelf and clear the active search.",
        annotations(
            read_only_hint = true,
            destructive_hint = false,
            open_world_hint = false
        )
    )]
    async fn list_books(
        &self,
        Parameters(_req): Parameters<McpListRequest>,
    ) -> Result<CallToolResult, McpError> {
        self.respond(Intent::List)
    }
}
