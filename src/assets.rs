use std::path::Path;

use tower_http::services::ServeDir;

/// Serve the pre-built site. Directory paths resolve to their `index.html`
/// and missing files get the service's plain 404.
pub fn serve(dir: &Path) -> ServeDir {
    ServeDir::new(dir).append_index_html_on_directories(true)
}
