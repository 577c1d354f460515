//! HTML View Helpers
//!
//! This module contains the small building blocks shared by every page:
//! attribute/text escaping, the document layout and the terminal error pages.
//! Page bodies themselves are produced by the `restaurant` and `menu` modules.

pub mod images;

pub use images::{ImageHostAllowList, ImageRejection, DEFAULT_IMAGE_HOSTS};

// =============================================================================
// Constants
// =============================================================================

/// Language tag used for every rendered document
pub const DOCUMENT_LANG: &str = "pt-BR";

/// Inline stylesheet shared by all pages.
///
/// `.line-clamp-2` performs the two-line description truncation; the
/// underlying text is always emitted in full.
const STYLES: &str = "\
body{margin:0;font-family:system-ui,sans-serif;color:#1f1f1f}\
a{color:inherit;text-decoration:none}\
.page{max-width:640px;margin:0 auto;padding:0 24px}\
.restaurant-page{display:flex;flex-direction:column;align-items:center;padding-top:96px;text-align:center}\
.restaurant-avatar{width:82px;height:82px;object-fit:contain}\
.welcome{padding-top:96px}\
.welcome p{opacity:.55}\
.consumption-methods{display:grid;grid-template-columns:1fr 1fr;gap:4px;padding-top:56px}\
.consumption-method{display:flex;flex-direction:column;align-items:center;gap:16px;padding:32px 16px;border:1px solid #eee;border-radius:12px}\
.consumption-method img{width:80px;height:80px;object-fit:contain}\
.consumption-method .button{border-radius:999px;border:1px solid #ccc;padding:6px 16px}\
.menu-cover img{width:100%;height:250px;object-fit:cover}\
.menu-header{display:flex;align-items:center;gap:12px;padding:20px 0}\
.menu-header img{width:45px;height:45px;object-fit:contain}\
.consumption-method-badge{font-size:.85rem;opacity:.7}\
.product-card{display:flex;align-items:center;justify-content:space-between;gap:40px;padding:12px 16px;border-bottom:1px solid #eee}\
.product-name{font-size:.875rem;font-weight:600;margin:0}\
.product-description{font-size:.875rem;color:#6b6b6b;margin:4px 0 0}\
.product-price{font-size:.875rem;font-weight:600;padding-top:12px;margin:0}\
.product-thumbnail{min-height:85px;min-width:100px}\
.product-thumbnail img{width:100px;height:85px;object-fit:contain;border-radius:8px}\
.line-clamp-2{display:-webkit-box;-webkit-line-clamp:2;-webkit-box-orient:vertical;overflow:hidden}\
.empty-state{padding:24px 0;text-align:center;opacity:.6}\
.product-hero img{width:100%;height:300px;object-fit:contain}\
.restaurant-badge{display:flex;align-items:center;gap:6px;font-size:.8rem;opacity:.7}\
.restaurant-badge img{width:16px;height:16px;border-radius:50%}\
.not-found{padding-top:120px;text-align:center}";

// =============================================================================
// Escaping
// =============================================================================

/// Escapes text so it can be placed inside element content or a quoted
/// attribute value.
pub fn escape(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            other => escaped.push(other),
        }
    }
    escaped
}

/// Renders an `<img>` element. The caller is responsible for having checked
/// `src` against the allow-list.
pub fn img_tag(src: &str, alt: &str, class: &str) -> String {
    format!(
        r#"<img src="{}" alt="{}" class="{}" loading="lazy">"#,
        escape(src),
        escape(alt),
        escape(class)
    )
}

// =============================================================================
// Documents
// =============================================================================

/// Wraps a page body in the shared HTML document.
pub fn layout(title: &str, body: &str) -> String {
    format!(
        concat!(
            "<!DOCTYPE html>",
            r#"<html lang="{lang}">"#,
            "<head>",
            r#"<meta charset="utf-8">"#,
            r#"<meta name="viewport" content="width=device-width, initial-scale=1">"#,
            "<title>{title}</title>",
            "<style>{styles}</style>",
            "</head>",
            r#"<body><main class="page">{body}</main></body>"#,
            "</html>"
        ),
        lang = DOCUMENT_LANG,
        title = escape(title),
        styles = STYLES,
        body = body,
    )
}

/// The terminal page served for unknown restaurants, products and routes.
pub fn not_found_page() -> String {
    layout(
        "Página não encontrada",
        concat!(
            r#"<div class="not-found">"#,
            "<h2>404</h2>",
            "<p>Página não encontrada.</p>",
            "</div>"
        ),
    )
}

/// Generic failure page. Never carries internal error details.
pub fn error_page() -> String {
    layout(
        "Erro",
        concat!(
            r#"<div class="not-found">"#,
            "<h2>Algo deu errado</h2>",
            "<p>Tente novamente em alguns instantes.</p>",
            "</div>"
        ),
    )
}
