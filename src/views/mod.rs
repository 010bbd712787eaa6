//! Server-rendered HTML pages.

pub mod dashboard;
pub mod format;
pub mod order_form;
pub mod order_view;
pub mod print;

pub use dashboard::render_dashboard;
pub use order_form::render_order_form;
pub use order_view::render_order_view;
pub use print::render_print;

use crate::utils::flash::FlashMessage;
use self::format::html_escape;

/// Wraps page content in the shared layout.
pub fn layout(title: &str, flash: Option<&FlashMessage>, body: &str) -> String {
    let flash_html = flash
        .map(|f| {
            format!(
                r#"<div class="flash flash-{}">{}</div>"#,
                f.level.as_str(),
                html_escape(&f.message)
            )
        })
        .unwrap_or_default();

    format!(
        r#"<!DOCTYPE html>
<html lang="pt-BR">
<head>
    <meta charset="utf-8">
    <meta name="viewport" content="width=device-width, initial-scale=1">
    <title>{title} - AM Licita</title>
    <style>{style}</style>
</head>
<body>
    <header class="topbar">
        <a href="/" class="brand">AM Licita</a>
        <nav><a href="/">Ordens</a> <a href="/ordem/nova" class="btn">Nova ordem</a></nav>
    </header>
    <main>
        {flash_html}
        {body}
    </main>
</body>
</html>"#,
        title = html_escape(title),
        style = STYLE,
        flash_html = flash_html,
        body = body
    )
}

const STYLE: &str = r#"
body { font-family: system-ui, sans-serif; margin: 0; background: #f5f6f8; color: #222; }
.topbar { display: flex; justify-content: space-between; align-items: center; padding: 12px 24px; background: #1f3a5f; }
.topbar a { color: #fff; text-decoration: none; margin-left: 12px; }
.brand { font-weight: bold; font-size: 1.2em; margin-left: 0 !important; }
main { max-width: 1100px; margin: 24px auto; padding: 0 16px; }
.flash { padding: 10px 14px; border-radius: 4px; margin-bottom: 16px; }
.flash-success { background: #e3f6e8; border: 1px solid #7cc68d; }
.flash-error { background: #fbe5e5; border: 1px solid #e08a8a; }
.stats { display: grid; grid-template-columns: repeat(auto-fit, minmax(150px, 1fr)); gap: 12px; margin-bottom: 20px; }
.stat { background: #fff; padding: 12px; border-radius: 6px; }
.stat strong { display: block; font-size: 1.4em; }
table { width: 100%; border-collapse: collapse; background: #fff; }
th, td { padding: 8px 10px; border-bottom: 1px solid #e3e3e3; text-align: left; }
td.num, th.num { text-align: right; }
.badge { padding: 2px 8px; border-radius: 10px; font-size: 0.85em; }
.badge-pendente { background: #fff3cd; }
.badge-concluida { background: #d4edda; }
.badge-cancelada { background: #f8d7da; }
.btn { display: inline-block; padding: 6px 12px; border: 0; border-radius: 4px; background: #2d6cdf; color: #fff; cursor: pointer; text-decoration: none; }
.btn-danger { background: #c0392b; }
form.inline { display: inline; }
fieldset { border: 1px solid #ddd; background: #fff; margin-bottom: 16px; }
label { display: block; margin: 6px 0; }
input, textarea, select { padding: 6px; width: 100%; box-sizing: border-box; }
"#;
