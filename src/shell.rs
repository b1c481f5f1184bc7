//! HTML shell loaded into every preview panel
//!
//! The shell bootstraps the externally-bundled renderer (script plus
//! stylesheet) and gives it a mount point. Everything after that happens
//! over the wire protocol in [`crate::wire`].

/// Build the panel's HTML document.
///
/// `js_url` and `css_url` point at the bundled renderer assets; `title`
/// is the previewed file's display name.
pub fn panel_shell(title: &str, js_url: &str, css_url: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
  <head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{title}</title>
    <script type="module" crossorigin src="{js_url}"></script>
    <link rel="stylesheet" href="{css_url}">
  </head>
  <body>
    <div id="app"></div>
  </body>
</html>"#
    )
}
