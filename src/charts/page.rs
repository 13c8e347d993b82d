//! HTML page holding both charts in their named containers.

pub const SCATTER_CONTAINER: &str = "scatterplot";
pub const BOXPLOT_CONTAINER: &str = "boxplot";

fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

/// Standalone page with the scatter SVG in `#scatterplot` and the boxplot
/// SVG in `#boxplot`.
pub fn render_page(title: &str, scatter_svg: &str, boxplot_svg: &str) -> String {
    let title = escape_html(title);
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>{title}</title>
</head>
<body>
<h1>{title}</h1>
<div id="{SCATTER_CONTAINER}">
{scatter_svg}
</div>
<div id="{BOXPLOT_CONTAINER}">
{boxplot_svg}
</div>
</body>
</html>
"#
    )
}
