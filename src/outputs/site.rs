//! The static page shell.
//!
//! `index.html` embeds no article data; the client script fetches
//! `articles.json` at load time. The shell only changes when this constant
//! does, so the write is almost always skipped.

use crate::utils::write_if_changed;
use std::error::Error;
use tracing::instrument;

/// The fixed page shell, kept byte-identical to the deployed file.
const INDEX_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
        <meta charset="UTF-8">
        <meta name="viewport" content="width=device-width, initial-scale=1.0">
        <title>AI Articles</title>
        <link rel="stylesheet" href="css/main.css">
</head>
<body>
        <div id="header">
                <h1>AI Articles</h1>
        </div>
        <div id="articles">Loading articles...</div>
        <script src="js/main.js"></script>
</body>
</html>"#;

/// Write `index.html` into the output directory.
#[instrument(level = "info", skip_all, fields(output_dir = %output_dir))]
pub async fn write_index_html(output_dir: &str) -> Result<(), Box<dyn Error>> {
    let path = format!("{}/index.html", output_dir.trim_end_matches('/'));
    write_if_changed(&path, INDEX_HTML).await?;
    Ok(())
}
